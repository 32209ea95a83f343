//! Test request builder.

use crate::TestError;
use bytes::Bytes;
use http::{header, Method, Request};
use intake_extract::{Params, RequestSources};
use serde::Serialize;

/// An in-memory request, turned into [`RequestSources`] for an endpoint.
///
/// # Example
///
/// ```
/// use intake_test::TestRequest;
///
/// let sources = TestRequest::put("/users/42?ids=1,2")
///     .path_param("user_id", "42")
///     .json(&serde_json::json!({ "name": "Alice" }))
///     .into_sources();
///
/// assert_eq!(sources.content_type(), Some("application/json"));
/// ```
#[derive(Debug, Clone)]
pub struct TestRequest {
    method: Method,
    path: String,
    query: String,
    path_params: Params,
    body: Bytes,
    content_type: Option<String>,
}

impl TestRequest {
    /// Creates a request. Anything after `?` in `uri` is the query string.
    pub fn new(method: Method, uri: impl AsRef<str>) -> Self {
        let uri = uri.as_ref();
        let (path, query) = uri.split_once('?').unwrap_or((uri, ""));
        Self {
            method,
            path: path.to_string(),
            query: query.to_string(),
            path_params: Params::new(),
            body: Bytes::new(),
            content_type: None,
        }
    }

    /// Creates a GET request.
    pub fn get(uri: impl AsRef<str>) -> Self {
        Self::new(Method::GET, uri)
    }

    /// Creates a POST request.
    pub fn post(uri: impl AsRef<str>) -> Self {
        Self::new(Method::POST, uri)
    }

    /// Creates a PUT request.
    pub fn put(uri: impl AsRef<str>) -> Self {
        Self::new(Method::PUT, uri)
    }

    /// Creates a PATCH request.
    pub fn patch(uri: impl AsRef<str>) -> Self {
        Self::new(Method::PATCH, uri)
    }

    /// Adds a path parameter, as a router would after matching.
    #[must_use]
    pub fn path_param(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.path_params.push(name, value);
        self
    }

    /// Appends a percent-encoded query parameter.
    #[must_use]
    pub fn query_param(mut self, name: impl AsRef<str>, value: impl AsRef<str>) -> Self {
        if !self.query.is_empty() {
            self.query.push('&');
        }
        self.query.push_str(&urlencoding::encode(name.as_ref()));
        self.query.push('=');
        self.query.push_str(&urlencoding::encode(value.as_ref()));
        self
    }

    /// Sets the raw body.
    #[must_use]
    pub fn body(mut self, body: impl Into<Bytes>) -> Self {
        self.body = body.into();
        self
    }

    /// Sets the `Content-Type`.
    #[must_use]
    pub fn content_type(mut self, content_type: impl Into<String>) -> Self {
        self.content_type = Some(content_type.into());
        self
    }

    /// Sets a JSON body and `Content-Type: application/json`.
    ///
    /// # Panics
    ///
    /// Panics if `value` cannot be serialized.
    #[must_use]
    pub fn json<T: Serialize + ?Sized>(self, value: &T) -> Self {
        self.try_json(value).expect("JSON serialization should succeed")
    }

    /// Fallible form of [`json`](Self::json).
    ///
    /// # Errors
    ///
    /// Returns [`TestError::Json`] if `value` cannot be serialized.
    pub fn try_json<T: Serialize + ?Sized>(self, value: &T) -> Result<Self, TestError> {
        let bytes = serde_json::to_vec(value)?;
        Ok(self.body(bytes).content_type("application/json"))
    }

    /// Sets a form-urlencoded body and its `Content-Type`.
    ///
    /// # Panics
    ///
    /// Panics if `value` cannot be form-encoded.
    ///
    /// # Example
    ///
    /// ```
    /// use intake_test::TestRequest;
    ///
    /// let sources = TestRequest::post("/users")
    ///     .form(&[("name", "Alice"), ("tags", "go,rust")])
    ///     .into_sources();
    ///
    /// assert_eq!(sources.body().as_ref(), b"name=Alice&tags=go%2Crust");
    /// ```
    #[must_use]
    pub fn form<T: Serialize + ?Sized>(self, value: &T) -> Self {
        self.try_form(value).expect("form encoding should succeed")
    }

    /// Fallible form of [`form`](Self::form).
    ///
    /// # Errors
    ///
    /// Returns [`TestError::Form`] if `value` cannot be form-encoded.
    pub fn try_form<T: Serialize + ?Sized>(self, value: &T) -> Result<Self, TestError> {
        let encoded = serde_urlencoded::to_string(value)?;
        Ok(self
            .body(encoded)
            .content_type("application/x-www-form-urlencoded"))
    }

    /// The request method.
    #[must_use]
    pub fn method(&self) -> &Method {
        &self.method
    }

    /// The raw query string, without `?`.
    #[must_use]
    pub fn query(&self) -> &str {
        &self.query
    }

    /// Builds the request sources directly.
    #[must_use]
    pub fn into_sources(self) -> RequestSources {
        let mut builder = RequestSources::builder()
            .path_params(self.path_params)
            .body(self.body);
        if !self.query.is_empty() {
            builder = builder.query(self.query);
        }
        if let Some(content_type) = self.content_type {
            builder = builder.content_type(content_type);
        }
        builder.build()
    }

    /// Builds an `http::Request`, returning it with the path parameters a
    /// router would have produced.
    ///
    /// # Errors
    ///
    /// Returns [`TestError::RequestBuild`] if the URI or a header is invalid.
    pub fn into_http_request(self) -> Result<(Request<Bytes>, Params), TestError> {
        let uri = if self.query.is_empty() {
            self.path
        } else {
            format!("{}?{}", self.path, self.query)
        };

        let mut builder = Request::builder().method(self.method).uri(uri);
        if let Some(content_type) = &self.content_type {
            builder = builder.header(header::CONTENT_TYPE, content_type.as_str());
        }

        let request = builder
            .body(self.body)
            .map_err(|e| TestError::RequestBuild(e.to_string()))?;
        Ok((request, self.path_params))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use intake_core::SourceKind;

    #[test]
    fn test_uri_split() {
        let request = TestRequest::get("/search?tags=tech&rating=4");
        assert_eq!(request.method(), &Method::GET);
        assert_eq!(request.query(), "tags=tech&rating=4");

        let sources = request.into_sources();
        assert_eq!(sources.lookup(SourceKind::Query, "rating").text, "4");
    }

    #[test]
    fn test_query_param_is_encoded() {
        let request = TestRequest::get("/search")
            .query_param("tags", "a b,c&d")
            .query_param("rating", "3");
        assert_eq!(request.query(), "tags=a%20b%2Cc%26d&rating=3");

        let sources = request.into_sources();
        assert_eq!(sources.lookup(SourceKind::Query, "tags").text, "a b,c&d");
    }

    #[test]
    fn test_path_param() {
        let sources = TestRequest::put("/users/7").path_param("user_id", "7").into_sources();
        let raw = sources.lookup(SourceKind::Path, "user_id");
        assert!(raw.present);
        assert_eq!(raw.text, "7");
    }

    #[test]
    fn test_json_body() {
        let sources = TestRequest::post("/users")
            .json(&serde_json::json!({ "name": "Alice" }))
            .into_sources();
        assert_eq!(sources.body().as_ref(), br#"{"name":"Alice"}"#);
        assert_eq!(sources.content_type(), Some("application/json"));
    }

    #[test]
    fn test_into_http_request() {
        let (request, params) = TestRequest::post("/users?dry_run=1")
            .path_param("org", "acme")
            .body("{}")
            .content_type("application/json")
            .into_http_request()
            .unwrap();

        assert_eq!(request.uri().query(), Some("dry_run=1"));
        assert_eq!(
            request.headers().get(header::CONTENT_TYPE).unwrap(),
            "application/json"
        );
        assert_eq!(params.get("org"), Some("acme"));

        let (parts, body) = request.into_parts();
        let sources = RequestSources::from_http_parts(&parts, body, params);
        assert_eq!(sources.lookup(SourceKind::Query, "dry_run").text, "1");
    }
}

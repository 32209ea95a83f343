//! Request sources.
//!
//! [`RequestSources`] is everything one request contributes to extraction:
//! the parsed query string, path parameters, and the raw body with its
//! content type. A query string with broken percent escapes or escapes that
//! are not UTF-8 is flagged as malformed rather than repaired.

use crate::urlencoded::parse_pairs;
use crate::Params;
use bytes::Bytes;
use http::header::CONTENT_TYPE;
use intake_core::SourceKind;

/// The raw text found for one key.
///
/// `present` distinguishes "key supplied with empty text" from "key absent".
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RawValue {
    /// The raw text; empty when absent.
    pub text: String,
    /// Whether the key was supplied at all.
    pub present: bool,
}

impl RawValue {
    /// A supplied value.
    #[must_use]
    pub fn present(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            present: true,
        }
    }

    /// An absent value.
    #[must_use]
    pub fn absent() -> Self {
        Self::default()
    }
}

/// Query pairs, path parameters and body of a single request.
///
/// # Example
///
/// ```rust
/// use intake_core::SourceKind;
/// use intake_extract::RequestSources;
///
/// let sources = RequestSources::builder()
///     .query("tags=tech,music&tags=ignored")
///     .path_param("user_id", "42")
///     .build();
///
/// assert_eq!(sources.lookup(SourceKind::Query, "tags").text, "tech,music");
/// assert!(sources.lookup(SourceKind::Path, "user_id").present);
/// assert!(!sources.lookup(SourceKind::Path, "team_id").present);
/// ```
#[derive(Debug, Clone, Default)]
pub struct RequestSources {
    query: Vec<(String, String)>,
    query_malformed: bool,
    path_params: Params,
    body: Bytes,
    content_type: Option<String>,
}

impl RequestSources {
    /// Creates a builder.
    #[must_use]
    pub fn builder() -> RequestSourcesBuilder {
        RequestSourcesBuilder::default()
    }

    /// Builds sources from the parts of an `http` request and the path
    /// parameters a router resolved for it.
    #[must_use]
    pub fn from_http_parts(parts: &http::request::Parts, body: Bytes, path_params: Params) -> Self {
        let mut builder = Self::builder().body(body).path_params(path_params);
        if let Some(query) = parts.uri.query() {
            builder = builder.query(query);
        }
        if let Some(content_type) = parts
            .headers
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
        {
            builder = builder.content_type(content_type);
        }
        builder.build()
    }

    /// Looks up the raw text for `key` in a query or path source.
    ///
    /// The first occurrence of a repeated query key wins. Body values are
    /// materialised from the decoded payload instead, so `SourceKind::Body`
    /// always reports absent here.
    #[must_use]
    pub fn lookup(&self, source: SourceKind, key: &str) -> RawValue {
        let found = match source {
            SourceKind::Query => self
                .query
                .iter()
                .find(|(k, _)| k == key)
                .map(|(_, v)| v.as_str()),
            SourceKind::Path => self.path_params.get(key),
            SourceKind::Body => None,
        };
        found.map_or_else(RawValue::absent, RawValue::present)
    }

    /// Whether the query string failed to parse.
    #[must_use]
    pub fn is_query_malformed(&self) -> bool {
        self.query_malformed
    }

    /// Path parameters.
    #[must_use]
    pub fn path_params(&self) -> &Params {
        &self.path_params
    }

    /// Raw body bytes.
    #[must_use]
    pub fn body(&self) -> &Bytes {
        &self.body
    }

    /// The Content-Type of the body, if known.
    #[must_use]
    pub fn content_type(&self) -> Option<&str> {
        self.content_type.as_deref()
    }
}

/// Builder for [`RequestSources`].
#[derive(Debug, Default)]
pub struct RequestSourcesBuilder {
    query: Option<String>,
    path_params: Params,
    body: Bytes,
    content_type: Option<String>,
}

impl RequestSourcesBuilder {
    /// Sets the raw query string (without the leading `?`).
    #[must_use]
    pub fn query(mut self, query: impl Into<String>) -> Self {
        self.query = Some(query.into());
        self
    }

    /// Adds a single path parameter.
    #[must_use]
    pub fn path_param(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.path_params.push(name, value);
        self
    }

    /// Replaces the path parameters.
    #[must_use]
    pub fn path_params(mut self, params: Params) -> Self {
        self.path_params = params;
        self
    }

    /// Sets the body.
    #[must_use]
    pub fn body(mut self, body: impl Into<Bytes>) -> Self {
        self.body = body.into();
        self
    }

    /// Sets the body content type.
    #[must_use]
    pub fn content_type(mut self, content_type: impl Into<String>) -> Self {
        self.content_type = Some(content_type.into());
        self
    }

    /// Parses the query string once and builds the sources.
    #[must_use]
    pub fn build(self) -> RequestSources {
        let (query, query_malformed) = match self.query.as_deref() {
            None | Some("") => (Vec::new(), false),
            Some(raw) => match parse_pairs(raw) {
                Ok(pairs) => (pairs, false),
                Err(e) => {
                    tracing::debug!(error = %e, "query string did not parse");
                    (Vec::new(), true)
                }
            },
        };
        RequestSources {
            query,
            query_malformed,
            path_params: self.path_params,
            body: self.body,
            content_type: self.content_type,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_query_lookup() {
        let sources = RequestSources::builder()
            .query("rating=4&tags=&ids=1%2C2")
            .build();

        assert_eq!(
            sources.lookup(SourceKind::Query, "rating"),
            RawValue::present("4")
        );
        assert_eq!(sources.lookup(SourceKind::Query, "tags"), RawValue::present(""));
        assert_eq!(sources.lookup(SourceKind::Query, "ids").text, "1,2");
        assert_eq!(sources.lookup(SourceKind::Query, "missing"), RawValue::absent());
        assert!(!sources.is_query_malformed());
    }

    #[test]
    fn test_undecodable_query_is_malformed() {
        for raw in ["tags=%FF", "tags=%ZZ&&=", "a=b=c&%"] {
            let sources = RequestSources::builder().query(raw).build();
            assert!(sources.is_query_malformed(), "{raw}");
            assert!(!sources.lookup(SourceKind::Query, "tags").present, "{raw}");
        }
    }

    #[test]
    fn test_query_has_no_bracket_notation() {
        let sources = RequestSources::builder().query("tags[]=a").build();
        assert!(!sources.lookup(SourceKind::Query, "tags").present);
        assert!(sources.lookup(SourceKind::Query, "tags[]").present);
    }

    #[test]
    fn test_path_lookup() {
        let sources = RequestSources::builder().path_param("user_id", "").build();
        assert_eq!(sources.lookup(SourceKind::Path, "user_id"), RawValue::present(""));
        assert_eq!(sources.lookup(SourceKind::Path, "id"), RawValue::absent());
    }

    #[test]
    fn test_body_is_never_looked_up() {
        let sources = RequestSources::builder().body(r#"{"name":"x"}"#).build();
        assert!(!sources.lookup(SourceKind::Body, "name").present);
    }

    #[test]
    fn test_from_http_parts() {
        let request = http::Request::builder()
            .method("PUT")
            .uri("/users/9?ids=3,4")
            .header("content-type", "application/json")
            .body(())
            .unwrap();
        let (parts, ()) = request.into_parts();
        let params: Params = [("user_id", "9")].into_iter().collect();

        let sources = RequestSources::from_http_parts(&parts, Bytes::from_static(b"{}"), params);

        assert_eq!(sources.lookup(SourceKind::Query, "ids").text, "3,4");
        assert_eq!(sources.lookup(SourceKind::Path, "user_id").text, "9");
        assert_eq!(sources.content_type(), Some("application/json"));
        assert_eq!(sources.body().as_ref(), b"{}");
    }
}

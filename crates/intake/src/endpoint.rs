//! Compiled endpoints.
//!
//! An [`Endpoint`] is the descriptor table of one route, resolved against a
//! record schema and compiled against a [`Validator`] once at startup.
//! Processing a request is then a pure function of the request sources.

use crate::response::into_response;
use bytes::Bytes;
use http::{Response, StatusCode};
use intake_core::{
    BoundField, ErrorResponse, FieldDescriptor, IntakeError, IntakeResult, Outcome, RecordSchema,
};
use intake_extract::{coerce_field, extract, ExtractOptions, Extraction, RequestSources};
use intake_telemetry::record_outcome;
use intake_validate::{FieldRules, Validator};
use std::collections::HashSet;
use std::sync::Arc;
use tracing::{debug, debug_span};

/// One route's compiled field table.
///
/// # Example
///
/// ```
/// use intake::prelude::*;
/// use std::sync::Arc;
///
/// let schema = RecordSchema::builder()
///     .field("Name", "name", FieldKind::String)
///     .build()
///     .unwrap();
/// let validator = Arc::new(Validator::builder().build().unwrap());
///
/// let endpoint = Endpoint::builder("create_user", schema, validator)
///     .field(FieldDescriptor::body("Name").required().rules("required,min=3,max=50"))
///     .group("create")
///     .build()
///     .unwrap();
///
/// let sources = RequestSources::builder().body(r#"{"name":"Al"}"#).build();
/// let outcome = endpoint.process(&sources);
///
/// assert_eq!(outcome.status_code(), http::StatusCode::UNPROCESSABLE_ENTITY);
/// assert_eq!(outcome.errors()[0].message, "Minimum 3 characters required");
/// ```
#[derive(Debug, Clone)]
pub struct Endpoint {
    name: String,
    schema: RecordSchema,
    fields: Vec<BoundField>,
    rules: Vec<FieldRules>,
    validator: Arc<Validator>,
    group: Option<String>,
    created: bool,
    options: ExtractOptions,
}

impl Endpoint {
    /// Creates a builder.
    #[must_use]
    pub fn builder(
        name: impl Into<String>,
        schema: RecordSchema,
        validator: Arc<Validator>,
    ) -> EndpointBuilder {
        EndpointBuilder {
            name: name.into(),
            schema,
            validator,
            descriptors: Vec::new(),
            group: None,
            created: false,
            options: ExtractOptions::default(),
        }
    }

    /// Endpoint name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Active validation group.
    #[must_use]
    pub fn group(&self) -> Option<&str> {
        self.group.as_deref()
    }

    /// The record schema.
    #[must_use]
    pub fn schema(&self) -> &RecordSchema {
        &self.schema
    }

    /// Bound fields in declaration order.
    #[must_use]
    pub fn fields(&self) -> &[BoundField] {
        &self.fields
    }

    /// Whether a valid request answers `201 Created`.
    #[must_use]
    pub fn is_created(&self) -> bool {
        self.created
    }

    /// Runs extraction, then validation, and classifies the result.
    ///
    /// Validation only runs when every field was present-or-optional and
    /// coerced. This never panics and never returns `Err`; bad input is
    /// reported in the [`Outcome`].
    pub fn process(&self, sources: &RequestSources) -> Outcome {
        let _span = debug_span!("intake.process", endpoint = %self.name).entered();

        let outcome = match extract(&self.schema, &self.fields, sources, &self.options) {
            Extraction::Failed(errors) => Outcome::BadRequest(ErrorResponse::bad_request(errors)),
            Extraction::Assembled(record) => {
                let errors = self
                    .validator
                    .validate(&record, &self.rules, self.group.as_deref());
                if errors.is_empty() {
                    Outcome::Valid(record)
                } else {
                    Outcome::Unprocessable(ErrorResponse::unprocessable(errors))
                }
            }
        };

        debug!(
            outcome = outcome.label(),
            error_count = outcome.errors().len(),
            "request processed"
        );
        record_outcome(&self.name, &outcome);
        outcome
    }

    /// Status for an outcome of this endpoint: `201` instead of `200` for
    /// valid requests to creating endpoints.
    #[must_use]
    pub fn status_for(&self, outcome: &Outcome) -> StatusCode {
        if self.created && outcome.is_valid() {
            StatusCode::CREATED
        } else {
            outcome.status_code()
        }
    }

    /// Processes a request and renders the JSON response.
    #[must_use]
    pub fn respond(&self, sources: &RequestSources) -> Response<Bytes> {
        let outcome = self.process(sources);
        into_response(self.status_for(&outcome), &outcome)
    }
}

/// Runs `endpoint` against one request.
pub fn process(endpoint: &Endpoint, sources: &RequestSources) -> Outcome {
    endpoint.process(sources)
}

/// Builder for [`Endpoint`].
#[derive(Debug)]
pub struct EndpointBuilder {
    name: String,
    schema: RecordSchema,
    validator: Arc<Validator>,
    descriptors: Vec<FieldDescriptor>,
    group: Option<String>,
    created: bool,
    options: ExtractOptions,
}

impl EndpointBuilder {
    /// Adds a field descriptor.
    #[must_use]
    pub fn field(mut self, descriptor: FieldDescriptor) -> Self {
        self.descriptors.push(descriptor);
        self
    }

    /// Adds several field descriptors.
    #[must_use]
    pub fn fields(mut self, descriptors: impl IntoIterator<Item = FieldDescriptor>) -> Self {
        self.descriptors.extend(descriptors);
        self
    }

    /// Sets the active validation group.
    #[must_use]
    pub fn group(mut self, group: impl Into<String>) -> Self {
        self.group = Some(group.into());
        self
    }

    /// Marks the endpoint as creating a resource.
    #[must_use]
    pub fn created(mut self) -> Self {
        self.created = true;
        self
    }

    /// Sets the maximum accepted body size.
    #[must_use]
    pub fn max_body_size(mut self, bytes: usize) -> Self {
        self.options.max_body_size = bytes;
        self
    }

    /// Resolves and compiles every descriptor.
    ///
    /// # Errors
    ///
    /// Fails on the first configuration defect: a field missing from the
    /// schema, a field declared twice, a default that does not coerce, a bad
    /// rule string, or an unknown group.
    pub fn build(self) -> IntakeResult<Endpoint> {
        if let Some(group) = self.group.as_deref() {
            if !self.validator.has_group(group) {
                return Err(IntakeError::unknown_group(group));
            }
        }

        let mut seen = HashSet::new();
        let mut fields = Vec::with_capacity(self.descriptors.len());
        let mut rules = Vec::with_capacity(self.descriptors.len());

        for descriptor in self.descriptors {
            if !seen.insert(descriptor.name.clone()) {
                return Err(IntakeError::duplicate_field(descriptor.name));
            }
            let bound = self.schema.bind(&self.name, descriptor)?;

            if let Some(literal) = bound.default_literal() {
                coerce_field(literal, bound.spec()).map_err(|e| {
                    IntakeError::invalid_default(bound.name(), literal, e.to_string())
                })?;
            }

            rules.push(self.validator.compile(
                bound.name(),
                bound.kind(),
                &bound.descriptor().rules,
            )?);
            fields.push(bound);
        }

        debug!(
            endpoint = %self.name,
            fields = fields.len(),
            group = ?self.group,
            "endpoint compiled"
        );

        Ok(Endpoint {
            name: self.name,
            schema: self.schema,
            fields,
            rules,
            validator: self.validator,
            group: self.group,
            created: self.created,
            options: self.options,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use intake_core::{FieldKind, TypedValue};

    fn schema() -> RecordSchema {
        RecordSchema::builder()
            .field("Name", "name", FieldKind::String)
            .field("Rating", "rating", FieldKind::Int)
            .build()
            .unwrap()
    }

    fn validator() -> Arc<Validator> {
        Arc::new(Validator::builder().group("search").build().unwrap())
    }

    #[test]
    fn test_build_rejects_unknown_field() {
        let err = Endpoint::builder("e", schema(), validator())
            .field(FieldDescriptor::body("Nickname"))
            .build()
            .unwrap_err();
        assert_eq!(err, IntakeError::unknown_field("e", "Nickname"));
    }

    #[test]
    fn test_build_rejects_duplicate_descriptor() {
        let err = Endpoint::builder("e", schema(), validator())
            .field(FieldDescriptor::body("Name"))
            .field(FieldDescriptor::query("Name"))
            .build()
            .unwrap_err();
        assert_eq!(err, IntakeError::duplicate_field("Name"));
    }

    #[test]
    fn test_build_rejects_bad_default() {
        let err = Endpoint::builder("e", schema(), validator())
            .field(FieldDescriptor::query("Rating").default_value("five"))
            .build()
            .unwrap_err();
        assert_eq!(
            err,
            IntakeError::invalid_default("Rating", "five", "must be a valid integer")
        );
    }

    #[test]
    fn test_build_rejects_unknown_group() {
        let err = Endpoint::builder("e", schema(), validator())
            .group("delete")
            .build()
            .unwrap_err();
        assert_eq!(err, IntakeError::unknown_group("delete"));
    }

    #[test]
    fn test_build_rejects_bad_rules() {
        let err = Endpoint::builder("e", schema(), validator())
            .field(FieldDescriptor::query("Rating").rules("required,between=1"))
            .build()
            .unwrap_err();
        assert_eq!(err, IntakeError::unknown_rule("Rating", "between"));
    }

    #[test]
    fn test_validation_skipped_when_extraction_fails() {
        let endpoint = Endpoint::builder("e", schema(), validator())
            .field(FieldDescriptor::query("Rating").rules("min=10"))
            .field(FieldDescriptor::body("Name").required().rules("min=3"))
            .build()
            .unwrap();
        let sources = RequestSources::builder().query("rating=1").build();

        let outcome = endpoint.process(&sources);
        assert_eq!(outcome.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(outcome.errors().len(), 1);
        assert_eq!(outcome.errors()[0].field, "Name");
    }

    #[test]
    fn test_created_status() {
        let endpoint = Endpoint::builder("e", schema(), validator())
            .field(FieldDescriptor::query("Rating").default_value("5"))
            .created()
            .build()
            .unwrap();

        let outcome = endpoint.process(&RequestSources::default());
        assert_eq!(outcome.record().and_then(|r| r.get("Rating")), Some(&TypedValue::Int(5)));
        assert_eq!(endpoint.status_for(&outcome), StatusCode::CREATED);
        assert_eq!(outcome.status_code(), StatusCode::OK);
    }

    #[test]
    fn test_respond_renders_envelope() {
        let endpoint = Endpoint::builder("e", schema(), validator())
            .field(FieldDescriptor::query("Rating").required())
            .build()
            .unwrap();

        let response = endpoint.respond(&RequestSources::default());
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let body: serde_json::Value = serde_json::from_slice(response.body()).unwrap();
        assert_eq!(body["message"], "Invalid request data");
        assert_eq!(body["errors"][0]["field"], "Rating");
    }

    #[test]
    fn test_max_body_size() {
        let endpoint = Endpoint::builder("e", schema(), validator())
            .field(FieldDescriptor::body("Name"))
            .max_body_size(4)
            .build()
            .unwrap();
        let sources = RequestSources::builder().body(r#"{"name":"Alice"}"#).build();

        let outcome = endpoint.process(&sources);
        assert_eq!(outcome.errors()[0].field, "body");
    }
}

//! Pipeline outcomes and the error envelope.

use crate::{FieldError, TypedRecord};
use http::StatusCode;
use serde::Serialize;

/// Error envelope returned to clients: `{code, message, errors?}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ErrorResponse {
    /// HTTP status code.
    pub code: u16,
    /// Summary message.
    pub message: String,
    /// Field-level problems in declaration order.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub errors: Vec<FieldError>,
}

impl ErrorResponse {
    /// Creates an error envelope.
    #[must_use]
    pub fn new(status: StatusCode, message: impl Into<String>, errors: Vec<FieldError>) -> Self {
        Self {
            code: status.as_u16(),
            message: message.into(),
            errors,
        }
    }

    /// 400 envelope for presence and coercion failures.
    #[must_use]
    pub fn bad_request(errors: Vec<FieldError>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, "Invalid request data", errors)
    }

    /// 422 envelope for rule violations.
    #[must_use]
    pub fn unprocessable(errors: Vec<FieldError>) -> Self {
        Self::new(StatusCode::UNPROCESSABLE_ENTITY, "Validation failed", errors)
    }

    /// Returns the status code.
    #[must_use]
    pub fn status(&self) -> StatusCode {
        StatusCode::from_u16(self.code).unwrap_or(StatusCode::BAD_REQUEST)
    }
}

/// The tri-state result of running the full pipeline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// A field was missing or could not be coerced. Validation did not run.
    BadRequest(ErrorResponse),
    /// Every field coerced but at least one rule was violated.
    Unprocessable(ErrorResponse),
    /// Every field coerced and every rule passed.
    Valid(TypedRecord),
}

impl Outcome {
    /// Maps the outcome to an HTTP status (400 / 422 / 200).
    #[must_use]
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::Unprocessable(_) => StatusCode::UNPROCESSABLE_ENTITY,
            Self::Valid(_) => StatusCode::OK,
        }
    }

    /// Short label used in logs and metrics.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::BadRequest(_) => "bad_request",
            Self::Unprocessable(_) => "unprocessable",
            Self::Valid(_) => "valid",
        }
    }

    /// Returns true for [`Outcome::Valid`].
    #[must_use]
    pub const fn is_valid(&self) -> bool {
        matches!(self, Self::Valid(_))
    }

    /// The field errors, empty for a valid outcome.
    #[must_use]
    pub fn errors(&self) -> &[FieldError] {
        match self {
            Self::BadRequest(response) | Self::Unprocessable(response) => &response.errors,
            Self::Valid(_) => &[],
        }
    }

    /// The record, if valid.
    #[must_use]
    pub fn record(&self) -> Option<&TypedRecord> {
        match self {
            Self::Valid(record) => Some(record),
            _ => None,
        }
    }

    /// Consumes the outcome and returns the record, if valid.
    #[must_use]
    pub fn into_record(self) -> Option<TypedRecord> {
        match self {
            Self::Valid(record) => Some(record),
            _ => None,
        }
    }

    /// Renders the JSON response body.
    ///
    /// Failures render the error envelope; success renders
    /// `{"status": "valid", "data": {...}}`.
    #[must_use]
    pub fn to_body(&self) -> serde_json::Value {
        match self {
            Self::BadRequest(response) | Self::Unprocessable(response) => {
                serde_json::to_value(response).unwrap_or(serde_json::Value::Null)
            }
            Self::Valid(record) => serde_json::json!({
                "status": "valid",
                "data": record.to_json(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{FieldKind, RecordSchema, TypedValue};
    use serde_json::json;

    #[test]
    fn test_bad_request_envelope() {
        let outcome = Outcome::BadRequest(ErrorResponse::bad_request(vec![FieldError::new(
            "UserID",
            "This field is required",
        )]));

        assert_eq!(outcome.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(outcome.label(), "bad_request");
        assert_eq!(
            outcome.to_body(),
            json!({
                "code": 400,
                "message": "Invalid request data",
                "errors": [{"field": "UserID", "message": "This field is required"}]
            })
        );
    }

    #[test]
    fn test_unprocessable_envelope() {
        let response = ErrorResponse::unprocessable(vec![FieldError::new("Name", "x")]);
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(response.message, "Validation failed");

        let outcome = Outcome::Unprocessable(response);
        assert_eq!(outcome.errors().len(), 1);
        assert!(!outcome.is_valid());
        assert!(outcome.record().is_none());
    }

    #[test]
    fn test_empty_errors_omitted() {
        let response = ErrorResponse::bad_request(Vec::new());
        assert_eq!(
            serde_json::to_value(&response).unwrap(),
            json!({"code": 400, "message": "Invalid request data"})
        );
    }

    #[test]
    fn test_valid_body() {
        let schema = RecordSchema::builder()
            .field("Rating", "rating", FieldKind::Int)
            .build()
            .unwrap();
        let mut record = schema.empty_record();
        record.set("Rating", TypedValue::Int(5)).unwrap();

        let outcome = Outcome::Valid(record);
        assert_eq!(outcome.status_code(), StatusCode::OK);
        assert!(outcome.errors().is_empty());
        assert_eq!(
            outcome.to_body(),
            json!({"status": "valid", "data": {"rating": 5}})
        );
        assert!(outcome.into_record().is_some());
    }
}

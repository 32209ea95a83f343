//! Error types for Intake.
//!
//! Two very different things can go wrong:
//!
//! - A request carries bad input. That is reported as data, a list of
//!   [`FieldError`]s inside an [`Outcome`](crate::Outcome), never as `Err`.
//! - An endpoint is miswired (unknown field, unknown rule, a rule that cannot
//!   apply to the field's kind). That is an [`IntakeError`], returned when the
//!   endpoint is built so the process fails at startup instead of per request.

use serde::Serialize;
use std::fmt;
use thiserror::Error;

/// Result type alias using [`IntakeError`].
pub type IntakeResult<T> = Result<T, IntakeError>;

/// Configuration defects detected while building schemas, validators and endpoints.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum IntakeError {
    /// A descriptor names a field the record schema does not declare.
    #[error("unknown field '{field}' in endpoint '{endpoint}'")]
    UnknownField {
        /// The endpoint being built.
        endpoint: String,
        /// The undeclared field name.
        field: String,
    },

    /// A field or key is declared twice.
    #[error("duplicate field '{field}'")]
    DuplicateField {
        /// The repeated name.
        field: String,
    },

    /// A rule tag is neither built in nor registered on the validator.
    #[error("unknown rule '{tag}' on field '{field}'")]
    UnknownRule {
        /// The field carrying the rule.
        field: String,
        /// The unrecognised tag.
        tag: String,
    },

    /// A rule parameter is missing or malformed.
    #[error("invalid parameter for rule '{tag}' on field '{field}': {reason}")]
    InvalidRuleParam {
        /// The field carrying the rule.
        field: String,
        /// The rule tag.
        tag: String,
        /// Why the parameter was rejected.
        reason: String,
    },

    /// A rule cannot be evaluated against the field's kind.
    #[error("rule '{tag}' cannot apply to field '{field}' of kind {kind}")]
    RuleNotApplicable {
        /// The field carrying the rule.
        field: String,
        /// The rule tag.
        tag: String,
        /// The kind the rule would be applied to.
        kind: String,
    },

    /// A custom rule or group would shadow an existing tag.
    #[error("rule tag '{tag}' is already defined")]
    RuleConflict {
        /// The conflicting tag.
        tag: String,
    },

    /// A default literal does not coerce to the field's kind.
    #[error("default '{default}' for field '{field}' is invalid: {reason}")]
    InvalidDefault {
        /// The field carrying the default.
        field: String,
        /// The literal.
        default: String,
        /// The coercion failure.
        reason: String,
    },

    /// A field kind name is not supported.
    #[error("unsupported field kind: {kind}")]
    UnsupportedKind {
        /// The unsupported kind name.
        kind: String,
    },

    /// A source name is not one of body, query, path.
    #[error("unknown field source: {source_name}")]
    UnknownSource {
        /// The unrecognised source name.
        source_name: String,
    },

    /// An endpoint names a validation group the validator does not know.
    #[error("unknown validation group '{group}'")]
    UnknownGroup {
        /// The group name.
        group: String,
    },

    /// A value of the wrong kind was assigned to a record field.
    #[error("field '{field}' expects {expected}, got {actual}")]
    KindMismatch {
        /// The field name.
        field: String,
        /// The declared kind.
        expected: String,
        /// The kind of the assigned value.
        actual: String,
    },

    /// Two endpoints share a name.
    #[error("duplicate endpoint '{name}'")]
    DuplicateEndpoint {
        /// The repeated endpoint name.
        name: String,
    },
}

impl IntakeError {
    /// Creates an unknown field error.
    #[must_use]
    pub fn unknown_field(endpoint: impl Into<String>, field: impl Into<String>) -> Self {
        Self::UnknownField {
            endpoint: endpoint.into(),
            field: field.into(),
        }
    }

    /// Creates a duplicate field error.
    #[must_use]
    pub fn duplicate_field(field: impl Into<String>) -> Self {
        Self::DuplicateField {
            field: field.into(),
        }
    }

    /// Creates an unknown rule error.
    #[must_use]
    pub fn unknown_rule(field: impl Into<String>, tag: impl Into<String>) -> Self {
        Self::UnknownRule {
            field: field.into(),
            tag: tag.into(),
        }
    }

    /// Creates an invalid rule parameter error.
    #[must_use]
    pub fn invalid_rule_param(
        field: impl Into<String>,
        tag: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        Self::InvalidRuleParam {
            field: field.into(),
            tag: tag.into(),
            reason: reason.into(),
        }
    }

    /// Creates a rule-not-applicable error.
    #[must_use]
    pub fn rule_not_applicable(
        field: impl Into<String>,
        tag: impl Into<String>,
        kind: impl fmt::Display,
    ) -> Self {
        Self::RuleNotApplicable {
            field: field.into(),
            tag: tag.into(),
            kind: kind.to_string(),
        }
    }

    /// Creates a rule conflict error.
    #[must_use]
    pub fn rule_conflict(tag: impl Into<String>) -> Self {
        Self::RuleConflict { tag: tag.into() }
    }

    /// Creates an invalid default error.
    #[must_use]
    pub fn invalid_default(
        field: impl Into<String>,
        default: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        Self::InvalidDefault {
            field: field.into(),
            default: default.into(),
            reason: reason.into(),
        }
    }

    /// Creates an unsupported kind error.
    #[must_use]
    pub fn unsupported_kind(kind: impl Into<String>) -> Self {
        Self::UnsupportedKind { kind: kind.into() }
    }

    /// Creates an unknown source error.
    #[must_use]
    pub fn unknown_source(source: impl Into<String>) -> Self {
        Self::UnknownSource {
            source_name: source.into(),
        }
    }

    /// Creates an unknown group error.
    #[must_use]
    pub fn unknown_group(group: impl Into<String>) -> Self {
        Self::UnknownGroup {
            group: group.into(),
        }
    }

    /// Creates a duplicate endpoint error.
    #[must_use]
    pub fn duplicate_endpoint(name: impl Into<String>) -> Self {
        Self::DuplicateEndpoint { name: name.into() }
    }
}

/// A single field-level problem with a request.
///
/// Serializes as `{"field", "message", "value"?}`; `value` is omitted when
/// there is no offending text to echo back.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    /// Logical field name (as declared in the schema).
    pub field: String,
    /// Human-readable message.
    pub message: String,
    /// The offending raw or coerced value, when there is one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
}

impl FieldError {
    /// Creates an error without an attached value.
    #[must_use]
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
            value: None,
        }
    }

    /// Attaches the offending value.
    #[must_use]
    pub fn with_value(mut self, value: impl Into<String>) -> Self {
        self.value = Some(value.into());
        self
    }
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)?;
        if let Some(ref value) = self.value {
            write!(f, " (value: {value})")?;
        }
        Ok(())
    }
}

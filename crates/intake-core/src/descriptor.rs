//! Field descriptors.

use crate::{FieldKind, FieldSpec, IntakeError, IntakeResult, RecordSchema, SourceKind, TextParser};
use serde::{Deserialize, Serialize};

/// Static description of one logical field on one endpoint.
///
/// `rules` is the declarative rule string (for example
/// `"required,min=3,max=50"`); it is parsed once when the endpoint is built.
///
/// # Example
///
/// ```
/// use intake_core::{FieldDescriptor, SourceKind};
///
/// let name = FieldDescriptor::body("Name").required().rules("required,min=3,max=50");
/// assert_eq!(name.source, SourceKind::Body);
/// assert!(name.required);
///
/// let rating = FieldDescriptor::query("Rating").default_value("5");
/// assert_eq!(rating.default.as_deref(), Some("5"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FieldDescriptor {
    /// Logical field name; must exist in the record schema.
    pub name: String,
    /// Where the raw value is read from.
    pub source: SourceKind,
    /// Whether absence is an error.
    #[serde(default)]
    pub required: bool,
    /// Literal used as raw text when the field is absent.
    #[serde(default)]
    pub default: Option<String>,
    /// Declarative validation rules.
    #[serde(default)]
    pub rules: String,
}

impl FieldDescriptor {
    /// Creates an optional descriptor with no rules.
    #[must_use]
    pub fn new(name: impl Into<String>, source: SourceKind) -> Self {
        Self {
            name: name.into(),
            source,
            required: false,
            default: None,
            rules: String::new(),
        }
    }

    /// Descriptor reading from the request body.
    #[must_use]
    pub fn body(name: impl Into<String>) -> Self {
        Self::new(name, SourceKind::Body)
    }

    /// Descriptor reading from the query string.
    #[must_use]
    pub fn query(name: impl Into<String>) -> Self {
        Self::new(name, SourceKind::Query)
    }

    /// Descriptor reading from path parameters.
    #[must_use]
    pub fn path(name: impl Into<String>) -> Self {
        Self::new(name, SourceKind::Path)
    }

    /// Marks the field as required.
    #[must_use]
    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    /// Sets the default literal.
    #[must_use]
    pub fn default_value(mut self, literal: impl Into<String>) -> Self {
        self.default = Some(literal.into());
        self
    }

    /// Sets the rule string.
    #[must_use]
    pub fn rules(mut self, rules: impl Into<String>) -> Self {
        self.rules = rules.into();
        self
    }
}

/// A descriptor resolved against a [`RecordSchema`].
///
/// Only obtainable through [`RecordSchema::bind`], so holding one proves the
/// field exists in the schema.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoundField {
    descriptor: FieldDescriptor,
    spec: FieldSpec,
}

impl BoundField {
    /// The declared descriptor.
    #[must_use]
    pub fn descriptor(&self) -> &FieldDescriptor {
        &self.descriptor
    }

    /// The schema entry.
    #[must_use]
    pub fn spec(&self) -> &FieldSpec {
        &self.spec
    }

    /// Logical field name.
    #[must_use]
    pub fn name(&self) -> &str {
        self.spec.name()
    }

    /// Wire key.
    #[must_use]
    pub fn key(&self) -> &str {
        self.spec.key()
    }

    /// Target kind.
    #[must_use]
    pub fn kind(&self) -> FieldKind {
        self.spec.kind()
    }

    /// Parser for a custom-typed field.
    #[must_use]
    pub fn parser(&self) -> Option<&TextParser> {
        self.spec.parser()
    }

    /// Source location.
    #[must_use]
    pub fn source(&self) -> SourceKind {
        self.descriptor.source
    }

    /// Whether absence is an error.
    #[must_use]
    pub fn is_required(&self) -> bool {
        self.descriptor.required
    }

    /// Default literal, if any.
    #[must_use]
    pub fn default_literal(&self) -> Option<&str> {
        self.descriptor.default.as_deref()
    }
}

impl RecordSchema {
    /// Resolves a descriptor against this schema.
    ///
    /// `endpoint` is only used to make the error message point at the
    /// miswired endpoint.
    ///
    /// # Errors
    ///
    /// Returns [`IntakeError::UnknownField`] if the schema has no such field.
    pub fn bind(&self, endpoint: &str, descriptor: FieldDescriptor) -> IntakeResult<BoundField> {
        let spec = self
            .get(&descriptor.name)
            .ok_or_else(|| IntakeError::unknown_field(endpoint, &descriptor.name))?
            .clone();
        Ok(BoundField { descriptor, spec })
    }
}

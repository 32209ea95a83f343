//! The extraction pipeline.
//!
//! For every bound field, in declaration order:
//!
//! 1. look the wire key up in the field's source,
//! 2. apply the presence policy (default literal, required, or skip),
//! 3. coerce the raw value to the field's kind and assign it.
//!
//! Every field is visited so the caller sees all presence and coercion
//! problems at once. A body or query string that cannot be decoded is
//! reported once, and the fields reading from it are skipped. Rule
//! validation is not part of this stage.

use crate::body::{decode_body, materialize_field, raw_text, BodyMap, DEFAULT_MAX_BODY_SIZE};
use crate::coerce::{coerce_field, CoercionError};
use crate::RequestSources;
use intake_core::{
    BoundField, FieldError, RecordSchema, SourceKind, TypedRecord, TypedValue, REQUIRED_MESSAGE,
};
use tracing::{debug, warn};

/// Field name reported for whole-body decode failures.
pub const BODY_FIELD: &str = "body";

/// Field name reported when the query string cannot be parsed.
pub const QUERY_FIELD: &str = "query";

/// Per-endpoint extraction limits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExtractOptions {
    /// Maximum accepted body size in bytes.
    pub max_body_size: usize,
}

impl Default for ExtractOptions {
    fn default() -> Self {
        Self {
            max_body_size: DEFAULT_MAX_BODY_SIZE,
        }
    }
}

/// Result of the extraction stage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Extraction {
    /// Every field was present-or-optional and coerced.
    Assembled(TypedRecord),
    /// At least one presence or coercion failure; the record is discarded.
    Failed(Vec<FieldError>),
}

impl Extraction {
    /// Returns true for [`Extraction::Assembled`].
    #[must_use]
    pub const fn is_assembled(&self) -> bool {
        matches!(self, Self::Assembled(_))
    }
}

/// Runs lookup, presence policy and coercion for `fields` against one request.
///
/// # Example
///
/// ```
/// use intake_core::{FieldDescriptor, FieldKind, RecordSchema, TypedValue};
/// use intake_extract::{extract, ExtractOptions, Extraction, RequestSources};
///
/// let schema = RecordSchema::builder()
///     .field("Rating", "rating", FieldKind::Int)
///     .build()
///     .unwrap();
/// let fields = vec![schema
///     .bind("search", FieldDescriptor::query("Rating").default_value("5"))
///     .unwrap()];
///
/// let sources = RequestSources::builder().build();
/// let Extraction::Assembled(record) = extract(&schema, &fields, &sources, &ExtractOptions::default())
/// else {
///     panic!("expected a record");
/// };
/// assert_eq!(record.get("Rating"), Some(&TypedValue::Int(5)));
/// ```
pub fn extract(
    schema: &RecordSchema,
    fields: &[BoundField],
    sources: &RequestSources,
    options: &ExtractOptions,
) -> Extraction {
    let mut record = schema.empty_record();
    let mut errors = Vec::new();

    let body = if reads_from(fields, SourceKind::Body) {
        match decode_body(sources.body(), sources.content_type(), options.max_body_size) {
            Ok(map) => Some(map),
            Err(e) => {
                warn!(error = ?e, "request body could not be decoded");
                errors.push(FieldError::new(BODY_FIELD, e.to_string()));
                None
            }
        }
    } else {
        None
    };

    let query_malformed = sources.is_query_malformed() && reads_from(fields, SourceKind::Query);
    if query_malformed {
        warn!("query string could not be decoded");
        errors.push(FieldError::new(QUERY_FIELD, "Invalid query string"));
    }

    for field in fields {
        let unreadable = match field.source() {
            SourceKind::Body => body.is_none(),
            SourceKind::Query => query_malformed,
            SourceKind::Path => false,
        };
        if unreadable {
            // Already reported once for the whole source.
            continue;
        }

        let resolved = match read_field(field, sources, body.as_ref()) {
            Some(resolved) => resolved,
            None => match field.default_literal() {
                Some(literal) => {
                    coerce_field(literal, field.spec()).map_err(|e| (e, literal.to_string()))
                }
                None => {
                    if field.is_required() {
                        debug!(field = field.name(), "required field missing");
                        errors.push(FieldError::new(field.name(), REQUIRED_MESSAGE));
                    }
                    continue;
                }
            },
        };

        match resolved {
            Ok(value) => {
                if let Err(e) = record.set(field.name(), value) {
                    warn!(field = field.name(), error = %e, "coerced value rejected by record");
                    errors.push(FieldError::new(field.name(), "unsupported field type"));
                }
            }
            Err((e, raw)) => {
                debug!(field = field.name(), error = %e, "field coercion failed");
                errors.push(coercion_error(field.name(), &e, raw));
            }
        }
    }

    if errors.is_empty() {
        Extraction::Assembled(record)
    } else {
        debug!(error_count = errors.len(), "extraction failed");
        Extraction::Failed(errors)
    }
}

type Resolved = Result<TypedValue, (CoercionError, String)>;

/// Reads and coerces one field. `None` means absent.
fn read_field(
    field: &BoundField,
    sources: &RequestSources,
    body: Option<&BodyMap>,
) -> Option<Resolved> {
    match field.source() {
        SourceKind::Body => {
            let value = body?.get(field.key()).filter(|v| !v.is_null())?;
            Some(materialize_field(value, field.spec()).map_err(|e| (e, raw_text(value))))
        }
        source => {
            let raw = sources.lookup(source, field.key());
            if !raw.present {
                return None;
            }
            Some(coerce_field(&raw.text, field.spec()).map_err(|e| (e, raw.text)))
        }
    }
}

fn reads_from(fields: &[BoundField], source: SourceKind) -> bool {
    fields.iter().any(|f| f.source() == source)
}

fn coercion_error(field: &str, error: &CoercionError, raw: String) -> FieldError {
    let err = FieldError::new(field, error.to_string());
    if raw.is_empty() {
        err
    } else {
        err.with_value(raw)
    }
}

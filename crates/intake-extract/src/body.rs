//! Request body decoding.
//!
//! The body is decoded once per request into a JSON object; each body field
//! is then materialised from that object by wire key. JSON and
//! `application/x-www-form-urlencoded` payloads are supported.

use crate::coerce::{coerce, coerce_custom, parse_bool, parse_unsigned, CoercionError};
use crate::urlencoded::parse_pairs;
use intake_core::{FieldKind, FieldSpec, TypedValue};
use serde_json::{Map, Value};
use thiserror::Error;

/// Default maximum body size (1 MiB).
pub const DEFAULT_MAX_BODY_SIZE: usize = 1024 * 1024;

/// A decoded body: wire key to JSON value.
pub type BodyMap = Map<String, Value>;

/// The request body could not be decoded as a whole.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BodyError {
    /// Body exceeds the configured limit.
    #[error("Request body too large: {actual} bytes exceeds limit of {limit}")]
    TooLarge {
        /// The configured limit in bytes.
        limit: usize,
        /// The received size in bytes.
        actual: usize,
    },

    /// Content type is neither JSON nor form-urlencoded.
    #[error("Unsupported content type: {content_type}")]
    UnsupportedMediaType {
        /// The received content type.
        content_type: String,
    },

    /// Payload does not parse.
    #[error("Invalid request body")]
    Malformed {
        /// Parser diagnostic, kept for logs only.
        detail: String,
    },

    /// JSON payload parsed but is not an object.
    #[error("Request body must be a JSON object")]
    NotAnObject,
}

/// Supported body encodings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BodyFormat {
    /// `application/json` and `application/*+json`.
    Json,
    /// `application/x-www-form-urlencoded`.
    Form,
}

impl BodyFormat {
    /// Picks the format for a content type. A missing content type means JSON.
    pub fn from_content_type(content_type: Option<&str>) -> Result<Self, BodyError> {
        let Some(raw) = content_type else {
            return Ok(Self::Json);
        };
        let unsupported = || BodyError::UnsupportedMediaType {
            content_type: raw.to_string(),
        };
        let parsed: mime::Mime = raw.parse().map_err(|_| unsupported())?;

        if parsed.type_() == mime::APPLICATION {
            if parsed.subtype() == mime::JSON || parsed.suffix() == Some(mime::JSON) {
                return Ok(Self::Json);
            }
            if parsed.subtype() == mime::WWW_FORM_URLENCODED {
                return Ok(Self::Form);
            }
        }
        Err(unsupported())
    }
}

/// Decodes a whole request body into an object keyed by wire key.
///
/// An empty body decodes to an empty object. Form pairs become string values;
/// for repeated form keys the first occurrence wins.
///
/// # Example
///
/// ```
/// use intake_extract::{decode_body, DEFAULT_MAX_BODY_SIZE};
///
/// let body = decode_body(br#"{"name":"Alice"}"#, Some("application/json"), DEFAULT_MAX_BODY_SIZE).unwrap();
/// assert_eq!(body["name"], "Alice");
///
/// let form = decode_body(b"name=Bob&tags=a,b", Some("application/x-www-form-urlencoded"), 1024).unwrap();
/// assert_eq!(form["tags"], "a,b");
/// ```
pub fn decode_body(
    bytes: &[u8],
    content_type: Option<&str>,
    max_size: usize,
) -> Result<BodyMap, BodyError> {
    if bytes.len() > max_size {
        return Err(BodyError::TooLarge {
            limit: max_size,
            actual: bytes.len(),
        });
    }
    if bytes.iter().all(u8::is_ascii_whitespace) {
        return Ok(BodyMap::new());
    }

    match BodyFormat::from_content_type(content_type)? {
        BodyFormat::Json => {
            let value: Value = serde_json::from_slice(bytes).map_err(|e| BodyError::Malformed {
                detail: e.to_string(),
            })?;
            match value {
                Value::Object(map) => Ok(map),
                _ => Err(BodyError::NotAnObject),
            }
        }
        BodyFormat::Form => {
            let text = std::str::from_utf8(bytes).map_err(|e| BodyError::Malformed {
                detail: e.to_string(),
            })?;
            let pairs = parse_pairs(text).map_err(|e| BodyError::Malformed {
                detail: e.to_string(),
            })?;
            let mut map = BodyMap::new();
            for (key, value) in pairs {
                map.entry(key).or_insert(Value::String(value));
            }
            Ok(map)
        }
    }
}

/// Materialises one decoded body value as `kind`.
///
/// Strings go through the value coercer, so `"5"` and `5` both satisfy an
/// integer field. `null` is treated as absent by the caller and never
/// reaches this function in the pipeline.
pub fn materialize(value: &Value, kind: FieldKind) -> Result<TypedValue, CoercionError> {
    match (value, kind) {
        (Value::String(text), _) => coerce(text, kind),

        (Value::Number(n), FieldKind::Int) => {
            n.as_i64().map(TypedValue::Int).ok_or(CoercionError::InvalidInteger)
        }
        (Value::Number(n), FieldKind::UnsignedInt) => n
            .as_u64()
            .map(TypedValue::UnsignedInt)
            .ok_or(CoercionError::InvalidUnsigned),

        (Value::Bool(b), FieldKind::Bool) => Ok(TypedValue::Bool(*b)),
        (Value::Number(n), FieldKind::Bool) => parse_bool(&n.to_string()).map(TypedValue::Bool),

        (other, FieldKind::Custom) => Ok(TypedValue::Custom(other.clone())),

        (Value::Array(items), FieldKind::StringList) => items
            .iter()
            .enumerate()
            .map(|(i, item)| match item {
                Value::String(s) => Ok(s.clone()),
                _ => Err(CoercionError::InvalidStringElement { index: i + 1 }),
            })
            .collect::<Result<Vec<_>, _>>()
            .map(TypedValue::StringList),
        (Value::Array(items), FieldKind::UnsignedIntList) => items
            .iter()
            .enumerate()
            .map(|(i, item)| {
                let parsed = match item {
                    Value::Number(n) => n.as_u64(),
                    Value::String(s) => parse_unsigned(s.trim()).ok(),
                    _ => None,
                };
                parsed.ok_or(CoercionError::InvalidElement { index: i + 1 })
            })
            .collect::<Result<Vec<_>, _>>()
            .map(TypedValue::UnsignedIntList),

        (_, kind) => Err(shape_error(kind)),
    }
}

/// Materialises one decoded body value for a declared field.
///
/// Custom-typed fields run their registered parser over the value's text;
/// scalars (`"10.0.0.1"`, `42`, `true`) parse from their textual form, while
/// arrays and objects are rejected.
pub fn materialize_field(value: &Value, spec: &FieldSpec) -> Result<TypedValue, CoercionError> {
    let Some(parser) = spec.parser() else {
        return materialize(value, spec.kind());
    };
    match value {
        Value::Array(_) | Value::Object(_) => Err(CoercionError::Invalid {
            label: parser.label().to_string(),
        }),
        scalar => coerce_custom(&raw_text(scalar), parser),
    }
}

/// Text echoed back as the offending value: the string itself, otherwise compact JSON.
pub fn raw_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

fn shape_error(kind: FieldKind) -> CoercionError {
    match kind {
        FieldKind::String => CoercionError::ExpectedString,
        FieldKind::Int => CoercionError::InvalidInteger,
        FieldKind::UnsignedInt => CoercionError::InvalidUnsigned,
        FieldKind::StringList | FieldKind::UnsignedIntList => CoercionError::ExpectedList,
        FieldKind::Bool => CoercionError::InvalidBool,
        FieldKind::Custom => CoercionError::ExpectedString,
    }
}

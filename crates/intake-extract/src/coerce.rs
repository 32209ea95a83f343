//! Value coercion.
//!
//! Turns raw request text into a [`TypedValue`] of a declared [`FieldKind`].
//! Coercion is pure and never panics: every malformed input maps to a
//! [`CoercionError`] whose `Display` is the client-facing message.

use intake_core::{FieldKind, FieldSpec, TextParser, TypedValue};
use serde_json::Value;
use std::str::FromStr;
use thiserror::Error;

/// A raw value that could not be coerced to its target kind.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CoercionError {
    /// Text is not a base-10 signed integer.
    #[error("must be a valid integer")]
    InvalidInteger,

    /// Text is not a base-10 unsigned integer.
    #[error("must be a positive integer")]
    InvalidUnsigned,

    /// A list element is not an unsigned integer. `index` is 1-based.
    #[error("element {index}: must be positive integer")]
    InvalidElement {
        /// 1-based position of the offending element.
        index: usize,
    },

    /// A list element is not a string. `index` is 1-based.
    #[error("element {index}: must be a string")]
    InvalidStringElement {
        /// 1-based position of the offending element.
        index: usize,
    },

    /// Text is not one of the accepted boolean spellings.
    #[error("must be a valid boolean")]
    InvalidBool,

    /// A structured value was given where text was expected.
    #[error("must be a string")]
    ExpectedString,

    /// A structured value was given where a list was expected.
    #[error("must be a list")]
    ExpectedList,

    /// Text does not parse as a caller-defined type.
    #[error("must be a valid {label}")]
    Invalid {
        /// Human-readable name of the target type.
        label: String,
    },
}

/// Coerces raw text into a value of `kind`.
///
/// `Bool` accepts `true`, `1`, `on`, `yes` and `false`, `0`, `off`, `no` or
/// empty text, ignoring case. A `Custom` kind without a parser keeps the text
/// verbatim; use [`coerce_field`] to honour the field's registered parser.
///
/// # Example
///
/// ```
/// use intake_core::{FieldKind, FieldSpec, TextParser, TypedValue};
/// use intake_extract::{coerce, CoercionError};
///
/// assert_eq!(
///     coerce(" tech , sports ", FieldKind::StringList),
///     Ok(TypedValue::StringList(vec!["tech".into(), "sports".into()]))
/// );
/// assert_eq!(coerce("-1", FieldKind::UnsignedInt), Err(CoercionError::InvalidUnsigned));
/// assert_eq!(
///     coerce("1,x", FieldKind::UnsignedIntList),
///     Err(CoercionError::InvalidElement { index: 2 })
/// );
/// ```
pub fn coerce(raw: &str, kind: FieldKind) -> Result<TypedValue, CoercionError> {
    match kind {
        FieldKind::String => Ok(TypedValue::String(raw.to_string())),
        FieldKind::Int => parse_int(raw).map(TypedValue::Int),
        FieldKind::UnsignedInt => parse_unsigned(raw).map(TypedValue::UnsignedInt),
        FieldKind::StringList => Ok(TypedValue::StringList(split_list(raw))),
        FieldKind::UnsignedIntList => split_list(raw)
            .iter()
            .enumerate()
            .map(|(i, part)| {
                parse_unsigned(part).map_err(|_| CoercionError::InvalidElement { index: i + 1 })
            })
            .collect::<Result<Vec<_>, _>>()
            .map(TypedValue::UnsignedIntList),
        FieldKind::Bool => parse_bool(raw).map(TypedValue::Bool),
        FieldKind::Custom => Ok(TypedValue::Custom(Value::String(raw.to_string()))),
    }
}

/// Coerces raw text for a declared field, using its parser when it has one.
pub fn coerce_field(raw: &str, spec: &FieldSpec) -> Result<TypedValue, CoercionError> {
    match spec.parser() {
        Some(parser) => coerce_custom(raw, parser),
        None => coerce(raw, spec.kind()),
    }
}

/// Coerces raw text with a registered parser.
///
/// ```
/// use intake_core::{TextParser, TypedValue};
/// use intake_extract::coerce_custom;
/// use std::net::IpAddr;
///
/// let parser = TextParser::of::<IpAddr>("ip address");
/// assert_eq!(
///     coerce_custom("::1", &parser),
///     Ok(TypedValue::Custom(serde_json::json!("::1")))
/// );
/// assert_eq!(
///     coerce_custom("nope", &parser).unwrap_err().to_string(),
///     "must be a valid ip address"
/// );
/// ```
pub fn coerce_custom(raw: &str, parser: &TextParser) -> Result<TypedValue, CoercionError> {
    parser
        .parse(raw)
        .map(TypedValue::Custom)
        .ok_or_else(|| CoercionError::Invalid {
            label: parser.label().to_string(),
        })
}

/// Coerces raw text into any type implementing [`FromStr`].
///
/// `label` names the type in the failure message, e.g. `"must be a valid uuid"`.
///
/// ```
/// use intake_extract::coerce_with;
/// use std::net::IpAddr;
///
/// let addr: IpAddr = coerce_with("127.0.0.1", "ip address").unwrap();
/// assert!(addr.is_loopback());
///
/// let err = coerce_with::<IpAddr>("localhost", "ip address").unwrap_err();
/// assert_eq!(err.to_string(), "must be a valid ip address");
/// ```
pub fn coerce_with<T: FromStr>(raw: &str, label: &str) -> Result<T, CoercionError> {
    raw.parse().map_err(|_| CoercionError::Invalid {
        label: label.to_string(),
    })
}

pub(crate) fn parse_int(raw: &str) -> Result<i64, CoercionError> {
    raw.parse().map_err(|_| CoercionError::InvalidInteger)
}

pub(crate) fn parse_unsigned(raw: &str) -> Result<u64, CoercionError> {
    // u64::from_str tolerates a leading '+'; unsigned text must be bare digits.
    if raw.starts_with('+') {
        return Err(CoercionError::InvalidUnsigned);
    }
    raw.parse().map_err(|_| CoercionError::InvalidUnsigned)
}

pub(crate) fn parse_bool(raw: &str) -> Result<bool, CoercionError> {
    match raw.to_ascii_lowercase().as_str() {
        "true" | "1" | "on" | "yes" => Ok(true),
        "false" | "0" | "off" | "no" | "" => Ok(false),
        _ => Err(CoercionError::InvalidBool),
    }
}

/// Splits on `,` and trims every element. All-blank input is the empty list.
fn split_list(raw: &str) -> Vec<String> {
    let parts: Vec<String> = raw.split(',').map(|p| p.trim().to_string()).collect();
    if parts.iter().all(String::is_empty) {
        Vec::new()
    } else {
        parts
    }
}

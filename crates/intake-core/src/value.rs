//! Field kinds and typed field values.

use crate::{IntakeError, IntakeResult};
use serde::{Deserialize, Serialize, Serializer};
use serde_json::Value;
use std::fmt;
use std::str::FromStr;

/// The target shape a raw value is coerced into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldKind {
    /// UTF-8 text, passed through unchanged.
    String,
    /// Signed 64-bit integer.
    Int,
    /// Unsigned 64-bit integer.
    UnsignedInt,
    /// Comma-delimited list of strings.
    StringList,
    /// Comma-delimited list of unsigned 64-bit integers.
    UnsignedIntList,
    /// Boolean accepting `true/1/on/yes` and `false/0/off/no` or empty text.
    Bool,
    /// Caller-defined type parsed by a registered [`TextParser`](crate::TextParser).
    ///
    /// Only declared through [`RecordSchemaBuilder::custom_field`](crate::RecordSchemaBuilder::custom_field),
    /// never from configuration.
    #[serde(skip_deserializing)]
    Custom,
}

impl FieldKind {
    /// Returns true for the list kinds.
    #[must_use]
    pub const fn is_list(self) -> bool {
        matches!(self, Self::StringList | Self::UnsignedIntList)
    }

    /// Returns true for the integer kinds.
    #[must_use]
    pub const fn is_numeric(self) -> bool {
        matches!(self, Self::Int | Self::UnsignedInt)
    }

    /// Returns true if `min`/`max` bounds can measure this kind.
    #[must_use]
    pub const fn is_measurable(self) -> bool {
        !matches!(self, Self::Bool | Self::Custom)
    }

    /// Returns the kind of a single list element, or `None` for scalars.
    #[must_use]
    pub const fn element_kind(self) -> Option<Self> {
        match self {
            Self::StringList => Some(Self::String),
            Self::UnsignedIntList => Some(Self::UnsignedInt),
            _ => None,
        }
    }

    /// Returns the zero value of this kind.
    #[must_use]
    pub fn zero(self) -> TypedValue {
        match self {
            Self::String => TypedValue::String(String::new()),
            Self::Int => TypedValue::Int(0),
            Self::UnsignedInt => TypedValue::UnsignedInt(0),
            Self::StringList => TypedValue::StringList(Vec::new()),
            Self::UnsignedIntList => TypedValue::UnsignedIntList(Vec::new()),
            Self::Bool => TypedValue::Bool(false),
            Self::Custom => TypedValue::Custom(Value::Null),
        }
    }

    /// Returns the configuration name of this kind.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::String => "string",
            Self::Int => "int",
            Self::UnsignedInt => "unsigned_int",
            Self::StringList => "string_list",
            Self::UnsignedIntList => "unsigned_int_list",
            Self::Bool => "bool",
            Self::Custom => "custom",
        }
    }
}

impl fmt::Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FieldKind {
    type Err = IntakeError;

    fn from_str(s: &str) -> IntakeResult<Self> {
        match s.to_ascii_lowercase().as_str() {
            "string" => Ok(Self::String),
            "int" | "integer" | "i64" => Ok(Self::Int),
            "unsigned_int" | "uint" | "u64" => Ok(Self::UnsignedInt),
            "string_list" | "strings" => Ok(Self::StringList),
            "unsigned_int_list" | "uint_list" | "u64_list" => Ok(Self::UnsignedIntList),
            "bool" | "boolean" => Ok(Self::Bool),
            _ => Err(IntakeError::unsupported_kind(s)),
        }
    }
}

/// A coerced field value.
///
/// Serializes to the natural JSON shape (string, number, or array).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypedValue {
    /// A string value.
    String(String),
    /// A signed integer value.
    Int(i64),
    /// An unsigned integer value.
    UnsignedInt(u64),
    /// A list of strings.
    StringList(Vec<String>),
    /// A list of unsigned integers.
    UnsignedIntList(Vec<u64>),
    /// A boolean.
    Bool(bool),
    /// A custom-parsed value in its JSON form.
    Custom(Value),
}

impl TypedValue {
    /// Returns the kind of this value.
    #[must_use]
    pub const fn kind(&self) -> FieldKind {
        match self {
            Self::String(_) => FieldKind::String,
            Self::Int(_) => FieldKind::Int,
            Self::UnsignedInt(_) => FieldKind::UnsignedInt,
            Self::StringList(_) => FieldKind::StringList,
            Self::UnsignedIntList(_) => FieldKind::UnsignedIntList,
            Self::Bool(_) => FieldKind::Bool,
            Self::Custom(_) => FieldKind::Custom,
        }
    }

    /// Returns true if this is the zero value of its kind.
    #[must_use]
    pub fn is_zero(&self) -> bool {
        match self {
            Self::String(s) => s.is_empty(),
            Self::Int(n) => *n == 0,
            Self::UnsignedInt(n) => *n == 0,
            Self::StringList(items) => items.is_empty(),
            Self::UnsignedIntList(items) => items.is_empty(),
            Self::Bool(b) => !b,
            Self::Custom(value) => json_is_zero(value),
        }
    }

    /// Returns the string, if this is a string value.
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            _ => None,
        }
    }

    /// Returns the signed integer, if this is an `Int`.
    #[must_use]
    pub const fn as_i64(&self) -> Option<i64> {
        match self {
            Self::Int(n) => Some(*n),
            _ => None,
        }
    }

    /// Returns the unsigned integer, if this is an `UnsignedInt`.
    #[must_use]
    pub const fn as_u64(&self) -> Option<u64> {
        match self {
            Self::UnsignedInt(n) => Some(*n),
            _ => None,
        }
    }

    /// Returns the strings, if this is a `StringList`.
    #[must_use]
    pub fn as_string_list(&self) -> Option<&[String]> {
        match self {
            Self::StringList(items) => Some(items),
            _ => None,
        }
    }

    /// Returns the integers, if this is an `UnsignedIntList`.
    #[must_use]
    pub fn as_u64_list(&self) -> Option<&[u64]> {
        match self {
            Self::UnsignedIntList(items) => Some(items),
            _ => None,
        }
    }

    /// Returns the boolean, if this is a `Bool`.
    #[must_use]
    pub const fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Returns the JSON form, if this is a `Custom` value.
    #[must_use]
    pub const fn as_custom(&self) -> Option<&Value> {
        match self {
            Self::Custom(value) => Some(value),
            _ => None,
        }
    }

    /// Number of elements for lists, `None` for scalars.
    #[must_use]
    pub fn len(&self) -> Option<usize> {
        match self {
            Self::StringList(items) => Some(items.len()),
            Self::UnsignedIntList(items) => Some(items.len()),
            _ => None,
        }
    }

    /// Splits a list into scalar element values. Scalars yield `None`.
    #[must_use]
    pub fn elements(&self) -> Option<Vec<TypedValue>> {
        match self {
            Self::StringList(items) => Some(items.iter().cloned().map(Self::String).collect()),
            Self::UnsignedIntList(items) => {
                Some(items.iter().copied().map(Self::UnsignedInt).collect())
            }
            _ => None,
        }
    }
}

impl fmt::Display for TypedValue {
    /// Scalars render plainly; lists render comma-joined without brackets
    /// (`a,b,c`, not `[a b c]`), which is also the text the coercer accepts
    /// back. Custom strings render bare, other custom values as compact JSON.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::String(s) => f.write_str(s),
            Self::Int(n) => write!(f, "{n}"),
            Self::UnsignedInt(n) => write!(f, "{n}"),
            Self::StringList(items) => f.write_str(&items.join(",")),
            Self::UnsignedIntList(items) => {
                let parts: Vec<String> = items.iter().map(u64::to_string).collect();
                f.write_str(&parts.join(","))
            }
            Self::Bool(b) => write!(f, "{b}"),
            Self::Custom(Value::String(s)) => f.write_str(s),
            Self::Custom(value) => write!(f, "{value}"),
        }
    }
}

impl Serialize for TypedValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::String(s) => serializer.serialize_str(s),
            Self::Int(n) => serializer.serialize_i64(*n),
            Self::UnsignedInt(n) => serializer.serialize_u64(*n),
            Self::StringList(items) => items.serialize(serializer),
            Self::UnsignedIntList(items) => items.serialize(serializer),
            Self::Bool(b) => serializer.serialize_bool(*b),
            Self::Custom(value) => value.serialize(serializer),
        }
    }
}

/// Null, false, zero, and empty strings, arrays or objects are zero.
fn json_is_zero(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f.abs() < f64::EPSILON),
        Value::String(s) => s.is_empty(),
        Value::Array(items) => items.is_empty(),
        Value::Object(map) => map.is_empty(),
    }
}

impl From<bool> for TypedValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<String> for TypedValue {
    fn from(value: String) -> Self {
        Self::String(value)
    }
}

impl From<&str> for TypedValue {
    fn from(value: &str) -> Self {
        Self::String(value.to_string())
    }
}

impl From<i64> for TypedValue {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<u64> for TypedValue {
    fn from(value: u64) -> Self {
        Self::UnsignedInt(value)
    }
}

impl From<Vec<String>> for TypedValue {
    fn from(value: Vec<String>) -> Self {
        Self::StringList(value)
    }
}

impl From<Vec<u64>> for TypedValue {
    fn from(value: Vec<u64>) -> Self {
        Self::UnsignedIntList(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_values() {
        assert!(FieldKind::String.zero().is_zero());
        assert!(FieldKind::Int.zero().is_zero());
        assert!(FieldKind::UnsignedInt.zero().is_zero());
        assert!(FieldKind::StringList.zero().is_zero());
        assert!(FieldKind::UnsignedIntList.zero().is_zero());
        assert!(FieldKind::Bool.zero().is_zero());
        assert!(FieldKind::Custom.zero().is_zero());
        assert!(!TypedValue::from("x").is_zero());
        assert!(!TypedValue::Bool(true).is_zero());
        assert!(TypedValue::Custom(Value::String(String::new())).is_zero());
        assert!(!TypedValue::Custom(serde_json::json!("10.0.0.1")).is_zero());
        assert!(!TypedValue::Int(-1).is_zero());
    }

    #[test]
    fn test_kind_round_trip_through_zero() {
        for kind in [
            FieldKind::String,
            FieldKind::Int,
            FieldKind::UnsignedInt,
            FieldKind::StringList,
            FieldKind::UnsignedIntList,
            FieldKind::Bool,
            FieldKind::Custom,
        ] {
            assert_eq!(kind.zero().kind(), kind);
        }
    }

    #[test]
    fn test_kind_from_str() {
        assert_eq!("string".parse::<FieldKind>().unwrap(), FieldKind::String);
        assert_eq!("UINT".parse::<FieldKind>().unwrap(), FieldKind::UnsignedInt);
        assert_eq!(
            "u64_list".parse::<FieldKind>().unwrap(),
            FieldKind::UnsignedIntList
        );

        assert_eq!("Boolean".parse::<FieldKind>().unwrap(), FieldKind::Bool);

        let err = "float".parse::<FieldKind>().unwrap_err();
        assert!(err.to_string().contains("float"));
    }

    #[test]
    fn test_element_kind() {
        assert_eq!(FieldKind::StringList.element_kind(), Some(FieldKind::String));
        assert_eq!(
            FieldKind::UnsignedIntList.element_kind(),
            Some(FieldKind::UnsignedInt)
        );
        assert_eq!(FieldKind::Int.element_kind(), None);
    }

    #[test]
    fn test_display() {
        assert_eq!(TypedValue::from("tech").to_string(), "tech");
        assert_eq!(TypedValue::Int(-4).to_string(), "-4");
        assert_eq!(
            TypedValue::from(vec!["a".to_string(), "b".to_string()]).to_string(),
            "a,b"
        );
        assert_eq!(TypedValue::from(vec![1_u64, 2, 3]).to_string(), "1,2,3");
        assert_eq!(TypedValue::Bool(true).to_string(), "true");
        assert_eq!(
            TypedValue::Custom(serde_json::json!("10.0.0.1")).to_string(),
            "10.0.0.1"
        );
        assert_eq!(
            TypedValue::Custom(serde_json::json!({"a": 1})).to_string(),
            r#"{"a":1}"#
        );
    }

    #[test]
    fn test_custom_kind_is_not_configurable() {
        assert!(serde_json::from_str::<FieldKind>(r#""custom""#).is_err());
        assert!("custom".parse::<FieldKind>().is_err());
        assert_eq!(
            serde_json::from_str::<FieldKind>(r#""bool""#).unwrap(),
            FieldKind::Bool
        );
    }

    #[test]
    fn test_serialize_natural_json() {
        assert_eq!(
            serde_json::to_value(TypedValue::from(vec![7_u64])).unwrap(),
            serde_json::json!([7])
        );
        assert_eq!(
            serde_json::to_value(TypedValue::Int(-3)).unwrap(),
            serde_json::json!(-3)
        );
    }

    #[test]
    fn test_elements() {
        let list = TypedValue::from(vec!["x".to_string(), "y".to_string()]);
        assert_eq!(
            list.elements().unwrap(),
            vec![TypedValue::from("x"), TypedValue::from("y")]
        );
        assert_eq!(list.len(), Some(2));
        assert!(TypedValue::UnsignedInt(1).elements().is_none());
    }
}

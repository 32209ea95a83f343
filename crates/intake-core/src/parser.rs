//! Caller-registered text parsers for custom field types.

use serde::Serialize;
use serde_json::Value;
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

type ParseFn = Arc<dyn Fn(&str) -> Option<Value> + Send + Sync>;

/// Parses raw request text into a caller-defined value.
///
/// A field declared with a parser has kind [`FieldKind::Custom`](crate::FieldKind::Custom);
/// its coerced value is the parsed type's JSON form, so a record holding it
/// still binds to a caller-defined struct through
/// [`TypedRecord::deserialize`](crate::TypedRecord::deserialize).
///
/// # Example
///
/// ```
/// use intake_core::TextParser;
/// use std::net::IpAddr;
///
/// let parser = TextParser::of::<IpAddr>("ip address");
/// assert_eq!(parser.parse("10.0.0.1"), Some(serde_json::json!("10.0.0.1")));
/// assert_eq!(parser.parse("localhost"), None);
/// assert_eq!(parser.label(), "ip address");
/// ```
#[derive(Clone)]
pub struct TextParser {
    label: String,
    parse: ParseFn,
}

impl TextParser {
    /// Creates a parser from a closure. `None` means the text is invalid.
    #[must_use]
    pub fn new<F>(label: impl Into<String>, parse: F) -> Self
    where
        F: Fn(&str) -> Option<Value> + Send + Sync + 'static,
    {
        Self {
            label: label.into(),
            parse: Arc::new(parse),
        }
    }

    /// Creates a parser for any type that parses from text and serializes.
    #[must_use]
    pub fn of<T>(label: impl Into<String>) -> Self
    where
        T: FromStr + Serialize,
    {
        Self::new(label, |raw| {
            raw.parse::<T>()
                .ok()
                .and_then(|v| serde_json::to_value(v).ok())
        })
    }

    /// Human-readable name of the target type, used in failure messages.
    #[must_use]
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Parses `raw`, returning `None` when it is not a valid value.
    #[must_use]
    pub fn parse(&self, raw: &str) -> Option<Value> {
        (self.parse)(raw)
    }
}

impl fmt::Debug for TextParser {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TextParser")
            .field("label", &self.label)
            .finish_non_exhaustive()
    }
}

/// Two parsers are equal when they share a label and the same closure.
impl PartialEq for TextParser {
    fn eq(&self, other: &Self) -> bool {
        self.label == other.label && Arc::ptr_eq(&self.parse, &other.parse)
    }
}

impl Eq for TextParser {}

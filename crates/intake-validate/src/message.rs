//! Fixed message templates, keyed by rule and value shape.

use crate::rule::Bound;
use intake_core::FieldKind;

pub(crate) fn min(kind: FieldKind, bound: &Bound) -> String {
    match kind {
        FieldKind::String => format!("Minimum {bound} characters required"),
        FieldKind::StringList | FieldKind::UnsignedIntList => {
            format!("At least {bound} items required")
        }
        FieldKind::Int | FieldKind::UnsignedInt | FieldKind::Bool | FieldKind::Custom => {
            format!("Minimum value is {bound}")
        }
    }
}

pub(crate) fn max(kind: FieldKind, bound: &Bound) -> String {
    match kind {
        FieldKind::String => format!("Maximum {bound} characters allowed"),
        FieldKind::StringList | FieldKind::UnsignedIntList => {
            format!("Maximum {bound} items allowed")
        }
        FieldKind::Int | FieldKind::UnsignedInt | FieldKind::Bool | FieldKind::Custom => {
            format!("Maximum value is {bound}")
        }
    }
}

pub(crate) fn one_of(members: &[String]) -> String {
    format!("Must be one of: {}", members.join(", "))
}

pub(crate) const DUPLICATES: &str = "Contains duplicate values";

pub(crate) const INVALID_EMAIL: &str = "Invalid email format";

pub(crate) fn element(inner: &str) -> String {
    format!("Invalid element: {inner}")
}

/// Renders a registered message, substituting `{param}`.
pub(crate) fn custom(template: &str, param: Option<&str>) -> String {
    template.replace("{param}", param.unwrap_or_default())
}

pub(crate) fn generic(field: &str, tag: &str) -> String {
    format!("Field validation for '{field}' failed on the '{tag}' tag")
}

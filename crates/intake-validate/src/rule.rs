//! Parsed validation rules.
//!
//! A rule string such as `"omitempty,unique,dive,min=2,max=20"` is parsed once
//! into a [`RuleSet`]: the rules that apply to the whole value, the rules that
//! apply to each list element after `dive`, and the validation groups the
//! field belongs to.

use std::fmt;

/// Built-in rule tags.
pub(crate) const BUILTIN_TAGS: &[&str] = &[
    REQUIRED, OMITEMPTY, MIN, MAX, IN, UNIQUE, DIVE, EMAIL,
];

pub(crate) const REQUIRED: &str = "required";
pub(crate) const OMITEMPTY: &str = "omitempty";
pub(crate) const MIN: &str = "min";
pub(crate) const MAX: &str = "max";
pub(crate) const IN: &str = "in";
pub(crate) const UNIQUE: &str = "unique";
pub(crate) const DIVE: &str = "dive";
pub(crate) const EMAIL: &str = "email";

/// Groups every validator knows.
pub(crate) const BUILTIN_GROUPS: &[&str] = &["create", "update"];

/// A numeric rule parameter, keeping the text it was written as.
///
/// Stored as `i128` so one comparison covers string lengths, `i64` and `u64`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Bound {
    raw: String,
    value: i128,
}

impl Bound {
    /// Parses a bound parameter.
    pub(crate) fn parse(raw: &str) -> Option<Self> {
        raw.parse().ok().map(|value| Self {
            raw: raw.to_string(),
            value,
        })
    }

    /// The parameter as written.
    #[must_use]
    pub fn raw(&self) -> &str {
        &self.raw
    }

    /// The numeric value.
    #[must_use]
    pub const fn value(&self) -> i128 {
        self.value
    }
}

impl fmt::Display for Bound {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

/// A single validation directive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Rule {
    /// Value must not be the zero value.
    Required,
    /// A zero value skips the remaining rules.
    OmitEmpty,
    /// Lower bound on characters, value, or items.
    Min(Bound),
    /// Upper bound on characters, value, or items.
    Max(Bound),
    /// Stringified value must equal one of the members.
    In(Vec<String>),
    /// List elements must stringify distinctly.
    Unique,
    /// Value must be an email address.
    Email,
    /// A rule registered on the validator.
    Custom {
        /// Registered tag.
        tag: String,
        /// Parameter after `=`, if any.
        param: Option<String>,
    },
}

impl Rule {
    /// The tag this rule was written as.
    #[must_use]
    pub fn tag(&self) -> &str {
        match self {
            Self::Required => REQUIRED,
            Self::OmitEmpty => OMITEMPTY,
            Self::Min(_) => MIN,
            Self::Max(_) => MAX,
            Self::In(_) => IN,
            Self::Unique => UNIQUE,
            Self::Email => EMAIL,
            Self::Custom { tag, .. } => tag,
        }
    }
}

/// The compiled rules of one field.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RuleSet {
    pub(crate) field_rules: Vec<Rule>,
    pub(crate) element_rules: Option<Vec<Rule>>,
    pub(crate) groups: Vec<String>,
}

impl RuleSet {
    /// Rules applied to the whole value.
    #[must_use]
    pub fn field_rules(&self) -> &[Rule] {
        &self.field_rules
    }

    /// Rules applied to each element, present when the set contains `dive`.
    #[must_use]
    pub fn element_rules(&self) -> Option<&[Rule]> {
        self.element_rules.as_deref()
    }

    /// Group markers; empty means the field is validated in every group.
    #[must_use]
    pub fn groups(&self) -> &[String] {
        &self.groups
    }

    /// Whether the field is validated when `group` is active.
    #[must_use]
    pub fn applies_to(&self, group: Option<&str>) -> bool {
        self.groups.is_empty() || group.is_some_and(|g| self.groups.iter().any(|m| m == g))
    }

    /// Returns true if there is nothing to check.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.field_rules.is_empty() && self.element_rules.as_ref().map_or(true, Vec::is_empty)
    }
}

/// One `tag[=param]` item of a rule string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Token<'a> {
    pub(crate) tag: &'a str,
    pub(crate) param: Option<String>,
}

/// Splits a rule string on commas.
///
/// `in=` keeps absorbing the following items as further members until an
/// item contains `=` or is itself a tag, so `in=tech,sports,politics` is one
/// token with the parameter `tech,sports,politics`.
pub(crate) fn tokenize<'a>(dsl: &'a str, is_tag: impl Fn(&str) -> bool) -> Vec<Token<'a>> {
    let mut tokens = Vec::new();
    let mut items = dsl.split(',').map(str::trim).filter(|s| !s.is_empty()).peekable();

    while let Some(item) = items.next() {
        let (tag, param) = match item.split_once('=') {
            Some((tag, param)) => (tag.trim(), Some(param.trim().to_string())),
            None => (item, None),
        };

        let param = if tag == IN {
            let mut members: Vec<String> = param.into_iter().filter(|p| !p.is_empty()).collect();
            while let Some(next) = items.next_if(|n| !n.contains('=') && !is_tag(n)) {
                members.push(next.to_string());
            }
            Some(members.join(","))
        } else {
            param
        };

        tokens.push(Token { tag, param });
    }
    tokens
}

#[cfg(test)]
mod tests {
    use super::*;

    fn builtin(tag: &str) -> bool {
        BUILTIN_TAGS.contains(&tag)
    }

    fn tags(dsl: &str) -> Vec<(String, Option<String>)> {
        tokenize(dsl, builtin)
            .into_iter()
            .map(|t| (t.tag.to_string(), t.param))
            .collect()
    }

    #[test]
    fn test_tokenize_simple() {
        assert_eq!(
            tags("required,min=3,max=50"),
            vec![
                ("required".to_string(), None),
                ("min".to_string(), Some("3".to_string())),
                ("max".to_string(), Some("50".to_string())),
            ]
        );
    }

    #[test]
    fn test_in_absorbs_members() {
        assert_eq!(
            tags("required,dive,in=tech,sports,politics"),
            vec![
                ("required".to_string(), None),
                ("dive".to_string(), None),
                ("in".to_string(), Some("tech,sports,politics".to_string())),
            ]
        );
    }

    #[test]
    fn test_in_stops_at_tag_or_param() {
        assert_eq!(
            tags("in=a,b,email"),
            vec![
                ("in".to_string(), Some("a,b".to_string())),
                ("email".to_string(), None),
            ]
        );
        assert_eq!(
            tags("in=a,b,max=3"),
            vec![
                ("in".to_string(), Some("a,b".to_string())),
                ("max".to_string(), Some("3".to_string())),
            ]
        );
    }

    #[test]
    fn test_blank_items_ignored() {
        assert_eq!(tags(" required , ,"), vec![("required".to_string(), None)]);
        assert!(tags("").is_empty());
    }

    #[test]
    fn test_bound() {
        let bound = Bound::parse("-5").unwrap();
        assert_eq!(bound.value(), -5);
        assert_eq!(bound.to_string(), "-5");
        assert!(Bound::parse("three").is_none());
    }

    #[test]
    fn test_applies_to() {
        let open = RuleSet::default();
        assert!(open.applies_to(None));
        assert!(open.applies_to(Some("create")));

        let scoped = RuleSet {
            groups: vec!["update".to_string()],
            ..RuleSet::default()
        };
        assert!(scoped.applies_to(Some("update")));
        assert!(!scoped.applies_to(Some("create")));
        assert!(!scoped.applies_to(None));
    }
}

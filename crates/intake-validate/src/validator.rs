//! The validation engine.
//!
//! A [`Validator`] is built once, holding custom rules and validation group
//! names, and shared read-only across endpoints. It compiles rule strings
//! into [`FieldRules`] at endpoint build time and checks assembled records
//! against them per request.

use crate::email::is_valid_email;
use crate::message;
use crate::rule::{
    tokenize, Bound, Rule, RuleSet, Token, BUILTIN_GROUPS, BUILTIN_TAGS, DIVE, EMAIL, IN, MAX,
    MIN, OMITEMPTY, REQUIRED, UNIQUE,
};
use intake_core::{
    FieldError, FieldKind, IntakeError, IntakeResult, TypedRecord, TypedValue, REQUIRED_MESSAGE,
};
use std::collections::{HashMap, HashSet};
use std::fmt;
use std::sync::Arc;
use tracing::{debug, warn};

/// Predicate of a custom rule: the value and the optional `=param`.
pub type RulePredicate = Arc<dyn Fn(&TypedValue, Option<&str>) -> bool + Send + Sync>;

#[derive(Clone)]
struct CustomRule {
    predicate: RulePredicate,
    message: Option<String>,
}

/// The compiled validation rules for one field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldRules {
    field: String,
    kind: FieldKind,
    rules: RuleSet,
}

impl FieldRules {
    /// Logical field name.
    #[must_use]
    pub fn field(&self) -> &str {
        &self.field
    }

    /// Kind the rules were checked against.
    #[must_use]
    pub fn kind(&self) -> FieldKind {
        self.kind
    }

    /// The parsed rules.
    #[must_use]
    pub fn rules(&self) -> &RuleSet {
        &self.rules
    }
}

/// Outcome of checking one rule against one value.
enum Verdict {
    Pass,
    /// `omitempty` on a zero value: stop checking this value, no error.
    Skip,
    Fail(String),
}

/// Rule registry and evaluation engine.
///
/// # Example
///
/// ```
/// use intake_core::{FieldKind, RecordSchema, TypedValue};
/// use intake_validate::Validator;
///
/// let validator = Validator::builder().group("search").build().unwrap();
/// let rules = validator
///     .compile("Tags", FieldKind::StringList, "required,min=1,max=5,dive,in=tech,sports,politics")
///     .unwrap();
///
/// let schema = RecordSchema::builder()
///     .field("Tags", "tags", FieldKind::StringList)
///     .build()
///     .unwrap();
/// let mut record = schema.empty_record();
/// record
///     .set("Tags", TypedValue::from(vec!["tech".to_string(), "music".to_string()]))
///     .unwrap();
///
/// let errors = validator.validate(&record, &[rules], Some("search"));
/// assert_eq!(errors.len(), 1);
/// assert_eq!(errors[0].message, "Invalid element: Must be one of: tech, sports, politics");
/// assert_eq!(errors[0].value.as_deref(), Some("music"));
/// ```
#[derive(Clone)]
pub struct Validator {
    custom: HashMap<String, CustomRule>,
    groups: HashSet<String>,
}

impl Validator {
    /// Creates a builder.
    #[must_use]
    pub fn builder() -> ValidatorBuilder {
        ValidatorBuilder::default()
    }

    /// Whether `group` is a known validation group.
    #[must_use]
    pub fn has_group(&self, group: &str) -> bool {
        self.groups.contains(group)
    }

    /// Whether `tag` is a built-in or registered rule.
    #[must_use]
    pub fn has_rule(&self, tag: &str) -> bool {
        BUILTIN_TAGS.contains(&tag) || self.custom.contains_key(tag)
    }

    fn is_tag(&self, tag: &str) -> bool {
        self.has_rule(tag) || self.has_group(tag)
    }

    /// Parses a rule string for a field of `kind`.
    ///
    /// Unknown tags are rejected here, at endpoint build time, instead of
    /// being reported per request with the generic message; only registered
    /// custom rules without a template use that message.
    ///
    /// # Errors
    ///
    /// Returns an error for unknown tags, malformed parameters, and rules that
    /// cannot apply to the kind they would be checked against (for example
    /// `min`/`max` on a boolean or custom-typed field).
    pub fn compile(&self, field: &str, kind: FieldKind, dsl: &str) -> IntakeResult<FieldRules> {
        let mut rules = RuleSet::default();

        for token in tokenize(dsl, |t| self.is_tag(t)) {
            if self.has_group(token.tag) {
                no_param(field, &token)?;
                rules.groups.push(token.tag.to_string());
                continue;
            }

            if token.tag == DIVE {
                no_param(field, &token)?;
                if rules.element_rules.is_some() || !kind.is_list() {
                    let target = kind.element_kind().filter(|_| rules.element_rules.is_some());
                    return Err(IntakeError::rule_not_applicable(
                        field,
                        DIVE,
                        target.unwrap_or(kind),
                    ));
                }
                rules.element_rules = Some(Vec::new());
                continue;
            }

            let target = match rules.element_rules {
                Some(_) => kind.element_kind().unwrap_or(kind),
                None => kind,
            };
            let rule = self.build_rule(field, target, token)?;
            match rules.element_rules.as_mut() {
                Some(element_rules) => element_rules.push(rule),
                None => rules.field_rules.push(rule),
            }
        }

        Ok(FieldRules {
            field: field.to_string(),
            kind,
            rules,
        })
    }

    fn build_rule(&self, field: &str, target: FieldKind, token: Token<'_>) -> IntakeResult<Rule> {
        let rule = match token.tag {
            REQUIRED => {
                no_param(field, &token)?;
                Rule::Required
            }
            OMITEMPTY => {
                no_param(field, &token)?;
                Rule::OmitEmpty
            }
            MIN | MAX => {
                if !target.is_measurable() {
                    return Err(IntakeError::rule_not_applicable(field, token.tag, target));
                }
                let bound = token
                    .param
                    .as_deref()
                    .and_then(Bound::parse)
                    .ok_or_else(|| {
                        IntakeError::invalid_rule_param(field, token.tag, "expected an integer")
                    })?;
                if token.tag == MIN {
                    Rule::Min(bound)
                } else {
                    Rule::Max(bound)
                }
            }
            IN => {
                if target.is_list() {
                    return Err(IntakeError::rule_not_applicable(field, IN, target));
                }
                let members: Vec<String> = token
                    .param
                    .as_deref()
                    .unwrap_or_default()
                    .split(',')
                    .filter(|m| !m.is_empty())
                    .map(str::to_string)
                    .collect();
                if members.is_empty() {
                    return Err(IntakeError::invalid_rule_param(
                        field,
                        IN,
                        "expected at least one member",
                    ));
                }
                Rule::In(members)
            }
            UNIQUE => {
                no_param(field, &token)?;
                if !target.is_list() {
                    return Err(IntakeError::rule_not_applicable(field, UNIQUE, target));
                }
                Rule::Unique
            }
            EMAIL => {
                no_param(field, &token)?;
                if target != FieldKind::String {
                    return Err(IntakeError::rule_not_applicable(field, EMAIL, target));
                }
                Rule::Email
            }
            tag if self.custom.contains_key(tag) => Rule::Custom {
                tag: tag.to_string(),
                param: token.param,
            },
            tag => return Err(IntakeError::unknown_rule(field, tag)),
        };
        Ok(rule)
    }

    /// Checks a record against compiled field rules.
    ///
    /// Fields scoped to groups other than `group` are skipped. Per field,
    /// checking stops at the first failing rule; every field is checked.
    /// An empty result means the record is valid.
    pub fn validate(
        &self,
        record: &TypedRecord,
        fields: &[FieldRules],
        group: Option<&str>,
    ) -> Vec<FieldError> {
        let mut errors = Vec::new();

        for field in fields {
            if !field.rules.applies_to(group) {
                continue;
            }
            let Some(value) = record.get(&field.field) else {
                warn!(field = %field.field, "field missing from record, skipping rules");
                continue;
            };
            if let Some(error) = self.check_field(&field.field, value, &field.rules) {
                debug!(field = %error.field, message = %error.message, "rule violated");
                errors.push(error);
            }
        }
        errors
    }

    fn check_field(&self, name: &str, value: &TypedValue, rules: &RuleSet) -> Option<FieldError> {
        match self.check_all(name, value, &rules.field_rules) {
            Verdict::Fail(msg) => return Some(field_error(name, msg, value)),
            Verdict::Skip => return None,
            Verdict::Pass => {}
        }

        let element_rules = rules.element_rules.as_deref()?;
        for element in value.elements().unwrap_or_default() {
            if let Verdict::Fail(msg) = self.check_all(name, &element, element_rules) {
                return Some(field_error(name, message::element(&msg), &element));
            }
        }
        None
    }

    fn check_all(&self, name: &str, value: &TypedValue, rules: &[Rule]) -> Verdict {
        for rule in rules {
            match self.check(name, value, rule) {
                Verdict::Pass => {}
                other => return other,
            }
        }
        Verdict::Pass
    }

    fn check(&self, name: &str, value: &TypedValue, rule: &Rule) -> Verdict {
        let passed = match rule {
            Rule::Required => !value.is_zero(),
            Rule::OmitEmpty => {
                return if value.is_zero() {
                    Verdict::Skip
                } else {
                    Verdict::Pass
                }
            }
            Rule::Min(bound) => measure(value) >= bound.value(),
            Rule::Max(bound) => measure(value) <= bound.value(),
            Rule::In(members) => {
                let text = value.to_string();
                members.iter().any(|m| *m == text)
            }
            Rule::Unique => has_unique_elements(value),
            Rule::Email => value.as_str().is_some_and(is_valid_email),
            Rule::Custom { tag, param } => match self.custom.get(tag) {
                Some(custom) => (custom.predicate)(value, param.as_deref()),
                None => {
                    warn!(tag = %tag, "rule compiled by another validator, skipping");
                    true
                }
            },
        };

        if passed {
            Verdict::Pass
        } else {
            Verdict::Fail(self.message(name, value.kind(), rule))
        }
    }

    fn message(&self, name: &str, kind: FieldKind, rule: &Rule) -> String {
        match rule {
            Rule::Required | Rule::OmitEmpty => REQUIRED_MESSAGE.to_string(),
            Rule::Min(bound) => message::min(kind, bound),
            Rule::Max(bound) => message::max(kind, bound),
            Rule::In(members) => message::one_of(members),
            Rule::Unique => message::DUPLICATES.to_string(),
            Rule::Email => message::INVALID_EMAIL.to_string(),
            Rule::Custom { tag, param } => {
                match self.custom.get(tag).and_then(|c| c.message.as_deref()) {
                    Some(template) => message::custom(template, param.as_deref()),
                    None => message::generic(name, tag),
                }
            }
        }
    }
}

impl fmt::Debug for Validator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut custom: Vec<&String> = self.custom.keys().collect();
        custom.sort();
        let mut groups: Vec<&String> = self.groups.iter().collect();
        groups.sort();
        f.debug_struct("Validator")
            .field("custom", &custom)
            .field("groups", &groups)
            .finish()
    }
}

impl Default for Validator {
    fn default() -> Self {
        Self {
            custom: HashMap::new(),
            groups: BUILTIN_GROUPS.iter().map(ToString::to_string).collect(),
        }
    }
}

/// Builder for [`Validator`].
#[derive(Default)]
pub struct ValidatorBuilder {
    rules: Vec<(String, CustomRule)>,
    groups: Vec<String>,
}

impl ValidatorBuilder {
    /// Registers a custom rule reported with the generic message.
    #[must_use]
    pub fn rule<F>(self, tag: impl Into<String>, predicate: F) -> Self
    where
        F: Fn(&TypedValue, Option<&str>) -> bool + Send + Sync + 'static,
    {
        self.push_rule(tag.into(), Arc::new(predicate), None)
    }

    /// Registers a custom rule with a message template. `{param}` in the
    /// template is replaced with the rule's parameter.
    #[must_use]
    pub fn rule_with_message<F>(
        self,
        tag: impl Into<String>,
        message: impl Into<String>,
        predicate: F,
    ) -> Self
    where
        F: Fn(&TypedValue, Option<&str>) -> bool + Send + Sync + 'static,
    {
        self.push_rule(tag.into(), Arc::new(predicate), Some(message.into()))
    }

    fn push_rule(mut self, tag: String, predicate: RulePredicate, message: Option<String>) -> Self {
        self.rules.push((tag, CustomRule { predicate, message }));
        self
    }

    /// Registers a validation group name.
    #[must_use]
    pub fn group(mut self, name: impl Into<String>) -> Self {
        self.groups.push(name.into());
        self
    }

    /// Builds the validator.
    ///
    /// # Errors
    ///
    /// Returns [`IntakeError::RuleConflict`] if a tag or group name shadows a
    /// built-in rule, a built-in group, or an earlier registration.
    pub fn build(self) -> IntakeResult<Validator> {
        let mut validator = Validator::default();

        for group in self.groups {
            if BUILTIN_TAGS.contains(&group.as_str()) || !validator.groups.insert(group.clone()) {
                return Err(IntakeError::rule_conflict(group));
            }
        }
        for (tag, rule) in self.rules {
            if validator.is_tag(&tag) {
                return Err(IntakeError::rule_conflict(tag));
            }
            validator.custom.insert(tag, rule);
        }

        debug!(
            custom_rules = validator.custom.len(),
            groups = validator.groups.len(),
            "validator built"
        );
        Ok(validator)
    }
}

impl fmt::Debug for ValidatorBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ValidatorBuilder")
            .field("rules", &self.rules.iter().map(|(t, _)| t).collect::<Vec<_>>())
            .field("groups", &self.groups)
            .finish()
    }
}

fn no_param(field: &str, token: &Token<'_>) -> IntakeResult<()> {
    match token.param {
        Some(_) => Err(IntakeError::invalid_rule_param(
            field,
            token.tag,
            "takes no parameter",
        )),
        None => Ok(()),
    }
}

/// Characters for strings, the value for numbers, items for lists.
fn measure(value: &TypedValue) -> i128 {
    match value {
        TypedValue::String(s) => s.chars().count() as i128,
        TypedValue::Int(n) => i128::from(*n),
        TypedValue::UnsignedInt(n) => i128::from(*n),
        TypedValue::StringList(items) => items.len() as i128,
        TypedValue::UnsignedIntList(items) => items.len() as i128,
        TypedValue::Bool(_) | TypedValue::Custom(_) => 0,
    }
}

fn has_unique_elements(value: &TypedValue) -> bool {
    let mut seen = HashSet::new();
    value
        .elements()
        .unwrap_or_default()
        .iter()
        .all(|element| seen.insert(element.to_string()))
}

fn field_error(name: &str, message: String, value: &TypedValue) -> FieldError {
    let error = FieldError::new(name, message);
    let text = value.to_string();
    if text.is_empty() {
        error
    } else {
        error.with_value(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use intake_core::RecordSchema;

    fn schema() -> RecordSchema {
        RecordSchema::builder()
            .field("Name", "name", FieldKind::String)
            .field("Email", "email", FieldKind::String)
            .field("Tags", "tags", FieldKind::StringList)
            .field("IDs", "ids", FieldKind::UnsignedIntList)
            .field("UserID", "user_id", FieldKind::UnsignedInt)
            .field("Rating", "rating", FieldKind::Int)
            .field("Active", "active", FieldKind::Bool)
            .field("Addr", "addr", FieldKind::Custom)
            .build()
            .unwrap()
    }

    fn strings(items: &[&str]) -> TypedValue {
        TypedValue::StringList(items.iter().map(ToString::to_string).collect())
    }

    fn check(field: &str, kind: FieldKind, dsl: &str, value: TypedValue) -> Vec<FieldError> {
        let validator = Validator::builder().group("search").build().unwrap();
        let rules = validator.compile(field, kind, dsl).unwrap();
        let mut record = schema().empty_record();
        record.set(field, value).unwrap();
        validator.validate(&record, &[rules], None)
    }

    fn messages(errors: &[FieldError]) -> Vec<&str> {
        errors.iter().map(|e| e.message.as_str()).collect()
    }

    #[test]
    fn test_min_string_counts_characters() {
        let errors = check("Name", FieldKind::String, "required,min=3,max=50", "Al".into());
        assert_eq!(messages(&errors), vec!["Minimum 3 characters required"]);
        assert_eq!(errors[0].value.as_deref(), Some("Al"));

        assert!(check("Name", FieldKind::String, "min=3", "Zoë".into()).is_empty());
    }

    #[test]
    fn test_stops_at_first_failure_per_field() {
        let errors = check("Name", FieldKind::String, "required,min=3", "".into());
        assert_eq!(errors, vec![FieldError::new("Name", REQUIRED_MESSAGE)]);
    }

    #[test]
    fn test_numeric_bounds() {
        let errors = check("Rating", FieldKind::Int, "min=1,max=5", TypedValue::Int(9));
        assert_eq!(messages(&errors), vec!["Maximum value is 5"]);

        let errors = check("Rating", FieldKind::Int, "min=-2", TypedValue::Int(-3));
        assert_eq!(messages(&errors), vec!["Minimum value is -2"]);

        let errors = check("UserID", FieldKind::UnsignedInt, "required,min=1", TypedValue::UnsignedInt(0));
        assert_eq!(messages(&errors), vec![REQUIRED_MESSAGE]);
    }

    #[test]
    fn test_list_bounds() {
        let errors = check("Tags", FieldKind::StringList, "min=1", strings(&[]));
        assert_eq!(messages(&errors), vec!["At least 1 items required"]);

        let errors = check(
            "Tags",
            FieldKind::StringList,
            "max=2",
            strings(&["a", "b", "c"]),
        );
        assert_eq!(messages(&errors), vec!["Maximum 2 items allowed"]);
        assert_eq!(errors[0].value.as_deref(), Some("a,b,c"));
    }

    #[test]
    fn test_in_is_exact_and_case_sensitive() {
        let dsl = "in=tech,sports,politics";
        assert!(check("Name", FieldKind::String, dsl, "sports".into()).is_empty());

        let errors = check("Name", FieldKind::String, dsl, "Sports".into());
        assert_eq!(messages(&errors), vec!["Must be one of: tech, sports, politics"]);
    }

    #[test]
    fn test_in_on_numbers_compares_text() {
        let errors = check("Rating", FieldKind::Int, "in=1,2", TypedValue::Int(3));
        assert_eq!(messages(&errors), vec!["Must be one of: 1, 2"]);
        assert!(check("Rating", FieldKind::Int, "in=1,2", TypedValue::Int(2)).is_empty());
    }

    #[test]
    fn test_unique() {
        let errors = check("Tags", FieldKind::StringList, "unique", strings(&["x", "x"]));
        assert_eq!(messages(&errors), vec!["Contains duplicate values"]);
        assert!(check("Tags", FieldKind::StringList, "unique", strings(&["x", "y"])).is_empty());

        let errors = check(
            "IDs",
            FieldKind::UnsignedIntList,
            "unique",
            TypedValue::from(vec![4_u64, 4]),
        );
        assert_eq!(messages(&errors), vec!["Contains duplicate values"]);
    }

    #[test]
    fn test_dive_reports_first_failing_element() {
        let errors = check(
            "Tags",
            FieldKind::StringList,
            "required,min=1,max=5,dive,in=tech,sports,politics",
            strings(&["tech", "music", "art"]),
        );
        assert_eq!(
            errors,
            vec![FieldError::new(
                "Tags",
                "Invalid element: Must be one of: tech, sports, politics"
            )
            .with_value("music")]
        );
    }

    #[test]
    fn test_dive_element_bounds_use_element_kind() {
        let errors = check(
            "Tags",
            FieldKind::StringList,
            "omitempty,unique,dive,min=2,max=20",
            strings(&["go", "x"]),
        );
        assert_eq!(
            messages(&errors),
            vec!["Invalid element: Minimum 2 characters required"]
        );

        let errors = check(
            "IDs",
            FieldKind::UnsignedIntList,
            "omitempty,unique,dive,min=1",
            TypedValue::from(vec![3_u64, 0]),
        );
        assert_eq!(messages(&errors), vec!["Invalid element: Minimum value is 1"]);
        assert_eq!(errors[0].value.as_deref(), Some("0"));
    }

    #[test]
    fn test_omitempty_skips_zero_values() {
        assert!(check("Name", FieldKind::String, "omitempty,min=3,max=50", "".into()).is_empty());
        assert!(check("Tags", FieldKind::StringList, "omitempty,dive,min=2", strings(&[])).is_empty());

        let errors = check("Name", FieldKind::String, "omitempty,min=3", "Al".into());
        assert_eq!(messages(&errors), vec!["Minimum 3 characters required"]);
    }

    #[test]
    fn test_email() {
        let errors = check("Email", FieldKind::String, "required,email", "nope".into());
        assert_eq!(messages(&errors), vec!["Invalid email format"]);
        assert!(check("Email", FieldKind::String, "required,email", "a@b.co".into()).is_empty());
    }

    #[test]
    fn test_continues_across_fields() {
        let validator = Validator::default();
        let rules = vec![
            validator.compile("Name", FieldKind::String, "required").unwrap(),
            validator.compile("Email", FieldKind::String, "required,email").unwrap(),
        ];
        let record = schema().empty_record();
        let errors = validator.validate(&record, &rules, None);

        let fields: Vec<&str> = errors.iter().map(|e| e.field.as_str()).collect();
        assert_eq!(fields, vec!["Name", "Email"]);
    }

    #[test]
    fn test_group_markers_scope_the_field() {
        let validator = Validator::default();
        let rules = vec![validator
            .compile("Name", FieldKind::String, "update,required")
            .unwrap()];
        let record = schema().empty_record();

        assert!(validator.validate(&record, &rules, Some("create")).is_empty());
        assert!(validator.validate(&record, &rules, None).is_empty());
        assert_eq!(validator.validate(&record, &rules, Some("update")).len(), 1);
    }

    #[test]
    fn test_custom_rules() {
        let validator = Validator::builder()
            .rule_with_message("prefix", "Must start with {param}", |value, param| {
                value
                    .as_str()
                    .is_some_and(|s| s.starts_with(param.unwrap_or_default()))
            })
            .rule("even", |value, _| value.as_i64().is_some_and(|n| n % 2 == 0))
            .build()
            .unwrap();

        let name = validator.compile("Name", FieldKind::String, "prefix=usr_").unwrap();
        let rating = validator.compile("Rating", FieldKind::Int, "even").unwrap();

        let mut record = schema().empty_record();
        record.set("Name", "admin".into()).unwrap();
        record.set("Rating", TypedValue::Int(3)).unwrap();

        let errors = validator.validate(&record, &[name, rating], None);
        assert_eq!(
            messages(&errors),
            vec![
                "Must start with usr_",
                "Field validation for 'Rating' failed on the 'even' tag"
            ]
        );
    }

    #[test]
    fn test_compile_errors() {
        let validator = Validator::default();

        assert_eq!(
            validator.compile("Name", FieldKind::String, "required,slug"),
            Err(IntakeError::unknown_rule("Name", "slug"))
        );
        assert!(matches!(
            validator.compile("Name", FieldKind::String, "min=three"),
            Err(IntakeError::InvalidRuleParam { .. })
        ));
        assert!(matches!(
            validator.compile("Name", FieldKind::String, "max"),
            Err(IntakeError::InvalidRuleParam { .. })
        ));
        assert!(matches!(
            validator.compile("Name", FieldKind::String, "required=yes"),
            Err(IntakeError::InvalidRuleParam { .. })
        ));
        assert_eq!(
            validator.compile("Tags", FieldKind::StringList, "email"),
            Err(IntakeError::rule_not_applicable("Tags", "email", FieldKind::StringList))
        );
        assert_eq!(
            validator.compile("Name", FieldKind::String, "dive"),
            Err(IntakeError::rule_not_applicable("Name", "dive", FieldKind::String))
        );
        assert!(validator.compile("Tags", FieldKind::StringList, "in=a,b").is_err());
        assert!(validator.compile("Tags", FieldKind::StringList, "dive,unique").is_err());
        assert!(validator.compile("Tags", FieldKind::StringList, "dive,dive").is_err());
        assert!(validator.compile("Name", FieldKind::String, "unique").is_err());
        assert_eq!(
            validator.compile("Active", FieldKind::Bool, "min=1"),
            Err(IntakeError::rule_not_applicable("Active", "min", FieldKind::Bool))
        );
        assert!(validator.compile("Addr", FieldKind::Custom, "max=3").is_err());
    }

    #[test]
    fn test_bool_and_custom_values() {
        let errors = check("Active", FieldKind::Bool, "required", TypedValue::Bool(false));
        assert_eq!(messages(&errors), vec![REQUIRED_MESSAGE]);
        assert!(check("Active", FieldKind::Bool, "required", TypedValue::Bool(true)).is_empty());

        let addr = TypedValue::Custom(serde_json::json!("10.0.0.1"));
        assert!(check("Addr", FieldKind::Custom, "required,in=10.0.0.1", addr).is_empty());

        let other = TypedValue::Custom(serde_json::json!("10.0.0.2"));
        let errors = check("Addr", FieldKind::Custom, "in=10.0.0.1", other);
        assert_eq!(messages(&errors), vec!["Must be one of: 10.0.0.1"]);
        assert_eq!(errors[0].value.as_deref(), Some("10.0.0.2"));
    }

    #[test]
    fn test_compile_splits_dive() {
        let validator = Validator::default();
        let rules = validator
            .compile("Tags", FieldKind::StringList, "required,dive,in=a,b,create")
            .unwrap();

        assert_eq!(rules.rules().field_rules(), &[Rule::Required]);
        assert_eq!(
            rules.rules().element_rules(),
            Some(&[Rule::In(vec!["a".to_string(), "b".to_string()])][..])
        );
        assert_eq!(rules.rules().groups(), &["create".to_string()]);
    }

    #[test]
    fn test_builder_conflicts() {
        assert_eq!(
            Validator::builder().rule("min", |_, _| true).build().unwrap_err(),
            IntakeError::rule_conflict("min")
        );
        assert!(Validator::builder().group("create").build().is_err());
        assert!(Validator::builder().group("email").build().is_err());
        assert!(Validator::builder()
            .group("audit")
            .rule("audit", |_, _| true)
            .build()
            .is_err());
    }

    #[test]
    fn test_groups_known() {
        let validator = Validator::builder().group("search").build().unwrap();
        assert!(validator.has_group("create"));
        assert!(validator.has_group("update"));
        assert!(validator.has_group("search"));
        assert!(!validator.has_group("delete"));
        assert!(validator.has_rule("dive"));
    }

    #[test]
    fn test_validator_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Validator>();
    }
}

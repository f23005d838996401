//! Field-level validation for drafts.
//!
//! Every form field carries a list of [`Rule`]s. Validation happens on
//! submit only: the draft is trimmed, each field is checked in declaration
//! order and the first failing rule of a field produces its error message.

use crate::models::record::Draft;
use crate::utils::formatting::parse_bool;
use crate::utils::{date, time};
use regex::Regex;
use serde::Serialize;
use std::cell::RefCell;
use std::collections::{BTreeMap, HashMap};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Rule {
    /// Value must not be empty after trimming.
    Required,
    /// Minimum length in characters.
    MinLen(usize),
    /// Maximum length in characters.
    MaxLen(usize),
    Pattern {
        regex: &'static str,
        message: &'static str,
    },
    /// Parses as a decimal number.
    Numeric,
    /// Parses as a whole number.
    Integer,
    /// Parses as a whole number without a sign, for counts and percentages.
    Unsigned,
    /// Numeric value inside the inclusive range.
    Range { min: f64, max: f64 },
    /// `YYYY-MM-DD`
    Date,
    /// `HH:MM`
    Time,
    Bool,
    /// Select input: one of the listed options (case-insensitive).
    OneOf(&'static [&'static str]),
}

/// Declarative description of one form input.
#[derive(Debug, Clone, Copy)]
pub struct FieldSpec {
    pub name: &'static str,
    pub label: &'static str,
    pub rules: &'static [Rule],
}

impl FieldSpec {
    pub const fn new(name: &'static str, label: &'static str, rules: &'static [Rule]) -> Self {
        Self { name, label, rules }
    }

    pub fn is_required(&self) -> bool {
        self.rules.contains(&Rule::Required)
    }
}

/// Field name → error message.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FieldErrors(BTreeMap<String, String>);

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record an error; the first message for a field wins.
    pub fn insert(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.0.entry(field.into()).or_insert_with(|| message.into());
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        self.0.get(field).map(String::as_str)
    }

    pub fn remove(&mut self, field: &str) -> Option<String> {
        self.0.remove(field)
    }

    pub fn clear(&mut self) {
        self.0.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// `Ok(())` when empty, otherwise the errors themselves.
    pub fn into_result(self) -> Result<(), FieldErrors> {
        if self.is_empty() { Ok(()) } else { Err(self) }
    }
}

impl fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self.iter().map(|(k, v)| format!("{k}: {v}")).collect();
        write!(f, "{}", parts.join("; "))
    }
}

thread_local! {
    static PATTERNS: RefCell<HashMap<&'static str, Regex>> = RefCell::new(HashMap::new());
}

/// Compiled form of a `Pattern` source, built on first use.
pub fn pattern(source: &'static str) -> Result<Regex, regex::Error> {
    PATTERNS.with(|cache| {
        let hit = cache.borrow().get(source).cloned();
        if let Some(re) = hit {
            return Ok(re);
        }
        let re = Regex::new(source)?;
        cache.borrow_mut().insert(source, re.clone());
        Ok(re)
    })
}

/// Check one rule against an already trimmed value.
pub fn check_rule(rule: &Rule, label: &str, value: &str) -> Result<(), String> {
    let ok = match rule {
        Rule::Required => !value.is_empty(),
        Rule::MinLen(n) => value.chars().count() >= *n,
        Rule::MaxLen(n) => value.chars().count() <= *n,
        Rule::Pattern { regex, .. } => match pattern(*regex) {
            Ok(re) => re.is_match(value),
            Err(e) => return Err(format!("{label} cannot be checked: invalid pattern ({e})")),
        },
        Rule::Numeric => value.parse::<f64>().is_ok_and(f64::is_finite),
        Rule::Integer => value.parse::<i64>().is_ok(),
        Rule::Unsigned => {
            value.bytes().all(|b| b.is_ascii_digit()) && value.parse::<u64>().is_ok()
        }
        Rule::Range { min, max } => value
            .parse::<f64>()
            .is_ok_and(|v| v >= *min && v <= *max),
        Rule::Date => date::parse_date(value).is_some(),
        Rule::Time => time::parse_time(value).is_some(),
        Rule::Bool => parse_bool(value).is_some(),
        Rule::OneOf(options) => options.iter().any(|o| o.eq_ignore_ascii_case(value)),
    };

    if ok {
        return Ok(());
    }

    Err(match rule {
        Rule::Required => format!("{label} is required"),
        Rule::MinLen(n) => format!("{label} must be at least {n} characters"),
        Rule::MaxLen(n) => format!("{label} must be at most {n} characters"),
        Rule::Pattern { message, .. } => format!("{label} {message}"),
        Rule::Numeric => format!("{label} must be a number"),
        Rule::Integer => format!("{label} must be a whole number"),
        Rule::Unsigned => format!("{label} must be a whole number without sign"),
        Rule::Range { min, max } => format!("{label} must be between {min} and {max}"),
        Rule::Date => format!("{label} must be a date (YYYY-MM-DD)"),
        Rule::Time => format!("{label} must be a time (HH:MM)"),
        Rule::Bool => format!("{label} must be yes or no"),
        Rule::OneOf(options) => format!("{label} must be one of: {}", options.join(", ")),
    })
}

/// Validate a single field value. Optional fields left empty pass.
pub fn validate_field(spec: &FieldSpec, value: &str) -> Option<String> {
    let value = value.trim();
    if value.is_empty() && !spec.is_required() {
        return None;
    }
    spec.rules
        .iter()
        .find_map(|rule| check_rule(rule, spec.label, value).err())
}

/// Validate every declared field of a draft. Missing keys count as empty.
pub fn validate(specs: &[FieldSpec], draft: &Draft) -> Result<(), FieldErrors> {
    let mut errors = FieldErrors::new();
    for spec in specs {
        let value = draft.get(spec.name).map(String::as_str).unwrap_or("");
        if let Some(msg) = validate_field(spec, value) {
            errors.insert(spec.name, msg);
        }
    }
    errors.into_result()
}

pub fn trim_draft(draft: &Draft) -> Draft {
    draft
        .iter()
        .map(|(k, v)| (k.clone(), v.trim().to_string()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const NAME: FieldSpec = FieldSpec::new(
        "name",
        "Name",
        &[
            Rule::Required,
            Rule::MinLen(3),
            Rule::MaxLen(10),
            Rule::Pattern {
                regex: r"^[A-Za-z ]+$",
                message: "may contain only letters and spaces",
            },
        ],
    );

    const PRICE: FieldSpec = FieldSpec::new("price", "Price", &[Rule::Numeric]);

    fn draft(pairs: &[(&str, &str)]) -> Draft {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn required_field_reports_missing_value() {
        let errs = validate(&[NAME], &draft(&[("name", "   ")])).unwrap_err();
        assert_eq!(errs.get("name"), Some("Name is required"));
    }

    #[test]
    fn first_failing_rule_wins() {
        let errs = validate(&[NAME], &draft(&[("name", "a1")])).unwrap_err();
        assert_eq!(errs.get("name"), Some("Name must be at least 3 characters"));
    }

    #[test]
    fn pattern_rule_uses_custom_message() {
        let errs = validate(&[NAME], &draft(&[("name", "abc1")])).unwrap_err();
        assert_eq!(
            errs.get("name"),
            Some("Name may contain only letters and spaces")
        );
    }

    #[test]
    fn length_counts_characters_not_bytes() {
        assert!(validate_field(&FieldSpec::new("x", "X", &[Rule::MinLen(3)]), "èè").is_some());
        assert!(validate_field(&FieldSpec::new("x", "X", &[Rule::MaxLen(3)]), "èèè").is_none());
    }

    #[test]
    fn optional_empty_field_skips_other_rules() {
        assert!(validate(&[PRICE], &draft(&[])).is_ok());
        let errs = validate(&[PRICE], &draft(&[("price", "abc")])).unwrap_err();
        assert_eq!(errs.get("price"), Some("Price must be a number"));
    }

    #[test]
    fn one_of_is_case_insensitive() {
        let spec = FieldSpec::new("unit", "Unit", &[Rule::OneOf(&["hour", "day"])]);
        assert!(validate_field(&spec, "Hour").is_none());
        assert_eq!(
            validate_field(&spec, "week").as_deref(),
            Some("Unit must be one of: hour, day")
        );
    }

    #[test]
    fn unsigned_rejects_signs_that_integer_accepts() {
        let count = FieldSpec::new("n", "Count", &[Rule::Unsigned]);
        let whole = FieldSpec::new("n", "Count", &[Rule::Integer]);
        assert!(validate_field(&whole, "-0").is_none());
        assert_eq!(
            validate_field(&count, "-0").as_deref(),
            Some("Count must be a whole number without sign")
        );
        assert!(validate_field(&count, "+3").is_some());
        assert!(validate_field(&count, "42").is_none());
    }

    #[test]
    fn invalid_pattern_is_reported_not_treated_as_mismatch() {
        let broken = FieldSpec::new(
            "code",
            "Code",
            &[Rule::Pattern {
                regex: "([",
                message: "is malformed",
            }],
        );
        let msg = validate_field(&broken, "abc").unwrap();
        assert!(msg.starts_with("Code cannot be checked: invalid pattern"));
    }

    #[test]
    fn compiled_patterns_are_reused() {
        let first = pattern(r"^[0-9]{4,8}$").unwrap();
        let second = pattern(r"^[0-9]{4,8}$").unwrap();
        assert_eq!(first.as_str(), second.as_str());
        assert!(second.is_match("8471"));
    }

    #[test]
    fn every_declared_pattern_compiles() {
        use crate::models::record::Editable;
        use crate::models::{BudgetType, Course, Facility, Material, MaterialType};

        let screens = [
            BudgetType::form_fields(),
            MaterialType::form_fields(),
            Material::form_fields(),
            Facility::form_fields(),
            Course::form_fields(),
        ];
        let mut checked = 0;
        for spec in screens.iter().flat_map(|fields| fields.iter()) {
            for rule in spec.rules {
                if let Rule::Pattern { regex, .. } = rule {
                    assert!(pattern(*regex).is_ok(), "{}: {regex}", spec.name);
                    checked += 1;
                }
            }
        }
        assert_eq!(checked, 4);
    }

    #[test]
    fn field_errors_keep_first_message() {
        let mut errs = FieldErrors::new();
        errs.insert("a", "first");
        errs.insert("a", "second");
        assert_eq!(errs.get("a"), Some("first"));
        assert_eq!(errs.len(), 1);
    }
}

// formspec-core/src/runtime/validator.rs
// ============================================================================
// Module: FormSpec Validation Compiler
// Description: Per-field compilation of declared rules into checked validators.
// Purpose: Turn declarative validation rules into total check functions.
// Dependencies: crate::core, regex
// ============================================================================

//! ## Overview
//! The compiler turns one field definition into a precompiled validator for
//! that field's value domain: resolved limits, resolved messages, and
//! compiled patterns. Checks run in a fixed order: presence first, then base
//! type coercion, then shape rules in declaration order; the first failure
//! reports. Compilation never fails for a structurally valid field; rule
//! kinds illegal for the field's domain and rules with mistyped values are
//! skipped, and a malformed pattern surfaces at check time as an ordinary
//! failure rather than a panic.

// ============================================================================
// SECTION: Imports
// ============================================================================

use regex::Regex;
use serde_json::Value;

use crate::core::Field;
use crate::core::FieldKind;
use crate::core::RuleKind;
use crate::core::ValidationRule;
use crate::core::coerce_number;
use crate::core::is_empty_value;

// ============================================================================
// SECTION: Validation Result
// ============================================================================

/// Fallback message for pattern rules without a declared message, and the
/// only message a malformed pattern ever produces.
const INVALID_FORMAT_MESSAGE: &str = "Invalid format";

/// Validation outcome for one checked value.
///
/// Failures are data, not errors: one failing field never aborts checks on
/// its siblings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationResult {
    /// Value passed every applicable check.
    Valid,
    /// Value failed; carries the first failing check's message.
    Invalid(String),
}

impl ValidationResult {
    /// Returns true for [`ValidationResult::Valid`].
    #[must_use]
    pub const fn is_valid(&self) -> bool {
        matches!(self, Self::Valid)
    }

    /// Returns the failure message, if any.
    #[must_use]
    pub fn message(&self) -> Option<&str> {
        match self {
            Self::Valid => None,
            Self::Invalid(message) => Some(message),
        }
    }
}

// ============================================================================
// SECTION: Compiled Validator
// ============================================================================

/// Base value domain selected by the field kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum BaseCheck {
    /// Raw input must coerce to a finite number.
    Number,
    /// Value must be a JSON boolean.
    Boolean,
    /// Value must be a string shaped `YYYY-MM-DD`.
    Date,
    /// Value must be a string.
    Text,
}

/// One precompiled shape check.
#[derive(Debug, Clone)]
enum ShapeCheck {
    /// Numeric lower bound.
    MinNumber {
        /// Inclusive lower limit.
        limit: f64,
        /// Resolved failure message.
        message: String,
    },
    /// Numeric upper bound.
    MaxNumber {
        /// Inclusive upper limit.
        limit: f64,
        /// Resolved failure message.
        message: String,
    },
    /// Character-count lower bound.
    MinLength {
        /// Inclusive lower limit.
        limit: f64,
        /// Resolved failure message.
        message: String,
    },
    /// Character-count upper bound.
    MaxLength {
        /// Inclusive upper limit.
        limit: f64,
        /// Resolved failure message.
        message: String,
    },
    /// Compiled pattern match.
    Pattern {
        /// Compiled pattern; anchoring is the pattern's own.
        regex: Regex,
        /// Resolved failure message.
        message: String,
    },
    /// Declared pattern failed to compile; rejects every non-empty value.
    BrokenPattern,
}

impl ShapeCheck {
    /// Applies a numeric-domain check; returns the message when it rejects.
    fn apply_number(&self, number: f64) -> Option<String> {
        match self {
            Self::MinNumber { limit, message } if number < *limit => Some(message.clone()),
            Self::MaxNumber { limit, message } if number > *limit => Some(message.clone()),
            _ => None,
        }
    }

    /// Applies a string-domain check; returns the message when it rejects.
    fn apply_text(&self, text: &str) -> Option<String> {
        match self {
            Self::MinLength { limit, message } if text_length(text) < *limit => {
                Some(message.clone())
            }
            Self::MaxLength { limit, message } if text_length(text) > *limit => {
                Some(message.clone())
            }
            Self::Pattern { regex, message } if !regex.is_match(text) => Some(message.clone()),
            Self::BrokenPattern => Some(INVALID_FORMAT_MESSAGE.to_string()),
            _ => None,
        }
    }
}

/// Precompiled validator for one field.
///
/// # Invariants
/// - `checks` holds only checks legal for `base`, in rule declaration order.
/// - `check` is total: it never panics and never errors.
#[derive(Debug, Clone)]
pub struct CompiledValidator {
    /// Label used in generated messages.
    label: String,
    /// Presence requirement.
    required: bool,
    /// Base value domain.
    base: BaseCheck,
    /// Shape checks in declaration order.
    checks: Vec<ShapeCheck>,
}

impl CompiledValidator {
    /// Checks a current value against the compiled rules.
    ///
    /// Presence runs first: a required empty value reports the required
    /// message and nothing else; an optional empty value is valid without
    /// running any shape rule.
    #[must_use]
    pub fn check(&self, value: Option<&Value>) -> ValidationResult {
        if self.is_empty(value) {
            if self.required {
                return ValidationResult::Invalid(format!("{} is required", self.label));
            }
            return ValidationResult::Valid;
        }
        match self.base {
            BaseCheck::Number => self.check_number(value),
            BaseCheck::Boolean => self.check_boolean(value),
            BaseCheck::Date => self.check_date(value),
            BaseCheck::Text => self.check_text(value),
        }
    }

    /// Returns true when the value counts as not entered for this field.
    fn is_empty(&self, value: Option<&Value>) -> bool {
        if is_empty_value(value) {
            return true;
        }
        matches!(self.base, BaseCheck::Boolean) && matches!(value, Some(Value::Bool(false)))
    }

    /// Checks the numeric domain: finite coercion, then bounds.
    fn check_number(&self, value: Option<&Value>) -> ValidationResult {
        let number = coerce_number(value);
        if !number.is_finite() {
            return ValidationResult::Invalid(format!("{} must be a number", self.label));
        }
        for check in &self.checks {
            if let Some(message) = check.apply_number(number) {
                return ValidationResult::Invalid(message);
            }
        }
        ValidationResult::Valid
    }

    /// Checks the boolean domain.
    fn check_boolean(&self, value: Option<&Value>) -> ValidationResult {
        if matches!(value, Some(Value::Bool(_))) {
            ValidationResult::Valid
        } else {
            ValidationResult::Invalid(format!("{} must be a boolean", self.label))
        }
    }

    /// Checks the date domain: shape first, then string rules.
    fn check_date(&self, value: Option<&Value>) -> ValidationResult {
        let Some(Value::String(text)) = value else {
            return ValidationResult::Invalid(format!("{} must be a valid date", self.label));
        };
        if !is_date_shaped(text) {
            return ValidationResult::Invalid(format!("{} must be a valid date", self.label));
        }
        self.run_text_checks(text)
    }

    /// Checks the string domain.
    fn check_text(&self, value: Option<&Value>) -> ValidationResult {
        let Some(Value::String(text)) = value else {
            return ValidationResult::Invalid(format!("{} must be a string", self.label));
        };
        self.run_text_checks(text)
    }

    /// Folds string-domain checks in declaration order.
    fn run_text_checks(&self, text: &str) -> ValidationResult {
        for check in &self.checks {
            if let Some(message) = check.apply_text(text) {
                return ValidationResult::Invalid(message);
            }
        }
        ValidationResult::Valid
    }
}

// ============================================================================
// SECTION: Compilation
// ============================================================================

/// Compiles a field definition into a precompiled validator.
///
/// Compilation is total for structurally valid fields. Inert rule kinds,
/// kinds illegal for the field's domain, and rules with missing or mistyped
/// values compile to nothing.
#[must_use]
pub fn compile(field: &Field) -> CompiledValidator {
    let checks = field
        .validation
        .iter()
        .filter_map(|rule| compile_rule(field.kind, rule))
        .collect::<Vec<_>>();
    CompiledValidator {
        label: field.display_label().to_string(),
        required: field.required,
        base: base_check(field.kind),
        checks,
    }
}

/// Selects the base value domain for a field kind.
const fn base_check(kind: FieldKind) -> BaseCheck {
    match kind {
        FieldKind::Number => BaseCheck::Number,
        FieldKind::Checkbox => BaseCheck::Boolean,
        FieldKind::Date => BaseCheck::Date,
        FieldKind::Text | FieldKind::Textarea | FieldKind::Select | FieldKind::Radio => {
            BaseCheck::Text
        }
    }
}

/// Compiles one declared rule; `None` when it contributes no check.
fn compile_rule(kind: FieldKind, rule: &ValidationRule) -> Option<ShapeCheck> {
    if rule.kind.is_inert() {
        return None;
    }
    match kind {
        FieldKind::Number => compile_number_rule(rule),
        FieldKind::Text | FieldKind::Textarea | FieldKind::Date => compile_text_rule(rule),
        FieldKind::Select | FieldKind::Radio | FieldKind::Checkbox => None,
    }
}

/// Compiles a rule against the numeric domain.
fn compile_number_rule(rule: &ValidationRule) -> Option<ShapeCheck> {
    match rule.kind {
        RuleKind::Min => {
            let limit = rule_limit(rule)?;
            Some(ShapeCheck::MinNumber {
                limit,
                message: rule_message(rule, format!("Minimum value is {limit}")),
            })
        }
        RuleKind::Max => {
            let limit = rule_limit(rule)?;
            Some(ShapeCheck::MaxNumber {
                limit,
                message: rule_message(rule, format!("Maximum value is {limit}")),
            })
        }
        RuleKind::Regex | RuleKind::Required | RuleKind::Custom => None,
    }
}

/// Compiles a rule against the string domain.
fn compile_text_rule(rule: &ValidationRule) -> Option<ShapeCheck> {
    match rule.kind {
        RuleKind::Min => {
            let limit = rule_limit(rule)?;
            Some(ShapeCheck::MinLength {
                limit,
                message: rule_message(rule, format!("Minimum length is {limit}")),
            })
        }
        RuleKind::Max => {
            let limit = rule_limit(rule)?;
            Some(ShapeCheck::MaxLength {
                limit,
                message: rule_message(rule, format!("Maximum length is {limit}")),
            })
        }
        RuleKind::Regex => compile_pattern_rule(rule),
        RuleKind::Required | RuleKind::Custom => None,
    }
}

/// Compiles a pattern rule; a malformed pattern becomes a broken check that
/// reports at check time instead of failing compilation.
fn compile_pattern_rule(rule: &ValidationRule) -> Option<ShapeCheck> {
    let Some(Value::String(pattern)) = &rule.value else {
        return None;
    };
    match Regex::new(pattern) {
        Ok(regex) => Some(ShapeCheck::Pattern {
            regex,
            message: rule_message(rule, INVALID_FORMAT_MESSAGE.to_string()),
        }),
        Err(_) => Some(ShapeCheck::BrokenPattern),
    }
}

/// Extracts a numeric rule limit; `None` skips the rule.
fn rule_limit(rule: &ValidationRule) -> Option<f64> {
    rule.value.as_ref().and_then(Value::as_f64)
}

/// Resolves the failure message: declared message, else the fallback.
fn rule_message(rule: &ValidationRule, fallback: String) -> String {
    rule.message.clone().unwrap_or(fallback)
}

/// Character count as an f64 for limit comparison; saturates to infinity.
fn text_length(text: &str) -> f64 {
    u32::try_from(text.chars().count()).map_or(f64::INFINITY, f64::from)
}

/// Returns true when text is exactly `YYYY-MM-DD` shaped.
fn is_date_shaped(text: &str) -> bool {
    let bytes = text.as_bytes();
    if bytes.len() != 10 {
        return false;
    }
    bytes.iter().enumerate().all(|(index, byte)| match index {
        4 | 7 => *byte == b'-',
        _ => byte.is_ascii_digit(),
    })
}

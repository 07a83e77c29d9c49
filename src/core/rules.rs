// formspec-core/src/core/rules.rs
// ============================================================================
// Module: FormSpec Rule Model
// Description: Validation rules and conditional-visibility rules for fields.
// Purpose: Provide the declarative rule language interpreted by the runtime.
// Dependencies: crate::core::identifiers, serde, serde_json
// ============================================================================

//! ## Overview
//! Validation rules declare per-field shape constraints (bounds, lengths,
//! patterns) resolved against the field's base value domain by the validator
//! compiler. Conditional rules declare single-operator visibility predicates
//! evaluated against the live value map. Both rule families are data, not
//! behavior; the runtime interprets them totally and never throws for any
//! structurally valid rule.

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde::Deserialize;
use serde::Serialize;
use serde_json::Value;

use crate::core::identifiers::FieldName;

// ============================================================================
// SECTION: Validation Rules
// ============================================================================

/// Validation rule kinds declared on fields.
///
/// # Invariants
/// - Variants are stable for serialization and contract matching.
/// - `Required` and `Custom` are recognized but inert: `Required` is legacy
///   (presence is tracked on the field itself) and `Custom` has no defined
///   check semantics. Both deserialize, round-trip, and compile to no check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RuleKind {
    /// Legacy presence rule; presence is tracked by `Field::required`.
    Required,
    /// Lower bound: numeric value for number fields, length for string fields.
    Min,
    /// Upper bound: numeric value for number fields, length for string fields.
    Max,
    /// Pattern match for string fields.
    Regex,
    /// Declared in the model without check semantics.
    Custom,
}

impl RuleKind {
    /// Returns true when the rule kind carries no check semantics.
    #[must_use]
    pub const fn is_inert(self) -> bool {
        matches!(self, Self::Required | Self::Custom)
    }
}

/// Declarative validation rule attached to a field.
///
/// # Invariants
/// - `value` holds the rule operand (a bound for `min`/`max`, a pattern
///   string for `regex`); rules whose operand is missing or mistyped for
///   their kind are skipped by the compiler rather than rejected.
/// - `message` overrides the built-in failure message when present.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationRule {
    /// Rule kind discriminant.
    #[serde(rename = "type")]
    pub kind: RuleKind,
    /// Rule operand interpreted per kind.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<Value>,
    /// Optional failure message override.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

// ============================================================================
// SECTION: Conditional Rules
// ============================================================================

/// Comparison operator applied by conditional-visibility rules.
///
/// # Invariants
/// - Variants are stable for serialization and contract matching.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ConditionOperator {
    /// Strict equality over JSON type and value.
    Equals,
    /// Negation of strict equality.
    NotEquals,
    /// Substring containment over string-coerced operands.
    Contains,
    /// Numeric greater-than over numeric-coerced operands.
    GreaterThan,
    /// Numeric less-than over numeric-coerced operands.
    LessThan,
}

/// Conditional-visibility rule attached to a field.
///
/// # Invariants
/// - `field` references another field's name within the same schema; a
///   dangling reference evaluates to a defined outcome, never an error.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConditionalRule {
    /// Name of the field whose value drives visibility.
    pub field: FieldName,
    /// Comparison operator.
    pub operator: ConditionOperator,
    /// Comparand evaluated against the target field's value.
    pub value: Value,
}

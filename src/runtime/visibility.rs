// formspec-core/src/runtime/visibility.rs
// ============================================================================
// Module: FormSpec Visibility Evaluator
// Description: Conditional-visibility evaluation over the form value map.
// Purpose: Decide which fields are active for rendering and validation.
// Dependencies: crate::core
// ============================================================================

//! ## Overview
//! Visibility evaluation decides whether a field is active given the current
//! value map. Evaluation is total: dangling field references, absent values,
//! and type-mismatched comparands all produce a defined boolean, never an
//! error. Ordered comparisons coerce both sides to numbers; a side that does
//! not coerce becomes NaN, and every ordered comparison against NaN is false.

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde_json::Value;

use crate::core::ConditionOperator;
use crate::core::ConditionalRule;
use crate::core::Field;
use crate::core::FormSchema;
use crate::core::ValueMap;
use crate::core::coerce_number;
use crate::core::coerce_string;

// ============================================================================
// SECTION: Visibility Evaluation
// ============================================================================

/// Decides whether a field is currently active.
///
/// A field with no conditional rule is always active. Activity gates both
/// rendering and participation in validation and submission.
#[must_use]
pub fn is_active(field: &Field, values: &ValueMap) -> bool {
    field.conditional.as_ref().is_none_or(|rule| evaluate_condition(rule, values))
}

/// Returns the active fields of a schema in declaration order.
#[must_use]
pub fn active_fields<'a>(schema: &'a FormSchema, values: &ValueMap) -> Vec<&'a Field> {
    schema.fields.iter().filter(|field| is_active(field, values)).collect()
}

/// Evaluates one conditional rule against the value map.
///
/// The referenced field's current value is the target; the rule carries the
/// comparand. An unreferenced or unset target stays absent and flows through
/// the operator's coercion rather than erroring.
#[must_use]
pub fn evaluate_condition(rule: &ConditionalRule, values: &ValueMap) -> bool {
    let target = values.get(&rule.field);
    match rule.operator {
        ConditionOperator::Equals => compare_equals(target, &rule.value),
        ConditionOperator::NotEquals => !compare_equals(target, &rule.value),
        ConditionOperator::Contains => compare_contains(target, &rule.value),
        ConditionOperator::GreaterThan => coerce_number(target) > coerce_number(Some(&rule.value)),
        ConditionOperator::LessThan => coerce_number(target) < coerce_number(Some(&rule.value)),
    }
}

// ============================================================================
// SECTION: Comparison Helpers
// ============================================================================

/// Strict JSON equality; an absent target never equals any comparand.
fn compare_equals(target: Option<&Value>, comparand: &Value) -> bool {
    target.is_some_and(|value| value == comparand)
}

/// String containment over the string coercions of both sides.
///
/// Null coerces to the empty string on either side, so a null comparand is
/// an empty needle and the condition holds for every target.
fn compare_contains(target: Option<&Value>, comparand: &Value) -> bool {
    coerce_string(target).contains(&coerce_string(Some(comparand)))
}

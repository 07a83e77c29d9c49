// formspec-core/src/core/value.rs
// ============================================================================
// Module: FormSpec Value Map
// Description: Form value map plus the shared JSON coercion vocabulary.
// Purpose: Define how raw entered values map onto comparison domains.
// Dependencies: crate::core::{identifiers, schema}, serde_json
// ============================================================================

//! ## Overview
//! Entered values live in a map keyed by field name and stay raw JSON until a
//! check needs them. The coercions here are total: every JSON value (or its
//! absence) maps to a defined string or numeric outcome, so the validator and
//! the visibility evaluator never error on user input.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeMap;

use serde_json::Value;

use crate::core::identifiers::FieldName;
use crate::core::schema::FormSchema;

// ============================================================================
// SECTION: Value Map
// ============================================================================

/// Current form values keyed by field name.
pub type ValueMap = BTreeMap<FieldName, Value>;

/// Builds the initial value map for a schema.
///
/// Every field gets a live entry: its declared default when present,
/// otherwise the kind's empty value.
#[must_use]
pub fn seed_values(schema: &FormSchema) -> ValueMap {
    schema.fields.iter().map(|field| (field.name.clone(), field.seed_value())).collect()
}

// ============================================================================
// SECTION: Coercions
// ============================================================================

/// Returns true when a value counts as not entered.
///
/// Absent entries, JSON null, and blank strings are all "no value". Strings
/// are trimmed first, so whitespace-only input counts as not entered rather
/// than as content for shape rules. Kind specific emptiness (an unchecked
/// checkbox) is layered on by the caller.
#[must_use]
pub fn is_empty_value(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) => true,
        Some(Value::String(text)) => text.trim().is_empty(),
        Some(_) => false,
    }
}

/// Coerces a value into the numeric comparison domain.
///
/// Numbers pass through; numeric strings parse after trimming. Everything
/// else, including blank strings, booleans, arrays, and absent entries, maps
/// to NaN so that ordered comparisons against it are false rather than wrong.
#[must_use]
pub fn coerce_number(value: Option<&Value>) -> f64 {
    match value {
        Some(Value::Number(number)) => number.as_f64().unwrap_or(f64::NAN),
        Some(Value::String(text)) => {
            let trimmed = text.trim();
            if trimmed.is_empty() {
                f64::NAN
            } else {
                trimmed.parse::<f64>().unwrap_or(f64::NAN)
            }
        }
        _ => f64::NAN,
    }
}

/// Coerces a value into the string comparison domain.
///
/// Absent entries and JSON null map to the empty string; strings pass
/// through; other JSON values render as their compact JSON text.
#[must_use]
pub fn coerce_string(value: Option<&Value>) -> String {
    match value {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(text)) => text.clone(),
        Some(other) => other.to_string(),
    }
}

// formspec-core/src/core/field.rs
// ============================================================================
// Module: FormSpec Field Model
// Description: Field definitions, the closed kind set, and choice options.
// Purpose: Define the canonical per-input schema unit interpreted by the runtime.
// Dependencies: crate::core::{identifiers, rules}, serde, serde_json
// ============================================================================

//! ## Overview
//! A field is one form input definition: a kind drawn from a closed set, a
//! presence flag, display strings, declared validation rules, and an optional
//! visibility condition. The kind determines the base value domain, which
//! rule kinds are legal, and whether choice options are required. Fields are
//! pure data; the validator compiler and visibility evaluator interpret them.

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde::Deserialize;
use serde::Serialize;
use serde_json::Value;

use crate::core::identifiers::FieldId;
use crate::core::identifiers::FieldName;
use crate::core::rules::ConditionalRule;
use crate::core::rules::ValidationRule;

// ============================================================================
// SECTION: Field Kinds
// ============================================================================

/// Closed set of field kinds.
///
/// # Invariants
/// - Variants are stable for serialization and contract matching; unknown
///   wire tokens fail decoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldKind {
    /// Single-line text input; string base domain.
    Text,
    /// Multi-line text input; string base domain.
    Textarea,
    /// Numeric input; raw input coerces to a finite number.
    Number,
    /// Drop-down choice; string base domain, requires options.
    Select,
    /// Radio-button choice; string base domain, requires options.
    Radio,
    /// Boolean toggle; boolean base domain.
    Checkbox,
    /// Date input; string base domain shaped `YYYY-MM-DD`.
    Date,
}

impl FieldKind {
    /// Returns true when the kind selects among declared options.
    #[must_use]
    pub const fn is_choice(self) -> bool {
        matches!(self, Self::Select | Self::Radio)
    }

    /// Returns the value seeded into the value map when no default is declared.
    #[must_use]
    pub fn empty_value(self) -> Value {
        match self {
            Self::Checkbox => Value::Bool(false),
            Self::Text | Self::Textarea | Self::Number | Self::Select | Self::Radio | Self::Date => {
                Value::String(String::new())
            }
        }
    }

    /// Returns the JSON type name a declared default value must carry.
    #[must_use]
    pub const fn default_value_type(self) -> &'static str {
        match self {
            Self::Number => "number",
            Self::Checkbox => "boolean",
            Self::Text | Self::Textarea | Self::Select | Self::Radio | Self::Date => "string",
        }
    }

    /// Returns true when the JSON value matches the kind's default-value type.
    #[must_use]
    pub fn accepts_default(self, value: &Value) -> bool {
        match self {
            Self::Number => value.is_number(),
            Self::Checkbox => value.is_boolean(),
            Self::Text | Self::Textarea | Self::Select | Self::Radio | Self::Date => {
                value.is_string()
            }
        }
    }
}

// ============================================================================
// SECTION: Choice Options
// ============================================================================

/// One selectable option of a choice field.
///
/// # Invariants
/// - `value` must be unique within the owning field (enforced by schema
///   validation); option order is preserved on the wire.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldOption {
    /// Display label for the option.
    pub label: String,
    /// Stored value when the option is selected.
    pub value: String,
}

// ============================================================================
// SECTION: Field Definition
// ============================================================================

/// One form input definition.
///
/// # Invariants
/// - `kind` and the kind-specific members must stay consistent: `options` is
///   present exactly for choice kinds and `default_value` carries the kind's
///   JSON type (enforced by schema validation).
/// - `validation` order is declaration order; the compiler folds rules in
///   that order and the first failing rule reports.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Field {
    /// Opaque identifier, stable for the field's lifetime.
    pub id: FieldId,
    /// Value-map key; unique within the schema.
    pub name: FieldName,
    /// Display label; validation messages fall back to `name` when empty.
    #[serde(default)]
    pub label: String,
    /// Field kind discriminant.
    #[serde(rename = "type")]
    pub kind: FieldKind,
    /// Presence requirement, independent of declared shape rules.
    #[serde(default)]
    pub required: bool,
    /// Display-only helper text.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub help_text: Option<String>,
    /// Display-only input placeholder.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub placeholder: Option<String>,
    /// Declared default value, typed per `kind`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_value: Option<Value>,
    /// Declared validation rules in declaration order.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub validation: Vec<ValidationRule>,
    /// Optional visibility condition; absence means always active.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub conditional: Option<ConditionalRule>,
    /// Choice options; present exactly for choice kinds.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub options: Option<Vec<FieldOption>>,
}

impl Field {
    /// Returns the label used in validation messages.
    ///
    /// Falls back to the field name when no display label is set.
    #[must_use]
    pub fn display_label(&self) -> &str {
        if self.label.trim().is_empty() { self.name.as_str() } else { &self.label }
    }

    /// Returns the initial value-map entry for this field.
    ///
    /// The declared default wins; otherwise the kind's empty value seeds the
    /// map so every schema field always has a live entry.
    #[must_use]
    pub fn seed_value(&self) -> Value {
        self.default_value.clone().unwrap_or_else(|| self.kind.empty_value())
    }
}

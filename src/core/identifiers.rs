// formspec-core/src/core/identifiers.rs
// ============================================================================
// Module: FormSpec Identifiers
// Description: Canonical opaque identifiers for form fields.
// Purpose: Provide strongly typed, serializable IDs with stable string forms.
// Dependencies: crate::core::time, serde
// ============================================================================

//! ## Overview
//! This module defines the canonical string-based identifiers used throughout
//! FormSpec. Identifiers are opaque and serialize as strings. Validation is
//! handled at schema boundaries rather than within these simple wrappers.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fmt;

use serde::Deserialize;
use serde::Serialize;

use crate::core::time::Timestamp;

// ============================================================================
// SECTION: Identifier Types
// ============================================================================

/// Field identifier, stable for the field's lifetime.
///
/// # Invariants
/// - Assigned once at field creation and never reassigned.
/// - Carries no validation or visibility semantics; it is the join key used
///   by editors for reorder operations.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FieldId(String);

impl FieldId {
    /// Creates a new field identifier.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Mints a field identifier from a host-supplied timestamp token.
    ///
    /// Monotonicity of the resulting identifiers is a caller responsibility,
    /// matching the monotonicity contract of the supplied timestamps.
    #[must_use]
    pub fn mint(token: Timestamp) -> Self {
        match token {
            Timestamp::UnixMillis(value) => Self(format!("field-{value}")),
            Timestamp::Logical(value) => Self(format!("field-{value}")),
        }
    }

    /// Returns the identifier as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for FieldId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl From<&str> for FieldId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for FieldId {
    fn from(value: String) -> Self {
        Self::new(value)
    }
}

/// Field name used as the key into the form value map.
///
/// # Invariants
/// - Must be unique within a schema (enforced by schema validation).
/// - Conditional rules reference other fields by name, never by id.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FieldName(String);

impl FieldName {
    /// Creates a new field name.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// Returns the name as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for FieldName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl From<&str> for FieldName {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for FieldName {
    fn from(value: String) -> Self {
        Self::new(value)
    }
}

// formspec-core/src/core/schema.rs
// ============================================================================
// Module: FormSpec Schema
// Description: Form schema aggregate with structural validation and hashing.
// Purpose: Define the canonical form schema handed immutably to the runtime.
// Dependencies: crate::core::{field, hashing, identifiers}, serde, thiserror
// ============================================================================

//! ## Overview
//! A form schema is an ordered sequence of field definitions plus display
//! metadata. Ordering is semantically meaningful: render order, validation
//! report order, and default seeding order all follow it. Schemas are
//! validated at every ingestion boundary (import, load, session construction,
//! schema replacement) so the runtime never interprets malformed fields.

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde::Deserialize;
use serde::Serialize;
use thiserror::Error;

use crate::core::field::Field;
use crate::core::hashing::DEFAULT_HASH_ALGORITHM;
use crate::core::hashing::HashAlgorithm;
use crate::core::hashing::HashDigest;
use crate::core::hashing::HashError;
use crate::core::identifiers::FieldName;

// ============================================================================
// SECTION: Form Schema
// ============================================================================

/// Title used when no persisted schema is available.
pub const DEFAULT_SCHEMA_TITLE: &str = "Untitled Form";

/// Canonical form schema.
///
/// # Invariants
/// - Field `id` and `name` values are unique and non-empty.
/// - Choice fields carry at least one option; non-choice fields carry none.
/// - Declared default values match their field kind's JSON type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FormSchema {
    /// Display title.
    pub title: String,
    /// Optional display description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Field definitions in render order.
    #[serde(default)]
    pub fields: Vec<Field>,
}

impl FormSchema {
    /// Returns the designated empty default schema.
    #[must_use]
    pub fn empty_default() -> Self {
        Self { title: DEFAULT_SCHEMA_TITLE.to_string(), description: None, fields: Vec::new() }
    }

    /// Looks up a field definition by name.
    #[must_use]
    pub fn field(&self, name: &FieldName) -> Option<&Field> {
        self.fields.iter().find(|field| &field.name == name)
    }

    /// Computes the canonical hash of the schema.
    ///
    /// # Errors
    ///
    /// Returns [`HashError::Canonicalization`] when serialization fails.
    pub fn canonical_hash(&self) -> Result<HashDigest, HashError> {
        crate::core::hashing::hash_canonical_json(DEFAULT_HASH_ALGORITHM, self)
    }

    /// Computes the canonical hash using a specific algorithm.
    ///
    /// # Errors
    ///
    /// Returns [`HashError::Canonicalization`] when serialization fails.
    pub fn canonical_hash_with(&self, algorithm: HashAlgorithm) -> Result<HashDigest, HashError> {
        crate::core::hashing::hash_canonical_json(algorithm, self)
    }

    /// Validates the schema invariants.
    ///
    /// # Errors
    ///
    /// Returns [`SchemaError`] when validation fails.
    pub fn validate(&self) -> Result<(), SchemaError> {
        ensure_field_ids(&self.fields)?;
        ensure_field_names(&self.fields)?;
        ensure_options(&self.fields)?;
        ensure_default_values(&self.fields)?;

        Ok(())
    }
}

// ============================================================================
// SECTION: Schema Errors
// ============================================================================

/// Errors raised during schema validation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SchemaError {
    /// Field identifier is empty.
    #[error("field {0} has an empty identifier")]
    EmptyFieldId(String),
    /// Duplicate field identifiers detected.
    #[error("duplicate field identifier: {0}")]
    DuplicateFieldId(String),
    /// Field name is empty.
    #[error("field {0} has an empty name")]
    EmptyFieldName(String),
    /// Duplicate field names detected.
    #[error("duplicate field name: {0}")]
    DuplicateFieldName(String),
    /// Choice field declares no options.
    #[error("choice field {0} must declare options")]
    MissingOptions(String),
    /// Non-choice field declares options.
    #[error("field {0} does not accept options")]
    UnexpectedOptions(String),
    /// Option values collide within one field.
    #[error("field {0} declares duplicate option value: {1}")]
    DuplicateOptionValue(String, String),
    /// Default value type contradicts the field kind.
    #[error("field {0} default value must be a {1}")]
    InvalidDefaultValue(String, &'static str),
}

// ============================================================================
// SECTION: Validation Helpers
// ============================================================================

/// Ensures field identifiers are non-empty and unique.
fn ensure_field_ids(fields: &[Field]) -> Result<(), SchemaError> {
    for (index, field) in fields.iter().enumerate() {
        if field.id.as_str().trim().is_empty() {
            return Err(SchemaError::EmptyFieldId(field.name.to_string()));
        }
        if fields.iter().skip(index + 1).any(|other| other.id == field.id) {
            return Err(SchemaError::DuplicateFieldId(field.id.to_string()));
        }
    }
    Ok(())
}

/// Ensures field names are non-empty and unique.
fn ensure_field_names(fields: &[Field]) -> Result<(), SchemaError> {
    for (index, field) in fields.iter().enumerate() {
        if field.name.as_str().trim().is_empty() {
            return Err(SchemaError::EmptyFieldName(field.id.to_string()));
        }
        if fields.iter().skip(index + 1).any(|other| other.name == field.name) {
            return Err(SchemaError::DuplicateFieldName(field.name.to_string()));
        }
    }
    Ok(())
}

/// Ensures options are present exactly on choice fields, with unique values.
fn ensure_options(fields: &[Field]) -> Result<(), SchemaError> {
    for field in fields {
        let Some(options) = &field.options else {
            if field.kind.is_choice() {
                return Err(SchemaError::MissingOptions(field.name.to_string()));
            }
            continue;
        };
        if !field.kind.is_choice() {
            return Err(SchemaError::UnexpectedOptions(field.name.to_string()));
        }
        if options.is_empty() {
            return Err(SchemaError::MissingOptions(field.name.to_string()));
        }
        for (index, option) in options.iter().enumerate() {
            if options.iter().skip(index + 1).any(|other| other.value == option.value) {
                return Err(SchemaError::DuplicateOptionValue(
                    field.name.to_string(),
                    option.value.clone(),
                ));
            }
        }
    }
    Ok(())
}

/// Ensures declared default values carry the field kind's JSON type.
fn ensure_default_values(fields: &[Field]) -> Result<(), SchemaError> {
    for field in fields {
        if let Some(default) = &field.default_value
            && !field.kind.accepts_default(default)
        {
            return Err(SchemaError::InvalidDefaultValue(
                field.name.to_string(),
                field.kind.default_value_type(),
            ));
        }
    }
    Ok(())
}

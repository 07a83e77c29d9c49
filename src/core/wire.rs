// formspec-core/src/core/wire.rs
// ============================================================================
// Module: FormSpec Wire Format
// Description: Schema import and export over canonical JSON text.
// Purpose: Gate externally supplied schemas at the serialization boundary.
// Dependencies: crate::core::{hashing, schema}, serde_json, thiserror
// ============================================================================

//! ## Overview
//! Import parses externally supplied JSON text, accepts it only when the
//! schema validity check passes (a malformed payload never partially
//! applies), and rewrites JSON numbers into the representation canonical
//! text reparses to. Export emits RFC 8785 canonical text. Canonical text
//! renders a float `1.0` as `1`, so without the rewrite an imported copy of
//! an export could disagree with its source on number representation; with
//! it, export followed by import is the identity on imported schemas and
//! byte-equal for structurally equal ones.

// ============================================================================
// SECTION: Imports
// ============================================================================

use thiserror::Error;

use crate::core::hashing::HashError;
use crate::core::hashing::canonical_json_string;
use crate::core::hashing::canonical_json_value;
use crate::core::schema::FormSchema;
use crate::core::schema::SchemaError;

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Errors raised at the schema wire boundary.
#[derive(Debug, Error)]
pub enum WireError {
    /// Payload is not valid JSON for the schema shape.
    #[error("failed to parse schema json: {0}")]
    Parse(String),
    /// Payload decoded but violates schema invariants.
    #[error("invalid schema: {0}")]
    Schema(#[from] SchemaError),
    /// Canonical serialization failed.
    #[error(transparent)]
    Canonicalization(#[from] HashError),
}

// ============================================================================
// SECTION: Import and Export
// ============================================================================

/// Parses and validates externally supplied schema JSON.
///
/// Accepted schemas come back in wire normal form: every default value, rule
/// operand, and conditional comparand holds the value its canonical text
/// reparses to (`1.0` imports as `1`), so exporting and re-importing the
/// result reproduces it exactly.
///
/// # Errors
///
/// Returns [`WireError::Parse`] when the payload is not decodable,
/// [`WireError::Schema`] when the decoded schema violates invariants, and
/// [`WireError::Canonicalization`] when a value cannot be re-serialized into
/// normal form.
pub fn import_schema(raw: &str) -> Result<FormSchema, WireError> {
    let mut schema: FormSchema =
        serde_json::from_str(raw).map_err(|err| WireError::Parse(err.to_string()))?;
    schema.validate()?;
    canonicalize_values(&mut schema)?;
    Ok(schema)
}

/// Serializes a schema to canonical JSON text.
///
/// # Errors
///
/// Returns [`WireError::Canonicalization`] when serialization fails.
pub fn export_schema(schema: &FormSchema) -> Result<String, WireError> {
    Ok(canonical_json_string(schema)?)
}

// ============================================================================
// SECTION: Wire Normal Form
// ============================================================================

/// Rewrites every schema value position into the wire normal form.
///
/// The open-valued positions are field defaults, rule operands, and
/// conditional comparands; everything else in a schema is typed text or
/// booleans that canonical text preserves verbatim.
fn canonicalize_values(schema: &mut FormSchema) -> Result<(), WireError> {
    for field in &mut schema.fields {
        if let Some(default) = &mut field.default_value {
            *default = canonical_json_value(default)?;
        }
        for rule in &mut field.validation {
            if let Some(operand) = &mut rule.value {
                *operand = canonical_json_value(operand)?;
            }
        }
        if let Some(conditional) = &mut field.conditional {
            conditional.value = canonical_json_value(&conditional.value)?;
        }
    }
    Ok(())
}

// formspec-core/tests/store.rs
// ============================================================================
// Module: Schema Store Tests
// Description: Tests for schema persistence and the safe-load fallback.
// ============================================================================
//! ## Overview
//! Validates the in-memory schema store and that loading always yields a
//! schema passing the validity check, whatever the store returns.

#![allow(
    clippy::panic,
    clippy::print_stdout,
    clippy::print_stderr,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::use_debug,
    clippy::dbg_macro,
    clippy::panic_in_result_fn,
    clippy::unwrap_in_result,
    reason = "Test-only output and panic-based assertions are permitted."
)]

use formspec_core::Field;
use formspec_core::FieldId;
use formspec_core::FieldKind;
use formspec_core::FieldName;
use formspec_core::FormSchema;
use formspec_core::InMemorySchemaStore;
use formspec_core::SchemaStore;
use formspec_core::StoreError;
use formspec_core::load_schema_or_default;

// ============================================================================
// SECTION: Test Helpers
// ============================================================================

/// Store whose load always fails.
#[derive(Debug, Clone, Copy)]
struct BrokenStore;

impl SchemaStore for BrokenStore {
    fn load(&self) -> Result<Option<FormSchema>, StoreError> {
        Err(StoreError::Io("disk unavailable".to_string()))
    }

    fn save(&self, _schema: &FormSchema) -> Result<(), StoreError> {
        Err(StoreError::Io("disk unavailable".to_string()))
    }
}

fn sample_schema() -> FormSchema {
    let field = Field {
        id: FieldId::new("id-name"),
        name: FieldName::new("name"),
        label: "Full Name".to_string(),
        kind: FieldKind::Text,
        required: true,
        help_text: None,
        placeholder: None,
        default_value: None,
        validation: Vec::new(),
        conditional: None,
        options: None,
    };
    FormSchema { title: "Contact".to_string(), description: None, fields: vec![field] }
}

/// Sample schema corrupted with a duplicate field name.
fn invalid_schema() -> FormSchema {
    let mut schema = sample_schema();
    let mut duplicate = schema.fields[0].clone();
    duplicate.id = FieldId::new("id-other");
    schema.fields.push(duplicate);
    schema
}

// ============================================================================
// SECTION: In-Memory Store
// ============================================================================

/// Verifies an empty store loads nothing and a saved schema loads back.
#[test]
fn save_then_load_round_trips() {
    let store = InMemorySchemaStore::new();
    assert!(store.load().expect("load succeeds").is_none());

    let schema = sample_schema();
    store.save(&schema).expect("save succeeds");
    assert_eq!(store.load().expect("load succeeds"), Some(schema));
}

/// Verifies a pre-seeded store serves its schema.
#[test]
fn with_schema_seeds_the_store() {
    let store = InMemorySchemaStore::with_schema(sample_schema());
    assert_eq!(store.load().expect("load succeeds"), Some(sample_schema()));
}

/// Verifies cloned handles share the underlying schema slot.
#[test]
fn cloned_handles_share_state() {
    let store = InMemorySchemaStore::new();
    let handle = store.clone();

    handle.save(&sample_schema()).expect("save succeeds");
    assert_eq!(store.load().expect("load succeeds"), Some(sample_schema()));
}

// ============================================================================
// SECTION: Safe Load
// ============================================================================

/// Verifies the safe load falls back to the empty default for missing,
/// failing, and invalid persisted schemas.
#[test]
fn load_or_default_falls_back_to_empty_default() {
    let empty = InMemorySchemaStore::new();
    assert_eq!(load_schema_or_default(&empty), FormSchema::empty_default());

    assert_eq!(load_schema_or_default(&BrokenStore), FormSchema::empty_default());

    // A store can hand back a decodable schema that still fails the validity
    // check; the fallback covers that too.
    let corrupt = InMemorySchemaStore::with_schema(invalid_schema());
    assert_eq!(load_schema_or_default(&corrupt), FormSchema::empty_default());
}

/// Verifies the safe load returns a valid persisted schema unchanged.
#[test]
fn load_or_default_returns_valid_schema() {
    let store = InMemorySchemaStore::with_schema(sample_schema());
    assert_eq!(load_schema_or_default(&store), sample_schema());
}

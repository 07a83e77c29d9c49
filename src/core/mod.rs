// formspec-core/src/core/mod.rs
// ============================================================================
// Module: FormSpec Core Types
// Description: Canonical form schema and session state structures.
// Purpose: Provide stable, serializable types for schemas, values, and records.
// Dependencies: serde, serde_json
// ============================================================================

//! ## Overview
//! Core types define the declarative form schema, the value map it is
//! interpreted over, canonical hashing, the wire boundary, and the session
//! records the runtime emits. These types are the canonical source of truth
//! for any host surface (editor, persistence, transport).

// ============================================================================
// SECTION: Submodules
// ============================================================================

pub mod field;
pub mod hashing;
pub mod identifiers;
pub mod rules;
pub mod schema;
pub mod state;
pub mod time;
pub mod value;
pub mod wire;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use field::Field;
pub use field::FieldKind;
pub use field::FieldOption;
pub use hashing::DEFAULT_HASH_ALGORITHM;
pub use hashing::HashAlgorithm;
pub use hashing::HashDigest;
pub use hashing::HashError;
pub use identifiers::FieldId;
pub use identifiers::FieldName;
pub use rules::ConditionOperator;
pub use rules::ConditionalRule;
pub use rules::RuleKind;
pub use rules::ValidationRule;
pub use schema::DEFAULT_SCHEMA_TITLE;
pub use schema::FormSchema;
pub use schema::SchemaError;
pub use state::FieldError;
pub use state::FormPhase;
pub use state::SubmissionRecord;
pub use state::SubmissionSnapshot;
pub use state::SubmitOutcome;
pub use state::SubmitReceipt;
pub use time::Timestamp;
pub use value::ValueMap;
pub use value::coerce_number;
pub use value::coerce_string;
pub use value::is_empty_value;
pub use value::seed_values;
pub use wire::WireError;
pub use wire::export_schema;
pub use wire::import_schema;

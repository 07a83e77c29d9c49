// formspec-core/src/lib.rs
// ============================================================================
// Module: FormSpec Core Library
// Description: Public API surface for the form schema interpretation core.
// Purpose: Expose schema types, boundary interfaces, and runtime helpers.
// Dependencies: crate::{core, interfaces, runtime}
// ============================================================================

//! ## Overview
//! FormSpec core interprets declarative form schemas: it validates field
//! values against declared rules, evaluates conditional visibility over the
//! current values, and drives the submit lifecycle for one live form. It is
//! host-agnostic and integrates through explicit interfaces for schema
//! persistence and submission transport rather than embedding into any UI
//! framework.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod core;
pub mod interfaces;
pub mod runtime;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use core::*;

pub use interfaces::SchemaStore;
pub use interfaces::StoreError;
pub use interfaces::SubmitDispatcher;
pub use interfaces::SubmitError;
pub use interfaces::load_schema_or_default;
pub use runtime::CompiledValidator;
pub use runtime::FormError;
pub use runtime::FormSession;
pub use runtime::InMemorySchemaStore;
pub use runtime::SessionConfig;
pub use runtime::SettleResult;
pub use runtime::SubmitResult;
pub use runtime::ValidationResult;
pub use runtime::active_fields;
pub use runtime::compile;
pub use runtime::evaluate_condition;
pub use runtime::is_active;

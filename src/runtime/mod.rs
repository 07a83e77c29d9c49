// formspec-core/src/runtime/mod.rs
// ============================================================================
// Module: FormSpec Runtime
// Description: Validation compiler, visibility evaluator, and session engine.
// Purpose: Interpret form schemas against entered values and drive submits.
// Dependencies: crate::{core, interfaces}, regex
// ============================================================================

//! ## Overview
//! Runtime modules interpret the schema model: compiling declared rules into
//! checked validators, evaluating conditional visibility, and driving the
//! submit lifecycle. Host surfaces must call into the session engine rather
//! than reimplementing any of these steps so that activity, validation, and
//! snapshot semantics stay aligned.

// ============================================================================
// SECTION: Submodules
// ============================================================================

pub mod session;
pub mod store;
pub mod validator;
pub mod visibility;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use session::FormError;
pub use session::FormSession;
pub use session::SessionConfig;
pub use session::SettleResult;
pub use session::SubmitResult;
pub use store::InMemorySchemaStore;
pub use validator::CompiledValidator;
pub use validator::ValidationResult;
pub use validator::compile;
pub use visibility::active_fields;
pub use visibility::evaluate_condition;
pub use visibility::is_active;

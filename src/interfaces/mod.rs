// formspec-core/src/interfaces/mod.rs
// ============================================================================
// Module: FormSpec Interfaces
// Description: Boundary contracts for schema persistence and submission dispatch.
// Purpose: Define the contract surfaces the form runtime integrates through.
// Dependencies: crate::core, thiserror
// ============================================================================

//! ## Overview
//! Interfaces define how the form core integrates with its host without
//! embedding backend details: where schemas persist and where submissions go.
//! Implementations must fail closed; the core treats every boundary result as
//! untrusted and falls back to safe defaults on load.

// ============================================================================
// SECTION: Imports
// ============================================================================

use thiserror::Error;

use crate::core::FormSchema;
use crate::core::SubmissionSnapshot;
use crate::core::SubmitReceipt;

// ============================================================================
// SECTION: Schema Store
// ============================================================================

/// Schema store errors.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Store I/O error.
    #[error("schema store io error: {0}")]
    Io(String),
    /// Persisted data is undecodable or fails integrity checks.
    #[error("schema store corruption: {0}")]
    Corrupt(String),
    /// Store reported an error.
    #[error("schema store error: {0}")]
    Store(String),
}

/// Schema persistence boundary.
pub trait SchemaStore {
    /// Loads the persisted schema, if any.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] when loading fails.
    fn load(&self) -> Result<Option<FormSchema>, StoreError>;

    /// Saves the schema.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] when saving fails.
    fn save(&self, schema: &FormSchema) -> Result<(), StoreError>;
}

/// Loads the persisted schema, falling back to the empty default.
///
/// Missing, undecodable, and invalid persisted schemas all yield the default:
/// this helper never returns a schema that fails the validity check.
#[must_use]
pub fn load_schema_or_default<S>(store: &S) -> FormSchema
where
    S: SchemaStore + ?Sized,
{
    match store.load() {
        Ok(Some(schema)) if schema.validate().is_ok() => schema,
        Ok(Some(_)) | Ok(None) | Err(_) => FormSchema::empty_default(),
    }
}

// ============================================================================
// SECTION: Submit Dispatcher
// ============================================================================

/// Submission dispatch errors.
#[derive(Debug, Error)]
pub enum SubmitError {
    /// Dispatcher reported an error.
    #[error("submit dispatch error: {0}")]
    DispatchFailed(String),
}

/// Submission transport boundary.
///
/// Acceptance means the attempt is in flight; its resolution arrives later
/// through the session's settle operation, keyed by the snapshot's sequence
/// number.
pub trait SubmitDispatcher {
    /// Dispatches a validated submission snapshot.
    ///
    /// # Errors
    ///
    /// Returns [`SubmitError`] when the dispatch is not accepted.
    fn dispatch(&self, snapshot: &SubmissionSnapshot) -> Result<SubmitReceipt, SubmitError>;
}

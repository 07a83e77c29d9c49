// formspec-core/src/core/state.rs
// ============================================================================
// Module: FormSpec Session State
// Description: Submit lifecycle phases, outcomes, and submission records.
// Purpose: Capture the session's observable history as append-only records.
// Dependencies: crate::core::{hashing, identifiers, time, value}, serde
// ============================================================================

//! ## Overview
//! Session state is observable through typed records rather than logging.
//! Each dispatched submit attempt appends an immutable record carrying the
//! value snapshot it sent, its content hash, and eventually its outcome. The
//! record log is append-only; settlement fills an attempt's outcome in place
//! but never removes or reorders entries.

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde::Deserialize;
use serde::Serialize;

use crate::core::hashing::HashDigest;
use crate::core::identifiers::FieldName;
use crate::core::time::Timestamp;
use crate::core::value::ValueMap;

// ============================================================================
// SECTION: Form Phase
// ============================================================================

/// Form session lifecycle phase.
///
/// # Invariants
/// - Variants are stable for serialization and contract matching.
/// - `Validating` is transient inside the submit operation; sessions rest in
///   `Idle`, `Submitting`, or `Settled`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FormPhase {
    /// Session is accepting edits; no submission in flight.
    Idle,
    /// Submit attempt is running field validation.
    Validating,
    /// Exactly one submission is dispatched and awaiting settlement.
    Submitting,
    /// Last submission settled; the outcome banner is showing.
    Settled,
}

// ============================================================================
// SECTION: Submit Outcome
// ============================================================================

/// Final outcome of one dispatched submission.
///
/// # Invariants
/// - Variants are stable for serialization and contract matching.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SubmitOutcome {
    /// Submission was accepted by the external collaborator.
    Success {
        /// Optional acknowledgement message for the banner.
        message: Option<String>,
    },
    /// Submission was rejected or failed in transit.
    Failure {
        /// Failure description for the banner.
        message: String,
    },
}

// ============================================================================
// SECTION: Field Errors
// ============================================================================

/// One field-level validation failure from a submit pass.
///
/// # Invariants
/// - At most one entry per field name per pass; entries follow schema field
///   order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldError {
    /// Name of the field that failed.
    pub field: FieldName,
    /// Message from the first failing check.
    pub message: String,
}

// ============================================================================
// SECTION: Submission Snapshot
// ============================================================================

/// Value snapshot handed to the dispatch collaborator.
///
/// # Invariants
/// - `values` holds exactly the active fields at dispatch time; later edits
///   do not affect it.
/// - `content_hash` is the canonical hash of `values`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmissionSnapshot {
    /// Monotonic sequence number tying settlement to this attempt.
    pub seq: u64,
    /// Canonical hash of the schema the values were validated against.
    pub schema_hash: HashDigest,
    /// Active-field values captured at dispatch.
    pub values: ValueMap,
    /// Canonical content hash of `values`.
    pub content_hash: HashDigest,
    /// Host-supplied submission timestamp.
    pub submitted_at: Timestamp,
}

/// Acceptance receipt returned by the dispatch collaborator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmitReceipt {
    /// Dispatch identifier for idempotency and tracing.
    pub dispatch_id: String,
    /// Dispatch timestamp.
    pub dispatched_at: Timestamp,
}

// ============================================================================
// SECTION: Submission Records
// ============================================================================

/// Submission record logged per dispatched attempt.
///
/// # Invariants
/// - `seq` is monotonic within a session.
/// - `outcome` and `settled_at` are set exactly once, at settlement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmissionRecord {
    /// Monotonic sequence number assigned by the session.
    pub seq: u64,
    /// Active-field value snapshot captured at dispatch.
    pub values: ValueMap,
    /// Canonical content hash of the snapshot values.
    pub content_hash: HashDigest,
    /// Host-supplied submission timestamp.
    pub submitted_at: Timestamp,
    /// Receipt from the dispatcher; absent when dispatch itself failed.
    pub receipt: Option<SubmitReceipt>,
    /// Final outcome; present once the attempt settles.
    pub outcome: Option<SubmitOutcome>,
    /// Settlement timestamp; present once the attempt settles.
    pub settled_at: Option<Timestamp>,
}

// formspec-core/src/runtime/session.rs
// ============================================================================
// Module: FormSpec Session Engine
// Description: Submit lifecycle orchestration over one schema and value map.
// Purpose: Drive validation, dispatch, and settlement for a live form.
// Dependencies: crate::{core, interfaces, runtime}
// ============================================================================

//! ## Overview
//! A form session owns one (schema, value map, phase) triple and is the
//! single execution path for edits, submit attempts, settlements, and schema
//! replacement. The session is single-threaded and event-driven; the only
//! suspension point is a dispatched submission, and the phase guard keeps at
//! most one outstanding. All history is observable through the append-only
//! submission record log.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeMap;

use serde_json::Value;
use thiserror::Error;

use crate::core::Field;
use crate::core::FieldError;
use crate::core::FieldName;
use crate::core::FormPhase;
use crate::core::FormSchema;
use crate::core::SchemaError;
use crate::core::SubmissionRecord;
use crate::core::SubmissionSnapshot;
use crate::core::SubmitOutcome;
use crate::core::Timestamp;
use crate::core::ValueMap;
use crate::core::hashing::DEFAULT_HASH_ALGORITHM;
use crate::core::hashing::HashAlgorithm;
use crate::core::hashing::HashDigest;
use crate::core::hashing::HashError;
use crate::core::hashing::hash_canonical_json;
use crate::core::seed_values;
use crate::interfaces::SubmitDispatcher;
use crate::runtime::validator::compile;
use crate::runtime::visibility::active_fields;

// ============================================================================
// SECTION: Session Configuration
// ============================================================================

/// Configuration for a form session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionConfig {
    /// Hash algorithm used for the schema digest and content hashes.
    pub hash_algorithm: HashAlgorithm,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self { hash_algorithm: DEFAULT_HASH_ALGORITHM }
    }
}

// ============================================================================
// SECTION: Operation Results
// ============================================================================

/// Outcome of one submit attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitResult {
    /// Validation rejected the attempt; nothing was dispatched.
    Rejected {
        /// One entry per invalid field, in schema declaration order.
        errors: Vec<FieldError>,
    },
    /// Snapshot dispatched; the attempt awaits settlement.
    InFlight {
        /// Sequence number tying the eventual settlement to this attempt.
        seq: u64,
    },
    /// Dispatch was not accepted; the attempt settled as a failure.
    Failed {
        /// Failure description shown as the form-level banner.
        message: String,
    },
}

/// Outcome of one settle call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SettleResult {
    /// Settlement applied to the in-flight attempt.
    Applied,
    /// Sequence did not match the in-flight attempt; nothing changed.
    Ignored,
}

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Form session errors.
#[derive(Debug, Error)]
pub enum FormError {
    /// Schema failed validation at construction or replacement.
    #[error("invalid form schema: {0}")]
    InvalidSchema(#[from] SchemaError),
    /// A submission is already in flight.
    #[error("submission already in flight: seq {0}")]
    SubmissionInFlight(u64),
    /// Canonical hashing failed.
    #[error(transparent)]
    Hash(#[from] HashError),
}

// ============================================================================
// SECTION: Form Session
// ============================================================================

/// Form session driving the submit lifecycle for one schema.
///
/// # Invariants
/// - The value map holds exactly one entry per schema field at all times.
/// - At most one submission is outstanding; `inflight_seq` is `Some` exactly
///   while the phase is [`FormPhase::Submitting`].
/// - The submission log is append-only; settlement fills an entry in place.
pub struct FormSession<D> {
    /// Schema interpreted by this session; immutable between replacements.
    schema: FormSchema,
    /// Canonical digest of `schema`.
    schema_hash: HashDigest,
    /// Submission transport implementation.
    dispatcher: D,
    /// Session configuration.
    config: SessionConfig,
    /// Current entered values keyed by field name.
    values: ValueMap,
    /// Field errors from the most recent submit pass.
    errors: BTreeMap<FieldName, String>,
    /// Current lifecycle phase.
    phase: FormPhase,
    /// Sequence number of the outstanding attempt, when submitting.
    inflight_seq: Option<u64>,
    /// Outcome banner from the most recent settled attempt.
    settled: Option<SubmitOutcome>,
    /// Append-only submission record log.
    submissions: Vec<SubmissionRecord>,
}

impl<D> FormSession<D>
where
    D: SubmitDispatcher,
{
    /// Creates a new session over a validated schema.
    ///
    /// Seeds the value map from field defaults so every field has a live
    /// entry before the first edit.
    ///
    /// # Errors
    ///
    /// Returns [`FormError::InvalidSchema`] when the schema fails validation
    /// and [`FormError::Hash`] when the schema digest cannot be computed.
    pub fn new(schema: FormSchema, dispatcher: D, config: SessionConfig) -> Result<Self, FormError> {
        schema.validate()?;
        let schema_hash = schema.canonical_hash_with(config.hash_algorithm)?;
        let values = seed_values(&schema);
        Ok(Self {
            schema,
            schema_hash,
            dispatcher,
            config,
            values,
            errors: BTreeMap::new(),
            phase: FormPhase::Idle,
            inflight_seq: None,
            settled: None,
            submissions: Vec::new(),
        })
    }

    /// Applies one field edit.
    ///
    /// Updates the value map, clears the field's error, and dismisses a
    /// showing outcome banner. Edits during an in-flight submission apply
    /// immediately but never touch the dispatched snapshot. Names outside
    /// the schema are ignored.
    pub fn edit(&mut self, name: &FieldName, value: Value) {
        let Some(slot) = self.values.get_mut(name) else {
            return;
        };
        *slot = value;
        self.errors.remove(name);
        if self.phase == FormPhase::Settled {
            self.settled = None;
            self.phase = FormPhase::Idle;
        }
    }

    /// Runs one submit attempt.
    ///
    /// Validates the active fields over the current values. On any failure
    /// the attempt is rejected without dispatch and the session stays idle.
    /// When every active field passes, the active values are snapshotted,
    /// hashed, and dispatched; acceptance moves the session to
    /// [`FormPhase::Submitting`] while a dispatch error settles the attempt
    /// as a failure immediately, retaining entered values.
    ///
    /// # Errors
    ///
    /// Returns [`FormError::SubmissionInFlight`] while an attempt is
    /// outstanding (the dispatcher is not called) and [`FormError::Hash`]
    /// when the snapshot cannot be canonicalized.
    pub fn submit(&mut self, at: Timestamp) -> Result<SubmitResult, FormError> {
        if let Some(seq) = self.inflight_seq {
            return Err(FormError::SubmissionInFlight(seq));
        }
        self.settled = None;
        self.phase = FormPhase::Validating;

        let active = active_fields(&self.schema, &self.values);
        let failures = check_fields(&active, &self.values);
        if !failures.is_empty() {
            self.errors =
                failures.iter().map(|error| (error.field.clone(), error.message.clone())).collect();
            self.phase = FormPhase::Idle;
            return Ok(SubmitResult::Rejected { errors: failures });
        }
        self.errors.clear();

        let snapshot_values = snapshot_values(&active, &self.values);
        let content_hash = match hash_canonical_json(self.config.hash_algorithm, &snapshot_values) {
            Ok(digest) => digest,
            Err(err) => {
                self.phase = FormPhase::Idle;
                return Err(FormError::Hash(err));
            }
        };
        let seq = next_seq(&self.submissions);
        let snapshot = SubmissionSnapshot {
            seq,
            schema_hash: self.schema_hash.clone(),
            values: snapshot_values,
            content_hash,
            submitted_at: at,
        };

        match self.dispatcher.dispatch(&snapshot) {
            Ok(receipt) => {
                self.submissions.push(SubmissionRecord {
                    seq,
                    values: snapshot.values,
                    content_hash: snapshot.content_hash,
                    submitted_at: at,
                    receipt: Some(receipt),
                    outcome: None,
                    settled_at: None,
                });
                self.inflight_seq = Some(seq);
                self.phase = FormPhase::Submitting;
                Ok(SubmitResult::InFlight { seq })
            }
            Err(err) => {
                let message = err.to_string();
                let outcome = SubmitOutcome::Failure { message: message.clone() };
                self.submissions.push(SubmissionRecord {
                    seq,
                    values: snapshot.values,
                    content_hash: snapshot.content_hash,
                    submitted_at: at,
                    receipt: None,
                    outcome: Some(outcome.clone()),
                    settled_at: Some(at),
                });
                self.settled = Some(outcome);
                self.phase = FormPhase::Settled;
                Ok(SubmitResult::Failed { message })
            }
        }
    }

    /// Settles the in-flight attempt identified by `seq`.
    ///
    /// Stale and unknown sequence numbers are ignored so late resolutions
    /// after schema replacement or double settlement have no effect. On
    /// success the value map resets to schema defaults; on failure entered
    /// values are retained.
    pub fn settle(&mut self, seq: u64, outcome: SubmitOutcome, at: Timestamp) -> SettleResult {
        if self.inflight_seq != Some(seq) {
            return SettleResult::Ignored;
        }
        if let Some(record) = self.submissions.iter_mut().find(|record| record.seq == seq) {
            record.outcome = Some(outcome.clone());
            record.settled_at = Some(at);
        }
        if matches!(outcome, SubmitOutcome::Success { .. }) {
            self.values = seed_values(&self.schema);
        }
        self.inflight_seq = None;
        self.settled = Some(outcome);
        self.phase = FormPhase::Settled;
        SettleResult::Applied
    }

    /// Replaces the schema with a new editor-produced value.
    ///
    /// Values for surviving field names are preserved, newly introduced
    /// fields seed their defaults, and values and errors for removed names
    /// are dropped. Any outstanding attempt is orphaned: its eventual settle
    /// call is ignored.
    ///
    /// # Errors
    ///
    /// Returns [`FormError::InvalidSchema`] when the schema fails validation
    /// and [`FormError::Hash`] when the schema digest cannot be computed;
    /// the current schema stays in place on error.
    pub fn replace_schema(&mut self, schema: FormSchema) -> Result<(), FormError> {
        schema.validate()?;
        let schema_hash = schema.canonical_hash_with(self.config.hash_algorithm)?;

        let mut values = seed_values(&schema);
        for (name, value) in &mut values {
            if let Some(existing) = self.values.get(name) {
                *value = existing.clone();
            }
        }
        self.errors.retain(|name, _| schema.field(name).is_some());

        self.schema = schema;
        self.schema_hash = schema_hash;
        self.values = values;
        self.phase = FormPhase::Idle;
        self.inflight_seq = None;
        self.settled = None;
        Ok(())
    }

    // ------------------------------------------------------------------
    // Accessors
    // ------------------------------------------------------------------

    /// Returns the schema this session interprets.
    #[must_use]
    pub const fn schema(&self) -> &FormSchema {
        &self.schema
    }

    /// Returns the canonical digest of the current schema.
    #[must_use]
    pub const fn schema_hash(&self) -> &HashDigest {
        &self.schema_hash
    }

    /// Returns the current lifecycle phase.
    #[must_use]
    pub const fn phase(&self) -> FormPhase {
        self.phase
    }

    /// Returns the current value map.
    #[must_use]
    pub const fn values(&self) -> &ValueMap {
        &self.values
    }

    /// Returns the current value for a field name.
    #[must_use]
    pub fn value(&self, name: &FieldName) -> Option<&Value> {
        self.values.get(name)
    }

    /// Returns the field errors from the most recent submit pass.
    #[must_use]
    pub const fn errors(&self) -> &BTreeMap<FieldName, String> {
        &self.errors
    }

    /// Returns the error message for a field name, if any.
    #[must_use]
    pub fn error(&self, name: &FieldName) -> Option<&str> {
        self.errors.get(name).map(String::as_str)
    }

    /// Returns the currently active fields in declaration order.
    #[must_use]
    pub fn active_fields(&self) -> Vec<&Field> {
        active_fields(&self.schema, &self.values)
    }

    /// Returns the sequence number of the outstanding attempt, if any.
    #[must_use]
    pub const fn inflight_seq(&self) -> Option<u64> {
        self.inflight_seq
    }

    /// Returns the outcome banner from the most recent settled attempt.
    #[must_use]
    pub const fn settled(&self) -> Option<&SubmitOutcome> {
        self.settled.as_ref()
    }

    /// Returns the append-only submission record log.
    #[must_use]
    pub fn submissions(&self) -> &[SubmissionRecord] {
        &self.submissions
    }
}

// ============================================================================
// SECTION: Helper Functions
// ============================================================================

/// Checks the active fields, collecting the first failure per field in
/// declaration order.
fn check_fields(active: &[&Field], values: &ValueMap) -> Vec<FieldError> {
    let mut failures = Vec::new();
    for field in active {
        let result = compile(field).check(values.get(&field.name));
        if let Some(message) = result.message() {
            failures.push(FieldError { field: field.name.clone(), message: message.to_string() });
        }
    }
    failures
}

/// Captures the active fields' current values as a snapshot map.
fn snapshot_values(active: &[&Field], values: &ValueMap) -> ValueMap {
    active
        .iter()
        .map(|field| {
            let value = values.get(&field.name).cloned().unwrap_or(Value::Null);
            (field.name.clone(), value)
        })
        .collect()
}

/// Computes the next sequence number for an append-only list.
const fn next_seq<T>(items: &[T]) -> u64 {
    items.len() as u64 + 1
}

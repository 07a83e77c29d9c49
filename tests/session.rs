// formspec-core/tests/session.rs
// ============================================================================
// Module: Form Session Tests
// Description: Tests for the submit lifecycle over one schema and value map.
// Purpose: Ensure edits, submits, settlements, and replacement interact safely.
// Dependencies: formspec-core, serde_json
// ============================================================================
//! ## Overview
//! Drives full sessions through the Idle, Validating, Submitting, and Settled
//! phases: rejection without dispatch, single in-flight submission, stale
//! settlement, dispatch failure, and schema replacement mid-flight.

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

use std::sync::Arc;
use std::sync::Mutex;

use formspec_core::ConditionOperator;
use formspec_core::ConditionalRule;
use formspec_core::Field;
use formspec_core::FieldId;
use formspec_core::FieldKind;
use formspec_core::FieldName;
use formspec_core::FieldOption;
use formspec_core::FormError;
use formspec_core::FormPhase;
use formspec_core::FormSchema;
use formspec_core::FormSession;
use formspec_core::RuleKind;
use formspec_core::SchemaError;
use formspec_core::SessionConfig;
use formspec_core::SettleResult;
use formspec_core::SubmissionSnapshot;
use formspec_core::SubmitDispatcher;
use formspec_core::SubmitError;
use formspec_core::SubmitOutcome;
use formspec_core::SubmitReceipt;
use formspec_core::SubmitResult;
use formspec_core::Timestamp;
use formspec_core::ValidationRule;
use serde_json::json;

// ============================================================================
// SECTION: Test Dispatchers
// ============================================================================

/// Dispatcher that accepts every snapshot and records what it saw.
#[derive(Debug, Clone, Default)]
struct RecordingDispatcher {
    dispatched: Arc<Mutex<Vec<SubmissionSnapshot>>>,
}

impl SubmitDispatcher for RecordingDispatcher {
    fn dispatch(&self, snapshot: &SubmissionSnapshot) -> Result<SubmitReceipt, SubmitError> {
        self.dispatched.lock().unwrap().push(snapshot.clone());
        Ok(SubmitReceipt {
            dispatch_id: format!("dispatch-{}", snapshot.seq),
            dispatched_at: snapshot.submitted_at,
        })
    }
}

/// Dispatcher that rejects every snapshot.
#[derive(Debug, Clone, Copy)]
struct FailingDispatcher;

impl SubmitDispatcher for FailingDispatcher {
    fn dispatch(&self, _snapshot: &SubmissionSnapshot) -> Result<SubmitReceipt, SubmitError> {
        Err(SubmitError::DispatchFailed("transport offline".to_string()))
    }
}

// ============================================================================
// SECTION: Test Helpers
// ============================================================================

fn base_field(name: &str, kind: FieldKind) -> Field {
    Field {
        id: FieldId::new(format!("id-{name}")),
        name: FieldName::new(name),
        label: String::new(),
        kind,
        required: false,
        help_text: None,
        placeholder: None,
        default_value: None,
        validation: Vec::new(),
        conditional: None,
        options: None,
    }
}

/// Contact form with a required text field, a bounded number, a defaulted
/// select, a required field conditional on the select, and a checkbox.
fn sample_schema() -> FormSchema {
    let mut name = base_field("name", FieldKind::Text);
    name.label = "Full Name".to_string();
    name.required = true;

    let mut age = base_field("age", FieldKind::Number);
    age.validation = vec![ValidationRule {
        kind: RuleKind::Min,
        value: Some(json!(18)),
        message: Some("Must be 18+".to_string()),
    }];

    let mut country = base_field("country", FieldKind::Select);
    country.default_value = Some(json!("US"));
    country.options = Some(vec![
        FieldOption { label: "United States".to_string(), value: "US".to_string() },
        FieldOption { label: "Canada".to_string(), value: "CA".to_string() },
    ]);

    let mut state = base_field("state", FieldKind::Text);
    state.required = true;
    state.conditional = Some(ConditionalRule {
        field: FieldName::new("country"),
        operator: ConditionOperator::Equals,
        value: json!("US"),
    });

    let agree = base_field("agree", FieldKind::Checkbox);

    FormSchema {
        title: "Contact".to_string(),
        description: None,
        fields: vec![name, age, country, state, agree],
    }
}

fn recording_session() -> (FormSession<RecordingDispatcher>, Arc<Mutex<Vec<SubmissionSnapshot>>>) {
    let dispatcher = RecordingDispatcher::default();
    let dispatched = Arc::clone(&dispatcher.dispatched);
    let session = FormSession::new(sample_schema(), dispatcher, SessionConfig::default())
        .expect("sample schema is valid");
    (session, dispatched)
}

fn name_of(text: &str) -> FieldName {
    FieldName::new(text)
}

/// Fills the sample form so every active field passes validation. Selecting
/// CA hides the conditional `state` field.
fn fill_valid(session: &mut FormSession<RecordingDispatcher>) {
    session.edit(&name_of("name"), json!("Ada Lovelace"));
    session.edit(&name_of("age"), json!("36"));
    session.edit(&name_of("country"), json!("CA"));
}

// ============================================================================
// SECTION: Construction
// ============================================================================

/// Verifies construction validates the schema, seeds defaults, and starts
/// idle with an empty history.
#[test]
fn construction_seeds_defaults_and_starts_idle() {
    let (session, _) = recording_session();

    assert_eq!(session.phase(), FormPhase::Idle);
    assert_eq!(session.values().len(), 5);
    assert_eq!(session.value(&name_of("name")), Some(&json!("")));
    assert_eq!(session.value(&name_of("country")), Some(&json!("US")));
    assert_eq!(session.value(&name_of("agree")), Some(&json!(false)));
    assert!(session.errors().is_empty());
    assert!(session.submissions().is_empty());
    assert_eq!(session.inflight_seq(), None);
    assert_eq!(session.settled(), None);

    let expected = sample_schema().canonical_hash().expect("schema is hashable");
    assert_eq!(session.schema_hash(), &expected);
}

/// Verifies construction rejects an invalid schema.
#[test]
fn construction_rejects_invalid_schema() {
    let mut schema = sample_schema();
    schema.fields[1].name = FieldName::new("name");

    let err = FormSession::new(schema, RecordingDispatcher::default(), SessionConfig::default())
        .err()
        .expect("duplicate names must be rejected");
    assert!(matches!(
        err,
        FormError::InvalidSchema(SchemaError::DuplicateFieldName(name)) if name == "name"
    ));
}

// ============================================================================
// SECTION: Validation Gate
// ============================================================================

/// Verifies an invalid field rejects the attempt without dispatching and
/// leaves the session idle with one error entry per invalid field.
#[test]
fn submit_rejects_invalid_fields_without_dispatch() {
    let (mut session, dispatched) = recording_session();
    session.edit(&name_of("name"), json!("Ada"));
    session.edit(&name_of("age"), json!("17"));
    session.edit(&name_of("country"), json!("CA"));

    let result = session.submit(Timestamp::Logical(1)).expect("no submission in flight");
    let SubmitResult::Rejected { errors } = result else {
        panic!("expected rejection");
    };
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].field, name_of("age"));
    assert_eq!(errors[0].message, "Must be 18+");

    assert_eq!(session.phase(), FormPhase::Idle);
    assert_eq!(session.error(&name_of("age")), Some("Must be 18+"));
    assert_eq!(session.errors().len(), 1);
    assert!(dispatched.lock().unwrap().is_empty());
    assert!(session.submissions().is_empty());

    // Fixing the value clears the error; the next attempt dispatches.
    session.edit(&name_of("age"), json!("21"));
    assert_eq!(session.error(&name_of("age")), None);
    let result = session.submit(Timestamp::Logical(2)).expect("no submission in flight");
    assert_eq!(result, SubmitResult::InFlight { seq: 1 });
    assert!(session.errors().is_empty());
}

/// Verifies rejection reports every invalid field in declaration order and
/// uses the display label when one is set.
#[test]
fn rejection_reports_fields_in_declaration_order() {
    let (mut session, _) = recording_session();
    session.edit(&name_of("age"), json!("17"));
    session.edit(&name_of("country"), json!("CA"));

    let result = session.submit(Timestamp::Logical(1)).expect("no submission in flight");
    let SubmitResult::Rejected { errors } = result else {
        panic!("expected rejection");
    };

    let failed: Vec<&str> = errors.iter().map(|error| error.field.as_str()).collect();
    assert_eq!(failed, vec!["name", "age"]);
    assert_eq!(errors[0].message, "Full Name is required");
}

/// Verifies a hidden field is not validated even when required, while the
/// same field blocks the submit once its condition activates it.
#[test]
fn hidden_required_field_does_not_block_submit() {
    let (mut session, _) = recording_session();
    session.edit(&name_of("name"), json!("Ada"));
    session.edit(&name_of("country"), json!("US"));

    let result = session.submit(Timestamp::Logical(1)).expect("no submission in flight");
    let SubmitResult::Rejected { errors } = result else {
        panic!("expected rejection while state is active");
    };
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].field, name_of("state"));
    assert_eq!(errors[0].message, "state is required");

    // Switching away hides `state`; the attempt now dispatches.
    session.edit(&name_of("country"), json!("CA"));
    let result = session.submit(Timestamp::Logical(2)).expect("no submission in flight");
    assert_eq!(result, SubmitResult::InFlight { seq: 1 });
}

// ============================================================================
// SECTION: Dispatch and Snapshots
// ============================================================================

/// Verifies a passing submit dispatches a snapshot of exactly the active
/// fields and appends an unsettled record carrying the receipt.
#[test]
fn submit_dispatches_snapshot_of_active_fields() {
    let (mut session, dispatched) = recording_session();
    fill_valid(&mut session);

    let result = session.submit(Timestamp::Logical(7)).expect("no submission in flight");
    assert_eq!(result, SubmitResult::InFlight { seq: 1 });
    assert_eq!(session.phase(), FormPhase::Submitting);
    assert_eq!(session.inflight_seq(), Some(1));

    let snapshots = dispatched.lock().unwrap();
    assert_eq!(snapshots.len(), 1);
    let snapshot = &snapshots[0];
    assert_eq!(snapshot.seq, 1);
    assert_eq!(snapshot.schema_hash, *session.schema_hash());
    assert_eq!(snapshot.submitted_at, Timestamp::Logical(7));

    // The hidden `state` field is excluded from the snapshot.
    let keys: Vec<&str> = snapshot.values.keys().map(FieldName::as_str).collect();
    assert_eq!(keys, vec!["age", "agree", "country", "name"]);
    assert_eq!(snapshot.values.get(&name_of("name")), Some(&json!("Ada Lovelace")));

    let record = &session.submissions()[0];
    assert_eq!(record.seq, 1);
    assert_eq!(record.values, snapshot.values);
    assert_eq!(record.content_hash, snapshot.content_hash);
    assert_eq!(
        record.receipt,
        Some(SubmitReceipt {
            dispatch_id: "dispatch-1".to_string(),
            dispatched_at: Timestamp::Logical(7),
        })
    );
    assert_eq!(record.outcome, None);
    assert_eq!(record.settled_at, None);
}

/// Verifies a second submit while one is in flight returns an error without
/// reaching the dispatcher.
#[test]
fn second_submit_while_inflight_is_rejected() {
    let (mut session, dispatched) = recording_session();
    fill_valid(&mut session);
    let result = session.submit(Timestamp::Logical(1)).expect("no submission in flight");
    assert_eq!(result, SubmitResult::InFlight { seq: 1 });

    let err = session.submit(Timestamp::Logical(2)).expect_err("second submit must fail");
    assert!(matches!(err, FormError::SubmissionInFlight(1)));
    assert_eq!(dispatched.lock().unwrap().len(), 1);
    assert_eq!(session.submissions().len(), 1);
    assert_eq!(session.phase(), FormPhase::Submitting);
}

/// Verifies edits during an in-flight submission apply to the live values
/// but never mutate the dispatched snapshot.
#[test]
fn edits_during_submitting_do_not_touch_snapshot() {
    let (mut session, _) = recording_session();
    fill_valid(&mut session);
    let _ = session.submit(Timestamp::Logical(1)).expect("no submission in flight");

    session.edit(&name_of("name"), json!("Grace Hopper"));
    assert_eq!(session.value(&name_of("name")), Some(&json!("Grace Hopper")));
    assert_eq!(session.phase(), FormPhase::Submitting);
    assert_eq!(session.submissions()[0].values.get(&name_of("name")), Some(&json!("Ada Lovelace")));
}

// ============================================================================
// SECTION: Settlement
// ============================================================================

/// Verifies a success settlement fills the record, shows the banner, resets
/// values to schema defaults, and the next edit dismisses the banner.
#[test]
fn settle_success_resets_values_and_shows_banner() {
    let (mut session, _) = recording_session();
    fill_valid(&mut session);
    let _ = session.submit(Timestamp::Logical(1)).expect("no submission in flight");

    let outcome = SubmitOutcome::Success { message: Some("Thanks!".to_string()) };
    let result = session.settle(1, outcome.clone(), Timestamp::Logical(2));
    assert_eq!(result, SettleResult::Applied);

    assert_eq!(session.phase(), FormPhase::Settled);
    assert_eq!(session.settled(), Some(&outcome));
    assert_eq!(session.inflight_seq(), None);
    assert_eq!(session.value(&name_of("name")), Some(&json!("")));
    assert_eq!(session.value(&name_of("country")), Some(&json!("US")));

    let record = &session.submissions()[0];
    assert_eq!(record.outcome, Some(outcome));
    assert_eq!(record.settled_at, Some(Timestamp::Logical(2)));

    session.edit(&name_of("name"), json!("Grace"));
    assert_eq!(session.phase(), FormPhase::Idle);
    assert_eq!(session.settled(), None);
}

/// Verifies a failure settlement retains entered values for correction and
/// allows a follow-up attempt with the next sequence number.
#[test]
fn settle_failure_retains_values_for_retry() {
    let (mut session, _) = recording_session();
    fill_valid(&mut session);
    let _ = session.submit(Timestamp::Logical(1)).expect("no submission in flight");

    let outcome = SubmitOutcome::Failure { message: "Server rejected the submission".to_string() };
    assert_eq!(session.settle(1, outcome.clone(), Timestamp::Logical(2)), SettleResult::Applied);

    assert_eq!(session.phase(), FormPhase::Settled);
    assert_eq!(session.settled(), Some(&outcome));
    assert_eq!(session.value(&name_of("name")), Some(&json!("Ada Lovelace")));

    let result = session.submit(Timestamp::Logical(3)).expect("no submission in flight");
    assert_eq!(result, SubmitResult::InFlight { seq: 2 });
    assert_eq!(session.settled(), None);
    assert_eq!(session.submissions().len(), 2);
}

/// Verifies settlements with a stale, unknown, or already-settled sequence
/// number change nothing.
#[test]
fn mismatched_settle_is_ignored() {
    let (mut session, _) = recording_session();
    let outcome = SubmitOutcome::Success { message: None };

    // Nothing in flight at all.
    assert_eq!(session.settle(1, outcome.clone(), Timestamp::Logical(1)), SettleResult::Ignored);

    fill_valid(&mut session);
    let _ = session.submit(Timestamp::Logical(2)).expect("no submission in flight");

    // Wrong sequence number while seq 1 is in flight.
    assert_eq!(session.settle(99, outcome.clone(), Timestamp::Logical(3)), SettleResult::Ignored);
    assert_eq!(session.phase(), FormPhase::Submitting);
    assert_eq!(session.submissions()[0].outcome, None);

    // Matching settlement applies exactly once.
    assert_eq!(session.settle(1, outcome.clone(), Timestamp::Logical(4)), SettleResult::Applied);
    assert_eq!(session.settle(1, outcome, Timestamp::Logical(5)), SettleResult::Ignored);
    assert_eq!(session.submissions()[0].settled_at, Some(Timestamp::Logical(4)));
}

/// Verifies a dispatch error settles the attempt as a failure immediately,
/// retaining entered values and logging a record without a receipt.
#[test]
fn dispatch_error_settles_failure_immediately() {
    let mut session = FormSession::new(sample_schema(), FailingDispatcher, SessionConfig::default())
        .expect("sample schema is valid");
    session.edit(&name_of("name"), json!("Ada Lovelace"));
    session.edit(&name_of("country"), json!("CA"));

    let result = session.submit(Timestamp::Logical(3)).expect("dispatch failure is an outcome");
    let SubmitResult::Failed { message } = result else {
        panic!("expected failed dispatch");
    };
    assert_eq!(message, "submit dispatch error: transport offline");

    assert_eq!(session.phase(), FormPhase::Settled);
    assert_eq!(session.settled(), Some(&SubmitOutcome::Failure { message: message.clone() }));
    assert_eq!(session.inflight_seq(), None);
    assert_eq!(session.value(&name_of("name")), Some(&json!("Ada Lovelace")));

    let record = &session.submissions()[0];
    assert_eq!(record.seq, 1);
    assert_eq!(record.receipt, None);
    assert_eq!(record.outcome, Some(SubmitOutcome::Failure { message }));
    assert_eq!(record.settled_at, Some(Timestamp::Logical(3)));

    // The failed attempt consumed seq 1; a retry takes the next number.
    let result = session.submit(Timestamp::Logical(4)).expect("no submission in flight");
    assert!(matches!(result, SubmitResult::Failed { .. }));
    assert_eq!(session.submissions().len(), 2);
    assert_eq!(session.submissions()[1].seq, 2);
}

// ============================================================================
// SECTION: Edits
// ============================================================================

/// Verifies edits for names outside the schema are ignored.
#[test]
fn edit_ignores_unknown_names() {
    let (mut session, _) = recording_session();

    session.edit(&name_of("ghost"), json!("boo"));
    assert_eq!(session.values().len(), 5);
    assert_eq!(session.value(&name_of("ghost")), None);
}

// ============================================================================
// SECTION: Schema Replacement
// ============================================================================

/// Verifies replacement preserves surviving values, seeds new fields, and
/// drops values and errors for removed names.
#[test]
fn replace_schema_preserves_surviving_values() {
    let (mut session, _) = recording_session();
    session.edit(&name_of("name"), json!("Ada"));
    session.edit(&name_of("age"), json!("17"));
    session.edit(&name_of("country"), json!("CA"));
    let _ = session.submit(Timestamp::Logical(1)).expect("no submission in flight");
    assert_eq!(session.error(&name_of("age")), Some("Must be 18+"));
    let old_hash = session.schema_hash().clone();

    let mut next = sample_schema();
    next.fields.retain(|field| field.name.as_str() != "age");
    let mut email = base_field("email", FieldKind::Text);
    email.default_value = Some(json!("user@example.com"));
    next.fields.push(email);
    session.replace_schema(next).expect("replacement schema is valid");

    assert_eq!(session.value(&name_of("name")), Some(&json!("Ada")));
    assert_eq!(session.value(&name_of("age")), None);
    assert_eq!(session.value(&name_of("email")), Some(&json!("user@example.com")));
    assert_eq!(session.error(&name_of("age")), None);
    assert_eq!(session.phase(), FormPhase::Idle);
    assert_ne!(session.schema_hash(), &old_hash);
}

/// Verifies replacement orphans an in-flight attempt: its settlement is
/// ignored and never resets values.
#[test]
fn replace_schema_orphans_inflight_attempt() {
    let (mut session, _) = recording_session();
    fill_valid(&mut session);
    let _ = session.submit(Timestamp::Logical(1)).expect("no submission in flight");
    assert_eq!(session.inflight_seq(), Some(1));

    session.replace_schema(sample_schema()).expect("replacement schema is valid");
    assert_eq!(session.inflight_seq(), None);
    assert_eq!(session.phase(), FormPhase::Idle);
    assert_eq!(session.value(&name_of("name")), Some(&json!("Ada Lovelace")));

    let outcome = SubmitOutcome::Success { message: None };
    assert_eq!(session.settle(1, outcome, Timestamp::Logical(2)), SettleResult::Ignored);
    assert_eq!(session.value(&name_of("name")), Some(&json!("Ada Lovelace")));
    assert_eq!(session.submissions()[0].outcome, None);
}

/// Verifies an invalid replacement is rejected and the current schema stays
/// in effect.
#[test]
fn replace_schema_rejects_invalid_schema() {
    let (mut session, _) = recording_session();

    let mut bad = sample_schema();
    bad.fields[0].id = FieldId::new("");
    let err = session.replace_schema(bad).expect_err("empty ids must be rejected");
    assert!(matches!(err, FormError::InvalidSchema(SchemaError::EmptyFieldId(_))));

    assert_eq!(session.schema().title, "Contact");
    assert_eq!(session.value(&name_of("country")), Some(&json!("US")));
}

// ============================================================================
// SECTION: Submission Log
// ============================================================================

/// Verifies the submission log is append-only with monotonic sequence
/// numbers across settled attempts.
#[test]
fn submission_log_sequences_attempts_monotonically() {
    let (mut session, _) = recording_session();

    fill_valid(&mut session);
    let _ = session.submit(Timestamp::UnixMillis(1_700_000_000_000)).expect("first attempt");
    let accepted = SubmitOutcome::Success { message: None };
    session.settle(1, accepted, Timestamp::UnixMillis(1_700_000_000_500));

    fill_valid(&mut session);
    let result = session.submit(Timestamp::UnixMillis(1_700_000_001_000)).expect("second attempt");
    assert_eq!(result, SubmitResult::InFlight { seq: 2 });
    assert_eq!(session.settled(), None);
    let rejected = SubmitOutcome::Failure { message: "quota exceeded".to_string() };
    session.settle(2, rejected, Timestamp::UnixMillis(1_700_000_001_500));

    let seqs: Vec<u64> = session.submissions().iter().map(|record| record.seq).collect();
    assert_eq!(seqs, vec![1, 2]);
    assert!(matches!(session.submissions()[0].outcome, Some(SubmitOutcome::Success { .. })));
    assert!(matches!(session.submissions()[1].outcome, Some(SubmitOutcome::Failure { .. })));
    assert_eq!(session.submissions()[0].submitted_at, Timestamp::UnixMillis(1_700_000_000_000));
}

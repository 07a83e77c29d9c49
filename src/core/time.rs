// formspec-core/src/core/time.rs
// ============================================================================
// Module: FormSpec Time Model
// Description: Host-supplied timestamps stamped onto submission attempts.
// Purpose: Keep the interpretation core free of wall-clock reads.
// Dependencies: serde
// ============================================================================

//! ## Overview
//! The core never reads a clock. Hosts stamp submit and settle calls with a
//! [`Timestamp`], and the session stores those stamps verbatim on submission
//! records. A wall-clock host passes unix milliseconds; deterministic tests
//! and replay drivers count logical ticks instead.

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde::Deserialize;
use serde::Serialize;

// ============================================================================
// SECTION: Timestamps
// ============================================================================

/// Host-supplied time stamp carried on submission records.
///
/// # Invariants
/// - The core stores stamps verbatim and never compares, orders, or
///   validates them; monotonicity is a host responsibility.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum Timestamp {
    /// Unix epoch milliseconds.
    UnixMillis(i64),
    /// Monotonic logical tick.
    Logical(u64),
}

// formspec-core/src/core/hashing.rs
// ============================================================================
// Module: FormSpec Canonical Hashing
// Description: RFC 8785 canonical JSON text, value normal form, and digests.
// Purpose: Keep schema exports, imports, and content digests consistent.
// Dependencies: serde, serde_jcs, serde_json, sha2
// ============================================================================

//! ## Overview
//! One canonicalization primitive backs the whole wire boundary: RFC 8785
//! (JCS) text. Schema exports are JCS strings, schema and submission digests
//! hash those strings, and [`canonical_json_value`] reparses them to define
//! the number normal form that imports rewrite values into. Keying everything
//! off the same text is what makes structurally equal schemas byte-equal on
//! the wire and digest-stable across key insertion order.

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde::Deserialize;
use serde::Serialize;
use serde_json::Value;
use sha2::Digest;
use sha2::Sha256;
use thiserror::Error;

// ============================================================================
// SECTION: Hash Algorithm
// ============================================================================

/// Supported hash algorithms for schema and submission digests.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HashAlgorithm {
    /// SHA-256 hashing (default).
    Sha256,
}

/// Default hash algorithm for schema and submission digests.
pub const DEFAULT_HASH_ALGORITHM: HashAlgorithm = HashAlgorithm::Sha256;

// ============================================================================
// SECTION: Hash Digest
// ============================================================================

/// Content digest carried on schemas and submission records.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HashDigest {
    /// Algorithm that produced the digest.
    pub algorithm: HashAlgorithm,
    /// Digest bytes as lowercase hex.
    pub value: String,
}

impl HashDigest {
    /// Builds a digest record over raw digest bytes.
    #[must_use]
    pub fn new(algorithm: HashAlgorithm, bytes: &[u8]) -> Self {
        Self { algorithm, value: hex_encode(bytes) }
    }
}

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Errors raised when computing canonical hashes.
#[derive(Debug, Error)]
pub enum HashError {
    /// JSON canonicalization failed.
    #[error("failed to canonicalize json: {0}")]
    Canonicalization(String),
}

// ============================================================================
// SECTION: Canonical JSON
// ============================================================================

/// Returns RFC 8785 canonical JSON text for a serializable value.
///
/// # Errors
///
/// Returns [`HashError::Canonicalization`] when serialization fails.
pub fn canonical_json_string<T: Serialize + ?Sized>(value: &T) -> Result<String, HashError> {
    serde_jcs::to_string(value).map_err(|err| HashError::Canonicalization(err.to_string()))
}

/// Rewrites a JSON value into the form its canonical text parses back to.
///
/// RFC 8785 renders every number through its ECMAScript string, so a float
/// `1.0` serializes as `1` and reparses as an integer. One application puts
/// a value into the wire normal form: canonicalizing and reparsing it again
/// is the identity.
///
/// # Errors
///
/// Returns [`HashError::Canonicalization`] when serialization fails.
pub fn canonical_json_value(value: &Value) -> Result<Value, HashError> {
    let text = canonical_json_string(value)?;
    serde_json::from_str(&text).map_err(|err| HashError::Canonicalization(err.to_string()))
}

// ============================================================================
// SECTION: Digests
// ============================================================================

/// Hashes a value's canonical JSON text using the provided algorithm.
///
/// # Errors
///
/// Returns [`HashError::Canonicalization`] when serialization fails.
pub fn hash_canonical_json<T: Serialize + ?Sized>(
    algorithm: HashAlgorithm,
    value: &T,
) -> Result<HashDigest, HashError> {
    let text = canonical_json_string(value)?;
    Ok(hash_bytes(algorithm, text.as_bytes()))
}

/// Digests raw bytes with the selected algorithm.
#[must_use]
pub fn hash_bytes(algorithm: HashAlgorithm, bytes: &[u8]) -> HashDigest {
    match algorithm {
        HashAlgorithm::Sha256 => {
            let mut hasher = Sha256::new();
            hasher.update(bytes);
            let digest = hasher.finalize();
            HashDigest::new(HashAlgorithm::Sha256, &digest)
        }
    }
}

/// Renders bytes as a lowercase hex string.
fn hex_encode(bytes: &[u8]) -> String {
    const HEX: &[u8; 16] = b"0123456789abcdef";
    let mut out = String::with_capacity(bytes.len() * 2);
    for byte in bytes {
        out.push(char::from(HEX[usize::from(byte >> 4)]));
        out.push(char::from(HEX[usize::from(byte & 0x0f)]));
    }
    out
}

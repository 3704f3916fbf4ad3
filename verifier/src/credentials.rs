//! Enrollment and verification of salted credential records.
//!
//! `enroll` validates its inputs, draws a fresh salt and derives a key with the
//! fixed Argon2id parameters from [`crate::crypto::kdf`]. `verify` re-derives
//! with the record's salt and compares in constant time.

use thiserror::Error;
use tracing::debug;

use crate::crypto::compare::constant_time_eq;
use crate::crypto::kdf;
use crate::record::CredentialRecord;

/// Longest secret accepted at enrollment, in bytes.
pub const MAX_SECRET_LEN: usize = 1024;
/// Longest identifier accepted at enrollment, in bytes.
pub const MAX_IDENTIFIER_LEN: usize = 320;

#[derive(Debug, Error)]
pub enum CredentialError {
    #[error("invalid input: {0}")]
    InvalidInput(String),
    #[error("malformed credential record: {0}")]
    MalformedRecord(String),
    #[error("key derivation failed: {0}")]
    Derivation(String),
}

/// Produces a storable record binding `identifier` to a fresh salt and the
/// key derived from `secret`.
pub fn enroll(identifier: &str, secret: &str) -> Result<CredentialRecord, CredentialError> {
    validate_identifier(identifier)?;
    validate_secret(secret)?;

    let salt = kdf::generate_salt();
    let derived_key = kdf::derive_key(secret.as_bytes(), &salt)
        .map_err(|e| CredentialError::Derivation(format!("{e}")))?;

    debug!(identifier, "enrolled credential");
    Ok(CredentialRecord::new(
        identifier.to_owned(),
        salt.to_vec(),
        derived_key.to_vec(),
    ))
}

/// Returns `true` only when `secret` derives exactly the record's key.
pub fn verify(record: &CredentialRecord, secret: &str) -> Result<bool, CredentialError> {
    let candidate = kdf::derive_key(secret.as_bytes(), record.salt())
        .map_err(|e| CredentialError::Derivation(format!("{e}")))?;
    let matches = constant_time_eq(&candidate[..], record.derived_key());
    debug!(identifier = record.identifier(), matches, "verified credential");
    Ok(matches)
}

/// Parses a persisted `salt_hex:derived_key_hex` value and verifies `secret`
/// against it.
pub fn verify_stored(stored: &str, secret: &str) -> Result<bool, CredentialError> {
    let record = CredentialRecord::from_stored("", stored)?;
    verify(&record, secret)
}

fn validate_identifier(identifier: &str) -> Result<(), CredentialError> {
    let invalid = |reason: &str| Err(CredentialError::InvalidInput(reason.to_string()));

    if identifier.trim().is_empty() {
        return invalid("identifier must not be empty");
    }
    if identifier.trim() != identifier {
        return invalid("identifier must not start or end with whitespace");
    }
    if identifier.len() > MAX_IDENTIFIER_LEN {
        return invalid("identifier is too long");
    }
    if identifier.chars().any(char::is_control) {
        return invalid("identifier must not contain control characters");
    }
    if identifier.contains(':') {
        return invalid("identifier must not contain ':'");
    }
    Ok(())
}

fn validate_secret(secret: &str) -> Result<(), CredentialError> {
    if secret.is_empty() {
        return Err(CredentialError::InvalidInput("secret must not be empty".to_string()));
    }
    if secret.len() > MAX_SECRET_LEN {
        return Err(CredentialError::InvalidInput(format!(
            "secret exceeds {MAX_SECRET_LEN} bytes"
        )));
    }
    Ok(())
}

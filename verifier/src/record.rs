//! Credential records and their persisted encodings.
//!
//! The persisted password field is `<salt hex>:<derived key hex>`. The
//! structured form wraps it together with the identifier as
//! `{"identifier": "...", "password": "..."}` so a storage layer can keep one
//! JSON object per account.

use std::fmt;

use serde::{Deserialize, Serialize};
use zeroize::Zeroize;

use crate::credentials::CredentialError;
use crate::crypto::kdf::{DERIVED_KEY_LEN, SALT_LEN};

const SEPARATOR: char = ':';

/// Binds an identifier to a salt and the key derived from (secret, salt).
/// Records are immutable once created and wipe their key material on drop.
#[derive(Clone, Serialize, Deserialize)]
#[serde(try_from = "StoredCredential", into = "StoredCredential")]
pub struct CredentialRecord {
    identifier: String,
    salt: Vec<u8>,
    derived_key: Vec<u8>,
}

impl CredentialRecord {
    pub(crate) fn new(identifier: String, salt: Vec<u8>, derived_key: Vec<u8>) -> Self {
        Self {
            identifier,
            salt,
            derived_key,
        }
    }

    /// Parses a persisted `salt_hex:derived_key_hex` value for `identifier`.
    pub fn from_stored(identifier: impl Into<String>, stored: &str) -> Result<Self, CredentialError> {
        let (salt_hex, key_hex) = stored
            .split_once(SEPARATOR)
            .ok_or_else(|| malformed("missing ':' separator between salt and key"))?;
        if key_hex.contains(SEPARATOR) {
            return Err(malformed("more than one ':' separator"));
        }

        let salt = hex::decode(salt_hex).map_err(|e| malformed(format!("salt is not valid hex: {e}")))?;
        if salt.len() < SALT_LEN {
            return Err(malformed(format!(
                "salt is {} bytes; at least {SALT_LEN} required",
                salt.len()
            )));
        }

        let derived_key =
            hex::decode(key_hex).map_err(|e| malformed(format!("derived key is not valid hex: {e}")))?;
        if derived_key.len() != DERIVED_KEY_LEN {
            return Err(malformed(format!(
                "derived key is {} bytes; expected {DERIVED_KEY_LEN}",
                derived_key.len()
            )));
        }

        Ok(Self::new(identifier.into(), salt, derived_key))
    }

    /// Encodes the salt and derived key as `salt_hex:derived_key_hex`.
    pub fn to_stored(&self) -> String {
        format!("{}{SEPARATOR}{}", hex::encode(&self.salt), hex::encode(&self.derived_key))
    }

    pub fn identifier(&self) -> &str {
        &self.identifier
    }

    pub fn salt(&self) -> &[u8] {
        &self.salt
    }

    pub fn derived_key(&self) -> &[u8] {
        &self.derived_key
    }
}

impl fmt::Debug for CredentialRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CredentialRecord")
            .field("identifier", &self.identifier)
            .field("salt", &"<redacted>")
            .field("derived_key", &"<redacted>")
            .finish()
    }
}

impl Drop for CredentialRecord {
    fn drop(&mut self) {
        self.salt.zeroize();
        self.derived_key.zeroize();
    }
}

fn malformed(reason: impl Into<String>) -> CredentialError {
    CredentialError::MalformedRecord(reason.into())
}

/// Storage shape of a record: the identifier plus the encoded password field.
/// Parsing into a [`CredentialRecord`] is deferred until the record is needed.
#[derive(Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct StoredCredential {
    pub identifier: String,
    pub password: String,
}

impl fmt::Debug for StoredCredential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StoredCredential")
            .field("identifier", &self.identifier)
            .field("password", &"<redacted>")
            .finish()
    }
}

impl TryFrom<StoredCredential> for CredentialRecord {
    type Error = CredentialError;

    fn try_from(value: StoredCredential) -> Result<Self, Self::Error> {
        CredentialRecord::from_stored(value.identifier.clone(), &value.password)
    }
}

impl From<CredentialRecord> for StoredCredential {
    fn from(value: CredentialRecord) -> Self {
        StoredCredential::from(&value)
    }
}

impl From<&CredentialRecord> for StoredCredential {
    fn from(value: &CredentialRecord) -> Self {
        StoredCredential {
            identifier: value.identifier.clone(),
            password: value.to_stored(),
        }
    }
}

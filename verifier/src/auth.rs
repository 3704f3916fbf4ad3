//! Signup and login flows over an injected credential store.

use thiserror::Error;
use tracing::{info, warn};

use crate::credentials::{enroll, verify, CredentialError};
use crate::crypto::kdf::{DERIVED_KEY_LEN, SALT_LEN};
use crate::record::CredentialRecord;
use crate::store::{CredentialLookup, CredentialStore, StoreError};

#[derive(Debug, Error)]
pub enum AuthError {
    #[error(transparent)]
    Credential(#[from] CredentialError),
    #[error(transparent)]
    Store(#[from] StoreError),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoginOutcome {
    Success,
    Failed,
}

impl LoginOutcome {
    pub fn message(&self) -> &'static str {
        match self {
            LoginOutcome::Success => "login success",
            LoginOutcome::Failed => "login failed",
        }
    }
}

/// Enrolls `identifier` and stores the resulting record.
pub fn signup<S>(store: &mut S, identifier: &str, secret: &str) -> Result<(), AuthError>
where
    S: CredentialStore + ?Sized,
{
    let record = enroll(identifier, secret)?;
    store.insert(record)?;
    info!(identifier, "signup complete");
    Ok(())
}

/// Checks `secret` against the record stored for `identifier`.
///
/// An unknown identifier is reported as [`LoginOutcome::Failed`] after running
/// one derivation against a decoy record, so it costs as much as a wrong
/// secret. A stored record that fails to parse is an error, not a failed login.
pub fn login<L>(lookup: &L, identifier: &str, secret: &str) -> Result<LoginOutcome, AuthError>
where
    L: CredentialLookup + ?Sized,
{
    let record = match lookup.find_by_identifier(identifier) {
        Ok(record) => record,
        Err(StoreError::Record(err)) => {
            warn!(identifier, error = %err, "stored credential is malformed");
            return Err(err.into());
        }
        Err(err) => return Err(err.into()),
    };

    let Some(record) = record else {
        verify(&decoy_record(), secret)?;
        info!(identifier, "login failed: unknown identifier");
        return Ok(LoginOutcome::Failed);
    };

    if verify(&record, secret)? {
        info!(identifier, "login success");
        Ok(LoginOutcome::Success)
    } else {
        info!(identifier, "login failed: secret mismatch");
        Ok(LoginOutcome::Failed)
    }
}

// All-zero key: no secret derives it in practice.
fn decoy_record() -> CredentialRecord {
    CredentialRecord::new(String::new(), vec![0x5a; SALT_LEN], vec![0; DERIVED_KEY_LEN])
}

#[cfg(test)]
mod tests {
    use super::{login, signup, AuthError, LoginOutcome};
    use crate::credentials::CredentialError;
    use crate::record::CredentialRecord;
    use crate::store::{CredentialLookup, CredentialStore, MemoryStore, StoreError};

    struct BrokenLookup;

    impl CredentialLookup for BrokenLookup {
        fn find_by_identifier(&self, _identifier: &str) -> Result<Option<CredentialRecord>, StoreError> {
            Err(CredentialError::MalformedRecord("missing ':' separator".to_string()).into())
        }
    }

    #[test]
    fn signup_then_login() {
        let mut store = MemoryStore::new();
        signup(&mut store, "a@b.com", "Tentothe6!").expect("signup should succeed");

        assert_eq!(login(&store, "a@b.com", "Tentothe6!").expect("login runs"), LoginOutcome::Success);
        assert_eq!(login(&store, "a@b.com", "wrong").expect("login runs"), LoginOutcome::Failed);
    }

    #[test]
    fn unknown_identifier_fails_without_error() {
        let store = MemoryStore::new();
        let outcome = login(&store, "nobody@b.com", "Tentothe6!").expect("login runs");
        assert_eq!(outcome, LoginOutcome::Failed);
        assert_eq!(outcome.message(), "login failed");
    }

    #[test]
    fn duplicate_signup_is_rejected() {
        let mut store = MemoryStore::new();
        signup(&mut store, "a@b.com", "Tentothe6!").expect("signup should succeed");
        let err = signup(&mut store, "a@b.com", "other-secret").unwrap_err();
        assert!(matches!(err, AuthError::Store(StoreError::Duplicate(_))));
        assert_eq!(login(&store, "a@b.com", "Tentothe6!").expect("login runs"), LoginOutcome::Success);
    }

    #[test]
    fn invalid_signup_input_stores_nothing() {
        let mut store = MemoryStore::new();
        let err = signup(&mut store, "a@b.com", "").unwrap_err();
        assert!(matches!(err, AuthError::Credential(CredentialError::InvalidInput(_))));
        assert!(store.is_empty());
    }

    #[test]
    fn malformed_stored_record_surfaces_as_credential_error() {
        let err = login(&BrokenLookup, "a@b.com", "Tentothe6!").unwrap_err();
        assert!(matches!(err, AuthError::Credential(CredentialError::MalformedRecord(_))));
    }

    #[test]
    fn works_through_trait_objects() {
        let mut store = MemoryStore::new();
        let writer: &mut dyn CredentialStore = &mut store;
        signup(writer, "a@b.com", "Tentothe6!").expect("signup should succeed");
        let reader: &dyn CredentialLookup = &store;
        assert_eq!(login(reader, "a@b.com", "Tentothe6!").expect("login runs"), LoginOutcome::Success);
    }
}

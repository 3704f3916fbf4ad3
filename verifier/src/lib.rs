//! Salted credential records for password-like secrets.
//! A record binds an identifier to a random salt and an Argon2id-derived key;
//! verification re-derives the key and compares it in constant time.

pub mod auth;
pub mod config;
pub mod credentials;
pub mod crypto;
pub mod logging;
pub mod record;
pub mod store;

pub use auth::{login, signup, AuthError, LoginOutcome};
pub use credentials::{enroll, verify, CredentialError};
pub use record::CredentialRecord;
pub use store::{CredentialLookup, CredentialStore, JsonFileStore, MemoryStore, StoreError};

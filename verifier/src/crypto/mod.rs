//! Cryptographic building blocks for credential records. Key derivation and
//! comparison live in separate submodules so the record logic never touches
//! raw Argon2 or byte comparison directly.

pub mod compare;
pub mod kdf;

//! Argon2id key derivation for credential records.
//! The configuration is centralized so that enrollment and verification always
//! derive keys with the same memory, iteration, and parallelism parameters.

use argon2::{Algorithm, Argon2, Params, Version};
use rand::rngs::OsRng;
use rand::RngCore;
use zeroize::Zeroizing;

/// Fixed Argon2id parameters. Changing any of these makes every stored record
/// unverifiable, so they are constants rather than configuration.
/// - memory_cost: 19 MiB keeps GPU cracking expensive while remaining server friendly
/// - time_cost: 3 iterations for interactive latency without sacrificing safety
/// - parallelism: 1 thread to keep resource usage predictable on shared hosts
pub const MEMORY_COST_KIB: u32 = 19 * 1024;
pub const TIME_COST: u32 = 3;
pub const PARALLELISM: u32 = 1;

/// Bytes of fresh randomness per enrollment.
pub const SALT_LEN: usize = 16;
/// Length of the derived key stored in every record.
pub const DERIVED_KEY_LEN: usize = 64;

fn argon2_config() -> Result<Argon2<'static>, argon2::Error> {
    let params = Params::new(MEMORY_COST_KIB, TIME_COST, PARALLELISM, Some(DERIVED_KEY_LEN))?;
    Ok(Argon2::new(Algorithm::Argon2id, Version::V0x13, params))
}

/// Draws a new salt from the operating system CSPRNG.
pub fn generate_salt() -> [u8; SALT_LEN] {
    let mut salt = [0u8; SALT_LEN];
    OsRng.fill_bytes(&mut salt);
    salt
}

/// Derives a `DERIVED_KEY_LEN` byte key from a secret and salt. The returned
/// buffer is wiped when dropped.
pub fn derive_key(secret: &[u8], salt: &[u8]) -> Result<Zeroizing<[u8; DERIVED_KEY_LEN]>, argon2::Error> {
    let argon2 = argon2_config()?;
    let mut output = Zeroizing::new([0u8; DERIVED_KEY_LEN]);
    argon2.hash_password_into(secret, salt, &mut output[..])?;
    Ok(output)
}

#[cfg(test)]
mod tests {
    use super::{derive_key, generate_salt, DERIVED_KEY_LEN, SALT_LEN};

    #[test]
    fn derivation_is_deterministic_for_same_inputs() {
        let salt = [9u8; SALT_LEN];
        let first = derive_key(b"Tentothe6!", &salt).expect("derivation should succeed");
        let second = derive_key(b"Tentothe6!", &salt).expect("derivation should succeed");
        assert_eq!(first.len(), DERIVED_KEY_LEN);
        assert_eq!(&first[..], &second[..]);
    }

    #[test]
    fn salt_changes_the_derived_key() {
        let first = derive_key(b"Tentothe6!", &[1u8; SALT_LEN]).expect("derivation should succeed");
        let second = derive_key(b"Tentothe6!", &[2u8; SALT_LEN]).expect("derivation should succeed");
        assert_ne!(&first[..], &second[..]);
    }

    #[test]
    fn salts_are_not_reused() {
        assert_ne!(generate_salt(), generate_salt());
    }

    #[test]
    fn rejects_salt_below_argon2_minimum() {
        assert!(derive_key(b"secret", &[0u8; 4]).is_err());
    }
}

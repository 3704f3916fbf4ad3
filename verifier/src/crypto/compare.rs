//! Constant-time comparison for derived keys. Kept apart from key derivation
//! so callers never reach for `==` on secret material.

use subtle::ConstantTimeEq;

/// Compares two byte slices without an early exit on the first differing
/// byte. Slices of different lengths compare unequal; only the lengths, which
/// are public, influence timing.
pub fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    a.ct_eq(b).into()
}

// Hashing utilities for the ledger

use sha2::{Sha256, Digest};
use crate::core::{Hash256, Canonical};

/// Single SHA256 hash
pub fn sha256(data: &[u8]) -> Hash256 {
    let hash = Sha256::digest(data);
    let mut result = [0u8; 32];
    result.copy_from_slice(&hash);
    Hash256::new(result)
}

/// Digest of a value's canonical form
/// Two values with the same content always hash identically,
/// whatever order their fields were built in.
pub fn digest<T: Canonical + ?Sized>(value: &T) -> Hash256 {
    sha256(value.canonical_string().as_bytes())
}

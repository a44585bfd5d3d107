//! # Hashing Utilities
//!
//! Two hash families, each with one job:
//!
//! - **Double SHA-256**: transaction hashes. A transaction's hash is the
//!   identity its outputs are addressed by, so it follows the familiar
//!   Bitcoin construction.
//! - **BLAKE3**: the UTXO pool's state root. Only ever compared locally, so
//!   we take the faster function.

use sha2::{Digest, Sha256};

use crate::config::HASH_OUTPUT_LENGTH;

/// Compute the SHA-256 hash of the input data.
///
/// # Example
///
/// ```
/// use utxo_ledger::crypto::sha256;
///
/// let hash = sha256(b"settlement");
/// assert_eq!(hash.len(), 32);
/// ```
pub fn sha256(data: &[u8]) -> [u8; HASH_OUTPUT_LENGTH] {
    let mut hasher = Sha256::new();
    hasher.update(data);
    let result = hasher.finalize();
    let mut output = [0u8; HASH_OUTPUT_LENGTH];
    output.copy_from_slice(&result);
    output
}

/// Compute the double-SHA-256 hash: `SHA-256(SHA-256(data))`.
///
/// Used for transaction hashes.
pub fn double_sha256(data: &[u8]) -> [u8; HASH_OUTPUT_LENGTH] {
    sha256(&sha256(data))
}

/// Compute the BLAKE3 hash of the input data.
pub fn blake3_hash(data: &[u8]) -> [u8; HASH_OUTPUT_LENGTH] {
    *blake3::hash(data).as_bytes()
}

/// Hash multiple byte slices as if they were concatenated, without
/// allocating the concatenation.
pub fn blake3_hash_multi(parts: &[&[u8]]) -> [u8; HASH_OUTPUT_LENGTH] {
    let mut hasher = blake3::Hasher::new();
    for part in parts {
        hasher.update(part);
    }
    *hasher.finalize().as_bytes()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sha256_known_vector() {
        assert_eq!(
            hex::encode(sha256(b"hello world")),
            "b94d27b9934d3e08a52e52d7da7dabfac484efe37a5380ee9088f7ace2efcde9"
        );
    }

    #[test]
    fn test_double_sha256_is_hash_of_hash() {
        let data = b"raw transaction bytes";
        assert_eq!(double_sha256(data), sha256(&sha256(data)));
        assert_ne!(double_sha256(data), sha256(data));
    }

    #[test]
    fn test_blake3_different_inputs() {
        assert_ne!(blake3_hash(b"a"), blake3_hash(b"b"));
    }

    #[test]
    fn test_blake3_multi_matches_concatenation() {
        let joined = blake3_hash(b"utxo-pool");
        let split = blake3_hash_multi(&[&b"utxo"[..], &b"-"[..], &b"pool"[..]]);
        assert_eq!(joined, split);
    }
}

//! # Ledger Constants
//!
//! Every fixed parameter the settlement core relies on lives here. There is
//! no runtime configuration surface: the embedding process decides what to
//! feed the handler, and these values only pin down encodings and defaults.

// ---------------------------------------------------------------------------
// Cryptographic Parameters
// ---------------------------------------------------------------------------

/// Signature scheme used for output authorization.
pub const SIGNING_ALGORITHM: &str = "Ed25519";

/// Signing key length in bytes. Ed25519 secret keys are 32 bytes.
pub const SIGNING_KEY_LENGTH: usize = 32;

/// Public (verifying) key length in bytes. This is also the on-ledger size
/// of an output address.
pub const VERIFYING_KEY_LENGTH: usize = 32;

/// Ed25519 signature length. Always 64 bytes.
pub const SIGNATURE_LENGTH: usize = 64;

/// Digest length for transaction hashes and pool roots. SHA-256 and BLAKE3
/// both produce 32 bytes.
pub const HASH_OUTPUT_LENGTH: usize = 32;

// ---------------------------------------------------------------------------
// Logging
// ---------------------------------------------------------------------------

/// Filter used by [`crate::logging::init_logging`] callers that have no
/// opinion of their own. `RUST_LOG` still wins when set.
pub const DEFAULT_LOG_FILTER: &str = "utxo_ledger=info";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_crypto_parameter_sizes() {
        assert_eq!(SIGNING_KEY_LENGTH, 32);
        assert_eq!(VERIFYING_KEY_LENGTH, 32);
        assert_eq!(SIGNATURE_LENGTH, 64);
        assert_eq!(HASH_OUTPUT_LENGTH, 32);
    }

    #[test]
    fn default_filter_targets_this_crate() {
        assert!(DEFAULT_LOG_FILTER.starts_with(env!("CARGO_CRATE_NAME")));
    }
}

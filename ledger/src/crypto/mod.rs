//! # Cryptographic Primitives
//!
//! Thin wrappers over audited implementations:
//!
//! - **Ed25519** (`ed25519-dalek`) for output authorization.
//! - **SHA-256** (`sha2`) for transaction hashes, double-hashed.
//! - **BLAKE3** (`blake3`) for the UTXO pool state root.

pub mod hash;
pub mod keys;
pub mod signatures;

pub use hash::{blake3_hash, blake3_hash_multi, double_sha256, sha256};
pub use keys::{Keypair, PublicKey, Signature};
pub use signatures::{sign, verify};

//! Core value types for ledger transactions.
//!
//! These form the vocabulary shared by the validator, the pool and the
//! handler. Identifiers are `Copy` and compare by value, which is what makes
//! double-spend detection a plain set lookup.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::config::HASH_OUTPUT_LENGTH;
use crate::crypto::keys::{PublicKey, Signature};

/// A value in the ledger's smallest indivisible unit.
///
/// Signed on purpose: a candidate transaction may claim a negative output,
/// and the validator has to be able to see it to reject it. Outputs that
/// make it into a pool are never negative.
pub type Amount = i64;

// ---------------------------------------------------------------------------
// TxHash
// ---------------------------------------------------------------------------

/// Double-SHA-256 content hash of a transaction.
#[derive(Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TxHash([u8; HASH_OUTPUT_LENGTH]);

impl TxHash {
    /// Wrap raw digest bytes.
    pub const fn new(bytes: [u8; HASH_OUTPUT_LENGTH]) -> Self {
        Self(bytes)
    }

    pub fn as_bytes(&self) -> &[u8; HASH_OUTPUT_LENGTH] {
        &self.0
    }

    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }
}

impl fmt::Display for TxHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}

impl fmt::Debug for TxHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TxHash({})", &self.to_hex()[..16])
    }
}

// ---------------------------------------------------------------------------
// UtxoId
// ---------------------------------------------------------------------------

/// Identifies one spendable output: the hash of the transaction that created
/// it and the output's position in that transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct UtxoId {
    /// Hash of the transaction that created the output.
    pub tx_hash: TxHash,
    /// Index of the output within that transaction, starting at 0.
    pub output_index: u32,
}

impl UtxoId {
    pub const fn new(tx_hash: TxHash, output_index: u32) -> Self {
        Self {
            tx_hash,
            output_index,
        }
    }

    /// Fixed-width key bytes: `tx_hash(32) || output_index(u32 LE)`.
    pub fn to_bytes(&self) -> [u8; HASH_OUTPUT_LENGTH + 4] {
        let mut bytes = [0u8; HASH_OUTPUT_LENGTH + 4];
        bytes[..HASH_OUTPUT_LENGTH].copy_from_slice(self.tx_hash.as_bytes());
        bytes[HASH_OUTPUT_LENGTH..].copy_from_slice(&self.output_index.to_le_bytes());
        bytes
    }
}

impl fmt::Display for UtxoId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.tx_hash, self.output_index)
    }
}

// ---------------------------------------------------------------------------
// TxInput / TxOutput
// ---------------------------------------------------------------------------

/// A reference to an output being spent, plus the signature authorizing it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TxInput {
    /// Hash of the transaction whose output is spent.
    pub prev_tx_hash: TxHash,
    /// Index of the spent output in that transaction.
    pub output_index: u32,
    /// Signature over [`super::Transaction::raw_data_to_sign`] for this
    /// input's position. `None` until signed.
    pub signature: Option<Signature>,
}

impl TxInput {
    /// An unsigned input.
    pub fn new(prev_tx_hash: TxHash, output_index: u32) -> Self {
        Self {
            prev_tx_hash,
            output_index,
            signature: None,
        }
    }

    /// The pool identifier this input claims.
    pub fn utxo_id(&self) -> UtxoId {
        UtxoId::new(self.prev_tx_hash, self.output_index)
    }
}

/// A newly created output: a value and the key allowed to spend it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TxOutput {
    pub value: Amount,
    pub address: PublicKey,
}

impl TxOutput {
    pub fn new(value: Amount, address: PublicKey) -> Self {
        Self { value, address }
    }
}

impl fmt::Display for TxOutput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} -> {}", self.value, self.address)
    }
}

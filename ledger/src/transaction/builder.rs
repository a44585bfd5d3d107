//! Transaction structure and construction via the builder pattern.
//!
//! The [`TransactionBuilder`] assembles inputs and outputs and hands back an
//! unsigned [`Transaction`] with its hash already computed. Signing happens
//! in [`super::signing`], which refreshes the hash after every signature.

use serde::{Deserialize, Serialize};

use super::types::{Amount, TxHash, TxInput, TxOutput};
use crate::crypto::hash::double_sha256;
use crate::crypto::keys::PublicKey;

// ---------------------------------------------------------------------------
// Transaction
// ---------------------------------------------------------------------------

/// A ledger transaction: ordered inputs, ordered outputs and a content hash.
///
/// # Canonical Byte Formats
///
/// Two byte layouts are derived from the fields, both using fixed-width
/// little-endian integers so they never depend on a serde backend:
///
/// - [`Transaction::raw_data_to_sign`]: what the signature on input `i`
///   covers: that input's outpoint followed by every output.
/// - [`Transaction::raw_tx`]: what the hash covers: every input including
///   its signature, followed by every output.
///
/// Because the hash covers signatures, a transaction is finalized (its hash
/// recomputed) after signing. New outputs are addressed by
/// `(hash, output_index)`, so the hash of a transaction must not change once
/// it has been submitted.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Transaction {
    /// `double_sha256(raw_tx)` as of the last [`Transaction::finalize`].
    pub hash: TxHash,

    /// Outputs being spent, in order.
    pub inputs: Vec<TxInput>,

    /// Outputs being created, in order. Output `i` becomes the UTXO
    /// `(hash, i)` once the transaction is accepted.
    pub outputs: Vec<TxOutput>,
}

impl Transaction {
    /// A transaction with no inputs and a single output, e.g. for seeding a
    /// genesis pool. It will only ever pass validation with a zero value,
    /// since it spends nothing.
    pub fn coinbase(value: Amount, address: PublicKey) -> Self {
        Self::with_outputs(vec![TxOutput::new(value, address)])
    }

    /// A transaction with no inputs and the given outputs.
    pub fn with_outputs(outputs: Vec<TxOutput>) -> Self {
        let mut tx = Self {
            hash: TxHash::default(),
            inputs: Vec::new(),
            outputs,
        };
        tx.finalize();
        tx
    }

    /// Returns the bytes the signature on input `input_index` must cover:
    /// `prev_tx_hash(32) || output_index(u32 LE)` of that input, then for
    /// every output `value(i64 LE) || address(32)`.
    ///
    /// `None` if `input_index` is out of range.
    pub fn raw_data_to_sign(&self, input_index: usize) -> Option<Vec<u8>> {
        let input = self.inputs.get(input_index)?;

        let mut buf = Vec::with_capacity(36 + self.outputs.len() * 40);
        buf.extend_from_slice(input.prev_tx_hash.as_bytes());
        buf.extend_from_slice(&input.output_index.to_le_bytes());
        self.write_outputs(&mut buf);
        Some(buf)
    }

    /// Returns the canonical byte representation used for the hash.
    ///
    /// Per input: `prev_tx_hash(32) || output_index(u32 LE) || flag(u8)`,
    /// followed by the signature bytes (length-prefixed, u16 LE) when the
    /// flag is `0x01`. Then every output as in
    /// [`Transaction::raw_data_to_sign`].
    pub fn raw_tx(&self) -> Vec<u8> {
        let mut buf = Vec::with_capacity(self.inputs.len() * 104 + self.outputs.len() * 40);

        for input in &self.inputs {
            buf.extend_from_slice(input.prev_tx_hash.as_bytes());
            buf.extend_from_slice(&input.output_index.to_le_bytes());
            match &input.signature {
                Some(sig) => {
                    buf.push(0x01);
                    let bytes = sig.as_bytes();
                    buf.extend_from_slice(&(bytes.len() as u16).to_le_bytes());
                    buf.extend_from_slice(bytes);
                }
                None => buf.push(0x00),
            }
        }

        self.write_outputs(&mut buf);
        buf
    }

    fn write_outputs(&self, buf: &mut Vec<u8>) {
        for output in &self.outputs {
            buf.extend_from_slice(&output.value.to_le_bytes());
            buf.extend_from_slice(output.address.as_bytes());
        }
    }

    /// Computes the hash from the current field values without storing it.
    pub fn compute_hash(&self) -> TxHash {
        TxHash::new(double_sha256(&self.raw_tx()))
    }

    /// Recomputes and stores the hash. Call after any field changes.
    pub fn finalize(&mut self) {
        self.hash = self.compute_hash();
    }

    pub fn hash(&self) -> TxHash {
        self.hash
    }

    pub fn num_inputs(&self) -> usize {
        self.inputs.len()
    }

    pub fn num_outputs(&self) -> usize {
        self.outputs.len()
    }

    /// Sum of all claimed output values. Accumulated in `i128` so no
    /// combination of `i64` values can overflow it.
    pub fn output_total(&self) -> i128 {
        self.outputs.iter().map(|o| o.value as i128).sum()
    }

    /// Returns `true` if every input carries a signature.
    pub fn is_fully_signed(&self) -> bool {
        self.inputs.iter().all(|i| i.signature.is_some())
    }
}

// ---------------------------------------------------------------------------
// TransactionBuilder
// ---------------------------------------------------------------------------

/// Fluent builder for unsigned [`Transaction`] instances.
///
/// ```
/// use utxo_ledger::crypto::Keypair;
/// use utxo_ledger::transaction::{TransactionBuilder, TxHash};
///
/// let bob = Keypair::generate().public_key();
/// let tx = TransactionBuilder::new()
///     .input(TxHash::new([1u8; 32]), 0)
///     .output(10, bob)
///     .build();
///
/// assert_eq!(tx.num_inputs(), 1);
/// assert_eq!(tx.hash, tx.compute_hash());
/// ```
#[derive(Debug, Default)]
pub struct TransactionBuilder {
    inputs: Vec<TxInput>,
    outputs: Vec<TxOutput>,
}

impl TransactionBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends an unsigned input spending `(prev_tx_hash, output_index)`.
    pub fn input(mut self, prev_tx_hash: TxHash, output_index: u32) -> Self {
        self.inputs.push(TxInput::new(prev_tx_hash, output_index));
        self
    }

    /// Appends an output paying `value` to `address`.
    pub fn output(mut self, value: Amount, address: PublicKey) -> Self {
        self.outputs.push(TxOutput::new(value, address));
        self
    }

    /// Finalizes the transaction, computing its hash.
    pub fn build(self) -> Transaction {
        let mut tx = Transaction {
            hash: TxHash::default(),
            inputs: self.inputs,
            outputs: self.outputs,
        };
        tx.finalize();
        tx
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

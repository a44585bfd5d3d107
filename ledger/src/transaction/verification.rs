//! Transaction validity against a UTXO pool.
//!
//! [`validate`] confirms the transaction's hash, then runs the validity
//! checks in a fixed order and reports the first one that fails. [`is_valid`] is the boolean view the epoch handler relies on.
//! Neither touches the pool: validity is a pure function of the transaction
//! and the pool's current contents.

use std::collections::HashSet;

use thiserror::Error;

use super::builder::Transaction;
use super::types::{Amount, TxHash, UtxoId};
use crate::crypto::signatures::verify;
use crate::utxo::UtxoPool;

// ---------------------------------------------------------------------------
// Error types
// ---------------------------------------------------------------------------

/// Why a transaction is not valid against a pool.
///
/// Invalid transactions are expected input, not failures of the ledger, so
/// the handler only ever logs these.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransactionError {
    /// The stored hash is not the double-SHA-256 of the transaction's
    /// canonical bytes. New outputs are addressed by this hash, so it must
    /// be recomputed, never trusted.
    #[error("transaction hash mismatch: expected {expected}, got {actual}")]
    HashMismatch { expected: TxHash, actual: TxHash },

    /// An input references an output that is not in the pool: it never
    /// existed, or it has already been spent.
    #[error("input {input_index} spends {utxo}, which is not in the UTXO pool")]
    MissingUtxo { input_index: usize, utxo: UtxoId },

    /// An input carries no signature.
    #[error("input {input_index} is unsigned")]
    MissingSignature { input_index: usize },

    /// An input's signature does not verify under the spent output's address.
    #[error("input {input_index} has an invalid signature")]
    InvalidSignature { input_index: usize },

    /// Two inputs of the same transaction claim the same output.
    #[error("input {input_index} claims {utxo}, already claimed by an earlier input")]
    DuplicateInput { input_index: usize, utxo: UtxoId },

    /// An output claims a negative value.
    #[error("output {output_index} has negative value {value}")]
    NegativeOutput { output_index: usize, value: Amount },

    /// The outputs create more value than the inputs consume.
    #[error("outputs total {outputs} exceeds inputs total {inputs}")]
    OutputsExceedInputs { inputs: i128, outputs: i128 },

    /// An output would be created under an identifier that is still unspent.
    /// Only an input-less transaction resubmitted while its outputs are
    /// live can reach this.
    #[error("output {output_index} would recreate {utxo}, which is still unspent")]
    OutputExists { output_index: usize, utxo: UtxoId },
}

/// Sums for a transaction that passed every check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ValidatedSpend {
    /// Sum of the pool values of every spent output.
    pub input_total: i128,
    /// Sum of every created output.
    pub output_total: i128,
    /// `input_total - output_total`. Never negative.
    pub fee: i128,
}

// ---------------------------------------------------------------------------
// Verification
// ---------------------------------------------------------------------------

/// Checks `tx` against `pool` and returns the first rule it breaks.
///
/// The hash is checked first: `tx.hash` must equal
/// [`Transaction::compute_hash`]. Then, in order:
///
/// 1. **Inputs exist**: every input's `(prev_tx_hash, output_index)` is in
///    the pool.
/// 2. **Signatures**: every input's signature verifies, over
///    [`Transaction::raw_data_to_sign`] for that input, under the address of
///    the output it spends.
/// 3. **No duplicate inputs**: no output is claimed twice by this
///    transaction.
/// 4. **Non-negative outputs**: no output value is below zero.
/// 5. **Conservation**: the pool values of the spent outputs add up to at
///    least the sum of the outputs. Any surplus is an implicit fee.
/// 6. **Fresh outputs**: no `(tx.hash, i)` is already in the pool.
///
/// A transaction with no inputs passes 1-3 and then fails 5 unless its
/// outputs sum to zero. A transaction with no outputs burns its inputs and
/// is valid.
///
/// # Errors
///
/// Returns the first failing check as a [`TransactionError`].
pub fn validate(tx: &Transaction, pool: &UtxoPool) -> Result<ValidatedSpend, TransactionError> {
    let expected = tx.compute_hash();
    if tx.hash != expected {
        return Err(TransactionError::HashMismatch {
            expected,
            actual: tx.hash,
        });
    }

    // 1. Every referenced output must be unspent. Collect them on the way so
    //    the later checks read the pool's values, not the transaction's.
    let mut spent = Vec::with_capacity(tx.inputs.len());
    for (input_index, input) in tx.inputs.iter().enumerate() {
        let utxo = input.utxo_id();
        let output = pool
            .get(&utxo)
            .ok_or(TransactionError::MissingUtxo { input_index, utxo })?;
        spent.push((utxo, output));
    }

    // 2. Each input is authorized by the key on the output it spends.
    for (input_index, (input, (_, output))) in tx.inputs.iter().zip(&spent).enumerate() {
        let signature = input
            .signature
            .as_ref()
            .ok_or(TransactionError::MissingSignature { input_index })?;
        let payload = tx
            .raw_data_to_sign(input_index)
            .ok_or(TransactionError::InvalidSignature { input_index })?;
        if !verify(&output.address, &payload, signature) {
            return Err(TransactionError::InvalidSignature { input_index });
        }
    }

    // 3. No output claimed twice within this transaction.
    let mut claimed: HashSet<UtxoId> = HashSet::with_capacity(spent.len());
    for (input_index, (utxo, _)) in spent.iter().enumerate() {
        if !claimed.insert(*utxo) {
            return Err(TransactionError::DuplicateInput {
                input_index,
                utxo: *utxo,
            });
        }
    }

    // 4. No negative outputs.
    if let Some((output_index, output)) = tx.outputs.iter().enumerate().find(|(_, o)| o.value < 0)
    {
        return Err(TransactionError::NegativeOutput {
            output_index,
            value: output.value,
        });
    }

    // 5. Conservation. i128 sums cannot overflow for any realistic count of
    //    i64 values.
    let input_total: i128 = spent.iter().map(|(_, o)| o.value as i128).sum();
    let output_total = tx.output_total();
    if output_total > input_total {
        return Err(TransactionError::OutputsExceedInputs {
            inputs: input_total,
            outputs: output_total,
        });
    }

    // 6. Commit must never overwrite a live entry.
    for output_index in 0..tx.outputs.len() {
        let utxo = UtxoId::new(tx.hash, output_index as u32);
        if pool.contains(&utxo) {
            return Err(TransactionError::OutputExists { output_index, utxo });
        }
    }

    Ok(ValidatedSpend {
        input_total,
        output_total,
        fee: input_total - output_total,
    })
}

/// Returns `true` if `tx` passes every check in [`validate`] against `pool`.
pub fn is_valid(tx: &Transaction, pool: &UtxoPool) -> bool {
    validate(tx, pool).is_ok()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

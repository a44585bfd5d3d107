//! Per-input transaction signing with Ed25519 keypairs.
//!
//! Every input is signed separately, over
//! [`Transaction::raw_data_to_sign`] for its own index, by the key that owns
//! the output it spends. Different inputs of one transaction may therefore
//! be signed by different parties.

use thiserror::Error;

use super::builder::Transaction;
use crate::crypto::keys::Keypair;

/// Errors from the signing helpers. These are caller mistakes, not
/// properties of the transaction being signed.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SigningError {
    /// The requested input does not exist.
    #[error("input index {index} out of range: transaction has {num_inputs} inputs")]
    InputOutOfRange { index: usize, num_inputs: usize },
}

/// Signs input `input_index` of `tx` with `keypair` and refreshes the hash.
///
/// Signing input `i` does not invalidate signatures on other inputs, because
/// the signed payload excludes signatures. It does change `tx.hash`.
pub fn sign_input(
    tx: &mut Transaction,
    input_index: usize,
    keypair: &Keypair,
) -> Result<(), SigningError> {
    let payload = tx
        .raw_data_to_sign(input_index)
        .ok_or(SigningError::InputOutOfRange {
            index: input_index,
            num_inputs: tx.num_inputs(),
        })?;

    tx.inputs[input_index].signature = Some(keypair.sign(&payload));
    tx.finalize();
    Ok(())
}

/// Signs every input with the same keypair. Convenience for spends where a
/// single owner holds all consumed outputs. Refreshes the hash once at the
/// end.
pub fn sign_all_inputs(tx: &mut Transaction, keypair: &Keypair) {
    for index in 0..tx.num_inputs() {
        if let Some(payload) = tx.raw_data_to_sign(index) {
            tx.inputs[index].signature = Some(keypair.sign(&payload));
        }
    }
    tx.finalize();
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

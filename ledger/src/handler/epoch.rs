//! # Epoch Handler
//!
//! The [`TxHandler`] turns "a batch of proposed transactions" into "the
//! transactions this epoch accepts" and advances its UTXO pool to match.
//!
//! ## Pipeline
//!
//! ```text
//! for each candidate, in the order given:
//!   1. DEDUP     skip if a transaction with this hash was accepted this epoch
//!   2. VALIDATE  check the hash, then the validity rules against the *current* pool
//!   3. COMMIT    remove every spent UTXO, then insert every new output
//! ```
//!
//! Rejected candidates are dropped with no effect on the pool. There is no
//! partial application: a candidate is either fully committed or untouched.
//!
//! ## Acceptance policy
//!
//! Each candidate is judged against the pool *as updated by every earlier
//! acceptance in the same batch*. Of two candidates spending the same
//! output, whichever comes first wins and the other fails the
//! inputs-exist check. A candidate may also spend an output created by an
//! earlier candidate of the same batch. The result is a deterministic greedy
//! pass, not a maximum-size or maximum-value subset, and callers that care
//! about which conflicting transaction wins must order the batch themselves.

use std::collections::HashSet;

use tracing::{debug, info, trace};

use crate::transaction::builder::Transaction;
use crate::transaction::types::{TxHash, UtxoId};
use crate::transaction::verification::{validate, TransactionError, ValidatedSpend};
use crate::utxo::UtxoPool;

// ---------------------------------------------------------------------------
// Outcome types
// ---------------------------------------------------------------------------

/// What happened to one candidate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TxResult {
    /// Hash of the candidate.
    pub tx_hash: TxHash,
    /// Whether it was accepted and committed.
    pub accepted: bool,
    /// Human-readable rejection reason. `None` when accepted.
    pub reason: Option<String>,
}

/// The full result of one epoch.
#[derive(Debug, Clone, Default)]
pub struct EpochOutcome {
    /// Epoch number, starting at 1 for the first batch a handler processes.
    pub epoch: u64,
    /// Accepted transactions, in acceptance order, with no duplicates.
    pub accepted: Vec<Transaction>,
    /// One entry per candidate, in candidate order.
    pub results: Vec<TxResult>,
    /// Sum of the implicit fees (input surplus) of accepted transactions.
    pub total_fees: i128,
}

impl EpochOutcome {
    /// Number of candidates that were not accepted.
    pub fn rejected_count(&self) -> usize {
        self.results.iter().filter(|r| !r.accepted).count()
    }
}

// ---------------------------------------------------------------------------
// TxHandler
// ---------------------------------------------------------------------------

/// Settles batches of candidate transactions against a privately owned
/// UTXO pool.
///
/// `handle_txs` takes `&mut self`, so one handler can never run two epochs
/// at once. To share a handler across threads, see
/// [`super::SharedTxHandler`].
#[derive(Debug, Clone)]
pub struct TxHandler {
    /// The handler's own copy of the ledger state.
    pool: UtxoPool,

    /// Number of completed epochs.
    epoch: u64,
}

impl TxHandler {
    /// Creates a handler whose ledger starts as a copy of `utxo_pool`.
    ///
    /// The copy is taken here, so later changes the caller makes to their
    /// own pool are never seen by the handler.
    pub fn new(utxo_pool: &UtxoPool) -> Self {
        info!(utxos = utxo_pool.len(), "transaction handler created");
        Self {
            pool: utxo_pool.clone(),
            epoch: 0,
        }
    }

    /// Returns `true` if `tx` is valid against the handler's current pool.
    pub fn is_valid_tx(&self, tx: &Transaction) -> bool {
        self.validate_tx(tx).is_ok()
    }

    /// Like [`TxHandler::is_valid_tx`], but reports which check failed.
    pub fn validate_tx(&self, tx: &Transaction) -> Result<ValidatedSpend, TransactionError> {
        validate(tx, &self.pool)
    }

    /// Processes one epoch and returns the accepted transactions, in
    /// acceptance order. The pool afterwards reflects exactly these
    /// acceptances.
    pub fn handle_txs(&mut self, candidates: &[Transaction]) -> Vec<Transaction> {
        self.handle_txs_detailed(candidates).accepted
    }

    /// Processes one epoch and reports the fate of every candidate.
    pub fn handle_txs_detailed(&mut self, candidates: &[Transaction]) -> EpochOutcome {
        self.epoch += 1;
        let epoch = self.epoch;

        info!(
            epoch,
            candidates = candidates.len(),
            utxos = self.pool.len(),
            "starting epoch"
        );

        let mut accepted_hashes: HashSet<TxHash> = HashSet::with_capacity(candidates.len());
        let mut outcome = EpochOutcome {
            epoch,
            accepted: Vec::new(),
            results: Vec::with_capacity(candidates.len()),
            total_fees: 0,
        };

        for tx in candidates {
            // Same hash as something already committed this epoch: applying
            // it again would replay its pool effects, so skip before
            // touching anything.
            if accepted_hashes.contains(&tx.hash) {
                debug!(epoch, tx_hash = %tx.hash, "duplicate candidate skipped");
                outcome.results.push(TxResult {
                    tx_hash: tx.hash,
                    accepted: false,
                    reason: Some("duplicate of a transaction accepted this epoch".to_string()),
                });
                continue;
            }

            match validate(tx, &self.pool) {
                Ok(spend) => {
                    self.commit(tx);
                    accepted_hashes.insert(tx.hash);
                    outcome.total_fees += spend.fee;
                    outcome.accepted.push(tx.clone());
                    outcome.results.push(TxResult {
                        tx_hash: tx.hash,
                        accepted: true,
                        reason: None,
                    });
                }
                Err(e) => {
                    debug!(
                        epoch,
                        tx_hash = %tx.hash,
                        error = %e,
                        "transaction rejected"
                    );
                    outcome.results.push(TxResult {
                        tx_hash: tx.hash,
                        accepted: false,
                        reason: Some(e.to_string()),
                    });
                }
            }
        }

        info!(
            epoch,
            accepted = outcome.accepted.len(),
            rejected = outcome.rejected_count(),
            total_fees = %outcome.total_fees,
            utxos = self.pool.len(),
            "epoch complete"
        );

        outcome
    }

    /// Applies an already-validated transaction to the pool: spent outputs
    /// out, new outputs in.
    ///
    /// # Panics
    ///
    /// If a spent output is missing or a created output already exists.
    /// Validation just confirmed every input is present and every new
    /// identifier is free, so either means the handler's own bookkeeping is
    /// broken.
    fn commit(&mut self, tx: &Transaction) {
        for input in &tx.inputs {
            let utxo = input.utxo_id();
            if self.pool.remove(&utxo).is_none() {
                panic!(
                    "UTXO pool invariant violated: {} spent by {} was validated but is missing",
                    utxo, tx.hash
                );
            }
            trace!(%utxo, tx_hash = %tx.hash, "utxo spent");
        }

        for (index, output) in tx.outputs.iter().enumerate() {
            let utxo = UtxoId::new(tx.hash, index as u32);
            if self.pool.insert(utxo, output.clone()).is_some() {
                panic!(
                    "UTXO pool invariant violated: {} created by {} was already unspent",
                    utxo, tx.hash
                );
            }
            trace!(%utxo, value = output.value, "utxo created");
        }
    }

    /// The handler's current pool.
    pub fn utxo_pool(&self) -> &UtxoPool {
        &self.pool
    }

    /// Consumes the handler and returns its pool.
    pub fn into_utxo_pool(self) -> UtxoPool {
        self.pool
    }

    /// Number of epochs processed so far.
    pub fn epoch(&self) -> u64 {
        self.epoch
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

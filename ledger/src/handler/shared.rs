//! Thread-safe wrapper around [`TxHandler`].

use std::sync::Arc;

use parking_lot::Mutex;

use super::epoch::{EpochOutcome, TxHandler};
use crate::transaction::builder::Transaction;
use crate::utxo::UtxoPool;

/// A cloneable handle to one [`TxHandler`].
///
/// The lock is held for the whole of `handle_txs`, so epochs submitted from
/// different threads are serialized and never interleave.
#[derive(Debug, Clone)]
pub struct SharedTxHandler {
    inner: Arc<Mutex<TxHandler>>,
}

impl SharedTxHandler {
    /// Creates a shared handler whose ledger starts as a copy of
    /// `utxo_pool`.
    pub fn new(utxo_pool: &UtxoPool) -> Self {
        Self::from_handler(TxHandler::new(utxo_pool))
    }

    /// Wraps an existing handler, keeping its pool and epoch count.
    pub fn from_handler(handler: TxHandler) -> Self {
        Self {
            inner: Arc::new(Mutex::new(handler)),
        }
    }

    /// Validity against the current pool. Waits for any running epoch.
    pub fn is_valid_tx(&self, tx: &Transaction) -> bool {
        self.inner.lock().is_valid_tx(tx)
    }

    /// Runs one epoch under the lock. See [`TxHandler::handle_txs`].
    pub fn handle_txs(&self, candidates: &[Transaction]) -> Vec<Transaction> {
        self.inner.lock().handle_txs(candidates)
    }

    /// Runs one epoch under the lock. See
    /// [`TxHandler::handle_txs_detailed`].
    pub fn handle_txs_detailed(&self, candidates: &[Transaction]) -> EpochOutcome {
        self.inner.lock().handle_txs_detailed(candidates)
    }

    /// A copy of the current pool, taken under the lock.
    pub fn snapshot(&self) -> UtxoPool {
        self.inner.lock().utxo_pool().clone()
    }

    /// Number of epochs processed so far, across every clone.
    pub fn epoch(&self) -> u64 {
        self.inner.lock().epoch()
    }
}

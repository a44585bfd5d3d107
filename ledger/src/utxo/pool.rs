//! # UTXO Pool
//!
//! The set of currently spendable outputs, keyed by [`UtxoId`]. Membership
//! is the only authority on whether an output can be spent.
//!
//! The pool is plain data: it performs no validation and has no locking of
//! its own. The [`crate::handler::TxHandler`] owns one and is the only thing
//! that mutates it during settlement.
//!
//! ## State root
//!
//! [`UtxoPool::root_hash`] commits to the full contents:
//!
//! ```text
//! leaves = [ BLAKE3(utxo_id_bytes || value || address) for entries sorted by id ]
//! root   = merkle_root(leaves)
//! ```
//!
//! Sorting makes the root independent of insertion order, so two pools with
//! the same entries always agree.

use std::collections::hash_map::{self, HashMap};

use crate::crypto::hash::{blake3_hash, blake3_hash_multi};
use crate::transaction::types::{TxOutput, UtxoId};

/// In-memory mapping from unspent-output identifier to the output.
///
/// `Clone` yields a fully independent copy; nothing is shared between the
/// clone and the original.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UtxoPool {
    utxos: HashMap<UtxoId, TxOutput>,
}

impl UtxoPool {
    /// Create a new empty pool.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `true` if `utxo` is currently spendable.
    pub fn contains(&self, utxo: &UtxoId) -> bool {
        self.utxos.contains_key(utxo)
    }

    /// The output recorded for `utxo`, if it is unspent.
    pub fn get(&self, utxo: &UtxoId) -> Option<&TxOutput> {
        self.utxos.get(utxo)
    }

    /// Insert an output, overwriting and returning any previous entry under
    /// the same identifier. Callers are responsible for uniqueness.
    pub fn insert(&mut self, utxo: UtxoId, output: TxOutput) -> Option<TxOutput> {
        self.utxos.insert(utxo, output)
    }

    /// Remove an output, returning it. `None` means it was not in the pool,
    /// which callers that expect presence must treat as a broken invariant.
    pub fn remove(&mut self, utxo: &UtxoId) -> Option<TxOutput> {
        self.utxos.remove(utxo)
    }

    pub fn len(&self) -> usize {
        self.utxos.len()
    }

    pub fn is_empty(&self) -> bool {
        self.utxos.is_empty()
    }

    /// Iterate over all entries in arbitrary order.
    pub fn iter(&self) -> hash_map::Iter<'_, UtxoId, TxOutput> {
        self.utxos.iter()
    }

    /// Every identifier in the pool, sorted.
    pub fn all_utxos(&self) -> Vec<UtxoId> {
        let mut ids: Vec<UtxoId> = self.utxos.keys().copied().collect();
        ids.sort_unstable();
        ids
    }

    /// Sum of all output values in the pool.
    pub fn total_value(&self) -> i128 {
        self.utxos.values().map(|o| o.value as i128).sum()
    }

    /// Merkle root over the sorted entries. An empty pool returns `[0u8; 32]`.
    pub fn root_hash(&self) -> [u8; 32] {
        if self.utxos.is_empty() {
            return [0u8; 32];
        }

        let mut entries: Vec<(&UtxoId, &TxOutput)> = self.utxos.iter().collect();
        entries.sort_unstable_by_key(|(id, _)| **id);

        let mut level: Vec<[u8; 32]> = entries
            .iter()
            .map(|(id, output)| {
                blake3_hash_multi(&[
                    &id.to_bytes()[..],
                    &output.value.to_le_bytes()[..],
                    &output.address.as_bytes()[..],
                ])
            })
            .collect();

        while level.len() > 1 {
            let mut next_level = Vec::with_capacity((level.len() + 1) / 2);
            for chunk in level.chunks(2) {
                let mut combined = Vec::with_capacity(64);
                combined.extend_from_slice(&chunk[0]);
                // Odd node out is paired with itself.
                combined.extend_from_slice(chunk.get(1).unwrap_or(&chunk[0]));
                next_level.push(blake3_hash(&combined));
            }
            level = next_level;
        }

        level[0]
    }
}

impl FromIterator<(UtxoId, TxOutput)> for UtxoPool {
    fn from_iter<I: IntoIterator<Item = (UtxoId, TxOutput)>>(iter: I) -> Self {
        Self {
            utxos: iter.into_iter().collect(),
        }
    }
}

impl<'a> IntoIterator for &'a UtxoPool {
    type Item = (&'a UtxoId, &'a TxOutput);
    type IntoIter = hash_map::Iter<'a, UtxoId, TxOutput>;

    fn into_iter(self) -> Self::IntoIter {
        self.utxos.iter()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

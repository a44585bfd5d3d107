// Copyright (c) 2026 ALAS Technology. MIT License.
// See LICENSE for details.

//! # UTXO Ledger: Epoch Settlement Core
//!
//! Value lives in unspent transaction outputs. Each output is locked to an
//! Ed25519 public key, and spending it takes a signature from the matching
//! secret key. Once per epoch a batch of proposed transactions arrives, and
//! the [`TxHandler`] picks a subset that can all be applied together, then
//! moves its UTXO pool forward to match.
//!
//! ## Architecture
//!
//! - **crypto**: hashing and Ed25519 keys. Thin wrappers, nothing clever.
//! - **transaction**: transaction types, canonical bytes, signing, and the
//!   hash and validity checks.
//! - **utxo**: the pool of spendable outputs.
//! - **handler**: per-epoch acceptance and commit.
//! - **logging**: `tracing` subscriber setup for embedding binaries.
//! - **config**: fixed constants.
//!
//! ## Quick tour
//!
//! ```
//! use utxo_ledger::crypto::Keypair;
//! use utxo_ledger::transaction::{sign_all_inputs, TransactionBuilder, TxHash, TxOutput, UtxoId};
//! use utxo_ledger::{TxHandler, UtxoPool};
//!
//! let alice = Keypair::from_seed(&[1u8; 32]);
//! let bob = Keypair::from_seed(&[2u8; 32]);
//!
//! let genesis = UtxoId::new(TxHash::new([0xEE; 32]), 0);
//! let mut pool = UtxoPool::new();
//! pool.insert(genesis, TxOutput::new(10, alice.public_key()));
//!
//! let mut tx = TransactionBuilder::new()
//!     .input(genesis.tx_hash, genesis.output_index)
//!     .output(10, bob.public_key())
//!     .build();
//! sign_all_inputs(&mut tx, &alice);
//!
//! let mut handler = TxHandler::new(&pool);
//! assert_eq!(handler.handle_txs(&[tx.clone()]), vec![tx.clone()]);
//! assert!(handler.utxo_pool().contains(&UtxoId::new(tx.hash, 0)));
//! ```

pub mod config;
pub mod crypto;
pub mod handler;
pub mod logging;
pub mod transaction;
pub mod utxo;

pub use handler::{EpochOutcome, SharedTxHandler, TxHandler, TxResult};
pub use transaction::{Transaction, TransactionError};
pub use utxo::UtxoPool;

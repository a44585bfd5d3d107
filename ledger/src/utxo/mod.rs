//! # UTXO Module
//!
//! Storage of unspent transaction outputs. Currently a single in-memory
//! [`UtxoPool`]; persistence belongs to whoever embeds the ledger.

pub mod pool;

pub use pool::UtxoPool;

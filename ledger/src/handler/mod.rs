//! # Handler Module
//!
//! Epoch settlement: takes an unordered batch of candidate transactions,
//! accepts a mutually consistent subset, and advances the UTXO pool.
//!
//! ```text
//! epoch.rs   TxHandler, the per-epoch accept/commit loop
//! shared.rs  SharedTxHandler, a lock-guarded handle for multi-threaded callers
//! ```

pub mod epoch;
pub mod shared;

pub use epoch::{EpochOutcome, TxHandler, TxResult};
pub use shared::SharedTxHandler;

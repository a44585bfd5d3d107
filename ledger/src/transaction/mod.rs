//! # Transaction Module
//!
//! Construction, signing and validity checking of ledger transactions.
//!
//! ## Architecture
//!
//! ```text
//! types.rs         Value types (TxHash, UtxoId, TxInput, TxOutput, Amount)
//! builder.rs       Transaction, its canonical bytes, and TransactionBuilder
//! signing.rs       Per-input Ed25519 signing
//! verification.rs  Hash integrity and the validity checks against a UtxoPool
//! ```
//!
//! ## Transaction Lifecycle
//!
//! 1. **Build**: [`TransactionBuilder`] assembles inputs and outputs.
//! 2. **Sign**: [`sign_input`] once per input, by the owner of the spent
//!    output (or [`sign_all_inputs`] when one key owns them all).
//! 3. **Submit**: hand it to [`crate::handler::TxHandler::handle_txs`] as
//!    part of an epoch's batch.
//! 4. **Verify**: the handler runs [`validate`] against its pool.

pub mod builder;
pub mod signing;
pub mod types;
pub mod verification;

pub use builder::{Transaction, TransactionBuilder};
pub use signing::{sign_all_inputs, sign_input, SigningError};
pub use types::{Amount, TxHash, TxInput, TxOutput, UtxoId};
pub use verification::{is_valid, validate, TransactionError, ValidatedSpend};

//! # Digital Signatures
//!
//! The one signature question the settlement core ever asks: does this
//! signature, over this payload, verify under the key recorded on the output
//! being spent? Everything funnels through [`verify`] so there is a single
//! place to audit.
//!
//! Verification uses `ed25519-dalek` strict mode, so invalid points and
//! small-order keys verify nothing.

use super::keys::{Keypair, PublicKey, Signature};

/// Sign a message with a keypair.
///
/// # Example
///
/// ```
/// use utxo_ledger::crypto::{sign, verify, Keypair};
///
/// let keypair = Keypair::generate();
/// let message = b"spend output 0 of abcd";
/// let signature = sign(&keypair, message);
///
/// assert!(verify(&keypair.public_key(), message, &signature));
/// ```
pub fn sign(keypair: &Keypair, message: &[u8]) -> Signature {
    keypair.sign(message)
}

/// Verify an Ed25519 signature against a public key and message.
///
/// Returns `true` if the signature is valid, `false` otherwise. Invalid
/// keys, truncated signatures and mismatches all collapse to `false`.
pub fn verify(public_key: &PublicKey, message: &[u8], signature: &Signature) -> bool {
    public_key.verify(message, signature)
}

//! End-to-end settlement scenarios.
//!
//! Each test builds its own pool from fixed seeds, drives one or more
//! epochs through a `TxHandler`, and inspects the resulting pool directly.

use std::thread;

use utxo_ledger::crypto::Keypair;
use utxo_ledger::transaction::{
    is_valid, sign_all_inputs, sign_input, validate, Transaction, TransactionBuilder,
    TransactionError, TxHash, TxOutput, UtxoId,
};
use utxo_ledger::{SharedTxHandler, TxHandler, UtxoPool};

// ---------------------------------------------------------------------------
// Test Helpers
// ---------------------------------------------------------------------------

struct Parties {
    alice: Keypair,
    bob: Keypair,
    carol: Keypair,
}

fn parties() -> Parties {
    Parties {
        alice: Keypair::from_seed(&[1u8; 32]),
        bob: Keypair::from_seed(&[2u8; 32]),
        carol: Keypair::from_seed(&[3u8; 32]),
    }
}

/// Pool holding a single genesis output U1 = (10, alice).
fn genesis_pool(p: &Parties) -> (UtxoPool, UtxoId) {
    let u1 = UtxoId::new(TxHash::new([0xEE; 32]), 0);
    let mut pool = UtxoPool::new();
    pool.insert(u1, TxOutput::new(10, p.alice.public_key()));
    (pool, u1)
}

/// One-input transaction spending `utxo`, signed by `signer`.
fn spend(signer: &Keypair, utxo: UtxoId, outputs: &[(i64, &Keypair)]) -> Transaction {
    let mut builder = TransactionBuilder::new().input(utxo.tx_hash, utxo.output_index);
    for (value, owner) in outputs {
        builder = builder.output(*value, owner.public_key());
    }
    let mut tx = builder.build();
    sign_all_inputs(&mut tx, signer);
    tx
}

// ---------------------------------------------------------------------------
// Reference scenarios
// ---------------------------------------------------------------------------

#[test]
fn simple_transfer_moves_value() {
    let p = parties();
    let (pool, u1) = genesis_pool(&p);
    let tx1 = spend(&p.alice, u1, &[(10, &p.bob)]);

    let mut handler = TxHandler::new(&pool);
    assert_eq!(handler.handle_txs(&[tx1.clone()]), vec![tx1.clone()]);

    let after = handler.utxo_pool();
    assert!(!after.contains(&u1));
    assert_eq!(after.len(), 1);
    assert_eq!(
        after.get(&UtxoId::new(tx1.hash, 0)),
        Some(&TxOutput::new(10, p.bob.public_key()))
    );
}

#[test]
fn double_spend_in_one_epoch_first_wins() {
    let p = parties();
    let (pool, u1) = genesis_pool(&p);
    let tx1 = spend(&p.alice, u1, &[(10, &p.bob)]);
    let tx2 = spend(&p.alice, u1, &[(5, &p.carol), (5, &p.alice)]);

    let mut forward = TxHandler::new(&pool);
    assert_eq!(forward.handle_txs(&[tx1.clone(), tx2.clone()]), vec![tx1.clone()]);
    assert!(forward.utxo_pool().contains(&UtxoId::new(tx1.hash, 0)));
    assert!(!forward.utxo_pool().contains(&UtxoId::new(tx2.hash, 0)));

    let mut backward = TxHandler::new(&pool);
    assert_eq!(backward.handle_txs(&[tx2.clone(), tx1.clone()]), vec![tx2.clone()]);
    assert!(backward.utxo_pool().contains(&UtxoId::new(tx2.hash, 0)));
    assert!(backward.utxo_pool().contains(&UtxoId::new(tx2.hash, 1)));
    assert!(!backward.utxo_pool().contains(&UtxoId::new(tx1.hash, 0)));
}

#[test]
fn overspend_is_rejected() {
    let p = parties();
    let (pool, u1) = genesis_pool(&p);
    let tx3 = spend(&p.alice, u1, &[(6, &p.bob), (5, &p.carol)]);

    match validate(&tx3, &pool) {
        Err(TransactionError::OutputsExceedInputs { inputs, outputs }) => {
            assert_eq!(inputs, 10);
            assert_eq!(outputs, 11);
        }
        other => panic!("expected OutputsExceedInputs, got {:?}", other),
    }

    let mut handler = TxHandler::new(&pool);
    assert!(handler.handle_txs(&[tx3]).is_empty());
    assert_eq!(handler.utxo_pool(), &pool);
}

#[test]
fn wrong_key_is_rejected() {
    let p = parties();
    let (pool, u1) = genesis_pool(&p);
    let tx4 = spend(&p.bob, u1, &[(10, &p.bob)]);

    match validate(&tx4, &pool) {
        Err(TransactionError::InvalidSignature { input_index: 0 }) => {}
        other => panic!("expected InvalidSignature, got {:?}", other),
    }

    let mut handler = TxHandler::new(&pool);
    assert!(handler.handle_txs(&[tx4]).is_empty());
    assert!(handler.utxo_pool().contains(&u1));
}

// ---------------------------------------------------------------------------
// Multi-epoch behavior
// ---------------------------------------------------------------------------

#[test]
fn spent_output_stays_spent_across_epochs() {
    let p = parties();
    let (pool, u1) = genesis_pool(&p);
    let tx1 = spend(&p.alice, u1, &[(10, &p.bob)]);

    let mut handler = TxHandler::new(&pool);
    assert_eq!(handler.handle_txs(&[tx1.clone()]).len(), 1);

    // Resubmitting the same transaction, or any other spend of U1, fails.
    let again = spend(&p.alice, u1, &[(3, &p.carol)]);
    assert!(handler.handle_txs(&[tx1.clone(), again]).is_empty());
    assert_eq!(handler.epoch(), 2);

    // Bob can spend what he received in a later epoch.
    let onward = spend(&p.bob, UtxoId::new(tx1.hash, 0), &[(4, &p.carol), (6, &p.bob)]);
    assert_eq!(handler.handle_txs(&[onward.clone()]), vec![onward.clone()]);
    assert_eq!(handler.utxo_pool().len(), 2);
    assert_eq!(handler.utxo_pool().total_value(), 10);
}

#[test]
fn invalid_candidates_are_rejected_again_in_later_epochs() {
    let p = parties();
    let (pool, u1) = genesis_pool(&p);
    let tx3 = spend(&p.alice, u1, &[(6, &p.bob), (5, &p.carol)]);
    let tx4 = spend(&p.bob, u1, &[(10, &p.bob)]);

    let mut handler = TxHandler::new(&pool);
    let root = handler.utxo_pool().root_hash();

    for _ in 0..2 {
        let outcome = handler.handle_txs_detailed(&[tx3.clone(), tx4.clone()]);
        assert!(outcome.accepted.is_empty());
        assert_eq!(outcome.rejected_count(), 2);
        assert_eq!(handler.utxo_pool().root_hash(), root);
    }
    assert_eq!(handler.epoch(), 2);
    assert!(handler.utxo_pool().contains(&u1));
}

#[test]
fn rewritten_hash_cannot_replace_anothers_output() {
    let p = parties();
    let (mut pool, u1) = genesis_pool(&p);
    let own = UtxoId::new(TxHash::new([0x77; 32]), 0);
    pool.insert(own, TxOutput::new(1, p.carol.public_key()));

    let mut forged = spend(&p.carol, own, &[(1, &p.carol)]);
    forged.hash = u1.tx_hash;

    match validate(&forged, &pool) {
        Err(TransactionError::HashMismatch { expected, actual }) => {
            assert_eq!(expected, forged.compute_hash());
            assert_eq!(actual, u1.tx_hash);
        }
        other => panic!("expected HashMismatch, got {:?}", other),
    }

    let mut handler = TxHandler::new(&pool);
    assert!(handler.handle_txs(&[forged]).is_empty());
    assert_eq!(handler.utxo_pool(), &pool);
    assert_eq!(handler.utxo_pool().total_value(), 11);
}

#[test]
fn chained_spend_in_one_epoch() {
    let p = parties();
    let (pool, u1) = genesis_pool(&p);
    let parent = spend(&p.alice, u1, &[(10, &p.bob)]);
    let child = spend(&p.bob, UtxoId::new(parent.hash, 0), &[(8, &p.carol)]);

    let mut handler = TxHandler::new(&pool);
    let accepted = handler.handle_txs(&[parent.clone(), child.clone()]);
    assert_eq!(accepted, vec![parent, child.clone()]);

    let ids = handler.utxo_pool().all_utxos();
    assert_eq!(ids, vec![UtxoId::new(child.hash, 0)]);
    assert_eq!(handler.utxo_pool().total_value(), 8);
}

#[test]
fn handler_does_not_see_callers_pool_mutations() {
    let p = parties();
    let (mut pool, u1) = genesis_pool(&p);
    let mut handler = TxHandler::new(&pool);

    pool.remove(&u1);
    pool.insert(
        UtxoId::new(TxHash::new([0x11; 32]), 0),
        TxOutput::new(1_000, p.carol.public_key()),
    );

    let tx1 = spend(&p.alice, u1, &[(10, &p.bob)]);
    assert!(handler.is_valid_tx(&tx1));
    assert!(!is_valid(&tx1, &pool));
    assert_eq!(handler.handle_txs(&[tx1.clone()]), vec![tx1]);
}

#[test]
fn is_valid_tx_is_pure() {
    let p = parties();
    let (pool, u1) = genesis_pool(&p);
    let handler = TxHandler::new(&pool);
    let tx1 = spend(&p.alice, u1, &[(10, &p.bob)]);

    let root = handler.utxo_pool().root_hash();
    assert!(handler.is_valid_tx(&tx1));
    assert!(handler.is_valid_tx(&tx1));
    assert_eq!(handler.utxo_pool().root_hash(), root);
    assert_eq!(handler.epoch(), 0);
}

// ---------------------------------------------------------------------------
// Multi-input transactions
// ---------------------------------------------------------------------------

#[test]
fn multi_owner_inputs_need_each_owners_signature() {
    let p = parties();
    let ua = UtxoId::new(TxHash::new([0xA0; 32]), 0);
    let ub = UtxoId::new(TxHash::new([0xB0; 32]), 3);
    let pool: UtxoPool = vec![
        (ua, TxOutput::new(6, p.alice.public_key())),
        (ub, TxOutput::new(4, p.bob.public_key())),
    ]
    .into_iter()
    .collect();

    let mut tx = TransactionBuilder::new()
        .input(ua.tx_hash, ua.output_index)
        .input(ub.tx_hash, ub.output_index)
        .output(9, p.carol.public_key())
        .build();
    sign_input(&mut tx, 0, &p.alice).unwrap();

    match validate(&tx, &pool) {
        Err(TransactionError::MissingSignature { input_index: 1 }) => {}
        other => panic!("expected MissingSignature, got {:?}", other),
    }

    sign_input(&mut tx, 1, &p.bob).unwrap();
    let validated = validate(&tx, &pool).unwrap();
    assert_eq!(validated.input_total, 10);
    assert_eq!(validated.fee, 1);

    let mut handler = TxHandler::new(&pool);
    let outcome = handler.handle_txs_detailed(&[tx.clone()]);
    assert_eq!(outcome.accepted, vec![tx]);
    assert_eq!(outcome.total_fees, 1);
    assert_eq!(handler.utxo_pool().total_value(), 9);
}

#[test]
fn unknown_input_among_valid_ones_rejects_whole_transaction() {
    let p = parties();
    let (pool, u1) = genesis_pool(&p);
    let ghost = UtxoId::new(TxHash::new([0x42; 32]), 7);

    let mut tx = TransactionBuilder::new()
        .input(u1.tx_hash, u1.output_index)
        .input(ghost.tx_hash, ghost.output_index)
        .output(1, p.bob.public_key())
        .build();
    sign_all_inputs(&mut tx, &p.alice);

    let mut handler = TxHandler::new(&pool);
    let outcome = handler.handle_txs_detailed(&[tx]);
    assert!(outcome.accepted.is_empty());
    assert!(outcome.results[0].reason.as_deref().unwrap().contains("not in the UTXO pool"));
    assert!(handler.utxo_pool().contains(&u1));
}

// ---------------------------------------------------------------------------
// Concurrency
// ---------------------------------------------------------------------------

#[test]
fn shared_handler_accepts_each_output_once() {
    let p = parties();
    let (pool, u1) = genesis_pool(&p);
    let shared = SharedTxHandler::new(&pool);

    let candidates: Vec<Transaction> = (1..=8)
        .map(|v| spend(&p.alice, u1, &[(v, &p.bob)]))
        .collect();

    let handles: Vec<_> = candidates
        .into_iter()
        .map(|tx| {
            let shared = shared.clone();
            thread::spawn(move || shared.handle_txs(&[tx]).len())
        })
        .collect();

    let accepted: usize = handles.into_iter().map(|h| h.join().unwrap()).sum();
    assert_eq!(accepted, 1);
    assert_eq!(shared.epoch(), 8);

    let snapshot = shared.snapshot();
    assert!(!snapshot.contains(&u1));
    assert_eq!(snapshot.len(), 1);
}

//! Integration tests for block-chain maintenance: fork choice, cutoff
//! enforcement, and whole-block atomicity

mod common;

use common::{block_on, genesis, keypair, signed_spend};
use utxo_ledger::{Block, BlockChain, LedgerError, Transaction, Utxo, CUT_OFF_AGE};

#[test]
fn test_scenario_a_spend_genesis_coinbase() {
    let (alice_sk, alice_pk) = keypair(1);
    let (_, bob_pk) = keypair(2);
    let genesis = genesis(10, alice_pk.clone());
    let mut chain = BlockChain::new(genesis.clone());

    // Alice splits her 10 into 4 + 4, paying a fee of 2
    let tx = signed_spend(
        &[(genesis.coinbase.hash(), 0, &alice_sk)],
        &[(alice_pk, 4), (bob_pk, 4)],
    );
    let block = block_on(genesis.hash(), 3, vec![tx.clone()]);

    assert!(chain.add_block(block.clone()));
    assert_eq!(chain.max_height(), 1);
    assert_eq!(chain.max_height_block(), &block);

    let pool = chain.max_height_utxo_pool();
    assert!(!pool.contains(&Utxo::new(genesis.coinbase.hash(), 0)));
    assert_eq!(pool.output(&Utxo::new(tx.hash(), 0)).unwrap().value, 4);
    assert_eq!(pool.output(&Utxo::new(tx.hash(), 1)).unwrap().value, 4);
    assert!(pool.contains(&Utxo::new(block.coinbase.hash(), 0)));
}

#[test]
fn test_scenario_b_double_claim_block_rejected() {
    let (alice_sk, alice_pk) = keypair(1);
    let genesis = genesis(10, alice_pk.clone());
    let mut chain = BlockChain::new(genesis.clone());

    // Both inputs reference the same UTXO
    let coinbase_hash = genesis.coinbase.hash();
    let tx = signed_spend(
        &[(coinbase_hash, 0, &alice_sk), (coinbase_hash, 0, &alice_sk)],
        &[(alice_pk, 12)],
    );
    let block = block_on(genesis.hash(), 3, vec![tx]);

    assert!(!chain.add_block(block));
    assert_eq!(chain.max_height(), 0);
    assert_eq!(chain.node_count(), 1);
    assert!(chain
        .max_height_utxo_pool()
        .contains(&Utxo::new(coinbase_hash, 0)));
}

#[test]
fn test_scenario_c_genesis_unreachable_past_cutoff() {
    let (_, alice_pk) = keypair(1);
    let genesis = genesis(10, alice_pk);
    let mut chain = BlockChain::new(genesis.clone());

    let mut parent = genesis.hash();
    for height in 1..=CUT_OFF_AGE + 1 {
        let block = block_on(parent, height as u8 + 2, vec![]);
        parent = block.hash();
        assert!(chain.add_block(block));
    }
    assert_eq!(chain.max_height(), 11);

    let late = block_on(genesis.hash(), 99, vec![]);
    assert_eq!(
        chain.try_add_block(late.clone()),
        Err(LedgerError::ParentBeyondCutoff {
            parent_height: 0,
            max_height: 11,
        })
    );
    assert!(!chain.add_block(late));
    assert_eq!(chain.max_height(), 11);
}

#[test]
fn test_cutoff_boundary_parent_still_extendable() {
    let (_, alice_pk) = keypair(1);
    let genesis = genesis(10, alice_pk);
    let mut chain = BlockChain::new(genesis.clone());

    // At max height 10 the genesis node still satisfies
    // height >= max_height - CUT_OFF_AGE
    let mut parent = genesis.hash();
    for height in 1..=CUT_OFF_AGE {
        let block = block_on(parent, height as u8 + 2, vec![]);
        parent = block.hash();
        assert!(chain.add_block(block));
    }
    assert_eq!(chain.max_height(), 10);

    assert!(chain.add_block(block_on(genesis.hash(), 99, vec![])));
    assert_eq!(chain.max_height(), 10);
}

#[test]
fn test_tip_monotonicity_across_forks() {
    let (_, alice_pk) = keypair(1);
    let genesis = genesis(10, alice_pk);
    let mut chain = BlockChain::new(genesis.clone());

    let a1 = block_on(genesis.hash(), 2, vec![]);
    assert!(chain.add_block(a1.clone()));
    assert_eq!(chain.max_height(), 1);

    // Fork off genesis; same height, tip unchanged
    let b1 = block_on(genesis.hash(), 3, vec![]);
    assert!(chain.add_block(b1.clone()));
    assert_eq!(chain.max_height(), 1);
    assert_eq!(chain.max_height_block(), &a1);

    // Fork grows past the original branch and takes the tip
    let b2 = block_on(b1.hash(), 4, vec![]);
    assert!(chain.add_block(b2.clone()));
    assert_eq!(chain.max_height(), 2);
    assert_eq!(chain.max_height_block(), &b2);

    // A rejected block never moves the tip
    assert!(!chain.add_block(block_on([0u8; 32], 5, vec![])));
    assert_eq!(chain.max_height(), 2);
}

#[test]
fn test_block_acceptance_is_all_or_nothing() {
    let (alice_sk, alice_pk) = keypair(1);
    let (_, bob_pk) = keypair(2);
    let genesis = genesis(10, alice_pk.clone());
    let mut chain = BlockChain::new(genesis.clone());

    let coinbase_hash = genesis.coinbase.hash();
    let good = signed_spend(&[(coinbase_hash, 0, &alice_sk)], &[(bob_pk.clone(), 8)]);
    // Conflicts with `good`: the batch handler would drop it, so the block
    // is not entirely mutually valid
    let conflicting = signed_spend(&[(coinbase_hash, 0, &alice_sk)], &[(bob_pk, 7)]);

    let block = block_on(genesis.hash(), 3, vec![good, conflicting]);
    assert_eq!(
        chain.try_add_block(block),
        Err(LedgerError::InvalidBlockTransactions {
            accepted: 1,
            submitted: 2,
        })
    );

    // Nothing was applied: the contested UTXO is still spendable
    assert_eq!(chain.max_height(), 0);
    assert_eq!(chain.node_count(), 1);
    assert!(chain
        .max_height_utxo_pool()
        .contains(&Utxo::new(coinbase_hash, 0)));
}

#[test]
fn test_fork_spends_are_isolated() {
    let (alice_sk, alice_pk) = keypair(1);
    let (_, bob_pk) = keypair(2);
    let (_, carol_pk) = keypair(3);
    let genesis = genesis(10, alice_pk);
    let mut chain = BlockChain::new(genesis.clone());

    let coinbase_hash = genesis.coinbase.hash();
    let to_bob = signed_spend(&[(coinbase_hash, 0, &alice_sk)], &[(bob_pk, 10)]);
    let to_carol = signed_spend(&[(coinbase_hash, 0, &alice_sk)], &[(carol_pk, 10)]);

    // The same coinbase is spent differently on two competing branches;
    // each branch validates against its own parent snapshot
    assert!(chain.add_block(block_on(genesis.hash(), 4, vec![to_bob])));
    assert!(chain.add_block(block_on(genesis.hash(), 5, vec![to_carol])));
    assert_eq!(chain.node_count(), 3);
}

#[test]
fn test_transaction_pool_flow() {
    let (alice_sk, alice_pk) = keypair(1);
    let (_, bob_pk) = keypair(2);
    let genesis = genesis(10, alice_pk.clone());
    let mut chain = BlockChain::new(genesis.clone());

    let tx = signed_spend(&[(genesis.coinbase.hash(), 0, &alice_sk)], &[(bob_pk, 8)]);
    chain.add_transaction(tx.clone());
    assert_eq!(chain.transaction_pool().len(), 1);

    // Mine the pending transactions atop the tip
    let pending = chain.transaction_pool().transactions();
    let mut block = Block::new(
        Some(chain.max_height_block().hash()),
        Transaction::coinbase(25, alice_pk),
    );
    for tx in pending {
        block.add_transaction(tx);
    }
    block.finalize();

    assert!(chain.add_block(block));
    assert!(chain.transaction_pool().is_empty());
    assert!(!chain
        .max_height_utxo_pool()
        .contains(&Utxo::new(genesis.coinbase.hash(), 0)));
    assert!(chain
        .max_height_utxo_pool()
        .contains(&Utxo::new(tx.hash(), 0)));
}

#[test]
fn test_memory_stays_bounded_over_long_chain() {
    let (_, alice_pk) = keypair(1);
    let genesis = genesis(10, alice_pk);
    let mut chain = BlockChain::new(genesis.clone());

    let mut parent = genesis.hash();
    for height in 1..=40u64 {
        let block = block_on(parent, (height % 200) as u8 + 2, vec![]);
        parent = block.hash();
        assert!(chain.add_block(block));
    }

    assert_eq!(chain.max_height(), 40);
    // One full cutoff window plus the retained expired generation
    assert_eq!(chain.node_count(), CUT_OFF_AGE as usize + 2);
}

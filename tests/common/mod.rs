//! Shared builders for integration tests

#![allow(dead_code)]

use secp256k1::{PublicKey as SecpPublicKey, Secp256k1, SecretKey};
use utxo_ledger::{Block, Hash, PublicKey, Transaction, Value, COINBASE_VALUE};

/// Deterministic keypair derived from a seed byte (1..=255)
pub fn keypair(seed: u8) -> (SecretKey, PublicKey) {
    let secp = Secp256k1::new();
    let sk = SecretKey::from_slice(&[seed; 32]).unwrap();
    let pk = SecpPublicKey::from_secret_key(&secp, &sk);
    (sk, pk.serialize().to_vec())
}

/// Genesis block minting `value` to `recipient`
pub fn genesis(value: Value, recipient: PublicKey) -> Block {
    let mut block = Block::new(None, Transaction::coinbase(value, recipient));
    block.finalize();
    block
}

/// Finalized transaction spending the given outpoints into the given
/// outputs, each input signed with its owner's key
pub fn signed_spend(
    spends: &[(Hash, u32, &SecretKey)],
    outputs: &[(PublicKey, Value)],
) -> Transaction {
    let mut tx = Transaction::new();
    for (hash, index, _) in spends {
        tx.add_input(*hash, *index);
    }
    for (recipient, value) in outputs {
        tx.add_output(*value, recipient.clone());
    }
    for (i, (_, _, sk)) in spends.iter().enumerate() {
        tx.sign_input(sk, i);
    }
    tx.finalize();
    tx
}

/// Block extending `parent`, mined to the key for `miner_seed`
pub fn block_on(parent: Hash, miner_seed: u8, txs: Vec<Transaction>) -> Block {
    let (_, miner_pk) = keypair(miner_seed);
    let mut block = Block::new(Some(parent), Transaction::coinbase(COINBASE_VALUE, miner_pk));
    for tx in txs {
        block.add_transaction(tx);
    }
    block.finalize();
    block
}

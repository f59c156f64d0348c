//! Holding area for transactions not yet committed to a block

use std::collections::HashMap;

use crate::types::{Hash, Transaction};

/// Pending transactions keyed by content hash.
///
/// No validity is enforced at insertion time; validation happens when a block
/// carrying the transaction is proposed.
#[derive(Debug, Clone, Default)]
pub struct TransactionPool {
    txs: HashMap<Hash, Transaction>,
}

impl TransactionPool {
    pub fn new() -> Self {
        Self {
            txs: HashMap::new(),
        }
    }

    pub fn add(&mut self, tx: Transaction) {
        self.txs.insert(tx.hash(), tx);
    }

    pub fn remove(&mut self, hash: &Hash) {
        self.txs.remove(hash);
    }

    pub fn get(&self, hash: &Hash) -> Option<&Transaction> {
        self.txs.get(hash)
    }

    pub fn contains(&self, hash: &Hash) -> bool {
        self.txs.contains_key(hash)
    }

    /// Snapshot of the pending transactions, for assembling a block
    pub fn transactions(&self) -> Vec<Transaction> {
        self.txs.values().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.txs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.txs.is_empty()
    }
}

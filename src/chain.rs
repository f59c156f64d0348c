//! Block-chain maintenance: node storage, fork choice, finality cutoff

use std::collections::HashMap;

use log::debug;

use crate::constants::CUT_OFF_AGE;
use crate::error::{LedgerError, Result};
use crate::handler::TxHandler;
use crate::mempool::TransactionPool;
use crate::types::{Block, Hash, Transaction, Utxo};
use crate::utxo_pool::UtxoPool;

/// Block plus its chain position and the UTXO pool as of that block.
/// Immutable once constructed; the pool snapshot is never mutated after the
/// node is stored.
#[derive(Debug, Clone)]
struct ChainNode {
    block: Block,
    height: u64,
    pool: UtxoPool,
}

/// Chain of recently seen blocks with per-node UTXO snapshots.
///
/// Keeps every node within `CUT_OFF_AGE` heights of the best tip, resolves
/// forks by first-to-reach-a-height, and delegates per-block transaction
/// validation to [`TxHandler`]. Nodes that fall permanently below the cutoff
/// can never again be valid parents and are evicted to bound memory.
pub struct BlockChain {
    nodes: HashMap<Hash, ChainNode>,
    max_height_hash: Hash,
    tx_pool: TransactionPool,
}

impl BlockChain {
    /// Create a chain holding just `genesis` at height 0.
    ///
    /// Genesis is trusted unconditionally: its coinbase outputs seed the UTXO
    /// pool and its transaction list is not validated.
    pub fn new(genesis: Block) -> Self {
        let mut pool = UtxoPool::new();
        register_coinbase(&genesis, &mut pool);

        let hash = genesis.hash();
        let node = ChainNode {
            block: genesis,
            height: 0,
            pool,
        };
        let mut nodes = HashMap::new();
        nodes.insert(hash, node);

        Self {
            nodes,
            max_height_hash: hash,
            tx_pool: TransactionPool::new(),
        }
    }

    /// Add `block` if it is valid: its parent must be a known node within
    /// `CUT_OFF_AGE` of the best tip, and its transaction list must be
    /// entirely mutually valid against the parent's pool. Returns whether the
    /// block was stored; on rejection the chain is untouched.
    pub fn add_block(&mut self, block: Block) -> bool {
        match self.try_add_block(block) {
            Ok(height) => {
                debug!("stored block at height {height}");
                true
            }
            Err(err) => {
                debug!("rejected block: {err}");
                false
            }
        }
    }

    /// [`add_block`](Self::add_block) with the rejection reason, returning
    /// the new node's height on success
    pub fn try_add_block(&mut self, block: Block) -> Result<u64> {
        // A block without a parent reference is another genesis; only one is
        // ever accepted.
        let parent_hash = block
            .prev_block_hash
            .ok_or(LedgerError::MissingParentReference)?;

        let parent = self
            .nodes
            .get(&parent_hash)
            .ok_or(LedgerError::UnknownParent(parent_hash))?;

        let max_height = self.nodes[&self.max_height_hash].height;
        if parent.height + CUT_OFF_AGE < max_height {
            return Err(LedgerError::ParentBeyondCutoff {
                parent_height: parent.height,
                max_height,
            });
        }

        // All-or-nothing at the block level: the handler is permissive per
        // batch, so compare counts to detect any dropped transaction.
        let mut handler = TxHandler::new(&parent.pool);
        let accepted = handler.handle_txs(&block.transactions);
        if accepted.len() < block.transactions.len() {
            return Err(LedgerError::InvalidBlockTransactions {
                accepted: accepted.len(),
                submitted: block.transactions.len(),
            });
        }

        let height = parent.height + 1;
        let mut pool = handler.into_pool();
        register_coinbase(&block, &mut pool);

        for tx in &block.transactions {
            self.tx_pool.remove(&tx.hash());
        }

        let hash = block.hash();
        self.nodes.insert(
            hash,
            ChainNode {
                block,
                height,
                pool,
            },
        );
        if height > max_height {
            self.max_height_hash = hash;
        }
        self.evict_below_cutoff();

        Ok(height)
    }

    /// Insert `tx` into the pending pool. No validation happens here;
    /// validation is deferred to block acceptance.
    pub fn add_transaction(&mut self, tx: Transaction) {
        self.tx_pool.add(tx);
    }

    /// The block at the current best tip
    pub fn max_height_block(&self) -> &Block {
        &self.nodes[&self.max_height_hash].block
    }

    /// Height of the current best tip
    pub fn max_height(&self) -> u64 {
        self.nodes[&self.max_height_hash].height
    }

    /// Independent copy of the best tip's UTXO pool, suitable for mining a
    /// new block on top of it. Mutating it does not affect chain state.
    pub fn max_height_utxo_pool(&self) -> UtxoPool {
        self.nodes[&self.max_height_hash].pool.clone()
    }

    /// The pool of pending transactions, for assembling a new block
    pub fn transaction_pool(&self) -> &TransactionPool {
        &self.tx_pool
    }

    /// Number of stored chain nodes
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Drop nodes that can no longer be valid parents. A parent at height
    /// below `max_height - CUT_OFF_AGE` is rejected by the cutoff rule, and
    /// the cutoff is monotonic in `max_height`, so such nodes are permanently
    /// unreachable. The newest expired generation is kept one round longer so
    /// extending it reports a cutoff rejection rather than an unknown parent.
    fn evict_below_cutoff(&mut self) {
        let max_height = self.nodes[&self.max_height_hash].height;
        if max_height <= CUT_OFF_AGE + 1 {
            return;
        }
        let floor = max_height - CUT_OFF_AGE - 1;
        self.nodes.retain(|_, node| node.height >= floor);
    }
}

/// Register the coinbase outputs of `block` as spendable in `pool`
fn register_coinbase(block: &Block, pool: &mut UtxoPool) {
    let coinbase = &block.coinbase;
    for (i, output) in coinbase.outputs.iter().enumerate() {
        pool.add(Utxo::new(coinbase.hash(), i as u32), output.clone());
    }
}

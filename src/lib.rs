//! # utxo-ledger
//!
//! Ledger-validity core of a toy blockchain: transaction validation against
//! an unspent-output set, and block-chain maintenance with fork resolution
//! bounded by a finality cutoff.
//!
//! ## Architecture
//!
//! - [`UtxoPool`]: the spendable-value snapshot at a chain position
//! - [`TxHandler`]: per-transaction validity and mutually valid batch
//!   selection over a pool snapshot
//! - [`BlockChain`]: node storage keyed by block hash, max-height tracking,
//!   the `CUT_OFF_AGE` finality rule, and eviction of unreachable nodes
//! - [`TransactionPool`]: pending transactions awaiting block assembly
//!
//! A new block is validated against its parent node's pool copy; on success
//! the chain stores a new node with its own independent pool snapshot, which
//! is what keeps competing forks isolated.
//!
//! Cryptographic primitives are collaborators, not part of this core:
//! signatures are ECDSA over secp256k1 and hashing is SHA-256, both assumed
//! correct. Networking, mining, and persistence live elsewhere.
//!
//! ## Usage
//!
//! ```
//! use secp256k1::{PublicKey, Secp256k1, SecretKey};
//! use utxo_ledger::{Block, BlockChain, Transaction};
//!
//! let secp = Secp256k1::new();
//! let alice_sk = SecretKey::from_slice(&[7u8; 32]).unwrap();
//! let alice_pk = PublicKey::from_secret_key(&secp, &alice_sk).serialize().to_vec();
//! let bob_sk = SecretKey::from_slice(&[8u8; 32]).unwrap();
//! let bob_pk = PublicKey::from_secret_key(&secp, &bob_sk).serialize().to_vec();
//! # drop(bob_sk);
//!
//! // Genesis mints 10 coins to Alice.
//! let mut genesis = Block::new(None, Transaction::coinbase(10, alice_pk.clone()));
//! genesis.finalize();
//! let mut chain = BlockChain::new(genesis.clone());
//!
//! // Alice pays Bob 8; the remaining 2 are an implicit fee.
//! let mut tx = Transaction::new();
//! tx.add_input(genesis.coinbase.hash(), 0);
//! tx.add_output(8, bob_pk);
//! tx.sign_input(&alice_sk, 0);
//! tx.finalize();
//!
//! let mut block = Block::new(Some(genesis.hash()), Transaction::coinbase(25, alice_pk));
//! block.add_transaction(tx);
//! block.finalize();
//!
//! assert!(chain.add_block(block));
//! assert_eq!(chain.max_height(), 1);
//! ```

pub mod chain;
pub mod constants;
pub mod crypto;
pub mod error;
pub mod handler;
pub mod mempool;
pub mod types;
pub mod utxo_pool;

pub use chain::BlockChain;
pub use constants::{COINBASE_VALUE, CUT_OFF_AGE};
pub use error::{LedgerError, Result};
pub use handler::TxHandler;
pub use mempool::TransactionPool;
pub use types::{Block, Hash, Input, Output, PublicKey, Signature, Transaction, Utxo, Value};
pub use utxo_pool::UtxoPool;

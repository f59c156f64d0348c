//! Transaction validation against an unspent-output set

use std::collections::HashSet;

use log::trace;

use crate::crypto;
use crate::types::{Transaction, Utxo};
use crate::utxo_pool::UtxoPool;

/// Validates candidate transactions against a UTXO pool snapshot and selects
/// mutually valid batches.
///
/// The handler owns its own copy of the pool it was seeded with, so running a
/// batch never disturbs the caller's snapshot.
pub struct TxHandler {
    pool: UtxoPool,
}

impl TxHandler {
    /// Create a handler over an independent copy of `pool`
    pub fn new(pool: &UtxoPool) -> Self {
        Self { pool: pool.clone() }
    }

    /// A transaction is valid iff all of the following hold:
    /// 1. every input references a UTXO present in the pool,
    /// 2. every input's signature verifies against the referenced output's
    ///    recipient key over this transaction's signable payload,
    /// 3. no UTXO is claimed more than once by the transaction,
    /// 4. every output value is non-negative, and
    /// 5. the sum of input values covers the sum of output values (the
    ///    difference is an implicit fee).
    ///
    /// Pure read-only check; the pool is not mutated.
    pub fn is_valid_tx(&self, tx: &Transaction) -> bool {
        let mut claimed: HashSet<&Utxo> = HashSet::new();
        let mut input_total: i128 = 0;

        for (i, input) in tx.inputs.iter().enumerate() {
            // rule 1
            let output = match self.pool.output(&input.prevout) {
                Ok(output) => output,
                Err(_) => return false,
            };

            // rule 2
            if !crypto::verify_signature(
                &output.recipient,
                &tx.signable_payload(i),
                &input.signature,
            ) {
                return false;
            }

            // rule 3
            if !claimed.insert(&input.prevout) {
                return false;
            }

            input_total += i128::from(output.value);
        }

        let mut output_total: i128 = 0;
        for output in &tx.outputs {
            // rule 4
            if output.value < 0 {
                return false;
            }
            output_total += i128::from(output.value);
        }

        // rule 5
        input_total >= output_total
    }

    /// Process a batch of proposed transactions in their given order,
    /// accepting each one that is still valid against the pool as mutated by
    /// the acceptances before it. First in input order wins a contested UTXO;
    /// rejected transactions are dropped silently.
    pub fn handle_txs(&mut self, possible_txs: &[Transaction]) -> Vec<Transaction> {
        let mut accepted = Vec::new();

        for tx in possible_txs {
            if !self.is_valid_tx(tx) {
                trace!("dropping invalid transaction {:02x?}", &tx.hash()[..4]);
                continue;
            }

            for input in &tx.inputs {
                self.pool.remove(&input.prevout);
            }
            for (i, output) in tx.outputs.iter().enumerate() {
                self.pool.add(Utxo::new(tx.hash(), i as u32), output.clone());
            }
            accepted.push(tx.clone());
        }

        accepted
    }

    pub fn pool(&self) -> &UtxoPool {
        &self.pool
    }

    pub fn into_pool(self) -> UtxoPool {
        self.pool
    }
}

//! The unspent-output set: the spendable value snapshot at a chain position

use std::collections::HashMap;

use crate::error::{LedgerError, Result};
use crate::types::{Output, Utxo};

/// Mapping from unspent-output reference to the output it denotes.
///
/// Every key denotes an output not yet consumed by any transaction accepted
/// into this pool's lineage. `Clone` produces a fully independent deep copy
/// (all values are owned); each chain node takes its own copy on
/// construction, which is what keeps forks isolated from one another.
#[derive(Debug, Clone, Default)]
pub struct UtxoPool {
    utxos: HashMap<Utxo, Output>,
}

impl UtxoPool {
    pub fn new() -> Self {
        Self {
            utxos: HashMap::new(),
        }
    }

    /// Insert or overwrite the output recorded for `utxo`
    pub fn add(&mut self, utxo: Utxo, output: Output) {
        self.utxos.insert(utxo, output);
    }

    /// Delete `utxo` from the pool. Silent no-op when absent; removal paths
    /// only run for keys already proven present by a validity check.
    pub fn remove(&mut self, utxo: &Utxo) {
        self.utxos.remove(utxo);
    }

    pub fn contains(&self, utxo: &Utxo) -> bool {
        self.utxos.contains_key(utxo)
    }

    /// Look up the output recorded for `utxo`
    pub fn output(&self, utxo: &Utxo) -> Result<&Output> {
        self.utxos
            .get(utxo)
            .ok_or_else(|| LedgerError::UtxoNotFound(utxo.clone()))
    }

    pub fn utxos(&self) -> impl Iterator<Item = &Utxo> {
        self.utxos.keys()
    }

    pub fn len(&self) -> usize {
        self.utxos.len()
    }

    pub fn is_empty(&self) -> bool {
        self.utxos.is_empty()
    }
}

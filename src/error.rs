//! Error types for ledger validation

use thiserror::Error;

use crate::types::{Hash, Utxo};

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LedgerError {
    #[error("UTXO not found: {0:?}")]
    UtxoNotFound(Utxo),

    #[error("block carries no previous-block reference")]
    MissingParentReference,

    #[error("parent block not in chain: {0:02x?}")]
    UnknownParent(Hash),

    #[error("parent at height {parent_height} is beyond the cutoff at max height {max_height}")]
    ParentBeyondCutoff { parent_height: u64, max_height: u64 },

    #[error("block transactions not mutually valid: accepted {accepted} of {submitted}")]
    InvalidBlockTransactions { accepted: usize, submitted: usize },
}

pub type Result<T> = std::result::Result<T, LedgerError>;

//! Core ledger types: unspent-output references, outputs, transactions, blocks

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::crypto;

/// Hash type: 256-bit content hash
pub type Hash = [u8; 32];

/// Coin value in base units
pub type Value = i64;

/// Serialized secp256k1 public key
pub type PublicKey = Vec<u8>;

/// DER-encoded ECDSA signature
pub type Signature = Vec<u8>;

/// Reference to an unspent transaction output: the creating transaction's
/// hash plus the output's position in it. Equality and hashing are by both
/// fields, which is what makes it usable as the pool key.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Utxo {
    pub tx_hash: Hash,
    pub output_index: u32,
}

impl Utxo {
    pub fn new(tx_hash: Hash, output_index: u32) -> Self {
        Self {
            tx_hash,
            output_index,
        }
    }
}

/// Spendable output: a value locked to a recipient's public key
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Output {
    pub recipient: PublicKey,
    pub value: Value,
}

/// Claim on a prior output. The signature must verify against the referenced
/// output's recipient key over this transaction's signable payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Input {
    pub prevout: Utxo,
    pub signature: Signature,
}

/// Transaction: ordered inputs, ordered outputs, content hash.
///
/// The content hash covers every input's outpoint and every output, but no
/// signatures: signatures are themselves computed over a per-input payload,
/// so including them in the hashed content would be circular.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    pub inputs: Vec<Input>,
    pub outputs: Vec<Output>,
    hash: Hash,
}

impl Transaction {
    pub fn new() -> Self {
        Self {
            inputs: Vec::new(),
            outputs: Vec::new(),
            hash: [0u8; 32],
        }
    }

    /// Coinbase transaction: no inputs, a single minted output
    pub fn coinbase(value: Value, recipient: PublicKey) -> Self {
        let mut tx = Self::new();
        tx.add_output(value, recipient);
        tx.finalize();
        tx
    }

    pub fn add_input(&mut self, prev_tx_hash: Hash, output_index: u32) {
        self.inputs.push(Input {
            prevout: Utxo::new(prev_tx_hash, output_index),
            signature: Vec::new(),
        });
    }

    pub fn add_output(&mut self, value: Value, recipient: PublicKey) {
        self.outputs.push(Output { recipient, value });
    }

    /// Data signed for input `input_index`: that input's referenced outpoint
    /// plus every output. Scoping the payload per input keeps one input's
    /// signature from covering another's.
    ///
    /// Panics if `input_index` is out of range; callers construct transactions
    /// and own that contract.
    pub fn signable_payload(&self, input_index: usize) -> Vec<u8> {
        let input = &self.inputs[input_index];
        let mut payload = Vec::new();
        payload.extend_from_slice(&input.prevout.tx_hash);
        payload.extend_from_slice(&input.prevout.output_index.to_le_bytes());
        for output in &self.outputs {
            payload.extend_from_slice(&output.value.to_le_bytes());
            payload.extend_from_slice(&output.recipient);
        }
        payload
    }

    /// Sign input `input_index` with `secret_key`, storing the signature
    pub fn sign_input(&mut self, secret_key: &secp256k1::SecretKey, input_index: usize) {
        let signature = crypto::sign(secret_key, &self.signable_payload(input_index));
        self.inputs[input_index].signature = signature;
    }

    /// Compute and store the content hash. Stable once all inputs and outputs
    /// are set; signing afterwards does not change it.
    pub fn finalize(&mut self) {
        let mut hasher = Sha256::new();
        for input in &self.inputs {
            hasher.update(input.prevout.tx_hash);
            hasher.update(input.prevout.output_index.to_le_bytes());
        }
        for output in &self.outputs {
            hasher.update(output.value.to_le_bytes());
            hasher.update(&output.recipient);
        }
        let result = hasher.finalize();
        self.hash.copy_from_slice(&result);
    }

    pub fn hash(&self) -> Hash {
        self.hash
    }

    pub fn is_coinbase(&self) -> bool {
        self.inputs.is_empty()
    }
}

impl Default for Transaction {
    fn default() -> Self {
        Self::new()
    }
}

/// Block: previous-block reference (`None` only for genesis), a coinbase
/// transaction minting new value, and the list of regular transactions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Block {
    pub prev_block_hash: Option<Hash>,
    pub coinbase: Transaction,
    pub transactions: Vec<Transaction>,
    hash: Hash,
}

impl Block {
    pub fn new(prev_block_hash: Option<Hash>, coinbase: Transaction) -> Self {
        Self {
            prev_block_hash,
            coinbase,
            transactions: Vec::new(),
            hash: [0u8; 32],
        }
    }

    pub fn add_transaction(&mut self, tx: Transaction) {
        self.transactions.push(tx);
    }

    /// Compute and store the block hash over the previous-block reference,
    /// the coinbase, and every transaction. Call after assembly is complete.
    pub fn finalize(&mut self) {
        let mut data = Vec::new();
        data.extend_from_slice(&self.prev_block_hash.unwrap_or([0u8; 32]));
        data.extend_from_slice(&self.coinbase.hash());
        for tx in &self.transactions {
            data.extend_from_slice(&tx.hash());
        }
        self.hash = crypto::hash256(&data);
    }

    pub fn hash(&self) -> Hash {
        self.hash
    }
}

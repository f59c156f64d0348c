//! Cryptographic collaborators: ECDSA signature checks and content hashing
//!
//! Signatures are ECDSA over secp256k1, taken over the SHA-256 digest of the
//! message. Block identifiers use double SHA-256; transaction identifiers and
//! signable payloads use single SHA-256.

use bitcoin_hashes::{sha256d, Hash as BitcoinHash, HashEngine};
use secp256k1::ecdsa::Signature as EcdsaSignature;
use secp256k1::{Message, PublicKey, Secp256k1, SecretKey};
use sha2::{Digest, Sha256};

use crate::types::Hash;

/// Verify an ECDSA signature over `message` against a serialized public key.
///
/// Pure and total: a malformed key or signature verifies as `false` rather
/// than raising an error, since invalid claims are routine input here.
pub fn verify_signature(pubkey_bytes: &[u8], message: &[u8], signature_bytes: &[u8]) -> bool {
    let pubkey = match PublicKey::from_slice(pubkey_bytes) {
        Ok(pk) => pk,
        Err(_) => return false,
    };

    let signature = match EcdsaSignature::from_der(signature_bytes) {
        Ok(sig) => sig,
        Err(_) => return false,
    };

    let secp = Secp256k1::verification_only();
    secp.verify_ecdsa(&message_digest(message), &signature, &pubkey)
        .is_ok()
}

/// Sign `message` with `secret_key`, returning the DER-encoded signature
pub fn sign(secret_key: &SecretKey, message: &[u8]) -> Vec<u8> {
    let secp = Secp256k1::new();
    secp.sign_ecdsa(&message_digest(message), secret_key)
        .serialize_der()
        .to_vec()
}

/// Single SHA-256
pub fn sha256(data: &[u8]) -> Hash {
    let mut hasher = Sha256::new();
    hasher.update(data);
    let result = hasher.finalize();
    let mut hash = [0u8; 32];
    hash.copy_from_slice(&result);
    hash
}

/// Double SHA-256, used for block identifiers
pub fn hash256(data: &[u8]) -> Hash {
    let mut hasher = sha256d::Hash::engine();
    hasher.input(data);
    let result = sha256d::Hash::from_engine(hasher);
    let mut hash = [0u8; 32];
    hash.copy_from_slice(&result);
    hash
}

fn message_digest(message: &[u8]) -> Message {
    // SHA-256 digests are always 32 bytes, so this cannot fail
    Message::from_digest_slice(&sha256(message)).unwrap()
}

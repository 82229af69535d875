//! Cryptographic operations for crlhide.
//!
//! This module provides:
//! - The payload digest (SHA-256) attached to the terminal record
//! - Issuer key generation, storage and signing (Ed25519)

pub mod signing;

pub use signing::{
    decode_signing_key_pem, decode_verifying_key_pem, encode_signing_key_pem,
    encode_verifying_key_pem, load_signing_key, load_verifying_key, private_key_path,
    public_key_path, sign_message, verify_signature, IssuerKeyPair, SigningError,
};

use sha2::{Digest, Sha256};

/// Length of the payload digest in bytes.
pub const DIGEST_LEN: usize = 32;

/// Computes the SHA-256 digest of a payload.
pub fn payload_digest(payload: &[u8]) -> [u8; DIGEST_LEN] {
    Sha256::digest(payload).into()
}

//! Payload encoding into revocation records.
//!
//! This module turns a payload into the ordered record list that ends up in
//! the CRL:
//! 1. Split the payload into `chunk_size` pieces
//! 2. Prepend the marker byte to each piece and use it as a serial number
//! 3. Hash the whole payload
//! 4. Emit the (possibly empty) remainder as the terminal record, carrying
//!    the digest as an extension
//!
//! The terminal record always exists. When the payload length is an exact
//! multiple of the chunk size it holds only the marker byte and the digest.

use thiserror::Error;
use tracing::{debug, info};

use crate::crypto::payload_digest;
use crate::record::{DigestExtension, Record, DEFAULT_REVOCATION_TIME, DIGEST_EXTENSION_OID};
use crate::DEFAULT_CHUNK_SIZE;

/// Errors that can occur during encoding.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum EncoderError {
    #[error("Invalid chunk size: {0} (must be greater than zero)")]
    InvalidChunkSize(usize),
}

/// Configuration for the encoder.
///
/// `chunk_size` is a protocol parameter: the recovering side must be told
/// the same value out of band.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncoderConfig {
    /// Payload bytes per record.
    pub chunk_size: usize,
    /// Revocation timestamp stamped on every record.
    pub revocation_time: u64,
    /// OID of the digest extension.
    pub digest_oid: String,
    /// Criticality of the digest extension.
    pub digest_critical: bool,
}

impl Default for EncoderConfig {
    fn default() -> Self {
        Self {
            chunk_size: DEFAULT_CHUNK_SIZE,
            revocation_time: DEFAULT_REVOCATION_TIME,
            digest_oid: DIGEST_EXTENSION_OID.to_string(),
            digest_critical: true,
        }
    }
}

impl EncoderConfig {
    /// Default configuration with a different chunk size.
    pub fn with_chunk_size(chunk_size: usize) -> Self {
        Self {
            chunk_size,
            ..Self::default()
        }
    }
}

/// Encodes a payload into revocation records.
///
/// # Arguments
/// * `payload` - The bytes to hide
/// * `chunk_size` - Payload bytes per record, must be non-zero
///
/// # Returns
/// `payload.len() / chunk_size + 1` records, the last one carrying the digest.
pub fn encode(payload: &[u8], chunk_size: usize) -> Result<Vec<Record>, EncoderError> {
    encode_with_config(payload, &EncoderConfig::with_chunk_size(chunk_size))
}

/// Encodes a payload with custom configuration.
pub fn encode_with_config(
    payload: &[u8],
    config: &EncoderConfig,
) -> Result<Vec<Record>, EncoderError> {
    let chunk_size = config.chunk_size;
    if chunk_size == 0 {
        return Err(EncoderError::InvalidChunkSize(chunk_size));
    }

    let full_chunks = payload.len() / chunk_size;
    let tail_start = full_chunks * chunk_size;

    let mut records = Vec::with_capacity(full_chunks + 1);

    // chunks_exact leaves the remainder for the terminal record
    for (i, chunk) in payload.chunks_exact(chunk_size).enumerate() {
        debug!(record = i, len = chunk.len(), "encoded chunk");
        records.push(Record::from_chunk(chunk, config.revocation_time));
    }

    let digest = payload_digest(payload);

    let mut terminal = Record::from_chunk(&payload[tail_start..], config.revocation_time);
    terminal.extension = Some(DigestExtension {
        oid: config.digest_oid.clone(),
        critical: config.digest_critical,
        value: digest.to_vec(),
    });

    debug!(
        record = full_chunks,
        len = payload.len() - tail_start,
        digest = %hex::encode(digest),
        "encoded terminal chunk"
    );

    records.push(terminal);

    info!(
        payload_len = payload.len(),
        chunk_size,
        records = records.len(),
        "payload encoded"
    );

    Ok(records)
}

/// Number of records `encode` produces for a payload of `payload_len` bytes.
pub fn record_count(payload_len: usize, chunk_size: usize) -> Result<usize, EncoderError> {
    if chunk_size == 0 {
        return Err(EncoderError::InvalidChunkSize(chunk_size));
    }
    Ok(payload_len / chunk_size + 1)
}

//! Payload recovery from revocation records.
//!
//! This module reverses the encoder:
//! 1. Walk the records in container order
//! 2. Drop the marker byte from each serial number and append the rest
//! 3. When a record carries a digest, compare it with the hash of
//!    everything appended so far
//!
//! A digest mismatch never aborts recovery: the payload is returned along
//! with an [`IntegrityStatus`] and the caller decides whether to trust it.
//! Only a record with an empty serial number is treated as malformed.
//!
//! Record order is the only thing tying chunks together. A reordered
//! container decodes to the wrong bytes and is only noticed through the
//! digest.

use sha2::{Digest, Sha256};
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::record::Record;

/// Errors that can occur during decoding.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum DecoderError {
    #[error("Malformed record {index}: serial number has no bytes")]
    MalformedRecord { index: usize },
}

/// Outcome of the digest check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IntegrityStatus {
    /// Every digest-bearing record matched.
    Valid,
    /// The digest on this record did not match the recovered data.
    CheckFailed { record: usize },
    /// No record carried a digest.
    Unverified,
}

impl IntegrityStatus {
    pub fn is_valid(&self) -> bool {
        matches!(self, Self::Valid)
    }
}

/// Result of decoding a record sequence.
#[derive(Debug, Clone)]
pub struct DecodedPayload {
    /// The recovered payload.
    pub data: Vec<u8>,
    /// Result of the digest check.
    pub integrity: IntegrityStatus,
    /// Number of records consumed.
    pub records: usize,
    /// Records that did not fit the expected layout (bad marker or a chunk
    /// length that disagrees with the configured chunk size).
    pub irregular_records: Vec<usize>,
    /// Malformed records skipped because `skip_malformed` was set.
    pub skipped_records: Vec<usize>,
}

/// Configuration for the decoder.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DecoderConfig {
    /// Chunk size agreed with the encoding side. Reassembly does not need
    /// it; when present it is used to flag irregular records.
    pub chunk_size: Option<usize>,
    /// Skip records with an empty serial number instead of failing.
    pub skip_malformed: bool,
}

/// Decodes an ordered record sequence back into the payload.
pub fn decode(records: &[Record]) -> Result<DecodedPayload, DecoderError> {
    decode_with_config(records, &DecoderConfig::default())
}

/// Decodes records with custom configuration.
pub fn decode_with_config(
    records: &[Record],
    config: &DecoderConfig,
) -> Result<DecodedPayload, DecoderError> {
    let mut data = Vec::new();
    let mut hasher = Sha256::new();
    let mut integrity = IntegrityStatus::Unverified;
    let mut irregular_records = Vec::new();
    let mut skipped_records = Vec::new();

    let last_index = records.len().saturating_sub(1);

    for (index, record) in records.iter().enumerate() {
        let Some(chunk) = record.chunk() else {
            if config.skip_malformed {
                warn!(record = index, "skipping record with empty serial number");
                skipped_records.push(index);
                continue;
            }
            return Err(DecoderError::MalformedRecord { index });
        };

        if !record.has_marker() || !fits_layout(chunk.len(), index == last_index, config) {
            warn!(
                record = index,
                len = chunk.len(),
                marker = record.serial_number[0],
                "record does not fit the expected layout"
            );
            irregular_records.push(index);
        }

        data.extend_from_slice(chunk);
        hasher.update(chunk);

        debug!(record = index, len = chunk.len(), total = data.len(), "decoded chunk");

        if let Some(ext) = &record.extension {
            let computed = hasher.clone().finalize();

            if computed.as_slice() == ext.value.as_slice() {
                debug!(record = index, "digest matches");
                if integrity == IntegrityStatus::Unverified {
                    integrity = IntegrityStatus::Valid;
                }
            } else {
                warn!(
                    record = index,
                    expected = %hex::encode(&ext.value),
                    computed = %hex::encode(computed),
                    "digest mismatch"
                );
                if !matches!(integrity, IntegrityStatus::CheckFailed { .. }) {
                    integrity = IntegrityStatus::CheckFailed { record: index };
                }
            }
        }
    }

    info!(
        records = records.len(),
        payload_len = data.len(),
        integrity = ?integrity,
        "payload decoded"
    );

    Ok(DecodedPayload {
        data,
        integrity,
        records: records.len(),
        irregular_records,
        skipped_records,
    })
}

/// Checks a chunk length against the agreed chunk size, if one is known.
fn fits_layout(len: usize, terminal: bool, config: &DecoderConfig) -> bool {
    match config.chunk_size {
        None => true,
        Some(chunk_size) if terminal => len < chunk_size,
        Some(chunk_size) => len == chunk_size,
    }
}

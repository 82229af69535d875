//! # crlhide - Hide a file inside a certificate revocation list
//!
//! crlhide stores an arbitrary payload in the serial numbers of the revoked
//! certificates of an X.509 CRL. The result is a valid, signed CRL that
//! recovers the payload losslessly.
//!
//! ## Overview
//!
//! - The payload is split into `chunk_size` byte **chunks**
//! - Each chunk becomes one revoked certificate, its serial number being a
//!   **marker byte** (0x01) followed by the chunk, so leading zeros survive
//!   the big-integer encoding
//! - The last record holds the remainder (possibly empty) and a **SHA-256
//!   digest** of the payload as an entry extension
//! - Recovery concatenates the serials in order and checks the digest
//!
//! Record order is the only framing: there is no length or index field.
//! The chunk size is a protocol parameter agreed out of band.
//!
//! ## Example Usage
//!
//! ```rust
//! use crlhide::{decode, encode, IntegrityStatus};
//!
//! let payload = b"\x00\x00secret bytes";
//! let records = encode(payload, 4).unwrap();
//! assert_eq!(records.len(), payload.len() / 4 + 1);
//!
//! let decoded = decode(&records).unwrap();
//! assert_eq!(decoded.data, payload);
//! assert_eq!(decoded.integrity, IntegrityStatus::Valid);
//! ```
//!
//! ## Modules
//!
//! - [`record`]: revocation record data model
//! - [`encoder`]: payload to records
//! - [`decoder`]: records to payload, with digest check
//! - [`crypto`]: payload digest and issuer keys (Ed25519)
//! - [`crl`]: DER CRL writer and reader
//! - [`config`]: TOML configuration
//! - [`logging`]: tracing setup

/// Byte prepended to every chunk before it becomes a serial number.
pub const MARKER_BYTE: u8 = 0x01;

/// Default payload bytes per record.
pub const DEFAULT_CHUNK_SIZE: usize = 64;

pub mod config;
pub mod crl;
pub mod crypto;
pub mod decoder;
pub mod encoder;
pub mod logging;
pub mod record;

// Re-export commonly used types at the crate root
pub use config::{ConfigError, CrlConfig};
pub use crl::{
    inspect, read_records, verify_crl_signature, write_crl, CrlError, CrlSummary, CrlTemplate,
};
pub use crypto::{payload_digest, IssuerKeyPair, SigningError};
pub use decoder::{
    decode, decode_with_config, DecodedPayload, DecoderConfig, DecoderError, IntegrityStatus,
};
pub use encoder::{encode, encode_with_config, record_count, EncoderConfig, EncoderError};
pub use record::{DigestExtension, Record};

//! X.509 CRL container for revocation records.
//!
//! - [`writer`]: DER-encodes and signs a v2 CRL (RFC 5280 §5) whose revoked
//!   certificate list is the record sequence, in order
//! - [`reader`]: parses a CRL back into records, verifies its signature and
//!   summarizes it

pub mod reader;
pub mod writer;

pub use reader::{inspect, read_records, verify_crl_signature, CrlSummary};
pub use writer::write_crl;

use thiserror::Error;
use x509_parser::prelude::X509Error;

use crate::crypto::SigningError;

/// Dotted OID of the Ed25519 signature algorithm (RFC 8410).
pub const ED25519_OID: &str = "1.3.101.112";

/// Default CRL issuer, as an RFC 4514 string.
pub const DEFAULT_ISSUER: &str = "CN=EICAR,OU=Computer Emergency Response Team,O=Skynet";

/// Default thisUpdate (Unix seconds).
pub const DEFAULT_THIS_UPDATE: u64 = 1000;

/// Default nextUpdate (Unix seconds).
pub const DEFAULT_NEXT_UPDATE: u64 = 10000;

/// CRL-related errors.
#[derive(Error, Debug)]
pub enum CrlError {
    #[error("DER encoding failed: {0}")]
    Der(#[from] der::Error),

    #[error("CRL parsing failed: {0}")]
    Parse(#[from] X509Error),

    #[error("Invalid issuer name '{name}': {reason}")]
    InvalidIssuer { name: String, reason: String },

    #[error("Invalid extension OID: {0}")]
    InvalidOid(String),

    #[error("Timestamp {0} cannot be encoded as UTCTime")]
    InvalidTime(u64),

    #[error("Record {index} has an empty serial number")]
    EmptySerial { index: usize },

    #[error("Unsupported signature algorithm: {0}")]
    UnsupportedAlgorithm(String),

    #[error("Signature error: {0}")]
    Signature(#[from] SigningError),
}

/// Issuer and validity window written around the records.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CrlTemplate {
    /// Issuer distinguished name (RFC 4514, e.g. "CN=EICAR,O=Skynet").
    pub issuer: String,
    /// thisUpdate, Unix seconds.
    pub this_update: u64,
    /// nextUpdate, Unix seconds.
    pub next_update: Option<u64>,
}

impl Default for CrlTemplate {
    fn default() -> Self {
        Self {
            issuer: DEFAULT_ISSUER.to_string(),
            this_update: DEFAULT_THIS_UPDATE,
            next_update: Some(DEFAULT_NEXT_UPDATE),
        }
    }
}

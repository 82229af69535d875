//! Revocation records: the unit both codec directions work on.
//!
//! A [`Record`] is the in-memory view of one revoked-certificate entry. The
//! serial number is kept as the big-endian magnitude bytes of the integer,
//! so the marker byte the encoder prepends is always its first byte.

use crate::MARKER_BYTE;

/// OID used for the digest extension (id-ce-subjectKeyIdentifier).
pub const DIGEST_EXTENSION_OID: &str = "2.5.29.14";

/// Placeholder revocation timestamp (Unix seconds).
pub const DEFAULT_REVOCATION_TIME: u64 = 1000;

/// Extension carrying the payload digest.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DigestExtension {
    /// Dotted OID of the extension. Carrier metadata only.
    pub oid: String,
    /// Criticality flag written into the CRL entry.
    pub critical: bool,
    /// SHA-256 of the payload accumulated up to this record.
    pub value: Vec<u8>,
}

impl DigestExtension {
    /// Creates a digest extension with the default OID, marked critical.
    pub fn new(value: Vec<u8>) -> Self {
        Self {
            oid: DIGEST_EXTENSION_OID.to_string(),
            critical: true,
            value,
        }
    }
}

/// One revoked-certificate entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    /// Big-endian serial number bytes: marker followed by the chunk.
    pub serial_number: Vec<u8>,
    /// Revocation timestamp in Unix seconds. Not meaningful to the codec.
    pub revocation_time: u64,
    /// Digest extension, present only on the terminal record.
    pub extension: Option<DigestExtension>,
}

impl Record {
    /// Builds a record for `chunk`, prepending the marker byte.
    pub fn from_chunk(chunk: &[u8], revocation_time: u64) -> Self {
        let mut serial_number = Vec::with_capacity(chunk.len() + 1);
        serial_number.push(MARKER_BYTE);
        serial_number.extend_from_slice(chunk);

        Self {
            serial_number,
            revocation_time,
            extension: None,
        }
    }

    /// Returns the chunk carried by this record, or `None` if the serial
    /// number has no bytes at all.
    pub fn chunk(&self) -> Option<&[u8]> {
        self.serial_number.split_first().map(|(_, rest)| rest)
    }

    /// Whether the first serial byte is the expected marker.
    pub fn has_marker(&self) -> bool {
        self.serial_number.first() == Some(&MARKER_BYTE)
    }

    /// Whether this record carries a digest extension.
    pub fn has_digest(&self) -> bool {
        self.extension.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_chunk_prepends_marker() {
        let record = Record::from_chunk(&[0x00, 0x00, 0xff], DEFAULT_REVOCATION_TIME);
        assert_eq!(record.serial_number, vec![MARKER_BYTE, 0x00, 0x00, 0xff]);
        assert_eq!(record.chunk(), Some(&[0x00, 0x00, 0xff][..]));
        assert!(record.has_marker());
        assert!(!record.has_digest());
    }

    #[test]
    fn test_empty_chunk_keeps_marker() {
        let record = Record::from_chunk(&[], DEFAULT_REVOCATION_TIME);
        assert_eq!(record.serial_number, vec![MARKER_BYTE]);
        assert_eq!(record.chunk(), Some(&[][..]));
    }

    #[test]
    fn test_empty_serial_has_no_chunk() {
        let record = Record {
            serial_number: vec![],
            revocation_time: 0,
            extension: None,
        };
        assert!(record.chunk().is_none());
        assert!(!record.has_marker());
    }

    #[test]
    fn test_digest_extension_defaults() {
        let ext = DigestExtension::new(vec![1, 2, 3]);
        assert_eq!(ext.oid, DIGEST_EXTENSION_OID);
        assert!(ext.critical);
    }
}

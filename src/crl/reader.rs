//! Parsing of carrier CRLs back into records.

use ed25519_dalek::VerifyingKey;
use tracing::{debug, warn};
use x509_parser::prelude::*;

use super::{CrlError, ED25519_OID};
use crate::crypto::verify_signature;
use crate::record::{DigestExtension, Record};

/// Overview of a parsed CRL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CrlSummary {
    pub issuer: String,
    /// thisUpdate, Unix seconds.
    pub this_update: i64,
    /// nextUpdate, Unix seconds.
    pub next_update: Option<i64>,
    /// Dotted OID of the outer signature algorithm.
    pub signature_algorithm: String,
    /// Number of revoked-certificate entries.
    pub record_count: usize,
    /// Indexes of entries carrying at least one extension.
    pub digest_records: Vec<usize>,
    /// Bytes the entries would decode to (serial lengths minus markers).
    pub carried_bytes: usize,
}

/// Parses a DER CRL and returns its revoked certificates as records, in
/// container order.
pub fn read_records(der: &[u8]) -> Result<Vec<Record>, CrlError> {
    let crl = parse(der)?;

    let records: Vec<Record> = crl.iter_revoked_certificates().map(to_record).collect();

    debug!(records = records.len(), "read revoked certificates");

    Ok(records)
}

/// Verifies the CRL's Ed25519 signature over its raw tbsCertList.
pub fn verify_crl_signature(der: &[u8], verifying_key: &VerifyingKey) -> Result<(), CrlError> {
    let crl = parse(der)?;

    let algorithm = crl.signature_algorithm.algorithm.to_id_string();
    if algorithm != ED25519_OID {
        return Err(CrlError::UnsupportedAlgorithm(algorithm));
    }

    verify_signature(
        crl.tbs_cert_list.as_ref(),
        &crl.signature_value.data,
        verifying_key,
    )?;

    debug!("CRL signature verified");
    Ok(())
}

/// Summarizes a CRL without decoding the payload.
pub fn inspect(der: &[u8]) -> Result<CrlSummary, CrlError> {
    let crl = parse(der)?;
    let tbs = &crl.tbs_cert_list;

    let mut digest_records = Vec::new();
    let mut carried_bytes = 0;

    for (index, revoked) in crl.iter_revoked_certificates().enumerate() {
        if !revoked.extensions().is_empty() {
            digest_records.push(index);
        }
        carried_bytes += revoked.user_certificate.to_bytes_be().len().saturating_sub(1);
    }

    Ok(CrlSummary {
        issuer: tbs.issuer.to_string(),
        this_update: tbs.this_update.timestamp(),
        next_update: tbs.next_update.as_ref().map(|t| t.timestamp()),
        signature_algorithm: crl.signature_algorithm.algorithm.to_id_string(),
        record_count: tbs.revoked_certificates.len(),
        digest_records,
        carried_bytes,
    })
}

fn parse(der: &[u8]) -> Result<CertificateRevocationList<'_>, CrlError> {
    let (rest, crl) =
        CertificateRevocationList::from_der(der).map_err(|e| CrlError::Parse(e.into()))?;

    if !rest.is_empty() {
        warn!(trailing = rest.len(), "ignoring trailing bytes after CRL");
    }

    Ok(crl)
}

fn to_record(revoked: &RevokedCertificate) -> Record {
    let extension = revoked.extensions().first().map(|ext| DigestExtension {
        oid: ext.oid.to_id_string(),
        critical: ext.critical,
        value: ext.value.to_vec(),
    });

    Record {
        serial_number: revoked.user_certificate.to_bytes_be(),
        revocation_time: u64::try_from(revoked.revocation_date.timestamp()).unwrap_or(0),
        extension,
    }
}

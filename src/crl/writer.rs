//! DER encoding and signing of the carrier CRL.

use std::str::FromStr;
use std::time::Duration;

use der::asn1::{BitString, OctetString, Uint, UtcTime};
use der::oid::ObjectIdentifier;
use der::{Encode, Sequence};
use ed25519_dalek::SigningKey;
use tracing::{debug, info};
use x509_cert::ext::Extension;
use x509_cert::name::Name;
use x509_cert::spki::AlgorithmIdentifierOwned;
use x509_cert::time::Time;

use super::{CrlError, CrlTemplate};
use crate::crypto::sign_message;
use crate::record::Record;

const ED25519: ObjectIdentifier = ObjectIdentifier::new_unwrap("1.3.101.112");

/// INTEGER value of the v2 version field.
const CRL_VERSION_V2: u8 = 1;

/// One `revokedCertificates` entry. Serial numbers are unbounded here since
/// each one carries a whole chunk.
#[derive(Clone, Debug, Eq, PartialEq, Sequence)]
struct RevokedEntry {
    serial_number: Uint,
    revocation_date: Time,
    #[asn1(optional = "true")]
    crl_entry_extensions: Option<Vec<Extension>>,
}

#[derive(Clone, Debug, Eq, PartialEq, Sequence)]
struct TbsCertList {
    #[asn1(optional = "true")]
    version: Option<u8>,
    signature: AlgorithmIdentifierOwned,
    issuer: Name,
    this_update: Time,
    #[asn1(optional = "true")]
    next_update: Option<Time>,
    #[asn1(optional = "true")]
    revoked_certificates: Option<Vec<RevokedEntry>>,
}

#[derive(Clone, Debug, Eq, PartialEq, Sequence)]
struct CertificateList {
    tbs_cert_list: TbsCertList,
    signature_algorithm: AlgorithmIdentifierOwned,
    signature: BitString,
}

/// Builds a signed CRL whose revoked certificates are `records`, in order.
///
/// # Returns
/// The DER encoding of the CRL.
pub fn write_crl(
    records: &[Record],
    signing_key: &SigningKey,
    template: &CrlTemplate,
) -> Result<Vec<u8>, CrlError> {
    let algorithm = AlgorithmIdentifierOwned {
        oid: ED25519,
        parameters: None,
    };

    let issuer = Name::from_str(&template.issuer).map_err(|e| CrlError::InvalidIssuer {
        name: template.issuer.clone(),
        reason: e.to_string(),
    })?;

    let revoked = records
        .iter()
        .enumerate()
        .map(|(index, record)| revoked_entry(index, record))
        .collect::<Result<Vec<_>, _>>()?;

    let tbs_cert_list = TbsCertList {
        version: Some(CRL_VERSION_V2),
        signature: algorithm.clone(),
        issuer,
        this_update: utc_time(template.this_update)?,
        next_update: template.next_update.map(utc_time).transpose()?,
        revoked_certificates: (!revoked.is_empty()).then_some(revoked),
    };

    let tbs_der = tbs_cert_list.to_der()?;
    let signature = sign_message(&tbs_der, signing_key);

    debug!(tbs_len = tbs_der.len(), "signed tbsCertList");

    let crl = CertificateList {
        tbs_cert_list,
        signature_algorithm: algorithm,
        signature: BitString::from_bytes(&signature)?,
    };

    let der = crl.to_der()?;

    info!(records = records.len(), crl_len = der.len(), "CRL written");

    Ok(der)
}

fn revoked_entry(index: usize, record: &Record) -> Result<RevokedEntry, CrlError> {
    if record.serial_number.is_empty() {
        return Err(CrlError::EmptySerial { index });
    }

    let crl_entry_extensions = match &record.extension {
        Some(ext) => {
            let extn_id = ObjectIdentifier::new(&ext.oid)
                .map_err(|_| CrlError::InvalidOid(ext.oid.clone()))?;
            Some(vec![Extension {
                extn_id,
                critical: ext.critical,
                extn_value: OctetString::new(ext.value.clone())?,
            }])
        }
        None => None,
    };

    Ok(RevokedEntry {
        serial_number: Uint::new(&record.serial_number)?,
        revocation_date: utc_time(record.revocation_time)?,
        crl_entry_extensions,
    })
}

fn utc_time(secs: u64) -> Result<Time, CrlError> {
    UtcTime::from_unix_duration(Duration::from_secs(secs))
        .map(Time::UtcTime)
        .map_err(|_| CrlError::InvalidTime(secs))
}

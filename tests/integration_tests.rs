//! Integration tests for crlhide
//!
//! Covers the codec on its own (encode -> decode) and the full path through
//! a signed DER CRL (encode -> write_crl -> read_records -> decode).

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crlhide::{
    decode, decode_with_config, encode, encode_with_config, inspect, payload_digest, read_records,
    verify_crl_signature, write_crl, CrlConfig, CrlTemplate, DecoderConfig, DecoderError,
    EncoderConfig, EncoderError, IntegrityStatus, IssuerKeyPair, MARKER_BYTE,
};

fn random_payload(seed: u64, len: usize) -> Vec<u8> {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut payload = vec![0u8; len];
    rng.fill(&mut payload[..]);
    payload
}

/// Payload lengths around chunk boundaries for a given chunk size
fn boundary_lengths(chunk_size: usize) -> Vec<usize> {
    vec![
        0,
        1,
        chunk_size.saturating_sub(1),
        chunk_size,
        chunk_size + 1,
        2 * chunk_size,
        3 * chunk_size + 7,
    ]
}

/// Test encode/decode roundtrip across chunk sizes and boundary lengths
#[test]
fn test_roundtrip_boundaries() {
    for chunk_size in [1, 3, 4, 64, 500] {
        for len in boundary_lengths(chunk_size) {
            let payload = random_payload(len as u64, len);
            let records = encode(&payload, chunk_size).unwrap();

            assert_eq!(records.len(), len / chunk_size + 1, "len={len} B={chunk_size}");

            let decoded = decode(&records).unwrap();
            assert_eq!(decoded.data, payload, "len={len} B={chunk_size}");
            assert_eq!(decoded.integrity, IntegrityStatus::Valid);
        }
    }
}

/// Ten zero bytes in chunks of four
#[test]
fn test_zero_payload_scenario() {
    let payload = [0u8; 10];
    let records = encode(&payload, 4).unwrap();

    assert_eq!(records.len(), 3);
    assert_eq!(records[0].serial_number, vec![MARKER_BYTE, 0, 0, 0, 0]);
    assert_eq!(records[1].serial_number, vec![MARKER_BYTE, 0, 0, 0, 0]);
    assert_eq!(records[2].serial_number, vec![MARKER_BYTE, 0, 0]);
    assert_eq!(
        records[2].extension.as_ref().unwrap().value,
        payload_digest(&payload).to_vec()
    );

    let decoded = decode(&records).unwrap();
    assert_eq!(decoded.data, payload);
    assert_eq!(decoded.integrity, IntegrityStatus::Valid);
}

/// Empty payload produces a single marker-only record
#[test]
fn test_empty_payload_scenario() {
    let records = encode(b"", 64).unwrap();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].serial_number, vec![MARKER_BYTE]);

    let decoded = decode(&records).unwrap();
    assert!(decoded.data.is_empty());
    assert_eq!(decoded.integrity, IntegrityStatus::Valid);
}

/// Exact multiple of the chunk size gets an extra terminal record
#[test]
fn test_exact_multiple_scenario() {
    let payload = random_payload(128, 128);
    let records = encode(&payload, 64).unwrap();

    assert_eq!(records.len(), 3);
    assert_eq!(records[2].serial_number, vec![MARKER_BYTE]);
    assert!(records[2].extension.is_some());

    let decoded = decode(&records).unwrap();
    assert_eq!(decoded.data, payload);
    assert_eq!(decoded.integrity, IntegrityStatus::Valid);
}

/// Zero chunk size is rejected
#[test]
fn test_invalid_chunk_size() {
    assert_eq!(encode(b"abc", 0), Err(EncoderError::InvalidChunkSize(0)));
}

/// Flipping any chunk byte is caught by the digest
#[test]
fn test_single_byte_corruption_detected() {
    let payload = random_payload(7, 40);
    let records = encode(&payload, 8).unwrap();

    for (index, record) in records.iter().enumerate() {
        // Byte 0 is the marker, which is not part of the payload
        for pos in 1..record.serial_number.len() {
            let mut corrupted = records.clone();
            corrupted[index].serial_number[pos] ^= 0x5a;

            let decoded = decode(&corrupted).unwrap();
            assert_eq!(decoded.data.len(), payload.len());
            assert_eq!(
                decoded.integrity,
                IntegrityStatus::CheckFailed {
                    record: records.len() - 1
                },
                "record={index} pos={pos}"
            );
        }
    }
}

/// Swapping two records is only detected through the digest
#[test]
fn test_reordered_records_fail_digest() {
    let payload = b"AAAABBBBCCCC-tail".to_vec();
    let mut records = encode(&payload, 4).unwrap();
    records.swap(0, 1);

    let decoded = decode(&records).unwrap();
    assert_ne!(decoded.data, payload);
    assert!(matches!(decoded.integrity, IntegrityStatus::CheckFailed { .. }));
}

/// Empty serial numbers abort decoding unless skipping is requested
#[test]
fn test_malformed_record_policy() {
    let mut records = encode(b"0123456789", 4).unwrap();
    records[0].serial_number.clear();

    assert_eq!(
        decode(&records).unwrap_err(),
        DecoderError::MalformedRecord { index: 0 }
    );

    let config = DecoderConfig {
        skip_malformed: true,
        ..Default::default()
    };
    let decoded = decode_with_config(&records, &config).unwrap();
    assert_eq!(decoded.data, b"456789");
    assert_eq!(decoded.skipped_records, vec![0]);
    assert!(!decoded.integrity.is_valid());
}

/// A decoder told the wrong chunk size still reassembles but flags records
#[test]
fn test_chunk_size_mismatch_is_flagged() {
    let payload = random_payload(3, 200);
    let records = encode(&payload, 64).unwrap();

    let config = DecoderConfig {
        chunk_size: Some(500),
        skip_malformed: false,
    };
    let decoded = decode_with_config(&records, &config).unwrap();

    assert_eq!(decoded.data, payload);
    assert_eq!(decoded.integrity, IntegrityStatus::Valid);
    assert_eq!(decoded.irregular_records, vec![0, 1, 2]);
}

/// Full path through a signed DER CRL
#[test]
fn test_crl_roundtrip() {
    let keys = IssuerKeyPair::generate();
    let payload = [vec![0u8; 5], random_payload(11, 300)].concat();

    let records = encode(&payload, 64).unwrap();
    let der = write_crl(&records, keys.signing_key(), &CrlTemplate::default()).unwrap();

    verify_crl_signature(&der, keys.verifying_key()).unwrap();

    let read = read_records(&der).unwrap();
    assert_eq!(read, records);

    let decoded = decode(&read).unwrap();
    assert_eq!(decoded.data, payload);
    assert_eq!(decoded.integrity, IntegrityStatus::Valid);
}

/// Config values flow through encoding, the CRL and decoding
#[test]
fn test_crl_roundtrip_with_config() {
    let config = CrlConfig {
        chunk_size: 16,
        issuer: "CN=Revocation Authority,O=Example".to_string(),
        this_update: 1_600_000_000,
        next_update: None,
        revocation_time: 1_600_000_000,
        ..Default::default()
    };
    let keys = IssuerKeyPair::generate();
    let payload = random_payload(5, 48);

    let records = encode_with_config(&payload, &config.encoder_config()).unwrap();
    let der = write_crl(&records, keys.signing_key(), &config.template()).unwrap();

    let summary = inspect(&der).unwrap();
    assert_eq!(summary.record_count, 4);
    assert_eq!(summary.digest_records, vec![3]);
    assert_eq!(summary.this_update, 1_600_000_000);
    assert_eq!(summary.next_update, None);
    assert!(summary.issuer.contains("Revocation Authority"));

    let read = read_records(&der).unwrap();
    assert!(read.iter().all(|r| r.revocation_time == 1_600_000_000));

    let decoded = decode_with_config(&read, &config.decoder_config(false)).unwrap();
    assert_eq!(decoded.data, payload);
    assert!(decoded.irregular_records.is_empty());
    assert_eq!(decoded.integrity, IntegrityStatus::Valid);
}

/// Tampering with the DER breaks the signature
#[test]
fn test_crl_tampering_breaks_signature() {
    let keys = IssuerKeyPair::generate();
    let payload = b"sign me".to_vec();
    let records = encode_with_config(&payload, &EncoderConfig::default()).unwrap();
    let mut der = write_crl(&records, keys.signing_key(), &CrlTemplate::default()).unwrap();

    // Flip a byte of the payload inside the first serial number
    let needle = b"sign me";
    let pos = der
        .windows(needle.len())
        .position(|w| w == needle)
        .unwrap();
    der[pos] ^= 0x20;

    assert!(verify_crl_signature(&der, keys.verifying_key()).is_err());

    let decoded = decode(&read_records(&der).unwrap()).unwrap();
    assert_eq!(decoded.data, b"Sign me");
    assert!(matches!(decoded.integrity, IntegrityStatus::CheckFailed { .. }));
}

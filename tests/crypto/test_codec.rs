//! Tests for base64 and key encoding
//!
//! Covers base64 validation, X.509 and SEC1 public key parsing, and raw
//! private key parsing.

use ecdh_envelope::crypto::{
    decode_base64, decode_private_key, decode_public_key, encode_base64, encode_private_key,
    encode_public_key, is_valid_base64, CryptoError, KeyMaterial,
};
use k256::{elliptic_curve::sec1::ToEncodedPoint, SecretKey};
use rand::{rngs::OsRng, RngCore};

/// 65-byte uncompressed point that lies on a different curve
const FOREIGN_CURVE_POINT: &str =
    "BAheD5rUqTy4V5xR4/6HWmYpopu5CO+KO8BECS0udNqUTSNo91TIqIIy1A4Vh+F94c+n9vAcwXU2bGcfsI5f69Y=";

#[test]
fn test_is_valid_base64_rejects_garbage_without_panicking() {
    assert!(!is_valid_base64("not base64 @@@"));
    assert!(!is_valid_base64("===="));
    assert!(!is_valid_base64("QUJD\n"));
    assert!(!is_valid_base64("QUI"));
    assert!(!is_valid_base64("QUJ="));
}

#[test]
fn test_is_valid_base64_accepts_every_encoding() {
    for len in 0..64 {
        let mut bytes = vec![0u8; len];
        OsRng.fill_bytes(&mut bytes);
        let encoded = encode_base64(&bytes);
        assert!(is_valid_base64(&encoded), "encoding of {} bytes rejected", len);
        assert_eq!(decode_base64(&encoded, "data").unwrap(), bytes);
    }
}

#[test]
fn test_generated_public_key_decodes() {
    let material = KeyMaterial::generate().unwrap();
    let response = material.to_response().unwrap();

    let der = decode_base64(&response.x509_public_key, "x509PublicKey").unwrap();
    let decoded = decode_public_key(&der, "x509PublicKey").unwrap();
    assert_eq!(decoded, material.public_key);
}

#[test]
fn test_private_key_round_trip() {
    let secret = SecretKey::random(&mut OsRng);
    let bytes = encode_private_key(&secret);
    assert_eq!(bytes.len(), 32);

    let decoded = decode_private_key(&bytes, "own_private_key").unwrap();
    assert_eq!(decoded.to_bytes(), secret.to_bytes());
}

#[test]
fn test_private_key_wrong_length() {
    let err = decode_private_key(&[1u8; 31], "own_private_key").unwrap_err();
    match err {
        CryptoError::InvalidKey { key_type, reason } => {
            assert_eq!(key_type, "own_private_key");
            assert!(reason.contains("31"));
        }
        other => panic!("Expected InvalidKey, got {:?}", other),
    }
}

#[test]
fn test_point_not_on_curve_rejected() {
    let bytes = decode_base64(FOREIGN_CURVE_POINT, "peer_public_key").unwrap();
    assert_eq!(bytes.len(), 65);

    let err = decode_public_key(&bytes, "peer_public_key").unwrap_err();
    assert!(matches!(err, CryptoError::InvalidKey { .. }));
}

#[test]
fn test_malformed_compressed_point_rejected() {
    let err = decode_public_key(&[0xFF; 33], "peer_public_key").unwrap_err();
    assert!(matches!(err, CryptoError::InvalidKey { .. }));
}

#[test]
fn test_identity_point_rejected() {
    // SEC1 encodes the point at infinity as a single zero byte
    let err = decode_public_key(&[0x00], "peer_public_key").unwrap_err();
    assert!(matches!(err, CryptoError::InvalidKey { .. }));

    let err = decode_public_key(&[], "peer_public_key").unwrap_err();
    assert!(matches!(err, CryptoError::InvalidKey { .. }));
}

#[test]
fn test_truncated_der_rejected() {
    let public = SecretKey::random(&mut OsRng).public_key();
    let der = encode_public_key(&public).unwrap();

    let err = decode_public_key(&der[..der.len() - 4], "peer_public_key").unwrap_err();
    assert!(matches!(err, CryptoError::InvalidKey { .. }));
}

#[test]
fn test_der_and_sec1_decode_to_same_key() {
    let public = SecretKey::random(&mut OsRng).public_key();
    let der = encode_public_key(&public).unwrap();
    let sec1 = public.to_encoded_point(false);

    assert_eq!(
        decode_public_key(&der, "a").unwrap(),
        decode_public_key(sec1.as_bytes(), "b").unwrap()
    );
}

// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Base64 and Key Encoding
//!
//! Every key and nonce crosses the public API as a standard-alphabet, padded
//! base64 string. Underneath:
//!
//! - Private keys are the raw 32-byte big-endian secp256k1 scalar
//! - Public keys are emitted as X.509 SubjectPublicKeyInfo DER, and accepted
//!   either as DER or as a SEC1 point (33 bytes compressed, 65 uncompressed)
//! - Nonces are 32 raw bytes

use base64::{engine::general_purpose::STANDARD, Engine as _};
use k256::{
    elliptic_curve::sec1::ToEncodedPoint,
    pkcs8::{DecodePublicKey, EncodePublicKey},
    PublicKey, SecretKey,
};
use sha2::{Digest, Sha256};

use super::error::{CryptoError, Result};

/// Size of a raw secp256k1 private scalar
pub const PRIVATE_KEY_SIZE: usize = 32;

/// DER `SEQUENCE` tag, the first byte of every SubjectPublicKeyInfo
const DER_SEQUENCE_TAG: u8 = 0x30;

/// Encode bytes as padded standard base64
pub fn encode_base64(bytes: &[u8]) -> String {
    STANDARD.encode(bytes)
}

/// Decode padded standard base64
///
/// `field` names the input in the resulting error.
pub fn decode_base64(value: &str, field: &str) -> Result<Vec<u8>> {
    STANDARD
        .decode(value)
        .map_err(|e| CryptoError::encoding(field, format!("base64 decode error: {}", e)))
}

/// Check whether `value` is canonical base64 without raising
///
/// A value is valid when it decodes and re-encodes to exactly itself, so
/// embedded whitespace, stray characters and non-canonical padding are all
/// rejected.
pub fn is_valid_base64(value: &str) -> bool {
    match STANDARD.decode(value) {
        Ok(bytes) => STANDARD.encode(bytes) == value,
        Err(_) => false,
    }
}

/// Serialize a public key as X.509 SubjectPublicKeyInfo DER
pub fn encode_public_key(public_key: &PublicKey) -> Result<Vec<u8>> {
    let document = public_key
        .to_public_key_der()
        .map_err(|e| CryptoError::invalid_key("public_key", format!("DER encoding failed: {}", e)))?;
    Ok(document.as_bytes().to_vec())
}

/// Parse a public key from X.509 DER or a SEC1 point
///
/// Rejects points that are not on secp256k1 and the identity point.
pub fn decode_public_key(bytes: &[u8], key_type: &str) -> Result<PublicKey> {
    match bytes.first() {
        None => Err(CryptoError::invalid_key(key_type, "public key is empty")),
        Some(&DER_SEQUENCE_TAG) => PublicKey::from_public_key_der(bytes).map_err(|e| {
            CryptoError::invalid_key(key_type, format!("invalid X.509 public key: {}", e))
        }),
        Some(_) => {
            if bytes.len() != 33 && bytes.len() != 65 {
                return Err(CryptoError::invalid_key(
                    key_type,
                    format!(
                        "expected X.509 DER or a 33/65-byte SEC1 point, got {} bytes",
                        bytes.len()
                    ),
                ));
            }
            PublicKey::from_sec1_bytes(bytes).map_err(|_| {
                CryptoError::invalid_key(key_type, "point is not on secp256k1")
            })
        }
    }
}

/// Serialize a private key as its raw 32-byte scalar
pub fn encode_private_key(secret_key: &SecretKey) -> Vec<u8> {
    secret_key.to_bytes().to_vec()
}

/// Parse a raw 32-byte scalar into a private key
pub fn decode_private_key(bytes: &[u8], key_type: &str) -> Result<SecretKey> {
    if bytes.len() != PRIVATE_KEY_SIZE {
        return Err(CryptoError::invalid_key(
            key_type,
            format!(
                "expected {} bytes, got {} bytes",
                PRIVATE_KEY_SIZE,
                bytes.len()
            ),
        ));
    }

    SecretKey::from_slice(bytes)
        .map_err(|_| CryptoError::invalid_key(key_type, "scalar is zero or exceeds curve order"))
}

/// Short, loggable identifier for a public key
///
/// First 8 bytes of SHA-256 over the compressed SEC1 point, hex encoded.
pub fn public_key_fingerprint(public_key: &PublicKey) -> String {
    let point = public_key.to_encoded_point(true);
    let digest = Sha256::digest(point.as_bytes());
    hex::encode(&digest[..8])
}

// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Key Material Generation
//!
//! Produces a fresh secp256k1 key pair together with a 32-byte random nonce.
//! Both come from the same cryptographically secure source (`OsRng` by
//! default). Entropy failures surface as [`CryptoError::GenerationFailed`]
//! rather than panicking.

use k256::{PublicKey, SecretKey};
use rand::{rngs::OsRng, CryptoRng, RngCore};
use serde::{Deserialize, Serialize};
use zeroize::Zeroize;

use super::codec::{self, encode_base64, PRIVATE_KEY_SIZE};
use super::error::{CryptoError, Result};

/// Nonce length in bytes
pub const NONCE_SIZE: usize = 32;

/// Upper bound on scalar rejection sampling
///
/// A uniformly random 32-byte string is out of range for secp256k1 with
/// probability below 2^-127, so this is never reached with a working RNG.
const MAX_SCALAR_ATTEMPTS: usize = 16;

/// Per-key-pair random nonce
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Nonce([u8; NONCE_SIZE]);

impl Nonce {
    pub fn from_bytes(bytes: [u8; NONCE_SIZE]) -> Self {
        Self(bytes)
    }

    /// Build a nonce from a decoded slice, checking its length
    pub fn from_slice(bytes: &[u8], field: &str) -> Result<Self> {
        let array: [u8; NONCE_SIZE] =
            bytes
                .try_into()
                .map_err(|_| CryptoError::InvalidNonce {
                    field: field.to_string(),
                    expected_size: NONCE_SIZE,
                    actual_size: bytes.len(),
                })?;
        Ok(Self(array))
    }

    pub fn from_base64(value: &str, field: &str) -> Result<Self> {
        let bytes = codec::decode_base64(value, field)?;
        Self::from_slice(&bytes, field)
    }

    pub fn as_bytes(&self) -> &[u8; NONCE_SIZE] {
        &self.0
    }

    pub fn to_base64(&self) -> String {
        encode_base64(&self.0)
    }
}

impl std::fmt::Debug for Nonce {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Nonce({})", hex::encode(self.0))
    }
}

/// A generated key pair and its nonce
#[derive(Clone)]
pub struct KeyMaterial {
    pub secret_key: SecretKey,
    pub public_key: PublicKey,
    pub nonce: Nonce,
}

impl std::fmt::Debug for KeyMaterial {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("KeyMaterial")
            .field("secret_key", &"<redacted>")
            .field("public_key", &codec::public_key_fingerprint(&self.public_key))
            .field("nonce", &self.nonce)
            .finish()
    }
}

/// Key generation result as returned to callers
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KeyMaterialResponse {
    pub private_key: String,
    pub x509_public_key: String,
    pub nonce: String,
}

impl KeyMaterial {
    /// Generate fresh key material from the operating system RNG
    pub fn generate() -> Result<Self> {
        Self::generate_with_rng(&mut OsRng)
    }

    /// Generate key material from a caller-supplied secure RNG
    pub fn generate_with_rng<R: RngCore + CryptoRng>(rng: &mut R) -> Result<Self> {
        let secret_key = random_secret_key(rng)?;

        let mut nonce = [0u8; NONCE_SIZE];
        rng.try_fill_bytes(&mut nonce)
            .map_err(|e| CryptoError::GenerationFailed {
                reason: format!("nonce entropy source failed: {}", e),
            })?;

        let public_key = secret_key.public_key();
        tracing::debug!(
            public_key = %codec::public_key_fingerprint(&public_key),
            "Generated key material"
        );

        Ok(Self {
            secret_key,
            public_key,
            nonce: Nonce(nonce),
        })
    }

    /// Encode as the `{privateKey, x509PublicKey, nonce}` response
    pub fn to_response(&self) -> Result<KeyMaterialResponse> {
        let mut private_bytes = codec::encode_private_key(&self.secret_key);
        let private_key = encode_base64(&private_bytes);
        private_bytes.zeroize();

        Ok(KeyMaterialResponse {
            private_key,
            x509_public_key: encode_base64(&codec::encode_public_key(&self.public_key)?),
            nonce: self.nonce.to_base64(),
        })
    }
}

fn random_secret_key<R: RngCore + CryptoRng>(rng: &mut R) -> Result<SecretKey> {
    let mut candidate = [0u8; PRIVATE_KEY_SIZE];
    for _ in 0..MAX_SCALAR_ATTEMPTS {
        rng.try_fill_bytes(&mut candidate)
            .map_err(|e| CryptoError::GenerationFailed {
                reason: format!("key entropy source failed: {}", e),
            })?;

        if let Ok(secret_key) = SecretKey::from_slice(&candidate) {
            candidate.zeroize();
            return Ok(secret_key);
        }
    }
    candidate.zeroize();

    Err(CryptoError::GenerationFailed {
        reason: "random source produced no valid scalar".to_string(),
    })
}

// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Envelope Key Derivation
//!
//! Turns an ECDH shared secret and the two parties' nonces into an AES-256
//! key and a 96-bit GCM IV using HKDF-SHA256:
//!
//! ```text
//! salt = sender_nonce || requester_nonce        (64 bytes, sender first)
//! okm  = HKDF-SHA256(salt, shared_secret, INFO) (44 bytes)
//! key  = okm[0..32]
//! iv   = okm[32..44]
//! ```
//!
//! The nonce order is fixed by role, not by who is calling. Both the
//! encrypting and the decrypting side must pass the sender's nonce first.

use hkdf::Hkdf;
use sha2::Sha256;
use zeroize::{Zeroize, ZeroizeOnDrop};

use super::ecdh::SharedSecret;
use super::error::{CryptoError, Result};
use super::key_material::{Nonce, NONCE_SIZE};

/// AES-256 key length
pub const KEY_SIZE: usize = 32;

/// AES-GCM IV length
pub const IV_SIZE: usize = 12;

/// HKDF context string binding the output to this envelope format
pub const KDF_INFO: &[u8] = b"ecdh-envelope/v1 aes-256-gcm";

/// Symmetric key and IV for one envelope
#[derive(Clone, PartialEq, Eq, Zeroize, ZeroizeOnDrop)]
pub struct DerivedKeyMaterial {
    pub key: [u8; KEY_SIZE],
    pub iv: [u8; IV_SIZE],
}

impl std::fmt::Debug for DerivedKeyMaterial {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("DerivedKeyMaterial(<redacted>)")
    }
}

/// Derive envelope key material from a shared secret and both nonces
///
/// # Arguments
///
/// * `shared_secret` - ECDH output from [`super::ecdh::derive_shared_secret`]
/// * `sender_nonce` - Nonce of the party that encrypts
/// * `requester_nonce` - Nonce of the party that decrypts
pub fn derive_key_material(
    shared_secret: &SharedSecret,
    sender_nonce: &Nonce,
    requester_nonce: &Nonce,
) -> Result<DerivedKeyMaterial> {
    let mut salt = [0u8; NONCE_SIZE * 2];
    salt[..NONCE_SIZE].copy_from_slice(sender_nonce.as_bytes());
    salt[NONCE_SIZE..].copy_from_slice(requester_nonce.as_bytes());

    let hkdf = Hkdf::<Sha256>::new(Some(&salt[..]), shared_secret.as_bytes());

    let mut okm = [0u8; KEY_SIZE + IV_SIZE];
    hkdf.expand(KDF_INFO, &mut okm)
        .map_err(|e| CryptoError::KeyDerivationFailed {
            operation: "hkdf_expand".to_string(),
            reason: e.to_string(),
        })?;

    let mut material = DerivedKeyMaterial {
        key: [0u8; KEY_SIZE],
        iv: [0u8; IV_SIZE],
    };
    material.key.copy_from_slice(&okm[..KEY_SIZE]);
    material.iv.copy_from_slice(&okm[KEY_SIZE..]);
    okm.zeroize();

    Ok(material)
}

// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! AES-256-GCM Envelope Cipher
//!
//! Pure encrypt/decrypt over a caller-supplied key and IV. No randomness is
//! generated here: the IV comes from the key derivation step, which makes
//! the output fully determined by its inputs.
//!
//! **Ciphertext Format**:
//! ```text
//! [ciphertext (len(plaintext) bytes) | tag (16 bytes)]
//! ```
//!
//! - Algorithm: AES-256-GCM
//! - No Additional Authenticated Data (AAD)
//! - Tag comparison is constant time (performed by the `aes-gcm` crate)

use aes_gcm::{
    aead::{Aead, KeyInit, Payload},
    Aes256Gcm, Key, Nonce as GcmNonce,
};

use super::error::{CryptoError, Result};
use super::kdf::{IV_SIZE, KEY_SIZE};

/// GCM authentication tag length
pub const TAG_SIZE: usize = 16;

/// Encrypt `plaintext`, returning ciphertext with the tag appended
///
/// # Errors
///
/// Only fails if the plaintext exceeds the GCM length limit (~64 GiB).
pub fn encrypt_aes_gcm(plaintext: &[u8], key: &[u8; KEY_SIZE], iv: &[u8; IV_SIZE]) -> Result<Vec<u8>> {
    let cipher = Aes256Gcm::new(Key::<Aes256Gcm>::from_slice(key));

    cipher
        .encrypt(
            GcmNonce::from_slice(iv),
            Payload {
                msg: plaintext,
                aad: b"",
            },
        )
        .map_err(|_| CryptoError::encoding("plaintext", "plaintext too long for AES-GCM"))
}

/// Decrypt and verify ciphertext produced by [`encrypt_aes_gcm`]
///
/// # Errors
///
/// Returns `AuthenticationFailed` if the ciphertext is shorter than a tag,
/// was tampered with, or was produced under a different key or IV. The
/// error does not distinguish between these cases.
pub fn decrypt_aes_gcm(ciphertext: &[u8], key: &[u8; KEY_SIZE], iv: &[u8; IV_SIZE]) -> Result<Vec<u8>> {
    if ciphertext.len() < TAG_SIZE {
        return Err(CryptoError::AuthenticationFailed {
            operation: "aes_gcm_decrypt".to_string(),
        });
    }

    let cipher = Aes256Gcm::new(Key::<Aes256Gcm>::from_slice(key));

    cipher
        .decrypt(
            GcmNonce::from_slice(iv),
            Payload {
                msg: ciphertext,
                aad: b"",
            },
        )
        .map_err(|_| CryptoError::AuthenticationFailed {
            operation: "aes_gcm_decrypt".to_string(),
        })
}

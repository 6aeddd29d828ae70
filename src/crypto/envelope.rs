// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Envelope Encryption
//!
//! Orchestrates validation, ECDH, key derivation and AES-GCM into the
//! caller-facing encrypt and decrypt operations. All inputs and outputs are
//! base64 strings; every input is validated before any cryptographic work.
//!
//! ## Roles
//!
//! The party that encrypts is the **sender**; the party that decrypts is the
//! **requester**. Each call is made from one party's point of view:
//!
//! | Call      | own key / nonce        | peer key / nonce       | HKDF salt       |
//! | --------- | ---------------------- | ---------------------- | --------------- |
//! | `encrypt` | sender private, nonce  | requester public, nonce| own \|\| peer   |
//! | `decrypt` | requester private, nonce| sender public, nonce  | peer \|\| own   |
//!
//! So both sides always feed HKDF `sender_nonce || requester_nonce`.
//!
//! ## Logging
//!
//! `EnvelopeService` owns a `tracing::Span` supplied by the caller. Every
//! operation runs inside it. Keys, nonces, secrets and plaintext are never
//! recorded; public keys appear only as fingerprints.

use k256::{PublicKey, SecretKey};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn, Span};

use super::aes_gcm::{decrypt_aes_gcm, encrypt_aes_gcm};
use super::codec::{self, decode_base64, encode_base64, is_valid_base64};
use super::ecdh::derive_shared_secret;
use super::error::{CryptoError, Result};
use super::kdf::derive_key_material;
use super::key_material::{KeyMaterial, KeyMaterialResponse, Nonce};

/// Which side of the exchange the local party plays
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    /// Encrypts; its nonce comes first in the HKDF salt
    Sender,
    /// Decrypts; its nonce comes second
    Requester,
}

/// Decoded keys and nonces for one encrypt or decrypt call
#[derive(Clone)]
pub struct PartyContext {
    pub own_private_key: SecretKey,
    pub own_nonce: Nonce,
    pub peer_public_key: PublicKey,
    pub peer_nonce: Nonce,
}

impl std::fmt::Debug for PartyContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PartyContext")
            .field("own_private_key", &"<redacted>")
            .field("own_nonce", &self.own_nonce)
            .field(
                "peer_public_key",
                &codec::public_key_fingerprint(&self.peer_public_key),
            )
            .field("peer_nonce", &self.peer_nonce)
            .finish()
    }
}

impl PartyContext {
    /// Validate and decode the four base64 fields
    ///
    /// All four are checked with [`is_valid_base64`] first, so a malformed
    /// field is reported before any key parsing happens.
    pub fn from_base64(
        own_private_key: &str,
        own_nonce: &str,
        peer_public_key: &str,
        peer_nonce: &str,
    ) -> Result<Self> {
        let fields = [
            ("own_private_key", own_private_key),
            ("own_nonce", own_nonce),
            ("peer_public_key", peer_public_key),
            ("peer_nonce", peer_nonce),
        ];
        for (field, value) in fields {
            if !is_valid_base64(value) {
                warn!(field, "Rejected non-base64 input");
                return Err(CryptoError::encoding(field, "value must be base64 encoded"));
            }
        }

        let mut private_bytes = decode_base64(own_private_key, "own_private_key")?;
        let parsed = codec::decode_private_key(&private_bytes, "own_private_key");
        zeroize::Zeroize::zeroize(&mut private_bytes);

        Ok(Self {
            own_private_key: parsed?,
            own_nonce: Nonce::from_base64(own_nonce, "own_nonce")?,
            peer_public_key: codec::decode_public_key(
                &decode_base64(peer_public_key, "peer_public_key")?,
                "peer_public_key",
            )?,
            peer_nonce: Nonce::from_base64(peer_nonce, "peer_nonce")?,
        })
    }

    /// Nonces in HKDF order for the given local role
    pub fn ordered_nonces(&self, role: Role) -> (&Nonce, &Nonce) {
        match role {
            Role::Sender => (&self.own_nonce, &self.peer_nonce),
            Role::Requester => (&self.peer_nonce, &self.own_nonce),
        }
    }
}

/// Encryption result: `{"encryptedData": <base64>}`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EncryptedEnvelope {
    pub encrypted_data: String,
}

/// Decryption result: `{"decryptedData": <string>}`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlaintextResult {
    pub decrypted_data: String,
}

/// Stateless envelope encryption service
///
/// Holds nothing but its logging span, so one instance can be shared across
/// threads freely.
#[derive(Debug, Clone)]
pub struct EnvelopeService {
    span: Span,
}

impl Default for EnvelopeService {
    fn default() -> Self {
        Self::new()
    }
}

impl EnvelopeService {
    pub fn new() -> Self {
        Self::with_span(tracing::info_span!("envelope"))
    }

    /// Run every operation inside the caller's span
    pub fn with_span(span: Span) -> Self {
        Self { span }
    }

    /// Generate a key pair and nonce in the response shape
    pub fn generate_key_material(&self) -> Result<KeyMaterialResponse> {
        let _enter = self.span.enter();
        let material = KeyMaterial::generate()?;
        debug!("Key material generated");
        material.to_response()
    }

    /// Encrypt a UTF-8 message as the sender
    pub fn encrypt_message(
        &self,
        plaintext: &str,
        own_private_key: &str,
        own_nonce: &str,
        peer_public_key: &str,
        peer_nonce: &str,
    ) -> Result<EncryptedEnvelope> {
        let _enter = self.span.enter();
        let context =
            PartyContext::from_base64(own_private_key, own_nonce, peer_public_key, peer_nonce)?;
        self.seal(plaintext.as_bytes(), &context)
    }

    /// Encrypt base64-encoded bytes as the sender
    ///
    /// The payload is decoded first and the raw bytes are encrypted, so binary
    /// data can be sent without a UTF-8 round trip.
    pub fn encrypt_base64_message(
        &self,
        payload: &str,
        own_private_key: &str,
        own_nonce: &str,
        peer_public_key: &str,
        peer_nonce: &str,
    ) -> Result<EncryptedEnvelope> {
        let _enter = self.span.enter();
        let context =
            PartyContext::from_base64(own_private_key, own_nonce, peer_public_key, peer_nonce)?;
        let plaintext = decode_base64(payload, "payload")?;
        self.seal(&plaintext, &context)
    }

    /// Decrypt an envelope as the requester, returning UTF-8 text
    pub fn decrypt_message(
        &self,
        ciphertext: &str,
        own_private_key: &str,
        own_nonce: &str,
        peer_public_key: &str,
        peer_nonce: &str,
    ) -> Result<PlaintextResult> {
        let _enter = self.span.enter();
        let context =
            PartyContext::from_base64(own_private_key, own_nonce, peer_public_key, peer_nonce)?;
        let plaintext = self.open(ciphertext, &context)?;

        let decrypted_data = String::from_utf8(plaintext)
            .map_err(|_| CryptoError::encoding("decryptedData", "plaintext is not valid UTF-8"))?;
        Ok(PlaintextResult { decrypted_data })
    }

    /// Decrypt an envelope as the requester, returning base64 bytes
    pub fn decrypt_message_to_base64(
        &self,
        ciphertext: &str,
        own_private_key: &str,
        own_nonce: &str,
        peer_public_key: &str,
        peer_nonce: &str,
    ) -> Result<PlaintextResult> {
        let _enter = self.span.enter();
        let context =
            PartyContext::from_base64(own_private_key, own_nonce, peer_public_key, peer_nonce)?;
        let plaintext = self.open(ciphertext, &context)?;
        Ok(PlaintextResult {
            decrypted_data: encode_base64(&plaintext),
        })
    }

    /// Encrypt with an already-decoded context, acting as sender
    pub fn seal(&self, plaintext: &[u8], context: &PartyContext) -> Result<EncryptedEnvelope> {
        let shared = derive_shared_secret(&context.own_private_key, &context.peer_public_key);
        let (sender_nonce, requester_nonce) = context.ordered_nonces(Role::Sender);
        let material = derive_key_material(&shared, sender_nonce, requester_nonce)?;
        drop(shared);

        let ciphertext = encrypt_aes_gcm(plaintext, &material.key, &material.iv)?;
        debug!(
            peer = %codec::public_key_fingerprint(&context.peer_public_key),
            bytes = ciphertext.len(),
            "Message encrypted"
        );

        Ok(EncryptedEnvelope {
            encrypted_data: encode_base64(&ciphertext),
        })
    }

    /// Decrypt with an already-decoded context, acting as requester
    pub fn open(&self, ciphertext: &str, context: &PartyContext) -> Result<Vec<u8>> {
        if !is_valid_base64(ciphertext) {
            return Err(CryptoError::encoding("ciphertext", "value must be base64 encoded"));
        }
        let ciphertext = decode_base64(ciphertext, "ciphertext")?;

        let shared = derive_shared_secret(&context.own_private_key, &context.peer_public_key);
        let (sender_nonce, requester_nonce) = context.ordered_nonces(Role::Requester);
        let material = derive_key_material(&shared, sender_nonce, requester_nonce)?;
        drop(shared);

        let plaintext = decrypt_aes_gcm(&ciphertext, &material.key, &material.iv).map_err(|e| {
            warn!(
                peer = %codec::public_key_fingerprint(&context.peer_public_key),
                "Envelope failed authentication"
            );
            match e {
                CryptoError::AuthenticationFailed { .. } => CryptoError::AuthenticationFailed {
                    operation: "decrypt_message".to_string(),
                },
                other => other,
            }
        })?;

        debug!(bytes = plaintext.len(), "Message decrypted");
        Ok(plaintext)
    }
}

// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! ECDH Envelope Encryption
//!
//! This module implements the primitives and orchestration for two-party
//! envelope encryption:
//!
//! - **Key Material**: secp256k1 key pair plus a 32-byte nonce per party
//! - **Codec**: base64, X.509 public keys, raw private scalars
//! - **ECDH**: shared secret from own private key and peer public key
//! - **KDF**: HKDF-SHA256 over the shared secret, salted with both nonces
//! - **AES-GCM**: AES-256-GCM authenticated encryption
//! - **Envelope**: validated encrypt/decrypt over base64 inputs
//! - **Batch**: six-line file input for a single operation
//!
//! ## Security Considerations
//!
//! - Shared secrets and derived keys are zeroized on drop and never logged
//! - The AES-GCM IV is derived from both nonces, so a given pair of key
//!   materials must not be used to encrypt two different messages
//! - Authentication failures carry no detail about their cause
//!
//! ## Protocol Flow
//!
//! 1. Each party generates key material and publishes its public key and nonce
//! 2. Sender performs ECDH with the requester's public key
//! 3. Sender derives key + IV with HKDF, salt = sender nonce || requester nonce
//! 4. Sender encrypts with AES-256-GCM and sends the base64 ciphertext
//! 5. Requester performs ECDH with the sender's public key, derives the same
//!    key + IV with the same salt order, and decrypts

pub mod aes_gcm;
pub mod batch;
pub mod codec;
pub mod ecdh;
pub mod envelope;
pub mod error;
pub mod kdf;
pub mod key_material;

pub use self::aes_gcm::{decrypt_aes_gcm, encrypt_aes_gcm};
pub use batch::{process_batch, process_batch_file, BatchOperation, BatchRequest, BatchResponse};
pub use codec::{
    decode_base64, decode_private_key, decode_public_key, encode_base64, encode_private_key,
    encode_public_key, is_valid_base64,
};
pub use ecdh::{derive_shared_secret, derive_shared_secret_from_bytes, SharedSecret};
pub use envelope::{EncryptedEnvelope, EnvelopeService, PartyContext, PlaintextResult, Role};
pub use error::{CryptoError, ErrorKind, Result};
pub use kdf::{derive_key_material, DerivedKeyMaterial};
pub use key_material::{KeyMaterial, KeyMaterialResponse, Nonce};

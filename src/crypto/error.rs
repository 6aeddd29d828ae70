// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Crypto Error Types
//!
//! Every failure in the envelope core surfaces as a [`CryptoError`]. Each
//! variant carries enough context to tell the caller which input or step
//! failed, and maps onto a coarse [`ErrorKind`] so callers can separate
//! "you gave me garbage" from "this data has been tampered with".
//!
//! ## Error Kinds
//!
//! - **Generation**: the secure random source failed (fatal, never retried)
//! - **Encoding**: malformed base64, wrong field length, non-UTF-8 plaintext
//! - **InvalidKey**: private scalar out of range, public point not on curve
//! - **Derivation**: HKDF invariant violation (a bug, should be unreachable)
//! - **Authentication**: AEAD tag check failed (tampered or wrong-key data)
//! - **InvalidInput**: malformed batch file (line count, operation tag)
//!
//! ## Usage Example
//!
//! ```rust
//! use ecdh_envelope::crypto::{CryptoError, ErrorKind};
//!
//! let err = CryptoError::AuthenticationFailed {
//!     operation: "decrypt_message".to_string(),
//! };
//! assert_eq!(err.kind(), ErrorKind::Authentication);
//! ```

use thiserror::Error;

/// Result alias used throughout the crypto module
pub type Result<T> = std::result::Result<T, CryptoError>;

/// Coarse classification of a [`CryptoError`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    Generation,
    Encoding,
    InvalidKey,
    Derivation,
    Authentication,
    InvalidInput,
}

impl ErrorKind {
    /// Stable lowercase name, used in CLI error output
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::Generation => "generation_error",
            ErrorKind::Encoding => "encoding_error",
            ErrorKind::InvalidKey => "invalid_key_error",
            ErrorKind::Derivation => "derivation_error",
            ErrorKind::Authentication => "authentication_error",
            ErrorKind::InvalidInput => "invalid_input_error",
        }
    }
}

/// Error type for all envelope operations
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CryptoError {
    /// Secure random source could not produce key material
    #[error("Key material generation failed: {reason}")]
    GenerationFailed { reason: String },

    /// Input was not valid base64 or had the wrong shape
    ///
    /// This error occurs when:
    /// - A field contains characters outside the base64 alphabet
    /// - Padding is missing or non-canonical
    /// - Decrypted bytes are not valid UTF-8
    #[error("Invalid encoding for '{field}': {reason}")]
    InvalidEncoding {
        /// Which field failed (e.g., "own_nonce", "ciphertext")
        field: String,
        /// Specific failure reason
        reason: String,
    },

    /// Nonce decoded to the wrong number of bytes
    #[error("Invalid nonce size for '{field}': expected {expected_size} bytes, got {actual_size} bytes")]
    InvalidNonce {
        field: String,
        expected_size: usize,
        actual_size: usize,
    },

    /// Invalid cryptographic key
    ///
    /// This error occurs when:
    /// - Private scalar has the wrong length, is zero, or exceeds the curve order
    /// - Public key is not a point on secp256k1 or is the identity
    /// - Public key is neither X.509 DER nor SEC1
    #[error("Invalid key ({key_type}): {reason}")]
    InvalidKey {
        /// Type of key that failed (e.g., "own_private_key", "peer_public_key")
        key_type: String,
        reason: String,
    },

    /// HKDF expansion failed
    #[error("Key derivation failed during {operation}: {reason}")]
    KeyDerivationFailed { operation: String, reason: String },

    /// AEAD integrity check failed
    ///
    /// Deliberately carries no reason: the caller learns only that the
    /// ciphertext is not authentic under the supplied keys.
    #[error("Authentication failed during {operation}")]
    AuthenticationFailed { operation: String },

    /// Batch file rejected before any cryptographic work
    #[error("Invalid batch input at line {line}: {reason}")]
    InvalidBatchInput { line: usize, reason: String },

    /// Batch file could not be read
    #[error("Failed to read batch input: {0}")]
    Io(String),
}

impl CryptoError {
    /// Map this error onto its taxonomy kind
    pub fn kind(&self) -> ErrorKind {
        match self {
            CryptoError::GenerationFailed { .. } => ErrorKind::Generation,
            CryptoError::InvalidEncoding { .. } | CryptoError::InvalidNonce { .. } => {
                ErrorKind::Encoding
            }
            CryptoError::InvalidKey { .. } => ErrorKind::InvalidKey,
            CryptoError::KeyDerivationFailed { .. } => ErrorKind::Derivation,
            CryptoError::AuthenticationFailed { .. } => ErrorKind::Authentication,
            CryptoError::InvalidBatchInput { .. } | CryptoError::Io(_) => ErrorKind::InvalidInput,
        }
    }

    /// Whether the caller can fix this by supplying different input.
    ///
    /// Generation and derivation failures are fatal. Authentication failures
    /// mean the message is untrusted and must not be retried.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self.kind(),
            ErrorKind::Encoding | ErrorKind::InvalidKey | ErrorKind::InvalidInput
        )
    }

    pub(crate) fn encoding(field: &str, reason: impl Into<String>) -> Self {
        CryptoError::InvalidEncoding {
            field: field.to_string(),
            reason: reason.into(),
        }
    }

    pub(crate) fn invalid_key(key_type: &str, reason: impl Into<String>) -> Self {
        CryptoError::InvalidKey {
            key_type: key_type.to_string(),
            reason: reason.into(),
        }
    }
}

// Conversion from base64 decode errors
impl From<base64::DecodeError> for CryptoError {
    fn from(err: base64::DecodeError) -> Self {
        CryptoError::encoding("base64_field", format!("base64 decode error: {}", err))
    }
}

// Conversion from k256 errors (elliptic curve operations)
impl From<k256::elliptic_curve::Error> for CryptoError {
    fn from(err: k256::elliptic_curve::Error) -> Self {
        CryptoError::invalid_key("unknown", format!("k256 error: {}", err))
    }
}

// aes-gcm errors are opaque and only raised by tag verification
impl From<aes_gcm::Error> for CryptoError {
    fn from(_: aes_gcm::Error) -> Self {
        CryptoError::AuthenticationFailed {
            operation: "AEAD".to_string(),
        }
    }
}

impl From<std::io::Error> for CryptoError {
    fn from(err: std::io::Error) -> Self {
        CryptoError::Io(err.to_string())
    }
}

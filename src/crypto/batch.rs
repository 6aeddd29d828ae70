// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Batch File Input
//!
//! A batch file describes one envelope operation as six newline-separated
//! fields:
//!
//! ```text
//! e | d              operation tag
//! <payload>          plaintext for `e`, base64 ciphertext for `d`
//! <own nonce>        base64
//! <peer nonce>       base64
//! <own private key>  base64
//! <peer public key>  base64
//! ```
//!
//! The whole file is validated (line count, tag, base64-ness of lines 3–6)
//! before any key is parsed. CRLF endings and one trailing newline are
//! accepted.

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use super::codec::is_valid_base64;
use super::envelope::{EncryptedEnvelope, EnvelopeService, PlaintextResult};
use super::error::{CryptoError, Result};

/// Number of fields in a batch file
pub const BATCH_FIELD_COUNT: usize = 6;

const FIELD_NAMES: [&str; BATCH_FIELD_COUNT] = [
    "operation",
    "payload",
    "own_nonce",
    "peer_nonce",
    "own_private_key",
    "peer_public_key",
];

/// Operation requested by the first line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BatchOperation {
    Encrypt,
    Decrypt,
}

impl BatchOperation {
    fn from_tag(tag: &str) -> Option<Self> {
        match tag {
            "e" => Some(BatchOperation::Encrypt),
            "d" => Some(BatchOperation::Decrypt),
            _ => None,
        }
    }
}

/// A validated batch request
#[derive(Clone, PartialEq, Eq)]
pub struct BatchRequest {
    pub operation: BatchOperation,
    pub payload: String,
    pub own_nonce: String,
    pub peer_nonce: String,
    pub own_private_key: String,
    pub peer_public_key: String,
}

impl std::fmt::Debug for BatchRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BatchRequest")
            .field("operation", &self.operation)
            .field("payload_len", &self.payload.len())
            .finish_non_exhaustive()
    }
}

/// Output of a batch operation, serialized as whichever result it holds
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum BatchResponse {
    Encrypted(EncryptedEnvelope),
    Decrypted(PlaintextResult),
}

impl BatchRequest {
    /// Parse and validate batch text
    ///
    /// # Errors
    ///
    /// `InvalidBatchInput` if there are more or fewer than six lines, the tag
    /// is not exactly `e` or `d`, or any of lines 3–6 is not base64.
    pub fn parse(input: &str) -> Result<Self> {
        let body = input
            .strip_suffix("\r\n")
            .or_else(|| input.strip_suffix('\n'))
            .unwrap_or(input);

        let lines: Vec<&str> = body
            .split('\n')
            .map(|line| line.strip_suffix('\r').unwrap_or(line))
            .collect();

        if lines.len() > BATCH_FIELD_COUNT {
            return Err(CryptoError::InvalidBatchInput {
                line: BATCH_FIELD_COUNT + 1,
                reason: format!(
                    "too many lines: expected at most {}, got {}",
                    BATCH_FIELD_COUNT,
                    lines.len()
                ),
            });
        }
        if lines.len() < BATCH_FIELD_COUNT {
            return Err(CryptoError::InvalidBatchInput {
                line: lines.len() + 1,
                reason: format!("missing field '{}'", FIELD_NAMES[lines.len()]),
            });
        }

        let operation =
            BatchOperation::from_tag(lines[0]).ok_or_else(|| CryptoError::InvalidBatchInput {
                line: 1,
                reason: "operation must be exactly 'e' or 'd'".to_string(),
            })?;

        for (index, value) in lines.iter().enumerate().skip(2) {
            if !is_valid_base64(value) {
                return Err(CryptoError::InvalidBatchInput {
                    line: index + 1,
                    reason: format!("'{}' must be base64 encoded", FIELD_NAMES[index]),
                });
            }
        }

        Ok(Self {
            operation,
            payload: lines[1].to_string(),
            own_nonce: lines[2].to_string(),
            peer_nonce: lines[3].to_string(),
            own_private_key: lines[4].to_string(),
            peer_public_key: lines[5].to_string(),
        })
    }

    /// Run the request through the envelope service
    pub fn execute(&self, service: &EnvelopeService) -> Result<BatchResponse> {
        debug!(operation = ?self.operation, "Executing batch request");
        match self.operation {
            BatchOperation::Encrypt => service
                .encrypt_message(
                    &self.payload,
                    &self.own_private_key,
                    &self.own_nonce,
                    &self.peer_public_key,
                    &self.peer_nonce,
                )
                .map(BatchResponse::Encrypted),
            BatchOperation::Decrypt => service
                .decrypt_message(
                    &self.payload,
                    &self.own_private_key,
                    &self.own_nonce,
                    &self.peer_public_key,
                    &self.peer_nonce,
                )
                .map(BatchResponse::Decrypted),
        }
    }
}

/// Parse and execute batch text
pub fn process_batch(input: &str, service: &EnvelopeService) -> Result<BatchResponse> {
    BatchRequest::parse(input)?.execute(service)
}

/// Read, parse and execute a batch file
pub fn process_batch_file(path: impl AsRef<Path>, service: &EnvelopeService) -> Result<BatchResponse> {
    let path = path.as_ref();
    let input = std::fs::read_to_string(path)?;
    info!(path = %path.display(), "Processing batch file");
    process_batch(&input, service)
}

// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
pub mod cli;
pub mod config;
pub mod crypto;
pub mod version;

pub use crypto::{
    CryptoError, EncryptedEnvelope, EnvelopeService, ErrorKind, KeyMaterial, KeyMaterialResponse,
    PlaintextResult,
};

// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Command-line interface
//!
//! Every command prints a single JSON object on stdout in the response
//! shapes the library serializes (`{"privateKey", "x509PublicKey", "nonce"}`,
//! `{"encryptedData"}`, `{"decryptedData"}`).

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use serde_json::Value;
use tracing::Level;

use crate::config::CliConfig;
use crate::crypto::{process_batch_file, EnvelopeService};
use crate::version;

/// ECDH envelope encryption CLI
#[derive(Parser, Debug)]
#[command(name = "ecdh-envelope-cli")]
#[command(version)]
#[command(about = "Generate key material and encrypt/decrypt ECDH envelopes", long_about = None)]
pub struct Cli {
    /// Pretty-print JSON output (overrides ENVELOPE_PRETTY_JSON)
    #[arg(long, global = true)]
    pub pretty: bool,

    /// Log level for stderr output (overrides ENVELOPE_LOG_LEVEL)
    #[arg(long, global = true)]
    pub log_level: Option<Level>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Generate a key pair and nonce
    #[command(alias = "gkm")]
    GenerateKeyMaterial,

    /// Encrypt a UTF-8 string as the sender
    #[command(alias = "e")]
    Encrypt(SenderArgs),

    /// Encrypt base64-encoded bytes as the sender
    #[command(alias = "se")]
    SaneEncrypt(SenderArgs),

    /// Decrypt to a UTF-8 string as the requester
    #[command(alias = "d")]
    Decrypt(RequesterArgs),

    /// Decrypt to base64-encoded bytes as the requester
    #[command(alias = "sd")]
    SaneDecrypt(RequesterArgs),

    /// Run the six-line operation described in a file
    #[command(alias = "f")]
    File {
        /// Path to the batch file
        path: PathBuf,
    },

    /// Print version and algorithm information
    Version,
}

#[derive(Args, Debug)]
pub struct SenderArgs {
    /// Data to encrypt
    pub data: String,
    /// Sender nonce (base64)
    pub sender_nonce: String,
    /// Requester nonce (base64)
    pub requester_nonce: String,
    /// Sender private key (base64)
    pub sender_private_key: String,
    /// Requester public key, X.509 or SEC1 (base64)
    pub requester_public_key: String,
}

#[derive(Args, Debug)]
pub struct RequesterArgs {
    /// Base64 ciphertext
    pub encrypted_data: String,
    /// Requester nonce (base64)
    pub requester_nonce: String,
    /// Sender nonce (base64)
    pub sender_nonce: String,
    /// Requester private key (base64)
    pub requester_private_key: String,
    /// Sender public key, X.509 or SEC1 (base64)
    pub sender_public_key: String,
}

impl Cli {
    /// Apply command-line overrides on top of environment configuration
    pub fn resolve_config(&self, mut config: CliConfig) -> CliConfig {
        if self.pretty {
            config.pretty_json = true;
        }
        if let Some(level) = self.log_level {
            config.log_level = level;
        }
        config
    }
}

/// Execute CLI command, returning the JSON to print
pub fn execute(cli: Cli, service: &EnvelopeService) -> Result<Value> {
    let value = match cli.command {
        Commands::GenerateKeyMaterial => serde_json::to_value(service.generate_key_material()?)?,
        Commands::Encrypt(args) => serde_json::to_value(service.encrypt_message(
            &args.data,
            &args.sender_private_key,
            &args.sender_nonce,
            &args.requester_public_key,
            &args.requester_nonce,
        )?)?,
        Commands::SaneEncrypt(args) => serde_json::to_value(service.encrypt_base64_message(
            &args.data,
            &args.sender_private_key,
            &args.sender_nonce,
            &args.requester_public_key,
            &args.requester_nonce,
        )?)?,
        Commands::Decrypt(args) => serde_json::to_value(service.decrypt_message(
            &args.encrypted_data,
            &args.requester_private_key,
            &args.requester_nonce,
            &args.sender_public_key,
            &args.sender_nonce,
        )?)?,
        Commands::SaneDecrypt(args) => serde_json::to_value(service.decrypt_message_to_base64(
            &args.encrypted_data,
            &args.requester_private_key,
            &args.requester_nonce,
            &args.sender_public_key,
            &args.sender_nonce,
        )?)?,
        Commands::File { path } => {
            let response = process_batch_file(&path, service)
                .with_context(|| format!("batch file {}", path.display()))?;
            serde_json::to_value(response)?
        }
        Commands::Version => version::get_version_info(),
    };
    Ok(value)
}

/// Render a JSON result according to configuration
pub fn render(value: &Value, config: &CliConfig) -> Result<String> {
    let rendered = if config.pretty_json {
        serde_json::to_string_pretty(value)?
    } else {
        serde_json::to_string(value)?
    };
    Ok(rendered)
}

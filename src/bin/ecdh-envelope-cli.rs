// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
use anyhow::Result;
use clap::Parser;
use ecdh_envelope::{
    cli::{execute, render, Cli},
    config::CliConfig,
    crypto::{CryptoError, EnvelopeService},
    version,
};

fn main() -> Result<()> {
    // Missing .env is fine
    dotenv::dotenv().ok();

    let cli = Cli::parse();
    let config = cli.resolve_config(CliConfig::from_env());

    // Initialize logging on stderr so stdout carries only JSON
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_max_level(config.log_level)
        .init();
    tracing::debug!("{}", version::get_version_string());

    let service = EnvelopeService::with_span(tracing::info_span!("cli"));
    match execute(cli, &service) {
        Ok(value) => {
            println!("{}", render(&value, &config)?);
            Ok(())
        }
        Err(e) => {
            match e.downcast_ref::<CryptoError>() {
                Some(crypto) => eprintln!("❌ Error ({}): {:#}", crypto.kind().as_str(), e),
                None => eprintln!("❌ Error: {:#}", e),
            }
            std::process::exit(1);
        }
    }
}

// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! CLI Configuration
//!
//! Settings for the command-line tool, read from environment variables
//! (optionally populated from a `.env` file by the binary).
//!
//! | Variable               | Default | Meaning                          |
//! | ---------------------- | ------- | -------------------------------- |
//! | `ENVELOPE_LOG_LEVEL`   | `info`  | tracing level for stderr output  |
//! | `ENVELOPE_PRETTY_JSON` | `false` | pretty-print JSON results        |

use std::env;
use tracing::Level;

pub const LOG_LEVEL_VAR: &str = "ENVELOPE_LOG_LEVEL";
pub const PRETTY_JSON_VAR: &str = "ENVELOPE_PRETTY_JSON";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CliConfig {
    pub log_level: Level,
    pub pretty_json: bool,
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            log_level: Level::INFO,
            pretty_json: false,
        }
    }
}

impl CliConfig {
    /// Load from the process environment
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load using an arbitrary variable lookup
    ///
    /// Unparseable values fall back to the default and are reported on
    /// stderr, since the tracing subscriber is not installed yet.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(level) = lookup(LOG_LEVEL_VAR) {
            match level.trim().parse::<Level>() {
                Ok(level) => config.log_level = level,
                Err(_) => eprintln!(
                    "⚠️  Ignoring invalid {}='{}', using {}",
                    LOG_LEVEL_VAR, level, config.log_level
                ),
            }
        }

        if let Some(pretty) = lookup(PRETTY_JSON_VAR) {
            config.pretty_json = parse_bool(&pretty);
        }

        config
    }
}

fn parse_bool(value: &str) -> bool {
    let value = value.trim();
    value.eq_ignore_ascii_case("true") || value == "1"
}

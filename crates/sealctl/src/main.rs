//! `sealctl` — binary entry point.
//!
//! Startup sequence:
//! 1. Parse the command line.
//! 2. Load and validate [`Config`] from environment variables.
//! 3. Initialise structured JSON logging.
//! 4. Build the codec (primary, or primary + legacy during a migration).
//! 5. Run the command against stdin/stdout.

mod cli;
mod commands;
mod config;
mod migration;
mod telemetry;

use std::io;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;

use cli::{Cli, Command};
use commands::Direction;
use config::Config;
use migration::MigratingCodec;
use secure_codec::{Codec, SecureCodec};

fn main() -> Result<()> {
    // -----------------------------------------------------------------------
    // 1. Command line
    // -----------------------------------------------------------------------
    let cli = Cli::parse();

    // -----------------------------------------------------------------------
    // 2. Configuration
    // -----------------------------------------------------------------------
    let cfg = Config::from_env().map_err(|e| {
        // Telemetry is not yet up; write to stderr directly.
        eprintln!("ERROR: sealctl configuration invalid: {e:#}");
        e
    })?;

    // -----------------------------------------------------------------------
    // 3. Telemetry
    // -----------------------------------------------------------------------
    telemetry::init(&cfg.log_level)?;
    info!(
        version = env!("CARGO_PKG_VERSION"),
        scheme = %cfg.codec_scheme,
        migrating = cfg.legacy_codec_scheme.is_some(),
        "sealctl starting"
    );

    // -----------------------------------------------------------------------
    // 4. Codec
    // -----------------------------------------------------------------------
    let codec = build_codec(&cfg)?;

    // -----------------------------------------------------------------------
    // 5. Command
    // -----------------------------------------------------------------------
    let stdin = io::stdin().lock();
    let mut stdout = io::stdout().lock();
    match &cli.command {
        Command::Encrypt { values } => {
            commands::process(codec.as_ref(), Direction::Encrypt, values, stdin, &mut stdout)?;
        }
        Command::Decrypt { values } => {
            commands::process(codec.as_ref(), Direction::Decrypt, values, stdin, &mut stdout)?;
        }
        Command::Describe => {
            commands::describe(cfg.codec_scheme, cfg.legacy_codec_scheme, &mut stdout)?;
        }
    }
    Ok(())
}

/// Construct the process-wide codec from configuration.
fn build_codec(cfg: &Config) -> Result<Box<dyn Codec>> {
    let primary = SecureCodec::new(cfg.codec_scheme, &cfg.primary_key()?)
        .context("failed to construct primary codec")?;

    match cfg.legacy()? {
        Some((scheme, key)) => {
            let legacy = SecureCodec::new(scheme, &key)
                .context("failed to construct legacy codec")?;
            Ok(Box::new(MigratingCodec::new(primary, legacy)))
        }
        None => Ok(Box::new(primary)),
    }
}

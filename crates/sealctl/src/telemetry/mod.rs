//! Telemetry initialisation for `sealctl`.
//!
//! Structured JSON logs only, written to stderr so that stdout carries nothing
//! but envelopes or plaintexts.
//!
//! # Telemetry invariants
//!
//! - **No plaintext, envelope text or key material** appears in any log field.
//! - Log level is configurable via `SEALCTL_LOG_LEVEL` (default: `info`);
//!   `RUST_LOG` takes precedence when set.

use anyhow::Result;
use tracing_subscriber::EnvFilter;

/// Initialise the tracing subscriber.
///
/// # Errors
///
/// Returns an error if the subscriber has already been set.
pub fn init(log_level: &str) -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(log_level));

    tracing_subscriber::fmt()
        .json()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|e| anyhow::anyhow!("failed to initialise sealctl tracing subscriber: {e}"))
}

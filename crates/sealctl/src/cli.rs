//! Command-line surface.

use clap::{Parser, Subcommand};

/// Seal and open secure-codec envelopes.
///
/// Keys and schemes come from the environment: `SEALCTL_CODEC_KEY`,
/// `SEALCTL_CODEC_SCHEME`, and optionally `SEALCTL_LEGACY_CODEC_KEY` with
/// `SEALCTL_LEGACY_CODEC_SCHEME` while migrating between schemes.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Encrypt each plaintext into an envelope, one per output line.
    ///
    /// Without arguments, every stdin line is a plaintext.
    Encrypt {
        /// Plaintexts to seal.
        values: Vec<String>,
    },

    /// Decrypt each envelope back to its plaintext, one per output line.
    ///
    /// Without arguments, every stdin line is an envelope.
    Decrypt {
        /// Envelopes to open.
        values: Vec<String>,
    },

    /// Print the configured envelope wire format(s) as JSON.
    Describe,
}

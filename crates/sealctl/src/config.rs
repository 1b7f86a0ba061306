//! Configuration loading and validation for `sealctl`.
//!
//! All values are read from `SEALCTL_`-prefixed environment variables at
//! startup. The process exits with a clear error message if a required
//! variable is missing or a key does not decode to 32 bytes.

use anyhow::{Context, Result};
use serde::Deserialize;

use common::Scheme;
use secure_codec::SecretKey;

/// Validated `sealctl` configuration.
#[derive(Clone, Deserialize)]
pub struct Config {
    /// Base64 (standard alphabet) encoding of the 32-byte codec key.
    /// **Required.**
    pub codec_key: String,

    /// Envelope scheme used for all new envelopes.
    #[serde(default = "default_scheme")]
    pub codec_scheme: Scheme,

    /// Key of the scheme being migrated away from. Set together with
    /// `legacy_codec_scheme` or not at all.
    #[serde(default)]
    pub legacy_codec_key: Option<String>,

    /// Scheme of envelopes written before the migration.
    #[serde(default)]
    pub legacy_codec_scheme: Option<Scheme>,

    /// Tracing log level (e.g. `"info"`, `"debug"`).
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_scheme() -> Scheme {
    Scheme::CbcHmacSha256
}
fn default_log_level() -> String {
    "info".into()
}

impl Config {
    /// Load and validate configuration from environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error if any required variable is absent or invalid.
    pub fn from_env() -> Result<Self> {
        let cfg = config::Config::builder()
            .add_source(config::Environment::with_prefix("SEALCTL"))
            .build()
            .context("failed to build sealctl configuration")?;

        let c: Config = cfg
            .try_deserialize()
            .context("failed to deserialise sealctl configuration")?;

        c.validate()?;
        Ok(c)
    }

    /// The primary codec key.
    pub fn primary_key(&self) -> Result<SecretKey> {
        SecretKey::from_base64(&self.codec_key).context("SEALCTL_CODEC_KEY is invalid")
    }

    /// The legacy scheme and key, when a migration is configured.
    pub fn legacy(&self) -> Result<Option<(Scheme, SecretKey)>> {
        match (&self.legacy_codec_scheme, &self.legacy_codec_key) {
            (Some(scheme), Some(key)) => {
                let key = SecretKey::from_base64(key)
                    .context("SEALCTL_LEGACY_CODEC_KEY is invalid")?;
                Ok(Some((*scheme, key)))
            }
            _ => Ok(None),
        }
    }

    /// Validate all fields, returning a descriptive error on the first failure.
    fn validate(&self) -> Result<()> {
        if self.codec_key.trim().is_empty() {
            anyhow::bail!("SEALCTL_CODEC_KEY is required and must not be empty");
        }
        self.primary_key()?;

        match (&self.legacy_codec_scheme, &self.legacy_codec_key) {
            (Some(_), None) | (None, Some(_)) => anyhow::bail!(
                "SEALCTL_LEGACY_CODEC_SCHEME and SEALCTL_LEGACY_CODEC_KEY must be set together"
            ),
            (Some(legacy), Some(_)) if *legacy == self.codec_scheme => anyhow::bail!(
                "SEALCTL_LEGACY_CODEC_SCHEME must differ from SEALCTL_CODEC_SCHEME"
            ),
            _ => {}
        }
        self.legacy()?;
        Ok(())
    }
}

impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // Keys stay out of logs and panic messages.
        f.debug_struct("Config")
            .field("codec_key", &"[REDACTED]")
            .field("codec_scheme", &self.codec_scheme)
            .field(
                "legacy_codec_key",
                &self.legacy_codec_key.as_ref().map(|_| "[REDACTED]"),
            )
            .field("legacy_codec_scheme", &self.legacy_codec_scheme)
            .field("log_level", &self.log_level)
            .finish()
    }
}

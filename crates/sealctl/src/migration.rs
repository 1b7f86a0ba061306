//! Explicit two-codec fallback for moving envelopes between schemes.
//!
//! New envelopes are always sealed by the primary codec. Opening tries the
//! primary first and only then the legacy codec; each codec still parses
//! exactly its own format, so neither ever sees a mixed encoding.

use tracing::debug;

use common::{CodecError, Scheme};
use secure_codec::Codec;

/// Primary codec plus the codec of the scheme being retired.
pub struct MigratingCodec<P, L> {
    primary: P,
    legacy: L,
}

impl<P: Codec, L: Codec> MigratingCodec<P, L> {
    pub fn new(primary: P, legacy: L) -> Self {
        Self { primary, legacy }
    }
}

impl<P: Codec, L: Codec> Codec for MigratingCodec<P, L> {
    fn scheme(&self) -> Scheme {
        self.primary.scheme()
    }

    fn encrypt(&self, plaintext: &str) -> Result<String, CodecError> {
        self.primary.encrypt(plaintext)
    }

    /// Open with the primary codec, falling back to the legacy one.
    ///
    /// If both fail, the primary codec's error is returned.
    fn decrypt(&self, envelope: &str) -> Result<String, CodecError> {
        let primary_err = match self.primary.decrypt(envelope) {
            Ok(plaintext) => return Ok(plaintext),
            Err(e) => e,
        };
        match self.legacy.decrypt(envelope) {
            Ok(plaintext) => {
                debug!(
                    primary = %self.primary.scheme(),
                    legacy = %self.legacy.scheme(),
                    "opened envelope with legacy codec"
                );
                Ok(plaintext)
            }
            Err(_) => Err(primary_err),
        }
    }
}

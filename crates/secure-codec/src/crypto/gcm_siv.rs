//! AES-256-GCM-SIV envelopes.
//!
//! **Algorithm choice:** AES-256-GCM-SIV (RFC 8452) is nonce-misuse-resistant,
//! so an accidental nonce collision leaks only plaintext equality rather than
//! the authentication key. A fresh random 96-bit nonce is still drawn per call,
//! which keeps two encryptions of the same plaintext distinct.
//!
//! **Do NOT substitute plain AES-256-GCM with a fixed nonce.** GCM nonce reuse
//! is catastrophic — it breaks both confidentiality and authentication.
//!
//! # Envelope
//!
//! ```text
//! base64url-no-pad( nonce[12] || ciphertext[len(p)] || tag[16] )
//! ```

use aes_gcm_siv::{
    aead::{Aead, KeyInit},
    Aes256GcmSiv, Nonce,
};
use tracing::debug;

use common::protocol::{GCM_SIV_NONCE_LEN, GCM_SIV_TAG_LEN, KEY_LEN};
use common::{CodecError, Scheme};

use super::{encoding, random};
use crate::codec::Codec;
use crate::key::SecretKey;

/// Shortest raw envelope: nonce and tag around an empty ciphertext.
pub const MIN_ENVELOPE_LEN: usize = GCM_SIV_NONCE_LEN + GCM_SIV_TAG_LEN;

/// AES-256-GCM-SIV codec. Immutable after construction and safe to share.
#[derive(Clone)]
pub struct GcmSivCodec {
    cipher: Aes256GcmSiv,
}

impl GcmSivCodec {
    /// Build the AEAD from `key`.
    ///
    /// # Errors
    ///
    /// Returns [`CodecError::InvalidKey`] if the cipher rejects the key length.
    pub fn new(key: &SecretKey) -> Result<Self, CodecError> {
        let cipher = Aes256GcmSiv::new_from_slice(key.expose()).map_err(|_| {
            CodecError::InvalidKey {
                expected: KEY_LEN,
                actual: key.expose().len(),
            }
        })?;
        Ok(Self { cipher })
    }

    fn seal(&self, plaintext: &[u8]) -> Result<Vec<u8>, CodecError> {
        let nonce_bytes: [u8; GCM_SIV_NONCE_LEN] = random::array();
        let nonce = Nonce::from_slice(&nonce_bytes);

        let sealed = self
            .cipher
            .encrypt(nonce, plaintext)
            .map_err(|_| CodecError::EncryptionFailed)?;

        let mut raw = Vec::with_capacity(GCM_SIV_NONCE_LEN + sealed.len());
        raw.extend_from_slice(&nonce_bytes);
        raw.extend_from_slice(&sealed);
        Ok(raw)
    }

    fn open(&self, raw: &[u8]) -> Result<Vec<u8>, CodecError> {
        if raw.len() < MIN_ENVELOPE_LEN {
            return Err(CodecError::MalformedInput("envelope too short"));
        }
        let (nonce_bytes, sealed) = raw.split_at(GCM_SIV_NONCE_LEN);
        let nonce = Nonce::from_slice(nonce_bytes);
        self.cipher.decrypt(nonce, sealed).map_err(|_| {
            debug!(scheme = %Scheme::Aes256GcmSiv, "aead open failed");
            CodecError::AuthenticationFailed
        })
    }
}

impl Codec for GcmSivCodec {
    fn scheme(&self) -> Scheme {
        Scheme::Aes256GcmSiv
    }

    fn encrypt(&self, plaintext: &str) -> Result<String, CodecError> {
        if plaintext.is_empty() {
            return Err(CodecError::EmptyInput);
        }
        let raw = self.seal(plaintext.as_bytes())?;
        Ok(encoding::encode(self.scheme().text_encoding(), &raw))
    }

    fn decrypt(&self, envelope: &str) -> Result<String, CodecError> {
        let raw = encoding::decode(self.scheme().text_encoding(), envelope)?;
        let plaintext = self.open(&raw)?;
        String::from_utf8(plaintext).map_err(|_| CodecError::DecryptionFailed)
    }
}

impl std::fmt::Debug for GcmSivCodec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GcmSivCodec").finish_non_exhaustive()
    }
}

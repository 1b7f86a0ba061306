//! The [`Codec`] capability and the deployment-selected [`SecureCodec`].

use tracing::debug;

use common::{CodecError, Scheme};

use crate::crypto::{CbcHmacCodec, GcmSivCodec};
use crate::key::SecretKey;

/// Encrypt/decrypt capability handed to consumers.
///
/// Implementations hold no mutable state, so a single instance can be shared
/// across threads (`Arc<dyn Codec>`) for the life of the process.
pub trait Codec: Send + Sync {
    /// The construction this codec produces and accepts.
    fn scheme(&self) -> Scheme;

    /// Seal a non-empty UTF-8 string into a printable envelope.
    ///
    /// # Errors
    ///
    /// Returns [`CodecError::EmptyInput`] for an empty plaintext.
    fn encrypt(&self, plaintext: &str) -> Result<String, CodecError>;

    /// Authenticate and open an envelope produced by [`Codec::encrypt`].
    ///
    /// # Errors
    ///
    /// - [`CodecError::MalformedInput`] if the text cannot be decoded or is
    ///   structurally invalid.
    /// - [`CodecError::AuthenticationFailed`] if the tag does not verify.
    /// - [`CodecError::DecryptionFailed`] if the authenticated payload does
    ///   not decrypt to valid UTF-8.
    fn decrypt(&self, envelope: &str) -> Result<String, CodecError>;
}

/// The codec for one deployment: exactly one construction, chosen by
/// [`Scheme`] at build time.
#[derive(Debug, Clone)]
pub enum SecureCodec {
    CbcHmac(CbcHmacCodec),
    GcmSiv(GcmSivCodec),
}

impl SecureCodec {
    /// Build the codec for `scheme` from an already validated key.
    ///
    /// # Errors
    ///
    /// Returns [`CodecError::InvalidKey`] if the construction rejects the key.
    pub fn new(scheme: Scheme, key: &SecretKey) -> Result<Self, CodecError> {
        let codec = match scheme {
            Scheme::CbcHmacSha256 => Self::CbcHmac(CbcHmacCodec::new(key)?),
            Scheme::Aes256GcmSiv => Self::GcmSiv(GcmSivCodec::new(key)?),
        };
        debug!(scheme = %scheme, "codec constructed");
        Ok(codec)
    }

    /// Build the codec from raw key bytes.
    ///
    /// # Errors
    ///
    /// Returns [`CodecError::InvalidKey`] if `key` is empty or not 32 bytes.
    pub fn from_key_bytes(scheme: Scheme, key: &[u8]) -> Result<Self, CodecError> {
        Self::new(scheme, &SecretKey::from_slice(key)?)
    }

    /// Build the codec from a base64-encoded key, the at-rest key format.
    ///
    /// # Errors
    ///
    /// Returns [`CodecError::InvalidKey`] if the text is not base64 or does
    /// not decode to 32 bytes.
    pub fn from_base64_key(scheme: Scheme, key: &str) -> Result<Self, CodecError> {
        Self::new(scheme, &SecretKey::from_base64(key)?)
    }
}

impl Codec for SecureCodec {
    fn scheme(&self) -> Scheme {
        match self {
            Self::CbcHmac(c) => c.scheme(),
            Self::GcmSiv(c) => c.scheme(),
        }
    }

    fn encrypt(&self, plaintext: &str) -> Result<String, CodecError> {
        match self {
            Self::CbcHmac(c) => c.encrypt(plaintext),
            Self::GcmSiv(c) => c.encrypt(plaintext),
        }
    }

    fn decrypt(&self, envelope: &str) -> Result<String, CodecError> {
        match self {
            Self::CbcHmac(c) => c.decrypt(envelope),
            Self::GcmSiv(c) => c.decrypt(envelope),
        }
    }
}

//! [`SecretKey`]: owned, fixed-length key material for a codec.
//!
//! # Security invariants
//!
//! - The key bytes are **never** logged, serialised or included in traces;
//!   `Debug` prints a redacted placeholder.
//! - The buffer is zeroed when the key is dropped.
//! - Length is validated when the key is built, never at first use.

use base64::{engine::general_purpose::STANDARD, Engine as _};
use zeroize::{Zeroize, ZeroizeOnDrop};

use common::protocol::KEY_LEN;
use common::CodecError;

/// Exactly [`KEY_LEN`] bytes of secret key material.
///
/// At rest the key is expected base64-encoded with the standard alphabet
/// (44 characters including padding); see [`SecretKey::from_base64`].
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct SecretKey(Box<[u8; KEY_LEN]>);

impl SecretKey {
    /// Build a key from raw bytes.
    ///
    /// # Errors
    ///
    /// Returns [`CodecError::InvalidKey`] if `bytes` is empty or not exactly
    /// [`KEY_LEN`] bytes.
    pub fn from_slice(bytes: &[u8]) -> Result<Self, CodecError> {
        if bytes.len() != KEY_LEN {
            return Err(CodecError::InvalidKey {
                expected: KEY_LEN,
                actual: bytes.len(),
            });
        }
        let mut buf = Box::new([0u8; KEY_LEN]);
        buf.copy_from_slice(bytes);
        Ok(Self(buf))
    }

    /// Build a key from its standard base64 representation.
    ///
    /// Surrounding whitespace is ignored so values read from files or
    /// environment variables with a trailing newline are accepted.
    ///
    /// # Errors
    ///
    /// Returns [`CodecError::InvalidKey`] if the text is not valid base64 or
    /// does not decode to exactly [`KEY_LEN`] bytes.
    pub fn from_base64(text: &str) -> Result<Self, CodecError> {
        let mut decoded = STANDARD.decode(text.trim()).map_err(|_| CodecError::InvalidKey {
            expected: KEY_LEN,
            actual: 0,
        })?;
        let key = Self::from_slice(&decoded);
        decoded.zeroize();
        key
    }

    /// Borrow the raw key bytes.
    pub fn expose(&self) -> &[u8; KEY_LEN] {
        &self.0
    }
}

impl From<[u8; KEY_LEN]> for SecretKey {
    fn from(mut bytes: [u8; KEY_LEN]) -> Self {
        let key = Self(Box::new(bytes));
        bytes.zeroize();
        key
    }
}

impl std::fmt::Debug for SecretKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // Never print key material — not even in debug builds.
        f.write_str("SecretKey([REDACTED])")
    }
}

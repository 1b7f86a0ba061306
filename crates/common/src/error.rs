//! Error taxonomy shared by every codec construction and its callers.

use thiserror::Error;

/// Errors produced by a codec.
///
/// Messages never carry plaintext, envelope text or key material, so any
/// variant is safe to log. Variants map to stable machine codes via
/// [`CodecError::code`]:
/// - [`CodecError::InvalidKey`] → `invalid_key`
/// - [`CodecError::EmptyInput`] → `empty_input`
/// - [`CodecError::MalformedInput`] → `malformed_input`
/// - [`CodecError::AuthenticationFailed`] → `authentication_failed`
/// - [`CodecError::DecryptionFailed`] → `decryption_failed`
/// - [`CodecError::EncryptionFailed`] → `encryption_failed`
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CodecError {
    /// The key is empty or not the length the cipher requires.
    #[error("invalid key: expected {expected} bytes, got {actual}")]
    InvalidKey { expected: usize, actual: usize },

    /// `encrypt` was called with an empty plaintext.
    #[error("plaintext must not be empty")]
    EmptyInput,

    /// The envelope could not be parsed: bad text encoding, too short, or
    /// not aligned to the cipher block size.
    #[error("malformed envelope: {0}")]
    MalformedInput(&'static str),

    /// The tag did not match. The envelope was tampered with or sealed under
    /// a different key.
    #[error("envelope failed authentication")]
    AuthenticationFailed,

    /// Authentication passed but the payload did not decrypt to valid,
    /// correctly padded UTF-8.
    #[error("decryption failed after authentication")]
    DecryptionFailed,

    /// The cipher refused to seal the plaintext.
    #[error("encryption failed")]
    EncryptionFailed,
}

impl CodecError {
    /// Returns the stable machine-readable code for this error.
    pub fn code(&self) -> &'static str {
        match self {
            CodecError::InvalidKey { .. } => "invalid_key",
            CodecError::EmptyInput => "empty_input",
            CodecError::MalformedInput(_) => "malformed_input",
            CodecError::AuthenticationFailed => "authentication_failed",
            CodecError::DecryptionFailed => "decryption_failed",
            CodecError::EncryptionFailed => "encryption_failed",
        }
    }

    /// Returns `true` for failures that indicate tampering or a key mismatch
    /// and are worth surfacing as a security event.
    pub fn is_security_event(&self) -> bool {
        matches!(
            self,
            CodecError::AuthenticationFailed | CodecError::DecryptionFailed
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codes_are_stable() {
        assert_eq!(
            CodecError::InvalidKey {
                expected: 32,
                actual: 0
            }
            .code(),
            "invalid_key"
        );
        assert_eq!(CodecError::EmptyInput.code(), "empty_input");
        assert_eq!(CodecError::MalformedInput("x").code(), "malformed_input");
        assert_eq!(
            CodecError::AuthenticationFailed.code(),
            "authentication_failed"
        );
        assert_eq!(CodecError::DecryptionFailed.code(), "decryption_failed");
        assert_eq!(CodecError::EncryptionFailed.code(), "encryption_failed");
    }

    #[test]
    fn security_events() {
        assert!(CodecError::AuthenticationFailed.is_security_event());
        assert!(CodecError::DecryptionFailed.is_security_event());
        assert!(!CodecError::EmptyInput.is_security_event());
        assert!(!CodecError::MalformedInput("too short").is_security_event());
    }

    #[test]
    fn display_includes_reason() {
        let e = CodecError::MalformedInput("envelope too short");
        assert!(e.to_string().contains("envelope too short"));

        let e = CodecError::InvalidKey {
            expected: 32,
            actual: 16,
        };
        assert!(e.to_string().contains("expected 32 bytes, got 16"));
    }
}

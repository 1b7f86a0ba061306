//! Text encodings for raw envelope bytes.

use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine as _};

use common::{CodecError, TextEncoding};

/// Encode raw envelope bytes as printable text.
pub fn encode(encoding: TextEncoding, raw: &[u8]) -> String {
    match encoding {
        TextEncoding::Hex => hex::encode(raw),
        TextEncoding::Base64Url => URL_SAFE_NO_PAD.encode(raw),
    }
}

/// Decode envelope text back to raw bytes.
///
/// # Errors
///
/// Returns [`CodecError::MalformedInput`] if `text` is empty or not valid
/// under `encoding`.
pub fn decode(encoding: TextEncoding, text: &str) -> Result<Vec<u8>, CodecError> {
    if text.is_empty() {
        return Err(CodecError::MalformedInput("envelope is empty"));
    }
    match encoding {
        TextEncoding::Hex => {
            hex::decode(text).map_err(|_| CodecError::MalformedInput("invalid hex encoding"))
        }
        TextEncoding::Base64Url => URL_SAFE_NO_PAD
            .decode(text)
            .map_err(|_| CodecError::MalformedInput("invalid base64url encoding")),
    }
}

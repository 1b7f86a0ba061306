//! Wire contract for encrypted envelopes.
//!
//! Every deployment picks exactly one [`Scheme`]. The scheme fixes the binary
//! layout and the text encoding; the two schemes are not interchangeable and
//! a codec built for one never parses the other's envelopes.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Byte length of every key (AES-256).
pub const KEY_LEN: usize = 32;

/// AES block size; also the CBC IV length.
pub const BLOCK_LEN: usize = 16;

/// CBC initialisation vector length.
pub const CBC_IV_LEN: usize = BLOCK_LEN;

/// HMAC-SHA-256 tag length.
pub const HMAC_TAG_LEN: usize = 32;

/// AES-GCM-SIV nonce length (96 bits).
pub const GCM_SIV_NONCE_LEN: usize = 12;

/// AES-GCM-SIV tag length.
pub const GCM_SIV_TAG_LEN: usize = 16;

// ---------------------------------------------------------------------------
// Scheme
// ---------------------------------------------------------------------------

/// Authenticated-encryption construction used by a deployment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Scheme {
    /// AES-256-CBC with PKCS#7 padding, authenticated by HMAC-SHA-256.
    /// Envelope: `hex(IV || Tag || Ciphertext)`.
    #[serde(rename = "aes-256-cbc-hmac-sha256")]
    CbcHmacSha256,

    /// AES-256-GCM-SIV (RFC 8452).
    /// Envelope: `base64url(Nonce || Ciphertext || Tag)`.
    #[serde(rename = "aes-256-gcm-siv")]
    Aes256GcmSiv,
}

impl Scheme {
    /// Stable identifier, identical to the serde representation.
    pub fn id(&self) -> &'static str {
        match self {
            Scheme::CbcHmacSha256 => "aes-256-cbc-hmac-sha256",
            Scheme::Aes256GcmSiv => "aes-256-gcm-siv",
        }
    }

    /// The single text encoding this scheme's envelopes use.
    pub fn text_encoding(&self) -> TextEncoding {
        match self {
            Scheme::CbcHmacSha256 => TextEncoding::Hex,
            Scheme::Aes256GcmSiv => TextEncoding::Base64Url,
        }
    }

    /// Describe the envelope layout for this scheme.
    pub fn wire_format(&self) -> WireFormat {
        match self {
            Scheme::CbcHmacSha256 => WireFormat {
                scheme: *self,
                encoding: self.text_encoding(),
                key_len: KEY_LEN,
                iv_len: CBC_IV_LEN,
                tag_len: HMAC_TAG_LEN,
                block_len: Some(BLOCK_LEN),
                min_raw_len: CBC_IV_LEN + HMAC_TAG_LEN + BLOCK_LEN,
                layout: "iv || tag || ciphertext",
            },
            Scheme::Aes256GcmSiv => WireFormat {
                scheme: *self,
                encoding: self.text_encoding(),
                key_len: KEY_LEN,
                iv_len: GCM_SIV_NONCE_LEN,
                tag_len: GCM_SIV_TAG_LEN,
                block_len: None,
                min_raw_len: GCM_SIV_NONCE_LEN + GCM_SIV_TAG_LEN,
                layout: "nonce || ciphertext || tag",
            },
        }
    }
}

impl fmt::Display for Scheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

// ---------------------------------------------------------------------------
// Text encoding
// ---------------------------------------------------------------------------

/// Printable encoding applied to the raw envelope bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TextEncoding {
    /// Lowercase hexadecimal on output; either case accepted on input.
    Hex,
    /// URL-safe base64 without `=` padding.
    Base64Url,
}

// ---------------------------------------------------------------------------
// Wire format description
// ---------------------------------------------------------------------------

/// Documented layout of an envelope, for operators and other implementations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WireFormat {
    pub scheme: Scheme,
    pub encoding: TextEncoding,
    pub key_len: usize,
    /// IV (CBC) or nonce (AEAD) length.
    pub iv_len: usize,
    pub tag_len: usize,
    /// Cipher block size when the ciphertext is padded.
    pub block_len: Option<usize>,
    /// Shortest raw envelope accepted by `decrypt`.
    pub min_raw_len: usize,
    pub layout: &'static str,
}

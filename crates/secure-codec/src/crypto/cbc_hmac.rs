//! AES-256-CBC + HMAC-SHA-256 (encrypt-then-MAC) with hex envelopes.
//!
//! # Envelope
//!
//! ```text
//! hex( iv[16] || tag[32] || ciphertext[16·k] )      k ≥ 1
//! tag = HMAC-SHA-256(mac_key, iv || ciphertext)
//! ```
//!
//! The 32-byte codec key is split with HKDF-SHA-256 into independent
//! encryption and MAC subkeys. `decrypt` verifies the tag in constant time
//! before any block is decrypted; a mismatch returns
//! [`CodecError::AuthenticationFailed`] without touching the cipher.

use cbc::cipher::{block_padding::NoPadding, BlockDecryptMut, BlockEncryptMut, KeyIvInit};
use hkdf::Hkdf;
use hmac::{Hmac, Mac};
use sha2::Sha256;
use tracing::debug;
use zeroize::Zeroizing;

use common::protocol::{BLOCK_LEN, CBC_IV_LEN, HMAC_TAG_LEN, KEY_LEN};
use common::{CodecError, Scheme};

use super::{encoding, padding, random};
use crate::codec::Codec;
use crate::key::SecretKey;

type Aes256CbcEnc = cbc::Encryptor<aes::Aes256>;
type Aes256CbcDec = cbc::Decryptor<aes::Aes256>;
type HmacSha256 = Hmac<Sha256>;

const ENC_KEY_INFO: &[u8] = b"secure-codec/v1/enc";
const MAC_KEY_INFO: &[u8] = b"secure-codec/v1/mac";

/// Shortest raw envelope: IV, tag and one ciphertext block.
pub const MIN_ENVELOPE_LEN: usize = CBC_IV_LEN + HMAC_TAG_LEN + BLOCK_LEN;

/// CBC+HMAC codec. Immutable after construction and safe to share.
#[derive(Clone)]
pub struct CbcHmacCodec {
    enc_key: Zeroizing<[u8; KEY_LEN]>,
    /// Keyed HMAC state, cloned for every tag computation.
    mac: HmacSha256,
}

impl CbcHmacCodec {
    /// Derive the encryption and MAC subkeys from `key`.
    ///
    /// # Errors
    ///
    /// Returns [`CodecError::InvalidKey`] if subkey derivation fails (not
    /// reachable with a validated [`SecretKey`]).
    pub fn new(key: &SecretKey) -> Result<Self, CodecError> {
        let invalid = || CodecError::InvalidKey {
            expected: KEY_LEN,
            actual: key.expose().len(),
        };

        let hk = Hkdf::<Sha256>::new(None, key.expose());
        let mut enc_key = Zeroizing::new([0u8; KEY_LEN]);
        let mut mac_key = Zeroizing::new([0u8; KEY_LEN]);
        hk.expand(ENC_KEY_INFO, enc_key.as_mut_slice())
            .map_err(|_| invalid())?;
        hk.expand(MAC_KEY_INFO, mac_key.as_mut_slice())
            .map_err(|_| invalid())?;

        let mac = <HmacSha256 as Mac>::new_from_slice(mac_key.as_slice())
            .map_err(|_| invalid())?;

        Ok(Self { enc_key, mac })
    }

    fn tag(&self, iv: &[u8], ciphertext: &[u8]) -> [u8; HMAC_TAG_LEN] {
        let mut mac = self.mac.clone();
        mac.update(iv);
        mac.update(ciphertext);
        let mut out = [0u8; HMAC_TAG_LEN];
        out.copy_from_slice(&mac.finalize().into_bytes());
        out
    }

    /// Seal raw bytes into a raw (unencoded) envelope.
    fn seal(&self, plaintext: &[u8]) -> Result<Vec<u8>, CodecError> {
        let iv: [u8; CBC_IV_LEN] = random::array();

        let mut buf = Zeroizing::new(padding::pad(plaintext));
        let msg_len = buf.len();
        let ciphertext_len = Aes256CbcEnc::new_from_slices(self.enc_key.as_slice(), &iv)
            .map_err(|_| CodecError::EncryptionFailed)?
            .encrypt_padded_mut::<NoPadding>(&mut buf, msg_len)
            .map_err(|_| CodecError::EncryptionFailed)?
            .len();
        let ciphertext = &buf[..ciphertext_len];

        let tag = self.tag(&iv, ciphertext);

        let mut raw = Vec::with_capacity(CBC_IV_LEN + HMAC_TAG_LEN + ciphertext.len());
        raw.extend_from_slice(&iv);
        raw.extend_from_slice(&tag);
        raw.extend_from_slice(ciphertext);
        Ok(raw)
    }

    /// Authenticate and open a raw envelope.
    fn open(&self, raw: &[u8]) -> Result<Zeroizing<Vec<u8>>, CodecError> {
        if raw.len() < MIN_ENVELOPE_LEN {
            return Err(CodecError::MalformedInput("envelope too short"));
        }
        let (iv, rest) = raw.split_at(CBC_IV_LEN);
        let (tag, ciphertext) = rest.split_at(HMAC_TAG_LEN);
        if ciphertext.len() % BLOCK_LEN != 0 {
            return Err(CodecError::MalformedInput(
                "ciphertext is not a multiple of the block size",
            ));
        }

        let mut mac = self.mac.clone();
        mac.update(iv);
        mac.update(ciphertext);
        if mac.verify_slice(tag).is_err() {
            debug!(scheme = %Scheme::CbcHmacSha256, "tag mismatch");
            return Err(CodecError::AuthenticationFailed);
        }

        let mut buf = Zeroizing::new(ciphertext.to_vec());
        Aes256CbcDec::new_from_slices(self.enc_key.as_slice(), iv)
            .map_err(|_| CodecError::DecryptionFailed)?
            .decrypt_padded_mut::<NoPadding>(&mut buf)
            .map_err(|_| CodecError::DecryptionFailed)?;

        let plaintext = padding::unpad(&buf).map_err(|_| CodecError::DecryptionFailed)?;
        Ok(Zeroizing::new(plaintext.to_vec()))
    }
}

impl Codec for CbcHmacCodec {
    fn scheme(&self) -> Scheme {
        Scheme::CbcHmacSha256
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
        String::from_utf8(plaintext.to_vec()).map_err(|_| CodecError::DecryptionFailed)
    }
}

impl std::fmt::Debug for CbcHmacCodec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CbcHmacCodec").finish_non_exhaustive()
    }
}

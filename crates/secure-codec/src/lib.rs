//! Symmetric authenticated encryption of UTF-8 strings into self-contained,
//! transport-safe envelopes.
//!
//! A [`SecureCodec`] owns one 32-byte key and one [`Scheme`]. `encrypt` draws
//! a fresh IV/nonce per call; `decrypt` authenticates before it decrypts and
//! fails closed on any mismatch.
//!
//! ```
//! use secure_codec::{Codec, Scheme, SecureCodec};
//!
//! let codec = SecureCodec::from_key_bytes(Scheme::CbcHmacSha256, &[0u8; 32])?;
//! let envelope = codec.encrypt("attack at dawn")?;
//! assert_eq!(codec.decrypt(&envelope)?, "attack at dawn");
//! # Ok::<(), secure_codec::CodecError>(())
//! ```

pub mod codec;
pub mod crypto;
pub mod key;

pub use codec::{Codec, SecureCodec};
pub use common::{CodecError, Scheme, TextEncoding, WireFormat};
pub use key::SecretKey;

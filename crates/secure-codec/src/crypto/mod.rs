//! Authenticated-encryption constructions and the helpers beneath them.
//!
//! This module is intentionally free of configuration and I/O.
//!
//! # Envelope formats
//!
//! ```text
//! aes-256-cbc-hmac-sha256   hex( iv[16] || hmac[32] || ciphertext[16·k] )
//! aes-256-gcm-siv           base64url-no-pad( nonce[12] || ciphertext || tag[16] )
//! ```
//!
//! A deployment standardises on one of the two. They are never parsed by the
//! same codec.

pub mod cbc_hmac;
pub mod encoding;
pub mod gcm_siv;
pub mod padding;
pub mod random;

pub use cbc_hmac::CbcHmacCodec;
pub use gcm_siv::GcmSivCodec;

//! Error taxonomy and wire-format contract shared across `secure-codec` crates.

pub mod error;
pub mod protocol;

pub use error::CodecError;
pub use protocol::{Scheme, TextEncoding, WireFormat};

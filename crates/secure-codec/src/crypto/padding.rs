//! PKCS#7 padding to the AES block size.
//!
//! [`unpad`] inspects the whole final block with `subtle` primitives, so the
//! time it takes does not depend on where the padding goes wrong.

use subtle::{Choice, ConstantTimeEq, ConstantTimeGreater, ConstantTimeLess};
use thiserror::Error;

use common::protocol::BLOCK_LEN;

/// The buffer does not end in well-formed PKCS#7 padding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("invalid PKCS#7 padding")]
pub struct PaddingError;

/// Pad `data` to a multiple of [`BLOCK_LEN`].
///
/// Always appends between 1 and [`BLOCK_LEN`] bytes, each holding the pad
/// length, so a block-aligned input gains a full block of padding.
pub fn pad(data: &[u8]) -> Vec<u8> {
    let pad_len = BLOCK_LEN - data.len() % BLOCK_LEN;
    let mut out = Vec::with_capacity(data.len() + pad_len);
    out.extend_from_slice(data);
    out.resize(data.len() + pad_len, pad_len as u8);
    out
}

/// Strip PKCS#7 padding from `buf`.
///
/// # Errors
///
/// Returns [`PaddingError`] if `buf` is empty or not block-aligned, if the
/// pad length is outside `1..=BLOCK_LEN`, or if any pad byte disagrees with it.
pub fn unpad(buf: &[u8]) -> Result<&[u8], PaddingError> {
    if buf.is_empty() || buf.len() % BLOCK_LEN != 0 {
        return Err(PaddingError);
    }
    let tail = &buf[buf.len() - BLOCK_LEN..];
    let pad_len = tail[BLOCK_LEN - 1];

    let mut valid: Choice =
        !pad_len.ct_eq(&0) & !pad_len.ct_gt(&(BLOCK_LEN as u8));
    for (i, byte) in tail.iter().rev().enumerate() {
        let in_pad = (i as u8).ct_lt(&pad_len);
        valid &= !in_pad | byte.ct_eq(&pad_len);
    }

    if bool::from(valid) {
        Ok(&buf[..buf.len() - pad_len as usize])
    } else {
        Err(PaddingError)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_input_padded_to_one_block() {
        let padded = pad(b"abc");
        assert_eq!(padded.len(), BLOCK_LEN);
        assert!(padded[3..].iter().all(|&b| b == 13));
        assert_eq!(unpad(&padded).unwrap(), b"abc");
    }

    #[test]
    fn aligned_input_gains_full_block() {
        let data = [0x41u8; BLOCK_LEN];
        let padded = pad(&data);
        assert_eq!(padded.len(), 2 * BLOCK_LEN);
        assert!(padded[BLOCK_LEN..].iter().all(|&b| b == BLOCK_LEN as u8));
        assert_eq!(unpad(&padded).unwrap(), &data[..]);
    }

    #[test]
    fn empty_input_is_all_padding() {
        let padded = pad(b"");
        assert_eq!(padded, vec![BLOCK_LEN as u8; BLOCK_LEN]);
        assert_eq!(unpad(&padded).unwrap(), b"");
    }

    #[test]
    fn rejects_zero_pad_length() {
        let mut block = [0x41u8; BLOCK_LEN];
        block[BLOCK_LEN - 1] = 0;
        assert_eq!(unpad(&block), Err(PaddingError));
    }

    #[test]
    fn rejects_oversized_pad_length() {
        let block = [BLOCK_LEN as u8 + 1; BLOCK_LEN];
        assert_eq!(unpad(&block), Err(PaddingError));
    }

    #[test]
    fn rejects_inconsistent_pad_bytes() {
        let mut padded = pad(b"hello");
        // First pad byte sits right after the data.
        padded[5] ^= 0x01;
        assert_eq!(unpad(&padded), Err(PaddingError));
    }

    #[test]
    fn rejects_unaligned_and_empty() {
        assert_eq!(unpad(&[]), Err(PaddingError));
        assert_eq!(unpad(&[1u8; BLOCK_LEN - 1]), Err(PaddingError));
    }

    #[test]
    fn data_bytes_equal_to_pad_are_kept() {
        // Data ends in 0x02 and padding is 0x02 0x02: only the pad is removed.
        let mut data = vec![0x41u8; BLOCK_LEN - 3];
        data.push(0x02);
        let padded = pad(&data);
        assert_eq!(unpad(&padded).unwrap(), &data[..]);
    }
}

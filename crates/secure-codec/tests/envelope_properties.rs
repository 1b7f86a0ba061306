//! Behavioural properties of both envelope schemes, exercised through the
//! public API only.

use std::ops::Range;

use proptest::prelude::*;
use secure_codec::crypto::encoding;
use secure_codec::{Codec, CodecError, Scheme, SecureCodec, WireFormat};

const SCHEMES: [Scheme; 2] = [Scheme::CbcHmacSha256, Scheme::Aes256GcmSiv];

fn codec(scheme: Scheme, key_byte: u8) -> SecureCodec {
    SecureCodec::from_key_bytes(scheme, &[key_byte; 32]).unwrap()
}

fn raw(scheme: Scheme, envelope: &str) -> Vec<u8> {
    encoding::decode(scheme.text_encoding(), envelope).unwrap()
}

fn text(scheme: Scheme, raw: &[u8]) -> String {
    encoding::encode(scheme.text_encoding(), raw)
}

/// Byte ranges of the tag and the ciphertext inside a raw envelope.
fn tag_and_ciphertext(wf: &WireFormat, raw_len: usize) -> (Range<usize>, Range<usize>) {
    match wf.scheme {
        Scheme::CbcHmacSha256 => (
            wf.iv_len..wf.iv_len + wf.tag_len,
            wf.iv_len + wf.tag_len..raw_len,
        ),
        Scheme::Aes256GcmSiv => (
            raw_len - wf.tag_len..raw_len,
            wf.iv_len..raw_len - wf.tag_len,
        ),
    }
}

#[test]
fn round_trip_multibyte_and_multiblock() {
    let long = "long plaintext spanning many cipher blocks ".repeat(40);
    let inputs = [
        "a",
        "hello",
        "exactly sixteen!",
        "żółć — ünïcödé ✓ 日本語 🚀",
        long.as_str(),
    ];
    for scheme in SCHEMES {
        let c = codec(scheme, 0x11);
        for p in inputs {
            let envelope = c.encrypt(p).unwrap();
            assert_eq!(c.decrypt(&envelope).unwrap(), p, "{scheme}");
        }
    }
}

#[test]
fn same_plaintext_yields_distinct_envelopes() {
    for scheme in SCHEMES {
        let c = codec(scheme, 0x22);
        let a = c.encrypt("hello").unwrap();
        let b = c.encrypt("hello").unwrap();
        assert_ne!(a, b, "{scheme}");
        assert_eq!(c.decrypt(&a).unwrap(), "hello");
        assert_eq!(c.decrypt(&b).unwrap(), "hello");
    }
}

#[test]
fn envelope_length_depends_only_on_plaintext_length() {
    for scheme in SCHEMES {
        let c = codec(scheme, 0x23);
        let a = c.encrypt("aaaaaaaaaa").unwrap();
        let b = c.encrypt("zzzzzzzzzz").unwrap();
        assert_eq!(a.len(), b.len(), "{scheme}");
    }
}

#[test]
fn every_tag_byte_flip_fails_authentication() {
    for scheme in SCHEMES {
        let c = codec(scheme, 0x33);
        let wf = scheme.wire_format();
        let original = raw(scheme, &c.encrypt("integrity matters").unwrap());
        let (tag, _) = tag_and_ciphertext(&wf, original.len());

        for i in tag {
            let mut forged = original.clone();
            forged[i] ^= 0x80;
            assert_eq!(
                c.decrypt(&text(scheme, &forged)),
                Err(CodecError::AuthenticationFailed),
                "{scheme}: tag byte {i}"
            );
        }
    }
}

#[test]
fn every_ciphertext_byte_flip_fails_authentication() {
    for scheme in SCHEMES {
        let c = codec(scheme, 0x44);
        let wf = scheme.wire_format();
        let original = raw(scheme, &c.encrypt("a payload longer than one block").unwrap());
        let (_, ciphertext) = tag_and_ciphertext(&wf, original.len());

        for i in ciphertext {
            let mut forged = original.clone();
            forged[i] ^= 0x01;
            assert_eq!(
                c.decrypt(&text(scheme, &forged)),
                Err(CodecError::AuthenticationFailed),
                "{scheme}: ciphertext byte {i}"
            );
        }
    }
}

#[test]
fn truncation_never_yields_plaintext() {
    for scheme in SCHEMES {
        let c = codec(scheme, 0x55);
        let envelope = c.encrypt("truncate me please").unwrap();

        // Ten bytes off the raw envelope.
        let mut shortened = raw(scheme, &envelope);
        shortened.truncate(shortened.len() - 10);
        let err = c.decrypt(&text(scheme, &shortened)).unwrap_err();
        assert!(
            matches!(err, CodecError::MalformedInput(_) | CodecError::AuthenticationFailed),
            "{scheme}: {err:?}"
        );

        // Ten characters off the encoded text.
        let err = c.decrypt(&envelope[..envelope.len() - 10]).unwrap_err();
        assert!(
            matches!(err, CodecError::MalformedInput(_) | CodecError::AuthenticationFailed),
            "{scheme}: {err:?}"
        );
    }
}

#[test]
fn wrong_key_fails_authentication() {
    for scheme in SCHEMES {
        let a = codec(scheme, 0x01);
        let b = codec(scheme, 0x02);
        let envelope = a.encrypt("for codec a only").unwrap();
        assert_eq!(b.decrypt(&envelope), Err(CodecError::AuthenticationFailed));
    }
}

#[test]
fn empty_inputs_rejected() {
    for scheme in SCHEMES {
        let c = codec(scheme, 0x66);
        assert_eq!(c.encrypt(""), Err(CodecError::EmptyInput));
        assert!(matches!(c.decrypt(""), Err(CodecError::MalformedInput(_))));
    }
}

#[test]
fn garbage_text_is_malformed() {
    for scheme in SCHEMES {
        let c = codec(scheme, 0x77);
        assert!(matches!(
            c.decrypt("not an envelope!"),
            Err(CodecError::MalformedInput(_))
        ));
    }
}

#[test]
fn attack_at_dawn_under_zero_key() {
    let c = SecureCodec::from_key_bytes(Scheme::CbcHmacSha256, &[0u8; 32]).unwrap();
    let envelope = c.encrypt("attack at dawn").unwrap();
    assert_eq!(c.decrypt(&envelope).unwrap(), "attack at dawn");

    let mut altered = envelope.clone();
    let last = altered.pop().unwrap();
    altered.push(if last == 'a' { 'b' } else { 'a' });
    assert_eq!(c.decrypt(&altered), Err(CodecError::AuthenticationFailed));
}

proptest! {
    #[test]
    fn proptest_round_trip(plaintext in "\\PC{1,200}", key in prop::array::uniform32(any::<u8>())) {
        for scheme in SCHEMES {
            let c = SecureCodec::from_key_bytes(scheme, &key).unwrap();
            let envelope = c.encrypt(&plaintext).unwrap();
            prop_assert_eq!(c.decrypt(&envelope).unwrap(), plaintext.clone());
        }
    }
}

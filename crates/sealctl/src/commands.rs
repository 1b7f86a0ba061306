//! Command handlers. Each takes its codec and streams explicitly so the
//! binary's wiring is the only place that touches process globals.

use std::io::{BufRead, Write};

use anyhow::{Context, Result};
use serde::Serialize;
use tracing::{info, warn};

use common::{CodecError, Scheme, WireFormat};
use secure_codec::Codec;

/// Which direction an item is processed in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Encrypt,
    Decrypt,
}

impl Direction {
    fn label(&self) -> &'static str {
        match self {
            Direction::Encrypt => "encrypt",
            Direction::Decrypt => "decrypt",
        }
    }
}

/// Process `values`, or every line of `input` when `values` is empty,
/// writing one result per line to `out`.
///
/// Stops at the first failing item. Items are never included in logs or
/// error messages; only their 1-based position and the error code are.
///
/// # Errors
///
/// Returns an error naming the failing item, or an I/O error.
pub fn process<C, R, W>(
    codec: &C,
    direction: Direction,
    values: &[String],
    input: R,
    out: &mut W,
) -> Result<usize>
where
    C: Codec + ?Sized,
    R: BufRead,
    W: Write,
{
    let mut count = 0usize;
    let mut handle = |item: &str| -> Result<()> {
        count += 1;
        let result = match direction {
            Direction::Encrypt => codec.encrypt(item),
            Direction::Decrypt => codec.decrypt(item),
        };
        match result {
            Ok(output) => {
                writeln!(out, "{output}").context("failed to write output")?;
                Ok(())
            }
            Err(e) => {
                report(direction, count, &e);
                Err::<(), _>(e)
                    .with_context(|| format!("{} failed for item {count}", direction.label()))
            }
        }
    };

    if values.is_empty() {
        for line in input.lines() {
            let line = line.context("failed to read stdin")?;
            handle(line.as_str())?;
        }
    } else {
        for value in values {
            handle(value.as_str())?;
        }
    }

    info!(
        direction = direction.label(),
        scheme = %codec.scheme(),
        items = count,
        "items processed"
    );
    Ok(count)
}

fn report(direction: Direction, item: usize, e: &CodecError) {
    if e.is_security_event() {
        warn!(
            direction = direction.label(),
            item,
            code = e.code(),
            security_event = true,
            "envelope rejected"
        );
    } else {
        warn!(direction = direction.label(), item, code = e.code(), "item rejected");
    }
}

/// JSON body printed by `describe`.
#[derive(Debug, Serialize)]
struct Description {
    /// Format of every envelope this deployment writes.
    primary: WireFormat,
    /// Format still accepted while migrating away from it.
    #[serde(skip_serializing_if = "Option::is_none")]
    legacy: Option<WireFormat>,
}

/// Write the wire format description for the configured schemes.
pub fn describe<W: Write>(primary: Scheme, legacy: Option<Scheme>, out: &mut W) -> Result<()> {
    let body = Description {
        primary: primary.wire_format(),
        legacy: legacy.map(|s| s.wire_format()),
    };
    serde_json::to_writer_pretty(&mut *out, &body).context("failed to serialise wire format")?;
    writeln!(out).context("failed to write output")?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use secure_codec::SecureCodec;

    fn codec() -> SecureCodec {
        SecureCodec::from_key_bytes(Scheme::CbcHmacSha256, &[7u8; 32]).unwrap()
    }

    fn lines(buf: &[u8]) -> Vec<String> {
        String::from_utf8(buf.to_vec())
            .unwrap()
            .lines()
            .map(str::to_owned)
            .collect()
    }

    #[test]
    fn encrypts_positional_values_then_decrypts_stdin() {
        let c = codec();
        let mut sealed = Vec::new();
        let n = process(
            &c,
            Direction::Encrypt,
            &["alpha".to_owned(), "beta".to_owned()],
            std::io::empty(),
            &mut sealed,
        )
        .unwrap();
        assert_eq!(n, 2);

        let mut opened = Vec::new();
        process(&c, Direction::Decrypt, &[], sealed.as_slice(), &mut opened).unwrap();
        assert_eq!(lines(&opened), vec!["alpha", "beta"]);
    }

    #[test]
    fn stops_at_first_failure_without_echoing_input() {
        let c = codec();
        let mut out = Vec::new();
        let input = "not-hex-at-all\nunreached\n".as_bytes();
        let err = process(&c, Direction::Decrypt, &[], input, &mut out).unwrap_err();

        let msg = format!("{err:#}");
        assert!(msg.contains("item 1"));
        assert!(!msg.contains("not-hex-at-all"));
        assert_eq!(
            err.downcast_ref::<CodecError>(),
            Some(&CodecError::MalformedInput("invalid hex encoding"))
        );
        assert!(out.is_empty());
    }

    #[test]
    fn empty_stdin_line_is_rejected_on_encrypt() {
        let c = codec();
        let mut out = Vec::new();
        let err = process(&c, Direction::Encrypt, &[], "ok\n\n".as_bytes(), &mut out).unwrap_err();
        assert_eq!(err.downcast_ref::<CodecError>(), Some(&CodecError::EmptyInput));
        assert_eq!(lines(&out).len(), 1);
    }

    #[test]
    fn describe_includes_legacy_only_when_configured() {
        let mut out = Vec::new();
        describe(Scheme::Aes256GcmSiv, None, &mut out).unwrap();
        let json: serde_json::Value = serde_json::from_slice(&out).unwrap();
        assert_eq!(json["primary"]["scheme"], "aes-256-gcm-siv");
        assert!(json.get("legacy").is_none());

        let mut out = Vec::new();
        describe(Scheme::Aes256GcmSiv, Some(Scheme::CbcHmacSha256), &mut out).unwrap();
        let json: serde_json::Value = serde_json::from_slice(&out).unwrap();
        assert_eq!(json["legacy"]["encoding"], "hex");
    }
}

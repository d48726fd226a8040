//! Integer radix codec.
//!
//! The encoder renders base 2 as `0b…`, base 10 bare, and base 16 as
//! `0x…` with uppercase digits. The decoder auto-detects the radix the
//! way `strtoull` does with base 0 — `0x` hex, leading `0` octal, bare
//! decimal — plus the `0b` binary prefix the encoder can produce.

use alloc::{format, string::String};

use snafu::ensure;

use crate::error::{DecodeError, DecodeErrorKind};

/// The integer radix selected by encoder options.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum IntBase {
    /// Base 2, rendered with a `0b` prefix.
    Binary,
    /// Base 10.
    #[default]
    Decimal,
    /// Base 16, rendered with a `0x` prefix and uppercase digits.
    Hexadecimal,
}

/// Appends the rendering of `value` in `base` to `out`.
pub fn encode_u64(out: &mut String, value: u64, base: IntBase) {
    match base {
        IntBase::Binary => out.push_str(&format!("0b{value:b}")),
        IntBase::Decimal => out.push_str(&format!("{value}")),
        IntBase::Hexadecimal => out.push_str(&format!("0x{value:X}")),
    }
}

/// Appends the rendering of `value` in `base` to `out`, as a sign
/// followed by the magnitude.
pub fn encode_i64(out: &mut String, value: i64, base: IntBase) {
    if value < 0 {
        out.push('-');
    }
    encode_u64(out, value.unsigned_abs(), base);
}

fn accumulate(text: &str, radix: u64) -> Result<u64, DecodeError> {
    ensure!(!text.is_empty(), crate::error::decode::EmptyIntegerSnafu);
    let mut value: u64 = 0;
    for byte in text.bytes() {
        let digit = match byte {
            b'0'..=b'9' => u64::from(byte - b'0'),
            b'A'..=b'Z' => u64::from(byte - b'A' + 10),
            b'a'..=b'z' => u64::from(byte - b'a' + 10),
            _ => return Err(DecodeErrorKind::InvalidDigit { value: byte }.into()),
        };
        ensure!(
            digit < radix,
            crate::error::decode::InvalidDigitSnafu { value: byte }
        );
        value = value
            .checked_mul(radix)
            .and_then(|shifted| shifted.checked_add(digit))
            .ok_or(DecodeErrorKind::IntegerOverflow)?;
    }
    Ok(value)
}

/// Decodes an unsigned integer token, auto-detecting the radix.
///
/// # Errors
/// Fails on an empty token, a digit invalid for the detected radix, or
/// a value that does not fit `u64`.
pub fn decode_u64(text: &str) -> Result<u64, DecodeError> {
    if let Some(rest) = text.strip_prefix("0b").or_else(|| text.strip_prefix("0B")) {
        accumulate(rest, 2)
    } else if let Some(rest) = text.strip_prefix("0x").or_else(|| text.strip_prefix("0X")) {
        accumulate(rest, 16)
    } else if text.len() > 1 && text.starts_with('0') {
        accumulate(&text[1..], 8)
    } else {
        accumulate(text, 10)
    }
}

/// Decodes a signed integer token with an optional sign prefix.
///
/// # Errors
/// As [`decode_u64`], plus a magnitude outside the `i64` range.
pub fn decode_i64(text: &str) -> Result<i64, DecodeError> {
    let (negative, rest) = match text.as_bytes().first() {
        Some(b'-') => (true, &text[1..]),
        Some(b'+') => (false, &text[1..]),
        _ => (false, text),
    };
    let magnitude = decode_u64(rest)?;
    if negative {
        if magnitude > i64::MIN.unsigned_abs() {
            return Err(DecodeErrorKind::IntegerOverflow.into());
        }
        Ok((magnitude as i64).wrapping_neg())
    } else {
        i64::try_from(magnitude).map_err(|_| DecodeErrorKind::IntegerOverflow.into())
    }
}

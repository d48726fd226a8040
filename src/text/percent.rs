//! RFC 3986 percent encoding with a caller-chosen set of additional
//! safe bytes, plus the unquoted-identity test.

use alloc::{string::String, vec::Vec};

use snafu::OptionExt;

use crate::error::DecodeError;

use super::base16;

const HEX_UPPER: &[u8; 16] = b"0123456789ABCDEF";

/// Whether `byte` is RFC 3986 unreserved.
fn is_unreserved(byte: u8) -> bool {
    byte.is_ascii_alphanumeric() || matches!(byte, b'_' | b'.' | b'-' | b'~')
}

/// Appends `data` to `out`, percent-escaping everything that is neither
/// unreserved nor in `safe`.
pub fn encode(out: &mut String, data: &[u8], safe: &[u8]) {
    for &byte in data {
        if is_unreserved(byte) || safe.contains(&byte) {
            out.push(byte as char);
        } else {
            out.push('%');
            out.push(HEX_UPPER[usize::from(byte >> 4)] as char);
            out.push(HEX_UPPER[usize::from(byte & 0xF)] as char);
        }
    }
}

/// Reverses [`encode`]: any `%HH` escape (hex digits in either case)
/// becomes its byte, everything else passes through.
///
/// # Errors
/// Fails when an escape is truncated or its digits are not hex.
pub fn decode(text: &str) -> Result<Vec<u8>, DecodeError> {
    let mut out = Vec::with_capacity(text.len());
    let mut bytes = text.bytes();
    while let Some(byte) = bytes.next() {
        if byte != b'%' {
            out.push(byte);
            continue;
        }
        let high = bytes
            .next()
            .context(crate::error::decode::TruncatedPercentEscapeSnafu)?;
        let low = bytes
            .next()
            .context(crate::error::decode::TruncatedPercentEscapeSnafu)?;
        let high = base16::hex_value(high)
            .context(crate::error::decode::InvalidPercentEscapeSnafu { value: high })?;
        let low = base16::hex_value(low)
            .context(crate::error::decode::InvalidPercentEscapeSnafu { value: low })?;
        out.push((high << 4) | low);
    }
    Ok(out)
}

/// Whether `data` matches the unquoted identity production
/// `[A-Za-z_][A-Za-z0-9_.-]*`. A trailing NUL sentinel is ignored.
#[must_use]
pub fn is_identity(data: &[u8]) -> bool {
    let data = data.strip_suffix(&[0]).unwrap_or(data);
    let Some((&first, rest)) = data.split_first() else {
        return false;
    };
    if !(first.is_ascii_alphabetic() || first == b'_') {
        return false;
    }
    rest.iter()
        .all(|&b| b.is_ascii_alphanumeric() || matches!(b, b'_' | b'.' | b'-'))
}

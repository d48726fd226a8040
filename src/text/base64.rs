//! RFC 4648 base64 and base64url codec.
//!
//! The encoder always pads to a multiple of four. The decoder accepts
//! symbols from either alphabet in one pass; a run of `=` ends the
//! data, and anything other than `=` after that run is surplus input.

use alloc::{string::String, vec::Vec};

use snafu::ensure;

use crate::error::{DecodeError, DecodeErrorKind};

const STD: &[u8; 64] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789+/";
const URL: &[u8; 64] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789-_";
const PAD: u8 = b'=';

/// Appends the base64 rendering of `data` to `out`, padded with `=`.
pub fn encode(out: &mut String, data: &[u8], url_alphabet: bool) {
    let alphabet = if url_alphabet { URL } else { STD };
    for chunk in data.chunks(3) {
        let mut quantum = [0u8; 3];
        quantum[..chunk.len()].copy_from_slice(chunk);
        let bits =
            (u32::from(quantum[0]) << 16) | (u32::from(quantum[1]) << 8) | u32::from(quantum[2]);
        let symbols = [
            alphabet[((bits >> 18) & 0x3F) as usize],
            alphabet[((bits >> 12) & 0x3F) as usize],
            alphabet[((bits >> 6) & 0x3F) as usize],
            alphabet[(bits & 0x3F) as usize],
        ];
        let keep = chunk.len() + 1;
        for (index, &symbol) in symbols.iter().enumerate() {
            out.push(if index < keep { symbol as char } else { PAD as char });
        }
    }
}

/// The 6-bit value of a symbol, accepting both alphabets.
fn symbol_value(byte: u8) -> Option<u8> {
    match byte {
        b'A'..=b'Z' => Some(byte - b'A'),
        b'a'..=b'z' => Some(byte - b'a' + 26),
        b'0'..=b'9' => Some(byte - b'0' + 52),
        b'+' | b'-' => Some(62),
        b'/' | b'_' => Some(63),
        _ => None,
    }
}

/// Decodes base64 text in either alphabet.
///
/// # Errors
/// Fails on a symbol outside both alphabets, a lone trailing symbol, or
/// non-padding bytes after a padding run.
pub fn decode(text: &str) -> Result<Vec<u8>, DecodeError> {
    let mut out = Vec::with_capacity(text.len() / 4 * 3 + 2);
    let mut accum: u32 = 0;
    let mut pending: u32 = 0;
    let mut bytes = text.bytes();
    while let Some(byte) = bytes.next() {
        if byte == PAD {
            // Padding ends the data; only more padding may follow.
            for trailing in bytes.by_ref() {
                ensure!(trailing == PAD, crate::error::decode::SurplusInputSnafu);
            }
            break;
        }
        let value =
            symbol_value(byte).ok_or(DecodeErrorKind::InvalidBase64Symbol { value: byte })?;
        accum = (accum << 6) | u32::from(value);
        pending += 6;
        if pending >= 8 {
            pending -= 8;
            out.push((accum >> pending) as u8);
            accum &= (1 << pending) - 1;
        }
    }
    // A quantum of one symbol carries fewer than eight bits and cannot
    // name a byte.
    ensure!(pending < 6, crate::error::decode::TruncatedBase64Snafu);
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;

    #[test]
    fn encodes_with_padding() {
        let mut out = String::new();
        encode(&mut out, b"hi", false);
        assert_eq!(out, "aGk=");

        out.clear();
        encode(&mut out, b"hey", false);
        assert_eq!(out, "aGV5");

        out.clear();
        encode(&mut out, b"h", false);
        assert_eq!(out, "aA==");
    }

    #[test]
    fn alphabets_differ_only_in_the_last_two_symbols() {
        let data = [0xFB, 0xEF, 0xBE];
        let mut std_out = String::new();
        encode(&mut std_out, &data, false);
        assert_eq!(std_out, "++++");
        let mut url_out = String::new();
        encode(&mut url_out, &data, true);
        assert_eq!(url_out, "----");
    }

    #[test]
    fn decode_accepts_either_alphabet() {
        assert_eq!(decode("++//").unwrap(), decode("--__").unwrap());
        assert_eq!(decode("aGk=").unwrap(), b"hi");
        // Unpadded tails are tolerated.
        assert_eq!(decode("aGk").unwrap(), b"hi");
    }

    #[test]
    fn round_trips() {
        let data: Vec<u8> = (0u8..=255).collect();
        for url_alphabet in [false, true] {
            let mut text = String::new();
            encode(&mut text, &data, url_alphabet);
            assert_eq!(decode(&text).unwrap(), data);
        }
    }

    #[test]
    fn surplus_after_padding_is_rejected() {
        assert_eq!(
            *decode("aGk=x").unwrap_err().kind,
            DecodeErrorKind::SurplusInput
        );
        assert_eq!(decode("aGk==").unwrap(), b"hi");
    }

    #[test]
    fn bad_symbols_are_rejected() {
        assert_eq!(
            *decode("aG(k").unwrap_err().kind,
            DecodeErrorKind::InvalidBase64Symbol { value: b'(' }
        );
        assert_eq!(
            *decode("aGkaa").unwrap_err().kind,
            DecodeErrorKind::TruncatedBase64
        );
        assert_eq!(decode("").unwrap(), vec![]);
    }
}

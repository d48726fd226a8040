//! Base16 (hex) codec.

use alloc::{string::String, vec::Vec};

use snafu::ensure;

use crate::error::{DecodeError, DecodeErrorKind};

const UPPER: &[u8; 16] = b"0123456789ABCDEF";
const LOWER: &[u8; 16] = b"0123456789abcdef";

/// Appends the hex rendering of `data` to `out`, two digits per byte.
pub fn encode(out: &mut String, data: &[u8], uppercase: bool) {
    let alphabet = if uppercase { UPPER } else { LOWER };
    for &byte in data {
        out.push(alphabet[usize::from(byte >> 4)] as char);
        out.push(alphabet[usize::from(byte & 0xF)] as char);
    }
}

/// The value of one hex digit in either case.
pub(crate) fn hex_value(byte: u8) -> Option<u8> {
    match byte {
        b'0'..=b'9' => Some(byte - b'0'),
        b'A'..=b'F' => Some(byte - b'A' + 10),
        b'a'..=b'f' => Some(byte - b'a' + 10),
        _ => None,
    }
}

/// Decodes hex text in either case.
///
/// # Errors
/// Fails on odd input length or any non-hex byte.
pub fn decode(text: &str) -> Result<Vec<u8>, DecodeError> {
    ensure!(
        text.len() % 2 == 0,
        crate::error::decode::UnevenBase16LengthSnafu { length: text.len() }
    );
    text.as_bytes()
        .chunks_exact(2)
        .map(|pair| {
            let high = hex_value(pair[0])
                .ok_or(DecodeErrorKind::InvalidBase16Digit { value: pair[0] })?;
            let low = hex_value(pair[1])
                .ok_or(DecodeErrorKind::InvalidBase16Digit { value: pair[1] })?;
            Ok((high << 4) | low)
        })
        .collect::<Result<Vec<u8>, DecodeErrorKind>>()
        .map_err(DecodeError::from)
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;

    #[test]
    fn encodes_in_both_cases() {
        let mut upper = String::new();
        encode(&mut upper, &[0x68, 0x69, 0xAF], true);
        assert_eq!(upper, "6869AF");

        let mut lower = String::new();
        encode(&mut lower, &[0x68, 0x69, 0xAF], false);
        assert_eq!(lower, "6869af");
    }

    #[test]
    fn decodes_either_case() {
        assert_eq!(decode("6869AF").unwrap(), vec![0x68, 0x69, 0xAF]);
        assert_eq!(decode("6869af").unwrap(), vec![0x68, 0x69, 0xAF]);
        assert_eq!(decode("").unwrap(), vec![]);
    }

    #[test]
    fn round_trips() {
        let data: Vec<u8> = (0u8..=255).collect();
        for uppercase in [false, true] {
            let mut text = String::new();
            encode(&mut text, &data, uppercase);
            assert_eq!(decode(&text).unwrap(), data);
        }
    }

    #[test]
    fn rejects_bad_input() {
        assert_eq!(
            *decode("123").unwrap_err().kind,
            DecodeErrorKind::UnevenBase16Length { length: 3 }
        );
        assert_eq!(
            *decode("12g4").unwrap_err().kind,
            DecodeErrorKind::InvalidBase16Digit { value: b'g' }
        );
    }
}

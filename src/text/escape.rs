//! Backslash escaping for quoted text and byte-string segments.
//!
//! The escape set is JSON-like: the quote character and the backslash,
//! the short forms `\b \f \n \r \t`, `\uXXXX` for everything outside
//! printable ASCII, and a UTF-16 surrogate pair for code points beyond
//! the basic multilingual plane.

use alloc::string::String;

use snafu::{OptionExt, ensure};

use crate::error::DecodeError;

use super::base16;

const HEX_UPPER: &[u8; 16] = b"0123456789ABCDEF";

fn push_u16_escape(out: &mut String, value: u32) {
    out.push('\\');
    out.push('u');
    for shift in [12u32, 8, 4, 0] {
        out.push(HEX_UPPER[((value >> shift) & 0xF) as usize] as char);
    }
}

/// Appends `text` to `out` with the quote character and everything
/// outside printable ASCII escaped.
pub fn escape(out: &mut String, text: &str, quote: char) {
    for ch in text.chars() {
        match ch {
            _ if ch == quote => {
                out.push('\\');
                out.push(quote);
            }
            '\\' => out.push_str("\\\\"),
            '\u{08}' => out.push_str("\\b"),
            '\u{0C}' => out.push_str("\\f"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            ' '..='\u{7E}' => out.push(ch),
            _ if (ch as u32) < 0x10000 => push_u16_escape(out, ch as u32),
            _ => {
                let offset = ch as u32 - 0x10000;
                push_u16_escape(out, 0xD800 + (offset >> 10));
                push_u16_escape(out, 0xDC00 + (offset & 0x3FF));
            }
        }
    }
}

fn take_u16<I: Iterator<Item = char>>(chars: &mut I) -> Result<u32, DecodeError> {
    let mut value = 0u32;
    for _ in 0..4 {
        let digit = chars
            .next()
            .and_then(|ch| u8::try_from(ch).ok())
            .and_then(base16::hex_value)
            .context(crate::error::decode::InvalidEscapeHexSnafu)?;
        value = (value << 4) | u32::from(digit);
    }
    Ok(value)
}

/// Reverses [`escape`]: short escapes, `\uXXXX` (with surrogate
/// continuation), and `\X` for any other `X` as the literal character.
///
/// # Errors
/// Fails on a dangling backslash, bad `\u` digits, or an unpaired
/// surrogate.
pub fn unescape(text: &str) -> Result<String, DecodeError> {
    let mut out = String::with_capacity(text.len());
    let mut chars = text.chars();
    while let Some(ch) = chars.next() {
        if ch != '\\' {
            out.push(ch);
            continue;
        }
        let escaped = chars.next().context(crate::error::decode::DanglingEscapeSnafu)?;
        match escaped {
            'b' => out.push('\u{08}'),
            'f' => out.push('\u{0C}'),
            'n' => out.push('\n'),
            'r' => out.push('\r'),
            't' => out.push('\t'),
            'u' => {
                let unit = take_u16(&mut chars)?;
                let code_point = match unit {
                    0xD800..=0xDBFF => {
                        let follows_low = chars.next() == Some('\\') && chars.next() == Some('u');
                        ensure!(
                            follows_low,
                            crate::error::decode::UnpairedSurrogateSnafu { value: unit }
                        );
                        let low = take_u16(&mut chars)?;
                        ensure!(
                            (0xDC00..=0xDFFF).contains(&low),
                            crate::error::decode::UnpairedSurrogateSnafu { value: low }
                        );
                        0x10000 + ((unit - 0xD800) << 10) + (low - 0xDC00)
                    }
                    0xDC00..=0xDFFF => {
                        return Err(crate::error::DecodeErrorKind::UnpairedSurrogate {
                            value: unit,
                        }
                        .into());
                    }
                    _ => unit,
                };
                let decoded = char::from_u32(code_point)
                    .context(crate::error::decode::InvalidEscapeHexSnafu)?;
                out.push(decoded);
            }
            other => out.push(other),
        }
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::DecodeErrorKind;

    fn escaped(text: &str, quote: char) -> String {
        let mut out = String::new();
        escape(&mut out, text, quote);
        out
    }

    #[test]
    fn short_escapes() {
        assert_eq!(escaped("a\"b", '"'), "a\\\"b");
        assert_eq!(escaped("a'b", '\''), "a\\'b");
        assert_eq!(escaped("a'b", '"'), "a'b");
        assert_eq!(escaped("a\\b", '"'), "a\\\\b");
        assert_eq!(escaped("\u{08}\u{0C}\n\r\t", '"'), "\\b\\f\\n\\r\\t");
    }

    #[test]
    fn non_ascii_uses_u16_escapes() {
        assert_eq!(escaped("\u{7F}", '"'), "\\u007F");
        assert_eq!(escaped("é", '"'), "\\u00E9");
        assert_eq!(escaped("\u{FFFF}", '"'), "\\uFFFF");
    }

    #[test]
    fn astral_code_points_use_surrogate_pairs() {
        assert_eq!(escaped("\u{10000}", '"'), "\\uD800\\uDC00");
        assert_eq!(escaped("\u{10FFFF}", '"'), "\\uDBFF\\uDFFF");
        assert_eq!(escaped("😀", '"'), "\\uD83D\\uDE00");
    }

    #[test]
    fn unescape_round_trips() {
        for text in ["", "plain", "a\"b'c\\d", "tab\there", "é😀\u{10000}\u{10FFFF}"] {
            for quote in ['"', '\''] {
                assert_eq!(unescape(&escaped(text, quote)).unwrap(), text);
            }
        }
    }

    #[test]
    fn unknown_escapes_pass_the_literal_character() {
        assert_eq!(unescape("\\/\\q").unwrap(), "/q");
    }

    #[test]
    fn malformed_escapes_are_rejected() {
        assert_eq!(
            *unescape("oops\\").unwrap_err().kind,
            DecodeErrorKind::DanglingEscape
        );
        assert_eq!(
            *unescape("\\u12g4").unwrap_err().kind,
            DecodeErrorKind::InvalidEscapeHex
        );
        assert_eq!(
            *unescape("\\uD800x").unwrap_err().kind,
            DecodeErrorKind::UnpairedSurrogate { value: 0xD800 }
        );
        assert_eq!(
            *unescape("\\uD800\\u0041").unwrap_err().kind,
            DecodeErrorKind::UnpairedSurrogate { value: 0x41 }
        );
        assert_eq!(
            *unescape("\\uDC00").unwrap_err().kind,
            DecodeErrorKind::UnpairedSurrogate { value: 0xDC00 }
        );
    }
}

//! Error types associated with decoding the primitive text codecs.
use snafu::Snafu;
#[cfg(feature = "backtraces")]
use snafu::{Backtrace, GenerateImplicitData};

use alloc::boxed::Box;

/// An error type for failed decoding of a primitive token.
#[derive(Debug)]
pub struct DecodeError {
    /// The inner decoding error.
    pub kind: Box<DecodeErrorKind>,
    /// The backtrace for the given error.
    #[cfg(feature = "backtraces")]
    pub backtrace: Backtrace,
}

impl core::error::Error for DecodeError {}

impl core::fmt::Display for DecodeError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}", self.kind)?;
        #[cfg(feature = "backtraces")]
        write!(f, "\nBacktrace:\n{}", self.backtrace)?;
        Ok(())
    }
}

impl DecodeError {
    /// A helper function to construct a `DecodeError` from the given `kind`.
    #[must_use]
    pub fn from_kind(kind: DecodeErrorKind) -> Self {
        Self {
            kind: Box::new(kind),
            #[cfg(feature = "backtraces")]
            backtrace: Backtrace::generate(),
        }
    }
}

impl From<DecodeErrorKind> for DecodeError {
    fn from(kind: DecodeErrorKind) -> Self {
        Self::from_kind(kind)
    }
}

/// `DecodeError` kinds for the primitive text codecs.
///
/// The kinds realise the abstract error classes of the format: syntactic
/// violations, surplus input after a complete token, and out-of-range
/// numerics.
#[derive(Snafu, Debug, PartialEq, Eq)]
#[snafu(visibility(pub))]
#[non_exhaustive]
pub enum DecodeErrorKind {
    /// A `%` escape with fewer than two digits remaining.
    #[snafu(display("percent escape truncated"))]
    TruncatedPercentEscape,
    /// A `%` escape whose digits are not hexadecimal.
    #[snafu(display("invalid percent escape digit: {value:#04x}"))]
    InvalidPercentEscape {
        /// The offending input byte.
        value: u8,
    },
    /// A `\` at the end of input.
    #[snafu(display("dangling backslash escape"))]
    DanglingEscape,
    /// A `\u` escape whose digits are not hexadecimal.
    #[snafu(display("invalid \\u escape digits"))]
    InvalidEscapeHex,
    /// A UTF-16 surrogate without its partner.
    #[snafu(display("unpaired UTF-16 surrogate {value:#06x}"))]
    UnpairedSurrogate {
        /// The lone surrogate code unit.
        value: u32,
    },
    /// Base16 input whose length is not a multiple of two.
    #[snafu(display("base16 input has uneven length {length}"))]
    UnevenBase16Length {
        /// Length of the offending input.
        length: usize,
    },
    /// A non-hexadecimal byte in base16 input.
    #[snafu(display("invalid base16 digit: {value:#04x}"))]
    InvalidBase16Digit {
        /// The offending input byte.
        value: u8,
    },
    /// A byte outside both RFC 4648 alphabets.
    #[snafu(display("invalid base64 symbol: {value:#04x}"))]
    InvalidBase64Symbol {
        /// The offending input byte.
        value: u8,
    },
    /// A base64 quantum with a single leftover symbol.
    #[snafu(display("truncated base64 quantum"))]
    TruncatedBase64,
    /// Bytes remaining after a complete token.
    #[snafu(display("surplus input after complete token"))]
    SurplusInput,
    /// An integer token with no digits.
    #[snafu(display("empty integer token"))]
    EmptyInteger,
    /// A digit invalid for the detected radix.
    #[snafu(display("invalid digit for the detected radix: {value:#04x}"))]
    InvalidDigit {
        /// The offending input byte.
        value: u8,
    },
    /// An integer token outside the representable range.
    #[snafu(display("integer value out of range"))]
    IntegerOverflow,
    /// A subsecond fraction longer than nanosecond precision.
    #[snafu(display("subsecond fraction of {digits} digits exceeds nanosecond precision"))]
    FractionTooLong {
        /// Number of fraction digits present.
        digits: usize,
    },
    /// A decimal-fraction time that does not scan.
    #[snafu(display("malformed decimal fraction time"))]
    InvalidDecFraction,
    /// A timestamp that does not scan as `YYYYMMDDTHHMMSS[.f]Z`.
    #[snafu(display("malformed timestamp"))]
    InvalidTimestamp,
    /// A timestamp without the mandatory `Z` suffix.
    #[snafu(display("timestamp missing mandatory Z suffix"))]
    MissingZuluSuffix,
    /// A date or time of day that does not exist on the calendar.
    #[snafu(display("no such calendar date"))]
    InvalidCalendarDate,
    /// A duration missing its `P` or `T` designator.
    #[snafu(display("duration missing mandatory designator"))]
    MissingDurationDesignator,
    /// A time value whose seconds do not fit the 64-bit range.
    #[snafu(display("time value out of range"))]
    TimeOverflow,
}

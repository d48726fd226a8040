//! Error types associated with encoding the ARI text form.
use snafu::Snafu;
#[cfg(feature = "backtraces")]
use snafu::{Backtrace, GenerateImplicitData};

use alloc::{boxed::Box, string::ToString};

use crate::types::AriType;

/// An error type for failed text encoding.
///
/// `kind` carries the precise failure; it is boxed to keep the `Result`
/// payload a single pointer wide.
#[derive(Debug)]
pub struct EncodeError {
    /// The inner encoding error.
    pub kind: Box<EncodeErrorKind>,
    /// The backtrace for the given error.
    #[cfg(feature = "backtraces")]
    pub backtrace: Backtrace,
}

impl core::error::Error for EncodeError {}

impl core::fmt::Display for EncodeError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}", self.kind)?;
        #[cfg(feature = "backtraces")]
        write!(f, "\nBacktrace:\n{}", self.backtrace)?;
        Ok(())
    }
}

impl EncodeError {
    /// A helper function to construct an `EncodeError` from the given `kind`.
    #[must_use]
    pub fn from_kind(kind: EncodeErrorKind) -> Self {
        Self {
            kind: Box::new(kind),
            #[cfg(feature = "backtraces")]
            backtrace: Backtrace::generate(),
        }
    }

    /// Constructs an error from a free-form message.
    #[must_use]
    pub fn custom<D: core::fmt::Display>(msg: D) -> Self {
        Self::from_kind(EncodeErrorKind::Custom {
            msg: msg.to_string(),
        })
    }
}

impl From<EncodeErrorKind> for EncodeError {
    fn from(kind: EncodeErrorKind) -> Self {
        Self::from_kind(kind)
    }
}

/// `EncodeError` kinds for the text form.
#[derive(Snafu, Debug)]
#[snafu(visibility(pub))]
#[non_exhaustive]
pub enum EncodeErrorKind {
    /// The literal value union does not match the declared ARI type,
    /// e.g. a `TP` literal whose value is not a timespec.
    #[snafu(display("literal value does not match declared type {ari_type}"))]
    TypeValueMismatch {
        /// The declared literal type.
        ari_type: AriType,
    },
    /// A container value was present without a container type tag.
    #[snafu(display("container value requires a container type tag"))]
    UntaggedContainer,
    /// A time point cannot be expressed on the proleptic Gregorian
    /// calendar used for the ISO 8601 form.
    #[snafu(display("time point outside the printable calendar range"))]
    TimeOutOfRange,
    /// Uncategorised error.
    #[snafu(display("custom error:\n{msg}"))]
    Custom {
        /// The custom error message.
        msg: alloc::string::String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Ac, Ari, LitVal, Literal};

    #[test]
    fn untagged_container_is_an_encode_error() {
        let bad = Ari::from(Literal::untyped(LitVal::Ac(Ac::new())));
        let err = crate::text::encode(&bad).unwrap_err();
        assert!(matches!(*err.kind, EncodeErrorKind::UntaggedContainer));
    }

    #[test]
    fn mismatched_time_literal_is_an_encode_error() {
        let bad = Ari::from(Literal::typed(AriType::Tp, LitVal::Bool(true)));
        let err = crate::text::encode(&bad).unwrap_err();
        assert!(matches!(
            *err.kind,
            EncodeErrorKind::TypeValueMismatch {
                ari_type: AriType::Tp
            }
        ));
    }
}

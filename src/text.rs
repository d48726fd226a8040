//! # Text form codec.
//!
//! The canonical URI-scheme rendering of an ARI, per the `ari:` scheme:
//! [`encode`] and [`encode_with`] produce it, and the submodules hold
//! the primitive codecs the encoder is built from. The complementary
//! text parser is a separate component; everything produced here is
//! canonical input for it.

pub mod base16;
pub mod base64;
pub mod enc;
pub mod escape;
pub mod float;
pub mod int;
pub mod percent;
pub mod time;

pub use enc::{BstrForm, EncodeOptions, Encoder, SchemePrefix, TypeForm};
pub use float::FloatForm;
pub use int::IntBase;

use crate::{error::EncodeError, types::Ari};

/// Encodes `value` to the canonical text form with default options.
///
/// # Errors
/// Returns an error when the tree violates a literal-type invariant or
/// a time point cannot be put on the calendar.
pub fn encode(value: &Ari) -> Result<alloc::string::String, EncodeError> {
    encode_with(value, &EncodeOptions::default())
}

/// Encodes `value` to the text form with the given options.
///
/// # Errors
/// Returns an error when the tree violates a literal-type invariant or
/// a time point cannot be put on the calendar.
pub fn encode_with(
    value: &Ari,
    options: &EncodeOptions,
) -> Result<alloc::string::String, EncodeError> {
    let mut encoder = Encoder::new();
    encoder.encode_ari(value, options, 0)?;
    Ok(encoder.output())
}

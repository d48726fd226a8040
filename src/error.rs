//! Error types for the ARI codecs.
//!
//! Encoding the text form can fail with [`EncodeError`]; the primitive
//! decoders fail with [`DecodeError`]. Backtraces are available behind
//! the `backtraces` feature.
#![allow(clippy::module_name_repetitions)]
pub(crate) mod decode;
pub(crate) mod encode;

pub use decode::{DecodeError, DecodeErrorKind};
pub use encode::{EncodeError, EncodeErrorKind};

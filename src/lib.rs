#![doc = include_str!("../README.md")]
#![cfg_attr(not(test), no_std)]

extern crate alloc;

pub mod convert;
pub mod error;
pub mod text;
pub mod types;
pub mod walk;

#[doc(inline)]
pub use self::types::{Ari, AriType};

/// A prelude containing the value model, the text codec entry points,
/// and the tree walker.
pub mod prelude {
    pub use crate::{
        text::{self, EncodeOptions},
        types::*,
        walk,
    };
}

#[cfg(test)]
mod tests {
    use super::prelude::*;

    #[test]
    fn display_is_default_text_form() {
        let value = Ari::from(Literal::typed(AriType::Uint, LitVal::Uint64(30)));
        assert_eq!(alloc::format!("{value}"), "ari:/UINT/30");
    }

    #[test]
    fn prelude_exposes_codec() {
        assert_eq!(text::encode(&Ari::null()).unwrap(), "ari:null");
    }
}

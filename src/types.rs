//! # ARI Data Types
//! The `types` module is the ARI value model: an ARI is either a typed
//! literal value or a reference to a managed object by path. Values are
//! built bottom-up and treated as immutable once constructed.

mod ari;
mod cmp;
mod containers;
mod literal;
mod reference;
mod registry;
pub(crate) mod timespec;

pub use {
    ari::Ari,
    containers::{Ac, Am, Execset, Report, Rptset, Tbl},
    literal::{LitVal, Literal},
    reference::{IdSeg, ObjPath, RefParams, Reference},
    registry::AriType,
    timespec::Timespec,
};

/// The text-string payload type.
pub type Utf8String = alloc::string::String;
/// The byte-string payload type.
pub type ByteString = bytes::Bytes;

use alloc::boxed::Box;

use super::{Ac, Am, AriType, ByteString, Execset, Rptset, Tbl, Timespec, Utf8String};

/// A literal ARI: a primitive or container value with an optional
/// explicit type tag.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Literal {
    /// The declared ARI type, when the literal carries one.
    pub ari_type: Option<AriType>,
    /// The value union.
    pub value: LitVal,
}

impl Literal {
    /// Creates an untyped literal.
    #[must_use]
    pub fn untyped(value: LitVal) -> Self {
        Self {
            ari_type: None,
            value,
        }
    }

    /// Creates a literal carrying an explicit type tag.
    ///
    /// The tag and the value union must agree: `TP` and `TD` take a
    /// timespec, the container tags take the matching container. The
    /// pairing is checked when the literal is encoded.
    #[must_use]
    pub fn typed(ari_type: AriType, value: LitVal) -> Self {
        Self {
            ari_type: Some(ari_type),
            value,
        }
    }

    /// Whether the literal carries an explicit type tag.
    #[must_use]
    pub fn has_ari_type(&self) -> bool {
        self.ari_type.is_some()
    }
}

/// The value union of a literal.
///
/// Container variants hold their children by value; an ARI is a strict
/// tree and every container exclusively owns its children.
#[derive(Clone, Debug)]
pub enum LitVal {
    /// The undefined value, equal only to itself.
    Undefined,
    /// The null value.
    Null,
    /// A boolean.
    Bool(bool),
    /// An unsigned 64-bit integer.
    Uint64(u64),
    /// A signed 64-bit integer.
    Int64(i64),
    /// An IEEE-754 binary64 value.
    Float64(f64),
    /// A UTF-8 text string.
    Tstr(Utf8String),
    /// An opaque byte string.
    Bstr(ByteString),
    /// A time point or period.
    Timespec(Timespec),
    /// An ordered array of ARIs.
    Ac(Ac),
    /// An ARI-keyed map.
    Am(Am),
    /// A table with a fixed column count.
    Tbl(Tbl),
    /// An execution request set.
    Execset(Box<Execset>),
    /// A report set.
    Rptset(Box<Rptset>),
}

impl LitVal {
    /// Whether the value is one of the container variants.
    #[must_use]
    pub fn is_container(&self) -> bool {
        matches!(
            self,
            Self::Ac(_) | Self::Am(_) | Self::Tbl(_) | Self::Execset(_) | Self::Rptset(_)
        )
    }

    /// The container tag the value requires, when it is a container.
    #[must_use]
    pub fn container_type(&self) -> Option<AriType> {
        match self {
            Self::Ac(_) => Some(AriType::Ac),
            Self::Am(_) => Some(AriType::Am),
            Self::Tbl(_) => Some(AriType::Tbl),
            Self::Execset(_) => Some(AriType::Execset),
            Self::Rptset(_) => Some(AriType::Rptset),
            _ => None,
        }
    }
}

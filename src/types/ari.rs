use super::{
    Am, AriType, ByteString, Execset, LitVal, Literal, Reference, Rptset, Tbl, Timespec,
    Utf8String,
};
use alloc::{boxed::Box, vec::Vec};

/// An AMM Resource Identifier: a typed literal value or an object
/// reference.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Ari {
    /// A literal value.
    Lit(Literal),
    /// An object reference.
    Ref(Reference),
}

impl Ari {
    /// The undefined value.
    #[must_use]
    pub fn undefined() -> Self {
        Self::Lit(Literal::untyped(LitVal::Undefined))
    }

    /// The untyped null value.
    #[must_use]
    pub fn null() -> Self {
        Self::Lit(Literal::untyped(LitVal::Null))
    }

    /// A TP literal for the given instant relative to the DTN epoch.
    #[must_use]
    pub fn tp(value: Timespec) -> Self {
        Self::Lit(Literal::typed(AriType::Tp, LitVal::Timespec(value)))
    }

    /// A TD literal for the given time period.
    #[must_use]
    pub fn td(value: Timespec) -> Self {
        Self::Lit(Literal::typed(AriType::Td, LitVal::Timespec(value)))
    }

    /// Whether the value is the undefined literal.
    #[must_use]
    pub fn is_undefined(&self) -> bool {
        matches!(
            self,
            Self::Lit(Literal {
                value: LitVal::Undefined,
                ..
            })
        )
    }

    /// The literal carried by the value, if it is one.
    #[must_use]
    pub fn as_lit(&self) -> Option<&Literal> {
        match self {
            Self::Lit(lit) => Some(lit),
            Self::Ref(_) => None,
        }
    }

    /// The reference carried by the value, if it is one.
    #[must_use]
    pub fn as_reference(&self) -> Option<&Reference> {
        match self {
            Self::Lit(_) => None,
            Self::Ref(reference) => Some(reference),
        }
    }
}

impl From<Literal> for Ari {
    fn from(value: Literal) -> Self {
        Self::Lit(value)
    }
}

impl From<Reference> for Ari {
    fn from(value: Reference) -> Self {
        Self::Ref(value)
    }
}

impl From<bool> for Ari {
    fn from(value: bool) -> Self {
        Self::Lit(Literal::untyped(LitVal::Bool(value)))
    }
}

impl From<u64> for Ari {
    fn from(value: u64) -> Self {
        Self::Lit(Literal::untyped(LitVal::Uint64(value)))
    }
}

impl From<i64> for Ari {
    fn from(value: i64) -> Self {
        Self::Lit(Literal::untyped(LitVal::Int64(value)))
    }
}

impl From<f64> for Ari {
    fn from(value: f64) -> Self {
        Self::Lit(Literal::untyped(LitVal::Float64(value)))
    }
}

impl From<&str> for Ari {
    fn from(value: &str) -> Self {
        Self::Lit(Literal::untyped(LitVal::Tstr(value.into())))
    }
}

impl From<Utf8String> for Ari {
    fn from(value: Utf8String) -> Self {
        Self::Lit(Literal::untyped(LitVal::Tstr(value)))
    }
}

impl From<ByteString> for Ari {
    fn from(value: ByteString) -> Self {
        Self::Lit(Literal::untyped(LitVal::Bstr(value)))
    }
}

impl From<Vec<Ari>> for Ari {
    fn from(value: Vec<Ari>) -> Self {
        Self::Lit(Literal::typed(AriType::Ac, LitVal::Ac(value)))
    }
}

impl From<Am> for Ari {
    fn from(value: Am) -> Self {
        Self::Lit(Literal::typed(AriType::Am, LitVal::Am(value)))
    }
}

impl From<Tbl> for Ari {
    fn from(value: Tbl) -> Self {
        Self::Lit(Literal::typed(AriType::Tbl, LitVal::Tbl(value)))
    }
}

impl From<Execset> for Ari {
    fn from(value: Execset) -> Self {
        Self::Lit(Literal::typed(AriType::Execset, LitVal::Execset(Box::new(value))))
    }
}

impl From<Rptset> for Ari {
    fn from(value: Rptset) -> Self {
        Self::Lit(Literal::typed(AriType::Rptset, LitVal::Rptset(Box::new(value))))
    }
}

/// Renders the default-options text form. Best-effort: a value that
/// cannot be encoded formats as an error instead.
impl core::fmt::Display for Ari {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match crate::text::encode(self) {
            Ok(text) => f.write_str(&text),
            Err(_) => Err(core::fmt::Error),
        }
    }
}

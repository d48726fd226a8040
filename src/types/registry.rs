use alloc::{boxed::Box, collections::BTreeMap, string::String};

use once_cell::race::OnceBox;

/// The IANA-registered ARI types.
///
/// Literal value types carry non-negative enumeration codes; managed
/// object and abstract types carry negative codes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(i32)]
#[non_exhaustive]
pub enum AriType {
    /// The singleton null value.
    Null = 0,
    /// A boolean.
    Bool = 1,
    /// An unsigned 8-bit integer.
    Byte = 2,
    /// A signed 32-bit integer.
    Int = 4,
    /// An unsigned 32-bit integer.
    Uint = 5,
    /// A signed 64-bit integer.
    Vast = 6,
    /// An unsigned 64-bit integer.
    Uvast = 7,
    /// An IEEE-754 binary32 value.
    Real32 = 8,
    /// An IEEE-754 binary64 value.
    Real64 = 9,
    /// A UTF-8 text string.
    Textstr = 10,
    /// An opaque byte string.
    Bytestr = 11,
    /// A time point relative to the DTN epoch.
    Tp = 12,
    /// A time period.
    Td = 13,
    /// An identifier-shaped text label.
    Label = 14,
    /// An embedded CBOR item.
    Cbor = 15,
    /// A value of this enumeration.
    Aritype = 16,
    /// An ordered array of ARIs.
    Ac = 17,
    /// An ARI-keyed map of ARIs.
    Am = 18,
    /// A table of ARIs with a fixed column count.
    Tbl = 19,
    /// An execution request set.
    Execset = 20,
    /// A report set.
    Rptset = 21,
    /// An identity object.
    Ident = -1,
    /// A constant object.
    Const = -2,
    /// A control object.
    Ctrl = -3,
    /// Any literal value.
    Literal = -255,
    /// Any object reference.
    Object = -256,
}

/// The registry: enumeration code paired with the canonical name.
const REGISTRY: &[(AriType, &str)] = &[
    (AriType::Null, "NULL"),
    (AriType::Bool, "BOOL"),
    (AriType::Byte, "BYTE"),
    (AriType::Int, "INT"),
    (AriType::Uint, "UINT"),
    (AriType::Vast, "VAST"),
    (AriType::Uvast, "UVAST"),
    (AriType::Real32, "REAL32"),
    (AriType::Real64, "REAL64"),
    (AriType::Textstr, "TEXTSTR"),
    (AriType::Bytestr, "BYTESTR"),
    (AriType::Tp, "TP"),
    (AriType::Td, "TD"),
    (AriType::Label, "LABEL"),
    (AriType::Cbor, "CBOR"),
    (AriType::Aritype, "ARITYPE"),
    (AriType::Ac, "AC"),
    (AriType::Am, "AM"),
    (AriType::Tbl, "TBL"),
    (AriType::Execset, "EXECSET"),
    (AriType::Rptset, "RPTSET"),
    (AriType::Ident, "IDENT"),
    (AriType::Const, "CONST"),
    (AriType::Ctrl, "CTRL"),
    (AriType::Literal, "LITERAL"),
    (AriType::Object, "OBJECT"),
];

/// Case-folded name index, built once on first use.
static NAME_INDEX: OnceBox<BTreeMap<String, AriType>> = OnceBox::new();

fn name_index() -> &'static BTreeMap<String, AriType> {
    NAME_INDEX.get_or_init(|| {
        Box::new(
            REGISTRY
                .iter()
                .map(|&(ty, name)| (name.to_ascii_lowercase(), ty))
                .collect(),
        )
    })
}

impl AriType {
    /// The enumeration code of the type.
    #[must_use]
    pub fn code(self) -> i32 {
        self as i32
    }

    /// The canonical uppercase name of the type.
    #[must_use]
    pub fn name(self) -> &'static str {
        REGISTRY
            .iter()
            .find_map(|&(ty, name)| (ty == self).then_some(name))
            .unwrap_or("")
    }

    /// Looks up a type by name, ignoring ASCII case.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        name_index().get(&name.to_ascii_lowercase()).copied()
    }

    /// Looks up a type by enumeration code.
    #[must_use]
    pub fn from_code(code: i64) -> Option<Self> {
        let code = i32::try_from(code).ok()?;
        REGISTRY
            .iter()
            .find_map(|&(ty, _)| (ty.code() == code).then_some(ty))
    }

    /// Whether the type names a literal value rather than an object.
    #[must_use]
    pub fn is_literal_type(self) -> bool {
        self.code() >= 0
    }

    /// Whether the type names one of the container literals.
    #[must_use]
    pub fn is_container_type(self) -> bool {
        matches!(
            self,
            Self::Ac | Self::Am | Self::Tbl | Self::Execset | Self::Rptset
        )
    }
}

impl core::fmt::Display for AriType {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_round_trip() {
        for &(ty, name) in REGISTRY {
            assert_eq!(ty.name(), name);
            assert_eq!(AriType::from_name(name), Some(ty));
            assert_eq!(AriType::from_code(i64::from(ty.code())), Some(ty));
        }
    }

    #[test]
    fn lookup_ignores_case() {
        assert_eq!(AriType::from_name("textstr"), Some(AriType::Textstr));
        assert_eq!(AriType::from_name("TextStr"), Some(AriType::Textstr));
        assert_eq!(AriType::from_name("no-such-type"), None);
    }

    #[test]
    fn object_types_are_negative() {
        assert_eq!(AriType::Ident.code(), -1);
        assert_eq!(AriType::Const.code(), -2);
        assert_eq!(AriType::Ctrl.code(), -3);
        assert_eq!(AriType::Literal.code(), -255);
        assert_eq!(AriType::Object.code(), -256);
        assert!(!AriType::Ctrl.is_literal_type());
        assert!(AriType::Tbl.is_literal_type());
    }

    #[test]
    fn unassigned_codes_resolve_to_nothing() {
        assert_eq!(AriType::from_code(3), None);
        assert_eq!(AriType::from_code(i64::from(i32::MAX) + 1), None);
    }
}

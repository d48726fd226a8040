use super::{Ac, Am, AriType, Utf8String};

/// An identity segment of an object path.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum IdSeg {
    /// An absent segment.
    #[default]
    Null,
    /// A textual identifier.
    Text(Utf8String),
    /// A numeric identifier.
    Int(i64),
}

impl IdSeg {
    /// Whether the segment is absent.
    #[must_use]
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }
}

impl From<&str> for IdSeg {
    fn from(value: &str) -> Self {
        Self::Text(value.into())
    }
}

impl From<Utf8String> for IdSeg {
    fn from(value: Utf8String) -> Self {
        Self::Text(value)
    }
}

impl From<i64> for IdSeg {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

/// The path of a managed object: namespace, object type, and object
/// identity segments.
///
/// When `ari_type` is present it is authoritative for type comparisons;
/// otherwise `type_id` is. Equality and hashing live in
/// [`cmp`](super::cmp).
#[derive(Clone, Debug, Default)]
pub struct ObjPath {
    /// The namespace segment.
    pub ns_id: IdSeg,
    /// The object type segment as originally written.
    pub type_id: IdSeg,
    /// The object identity segment.
    pub obj_id: IdSeg,
    /// The resolved object type, when known.
    pub ari_type: Option<AriType>,
}

impl ObjPath {
    /// Builds a path with a resolved object type.
    #[must_use]
    pub fn typed(
        ns_id: impl Into<IdSeg>,
        ari_type: AriType,
        obj_id: impl Into<IdSeg>,
    ) -> Self {
        Self {
            ns_id: ns_id.into(),
            type_id: IdSeg::Text(ari_type.name().into()),
            obj_id: obj_id.into(),
            ari_type: Some(ari_type),
        }
    }

    /// Builds a path from bare segments, without a resolved type.
    #[must_use]
    pub fn untyped(
        ns_id: impl Into<IdSeg>,
        type_id: impl Into<IdSeg>,
        obj_id: impl Into<IdSeg>,
    ) -> Self {
        Self {
            ns_id: ns_id.into(),
            type_id: type_id.into(),
            obj_id: obj_id.into(),
            ari_type: None,
        }
    }
}

/// Actual parameters attached to an object reference.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum RefParams {
    /// No parameters given.
    #[default]
    None,
    /// Positional parameters.
    Ac(Ac),
    /// Named parameters.
    Am(Am),
}

/// An object reference: a path with optional actual parameters.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Reference {
    /// The object path.
    pub path: ObjPath,
    /// The actual parameters.
    pub params: RefParams,
}

impl Reference {
    /// A reference to `path` with no parameters.
    #[must_use]
    pub fn new(path: ObjPath) -> Self {
        Self {
            path,
            params: RefParams::None,
        }
    }

    /// A reference to `path` with the given parameters.
    #[must_use]
    pub fn with_params(path: ObjPath, params: RefParams) -> Self {
        Self { path, params }
    }
}

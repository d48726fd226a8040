//! Structural equality, hashing, and total ordering for the value
//! model.
//!
//! The float rule makes comparisons total: two NaN payloads are equal
//! (and hash alike), every other pair compares as IEEE values, so
//! `0.0 == -0.0`. The ordering is what backs [`Am`](super::Am)'s
//! deterministic key iteration; `cmp` returning `Equal` coincides with
//! equality.

use core::cmp::Ordering;
use core::hash::{Hash, Hasher};

use super::{IdSeg, LitVal, ObjPath};

/// Canonical bit pattern for hashing a float: all NaNs collapse to one
/// pattern and the two zeros to one.
fn float_hash_bits(value: f64) -> u64 {
    if value.is_nan() {
        f64::NAN.to_bits()
    } else if value == 0.0 {
        0
    } else {
        value.to_bits()
    }
}

fn float_eq(a: f64, b: f64) -> bool {
    (a.is_nan() && b.is_nan()) || a == b
}

/// Total order over floats: non-NaN values by IEEE comparison, every
/// NaN equal to every other NaN and greater than everything else.
fn float_cmp(a: f64, b: f64) -> Ordering {
    match (a.is_nan(), b.is_nan()) {
        (true, true) => Ordering::Equal,
        (true, false) => Ordering::Greater,
        (false, true) => Ordering::Less,
        (false, false) => a.partial_cmp(&b).unwrap_or(Ordering::Equal),
    }
}

/// Rank of a `LitVal` variant, in declaration order.
fn rank(value: &LitVal) -> u8 {
    match value {
        LitVal::Undefined => 0,
        LitVal::Null => 1,
        LitVal::Bool(_) => 2,
        LitVal::Uint64(_) => 3,
        LitVal::Int64(_) => 4,
        LitVal::Float64(_) => 5,
        LitVal::Tstr(_) => 6,
        LitVal::Bstr(_) => 7,
        LitVal::Timespec(_) => 8,
        LitVal::Ac(_) => 9,
        LitVal::Am(_) => 10,
        LitVal::Tbl(_) => 11,
        LitVal::Execset(_) => 12,
        LitVal::Rptset(_) => 13,
    }
}

impl PartialEq for LitVal {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Undefined, Self::Undefined) => true,
            (Self::Null, Self::Null) => true,
            (Self::Bool(a), Self::Bool(b)) => a == b,
            (Self::Uint64(a), Self::Uint64(b)) => a == b,
            (Self::Int64(a), Self::Int64(b)) => a == b,
            (Self::Float64(a), Self::Float64(b)) => float_eq(*a, *b),
            (Self::Tstr(a), Self::Tstr(b)) => a == b,
            (Self::Bstr(a), Self::Bstr(b)) => a == b,
            (Self::Timespec(a), Self::Timespec(b)) => a == b,
            (Self::Ac(a), Self::Ac(b)) => a == b,
            (Self::Am(a), Self::Am(b)) => a == b,
            (Self::Tbl(a), Self::Tbl(b)) => a == b,
            (Self::Execset(a), Self::Execset(b)) => a == b,
            (Self::Rptset(a), Self::Rptset(b)) => a == b,
            _ => false,
        }
    }
}

impl Eq for LitVal {}

impl Hash for LitVal {
    fn hash<H: Hasher>(&self, state: &mut H) {
        rank(self).hash(state);
        match self {
            Self::Undefined | Self::Null => {}
            Self::Bool(v) => v.hash(state),
            Self::Uint64(v) => v.hash(state),
            Self::Int64(v) => v.hash(state),
            Self::Float64(v) => float_hash_bits(*v).hash(state),
            Self::Tstr(v) => v.hash(state),
            Self::Bstr(v) => v.hash(state),
            Self::Timespec(v) => v.hash(state),
            Self::Ac(v) => v.hash(state),
            Self::Am(v) => v.hash(state),
            Self::Tbl(v) => v.hash(state),
            Self::Execset(v) => v.hash(state),
            Self::Rptset(v) => v.hash(state),
        }
    }
}

impl PartialOrd for LitVal {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for LitVal {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (Self::Bool(a), Self::Bool(b)) => a.cmp(b),
            (Self::Uint64(a), Self::Uint64(b)) => a.cmp(b),
            (Self::Int64(a), Self::Int64(b)) => a.cmp(b),
            (Self::Float64(a), Self::Float64(b)) => float_cmp(*a, *b),
            (Self::Tstr(a), Self::Tstr(b)) => a.cmp(b),
            (Self::Bstr(a), Self::Bstr(b)) => a.cmp(b),
            (Self::Timespec(a), Self::Timespec(b)) => a.cmp(b),
            (Self::Ac(a), Self::Ac(b)) => a.cmp(b),
            (Self::Am(a), Self::Am(b)) => a.cmp(b),
            (Self::Tbl(a), Self::Tbl(b)) => a.cmp(b),
            (Self::Execset(a), Self::Execset(b)) => a.cmp(b),
            (Self::Rptset(a), Self::Rptset(b)) => a.cmp(b),
            _ => rank(self).cmp(&rank(other)),
        }
    }
}

impl PartialEq for ObjPath {
    fn eq(&self, other: &Self) -> bool {
        if self.ns_id != other.ns_id || self.obj_id != other.obj_id {
            return false;
        }
        // The resolved type wins over its spelling when both sides
        // carry one.
        match (self.ari_type, other.ari_type) {
            (Some(a), Some(b)) => a == b,
            _ => self.type_id == other.type_id,
        }
    }
}

impl Eq for ObjPath {}

impl Hash for ObjPath {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.ns_id.hash(state);
        // A resolved type hashes exactly like an integer type segment
        // of the same code, so normalised spellings agree.
        match self.ari_type {
            Some(ty) => IdSeg::Int(i64::from(ty.code())).hash(state),
            None => self.type_id.hash(state),
        }
        self.obj_id.hash(state);
    }
}

impl PartialOrd for ObjPath {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for ObjPath {
    fn cmp(&self, other: &Self) -> Ordering {
        self.ns_id
            .cmp(&other.ns_id)
            .then_with(|| match (self.ari_type, other.ari_type) {
                (Some(a), Some(b)) => a.cmp(&b),
                _ => self.type_id.cmp(&other.type_id),
            })
            .then_with(|| self.obj_id.cmp(&other.obj_id))
    }
}

#[cfg(test)]
mod tests {
    use super::super::{Ari, AriType, IdSeg, LitVal, Literal, ObjPath};
    use core::cmp::Ordering;

    fn hash_of<T: core::hash::Hash>(value: &T) -> u64 {
        use core::hash::Hasher;
        let mut hasher = std::collections::hash_map::DefaultHasher::new();
        value.hash(&mut hasher);
        hasher.finish()
    }

    #[test]
    fn nan_is_equal_to_itself() {
        let a = LitVal::Float64(f64::NAN);
        let b = LitVal::Float64(-f64::NAN);
        assert_eq!(a, b);
        assert_eq!(hash_of(&a), hash_of(&b));
        assert_eq!(a.cmp(&b), Ordering::Equal);
    }

    #[test]
    fn zeros_compare_equal() {
        let pos = LitVal::Float64(0.0);
        let neg = LitVal::Float64(-0.0);
        assert_eq!(pos, neg);
        assert_eq!(hash_of(&pos), hash_of(&neg));
        assert_eq!(pos.cmp(&neg), Ordering::Equal);
    }

    #[test]
    fn undefined_matches_only_itself() {
        assert_eq!(Ari::undefined(), Ari::undefined());
        assert_ne!(Ari::undefined(), Ari::null());
    }

    #[test]
    fn tagged_and_untagged_literals_differ() {
        let tagged = Ari::from(Literal::typed(AriType::Vast, LitVal::Int64(1)));
        let untagged = Ari::from(Literal::untyped(LitVal::Int64(1)));
        assert_ne!(tagged, untagged);
    }

    #[test]
    fn resolved_path_type_wins_over_spelling() {
        let mut a = ObjPath::typed("adm", AriType::Ctrl, 7i64);
        let mut b = ObjPath::typed("adm", AriType::Ctrl, 7i64);
        a.type_id = IdSeg::Text("CTRL".into());
        b.type_id = IdSeg::Text("ctrl".into());
        assert_eq!(a, b);

        // Normalised spellings hash alike as well.
        let mut by_code = ObjPath::typed("adm", AriType::Ctrl, 7i64);
        by_code.type_id = IdSeg::Int(-3);
        let mut bare = ObjPath::untyped("adm", IdSeg::Int(-3), 7i64);
        assert_eq!(by_code, bare);
        assert_eq!(hash_of(&by_code), hash_of(&bare));

        bare.type_id = IdSeg::Int(-2);
        by_code.type_id = IdSeg::Int(-2);
        // Both untagged on one side: the spelling decides.
        assert_eq!(by_code, bare);
    }

    #[test]
    fn literal_orders_before_reference() {
        let lit = Ari::null();
        let reference = Ari::from(crate::types::Reference::new(ObjPath::typed(
            "adm",
            AriType::Ctrl,
            1i64,
        )));
        assert!(lit < reference);
    }
}

//! Coercion of produced values to a declared ARI type.
//!
//! Object descriptors produce raw literals (an EDD reads a counter as
//! an untyped integer, a constant is stored in its authored form); the
//! declared type of the descriptor then decides the shape the value is
//! reported in. [`convert`] performs that coercion without ever losing
//! information: a narrowing that would change the value is an error,
//! not a rounding.

use snafu::Snafu;

use crate::types::{Ari, AriType, LitVal, Literal};

/// An error from a failed type coercion.
#[derive(Snafu, Debug, PartialEq, Eq)]
#[snafu(visibility(pub))]
#[non_exhaustive]
pub enum ConvertError {
    /// The value has no defined coercion to the target type.
    #[snafu(display("value has no conversion to {target}"))]
    Unsupported {
        /// The requested target type.
        target: AriType,
    },
    /// The value is convertible in principle but this value does not
    /// fit the target exactly.
    #[snafu(display("value does not fit {target} exactly"))]
    OutOfRange {
        /// The requested target type.
        target: AriType,
    },
}

/// Coerces `value` to the declared `target` type.
pub fn convert(target: AriType, value: &Ari) -> Result<Ari, ConvertError> {
    match value {
        Ari::Ref(reference) => match target {
            AriType::Object => Ok(value.clone()),
            ty if reference.path.ari_type == Some(ty) => Ok(value.clone()),
            _ => Err(ConvertError::Unsupported { target }),
        },
        Ari::Lit(lit) => convert_lit(target, lit),
    }
}

fn convert_lit(target: AriType, lit: &Literal) -> Result<Ari, ConvertError> {
    if lit.ari_type == Some(target) {
        return Ok(Ari::Lit(lit.clone()));
    }
    let retag = |value: LitVal| Ok(Ari::Lit(Literal::typed(target, value)));
    match target {
        AriType::Literal => Ok(Ari::Lit(lit.clone())),
        AriType::Null => match &lit.value {
            LitVal::Null => retag(LitVal::Null),
            _ => Err(ConvertError::Unsupported { target }),
        },
        AriType::Bool => match &lit.value {
            LitVal::Bool(v) => retag(LitVal::Bool(*v)),
            LitVal::Uint64(v) => retag(LitVal::Bool(*v != 0)),
            LitVal::Int64(v) => retag(LitVal::Bool(*v != 0)),
            _ => Err(ConvertError::Unsupported { target }),
        },
        AriType::Byte => retag(LitVal::Uint64(int_in_range(target, lit, 0, 0xFF)? as u64)),
        AriType::Int => retag(LitVal::Int64(int_in_range(
            target,
            lit,
            i128::from(i32::MIN),
            i128::from(i32::MAX),
        )? as i64)),
        AriType::Uint => retag(LitVal::Uint64(int_in_range(
            target,
            lit,
            0,
            i128::from(u32::MAX),
        )? as u64)),
        AriType::Vast => retag(LitVal::Int64(int_in_range(
            target,
            lit,
            i128::from(i64::MIN),
            i128::from(i64::MAX),
        )? as i64)),
        AriType::Uvast => retag(LitVal::Uint64(int_in_range(
            target,
            lit,
            0,
            i128::from(u64::MAX),
        )? as u64)),
        AriType::Real32 => {
            let wide = lit_to_f64(target, lit)?;
            let narrow = wide as f32;
            if f64::from(narrow) != wide && !wide.is_nan() {
                return Err(ConvertError::OutOfRange { target });
            }
            retag(LitVal::Float64(f64::from(narrow)))
        }
        AriType::Real64 => retag(LitVal::Float64(lit_to_f64(target, lit)?)),
        AriType::Textstr => match &lit.value {
            LitVal::Tstr(v) => retag(LitVal::Tstr(v.clone())),
            _ => Err(ConvertError::Unsupported { target }),
        },
        AriType::Label => match &lit.value {
            LitVal::Tstr(v) if crate::text::percent::is_identity(v.as_bytes()) => {
                retag(LitVal::Tstr(v.clone()))
            }
            LitVal::Tstr(_) => Err(ConvertError::OutOfRange { target }),
            _ => Err(ConvertError::Unsupported { target }),
        },
        AriType::Bytestr => match &lit.value {
            LitVal::Bstr(v) => retag(LitVal::Bstr(v.clone())),
            _ => Err(ConvertError::Unsupported { target }),
        },
        AriType::Cbor => match &lit.value {
            LitVal::Bstr(v) => retag(LitVal::Bstr(v.clone())),
            _ => Err(ConvertError::Unsupported { target }),
        },
        AriType::Tp | AriType::Td => match &lit.value {
            LitVal::Timespec(v) => retag(LitVal::Timespec(*v)),
            _ => Err(ConvertError::Unsupported { target }),
        },
        AriType::Aritype => match &lit.value {
            LitVal::Int64(_) | LitVal::Uint64(_) => {
                let code = int_in_range(target, lit, i128::from(i32::MIN), i128::from(i32::MAX))?;
                AriType::from_code(code as i64)
                    .map(|ty| Literal::typed(target, LitVal::Int64(i64::from(ty.code()))))
                    .map(Ari::Lit)
                    .ok_or(ConvertError::OutOfRange { target })
            }
            LitVal::Tstr(name) => AriType::from_name(name)
                .map(|ty| Literal::typed(target, LitVal::Int64(i64::from(ty.code()))))
                .map(Ari::Lit)
                .ok_or(ConvertError::OutOfRange { target }),
            _ => Err(ConvertError::Unsupported { target }),
        },
        AriType::Ac | AriType::Am | AriType::Tbl | AriType::Execset | AriType::Rptset => {
            if lit.value.container_type() == Some(target) {
                retag(lit.value.clone())
            } else {
                Err(ConvertError::Unsupported { target })
            }
        }
        _ => Err(ConvertError::Unsupported { target }),
    }
}

/// A literal read as a signed 128-bit integer, when it holds an exact
/// integer value.
fn lit_to_i128(lit: &Literal) -> Option<i128> {
    match &lit.value {
        LitVal::Bool(v) => Some(i128::from(*v)),
        LitVal::Uint64(v) => Some(i128::from(*v)),
        LitVal::Int64(v) => Some(i128::from(*v)),
        LitVal::Float64(v) => {
            let truncated = *v as i128;
            (v.is_finite() && truncated as f64 == *v).then_some(truncated)
        }
        _ => None,
    }
}

fn int_in_range(
    target: AriType,
    lit: &Literal,
    min: i128,
    max: i128,
) -> Result<i128, ConvertError> {
    let wide = lit_to_i128(lit).ok_or(ConvertError::Unsupported { target })?;
    if (min..=max).contains(&wide) {
        Ok(wide)
    } else {
        Err(ConvertError::OutOfRange { target })
    }
}

fn lit_to_f64(target: AriType, lit: &Literal) -> Result<f64, ConvertError> {
    match &lit.value {
        LitVal::Float64(v) => Ok(*v),
        LitVal::Uint64(v) => {
            let wide = *v as f64;
            (wide as u64 == *v && *v != u64::MAX)
                .then_some(wide)
                .ok_or(ConvertError::OutOfRange { target })
        }
        LitVal::Int64(v) => {
            let wide = *v as f64;
            (wide as i64 == *v)
                .then_some(wide)
                .ok_or(ConvertError::OutOfRange { target })
        }
        LitVal::Bool(v) => Ok(f64::from(u8::from(*v))),
        _ => Err(ConvertError::Unsupported { target }),
    }
}

//! Floating point rendering.
//!
//! The form letters mirror the C `printf` family: `f` fixed, `g`
//! shortest decimal, `e` exponent, `a` hex float. Specials render as
//! `NaN`, `+Infinity`, and `-Infinity` in every form.

use alloc::{format, string::String};

/// The float rendering selected by encoder options.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum FloatForm {
    /// Fixed six-digit form, the `f` letter.
    Fixed,
    /// Shortest round-trip decimal, the `g` letter.
    #[default]
    General,
    /// Exponent form, the `e` letter.
    Scientific,
    /// C99 hex float, the `a` letter.
    Hex,
}

impl FloatForm {
    /// The form named by a `printf`-style letter, if any.
    #[must_use]
    pub fn from_letter(letter: char) -> Option<Self> {
        match letter {
            'f' => Some(Self::Fixed),
            'g' => Some(Self::General),
            'e' => Some(Self::Scientific),
            'a' => Some(Self::Hex),
            _ => None,
        }
    }
}

/// Appends the rendering of `value` in `form` to `out`.
pub fn encode(out: &mut String, value: f64, form: FloatForm) {
    if value.is_nan() {
        out.push_str("NaN");
        return;
    }
    if value.is_infinite() {
        out.push_str(if value > 0.0 { "+Infinity" } else { "-Infinity" });
        return;
    }
    match form {
        FloatForm::Fixed => out.push_str(&format!("{value:.6}")),
        FloatForm::General => out.push_str(&format!("{value}")),
        FloatForm::Scientific => out.push_str(&format!("{value:e}")),
        FloatForm::Hex => encode_hex(out, value),
    }
}

/// C99 `%a` rendering: `[-]0x1.<mantissa>p<exp>` for normals,
/// `[-]0x0.<mantissa>p-1022` for subnormals, `0x0p+0` for zero.
fn encode_hex(out: &mut String, value: f64) {
    const MANTISSA_BITS: u32 = 52;
    const EXP_BIAS: i64 = 1023;
    let bits = value.to_bits();
    if bits >> 63 != 0 {
        out.push('-');
    }
    let exponent = ((bits >> MANTISSA_BITS) & 0x7FF) as i64;
    let mantissa = bits & ((1u64 << MANTISSA_BITS) - 1);
    let (lead, exponent) = if exponent == 0 {
        if mantissa == 0 {
            out.push_str("0x0p+0");
            return;
        }
        ('0', 1 - EXP_BIAS)
    } else {
        ('1', exponent - EXP_BIAS)
    };
    out.push_str("0x");
    out.push(lead);
    if mantissa != 0 {
        let digits = format!("{mantissa:013x}");
        out.push('.');
        out.push_str(digits.trim_end_matches('0'));
    }
    out.push_str(&format!("p{exponent:+}"));
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rendered(value: f64, form: FloatForm) -> String {
        let mut out = String::new();
        encode(&mut out, value, form);
        out
    }

    #[test]
    fn specials_in_every_form() {
        for form in [
            FloatForm::Fixed,
            FloatForm::General,
            FloatForm::Scientific,
            FloatForm::Hex,
        ] {
            assert_eq!(rendered(f64::NAN, form), "NaN");
            assert_eq!(rendered(f64::INFINITY, form), "+Infinity");
            assert_eq!(rendered(f64::NEG_INFINITY, form), "-Infinity");
        }
    }

    #[test]
    fn decimal_forms() {
        assert_eq!(rendered(1.5, FloatForm::General), "1.5");
        assert_eq!(rendered(-0.25, FloatForm::General), "-0.25");
        assert_eq!(rendered(1.5, FloatForm::Fixed), "1.500000");
        assert_eq!(rendered(1.5, FloatForm::Scientific), "1.5e0");
    }

    #[test]
    fn hex_form_matches_c99() {
        assert_eq!(rendered(0.0, FloatForm::Hex), "0x0p+0");
        assert_eq!(rendered(-0.0, FloatForm::Hex), "-0x0p+0");
        assert_eq!(rendered(1.0, FloatForm::Hex), "0x1p+0");
        assert_eq!(rendered(1.5, FloatForm::Hex), "0x1.8p+0");
        assert_eq!(rendered(-2.0, FloatForm::Hex), "-0x1p+1");
        assert_eq!(rendered(0.125, FloatForm::Hex), "0x1p-3");
        assert_eq!(rendered(f64::MIN_POSITIVE, FloatForm::Hex), "0x1p-1022");
        // Smallest subnormal: one bit at the very bottom of the field.
        assert_eq!(
            rendered(f64::from_bits(1), FloatForm::Hex),
            "0x0.0000000000001p-1022"
        );
    }

    #[test]
    fn letters_name_the_forms() {
        assert_eq!(FloatForm::from_letter('g'), Some(FloatForm::General));
        assert_eq!(FloatForm::from_letter('a'), Some(FloatForm::Hex));
        assert_eq!(FloatForm::from_letter('q'), None);
    }
}

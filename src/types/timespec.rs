/// Nanoseconds per second.
pub(crate) const NANOS_PER_SEC: u32 = 1_000_000_000;

/// A signed time value with nanosecond resolution.
///
/// Depending on the literal type carrying it, the value is either a time
/// point counted from the DTN epoch (2000-01-01T00:00:00Z) or a time
/// period. Negative values keep `nanos` non-negative, so `-1.5s` is
/// `{ seconds: -2, nanos: 500_000_000 }`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Timespec {
    /// Whole seconds.
    pub seconds: i64,
    /// Subsecond offset, always in `0..1_000_000_000`.
    pub nanos: u32,
}

impl Timespec {
    /// The zero instant or duration.
    pub const ZERO: Self = Self {
        seconds: 0,
        nanos: 0,
    };

    /// Creates a value from whole seconds and a subsecond offset.
    #[must_use]
    pub fn new(seconds: i64, nanos: u32) -> Self {
        debug_assert!(nanos < NANOS_PER_SEC);
        Self { seconds, nanos }
    }

    /// The value as a total signed nanosecond count.
    #[must_use]
    pub fn total_nanos(self) -> i128 {
        i128::from(self.seconds) * i128::from(NANOS_PER_SEC) + i128::from(self.nanos)
    }

    /// Rebuilds a value from a total signed nanosecond count.
    ///
    /// Returns `None` when the seconds component does not fit `i64`.
    #[must_use]
    pub fn from_total_nanos(total: i128) -> Option<Self> {
        let seconds = i64::try_from(total.div_euclid(i128::from(NANOS_PER_SEC))).ok()?;
        let nanos = total.rem_euclid(i128::from(NANOS_PER_SEC)) as u32;
        Some(Self { seconds, nanos })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn negative_values_normalise() {
        let ts = Timespec::from_total_nanos(-1_500_000_000).unwrap();
        assert_eq!(ts, Timespec::new(-2, 500_000_000));
        assert_eq!(ts.total_nanos(), -1_500_000_000);
    }

    #[test]
    fn total_round_trip() {
        for ts in [
            Timespec::ZERO,
            Timespec::new(1, 1),
            Timespec::new(-1, 999_999_999),
            Timespec::new(i64::MAX, 999_999_999),
        ] {
            assert_eq!(Timespec::from_total_nanos(ts.total_nanos()), Some(ts));
        }
    }
}

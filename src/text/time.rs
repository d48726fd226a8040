//! Time codecs: decimal-fraction seconds, ISO 8601 UTC timestamps on
//! the DTN epoch, and ISO 8601 durations.

use alloc::{format, string::String};

use chrono::{DateTime, NaiveDate, Utc};
use nom::{
    IResult,
    bytes::complete::take_while_m_n,
    character::complete::{char, digit1, one_of},
    combinator::opt,
    sequence::{preceded, terminated, tuple},
};
use snafu::{OptionExt, ensure};

use crate::error::{DecodeError, DecodeErrorKind, EncodeError};
use crate::types::Timespec;
use crate::types::timespec::NANOS_PER_SEC;

/// The DTN epoch, 2000-01-01T00:00:00Z, as a POSIX timestamp.
pub const DTN_EPOCH_POSIX: i64 = 946_684_800;

const SECS_PER_DAY: i128 = 86_400;
const SECS_PER_HOUR: i128 = 3_600;

/// Appends the subsecond fraction `.ddd` with trailing zeros stripped.
fn push_subsec(out: &mut String, nanos: u32) {
    debug_assert!(nanos != 0);
    let digits = format!("{nanos:09}");
    out.push('.');
    out.push_str(digits.trim_end_matches('0'));
}

/// Scans a fraction of at most nine digits into nanoseconds,
/// right-padding to nanosecond precision.
fn subsec_nanos(digits: Option<&str>) -> Result<u32, DecodeError> {
    let Some(digits) = digits else {
        return Ok(0);
    };
    ensure!(
        digits.len() <= 9,
        crate::error::decode::FractionTooLongSnafu {
            digits: digits.len()
        }
    );
    let value: u32 = digits
        .parse()
        .map_err(|_| DecodeErrorKind::InvalidDecFraction)?;
    Ok(value * 10u32.pow(9 - digits.len() as u32))
}

fn timespec_from_parts(negative: bool, seconds: i128, nanos: u32) -> Result<Timespec, DecodeError> {
    let mut total = seconds * i128::from(NANOS_PER_SEC) + i128::from(nanos);
    if negative {
        total = -total;
    }
    Ok(Timespec::from_total_nanos(total).context(crate::error::decode::TimeOverflowSnafu)?)
}

/// Encodes a timespec as `<seconds>[.<subseconds>]`.
pub fn decfrac_encode(out: &mut String, value: Timespec) {
    let mut total = value.total_nanos();
    if total < 0 {
        out.push('-');
        total = -total;
    }
    let seconds = total / i128::from(NANOS_PER_SEC);
    let nanos = (total % i128::from(NANOS_PER_SEC)) as u32;
    out.push_str(&format!("{seconds}"));
    if nanos != 0 {
        push_subsec(out, nanos);
    }
}

/// Decodes `<seconds>[.<subseconds>]` with an optional sign.
///
/// # Errors
/// Fails on a malformed token, a fraction beyond nine digits, or
/// seconds outside the 64-bit range.
pub fn decfrac_decode(text: &str) -> Result<Timespec, DecodeError> {
    let scan: IResult<&str, _> = tuple((
        opt(one_of::<_, _, nom::error::Error<&str>>("+-")),
        digit1,
        opt(preceded(char('.'), digit1)),
    ))(text);
    let (rest, (sign, seconds, frac)) =
        scan.map_err(|_| DecodeErrorKind::InvalidDecFraction)?;
    ensure!(rest.is_empty(), crate::error::decode::SurplusInputSnafu);
    let seconds: i128 = seconds
        .parse()
        .map_err(|_| DecodeErrorKind::TimeOverflow)?;
    timespec_from_parts(sign == Some('-'), seconds, subsec_nanos(frac)?)
}

/// Encodes a DTN-relative time point as `YYYYMMDDTHHMMSS[.f]Z`.
///
/// # Errors
/// Fails when the instant does not fit the proleptic Gregorian
/// calendar.
pub fn utctime_encode(out: &mut String, value: Timespec) -> Result<(), EncodeError> {
    let posix = value
        .seconds
        .checked_add(DTN_EPOCH_POSIX)
        .ok_or(crate::error::EncodeErrorKind::TimeOutOfRange)?;
    let instant: DateTime<Utc> = DateTime::from_timestamp(posix, 0)
        .ok_or(crate::error::EncodeErrorKind::TimeOutOfRange)?;
    out.push_str(&format!("{}", instant.format("%Y%m%dT%H%M%S")));
    if value.nanos != 0 {
        push_subsec(out, value.nanos);
    }
    out.push('Z');
    Ok(())
}

fn fixed_digits(count: usize) -> impl FnMut(&str) -> IResult<&str, &str> {
    move |input| take_while_m_n(count, count, |ch: char| ch.is_ascii_digit())(input)
}

/// Decodes an ISO 8601 UTC timestamp into DTN-relative seconds.
///
/// `-` and `:` separators are stripped wherever they appear, so both
/// the canonical compact form and the separated form are accepted. The
/// trailing `Z` is mandatory and nothing may follow it.
///
/// # Errors
/// Fails on a malformed or non-existent date, a missing `Z`, surplus
/// input, or an overlong fraction.
pub fn utctime_decode(text: &str) -> Result<Timespec, DecodeError> {
    let stripped: String = text.chars().filter(|ch| !matches!(ch, '-' | ':')).collect();
    let input = stripped.as_str();

    let scan: IResult<&str, _> = tuple((
        fixed_digits(4),
        fixed_digits(2),
        fixed_digits(2),
        char('T'),
        fixed_digits(2),
        fixed_digits(2),
        fixed_digits(2),
        opt(preceded(char('.'), digit1)),
    ))(input);
    let (rest, (year, month, day, _, hour, minute, second, frac)) =
        scan.map_err(|_| DecodeErrorKind::InvalidTimestamp)?;
    let rest = rest
        .strip_prefix('Z')
        .context(crate::error::decode::MissingZuluSuffixSnafu)?;
    ensure!(rest.is_empty(), crate::error::decode::SurplusInputSnafu);

    // The fixed-width scans make these infallible as number parses.
    let date = NaiveDate::from_ymd_opt(
        year.parse().unwrap_or_default(),
        month.parse().unwrap_or_default(),
        day.parse().unwrap_or_default(),
    )
    .context(crate::error::decode::InvalidCalendarDateSnafu)?;
    let moment = date
        .and_hms_opt(
            hour.parse().unwrap_or_default(),
            minute.parse().unwrap_or_default(),
            second.parse().unwrap_or_default(),
        )
        .context(crate::error::decode::InvalidCalendarDateSnafu)?;

    let seconds = moment.and_utc().timestamp() - DTN_EPOCH_POSIX;
    Ok(Timespec::new(seconds, subsec_nanos(frac)?))
}

/// Encodes a time period as an ISO 8601 duration, `PT0S` when zero.
pub fn timeperiod_encode(out: &mut String, value: Timespec) {
    let mut total = value.total_nanos();
    if total < 0 {
        out.push('-');
        total = -total;
    }
    let nanos = (total % i128::from(NANOS_PER_SEC)) as u32;
    let mut seconds = total / i128::from(NANOS_PER_SEC);

    out.push('P');
    let days = seconds / SECS_PER_DAY;
    seconds %= SECS_PER_DAY;
    if days != 0 {
        out.push_str(&format!("{days}D"));
    }
    out.push('T');
    let hours = seconds / SECS_PER_HOUR;
    seconds %= SECS_PER_HOUR;
    if hours != 0 {
        out.push_str(&format!("{hours}H"));
    }
    let minutes = seconds / 60;
    seconds %= 60;
    if minutes != 0 {
        out.push_str(&format!("{minutes}M"));
    }
    if seconds != 0 || nanos != 0 || total == 0 {
        out.push_str(&format!("{seconds}"));
        if nanos != 0 {
            push_subsec(out, nanos);
        }
        out.push('S');
    }
}

/// Decodes an ISO 8601 duration with optional sign.
///
/// Unit segments must appear in `D`, `H`, `M`, `S` order; each present
/// segment carries an integer, and only the seconds segment may carry a
/// fraction.
///
/// # Errors
/// Fails on missing `P`/`T` designators, out-of-order or trailing
/// input, an overlong fraction, or seconds outside the 64-bit range.
pub fn timeperiod_decode(text: &str) -> Result<Timespec, DecodeError> {
    let scan: IResult<&str, _> = tuple((
        opt(one_of::<_, _, nom::error::Error<&str>>("+-")),
        char('P'),
        opt(terminated(digit1, char('D'))),
        char('T'),
        opt(terminated(digit1, char('H'))),
        opt(terminated(digit1, char('M'))),
        opt(terminated(
            tuple((digit1, opt(preceded(char('.'), digit1)))),
            char('S'),
        )),
    ))(text);
    let (rest, (sign, _, days, _, hours, minutes, seconds)) =
        scan.map_err(|_| DecodeErrorKind::MissingDurationDesignator)?;
    ensure!(rest.is_empty(), crate::error::decode::SurplusInputSnafu);

    let unit = |digits: Option<&str>| -> Result<i128, DecodeError> {
        digits
            .map(str::parse::<i128>)
            .transpose()
            .map_err(|_| DecodeErrorKind::TimeOverflow)?
            .map_or(Ok(0), Ok)
    };
    let (sec_digits, frac) = match &seconds {
        Some((digits, frac)) => (Some(*digits), frac.as_deref()),
        None => (None, None),
    };

    let total_seconds = unit(days)? * SECS_PER_DAY
        + unit(hours)? * SECS_PER_HOUR
        + unit(minutes)? * 60
        + unit(sec_digits)?;
    timespec_from_parts(sign == Some('-'), total_seconds, subsec_nanos(frac)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn decfrac(value: Timespec) -> String {
        let mut out = String::new();
        decfrac_encode(&mut out, value);
        out
    }

    fn utctime(value: Timespec) -> String {
        let mut out = String::new();
        utctime_encode(&mut out, value).unwrap();
        out
    }

    fn timeperiod(value: Timespec) -> String {
        let mut out = String::new();
        timeperiod_encode(&mut out, value);
        out
    }

    #[test]
    fn decfrac_strips_trailing_zeros() {
        assert_eq!(decfrac(Timespec::ZERO), "0");
        assert_eq!(decfrac(Timespec::new(30, 0)), "30");
        assert_eq!(decfrac(Timespec::new(30, 500_000_000)), "30.5");
        assert_eq!(decfrac(Timespec::new(0, 1)), "0.000000001");
        assert_eq!(decfrac(Timespec::new(-2, 500_000_000)), "-1.5");
    }

    #[test]
    fn decfrac_decode_pads_the_fraction() {
        assert_eq!(decfrac_decode("30.5").unwrap(), Timespec::new(30, 500_000_000));
        assert_eq!(decfrac_decode("30").unwrap(), Timespec::new(30, 0));
        assert_eq!(decfrac_decode("-1.5").unwrap(), Timespec::new(-2, 500_000_000));
        assert_eq!(decfrac_decode("+0.000000001").unwrap(), Timespec::new(0, 1));
    }

    #[test]
    fn decfrac_round_trips() {
        for value in [
            Timespec::ZERO,
            Timespec::new(1, 0),
            Timespec::new(-1, 0),
            Timespec::new(12, 345_678_900),
            Timespec::new(-2, 500_000_000),
        ] {
            assert_eq!(decfrac_decode(&decfrac(value)).unwrap(), value);
        }
    }

    #[test]
    fn decfrac_rejects_bad_tokens() {
        assert_eq!(
            *decfrac_decode("1.0000000001").unwrap_err().kind,
            DecodeErrorKind::FractionTooLong { digits: 10 }
        );
        assert_eq!(
            *decfrac_decode("abc").unwrap_err().kind,
            DecodeErrorKind::InvalidDecFraction
        );
        assert_eq!(
            *decfrac_decode("1.5x").unwrap_err().kind,
            DecodeErrorKind::SurplusInput
        );
    }

    #[test]
    fn utctime_renders_the_dtn_epoch() {
        assert_eq!(utctime(Timespec::ZERO), "20000101T000000Z");
        assert_eq!(utctime(Timespec::new(0, 500_000_000)), "20000101T000000.5Z");
        assert_eq!(utctime(Timespec::new(30, 0)), "20000101T000030Z");
        // One day before the epoch.
        assert_eq!(utctime(Timespec::new(-86_400, 0)), "19991231T000000Z");
    }

    #[test]
    fn utctime_decode_accepts_either_separator_style() {
        assert_eq!(utctime_decode("20000101T000000Z").unwrap(), Timespec::ZERO);
        assert_eq!(
            utctime_decode("2000-01-01T00:00:00Z").unwrap(),
            Timespec::ZERO
        );
        assert_eq!(
            utctime_decode("20230614T102030.25Z").unwrap(),
            Timespec::new(740_053_230, 250_000_000)
        );
    }

    #[test]
    fn utctime_round_trips() {
        for value in [
            Timespec::ZERO,
            Timespec::new(1, 0),
            Timespec::new(86_400, 1_000_000),
            Timespec::new(786_297_600, 0),
            Timespec::new(-86_400, 999_999_999),
        ] {
            assert_eq!(utctime_decode(&utctime(value)).unwrap(), value);
        }
    }

    #[test]
    fn utctime_rejects_bad_tokens() {
        assert_eq!(
            *utctime_decode("20000101T000000").unwrap_err().kind,
            DecodeErrorKind::MissingZuluSuffix
        );
        assert_eq!(
            *utctime_decode("20000101T000000Zx").unwrap_err().kind,
            DecodeErrorKind::SurplusInput
        );
        assert_eq!(
            *utctime_decode("20000101000000Z").unwrap_err().kind,
            DecodeErrorKind::InvalidTimestamp
        );
        assert_eq!(
            *utctime_decode("20000230T000000Z").unwrap_err().kind,
            DecodeErrorKind::InvalidCalendarDate
        );
    }

    #[test]
    fn timeperiod_renders_canonical_forms() {
        assert_eq!(timeperiod(Timespec::ZERO), "PT0S");
        assert_eq!(timeperiod(Timespec::new(3_661, 500_000_000)), "PT1H1M1.5S");
        assert_eq!(timeperiod(Timespec::new(86_400, 0)), "P1DT");
        assert_eq!(timeperiod(Timespec::new(90, 0)), "PT1M30S");
        assert_eq!(timeperiod(Timespec::new(-2, 500_000_000)), "-PT1.5S");
        assert_eq!(timeperiod(Timespec::new(0, 1)), "PT0.000000001S");
    }

    #[test]
    fn timeperiod_decode_requires_ordered_units() {
        assert_eq!(timeperiod_decode("PT0S").unwrap(), Timespec::ZERO);
        assert_eq!(
            timeperiod_decode("PT1H1M1.5S").unwrap(),
            Timespec::new(3_661, 500_000_000)
        );
        assert_eq!(timeperiod_decode("P1DT").unwrap(), Timespec::new(86_400, 0));
        assert_eq!(timeperiod_decode("+PT1M").unwrap(), Timespec::new(60, 0));
        assert_eq!(
            timeperiod_decode("-PT1.5S").unwrap(),
            Timespec::new(-2, 500_000_000)
        );
        assert_eq!(
            *timeperiod_decode("PT1M1H").unwrap_err().kind,
            DecodeErrorKind::SurplusInput
        );
        assert_eq!(
            *timeperiod_decode("P1D").unwrap_err().kind,
            DecodeErrorKind::MissingDurationDesignator
        );
        assert_eq!(
            *timeperiod_decode("PT1S2S").unwrap_err().kind,
            DecodeErrorKind::SurplusInput
        );
    }

    #[test]
    fn timeperiod_round_trips() {
        for value in [
            Timespec::ZERO,
            Timespec::new(1, 0),
            Timespec::new(59, 999_999_999),
            Timespec::new(3_661, 500_000_000),
            Timespec::new(90_061, 0),
            Timespec::new(-90_061, 250_000_000),
        ] {
            assert_eq!(timeperiod_decode(&timeperiod(value)).unwrap(), value);
        }
    }
}

//! Opportunistic string parsing collaborator.
//!
//! The engines call into this module when an operand arrives as a string;
//! anything unparseable is simply not temporal, so callers treat errors as
//! "this operand is an unrelated scalar" rather than failures.

use crate::civil::{
    self, CivilDate, NANOS_PER_DAY, NANOS_PER_HOUR, NANOS_PER_MIN, NANOS_PER_SEC,
};
use crate::duration::Duration;
use crate::error::TemporalError;
use crate::instant::Instant;
use crate::zone::{FixedOffsetResolver, Zone, ZoneResolver};

/// Parses an instant from `YYYY-MM-DD`, optionally followed by
/// `HH:MM[:SS[.frac]]` (separated by a space or `T`) and an optional zone
/// suffix `Z` or `±HH:MM`. Without a suffix the result is tz-naive.
///
/// # Errors
///
/// Returns [`TemporalError::Parse`] when the shape is wrong,
/// [`TemporalError::InvalidDate`] / [`TemporalError::InvalidTime`] when the
/// components do not exist, and [`TemporalError::Overflow`] when the result
/// is outside the nanosecond range.
pub fn parse_instant(input: &str) -> Result<Instant, TemporalError> {
    let s = input.trim();
    let (body, zone) = split_zone(s)?;
    let (date_part, time_part) = match body.find([' ', 'T']) {
        Some(i) => (&body[..i], Some(body[i + 1..].trim())),
        None => (body, None),
    };
    let date = parse_date(date_part, input)?;
    let time_ns = match time_part {
        Some(t) => parse_time(t, input)?,
        None => 0,
    };
    let naive = Instant::from_nanos(civil::to_epoch_ns(date, time_ns)?);
    match zone {
        Some(zone) => naive.localize(zone),
        None => Ok(naive),
    }
}

/// Parses a duration as an optionally-signed integer followed by a unit:
/// `ns`, `us`, `ms`, `s`, `m`/`min`, `h`, `d`, or `w`.
///
/// # Errors
///
/// Returns [`TemporalError::Parse`] on a malformed string and
/// [`TemporalError::Overflow`] when the span exceeds the nanosecond range.
pub fn parse_duration(input: &str) -> Result<Duration, TemporalError> {
    let s = input.trim();
    let (sign, rest) = match s.as_bytes().first() {
        Some(b'-') => (-1, &s[1..]),
        Some(b'+') => (1, &s[1..]),
        _ => (1, s),
    };
    let digits_end = rest
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(rest.len());
    if digits_end == 0 {
        return Err(parse_error(input, "expected a count"));
    }
    let count: i64 = rest[..digits_end]
        .parse()
        .map_err(|_| parse_error(input, "count out of range"))?;
    let unit_ns = match rest[digits_end..].trim() {
        "ns" => 1,
        "us" => 1_000,
        "ms" => 1_000_000,
        "s" => NANOS_PER_SEC,
        "m" | "min" => NANOS_PER_MIN,
        "h" => NANOS_PER_HOUR,
        "d" => NANOS_PER_DAY,
        "w" => 7 * NANOS_PER_DAY,
        _ => return Err(parse_error(input, "unknown duration unit")),
    };
    count
        .checked_mul(unit_ns * sign)
        .filter(|v| *v != crate::instant::NAT)
        .map(Duration::from_nanos)
        .ok_or(TemporalError::Overflow {
            op: "parsed duration",
        })
}

fn split_zone(s: &str) -> Result<(&str, Option<Zone>), TemporalError> {
    if let Some(body) = s.strip_suffix('Z') {
        return Ok((body.trim_end(), Some(Zone::utc())));
    }
    let bytes = s.as_bytes();
    let n = bytes.len();
    // A trailing ±HH:MM only counts as a zone suffix when it follows a time
    // component; a bare date also ends in digits and dashes.
    if n >= 6
        && (bytes[n - 6] == b'+' || bytes[n - 6] == b'-')
        && bytes[n - 3] == b':'
        && s[..n - 6].contains(':')
    {
        let zone = FixedOffsetResolver.resolve(&s[n - 6..])?;
        return Ok((s[..n - 6].trim_end(), Some(zone)));
    }
    Ok((s, None))
}

fn parse_date(s: &str, input: &str) -> Result<CivilDate, TemporalError> {
    let mut parts = s.splitn(3, '-');
    let year = next_int(&mut parts, input, "expected a year")?;
    let month = component(
        next_int(&mut parts, input, "expected a month")?,
        input,
        "month out of range",
    )?;
    let day = component(
        next_int(&mut parts, input, "expected a day")?,
        input,
        "day out of range",
    )?;
    CivilDate::new(year, month, day)
}

fn parse_time(s: &str, input: &str) -> Result<i64, TemporalError> {
    let mut parts = s.splitn(3, ':');
    let hour = component(
        next_int(&mut parts, input, "expected hours")?,
        input,
        "hours out of range",
    )?;
    let minute = component(
        next_int(&mut parts, input, "expected minutes")?,
        input,
        "minutes out of range",
    )?;
    let (second, frac_ns) = match parts.next() {
        Some(rest) => match rest.split_once('.') {
            Some((sec, frac)) => (
                component(int(sec, input, "expected seconds")?, input, "seconds out of range")?,
                parse_fraction(frac, input)?,
            ),
            None => (
                component(int(rest, input, "expected seconds")?, input, "seconds out of range")?,
                0,
            ),
        },
        None => (0, 0),
    };
    if hour > 23 || minute > 59 || second > 59 {
        return Err(TemporalError::InvalidTime {
            hour,
            minute,
            second,
        });
    }
    Ok(i64::from(hour) * NANOS_PER_HOUR
        + i64::from(minute) * NANOS_PER_MIN
        + i64::from(second) * NANOS_PER_SEC
        + frac_ns)
}

/// Narrows a parsed component before validation; anything past `u8` cannot
/// be a calendar or clock field, so it fails as malformed input rather than
/// wrapping into a false-valid value.
fn component(v: i64, input: &str, reason: &'static str) -> Result<u8, TemporalError> {
    u8::try_from(v).map_err(|_| parse_error(input, reason))
}

fn parse_fraction(frac: &str, input: &str) -> Result<i64, TemporalError> {
    if frac.is_empty() || frac.len() > 9 {
        return Err(parse_error(input, "fractional seconds must be 1-9 digits"));
    }
    let value = int(frac, input, "expected fractional seconds")?;
    Ok(value * 10_i64.pow(9 - frac.len() as u32))
}

fn next_int<'a>(
    parts: &mut impl Iterator<Item = &'a str>,
    input: &str,
    reason: &'static str,
) -> Result<i64, TemporalError> {
    int(parts.next().unwrap_or(""), input, reason)
}

fn int(s: &str, input: &str, reason: &'static str) -> Result<i64, TemporalError> {
    if s.is_empty() || !s.bytes().all(|b| b.is_ascii_digit()) {
        return Err(parse_error(input, reason));
    }
    s.parse().map_err(|_| parse_error(input, reason))
}

fn parse_error(input: &str, reason: &'static str) -> TemporalError {
    TemporalError::Parse {
        input: input.to_string(),
        reason,
    }
}

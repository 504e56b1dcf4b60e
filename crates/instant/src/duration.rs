//! Fixed-length, sign-aware time spans at nanosecond resolution.

use crate::civil::{NANOS_PER_DAY, NANOS_PER_HOUR, NANOS_PER_MIN, NANOS_PER_SEC};
use crate::error::TemporalError;
use crate::instant::NAT;

/// A fixed-length elapsed time span in nanoseconds.
///
/// The value [`NAT`] is the missing-value sentinel; it propagates through
/// arithmetic rather than participating in it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Duration(i64);

impl Duration {
    /// Creates a duration from raw nanoseconds.
    pub const fn from_nanos(nanos: i64) -> Self {
        Self(nanos)
    }

    /// Creates a duration from whole seconds.
    ///
    /// # Errors
    ///
    /// Returns [`TemporalError::Overflow`] if the span exceeds the
    /// nanosecond range.
    pub fn from_secs(secs: i64) -> Result<Self, TemporalError> {
        scale(secs, NANOS_PER_SEC, "duration from seconds")
    }

    /// Creates a duration from whole minutes.
    ///
    /// # Errors
    ///
    /// Returns [`TemporalError::Overflow`] if the span exceeds the
    /// nanosecond range.
    pub fn from_minutes(minutes: i64) -> Result<Self, TemporalError> {
        scale(minutes, NANOS_PER_MIN, "duration from minutes")
    }

    /// Creates a duration from whole hours.
    ///
    /// # Errors
    ///
    /// Returns [`TemporalError::Overflow`] if the span exceeds the
    /// nanosecond range.
    pub fn from_hours(hours: i64) -> Result<Self, TemporalError> {
        scale(hours, NANOS_PER_HOUR, "duration from hours")
    }

    /// Creates a duration from whole days.
    ///
    /// # Errors
    ///
    /// Returns [`TemporalError::Overflow`] if the span exceeds the
    /// nanosecond range.
    pub fn from_days(days: i64) -> Result<Self, TemporalError> {
        scale(days, NANOS_PER_DAY, "duration from days")
    }

    /// Returns the missing-value duration.
    pub const fn missing() -> Self {
        Self(NAT)
    }

    /// Returns true if this duration is the missing-value sentinel.
    pub fn is_missing(self) -> bool {
        self.0 == NAT
    }

    /// Returns the raw nanosecond value.
    pub fn nanos(self) -> i64 {
        self.0
    }

    /// Adds another duration, propagating missing values.
    ///
    /// # Errors
    ///
    /// Returns [`TemporalError::Overflow`] if the sum leaves the
    /// representable range.
    pub fn checked_add(self, other: Duration) -> Result<Duration, TemporalError> {
        if self.is_missing() || other.is_missing() {
            return Ok(Duration::missing());
        }
        self.0
            .checked_add(other.0)
            .filter(|v| *v != NAT)
            .map(Duration)
            .ok_or(TemporalError::Overflow {
                op: "duration + duration",
            })
    }

    /// Subtracts another duration, propagating missing values.
    ///
    /// # Errors
    ///
    /// Returns [`TemporalError::Overflow`] if the difference leaves the
    /// representable range.
    pub fn checked_sub(self, other: Duration) -> Result<Duration, TemporalError> {
        if self.is_missing() || other.is_missing() {
            return Ok(Duration::missing());
        }
        self.0
            .checked_sub(other.0)
            .filter(|v| *v != NAT)
            .map(Duration)
            .ok_or(TemporalError::Overflow {
                op: "duration - duration",
            })
    }

    /// Returns the negated duration. Missing stays missing.
    pub fn negated(self) -> Duration {
        if self.is_missing() {
            self
        } else {
            // Safety: self.0 != NAT == i64::MIN here, so negation cannot
            // overflow.
            Duration(-self.0)
        }
    }
}

fn scale(count: i64, unit_ns: i64, op: &'static str) -> Result<Duration, TemporalError> {
    count
        .checked_mul(unit_ns)
        .filter(|v| *v != NAT)
        .map(Duration)
        .ok_or(TemporalError::Overflow { op })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn constructors() {
        assert_eq!(Duration::from_secs(1).unwrap().nanos(), NANOS_PER_SEC);
        assert_eq!(Duration::from_minutes(2).unwrap().nanos(), 2 * NANOS_PER_MIN);
        assert_eq!(Duration::from_hours(-3).unwrap().nanos(), -3 * NANOS_PER_HOUR);
        assert_eq!(Duration::from_days(1).unwrap().nanos(), NANOS_PER_DAY);
    }

    #[test]
    fn constructor_overflow() {
        assert!(matches!(
            Duration::from_days(i64::MAX),
            Err(TemporalError::Overflow { .. })
        ));
    }

    #[test]
    fn ordering() {
        let one = Duration::from_secs(1).unwrap();
        let two = Duration::from_secs(2).unwrap();
        assert!(one < two);
        assert!(two.negated() < one);
    }

    #[test]
    fn checked_add_sub() {
        let h = Duration::from_hours(1).unwrap();
        let m = Duration::from_minutes(30).unwrap();
        assert_eq!(
            h.checked_add(m).unwrap().nanos(),
            NANOS_PER_HOUR + 30 * NANOS_PER_MIN
        );
        assert_eq!(h.checked_sub(h).unwrap().nanos(), 0);
    }

    #[test]
    fn add_overflow() {
        let max = Duration::from_nanos(i64::MAX);
        assert!(matches!(
            max.checked_add(Duration::from_nanos(1)),
            Err(TemporalError::Overflow { .. })
        ));
    }

    #[test]
    fn missing_propagates() {
        let m = Duration::missing();
        let h = Duration::from_hours(1).unwrap();
        assert!(m.checked_add(h).unwrap().is_missing());
        assert!(h.checked_sub(m).unwrap().is_missing());
        assert!(m.negated().is_missing());
    }

    #[test]
    fn negated() {
        let d = Duration::from_secs(5).unwrap();
        assert_eq!(d.negated().nanos(), -5 * NANOS_PER_SEC);
        assert_eq!(d.negated().negated(), d);
    }
}

//! Scalar points in time, optionally timezone-tagged.

use crate::civil::{self, CivilDate};
use crate::error::TemporalError;
use crate::zone::Zone;

/// Missing-value sentinel shared by instants, durations, and sequences.
pub const NAT: i64 = i64::MIN;

/// Smallest representable epoch-nanosecond value (`NAT` is excluded).
pub const MIN_NS: i64 = i64::MIN + 1;

/// Largest representable epoch-nanosecond value.
pub const MAX_NS: i64 = i64::MAX;

/// A single point in time at nanosecond resolution, optionally tagged with
/// a timezone.
///
/// The raw value counts nanoseconds since 1970-01-01T00:00:00 UTC; for
/// tz-aware instants the value is always the UTC instant, with the zone
/// carried alongside. A value of [`NAT`] marks a missing instant.
#[derive(Debug, Clone, PartialEq)]
pub struct Instant {
    value: i64,
    zone: Option<Zone>,
}

impl Instant {
    /// Creates a tz-naive instant from raw epoch nanoseconds.
    pub fn from_nanos(value: i64) -> Self {
        Self { value, zone: None }
    }

    /// Creates a tz-aware instant from raw UTC epoch nanoseconds.
    pub fn from_nanos_tz(value: i64, zone: Zone) -> Self {
        Self {
            value,
            zone: Some(zone),
        }
    }

    /// Creates a tz-naive instant at midnight of the given civil date.
    ///
    /// # Errors
    ///
    /// Returns [`TemporalError::InvalidDate`] for a nonexistent date and
    /// [`TemporalError::Overflow`] when the date is outside the nanosecond
    /// range.
    pub fn from_ymd(year: i64, month: u8, day: u8) -> Result<Self, TemporalError> {
        Self::from_ymd_hms(year, month, day, 0, 0, 0)
    }

    /// Creates a tz-naive instant from civil date and time-of-day.
    ///
    /// # Errors
    ///
    /// Returns [`TemporalError::InvalidDate`] / [`TemporalError::InvalidTime`]
    /// for nonexistent components and [`TemporalError::Overflow`] when the
    /// result is outside the nanosecond range.
    pub fn from_ymd_hms(
        year: i64,
        month: u8,
        day: u8,
        hour: u8,
        minute: u8,
        second: u8,
    ) -> Result<Self, TemporalError> {
        let date = CivilDate::new(year, month, day)?;
        if hour > 23 || minute > 59 || second > 59 {
            return Err(TemporalError::InvalidTime {
                hour,
                minute,
                second,
            });
        }
        let time_ns = i64::from(hour) * civil::NANOS_PER_HOUR
            + i64::from(minute) * civil::NANOS_PER_MIN
            + i64::from(second) * civil::NANOS_PER_SEC;
        Ok(Self::from_nanos(civil::to_epoch_ns(date, time_ns)?))
    }

    /// Returns the missing (NaT) instant.
    pub fn missing() -> Self {
        Self::from_nanos(NAT)
    }

    /// Returns the largest representable tz-naive instant.
    pub fn max() -> Self {
        Self::from_nanos(MAX_NS)
    }

    /// Returns the smallest representable tz-naive instant.
    pub fn min() -> Self {
        Self::from_nanos(MIN_NS)
    }

    /// Returns the raw epoch-nanosecond value (UTC for aware instants).
    pub fn value(&self) -> i64 {
        self.value
    }

    /// Returns the zone, if this instant is tz-aware.
    pub fn zone(&self) -> Option<&Zone> {
        self.zone.as_ref()
    }

    /// Returns true if this instant carries a timezone.
    pub fn is_aware(&self) -> bool {
        self.zone.is_some()
    }

    /// Returns true if this instant is the missing-value sentinel.
    pub fn is_missing(&self) -> bool {
        self.value == NAT
    }

    /// Reinterprets a tz-naive instant as wall-clock time in `zone`,
    /// producing the tz-aware instant with the same civil reading.
    ///
    /// Aware instants are re-tagged onto the new zone without changing the
    /// underlying UTC value. Missing instants only pick up the zone tag.
    pub fn localize(&self, zone: Zone) -> Result<Self, TemporalError> {
        if self.is_missing() || self.is_aware() {
            return Ok(Self {
                value: self.value,
                zone: Some(zone),
            });
        }
        // The naive value is the wall-clock reading; the UTC instant sits
        // one offset earlier. The offset is looked up at the wall reading,
        // which is exact for fixed-offset rules.
        let offset = zone.utc_offset(self.value);
        let utc = checked_shift_ns(self.value, -offset, "localize")?;
        Ok(Self {
            value: utc,
            zone: Some(zone),
        })
    }

    /// Returns the wall-clock nanosecond reading: the raw value for naive
    /// instants, the zone-local reading for aware ones.
    ///
    /// # Errors
    ///
    /// Returns [`TemporalError::Overflow`] if applying the zone offset
    /// leaves the representable range.
    pub fn wall_value(&self) -> Result<i64, TemporalError> {
        match (&self.zone, self.is_missing()) {
            (Some(zone), false) => {
                checked_shift_ns(self.value, zone.utc_offset(self.value), "wall reading")
            }
            _ => Ok(self.value),
        }
    }

    /// Rebuilds this instant from a new wall-clock reading, preserving the
    /// zone tag.
    ///
    /// # Errors
    ///
    /// Returns [`TemporalError::Overflow`] if converting back to UTC leaves
    /// the representable range.
    pub fn with_wall_value(&self, wall: i64) -> Result<Self, TemporalError> {
        let value = match &self.zone {
            Some(zone) if wall != NAT => {
                checked_shift_ns(wall, -zone.utc_offset(wall), "wall reading to UTC")?
            }
            _ => wall,
        };
        Ok(Self {
            value,
            zone: self.zone.clone(),
        })
    }

    /// Shifts this instant by a duration, preserving the zone tag and
    /// propagating missing values.
    ///
    /// # Errors
    ///
    /// Returns [`TemporalError::Overflow`] if the result leaves the
    /// representable range.
    pub fn checked_add(&self, delta: crate::Duration) -> Result<Self, TemporalError> {
        if delta.is_missing() {
            return Ok(Self {
                value: NAT,
                zone: self.zone.clone(),
            });
        }
        Ok(Self {
            value: checked_shift_ns(self.value, delta.nanos(), "instant + duration")?,
            zone: self.zone.clone(),
        })
    }

    /// Shifts this instant backwards by a duration.
    ///
    /// # Errors
    ///
    /// Returns [`TemporalError::Overflow`] if the result leaves the
    /// representable range.
    pub fn checked_sub(&self, delta: crate::Duration) -> Result<Self, TemporalError> {
        self.checked_add(delta.negated())
    }
}

/// Shifts an epoch-nanosecond value, treating [`NAT`] as a propagating
/// missing value and rejecting any result that would leave the
/// representable range or collide with the sentinel.
pub fn checked_shift_ns(value: i64, delta: i64, op: &'static str) -> Result<i64, TemporalError> {
    if value == NAT {
        return Ok(NAT);
    }
    value
        .checked_add(delta)
        .filter(|v| *v != NAT)
        .ok_or(TemporalError::Overflow { op })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::civil::NANOS_PER_HOUR;
    use crate::Duration;

    #[test]
    fn from_ymd_hms() {
        let t = Instant::from_ymd_hms(2000, 1, 1, 9, 0, 0).unwrap();
        let (date, time_ns) = civil::from_epoch_ns(t.value());
        assert_eq!(date, CivilDate::new(2000, 1, 1).unwrap());
        assert_eq!(time_ns, 9 * NANOS_PER_HOUR);
        assert!(!t.is_aware());
    }

    #[test]
    fn invalid_components() {
        assert!(matches!(
            Instant::from_ymd(2001, 2, 29),
            Err(TemporalError::InvalidDate { .. })
        ));
        assert!(matches!(
            Instant::from_ymd_hms(2000, 1, 1, 24, 0, 0),
            Err(TemporalError::InvalidTime { .. })
        ));
    }

    #[test]
    fn localize_shifts_to_utc() {
        let wall = Instant::from_ymd_hms(2000, 1, 1, 9, 0, 0).unwrap();
        let tokyo = Zone::fixed("+09:00", 9 * NANOS_PER_HOUR);
        let aware = wall.localize(tokyo.clone()).unwrap();
        assert!(aware.is_aware());
        // 09:00 in +09:00 is midnight UTC.
        assert_eq!(aware.value(), Instant::from_ymd(2000, 1, 1).unwrap().value());
        assert_eq!(aware.wall_value().unwrap(), wall.value());
        assert_eq!(aware.zone(), Some(&tokyo));
    }

    #[test]
    fn localize_missing_keeps_sentinel() {
        let aware = Instant::missing().localize(Zone::utc()).unwrap();
        assert!(aware.is_missing());
        assert!(aware.is_aware());
    }

    #[test]
    fn wall_round_trip() {
        let zone = Zone::fixed("-05:00", -5 * NANOS_PER_HOUR);
        let t = Instant::from_ymd_hms(2000, 6, 15, 12, 0, 0)
            .unwrap()
            .localize(zone)
            .unwrap();
        let wall = t.wall_value().unwrap();
        let back = t.with_wall_value(wall).unwrap();
        assert_eq!(back, t);
    }

    #[test]
    fn checked_add_sub_round_trip() {
        let t = Instant::from_ymd(2000, 1, 1).unwrap();
        let d = Duration::from_hours(2).unwrap();
        let shifted = t.checked_add(d).unwrap();
        assert_eq!(shifted.checked_sub(d).unwrap(), t);
    }

    #[test]
    fn add_preserves_zone() {
        let zone = Zone::utc();
        let t = Instant::from_nanos_tz(0, zone.clone());
        let shifted = t.checked_add(Duration::from_hours(1).unwrap()).unwrap();
        assert_eq!(shifted.zone(), Some(&zone));
    }

    #[test]
    fn add_overflow() {
        let t = Instant::max();
        assert!(matches!(
            t.checked_add(Duration::from_nanos(1)),
            Err(TemporalError::Overflow { .. })
        ));
    }

    #[test]
    fn shift_cannot_produce_sentinel() {
        // MIN_NS - 1 would be exactly NAT; it must be rejected, not wrapped.
        assert!(matches!(
            checked_shift_ns(MIN_NS, -1, "test"),
            Err(TemporalError::Overflow { .. })
        ));
    }

    #[test]
    fn missing_propagates_through_shift() {
        let m = Instant::missing();
        let shifted = m.checked_add(Duration::from_hours(5).unwrap()).unwrap();
        assert!(shifted.is_missing());
    }
}

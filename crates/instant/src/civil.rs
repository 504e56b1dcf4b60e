//! Proleptic Gregorian civil date math over epoch day counts.

use crate::error::TemporalError;

/// Nanoseconds in one second.
pub const NANOS_PER_SEC: i64 = 1_000_000_000;
/// Nanoseconds in one minute.
pub const NANOS_PER_MIN: i64 = 60 * NANOS_PER_SEC;
/// Nanoseconds in one hour.
pub const NANOS_PER_HOUR: i64 = 60 * NANOS_PER_MIN;
/// Nanoseconds in one day.
pub const NANOS_PER_DAY: i64 = 24 * NANOS_PER_HOUR;

/// Number of days in each month of a non-leap year (index 0 unused).
const DAYS_PER_MONTH: [u8; 13] = [0, 31, 28, 31, 30, 31, 30, 31, 31, 30, 31, 30, 31];

/// Day of the week, ISO numbering (Monday first).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Weekday {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
    Sunday,
}

impl Weekday {
    /// Returns the 0-based index with Monday = 0.
    pub fn index(self) -> i64 {
        match self {
            Weekday::Monday => 0,
            Weekday::Tuesday => 1,
            Weekday::Wednesday => 2,
            Weekday::Thursday => 3,
            Weekday::Friday => 4,
            Weekday::Saturday => 5,
            Weekday::Sunday => 6,
        }
    }

    /// Returns true for Saturday and Sunday.
    pub fn is_weekend(self) -> bool {
        matches!(self, Weekday::Saturday | Weekday::Sunday)
    }

    fn from_index(idx: i64) -> Self {
        match idx {
            0 => Weekday::Monday,
            1 => Weekday::Tuesday,
            2 => Weekday::Wednesday,
            3 => Weekday::Thursday,
            4 => Weekday::Friday,
            5 => Weekday::Saturday,
            _ => Weekday::Sunday,
        }
    }
}

/// A calendar date in the proleptic Gregorian calendar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CivilDate {
    year: i64,
    month: u8,
    day: u8,
}

impl CivilDate {
    /// Creates a new `CivilDate` from year, month, and day.
    ///
    /// # Errors
    ///
    /// Returns [`TemporalError::InvalidDate`] if the month or day does not
    /// exist in the given year.
    pub fn new(year: i64, month: u8, day: u8) -> Result<Self, TemporalError> {
        if !(1..=12).contains(&month) || day < 1 || day > days_in_month(year, month) {
            return Err(TemporalError::InvalidDate { year, month, day });
        }
        Ok(Self { year, month, day })
    }

    /// Returns the year.
    pub fn year(self) -> i64 {
        self.year
    }

    /// Returns the month (1..=12).
    pub fn month(self) -> u8 {
        self.month
    }

    /// Returns the day within the month.
    pub fn day(self) -> u8 {
        self.day
    }

    /// Returns the number of days since 1970-01-01.
    pub fn epoch_days(self) -> i64 {
        let y = if self.month <= 2 {
            self.year - 1
        } else {
            self.year
        };
        let m = i64::from(self.month);
        let d = i64::from(self.day);
        let era = y.div_euclid(400);
        let yoe = y - era * 400;
        let mp = if m > 2 { m - 3 } else { m + 9 };
        let doy = (153 * mp + 2) / 5 + d - 1;
        let doe = yoe * 365 + yoe / 4 - yoe / 100 + doy;
        era * 146_097 + doe - 719_468
    }

    /// Reconstructs a `CivilDate` from a count of days since 1970-01-01.
    pub fn from_epoch_days(days: i64) -> Self {
        let z = days + 719_468;
        let era = z.div_euclid(146_097);
        let doe = z - era * 146_097;
        let yoe = (doe - doe / 1_460 + doe / 36_524 - doe / 146_096) / 365;
        let mut year = yoe + era * 400;
        let doy = doe - (365 * yoe + yoe / 4 - yoe / 100);
        let mp = (5 * doy + 2) / 153;
        let day = (doy - (153 * mp + 2) / 5 + 1) as u8;
        let month = if mp < 10 { mp + 3 } else { mp - 9 } as u8;
        if month <= 2 {
            year += 1;
        }
        Self { year, month, day }
    }

    /// Returns the day of the week of this date.
    pub fn weekday(self) -> Weekday {
        // 1970-01-01 was a Thursday (index 3, Monday = 0).
        Weekday::from_index((self.epoch_days() + 3).rem_euclid(7))
    }

    /// Returns the last day of this date's month.
    pub fn last_day_of_month(self) -> u8 {
        days_in_month(self.year, self.month)
    }
}

/// Returns true if `year` is a leap year in the proleptic Gregorian calendar.
pub fn is_leap_year(year: i64) -> bool {
    year % 4 == 0 && (year % 100 != 0 || year % 400 == 0)
}

/// Returns the number of days in the given month.
pub fn days_in_month(year: i64, month: u8) -> u8 {
    if month == 2 && is_leap_year(year) {
        29
    } else {
        DAYS_PER_MONTH[month as usize]
    }
}

/// Shifts a date by `months` whole months, clamping the day to the end of
/// the target month when necessary (e.g. Jan 31 + 1 month = Feb 28/29).
pub fn shift_months(date: CivilDate, months: i64) -> CivilDate {
    let total = date.year() * 12 + i64::from(date.month()) - 1 + months;
    let year = total.div_euclid(12);
    let month = (total.rem_euclid(12) + 1) as u8;
    let day = date.day().min(days_in_month(year, month));
    // Safety: month is 1..=12 by construction and day is clamped to the
    // month length, so the constructor cannot fail.
    CivilDate::new(year, month, day).expect("clamped day is always valid")
}

/// Combines a civil date and an in-day nanosecond offset into an
/// epoch-nanosecond value.
///
/// # Errors
///
/// Returns [`TemporalError::Overflow`] if the result leaves the
/// representable nanosecond range.
pub fn to_epoch_ns(date: CivilDate, time_ns: i64) -> Result<i64, TemporalError> {
    date.epoch_days()
        .checked_mul(NANOS_PER_DAY)
        .and_then(|ns| ns.checked_add(time_ns))
        .filter(|ns| *ns != i64::MIN)
        .ok_or(TemporalError::Overflow {
            op: "civil date to epoch nanoseconds",
        })
}

/// Splits an epoch-nanosecond value into a civil date and the nanosecond
/// offset within that day (always in `0..NANOS_PER_DAY`).
pub fn from_epoch_ns(ns: i64) -> (CivilDate, i64) {
    let days = ns.div_euclid(NANOS_PER_DAY);
    let time_ns = ns.rem_euclid(NANOS_PER_DAY);
    (CivilDate::from_epoch_days(days), time_ns)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn epoch_days_at_epoch() {
        let d = CivilDate::new(1970, 1, 1).unwrap();
        assert_eq!(d.epoch_days(), 0);
        assert_eq!(d.weekday(), Weekday::Thursday);
    }

    #[test]
    fn epoch_days_known_values() {
        assert_eq!(CivilDate::new(2000, 1, 1).unwrap().epoch_days(), 10_957);
        assert_eq!(CivilDate::new(1969, 12, 31).unwrap().epoch_days(), -1);
        assert_eq!(CivilDate::new(2016, 1, 1).unwrap().epoch_days(), 16_801);
    }

    #[test]
    fn from_epoch_days_round_trip() {
        for days in [-1_000_000, -1, 0, 1, 10_957, 2_000_000] {
            let d = CivilDate::from_epoch_days(days);
            assert_eq!(d.epoch_days(), days, "round trip failed for {days}");
        }
    }

    #[test]
    fn invalid_dates_rejected() {
        assert!(CivilDate::new(2001, 2, 29).is_err());
        assert!(CivilDate::new(2000, 0, 1).is_err());
        assert!(CivilDate::new(2000, 13, 1).is_err());
        assert!(CivilDate::new(2000, 4, 31).is_err());
    }

    #[test]
    fn leap_years() {
        assert!(is_leap_year(2000));
        assert!(is_leap_year(2016));
        assert!(!is_leap_year(1900));
        assert!(!is_leap_year(2001));
        assert_eq!(days_in_month(2000, 2), 29);
        assert_eq!(days_in_month(2001, 2), 28);
    }

    #[test]
    fn weekdays() {
        assert_eq!(
            CivilDate::new(2016, 1, 1).unwrap().weekday(),
            Weekday::Friday
        );
        assert_eq!(
            CivilDate::new(2016, 1, 2).unwrap().weekday(),
            Weekday::Saturday
        );
        assert!(CivilDate::new(2016, 1, 3).unwrap().weekday().is_weekend());
        assert!(!CivilDate::new(2016, 1, 4).unwrap().weekday().is_weekend());
    }

    #[test]
    fn shift_months_clamps_day() {
        let jan31 = CivilDate::new(2000, 1, 31).unwrap();
        assert_eq!(shift_months(jan31, 1), CivilDate::new(2000, 2, 29).unwrap());
        assert_eq!(shift_months(jan31, 13), CivilDate::new(2001, 2, 28).unwrap());
        assert_eq!(shift_months(jan31, -2), CivilDate::new(1999, 11, 30).unwrap());
    }

    #[test]
    fn shift_months_year_boundary() {
        let dec = CivilDate::new(2000, 12, 15).unwrap();
        assert_eq!(shift_months(dec, 1), CivilDate::new(2001, 1, 15).unwrap());
        let jan = CivilDate::new(2000, 1, 15).unwrap();
        assert_eq!(shift_months(jan, -1), CivilDate::new(1999, 12, 15).unwrap());
    }

    #[test]
    fn epoch_ns_round_trip() {
        let d = CivilDate::new(2000, 1, 1).unwrap();
        let ns = to_epoch_ns(d, 9 * NANOS_PER_HOUR).unwrap();
        let (back, time_ns) = from_epoch_ns(ns);
        assert_eq!(back, d);
        assert_eq!(time_ns, 9 * NANOS_PER_HOUR);
    }

    #[test]
    fn from_epoch_ns_negative() {
        // One nanosecond before the epoch is Dec 31 1969, end of day.
        let (d, time_ns) = from_epoch_ns(-1);
        assert_eq!(d, CivilDate::new(1969, 12, 31).unwrap());
        assert_eq!(time_ns, NANOS_PER_DAY - 1);
    }

    #[test]
    fn to_epoch_ns_overflow() {
        let far = CivilDate::new(300_000, 1, 1).unwrap();
        assert!(matches!(
            to_epoch_ns(far, 0),
            Err(TemporalError::Overflow { .. })
        ));
    }
}

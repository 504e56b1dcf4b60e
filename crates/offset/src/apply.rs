//! Rule application: shifting instants by calendar offsets.

use tempus_instant::civil::{self, CivilDate};
use tempus_instant::{checked_shift_ns, Duration, Instant, TemporalError};

use crate::offset::{CalendarOffset, OffsetKind};

impl CalendarOffset {
    /// Applies this offset to an instant.
    ///
    /// Pure: the input is untouched and the result carries the same zone
    /// tag. Missing instants pass through unchanged. Tick offsets shift the
    /// absolute value; calendar rules are evaluated on the wall-clock
    /// reading, so a month-end lands on the local month end for aware
    /// instants.
    ///
    /// # Errors
    ///
    /// Returns [`TemporalError::Overflow`] if the result leaves the
    /// representable nanosecond range.
    pub fn apply(&self, instant: &Instant) -> Result<Instant, TemporalError> {
        if instant.is_missing() {
            return Ok(instant.clone());
        }
        if let Some(shift) = self.as_tick() {
            return instant.checked_add(Duration::from_nanos(shift));
        }
        let wall = instant.wall_value()?;
        let (date, time_ns) = civil::from_epoch_ns(wall);
        let (new_date, new_time) = match self.unit_nanos() {
            // Normalizing tick: shift the wall reading, then truncate below.
            Some(unit) => {
                let shift = self.n().checked_mul(unit).ok_or(TemporalError::Overflow {
                    op: "offset repeat count",
                })?;
                civil::from_epoch_ns(checked_shift_ns(wall, shift, "offset shift")?)
            }
            None => (self.shift_date(date)?, time_ns),
        };
        let time = if self.normalize() { 0 } else { new_time };
        instant.with_wall_value(civil::to_epoch_ns(new_date, time)?)
    }

    /// Snaps an instant forward to this offset's anchor without consuming a
    /// repeat (the `n = 0` application). Identity for tick offsets and
    /// unanchored rules.
    ///
    /// # Errors
    ///
    /// Returns [`TemporalError::Overflow`] if the result leaves the
    /// representable nanosecond range.
    pub fn rollforward(&self, instant: &Instant) -> Result<Instant, TemporalError> {
        if self.is_tick() || instant.is_missing() {
            return Ok(instant.clone());
        }
        CalendarOffset::new(self.kind(), 0)
            .with_normalize(self.normalize())
            .apply(instant)
    }

    fn shift_date(&self, date: CivilDate) -> Result<CivilDate, TemporalError> {
        let n = self.n();
        let out = match self.kind() {
            OffsetKind::Week { weekday: None } => from_days(checked_days(
                date.epoch_days(),
                n.checked_mul(7),
            )?),
            OffsetKind::Week {
                weekday: Some(anchor),
            } => {
                let cur = date.weekday().index();
                let anchor = anchor.index();
                let days = date.epoch_days();
                let shifted = if n > 0 {
                    if cur == anchor {
                        checked_days(days, n.checked_mul(7))?
                    } else {
                        let to_anchor = (anchor - cur).rem_euclid(7);
                        checked_days(days + to_anchor, (n - 1).checked_mul(7))?
                    }
                } else if n < 0 {
                    if cur == anchor {
                        checked_days(days, n.checked_mul(7))?
                    } else {
                        let to_anchor = (cur - anchor).rem_euclid(7);
                        checked_days(days - to_anchor, (n + 1).checked_mul(7))?
                    }
                } else {
                    days + (anchor - cur).rem_euclid(7)
                };
                from_days(shifted)
            }
            OffsetKind::Months => civil::shift_months(date, n),
            OffsetKind::MonthBegin => {
                let on_anchor = date.day() == 1;
                // Safety: day 1 exists in every month.
                let first = CivilDate::new(date.year(), date.month(), 1)
                    .expect("day 1 is always valid");
                civil::shift_months(first, begin_shift(n, on_anchor))
            }
            OffsetKind::MonthEnd => {
                let on_anchor = date.day() == date.last_day_of_month();
                let shifted = civil::shift_months(date, end_shift(n, on_anchor));
                month_end_of(shifted.year(), shifted.month())
            }
            OffsetKind::QuarterEnd => {
                // Quarter end at or after the input date.
                let qmonth = ((date.month() + 2) / 3) * 3;
                let qend = month_end_of(date.year(), qmonth);
                let on_anchor = date == qend;
                let months = end_shift(n, on_anchor)
                    .checked_mul(3)
                    .ok_or(TemporalError::Overflow {
                        op: "offset repeat count",
                    })?;
                let shifted = civil::shift_months(qend, months);
                month_end_of(shifted.year(), shifted.month())
            }
            OffsetKind::YearBegin => {
                let on_anchor = date.month() == 1 && date.day() == 1;
                // Safety: Jan 1 exists in every year.
                CivilDate::new(date.year() + begin_shift(n, on_anchor), 1, 1)
                    .expect("Jan 1 is always valid")
            }
            OffsetKind::YearEnd => {
                let on_anchor = date.month() == 12 && date.day() == 31;
                // Safety: Dec 31 exists in every year.
                CivilDate::new(date.year() + end_shift(n, on_anchor), 12, 31)
                    .expect("Dec 31 is always valid")
            }
            OffsetKind::BusinessDay => from_days(business_days(date, n)?),
            // Ticks never reach shift_date.
            OffsetKind::Nano
            | OffsetKind::Micro
            | OffsetKind::Milli
            | OffsetKind::Second
            | OffsetKind::Minute
            | OffsetKind::Hour
            | OffsetKind::Day => date,
        };
        Ok(out)
    }
}

/// Forward shift for "begin" anchors: rolling onto the anchor counts as the
/// first application in the backward direction only.
fn begin_shift(n: i64, on_anchor: bool) -> i64 {
    if n > 0 || on_anchor {
        n
    } else {
        n + 1
    }
}

/// Forward shift for "end" anchors: rolling onto the anchor counts as the
/// first application in the forward direction only.
fn end_shift(n: i64, on_anchor: bool) -> i64 {
    if n > 0 && !on_anchor {
        n - 1
    } else {
        n
    }
}

fn month_end_of(year: i64, month: u8) -> CivilDate {
    // Safety: the last day of a month is always a valid day of that month.
    CivilDate::new(year, month, civil::days_in_month(year, month))
        .expect("month end is always valid")
}

fn from_days(days: i64) -> CivilDate {
    CivilDate::from_epoch_days(days)
}

fn checked_days(days: i64, delta: Option<i64>) -> Result<i64, TemporalError> {
    delta
        .and_then(|d| days.checked_add(d))
        .ok_or(TemporalError::Overflow {
            op: "offset repeat count",
        })
}

/// Steps `n` business days from `date`, O(1) in `n`.
///
/// Starting on a weekend consumes the first step rolling onto the adjacent
/// business day (Saturday + 1 business day is Monday).
fn business_days(date: CivilDate, n: i64) -> Result<i64, TemporalError> {
    let mut days = date.epoch_days();
    let mut wd = date.weekday().index();
    let mut n = n;
    if n > 0 {
        if wd >= 5 {
            days += 7 - wd; // to Monday
            wd = 0;
            n -= 1;
        }
        let rem = n % 5;
        let jump = checked_days(days, (n / 5).checked_mul(7))?;
        Ok(if wd + rem > 4 { jump + rem + 2 } else { jump + rem })
    } else if n < 0 {
        if wd >= 5 {
            days -= wd - 4; // to Friday
            wd = 4;
            n += 1;
        }
        let m = -n;
        let rem = m % 5;
        let jump = checked_days(days, (m / 5).checked_mul(-7))?;
        Ok(if wd - rem < 0 { jump - rem - 2 } else { jump - rem })
    } else {
        // Roll forward to the next business day.
        Ok(if wd >= 5 { days + 7 - wd } else { days })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempus_instant::civil::NANOS_PER_HOUR;
    use tempus_instant::{Weekday, Zone};

    fn at(y: i64, m: u8, d: u8) -> Instant {
        Instant::from_ymd(y, m, d).unwrap()
    }

    fn date_of(t: &Instant) -> CivilDate {
        civil::from_epoch_ns(t.value()).0
    }

    #[test]
    fn tick_apply_shifts_absolute_value() {
        let t = Instant::from_ymd_hms(2000, 1, 1, 9, 0, 0).unwrap();
        let shifted = CalendarOffset::hours(2).apply(&t).unwrap();
        assert_eq!(
            shifted,
            Instant::from_ymd_hms(2000, 1, 1, 11, 0, 0).unwrap()
        );
    }

    #[test]
    fn missing_passes_through() {
        let out = CalendarOffset::month_end(1).apply(&Instant::missing()).unwrap();
        assert!(out.is_missing());
    }

    #[test]
    fn month_end_rolls_forward() {
        let out = CalendarOffset::month_end(1).apply(&at(2000, 1, 15)).unwrap();
        assert_eq!(date_of(&out), CivilDate::new(2000, 1, 31).unwrap());
        // Leap February.
        let out = CalendarOffset::month_end(1).apply(&at(2000, 2, 15)).unwrap();
        assert_eq!(date_of(&out), CivilDate::new(2000, 2, 29).unwrap());
    }

    #[test]
    fn month_end_on_anchor_advances() {
        let out = CalendarOffset::month_end(1).apply(&at(2000, 1, 31)).unwrap();
        assert_eq!(date_of(&out), CivilDate::new(2000, 2, 29).unwrap());
    }

    #[test]
    fn month_end_backward() {
        let out = CalendarOffset::month_end(-1).apply(&at(2000, 1, 15)).unwrap();
        assert_eq!(date_of(&out), CivilDate::new(1999, 12, 31).unwrap());
    }

    #[test]
    fn month_end_preserves_time_of_day() {
        let t = Instant::from_ymd_hms(2000, 1, 15, 0, 15, 0).unwrap();
        let out = CalendarOffset::month_end(1).apply(&t).unwrap();
        assert_eq!(out, Instant::from_ymd_hms(2000, 1, 31, 0, 15, 0).unwrap());
    }

    #[test]
    fn normalize_truncates_to_midnight() {
        let t = Instant::from_ymd_hms(2000, 1, 15, 13, 45, 0).unwrap();
        let out = CalendarOffset::month_end(1)
            .with_normalize(true)
            .apply(&t)
            .unwrap();
        assert_eq!(out, at(2000, 1, 31));
    }

    #[test]
    fn normalizing_tick_truncates() {
        let t = Instant::from_ymd_hms(2000, 1, 1, 23, 0, 0).unwrap();
        let out = CalendarOffset::hours(2).with_normalize(true).apply(&t).unwrap();
        assert_eq!(out, at(2000, 1, 2));
    }

    #[test]
    fn month_begin() {
        let out = CalendarOffset::month_begin(1).apply(&at(2000, 1, 15)).unwrap();
        assert_eq!(date_of(&out), CivilDate::new(2000, 2, 1).unwrap());
        let out = CalendarOffset::month_begin(-1).apply(&at(2000, 1, 15)).unwrap();
        assert_eq!(date_of(&out), CivilDate::new(2000, 1, 1).unwrap());
        let out = CalendarOffset::month_begin(1).apply(&at(2000, 2, 1)).unwrap();
        assert_eq!(date_of(&out), CivilDate::new(2000, 3, 1).unwrap());
    }

    #[test]
    fn months_clamp_day() {
        let out = CalendarOffset::months(1).apply(&at(2000, 1, 31)).unwrap();
        assert_eq!(date_of(&out), CivilDate::new(2000, 2, 29).unwrap());
        let out = CalendarOffset::months(5).apply(&at(2000, 1, 5)).unwrap();
        assert_eq!(date_of(&out), CivilDate::new(2000, 6, 5).unwrap());
    }

    #[test]
    fn quarter_end() {
        let out = CalendarOffset::quarter_end(1).apply(&at(2000, 1, 15)).unwrap();
        assert_eq!(date_of(&out), CivilDate::new(2000, 3, 31).unwrap());
        let out = CalendarOffset::quarter_end(1).apply(&at(2000, 3, 31)).unwrap();
        assert_eq!(date_of(&out), CivilDate::new(2000, 6, 30).unwrap());
        let out = CalendarOffset::quarter_end(-1).apply(&at(2000, 1, 15)).unwrap();
        assert_eq!(date_of(&out), CivilDate::new(1999, 12, 31).unwrap());
    }

    #[test]
    fn year_anchors() {
        let out = CalendarOffset::year_begin(1).apply(&at(2000, 6, 15)).unwrap();
        assert_eq!(date_of(&out), CivilDate::new(2001, 1, 1).unwrap());
        let out = CalendarOffset::year_begin(-1).apply(&at(2000, 6, 15)).unwrap();
        assert_eq!(date_of(&out), CivilDate::new(2000, 1, 1).unwrap());
        let out = CalendarOffset::year_end(1).apply(&at(2000, 6, 15)).unwrap();
        assert_eq!(date_of(&out), CivilDate::new(2000, 12, 31).unwrap());
        let out = CalendarOffset::year_end(1).apply(&at(2000, 12, 31)).unwrap();
        assert_eq!(date_of(&out), CivilDate::new(2001, 12, 31).unwrap());
    }

    #[test]
    fn weeks_unanchored() {
        let out = CalendarOffset::weeks(2).apply(&at(2000, 1, 1)).unwrap();
        assert_eq!(date_of(&out), CivilDate::new(2000, 1, 15).unwrap());
    }

    #[test]
    fn weeks_anchored() {
        // 2000-01-01 was a Saturday.
        assert_eq!(date_of(&at(2000, 1, 1)).weekday(), Weekday::Saturday);
        let wed = CalendarOffset::weeks_on(Weekday::Wednesday, 1);
        let out = wed.apply(&at(2000, 1, 1)).unwrap();
        assert_eq!(date_of(&out), CivilDate::new(2000, 1, 5).unwrap());
        // On the anchor, one full week.
        let out = wed.apply(&at(2000, 1, 5)).unwrap();
        assert_eq!(date_of(&out), CivilDate::new(2000, 1, 12).unwrap());
        // Backwards off-anchor rolls back to the previous Wednesday.
        let out = CalendarOffset::weeks_on(Weekday::Wednesday, -1)
            .apply(&at(2000, 1, 1))
            .unwrap();
        assert_eq!(date_of(&out), CivilDate::new(1999, 12, 29).unwrap());
    }

    #[test]
    fn business_days_over_weekend() {
        // 2000-01-07 was a Friday.
        let out = CalendarOffset::business_days(1).apply(&at(2000, 1, 7)).unwrap();
        assert_eq!(date_of(&out), CivilDate::new(2000, 1, 10).unwrap());
        // Saturday + 1 business day is Monday.
        let out = CalendarOffset::business_days(1).apply(&at(2000, 1, 8)).unwrap();
        assert_eq!(date_of(&out), CivilDate::new(2000, 1, 10).unwrap());
        // Monday - 1 business day is Friday.
        let out = CalendarOffset::business_days(-1).apply(&at(2000, 1, 10)).unwrap();
        assert_eq!(date_of(&out), CivilDate::new(2000, 1, 7).unwrap());
        // Ten business days are two calendar weeks.
        let out = CalendarOffset::business_days(10).apply(&at(2000, 1, 10)).unwrap();
        assert_eq!(date_of(&out), CivilDate::new(2000, 1, 24).unwrap());
    }

    #[test]
    fn rollforward_snaps_without_consuming() {
        let me = CalendarOffset::month_end(1);
        let out = me.rollforward(&at(2000, 1, 15)).unwrap();
        assert_eq!(date_of(&out), CivilDate::new(2000, 1, 31).unwrap());
        let out = me.rollforward(&at(2000, 1, 31)).unwrap();
        assert_eq!(date_of(&out), CivilDate::new(2000, 1, 31).unwrap());
        // Ticks are untouched.
        let t = Instant::from_ymd_hms(2000, 1, 1, 9, 30, 0).unwrap();
        assert_eq!(CalendarOffset::hours(1).rollforward(&t).unwrap(), t);
    }

    #[test]
    fn aware_instant_uses_wall_clock() {
        // 2000-01-31 23:00 UTC is already February in +09:00; the local
        // month end is Feb 29, not Jan 31.
        let zone = Zone::fixed("+09:00", 9 * NANOS_PER_HOUR);
        let t = Instant::from_ymd_hms(2000, 1, 31, 23, 0, 0)
            .unwrap()
            .localize(Zone::utc())
            .unwrap();
        let shifted = Instant::from_nanos_tz(t.value(), zone.clone());
        let out = CalendarOffset::month_end(1).apply(&shifted).unwrap();
        let wall = out.wall_value().unwrap();
        let (date, _) = civil::from_epoch_ns(wall);
        assert_eq!(date, CivilDate::new(2000, 2, 29).unwrap());
        assert_eq!(out.zone(), Some(&zone));
    }

    #[test]
    fn apply_overflow() {
        let t = Instant::max();
        assert!(matches!(
            CalendarOffset::days(1).apply(&t),
            Err(TemporalError::Overflow { .. })
        ));
    }
}

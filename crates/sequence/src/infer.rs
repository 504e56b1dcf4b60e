//! Frequency inference from observed spacing.

use tempus_instant::civil::{
    NANOS_PER_DAY, NANOS_PER_HOUR, NANOS_PER_MIN, NANOS_PER_SEC,
};
use tempus_instant::NAT;
use tempus_offset::CalendarOffset;

/// Derives a tick-sized frequency from the spacing of raw values.
///
/// Returns `Some` only when there are at least two values, none missing,
/// and all first differences are equal and positive. The unit is the
/// coarsest tick dividing the common difference evenly.
pub fn infer_tick(values: &[i64]) -> Option<CalendarOffset> {
    if values.len() < 2 || values.contains(&NAT) {
        return None;
    }
    let step = values[1].checked_sub(values[0])?;
    if step <= 0 {
        return None;
    }
    for pair in values.windows(2) {
        if pair[1].checked_sub(pair[0])? != step {
            return None;
        }
    }
    Some(tick_of(step))
}

fn tick_of(step: i64) -> CalendarOffset {
    if step % NANOS_PER_DAY == 0 {
        CalendarOffset::days(step / NANOS_PER_DAY)
    } else if step % NANOS_PER_HOUR == 0 {
        CalendarOffset::hours(step / NANOS_PER_HOUR)
    } else if step % NANOS_PER_MIN == 0 {
        CalendarOffset::minutes(step / NANOS_PER_MIN)
    } else if step % NANOS_PER_SEC == 0 {
        CalendarOffset::seconds(step / NANOS_PER_SEC)
    } else {
        CalendarOffset::nanos(step)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn infers_hours() {
        let values = [0, NANOS_PER_HOUR, 2 * NANOS_PER_HOUR];
        assert_eq!(infer_tick(&values), Some(CalendarOffset::hours(1)));
    }

    #[test]
    fn infers_coarsest_unit() {
        let values = [0, NANOS_PER_DAY, 2 * NANOS_PER_DAY];
        assert_eq!(infer_tick(&values), Some(CalendarOffset::days(1)));
        let values = [0, 90 * NANOS_PER_MIN, 180 * NANOS_PER_MIN];
        assert_eq!(infer_tick(&values), Some(CalendarOffset::minutes(90)));
    }

    #[test]
    fn irregular_spacing_yields_none() {
        let values = [0, NANOS_PER_HOUR, 3 * NANOS_PER_HOUR];
        assert_eq!(infer_tick(&values), None);
    }

    #[test]
    fn missing_values_yield_none() {
        let values = [0, NAT, 2 * NANOS_PER_HOUR];
        assert_eq!(infer_tick(&values), None);
    }

    #[test]
    fn short_or_decreasing_yields_none() {
        assert_eq!(infer_tick(&[]), None);
        assert_eq!(infer_tick(&[5]), None);
        assert_eq!(infer_tick(&[NANOS_PER_HOUR, 0]), None);
        assert_eq!(infer_tick(&[0, 0]), None);
    }
}

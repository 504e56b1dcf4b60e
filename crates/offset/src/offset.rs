//! The calendar offset value type.

use tempus_instant::civil::{
    NANOS_PER_DAY, NANOS_PER_HOUR, NANOS_PER_MIN, NANOS_PER_SEC,
};
use tempus_instant::Weekday;

/// The rule family of a [`CalendarOffset`].
///
/// Tick kinds cover a constant number of nanoseconds regardless of the
/// input instant; calendar kinds are input-dependent rules evaluated on the
/// wall-clock reading.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OffsetKind {
    /// One nanosecond (tick).
    Nano,
    /// One microsecond (tick).
    Micro,
    /// One millisecond (tick).
    Milli,
    /// One second (tick).
    Second,
    /// One minute (tick).
    Minute,
    /// One hour (tick).
    Hour,
    /// One 24-hour day (tick).
    Day,
    /// Seven calendar days, optionally anchored to a weekday.
    Week {
        /// When set, results snap to this weekday.
        weekday: Option<Weekday>,
    },
    /// Whole months, clamping the day to the target month's length.
    Months,
    /// First day of the month.
    MonthBegin,
    /// Last day of the month.
    MonthEnd,
    /// Last day of the calendar quarter (Mar/Jun/Sep/Dec).
    QuarterEnd,
    /// January 1st.
    YearBegin,
    /// December 31st.
    YearEnd,
    /// Weekdays, skipping Saturday and Sunday.
    BusinessDay,
}

/// A variable-length, calendar-relative shift applied via a rule.
///
/// `n` is the repeat count; its sign is the direction. `normalize` truncates
/// the wall-clock time-of-day to midnight after the rule is applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CalendarOffset {
    kind: OffsetKind,
    n: i64,
    normalize: bool,
}

impl CalendarOffset {
    /// Creates an offset with the given rule kind and repeat count.
    pub fn new(kind: OffsetKind, n: i64) -> Self {
        Self {
            kind,
            n,
            normalize: false,
        }
    }

    /// `n` nanoseconds.
    pub fn nanos(n: i64) -> Self {
        Self::new(OffsetKind::Nano, n)
    }

    /// `n` seconds.
    pub fn seconds(n: i64) -> Self {
        Self::new(OffsetKind::Second, n)
    }

    /// `n` minutes.
    pub fn minutes(n: i64) -> Self {
        Self::new(OffsetKind::Minute, n)
    }

    /// `n` hours.
    pub fn hours(n: i64) -> Self {
        Self::new(OffsetKind::Hour, n)
    }

    /// `n` 24-hour days.
    pub fn days(n: i64) -> Self {
        Self::new(OffsetKind::Day, n)
    }

    /// `n` unanchored weeks.
    pub fn weeks(n: i64) -> Self {
        Self::new(OffsetKind::Week { weekday: None }, n)
    }

    /// `n` weeks anchored to the given weekday.
    pub fn weeks_on(weekday: Weekday, n: i64) -> Self {
        Self::new(
            OffsetKind::Week {
                weekday: Some(weekday),
            },
            n,
        )
    }

    /// `n` whole months, day-of-month clamped.
    pub fn months(n: i64) -> Self {
        Self::new(OffsetKind::Months, n)
    }

    /// `n` month-begin anchors.
    pub fn month_begin(n: i64) -> Self {
        Self::new(OffsetKind::MonthBegin, n)
    }

    /// `n` month-end anchors.
    pub fn month_end(n: i64) -> Self {
        Self::new(OffsetKind::MonthEnd, n)
    }

    /// `n` quarter-end anchors.
    pub fn quarter_end(n: i64) -> Self {
        Self::new(OffsetKind::QuarterEnd, n)
    }

    /// `n` year-begin anchors.
    pub fn year_begin(n: i64) -> Self {
        Self::new(OffsetKind::YearBegin, n)
    }

    /// `n` year-end anchors.
    pub fn year_end(n: i64) -> Self {
        Self::new(OffsetKind::YearEnd, n)
    }

    /// `n` business days.
    pub fn business_days(n: i64) -> Self {
        Self::new(OffsetKind::BusinessDay, n)
    }

    /// Sets whether results are truncated to local midnight.
    pub fn with_normalize(mut self, normalize: bool) -> Self {
        self.normalize = normalize;
        self
    }

    /// Returns the rule kind.
    pub fn kind(&self) -> OffsetKind {
        self.kind
    }

    /// Returns the repeat count.
    pub fn n(&self) -> i64 {
        self.n
    }

    /// Returns whether results are truncated to local midnight.
    pub fn normalize(&self) -> bool {
        self.normalize
    }

    /// Returns the constant nanosecond length of a single repeat for tick
    /// kinds, `None` for calendar kinds.
    pub fn unit_nanos(&self) -> Option<i64> {
        match self.kind {
            OffsetKind::Nano => Some(1),
            OffsetKind::Micro => Some(1_000),
            OffsetKind::Milli => Some(1_000_000),
            OffsetKind::Second => Some(NANOS_PER_SEC),
            OffsetKind::Minute => Some(NANOS_PER_MIN),
            OffsetKind::Hour => Some(NANOS_PER_HOUR),
            OffsetKind::Day => Some(NANOS_PER_DAY),
            _ => None,
        }
    }

    /// Returns true if this offset has a constant nanosecond length.
    ///
    /// Normalizing offsets are never tick-sized: truncation to midnight
    /// makes the effect input-dependent.
    pub fn is_tick(&self) -> bool {
        self.unit_nanos().is_some() && !self.normalize
    }

    /// Returns the total fixed shift in nanoseconds (`n * unit`) for
    /// tick-sized offsets.
    pub fn as_tick(&self) -> Option<i64> {
        if !self.is_tick() {
            return None;
        }
        self.unit_nanos().and_then(|unit| self.n.checked_mul(unit))
    }

    /// Returns the offset with its direction flipped, or `None` when the
    /// count cannot be negated.
    pub fn negated(&self) -> Option<Self> {
        Some(Self {
            n: self.n.checked_neg()?,
            ..*self
        })
    }

    /// Returns the offset with its count multiplied by `k`, or `None` on
    /// count overflow.
    pub fn scaled(&self, k: i64) -> Option<Self> {
        Some(Self {
            n: self.n.checked_mul(k)?,
            ..*self
        })
    }
}

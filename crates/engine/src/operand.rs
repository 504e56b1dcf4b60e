//! The closed set of operand kinds the engines dispatch over.

use tempus_instant::civil::CivilDate;
use tempus_instant::{Duration, Instant};
use tempus_offset::{CalendarOffset, Period};
use tempus_sequence::{DatetimeSequence, DurationSequence};

/// A value the comparison and arithmetic engines can dispatch over.
///
/// The set is closed: every pair of kinds has a defined outcome, either a
/// result or a specific error. `Missing` is the scalar not-a-time marker;
/// `Null` is a non-temporal null (the `None`/NaN analog), which the engines
/// treat differently from `Missing`.
#[derive(Debug, Clone, PartialEq)]
pub enum Operand {
    /// Scalar instant, naive or aware.
    Instant(Instant),
    /// Scalar elapsed span.
    Duration(Duration),
    /// Calendar shift rule.
    Offset(CalendarOffset),
    /// Calendar-frequency-tagged ordinal.
    Period(Period),
    /// Sequence of instants sharing one zone attribute.
    Instants(DatetimeSequence),
    /// Sequence of elapsed spans.
    Durations(DurationSequence),
    /// Array of calendar shift rules, applied one per element.
    Offsets(Vec<CalendarOffset>),
    /// Array of periods.
    Periods(Vec<Period>),
    /// Scalar integer, meaningful only against a sequence with a frequency.
    Int(i64),
    /// Array of integers.
    Ints(Vec<i64>),
    /// Scalar float. Never valid in temporal arithmetic.
    Float(f64),
    /// Raw naive epoch-nanosecond array with no zone attribute.
    DatetimeArray(Vec<i64>),
    /// Civil date without a time of day.
    Date(CivilDate),
    /// String, parsed opportunistically as an instant where one is needed.
    Str(String),
    /// The scalar not-a-time marker.
    Missing,
    /// A non-temporal null scalar.
    Null,
}

impl Operand {
    /// Human-readable kind name used in error messages.
    pub fn kind_name(&self) -> &'static str {
        match self {
            Operand::Instant(_) => "instant",
            Operand::Duration(_) => "duration",
            Operand::Offset(_) => "calendar offset",
            Operand::Period(_) => "period",
            Operand::Instants(_) => "datetime sequence",
            Operand::Durations(_) => "duration sequence",
            Operand::Offsets(_) => "offset array",
            Operand::Periods(_) => "period array",
            Operand::Int(_) => "integer",
            Operand::Ints(_) => "integer array",
            Operand::Float(_) => "float",
            Operand::DatetimeArray(_) => "datetime array",
            Operand::Date(_) => "civil date",
            Operand::Str(_) => "string",
            Operand::Missing => "missing value",
            Operand::Null => "null",
        }
    }

    /// Returns the element count for array-like kinds, `None` for scalars.
    pub fn len(&self) -> Option<usize> {
        match self {
            Operand::Instants(s) => Some(s.len()),
            Operand::Durations(s) => Some(s.len()),
            Operand::Offsets(v) => Some(v.len()),
            Operand::Periods(v) => Some(v.len()),
            Operand::Ints(v) => Some(v.len()),
            Operand::DatetimeArray(v) => Some(v.len()),
            _ => None,
        }
    }
}

impl From<Instant> for Operand {
    fn from(value: Instant) -> Self {
        Operand::Instant(value)
    }
}

impl From<Duration> for Operand {
    fn from(value: Duration) -> Self {
        Operand::Duration(value)
    }
}

impl From<CalendarOffset> for Operand {
    fn from(value: CalendarOffset) -> Self {
        Operand::Offset(value)
    }
}

impl From<DatetimeSequence> for Operand {
    fn from(value: DatetimeSequence) -> Self {
        Operand::Instants(value)
    }
}

impl From<DurationSequence> for Operand {
    fn from(value: DurationSequence) -> Self {
        Operand::Durations(value)
    }
}

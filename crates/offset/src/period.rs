//! Calendar-frequency-tagged ordinals.

/// The calendar unit a [`Period`] counts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PeriodUnit {
    /// Hours since the epoch hour.
    Hour,
    /// Days since the epoch day.
    Day,
    /// Weeks since the epoch week.
    Week,
    /// Months since January 1970.
    Month,
    /// Quarters since Q1 1970.
    Quarter,
    /// Years since 1970.
    Year,
}

/// A span of calendar time identified by an ordinal within a unit
/// (e.g. "March 2011" is month ordinal 494).
///
/// Periods order and compare by ordinal within the same unit; they never
/// participate in instant arithmetic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Period {
    ordinal: i64,
    unit: PeriodUnit,
}

impl Period {
    /// Creates a period from a unit and ordinal.
    pub fn new(unit: PeriodUnit, ordinal: i64) -> Self {
        Self { ordinal, unit }
    }

    /// Returns the ordinal.
    pub fn ordinal(self) -> i64 {
        self.ordinal
    }

    /// Returns the unit.
    pub fn unit(self) -> PeriodUnit {
        self.unit
    }
}

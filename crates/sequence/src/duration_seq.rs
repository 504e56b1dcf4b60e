//! Sequences of nanosecond durations.

use tempus_instant::Duration;

/// An immutable collection of signed nanosecond durations.
///
/// Missing elements use the same sentinel as missing instants, so a
/// subtraction between instant sequences can carry its gaps through.
#[derive(Debug, Clone, PartialEq)]
pub struct DurationSequence {
    values: Vec<i64>,
}

impl DurationSequence {
    /// Creates a sequence from raw nanosecond values.
    pub fn new(values: Vec<i64>) -> Self {
        Self { values }
    }

    /// Creates a sequence from scalar durations.
    pub fn from_durations(durations: &[Duration]) -> Self {
        Self::new(durations.iter().map(|d| d.nanos()).collect())
    }

    /// Returns the raw nanosecond values.
    pub fn values(&self) -> &[i64] {
        &self.values
    }

    /// Returns the number of elements.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Returns true if the sequence has no elements.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Returns the element at `index` as a scalar duration.
    pub fn get(&self, index: usize) -> Option<Duration> {
        self.values.get(index).map(|&ns| Duration::from_nanos(ns))
    }

    /// Iterates the elements as scalar durations.
    pub fn iter(&self) -> impl Iterator<Item = Duration> + '_ {
        self.values.iter().map(|&ns| Duration::from_nanos(ns))
    }
}

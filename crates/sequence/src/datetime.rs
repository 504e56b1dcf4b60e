//! Ordered sequences of instants sharing one timezone attribute.

use tempus_instant::{checked_shift_ns, Instant, TemporalError, Zone, NAT};
use tempus_offset::CalendarOffset;
use tracing::debug;

use crate::error::SequenceError;
use crate::infer::infer_tick;

/// An immutable, ordered collection of epoch-nanosecond instants sharing a
/// single timezone attribute, with an optional regular-spacing descriptor.
///
/// The sequence exclusively owns its backing array; every operation that
/// would change contents builds a new sequence. `freq`, when present, is
/// consistent with the spacing of `values` at construction time only —
/// arithmetic that breaks regular spacing clears it.
#[derive(Debug, Clone, PartialEq)]
pub struct DatetimeSequence {
    values: Vec<i64>,
    zone: Option<Zone>,
    freq: Option<CalendarOffset>,
}

impl DatetimeSequence {
    /// Creates a sequence from raw epoch-nanosecond values with no
    /// frequency descriptor.
    pub fn new(values: Vec<i64>, zone: Option<Zone>) -> Self {
        Self {
            values,
            zone,
            freq: None,
        }
    }

    /// Creates a sequence from scalar instants.
    ///
    /// # Errors
    ///
    /// Returns [`SequenceError::MixedZones`] unless every instant carries
    /// the same zone attribute as the first.
    pub fn from_instants(instants: &[Instant]) -> Result<Self, SequenceError> {
        let zone = instants.first().and_then(|t| t.zone().cloned());
        for (index, t) in instants.iter().enumerate() {
            if t.zone() != zone.as_ref() {
                return Err(SequenceError::MixedZones { index });
            }
        }
        Ok(Self::new(instants.iter().map(Instant::value).collect(), zone))
    }

    /// Attaches a frequency descriptor after validating it against the
    /// actual spacing.
    ///
    /// # Errors
    ///
    /// Returns [`SequenceError::FrequencyMismatch`] at the first element
    /// whose spacing disagrees with the descriptor.
    pub fn try_with_freq(mut self, freq: CalendarOffset) -> Result<Self, SequenceError> {
        match freq.as_tick() {
            Some(step) => {
                for (i, pair) in self.values.windows(2).enumerate() {
                    if pair[0] == NAT || pair[1] == NAT || pair[1].wrapping_sub(pair[0]) != step {
                        return Err(SequenceError::FrequencyMismatch { index: i + 1 });
                    }
                }
            }
            None => {
                for i in 1..self.values.len() {
                    let prev = self.instant_at(i - 1);
                    let expected = freq.apply(&prev)?;
                    if prev.is_missing() || expected.value() != self.values[i] {
                        return Err(SequenceError::FrequencyMismatch { index: i });
                    }
                }
            }
        }
        self.freq = Some(freq);
        Ok(self)
    }

    /// Re-derives the frequency descriptor from the observed spacing
    /// ("infer" mode). Clears it when no regular tick spacing exists.
    pub fn with_inferred_freq(mut self) -> Self {
        self.freq = infer_tick(&self.values);
        self
    }

    /// Replaces the frequency descriptor without validation. Callers must
    /// only use this for results whose spacing preserves `freq` by
    /// construction, such as shifting every element by the same duration.
    pub fn with_freq_unchecked(mut self, freq: Option<CalendarOffset>) -> Self {
        self.freq = freq;
        self
    }

    /// Generates a regular sequence of `periods` instants starting at
    /// `start`, stepping by `freq`.
    ///
    /// Tick frequencies stride arithmetically; anchored calendar rules
    /// first roll `start` forward to the anchor, then apply the rule
    /// repeatedly.
    ///
    /// # Errors
    ///
    /// Returns [`TemporalError::Overflow`] (wrapped) if any element leaves
    /// the representable nanosecond range.
    pub fn range(
        start: &Instant,
        periods: usize,
        freq: &CalendarOffset,
    ) -> Result<Self, SequenceError> {
        let mut values = Vec::with_capacity(periods);
        match freq.as_tick() {
            Some(step) => {
                for k in 0..periods {
                    let delta = step
                        .checked_mul(k as i64)
                        .ok_or(TemporalError::Overflow { op: "range stride" })?;
                    values.push(checked_shift_ns(start.value(), delta, "range stride")?);
                }
            }
            None => {
                debug!(periods, ?freq, "generating anchored range per element");
                if periods > 0 {
                    let mut cur = freq.rollforward(start)?;
                    values.push(cur.value());
                    for _ in 1..periods {
                        cur = freq.apply(&cur)?;
                        values.push(cur.value());
                    }
                }
            }
        }
        Ok(Self {
            values,
            zone: start.zone().cloned(),
            freq: Some(*freq),
        })
    }

    /// Returns the raw epoch-nanosecond values.
    pub fn values(&self) -> &[i64] {
        &self.values
    }

    /// Returns the shared zone attribute, if the sequence is tz-aware.
    pub fn zone(&self) -> Option<&Zone> {
        self.zone.as_ref()
    }

    /// Returns the regular-spacing descriptor, if one is attached.
    pub fn freq(&self) -> Option<&CalendarOffset> {
        self.freq.as_ref()
    }

    /// Returns true if the sequence carries a timezone.
    pub fn is_aware(&self) -> bool {
        self.zone.is_some()
    }

    /// Returns the number of elements.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Returns true if the sequence has no elements.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Returns the element at `index` as a scalar instant.
    pub fn get(&self, index: usize) -> Option<Instant> {
        self.values.get(index).map(|_| self.instant_at(index))
    }

    /// Iterates the elements as scalar instants.
    pub fn iter(&self) -> impl Iterator<Item = Instant> + '_ {
        (0..self.len()).map(|i| self.instant_at(i))
    }

    fn instant_at(&self, index: usize) -> Instant {
        match &self.zone {
            Some(zone) => Instant::from_nanos_tz(self.values[index], zone.clone()),
            None => Instant::from_nanos(self.values[index]),
        }
    }
}

//! Advisory diagnostics attached to successful evaluations.

use tracing::warn;

/// A non-fatal diagnostic about how a result was computed.
///
/// Advisories are values carried alongside the result, not errors; each one
/// is also mirrored to the `tracing` subscriber at `warn` level when it is
/// attached.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Advisory {
    /// A vectorized operation fell back to applying a calendar rule one
    /// element at a time.
    PerElementFallback,
    /// The result could not keep the input's frequency descriptor.
    FrequencyCleared,
    /// A civil date was coerced to midnight for comparison against
    /// instants. This coercion is slated for removal.
    DeprecatedDateComparison,
}

impl Advisory {
    fn message(self) -> &'static str {
        match self {
            Advisory::PerElementFallback => {
                "non-vectorized calendar rule applied per element"
            }
            Advisory::FrequencyCleared => "result does not keep the input frequency",
            Advisory::DeprecatedDateComparison => {
                "comparing instants against a civil date coerces it to midnight"
            }
        }
    }
}

/// A successful evaluation result plus any advisories raised on the way.
#[derive(Debug, Clone, PartialEq)]
pub struct Evaluated<T> {
    value: T,
    advisories: Vec<Advisory>,
}

impl<T> Evaluated<T> {
    /// Wraps a clean result.
    pub fn new(value: T) -> Self {
        Self {
            value,
            advisories: Vec::new(),
        }
    }

    /// Attaches an advisory, deduplicated, and mirrors it to `tracing`.
    pub fn advise(mut self, advisory: Advisory) -> Self {
        if !self.advisories.contains(&advisory) {
            warn!(?advisory, "{}", advisory.message());
            self.advisories.push(advisory);
        }
        self
    }

    /// Returns the result value.
    pub fn value(&self) -> &T {
        &self.value
    }

    /// Consumes the wrapper, returning the result value.
    pub fn into_value(self) -> T {
        self.value
    }

    /// Returns the advisories raised while computing the result.
    pub fn advisories(&self) -> &[Advisory] {
        &self.advisories
    }

    /// Maps the result value, keeping the advisories.
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Evaluated<U> {
        Evaluated {
            value: f(self.value),
            advisories: self.advisories,
        }
    }
}

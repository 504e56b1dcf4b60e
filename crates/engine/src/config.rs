//! Comparison policy configuration.

/// Policy knobs for the comparison engine.
///
/// Built in the builder style: start from `CmpConfig::new()` and chain
/// `with_*` setters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CmpConfig {
    reject_date_comparison: bool,
}

impl Default for CmpConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl CmpConfig {
    /// Default policy: civil-date comparisons are coerced with an advisory.
    pub fn new() -> Self {
        Self {
            reject_date_comparison: false,
        }
    }

    /// Makes comparisons between instants and civil dates fail instead of
    /// coercing the date to midnight.
    pub fn with_reject_date_comparison(mut self, reject: bool) -> Self {
        self.reject_date_comparison = reject;
        self
    }

    /// Returns the civil-date comparison policy.
    pub fn reject_date_comparison(&self) -> bool {
        self.reject_date_comparison
    }
}

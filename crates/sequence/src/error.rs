//! Error types for the tempus-sequence crate.

use tempus_instant::TemporalError;

/// Error type for all fallible operations in the tempus-sequence crate.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SequenceError {
    /// Returned when the instants given to a constructor do not share a
    /// single timezone attribute.
    #[error("instants do not share one timezone (first mismatch at index {index})")]
    MixedZones {
        /// Index of the first instant disagreeing with the first element.
        index: usize,
    },

    /// Returned when a declared frequency does not match the spacing of the
    /// values.
    #[error("declared frequency does not match spacing at index {index}")]
    FrequencyMismatch {
        /// Index of the first element breaking the declared spacing.
        index: usize,
    },

    /// Scalar temporal error.
    #[error(transparent)]
    Temporal(#[from] TemporalError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_mixed_zones() {
        let e = SequenceError::MixedZones { index: 2 };
        assert_eq!(
            e.to_string(),
            "instants do not share one timezone (first mismatch at index 2)"
        );
    }

    #[test]
    fn display_frequency_mismatch() {
        let e = SequenceError::FrequencyMismatch { index: 1 };
        assert_eq!(
            e.to_string(),
            "declared frequency does not match spacing at index 1"
        );
    }

    #[test]
    fn from_temporal() {
        let te = TemporalError::Overflow { op: "x" };
        let se: SequenceError = te.into();
        assert!(matches!(se, SequenceError::Temporal(_)));
    }

    #[test]
    fn error_is_send_and_sync() {
        fn assert_impl<T: Send + Sync>() {}
        assert_impl::<SequenceError>();
    }
}

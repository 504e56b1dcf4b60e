//! Error types for the tempus-engine crate.

use tempus_instant::TemporalError;

/// Error type for all fallible engine dispatch and evaluation.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum EngineError {
    /// Returned when two instant-like operands mix naive and aware values,
    /// or carry different resolved zones.
    #[error("timezone awareness mismatch (left zone {left:?}, right zone {right:?})")]
    TzAwareness {
        /// Canonical zone key of the left operand, `None` when naive.
        left: Option<String>,
        /// Canonical zone key of the right operand, `None` when naive.
        right: Option<String>,
    },

    /// Returned by scalar integer arithmetic on a sequence without a
    /// tick-sized frequency, and by integer-array arithmetic on a sequence
    /// with no frequency at all.
    #[error("integer arithmetic requires a sequence with a frequency")]
    NullFrequency,

    /// Returned when a result leaves the representable nanosecond range.
    #[error("nanosecond range exceeded in {op}")]
    Overflow {
        /// Operation that overflowed.
        op: &'static str,
    },

    /// Returned by elementwise operations on sequences of unequal length.
    #[error("length mismatch: left has {left} elements, right has {right}")]
    LengthMismatch {
        /// Left operand length.
        left: usize,
        /// Right operand length.
        right: usize,
    },

    /// Returned when an ordering operator meets a null scalar. Equality
    /// against the same scalar succeeds as all-false/all-true.
    #[error("invalid comparison: cannot order against a null value with {op}")]
    InvalidComparison {
        /// Operator name.
        op: &'static str,
    },

    /// Returned when two operand kinds have no defined result for the
    /// requested operation.
    #[error("cannot {op} {left} and {right}")]
    Incompatible {
        /// Operation name ("add", "subtract", "compare").
        op: &'static str,
        /// Left operand kind.
        left: &'static str,
        /// Right operand kind.
        right: &'static str,
    },
}

impl From<TemporalError> for EngineError {
    fn from(err: TemporalError) -> Self {
        match err {
            TemporalError::Overflow { op } => Self::Overflow { op },
            // Engines only reach scalar temporal arithmetic through values
            // that already parsed and validated, so the remaining variants
            // cannot occur here.
            _ => Self::Overflow {
                op: "temporal arithmetic",
            },
        }
    }
}

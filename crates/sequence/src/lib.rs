//! Ordered temporal sequences with frequency metadata.
//!
//! This crate layers collections on top of the scalar types from
//! `tempus-instant`: a [`DatetimeSequence`] of epoch-nanosecond instants
//! sharing one timezone attribute, and a [`DurationSequence`] of elapsed
//! spans. Both use the same missing-value sentinel as their scalar
//! counterparts.
//!
//! | Module | Contents |
//! |--------|----------|
//! | [`datetime`] | [`DatetimeSequence`] construction, range generation, frequency validation |
//! | [`duration_seq`] | [`DurationSequence`] |
//! | [`infer`] | tick-frequency inference from observed spacing |
//! | [`error`] | [`SequenceError`] |
//!
//! # Quick Start
//!
//! ```
//! use tempus_instant::Instant;
//! use tempus_offset::CalendarOffset;
//! use tempus_sequence::DatetimeSequence;
//!
//! # fn main() -> Result<(), tempus_sequence::SequenceError> {
//! let start = Instant::from_ymd(2000, 1, 15)?;
//! let idx = DatetimeSequence::range(&start, 3, &CalendarOffset::month_end(1))?;
//! assert_eq!(idx.len(), 3);
//! assert!(idx.freq().is_some());
//! # Ok(())
//! # }
//! ```

pub mod datetime;
pub mod duration_seq;
pub mod error;
pub mod infer;

pub use datetime::DatetimeSequence;
pub use duration_seq::DurationSequence;
pub use error::SequenceError;
pub use infer::infer_tick;

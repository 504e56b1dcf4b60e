//! # tempus-offset
//!
//! Calendar-relative offset rules for the tempus workspace: fixed-length
//! tick offsets, anchored calendar rules (month end, business day, ...),
//! and frequency-tagged period ordinals.
//!
//! Applying an offset is a pure function from instant to instant; it is not
//! reducible to a fixed duration in general (a month end lands on a
//! different day count depending on the input).
//!
//! ## Quick Start
//!
//! ```ignore
//! use tempus_instant::Instant;
//! use tempus_offset::CalendarOffset;
//!
//! let t = Instant::from_ymd(2000, 1, 15)?;
//! let eom = CalendarOffset::month_end(1).apply(&t)?; // 2000-01-31
//! assert_eq!(CalendarOffset::hours(2).as_tick(), Some(7_200_000_000_000));
//! ```
//!
//! ## Modules
//!
//! | Module | Description |
//! |--------|-------------|
//! | `offset` | The `CalendarOffset` value type and tick classification |
//! | `apply` | Rule application and anchor rolling |
//! | `period` | Calendar-frequency-tagged ordinals |

mod apply;
mod offset;
mod period;

pub use offset::{CalendarOffset, OffsetKind};
pub use period::{Period, PeriodUnit};

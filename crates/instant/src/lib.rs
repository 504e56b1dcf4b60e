//! # tempus-instant
//!
//! Scalar temporal value types for the tempus workspace: nanosecond-resolution
//! instants and durations, the shared missing-value sentinel, proleptic
//! Gregorian civil date math, and the seams to the external timezone and
//! parsing collaborators.
//!
//! ## Quick Start
//!
//! ```ignore
//! use tempus_instant::{Duration, Instant, Zone};
//!
//! let t = Instant::from_ymd_hms(2000, 1, 1, 9, 0, 0)?;
//! let aware = t.localize(Zone::fixed("+09:00", 9 * tempus_instant::civil::NANOS_PER_HOUR))?;
//! let later = aware.checked_add(Duration::from_hours(2)?)?;
//! ```
//!
//! ## Modules
//!
//! | Module | Description |
//! |--------|-------------|
//! | `civil` | Proleptic Gregorian date math over epoch day counts |
//! | `instant` | Scalar points in time, optionally timezone-tagged |
//! | `duration` | Fixed-length sign-aware time spans |
//! | `zone` | Opaque zone handles and the resolver collaborator seam |
//! | `parse` | Opportunistic string parsing collaborator |
//! | `error` | Error types |

pub mod civil;
mod duration;
mod error;
mod instant;
mod parse;
mod zone;

pub use civil::{CivilDate, Weekday};
pub use duration::Duration;
pub use error::TemporalError;
pub use instant::{checked_shift_ns, Instant, MAX_NS, MIN_NS, NAT};
pub use parse::{parse_duration, parse_instant};
pub use zone::{FixedOffsetResolver, Zone, ZoneResolver, ZoneRules};

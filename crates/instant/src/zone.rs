//! Timezone seam: opaque zone handles backed by an external rule resolver.

use std::fmt;
use std::sync::Arc;

use crate::civil::{NANOS_PER_HOUR, NANOS_PER_MIN};
use crate::error::TemporalError;

/// Resolved timezone rules.
///
/// Implementations answer "what is the UTC offset at instant X". The tempus
/// workspace treats rule sets as an opaque external service; the only
/// built-in implementation is the fixed-offset one used by
/// [`FixedOffsetResolver`].
pub trait ZoneRules: fmt::Debug + Send + Sync {
    /// Canonical key identifying this rule set. Two zones with the same key
    /// are the same zone regardless of the id strings they were resolved
    /// from.
    fn key(&self) -> &str;

    /// UTC offset, in nanoseconds, in effect at the given UTC instant.
    fn utc_offset(&self, utc_ns: i64) -> i64;
}

/// An opaque handle to a resolved timezone.
///
/// Equality is by the resolver-assigned canonical key, not by the id string
/// the zone was looked up under.
#[derive(Debug, Clone)]
pub struct Zone {
    rules: Arc<dyn ZoneRules>,
}

impl Zone {
    /// Wraps an externally-resolved rule set.
    pub fn new(rules: Arc<dyn ZoneRules>) -> Self {
        Self { rules }
    }

    /// Returns the UTC zone.
    pub fn utc() -> Self {
        Self::fixed("UTC", 0)
    }

    /// Returns a fixed-offset zone with the given canonical key.
    pub fn fixed(key: &str, offset_ns: i64) -> Self {
        Self {
            rules: Arc::new(FixedOffsetRules {
                key: key.to_string(),
                offset_ns,
            }),
        }
    }

    /// Returns the canonical key of the resolved rule set.
    pub fn key(&self) -> &str {
        self.rules.key()
    }

    /// Returns the UTC offset in effect at the given UTC instant.
    pub fn utc_offset(&self, utc_ns: i64) -> i64 {
        self.rules.utc_offset(utc_ns)
    }
}

impl PartialEq for Zone {
    fn eq(&self, other: &Self) -> bool {
        self.key() == other.key()
    }
}

impl Eq for Zone {}

#[derive(Debug)]
struct FixedOffsetRules {
    key: String,
    offset_ns: i64,
}

impl ZoneRules for FixedOffsetRules {
    fn key(&self) -> &str {
        &self.key
    }

    fn utc_offset(&self, _utc_ns: i64) -> i64 {
        self.offset_ns
    }
}

/// External collaborator resolving zone ids to rule sets.
pub trait ZoneResolver {
    /// Resolves a zone id string.
    ///
    /// # Errors
    ///
    /// Returns [`TemporalError::UnknownZone`] if the id is not known.
    fn resolve(&self, id: &str) -> Result<Zone, TemporalError>;
}

/// Resolver for fixed-offset zone ids: `"UTC"`, `"+HH:MM"`, `"-HH:MM"`.
///
/// Stands in for a real tzdb-backed resolver in tests and examples; the
/// engines only see [`Zone`] handles and do not care which resolver
/// produced them.
#[derive(Debug, Clone, Copy, Default)]
pub struct FixedOffsetResolver;

impl ZoneResolver for FixedOffsetResolver {
    fn resolve(&self, id: &str) -> Result<Zone, TemporalError> {
        if id == "UTC" {
            return Ok(Zone::utc());
        }
        let bytes = id.as_bytes();
        if bytes.len() == 6 && (bytes[0] == b'+' || bytes[0] == b'-') && bytes[3] == b':' {
            let hours: i64 = id[1..3].parse().map_err(|_| unknown(id))?;
            let minutes: i64 = id[4..6].parse().map_err(|_| unknown(id))?;
            if hours > 23 || minutes > 59 {
                return Err(unknown(id));
            }
            let mut offset = hours * NANOS_PER_HOUR + minutes * NANOS_PER_MIN;
            if bytes[0] == b'-' {
                offset = -offset;
            }
            return Ok(Zone::fixed(id, offset));
        }
        Err(unknown(id))
    }
}

fn unknown(id: &str) -> TemporalError {
    TemporalError::UnknownZone { id: id.to_string() }
}

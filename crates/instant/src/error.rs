//! Error types for the tempus-instant crate.

/// Error type for all fallible operations in the tempus-instant crate.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum TemporalError {
    /// Returned when nanosecond arithmetic leaves the representable range.
    #[error("nanosecond overflow in {op}")]
    Overflow {
        /// The operation that overflowed.
        op: &'static str,
    },

    /// Returned when a civil date does not exist in the proleptic
    /// Gregorian calendar.
    #[error("invalid date: {year:04}-{month:02}-{day:02}")]
    InvalidDate {
        /// Year component.
        year: i64,
        /// Month component (1..=12 when valid).
        month: u8,
        /// Day component.
        day: u8,
    },

    /// Returned when a time-of-day component is out of range.
    #[error("invalid time: {hour:02}:{minute:02}:{second:02}")]
    InvalidTime {
        /// Hour component (0..=23 when valid).
        hour: u8,
        /// Minute component (0..=59 when valid).
        minute: u8,
        /// Second component (0..=59 when valid).
        second: u8,
    },

    /// Returned when a string cannot be parsed as an instant or duration.
    #[error("cannot parse {input:?}: {reason}")]
    Parse {
        /// The offending input.
        input: String,
        /// Why parsing failed.
        reason: &'static str,
    },

    /// Returned when a zone id is not known to the resolver.
    #[error("unknown zone id: {id:?}")]
    UnknownZone {
        /// The unresolved zone id.
        id: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_overflow() {
        let e = TemporalError::Overflow { op: "instant + duration" };
        assert_eq!(e.to_string(), "nanosecond overflow in instant + duration");
    }

    #[test]
    fn display_invalid_date() {
        let e = TemporalError::InvalidDate {
            year: 2001,
            month: 2,
            day: 29,
        };
        assert_eq!(e.to_string(), "invalid date: 2001-02-29");
    }

    #[test]
    fn display_invalid_time() {
        let e = TemporalError::InvalidTime {
            hour: 24,
            minute: 0,
            second: 0,
        };
        assert_eq!(e.to_string(), "invalid time: 24:00:00");
    }

    #[test]
    fn display_parse() {
        let e = TemporalError::Parse {
            input: "foo".to_string(),
            reason: "expected a date",
        };
        assert_eq!(e.to_string(), "cannot parse \"foo\": expected a date");
    }

    #[test]
    fn display_unknown_zone() {
        let e = TemporalError::UnknownZone {
            id: "Mars/Olympus".to_string(),
        };
        assert_eq!(e.to_string(), "unknown zone id: \"Mars/Olympus\"");
    }

    #[test]
    fn error_is_std_error() {
        fn assert_impl<T: std::error::Error>() {}
        assert_impl::<TemporalError>();
    }

    #[test]
    fn error_is_send_and_sync() {
        fn assert_impl<T: Send + Sync>() {}
        assert_impl::<TemporalError>();
    }
}

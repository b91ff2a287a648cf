//! Date, time and duration display utilities.

use std::fmt;

use jiff::{tz::TimeZone, Timestamp};

/// A wrapper around `Timestamp` that formats it in the system timezone.
///
/// The display format follows the pattern `YYYY-MM-DD HH:MM:SS TZ`.
pub struct LocalDateTime<'a>(pub &'a Timestamp);

impl fmt::Display for LocalDateTime<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}",
            self.0
                .to_zoned(TimeZone::system())
                .strftime("%Y-%m-%d %H:%M:%S %Z")
        )
    }
}

/// Focused time as `H:MM`, or `M:SS` below one hour when `precise`.
pub struct Hours {
    secs: u64,
    precise: bool,
}

impl Hours {
    pub fn new(secs: u64) -> Self {
        Self {
            secs,
            precise: false,
        }
    }

    /// Shows seconds for durations under an hour.
    pub fn precise(secs: u64) -> Self {
        Self {
            secs,
            precise: true,
        }
    }
}

impl fmt::Display for Hours {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let hours = self.secs / 3600;
        let minutes = (self.secs % 3600) / 60;
        if self.precise && hours == 0 {
            write!(f, "{minutes}:{:02}", self.secs % 60)
        } else {
            write!(f, "{hours}:{minutes:02}")
        }
    }
}

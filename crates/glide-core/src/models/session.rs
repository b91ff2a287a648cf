//! Pomodoro session document.

use jiff::{SignedDuration, Timestamp};
use serde::{Deserialize, Serialize};

use crate::error::{GlideError, Result};

/// One pomodoro focus interval, open or finalized.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Session {
    /// Opaque identifier assigned by the store
    #[serde(default)]
    pub id: String,

    /// Weak reference to the goal worked on, if any
    #[serde(default)]
    pub goal_id: Option<String>,

    /// When the focus interval began
    pub start_time: Timestamp,

    /// When it ended; absent while the session is open
    #[serde(default)]
    pub end_time: Option<Timestamp>,

    /// Focused time in whole seconds
    #[serde(default)]
    pub duration_secs: u64,

    /// Whether the interval ran to a regular stop
    #[serde(default)]
    pub completed: bool,

    /// Duration the user asked for when starting
    #[serde(default)]
    pub planned_duration_secs: Option<u64>,

    /// Set when the session was finalized from a stale state slot
    #[serde(default)]
    pub recovered: bool,
}

impl Session {
    /// Builds a finalized, completed session spanning `start..end`.
    pub fn finalized(
        goal_id: Option<String>,
        start: Timestamp,
        end: Timestamp,
        planned_duration_secs: Option<u64>,
    ) -> Result<Self> {
        let session = Self {
            id: String::new(),
            goal_id,
            start_time: start,
            end_time: Some(end),
            duration_secs: end.duration_since(start).as_secs().max(0).unsigned_abs(),
            completed: true,
            planned_duration_secs,
            recovered: false,
        };
        session.validate()?;
        Ok(session)
    }

    /// Focused time as a signed duration.
    pub fn duration(&self) -> SignedDuration {
        SignedDuration::from_secs(i64::try_from(self.duration_secs).unwrap_or(i64::MAX))
    }

    /// True while the session has no end time.
    pub fn is_open(&self) -> bool {
        self.end_time.is_none()
    }

    /// Checks `end_time >= start_time`.
    pub fn validate(&self) -> Result<()> {
        if let Some(end) = self.end_time {
            if end < self.start_time {
                return Err(GlideError::invalid_input("end_time").with_reason(format!(
                    "end time {end} is before start time {}",
                    self.start_time
                )));
            }
        }
        Ok(())
    }
}

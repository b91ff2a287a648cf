//! Pomodoro lifecycle state.
//!
//! [`StateRecord`] is the on-disk shape of `session.json`; [`SessionState`]
//! is the validated in-memory form the lifecycle works with.

use jiff::{SignedDuration, Timestamp};
use serde::{Deserialize, Serialize};

/// Discriminant stored in the slot file.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum StateKind {
    #[default]
    Idle,
    Running,
}

/// Raw contents of the state slot file.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct StateRecord {
    pub state: StateKind,
    #[serde(default)]
    pub goal_id: Option<String>,
    #[serde(default)]
    pub started_at: Option<Timestamp>,
    /// Planned length in seconds
    #[serde(default)]
    pub planned_duration: Option<u64>,
}

/// A focus interval in progress.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct RunningSession {
    pub goal_id: Option<String>,
    pub started_at: Timestamp,
    pub planned_duration_secs: u64,
}

impl RunningSession {
    /// Time spent so far, never negative.
    pub fn elapsed(&self, now: Timestamp) -> SignedDuration {
        now.duration_since(self.started_at).max(SignedDuration::ZERO)
    }

    /// Time left of the planned duration, never negative.
    pub fn remaining(&self, now: Timestamp) -> SignedDuration {
        let planned = SignedDuration::from_secs(secs_i64(self.planned_duration_secs));
        (planned - self.elapsed(now)).max(SignedDuration::ZERO)
    }

    /// A running slot older than `max_session` was left behind by a process
    /// that never stopped it.
    pub fn is_stale(&self, now: Timestamp, max_session: SignedDuration) -> bool {
        self.elapsed(now) > max_session
    }
}

/// Lifecycle state: idle, or running exactly one session.
#[derive(Debug, Clone, Serialize, PartialEq, Default)]
#[serde(tag = "state", rename_all = "lowercase")]
pub enum SessionState {
    #[default]
    Idle,
    Running(RunningSession),
}

impl TryFrom<StateRecord> for SessionState {
    type Error = String;

    fn try_from(record: StateRecord) -> Result<Self, Self::Error> {
        match record.state {
            StateKind::Idle => Ok(SessionState::Idle),
            StateKind::Running => {
                let started_at = record
                    .started_at
                    .ok_or_else(|| "running state without started_at".to_string())?;
                let planned_duration_secs = record
                    .planned_duration
                    .ok_or_else(|| "running state without planned_duration".to_string())?;
                Ok(SessionState::Running(RunningSession {
                    goal_id: record.goal_id,
                    started_at,
                    planned_duration_secs,
                }))
            }
        }
    }
}

impl From<&SessionState> for StateRecord {
    fn from(state: &SessionState) -> Self {
        match state {
            SessionState::Idle => StateRecord::default(),
            SessionState::Running(running) => StateRecord {
                state: StateKind::Running,
                goal_id: running.goal_id.clone(),
                started_at: Some(running.started_at),
                planned_duration: Some(running.planned_duration_secs),
            },
        }
    }
}

fn secs_i64(secs: u64) -> i64 {
    i64::try_from(secs).unwrap_or(i64::MAX)
}

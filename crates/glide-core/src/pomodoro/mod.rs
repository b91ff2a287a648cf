//! Pomodoro lifecycle persisted across processes.
//!
//! `start` and `stop` run in different processes, so the only evidence of a
//! running session is the state slot on disk. Every operation first
//! reconciles the slot: a running session older than the configured maximum
//! is finalized as a recovered [`Session`] and the slot is reset.
//!
//! Lock order is always slot, then store.

use jiff::{SignedDuration, Timestamp};
use log::{info, warn};
use serde::Serialize;

use crate::{
    config::Config,
    error::{GlideError, Result},
    models::{Goal, RunningSession, Session, SessionState},
    paths::GlidePaths,
    store::{LockGuard, Store},
};

pub mod slot;

pub use slot::StateSlot;

/// Shortest accepted pomodoro.
const MIN_DURATION: SignedDuration = SignedDuration::from_secs(60);

/// Result of a successful `start`.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct Started {
    pub session: RunningSession,
    /// Stale session finalized before starting, if there was one
    pub recovered: Option<Session>,
}

/// What `status` reports.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(tag = "state", rename_all = "lowercase")]
pub enum PomodoroStatus {
    Idle,
    Running {
        session: RunningSession,
        elapsed_secs: i64,
        remaining_secs: i64,
    },
}

/// Lifecycle tracker over a state slot and a store.
#[derive(Debug, Clone)]
pub struct Pomodoro {
    slot: StateSlot,
    store: Store,
    default_duration: SignedDuration,
    max_session: SignedDuration,
}

impl Pomodoro {
    pub fn new(paths: &GlidePaths, store: Store, config: &Config) -> Self {
        Self {
            slot: StateSlot::new(paths.session_file(), config.lock_policy()),
            store,
            default_duration: config.default_pomodoro(),
            max_session: config.max_session(),
        }
    }

    pub fn start(&self, goal_id: Option<&str>, duration: Option<SignedDuration>) -> Result<Started> {
        self.start_at(goal_id, duration, Timestamp::now())
    }

    pub fn stop(&self) -> Result<Session> {
        self.stop_at(Timestamp::now())
    }

    pub fn status(&self) -> Result<PomodoroStatus> {
        self.status_at(Timestamp::now())
    }

    /// Starts a session at `now`. Fails with
    /// [`GlideError::AlreadyRunning`] while another session runs.
    pub fn start_at(
        &self,
        goal_id: Option<&str>,
        duration: Option<SignedDuration>,
        now: Timestamp,
    ) -> Result<Started> {
        let planned = duration.unwrap_or(self.default_duration);
        self.validate_duration(planned)?;

        let guard = self.slot.lock()?;
        let (state, recovered) = self.reconcile(&guard, now)?;
        if let SessionState::Running(running) = state {
            return Err(GlideError::AlreadyRunning {
                started_at: running.started_at,
            });
        }

        if let Some(goal_id) = goal_id {
            let goal: Goal = self.store.get(goal_id)?;
            if goal.archived {
                return Err(GlideError::AlreadyArchived { id: goal.id });
            }
        }

        let session = RunningSession {
            goal_id: goal_id.map(String::from),
            started_at: now,
            planned_duration_secs: planned.as_secs().unsigned_abs(),
        };
        self.slot
            .save(&guard, &SessionState::Running(session.clone()))?;
        info!(
            "Started {}min session{}",
            planned.as_mins(),
            goal_id.map(|g| format!(" for goal {g}")).unwrap_or_default()
        );

        Ok(Started { session, recovered })
    }

    /// Stops the running session at `now` and records it.
    ///
    /// A stale slot is finalized by reconciliation and that recovered
    /// session is returned.
    pub fn stop_at(&self, now: Timestamp) -> Result<Session> {
        let guard = self.slot.lock()?;
        let (state, recovered) = self.reconcile(&guard, now)?;
        if let Some(session) = recovered {
            return Ok(session);
        }

        let SessionState::Running(running) = state else {
            return Err(GlideError::NoActiveSession);
        };

        let end = now.max(running.started_at);
        let session = Session::finalized(
            running.goal_id,
            running.started_at,
            end,
            Some(running.planned_duration_secs),
        )?;
        let (stored, _) = self.store.record_session_once(session)?;
        self.slot.save(&guard, &SessionState::Idle)?;
        info!("Stopped session after {}s", stored.duration_secs);

        Ok(stored)
    }

    /// Reports the current state. Only a stale slot is modified.
    pub fn status_at(&self, now: Timestamp) -> Result<PomodoroStatus> {
        let guard = self.slot.lock()?;
        let (state, _) = self.reconcile(&guard, now)?;
        Ok(match state {
            SessionState::Idle => PomodoroStatus::Idle,
            SessionState::Running(session) => PomodoroStatus::Running {
                elapsed_secs: session.elapsed(now).as_secs(),
                remaining_secs: session.remaining(now).as_secs(),
                session,
            },
        })
    }

    fn validate_duration(&self, planned: SignedDuration) -> Result<()> {
        if planned < MIN_DURATION {
            return Err(GlideError::invalid_input("duration")
                .with_reason("Duration must be at least 1 minute"));
        }
        if planned > self.max_session {
            return Err(GlideError::invalid_input("duration").with_reason(format!(
                "Duration must not exceed {} minutes",
                self.max_session.as_mins()
            )));
        }
        Ok(())
    }

    /// Finalizes a stale running slot. Returns the state to proceed from
    /// and the recovered session, if any.
    fn reconcile(
        &self,
        guard: &LockGuard,
        now: Timestamp,
    ) -> Result<(SessionState, Option<Session>)> {
        let state = self.slot.load(guard)?;
        let SessionState::Running(running) = &state else {
            return Ok((state, None));
        };
        if !running.is_stale(now, self.max_session) {
            return Ok((state, None));
        }

        let mut session = Session::finalized(
            running.goal_id.clone(),
            running.started_at,
            now,
            Some(running.planned_duration_secs),
        )?;
        session.recovered = true;

        let (stored, inserted) = self.store.record_session_once(session)?;
        if inserted {
            warn!(
                "Auto-finalized stale session started at {} ({}s)",
                stored.start_time, stored.duration_secs
            );
        } else {
            warn!(
                "Cleared stale slot for session {} that was already recorded",
                stored.id
            );
        }
        self.slot.save(guard, &SessionState::Idle)?;

        Ok((SessionState::Idle, Some(stored)))
    }
}

//! Pomodoro operations for Glide.

use jiff::SignedDuration;

use super::Glide;
use crate::{
    error::Result,
    models::{Session, SessionFilter},
    params::StartPomodoro,
    pomodoro::{PomodoroStatus, Started},
};

impl Glide {
    /// Starts a pomodoro, optionally for a goal.
    pub async fn start_pomodoro(&self, params: &StartPomodoro) -> Result<Started> {
        let goal_id = params.goal_id.clone();
        let duration = params
            .duration_minutes
            .map(|m| SignedDuration::from_mins(i64::from(m)));
        self.with_pomodoro(move |pomodoro| pomodoro.start(goal_id.as_deref(), duration))
            .await
    }

    /// Stops the running pomodoro and returns the recorded session.
    pub async fn stop_pomodoro(&self) -> Result<Session> {
        self.with_pomodoro(|pomodoro| pomodoro.stop()).await
    }

    pub async fn pomodoro_status(&self) -> Result<PomodoroStatus> {
        self.with_pomodoro(|pomodoro| pomodoro.status()).await
    }

    /// Recorded sessions, oldest first.
    pub async fn list_sessions(&self, filter: SessionFilter) -> Result<Vec<Session>> {
        self.with_store(move |store| store.list_sessions(&filter))
            .await
    }
}

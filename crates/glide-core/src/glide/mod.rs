//! High-level async API for goals, pomodoros, thoughts and statistics.
//!
//! [`Glide`] is the entry point for interfaces. Store and lifecycle work is
//! blocking file I/O under inter-process locks, so every operation runs on
//! tokio's blocking pool:
//!
//! ```text
//! ┌─────────────────┐    ┌─────────────────┐    ┌─────────────────┐
//! │   Glide (async) │───▶│ spawn_blocking  │───▶│ Store/Pomodoro  │
//! │  goal/session/  │    │                 │    │  db.json,       │
//! │  thought/stats  │    │                 │    │  session.json   │
//! └─────────────────┘    └─────────────────┘    └─────────────────┘
//! ```
//!
//! # Examples
//!
//! ```rust,no_run
//! use glide_core::{params::AddGoal, GlideBuilder, models::Priority};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let glide = GlideBuilder::new()
//!     .with_base_dir(Some("/tmp/goal-glide"))
//!     .build()
//!     .await?;
//!
//! let goal = glide
//!     .add_goal(&AddGoal {
//!         title: "Write a novel".to_string(),
//!         priority: Priority::High,
//!         ..Default::default()
//!     })
//!     .await?;
//! glide.start_pomodoro(&glide_core::params::StartPomodoro {
//!     goal_id: Some(goal.id.clone()),
//!     duration_minutes: Some(25),
//! }).await?;
//! # Ok(())
//! # }
//! ```

use tokio::task;

use crate::{
    config::Config,
    error::{GlideError, Result},
    paths::GlidePaths,
    pomodoro::Pomodoro,
    store::Store,
};

pub mod builder;
pub mod goal_ops;
pub mod session_ops;
pub mod stats_ops;
pub mod thought_ops;

#[cfg(test)]
mod tests;

pub use builder::GlideBuilder;
pub use stats_ops::StatsSummary;

/// Main interface over one data directory.
#[derive(Debug, Clone)]
pub struct Glide {
    paths: GlidePaths,
    config: Config,
    store: Store,
}

impl Glide {
    pub(crate) fn new(paths: GlidePaths, config: Config, store: Store) -> Self {
        Self {
            paths,
            config,
            store,
        }
    }

    pub fn paths(&self) -> &GlidePaths {
        &self.paths
    }

    /// Effective configuration.
    pub fn config(&self) -> &Config {
        &self.config
    }

    fn pomodoro(&self) -> Pomodoro {
        Pomodoro::new(&self.paths, self.store.clone(), &self.config)
    }

    /// Runs blocking store work on the blocking pool.
    async fn with_store<T, F>(&self, f: F) -> Result<T>
    where
        T: Send + 'static,
        F: FnOnce(Store) -> Result<T> + Send + 'static,
    {
        let store = self.store.clone();
        task::spawn_blocking(move || f(store))
            .await
            .map_err(|e| GlideError::Configuration {
                message: format!("Task join error: {e}"),
            })?
    }

    /// Runs blocking lifecycle work on the blocking pool.
    async fn with_pomodoro<T, F>(&self, f: F) -> Result<T>
    where
        T: Send + 'static,
        F: FnOnce(Pomodoro) -> Result<T> + Send + 'static,
    {
        let pomodoro = self.pomodoro();
        task::spawn_blocking(move || f(pomodoro))
            .await
            .map_err(|e| GlideError::Configuration {
                message: format!("Task join error: {e}"),
            })?
    }
}

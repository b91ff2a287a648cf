//! Core library for Goal Glide, a goal and pomodoro tracker.
//!
//! Goals, sessions and thoughts live in a single JSON document on local disk.
//! Short-lived processes share it through an inter-process lock, and the
//! running pomodoro is persisted in a separate state slot so that `start` and
//! `stop` can happen in different invocations.
//!
//! - [`store`]: record store with locking and atomic writes
//! - [`pomodoro`]: session lifecycle and crash recovery
//! - [`stats`] and [`report`]: aggregation over recorded sessions
//! - [`glide`]: async facade used by interfaces
//! - [`display`]: markdown formatting for the CLI
//!
//! # Quick Start
//!
//! ```rust
//! use glide_core::{models::Priority, params::AddGoal, GlideBuilder};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let dir = tempfile::tempdir()?;
//! let glide = GlideBuilder::new()
//!     .with_base_dir(Some(dir.path()))
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
//! println!("{goal}");
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod display;
pub mod error;
pub mod glide;
pub mod models;
pub mod params;
pub mod paths;
pub mod pomodoro;
pub mod report;
pub mod stats;
pub mod store;

// Re-export commonly used types
pub use config::Config;
pub use error::{GlideError, Result};
pub use glide::{Glide, GlideBuilder, StatsSummary};
pub use models::{Goal, Priority, Session, SessionState, Thought};
pub use paths::GlidePaths;
pub use report::Report;
pub use store::Store;

//! Data models for goals, pomodoro sessions and thoughts.
//!
//! These are the documents persisted in the record store plus the transient
//! lifecycle state kept in the session slot. Markdown formatting for them
//! lives in [`crate::display`].
//!
//! # Examples
//!
//! ```rust
//! use glide_core::models::{Goal, Priority};
//! use jiff::Timestamp;
//!
//! let goal = Goal::new("Write a novel", Priority::High, None, vec![], Timestamp::now());
//! assert!(goal.validate().is_ok());
//! assert!(!goal.archived);
//! ```

pub mod filters;
pub mod goal;
pub mod priority;
pub mod session;
pub mod state;
pub mod thought;


pub use filters::{
    ArchiveFilter, DueWithin, Everything, Filter, GoalFilter, SessionFilter, ThoughtFilter,
};
pub use goal::{normalize_tag, normalize_tags, validate_title, Goal};
pub use priority::Priority;
pub use session::Session;
pub use state::{RunningSession, SessionState, StateKind, StateRecord};
pub use thought::{Thought, MAX_THOUGHT_CHARS};

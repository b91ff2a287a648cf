//! Display formatting for domain models and operation results.
//!
//! Domain models implement [`std::fmt::Display`] directly (see [`models`]);
//! collections and operation outcomes go through newtype wrappers so the same
//! data can be shown differently depending on context.
//!
//! ```text
//! ┌─────────────────┐    ┌─────────────────┐    ┌─────────────────┐
//! │  Domain Models  │    │ Wrappers &      │    │    Markdown     │
//! │ (Goal, Session) │───▶│ Result Types    │───▶│    Output       │
//! └─────────────────┘    └─────────────────┘    └─────────────────┘
//! ```
//!
//! ```rust
//! use glide_core::{
//!     display::UpdateResult,
//!     models::{Goal, Priority},
//! };
//! use jiff::Timestamp;
//!
//! let goal = Goal::new("Learn Rust", Priority::High, None, vec![], Timestamp::now());
//! let result = UpdateResult::with_changes(goal, vec!["Archived".to_string()]);
//! assert!(result.to_string().contains("Changes made:"));
//! ```

pub mod collections;
pub mod datetime;
pub mod models;
pub mod results;

pub use collections::{Goals, TagCounts, Thoughts};
pub use datetime::{Hours, LocalDateTime};
pub use results::{CreateResult, DeleteResult, UpdateResult};

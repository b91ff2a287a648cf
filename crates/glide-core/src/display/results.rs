//! Result wrapper types for displaying operation outcomes.

use std::fmt;

use super::datetime::Hours;
use crate::models::{Goal, Session, Thought};

/// Wrapper type for displaying the result of create operations.
///
/// # Examples
///
/// ```rust
/// use glide_core::{
///     display::CreateResult,
///     models::{Goal, Priority},
/// };
/// use jiff::Timestamp;
///
/// let mut goal = Goal::new("Learn Rust", Priority::High, None, vec![], Timestamp::now());
/// goal.id = "42".to_string();
///
/// let output = CreateResult::new(goal).to_string();
/// assert!(output.starts_with("Created goal with ID: 42"));
/// ```
pub struct CreateResult<T> {
    pub resource: T,
}

impl<T> CreateResult<T> {
    pub fn new(resource: T) -> Self {
        Self { resource }
    }
}

impl fmt::Display for CreateResult<Goal> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Created goal with ID: {}", self.resource.id)?;
        writeln!(f)?;
        write!(f, "{}", self.resource)
    }
}

impl fmt::Display for CreateResult<Thought> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Recorded thought with ID: {}", self.resource.id)
    }
}

impl fmt::Display for CreateResult<Session> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Recorded session of {}",
            Hours::precise(self.resource.duration_secs)
        )?;
        if self.resource.recovered {
            write!(f, " (recovered)")?;
        }
        writeln!(f)?;
        writeln!(f)?;
        write!(f, "{}", self.resource)
    }
}

/// Wrapper type for displaying the result of update operations, with an
/// optional list of what changed.
pub struct UpdateResult<T> {
    pub resource: T,
    pub changes: Vec<String>,
}

impl<T> UpdateResult<T> {
    pub fn new(resource: T) -> Self {
        Self {
            resource,
            changes: Vec::new(),
        }
    }

    pub fn with_changes(resource: T, changes: Vec<String>) -> Self {
        Self { resource, changes }
    }
}

impl fmt::Display for UpdateResult<Goal> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Updated goal with ID: {}", self.resource.id)?;

        if !self.changes.is_empty() {
            writeln!(f)?;
            writeln!(f, "Changes made:")?;
            for change in &self.changes {
                writeln!(f, "- {change}")?;
            }
        }

        writeln!(f)?;
        write!(f, "{}", self.resource)
    }
}

/// Wrapper type for displaying the result of delete operations.
pub struct DeleteResult<T> {
    pub resource: T,
}

impl<T> DeleteResult<T> {
    pub fn new(resource: T) -> Self {
        Self { resource }
    }
}

impl fmt::Display for DeleteResult<Goal> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Deleted goal '{}' (ID: {})",
            self.resource.title, self.resource.id
        )
    }
}

impl fmt::Display for DeleteResult<Thought> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Deleted thought (ID: {})", self.resource.id)
    }
}

#[cfg(test)]
mod tests {
    use jiff::Timestamp;

    use super::*;
    use crate::models::Priority;

    fn goal() -> Goal {
        let mut goal = Goal::new("Run 5k", Priority::Medium, None, vec![], Timestamp::now());
        goal.id = "g1".to_string();
        goal
    }

    #[test]
    fn test_update_result_lists_changes() {
        let result = UpdateResult::with_changes(goal(), vec!["Archived".to_string()]);
        let output = result.to_string();
        assert!(output.starts_with("Updated goal with ID: g1"));
        assert!(output.contains("Changes made:\n- Archived"));

        let plain = UpdateResult::new(goal()).to_string();
        assert!(!plain.contains("Changes made:"));
    }

    #[test]
    fn test_delete_result() {
        assert_eq!(
            DeleteResult::new(goal()).to_string(),
            "Deleted goal 'Run 5k' (ID: g1)\n"
        );
    }
}

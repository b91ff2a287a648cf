//! Collection wrapper types for displaying groups of domain objects.
//!
//! Each wrapper handles the empty case with a fixed message and otherwise
//! formats its items with their own `Display` implementation.

use std::{fmt, ops::Index};

use crate::models::{Goal, Thought};

/// Newtype wrapper for displaying a list of goals.
///
/// # Examples
///
/// ```rust
/// use glide_core::{
///     display::Goals,
///     models::{Goal, Priority},
/// };
/// use jiff::Timestamp;
///
/// let goal = Goal::new("Learn Rust", Priority::High, None, vec![], Timestamp::now());
/// let output = format!("{}", Goals(vec![goal]));
/// assert!(output.contains("Learn Rust"));
///
/// assert_eq!(format!("{}", Goals(vec![])), "No goals found.\n");
/// ```
pub struct Goals(pub Vec<Goal>);

impl Goals {
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Goal> {
        self.0.iter()
    }
}

impl Index<usize> for Goals {
    type Output = Goal;

    fn index(&self, index: usize) -> &Self::Output {
        &self.0[index]
    }
}

impl<'a> IntoIterator for &'a Goals {
    type Item = &'a Goal;
    type IntoIter = std::slice::Iter<'a, Goal>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl fmt::Display for Goals {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            writeln!(f, "No goals found.")
        } else {
            for goal in &self.0 {
                write!(f, "{goal}")?;
            }
            Ok(())
        }
    }
}

/// Newtype wrapper for displaying thoughts, newest first.
pub struct Thoughts(pub Vec<Thought>);

impl Thoughts {
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }
}

impl fmt::Display for Thoughts {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            writeln!(f, "No thoughts found.")
        } else {
            for thought in &self.0 {
                write!(f, "{thought}")?;
            }
            Ok(())
        }
    }
}

/// Tags with the number of goals carrying each.
pub struct TagCounts(pub Vec<(String, usize)>);

impl fmt::Display for TagCounts {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            return writeln!(f, "No tags found.");
        }
        for (tag, count) in &self.0 {
            let noun = if *count == 1 { "goal" } else { "goals" };
            writeln!(f, "- {tag} ({count} {noun})")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_collections() {
        assert_eq!(Thoughts(vec![]).to_string(), "No thoughts found.\n");
        assert_eq!(TagCounts(vec![]).to_string(), "No tags found.\n");
    }

    #[test]
    fn test_tag_counts() {
        let output = TagCounts(vec![("home".to_string(), 1), ("work".to_string(), 3)]).to_string();
        assert_eq!(output, "- home (1 goal)\n- work (3 goals)\n");
    }
}

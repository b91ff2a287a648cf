//! Thought operations and queries.

use jiff::Timestamp;

use super::Collection;
use crate::{
    error::{GlideError, Result},
    models::{Filter, Goal, Thought, ThoughtFilter},
};

impl super::Store {
    /// Records a thought, optionally attached to an existing, active goal.
    pub fn jot_thought(&self, text: &str, goal_id: Option<&str>) -> Result<Thought> {
        let thought = Thought::new(text, goal_id.map(String::from), Timestamp::now());
        thought.validate()?;

        self.transact(|snapshot| {
            if let Some(goal_id) = goal_id {
                let goal: Goal = snapshot.require(goal_id)?;
                if goal.archived {
                    return Err(GlideError::AlreadyArchived { id: goal.id });
                }
            }
            super::insert(snapshot, thought)
        })
    }

    /// Thoughts matching `filter`, newest first, at most `limit`.
    pub fn list_thoughts(&self, filter: &ThoughtFilter, limit: Option<usize>) -> Result<Vec<Thought>> {
        let mut thoughts: Vec<Thought> = self
            .read(|snapshot| snapshot.documents::<Thought>())?
            .into_iter()
            .filter(|t| filter.matches(t))
            .collect();
        thoughts.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        if let Some(limit) = limit {
            thoughts.truncate(limit);
        }
        Ok(thoughts)
    }

    /// Deletes a thought and returns it.
    pub fn remove_thought(&self, id: &str) -> Result<Thought> {
        self.transact(|snapshot| {
            let thought: Thought = snapshot.require(id)?;
            snapshot.remove(Collection::Thoughts, id);
            Ok(thought)
        })
    }
}

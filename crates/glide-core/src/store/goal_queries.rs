//! Goal operations and queries.

use jiff::{civil::Date, Timestamp};
use log::warn;

use super::Collection;
use crate::{
    error::{GlideError, Result},
    models::{normalize_tag, normalize_tags, Filter, Goal, GoalFilter, Priority},
};

/// Field changes applied by [`Store::update_goal`](super::Store::update_goal).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GoalUpdate {
    pub title: Option<String>,
    pub priority: Option<Priority>,
    /// `Some(None)` clears the deadline
    pub deadline: Option<Option<Date>>,
}

impl GoalUpdate {
    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.priority.is_none() && self.deadline.is_none()
    }
}

impl super::Store {
    /// Creates a goal. A goal with the same title is allowed but logged.
    pub fn add_goal(
        &self,
        title: &str,
        priority: Priority,
        deadline: Option<Date>,
        tags: &[String],
    ) -> Result<Goal> {
        let goal = Goal::new(title, priority, deadline, normalize_tags(tags)?, Timestamp::now());
        goal.validate()?;

        self.transact(|snapshot| {
            let goals = snapshot.documents::<Goal>()?;
            if let Some(existing) = goals
                .iter()
                .find(|g| g.title.eq_ignore_ascii_case(&goal.title))
            {
                warn!(
                    "Goal titled '{}' already exists with id {}",
                    goal.title, existing.id
                );
            }
            super::insert(snapshot, goal)
        })
    }

    /// Changes title, priority or deadline.
    pub fn update_goal(&self, id: &str, changes: GoalUpdate) -> Result<Goal> {
        if changes.is_empty() {
            return Err(GlideError::invalid_input("update").with_reason("Nothing to update"));
        }
        self.update(id, |goal: &mut Goal| {
            if let Some(title) = changes.title {
                goal.title = title.trim().to_string();
            }
            if let Some(priority) = changes.priority {
                goal.priority = priority;
            }
            if let Some(deadline) = changes.deadline {
                goal.deadline = deadline;
            }
            goal.updated_at = Timestamp::now();
            Ok(())
        })
    }

    /// Hides a goal from default listings.
    pub fn archive_goal(&self, id: &str) -> Result<Goal> {
        self.update(id, |goal: &mut Goal| {
            if goal.archived {
                return Err(GlideError::AlreadyArchived { id: goal.id.clone() });
            }
            goal.archived = true;
            goal.updated_at = Timestamp::now();
            Ok(())
        })
    }

    pub fn restore_goal(&self, id: &str) -> Result<Goal> {
        self.update(id, |goal: &mut Goal| {
            if !goal.archived {
                return Err(GlideError::NotArchived { id: goal.id.clone() });
            }
            goal.archived = false;
            goal.updated_at = Timestamp::now();
            Ok(())
        })
    }

    /// Adds tags to a goal; the result is the sorted union.
    pub fn add_tags(&self, id: &str, tags: &[String]) -> Result<Goal> {
        let new_tags = normalize_tags(tags)?;
        if new_tags.is_empty() {
            return Err(GlideError::invalid_input("tags").with_reason("No tags given"));
        }
        self.update(id, |goal: &mut Goal| {
            let merged = normalize_tags(goal.tags.iter().chain(new_tags.iter()))?;
            if merged != goal.tags {
                goal.tags = merged;
                goal.updated_at = Timestamp::now();
            }
            Ok(())
        })
    }

    /// Removes one tag; absent tags are ignored.
    pub fn remove_tag(&self, id: &str, tag: &str) -> Result<Goal> {
        let tag = normalize_tag(tag)?;
        self.update(id, |goal: &mut Goal| {
            if let Some(pos) = goal.tags.iter().position(|t| *t == tag) {
                goal.tags.remove(pos);
                goal.updated_at = Timestamp::now();
            }
            Ok(())
        })
    }

    /// Deletes a goal and returns it. Sessions and thoughts referring to it
    /// are kept.
    pub fn remove_goal(&self, id: &str) -> Result<Goal> {
        self.transact(|snapshot| {
            let goal: Goal = snapshot.require(id)?;
            snapshot.remove(Collection::Goals, id);
            Ok(goal)
        })
    }

    /// Goals matching `filter`: active before archived, then by priority
    /// (high first), then oldest first.
    pub fn list_goals(&self, filter: &GoalFilter) -> Result<Vec<Goal>> {
        let mut goals: Vec<Goal> = self
            .read(|snapshot| snapshot.documents::<Goal>())?
            .into_iter()
            .filter(|g| filter.matches(g))
            .collect();
        goals.sort_by_key(|g| (g.archived, g.priority.rank(), g.created_at));
        Ok(goals)
    }

    /// Every tag in use with the number of goals carrying it, by name.
    pub fn all_tags(&self) -> Result<Vec<(String, usize)>> {
        let goals = self.read(|snapshot| snapshot.documents::<Goal>())?;
        let mut counts: Vec<(String, usize)> = Vec::new();
        let mut tags: Vec<&String> = goals.iter().flat_map(|g| g.tags.iter()).collect();
        tags.sort();
        for tag in tags {
            match counts.last_mut() {
                Some((name, count)) if name == tag => *count += 1,
                _ => counts.push((tag.clone(), 1)),
            }
        }
        Ok(counts)
    }

    /// First goal whose title matches case-insensitively.
    pub fn find_goal_by_title(&self, title: &str) -> Result<Option<Goal>> {
        let filter = GoalFilter {
            title: Some(title.to_string()),
            ..GoalFilter::all()
        };
        Ok(self.list::<Goal, _>(filter)?.next())
    }
}

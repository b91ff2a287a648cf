//! Filter criteria for querying store collections.
//!
//! Each collection has its own criteria struct; the store only accepts
//! values implementing [`Filter`] for the matching document type.

use jiff::{civil::Date, Timestamp};

use super::{Goal, Priority, Session, Thought};

/// Predicate over one document type.
pub trait Filter<D> {
    fn matches(&self, doc: &D) -> bool;
}

/// Matches every document of any type.
#[derive(Debug, Clone, Copy, Default)]
pub struct Everything;

impl<D> Filter<D> for Everything {
    fn matches(&self, _doc: &D) -> bool {
        true
    }
}

/// Which goals to show with respect to archiving.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ArchiveFilter {
    /// Only goals that are not archived
    #[default]
    Active,
    /// Only archived goals
    Archived,
    /// Both active and archived goals
    All,
}

/// Goals whose deadline falls within `days` of `today`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DueWithin {
    pub today: Date,
    pub days: i64,
}

/// Filter options for querying goals.
#[derive(Debug, Clone, Default)]
pub struct GoalFilter {
    /// Archive status; active goals only by default
    pub archived: ArchiveFilter,

    /// Exact priority match
    pub priority: Option<Priority>,

    /// Goal must carry all of these tags
    pub tags: Vec<String>,

    /// Deadline within a window starting today
    pub due_within: Option<DueWithin>,

    /// Deadline strictly before this date
    pub overdue_as_of: Option<Date>,

    /// Case-insensitive title match
    pub title: Option<String>,
}

impl GoalFilter {
    /// Every goal, archived or not.
    pub fn all() -> Self {
        Self {
            archived: ArchiveFilter::All,
            ..Default::default()
        }
    }
}

impl Filter<Goal> for GoalFilter {
    fn matches(&self, goal: &Goal) -> bool {
        let archive_ok = match self.archived {
            ArchiveFilter::Active => !goal.archived,
            ArchiveFilter::Archived => goal.archived,
            ArchiveFilter::All => true,
        };

        archive_ok
            && self.priority.is_none_or(|p| goal.priority == p)
            && self.tags.iter().all(|t| goal.tags.contains(t))
            && self
                .due_within
                .is_none_or(|w| goal.is_due_within(w.today, w.days))
            && self.overdue_as_of.is_none_or(|d| goal.is_overdue(d))
            && self
                .title
                .as_ref()
                .is_none_or(|t| goal.title.eq_ignore_ascii_case(t.trim()))
    }
}

/// Filter options for querying sessions.
#[derive(Debug, Clone, Default)]
pub struct SessionFilter {
    pub goal_id: Option<String>,

    /// Start time at or after this instant
    pub started_from: Option<Timestamp>,

    /// Start time strictly before this instant
    pub started_before: Option<Timestamp>,

    /// Exact start time
    pub start_time: Option<Timestamp>,

    /// `Some(true)` for sessions without an end time
    pub open: Option<bool>,
}

impl Filter<Session> for SessionFilter {
    fn matches(&self, session: &Session) -> bool {
        self.goal_id
            .as_ref()
            .is_none_or(|g| session.goal_id.as_ref() == Some(g))
            && self.started_from.is_none_or(|t| session.start_time >= t)
            && self.started_before.is_none_or(|t| session.start_time < t)
            && self.start_time.is_none_or(|t| session.start_time == t)
            && self.open.is_none_or(|open| session.is_open() == open)
    }
}

/// Filter options for querying thoughts.
#[derive(Debug, Clone, Default)]
pub struct ThoughtFilter {
    pub goal_id: Option<String>,
}

impl Filter<Thought> for ThoughtFilter {
    fn matches(&self, thought: &Thought) -> bool {
        self.goal_id
            .as_ref()
            .is_none_or(|g| thought.goal_id.as_ref() == Some(g))
    }
}

//! Parameter structures for Goal Glide operations.
//!
//! Interface-agnostic inputs to the [`Glide`](crate::Glide) facade. The CLI
//! defines its own clap-derived argument structs and converts them into
//! these via `From`, so the core stays free of interface dependencies:
//!
//! ```text
//! ┌─────────────────┐    ┌─────────────────┐
//! │   CLI Args      │    │  Core Params    │
//! │  (clap derives) │───▶│ (typed fields)  │
//! └─────────────────┘    └─────────────────┘
//! ```

use jiff::civil::Date;

use crate::{
    models::{ArchiveFilter, DueWithin, GoalFilter, Priority, ThoughtFilter},
    stats::{Granularity, StatsRange},
    store::GoalUpdate,
};

/// Generic parameters for operations requiring just an ID.
#[derive(Debug, Clone, Default)]
pub struct Id {
    pub id: String,
}

/// Parameters for creating a goal.
#[derive(Debug, Clone, Default)]
pub struct AddGoal {
    pub title: String,
    pub priority: Priority,
    pub deadline: Option<Date>,
    pub tags: Vec<String>,
}

/// Parameters for changing a goal's fields.
#[derive(Debug, Clone, Default)]
pub struct UpdateGoal {
    pub id: String,
    pub title: Option<String>,
    pub priority: Option<Priority>,
    pub deadline: Option<Date>,
    /// Remove the deadline; wins over `deadline`
    pub clear_deadline: bool,
}

impl From<&UpdateGoal> for GoalUpdate {
    fn from(params: &UpdateGoal) -> Self {
        let deadline = if params.clear_deadline {
            Some(None)
        } else {
            params.deadline.map(Some)
        };
        GoalUpdate {
            title: params.title.clone(),
            priority: params.priority,
            deadline,
        }
    }
}

/// Parameters for listing goals.
#[derive(Debug, Clone, Default)]
pub struct ListGoals {
    /// Only archived goals
    pub archived: bool,
    /// Active and archived goals
    pub all: bool,
    pub priority: Option<Priority>,
    /// Goals must carry every one of these tags
    pub tags: Vec<String>,
    /// Deadline within this many days from today
    pub due_soon: Option<i64>,
    /// Deadline already passed
    pub overdue: bool,
}

impl ListGoals {
    /// Filter criteria evaluated against `today`.
    pub fn to_filter(&self, today: Date) -> GoalFilter {
        let archived = if self.all {
            ArchiveFilter::All
        } else if self.archived {
            ArchiveFilter::Archived
        } else {
            ArchiveFilter::Active
        };
        GoalFilter {
            archived,
            priority: self.priority,
            tags: self.tags.iter().map(|t| t.trim().to_lowercase()).collect(),
            due_within: self.due_soon.map(|days| DueWithin { today, days }),
            overdue_as_of: self.overdue.then_some(today),
            title: None,
        }
    }
}

/// Parameters for adding tags to a goal.
#[derive(Debug, Clone, Default)]
pub struct TagGoal {
    pub id: String,
    pub tags: Vec<String>,
}

/// Parameters for removing a tag from a goal.
#[derive(Debug, Clone, Default)]
pub struct UntagGoal {
    pub id: String,
    pub tag: String,
}

/// Parameters for starting a pomodoro.
#[derive(Debug, Clone, Default)]
pub struct StartPomodoro {
    pub goal_id: Option<String>,
    /// Falls back to the configured default
    pub duration_minutes: Option<u32>,
}

/// Parameters for recording a thought.
#[derive(Debug, Clone, Default)]
pub struct JotThought {
    pub text: String,
    pub goal_id: Option<String>,
}

/// Parameters for listing thoughts.
#[derive(Debug, Clone)]
pub struct ListThoughts {
    pub goal_id: Option<String>,
    pub limit: Option<usize>,
}

impl Default for ListThoughts {
    fn default() -> Self {
        Self {
            goal_id: None,
            limit: Some(10),
        }
    }
}

impl From<&ListThoughts> for ThoughtFilter {
    fn from(params: &ListThoughts) -> Self {
        ThoughtFilter {
            goal_id: params.goal_id.clone(),
        }
    }
}

/// Parameters for the statistics summary.
#[derive(Debug, Clone)]
pub struct StatsQuery {
    pub range: StatsRange,
    pub granularity: Granularity,
    pub top_goals: usize,
}

impl Default for StatsQuery {
    fn default() -> Self {
        Self {
            range: StatsRange::CurrentWeek,
            granularity: Granularity::Day,
            top_goals: 5,
        }
    }
}

/// Parameters for building a report.
#[derive(Debug, Clone)]
pub struct ReportQuery {
    pub range: StatsRange,
    pub top_goals: usize,
}

impl Default for ReportQuery {
    fn default() -> Self {
        Self {
            range: StatsRange::CurrentWeek,
            top_goals: crate::report::DEFAULT_TOP_GOALS,
        }
    }
}

//! Subcommand argument definitions using clap.
//!
//! Each clap-derived struct here converts into an interface-agnostic
//! parameter type from `glide_core::params`:
//!
//! ```text
//! User Input → CLI Args (clap) → Core Params → Glide
//! ```
//!
//! Help text, aliases and value parsing stay in this crate; business rules
//! (title and tag validation, range checks) stay in the core.

use clap::{Args, Subcommand, ValueEnum};
use glide_core::{
    models::Priority,
    params::*,
    stats::{Granularity, StatsRange},
    GlideError,
};
use jiff::civil::Date;

/// Command-line representation of goal priority
#[derive(Copy, Clone, PartialEq, Eq, ValueEnum)]
pub enum PriorityArg {
    Low,
    Medium,
    High,
}

impl From<PriorityArg> for Priority {
    fn from(val: PriorityArg) -> Self {
        match val {
            PriorityArg::Low => Priority::Low,
            PriorityArg::Medium => Priority::Medium,
            PriorityArg::High => Priority::High,
        }
    }
}

// ============================================================================
// Goals
// ============================================================================

/// Create a new goal
#[derive(Args)]
pub struct AddGoalArgs {
    /// Title of the goal
    pub title: String,
    #[arg(short, long, value_enum, default_value = "medium")]
    pub priority: PriorityArg,
    /// Deadline as YYYY-MM-DD
    #[arg(short, long)]
    pub deadline: Option<Date>,
    /// Tags as a comma-separated list
    #[arg(short, long, value_delimiter = ',')]
    pub tags: Vec<String>,
}

impl From<AddGoalArgs> for AddGoal {
    fn from(val: AddGoalArgs) -> Self {
        AddGoal {
            title: val.title,
            priority: val.priority.into(),
            deadline: val.deadline,
            tags: val.tags,
        }
    }
}

/// Change a goal's title, priority or deadline
#[derive(Args)]
pub struct UpdateGoalArgs {
    #[arg(help = "ID of the goal to update")]
    pub id: String,
    #[arg(long, help = "New title")]
    pub title: Option<String>,
    #[arg(short, long, value_enum, help = "New priority")]
    pub priority: Option<PriorityArg>,
    #[arg(short, long, help = "New deadline as YYYY-MM-DD")]
    pub deadline: Option<Date>,
    #[arg(long, conflicts_with = "deadline", help = "Remove the deadline")]
    pub clear_deadline: bool,
}

impl From<UpdateGoalArgs> for UpdateGoal {
    fn from(val: UpdateGoalArgs) -> Self {
        UpdateGoal {
            id: val.id,
            title: val.title,
            priority: val.priority.map(Priority::from),
            deadline: val.deadline,
            clear_deadline: val.clear_deadline,
        }
    }
}

/// List goals
///
/// Shows active goals unless --archived or --all is given. Filters combine;
/// with several --tag options a goal must carry all of them.
#[derive(Args)]
pub struct ListGoalsArgs {
    #[arg(long, conflicts_with = "all", help = "Show only archived goals")]
    pub archived: bool,
    #[arg(long, help = "Show active and archived goals")]
    pub all: bool,
    #[arg(short, long, value_enum, help = "Only goals with this priority")]
    pub priority: Option<PriorityArg>,
    #[arg(short, long = "tag", help = "Only goals carrying this tag")]
    pub tags: Vec<String>,
    #[arg(
        long,
        value_name = "DAYS",
        num_args = 0..=1,
        default_missing_value = "7",
        help = "Only goals due within DAYS days (default 7)"
    )]
    pub due_soon: Option<i64>,
    #[arg(long, help = "Only goals whose deadline has passed")]
    pub overdue: bool,
}

impl From<ListGoalsArgs> for ListGoals {
    fn from(val: ListGoalsArgs) -> Self {
        ListGoals {
            archived: val.archived,
            all: val.all,
            priority: val.priority.map(Priority::from),
            tags: val.tags,
            due_soon: val.due_soon,
            overdue: val.overdue,
        }
    }
}

/// Arguments for commands that take a single ID
#[derive(Args)]
pub struct IdArgs {
    #[arg(help = "Unique identifier")]
    pub id: String,
}

impl From<IdArgs> for Id {
    fn from(val: IdArgs) -> Self {
        Id { id: val.id }
    }
}

#[derive(Subcommand)]
pub enum GoalCommands {
    /// Create a new goal
    #[command(alias = "a")]
    Add(AddGoalArgs),
    /// Change a goal's title, priority or deadline
    #[command(alias = "u")]
    Update(UpdateGoalArgs),
    /// Delete a goal; its sessions are kept
    #[command(aliases = ["rm", "d"])]
    Remove(IdArgs),
    /// Hide a goal from default listings
    Archive(IdArgs),
    /// Bring an archived goal back
    Restore(IdArgs),
    /// List goals
    #[command(aliases = ["l", "ls"])]
    List(ListGoalsArgs),
    /// Show one goal
    #[command(alias = "s")]
    Show(IdArgs),
}

// ============================================================================
// Tags
// ============================================================================

/// Add tags to a goal
#[derive(Args)]
pub struct AddTagsArgs {
    #[arg(help = "ID of the goal")]
    pub id: String,
    #[arg(required = true, help = "Tags to add")]
    pub tags: Vec<String>,
}

impl From<AddTagsArgs> for TagGoal {
    fn from(val: AddTagsArgs) -> Self {
        TagGoal {
            id: val.id,
            tags: val.tags,
        }
    }
}

/// Remove a tag from a goal
#[derive(Args)]
pub struct RemoveTagArgs {
    #[arg(help = "ID of the goal")]
    pub id: String,
    #[arg(help = "Tag to remove")]
    pub tag: String,
}

impl From<RemoveTagArgs> for UntagGoal {
    fn from(val: RemoveTagArgs) -> Self {
        UntagGoal {
            id: val.id,
            tag: val.tag,
        }
    }
}

#[derive(Subcommand)]
pub enum TagCommands {
    /// Add tags to a goal
    Add(AddTagsArgs),
    /// Remove a tag from a goal
    #[command(alias = "rm")]
    Remove(RemoveTagArgs),
    /// List all tags with goal counts
    #[command(alias = "ls")]
    List,
}

// ============================================================================
// Pomodoro
// ============================================================================

/// Start a pomodoro
#[derive(Args)]
pub struct StartArgs {
    #[arg(short, long = "goal", help = "Goal to focus on")]
    pub goal_id: Option<String>,
    #[arg(short, long, help = "Length in minutes (default from config)")]
    pub duration: Option<u32>,
}

impl From<StartArgs> for StartPomodoro {
    fn from(val: StartArgs) -> Self {
        StartPomodoro {
            goal_id: val.goal_id,
            duration_minutes: val.duration,
        }
    }
}

#[derive(Subcommand)]
pub enum PomoCommands {
    /// Start a pomodoro
    Start(StartArgs),
    /// Stop the running pomodoro and record it
    Stop,
    /// Show the running pomodoro
    Status {
        #[arg(long, help = "Print JSON instead of markdown")]
        json: bool,
    },
}

// ============================================================================
// Thoughts
// ============================================================================

/// Record a thought
#[derive(Args)]
pub struct JotArgs {
    pub text: String,
    #[arg(short, long = "goal", help = "Attach to a goal")]
    pub goal_id: Option<String>,
}

impl From<JotArgs> for JotThought {
    fn from(val: JotArgs) -> Self {
        JotThought {
            text: val.text,
            goal_id: val.goal_id,
        }
    }
}

/// List thoughts, newest first
#[derive(Args)]
pub struct ListThoughtsArgs {
    #[arg(short, long = "goal", help = "Only thoughts attached to this goal")]
    pub goal_id: Option<String>,
    #[arg(short = 'n', long, default_value_t = 10, help = "Maximum number shown")]
    pub limit: usize,
    #[arg(long, conflicts_with = "limit", help = "Show every thought")]
    pub all: bool,
}

impl From<ListThoughtsArgs> for ListThoughts {
    fn from(val: ListThoughtsArgs) -> Self {
        ListThoughts {
            goal_id: val.goal_id,
            limit: (!val.all).then_some(val.limit),
        }
    }
}

#[derive(Subcommand)]
pub enum ThoughtCommands {
    /// Record a thought
    #[command(alias = "j")]
    Jot(JotArgs),
    /// List thoughts, newest first
    #[command(alias = "ls")]
    List(ListThoughtsArgs),
    /// Delete a thought
    #[command(alias = "rm")]
    Remove(IdArgs),
}

// ============================================================================
// Statistics and reports
// ============================================================================

#[derive(Copy, Clone, PartialEq, Eq, ValueEnum)]
pub enum RangeArg {
    Week,
    Month,
    All,
}

#[derive(Copy, Clone, PartialEq, Eq, ValueEnum)]
pub enum GranularityArg {
    Day,
    Week,
    Month,
}

impl From<GranularityArg> for Granularity {
    fn from(val: GranularityArg) -> Self {
        match val {
            GranularityArg::Day => Granularity::Day,
            GranularityArg::Week => Granularity::Week,
            GranularityArg::Month => Granularity::Month,
        }
    }
}

/// Calendar range shared by `stats` and `report`
#[derive(Args)]
pub struct RangeArgs {
    #[arg(
        short,
        long,
        value_enum,
        default_value = "week",
        help = "Current week, current month or all time"
    )]
    pub range: RangeArg,
    #[arg(long, requires = "to", help = "First day of an explicit range")]
    pub from: Option<Date>,
    #[arg(long, requires = "from", help = "Last day of an explicit range")]
    pub to: Option<Date>,
}

impl TryFrom<&RangeArgs> for StatsRange {
    type Error = GlideError;

    fn try_from(val: &RangeArgs) -> Result<Self, Self::Error> {
        if let (Some(from), Some(to)) = (val.from, val.to) {
            return StatsRange::between(from, to);
        }
        Ok(match val.range {
            RangeArg::Week => StatsRange::CurrentWeek,
            RangeArg::Month => StatsRange::CurrentMonth,
            RangeArg::All => StatsRange::AllTime,
        })
    }
}

/// Show focus statistics
#[derive(Args)]
pub struct StatsArgs {
    #[command(flatten)]
    pub range: RangeArgs,
    #[arg(long = "by", value_enum, default_value = "day", help = "Bucket size")]
    pub granularity: GranularityArg,
    #[arg(long, default_value_t = 5, help = "Number of goals ranked")]
    pub top: usize,
    #[arg(long, help = "Print JSON instead of markdown")]
    pub json: bool,
}

impl TryFrom<&StatsArgs> for StatsQuery {
    type Error = GlideError;

    fn try_from(val: &StatsArgs) -> Result<Self, Self::Error> {
        Ok(StatsQuery {
            range: StatsRange::try_from(&val.range)?,
            granularity: val.granularity.into(),
            top_goals: val.top,
        })
    }
}

/// Build a progress report
#[derive(Args)]
pub struct ReportArgs {
    #[command(flatten)]
    pub range: RangeArgs,
    #[arg(long, default_value_t = 5, help = "Number of goals listed")]
    pub top: usize,
    #[arg(long, help = "Print JSON instead of markdown")]
    pub json: bool,
}

impl TryFrom<&ReportArgs> for ReportQuery {
    type Error = GlideError;

    fn try_from(val: &ReportArgs) -> Result<Self, Self::Error> {
        Ok(ReportQuery {
            range: StatsRange::try_from(&val.range)?,
            top_goals: val.top,
        })
    }
}

#[derive(Subcommand)]
pub enum ConfigCommands {
    /// Print the effective configuration as TOML
    Show,
}

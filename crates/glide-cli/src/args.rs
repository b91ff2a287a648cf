use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::cli::{
    ConfigCommands, GoalCommands, PomoCommands, ReportArgs, StatsArgs, TagCommands,
    ThoughtCommands,
};

/// Goal Glide: track goals and focused pomodoro sessions
///
/// Goals, sessions and thoughts are stored as JSON in a local data
/// directory. A pomodoro started in one invocation is stopped by a later
/// one; sessions left running after a crash are recovered automatically.
#[derive(Parser)]
#[command(version, about, name = "glide")]
pub struct Args {
    /// Data directory holding db.json and session.json. Defaults to
    /// $XDG_DATA_HOME/goal-glide
    #[arg(long, global = true, env = "GOAL_GLIDE_DB_DIR")]
    pub data_dir: Option<PathBuf>,

    /// Configuration file. Defaults to config.toml in the data directory
    #[arg(long = "config", global = true, env = "GOAL_GLIDE_CONFIG")]
    pub config_file: Option<PathBuf>,

    /// Disable colored output and use plain text
    #[arg(long, global = true)]
    pub no_color: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available commands
#[derive(Subcommand)]
pub enum Commands {
    /// Manage goals
    #[command(alias = "g")]
    Goal {
        #[command(subcommand)]
        command: GoalCommands,
    },
    /// Manage goal tags
    #[command(alias = "tag")]
    Tags {
        #[command(subcommand)]
        command: TagCommands,
    },
    /// Start, stop and inspect pomodoro sessions
    #[command(alias = "p")]
    Pomo {
        #[command(subcommand)]
        command: PomoCommands,
    },
    /// Record and review quick thoughts
    #[command(alias = "t")]
    Thought {
        #[command(subcommand)]
        command: ThoughtCommands,
    },
    /// Show focus statistics for a range
    Stats(StatsArgs),
    /// Build a progress report for a range
    Report(ReportArgs),
    /// Inspect configuration
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
}

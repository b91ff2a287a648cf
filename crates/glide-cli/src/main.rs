//! Goal Glide CLI
//!
//! Command-line front end for goals, pomodoro sessions, thoughts and
//! statistics. Each invocation is a short-lived process; state shared between
//! invocations lives in the data directory.

mod args;
mod cli;
mod handler;
mod renderer;

use std::process::ExitCode;

use anyhow::{Context, Result};
use args::{Args, Commands};
use clap::Parser;
use glide_core::{params::ListGoals, GlideBuilder, GlideError};
use handler::Cli;
use log::{debug, info};
use renderer::TerminalRenderer;
use Commands::*;

#[tokio::main]
async fn main() -> ExitCode {
    env_logger::init();

    match run(Args::parse()).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("Error: {err:#}");
            ExitCode::from(exit_code(&err))
        }
    }
}

async fn run(args: Args) -> Result<()> {
    let Args {
        data_dir,
        config_file,
        no_color,
        command,
    } = args;

    let glide = GlideBuilder::new()
        .with_base_dir(data_dir)
        .with_config_path(config_file)
        .build()
        .await
        .context("Failed to initialize Goal Glide")?;
    debug!("Data directory: {}", glide.paths().base_dir().display());

    let cli = Cli::new(glide, TerminalRenderer::new(!no_color));

    info!("Goal Glide started");

    match command {
        Some(Goal { command }) => cli.handle_goal_command(command).await,
        Some(Tags { command }) => cli.handle_tag_command(command).await,
        Some(Pomo { command }) => cli.handle_pomo_command(command).await,
        Some(Thought { command }) => cli.handle_thought_command(command).await,
        Some(Stats(args)) => cli.stats(args).await,
        Some(Report(args)) => cli.report(args).await,
        Some(Config { command }) => cli.handle_config_command(command),
        None => cli.list_goals(&ListGoals::default()).await,
    }
}

/// Maps the failure kind to the process exit status.
fn exit_code(err: &anyhow::Error) -> u8 {
    match err.downcast_ref::<GlideError>() {
        Some(GlideError::NotFound { .. }) => 2,
        Some(GlideError::AlreadyArchived { .. } | GlideError::NotArchived { .. }) => 3,
        Some(GlideError::Validation { .. }) => 4,
        Some(GlideError::AlreadyRunning { .. }) => 5,
        Some(GlideError::NoActiveSession) => 6,
        Some(GlideError::LockTimeout { .. }) => 7,
        Some(GlideError::CorruptStore { .. }) => 8,
        _ => 1,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exit_codes() {
        let not_found = anyhow::Error::new(GlideError::goal_not_found("x"));
        assert_eq!(exit_code(&not_found), 2);

        let wrapped = Err::<(), _>(GlideError::NoActiveSession)
            .context("Failed to stop")
            .expect_err("error expected");
        assert_eq!(exit_code(&wrapped), 6);

        assert_eq!(exit_code(&anyhow::anyhow!("other")), 1);
    }
}

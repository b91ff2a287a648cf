//! Command handlers that drive the core and print results.

use anyhow::{Context, Result};
use glide_core::{
    display::{CreateResult, DeleteResult, Goals, TagCounts, Thoughts, UpdateResult},
    params::{Id, ListGoals, ReportQuery, StatsQuery, TagGoal, UntagGoal, UpdateGoal},
    Glide,
};

use crate::{
    cli::{
        ConfigCommands, GoalCommands, PomoCommands, ReportArgs, StatsArgs, TagCommands,
        ThoughtCommands,
    },
    renderer::TerminalRenderer,
};

/// Runs one command against a [`Glide`] instance.
pub struct Cli {
    glide: Glide,
    renderer: TerminalRenderer,
}

impl Cli {
    pub fn new(glide: Glide, renderer: TerminalRenderer) -> Self {
        Self { glide, renderer }
    }

    pub async fn handle_goal_command(&self, command: GoalCommands) -> Result<()> {
        match command {
            GoalCommands::Add(args) => {
                let goal = self.glide.add_goal(&args.into()).await?;
                self.renderer.render(&CreateResult::new(goal).to_string());
            }
            GoalCommands::Update(args) => {
                let params: UpdateGoal = args.into();
                let changes = describe_update(&params);
                let goal = self.glide.update_goal(&params).await?;
                self.renderer
                    .render(&UpdateResult::with_changes(goal, changes).to_string());
            }
            GoalCommands::Remove(args) => {
                let goal = self.glide.remove_goal(&args.into()).await?;
                self.renderer.render(&DeleteResult::new(goal).to_string());
            }
            GoalCommands::Archive(args) => {
                let goal = self.glide.archive_goal(&args.into()).await?;
                self.renderer.render(
                    &UpdateResult::with_changes(goal, vec!["Archived".to_string()]).to_string(),
                );
            }
            GoalCommands::Restore(args) => {
                let goal = self.glide.restore_goal(&args.into()).await?;
                self.renderer.render(
                    &UpdateResult::with_changes(goal, vec!["Restored".to_string()]).to_string(),
                );
            }
            GoalCommands::List(args) => {
                let params: ListGoals = args.into();
                self.list_goals(&params).await?;
            }
            GoalCommands::Show(args) => {
                let params: Id = args.into();
                let goal = self.glide.get_goal(&params).await?;
                self.renderer.render(&goal.to_string());
            }
        }
        Ok(())
    }

    pub async fn list_goals(&self, params: &ListGoals) -> Result<()> {
        let heading = if params.all {
            "All Goals"
        } else if params.archived {
            "Archived Goals"
        } else {
            "Active Goals"
        };
        let goals = self.glide.list_goals(params).await?;
        self.renderer
            .render(&format!("# {heading}\n\n{}", Goals(goals)));
        Ok(())
    }

    pub async fn handle_tag_command(&self, command: TagCommands) -> Result<()> {
        match command {
            TagCommands::Add(args) => {
                let params: TagGoal = args.into();
                let change = format!("Added tags: {}", params.tags.join(", "));
                let goal = self.glide.add_tags(&params).await?;
                self.renderer
                    .render(&UpdateResult::with_changes(goal, vec![change]).to_string());
            }
            TagCommands::Remove(args) => {
                let params: UntagGoal = args.into();
                let change = format!("Removed tag: {}", params.tag);
                let goal = self.glide.remove_tag(&params).await?;
                self.renderer
                    .render(&UpdateResult::with_changes(goal, vec![change]).to_string());
            }
            TagCommands::List => {
                let tags = self.glide.all_tags().await?;
                self.renderer
                    .render(&format!("# Tags\n\n{}", TagCounts(tags)));
            }
        }
        Ok(())
    }

    pub async fn handle_pomo_command(&self, command: PomoCommands) -> Result<()> {
        match command {
            PomoCommands::Start(args) => {
                let started = self.glide.start_pomodoro(&args.into()).await?;
                self.renderer.render(&started.to_string());
            }
            PomoCommands::Stop => {
                let session = self.glide.stop_pomodoro().await?;
                self.renderer.render(&CreateResult::new(session).to_string());
            }
            PomoCommands::Status { json } => {
                let status = self.glide.pomodoro_status().await?;
                if json {
                    self.renderer.render_json(&status)?;
                } else {
                    self.renderer.render(&status.to_string());
                }
            }
        }
        Ok(())
    }

    pub async fn handle_thought_command(&self, command: ThoughtCommands) -> Result<()> {
        match command {
            ThoughtCommands::Jot(args) => {
                let thought = self.glide.jot_thought(&args.into()).await?;
                self.renderer.render(&CreateResult::new(thought).to_string());
            }
            ThoughtCommands::List(args) => {
                let thoughts = self.glide.list_thoughts(&args.into()).await?;
                self.renderer
                    .render(&format!("# Thoughts\n\n{}", Thoughts(thoughts)));
            }
            ThoughtCommands::Remove(args) => {
                let thought = self.glide.remove_thought(&args.into()).await?;
                self.renderer.render(&DeleteResult::new(thought).to_string());
            }
        }
        Ok(())
    }

    pub async fn stats(&self, args: StatsArgs) -> Result<()> {
        let params = StatsQuery::try_from(&args)?;
        let summary = self.glide.stats(&params).await?;
        if args.json {
            self.renderer.render_json(&summary)
        } else {
            self.renderer.render(&summary.to_string());
            Ok(())
        }
    }

    pub async fn report(&self, args: ReportArgs) -> Result<()> {
        let params = ReportQuery::try_from(&args)?;
        let report = self.glide.report(&params).await?;
        if args.json {
            self.renderer.render_json(&report)
        } else {
            self.renderer.render(&report.to_string());
            Ok(())
        }
    }

    pub fn handle_config_command(&self, command: ConfigCommands) -> Result<()> {
        match command {
            ConfigCommands::Show => {
                let toml = self
                    .glide
                    .config()
                    .to_toml()
                    .context("Failed to serialize configuration")?;
                print!("{toml}");
            }
        }
        Ok(())
    }
}

/// Human-readable list of the fields an update touches.
fn describe_update(params: &UpdateGoal) -> Vec<String> {
    let mut changes = Vec::new();
    if let Some(title) = &params.title {
        changes.push(format!("Title set to '{}'", title.trim()));
    }
    if let Some(priority) = params.priority {
        changes.push(format!("Priority set to {priority}"));
    }
    if params.clear_deadline {
        changes.push("Deadline cleared".to_string());
    } else if let Some(deadline) = params.deadline {
        changes.push(format!("Deadline set to {deadline}"));
    }
    changes
}

#[cfg(test)]
mod tests {
    use glide_core::models::Priority;
    use jiff::civil::date;

    use super::*;

    #[test]
    fn test_describe_update() {
        let params = UpdateGoal {
            id: "g".to_string(),
            title: Some(" New ".to_string()),
            priority: Some(Priority::Low),
            deadline: Some(date(2030, 1, 1)),
            clear_deadline: true,
        };
        assert_eq!(
            describe_update(&params),
            vec![
                "Title set to 'New'".to_string(),
                "Priority set to low".to_string(),
                "Deadline cleared".to_string(),
            ]
        );
        assert!(describe_update(&UpdateGoal::default()).is_empty());
    }
}

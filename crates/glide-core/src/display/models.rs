//! Display implementations for domain models.
//!
//! Every implementation renders markdown so the CLI can print it through the
//! terminal renderer or as plain text.

use std::fmt;

use super::datetime::{Hours, LocalDateTime};
use crate::{
    glide::StatsSummary,
    models::{Goal, Priority, Session, Thought},
    pomodoro::{PomodoroStatus, Started},
    report::{GoalSummary, Report},
    stats::{Bucket, Window},
};

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl fmt::Display for Window {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} to {}", self.start, self.end)
    }
}

impl fmt::Display for Goal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let archived = if self.archived { " [archived]" } else { "" };
        writeln!(f, "## {} (ID: {}){archived}", self.title, self.id)?;
        writeln!(f)?;

        writeln!(f, "- **Priority**: {}", self.priority)?;
        if !self.tags.is_empty() {
            writeln!(f, "- **Tags**: {}", self.tags.join(", "))?;
        }
        if let Some(deadline) = self.deadline {
            writeln!(f, "- **Deadline**: {deadline}")?;
        }
        writeln!(f, "- **Created**: {}", LocalDateTime(&self.created_at))?;
        if self.updated_at != self.created_at {
            writeln!(f, "- **Updated**: {}", LocalDateTime(&self.updated_at))?;
        }
        writeln!(f)
    }
}

impl fmt::Display for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "- {}", LocalDateTime(&self.start_time))?;
        match self.end_time {
            Some(_) => write!(f, " ({})", Hours::precise(self.duration_secs))?,
            None => write!(f, " (open)")?,
        }
        if let Some(goal_id) = &self.goal_id {
            write!(f, " goal `{goal_id}`")?;
        }
        if self.recovered {
            write!(f, " *recovered*")?;
        }
        writeln!(f)
    }
}

impl fmt::Display for Thought {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "- {} ({}", self.text, LocalDateTime(&self.created_at))?;
        if let Some(goal_id) = &self.goal_id {
            write!(f, ", goal `{goal_id}`")?;
        }
        writeln!(f, ", ID: {})", self.id)
    }
}

impl fmt::Display for Started {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(recovered) = &self.recovered {
            writeln!(f, "Recovered an unfinished session:")?;
            write!(f, "{recovered}")?;
            writeln!(f)?;
        }
        write!(
            f,
            "Started a {} minute session",
            self.session.planned_duration_secs / 60
        )?;
        if let Some(goal_id) = &self.session.goal_id {
            write!(f, " for goal `{goal_id}`")?;
        }
        writeln!(f, " at {}", LocalDateTime(&self.session.started_at))
    }
}

impl fmt::Display for PomodoroStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PomodoroStatus::Idle => writeln!(f, "No active session."),
            PomodoroStatus::Running {
                session,
                elapsed_secs,
                remaining_secs,
            } => {
                writeln!(f, "# Session running")?;
                writeln!(f)?;
                if let Some(goal_id) = &session.goal_id {
                    writeln!(f, "- **Goal**: {goal_id}")?;
                }
                writeln!(f, "- **Started**: {}", LocalDateTime(&session.started_at))?;
                writeln!(
                    f,
                    "- **Elapsed**: {}",
                    Hours::precise(elapsed_secs.unsigned_abs())
                )?;
                writeln!(
                    f,
                    "- **Remaining**: {}",
                    Hours::precise(remaining_secs.unsigned_abs())
                )
            }
        }
    }
}

fn fmt_buckets(f: &mut fmt::Formatter<'_>, heading: &str, buckets: &[Bucket]) -> fmt::Result {
    if buckets.is_empty() {
        return Ok(());
    }
    writeln!(f)?;
    writeln!(f, "## {heading}")?;
    writeln!(f)?;
    for bucket in buckets {
        writeln!(f, "- {}: {}", bucket.label, Hours::new(bucket.total_secs))?;
    }
    Ok(())
}

fn fmt_top_goals(f: &mut fmt::Formatter<'_>, goals: &[GoalSummary]) -> fmt::Result {
    if goals.is_empty() {
        return Ok(());
    }
    writeln!(f)?;
    writeln!(f, "## Top goals")?;
    writeln!(f)?;
    for (rank, goal) in goals.iter().enumerate() {
        let title = goal
            .title
            .clone()
            .unwrap_or_else(|| format!("(deleted goal {})", goal.goal_id));
        write!(f, "{}. {title}: {}", rank + 1, Hours::new(goal.total_secs))?;
        if !goal.tags.is_empty() {
            write!(f, " [{}]", goal.tags.join(", "))?;
        }
        writeln!(f)?;
    }
    Ok(())
}

fn fmt_heading(f: &mut fmt::Formatter<'_>, title: &str, window: Option<&Window>) -> fmt::Result {
    match window {
        Some(window) => writeln!(f, "# {title} ({window})"),
        None => writeln!(f, "# {title}"),
    }
}

impl fmt::Display for StatsSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt_heading(f, &format!("Stats: {}", self.range), self.window.as_ref())?;
        writeln!(f)?;

        writeln!(
            f,
            "- **Total**: {} over {} sessions",
            Hours::new(self.totals.total_secs),
            self.totals.session_count
        )?;
        writeln!(
            f,
            "- **Average per day**: {}",
            Hours::new(self.average_per_day_secs.round() as u64)
        )?;
        writeln!(f, "- **Current streak**: {} days", self.current_streak)?;
        writeln!(f, "- **Longest streak**: {} days", self.longest_streak)?;
        if let Some(day) = self.most_productive_weekday {
            writeln!(f, "- **Most productive day**: {day}")?;
        }

        fmt_buckets(f, &format!("By {}", self.granularity), &self.buckets)?;
        fmt_top_goals(f, &self.top_goals)
    }
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt_heading(f, &format!("Report: {}", self.range), self.window.as_ref())?;
        writeln!(f)?;

        writeln!(
            f,
            "- **Total**: {} over {} sessions",
            Hours::new(self.totals.total_secs),
            self.totals.session_count
        )?;
        writeln!(f, "- **Current streak**: {} days", self.current_streak)?;
        writeln!(f, "- **Longest streak**: {} days", self.longest_streak)?;

        fmt_top_goals(f, &self.top_goals)?;

        if !self.tag_totals.is_empty() {
            writeln!(f)?;
            writeln!(f, "## Tags")?;
            writeln!(f)?;
            for tag in &self.tag_totals {
                writeln!(f, "- {}: {}", tag.tag, Hours::new(tag.total_secs))?;
            }
        }

        fmt_buckets(f, "By day", &self.histogram)
    }
}

#[cfg(test)]
mod tests {
    use jiff::{civil::date, Timestamp};

    use super::*;
    use crate::{
        models::RunningSession,
        stats::Totals,
    };

    fn ts(s: &str) -> Timestamp {
        s.parse().expect("valid timestamp")
    }

    #[test]
    fn test_goal_display() {
        let mut goal = Goal::new(
            "Write a novel",
            Priority::High,
            Some(date(2030, 1, 1)),
            vec!["writing".to_string()],
            ts("2024-03-01T09:00:00Z"),
        );
        goal.id = "abc".to_string();

        let output = goal.to_string();
        assert!(output.contains("## Write a novel (ID: abc)"));
        assert!(output.contains("- **Priority**: high"));
        assert!(output.contains("- **Tags**: writing"));
        assert!(output.contains("- **Deadline**: 2030-01-01"));
        assert!(!output.contains("[archived]"));

        goal.archived = true;
        assert!(goal.to_string().contains("[archived]"));
    }

    #[test]
    fn test_session_display() {
        let mut session = Session::finalized(
            Some("abc".to_string()),
            ts("2024-03-01T09:00:00Z"),
            ts("2024-03-01T09:25:00Z"),
            None,
        )
        .expect("valid session");
        assert!(session.to_string().contains("(25:00) goal `abc`"));

        session.recovered = true;
        assert!(session.to_string().contains("*recovered*"));
    }

    #[test]
    fn test_pomodoro_status_display() {
        assert_eq!(PomodoroStatus::Idle.to_string(), "No active session.\n");

        let running = PomodoroStatus::Running {
            session: RunningSession {
                goal_id: Some("abc".to_string()),
                started_at: ts("2024-03-01T09:00:00Z"),
                planned_duration_secs: 1500,
            },
            elapsed_secs: 600,
            remaining_secs: 900,
        };
        let output = running.to_string();
        assert!(output.contains("# Session running"));
        assert!(output.contains("- **Elapsed**: 10:00"));
        assert!(output.contains("- **Remaining**: 15:00"));
    }

    #[test]
    fn test_report_display_names_deleted_goals() {
        let report = Report {
            range: "week".to_string(),
            window: Some(Window {
                start: date(2024, 3, 4),
                end: date(2024, 3, 10),
            }),
            totals: Totals {
                total_secs: 3000,
                session_count: 2,
            },
            histogram: vec![],
            top_goals: vec![GoalSummary {
                goal_id: "gone".to_string(),
                title: None,
                tags: vec![],
                total_secs: 3000,
            }],
            tag_totals: vec![],
            current_streak: 1,
            longest_streak: 2,
        };
        let output = report.to_string();
        assert!(output.contains("# Report: week (2024-03-04 to 2024-03-10)"));
        assert!(output.contains("- **Total**: 0:50 over 2 sessions"));
        assert!(output.contains("1. (deleted goal gone): 0:50"));
    }
}

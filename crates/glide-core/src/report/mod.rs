//! Structured progress report.
//!
//! [`ReportBuilder`] combines statistics with goal metadata into a single
//! [`Report`] value. It does no formatting and no I/O; renderers consume the
//! value (the CLI prints markdown or JSON).

use std::collections::HashMap;

use jiff::civil::Date;
use serde::Serialize;

use crate::{
    error::Result,
    models::Goal,
    stats::{Bucket, GoalTotal, Granularity, StatsEngine, StatsRange, Totals, Window},
};

/// Default number of goals listed in a report.
pub const DEFAULT_TOP_GOALS: usize = 5;

/// A goal's share of the window.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GoalSummary {
    pub goal_id: String,
    /// `None` when the goal was deleted after its sessions were recorded
    pub title: Option<String>,
    pub tags: Vec<String>,
    pub total_secs: u64,
}

/// Focused time of all goals carrying a tag.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TagTotal {
    pub tag: String,
    pub total_secs: u64,
}

/// Summary of one window of activity.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Report {
    pub range: String,
    pub window: Option<Window>,
    pub totals: Totals,
    /// One bucket per day of the window
    pub histogram: Vec<Bucket>,
    pub top_goals: Vec<GoalSummary>,
    pub tag_totals: Vec<TagTotal>,
    /// Streak as of the window end, or today if that is earlier
    pub current_streak: u32,
    pub longest_streak: u32,
}

/// Attaches goal titles and tags to per-goal totals, keeping their order.
pub fn goal_summaries(
    totals: impl IntoIterator<Item = GoalTotal>,
    goals: &[Goal],
) -> Vec<GoalSummary> {
    let by_id: HashMap<&str, &Goal> = goals.iter().map(|g| (g.id.as_str(), g)).collect();
    totals
        .into_iter()
        .map(|entry| {
            let goal = by_id.get(entry.goal_id.as_str());
            GoalSummary {
                title: goal.map(|g| g.title.clone()),
                tags: goal.map(|g| g.tags.clone()).unwrap_or_default(),
                goal_id: entry.goal_id,
                total_secs: entry.total_secs,
            }
        })
        .collect()
}

/// Builds a [`Report`] from a stats engine and the goals it refers to.
#[derive(Debug, Clone)]
pub struct ReportBuilder<'a> {
    engine: StatsEngine<'a>,
    goals: &'a [Goal],
    range: StatsRange,
    top_n: usize,
}

impl<'a> ReportBuilder<'a> {
    pub fn new(engine: StatsEngine<'a>, goals: &'a [Goal]) -> Self {
        Self {
            engine,
            goals,
            range: StatsRange::default(),
            top_n: DEFAULT_TOP_GOALS,
        }
    }

    pub fn range(mut self, range: StatsRange) -> Self {
        self.range = range;
        self
    }

    pub fn top_n(mut self, top_n: usize) -> Self {
        self.top_n = top_n;
        self
    }

    pub fn build(&self) -> Result<Report> {
        let window = self.engine.window(self.range)?;
        let by_id: HashMap<&str, &Goal> = self.goals.iter().map(|g| (g.id.as_str(), g)).collect();

        let per_goal = self.engine.per_goal_totals(self.range, self.goals, None)?;

        let mut tag_map: HashMap<&str, u64> = HashMap::new();
        for entry in &per_goal {
            if let Some(goal) = by_id.get(entry.goal_id.as_str()) {
                for tag in &goal.tags {
                    *tag_map.entry(tag.as_str()).or_default() += entry.total_secs;
                }
            }
        }
        let mut tag_totals: Vec<TagTotal> = tag_map
            .into_iter()
            .map(|(tag, total_secs)| TagTotal {
                tag: tag.to_string(),
                total_secs,
            })
            .collect();
        tag_totals.sort_by(|a, b| b.total_secs.cmp(&a.total_secs).then_with(|| a.tag.cmp(&b.tag)));

        let top_goals = goal_summaries(per_goal.into_iter().take(self.top_n), self.goals);

        let today = self.engine.today();
        let streak_day: Date = window.map_or(today, |w| w.end.min(today));

        Ok(Report {
            range: self.range.label(),
            window,
            totals: self.engine.totals(self.range)?,
            histogram: self.engine.bucket(self.range, Granularity::Day)?,
            top_goals,
            tag_totals,
            current_streak: self.engine.streak(streak_day),
            longest_streak: self.engine.longest_streak(),
        })
    }
}

#[cfg(test)]
mod tests {
    use jiff::{civil::date, tz::TimeZone, Timestamp};

    use super::*;
    use crate::models::{Priority, Session};

    fn ts(s: &str) -> Timestamp {
        s.parse().expect("valid timestamp")
    }

    fn session(goal: &str, start: &str, mins: i64) -> Session {
        let start = ts(start);
        let end = start
            .checked_add(jiff::SignedDuration::from_mins(mins))
            .expect("in range");
        Session::finalized(Some(goal.to_string()), start, end, None).expect("valid")
    }

    fn goal(id: &str, title: &str, tags: &[&str], created: &str) -> Goal {
        let tags = tags.iter().map(|t| t.to_string()).collect();
        let mut g = Goal::new(title, Priority::High, None, tags, ts(created));
        g.id = id.to_string();
        g
    }

    fn fixture() -> (Vec<Session>, Vec<Goal>) {
        let sessions = vec![
            session("novel", "2024-03-04T09:00:00Z", 50),
            session("novel", "2024-03-05T09:00:00Z", 25),
            session("run", "2024-03-05T18:00:00Z", 25),
            session("deleted", "2024-03-06T09:00:00Z", 10),
            session("run", "2024-02-20T09:00:00Z", 25),
        ];
        let goals = vec![
            goal("novel", "Write a novel", &["writing"], "2024-01-01T00:00:00Z"),
            goal("run", "Run 5k", &["health", "writing"], "2024-01-02T00:00:00Z"),
        ];
        (sessions, goals)
    }

    #[test]
    fn test_report_for_month() {
        let (sessions, goals) = fixture();
        let engine = StatsEngine::new(&sessions, date(2024, 3, 6), TimeZone::UTC);
        let report = ReportBuilder::new(engine, &goals)
            .range(StatsRange::CurrentMonth)
            .build()
            .expect("build report");

        assert_eq!(report.range, "month");
        assert_eq!(
            report.window,
            Some(Window {
                start: date(2024, 3, 1),
                end: date(2024, 3, 31)
            })
        );
        assert_eq!(report.totals.session_count, 4);
        assert_eq!(report.totals.total_secs, (50 + 25 + 25 + 10) * 60);
        assert_eq!(report.histogram.len(), 31);

        let ids: Vec<_> = report.top_goals.iter().map(|g| g.goal_id.as_str()).collect();
        assert_eq!(ids, vec!["novel", "run", "deleted"]);
        assert_eq!(report.top_goals[0].title.as_deref(), Some("Write a novel"));
        assert_eq!(report.top_goals[2].title, None);

        assert_eq!(
            report.tag_totals,
            vec![
                TagTotal {
                    tag: "writing".to_string(),
                    total_secs: 100 * 60
                },
                TagTotal {
                    tag: "health".to_string(),
                    total_secs: 25 * 60
                },
            ]
        );

        // Window ends in the future, so the streak is taken as of today.
        assert_eq!(report.current_streak, 3);
        assert_eq!(report.longest_streak, 3);
    }

    #[test]
    fn test_report_streak_as_of_window_end() {
        let (sessions, goals) = fixture();
        let engine = StatsEngine::new(&sessions, date(2024, 3, 6), TimeZone::UTC);
        let range = StatsRange::between(date(2024, 3, 1), date(2024, 3, 4)).expect("range");
        let report = ReportBuilder::new(engine, &goals)
            .range(range)
            .top_n(1)
            .build()
            .expect("build report");
        assert_eq!(report.current_streak, 1);
        assert_eq!(report.top_goals.len(), 1);
        assert_eq!(report.totals.session_count, 1);
    }

    #[test]
    fn test_report_is_deterministic() {
        let (sessions, goals) = fixture();
        let build = || {
            ReportBuilder::new(
                StatsEngine::new(&sessions, date(2024, 3, 6), TimeZone::UTC),
                &goals,
            )
            .range(StatsRange::AllTime)
            .build()
            .expect("build report")
        };
        assert_eq!(build(), build());
    }
}

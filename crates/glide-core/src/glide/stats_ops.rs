//! Statistics and report operations for Glide.

use jiff::civil::Weekday;
use serde::Serialize;

use super::Glide;
use crate::{
    error::Result,
    models::{Goal, Session},
    params::{ReportQuery, StatsQuery},
    report::{goal_summaries, GoalSummary, Report, ReportBuilder},
    stats::{Bucket, Granularity, StatsEngine, Totals, Window},
};

/// Everything the `stats` command shows for one range.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StatsSummary {
    pub range: String,
    pub window: Option<Window>,
    pub granularity: Granularity,
    pub totals: Totals,
    pub buckets: Vec<Bucket>,
    pub top_goals: Vec<GoalSummary>,
    /// Streak ending today
    pub current_streak: u32,
    pub longest_streak: u32,
    pub average_per_day_secs: f64,
    pub most_productive_weekday: Option<&'static str>,
}

impl Glide {
    /// Sessions and goals from one consistent snapshot.
    async fn history(&self) -> Result<(Vec<Session>, Vec<Goal>)> {
        self.with_store(|store| {
            store.read(|snapshot| {
                Ok((
                    snapshot.documents::<Session>()?,
                    snapshot.documents::<Goal>()?,
                ))
            })
        })
        .await
    }

    pub async fn stats(&self, params: &StatsQuery) -> Result<StatsSummary> {
        let (sessions, goals) = self.history().await?;
        let engine = StatsEngine::local(&sessions);
        let range = params.range;

        let per_goal = engine.per_goal_totals(range, &goals, Some(params.top_goals))?;

        Ok(StatsSummary {
            range: range.label(),
            window: engine.window(range)?,
            granularity: params.granularity,
            totals: engine.totals(range)?,
            buckets: engine.bucket(range, params.granularity)?,
            top_goals: goal_summaries(per_goal, &goals),
            current_streak: engine.streak(engine.today()),
            longest_streak: engine.longest_streak(),
            average_per_day_secs: engine.average_focus_per_day(range)?,
            most_productive_weekday: engine.most_productive_weekday(range)?.map(weekday_name),
        })
    }

    pub async fn report(&self, params: &ReportQuery) -> Result<Report> {
        let (sessions, goals) = self.history().await?;
        ReportBuilder::new(StatsEngine::local(&sessions), &goals)
            .range(params.range)
            .top_n(params.top_goals)
            .build()
    }
}

fn weekday_name(day: Weekday) -> &'static str {
    match day {
        Weekday::Monday => "Monday",
        Weekday::Tuesday => "Tuesday",
        Weekday::Wednesday => "Wednesday",
        Weekday::Thursday => "Thursday",
        Weekday::Friday => "Friday",
        Weekday::Saturday => "Saturday",
        Weekday::Sunday => "Sunday",
    }
}

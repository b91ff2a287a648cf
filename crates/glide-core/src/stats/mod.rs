//! Aggregation over recorded sessions.
//!
//! Everything here is pure: the engine borrows a slice of sessions and is
//! given "today" and a time zone, so results are deterministic. A session is
//! attributed wholly to the local day its `start_time` falls on; sessions
//! crossing midnight are never split. Open sessions are ignored.

use std::collections::{BTreeSet, HashMap};

use jiff::{
    civil::{Date, Weekday},
    tz::TimeZone,
    Timestamp,
};
use serde::Serialize;

use crate::{
    error::Result,
    models::{Goal, Session},
};

pub mod bucket;
pub mod range;
pub mod streak;

pub use bucket::{Bucket, Granularity};
pub use range::{StatsRange, Window};

/// Total focused time and number of sessions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct Totals {
    pub total_secs: u64,
    pub session_count: usize,
}

/// Focused time attributed to one goal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GoalTotal {
    pub goal_id: String,
    pub total_secs: u64,
}

/// Read-only statistics over a set of sessions.
#[derive(Debug, Clone)]
pub struct StatsEngine<'a> {
    sessions: &'a [Session],
    today: Date,
    tz: TimeZone,
}

impl<'a> StatsEngine<'a> {
    pub fn new(sessions: &'a [Session], today: Date, tz: TimeZone) -> Self {
        Self {
            sessions,
            today,
            tz,
        }
    }

    /// Engine for the system time zone, with today taken from the clock.
    pub fn local(sessions: &'a [Session]) -> Self {
        let tz = TimeZone::system();
        let today = Timestamp::now().to_zoned(tz.clone()).date();
        Self::new(sessions, today, tz)
    }

    pub fn today(&self) -> Date {
        self.today
    }

    fn local_day(&self, ts: Timestamp) -> Date {
        ts.to_zoned(self.tz.clone()).date()
    }

    /// Finalized sessions with their local start day.
    fn finalized(&self) -> impl Iterator<Item = (Date, &'a Session)> + '_ {
        self.sessions
            .iter()
            .filter(|s| !s.is_open())
            .map(move |s| (self.local_day(s.start_time), s))
    }

    fn recorded_span(&self) -> Option<(Date, Date)> {
        self.finalized().fold(None, |span, (day, _)| match span {
            None => Some((day, day)),
            Some((first, last)) => Some((first.min(day), last.max(day))),
        })
    }

    fn active_days(&self) -> BTreeSet<Date> {
        self.finalized()
            .filter(|(_, s)| s.completed)
            .map(|(day, _)| day)
            .collect()
    }

    /// Day window of `range`; `None` for all-time without sessions.
    pub fn window(&self, range: StatsRange) -> Result<Option<Window>> {
        range.window(self.today, self.recorded_span())
    }

    fn in_window(&self, range: StatsRange) -> Result<Vec<(Date, &'a Session)>> {
        Ok(match self.window(range)? {
            Some(window) => self
                .finalized()
                .filter(|(day, _)| window.contains(*day))
                .collect(),
            None => Vec::new(),
        })
    }

    pub fn totals(&self, range: StatsRange) -> Result<Totals> {
        let sessions = self.in_window(range)?;
        Ok(Totals {
            total_secs: sessions.iter().map(|(_, s)| s.duration_secs).sum(),
            session_count: sessions.len(),
        })
    }

    /// One bucket per period in the window, ascending, empty ones included.
    pub fn bucket(&self, range: StatsRange, granularity: Granularity) -> Result<Vec<Bucket>> {
        let Some(window) = self.window(range)? else {
            return Ok(Vec::new());
        };

        let mut buckets: Vec<Bucket> = Vec::new();
        let mut index: HashMap<String, usize> = HashMap::new();
        for day in window.days() {
            let label = granularity.label(day);
            if !index.contains_key(&label) {
                index.insert(label.clone(), buckets.len());
                buckets.push(Bucket {
                    label,
                    total_secs: 0,
                });
            }
        }

        for (day, session) in self.in_window(range)? {
            if let Some(&i) = index.get(&granularity.label(day)) {
                buckets[i].total_secs += session.duration_secs;
            }
        }
        Ok(buckets)
    }

    /// Consecutive days with a completed session, ending at `as_of`.
    pub fn streak(&self, as_of: Date) -> u32 {
        streak::current_streak(&self.active_days(), as_of)
    }

    pub fn longest_streak(&self) -> u32 {
        streak::longest_streak(&self.active_days())
    }

    /// Time per goal, largest first, at most `top_n` entries.
    ///
    /// Equal totals are ordered by goal creation; sessions whose goal no
    /// longer exists come after known goals and are ordered by id.
    pub fn per_goal_totals(
        &self,
        range: StatsRange,
        goals: &[Goal],
        top_n: Option<usize>,
    ) -> Result<Vec<GoalTotal>> {
        let mut totals: HashMap<&str, u64> = HashMap::new();
        for (_, session) in self.in_window(range)? {
            if let Some(goal_id) = session.goal_id.as_deref() {
                *totals.entry(goal_id).or_default() += session.duration_secs;
            }
        }

        let created: HashMap<&str, Timestamp> =
            goals.iter().map(|g| (g.id.as_str(), g.created_at)).collect();

        let mut ranked: Vec<GoalTotal> = totals
            .into_iter()
            .map(|(goal_id, total_secs)| GoalTotal {
                goal_id: goal_id.to_string(),
                total_secs,
            })
            .collect();
        ranked.sort_by(|a, b| {
            b.total_secs.cmp(&a.total_secs).then_with(|| {
                match (
                    created.get(a.goal_id.as_str()),
                    created.get(b.goal_id.as_str()),
                ) {
                    (Some(x), Some(y)) => x.cmp(y).then_with(|| a.goal_id.cmp(&b.goal_id)),
                    (Some(_), None) => std::cmp::Ordering::Less,
                    (None, Some(_)) => std::cmp::Ordering::Greater,
                    (None, None) => a.goal_id.cmp(&b.goal_id),
                }
            })
        });
        if let Some(n) = top_n {
            ranked.truncate(n);
        }
        Ok(ranked)
    }

    /// Mean focused seconds per day of the window.
    pub fn average_focus_per_day(&self, range: StatsRange) -> Result<f64> {
        let Some(window) = self.window(range)? else {
            return Ok(0.0);
        };
        let total = self.totals(range)?.total_secs;
        let days = window.day_count();
        Ok(if days == 0 {
            0.0
        } else {
            total as f64 / days as f64
        })
    }

    /// Weekday with the most focused time; ties go to the earlier weekday.
    pub fn most_productive_weekday(&self, range: StatsRange) -> Result<Option<Weekday>> {
        let mut totals = [0u64; 7];
        for (day, session) in self.in_window(range)? {
            let slot = usize::try_from(day.weekday().to_monday_zero_offset()).unwrap_or(0);
            totals[slot] += session.duration_secs;
        }
        let best = totals
            .iter()
            .enumerate()
            .filter(|(_, total)| **total > 0)
            .fold(None::<(usize, u64)>, |best, (i, &total)| match best {
                Some((_, b)) if b >= total => best,
                _ => Some((i, total)),
            });
        Ok(best.map(|(i, _)| {
            Weekday::from_monday_zero_offset(i8::try_from(i).unwrap_or(0))
                .unwrap_or(Weekday::Monday)
        }))
    }
}

#[cfg(test)]
mod tests {
    use jiff::{civil::date, tz};

    use super::*;
    use crate::models::Priority;

    fn ts(s: &str) -> Timestamp {
        s.parse().expect("valid timestamp")
    }

    fn session(goal: Option<&str>, start: &str, end: &str) -> Session {
        let mut s = Session::finalized(goal.map(String::from), ts(start), ts(end), None)
            .expect("valid session");
        s.id = format!("s-{start}");
        s
    }

    fn goal(id: &str, created: &str) -> Goal {
        let mut g = Goal::new(id, Priority::Medium, None, vec![], ts(created));
        g.id = id.to_string();
        g
    }

    fn utc_engine(sessions: &[Session], today: Date) -> StatsEngine<'_> {
        StatsEngine::new(sessions, today, TimeZone::UTC)
    }

    #[test]
    fn test_session_crossing_midnight_stays_in_start_day() {
        let sessions = vec![session(
            None,
            "2024-03-04T23:59:00Z",
            "2024-03-05T00:05:00Z",
        )];
        let engine = utc_engine(&sessions, date(2024, 3, 6));
        let range = StatsRange::between(date(2024, 3, 4), date(2024, 3, 5)).expect("range");
        let buckets = engine.bucket(range, Granularity::Day).expect("bucket");
        assert_eq!(
            buckets,
            vec![
                Bucket {
                    label: "2024-03-04".to_string(),
                    total_secs: 360
                },
                Bucket {
                    label: "2024-03-05".to_string(),
                    total_secs: 0
                },
            ]
        );
    }

    #[test]
    fn test_local_time_zone_decides_the_day() {
        // 23:30 UTC is already the next day at UTC+2.
        let sessions = vec![session(
            None,
            "2024-03-04T23:30:00Z",
            "2024-03-04T23:55:00Z",
        )];
        let engine = StatsEngine::new(
            &sessions,
            date(2024, 3, 5),
            TimeZone::fixed(tz::offset(2)),
        );
        assert_eq!(engine.streak(date(2024, 3, 5)), 1);
        assert_eq!(engine.streak(date(2024, 3, 4)), 0);
    }

    #[test]
    fn test_totals_for_current_week_and_month() {
        let sessions = vec![
            session(Some("a"), "2024-03-04T10:00:00Z", "2024-03-04T10:25:00Z"),
            session(Some("a"), "2024-03-10T10:00:00Z", "2024-03-10T10:25:00Z"),
            session(Some("b"), "2024-03-11T10:00:00Z", "2024-03-11T10:50:00Z"),
            session(Some("b"), "2024-02-29T10:00:00Z", "2024-02-29T10:50:00Z"),
        ];
        // Wednesday of ISO week 10.
        let engine = utc_engine(&sessions, date(2024, 3, 6));

        let week = engine.totals(StatsRange::CurrentWeek).expect("totals");
        assert_eq!(week.session_count, 2);
        assert_eq!(week.total_secs, 3000);

        let month = engine.totals(StatsRange::CurrentMonth).expect("totals");
        assert_eq!(month.session_count, 3);
        assert_eq!(month.total_secs, 6000);

        let all = engine.totals(StatsRange::AllTime).expect("totals");
        assert_eq!(all.session_count, 4);
    }

    #[test]
    fn test_open_sessions_are_ignored() {
        let mut open = session(None, "2024-03-04T10:00:00Z", "2024-03-04T10:25:00Z");
        open.end_time = None;
        let sessions = vec![open];
        let engine = utc_engine(&sessions, date(2024, 3, 4));
        assert_eq!(
            engine.totals(StatsRange::AllTime).expect("totals"),
            Totals::default()
        );
    }

    #[test]
    fn test_week_buckets_fill_gaps() {
        let sessions = vec![
            session(None, "2024-03-04T10:00:00Z", "2024-03-04T10:25:00Z"),
            session(None, "2024-03-20T10:00:00Z", "2024-03-20T10:25:00Z"),
        ];
        let engine = utc_engine(&sessions, date(2024, 3, 24));
        let buckets = engine
            .bucket(StatsRange::AllTime, Granularity::Week)
            .expect("bucket");
        let labels: Vec<_> = buckets.iter().map(|b| b.label.as_str()).collect();
        assert_eq!(labels, vec!["2024-W10", "2024-W11", "2024-W12"]);
        assert_eq!(buckets[1].total_secs, 0);
    }

    #[test]
    fn test_all_time_without_sessions_is_empty() {
        let engine = utc_engine(&[], date(2024, 3, 24));
        assert!(engine
            .bucket(StatsRange::AllTime, Granularity::Month)
            .expect("bucket")
            .is_empty());
        assert_eq!(engine.window(StatsRange::AllTime).expect("window"), None);
    }

    #[test]
    fn test_inverted_range_is_rejected() {
        assert!(StatsRange::between(date(2024, 3, 5), date(2024, 3, 4)).is_err());
    }

    #[test]
    fn test_streaks() {
        let sessions = vec![
            session(None, "2024-03-08T10:00:00Z", "2024-03-08T10:25:00Z"),
            session(None, "2024-03-09T10:00:00Z", "2024-03-09T10:25:00Z"),
            session(None, "2024-03-10T10:00:00Z", "2024-03-10T10:25:00Z"),
        ];
        let engine = utc_engine(&sessions, date(2024, 3, 10));
        assert_eq!(engine.streak(date(2024, 3, 10)), 3);

        let without_middle = vec![sessions[0].clone(), sessions[2].clone()];
        let engine = utc_engine(&without_middle, date(2024, 3, 10));
        assert_eq!(engine.streak(date(2024, 3, 10)), 1);
        assert_eq!(engine.longest_streak(), 1);
    }

    #[test]
    fn test_per_goal_totals_ordering() {
        let sessions = vec![
            session(Some("late"), "2024-03-04T10:00:00Z", "2024-03-04T10:25:00Z"),
            session(Some("early"), "2024-03-04T11:00:00Z", "2024-03-04T11:25:00Z"),
            session(Some("gone"), "2024-03-04T12:00:00Z", "2024-03-04T12:25:00Z"),
            session(Some("big"), "2024-03-04T13:00:00Z", "2024-03-04T14:00:00Z"),
            session(None, "2024-03-04T15:00:00Z", "2024-03-04T16:00:00Z"),
        ];
        let goals = vec![
            goal("late", "2024-02-02T00:00:00Z"),
            goal("early", "2024-02-01T00:00:00Z"),
            goal("big", "2024-02-03T00:00:00Z"),
        ];
        let engine = utc_engine(&sessions, date(2024, 3, 4));
        let ranked = engine
            .per_goal_totals(StatsRange::AllTime, &goals, None)
            .expect("per goal");
        let ids: Vec<_> = ranked.iter().map(|g| g.goal_id.as_str()).collect();
        assert_eq!(ids, vec!["big", "early", "late", "gone"]);

        let top = engine
            .per_goal_totals(StatsRange::AllTime, &goals, Some(2))
            .expect("per goal");
        assert_eq!(top.len(), 2);
    }

    #[test]
    fn test_average_and_weekday() {
        let sessions = vec![
            // Monday and Tuesday
            session(None, "2024-03-04T10:00:00Z", "2024-03-04T11:00:00Z"),
            session(None, "2024-03-05T10:00:00Z", "2024-03-05T12:00:00Z"),
        ];
        let engine = utc_engine(&sessions, date(2024, 3, 6));
        let avg = engine
            .average_focus_per_day(StatsRange::CurrentWeek)
            .expect("average");
        assert!((avg - 10800.0 / 7.0).abs() < 1e-9);
        assert_eq!(
            engine
                .most_productive_weekday(StatsRange::CurrentWeek)
                .expect("weekday"),
            Some(Weekday::Tuesday)
        );
        assert_eq!(
            utc_engine(&[], date(2024, 3, 6))
                .most_productive_weekday(StatsRange::AllTime)
                .expect("weekday"),
            None
        );
    }
}

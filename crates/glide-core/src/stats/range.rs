//! Calendar windows for aggregation.

use jiff::{civil::Date, ToSpan};
use serde::{Deserialize, Serialize};

use crate::error::{GlideError, Result};

/// Period a statistic covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StatsRange {
    /// ISO week (Monday to Sunday) containing today
    #[default]
    CurrentWeek,
    /// Calendar month containing today
    CurrentMonth,
    /// First recorded session through today or the last session
    AllTime,
    /// Explicit range, both days included
    Between { from: Date, to: Date },
}

impl StatsRange {
    /// Explicit range; `from` after `to` is rejected.
    pub fn between(from: Date, to: Date) -> Result<Self> {
        if from > to {
            return Err(GlideError::invalid_input("range")
                .with_reason(format!("start {from} is after end {to}")));
        }
        Ok(StatsRange::Between { from, to })
    }

    pub fn label(&self) -> String {
        match self {
            StatsRange::CurrentWeek => "week".to_string(),
            StatsRange::CurrentMonth => "month".to_string(),
            StatsRange::AllTime => "all".to_string(),
            StatsRange::Between { from, to } => format!("{from}..{to}"),
        }
    }

    /// Inclusive day window. `recorded` is the first and last day with a
    /// session; all-time without sessions has no window.
    pub fn window(&self, today: Date, recorded: Option<(Date, Date)>) -> Result<Option<Window>> {
        let window = match *self {
            StatsRange::CurrentWeek => {
                let offset = i64::from(today.weekday().to_monday_zero_offset());
                let start = shift(today, -offset)?;
                Window {
                    start,
                    end: shift(start, 6)?,
                }
            }
            StatsRange::CurrentMonth => Window {
                start: today.first_of_month(),
                end: today.last_of_month(),
            },
            StatsRange::AllTime => match recorded {
                Some((first, last)) => Window {
                    start: first,
                    end: today.max(last),
                },
                None => return Ok(None),
            },
            StatsRange::Between { from, to } => Window {
                start: from,
                end: to,
            },
        };
        Ok(Some(window))
    }
}

/// Inclusive range of local calendar days.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Window {
    pub start: Date,
    pub end: Date,
}

impl Window {
    pub fn contains(&self, day: Date) -> bool {
        self.start <= day && day <= self.end
    }

    /// Every day in the window, ascending.
    pub fn days(&self) -> impl Iterator<Item = Date> {
        let end = self.end;
        self.start.series(1.day()).take_while(move |d| *d <= end)
    }

    pub fn day_count(&self) -> usize {
        self.days().count()
    }
}

/// `day` moved by `days`, failing outside the supported calendar.
pub(crate) fn shift(day: Date, days: i64) -> Result<Date> {
    day.checked_add(days.days())
        .map_err(|e| GlideError::invalid_input("date").with_reason(e.to_string()))
}

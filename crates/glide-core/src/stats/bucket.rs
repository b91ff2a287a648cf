//! Bucket granularity and labels.

use std::fmt;

use jiff::civil::Date;
use serde::{Deserialize, Serialize};

/// Size of a histogram bucket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Granularity {
    #[default]
    Day,
    Week,
    Month,
}

impl Granularity {
    /// Label of the bucket containing `day`: `YYYY-MM-DD`, ISO `YYYY-Www`
    /// or `YYYY-MM`.
    pub fn label(&self, day: Date) -> String {
        match self {
            Granularity::Day => day.strftime("%Y-%m-%d").to_string(),
            Granularity::Week => {
                let iso = day.iso_week_date();
                format!("{:04}-W{:02}", iso.year(), iso.week())
            }
            Granularity::Month => day.strftime("%Y-%m").to_string(),
        }
    }
}

impl fmt::Display for Granularity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Granularity::Day => "day",
            Granularity::Week => "week",
            Granularity::Month => "month",
        })
    }
}

/// Focused time in one bucket.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bucket {
    pub label: String,
    pub total_secs: u64,
}

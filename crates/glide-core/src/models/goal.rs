//! Goal model definition and tag rules.

use jiff::{civil::Date, Timestamp, ToSpan};
use serde::{Deserialize, Serialize};

use super::Priority;
use crate::error::{GlideError, Result};

/// Maximum tag length, first character included.
const MAX_TAG_LEN: usize = 30;

/// A tracked personal objective.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Goal {
    /// Opaque identifier assigned by the store
    #[serde(default)]
    pub id: String,

    /// Title of the goal
    pub title: String,

    /// Priority of the goal
    #[serde(default)]
    pub priority: Priority,

    /// Tags, kept sorted and de-duplicated
    #[serde(default)]
    pub tags: Vec<String>,

    /// Timestamp when the goal was created (UTC)
    pub created_at: Timestamp,

    /// Timestamp when the goal was last modified (UTC)
    pub updated_at: Timestamp,

    /// Archived goals are hidden from default listings
    #[serde(default)]
    pub archived: bool,

    /// Optional calendar deadline
    #[serde(default)]
    pub deadline: Option<Date>,
}

impl Goal {
    /// Builds a new, unsaved goal. The id is assigned on insert.
    pub fn new(
        title: &str,
        priority: Priority,
        deadline: Option<Date>,
        tags: Vec<String>,
        now: Timestamp,
    ) -> Self {
        Self {
            id: String::new(),
            title: title.trim().to_string(),
            priority,
            tags,
            created_at: now,
            updated_at: now,
            archived: false,
            deadline,
        }
    }

    /// True when the deadline lies strictly before `today`.
    pub fn is_overdue(&self, today: Date) -> bool {
        self.deadline.is_some_and(|d| d < today)
    }

    /// True when the deadline falls within `[today, today + days]`.
    pub fn is_due_within(&self, today: Date, days: i64) -> bool {
        let Some(deadline) = self.deadline else {
            return false;
        };
        match today.checked_add(days.days()) {
            Ok(limit) => deadline >= today && deadline <= limit,
            Err(_) => deadline >= today,
        }
    }

    /// Checks field-level invariants.
    pub fn validate(&self) -> Result<()> {
        validate_title(&self.title)?;
        for tag in &self.tags {
            if normalize_tag(tag)? != *tag {
                return Err(GlideError::invalid_input("tags")
                    .with_reason(format!("tag '{tag}' is not normalized")));
            }
        }
        Ok(())
    }
}

/// Rejects empty or whitespace-only titles.
pub fn validate_title(title: &str) -> Result<()> {
    if title.trim().is_empty() {
        return Err(GlideError::invalid_input("title").with_reason("Title cannot be empty"));
    }
    Ok(())
}

/// Lower-cases a tag and checks it against `[a-z0-9][a-z0-9_-]{0,29}`.
pub fn normalize_tag(tag: &str) -> Result<String> {
    let tag = tag.trim().to_lowercase();
    let mut chars = tag.chars();
    let valid_head = chars
        .next()
        .is_some_and(|c| c.is_ascii_lowercase() || c.is_ascii_digit());
    let valid_tail =
        chars.all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-' || c == '_');

    if !valid_head || !valid_tail || tag.len() > MAX_TAG_LEN {
        return Err(GlideError::invalid_input("tag").with_reason(format!(
            "Invalid tag '{tag}'. Tags must start with a letter or digit and contain at most \
             {MAX_TAG_LEN} of [a-z0-9_-]"
        )));
    }
    Ok(tag)
}

/// Normalizes every tag, then sorts and de-duplicates.
pub fn normalize_tags<I, S>(tags: I) -> Result<Vec<String>>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut normalized = tags
        .into_iter()
        .map(|t| normalize_tag(t.as_ref()))
        .collect::<Result<Vec<_>>>()?;
    normalized.sort();
    normalized.dedup();
    Ok(normalized)
}

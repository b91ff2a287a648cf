//! Thought (short reflection) document.

use jiff::Timestamp;
use serde::{Deserialize, Serialize};

use crate::error::{GlideError, Result};

/// Longest accepted thought, in characters.
pub const MAX_THOUGHT_CHARS: usize = 500;

/// A short note, optionally attached to a goal.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Thought {
    #[serde(default)]
    pub id: String,
    pub text: String,
    #[serde(default)]
    pub goal_id: Option<String>,
    pub created_at: Timestamp,
}

impl Thought {
    pub fn new(text: &str, goal_id: Option<String>, now: Timestamp) -> Self {
        Self {
            id: String::new(),
            text: text.trim().to_string(),
            goal_id,
            created_at: now,
        }
    }

    pub fn validate(&self) -> Result<()> {
        let text = self.text.trim();
        if text.is_empty() {
            return Err(GlideError::invalid_input("text").with_reason("Thought cannot be empty"));
        }
        if text.chars().count() > MAX_THOUGHT_CHARS {
            return Err(GlideError::invalid_input("text").with_reason(format!(
                "Thought must be {MAX_THOUGHT_CHARS} characters or less"
            )));
        }
        Ok(())
    }
}

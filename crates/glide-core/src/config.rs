//! TOML-based user configuration.
//!
//! The file is optional and read-only for the core: a missing file yields
//! the defaults, a malformed one is a [`GlideError::Configuration`].

use std::{path::Path, time::Duration};

use jiff::SignedDuration;
use serde::{Deserialize, Serialize};

use crate::{
    error::{GlideError, Result},
    store::LockPolicy,
};

/// User preferences and engine thresholds.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Config {
    /// Length of a pomodoro when none is given
    #[serde(default = "default_pomodoro_minutes")]
    pub pomodoro_duration_minutes: u32,
    /// Running sessions older than this are considered abandoned
    #[serde(default = "default_max_session_minutes")]
    pub max_session_minutes: u32,
    #[serde(default = "default_lock_timeout_ms")]
    pub lock_timeout_ms: u64,
    #[serde(default = "default_lock_stale_after_secs")]
    pub lock_stale_after_secs: u64,
    #[serde(default = "default_true")]
    pub quotes_enabled: bool,
    #[serde(default)]
    pub reminders_enabled: bool,
    #[serde(default = "default_reminder_break")]
    pub reminder_break_minutes: u32,
    #[serde(default = "default_reminder_interval")]
    pub reminder_interval_minutes: u32,
}

fn default_pomodoro_minutes() -> u32 {
    25
}
fn default_max_session_minutes() -> u32 {
    240
}
fn default_lock_timeout_ms() -> u64 {
    5000
}
fn default_lock_stale_after_secs() -> u64 {
    30
}
fn default_true() -> bool {
    true
}
fn default_reminder_break() -> u32 {
    5
}
fn default_reminder_interval() -> u32 {
    30
}

impl Default for Config {
    fn default() -> Self {
        Self {
            pomodoro_duration_minutes: default_pomodoro_minutes(),
            max_session_minutes: default_max_session_minutes(),
            lock_timeout_ms: default_lock_timeout_ms(),
            lock_stale_after_secs: default_lock_stale_after_secs(),
            quotes_enabled: true,
            reminders_enabled: false,
            reminder_break_minutes: default_reminder_break(),
            reminder_interval_minutes: default_reminder_interval(),
        }
    }
}

impl Config {
    /// Loads the configuration at `path`, falling back to defaults when the
    /// file does not exist.
    pub fn load(path: &Path) -> Result<Self> {
        let content = match std::fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                log::debug!("No config at {}, using defaults", path.display());
                return Ok(Self::default());
            }
            Err(source) => {
                return Err(GlideError::FileSystem {
                    path: path.to_path_buf(),
                    source,
                })
            }
        };
        let config: Self = toml::from_str(&content).map_err(|e| GlideError::Configuration {
            message: format!("{}: {e}", path.display()),
        })?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        if self.pomodoro_duration_minutes == 0 {
            return Err(GlideError::Configuration {
                message: "pomodoro_duration_minutes must be at least 1".to_string(),
            });
        }
        if self.max_session_minutes < self.pomodoro_duration_minutes {
            return Err(GlideError::Configuration {
                message: "max_session_minutes must not be below pomodoro_duration_minutes"
                    .to_string(),
            });
        }
        if self.lock_timeout_ms == 0 {
            return Err(GlideError::Configuration {
                message: "lock_timeout_ms must be at least 1".to_string(),
            });
        }
        if self.lock_stale_after_secs == 0 {
            return Err(GlideError::Configuration {
                message: "lock_stale_after_secs must be at least 1".to_string(),
            });
        }
        Ok(())
    }

    /// Default pomodoro length.
    pub fn default_pomodoro(&self) -> SignedDuration {
        SignedDuration::from_mins(i64::from(self.pomodoro_duration_minutes))
    }

    /// Staleness bound for a running session.
    pub fn max_session(&self) -> SignedDuration {
        SignedDuration::from_mins(i64::from(self.max_session_minutes))
    }

    /// Lock acquisition settings shared by the store and the state slot.
    pub fn lock_policy(&self) -> LockPolicy {
        LockPolicy {
            timeout: Duration::from_millis(self.lock_timeout_ms),
            stale_after: Duration::from_secs(self.lock_stale_after_secs),
            ..LockPolicy::default()
        }
    }

    /// Renders the effective configuration as TOML.
    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self).map_err(|e| GlideError::Configuration {
            message: e.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use tempfile::TempDir;

    use super::*;

    #[test]
    fn test_missing_file_uses_defaults() {
        let dir = TempDir::new().expect("Failed to create temp dir");
        let config = Config::load(&dir.path().join("config.toml")).expect("load");
        assert_eq!(config, Config::default());
        assert_eq!(config.default_pomodoro(), SignedDuration::from_mins(25));
        assert_eq!(config.max_session(), SignedDuration::from_mins(240));
        assert!(config.quotes_enabled);
        assert!(!config.reminders_enabled);
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let dir = TempDir::new().expect("Failed to create temp dir");
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "pomodoro_duration_minutes = 50\nlock_timeout_ms = 100\n")
            .expect("write");
        let config = Config::load(&path).expect("load");
        assert_eq!(config.pomodoro_duration_minutes, 50);
        assert_eq!(config.lock_policy().timeout, Duration::from_millis(100));
        assert_eq!(config.reminder_interval_minutes, 30);
    }

    #[test]
    fn test_malformed_file_is_configuration_error() {
        let dir = TempDir::new().expect("Failed to create temp dir");
        let path = dir.path().join("config.toml");
        for content in [
            "pomodoro_duration_minutes = \"lots\"",
            "lock_stale_after_secs = 0",
            "lock_timeout_ms = 0",
        ] {
            std::fs::write(&path, content).expect("write");
            assert!(
                matches!(Config::load(&path), Err(GlideError::Configuration { .. })),
                "{content} should be rejected"
            );
        }
    }

    #[test]
    fn test_to_toml_roundtrips() {
        let config = Config::default();
        let text = config.to_toml().expect("render");
        assert!(text.contains("max_session_minutes = 240"));
        let parsed: Config = toml::from_str(&text).expect("parse");
        assert_eq!(parsed, config);
    }
}

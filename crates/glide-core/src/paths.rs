//! Data directory layout.

use std::path::{Path, PathBuf};

use crate::error::{FsResultExt, GlideError, Result};

const APP_PREFIX: &str = "goal-glide";
const DB_FILE: &str = "db.json";
const SESSION_FILE: &str = "session.json";
const CONFIG_FILE: &str = "config.toml";

/// Files under one Goal Glide data directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GlidePaths {
    base_dir: PathBuf,
}

impl GlidePaths {
    /// Layout rooted at an explicit directory.
    pub fn new(base_dir: impl Into<PathBuf>) -> Self {
        Self {
            base_dir: base_dir.into(),
        }
    }

    /// Layout rooted at `$XDG_DATA_HOME/goal-glide` (or
    /// `~/.local/share/goal-glide`).
    pub fn xdg_default() -> Result<Self> {
        let db_path = xdg::BaseDirectories::with_prefix(APP_PREFIX)
            .place_data_file(DB_FILE)
            .map_err(|e| GlideError::XdgDirectory(e.to_string()))?;
        let base_dir = db_path
            .parent()
            .ok_or_else(|| GlideError::XdgDirectory("data file has no parent".to_string()))?
            .to_path_buf();
        Ok(Self { base_dir })
    }

    /// Explicit directory if given, XDG default otherwise.
    pub fn resolve(base_dir: Option<PathBuf>) -> Result<Self> {
        match base_dir {
            Some(dir) => Ok(Self::new(dir)),
            None => Self::xdg_default(),
        }
    }

    /// Creates the base directory if it does not exist yet.
    pub fn ensure_dir(&self) -> Result<()> {
        std::fs::create_dir_all(&self.base_dir).fs_context(&self.base_dir)
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    /// Collections file.
    pub fn db_file(&self) -> PathBuf {
        self.base_dir.join(DB_FILE)
    }

    /// Pomodoro state slot.
    pub fn session_file(&self) -> PathBuf {
        self.base_dir.join(SESSION_FILE)
    }

    /// Default configuration file location.
    pub fn config_file(&self) -> PathBuf {
        self.base_dir.join(CONFIG_FILE)
    }
}

/// Lock marker path for a guarded file (`db.json` -> `db.json.lock`).
pub fn lock_path(file: &Path) -> PathBuf {
    let mut name = file.as_os_str().to_os_string();
    name.push(".lock");
    PathBuf::from(name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_layout() {
        let paths = GlidePaths::new("/tmp/glide");
        assert_eq!(paths.db_file(), PathBuf::from("/tmp/glide/db.json"));
        assert_eq!(paths.session_file(), PathBuf::from("/tmp/glide/session.json"));
        assert_eq!(paths.config_file(), PathBuf::from("/tmp/glide/config.toml"));
        assert_eq!(
            lock_path(&paths.db_file()),
            PathBuf::from("/tmp/glide/db.json.lock")
        );
    }

    #[test]
    fn test_resolve_explicit() {
        let paths = GlidePaths::resolve(Some(PathBuf::from("/data"))).expect("resolve");
        assert_eq!(paths.base_dir(), Path::new("/data"));
    }
}

//! Builder for creating and configuring Glide instances.

use std::path::{Path, PathBuf};

use tokio::task;

use super::Glide;
use crate::{
    config::Config,
    error::{GlideError, Result},
    paths::GlidePaths,
    store::Store,
};

/// Builder for creating and configuring Glide instances.
#[derive(Debug, Clone, Default)]
pub struct GlideBuilder {
    base_dir: Option<PathBuf>,
    config_path: Option<PathBuf>,
    config: Option<Config>,
}

impl GlideBuilder {
    /// Creates a new builder with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the data directory holding `db.json` and `session.json`.
    ///
    /// If not specified, uses XDG Base Directory specification:
    /// `$XDG_DATA_HOME/goal-glide` or `~/.local/share/goal-glide`
    pub fn with_base_dir<P: AsRef<Path>>(mut self, dir: Option<P>) -> Self {
        if let Some(dir) = dir {
            self.base_dir = Some(dir.as_ref().to_path_buf());
        }
        self
    }

    /// Sets the configuration file. Defaults to `config.toml` in the data
    /// directory.
    pub fn with_config_path<P: AsRef<Path>>(mut self, path: Option<P>) -> Self {
        if let Some(path) = path {
            self.config_path = Some(path.as_ref().to_path_buf());
        }
        self
    }

    /// Uses `config` instead of reading a file.
    pub fn with_config(mut self, config: Config) -> Self {
        self.config = Some(config);
        self
    }

    /// Builds the configured instance.
    ///
    /// # Errors
    ///
    /// Returns `GlideError::XdgDirectory` if no data directory can be found,
    /// `GlideError::FileSystem` if it cannot be created and
    /// `GlideError::Configuration` for a malformed config file.
    pub async fn build(self) -> Result<Glide> {
        task::spawn_blocking(move || {
            let paths = GlidePaths::resolve(self.base_dir)?;
            let config = match self.config {
                Some(config) => config,
                None => {
                    let path = self.config_path.unwrap_or_else(|| paths.config_file());
                    Config::load(&path)?
                }
            };
            let store = Store::open(&paths, config.lock_policy())?;
            log::debug!("Using data directory {}", paths.base_dir().display());
            Ok(Glide::new(paths, config, store))
        })
        .await
        .map_err(|e| GlideError::Configuration {
            message: format!("Task join error: {e}"),
        })?
    }
}

//! Error types for the Goal Glide core.

use std::path::{Path, PathBuf};

use jiff::Timestamp;
use thiserror::Error;

/// Comprehensive error type for all store, lifecycle and aggregation
/// operations.
#[derive(Error, Debug)]
pub enum GlideError {
    /// Unknown goal, session or thought id
    #[error("{kind} with ID {id} not found")]
    NotFound { kind: &'static str, id: String },
    /// Archiving an archived goal, or targeting one with a new session
    #[error("Goal {id} is archived")]
    AlreadyArchived { id: String },
    /// Restoring a goal that is not archived
    #[error("Goal {id} is not archived")]
    NotArchived { id: String },
    /// Invalid input validation errors
    #[error("Invalid input for field '{field}': {reason}")]
    Validation { field: String, reason: String },
    /// A pomodoro session is already running
    #[error("A session is already running (started at {started_at})")]
    AlreadyRunning { started_at: Timestamp },
    /// Stop requested while no session is running
    #[error("No active session")]
    NoActiveSession,
    /// Exclusive access could not be acquired within the bound
    #[error("Timed out after {waited_ms}ms waiting for lock '{path}'")]
    LockTimeout { path: PathBuf, waited_ms: u64 },
    /// On-disk document file is not well-formed
    #[error("Corrupt store file '{path}': {reason}")]
    CorruptStore { path: PathBuf, reason: String },
    /// File system operation errors
    #[error("File system error at path '{path}': {source}")]
    FileSystem {
        path: PathBuf,
        source: std::io::Error,
    },
    /// XDG directory specification errors
    #[error("XDG directory error: {0}")]
    XdgDirectory(String),
    /// Serialization/deserialization errors
    #[error("Serialization error: {source}")]
    Serialization {
        #[from]
        source: serde_json::Error,
    },
    /// Configuration errors
    #[error("Configuration error: {message}")]
    Configuration { message: String },
}

/// Builder for creating input validation errors.
pub struct InvalidInputBuilder {
    field: String,
}

impl InvalidInputBuilder {
    /// Create a new invalid input error builder for a field.
    pub fn new(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
        }
    }

    /// Build the error with the given reason.
    pub fn with_reason(self, reason: impl Into<String>) -> GlideError {
        GlideError::Validation {
            field: self.field,
            reason: reason.into(),
        }
    }
}

impl GlideError {
    /// Creates a builder for input validation errors.
    pub fn invalid_input(field: impl Into<String>) -> InvalidInputBuilder {
        InvalidInputBuilder::new(field)
    }

    /// Not-found error for a goal id.
    pub fn goal_not_found(id: impl Into<String>) -> Self {
        Self::NotFound {
            kind: "Goal",
            id: id.into(),
        }
    }

    /// Corrupt-store error for the file at `path`.
    pub fn corrupt(path: &Path, reason: impl Into<String>) -> Self {
        Self::CorruptStore {
            path: path.to_path_buf(),
            reason: reason.into(),
        }
    }
}

/// Extension trait attaching a path to `std::io` failures.
pub trait FsResultExt<T> {
    /// Map an I/O error to [`GlideError::FileSystem`] at `path`.
    fn fs_context(self, path: &Path) -> Result<T>;
}

impl<T> FsResultExt<T> for std::result::Result<T, std::io::Error> {
    fn fs_context(self, path: &Path) -> Result<T> {
        self.map_err(|source| GlideError::FileSystem {
            path: path.to_path_buf(),
            source,
        })
    }
}

/// Result type alias for core operations
pub type Result<T> = std::result::Result<T, GlideError>;

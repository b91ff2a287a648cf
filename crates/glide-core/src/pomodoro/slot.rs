//! The `session.json` state slot.

use std::path::{Path, PathBuf};

use crate::{
    error::{GlideError, Result},
    models::{SessionState, StateRecord},
    paths::lock_path,
    store::{atomic, lock, LockGuard, LockPolicy},
};

/// Single mutable record of the running pomodoro, overwritten in place.
#[derive(Debug, Clone)]
pub struct StateSlot {
    path: PathBuf,
    lock_path: PathBuf,
    policy: LockPolicy,
}

impl StateSlot {
    pub fn new(path: impl Into<PathBuf>, policy: LockPolicy) -> Self {
        let path = path.into();
        Self {
            lock_path: lock_path(&path),
            path,
            policy,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Takes the slot lock. Hold it across load and save.
    pub fn lock(&self) -> Result<LockGuard> {
        lock::acquire(&self.lock_path, &self.policy)
    }

    /// Current state; a missing or blank file is idle.
    pub fn load(&self, _guard: &LockGuard) -> Result<SessionState> {
        let Some(content) = atomic::read_optional(&self.path)? else {
            return Ok(SessionState::Idle);
        };
        let record: StateRecord = serde_json::from_str(&content)
            .map_err(|e| GlideError::corrupt(&self.path, format!("invalid state file: {e}")))?;
        SessionState::try_from(record).map_err(|reason| GlideError::corrupt(&self.path, reason))
    }

    pub fn save(&self, _guard: &LockGuard, state: &SessionState) -> Result<()> {
        let record = StateRecord::from(state);
        atomic::write_atomic(&self.path, &serde_json::to_vec_pretty(&record)?)
    }
}

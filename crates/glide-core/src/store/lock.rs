//! Advisory inter-process lock built on an exclusive marker file.
//!
//! The marker is created with `create_new` and records the holder's pid and
//! acquisition time. A marker is broken only when it is older than
//! [`LockPolicy::stale_after`] and its recorded pid is no longer running.

use std::{
    fs::{self, OpenOptions},
    io::{ErrorKind, Write},
    path::{Path, PathBuf},
    thread,
    time::{Duration, Instant, SystemTime},
};

use jiff::Timestamp;
use log::{debug, warn};
use serde::{Deserialize, Serialize};

use crate::error::{FsResultExt, GlideError, Result};

/// Lock acquisition settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LockPolicy {
    /// Give up with [`GlideError::LockTimeout`] after waiting this long
    pub timeout: Duration,
    /// Markers older than this are broken
    pub stale_after: Duration,
    /// Sleep between attempts
    pub poll_interval: Duration,
}

impl Default for LockPolicy {
    fn default() -> Self {
        Self {
            timeout: Duration::from_millis(5000),
            stale_after: Duration::from_secs(30),
            poll_interval: Duration::from_millis(10),
        }
    }
}

/// Liveness record written into the marker.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
struct LockRecord {
    pid: u32,
    acquired_at: Timestamp,
}

/// Held lock; the marker is removed on drop if it is still ours.
#[derive(Debug)]
pub struct LockGuard {
    path: PathBuf,
    record: LockRecord,
}

impl LockGuard {
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Drop for LockGuard {
    fn drop(&mut self) {
        // A waiter may have broken our marker and taken the lock
        let current = fs::read(&self.path)
            .ok()
            .and_then(|c| serde_json::from_slice::<LockRecord>(&c).ok());
        if current.as_ref() != Some(&self.record) {
            warn!(
                "Lock {} was taken over while held; leaving it in place",
                self.path.display()
            );
            return;
        }
        match fs::remove_file(&self.path) {
            Ok(()) => debug!("Released lock {}", self.path.display()),
            Err(e) => warn!("Failed to release lock {}: {e}", self.path.display()),
        }
    }
}

/// Blocks until the marker at `lock_path` is ours or the timeout expires.
pub fn acquire(lock_path: &Path, policy: &LockPolicy) -> Result<LockGuard> {
    let started = Instant::now();
    loop {
        match OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(lock_path)
        {
            Ok(mut file) => {
                let record = LockRecord {
                    pid: std::process::id(),
                    acquired_at: Timestamp::now(),
                };
                let bytes = serde_json::to_vec(&record)?;
                let guard = LockGuard {
                    path: lock_path.to_path_buf(),
                    record,
                };
                file.write_all(&bytes).fs_context(lock_path)?;
                file.flush().fs_context(lock_path)?;
                debug!(
                    "Acquired lock {} after {}ms",
                    lock_path.display(),
                    started.elapsed().as_millis()
                );
                return Ok(guard);
            }
            Err(e) if e.kind() == ErrorKind::AlreadyExists => {
                if is_stale(lock_path, policy.stale_after)? {
                    break_stale(lock_path, policy.stale_after)?;
                    continue;
                }
            }
            Err(e) => return Err(e).fs_context(lock_path),
        }

        let waited = started.elapsed();
        if waited >= policy.timeout {
            return Err(GlideError::LockTimeout {
                path: lock_path.to_path_buf(),
                waited_ms: u64::try_from(waited.as_millis()).unwrap_or(u64::MAX),
            });
        }
        thread::sleep(policy.poll_interval);
    }
}

/// Age and holder of the marker: from its record, or the file's mtime when
/// the record is unreadable (holder died between create and write).
fn marker_age(path: &Path) -> Result<Option<(Duration, Option<u32>)>> {
    let content = match fs::read(path) {
        Ok(content) => content,
        Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
        Err(e) => return Err(e).fs_context(path),
    };

    if let Ok(record) = serde_json::from_slice::<LockRecord>(&content) {
        let age = Timestamp::now().duration_since(record.acquired_at);
        let age = Duration::try_from(age).unwrap_or(Duration::ZERO);
        return Ok(Some((age, Some(record.pid))));
    }

    let modified = match fs::metadata(path).and_then(|m| m.modified()) {
        Ok(modified) => modified,
        Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
        Err(e) => return Err(e).fs_context(path),
    };
    let age = SystemTime::now()
        .duration_since(modified)
        .unwrap_or(Duration::ZERO);
    Ok(Some((age, None)))
}

fn is_stale(path: &Path, stale_after: Duration) -> Result<bool> {
    Ok(marker_age(path)?.is_some_and(|(age, pid)| {
        age > stale_after && !pid.is_some_and(is_process_alive)
    }))
}

#[cfg(target_os = "linux")]
fn is_process_alive(pid: u32) -> bool {
    Path::new(&format!("/proc/{pid}/stat")).exists()
}

#[cfg(all(unix, not(target_os = "linux")))]
fn is_process_alive(pid: u32) -> bool {
    std::process::Command::new("kill")
        .args(["-0", &pid.to_string()])
        .output()
        .map(|o| o.status.success())
        .unwrap_or(true)
}

// No cheap liveness probe here; only age decides.
#[cfg(not(unix))]
fn is_process_alive(_pid: u32) -> bool {
    false
}

/// Moves a stale marker aside and deletes it.
///
/// Another waiter may have broken the same marker and taken the lock in the
/// meantime; a marker that turns out to be fresh after the rename is linked
/// back into place.
fn break_stale(path: &Path, stale_after: Duration) -> Result<()> {
    let mut tombstone = path.as_os_str().to_os_string();
    tombstone.push(format!(".stale.{}", std::process::id()));
    let tombstone = PathBuf::from(tombstone);

    match fs::rename(path, &tombstone) {
        Ok(()) => {}
        Err(e) if e.kind() == ErrorKind::NotFound => return Ok(()),
        Err(e) => return Err(e).fs_context(path),
    }

    if !is_stale(&tombstone, stale_after)? {
        if let Err(e) = fs::hard_link(&tombstone, path) {
            if e.kind() != ErrorKind::AlreadyExists {
                return Err(e).fs_context(path);
            }
        }
    } else {
        let holder = fs::read(&tombstone)
            .ok()
            .and_then(|c| serde_json::from_slice::<LockRecord>(&c).ok())
            .map_or_else(|| "unknown".to_string(), |r| r.pid.to_string());
        warn!(
            "Broke stale lock {} held by pid {holder}",
            path.display()
        );
    }

    match fs::remove_file(&tombstone) {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
        Err(e) => Err(e).fs_context(&tombstone),
    }
}

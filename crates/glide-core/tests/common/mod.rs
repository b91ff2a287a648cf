#![allow(dead_code)]

use std::time::Duration;

use glide_core::{
    pomodoro::Pomodoro, store::LockPolicy, Config, Glide, GlideBuilder, GlidePaths, Store,
};
use jiff::Timestamp;
use tempfile::TempDir;

/// Helper function to create a test instance of the facade
pub async fn create_test_glide() -> (TempDir, Glide) {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let glide = GlideBuilder::new()
        .with_base_dir(Some(temp_dir.path()))
        .with_config(Config::default())
        .build()
        .await
        .expect("Failed to create glide");
    (temp_dir, glide)
}

/// Lock policy with a short timeout so contention tests finish quickly.
pub fn quick_policy() -> LockPolicy {
    LockPolicy {
        timeout: Duration::from_millis(200),
        ..LockPolicy::default()
    }
}

/// Helper function to create a store in a fresh data directory
pub fn create_test_store() -> (TempDir, Store) {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let store = Store::open(&GlidePaths::new(temp_dir.path()), LockPolicy::default())
        .expect("Failed to open store");
    (temp_dir, store)
}

/// Helper function to create a lifecycle tracker with default settings
pub fn create_test_pomodoro() -> (TempDir, Store, Pomodoro) {
    let (temp_dir, store) = create_test_store();
    let paths = GlidePaths::new(temp_dir.path());
    let pomodoro = Pomodoro::new(&paths, store.clone(), &Config::default());
    (temp_dir, store, pomodoro)
}

pub fn ts(s: &str) -> Timestamp {
    s.parse().expect("Failed to parse timestamp")
}

//! Environment variable management for testing
//!
//! This module provides utilities for managing XDG environment variables and
//! the API URL override during testing to ensure tests don't interfere with
//! each other. Guards are serialized through a process-wide lock because the
//! environment is shared by every test thread.

use std::env;
use std::path::PathBuf;
use std::sync::{Mutex, MutexGuard};

use tempfile::TempDir;

static ENV_LOCK: Mutex<()> = Mutex::new(());

/// A test environment that overrides XDG directories to use a per-test
/// temporary directory and clears `CITADEL_API_URL`
pub struct EnvTestGuard {
  /// The temporary directory that will be used for XDG directories
  pub temp_dir: TempDir,
  /// Original values of every variable this guard touches
  originals: Vec<(&'static str, Option<String>)>,
  _lock: MutexGuard<'static, ()>,
}

impl Default for EnvTestGuard {
  fn default() -> Self {
    Self::new()
  }
}

impl EnvTestGuard {
  /// XDG environment variable names
  pub const XDG_CONFIG_HOME: &'static str = "XDG_CONFIG_HOME";
  pub const XDG_DATA_HOME: &'static str = "XDG_DATA_HOME";
  pub const XDG_CACHE_HOME: &'static str = "XDG_CACHE_HOME";
  /// API base URL override
  pub const CITADEL_API_URL: &'static str = "CITADEL_API_URL";

  const MANAGED: [&'static str; 4] = [
    Self::XDG_CONFIG_HOME,
    Self::XDG_DATA_HOME,
    Self::XDG_CACHE_HOME,
    Self::CITADEL_API_URL,
  ];

  /// Create a new test environment with overridden XDG directories
  pub fn new() -> Self {
    // A test that panicked while holding the lock must not wedge the rest
    let lock = ENV_LOCK.lock().unwrap_or_else(|poisoned| poisoned.into_inner());

    let temp_dir = TempDir::new().expect("Failed to create temporary directory");
    let originals = Self::MANAGED.iter().map(|name| (*name, env::var(name).ok())).collect();

    let temp_path = temp_dir.path().to_path_buf();
    unsafe {
      env::set_var(Self::XDG_CONFIG_HOME, temp_path.join("config"));
      env::set_var(Self::XDG_DATA_HOME, temp_path.join("data"));
      env::set_var(Self::XDG_CACHE_HOME, temp_path.join("cache"));
      env::remove_var(Self::CITADEL_API_URL);
    }

    Self {
      temp_dir,
      originals,
      _lock: lock,
    }
  }

  /// Point the API override at a test server
  pub fn set_api_url(&self, url: &str) {
    unsafe {
      env::set_var(Self::CITADEL_API_URL, url);
    }
  }

  /// Get the path to the XDG config directory
  pub fn config_dir(&self) -> PathBuf {
    self.temp_dir.path().join("config")
  }

  /// Get the path to the XDG data directory
  pub fn data_dir(&self) -> PathBuf {
    self.temp_dir.path().join("data")
  }

  /// Get the path to the XDG cache directory
  pub fn cache_dir(&self) -> PathBuf {
    self.temp_dir.path().join("cache")
  }
}

impl Drop for EnvTestGuard {
  fn drop(&mut self) {
    for (name, original) in &self.originals {
      match original {
        Some(val) => unsafe {
          env::set_var(name, val);
        },
        None => unsafe {
          env::remove_var(name);
        },
      }
    }
  }
}

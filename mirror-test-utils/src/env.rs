//! Environment variable management for testing
//!
//! Tests that exercise the real process environment set variables through
//! [`EnvVarGuard`], which restores the previous values on drop.

use std::env;

/// Overrides a set of environment variables for the lifetime of the guard
#[derive(Default)]
pub struct EnvVarGuard {
  /// Original values, in the order they were first overridden
  originals: Vec<(String, Option<String>)>,
}

impl EnvVarGuard {
  pub fn new() -> Self {
    Self::default()
  }

  fn remember(&mut self, key: &str) {
    if !self.originals.iter().any(|(existing, _)| existing == key) {
      self.originals.push((key.to_string(), env::var(key).ok()));
    }
  }

  /// Set `key` to `value` until the guard is dropped
  pub fn set(&mut self, key: &str, value: &str) -> &mut Self {
    self.remember(key);
    unsafe {
      env::set_var(key, value);
    }
    self
  }

  /// Remove `key` until the guard is dropped
  pub fn remove(&mut self, key: &str) -> &mut Self {
    self.remember(key);
    unsafe {
      env::remove_var(key);
    }
    self
  }
}

impl Drop for EnvVarGuard {
  fn drop(&mut self) {
    // Restore original environment variables
    for (key, original) in self.originals.drain(..).rev() {
      match original {
        Some(val) => unsafe {
          env::set_var(&key, val);
        },
        None => unsafe {
          env::remove_var(&key);
        },
      }
    }
  }
}

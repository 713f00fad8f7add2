//! Engine-agnostic metrics collection for perimeter build statistics.
//!
//! Feature-gated and runtime-toggled to ensure zero overhead when disabled.
//!
//! # Usage
//!
//! ```ignore
//! use navwall_plugin::metrics::{PerimeterMetrics, COLLECT_METRICS};
//!
//! // Compile with --features metrics
//! // Runtime toggle:
//! COLLECT_METRICS.store(false, Ordering::Relaxed);
//!
//! // After each build:
//! metrics.record_build(&output.stats);
//! ```

use std::collections::VecDeque;
use std::sync::atomic::AtomicBool;
#[cfg(feature = "metrics")]
use std::sync::atomic::Ordering;

use crate::types::BuildStats;

/// Runtime toggle for metrics collection.
/// Set to false to disable metrics gathering at runtime.
pub static COLLECT_METRICS: AtomicBool = AtomicBool::new(true);

/// Check if metrics collection is enabled (both compile-time and runtime).
#[inline]
pub fn is_enabled() -> bool {
  #[cfg(feature = "metrics")]
  {
    COLLECT_METRICS.load(Ordering::Relaxed)
  }
  #[cfg(not(feature = "metrics"))]
  {
    false
  }
}

/// Rolling window for storing recent values (e.g., timing history).
#[derive(Debug, Clone)]
pub struct RollingWindow<T> {
  buffer: VecDeque<T>,
  capacity: usize,
}

impl<T> RollingWindow<T> {
  /// Create a new rolling window with the given capacity.
  pub fn new(capacity: usize) -> Self {
    Self {
      buffer: VecDeque::with_capacity(capacity),
      capacity,
    }
  }

  /// Push a new value, evicting the oldest if at capacity.
  pub fn push(&mut self, value: T) {
    if self.buffer.len() >= self.capacity {
      self.buffer.pop_front();
    }
    self.buffer.push_back(value);
  }

  pub fn len(&self) -> usize {
    self.buffer.len()
  }

  pub fn is_empty(&self) -> bool {
    self.buffer.is_empty()
  }

  pub fn clear(&mut self) {
    self.buffer.clear();
  }

  /// Iterate over values (oldest to newest).
  pub fn iter(&self) -> impl Iterator<Item = &T> {
    self.buffer.iter()
  }

  /// Get the most recent value.
  pub fn last(&self) -> Option<&T> {
    self.buffer.back()
  }
}

/// Number of recent build timings retained.
const BUILD_TIME_WINDOW: usize = 32;

/// Accumulated perimeter build metrics.
#[derive(Debug, Clone)]
pub struct PerimeterMetrics {
  /// Builds recorded since construction or reset.
  pub builds_completed: u64,

  /// Stats from the most recent build.
  pub last_stats: BuildStats,

  /// Recent build times in microseconds.
  pub build_times_us: RollingWindow<u64>,
}

impl Default for PerimeterMetrics {
  fn default() -> Self {
    Self::new()
  }
}

impl PerimeterMetrics {
  pub fn new() -> Self {
    Self {
      builds_completed: 0,
      last_stats: BuildStats::default(),
      build_times_us: RollingWindow::new(BUILD_TIME_WINDOW),
    }
  }

  /// Record one completed build. No-op while collection is disabled.
  pub fn record_build(&mut self, stats: &BuildStats) {
    if !is_enabled() {
      return;
    }
    self.builds_completed += 1;
    self.last_stats = *stats;
    self.build_times_us.push(stats.build_us);
  }

  /// Mean build time over the window, in microseconds.
  pub fn average_build_us(&self) -> u64 {
    if self.build_times_us.is_empty() {
      return 0;
    }
    let sum: u64 = self.build_times_us.iter().sum();
    sum / self.build_times_us.len() as u64
  }

  /// Worst build time in the window, in microseconds.
  pub fn max_build_us(&self) -> u64 {
    self.build_times_us.iter().copied().max().unwrap_or(0)
  }

  pub fn reset(&mut self) {
    *self = Self::new();
  }
}

#[cfg(test)]
#[path = "metrics_test.rs"]
mod metrics_test;

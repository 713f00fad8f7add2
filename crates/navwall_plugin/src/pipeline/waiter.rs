//! Readiness waiter: tick-driven polling of the bake service.
//!
//! Cooperative, never busy-spinning: the caller ticks the waiter once per
//! frame with the current time. Polls are spaced by a geometrically growing
//! delay capped at a maximum. After the service first reports a non-empty
//! triangulation the waiter spends one extra settle tick before taking the
//! snapshot, so late-registering collision geometry can settle.
//!
//! A timeout yields `TimedOut` with whatever the service has; downstream
//! stages tolerate an empty triangulation by producing zero walls.

use std::time::Duration;

use web_time::Instant;

use super::types::NavMeshQuery;
use crate::types::Triangulation;

/// Backoff and timeout parameters for readiness polling.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct WaiterConfig {
  /// Delay after the first unsuccessful poll.
  pub initial_delay: Duration,

  /// Multiplier applied to the delay after each unsuccessful poll.
  pub backoff_factor: f32,

  /// Cap on the poll delay.
  pub max_delay: Duration,

  /// Absolute deadline measured from waiter construction.
  pub timeout: Duration,
}

impl Default for WaiterConfig {
  fn default() -> Self {
    Self {
      initial_delay: Duration::from_millis(100),
      backoff_factor: 2.0,
      max_delay: Duration::from_secs(1),
      timeout: Duration::from_secs(30),
    }
  }
}

/// Outcome of one waiter tick.
#[derive(Clone, Debug, PartialEq)]
pub enum WaiterTick {
  /// Not ready yet; tick again next frame.
  Waiting,

  /// Non-empty triangulation available; snapshot taken after the settle
  /// tick.
  Ready(Triangulation),

  /// Deadline passed. Carries whatever snapshot the service has, usually
  /// empty, so the build still runs and produces zero walls.
  TimedOut(Triangulation),
}

/// Tick-driven readiness state machine. Finished after returning `Ready` or
/// `TimedOut`; further ticks return `Waiting`.
pub struct ReadinessWaiter {
  config: WaiterConfig,
  deadline: Instant,
  next_poll: Instant,
  delay: Duration,
  settling: bool,
  done: bool,
}

impl ReadinessWaiter {
  pub fn new(config: WaiterConfig, now: Instant) -> Self {
    Self {
      deadline: now + config.timeout,
      next_poll: now,
      delay: config.initial_delay,
      config,
      settling: false,
      done: false,
    }
  }

  /// Advance the state machine one cooperative tick.
  pub fn tick<N: NavMeshQuery + ?Sized>(&mut self, nav: &N, now: Instant) -> WaiterTick {
    if self.done {
      return WaiterTick::Waiting;
    }

    if self.settling {
      // The settle tick has elapsed; capture the snapshot now.
      self.done = true;
      return WaiterTick::Ready(nav.triangulation());
    }

    if now >= self.deadline {
      self.done = true;
      #[cfg(feature = "tracing")]
      tracing::warn!(
        timeout_ms = self.config.timeout.as_millis() as u64,
        "navigation mesh readiness wait timed out; building with current snapshot"
      );
      return WaiterTick::TimedOut(nav.triangulation());
    }

    if now < self.next_poll {
      return WaiterTick::Waiting;
    }

    if nav.has_triangulation() {
      self.settling = true;
      return WaiterTick::Waiting;
    }

    // Geometric backoff toward the capped maximum.
    self.next_poll = now + self.delay;
    self.delay = self
      .delay
      .mul_f32(self.config.backoff_factor)
      .min(self.config.max_delay);
    WaiterTick::Waiting
  }

  /// Current poll delay (grows geometrically while unready).
  pub fn current_delay(&self) -> Duration {
    self.delay
  }

  /// True after `Ready` or `TimedOut` was returned.
  pub fn is_done(&self) -> bool {
    self.done
  }
}

#[cfg(test)]
#[path = "waiter_test.rs"]
mod waiter_test;

//! PerimeterBuilder - tick-driven build container.
//!
//! Owns the collaborator services, the readiness waiter, and the async build
//! runner. One `request_build` per navigation-mesh publish; `tick` drives
//! wait → build → drain on the caller's frame loop. A build in flight rejects
//! further requests instead of re-entering the pipeline.

use std::sync::atomic::{AtomicU64, Ordering};

use web_time::Instant;

use crate::debug::{debug_segments, DebugSegment};
use crate::pipeline::async_build::{AsyncWallBuild, BuildError};
use crate::pipeline::types::{IgnoreVolumeQuery, NavMeshQuery, WallBuildOutput, WallSpawner};
use crate::pipeline::waiter::{ReadinessWaiter, WaiterConfig, WaiterTick};
use crate::types::{BuildStats, WallConfig};

/// Atomic counter for generating unique BuildIds.
static BUILD_ID_COUNTER: AtomicU64 = AtomicU64::new(1);

/// Opaque build identifier, unique within process lifetime.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct BuildId(u64);

impl BuildId {
  fn next() -> Self {
    Self(BUILD_ID_COUNTER.fetch_add(1, Ordering::Relaxed))
  }

  pub fn raw(&self) -> u64 {
    self.0
  }
}

enum BuilderPhase {
  Idle,
  Waiting(ReadinessWaiter),
  Building,
}

/// Tick-driven perimeter build container, generic over the injected
/// collaborator services.
pub struct PerimeterBuilder<N, Q>
where
  N: NavMeshQuery + Clone + 'static,
  Q: IgnoreVolumeQuery + Clone + 'static,
{
  nav: N,
  ignore: Q,
  config: WallConfig,
  waiter_config: WaiterConfig,
  phase: BuilderPhase,
  build: AsyncWallBuild,
  current: Option<BuildId>,
  last_stats: Option<BuildStats>,
  debug_segments: Vec<DebugSegment>,
}

impl<N, Q> PerimeterBuilder<N, Q>
where
  N: NavMeshQuery + Clone + 'static,
  Q: IgnoreVolumeQuery + Clone + 'static,
{
  pub fn new(nav: N, ignore: Q, config: WallConfig) -> Self {
    Self {
      nav,
      ignore,
      config,
      waiter_config: WaiterConfig::default(),
      phase: BuilderPhase::Idle,
      build: AsyncWallBuild::new(),
      current: None,
      last_stats: None,
      debug_segments: Vec::new(),
    }
  }

  pub fn with_waiter_config(mut self, waiter_config: WaiterConfig) -> Self {
    self.waiter_config = waiter_config;
    self
  }

  /// Begin a build: wait for readiness, then run the pipeline once.
  ///
  /// Rejects the request while a previous build is still waiting or running.
  pub fn request_build(&mut self, now: Instant) -> Result<BuildId, BuildError> {
    if !matches!(self.phase, BuilderPhase::Idle) || self.build.is_busy() {
      return Err(BuildError::InFlight);
    }
    let id = BuildId::next();
    self.current = Some(id);
    self.phase = BuilderPhase::Waiting(ReadinessWaiter::new(self.waiter_config, now));
    Ok(id)
  }

  /// Advance one cooperative tick. Returns the build output on the tick the
  /// build completes.
  pub fn tick(&mut self, now: Instant) -> Option<WallBuildOutput> {
    match std::mem::replace(&mut self.phase, BuilderPhase::Idle) {
      BuilderPhase::Idle => None,
      BuilderPhase::Waiting(mut waiter) => {
        match waiter.tick(&self.nav, now) {
          WaiterTick::Waiting => {
            self.phase = BuilderPhase::Waiting(waiter);
            None
          }
          WaiterTick::Ready(snapshot) | WaiterTick::TimedOut(snapshot) => {
            // Guard held since request_build; start cannot be busy here.
            if self
              .build
              .start(snapshot, self.nav.clone(), self.ignore.clone(), self.config)
              .is_ok()
            {
              self.phase = BuilderPhase::Building;
            } else {
              self.current = None;
            }
            None
          }
        }
      }
      BuilderPhase::Building => match self.build.poll() {
        Some(output) => {
          self.debug_segments = debug_segments(&output.placements);
          self.last_stats = Some(output.stats);
          self.current = None;
          Some(output)
        }
        None => {
          self.phase = BuilderPhase::Building;
          None
        }
      },
    }
  }

  /// True while a requested build has not yet completed.
  pub fn is_busy(&self) -> bool {
    !matches!(self.phase, BuilderPhase::Idle) || self.build.is_busy()
  }

  /// Identifier of the in-flight build, if any.
  pub fn current_build(&self) -> Option<BuildId> {
    self.current
  }

  /// Stats from the most recently completed build.
  pub fn last_stats(&self) -> Option<&BuildStats> {
    self.last_stats.as_ref()
  }

  /// Drawn segments from the most recently completed build.
  pub fn debug_segments(&self) -> &[DebugSegment] {
    &self.debug_segments
  }

  pub fn config(&self) -> &WallConfig {
    &self.config
  }

  /// Hand a completed build's placements to the instantiation service.
  pub fn spawn_into<S: WallSpawner + ?Sized>(&self, output: &WallBuildOutput, spawner: &mut S) {
    crate::pipeline::spawn_walls(output, spawner);
  }
}

#[cfg(test)]
#[path = "builder_test.rs"]
mod builder_test;

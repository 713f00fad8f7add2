//! Collaborator traits and pipeline output types.
//!
//! The geometry pipeline receives its navigation and collision queries
//! through these statically-typed interfaces, never through global lookup,
//! so the whole algorithm is unit-testable with synthetic triangulations and
//! fake query services.

use glam::Vec3;

use crate::types::{BuildStats, Triangulation, WallPlacement};

/// Navigation bake service interface.
///
/// Queried many times per build (one or more probes per sample point per
/// edge); implementations must tolerate high query volume and should not
/// assume results are cached between builds, since the bake feeding this
/// pipeline can change between runs.
pub trait NavMeshQuery: Send + Sync {
  /// Current triangulation snapshot from the bake service.
  fn triangulation(&self) -> Triangulation;

  /// Whether `point` resolves onto the navigable surface within `radius`.
  fn point_on_surface(&self, point: Vec3, radius: f32) -> bool;

  /// Readiness poll; default derives it from the snapshot.
  fn has_triangulation(&self) -> bool {
    !self.triangulation().is_empty()
  }
}

/// Collision query service for tagged "ignore" volumes.
pub trait IgnoreVolumeQuery: Send + Sync {
  /// Whether a capsule from `a` to `b` with the given radius overlaps any
  /// ignored collision volume.
  fn capsule_overlaps_ignored(&self, a: Vec3, b: Vec3, radius: f32) -> bool;
}

/// No ignored volumes configured.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoIgnoredVolumes;

impl IgnoreVolumeQuery for NoIgnoredVolumes {
  fn capsule_overlaps_ignored(&self, _a: Vec3, _b: Vec3, _radius: f32) -> bool {
    false
  }
}

/// Instantiation service interface. Engine adapters turn a placement into a
/// rendered, collidable object parented under the pipeline's owner so the
/// whole perimeter tears down as one unit on regeneration.
pub trait WallSpawner {
  fn spawn(&mut self, placement: &WallPlacement);
}

/// Result of one perimeter build.
#[derive(Clone, Debug, Default)]
pub struct WallBuildOutput {
  /// Emitted placements in deterministic (sorted edge key) order.
  pub placements: Vec<WallPlacement>,

  /// Diagnostic counters for the summary log line.
  pub stats: BuildStats,
}

impl WallBuildOutput {
  pub fn is_empty(&self) -> bool {
    self.placements.is_empty()
  }
}

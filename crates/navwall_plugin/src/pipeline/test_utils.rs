//! Test utilities for pipeline tests.
//!
//! Provides fake collaborator services and fixture triangulations for
//! testing each pipeline stage in isolation.

use std::sync::{Arc, RwLock};

use glam::{Vec2, Vec3};

use super::types::{IgnoreVolumeQuery, NavMeshQuery, WallSpawner};
use crate::types::{Triangulation, WallPlacement};

// =============================================================================
// Fake navigation mesh
// =============================================================================

/// Navigable-surface fake backed by its own triangulation.
///
/// `point_on_surface` measures horizontal distance from the probe to the
/// nearest triangle in XZ projection, within a vertical band. Tests can
/// publish a new triangulation later to exercise the readiness waiter.
#[derive(Clone)]
pub struct FakeNavMesh {
  inner: Arc<RwLock<Triangulation>>,
  vertical_band: f32,
}

impl FakeNavMesh {
  pub fn new(triangulation: Triangulation) -> Self {
    Self {
      inner: Arc::new(RwLock::new(triangulation)),
      vertical_band: 1.0,
    }
  }

  /// Starts with no triangulation; publish one later.
  pub fn unbaked() -> Self {
    Self::new(Triangulation::default())
  }

  /// Replace the triangulation, as a re-bake would.
  pub fn publish(&self, triangulation: Triangulation) {
    *self.inner.write().unwrap() = triangulation;
  }
}

impl NavMeshQuery for FakeNavMesh {
  fn triangulation(&self) -> Triangulation {
    self.inner.read().unwrap().clone()
  }

  fn point_on_surface(&self, point: Vec3, radius: f32) -> bool {
    let triangulation = self.inner.read().unwrap();
    let p = Vec2::new(point.x, point.z);

    for index in 0..triangulation.triangle_count() {
      let Some([a, b, c]) = triangulation.triangle(index) else {
        continue;
      };
      let plane_y = (a.y + b.y + c.y) / 3.0;
      if (point.y - plane_y).abs() > self.vertical_band {
        continue;
      }
      let a2 = Vec2::new(a.x, a.z);
      let b2 = Vec2::new(b.x, b.z);
      let c2 = Vec2::new(c.x, c.z);
      if dist_sq_point_triangle(p, a2, b2, c2) <= radius * radius {
        return true;
      }
    }
    false
  }
}

fn dist_sq_point_triangle(p: Vec2, a: Vec2, b: Vec2, c: Vec2) -> f32 {
  let s1 = (b - a).perp_dot(p - a);
  let s2 = (c - b).perp_dot(p - b);
  let s3 = (a - c).perp_dot(p - c);
  let inside = (s1 >= 0.0 && s2 >= 0.0 && s3 >= 0.0) || (s1 <= 0.0 && s2 <= 0.0 && s3 <= 0.0);
  if inside {
    return 0.0;
  }
  dist_sq_point_segment(p, a, b)
    .min(dist_sq_point_segment(p, b, c))
    .min(dist_sq_point_segment(p, c, a))
}

fn dist_sq_point_segment(p: Vec2, a: Vec2, b: Vec2) -> f32 {
  let ab = b - a;
  let t = if ab.length_squared() > 0.0 {
    ((p - a).dot(ab) / ab.length_squared()).clamp(0.0, 1.0)
  } else {
    0.0
  };
  p.distance_squared(a + ab * t)
}

// =============================================================================
// Fake ignored-volume collision query
// =============================================================================

/// Axis-aligned ignored volume.
#[derive(Clone, Copy, Debug)]
pub struct IgnoredAabb {
  pub min: Vec3,
  pub max: Vec3,
}

/// Ignored-volume fake: capsules are tested against AABBs expanded by the
/// capsule radius (conservative at corners, which is fine for tests).
#[derive(Clone, Default)]
pub struct FakeIgnoreVolumes {
  pub volumes: Vec<IgnoredAabb>,
}

impl FakeIgnoreVolumes {
  pub fn none() -> Self {
    Self::default()
  }

  pub fn with_volume(min: Vec3, max: Vec3) -> Self {
    Self {
      volumes: vec![IgnoredAabb { min, max }],
    }
  }
}

impl IgnoreVolumeQuery for FakeIgnoreVolumes {
  fn capsule_overlaps_ignored(&self, a: Vec3, b: Vec3, radius: f32) -> bool {
    self.volumes.iter().any(|volume| {
      let min = volume.min - Vec3::splat(radius);
      let max = volume.max + Vec3::splat(radius);
      segment_intersects_aabb(a, b, min, max)
    })
  }
}

fn segment_intersects_aabb(a: Vec3, b: Vec3, min: Vec3, max: Vec3) -> bool {
  let d = b - a;
  let mut t_min = 0.0f32;
  let mut t_max = 1.0f32;

  for axis in 0..3 {
    if d[axis].abs() < 1e-8 {
      if a[axis] < min[axis] || a[axis] > max[axis] {
        return false;
      }
    } else {
      let inv = 1.0 / d[axis];
      let mut t0 = (min[axis] - a[axis]) * inv;
      let mut t1 = (max[axis] - a[axis]) * inv;
      if t0 > t1 {
        std::mem::swap(&mut t0, &mut t1);
      }
      t_min = t_min.max(t0);
      t_max = t_max.min(t1);
      if t_min > t_max {
        return false;
      }
    }
  }
  true
}

// =============================================================================
// Recording spawner
// =============================================================================

/// Spawner fake that records every placement it is handed.
#[derive(Default)]
pub struct RecordingSpawner {
  pub spawned: Vec<WallPlacement>,
}

impl WallSpawner for RecordingSpawner {
  fn spawn(&mut self, placement: &WallPlacement) {
    self.spawned.push(*placement);
  }
}

// =============================================================================
// Fixture triangulations
// =============================================================================

/// Flat square floor spanning (0, 0) to (size, size) in XZ, two triangles
/// wound so the surface normal points up. The diagonal runs corner 0 to
/// corner 2.
pub fn square_floor(size: f32) -> Triangulation {
  let vertices = vec![
    Vec3::new(0.0, 0.0, 0.0),
    Vec3::new(size, 0.0, 0.0),
    Vec3::new(size, 0.0, size),
    Vec3::new(0.0, 0.0, size),
  ];
  let indices = vec![[0, 2, 1], [0, 3, 2]];
  Triangulation::new(vertices, indices)
}

/// One upward-wound triangle with legs of length 4; all three edges are
/// boundary.
pub fn single_triangle() -> Triangulation {
  let vertices = vec![
    Vec3::new(0.0, 0.0, 0.0),
    Vec3::new(4.0, 0.0, 0.0),
    Vec3::new(0.0, 0.0, 4.0),
  ];
  let indices = vec![[0, 2, 1]];
  Triangulation::new(vertices, indices)
}

/// Two independently triangulated 10x10 tiles sharing the x = 10 seam, with
/// the second tile's seam vertices displaced by `jitter` as independent
/// bakes would leave them.
pub fn seam_jittered_tiles(jitter: f32) -> Triangulation {
  let seam = 10.0 + jitter;
  let vertices = vec![
    // Tile A: x in [0, 10]
    Vec3::new(0.0, 0.0, 0.0),
    Vec3::new(10.0, 0.0, 0.0),
    Vec3::new(10.0, 0.0, 10.0),
    Vec3::new(0.0, 0.0, 10.0),
    // Tile B: x in [~10, 20]
    Vec3::new(seam, 0.0, 0.0),
    Vec3::new(20.0, 0.0, 0.0),
    Vec3::new(20.0, 0.0, 10.0),
    Vec3::new(seam, 0.0, 10.0),
  ];
  let indices = vec![[0, 2, 1], [0, 3, 2], [4, 6, 5], [4, 7, 6]];
  Triangulation::new(vertices, indices)
}

//! Boundary filtering and interior-side classification.
//!
//! Keeps edges used by exactly one triangle, averages their true endpoint
//! positions, and resolves which lateral side faces the walkable interior.
//! Every rejection increments a named counter; nothing here is an error.

use glam::Vec3;

use crate::accumulate::EdgeMap;
use crate::pipeline::types::IgnoreVolumeQuery;
use crate::types::{BuildStats, WallConfig};

/// Lateral side of a directed edge, relative to its forward direction and
/// the world-up axis (`left = up x forward`).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Side {
  Left,
  Right,
}

/// A retained exterior boundary edge with averaged endpoints.
#[derive(Clone, Copy, Debug)]
pub struct BoundaryEdge {
  pub start: Vec3,
  pub end: Vec3,
  pub length: f32,

  /// Which lateral side faces walkable space.
  pub interior: Side,
}

impl BoundaryEdge {
  /// Unit vector from start to end.
  pub fn forward(&self) -> Vec3 {
    (self.end - self.start) / self.length
  }

  /// Lateral-left direction, horizontal by construction.
  pub fn lateral_left(&self) -> Vec3 {
    Vec3::Y.cross(self.forward()).normalize_or_zero()
  }

  /// Unit vector pointing into walkable space.
  pub fn interior_dir(&self) -> Vec3 {
    match self.interior {
      Side::Left => self.lateral_left(),
      Side::Right => -self.lateral_left(),
    }
  }

  /// Default outward push direction: opposite the walkable interior.
  pub fn default_outward(&self) -> Vec3 {
    -self.interior_dir()
  }

  /// Point at parameter `t` in [0, 1] along the edge.
  pub fn point_at(&self, t: f32) -> Vec3 {
    self.start + (self.end - self.start) * t
  }
}

/// Select boundary edges from the accumulation map and classify their
/// interior side.
///
/// Output is sorted by canonical edge key so downstream stages, and the
/// placements they emit, are deterministic regardless of hash-map iteration
/// order.
pub fn extract_boundary<Q: IgnoreVolumeQuery + ?Sized>(
  map: &EdgeMap,
  config: &WallConfig,
  ignore: &Q,
  stats: &mut BuildStats,
) -> Vec<BoundaryEdge> {
  let mut entries: Vec<_> = map
    .iter()
    .filter(|(_, record)| record.use_count == 1)
    .collect();
  entries.sort_by_key(|(key, _)| **key);

  let mut edges = Vec::with_capacity(entries.len());
  for (_, record) in entries {
    stats.boundary_edges += 1;

    let Some((start, end)) = record.averaged_endpoints() else {
      continue;
    };
    if !start.is_finite() || !end.is_finite() {
      stats.rejected_non_finite += 1;
      continue;
    }
    if start.y.abs() > config.height_cutoff || end.y.abs() > config.height_cutoff {
      stats.rejected_above_cutoff += 1;
      continue;
    }
    let length = start.distance(end);
    if length < config.min_edge_length {
      stats.rejected_too_short += 1;
      continue;
    }
    if edge_overlaps_ignored(start, end, config, ignore) {
      stats.rejected_ignored_volume += 1;
      continue;
    }

    let interior = if record.interior_sign_sum < 0 {
      Side::Left
    } else {
      Side::Right
    };
    edges.push(BoundaryEdge {
      start,
      end,
      length,
      interior,
    });
  }

  edges
}

/// Capsule overlap test along an edge. Long edges are tested in chunks so a
/// narrow ignored volume mid-edge is not missed by one wide capsule.
fn edge_overlaps_ignored<Q: IgnoreVolumeQuery + ?Sized>(
  start: Vec3,
  end: Vec3,
  config: &WallConfig,
  ignore: &Q,
) -> bool {
  let radius = config.thickness * 0.5 + config.ignored_padding;
  let length = start.distance(end);

  if length <= config.ignored_check_spacing {
    return ignore.capsule_overlaps_ignored(start, end, radius);
  }

  let chunks = (length / config.ignored_check_spacing).ceil() as u32;
  for i in 0..chunks {
    let t0 = i as f32 / chunks as f32;
    let t1 = (i + 1) as f32 / chunks as f32;
    if ignore.capsule_overlaps_ignored(start.lerp(end, t0), start.lerp(end, t1), radius) {
      return true;
    }
  }
  false
}

#[cfg(test)]
#[path = "boundary_test.rs"]
mod boundary_test;

//! Edge accumulation over the navigation-mesh triangle soup.
//!
//! Every triangle contributes its three directed edges. Per canonical edge
//! key we track how many triangles produced the edge, running sums of the
//! true (unquantized) endpoint positions per canonical slot, and the
//! winding-derived interior-side vote expressed relative to the canonical
//! direction.
//!
//! On a consistently wound walkable mesh this leaves every true boundary
//! edge with `use_count == 1` and every shared edge with `use_count >= 2`.

use std::collections::HashMap;

use glam::{DVec3, Vec3};

use crate::quantize::{interior_sign, EdgeKey, VKey};
use crate::types::{Triangulation, WallConfig};

/// Accumulated per-edge data, owned exclusively by its map entry.
#[derive(Clone, Copy, Debug)]
pub struct EdgeRecord {
  /// Triangles that produced this edge.
  pub use_count: u32,

  /// Running sums of true endpoint positions, indexed by canonical slot.
  /// The final edge endpoints are averages of all near-duplicate
  /// observations, not the quantized grid points, which avoids staircase
  /// artifacts along tile seams.
  pub pos_sum: [DVec3; 2],

  /// Observation counts per canonical slot.
  pub samples: [u32; 2],

  /// Net interior-side vote relative to the canonical direction. For a true
  /// boundary edge exactly one triangle votes, so the sign is that single
  /// triangle's vote; multi-vote entries are interior and discarded anyway.
  pub interior_sign_sum: i32,
}

impl EdgeRecord {
  fn new() -> Self {
    Self {
      use_count: 0,
      pos_sum: [DVec3::ZERO; 2],
      samples: [0; 2],
      interior_sign_sum: 0,
    }
  }

  fn observe(&mut self, slot: usize, position: Vec3) {
    self.pos_sum[slot] += position.as_dvec3();
    self.samples[slot] += 1;
  }

  /// Averaged true endpoints in canonical slot order.
  pub fn averaged_endpoints(&self) -> Option<(Vec3, Vec3)> {
    if self.samples[0] == 0 || self.samples[1] == 0 {
      return None;
    }
    let a = (self.pos_sum[0] / self.samples[0] as f64).as_vec3();
    let b = (self.pos_sum[1] / self.samples[1] as f64).as_vec3();
    Some((a, b))
  }
}

pub type EdgeMap = HashMap<EdgeKey, EdgeRecord>;

/// Counters from the accumulation pass.
#[derive(Clone, Copy, Debug, Default)]
pub struct AccumulateStats {
  /// Triangles consumed.
  pub triangles: usize,

  /// Triangles skipped for out-of-range vertex indices.
  pub invalid_triangles: usize,

  /// Directed edges whose endpoints quantized to the same grid key.
  pub degenerate_edges: usize,
}

/// Run the accumulation pass over the full snapshot.
///
/// The map must be fully built before boundary classification begins;
/// partial accumulation would corrupt `use_count`.
pub fn accumulate_edges(
  triangulation: &Triangulation,
  config: &WallConfig,
) -> (EdgeMap, AccumulateStats) {
  let mut map = EdgeMap::new();
  let mut stats = AccumulateStats::default();

  for index in 0..triangulation.triangle_count() {
    let Some([v0, v1, v2]) = triangulation.triangle(index) else {
      stats.invalid_triangles += 1;
      continue;
    };
    stats.triangles += 1;

    // Three oriented edges, each with its opposite vertex.
    for (a, b, c) in [(v0, v1, v2), (v1, v2, v0), (v2, v0, v1)] {
      let key_a = VKey::quantize(a, config);
      let key_b = VKey::quantize(b, config);
      if key_a == key_b {
        stats.degenerate_edges += 1;
        continue;
      }

      let (key, flipped) = EdgeKey::canonical(key_a, key_b);
      let record = map.entry(key).or_insert_with(EdgeRecord::new);
      record.use_count += 1;

      // True positions land in whichever canonical slot matches each
      // endpoint's quantized key.
      let (slot_a, slot_b) = if flipped { (1, 0) } else { (0, 1) };
      record.observe(slot_a, a);
      record.observe(slot_b, b);

      // Interior-side vote, negated when the canonical direction is
      // reversed relative to a -> b.
      let mut sign = interior_sign(a, b, c);
      if flipped {
        sign = -sign;
      }
      record.interior_sign_sum += sign;
    }
  }

  (map, stats)
}

#[cfg(test)]
#[path = "accumulate_test.rs"]
mod accumulate_test;

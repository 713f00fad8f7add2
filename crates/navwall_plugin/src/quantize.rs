//! Vertex quantization and canonical edge keys.
//!
//! Two world points that differ by less than half a snap epsilon per axis
//! collapse to the same key. That is what lets edges from independently baked
//! tiles, which share a boundary only approximately in floating point, be
//! recognized as the same edge.

use glam::Vec3;

use crate::types::WallConfig;

/// Quantized vertex key: world coordinates snapped to the config's grid.
///
/// Horizontal axes share one epsilon; the vertical axis uses its own,
/// typically coarser one.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct VKey {
  pub x: i64,
  pub y: i64,
  pub z: i64,
}

impl VKey {
  pub fn quantize(point: Vec3, config: &WallConfig) -> Self {
    Self {
      x: (point.x / config.snap_epsilon_xz).round() as i64,
      y: (point.y / config.snap_epsilon_y).round() as i64,
      z: (point.z / config.snap_epsilon_xz).round() as i64,
    }
  }
}

/// Unordered pair of vertex keys, canonicalized by lexicographic order so
/// `(a, b)` and `(b, a)` produce the same key.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EdgeKey {
  pub a: VKey,
  pub b: VKey,
}

impl EdgeKey {
  /// Canonicalize an endpoint pair. The second value is true when the pair
  /// was flipped, i.e. the canonical direction runs `b -> a` relative to the
  /// caller's order.
  pub fn canonical(a: VKey, b: VKey) -> (Self, bool) {
    if a <= b {
      (Self { a, b }, false)
    } else {
      (Self { a: b, b: a }, true)
    }
  }
}

/// Which lateral side of a directed edge the triangle interior falls on,
/// from the horizontal-plane cross product of `(b - a)` and `(c - a)`.
///
/// Negative: `c` lies on the lateral-left (`up x forward`) side of `a -> b`.
/// Zero only for triangles degenerate in horizontal projection.
pub fn interior_sign(a: Vec3, b: Vec3, c: Vec3) -> i32 {
  let cross = (b.x - a.x) * (c.z - a.z) - (b.z - a.z) * (c.x - a.x);
  if cross < 0.0 {
    -1
  } else if cross > 0.0 {
    1
  } else {
    0
  }
}

#[cfg(test)]
#[path = "quantize_test.rs"]
mod quantize_test;

//! Debug draw support: drawable centerline segments for spawned walls.
//!
//! Engine adapters render these as gizmo lines; the pipeline itself never
//! draws anything.

use glam::Vec3;

use crate::types::WallPlacement;

/// One drawable wall centerline segment.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DebugSegment {
  pub start: Vec3,
  pub end: Vec3,
}

/// Derive drawable segments from emitted placements.
pub fn debug_segments(placements: &[WallPlacement]) -> Vec<DebugSegment> {
  placements
    .iter()
    .map(|placement| {
      let (start, end) = placement.endpoints();
      DebugSegment { start, end }
    })
    .collect()
}

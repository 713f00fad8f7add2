//! Core data types for perimeter wall synthesis.

use glam::{Quat, Vec3};

/// Immutable navigation-mesh triangulation snapshot.
///
/// Supplied once per build by the external baking service. The pipeline never
/// mutates it; every build rebuilds all derived state from a fresh snapshot.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Triangulation {
  /// World-space vertex positions.
  pub vertices: Vec<Vec3>,

  /// Triangle index triples into `vertices`.
  pub indices: Vec<[u32; 3]>,
}

impl Triangulation {
  pub fn new(vertices: Vec<Vec3>, indices: Vec<[u32; 3]>) -> Self {
    Self { vertices, indices }
  }

  /// Build from the flat index buffer shape most bake services expose.
  /// Trailing indices that do not form a full triple are dropped.
  pub fn from_flat_indices(vertices: Vec<Vec3>, flat_indices: &[u32]) -> Self {
    let indices = flat_indices
      .chunks_exact(3)
      .map(|tri| [tri[0], tri[1], tri[2]])
      .collect();
    Self { vertices, indices }
  }

  /// True when there is nothing to extract a boundary from.
  pub fn is_empty(&self) -> bool {
    self.vertices.is_empty() || self.indices.is_empty()
  }

  pub fn triangle_count(&self) -> usize {
    self.indices.len()
  }

  /// Resolve one triangle's vertex positions, `None` on out-of-range indices.
  pub fn triangle(&self, index: usize) -> Option<[Vec3; 3]> {
    let tri = self.indices.get(index)?;
    Some([
      *self.vertices.get(tri[0] as usize)?,
      *self.vertices.get(tri[1] as usize)?,
      *self.vertices.get(tri[2] as usize)?,
    ])
  }
}

/// Final output value object: one wall segment placement.
///
/// Handed to the instantiation collaborator; the pipeline keeps no ownership
/// of spawned objects beyond the optional debug segment list.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct WallPlacement {
  /// World-space center of the wall, already pushed to the effective outward
  /// offset proven safe during interval computation.
  pub center: Vec3,

  /// Unit vector along the source edge.
  pub forward: Vec3,

  /// Yaw rotation derived from `forward` (world-up axis).
  pub rotation: Quat,

  /// Extent along `forward`.
  pub length: f32,

  pub thickness: f32,
  pub height: f32,

  /// Collision layer to force on the spawned object, if configured.
  pub layer: Option<u32>,

  /// False when renderers should be hidden on the spawned object.
  pub visible: bool,
}

impl WallPlacement {
  /// Local scale in (thickness, height, length) axis order.
  pub fn scale(&self) -> Vec3 {
    Vec3::new(self.thickness, self.height, self.length)
  }

  /// Segment endpoints along the wall centerline.
  pub fn endpoints(&self) -> (Vec3, Vec3) {
    let half = self.forward * (self.length * 0.5);
    (self.center - half, self.center + half)
  }
}

/// Configuration for perimeter wall synthesis.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct WallConfig {
  /// Horizontal (x, z) snap grid for vertex quantization.
  pub snap_epsilon_xz: f32,

  /// Vertical (y) snap grid, typically coarser than horizontal.
  pub snap_epsilon_y: f32,

  /// Absolute height cutoff: edges with |y| above this are skipped.
  pub height_cutoff: f32,

  /// Edges shorter than this are degenerate slivers and skipped.
  pub min_edge_length: f32,

  /// Wall thickness (lateral extent).
  pub thickness: f32,

  /// Wall height (vertical extent).
  pub height: f32,

  /// Requested outward push from the edge centerline.
  pub outward_offset: f32,

  /// Required gap between the wall's interior face and the walkable surface.
  pub surface_clearance: f32,

  /// Bump `outward_offset` up to `thickness / 2 + surface_clearance` when it
  /// is too small to keep the interior face off the edge centerline.
  pub auto_fix_offset: bool,

  /// Linear step between intrusion samples along an edge.
  pub sample_step: f32,

  /// Radius of the navigable-surface query at each sample.
  pub probe_radius: f32,

  /// Tiny back-off from the mathematical interior face, so an exactly
  /// touching face does not read as intruding.
  pub surface_epsilon: f32,

  /// Safe intervals shorter than this are not worth spawning.
  pub min_spawn_length: f32,

  /// Test both lateral sides and keep the one with more safe length.
  pub choose_best_side: bool,

  /// Fraction by which the alternate side must beat the default side before
  /// a flip happens. Keeps near-tie cases deterministic across rebuilds.
  pub side_hysteresis: f32,

  /// Extra radius added to thickness/2 for ignored-volume capsule queries.
  pub ignored_padding: f32,

  /// Long edges are tested against ignored volumes in capsule chunks of this
  /// length instead of one full-length capsule.
  pub ignored_check_spacing: f32,

  /// Collision layer to force on spawned walls.
  pub forced_layer: Option<u32>,

  /// Hide renderers on spawned walls (collision-only perimeter).
  pub hide_renderers: bool,
}

impl Default for WallConfig {
  fn default() -> Self {
    Self {
      snap_epsilon_xz: 0.05,
      snap_epsilon_y: 0.2,
      height_cutoff: 100.0,
      min_edge_length: 0.05,
      thickness: 0.4,
      height: 3.0,
      outward_offset: 0.25,
      surface_clearance: 0.15,
      auto_fix_offset: true,
      sample_step: 0.25,
      probe_radius: 0.1,
      surface_epsilon: 0.01,
      min_spawn_length: 0.3,
      choose_best_side: false,
      side_hysteresis: 0.15,
      ignored_padding: 0.1,
      ignored_check_spacing: 2.0,
      forced_layer: None,
      hide_renderers: false,
    }
  }
}

impl WallConfig {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn with_snap_epsilons(mut self, xz: f32, y: f32) -> Self {
    self.snap_epsilon_xz = xz;
    self.snap_epsilon_y = y;
    self
  }

  pub fn with_height_cutoff(mut self, cutoff: f32) -> Self {
    self.height_cutoff = cutoff;
    self
  }

  pub fn with_min_edge_length(mut self, length: f32) -> Self {
    self.min_edge_length = length;
    self
  }

  pub fn with_thickness(mut self, thickness: f32) -> Self {
    self.thickness = thickness;
    self
  }

  pub fn with_height(mut self, height: f32) -> Self {
    self.height = height;
    self
  }

  pub fn with_outward_offset(mut self, offset: f32) -> Self {
    self.outward_offset = offset;
    self
  }

  pub fn with_surface_clearance(mut self, clearance: f32) -> Self {
    self.surface_clearance = clearance;
    self
  }

  pub fn with_auto_fix_offset(mut self, auto_fix: bool) -> Self {
    self.auto_fix_offset = auto_fix;
    self
  }

  pub fn with_sample_step(mut self, step: f32) -> Self {
    self.sample_step = step;
    self
  }

  pub fn with_probe_radius(mut self, radius: f32) -> Self {
    self.probe_radius = radius;
    self
  }

  pub fn with_min_spawn_length(mut self, length: f32) -> Self {
    self.min_spawn_length = length;
    self
  }

  pub fn with_choose_best_side(mut self, choose: bool) -> Self {
    self.choose_best_side = choose;
    self
  }

  pub fn with_side_hysteresis(mut self, fraction: f32) -> Self {
    self.side_hysteresis = fraction;
    self
  }

  pub fn with_forced_layer(mut self, layer: Option<u32>) -> Self {
    self.forced_layer = layer;
    self
  }

  pub fn with_hide_renderers(mut self, hide: bool) -> Self {
    self.hide_renderers = hide;
    self
  }
}

/// Per-build diagnostic counters.
///
/// Rejections are never escalated as errors; each reason is counted and the
/// build keeps going. One summary log line per build carries these fields.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct BuildStats {
  /// Triangles consumed from the snapshot.
  pub triangles: usize,

  /// Triangles skipped for out-of-range vertex indices.
  pub invalid_triangles: usize,

  /// Unique quantized edges accumulated.
  pub unique_edges: usize,

  /// Directed edges whose endpoints quantized to the same grid key.
  pub degenerate_edges: usize,

  /// Edges with `use_count == 1` before rejection filters.
  pub boundary_edges: usize,

  pub rejected_non_finite: usize,
  pub rejected_above_cutoff: usize,
  pub rejected_too_short: usize,
  pub rejected_ignored_volume: usize,

  /// Edges whose outward side flipped away from the winding-derived default.
  pub side_flips: usize,

  /// Safe intervals found across all edges, slivers included.
  pub intervals_found: usize,

  /// Intervals below the minimum spawn length.
  pub skipped_slivers: usize,

  /// Segments dropped by the per-segment ignored-volume check.
  pub skipped_ignored_segments: usize,

  /// Wall placements emitted.
  pub placements: usize,

  /// Sum of emitted wall lengths in world units.
  pub total_wall_length: f32,

  /// Build time in microseconds (zero for untimed builds).
  pub build_us: u64,
}

#[cfg(test)]
#[path = "types_test.rs"]
mod types_test;

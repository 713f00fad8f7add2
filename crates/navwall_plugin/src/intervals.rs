//! Outward side selection and intrusion-safe interval computation.
//!
//! This is the correctness core. A purely analytic offset is not enough when
//! boundary edges are short, concave, or nearly overlapping another part of
//! the boundary (thin corridors, reentrant corners): the offset wall can
//! loop back onto walkable ground. Sampling the wall's interior face against
//! the authoritative navigable-surface query gives a hard non-intrusion
//! guarantee at the cost of extra queries.

use glam::Vec3;
use smallvec::SmallVec;

use crate::boundary::BoundaryEdge;
use crate::pipeline::types::NavMeshQuery;
use crate::types::WallConfig;

/// Sub-range of a boundary edge, parameterized in [0, 1], proven free of
/// intrusion at the chosen offset.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SafeInterval {
  pub t0: f32,
  pub t1: f32,
}

impl SafeInterval {
  /// World-space length of this interval on an edge of the given length.
  pub fn world_length(&self, edge_length: f32) -> f32 {
    (self.t1 - self.t0) * edge_length
  }
}

pub type IntervalList = SmallVec<[SafeInterval; 4]>;

/// Outward offset actually used for sampling and placement.
///
/// With auto-fix enabled an offset smaller than `thickness / 2 + clearance`
/// is bumped up to it, so the wall's own interior face cannot mathematically
/// land on the edge centerline. Without auto-fix the configured value stands
/// and the interval computer self-limits the damage by finding shorter or no
/// safe runs.
pub fn effective_offset(config: &WallConfig) -> f32 {
  let floor = config.thickness * 0.5 + config.surface_clearance;
  if config.auto_fix_offset && config.outward_offset < floor {
    floor
  } else {
    config.outward_offset
  }
}

/// Walk the edge at fixed steps and collect runs of non-intruding samples.
///
/// Each sample probes the point on the wall's *interior* face (centerline at
/// the effective offset, backed off toward the edge by half the thickness
/// minus a tiny epsilon). If that point still resolves onto the navigable
/// surface within the probe radius, the sample intrudes. A run still open at
/// the last sample closes at `t = 1`.
pub fn compute_safe_intervals<N: NavMeshQuery + ?Sized>(
  edge: &BoundaryEdge,
  outward: Vec3,
  config: &WallConfig,
  nav: &N,
) -> IntervalList {
  let offset = effective_offset(config);
  let face_backoff = config.thickness * 0.5 - config.surface_epsilon;
  let steps = (edge.length / config.sample_step).ceil().max(1.0) as u32;

  let mut intervals = IntervalList::new();
  let mut run_start: Option<f32> = None;
  let mut last_safe_t = 0.0;

  for i in 0..=steps {
    let t = i as f32 / steps as f32;
    let centerline = edge.point_at(t) + outward * offset;
    let interior_face = centerline - outward * face_backoff;

    if nav.point_on_surface(interior_face, config.probe_radius) {
      if let Some(t0) = run_start.take() {
        intervals.push(SafeInterval { t0, t1: last_safe_t });
      }
    } else {
      if run_start.is_none() {
        run_start = Some(t);
      }
      last_safe_t = t;
    }
  }

  if let Some(t0) = run_start {
    intervals.push(SafeInterval { t0, t1: 1.0 });
  }

  intervals
}

/// Chosen outward side for one edge, with its safe intervals.
#[derive(Clone, Debug)]
pub struct SideSelection {
  pub outward: Vec3,
  pub intervals: IntervalList,

  /// True when the alternate side beat the winding-derived default.
  pub flipped: bool,
}

/// Pick the outward side for an edge.
///
/// The default is the side opposite the classified interior. With
/// `choose_best_side` enabled both sides are sampled and the alternate wins
/// only when its safe length exceeds the default's by the hysteresis
/// fraction; winding-derived classification can be locally ambiguous at tile
/// seams, and testing against the real surface is the authoritative check.
pub fn select_side<N: NavMeshQuery + ?Sized>(
  edge: &BoundaryEdge,
  config: &WallConfig,
  nav: &N,
) -> SideSelection {
  let default_outward = edge.default_outward();
  let default_intervals = compute_safe_intervals(edge, default_outward, config, nav);

  if !config.choose_best_side {
    return SideSelection {
      outward: default_outward,
      intervals: default_intervals,
      flipped: false,
    };
  }

  let alternate_outward = -default_outward;
  let alternate_intervals = compute_safe_intervals(edge, alternate_outward, config, nav);

  let safe_length = |intervals: &IntervalList| -> f32 {
    intervals
      .iter()
      .map(|interval| interval.world_length(edge.length))
      .sum()
  };

  let default_length = safe_length(&default_intervals);
  let alternate_length = safe_length(&alternate_intervals);

  if alternate_length > default_length * (1.0 + config.side_hysteresis) {
    SideSelection {
      outward: alternate_outward,
      intervals: alternate_intervals,
      flipped: true,
    }
  } else {
    SideSelection {
      outward: default_outward,
      intervals: default_intervals,
      flipped: false,
    }
  }
}

#[cfg(test)]
#[path = "intervals_test.rs"]
mod intervals_test;

//! Build Orchestrator
//!
//! Runs the full accumulate → filter/classify → side selection → interval
//! sampling → placement emission pipeline, using rayon for the per-edge
//! sampling work. This is the main entry point for engine integration.
//!
//! # Usage
//!
//! ```ignore
//! // After the readiness waiter hands over a snapshot:
//! let output = build_perimeter(&triangulation, &nav, &ignore, &config);
//!
//! // Engine adapter: instantiate walls from output.placements
//! spawn_walls(&output, &mut spawner);
//! ```

use glam::Quat;
use rayon::prelude::*;

use super::types::{IgnoreVolumeQuery, NavMeshQuery, WallBuildOutput, WallSpawner};
use crate::accumulate::accumulate_edges;
use crate::boundary::{extract_boundary, BoundaryEdge};
use crate::intervals::{effective_offset, select_side, SideSelection};
use crate::types::{BuildStats, Triangulation, WallConfig, WallPlacement};

/// Build the perimeter wall set for one triangulation snapshot.
///
/// Never fails: degenerate geometry, misconfiguration, and an empty
/// snapshot all degrade to fewer or zero placements, with the reasons
/// counted in the returned stats.
#[cfg_attr(
  feature = "tracing",
  tracing::instrument(skip_all, name = "navwall::build_perimeter")
)]
pub fn build_perimeter<N, Q>(
  triangulation: &Triangulation,
  nav: &N,
  ignore: &Q,
  config: &WallConfig,
) -> WallBuildOutput
where
  N: NavMeshQuery + ?Sized,
  Q: IgnoreVolumeQuery + ?Sized,
{
  let mut stats = BuildStats::default();

  if triangulation.is_empty() {
    return WallBuildOutput {
      placements: Vec::new(),
      stats,
    };
  }

  // Stage 2: edge accumulation over the whole soup. The map must be complete
  // before classification starts.
  let (map, accumulate_stats) = accumulate_edges(triangulation, config);
  stats.triangles = accumulate_stats.triangles;
  stats.invalid_triangles = accumulate_stats.invalid_triangles;
  stats.degenerate_edges = accumulate_stats.degenerate_edges;
  stats.unique_edges = map.len();

  // Stage 3: boundary filter + interior-side classification.
  let edges = extract_boundary(&map, config, ignore, &mut stats);
  drop(map);

  // Stage 4: side selection + interval sampling dominate build time; fan out
  // per edge. Collect preserves edge order, keeping output deterministic.
  let selections: Vec<(BoundaryEdge, SideSelection)> = edges
    .par_iter()
    .map(|edge| (*edge, select_side(edge, config, nav)))
    .collect();

  // Stage 5: placement emission.
  let offset = effective_offset(config);
  let capsule_radius = config.thickness * 0.5 + config.ignored_padding;
  let mut placements = Vec::new();

  for (edge, selection) in &selections {
    if selection.flipped {
      stats.side_flips += 1;
    }
    let push = selection.outward * offset;

    for interval in &selection.intervals {
      stats.intervals_found += 1;

      let a = edge.point_at(interval.t0);
      let b = edge.point_at(interval.t1);
      let length = a.distance(b);
      if length < config.min_spawn_length {
        stats.skipped_slivers += 1;
        continue;
      }
      if ignore.capsule_overlaps_ignored(a + push, b + push, capsule_radius) {
        stats.skipped_ignored_segments += 1;
        continue;
      }

      let forward = edge.forward();
      placements.push(WallPlacement {
        center: (a + b) * 0.5 + push,
        forward,
        rotation: Quat::from_rotation_y(forward.x.atan2(forward.z)),
        length,
        thickness: config.thickness,
        height: config.height,
        layer: config.forced_layer,
        visible: !config.hide_renderers,
      });
    }
  }

  stats.placements = placements.len();
  stats.total_wall_length = placements.iter().map(|p| p.length).sum();

  #[cfg(feature = "tracing")]
  tracing::info!(
    triangles = stats.triangles,
    unique_edges = stats.unique_edges,
    boundary_edges = stats.boundary_edges,
    rejected_non_finite = stats.rejected_non_finite,
    rejected_above_cutoff = stats.rejected_above_cutoff,
    rejected_too_short = stats.rejected_too_short,
    rejected_ignored_volume = stats.rejected_ignored_volume,
    side_flips = stats.side_flips,
    skipped_slivers = stats.skipped_slivers,
    skipped_ignored_segments = stats.skipped_ignored_segments,
    placements = stats.placements,
    total_wall_length = stats.total_wall_length,
    "perimeter build complete"
  );

  WallBuildOutput { placements, stats }
}

/// Same as `build_perimeter` but fills in `stats.build_us`.
pub fn build_perimeter_timed<N, Q>(
  triangulation: &Triangulation,
  nav: &N,
  ignore: &Q,
  config: &WallConfig,
) -> WallBuildOutput
where
  N: NavMeshQuery + ?Sized,
  Q: IgnoreVolumeQuery + ?Sized,
{
  use web_time::Instant;

  let start = Instant::now();
  let mut output = build_perimeter(triangulation, nav, ignore, config);
  output.stats.build_us = start.elapsed().as_micros() as u64;
  output
}

/// Hand every placement to the instantiation service.
pub fn spawn_walls<S: WallSpawner + ?Sized>(output: &WallBuildOutput, spawner: &mut S) {
  for placement in &output.placements {
    spawner.spawn(placement);
  }
}

#[cfg(test)]
#[path = "process_test.rs"]
mod process_test;

use glam::Vec3;

use super::*;
use crate::accumulate::accumulate_edges;
use crate::pipeline::test_utils::{
  seam_jittered_tiles, single_triangle, square_floor, FakeIgnoreVolumes,
};
use crate::pipeline::NoIgnoredVolumes;
use crate::types::Triangulation;

fn extract(
  triangulation: &Triangulation,
  config: &WallConfig,
) -> (Vec<BoundaryEdge>, BuildStats) {
  let (map, _) = accumulate_edges(triangulation, config);
  let mut stats = BuildStats::default();
  let edges = extract_boundary(&map, config, &NoIgnoredVolumes, &mut stats);
  (edges, stats)
}

#[test]
fn test_square_floor_yields_four_boundary_edges() {
  let config = WallConfig::default();
  let (edges, stats) = extract(&square_floor(10.0), &config);

  assert_eq!(edges.len(), 4);
  assert_eq!(stats.boundary_edges, 4);
  for edge in &edges {
    assert!((edge.length - 10.0).abs() < 1e-4);
  }
}

#[test]
fn test_single_triangle_yields_three_edges() {
  let config = WallConfig::default();
  let (edges, _) = extract(&single_triangle(), &config);
  assert_eq!(edges.len(), 3);
}

#[test]
fn test_seam_is_not_a_boundary_edge() {
  let config = WallConfig::default();
  let (edges, _) = extract(&seam_jittered_tiles(0.01), &config);

  // Outer rectangle of the merged tiles: 3 edges per tile.
  assert_eq!(edges.len(), 6);
  for edge in &edges {
    // No retained edge runs along the x = 10 seam.
    let on_seam = (edge.start.x - 10.0).abs() < 0.5 && (edge.end.x - 10.0).abs() < 0.5;
    assert!(!on_seam, "seam leaked through: {:?}", edge);
  }
}

#[test]
fn test_interior_side_points_at_centroid() {
  let config = WallConfig::default();
  let size = 10.0;
  let (edges, _) = extract(&square_floor(size), &config);
  let centroid = Vec3::new(size * 0.5, 0.0, size * 0.5);

  for edge in &edges {
    let midpoint = edge.point_at(0.5);
    let toward_centroid = (centroid - midpoint).normalize();
    assert!(
      edge.interior_dir().dot(toward_centroid) > 0.9,
      "interior side of {:?} does not face the centroid",
      edge
    );
  }
}

#[test]
fn test_outward_is_opposite_interior() {
  let config = WallConfig::default();
  let (edges, _) = extract(&square_floor(10.0), &config);

  for edge in &edges {
    assert!((edge.interior_dir() + edge.default_outward()).length() < 1e-5);
  }
}

#[test]
fn test_height_cutoff_rejects_high_edges() {
  let config = WallConfig::default().with_height_cutoff(10.0);

  // Same floor lifted to y = 50, above the cutoff.
  let mut lifted = square_floor(10.0);
  for vertex in &mut lifted.vertices {
    vertex.y = 50.0;
  }
  let (edges, stats) = extract(&lifted, &config);

  assert!(edges.is_empty());
  assert_eq!(stats.rejected_above_cutoff, 4);
}

#[test]
fn test_min_edge_length_rejects_slivers() {
  // A floor smaller than the minimum edge length.
  let config = WallConfig::default().with_min_edge_length(1.0);
  let (edges, stats) = extract(&square_floor(0.5), &config);

  assert!(edges.is_empty());
  assert_eq!(stats.rejected_too_short, 4);
}

#[test]
fn test_non_finite_endpoints_rejected() {
  let config = WallConfig::default();
  let triangulation = Triangulation::new(
    vec![
      Vec3::new(f32::NAN, 0.0, 0.0),
      Vec3::new(4.0, 0.0, 0.0),
      Vec3::new(0.0, 0.0, 4.0),
    ],
    vec![[0, 1, 2]],
  );
  let (edges, stats) = extract(&triangulation, &config);

  // The two edges touching the NaN vertex reject; the far edge survives.
  assert_eq!(edges.len(), 1);
  assert_eq!(stats.rejected_non_finite, 2);
}

#[test]
fn test_ignored_volume_rejects_overlapping_edge() {
  let config = WallConfig::default();
  let (map, _) = accumulate_edges(&square_floor(10.0), &config);

  // Thin volume hugging the z = 0 edge from outside, short of the corners
  // so the adjacent edges stay clear of the capsule radius.
  let ignore = FakeIgnoreVolumes::with_volume(
    Vec3::new(0.5, -1.0, -0.4),
    Vec3::new(9.5, 1.0, -0.1),
  );
  let mut stats = BuildStats::default();
  let edges = extract_boundary(&map, &config, &ignore, &mut stats);

  assert_eq!(edges.len(), 3);
  assert_eq!(stats.rejected_ignored_volume, 1);
  // The rejected edge was the one along z = 0.
  assert!(edges.iter().all(|edge| edge.point_at(0.5).z > 0.5));
}

#[test]
fn test_extraction_order_is_deterministic() {
  let config = WallConfig::default();
  let triangulation = seam_jittered_tiles(0.01);

  let (first, _) = extract(&triangulation, &config);
  let (second, _) = extract(&triangulation, &config);

  assert_eq!(first.len(), second.len());
  for (a, b) in first.iter().zip(second.iter()) {
    assert_eq!(a.start, b.start);
    assert_eq!(a.end, b.end);
    assert_eq!(a.interior, b.interior);
  }
}

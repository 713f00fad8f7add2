//! Benchmarks for boundary extraction and full perimeter builds.
//!
//! Uses a generated grid floor with holes so the boundary is long and
//! irregular, like a procedurally assembled level.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use glam::Vec3;
use navwall_plugin::pipeline::NavMeshQuery;
use navwall_plugin::{
  accumulate_edges, build_perimeter, extract_boundary, BuildStats, NoIgnoredVolumes,
  Triangulation, WallConfig,
};

/// Grid floor of n x n unit cells with a scattering of holes.
fn grid_floor(n: u32) -> Triangulation {
  let stride = n + 1;
  let mut vertices = Vec::with_capacity((stride * stride) as usize);
  for x in 0..stride {
    for z in 0..stride {
      vertices.push(Vec3::new(x as f32, 0.0, z as f32));
    }
  }

  let mut indices = Vec::new();
  for x in 0..n {
    for z in 0..n {
      // Punched-out cells create interior boundary loops.
      if (x * 7 + z * 3) % 11 == 0 {
        continue;
      }
      let i00 = x * stride + z;
      let i01 = x * stride + z + 1;
      let i10 = (x + 1) * stride + z;
      let i11 = (x + 1) * stride + z + 1;
      indices.push([i00, i11, i10]);
      indices.push([i00, i01, i11]);
    }
  }

  Triangulation::new(vertices, indices)
}

/// Cheap surface query: inside the overall floor bounds. Good enough to give
/// the interval sampler realistic per-probe work.
struct BoundsNav {
  triangulation: Triangulation,
  size: f32,
}

impl NavMeshQuery for BoundsNav {
  fn triangulation(&self) -> Triangulation {
    self.triangulation.clone()
  }

  fn point_on_surface(&self, point: Vec3, radius: f32) -> bool {
    point.x >= -radius
      && point.z >= -radius
      && point.x <= self.size + radius
      && point.z <= self.size + radius
  }
}

fn bench_accumulate(c: &mut Criterion) {
  let config = WallConfig::default();
  let floor = grid_floor(64);

  c.bench_function("accumulate_edges_64x64", |b| {
    b.iter(|| accumulate_edges(black_box(&floor), black_box(&config)))
  });
}

fn bench_extract_boundary(c: &mut Criterion) {
  let config = WallConfig::default();
  let floor = grid_floor(64);
  let (map, _) = accumulate_edges(&floor, &config);

  c.bench_function("extract_boundary_64x64", |b| {
    b.iter(|| {
      let mut stats = BuildStats::default();
      extract_boundary(black_box(&map), &config, &NoIgnoredVolumes, &mut stats)
    })
  });
}

fn bench_full_build(c: &mut Criterion) {
  let config = WallConfig::default();
  let size = 64u32;
  let floor = grid_floor(size);
  let nav = BoundsNav {
    triangulation: floor.clone(),
    size: size as f32,
  };

  c.bench_function("build_perimeter_64x64", |b| {
    b.iter(|| build_perimeter(black_box(&floor), &nav, &NoIgnoredVolumes, &config))
  });
}

criterion_group!(
  benches,
  bench_accumulate,
  bench_extract_boundary,
  bench_full_build
);
criterion_main!(benches);

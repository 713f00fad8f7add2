//! navwall_plugin - Framework/engine independent perimeter wall synthesis
//!
//! This crate finds the true exterior boundary of a baked navigation-mesh
//! triangulation and places rigid wall geometry along it. The triangulation
//! may come from several independently baked tiles whose seam vertices only
//! match approximately in floating point; quantized edge keys collapse those
//! seams so they never surface as boundary edges.
//!
//! # Features
//!
//! - **Boundary extraction**: Quantized edge accumulation over the triangle
//!   soup, `use_count == 1` boundary classification, jitter-robust endpoint
//!   averaging
//! - **Interior-side classification**: Winding-derived lateral side per
//!   boundary edge, with optional empirical both-sides testing
//! - **Intrusion-safe placement**: Sampled proof that a candidate wall's
//!   interior face never lands back on walkable ground
//! - **Tick-driven orchestration**: Readiness waiting with backoff, async
//!   builds on rayon's pool, re-entrancy guarded
//!
//! # Example
//!
//! ```ignore
//! use navwall_plugin::{build_perimeter, NoIgnoredVolumes, WallConfig};
//!
//! let triangulation = nav.triangulation();
//! let config = WallConfig::default().with_thickness(0.4);
//!
//! let output = build_perimeter(&triangulation, &nav, &NoIgnoredVolumes, &config);
//!
//! println!(
//!   "Placed {} walls along {} boundary edges",
//!   output.placements.len(),
//!   output.stats.boundary_edges
//! );
//! ```

pub mod quantize;
pub mod types;

// Re-export commonly used items
pub use quantize::{interior_sign, EdgeKey, VKey};
pub use types::{BuildStats, Triangulation, WallConfig, WallPlacement};

// Edge accumulation over the triangle soup
pub mod accumulate;
pub use accumulate::{accumulate_edges, EdgeMap, EdgeRecord};

// Boundary filtering and interior-side classification
pub mod boundary;
pub use boundary::{extract_boundary, BoundaryEdge, Side};

// Outward side selection and intrusion-safe intervals
pub mod intervals;
pub use intervals::{
  compute_safe_intervals, effective_offset, select_side, IntervalList, SafeInterval, SideSelection,
};

// Build pipeline: readiness waiting, processing, async execution
pub mod pipeline;
pub use pipeline::{
  build_perimeter, build_perimeter_timed, spawn_walls, AsyncWallBuild, BuildError,
  IgnoreVolumeQuery, NavMeshQuery, NoIgnoredVolumes, ReadinessWaiter, WaiterConfig, WaiterTick,
  WallBuildOutput, WallSpawner,
};

// Top-level tick-driven container
pub mod builder;
pub use builder::{BuildId, PerimeterBuilder};

// Debug draw support
pub mod debug;
pub use debug::{debug_segments, DebugSegment};

// Engine-agnostic metrics collection
pub mod metrics;

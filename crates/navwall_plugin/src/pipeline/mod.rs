//! Perimeter Wall Build Pipeline
//!
//! Tick-driven pipeline from bake-service readiness to wall placements.
//!
//! ```text
//! ┌──────────────┐   ┌─────────────┐   ┌──────────┐   ┌────────────┐   ┌───────────┐
//! │ Readiness    ├──►│ Accumulate  ├──►│ Boundary ├──►│ Side +     ├──►│ Placement │
//! │ Waiter       │   │ Edges       │   │ Filter   │   │ Intervals  │   │ Emission  │
//! └──────────────┘   └─────────────┘   └──────────┘   └────────────┘   └───────────┘
//!       │                  │                │               │                │
//!  Triangulation       EdgeMap        BoundaryEdge[]   SafeInterval[]  WallPlacement[]
//!  (snapshot after    (use_count,     (use_count==1,   (sampled proof  (one per safe
//!   settle tick)       avg positions,  sorted, height/  of no surface   interval, never
//!                      side votes)     sliver/ignore    intrusion per   merged across
//!                                      filters)         outward side)   intervals)
//! ```
//!
//! # Pipeline Stages
//!
//! 1. **Readiness Waiter**: polls the bake service with geometric backoff
//!    until a non-empty triangulation exists or the timeout passes, then
//!    waits one settle tick before snapshotting
//! 2. **Edge Accumulation**: quantized edge keys, endpoint averaging,
//!    interior-side votes over the whole triangle soup
//! 3. **Boundary Filter + Classifier**: `use_count == 1` selection, counted
//!    rejections, interior-side resolution
//! 4. **Side Selection + Intervals**: outward offset, optional both-sides
//!    testing, intrusion-safe interval sampling (parallel via rayon)
//! 5. **Placement Emission**: one wall per safe interval above the minimum
//!    spawn length, at the same effective offset proven safe
//!
//! An empty triangulation, including the post-timeout case, flows through
//! every stage and produces zero placements rather than an error.

pub mod types;

// Stage implementations
pub mod async_build;
pub mod process;
pub mod waiter;

// Test utilities
#[cfg(test)]
pub mod test_utils;

// Re-exports
pub use types::{
  IgnoreVolumeQuery, NavMeshQuery, NoIgnoredVolumes, WallBuildOutput, WallSpawner,
};

// Synchronous entry points
pub use process::{build_perimeter, build_perimeter_timed, spawn_walls};

// Readiness waiting
pub use waiter::{ReadinessWaiter, WaiterConfig, WaiterTick};

// Async entry point (non-blocking, rayon-backed)
pub use async_build::{AsyncWallBuild, BuildError};

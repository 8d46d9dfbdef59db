//! # isomesh
//!
//! Isosurface and wireframe extraction from sampled 3D volumes.
//!
//! This crate is the runtime side of the isomesh workspace. It owns the sample
//! buffers, places them in world space and drives the Marching Cubes engine from
//! `isomesh_core`:
//!
//! - **Volumes**: dense x-fastest scalar grids with optional per-sample group ids
//! - **Placement**: origin and per-axis spacing applied to extracted geometry
//! - **Progress**: logged reports and cross-thread cancellation
//! - **Parallelism**: z-slab mesh extraction on the rayon pool
//!
//! ## Quick Start
//!
//! ```ignore
//! use isomesh::{ExtractionConfig, MeshStats, VolumeBuilder};
//!
//! let volume = VolumeBuilder::new([48, 48, 48])
//!     .with_scalar_fn(|i, j, k| density(i, j, k))
//!     .with_origin([-12.0, -12.0, -12.0])
//!     .with_uniform_spacing(0.5)
//!     .build()?;
//!
//! let mesh = volume
//!     .extract(&ExtractionConfig::new(0.8))?
//!     .into_mesh()
//!     .unwrap_or_default();
//!
//! let stats = MeshStats::from_mesh(&mesh);
//! println!("{} triangles, area {}", stats.triangle_count, stats.surface_area);
//! ```
//!
//! ## Long extractions
//!
//! ```ignore
//! use isomesh::{ExtractionConfig, ProgressReporter};
//!
//! let mut reporter = ProgressReporter::new("density");
//! let token = reporter.cancel_token();
//! // hand `token` to another thread; `token.cancel()` stops at the next slice
//! let geometry = volume.extract_with_task(&ExtractionConfig::new(0.8), &mut reporter)?;
//! ```
//!
//! ## Feature Flags
//!
//! - `parallel` (default): slab-parallel mesh extraction via rayon
//! - `serde`: serialization of configs, transforms and value types

#![warn(missing_docs)]
#![warn(clippy::all)]

mod builder;
mod config;
mod error;
mod grid;
mod mesh;
mod progress;
mod transform;
mod volume;

#[cfg(feature = "parallel")]
mod parallel;

pub use builder::VolumeBuilder;
pub use config::ExtractionConfig;
pub use error::{IsoMeshError, Result};
pub use grid::DenseGrid;
pub use mesh::{lines_to_obj, mesh_to_obj, MeshStats};
pub use progress::{CancelToken, ProgressReporter, DEFAULT_REPORT_INTERVAL};
pub use transform::GridTransform;
pub use volume::Volume;

#[cfg(feature = "parallel")]
pub use parallel::slab_ranges;

// Re-export isomesh_core types for convenience
pub use isomesh_core::{
    Geometry, IdField, IsoCoreError, Lines, Mesh, OutputMode, Point3, Progress, Region,
    ScalarField, Synchronous, TaskContext, GROUP_EXCLUDED, GROUP_NONE, PROGRESS_MESSAGE,
};

/// Prelude module for convenient imports.
///
/// ```ignore
/// use isomesh::prelude::*;
/// ```
pub mod prelude {
    pub use crate::builder::VolumeBuilder;
    pub use crate::config::ExtractionConfig;
    pub use crate::error::{IsoMeshError, Result};
    pub use crate::mesh::MeshStats;
    pub use crate::progress::{CancelToken, ProgressReporter};
    pub use crate::transform::GridTransform;
    pub use crate::volume::Volume;

    pub use isomesh_core::{Geometry, Lines, Mesh, OutputMode, Point3, Region};
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ball(dim: usize, radius: f32) -> Volume {
        let c = (dim as f32 - 1.0) * 0.5;
        VolumeBuilder::new([dim; 3])
            .with_scalar_fn(|i, j, k| {
                let p = Point3::from_indices(i, j, k) - Point3::splat(c);
                p.length() - radius
            })
            .build()
            .unwrap()
    }

    #[test]
    fn test_basic_workflow() {
        let volume = ball(12, 3.5);
        let mesh = volume
            .extract(&ExtractionConfig::new(0.0))
            .unwrap()
            .into_mesh()
            .unwrap();

        assert!(!mesh.is_empty());
        let stats = MeshStats::from_mesh(&mesh);
        assert_eq!(stats.triangle_count, mesh.triangle_count);
        // area of a sphere of radius 3.5 is about 154
        assert!(stats.surface_area > 120.0 && stats.surface_area < 170.0);
    }

    #[test]
    fn test_wireframe_workflow() {
        let lines = ball(10, 3.0)
            .extract(&ExtractionConfig::new(0.0).lines())
            .unwrap()
            .into_lines()
            .unwrap();

        assert!(lines.line_count > 0);
        assert!(lines_to_obj(&lines).contains("\nl "));
    }

    #[test]
    fn test_world_placement() {
        let volume = VolumeBuilder::new([10; 3])
            .with_scalar_fn(|i, j, k| {
                let p = Point3::from_indices(i, j, k) - Point3::splat(4.5);
                p.length() - 3.0
            })
            .with_origin([100.0, 0.0, 0.0])
            .with_uniform_spacing(0.1)
            .build()
            .unwrap();
        let mesh = volume
            .extract(&ExtractionConfig::new(0.0))
            .unwrap()
            .into_mesh()
            .unwrap();

        let stats = MeshStats::from_mesh(&mesh);
        assert!(stats.bbox_min.x > 100.0 && stats.bbox_max.x < 101.0);
        assert!(stats.bbox_max.y < 1.0);
    }

    #[test]
    #[cfg(feature = "parallel")]
    fn test_parallel_workflow() {
        let volume = ball(14, 4.5);
        let config = ExtractionConfig::new(0.0);
        let serial = volume.extract(&config).unwrap().into_mesh().unwrap();
        let parallel = volume.extract_mesh_parallel(&config).unwrap();
        assert_eq!(parallel.triangle_count, serial.triangle_count);
    }
}

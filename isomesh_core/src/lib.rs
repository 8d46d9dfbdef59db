//! # isomesh_core
//!
//! Streaming marching cubes over sampled 3D scalar fields.
//!
//! This crate turns a grid of scalar samples into a triangle mesh or a wireframe at
//! a chosen iso-level. Cells are processed slice by slice and shared edge vertices
//! are cached over two z-slices only, so fields of any depth are handled with
//! `O(nX * nY)` cache memory.
//!
//! ## Features
//!
//! - **no_std compatible**: Works in embedded environments with the `alloc` feature
//! - **Storage agnostic**: Fields are read through the [`ScalarField`] and [`IdField`] traits
//! - **Group ids**: An optional id field partitions the surface into sub-regions
//! - **Two outputs**: Triangle meshes with normals, or contour line segments
//! - **Cooperative**: Progress and cancellation through [`TaskContext`]
//!
//! ## Feature Flags
//!
//! - `std` (default): Enables standard library support
//! - `alloc`: Enables heap allocation (Vec, etc.) without full std
//!
//! ## Modules
//!
//! - [`types`]: Core data types (Point3, Region, group sentinels)
//! - [`traits`]: Field, builder and task context traits
//! - [`interpolation`]: Edge crossings, gradient normals and group resolution
//! - [`marching_cubes`]: Tables, edge cache, cell processor, slice scheduler
//! - [`builder`]: Mesh and wireframe builders and their outputs
//! - [`error`]: Error types
//!
//! ## Usage
//!
//! ```ignore
//! use isomesh_core::prelude::*;
//!
//! // Requires implementing ScalarField for your storage
//! let params = MarchingCubesParams::new(&field, 0.0);
//! let mesh = compute_mesh(&params, &mut Synchronous)?;
//! println!("{} triangles", mesh.triangle_count);
//! ```

#![no_std]
#![warn(missing_docs)]
#![warn(clippy::all)]

// Conditional std/alloc support
#[cfg(feature = "std")]
extern crate std;

#[cfg(all(feature = "alloc", not(feature = "std")))]
extern crate alloc;

// Internal alloc prelude for conditional compilation
#[cfg(feature = "std")]
mod alloc_prelude {
    pub use std::vec::Vec;
}

#[cfg(all(feature = "alloc", not(feature = "std")))]
mod alloc_prelude {
    pub use alloc::vec::Vec;
}

pub mod builder;
pub mod error;
pub mod interpolation;
pub mod marching_cubes;
pub mod traits;
pub mod types;

pub use marching_cubes::tables;

/// Prelude module for convenient imports.
///
/// Provides the most commonly used types and functions.
pub mod prelude {
    pub use crate::builder::{Geometry, Lines, LinesBuilder, Mesh, MeshBuilder, OutputMode};
    pub use crate::error::IsoCoreError;
    pub use crate::marching_cubes::{
        compute_lines, compute_mesh, compute_with_builder, extract, MarchingCubesParams,
    };
    pub use crate::traits::{GeometryBuilder, IdField, Progress, ScalarField, Synchronous, TaskContext};
    pub use crate::types::{Point3, Region, GROUP_EXCLUDED, GROUP_NONE};
}

// Re-export everything at crate root for convenience
pub use builder::{
    vertex_chunk_size, Geometry, Lines, LinesBuilder, Mesh, MeshBuilder, OutputMode,
    MAX_CHUNK_SIZE, MIN_CHUNK_SIZE,
};
pub use error::IsoCoreError;
pub use interpolation::{crossing_parameter, negative_gradient, resolve_group};
pub use marching_cubes::{
    compute_lines, compute_mesh, compute_with_builder, extract, EdgeVertexCache,
    MarchingCubesParams, PROGRESS_MESSAGE,
};
pub use traits::{GeometryBuilder, IdField, Progress, ScalarField, Synchronous, TaskContext};
pub use types::{Point3, Region, GROUP_EXCLUDED, GROUP_NONE};

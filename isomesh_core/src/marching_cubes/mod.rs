//! Marching Cubes surface and wireframe extraction.
//!
//! This module provides the streaming marching cubes engine. It includes:
//!
//! - Compile-time lookup tables for cube configurations
//! - A two-slice edge vertex cache keyed by canonical edge ids
//! - The per-cell processor and the slice scheduler driving it
//! - Entry points producing a [`Mesh`], [`Lines`] or any custom builder's output
//!
//! # Example
//!
//! ```ignore
//! use isomesh_core::marching_cubes::{compute_mesh, MarchingCubesParams};
//! use isomesh_core::Synchronous;
//!
//! let params = MarchingCubesParams::new(&field, 0.5).with_region([0, 0, 0], [32, 32, 16]);
//! let mesh = compute_mesh(&params, &mut Synchronous)?;
//! ```

mod cache;
mod cell;
mod scheduler;
pub mod tables;

pub use cache::EdgeVertexCache;
pub use cell::{compute_cube_index, CellProcessor};
pub use scheduler::{SliceScheduler, PROGRESS_MESSAGE};
pub use tables::{
    triangles, ALLOWED_CONTOURS, CORNER_OFFSETS, EDGE_ID_INFO, EDGE_TABLE, EDGE_VERTICES,
    TRI_TABLE,
};

use crate::builder::{vertex_chunk_size, Geometry, Lines, LinesBuilder, Mesh, MeshBuilder, OutputMode};
use crate::error::IsoCoreError;
use crate::traits::{GeometryBuilder, IdField, ScalarField, TaskContext};
use crate::types::Region;

/// Inputs of one extraction.
pub struct MarchingCubesParams<'a, S: ?Sized> {
    /// Scalar field to contour.
    pub field: &'a S,
    /// Optional per-sample group ids, same shape as `field`.
    pub ids: Option<&'a dyn IdField>,
    /// Surface threshold. Samples strictly below it are inside.
    pub iso_level: f32,
    /// Sub-box to process; the whole field when `None`.
    pub region: Option<Region>,
}

impl<'a, S: ScalarField + ?Sized> MarchingCubesParams<'a, S> {
    /// Extract the whole field at `iso_level` without group ids.
    pub fn new(field: &'a S, iso_level: f32) -> Self {
        Self {
            field,
            ids: None,
            iso_level,
            region: None,
        }
    }

    /// Attach a group id field.
    pub fn with_ids(mut self, ids: &'a dyn IdField) -> Self {
        self.ids = Some(ids);
        self
    }

    /// Restrict the extraction to grid points in `[bottom_left, top_right)`.
    pub fn with_region(mut self, bottom_left: [usize; 3], top_right: [usize; 3]) -> Self {
        self.region = Some(Region::new(bottom_left, top_right));
        self
    }

    /// Region that will be processed.
    pub fn region(&self) -> Region {
        self.region
            .unwrap_or_else(|| Region::full(self.field.dimensions()))
    }

    /// Check the region and the id field against the scalar field.
    ///
    /// # Errors
    /// * `InvalidRegion` / `RegionOutOfBounds` for a bad region
    /// * `IdFieldMismatch` if the id field has a different shape
    pub fn validate(&self) -> Result<Region, IsoCoreError> {
        let dimensions = self.field.dimensions();
        let region = self.region();
        region.validate(dimensions)?;

        if let Some(ids) = self.ids {
            let got = ids.dimensions();
            if got != dimensions {
                return Err(IsoCoreError::IdFieldMismatch {
                    expected: dimensions,
                    got,
                });
            }
        }
        Ok(region)
    }
}

/// Run an extraction into a caller-supplied builder.
///
/// # Errors
/// Configuration errors from [`MarchingCubesParams::validate`], reported before
/// any cell is processed, or `Cancelled` from the task context.
pub fn compute_with_builder<S, B, C>(
    params: &MarchingCubesParams<'_, S>,
    builder: B,
    ctx: &mut C,
) -> Result<B::Output, IsoCoreError>
where
    S: ScalarField + ?Sized,
    B: GeometryBuilder,
    C: TaskContext + ?Sized,
{
    let region = params.validate()?;
    log::debug!(
        "marching cubes: region {:?}..{:?}, iso {}, ids {}",
        region.bottom_left,
        region.top_right,
        params.iso_level,
        params.ids.is_some()
    );

    SliceScheduler::new(params.field, params.ids, params.iso_level, region, builder).run(ctx)
}

/// Extract a triangle mesh.
pub fn compute_mesh<S, C>(params: &MarchingCubesParams<'_, S>, ctx: &mut C) -> Result<Mesh, IsoCoreError>
where
    S: ScalarField + ?Sized,
    C: TaskContext + ?Sized,
{
    let chunk = vertex_chunk_size(params.region().extent());
    let mesh = compute_with_builder(params, MeshBuilder::new(chunk), ctx)?;
    log::debug!(
        "marching cubes: {} vertices, {} triangles",
        mesh.vertex_count,
        mesh.triangle_count
    );
    Ok(mesh)
}

/// Extract a wireframe of the surface's triangle edges.
pub fn compute_lines<S, C>(params: &MarchingCubesParams<'_, S>, ctx: &mut C) -> Result<Lines, IsoCoreError>
where
    S: ScalarField + ?Sized,
    C: TaskContext + ?Sized,
{
    let chunk = vertex_chunk_size(params.region().extent());
    let lines = compute_with_builder(params, LinesBuilder::new(chunk), ctx)?;
    log::debug!(
        "marching cubes: {} vertices, {} segments",
        lines.vertex_count,
        lines.line_count
    );
    Ok(lines)
}

/// Extract either output shape.
pub fn extract<S, C>(
    params: &MarchingCubesParams<'_, S>,
    mode: OutputMode,
    ctx: &mut C,
) -> Result<Geometry, IsoCoreError>
where
    S: ScalarField + ?Sized,
    C: TaskContext + ?Sized,
{
    match mode {
        OutputMode::Mesh => compute_mesh(params, ctx).map(Geometry::Mesh),
        OutputMode::Lines => compute_lines(params, ctx).map(Geometry::Lines),
    }
}

//! Traits at the boundaries of the extraction engine.
//!
//! Field traits let any storage (dense arrays, procedural evaluators, memory-mapped
//! maps) feed the engine; [`GeometryBuilder`] lets the same cell processing drive
//! either a triangle mesh or a wireframe; [`TaskContext`] is the cooperative
//! progress and cancellation hook.

use core::ops::ControlFlow;

use crate::types::Point3;

/// A sampled scalar field over a 3D index space.
///
/// `get` is only called with indices inside the processed region; implementations
/// should panic on out-of-range indices rather than clamp.
pub trait ScalarField {
    /// Number of samples along each axis.
    fn dimensions(&self) -> [usize; 3];

    /// Sample at grid point `(i, j, k)`.
    fn get(&self, i: usize, j: usize, k: usize) -> f32;
}

/// Per-sample integer tag used to group the extracted geometry.
///
/// Two sentinel values are recognised: [`GROUP_NONE`](crate::GROUP_NONE) (`-1`) defers
/// to the other endpoint of an edge, [`GROUP_EXCLUDED`](crate::GROUP_EXCLUDED) (`-2`)
/// removes the cell from the output.
pub trait IdField {
    /// Number of samples along each axis. Must equal the scalar field's.
    fn dimensions(&self) -> [usize; 3];

    /// Id at grid point `(i, j, k)`.
    fn get(&self, i: usize, j: usize, k: usize) -> i32;
}

impl<T: ScalarField + ?Sized> ScalarField for &T {
    #[inline]
    fn dimensions(&self) -> [usize; 3] {
        (**self).dimensions()
    }

    #[inline]
    fn get(&self, i: usize, j: usize, k: usize) -> f32 {
        (**self).get(i, j, k)
    }
}

/// Progress snapshot reported once per completed slice.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Progress {
    /// Human readable stage.
    pub message: &'static str,
    /// Cells processed so far.
    pub current: usize,
    /// Total cells in the region.
    pub max: usize,
}

/// Cooperative progress reporting and cancellation.
pub trait TaskContext {
    /// Whether the engine should stop at the next checkpoint to report progress.
    fn should_update(&self) -> bool;

    /// Report progress. Returning `Break` abandons the extraction.
    fn update(&mut self, progress: Progress) -> ControlFlow<()>;
}

/// Context that never reports and never cancels.
#[derive(Debug, Clone, Copy, Default)]
pub struct Synchronous;

impl TaskContext for Synchronous {
    #[inline]
    fn should_update(&self) -> bool {
        false
    }

    #[inline]
    fn update(&mut self, _progress: Progress) -> ControlFlow<()> {
        ControlFlow::Continue(())
    }
}

impl<T: TaskContext + ?Sized> TaskContext for &mut T {
    #[inline]
    fn should_update(&self) -> bool {
        (**self).should_update()
    }

    #[inline]
    fn update(&mut self, progress: Progress) -> ControlFlow<()> {
        (**self).update(progress)
    }
}

/// Sink for the geometry produced by the cell processor.
///
/// Vertices, normals and groups arrive in lockstep: every `add_vertex` is paired
/// with exactly one `add_normal` and one `add_group`.
pub trait GeometryBuilder {
    /// Finished geometry type.
    type Output;

    /// Append a vertex position and return its index.
    fn add_vertex(&mut self, position: Point3) -> u32;

    /// Append the normal of the most recent vertex.
    fn add_normal(&mut self, normal: Point3);

    /// Append the group of the most recent vertex.
    fn add_group(&mut self, group: i32);

    /// Called once per non-empty cell before its primitives are emitted.
    fn begin_cell(&mut self) {}

    /// Emit the primitive(s) of one marching cubes triangle.
    ///
    /// `vert_list` maps the cell's 12 edges to vertex indices; `a`, `b`, `c` are
    /// edge indices in winding order.
    fn add_triangle(&mut self, vert_list: &[u32; 12], a: usize, b: usize, c: usize, edge_filter: u8);

    /// Number of vertices emitted so far.
    fn vertex_count(&self) -> usize;

    /// Consume the builder and compact its buffers.
    fn finish(self) -> Self::Output;
}

//! Geometry builders and the finished geometry buffers.
//!
//! [`MeshBuilder`] collects triangles, [`LinesBuilder`] collects the contour segments
//! of the same triangles for wireframe display. Buffers grow in fixed chunks sized
//! from the region volume, and are compacted when the builder is finished.

use crate::alloc_prelude::Vec;
use crate::marching_cubes::tables::ALLOWED_CONTOURS;
use crate::traits::GeometryBuilder;
use crate::types::Point3;

/// Smallest chunk (in vertices) used for output buffers.
pub const MIN_CHUNK_SIZE: usize = 1024;

/// Largest chunk (in vertices) used for output buffers.
pub const MAX_CHUNK_SIZE: usize = 262_144;

/// Buffer chunk size for a region with the given extent.
///
/// One vertex per 32 grid points, clamped to `[MIN_CHUNK_SIZE, MAX_CHUNK_SIZE]`.
#[inline]
pub fn vertex_chunk_size(extent: [usize; 3]) -> usize {
    let volume = extent[0]
        .saturating_mul(extent[1])
        .saturating_mul(extent[2]);
    (volume / 32).clamp(MIN_CHUNK_SIZE, MAX_CHUNK_SIZE)
}

/// Append `values`, growing the buffer by `chunk` elements of width `N` when full.
#[inline]
fn push_chunked<T: Copy, const N: usize>(buffer: &mut Vec<T>, chunk: usize, values: [T; N]) {
    if buffer.len() + N > buffer.capacity() {
        buffer.reserve_exact(chunk * N);
    }
    buffer.extend_from_slice(&values);
}

/// Output shape of an extraction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum OutputMode {
    /// Triangle mesh with normals.
    #[default]
    Mesh,
    /// Line segments along the triangle edges.
    Lines,
}

/// Triangle mesh in field-index space.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Mesh {
    /// Vertex positions, 3 floats per vertex.
    pub vertices: Vec<f32>,
    /// Vertex normals, 3 floats per vertex (unnormalised).
    pub normals: Vec<f32>,
    /// Group id per vertex.
    pub groups: Vec<f32>,
    /// Triangle vertex indices, 3 per triangle.
    pub indices: Vec<u32>,
    /// Number of vertices.
    pub vertex_count: usize,
    /// Number of triangles.
    pub triangle_count: usize,
}

impl Mesh {
    /// Whether the mesh has no triangles.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.triangle_count == 0
    }

    /// Position of vertex `index`.
    #[inline]
    pub fn position(&self, index: usize) -> Point3 {
        let o = 3 * index;
        Point3::new(self.vertices[o], self.vertices[o + 1], self.vertices[o + 2])
    }

    /// Normal of vertex `index`.
    #[inline]
    pub fn normal(&self, index: usize) -> Point3 {
        let o = 3 * index;
        Point3::new(self.normals[o], self.normals[o + 1], self.normals[o + 2])
    }

    /// Group of vertex `index`.
    #[inline]
    pub fn group(&self, index: usize) -> i32 {
        self.groups[index] as i32
    }

    /// Vertex indices of triangle `index`.
    #[inline]
    pub fn triangle(&self, index: usize) -> [u32; 3] {
        let o = 3 * index;
        [self.indices[o], self.indices[o + 1], self.indices[o + 2]]
    }

    /// Iterate triangles as vertex index triples.
    pub fn triangles(&self) -> impl Iterator<Item = [u32; 3]> + '_ {
        self.indices
            .chunks_exact(3)
            .map(|tri| [tri[0], tri[1], tri[2]])
    }

    /// Iterate triangles as position triples.
    pub fn triangle_positions(&self) -> impl Iterator<Item = [Point3; 3]> + '_ {
        self.triangles().map(move |[a, b, c]| {
            [
                self.position(a as usize),
                self.position(b as usize),
                self.position(c as usize),
            ]
        })
    }

    /// Append another mesh, offsetting its indices.
    pub fn append(&mut self, other: &Mesh) {
        let offset = self.vertex_count as u32;
        self.vertices.extend_from_slice(&other.vertices);
        self.normals.extend_from_slice(&other.normals);
        self.groups.extend_from_slice(&other.groups);
        self.indices
            .extend(other.indices.iter().map(|&index| index + offset));
        self.vertex_count += other.vertex_count;
        self.triangle_count += other.triangle_count;
    }
}

/// Line soup in field-index space.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Lines {
    /// Vertex positions, 3 floats per vertex.
    pub vertices: Vec<f32>,
    /// Group id per vertex.
    pub groups: Vec<f32>,
    /// Segment vertex indices, 2 per segment.
    pub indices: Vec<u32>,
    /// Number of vertices.
    pub vertex_count: usize,
    /// Number of segments.
    pub line_count: usize,
}

impl Lines {
    /// Whether there are no segments.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.line_count == 0
    }

    /// Position of vertex `index`.
    #[inline]
    pub fn position(&self, index: usize) -> Point3 {
        let o = 3 * index;
        Point3::new(self.vertices[o], self.vertices[o + 1], self.vertices[o + 2])
    }

    /// Iterate segments as vertex index pairs.
    pub fn segments(&self) -> impl Iterator<Item = [u32; 2]> + '_ {
        self.indices.chunks_exact(2).map(|seg| [seg[0], seg[1]])
    }
}

/// Result of [`extract`](crate::marching_cubes::extract).
#[derive(Debug, Clone, PartialEq)]
pub enum Geometry {
    /// Triangle mesh.
    Mesh(Mesh),
    /// Wireframe.
    Lines(Lines),
}

impl Geometry {
    /// Number of vertices in either shape.
    pub fn vertex_count(&self) -> usize {
        match self {
            Geometry::Mesh(mesh) => mesh.vertex_count,
            Geometry::Lines(lines) => lines.vertex_count,
        }
    }

    /// The mesh, if this is one.
    pub fn into_mesh(self) -> Option<Mesh> {
        match self {
            Geometry::Mesh(mesh) => Some(mesh),
            Geometry::Lines(_) => None,
        }
    }

    /// The wireframe, if this is one.
    pub fn into_lines(self) -> Option<Lines> {
        match self {
            Geometry::Lines(lines) => Some(lines),
            Geometry::Mesh(_) => None,
        }
    }
}

/// Builds a [`Mesh`].
#[derive(Debug, Clone)]
pub struct MeshBuilder {
    chunk_size: usize,
    vertices: Vec<f32>,
    normals: Vec<f32>,
    groups: Vec<f32>,
    indices: Vec<u32>,
    triangle_count: usize,
}

impl MeshBuilder {
    /// Create a builder whose buffers grow by `chunk_size` vertices at a time.
    pub fn new(chunk_size: usize) -> Self {
        let chunk_size = chunk_size.max(1);
        Self {
            chunk_size,
            vertices: Vec::with_capacity(3 * chunk_size),
            normals: Vec::with_capacity(3 * chunk_size),
            groups: Vec::with_capacity(chunk_size),
            indices: Vec::with_capacity(3 * chunk_size),
            triangle_count: 0,
        }
    }

    /// Growth step in vertices.
    #[inline]
    pub fn chunk_size(&self) -> usize {
        self.chunk_size
    }
}

impl GeometryBuilder for MeshBuilder {
    type Output = Mesh;

    #[inline]
    fn add_vertex(&mut self, position: Point3) -> u32 {
        let index = (self.vertices.len() / 3) as u32;
        push_chunked(&mut self.vertices, self.chunk_size, position.as_array());
        index
    }

    #[inline]
    fn add_normal(&mut self, normal: Point3) {
        push_chunked(&mut self.normals, self.chunk_size, normal.as_array());
    }

    #[inline]
    fn add_group(&mut self, group: i32) {
        push_chunked(&mut self.groups, self.chunk_size, [group as f32]);
    }

    #[inline]
    fn add_triangle(&mut self, vert_list: &[u32; 12], a: usize, b: usize, c: usize, _edge_filter: u8) {
        push_chunked(
            &mut self.indices,
            self.chunk_size,
            [vert_list[a], vert_list[b], vert_list[c]],
        );
        self.triangle_count += 1;
    }

    #[inline]
    fn vertex_count(&self) -> usize {
        self.vertices.len() / 3
    }

    fn finish(mut self) -> Mesh {
        self.vertices.shrink_to_fit();
        self.normals.shrink_to_fit();
        self.groups.shrink_to_fit();
        self.indices.shrink_to_fit();
        Mesh {
            vertex_count: self.vertices.len() / 3,
            triangle_count: self.triangle_count,
            vertices: self.vertices,
            normals: self.normals,
            groups: self.groups,
            indices: self.indices,
        }
    }
}

/// Builds [`Lines`] from the triangles of each cell.
///
/// A segment is emitted when its [`ALLOWED_CONTOURS`] mask intersects the edge
/// filter, and at most once per cell.
#[derive(Debug, Clone)]
pub struct LinesBuilder {
    chunk_size: usize,
    vertices: Vec<f32>,
    groups: Vec<f32>,
    indices: Vec<u32>,
    line_count: usize,
    emitted: [u16; 12],
}

impl LinesBuilder {
    /// Create a builder whose buffers grow by `chunk_size` vertices at a time.
    pub fn new(chunk_size: usize) -> Self {
        let chunk_size = chunk_size.max(1);
        Self {
            chunk_size,
            vertices: Vec::with_capacity(3 * chunk_size),
            groups: Vec::with_capacity(chunk_size),
            indices: Vec::with_capacity(2 * chunk_size),
            line_count: 0,
            emitted: [0; 12],
        }
    }

    fn add_segment(&mut self, vert_list: &[u32; 12], a: usize, b: usize, edge_filter: u8) {
        if ALLOWED_CONTOURS[a][b] & edge_filter == 0 || self.emitted[a] & (1 << b) != 0 {
            return;
        }
        self.emitted[a] |= 1 << b;
        self.emitted[b] |= 1 << a;
        push_chunked(
            &mut self.indices,
            self.chunk_size,
            [vert_list[a], vert_list[b]],
        );
        self.line_count += 1;
    }
}

impl GeometryBuilder for LinesBuilder {
    type Output = Lines;

    #[inline]
    fn add_vertex(&mut self, position: Point3) -> u32 {
        let index = (self.vertices.len() / 3) as u32;
        push_chunked(&mut self.vertices, self.chunk_size, position.as_array());
        index
    }

    #[inline]
    fn add_normal(&mut self, _normal: Point3) {}

    #[inline]
    fn add_group(&mut self, group: i32) {
        push_chunked(&mut self.groups, self.chunk_size, [group as f32]);
    }

    #[inline]
    fn begin_cell(&mut self) {
        self.emitted = [0; 12];
    }

    fn add_triangle(&mut self, vert_list: &[u32; 12], a: usize, b: usize, c: usize, edge_filter: u8) {
        self.add_segment(vert_list, a, b, edge_filter);
        self.add_segment(vert_list, b, c, edge_filter);
        self.add_segment(vert_list, c, a, edge_filter);
    }

    #[inline]
    fn vertex_count(&self) -> usize {
        self.vertices.len() / 3
    }

    fn finish(mut self) -> Lines {
        self.vertices.shrink_to_fit();
        self.groups.shrink_to_fit();
        self.indices.shrink_to_fit();
        Lines {
            vertex_count: self.vertices.len() / 3,
            line_count: self.line_count,
            vertices: self.vertices,
            groups: self.groups,
            indices: self.indices,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::marching_cubes::tables::{FILTER_ALL, FILTER_ALWAYS};

    #[test]
    fn test_vertex_chunk_size_bounds() {
        assert_eq!(vertex_chunk_size([2, 2, 2]), MIN_CHUNK_SIZE);
        assert_eq!(vertex_chunk_size([64, 64, 64]), 64 * 64 * 64 / 32);
        assert_eq!(vertex_chunk_size([1024, 1024, 1024]), MAX_CHUNK_SIZE);
    }

    #[test]
    fn test_push_chunked_grows_by_chunk() {
        let mut buffer: Vec<u32> = Vec::new();
        push_chunked(&mut buffer, 4, [1, 2]);
        assert!(buffer.capacity() >= 8);
        assert_eq!(buffer, [1, 2]);
    }

    #[test]
    fn test_mesh_builder_collects_triangle() {
        let mut builder = MeshBuilder::new(16);
        let mut vert_list = [0u32; 12];
        for (edge, position) in [(0, 0.0), (3, 1.0), (8, 2.0)] {
            builder.add_group(7);
            vert_list[edge] = builder.add_vertex(Point3::splat(position));
            builder.add_normal(Point3::new(0.0, 0.0, 1.0));
        }
        builder.begin_cell();
        builder.add_triangle(&vert_list, 0, 8, 3, FILTER_ALL);

        let mesh = builder.finish();
        assert_eq!(mesh.vertex_count, 3);
        assert_eq!(mesh.triangle_count, 1);
        assert_eq!(mesh.triangle(0), [0, 2, 1]);
        assert_eq!(mesh.position(2), Point3::splat(2.0));
        assert_eq!(mesh.group(1), 7);
        assert_eq!(mesh.normals.len(), 9);
    }

    #[test]
    fn test_mesh_append_offsets_indices() {
        let mut a = Mesh {
            vertices: [0.0; 9].to_vec(),
            normals: [0.0; 9].to_vec(),
            groups: [0.0; 3].to_vec(),
            indices: [0, 1, 2].to_vec(),
            vertex_count: 3,
            triangle_count: 1,
        };
        let b = a.clone();
        a.append(&b);
        assert_eq!(a.vertex_count, 6);
        assert_eq!(a.triangle_count, 2);
        assert_eq!(a.triangle(1), [3, 4, 5]);
    }

    #[test]
    fn test_lines_builder_deduplicates_within_cell() {
        let mut builder = LinesBuilder::new(16);
        let mut vert_list = [0u32; 12];
        for edge in [8, 9, 10, 11] {
            builder.add_group(0);
            vert_list[edge] = builder.add_vertex(Point3::splat(edge as f32));
        }
        builder.begin_cell();
        // the quad of configuration 15
        builder.add_triangle(&vert_list, 9, 8, 10, FILTER_ALL);
        builder.add_triangle(&vert_list, 10, 8, 11, FILTER_ALL);

        let lines = builder.finish();
        // four quad sides plus one shared diagonal
        assert_eq!(lines.line_count, 5);
        assert_eq!(lines.indices.len(), 10);
    }

    #[test]
    fn test_lines_builder_filters_min_faces() {
        let mut builder = LinesBuilder::new(16);
        let mut vert_list = [0u32; 12];
        for edge in [8, 9, 10, 11] {
            builder.add_group(0);
            vert_list[edge] = builder.add_vertex(Point3::splat(edge as f32));
        }
        builder.begin_cell();
        builder.add_triangle(&vert_list, 9, 8, 10, FILTER_ALWAYS);
        builder.add_triangle(&vert_list, 10, 8, 11, FILTER_ALWAYS);

        let lines = builder.finish();
        // 8-9 (y = 0 face) and 8-11 (x = 0 face) belong to the neighbours
        assert_eq!(lines.line_count, 3);
    }
}

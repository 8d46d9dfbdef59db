//! Per-cell marching cubes.

use crate::interpolation::{crossing_parameter, negative_gradient, resolve_group};
use crate::traits::{GeometryBuilder, IdField, ScalarField};
use crate::types::Point3;

use super::cache::EdgeVertexCache;
use super::tables::{triangles, CORNER_OFFSETS, EDGE_TABLE, EDGE_VERTICES};

/// A crossing that passed group resolution but has no vertex yet.
#[derive(Debug, Clone, Copy)]
struct Crossing {
    t: f32,
    group: i32,
}

/// Compute the configuration index from the corner values.
///
/// Bit `c` is set when corner `c` is strictly below the iso-level.
#[inline]
pub fn compute_cube_index(corner_values: &[f32; 8], iso_level: f32) -> u8 {
    let mut index = 0u8;
    for (corner, &value) in corner_values.iter().enumerate() {
        if value < iso_level {
            index |= 1 << corner;
        }
    }
    index
}

/// Turns grid cells into builder calls, sharing edge vertices through the cache.
pub struct CellProcessor<'a, S: ?Sized, B> {
    field: &'a S,
    ids: Option<&'a dyn IdField>,
    iso_level: f32,
    cache: EdgeVertexCache,
    builder: B,
    vert_list: [u32; 12],
}

impl<'a, S, B> CellProcessor<'a, S, B>
where
    S: ScalarField + ?Sized,
    B: GeometryBuilder,
{
    /// Create a processor over `field` with a fresh cache.
    pub fn new(field: &'a S, ids: Option<&'a dyn IdField>, iso_level: f32, builder: B) -> Self {
        let [nx, ny, _] = field.dimensions();
        Self {
            field,
            ids,
            iso_level,
            cache: EdgeVertexCache::new(nx, ny),
            builder,
            vert_list: [0; 12],
        }
    }

    /// The edge vertex cache.
    #[inline]
    pub fn cache(&self) -> &EdgeVertexCache {
        &self.cache
    }

    /// Forget cached edges of a finished slice.
    #[inline]
    pub fn evict_slice(&mut self, k: usize) {
        self.cache.evict_slice(k);
    }

    /// Vertices emitted so far.
    #[inline]
    pub fn vertex_count(&self) -> usize {
        self.builder.vertex_count()
    }

    /// Finish the builder.
    pub fn finish(self) -> B::Output {
        self.builder.finish()
    }

    /// Process the cell whose lowest corner is `(i, j, k)`.
    ///
    /// Nothing is emitted for cells entirely below or above the iso-level, nor for
    /// cells with a crossing whose group resolves to the excluded id.
    ///
    /// # Returns
    /// `true` if the cell was dropped because of an excluded crossing.
    pub fn process_cell(&mut self, i: usize, j: usize, k: usize, edge_filter: u8) -> bool {
        let mut corner_values = [0.0f32; 8];
        for (value, offset) in corner_values.iter_mut().zip(CORNER_OFFSETS.iter()) {
            *value = self.field.get(i + offset[0], j + offset[1], k + offset[2]);
        }

        let cube_index = compute_cube_index(&corner_values, self.iso_level);
        if cube_index == 0 || cube_index == 255 {
            return false;
        }
        let edge_flags = EDGE_TABLE[cube_index as usize];

        // Resolve every new crossing before emitting anything, so an excluded
        // crossing drops the whole cell without leaving orphan vertices.
        let mut pending: [Option<Crossing>; 12] = [None; 12];
        for edge in 0..12 {
            if edge_flags & (1 << edge) == 0 {
                continue;
            }
            if let Some(vertex) = self.cache.get(i, j, k, edge) {
                self.vert_list[edge] = vertex;
                continue;
            }
            match self.resolve_crossing(i, j, k, edge, &corner_values) {
                Some(crossing) => pending[edge] = Some(crossing),
                None => return true,
            }
        }

        for (edge, crossing) in pending.iter().enumerate() {
            if let Some(crossing) = crossing {
                self.vert_list[edge] = self.emit_vertex(i, j, k, edge, *crossing);
            }
        }

        self.builder.begin_cell();
        let flip = self.iso_level < 0.0;
        for [l, m, n] in triangles(cube_index) {
            if flip {
                self.builder.add_triangle(&self.vert_list, n, m, l, edge_filter);
            } else {
                self.builder.add_triangle(&self.vert_list, l, m, n, edge_filter);
            }
        }
        false
    }

    fn resolve_crossing(
        &self,
        i: usize,
        j: usize,
        k: usize,
        edge: usize,
        corner_values: &[f32; 8],
    ) -> Option<Crossing> {
        let (lo, hi) = EDGE_VERTICES[edge];
        let t = crossing_parameter(corner_values[lo], corner_values[hi], self.iso_level);

        let group = match self.ids {
            Some(ids) => {
                let a = CORNER_OFFSETS[lo];
                let b = CORNER_OFFSETS[hi];
                let u = ids.get(i + a[0], j + a[1], k + a[2]);
                let v = ids.get(i + b[0], j + b[1], k + b[2]);
                resolve_group(u, v)?
            }
            None => 0,
        };

        Some(Crossing { t, group })
    }

    fn emit_vertex(&mut self, i: usize, j: usize, k: usize, edge: usize, crossing: Crossing) -> u32 {
        let (lo, hi) = EDGE_VERTICES[edge];
        let a = CORNER_OFFSETS[lo];
        let b = CORNER_OFFSETS[hi];
        let (li, lj, lk) = (i + a[0], j + a[1], k + a[2]);
        let (hi_, hj, hk) = (i + b[0], j + b[1], k + b[2]);

        let p0 = Point3::from_indices(li, lj, lk);
        let p1 = Point3::from_indices(hi_, hj, hk);
        let n0 = negative_gradient(self.field, li, lj, lk);
        let n1 = negative_gradient(self.field, hi_, hj, hk);

        let mut normal = n0.lerp(n1, crossing.t);
        // keep normals pointing the same way for negative and positive iso-levels
        if self.iso_level < 0.0 {
            normal = -normal;
        }

        self.builder.add_group(crossing.group);
        let vertex = self.builder.add_vertex(p0.lerp(p1, crossing.t));
        self.builder.add_normal(normal);
        self.cache.set(i, j, k, edge, vertex);
        vertex
    }
}

//! Two-slice edge vertex cache.
//!
//! Maps the canonical id of a cube edge to the index of the vertex already emitted
//! for it. Only the slices `k` and `k + 1` of the cell currently being processed
//! are addressable, so memory is `O(nX * nY)` whatever the depth of the field.

use crate::alloc_prelude::Vec;

use super::tables::EDGE_ID_INFO;

/// Edge-to-vertex table over two z-slices.
///
/// Slots hold `vertex_index + 1`; zero marks an empty slot.
#[derive(Debug, Clone)]
pub struct EdgeVertexCache {
    nx: usize,
    ny: usize,
    slots: Vec<u32>,
}

impl EdgeVertexCache {
    /// Allocate an empty cache for a field with `nx * ny` samples per slice.
    pub fn new(nx: usize, ny: usize) -> Self {
        let mut slots = Vec::new();
        slots.resize(3 * nx * ny * 2, 0);
        Self { nx, ny, slots }
    }

    /// Number of `u32` slots held by the cache.
    #[inline]
    pub fn slot_count(&self) -> usize {
        self.slots.len()
    }

    /// Canonical id of `edge` of cell `(i, j, k)`.
    ///
    /// Adjacent cells that share a physical edge map it to the same id.
    #[inline]
    pub fn edge_id(&self, i: usize, j: usize, k: usize, edge: usize) -> usize {
        let info = EDGE_ID_INFO[edge];
        let plane = (k + info.dk) % 2;
        3 * (self.nx * (plane * self.ny + j + info.dj) + i + info.di) + info.channel
    }

    /// Vertex index cached for `edge` of cell `(i, j, k)`, if any.
    #[inline]
    pub fn get(&self, i: usize, j: usize, k: usize, edge: usize) -> Option<u32> {
        match self.slots[self.edge_id(i, j, k, edge)] {
            0 => None,
            stored => Some(stored - 1),
        }
    }

    /// Record the vertex emitted for `edge` of cell `(i, j, k)`.
    #[inline]
    pub fn set(&mut self, i: usize, j: usize, k: usize, edge: usize, vertex: u32) {
        let id = self.edge_id(i, j, k, edge);
        self.slots[id] = vertex + 1;
    }

    /// Forget every edge keyed by slice `k`.
    ///
    /// Called once slice `k` is complete; the next slice only shares the plane `k + 1`
    /// with it, and that plane lives in the other half of the buffer.
    pub fn evict_slice(&mut self, k: usize) {
        let half = 3 * self.nx * self.ny;
        let range = if k % 2 == 0 { 0..half } else { half..2 * half };
        self.slots[range].fill(0);
    }
}

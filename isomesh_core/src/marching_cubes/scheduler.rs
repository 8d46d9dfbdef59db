//! Slice-by-slice traversal of a region.
//!
//! Cells are visited with `i` fastest and `k` slowest. The edge filter carries the
//! "first column / first row / first slice" state to the builder, the cache is
//! evicted as soon as a slice no longer needs it, and progress is reported to the
//! task context between slices.
//!
//! A cell dropped for an excluded crossing emits none of its max-face segments, so
//! the cell after it on each axis is given that axis' first-element bit and draws
//! the shared face itself.

use core::ops::ControlFlow;

use crate::alloc_prelude::Vec;
use crate::error::IsoCoreError;
use crate::traits::{GeometryBuilder, IdField, Progress, ScalarField, TaskContext};
use crate::types::Region;

use super::cell::CellProcessor;
use super::tables::{FILTER_ALL, FILTER_FIRST_X, FILTER_FIRST_Y, FILTER_FIRST_Z};

/// Message attached to every progress report.
pub const PROGRESS_MESSAGE: &str = "Computing surface...";

/// Drives a [`CellProcessor`] over every cell of a region.
pub struct SliceScheduler<'a, S: ?Sized, B> {
    processor: CellProcessor<'a, S, B>,
    region: Region,
    edge_filter: u8,
    // per cell of a slice: dropped in the current slice if already visited, else in the previous one
    dropped: Vec<bool>,
}

impl<'a, S, B> SliceScheduler<'a, S, B>
where
    S: ScalarField + ?Sized,
    B: GeometryBuilder,
{
    /// Create a scheduler. The region must already be validated against `field`.
    pub fn new(
        field: &'a S,
        ids: Option<&'a dyn IdField>,
        iso_level: f32,
        region: Region,
        builder: B,
    ) -> Self {
        let mut dropped = Vec::new();
        dropped.resize(region.cell_range(0).len() * region.cell_range(1).len(), false);
        Self {
            processor: CellProcessor::new(field, ids, iso_level, builder),
            region,
            edge_filter: FILTER_ALL,
            dropped,
        }
    }

    /// Process every slice and finish the builder.
    ///
    /// # Errors
    /// `Cancelled` if the context breaks at a progress checkpoint.
    pub fn run<C: TaskContext + ?Sized>(mut self, ctx: &mut C) -> Result<B::Output, IsoCoreError> {
        let xs = self.region.cell_range(0);
        let ys = self.region.cell_range(1);
        let zs = self.region.cell_range(2);

        let slice_size = xs.len() * ys.len();
        let size = slice_size * zs.len();
        let mut done = 0;

        for k in zs {
            self.slice(k);
            self.processor.evict_slice(k);
            done += slice_size;

            log::trace!(
                "slice {} done: {}/{} cells, {} vertices",
                k,
                done,
                size,
                self.processor.vertex_count()
            );

            if ctx.should_update() {
                let progress = Progress {
                    message: PROGRESS_MESSAGE,
                    current: done,
                    max: size,
                };
                if let ControlFlow::Break(()) = ctx.update(progress) {
                    log::debug!("extraction cancelled after slice {}", k);
                    return Err(IsoCoreError::Cancelled);
                }
            }

            self.edge_filter &= !FILTER_FIRST_Z;
        }

        Ok(self.processor.finish())
    }

    fn slice(&mut self, k: usize) {
        let xs = self.region.cell_range(0);
        let width = xs.len();

        self.edge_filter |= FILTER_FIRST_Y;
        for (row, j) in self.region.cell_range(1).enumerate() {
            self.edge_filter |= FILTER_FIRST_X;
            let mut left_dropped = false;
            for (col, i) in xs.clone().enumerate() {
                let cell = row * width + col;
                let mut filter = self.edge_filter;
                if left_dropped {
                    filter |= FILTER_FIRST_X;
                }
                if row > 0 && self.dropped[cell - width] {
                    filter |= FILTER_FIRST_Y;
                }
                if self.dropped[cell] {
                    filter |= FILTER_FIRST_Z;
                }

                left_dropped = self.processor.process_cell(i, j, k, filter);
                self.dropped[cell] = left_dropped;
                self.edge_filter &= !FILTER_FIRST_X;
            }
            self.edge_filter &= !FILTER_FIRST_Y;
        }
    }
}

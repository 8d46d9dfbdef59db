//! Parallel mesh extraction over z-slabs.
//!
//! The region's cell slices are split into contiguous slabs, each extracted on the
//! rayon pool with its own edge cache, and the slab meshes are concatenated in z
//! order. Vertices on the planes between slabs are emitted once per slab.

use std::ops::Range;
use std::time::Instant;

use rayon::prelude::*;

use isomesh_core::{compute_mesh, Mesh, OutputMode, Synchronous};

use crate::config::ExtractionConfig;
use crate::error::{IsoMeshError, Result};
use crate::volume::Volume;

/// Split `cells` into at most `slabs` contiguous, non-empty ranges.
pub fn slab_ranges(cells: Range<usize>, slabs: usize) -> Vec<Range<usize>> {
    let count = cells.len();
    if count == 0 {
        return Vec::new();
    }
    let slabs = slabs.clamp(1, count);
    let base = count / slabs;
    let extra = count % slabs;

    let mut ranges = Vec::with_capacity(slabs);
    let mut start = cells.start;
    for s in 0..slabs {
        let len = base + usize::from(s < extra);
        ranges.push(start..start + len);
        start += len;
    }
    ranges
}

impl Volume {
    /// Extract a mesh using every thread of the rayon pool.
    pub fn extract_mesh_parallel(&self, config: &ExtractionConfig) -> Result<Mesh> {
        self.extract_mesh_slabs(config, rayon::current_num_threads())
    }

    /// Extract a mesh as `slabs` independent z-slabs processed in parallel.
    ///
    /// Produces the same triangles as a serial extraction, with seam vertices
    /// duplicated. Progress is not reported.
    ///
    /// # Errors
    /// `InvalidConfig` for wireframe output, plus the errors of
    /// [`Volume::extract`].
    pub fn extract_mesh_slabs(&self, config: &ExtractionConfig, slabs: usize) -> Result<Mesh> {
        if config.mode != OutputMode::Mesh {
            return Err(IsoMeshError::InvalidConfig {
                message: "parallel extraction only produces meshes".to_string(),
            });
        }

        // validate once up front so every slab sees a good region
        self.params(config)?.validate()?;

        let region = self.region(config);
        let ranges = slab_ranges(region.cell_range(2), slabs);
        let start = Instant::now();

        let parts = ranges
            .par_iter()
            .map(|cells| -> Result<Mesh> {
                // a slab of cells [c0, c1) reads grid points [c0, c1]
                let mut bottom_left = region.bottom_left;
                let mut top_right = region.top_right;
                bottom_left[2] = cells.start;
                top_right[2] = cells.end + 1;

                let params = self
                    .params(config)?
                    .with_region(bottom_left, top_right);
                Ok(compute_mesh(&params, &mut Synchronous)?)
            })
            .collect::<Result<Vec<Mesh>>>()?;

        let mut mesh = Mesh::default();
        for part in &parts {
            mesh.append(part);
        }
        self.transform().apply_to_mesh(&mut mesh);

        log::info!(
            "extracted mesh in {} slabs at iso {}: {} vertices, {} triangles in {:?}",
            ranges.len(),
            config.iso_level,
            mesh.vertex_count,
            mesh.triangle_count,
            start.elapsed()
        );
        Ok(mesh)
    }
}

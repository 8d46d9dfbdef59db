//! Volume implementation.
//!
//! A scalar grid, an optional group id grid of the same shape and the transform
//! placing both in world space.

use std::time::Instant;

use isomesh_core::{
    extract, Geometry, IdField, IsoCoreError, MarchingCubesParams, OutputMode, Region, Synchronous,
    TaskContext,
};

use crate::config::ExtractionConfig;
use crate::error::{IsoMeshError, Result};
use crate::grid::DenseGrid;
use crate::transform::GridTransform;

/// Sampled volume ready for isosurface extraction.
///
/// # Example
///
/// ```ignore
/// use isomesh::{ExtractionConfig, VolumeBuilder};
///
/// let volume = VolumeBuilder::new([32, 32, 32])
///     .with_scalar_fn(|i, j, k| density(i, j, k))
///     .with_uniform_spacing(0.5)
///     .build()?;
///
/// let mesh = volume.extract(&ExtractionConfig::new(1.5))?.into_mesh();
/// ```
#[derive(Debug, Clone)]
pub struct Volume {
    scalars: DenseGrid<f32>,
    ids: Option<DenseGrid<i32>>,
    transform: GridTransform,
}

impl Volume {
    /// Assemble a volume from its parts.
    ///
    /// # Errors
    /// * `Core(IdFieldMismatch)` if the id grid has another shape
    /// * `InvalidSpacing` for a degenerate transform
    pub fn new(
        scalars: DenseGrid<f32>,
        ids: Option<DenseGrid<i32>>,
        transform: GridTransform,
    ) -> Result<Self> {
        transform.validate()?;
        if let Some(ids) = &ids {
            if ids.dimensions() != scalars.dimensions() {
                return Err(IsoCoreError::IdFieldMismatch {
                    expected: scalars.dimensions(),
                    got: ids.dimensions(),
                }
                .into());
            }
        }
        Ok(Self {
            scalars,
            ids,
            transform,
        })
    }

    /// Number of samples along each axis.
    #[inline]
    pub fn dimensions(&self) -> [usize; 3] {
        self.scalars.dimensions()
    }

    /// Scalar samples.
    #[inline]
    pub fn scalars(&self) -> &DenseGrid<f32> {
        &self.scalars
    }

    /// Group ids, if the volume has them.
    #[inline]
    pub fn ids(&self) -> Option<&DenseGrid<i32>> {
        self.ids.as_ref()
    }

    /// Grid to world mapping.
    #[inline]
    pub fn transform(&self) -> &GridTransform {
        &self.transform
    }

    /// Replace the grid to world mapping.
    pub fn set_transform(&mut self, transform: GridTransform) -> Result<()> {
        transform.validate()?;
        self.transform = transform;
        Ok(())
    }

    /// Engine parameters for `config`.
    ///
    /// # Errors
    /// `InvalidConfig` if ids are requested from a volume without them, or if the
    /// config itself is invalid.
    pub fn params(&self, config: &ExtractionConfig) -> Result<MarchingCubesParams<'_, DenseGrid<f32>>> {
        config.validate()?;

        let mut params = MarchingCubesParams::new(&self.scalars, config.iso_level);
        if let Some(region) = config.region {
            params = params.with_region(region.bottom_left, region.top_right);
        }
        if config.use_ids {
            let ids = self.ids.as_ref().ok_or_else(|| IsoMeshError::InvalidConfig {
                message: "group ids requested but the volume has none".to_string(),
            })?;
            params = params.with_ids(ids as &dyn IdField);
        }
        Ok(params)
    }

    /// Region `config` will process.
    pub fn region(&self, config: &ExtractionConfig) -> Region {
        config
            .region
            .unwrap_or_else(|| Region::full(self.dimensions()))
    }

    /// Extract the surface described by `config`, in world space.
    pub fn extract(&self, config: &ExtractionConfig) -> Result<Geometry> {
        self.extract_with_task(config, &mut Synchronous)
    }

    /// Extract with progress reporting and cancellation through `ctx`.
    ///
    /// # Errors
    /// Configuration errors before any work, or `Core(Cancelled)` if `ctx` stops
    /// the extraction. No partial geometry is returned.
    pub fn extract_with_task<C>(&self, config: &ExtractionConfig, ctx: &mut C) -> Result<Geometry>
    where
        C: TaskContext + ?Sized,
    {
        let params = self.params(config)?;
        let start = Instant::now();

        let mut geometry = extract(&params, config.mode, ctx)?;
        self.to_world(&mut geometry);

        log::info!(
            "extracted {} at iso {}: {} vertices in {:?}",
            match config.mode {
                OutputMode::Mesh => "mesh",
                OutputMode::Lines => "wireframe",
            },
            config.iso_level,
            geometry.vertex_count(),
            start.elapsed()
        );
        Ok(geometry)
    }

    /// Move extracted geometry from grid space into world space.
    pub fn to_world(&self, geometry: &mut Geometry) {
        match geometry {
            Geometry::Mesh(mesh) => self.transform.apply_to_mesh(mesh),
            Geometry::Lines(lines) => self.transform.apply_to_lines(lines),
        }
    }
}

impl AsRef<DenseGrid<f32>> for Volume {
    fn as_ref(&self) -> &DenseGrid<f32> {
        &self.scalars
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use isomesh_core::GROUP_NONE;

    fn plane_volume() -> Volume {
        let scalars = DenseGrid::from_fn([4, 4, 4], |_, _, k| k as f32 - 1.5).unwrap();
        let ids = DenseGrid::from_fn([4, 4, 4], |i, _, _| if i < 2 { 1 } else { GROUP_NONE }).unwrap();
        Volume::new(scalars, Some(ids), GridTransform::identity()).unwrap()
    }

    #[test]
    fn test_new_rejects_mismatched_ids() {
        let scalars = DenseGrid::filled([4, 4, 4], 0.0f32).unwrap();
        let ids = DenseGrid::filled([4, 4, 3], 0i32).unwrap();
        let err = Volume::new(scalars, Some(ids), GridTransform::identity()).unwrap_err();
        assert!(matches!(
            err,
            IsoMeshError::Core(IsoCoreError::IdFieldMismatch { .. })
        ));
    }

    #[test]
    fn test_extract_plane() {
        let mesh = plane_volume()
            .extract(&ExtractionConfig::new(0.0))
            .unwrap()
            .into_mesh()
            .unwrap();
        assert_eq!(mesh.vertex_count, 16);
        assert_eq!(mesh.triangle_count, 18);
        assert!(mesh.groups.iter().all(|&g| g == 0.0));
    }

    #[test]
    fn test_extract_with_ids() {
        let mesh = plane_volume()
            .extract(&ExtractionConfig::new(0.0).with_ids(true))
            .unwrap()
            .into_mesh()
            .unwrap();
        // ids of -1 have no fallback either side and pass through unchanged
        for v in 0..mesh.vertex_count {
            let expected = if mesh.position(v).x < 2.0 { 1 } else { GROUP_NONE };
            assert_eq!(mesh.group(v), expected);
        }
    }

    #[test]
    fn test_ids_requested_without_id_grid() {
        let scalars = DenseGrid::filled([3, 3, 3], 0.0f32).unwrap();
        let volume = Volume::new(scalars, None, GridTransform::identity()).unwrap();
        let err = volume
            .extract(&ExtractionConfig::new(0.0).with_ids(true))
            .unwrap_err();
        assert!(matches!(err, IsoMeshError::InvalidConfig { .. }));
    }

    #[test]
    fn test_extract_in_world_space() {
        let mut volume = plane_volume();
        volume
            .set_transform(GridTransform::new([10.0, 20.0, 30.0], [2.0, 2.0, 4.0]).unwrap())
            .unwrap();
        let mesh = volume
            .extract(&ExtractionConfig::new(0.0))
            .unwrap()
            .into_mesh()
            .unwrap();
        for v in 0..mesh.vertex_count {
            let p = mesh.position(v);
            assert_eq!(p.z, 30.0 + 1.5 * 4.0);
            assert!(p.x >= 10.0 && p.x <= 16.0);
            assert_eq!(mesh.normal(v).z, -0.5);
        }
    }

    #[test]
    fn test_region_errors_are_wrapped() {
        let err = plane_volume()
            .extract(&ExtractionConfig::new(0.0).with_region([0, 0, 0], [4, 4, 5]))
            .unwrap_err();
        assert!(matches!(
            err,
            IsoMeshError::Core(IsoCoreError::RegionOutOfBounds { axis: 2, .. })
        ));
    }
}

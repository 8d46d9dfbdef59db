//! VolumeBuilder pattern for constructing a Volume.
//!
//! Provides a fluent API for building volumes with validation.

use crate::error::{IsoMeshError, Result};
use crate::grid::{checked_len, DenseGrid};
use crate::transform::GridTransform;
use crate::volume::Volume;

/// Builder for constructing [`Volume`] instances.
///
/// Sample buffers and placement are collected first and checked together in
/// [`build`](Self::build).
///
/// # Example
///
/// ```ignore
/// use isomesh::VolumeBuilder;
///
/// let volume = VolumeBuilder::new([64, 64, 32])
///     .with_scalars(density)
///     .with_ids(atom_ids)
///     .with_origin([-16.0, -16.0, -8.0])
///     .with_uniform_spacing(0.5)
///     .build()?;
/// ```
#[derive(Debug, Clone)]
pub struct VolumeBuilder {
    dimensions: [usize; 3],
    scalars: Option<Vec<f32>>,
    ids: Option<Vec<i32>>,
    transform: GridTransform,
}

impl VolumeBuilder {
    /// Create a new builder for a volume of `dimensions` samples.
    ///
    /// # Example
    ///
    /// ```ignore
    /// let builder = VolumeBuilder::new([32, 32, 32]);
    /// ```
    pub fn new(dimensions: [usize; 3]) -> Self {
        Self {
            dimensions,
            scalars: None,
            ids: None,
            transform: GridTransform::identity(),
        }
    }

    /// Set the scalar samples, x-fastest.
    ///
    /// The buffer must hold exactly `nx * ny * nz` values; this is checked by
    /// [`build`](Self::build).
    pub fn with_scalars(mut self, values: Vec<f32>) -> Self {
        self.scalars = Some(values);
        self
    }

    /// Sample the scalar field from a function of the grid indices.
    ///
    /// # Example
    ///
    /// ```ignore
    /// // Sphere of radius 10 around the volume centre
    /// let builder = builder.with_scalar_fn(|i, j, k| {
    ///     let d = |a: usize| a as f32 - 15.5;
    ///     (d(i) * d(i) + d(j) * d(j) + d(k) * d(k)).sqrt() - 10.0
    /// });
    /// ```
    pub fn with_scalar_fn<F>(mut self, f: F) -> Self
    where
        F: Fn(usize, usize, usize) -> f32,
    {
        self.scalars = self.sample_count().map(|_| sample(self.dimensions, f));
        self
    }

    /// Set the group ids, x-fastest.
    pub fn with_ids(mut self, ids: Vec<i32>) -> Self {
        self.ids = Some(ids);
        self
    }

    /// Compute the group ids from a function of the grid indices.
    pub fn with_id_fn<F>(mut self, f: F) -> Self
    where
        F: Fn(usize, usize, usize) -> i32,
    {
        self.ids = self.sample_count().map(|_| sample(self.dimensions, f));
        self
    }

    /// World position of grid point `(0, 0, 0)`.
    pub fn with_origin(mut self, origin: [f32; 3]) -> Self {
        self.transform.origin = origin;
        self
    }

    /// World distance between samples along each axis.
    pub fn with_spacing(mut self, spacing: [f32; 3]) -> Self {
        self.transform.spacing = spacing;
        self
    }

    /// Same spacing on every axis.
    pub fn with_uniform_spacing(self, spacing: f32) -> Self {
        self.with_spacing([spacing; 3])
    }

    /// Number of samples the buffers must hold, `None` if it overflows `usize`.
    pub fn sample_count(&self) -> Option<usize> {
        self.dimensions
            .iter()
            .try_fold(1usize, |count, &n| count.checked_mul(n))
    }

    /// Build the final volume.
    ///
    /// Consumes the builder and returns the constructed volume.
    ///
    /// # Errors
    /// - `ZeroDimension` if any axis is empty
    /// - `DimensionOverflow` if the sample count does not fit in `usize`
    /// - `InvalidConfig` if no scalar samples were given
    /// - `InvalidFieldSize` if a buffer has the wrong length
    /// - `InvalidSpacing` if a spacing is not finite and positive
    pub fn build(self) -> Result<Volume> {
        checked_len(self.dimensions)?;
        let scalars = self.scalars.ok_or_else(|| IsoMeshError::InvalidConfig {
            message: "volume has no scalar samples".to_string(),
        })?;
        let scalars = DenseGrid::from_vec(self.dimensions, scalars)?;
        let ids = self
            .ids
            .map(|ids| DenseGrid::from_vec(self.dimensions, ids))
            .transpose()?;

        let volume = Volume::new(scalars, ids, self.transform)?;
        log::debug!(
            "built volume {:?} (ids: {}, spacing {:?})",
            self.dimensions,
            volume.ids().is_some(),
            self.transform.spacing
        );
        Ok(volume)
    }
}

fn sample<T, F>(dimensions: [usize; 3], f: F) -> Vec<T>
where
    F: Fn(usize, usize, usize) -> T,
{
    let [nx, ny, nz] = dimensions;
    let mut values = Vec::with_capacity(nx * ny * nz);
    for k in 0..nz {
        for j in 0..ny {
            for i in 0..nx {
                values.push(f(i, j, k));
            }
        }
    }
    values
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_basic() {
        let volume = VolumeBuilder::new([2, 3, 4])
            .with_scalar_fn(|i, j, k| (i + j + k) as f32)
            .build()
            .unwrap();

        assert_eq!(volume.dimensions(), [2, 3, 4]);
        assert_eq!(volume.scalars().get(1, 2, 3), 6.0);
        assert!(volume.ids().is_none());
        assert!(volume.transform().is_identity());
    }

    #[test]
    fn test_builder_with_ids_and_placement() {
        let volume = VolumeBuilder::new([2, 2, 2])
            .with_scalars(vec![0.0; 8])
            .with_id_fn(|i, _, _| i as i32)
            .with_origin([1.0, 2.0, 3.0])
            .with_uniform_spacing(0.25)
            .build()
            .unwrap();

        assert_eq!(volume.ids().map(|ids| ids.get(1, 0, 0)), Some(1));
        assert_eq!(volume.transform().spacing, [0.25; 3]);
        assert_eq!(volume.transform().origin, [1.0, 2.0, 3.0]);
    }

    #[test]
    fn test_builder_wrong_size() {
        let result = VolumeBuilder::new([2, 2, 2])
            .with_scalars(vec![0.0; 7])
            .build();
        assert!(matches!(
            result,
            Err(IsoMeshError::InvalidFieldSize {
                expected: 8,
                got: 7
            })
        ));

        let result = VolumeBuilder::new([2, 2, 2])
            .with_scalars(vec![0.0; 8])
            .with_ids(vec![0; 9])
            .build();
        assert!(matches!(
            result,
            Err(IsoMeshError::InvalidFieldSize { got: 9, .. })
        ));
    }

    #[test]
    fn test_builder_rejects_overflowing_dimensions() {
        let dimensions = [usize::MAX / 2, 3, 1];
        let builder = VolumeBuilder::new(dimensions).with_scalar_fn(|_, _, _| 0.0);
        assert_eq!(builder.sample_count(), None);
        assert_eq!(
            builder.build().unwrap_err(),
            IsoMeshError::DimensionOverflow { dimensions }
        );

        assert_eq!(VolumeBuilder::new([4, 5, 6]).sample_count(), Some(120));
    }

    #[test]
    fn test_builder_errors() {
        assert!(matches!(
            VolumeBuilder::new([0, 2, 2]).with_scalars(Vec::new()).build(),
            Err(IsoMeshError::ZeroDimension { .. })
        ));
        assert!(matches!(
            VolumeBuilder::new([2, 2, 2]).build(),
            Err(IsoMeshError::InvalidConfig { .. })
        ));
        assert!(matches!(
            VolumeBuilder::new([2, 2, 2])
                .with_scalars(vec![0.0; 8])
                .with_spacing([1.0, 0.0, 1.0])
                .build(),
            Err(IsoMeshError::InvalidSpacing { .. })
        ));
    }
}

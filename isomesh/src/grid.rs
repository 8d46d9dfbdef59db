//! DenseGrid implementation.
//!
//! Contiguous x-fastest storage of per-sample values, implementing the engine's
//! field traits for `f32` scalars and `i32` group ids.

use isomesh_core::{IdField, ScalarField};

use crate::error::{IsoMeshError, Result};

/// Dense 3D array of samples.
///
/// Sample `(i, j, k)` lives at `i + nx * (j + ny * k)`.
///
/// # Example
///
/// ```ignore
/// use isomesh::DenseGrid;
///
/// let grid = DenseGrid::from_fn([16, 16, 16], |i, j, k| (i + j + k) as f32)?;
/// assert_eq!(grid.get(1, 2, 3), 6.0);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct DenseGrid<T> {
    dimensions: [usize; 3],
    data: Vec<T>,
}

impl<T: Copy> DenseGrid<T> {
    /// Wrap an existing x-fastest buffer.
    ///
    /// # Errors
    /// * `ZeroDimension` if any axis is empty
    /// * `DimensionOverflow` if `nx * ny * nz` overflows
    /// * `InvalidFieldSize` if `data.len() != nx * ny * nz`
    pub fn from_vec(dimensions: [usize; 3], data: Vec<T>) -> Result<Self> {
        let expected = checked_len(dimensions)?;
        if data.len() != expected {
            return Err(IsoMeshError::InvalidFieldSize {
                expected,
                got: data.len(),
            });
        }
        Ok(Self { dimensions, data })
    }

    /// Grid filled with one value.
    pub fn filled(dimensions: [usize; 3], value: T) -> Result<Self> {
        let len = checked_len(dimensions)?;
        Ok(Self {
            dimensions,
            data: vec![value; len],
        })
    }

    /// Grid sampled from a function of the grid indices.
    pub fn from_fn<F>(dimensions: [usize; 3], f: F) -> Result<Self>
    where
        F: Fn(usize, usize, usize) -> T,
    {
        let len = checked_len(dimensions)?;
        let [nx, ny, nz] = dimensions;
        let mut data = Vec::with_capacity(len);
        for k in 0..nz {
            for j in 0..ny {
                for i in 0..nx {
                    data.push(f(i, j, k));
                }
            }
        }
        Ok(Self { dimensions, data })
    }

    /// Number of samples along each axis.
    #[inline]
    pub fn dimensions(&self) -> [usize; 3] {
        self.dimensions
    }

    /// Total number of samples.
    #[inline]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Always false: construction rejects empty grids.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Linear index of `(i, j, k)`.
    ///
    /// # Panics
    /// If any index is outside the grid.
    #[inline]
    pub fn index(&self, i: usize, j: usize, k: usize) -> usize {
        let [nx, ny, nz] = self.dimensions;
        assert!(
            i < nx && j < ny && k < nz,
            "sample ({}, {}, {}) outside grid {:?}",
            i,
            j,
            k,
            self.dimensions
        );
        i + nx * (j + ny * k)
    }

    /// Sample at `(i, j, k)`.
    ///
    /// # Panics
    /// If any index is outside the grid.
    #[inline]
    pub fn get(&self, i: usize, j: usize, k: usize) -> T {
        self.data[self.index(i, j, k)]
    }

    /// Overwrite the sample at `(i, j, k)`.
    #[inline]
    pub fn set(&mut self, i: usize, j: usize, k: usize, value: T) {
        let index = self.index(i, j, k);
        self.data[index] = value;
    }

    /// Raw x-fastest samples.
    #[inline]
    pub fn as_slice(&self) -> &[T] {
        &self.data
    }

    /// Consume the grid and return its buffer.
    pub fn into_vec(self) -> Vec<T> {
        self.data
    }
}

impl DenseGrid<f32> {
    /// Smallest and largest sample, ignoring NaNs.
    pub fn value_range(&self) -> (f32, f32) {
        self.data
            .iter()
            .filter(|v| !v.is_nan())
            .fold((f32::INFINITY, f32::NEG_INFINITY), |(lo, hi), &v| {
                (lo.min(v), hi.max(v))
            })
    }
}

/// Number of samples of a grid, rejecting empty axes and overflow.
pub(crate) fn checked_len(dimensions: [usize; 3]) -> Result<usize> {
    if dimensions.contains(&0) {
        return Err(IsoMeshError::ZeroDimension { dimensions });
    }
    dimensions[0]
        .checked_mul(dimensions[1])
        .and_then(|n| n.checked_mul(dimensions[2]))
        .ok_or(IsoMeshError::DimensionOverflow { dimensions })
}

// -----------------------------------------------------------------------------
// Field trait implementations
// -----------------------------------------------------------------------------

impl ScalarField for DenseGrid<f32> {
    #[inline]
    fn dimensions(&self) -> [usize; 3] {
        self.dimensions
    }

    #[inline]
    fn get(&self, i: usize, j: usize, k: usize) -> f32 {
        DenseGrid::get(self, i, j, k)
    }
}

impl IdField for DenseGrid<i32> {
    #[inline]
    fn dimensions(&self) -> [usize; 3] {
        self.dimensions
    }

    #[inline]
    fn get(&self, i: usize, j: usize, k: usize) -> i32 {
        DenseGrid::get(self, i, j, k)
    }
}

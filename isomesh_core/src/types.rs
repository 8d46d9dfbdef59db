//! Core types for isomesh_core.
//!
//! Provides the vector type used for positions and normals, and the index-space
//! region that bounds an extraction.

use core::ops::{Add, Div, Mul, Neg, Range, Sub};

use crate::error::IsoCoreError;

/// Group id meaning "no id here, use the other endpoint's id".
pub const GROUP_NONE: i32 = -1;

/// Group id meaning "exclude any crossing that resolves to this id".
pub const GROUP_EXCLUDED: i32 = -2;

/// A 3D point with named fields for clarity.
///
/// Used both for positions (in field-index or world space) and for normals.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Point3 {
    /// X coordinate.
    pub x: f32,
    /// Y coordinate.
    pub y: f32,
    /// Z coordinate.
    pub z: f32,
}

impl Point3 {
    /// Create a new Point3.
    #[inline]
    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    /// Create a Point3 with all components set to the same value.
    #[inline]
    pub const fn splat(v: f32) -> Self {
        Self { x: v, y: v, z: v }
    }

    /// Convert to an array.
    #[inline]
    pub const fn as_array(&self) -> [f32; 3] {
        [self.x, self.y, self.z]
    }

    /// Point at integer grid indices.
    #[inline]
    pub fn from_indices(i: usize, j: usize, k: usize) -> Self {
        Self::new(i as f32, j as f32, k as f32)
    }

    /// Linear interpolation between two points.
    #[inline]
    pub fn lerp(self, other: Self, t: f32) -> Self {
        Self {
            x: self.x + (other.x - self.x) * t,
            y: self.y + (other.y - self.y) * t,
            z: self.z + (other.z - self.z) * t,
        }
    }

    /// Dot product with another point (treating both as vectors).
    #[inline]
    pub fn dot(self, other: Self) -> f32 {
        self.x * other.x + self.y * other.y + self.z * other.z
    }

    /// Cross product with another point (treating both as vectors).
    #[inline]
    pub fn cross(self, other: Self) -> Self {
        Self {
            x: self.y * other.z - self.z * other.y,
            y: self.z * other.x - self.x * other.z,
            z: self.x * other.y - self.y * other.x,
        }
    }

    /// Component-wise product.
    #[inline]
    pub fn mul_elem(self, other: Self) -> Self {
        Self::new(self.x * other.x, self.y * other.y, self.z * other.z)
    }

    /// Squared length of the vector.
    #[inline]
    pub fn length_squared(self) -> f32 {
        self.dot(self)
    }

    /// Length (magnitude) of the vector.
    #[inline]
    pub fn length(self) -> f32 {
        libm::sqrtf(self.length_squared())
    }

    /// Normalize the vector to unit length.
    /// Returns a zero vector if the length is zero.
    #[inline]
    pub fn normalize(self) -> Self {
        let len = self.length();
        if len == 0.0 {
            Self::splat(0.0)
        } else {
            self / len
        }
    }

    /// Component-wise minimum.
    #[inline]
    pub fn min(self, other: Self) -> Self {
        Self {
            x: if self.x < other.x { self.x } else { other.x },
            y: if self.y < other.y { self.y } else { other.y },
            z: if self.z < other.z { self.z } else { other.z },
        }
    }

    /// Component-wise maximum.
    #[inline]
    pub fn max(self, other: Self) -> Self {
        Self {
            x: if self.x > other.x { self.x } else { other.x },
            y: if self.y > other.y { self.y } else { other.y },
            z: if self.z > other.z { self.z } else { other.z },
        }
    }
}

impl From<[f32; 3]> for Point3 {
    #[inline]
    fn from(arr: [f32; 3]) -> Self {
        Self {
            x: arr[0],
            y: arr[1],
            z: arr[2],
        }
    }
}

impl Add for Point3 {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        Self {
            x: self.x + other.x,
            y: self.y + other.y,
            z: self.z + other.z,
        }
    }
}

impl Sub for Point3 {
    type Output = Self;

    #[inline]
    fn sub(self, other: Self) -> Self {
        Self {
            x: self.x - other.x,
            y: self.y - other.y,
            z: self.z - other.z,
        }
    }
}

impl Mul<f32> for Point3 {
    type Output = Self;

    #[inline]
    fn mul(self, scalar: f32) -> Self {
        Self {
            x: self.x * scalar,
            y: self.y * scalar,
            z: self.z * scalar,
        }
    }
}

impl Div<f32> for Point3 {
    type Output = Self;

    #[inline]
    fn div(self, scalar: f32) -> Self {
        Self {
            x: self.x / scalar,
            y: self.y / scalar,
            z: self.z / scalar,
        }
    }
}

impl Neg for Point3 {
    type Output = Self;

    #[inline]
    fn neg(self) -> Self {
        Self {
            x: -self.x,
            y: -self.y,
            z: -self.z,
        }
    }
}

/// Half-open box `[bottom_left, top_right)` of grid points to process.
///
/// Cells are visited for `i` in `bottom_left[0]..top_right[0] - 1` (likewise for
/// `j` and `k`); a cell reads its corners at `i` and `i + 1`, so no sample outside
/// the region is ever requested.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Region {
    /// Inclusive lower grid point.
    pub bottom_left: [usize; 3],
    /// Exclusive upper grid point.
    pub top_right: [usize; 3],
}

impl Region {
    /// Create a new region.
    #[inline]
    pub const fn new(bottom_left: [usize; 3], top_right: [usize; 3]) -> Self {
        Self {
            bottom_left,
            top_right,
        }
    }

    /// Region covering a whole field of the given dimensions.
    #[inline]
    pub const fn full(dimensions: [usize; 3]) -> Self {
        Self::new([0, 0, 0], dimensions)
    }

    /// Check the region against the field dimensions.
    ///
    /// # Errors
    /// * `InvalidRegion` if `top_right <= bottom_left` on any axis
    /// * `RegionOutOfBounds` if `top_right` exceeds the field on any axis
    pub fn validate(&self, dimensions: [usize; 3]) -> Result<(), IsoCoreError> {
        for axis in 0..3 {
            if self.top_right[axis] <= self.bottom_left[axis] {
                return Err(IsoCoreError::InvalidRegion {
                    axis: axis as u8,
                    bottom_left: self.bottom_left[axis],
                    top_right: self.top_right[axis],
                });
            }
            if self.top_right[axis] > dimensions[axis] {
                return Err(IsoCoreError::RegionOutOfBounds {
                    axis: axis as u8,
                    top_right: self.top_right[axis],
                    dimension: dimensions[axis],
                });
            }
        }
        Ok(())
    }

    /// Number of grid points per axis (`top_right - bottom_left`).
    #[inline]
    pub fn extent(&self) -> [usize; 3] {
        [
            self.top_right[0].saturating_sub(self.bottom_left[0]),
            self.top_right[1].saturating_sub(self.bottom_left[1]),
            self.top_right[2].saturating_sub(self.bottom_left[2]),
        ]
    }

    /// Cell index range along one axis.
    #[inline]
    pub fn cell_range(&self, axis: usize) -> Range<usize> {
        let start = self.bottom_left[axis];
        let end = self.top_right[axis].saturating_sub(1).max(start);
        start..end
    }

    /// Total number of cells in the region.
    #[inline]
    pub fn cell_count(&self) -> usize {
        (0..3).map(|axis| self.cell_range(axis).len()).product()
    }
}

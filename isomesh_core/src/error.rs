//! Error types for isomesh_core operations.
//!
//! Provides a simple error enum with no external dependencies for no_std compatibility.

use core::fmt;

const AXIS_NAMES: [char; 3] = ['x', 'y', 'z'];

/// Error types that can occur during an extraction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IsoCoreError {
    /// `top_right <= bottom_left` on some axis.
    InvalidRegion {
        /// Axis index (0 = x, 1 = y, 2 = z).
        axis: u8,
        /// Lower bound on that axis.
        bottom_left: usize,
        /// Upper bound on that axis.
        top_right: usize,
    },
    /// The region reaches past the scalar field.
    RegionOutOfBounds {
        /// Axis index (0 = x, 1 = y, 2 = z).
        axis: u8,
        /// Upper bound on that axis.
        top_right: usize,
        /// Field dimension on that axis.
        dimension: usize,
    },
    /// The id field does not have the scalar field's shape.
    IdFieldMismatch {
        /// Scalar field dimensions.
        expected: [usize; 3],
        /// Id field dimensions.
        got: [usize; 3],
    },
    /// The task context asked to stop at a progress checkpoint.
    Cancelled,
}

impl fmt::Display for IsoCoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IsoCoreError::InvalidRegion {
                axis,
                bottom_left,
                top_right,
            } => {
                write!(
                    f,
                    "invalid region on {} axis: top right {} is not above bottom left {}",
                    AXIS_NAMES[*axis as usize % 3],
                    top_right,
                    bottom_left
                )
            }
            IsoCoreError::RegionOutOfBounds {
                axis,
                top_right,
                dimension,
            } => {
                write!(
                    f,
                    "region exceeds field on {} axis: top right {} > dimension {}",
                    AXIS_NAMES[*axis as usize % 3],
                    top_right,
                    dimension
                )
            }
            IsoCoreError::IdFieldMismatch { expected, got } => {
                write!(
                    f,
                    "id field dimensions {:?} do not match scalar field {:?}",
                    got, expected
                )
            }
            IsoCoreError::Cancelled => write!(f, "extraction cancelled"),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for IsoCoreError {}

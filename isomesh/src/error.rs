//! Error types for isomesh operations.
//!
//! Provides specific error variants for volume construction and extraction
//! configuration, wrapping the engine's own errors.

use isomesh_core::IsoCoreError;
use thiserror::Error;

/// Errors that can occur during isomesh operations.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum IsoMeshError {
    /// Attempted to create a volume with a zero-sized axis.
    #[error("volume dimensions {dimensions:?} contain a zero axis")]
    ZeroDimension {
        /// Requested dimensions.
        dimensions: [usize; 3],
    },

    /// Sample count `nx * ny * nz` does not fit in `usize`.
    #[error("volume dimensions {dimensions:?} overflow the sample count")]
    DimensionOverflow {
        /// Requested dimensions.
        dimensions: [usize; 3],
    },

    /// Sample buffer does not match the volume dimensions.
    #[error("invalid field size: expected {expected} samples, got {got}")]
    InvalidFieldSize {
        /// `nx * ny * nz`.
        expected: usize,
        /// Length of the supplied buffer.
        got: usize,
    },

    /// Grid spacing must be finite and strictly positive on every axis.
    #[error("invalid grid spacing {spacing:?}")]
    InvalidSpacing {
        /// Offending spacing.
        spacing: [f32; 3],
    },

    /// Extraction configuration rejected before any work started.
    #[error("invalid configuration: {message}")]
    InvalidConfig {
        /// Description of the configuration error.
        message: String,
    },

    /// Error reported by the extraction engine.
    #[error(transparent)]
    Core(#[from] IsoCoreError),
}

impl IsoMeshError {
    /// Whether the extraction was stopped through its task context.
    pub fn is_cancelled(&self) -> bool {
        matches!(self, IsoMeshError::Core(IsoCoreError::Cancelled))
    }
}

/// Result type alias for isomesh operations.
pub type Result<T> = core::result::Result<T, IsoMeshError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = IsoMeshError::InvalidFieldSize {
            expected: 27,
            got: 26,
        };
        assert_eq!(
            format!("{}", err),
            "invalid field size: expected 27 samples, got 26"
        );

        let err = IsoMeshError::ZeroDimension {
            dimensions: [4, 0, 4],
        };
        assert!(format!("{}", err).contains("[4, 0, 4]"));
    }

    #[test]
    fn test_core_errors_are_transparent() {
        let err: IsoMeshError = IsoCoreError::Cancelled.into();
        assert_eq!(format!("{}", err), "extraction cancelled");
        assert!(err.is_cancelled());
    }

    #[test]
    fn test_error_equality() {
        assert_eq!(
            IsoMeshError::Core(IsoCoreError::Cancelled),
            IsoMeshError::from(IsoCoreError::Cancelled)
        );
        assert_ne!(
            IsoMeshError::InvalidConfig {
                message: "a".into()
            },
            IsoMeshError::InvalidConfig {
                message: "b".into()
            }
        );
    }
}

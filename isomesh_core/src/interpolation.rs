//! Per-edge interpolation helpers.
//!
//! The crossing parameter along an edge, central-difference normals at grid points,
//! and the group id chosen when an edge joins two differently tagged samples.

use crate::traits::ScalarField;
use crate::types::{Point3, GROUP_EXCLUDED, GROUP_NONE};

/// Position of the iso-crossing along an edge as a fraction from `v0` to `v1`.
///
/// The edge must be crossed (exactly one endpoint below `iso_level`), which keeps
/// the denominator non-zero and the result in `[0, 1]`.
#[inline]
pub fn crossing_parameter(v0: f32, v1: f32, iso_level: f32) -> f32 {
    (iso_level - v0) / (v1 - v0)
}

/// Central-difference estimate of the negated field gradient at a grid point.
///
/// Neighbour indices are clamped to the field, falling back to one-sided
/// differences on the border.
///
/// # Returns
/// `(f(i-1) - f(i+1), f(j-1) - f(j+1), f(k-1) - f(k+1))`, unnormalised.
#[inline]
pub fn negative_gradient<F: ScalarField + ?Sized>(field: &F, i: usize, j: usize, k: usize) -> Point3 {
    let [nx, ny, nz] = field.dimensions();
    Point3::new(
        field.get(i.saturating_sub(1), j, k) - field.get((i + 1).min(nx - 1), j, k),
        field.get(i, j.saturating_sub(1), k) - field.get(i, (j + 1).min(ny - 1), k),
        field.get(i, j, k.saturating_sub(1)) - field.get(i, j, (k + 1).min(nz - 1)),
    )
}

/// Pick the group of an edge vertex from the ids at its endpoints.
///
/// `u` is the id at the low endpoint of the edge and wins whatever the crossing
/// position. If it is [`GROUP_NONE`] the id at the high endpoint `v` is used instead.
///
/// # Returns
/// `None` if the resolved id is [`GROUP_EXCLUDED`], otherwise the id.
#[inline]
pub fn resolve_group(u: i32, v: i32) -> Option<i32> {
    let group = if u == GROUP_NONE { v } else { u };
    if group == GROUP_EXCLUDED {
        None
    } else {
        Some(group)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Linear {
        dims: [usize; 3],
        slope: [f32; 3],
    }

    impl ScalarField for Linear {
        fn dimensions(&self) -> [usize; 3] {
            self.dims
        }

        fn get(&self, i: usize, j: usize, k: usize) -> f32 {
            assert!(i < self.dims[0] && j < self.dims[1] && k < self.dims[2]);
            self.slope[0] * i as f32 + self.slope[1] * j as f32 + self.slope[2] * k as f32
        }
    }

    #[test]
    fn test_crossing_parameter_midpoint() {
        assert!((crossing_parameter(-1.0, 1.0, 0.0) - 0.5).abs() < 1e-6);
    }

    #[test]
    fn test_crossing_parameter_is_orientation_symmetric() {
        let t = crossing_parameter(0.2, 1.2, 0.5);
        let back = crossing_parameter(1.2, 0.2, 0.5);
        assert!((t - 0.3).abs() < 1e-6);
        assert!((t + back - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_crossing_parameter_at_endpoint() {
        assert_eq!(crossing_parameter(0.0, 1.0, 0.0), 0.0);
        assert_eq!(crossing_parameter(-1.0, 0.0, 0.0), 1.0);
    }

    #[test]
    fn test_negative_gradient_interior() {
        let field = Linear {
            dims: [5, 5, 5],
            slope: [1.0, 2.0, 3.0],
        };
        let n = negative_gradient(&field, 2, 2, 2);
        assert_eq!(n, Point3::new(-2.0, -4.0, -6.0));
    }

    #[test]
    fn test_negative_gradient_clamps_on_border() {
        let field = Linear {
            dims: [3, 3, 3],
            slope: [1.0, 1.0, 1.0],
        };
        // one-sided on the low border
        let low = negative_gradient(&field, 0, 0, 0);
        assert_eq!(low, Point3::new(-1.0, -1.0, -1.0));
        // one-sided on the high border
        let high = negative_gradient(&field, 2, 2, 2);
        assert_eq!(high, Point3::new(-1.0, -1.0, -1.0));
    }

    #[test]
    fn test_resolve_group_prefers_low_endpoint() {
        assert_eq!(resolve_group(3, 7), Some(3));
        assert_eq!(resolve_group(7, 3), Some(7));
    }

    #[test]
    fn test_resolve_group_defers_unknown() {
        assert_eq!(resolve_group(5, GROUP_NONE), Some(5));
        assert_eq!(resolve_group(GROUP_NONE, 5), Some(5));
        assert_eq!(resolve_group(GROUP_NONE, GROUP_NONE), Some(GROUP_NONE));
    }

    #[test]
    fn test_resolve_group_exclusion() {
        assert_eq!(resolve_group(GROUP_EXCLUDED, 4), None);
        assert_eq!(resolve_group(GROUP_NONE, GROUP_EXCLUDED), None);
        // the excluded high endpoint loses to a real low id
        assert_eq!(resolve_group(4, GROUP_EXCLUDED), Some(4));
    }
}

//! Grid index space to world space.

use isomesh_core::{Lines, Mesh, Point3};

use crate::error::{IsoMeshError, Result};

/// Axis-aligned placement of a volume in world space.
///
/// Grid point `(i, j, k)` sits at `origin + (i, j, k) * spacing`.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GridTransform {
    /// World position of grid point `(0, 0, 0)`.
    pub origin: [f32; 3],
    /// World distance between neighbouring samples along each axis.
    pub spacing: [f32; 3],
}

impl GridTransform {
    /// Create a transform.
    ///
    /// # Errors
    /// `InvalidSpacing` unless every spacing is finite and positive.
    pub fn new(origin: [f32; 3], spacing: [f32; 3]) -> Result<Self> {
        let transform = Self { origin, spacing };
        transform.validate()?;
        Ok(transform)
    }

    /// Unit spacing at the origin.
    pub const fn identity() -> Self {
        Self {
            origin: [0.0; 3],
            spacing: [1.0; 3],
        }
    }

    /// Same spacing on every axis.
    pub fn uniform(origin: [f32; 3], spacing: f32) -> Result<Self> {
        Self::new(origin, [spacing; 3])
    }

    /// Check the spacing.
    pub fn validate(&self) -> Result<()> {
        if self.spacing.iter().all(|s| s.is_finite() && *s > 0.0) {
            Ok(())
        } else {
            Err(IsoMeshError::InvalidSpacing {
                spacing: self.spacing,
            })
        }
    }

    /// Whether this is the identity mapping.
    pub fn is_identity(&self) -> bool {
        *self == Self::identity()
    }

    /// World position of a point given in grid coordinates.
    #[inline]
    pub fn to_world(&self, p: Point3) -> Point3 {
        Point3::from(self.origin) + p.mul_elem(Point3::from(self.spacing))
    }

    /// Grid coordinates of a world position.
    #[inline]
    pub fn to_grid(&self, p: Point3) -> Point3 {
        let o = p - Point3::from(self.origin);
        Point3::new(
            o.x / self.spacing[0],
            o.y / self.spacing[1],
            o.z / self.spacing[2],
        )
    }

    /// World normal of a grid-space gradient normal.
    ///
    /// Central differences are taken per sample, so each component is divided by the
    /// spacing along its axis.
    #[inline]
    pub fn normal_to_world(&self, n: Point3) -> Point3 {
        Point3::new(
            n.x / self.spacing[0],
            n.y / self.spacing[1],
            n.z / self.spacing[2],
        )
    }

    /// Move a mesh from grid space into world space in place.
    pub fn apply_to_mesh(&self, mesh: &mut Mesh) {
        if self.is_identity() {
            return;
        }
        for p in mesh.vertices.chunks_exact_mut(3) {
            let w = self.to_world(Point3::new(p[0], p[1], p[2]));
            p.copy_from_slice(&w.as_array());
        }
        for n in mesh.normals.chunks_exact_mut(3) {
            let w = self.normal_to_world(Point3::new(n[0], n[1], n[2]));
            n.copy_from_slice(&w.as_array());
        }
    }

    /// Move a wireframe from grid space into world space in place.
    pub fn apply_to_lines(&self, lines: &mut Lines) {
        if self.is_identity() {
            return;
        }
        for p in lines.vertices.chunks_exact_mut(3) {
            let w = self.to_world(Point3::new(p[0], p[1], p[2]));
            p.copy_from_slice(&w.as_array());
        }
    }
}

impl Default for GridTransform {
    fn default() -> Self {
        Self::identity()
    }
}

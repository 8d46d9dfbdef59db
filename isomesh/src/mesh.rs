//! Mesh statistics and export.

use std::fmt::Write;

use isomesh_core::{Lines, Mesh, Point3};

/// Mesh statistics after extraction.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MeshStats {
    /// Total number of triangles.
    pub triangle_count: usize,
    /// Number of distinct vertices.
    pub vertex_count: usize,
    /// Approximate surface area (sum of triangle areas).
    pub surface_area: f32,
    /// Bounding box minimum.
    pub bbox_min: Point3,
    /// Bounding box maximum.
    pub bbox_max: Point3,
    /// Number of distinct group ids among the vertices.
    pub group_count: usize,
}

impl MeshStats {
    /// Compute statistics from an extracted mesh.
    ///
    /// The bounding box of an empty mesh is inverted (`min > max`).
    pub fn from_mesh(mesh: &Mesh) -> Self {
        let mut bbox_min = Point3::splat(f32::MAX);
        let mut bbox_max = Point3::splat(f32::MIN);
        for v in 0..mesh.vertex_count {
            let p = mesh.position(v);
            bbox_min = bbox_min.min(p);
            bbox_max = bbox_max.max(p);
        }

        let surface_area: f32 = mesh
            .triangle_positions()
            .map(|[a, b, c]| (b - a).cross(c - a).length() * 0.5)
            .sum();

        let mut groups: Vec<i32> = (0..mesh.vertex_count).map(|v| mesh.group(v)).collect();
        groups.sort_unstable();
        groups.dedup();

        Self {
            triangle_count: mesh.triangle_count,
            vertex_count: mesh.vertex_count,
            surface_area,
            bbox_min,
            bbox_max,
            group_count: groups.len(),
        }
    }
}

/// Export a mesh to OBJ format, with per-vertex normals.
pub fn mesh_to_obj(mesh: &Mesh) -> String {
    let mut obj = String::new();

    // fmt::Write for String never fails
    let _ = writeln!(obj, "# isomesh generated mesh");
    let _ = writeln!(
        obj,
        "# {} triangles, {} vertices",
        mesh.triangle_count, mesh.vertex_count
    );
    let _ = writeln!(obj);

    for v in 0..mesh.vertex_count {
        let p = mesh.position(v);
        let _ = writeln!(obj, "v {} {} {}", p.x, p.y, p.z);
    }
    for v in 0..mesh.vertex_count {
        let n = mesh.normal(v).normalize();
        let _ = writeln!(obj, "vn {} {} {}", n.x, n.y, n.z);
    }

    let _ = writeln!(obj);

    // Faces are 1-indexed in OBJ format
    for [a, b, c] in mesh.triangles() {
        let _ = writeln!(
            obj,
            "f {}//{} {}//{} {}//{}",
            a + 1,
            a + 1,
            b + 1,
            b + 1,
            c + 1,
            c + 1
        );
    }

    obj
}

/// Export a wireframe to OBJ format as polyline elements.
pub fn lines_to_obj(lines: &Lines) -> String {
    let mut obj = String::new();

    let _ = writeln!(obj, "# isomesh generated wireframe");
    let _ = writeln!(
        obj,
        "# {} segments, {} vertices",
        lines.line_count, lines.vertex_count
    );
    let _ = writeln!(obj);

    for v in 0..lines.vertex_count {
        let p = lines.position(v);
        let _ = writeln!(obj, "v {} {} {}", p.x, p.y, p.z);
    }

    let _ = writeln!(obj);

    for [a, b] in lines.segments() {
        let _ = writeln!(obj, "l {} {}", a + 1, b + 1);
    }

    obj
}

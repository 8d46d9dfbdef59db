//! Property-based tests checking extracted geometry against brute-force counts
//! over the sample grid.

use isomesh::{DenseGrid, ExtractionConfig, Mesh, Volume, VolumeBuilder};
use proptest::prelude::*;

/// Random volume of 2 to 6 samples per axis with values in [-1, 1).
fn arb_volume() -> impl Strategy<Value = ([usize; 3], Vec<f32>)> {
    (2usize..7, 2usize..7, 2usize..7).prop_flat_map(|(nx, ny, nz)| {
        (
            Just([nx, ny, nz]),
            prop::collection::vec(-1.0f32..1.0, nx * ny * nz),
        )
    })
}

fn make_volume(dimensions: [usize; 3], values: Vec<f32>) -> Volume {
    VolumeBuilder::new(dimensions)
        .with_scalars(values)
        .build()
        .unwrap()
}

fn mesh_of(volume: &Volume, iso: f32) -> Mesh {
    volume
        .extract(&ExtractionConfig::new(iso))
        .unwrap()
        .into_mesh()
        .unwrap()
}

/// Number of grid edges whose endpoints lie on different sides of `iso`.
fn crossed_edges(grid: &DenseGrid<f32>, iso: f32) -> usize {
    let [nx, ny, nz] = grid.dimensions();
    let below = |i, j, k| grid.get(i, j, k) < iso;
    let mut count = 0;
    for k in 0..nz {
        for j in 0..ny {
            for i in 0..nx {
                let b = below(i, j, k);
                if i + 1 < nx && below(i + 1, j, k) != b {
                    count += 1;
                }
                if j + 1 < ny && below(i, j + 1, k) != b {
                    count += 1;
                }
                if k + 1 < nz && below(i, j, k + 1) != b {
                    count += 1;
                }
            }
        }
    }
    count
}

/// Triangle corner positions as raw bits, for order-independent comparison.
fn triangle_bits(mesh: &Mesh) -> Vec<[[u32; 3]; 3]> {
    mesh.triangle_positions()
        .map(|t| t.map(|p| p.as_array().map(f32::to_bits)))
        .collect()
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// Every crossed edge gets exactly one shared vertex
    #[test]
    fn one_vertex_per_crossed_edge(
        (dimensions, values) in arb_volume(),
        iso in -0.5f32..0.5,
    ) {
        let volume = make_volume(dimensions, values);
        let mesh = mesh_of(&volume, iso);

        prop_assert_eq!(mesh.vertex_count, crossed_edges(volume.scalars(), iso));
        prop_assert_eq!(mesh.vertices.len(), 3 * mesh.vertex_count);
        prop_assert_eq!(mesh.normals.len(), 3 * mesh.vertex_count);
        prop_assert_eq!(mesh.groups.len(), mesh.vertex_count);
    }

    /// Indices reference existing vertices and no triangle repeats a vertex
    #[test]
    fn triangles_are_well_formed(
        (dimensions, values) in arb_volume(),
        iso in -0.5f32..0.5,
    ) {
        let mesh = mesh_of(&make_volume(dimensions, values), iso);

        prop_assert_eq!(mesh.indices.len(), 3 * mesh.triangle_count);
        for [a, b, c] in mesh.triangles() {
            prop_assert!((a as usize) < mesh.vertex_count);
            prop_assert!((b as usize) < mesh.vertex_count);
            prop_assert!((c as usize) < mesh.vertex_count);
            prop_assert!(a != b && b != c && a != c, "degenerate triangle {:?}", [a, b, c]);
        }
    }

    /// Vertices stay inside the sampled box
    #[test]
    fn vertices_inside_grid(
        (dimensions, values) in arb_volume(),
        iso in -0.5f32..0.5,
    ) {
        let mesh = mesh_of(&make_volume(dimensions, values), iso);
        for v in 0..mesh.vertex_count {
            let p = mesh.position(v).as_array();
            for axis in 0..3 {
                prop_assert!(p[axis] >= 0.0 && p[axis] <= (dimensions[axis] - 1) as f32);
            }
        }
    }

    /// Same input, same buffers
    #[test]
    fn extraction_is_deterministic(
        (dimensions, values) in arb_volume(),
        iso in -0.5f32..0.5,
    ) {
        let volume = make_volume(dimensions, values);
        prop_assert_eq!(mesh_of(&volume, iso), mesh_of(&volume, iso));
    }

    /// The wireframe is built on the mesh's vertices
    #[test]
    fn wireframe_shares_mesh_vertices(
        (dimensions, values) in arb_volume(),
        iso in -0.5f32..0.5,
    ) {
        let volume = make_volume(dimensions, values);
        let mesh = mesh_of(&volume, iso);
        let lines = volume
            .extract(&ExtractionConfig::new(iso).lines())
            .unwrap()
            .into_lines()
            .unwrap();

        prop_assert_eq!(&lines.vertices, &mesh.vertices);
        for [a, b] in lines.segments() {
            prop_assert!(a != b);
            prop_assert!((a as usize) < lines.vertex_count && (b as usize) < lines.vertex_count);
        }
    }

    /// Slab-parallel extraction emits the same triangles
    #[test]
    #[cfg(feature = "parallel")]
    fn parallel_matches_serial(
        (dimensions, values) in arb_volume(),
        iso in -0.5f32..0.5,
        slabs in 1usize..5,
    ) {
        let volume = make_volume(dimensions, values);
        let serial = mesh_of(&volume, iso);
        let parallel = volume
            .extract_mesh_slabs(&ExtractionConfig::new(iso), slabs)
            .unwrap();

        prop_assert_eq!(parallel.triangle_count, serial.triangle_count);
        prop_assert!(parallel.vertex_count >= serial.vertex_count);
        let mut a = triangle_bits(&serial);
        let mut b = triangle_bits(&parallel);
        a.sort_unstable();
        b.sort_unstable();
        prop_assert_eq!(a, b);
    }
}

#[test]
fn test_linear_ramp_vertices_are_exact() {
    // f = x, crossing at x = 1.25 on every x edge between samples 1 and 2
    let volume = VolumeBuilder::new([4, 3, 3])
        .with_scalar_fn(|i, _, _| i as f32)
        .build()
        .unwrap();
    let mesh = mesh_of(&volume, 1.25);

    assert_eq!(mesh.vertex_count, 9);
    assert_eq!(mesh.triangle_count, 8);
    for v in 0..mesh.vertex_count {
        let p = mesh.position(v);
        assert_eq!(p.x, 1.25);
        // gradient is +x, so the normal is -x
        assert_eq!(mesh.normal(v).x, -2.0);
        assert_eq!(mesh.normal(v).y, 0.0);
    }
}

#[test]
fn test_constant_field_is_empty() {
    let volume = VolumeBuilder::new([5, 5, 5])
        .with_scalars(vec![0.25; 125])
        .build()
        .unwrap();
    assert!(mesh_of(&volume, 0.0).is_empty());
    assert!(mesh_of(&volume, 1.0).is_empty());
    // a sample equal to the level counts as above it
    assert!(mesh_of(&volume, 0.25).is_empty());
}

//! Truncation with capping must finish on every input, including
//! non-manifold and inconsistently wound meshes.
//!
//! Run with: cargo test -p mesh-refine --test truncate_termination

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]

use mesh_geometry::{shapes, Geometry, Vector3};
use mesh_refine::{refine_geometry, truncate, RefineParams};

fn from_loops(positions: &[[f64; 3]], loops: &[&[usize]]) -> Geometry {
    let positions: Vec<Vector3<f64>> = positions
        .iter()
        .map(|p| Vector3::new(p[0], p[1], p[2]))
        .collect();
    Geometry::from_polygons(&positions, loops).unwrap()
}

/// Three triangles hinged on the edge 0-1.
fn fin() -> Geometry {
    from_loops(
        &[
            [0.0, 0.0, 0.0],
            [1.0, 0.0, 0.0],
            [0.5, 1.0, 0.0],
            [0.5, -1.0, 0.0],
            [0.5, 0.0, 1.0],
        ],
        &[&[0, 1, 2], &[1, 0, 3], &[0, 1, 4]],
    )
}

/// A cube with one face wound the wrong way.
fn flipped_cube() -> Geometry {
    from_loops(
        &[
            [-0.5, -0.5, -0.5],
            [0.5, -0.5, -0.5],
            [0.5, 0.5, -0.5],
            [-0.5, 0.5, -0.5],
            [-0.5, -0.5, 0.5],
            [0.5, -0.5, 0.5],
            [0.5, 0.5, 0.5],
            [-0.5, 0.5, 0.5],
        ],
        &[
            &[0, 3, 2, 1],
            &[7, 6, 5, 4],
            &[0, 1, 5, 4],
            &[3, 7, 6, 2],
            &[0, 4, 7, 3],
            &[1, 2, 6, 5],
        ],
    )
}

/// A tetrahedron with one face listed twice.
fn doubled_face() -> Geometry {
    from_loops(
        &[
            [1.0, 1.0, 1.0],
            [1.0, -1.0, -1.0],
            [-1.0, 1.0, -1.0],
            [-1.0, -1.0, 1.0],
        ],
        &[&[0, 1, 2], &[0, 3, 1], &[0, 2, 3], &[1, 3, 2], &[1, 3, 2]],
    )
}

/// Polygons that visit a point twice, with and without a repeated
/// consecutive point.
fn pinched() -> Geometry {
    from_loops(
        &[
            [0.0, 0.0, 0.0],
            [1.0, 0.0, 0.0],
            [1.0, 1.0, 0.0],
            [-1.0, 0.0, 0.0],
            [-1.0, -1.0, 0.0],
        ],
        &[&[0, 1, 2, 0, 3, 4], &[0, 0, 1, 4], &[2, 1, 0]],
    )
}

/// Four quads around a single point, two of them wound against the others.
fn saddle_fan() -> Geometry {
    from_loops(
        &[
            [0.0, 0.0, 0.0],
            [1.0, 0.0, 0.0],
            [1.0, 1.0, 0.5],
            [0.0, 1.0, 0.0],
            [-1.0, 1.0, -0.5],
            [-1.0, 0.0, 0.0],
            [-1.0, -1.0, 0.5],
            [0.0, -1.0, 0.0],
            [1.0, -1.0, -0.5],
        ],
        &[&[0, 1, 2, 3], &[5, 4, 3, 0], &[0, 5, 6, 7], &[8, 7, 0, 1]],
    )
}

fn corpus() -> Vec<(&'static str, Geometry)> {
    vec![
        ("tetrahedron", shapes::tetrahedron()),
        ("cube", shapes::cube()),
        ("octahedron", shapes::octahedron()),
        ("icosahedron", shapes::icosahedron()),
        ("prism", shapes::prism(7)),
        ("pyramid", shapes::pyramid(5)),
        ("quad", shapes::quad()),
        ("bowtie", shapes::bowtie()),
        ("fin", fin()),
        ("flipped cube", flipped_cube()),
        ("doubled face", doubled_face()),
        ("pinched", pinched()),
        ("saddle fan", saddle_fan()),
    ]
}

#[test]
fn truncate_close_terminates_on_corpus() {
    for (name, geometry) in corpus() {
        let refined = truncate(&geometry, true);

        // One cap per point at most per three of its corners
        let max_caps = geometry.corner_count() / 3;
        assert!(refined.polygon_count() >= geometry.polygon_count(), "{name}");
        assert!(
            refined.polygon_count() <= geometry.polygon_count() + max_caps,
            "{name}"
        );
        for polygon in refined.polygons().skip(geometry.polygon_count()) {
            assert!(refined.polygon_size(polygon) >= 3, "{name}");
        }
    }
}

#[test]
fn repeated_truncation_terminates() {
    let params = RefineParams::truncate(true).with_iterations(3);
    for (name, geometry) in corpus() {
        let result = refine_geometry(&geometry, &params).unwrap();
        assert_eq!(result.iterations, 3, "{name}");
        assert!(result.final_polygons >= geometry.polygon_count(), "{name}");
    }
}

#[test]
fn closed_manifolds_stay_closed() {
    for geometry in [
        shapes::tetrahedron(),
        shapes::cube(),
        shapes::octahedron(),
        shapes::icosahedron(),
        shapes::prism(6),
        shapes::pyramid(4),
    ] {
        let refined = truncate(&geometry, true);
        assert_eq!(
            refined.polygon_count(),
            geometry.polygon_count() + geometry.point_count()
        );
        assert!(refined.edges().all(|(_, polygons)| polygons.len() == 2));
    }
}

#[test]
fn bowtie_splits_shared_point() {
    let bowtie = shapes::bowtie();
    let refined = truncate(&bowtie, true);
    // Seven points, the shared one capped once per tetrahedron
    assert_eq!(refined.polygon_count(), bowtie.polygon_count() + 8);
}

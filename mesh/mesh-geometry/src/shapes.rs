//! Primitive polyhedra.
//!
//! Every closed shape is centered near the origin with outward-facing
//! counter-clockwise windings, and carries `point_locations`.

use std::f64::consts::TAU;

use nalgebra::Vector3;

use crate::geometry::Geometry;

fn build<L: AsRef<[usize]>>(positions: &[[f64; 3]], polygons: &[L]) -> Geometry {
    let positions: Vec<Vector3<f64>> = positions.iter().map(|&p| Vector3::from(p)).collect();
    // Index data below is static and known to be valid.
    Geometry::from_polygons(&positions, polygons).unwrap_or_default()
}

/// Regular tetrahedron inscribed in the cube `[-1, 1]^3`.
#[must_use]
pub fn tetrahedron() -> Geometry {
    const POSITIONS: [[f64; 3]; 4] = [
        [1.0, 1.0, 1.0],
        [1.0, -1.0, -1.0],
        [-1.0, 1.0, -1.0],
        [-1.0, -1.0, 1.0],
    ];
    const TRIANGLES: [[usize; 3]; 4] = [[0, 1, 2], [0, 3, 1], [0, 2, 3], [1, 3, 2]];
    build(&POSITIONS, &TRIANGLES)
}

/// Unit cube centered at the origin: 8 points, 12 edges, 6 quads.
///
/// # Example
///
/// ```
/// use mesh_geometry::shapes;
///
/// let cube = shapes::cube();
/// assert_eq!(cube.point_count(), 8);
/// assert_eq!(cube.edge_count(), 12);
/// assert_eq!(cube.polygon_count(), 6);
/// ```
#[must_use]
pub fn cube() -> Geometry {
    const POSITIONS: [[f64; 3]; 8] = [
        [-0.5, -0.5, -0.5],
        [0.5, -0.5, -0.5],
        [0.5, 0.5, -0.5],
        [-0.5, 0.5, -0.5],
        [-0.5, -0.5, 0.5],
        [0.5, -0.5, 0.5],
        [0.5, 0.5, 0.5],
        [-0.5, 0.5, 0.5],
    ];
    const QUADS: [[usize; 4]; 6] = [
        [0, 3, 2, 1],
        [4, 5, 6, 7],
        [0, 1, 5, 4],
        [3, 7, 6, 2],
        [0, 4, 7, 3],
        [1, 2, 6, 5],
    ];
    build(&POSITIONS, &QUADS)
}

/// Regular octahedron with vertices on the unit axes.
#[must_use]
pub fn octahedron() -> Geometry {
    const POSITIONS: [[f64; 3]; 6] = [
        [1.0, 0.0, 0.0],
        [-1.0, 0.0, 0.0],
        [0.0, 1.0, 0.0],
        [0.0, -1.0, 0.0],
        [0.0, 0.0, 1.0],
        [0.0, 0.0, -1.0],
    ];
    const TRIANGLES: [[usize; 3]; 8] = [
        [4, 0, 2],
        [4, 2, 1],
        [4, 1, 3],
        [4, 3, 0],
        [5, 2, 0],
        [5, 1, 2],
        [5, 3, 1],
        [5, 0, 3],
    ];
    build(&POSITIONS, &TRIANGLES)
}

/// Regular icosahedron on the unit sphere.
#[must_use]
pub fn icosahedron() -> Geometry {
    let phi = f64::midpoint(1.0, 5.0_f64.sqrt());
    let a = 1.0;
    let b = 1.0 / phi;
    let raw = [
        [0.0, b, -a],
        [b, a, 0.0],
        [-b, a, 0.0],
        [0.0, b, a],
        [0.0, -b, a],
        [-a, 0.0, b],
        [0.0, -b, -a],
        [a, 0.0, -b],
        [a, 0.0, b],
        [-a, 0.0, -b],
        [b, -a, 0.0],
        [-b, -a, 0.0],
    ];
    let positions: Vec<[f64; 3]> = raw
        .iter()
        .map(|v| {
            let unit = Vector3::from(*v).normalize();
            [unit.x, unit.y, unit.z]
        })
        .collect();
    const TRIANGLES: [[usize; 3]; 20] = [
        [0, 2, 1],
        [3, 1, 2],
        [3, 5, 4],
        [3, 4, 8],
        [0, 7, 6],
        [0, 6, 9],
        [4, 11, 10],
        [6, 10, 11],
        [2, 9, 5],
        [11, 5, 9],
        [1, 8, 7],
        [10, 7, 8],
        [3, 2, 5],
        [3, 8, 1],
        [0, 9, 2],
        [0, 1, 7],
        [6, 11, 9],
        [6, 7, 10],
        [4, 5, 11],
        [4, 10, 8],
    ];
    build(&positions, &TRIANGLES)
}

fn ring(sides: usize, z: f64) -> impl Iterator<Item = [f64; 3]> {
    #[allow(clippy::cast_precision_loss)]
    let step = TAU / sides as f64;
    (0..sides).map(move |k| {
        #[allow(clippy::cast_precision_loss)]
        let angle = step * k as f64;
        [angle.cos(), angle.sin(), z]
    })
}

/// Prism over a regular `sides`-gon (clamped to at least 3): two n-gon caps
/// and `sides` quads.
#[must_use]
pub fn prism(sides: usize) -> Geometry {
    let n = sides.max(3);
    let positions: Vec<[f64; 3]> = ring(n, -0.5).chain(ring(n, 0.5)).collect();

    let mut polygons: Vec<Vec<usize>> = Vec::with_capacity(n + 2);
    polygons.push((0..n).rev().collect());
    polygons.push((n..2 * n).collect());
    for k in 0..n {
        let next = (k + 1) % n;
        polygons.push(vec![k, next, n + next, n + k]);
    }
    build(&positions, &polygons)
}

/// Pyramid over a regular `sides`-gon (clamped to at least 3).
#[must_use]
pub fn pyramid(sides: usize) -> Geometry {
    let n = sides.max(3);
    let positions: Vec<[f64; 3]> = ring(n, 0.0).chain(std::iter::once([0.0, 0.0, 1.0])).collect();

    let mut polygons: Vec<Vec<usize>> = Vec::with_capacity(n + 1);
    polygons.push((0..n).rev().collect());
    for k in 0..n {
        polygons.push(vec![k, (k + 1) % n, n]);
    }
    build(&positions, &polygons)
}

/// A single open unit square in the XY plane.
#[must_use]
pub fn quad() -> Geometry {
    const POSITIONS: [[f64; 3]; 4] = [
        [0.0, 0.0, 0.0],
        [1.0, 0.0, 0.0],
        [1.0, 1.0, 0.0],
        [0.0, 1.0, 0.0],
    ];
    build(&POSITIONS, &[[0_usize, 1, 2, 3]])
}

/// Two tetrahedra touching at a single point.
///
/// Every edge is manifold but point 0 is not: its corners form two
/// separate fans.
#[must_use]
pub fn bowtie() -> Geometry {
    const POSITIONS: [[f64; 3]; 7] = [
        [1.0, 1.0, 1.0],
        [1.0, -1.0, -1.0],
        [-1.0, 1.0, -1.0],
        [-1.0, -1.0, 1.0],
        [3.0, 3.0, 1.0],
        [3.0, 1.0, -1.0],
        [1.0, 3.0, -1.0],
    ];
    const TRIANGLES: [[usize; 3]; 8] = [
        [0, 1, 2],
        [0, 3, 1],
        [0, 2, 3],
        [1, 3, 2],
        [4, 5, 6],
        [4, 0, 5],
        [4, 6, 0],
        [5, 0, 6],
    ];
    build(&POSITIONS, &TRIANGLES)
}

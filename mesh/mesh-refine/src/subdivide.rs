//! Centroid quad subdivision and Catmull-Clark subdivision.
//!
//! Both split every n-gon into n quads `(centroid, previous midpoint, corner,
//! next midpoint)`. They differ only in the weights of the new points:
//! [`subdivide`] averages linearly, [`catmull_clark`] uses limit-surface
//! weights.

// Valences and polygon sizes are small
#![allow(clippy::cast_precision_loss)]

use hashbrown::HashMap;
use mesh_geometry::{Corner, Edge, Geometry, Point, Polygon};
use tracing::debug;

use crate::operation::GeometryOperation;

/// Split every n-gon into n quads without moving the surface.
///
/// Old points are copied. Each polygon gets a centroid point and each edge a
/// midpoint shared by the polygons on either side.
///
/// # Examples
///
/// ```
/// use mesh_geometry::shapes;
/// use mesh_refine::subdivide;
///
/// let cube = shapes::cube();
/// let refined = subdivide(&cube);
///
/// // 8 points + 12 midpoints + 6 centroids
/// assert_eq!(refined.point_count(), 26);
/// assert_eq!(refined.polygon_count(), 24);
/// ```
#[must_use]
pub fn subdivide(source: &Geometry) -> Geometry {
    let source = source.with_current_edges();
    let source: &Geometry = &source;
    let mut op = GeometryOperation::new(source);
    for point in source.points() {
        op.make_new_point_from_point(1.0, point);
    }

    let mut midpoints: HashMap<Edge, Point> = HashMap::with_capacity(source.edge_count());
    for polygon in source.polygons() {
        op.make_new_point_from_polygon_centroid(polygon);
        for (c0, c1) in corner_pairs(source, polygon) {
            let a = source.corner_point(c0);
            let b = source.corner_point(c1);
            midpoints
                .entry(Edge::new(a, b))
                .or_insert_with(|| make_midpoint(&mut op, c0, c1));
        }
    }

    emit_quads(&mut op, &midpoints);
    finish(op, &midpoints, "Subdivide")
}

/// Catmull-Clark subdivision.
///
/// Same topology as [`subdivide`]. New positions follow the classic rules:
///
/// - face point: average of the polygon's points
/// - edge point: average of the two endpoints and the adjacent face points
/// - old point of valence n: `(F + 2R + (n - 3) P) / n`, with `F` the average
///   of adjacent face points and `R` the average of incident edge midpoints
///
/// Boundary edges and points use the same formulas over whatever neighbors
/// they have.
///
/// # Examples
///
/// ```
/// use mesh_geometry::shapes;
/// use mesh_refine::catmull_clark;
///
/// let cube = shapes::cube();
/// let refined = catmull_clark(&cube);
///
/// assert_eq!(refined.point_count(), 26);
/// assert_eq!(refined.polygon_count(), 24);
///
/// // Every corner of the cube is pulled toward the center.
/// let corner = refined.point_location(refined.points().next().unwrap()).unwrap();
/// assert!(corner.norm() < 0.75_f64.sqrt());
/// ```
#[must_use]
pub fn catmull_clark(source: &Geometry) -> Geometry {
    let source = source.with_current_edges();
    let source: &Geometry = &source;
    let mut op = GeometryOperation::new(source);

    // (n - 3) / n of P itself
    for point in source.points() {
        let n = source.valence(point) as f64;
        let weight = if n > 0.0 { (n - 3.0) / n } else { 1.0 };
        op.make_new_point_from_point(weight, point);
    }

    // 2R / n: every incident edge adds 1 / n^2 of both endpoints
    let mut midpoints: HashMap<Edge, Point> = HashMap::with_capacity(source.edge_count());
    for (edge, polygons) in source.edges() {
        for end in edge.points() {
            let n = source.valence(end) as f64;
            if n > 0.0 {
                let new = new_point(&op, end);
                op.add_point_source(new, 1.0 / (n * n), edge.a());
                op.add_point_source(new, 1.0 / (n * n), edge.b());
            }
        }

        let edge_point = op.make_new_point();
        op.add_point_source(edge_point, 1.0, edge.a());
        op.add_point_source(edge_point, 1.0, edge.b());
        for &polygon in polygons {
            let k = source.polygon_size(polygon) as f64;
            op.add_polygon_centroid(edge_point, 1.0 / k, polygon);
        }
        midpoints.insert(edge, edge_point);
    }

    // Edges missing from the table (repeated points) get plain midpoints
    for polygon in source.polygons() {
        for (c0, c1) in corner_pairs(source, polygon) {
            let edge = Edge::new(source.corner_point(c0), source.corner_point(c1));
            midpoints
                .entry(edge)
                .or_insert_with(|| make_midpoint(&mut op, c0, c1));
        }
    }

    // F / n: every incident face adds 1 / (n^2 k) of each of its points
    for polygon in source.polygons() {
        op.make_new_point_from_polygon_centroid(polygon);
        let k = source.polygon_size(polygon) as f64;
        for &corner in source.polygon_corners(polygon) {
            let point = source.corner_point(corner);
            let n = source.valence(point) as f64;
            let new = new_point(&op, point);
            for face_point in source.polygon_points(polygon) {
                op.add_point_source(new, 1.0 / (n * n * k), face_point);
            }
        }
    }

    emit_quads(&mut op, &midpoints);
    finish(op, &midpoints, "Catmull-Clark")
}

/// Consecutive corner pairs of `polygon`, closing cyclically.
fn corner_pairs(source: &Geometry, polygon: Polygon) -> impl Iterator<Item = (Corner, Corner)> + '_ {
    let corners = source.polygon_corners(polygon);
    let n = corners.len();
    (0..n).map(move |i| (corners[i], corners[(i + 1) % n]))
}

/// A point halfway along the edge `c0 -> c1`, for points and corners alike.
fn make_midpoint(op: &mut GeometryOperation<'_>, c0: Corner, c1: Corner) -> Point {
    let source = op.source();
    let midpoint = op.make_new_point();
    op.add_point_source(midpoint, 0.5, source.corner_point(c0));
    op.add_point_source(midpoint, 0.5, source.corner_point(c1));
    op.add_point_corner_source(midpoint, 0.5, c0);
    op.add_point_corner_source(midpoint, 0.5, c1);
    midpoint
}

fn new_point(op: &GeometryOperation<'_>, old: Point) -> Point {
    match op.new_point(old) {
        Some(new) => new,
        None => panic!("{old:?} has no new point"),
    }
}

fn midpoint(midpoints: &HashMap<Edge, Point>, edge: Edge) -> Point {
    match midpoints.get(&edge) {
        Some(&point) => point,
        None => panic!("{edge:?} has no midpoint"),
    }
}

/// One quad per old corner. Midpoint corners are sourced from the two
/// corners of the polygon being split.
fn emit_quads(op: &mut GeometryOperation<'_>, midpoints: &HashMap<Edge, Point>) {
    let source = op.source();
    for polygon in source.polygons() {
        let corners = source.polygon_corners(polygon);
        let n = corners.len();
        for i in 0..n {
            let previous = corners[(i + n - 1) % n];
            let current = corners[i];
            let next = corners[(i + 1) % n];

            let point = source.corner_point(current);
            let m_previous = midpoint(midpoints, Edge::new(source.corner_point(previous), point));
            let m_next = midpoint(midpoints, Edge::new(point, source.corner_point(next)));

            let quad = op.make_new_polygon_from_polygon(polygon);
            op.make_new_corner_from_polygon_centroid(quad, polygon);
            op.make_new_corner(quad, m_previous, [(0.5, previous), (0.5, current)]);
            op.make_new_corner_from_corner(quad, current);
            op.make_new_corner(quad, m_next, [(0.5, current), (0.5, next)]);
        }
    }
}

/// Build edges, source each half of a split edge from the old edge, and
/// interpolate.
fn finish(
    mut op: GeometryOperation<'_>,
    midpoints: &HashMap<Edge, Point>,
    name: &str,
) -> Geometry {
    op.build_destination_edges();
    for (&old, &midpoint) in midpoints {
        for end in old.points() {
            op.add_edge_source(Edge::new(midpoint, new_point(&op, end)), 1.0, old);
        }
    }

    let source = op.source();
    let destination = op.finish();
    debug!(
        "{}: {} -> {} polygons, {} -> {} points",
        name,
        source.polygon_count(),
        destination.polygon_count(),
        source.point_count(),
        destination.point_count()
    );
    destination
}

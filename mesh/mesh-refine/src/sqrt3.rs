//! Kobbelt's sqrt(3) subdivision.

// Valences are small
#![allow(clippy::cast_precision_loss)]

use std::f64::consts::TAU;

use mesh_geometry::{Edge, Geometry};
use tracing::debug;

use crate::operation::GeometryOperation;

/// Smoothing weight of the 1-ring for a point of valence `n`.
#[must_use]
pub fn sqrt3_alpha(n: usize) -> f64 {
    (4.0 - 2.0 * (TAU / n as f64).cos()) / 9.0
}

/// sqrt(3) subdivision.
///
/// Old points are relaxed toward their 1-ring with weight
/// `alpha(n) = (4 - 2 cos(2 pi / n)) / 9`. Every polygon gets a centroid
/// point, and every half-edge that has a polygon on the other side becomes
/// the triangle `(centroid, corner, opposite centroid)`. Boundary half-edges
/// produce nothing.
///
/// On a closed triangle mesh this triples the triangle count and rotates
/// every old edge into one joining two centroids.
///
/// # Examples
///
/// ```
/// use mesh_geometry::shapes;
/// use mesh_refine::sqrt3;
///
/// let tetrahedron = shapes::tetrahedron();
/// let refined = sqrt3(&tetrahedron);
///
/// assert_eq!(refined.point_count(), 8);
/// assert_eq!(refined.polygon_count(), 12);
/// ```
#[must_use]
pub fn sqrt3(source: &Geometry) -> Geometry {
    let source = source.with_current_edges();
    let source: &Geometry = &source;
    let mut op = GeometryOperation::new(source);

    for point in source.points() {
        let n = source.valence(point);
        if n == 0 {
            op.make_new_point_from_point(1.0, point);
            continue;
        }
        let alpha = sqrt3_alpha(n);
        let new = op.make_new_point_from_point(1.0 - alpha, point);
        op.add_point_ring(new, alpha / n as f64, point);
    }

    for polygon in source.polygons() {
        op.make_new_point_from_polygon_centroid(polygon);
    }

    for polygon in source.polygons() {
        let corners = source.polygon_corners(polygon);
        let n = corners.len();
        for i in 0..n {
            let current = corners[i];
            let edge = Edge::new(
                source.corner_point(current),
                source.corner_point(corners[(i + 1) % n]),
            );
            let Some(opposite) = source.opposite_polygon(edge, polygon) else {
                continue;
            };

            let triangle = op.make_new_polygon(0.5, polygon);
            op.add_polygon_source(triangle, 0.5, opposite);
            op.make_new_corner_from_polygon_centroid(triangle, polygon);
            op.make_new_corner_from_corner(triangle, current);
            op.make_new_corner_from_polygon_centroid(triangle, opposite);
        }
    }

    op.build_destination_edges();
    source_flipped_edges(&mut op);

    let destination = op.finish();
    debug!(
        "Sqrt3: {} -> {} polygons, {} -> {} points",
        source.polygon_count(),
        destination.polygon_count(),
        source.point_count(),
        destination.point_count()
    );
    destination
}

/// Every old edge with polygons on both sides is replaced by the edge
/// joining their centroids.
fn source_flipped_edges(op: &mut GeometryOperation<'_>) {
    let source = op.source();
    let mut flipped: Vec<Edge> = Vec::with_capacity(2);
    for (old, polygons) in source.edges() {
        flipped.clear();
        for &polygon in polygons {
            let Some(opposite) = source.opposite_polygon(old, polygon) else {
                continue;
            };
            let (Some(a), Some(b)) = (op.centroid_point(polygon), op.centroid_point(opposite)) else {
                continue;
            };
            let new = Edge::new(a, b);
            if !flipped.contains(&new) && op.destination().contains_edge(new) {
                flipped.push(new);
            }
        }
        for &new in &flipped {
            op.add_edge_source(new, 1.0, old);
        }
    }
}

//! Centroid fan triangulation.

use mesh_geometry::Geometry;
use tracing::debug;

use crate::operation::GeometryOperation;

/// Triangulate every polygon with more than three corners.
///
/// Triangles are copied unchanged. An n-gon with n > 3 gets a centroid point
/// and is replaced by the n triangles `(centroid, corner i, corner i + 1)`.
/// Points and the edges of the old geometry are kept.
///
/// # Examples
///
/// ```
/// use mesh_geometry::shapes;
/// use mesh_refine::triangulate;
///
/// let pyramid = shapes::pyramid(4);
/// let refined = triangulate(&pyramid);
///
/// // Four sides are copied, the square base becomes a fan of four.
/// assert_eq!(refined.polygon_count(), 8);
/// assert_eq!(refined.point_count(), 6);
/// ```
#[must_use]
pub fn triangulate(source: &Geometry) -> Geometry {
    let source = source.with_current_edges();
    let source: &Geometry = &source;
    let mut op = GeometryOperation::new(source);
    for point in source.points() {
        op.make_new_point_from_point(1.0, point);
    }

    for polygon in source.polygons() {
        let corners = source.polygon_corners(polygon);
        let n = corners.len();
        if n <= 3 {
            let copy = op.make_new_polygon_from_polygon(polygon);
            op.add_polygon_corners(copy, polygon);
            continue;
        }

        op.make_new_point_from_polygon_centroid(polygon);
        for i in 0..n {
            let triangle = op.make_new_polygon_from_polygon(polygon);
            op.make_new_corner_from_polygon_centroid(triangle, polygon);
            op.make_new_corner_from_corner(triangle, corners[i]);
            op.make_new_corner_from_corner(triangle, corners[(i + 1) % n]);
        }
    }

    op.build_destination_edges_with_sourcing();

    let destination = op.finish();
    debug!(
        "Triangulate: {} -> {} polygons, {} -> {} points",
        source.polygon_count(),
        destination.polygon_count(),
        source.point_count(),
        destination.point_count()
    );
    destination
}

//! Vertex truncation.
//!
//! Every edge is cut twice near its endpoints and every polygon is replaced
//! by the polygon through its cut points, so each old vertex leaves a hole
//! bounded by "open" edges. With `close`, each hole is capped.

// Polygon sizes are small
#![allow(clippy::cast_precision_loss)]

use std::f64::consts::PI;

use hashbrown::{HashMap, HashSet};
use mesh_geometry::{Corner, Edge, Geometry, Point};
use tracing::{debug, warn};

use crate::operation::GeometryOperation;

/// Fraction of each edge cut off at either end of an n-gon's edges.
///
/// Chosen so that a regular n-gon becomes a regular 2n-gon: `1/3` for
/// triangles, `1 - 1/sqrt(2)` for squares. Polygons with
/// fewer than three corners are cut at the midpoint.
#[must_use]
pub fn truncation_ratio(n: usize) -> f64 {
    if n < 3 {
        return 0.5;
    }
    let n = n as f64;
    0.5 - 0.5 * (PI / (2.0 * n)).tan() / (PI / n).tan()
}

/// The two cut points of one edge.
#[derive(Debug, Clone, Copy)]
struct Cut {
    /// Cut point next to `edge.a()`.
    near_a: Point,
    /// Cut point next to `edge.b()`.
    near_b: Point,
    /// Ratio of the first polygon that reached the edge.
    t: f64,
}

/// An open edge left around an old point, `from -> to` in the winding of the
/// truncated polygon it belongs to.
#[derive(Debug, Clone, Copy)]
struct OpenEdge {
    from: Point,
    to: Point,
    corner: Corner,
}

/// Truncate every vertex.
///
/// Old points are dropped. Each edge gets two new points at ratio `t` from
/// either end, where `t` comes from [`truncation_ratio`] for the first
/// polygon that reaches the edge. Each n-gon becomes a 2n-gon through the
/// cut points of its edges.
///
/// With `close`, the open edges around each old point are walked into
/// cycles and each cycle becomes one cap polygon. A point shared by two
/// separate fans gets one cap per fan. Points with fewer than three open
/// edges are left open, and chains that do not close (boundary points) are
/// skipped with a warning.
///
/// # Examples
///
/// ```
/// use mesh_geometry::shapes;
/// use mesh_refine::truncate;
///
/// let cube = shapes::cube();
///
/// let open = truncate(&cube, false);
/// assert_eq!(open.point_count(), 24);
/// assert_eq!(open.polygon_count(), 6);
///
/// // Six octagons and eight triangles
/// let closed = truncate(&cube, true);
/// assert_eq!(closed.polygon_count(), 14);
/// ```
#[must_use]
pub fn truncate(source: &Geometry, close: bool) -> Geometry {
    let source = source.with_current_edges();
    let source: &Geometry = &source;
    let mut op = GeometryOperation::new(source);
    let mut cuts: HashMap<Edge, Cut> = HashMap::with_capacity(source.edge_count());
    let mut open_edges: Vec<Vec<OpenEdge>> = vec![Vec::new(); source.point_count()];

    let mut near: Vec<(Point, Point)> = Vec::new();
    for polygon in source.polygons() {
        let corners = source.polygon_corners(polygon);
        let n = corners.len();
        let t = truncation_ratio(n);
        let new_polygon = op.make_new_polygon_from_polygon(polygon);

        near.clear();
        for i in 0..n {
            let c0 = corners[i];
            let c1 = corners[(i + 1) % n];
            let (n0, n1, t) = cut(&mut op, &mut cuts, c0, c1, t);
            op.make_new_corner(new_polygon, n0, [(1.0 - t, c0), (t, c1)]);
            op.make_new_corner(new_polygon, n1, [(t, c0), (1.0 - t, c1)]);
            near.push((n0, n1));
        }

        for i in 0..n {
            let corner = corners[(i + 1) % n];
            open_edges[source.corner_point(corner).index()].push(OpenEdge {
                from: near[i].1,
                to: near[(i + 1) % n].0,
                corner,
            });
        }
    }

    let caps = if close {
        close_vertices(&mut op, &open_edges)
    } else {
        0
    };

    op.build_destination_edges();
    for (&old, cut) in &cuts {
        op.add_edge_source(Edge::new(cut.near_a, cut.near_b), 1.0, old);
    }

    let destination = op.finish();
    debug!(
        "Truncate: {} -> {} polygons ({} caps), {} -> {} points",
        source.polygon_count(),
        destination.polygon_count(),
        caps,
        source.point_count(),
        destination.point_count()
    );
    destination
}

/// Cut points of the edge `c0 -> c1`, ordered `(near c0, near c1)`, and the
/// ratio they were made with.
fn cut(
    op: &mut GeometryOperation<'_>,
    cuts: &mut HashMap<Edge, Cut>,
    c0: Corner,
    c1: Corner,
    t: f64,
) -> (Point, Point, f64) {
    let source = op.source();
    let a = source.corner_point(c0);
    let b = source.corner_point(c1);
    let edge = Edge::new(a, b);

    let cut = *cuts.entry(edge).or_insert_with(|| {
        let near_a = op.make_new_point();
        op.add_point_source(near_a, 1.0 - t, edge.a());
        op.add_point_source(near_a, t, edge.b());
        let near_b = op.make_new_point();
        op.add_point_source(near_b, t, edge.a());
        op.add_point_source(near_b, 1.0 - t, edge.b());
        Cut { near_a, near_b, t }
    });

    if a == edge.a() {
        (cut.near_a, cut.near_b, cut.t)
    } else {
        (cut.near_b, cut.near_a, cut.t)
    }
}

/// Cap every closed cycle of open edges. Returns the number of caps made.
fn close_vertices(op: &mut GeometryOperation<'_>, open_edges: &[Vec<OpenEdge>]) -> usize {
    let source = op.source();
    let mut caps = 0;

    for point in source.points() {
        let edges = &open_edges[point.index()];
        if edges.len() < 3 {
            continue;
        }

        // Caps run against the polygons' winding: to -> from
        let previous: HashMap<Point, &OpenEdge> = edges.iter().map(|edge| (edge.to, edge)).collect();
        let mut visited: HashSet<Point> = HashSet::with_capacity(edges.len());

        for start in edges.iter().map(|edge| edge.to) {
            if !visited.insert(start) {
                continue;
            }

            let mut cycle: Vec<(Point, Corner)> = Vec::with_capacity(edges.len());
            let mut current = start;
            let closed = loop {
                let Some(edge) = previous.get(&current) else {
                    break false;
                };
                cycle.push((current, edge.corner));
                if edge.from == start {
                    break true;
                }
                if cycle.len() >= edges.len() || !visited.insert(edge.from) {
                    break false;
                }
                current = edge.from;
            };

            if !closed {
                warn!(
                    "Truncate: open edges around {:?} do not form a closed loop, leaving it open",
                    point
                );
                continue;
            }
            if cycle.len() < 3 {
                continue;
            }

            let corners: Vec<Corner> = cycle.iter().map(|&(_, corner)| corner).collect();
            let cap = op.make_new_polygon(1.0, source.corner_polygon(corners[0]));
            for &corner in &corners[1..] {
                op.add_polygon_source(cap, 1.0, source.corner_polygon(corner));
            }
            for &(cut_point, _) in &cycle {
                op.make_new_corner(cap, cut_point, corners.iter().map(|&corner| (1.0, corner)));
            }
            caps += 1;
        }
    }

    caps
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use mesh_geometry::{attribute_names, shapes, Polygon, Vector3};

    fn edge_lengths(geometry: &Geometry) -> Vec<f64> {
        geometry
            .edges()
            .map(|(edge, _)| {
                let a = geometry.point_location(edge.a()).unwrap();
                let b = geometry.point_location(edge.b()).unwrap();
                (a - b).norm()
            })
            .collect()
    }

    #[test]
    fn test_truncation_ratio() {
        assert_relative_eq!(truncation_ratio(3), 1.0 / 3.0, epsilon = 1e-12);
        assert_relative_eq!(truncation_ratio(4), 1.0 - 0.5_f64.sqrt(), epsilon = 1e-12);
        assert_relative_eq!(truncation_ratio(2), 0.5);
        assert!(truncation_ratio(100) > 0.0 && truncation_ratio(100) < 0.5);
    }

    #[test]
    fn test_truncated_tetrahedron() {
        let refined = truncate(&shapes::tetrahedron(), true);
        assert_eq!(refined.point_count(), 12);
        assert_eq!(refined.polygon_count(), 8);
        assert_eq!(refined.edge_count(), 18);
        assert!(refined.edges().all(|(_, polygons)| polygons.len() == 2));

        let sizes: Vec<usize> = refined.polygons().map(|p| refined.polygon_size(p)).collect();
        assert_eq!(sizes, vec![6, 6, 6, 6, 3, 3, 3, 3]);
    }

    #[test]
    fn test_truncated_cube_is_uniform() {
        let refined = truncate(&shapes::cube(), true);
        assert_eq!(refined.point_count(), 24);
        assert_eq!(refined.edge_count(), 36);

        let lengths = edge_lengths(&refined);
        for length in &lengths {
            assert_relative_eq!(*length, lengths[0], epsilon = 1e-12);
        }
    }

    #[test]
    fn test_caps_face_outward() {
        let mut refined = truncate(&shapes::octahedron(), true);
        refined.compute_polygon_centroids().unwrap();
        refined.compute_polygon_normals().unwrap();

        let centroids = refined
            .polygon_attributes()
            .get::<Vector3<f64>>(attribute_names::POLYGON_CENTROIDS)
            .unwrap();
        let normals = refined
            .polygon_attributes()
            .get::<Vector3<f64>>(attribute_names::POLYGON_NORMALS)
            .unwrap();
        assert_eq!(refined.polygon_count(), 8 + 6);
        for polygon in refined.polygons() {
            assert!(centroids[&polygon].dot(&normals[&polygon]) > 0.0, "{polygon:?}");
        }
    }

    #[test]
    fn test_open_truncation_leaves_holes() {
        let refined = truncate(&shapes::tetrahedron(), false);
        assert_eq!(refined.polygon_count(), 4);
        // Middle edges are shared, the cut edges around old points are not
        let boundary = refined
            .edges()
            .filter(|(_, polygons)| polygons.len() == 1)
            .count();
        assert_eq!(boundary, 12);
    }

    #[test]
    fn test_bowtie_gets_one_cap_per_fan() {
        let refined = truncate(&shapes::bowtie(), true);
        // 12 edges cut twice; 8 hexagons, 6 ordinary caps and 2 at the shared point
        assert_eq!(refined.point_count(), 24);
        assert_eq!(refined.polygon_count(), 8 + 8);
        assert!(refined.edges().all(|(_, polygons)| polygons.len() == 2));
    }

    #[test]
    fn test_unclosed_fan_is_skipped() {
        let positions = [
            Vector3::new(0.0, 0.0, 1.0),
            Vector3::new(1.0, 0.0, 0.0),
            Vector3::new(0.0, 1.0, 0.0),
            Vector3::new(-1.0, 0.0, 0.0),
            Vector3::new(0.0, -1.0, 0.0),
        ];
        let fan =
            Geometry::from_polygons(&positions, &[[0_usize, 1, 2], [0, 2, 3], [0, 3, 4]]).unwrap();
        let refined = truncate(&fan, true);
        assert_eq!(refined.polygon_count(), 3);
    }

    #[test]
    fn test_corner_attributes_follow_cuts() {
        let mut source = shapes::tetrahedron();
        let shade = source.corner_attributes_mut().find::<f64>("shade").unwrap();
        for corner in (0..12).map(Corner::from_index) {
            shade.insert(corner, 1.0);
        }
        shade.insert(Corner::from_index(0), 4.0);

        let refined = truncate(&source, false);
        let shade = refined.corner_attributes().get::<f64>("shade").unwrap();
        let hexagon = refined.polygon_corners(Polygon::from_index(0)).to_vec();
        // Corner 0 then its cut toward corner 1, at t = 1/3
        assert_relative_eq!(shade[&hexagon[0]], 3.0, epsilon = 1e-12);
        assert_relative_eq!(shade[&hexagon[1]], 2.0, epsilon = 1e-12);
    }
}

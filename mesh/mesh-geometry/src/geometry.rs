//! The geometry container.

use std::borrow::Cow;

use hashbrown::hash_map::Entry;
use hashbrown::HashMap;
use nalgebra::{Matrix3, Matrix4, Point3, Vector3};
use tracing::warn;

use crate::attribute::{attribute_names, AttributeMapCollection};
use crate::error::{GeometryError, GeometryResult};
use crate::handles::{Corner, Edge, Point, Polygon};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct CornerRecord {
    point: Point,
    polygon: Polygon,
    position: u32,
}

/// A polygon mesh: points, polygons made of corners, derived edges, and
/// one attribute map collection per entity kind.
///
/// Topology is append-only. Entities are allocated with
/// [`make_point`](Self::make_point), [`make_polygon`](Self::make_polygon) and
/// [`make_corner`](Self::make_corner); the edge table is derived and must be
/// refreshed with [`build_edges`](Self::build_edges) after topology changes.
/// Until then [`edges_stale`](Self::edges_stale) reports `true`.
///
/// # Example
///
/// ```
/// use mesh_geometry::Geometry;
///
/// let mut geometry = Geometry::new();
/// let a = geometry.make_point();
/// let b = geometry.make_point();
/// let c = geometry.make_point();
/// let triangle = geometry.make_polygon();
/// for point in [a, b, c] {
///     geometry.make_corner(triangle, point);
/// }
/// geometry.build_edges();
///
/// assert_eq!(geometry.polygon_size(triangle), 3);
/// assert_eq!(geometry.edge_count(), 3);
/// ```
#[derive(Debug, Clone, Default)]
pub struct Geometry {
    point_corners: Vec<Vec<Corner>>,
    polygon_corners: Vec<Vec<Corner>>,
    corners: Vec<CornerRecord>,
    edge_order: Vec<Edge>,
    edge_polygons: HashMap<Edge, Vec<Polygon>>,
    edges_stale: bool,
    point_attributes: AttributeMapCollection<Point>,
    polygon_attributes: AttributeMapCollection<Polygon>,
    corner_attributes: AttributeMapCollection<Corner>,
    edge_attributes: AttributeMapCollection<Edge>,
}

impl Geometry {
    /// Create an empty geometry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty geometry with room for the given entity counts.
    #[must_use]
    pub fn with_capacity(points: usize, polygons: usize) -> Self {
        Self {
            point_corners: Vec::with_capacity(points),
            polygon_corners: Vec::with_capacity(polygons),
            corners: Vec::with_capacity(polygons * 4),
            ..Self::default()
        }
    }

    /// Build a geometry from point positions and polygon index loops.
    ///
    /// Positions are stored in the `point_locations` map and the edge table
    /// is built.
    ///
    /// # Errors
    ///
    /// Returns an error if a loop has fewer than three indices or references
    /// a position that does not exist.
    ///
    /// # Example
    ///
    /// ```
    /// use mesh_geometry::{Geometry, Vector3};
    ///
    /// let positions = [
    ///     Vector3::new(0.0, 0.0, 0.0),
    ///     Vector3::new(1.0, 0.0, 0.0),
    ///     Vector3::new(1.0, 1.0, 0.0),
    ///     Vector3::new(0.0, 1.0, 0.0),
    /// ];
    /// let geometry = Geometry::from_polygons(&positions, &[[0_usize, 1, 2, 3]])?;
    ///
    /// assert_eq!(geometry.point_count(), 4);
    /// assert_eq!(geometry.corner_count(), 4);
    /// # Ok::<(), mesh_geometry::GeometryError>(())
    /// ```
    pub fn from_polygons<L: AsRef<[usize]>>(
        positions: &[Vector3<f64>],
        polygons: &[L],
    ) -> GeometryResult<Self> {
        for (polygon, indices) in polygons.iter().enumerate() {
            let indices = indices.as_ref();
            if indices.len() < 3 {
                return Err(GeometryError::DegeneratePolygon {
                    polygon,
                    corners: indices.len(),
                });
            }
            if let Some(&index) = indices.iter().find(|&&i| i >= positions.len()) {
                return Err(GeometryError::InvalidPointIndex {
                    polygon,
                    index,
                    point_count: positions.len(),
                });
            }
        }

        let mut geometry = Self::with_capacity(positions.len(), polygons.len());
        let points: Vec<Point> = positions.iter().map(|_| geometry.make_point()).collect();

        let locations = geometry
            .point_attributes
            .find::<Vector3<f64>>(attribute_names::POINT_LOCATIONS)?;
        for (&point, position) in points.iter().zip(positions) {
            locations.insert(point, *position);
        }

        for indices in polygons {
            let polygon = geometry.make_polygon();
            for &index in indices.as_ref() {
                geometry.make_corner(polygon, points[index]);
            }
        }

        geometry.build_edges();
        Ok(geometry)
    }

    // --- Allocation ---

    /// Allocate a new point.
    pub fn make_point(&mut self) -> Point {
        let point = Point::from_index(self.point_corners.len());
        self.point_corners.push(Vec::new());
        point
    }

    /// Allocate a new polygon with no corners.
    pub fn make_polygon(&mut self) -> Polygon {
        let polygon = Polygon::from_index(self.polygon_corners.len());
        self.polygon_corners.push(Vec::new());
        polygon
    }

    /// Append a corner referencing `point` to the winding of `polygon`.
    ///
    /// # Panics
    ///
    /// Panics if either handle does not belong to this geometry.
    pub fn make_corner(&mut self, polygon: Polygon, point: Point) -> Corner {
        assert!(
            point.index() < self.point_corners.len(),
            "{point:?} does not belong to this geometry"
        );
        assert!(
            polygon.index() < self.polygon_corners.len(),
            "{polygon:?} does not belong to this geometry"
        );

        let corner = Corner::from_index(self.corners.len());
        let winding = &mut self.polygon_corners[polygon.index()];
        let position = u32::try_from(winding.len()).unwrap_or(u32::MAX);
        winding.push(corner);
        self.point_corners[point.index()].push(corner);
        self.edges_stale = true;
        self.corners.push(CornerRecord {
            point,
            polygon,
            position,
        });
        corner
    }

    /// Allocate a polygon whose corners reference `points`, in order.
    pub fn make_polygon_from_points(&mut self, points: &[Point]) -> Polygon {
        let polygon = self.make_polygon();
        for &point in points {
            self.make_corner(polygon, point);
        }
        polygon
    }

    // --- Counts and iteration ---

    /// Number of points.
    #[must_use]
    pub fn point_count(&self) -> usize {
        self.point_corners.len()
    }

    /// Number of polygons.
    #[must_use]
    pub fn polygon_count(&self) -> usize {
        self.polygon_corners.len()
    }

    /// Number of corners over all polygons.
    #[must_use]
    pub fn corner_count(&self) -> usize {
        self.corners.len()
    }

    /// Number of edges found by the last [`build_edges`](Self::build_edges).
    #[must_use]
    pub fn edge_count(&self) -> usize {
        self.edge_order.len()
    }

    /// Whether the geometry has no points or no polygons.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.point_corners.is_empty() || self.polygon_corners.is_empty()
    }

    /// All points, in allocation order.
    pub fn points(&self) -> impl ExactSizeIterator<Item = Point> {
        (0..self.point_count()).map(Point::from_index)
    }

    /// All polygons, in allocation order.
    pub fn polygons(&self) -> impl ExactSizeIterator<Item = Polygon> {
        (0..self.polygon_count()).map(Polygon::from_index)
    }

    /// All corners, in allocation order.
    pub fn corners(&self) -> impl ExactSizeIterator<Item = Corner> {
        (0..self.corner_count()).map(Corner::from_index)
    }

    /// Whether `point` was allocated by this geometry.
    #[must_use]
    pub fn contains_point(&self, point: Point) -> bool {
        point.index() < self.point_count()
    }

    /// Whether `polygon` was allocated by this geometry.
    #[must_use]
    pub fn contains_polygon(&self, polygon: Polygon) -> bool {
        polygon.index() < self.polygon_count()
    }

    /// Whether `corner` was allocated by this geometry.
    #[must_use]
    pub fn contains_corner(&self, corner: Corner) -> bool {
        corner.index() < self.corner_count()
    }

    // --- Navigation ---

    /// Corners of `polygon` in winding order.
    #[must_use]
    pub fn polygon_corners(&self, polygon: Polygon) -> &[Corner] {
        &self.polygon_corners[polygon.index()]
    }

    /// Points of `polygon` in winding order.
    pub fn polygon_points(&self, polygon: Polygon) -> impl Iterator<Item = Point> + '_ {
        self.polygon_corners(polygon)
            .iter()
            .map(|&corner| self.corner_point(corner))
    }

    /// Number of corners of `polygon`.
    #[must_use]
    pub fn polygon_size(&self, polygon: Polygon) -> usize {
        self.polygon_corners[polygon.index()].len()
    }

    /// Edges of `polygon` in winding order, including the closing edge.
    pub fn polygon_edges(&self, polygon: Polygon) -> impl Iterator<Item = Edge> + '_ {
        let corners = self.polygon_corners(polygon);
        let n = corners.len();
        (0..n).map(move |i| {
            Edge::new(
                self.corner_point(corners[i]),
                self.corner_point(corners[(i + 1) % n]),
            )
        })
    }

    /// Point referenced by `corner`.
    #[must_use]
    pub fn corner_point(&self, corner: Corner) -> Point {
        self.corners[corner.index()].point
    }

    /// Polygon owning `corner`.
    #[must_use]
    pub fn corner_polygon(&self, corner: Corner) -> Polygon {
        self.corners[corner.index()].polygon
    }

    /// Position of `corner` in its polygon's winding.
    #[must_use]
    pub fn corner_position(&self, corner: Corner) -> usize {
        self.corners[corner.index()].position as usize
    }

    /// The corner after `corner` in its polygon's winding (cyclic).
    #[must_use]
    pub fn next_corner(&self, corner: Corner) -> Corner {
        let record = self.corners[corner.index()];
        let winding = &self.polygon_corners[record.polygon.index()];
        winding[(record.position as usize + 1) % winding.len()]
    }

    /// The corner before `corner` in its polygon's winding (cyclic).
    #[must_use]
    pub fn previous_corner(&self, corner: Corner) -> Corner {
        let record = self.corners[corner.index()];
        let winding = &self.polygon_corners[record.polygon.index()];
        winding[(record.position as usize + winding.len() - 1) % winding.len()]
    }

    /// Corners referencing `point`, in allocation order.
    #[must_use]
    pub fn point_corners(&self, point: Point) -> &[Corner] {
        &self.point_corners[point.index()]
    }

    /// Number of corners referencing `point`.
    #[must_use]
    pub fn valence(&self, point: Point) -> usize {
        self.point_corners[point.index()].len()
    }

    // --- Edges ---

    /// Rebuild the edge to incident-polygon table from the polygon windings.
    ///
    /// Edges are enumerated in first-seen order; each edge lists its
    /// polygons in scan order, once each. Repeated consecutive points do not
    /// produce an edge.
    pub fn build_edges(&mut self) {
        self.edge_order.clear();
        self.edge_polygons.clear();
        self.edges_stale = false;

        for (polygon_index, winding) in self.polygon_corners.iter().enumerate() {
            let polygon = Polygon::from_index(polygon_index);
            let n = winding.len();
            for i in 0..n {
                let a = self.corners[winding[i].index()].point;
                let b = self.corners[winding[(i + 1) % n].index()].point;
                if a == b {
                    continue;
                }

                let edge = Edge::new(a, b);
                let incident = match self.edge_polygons.entry(edge) {
                    Entry::Occupied(entry) => entry.into_mut(),
                    Entry::Vacant(entry) => {
                        self.edge_order.push(edge);
                        entry.insert(Vec::with_capacity(2))
                    }
                };
                if !incident.contains(&polygon) {
                    incident.push(polygon);
                }
            }
        }
    }

    /// Whether corners were added since the last
    /// [`build_edges`](Self::build_edges).
    #[must_use]
    pub const fn edges_stale(&self) -> bool {
        self.edges_stale
    }

    /// This geometry with an edge table matching its windings.
    ///
    /// Borrows when the table is current. Otherwise logs a warning and
    /// returns a copy with rebuilt edges; `self` is left untouched.
    ///
    /// # Example
    ///
    /// ```
    /// use mesh_geometry::Geometry;
    ///
    /// let mut geometry = Geometry::new();
    /// let points: Vec<_> = (0..3).map(|_| geometry.make_point()).collect();
    /// geometry.make_polygon_from_points(&points);
    /// assert!(geometry.edges_stale());
    ///
    /// let current = geometry.with_current_edges();
    /// assert_eq!(current.edge_count(), 3);
    /// assert_eq!(geometry.edge_count(), 0);
    /// ```
    #[must_use]
    pub fn with_current_edges(&self) -> Cow<'_, Self> {
        if !self.edges_stale {
            return Cow::Borrowed(self);
        }
        warn!(
            "Edge table out of date ({} polygons, {} corners), rebuilding on a copy",
            self.polygon_count(),
            self.corner_count()
        );
        let mut current = self.clone();
        current.build_edges();
        Cow::Owned(current)
    }

    /// All edges with their incident polygons, in build order.
    pub fn edges(&self) -> impl ExactSizeIterator<Item = (Edge, &[Polygon])> + '_ {
        self.edge_order
            .iter()
            .map(|edge| (*edge, self.edge_polygons(*edge)))
    }

    /// Polygons incident to `edge`; empty if the edge does not exist.
    #[must_use]
    pub fn edge_polygons(&self, edge: Edge) -> &[Polygon] {
        self.edge_polygons.get(&edge).map_or(&[], Vec::as_slice)
    }

    /// Whether `edge` is in the edge table.
    #[must_use]
    pub fn contains_edge(&self, edge: Edge) -> bool {
        self.edge_polygons.contains_key(&edge)
    }

    /// The first polygon incident to `edge` other than `polygon`.
    ///
    /// On non-manifold edges this is the first match in scan order.
    #[must_use]
    pub fn opposite_polygon(&self, edge: Edge, polygon: Polygon) -> Option<Polygon> {
        self.edge_polygons(edge)
            .iter()
            .copied()
            .find(|&other| other != polygon)
    }

    // --- Attributes ---

    /// Point attribute maps.
    #[must_use]
    pub const fn point_attributes(&self) -> &AttributeMapCollection<Point> {
        &self.point_attributes
    }

    /// Mutable point attribute maps.
    pub fn point_attributes_mut(&mut self) -> &mut AttributeMapCollection<Point> {
        &mut self.point_attributes
    }

    /// Polygon attribute maps.
    #[must_use]
    pub const fn polygon_attributes(&self) -> &AttributeMapCollection<Polygon> {
        &self.polygon_attributes
    }

    /// Mutable polygon attribute maps.
    pub fn polygon_attributes_mut(&mut self) -> &mut AttributeMapCollection<Polygon> {
        &mut self.polygon_attributes
    }

    /// Corner attribute maps.
    #[must_use]
    pub const fn corner_attributes(&self) -> &AttributeMapCollection<Corner> {
        &self.corner_attributes
    }

    /// Mutable corner attribute maps.
    pub fn corner_attributes_mut(&mut self) -> &mut AttributeMapCollection<Corner> {
        &mut self.corner_attributes
    }

    /// Edge attribute maps.
    #[must_use]
    pub const fn edge_attributes(&self) -> &AttributeMapCollection<Edge> {
        &self.edge_attributes
    }

    /// Mutable edge attribute maps.
    pub fn edge_attributes_mut(&mut self) -> &mut AttributeMapCollection<Edge> {
        &mut self.edge_attributes
    }

    /// Position of `point`, if `point_locations` has one.
    #[must_use]
    pub fn point_location(&self, point: Point) -> Option<Vector3<f64>> {
        self.point_attributes
            .get::<Vector3<f64>>(attribute_names::POINT_LOCATIONS)
            .and_then(|locations| locations.get(&point).copied())
    }

    /// Apply an affine transform.
    ///
    /// Moves `point_locations` and `polygon_centroids`, and re-orients the
    /// point, polygon and corner normal maps with the inverse transpose of
    /// the linear part. Normals are left untouched if that part is singular.
    ///
    /// # Errors
    ///
    /// Returns an error if one of those names holds a non-`Vector3` map.
    pub fn transform(&mut self, matrix: &Matrix4<f64>) -> GeometryResult<()> {
        let move_point = |v: &mut Vector3<f64>| *v = matrix.transform_point(&Point3::from(*v)).coords;

        if self.point_attributes.contains(attribute_names::POINT_LOCATIONS) {
            self.point_attributes
                .find::<Vector3<f64>>(attribute_names::POINT_LOCATIONS)?
                .values_mut()
                .for_each(move_point);
        }
        if self.polygon_attributes.contains(attribute_names::POLYGON_CENTROIDS) {
            self.polygon_attributes
                .find::<Vector3<f64>>(attribute_names::POLYGON_CENTROIDS)?
                .values_mut()
                .for_each(move_point);
        }

        let linear: Matrix3<f64> = matrix.fixed_view::<3, 3>(0, 0).into_owned();
        let Some(normal_matrix) = linear.try_inverse().map(|inverse| inverse.transpose()) else {
            warn!("Transform is singular, normals left unchanged");
            return Ok(());
        };
        let turn_normal = |n: &mut Vector3<f64>| {
            let turned = normal_matrix * *n;
            *n = turned.try_normalize(f64::EPSILON).unwrap_or(turned);
        };

        if self.point_attributes.contains(attribute_names::POINT_NORMALS) {
            self.point_attributes
                .find::<Vector3<f64>>(attribute_names::POINT_NORMALS)?
                .values_mut()
                .for_each(turn_normal);
        }
        if self.polygon_attributes.contains(attribute_names::POLYGON_NORMALS) {
            self.polygon_attributes
                .find::<Vector3<f64>>(attribute_names::POLYGON_NORMALS)?
                .values_mut()
                .for_each(turn_normal);
        }
        if self.corner_attributes.contains(attribute_names::CORNER_NORMALS) {
            self.corner_attributes
                .find::<Vector3<f64>>(attribute_names::CORNER_NORMALS)?
                .values_mut()
                .for_each(turn_normal);
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn square_pair() -> Geometry {
        // Two quads sharing the edge 1-4
        let positions = [
            Vector3::new(0.0, 0.0, 0.0),
            Vector3::new(1.0, 0.0, 0.0),
            Vector3::new(2.0, 0.0, 0.0),
            Vector3::new(0.0, 1.0, 0.0),
            Vector3::new(1.0, 1.0, 0.0),
            Vector3::new(2.0, 1.0, 0.0),
        ];
        Geometry::from_polygons(&positions, &[[0_usize, 1, 4, 3], [1, 2, 5, 4]]).unwrap()
    }

    #[test]
    fn test_make_entities() {
        let mut geometry = Geometry::new();
        assert!(geometry.is_empty());

        let a = geometry.make_point();
        let b = geometry.make_point();
        let c = geometry.make_point();
        let polygon = geometry.make_polygon_from_points(&[a, b, c]);

        assert_eq!(geometry.point_count(), 3);
        assert_eq!(geometry.polygon_count(), 1);
        assert_eq!(geometry.corner_count(), 3);
        assert!(!geometry.is_empty());

        let corners = geometry.polygon_corners(polygon).to_vec();
        assert_eq!(geometry.corner_point(corners[1]), b);
        assert_eq!(geometry.corner_polygon(corners[1]), polygon);
        assert_eq!(geometry.corner_position(corners[2]), 2);
        assert_eq!(geometry.polygon_points(polygon).collect::<Vec<_>>(), vec![a, b, c]);
    }

    #[test]
    fn test_next_and_previous_corner_wrap() {
        let geometry = square_pair();
        let polygon = Polygon::from_index(0);
        let corners = geometry.polygon_corners(polygon).to_vec();

        assert_eq!(geometry.next_corner(corners[0]), corners[1]);
        assert_eq!(geometry.next_corner(corners[3]), corners[0]);
        assert_eq!(geometry.previous_corner(corners[0]), corners[3]);
        assert_eq!(geometry.previous_corner(corners[2]), corners[1]);
    }

    #[test]
    fn test_point_corners_and_valence() {
        let geometry = square_pair();
        assert_eq!(geometry.valence(Point::from_index(1)), 2);
        assert_eq!(geometry.valence(Point::from_index(0)), 1);

        for &corner in geometry.point_corners(Point::from_index(4)) {
            assert_eq!(geometry.corner_point(corner), Point::from_index(4));
        }
    }

    #[test]
    fn test_build_edges() {
        let geometry = square_pair();
        assert_eq!(geometry.edge_count(), 7);

        let shared = Edge::new(Point::from_index(4), Point::from_index(1));
        assert_eq!(
            geometry.edge_polygons(shared),
            &[Polygon::from_index(0), Polygon::from_index(1)]
        );
        assert_eq!(
            geometry.opposite_polygon(shared, Polygon::from_index(0)),
            Some(Polygon::from_index(1))
        );

        let boundary = Edge::new(Point::from_index(0), Point::from_index(1));
        assert_eq!(geometry.edge_polygons(boundary).len(), 1);
        assert_eq!(geometry.opposite_polygon(boundary, Polygon::from_index(0)), None);

        let missing = Edge::new(Point::from_index(0), Point::from_index(5));
        assert!(!geometry.contains_edge(missing));
        assert!(geometry.edge_polygons(missing).is_empty());
    }

    #[test]
    fn test_edges_stale_until_rebuilt() {
        let mut geometry = square_pair();
        assert!(!geometry.edges_stale());
        assert!(matches!(geometry.with_current_edges(), Cow::Borrowed(_)));

        let extra = geometry.make_point();
        assert!(!geometry.edges_stale());
        let polygon = geometry.make_polygon();
        geometry.make_corner(polygon, Point::from_index(0));
        geometry.make_corner(polygon, Point::from_index(1));
        geometry.make_corner(polygon, extra);
        assert!(geometry.edges_stale());

        let current = geometry.with_current_edges();
        assert!(matches!(current, Cow::Owned(_)));
        assert!(!current.edges_stale());
        assert_eq!(current.edge_count(), 9);
        let shared = Edge::new(Point::from_index(0), Point::from_index(1));
        assert_eq!(current.edge_polygons(shared).len(), 2);
        assert_eq!(geometry.edge_count(), 7);

        geometry.build_edges();
        assert!(!geometry.edges_stale());
        assert_eq!(geometry.edge_count(), 9);
    }

    #[test]
    fn test_build_edges_tolerates_non_manifold() {
        let mut geometry = Geometry::new();
        let points: Vec<Point> = (0..5).map(|_| geometry.make_point()).collect();
        // Three triangles on the edge 0-1
        geometry.make_polygon_from_points(&[points[0], points[1], points[2]]);
        geometry.make_polygon_from_points(&[points[1], points[0], points[3]]);
        geometry.make_polygon_from_points(&[points[0], points[1], points[4]]);
        geometry.build_edges();

        let fin = Edge::new(points[0], points[1]);
        assert_eq!(geometry.edge_polygons(fin).len(), 3);
        assert_eq!(
            geometry.opposite_polygon(fin, Polygon::from_index(0)),
            Some(Polygon::from_index(1))
        );
    }

    #[test]
    fn test_build_edges_skips_repeated_points() {
        let mut geometry = Geometry::new();
        let a = geometry.make_point();
        let b = geometry.make_point();
        let c = geometry.make_point();
        geometry.make_polygon_from_points(&[a, b, b, c]);
        geometry.build_edges();
        assert_eq!(geometry.edge_count(), 3);
    }

    #[test]
    fn test_polygon_edges() {
        let geometry = square_pair();
        let edges: Vec<Edge> = geometry.polygon_edges(Polygon::from_index(1)).collect();
        assert_eq!(edges.len(), 4);
        assert_eq!(edges[3], Edge::new(Point::from_index(4), Point::from_index(1)));
    }

    #[test]
    fn test_from_polygons_rejects_bad_input() {
        let positions = [Vector3::zeros(), Vector3::x(), Vector3::y()];

        let err = Geometry::from_polygons(&positions, &[vec![0_usize, 1]]).unwrap_err();
        assert_eq!(err, GeometryError::DegeneratePolygon { polygon: 0, corners: 2 });

        let err = Geometry::from_polygons(&positions, &[vec![0_usize, 1, 2], vec![0, 1, 3]]).unwrap_err();
        assert_eq!(
            err,
            GeometryError::InvalidPointIndex {
                polygon: 1,
                index: 3,
                point_count: 3
            }
        );
    }

    #[test]
    #[should_panic(expected = "does not belong")]
    fn test_make_corner_foreign_point_panics() {
        let mut geometry = Geometry::new();
        let polygon = geometry.make_polygon();
        geometry.make_corner(polygon, Point::from_index(0));
    }

    #[test]
    fn test_point_location() {
        let geometry = square_pair();
        assert_eq!(
            geometry.point_location(Point::from_index(5)),
            Some(Vector3::new(2.0, 1.0, 0.0))
        );
        assert_eq!(Geometry::new().point_location(Point::from_index(0)), None);
    }

    #[test]
    fn test_transform_moves_points_and_turns_normals() {
        let mut geometry = square_pair();
        geometry
            .polygon_attributes_mut()
            .find::<Vector3<f64>>(attribute_names::POLYGON_NORMALS)
            .unwrap()
            .insert(Polygon::from_index(0), Vector3::z());

        let scale = Matrix4::new_nonuniform_scaling(&Vector3::new(2.0, 1.0, -1.0));
        let translate = Matrix4::new_translation(&Vector3::new(0.0, 0.0, 5.0));
        geometry.transform(&(translate * scale)).unwrap();

        assert_relative_eq!(
            geometry.point_location(Point::from_index(5)).unwrap(),
            Vector3::new(4.0, 1.0, 5.0)
        );
        let normals = geometry
            .polygon_attributes()
            .get::<Vector3<f64>>(attribute_names::POLYGON_NORMALS)
            .unwrap();
        assert_relative_eq!(normals[&Polygon::from_index(0)], -Vector3::z());
    }
}

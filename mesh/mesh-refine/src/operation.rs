//! Shared bookkeeping for refinement operations.
//!
//! A [`GeometryOperation`] reads a source geometry and builds a fresh
//! destination. Every entity it creates records where it came from as a list
//! of weighted old entities. When topology is complete,
//! [`finish`](GeometryOperation::finish) interpolates every attribute map of
//! the source onto the destination through those lists.

use hashbrown::HashMap;
use mesh_geometry::{
    interpolate_attribute_maps, Corner, Edge, Geometry, Point, Polygon, Provenance,
};
use tracing::trace;

/// Builder for a refined copy of a source geometry.
///
/// Old handles always refer to the source, new handles to the destination.
/// Passing a handle from the wrong side is a bug in the calling operation and
/// panics.
///
/// # Example
///
/// ```
/// use mesh_geometry::shapes;
/// use mesh_refine::GeometryOperation;
///
/// let source = shapes::tetrahedron();
/// let mut op = GeometryOperation::new(&source);
/// for point in source.points() {
///     op.make_new_point_from_point(1.0, point);
/// }
/// for polygon in source.polygons() {
///     let new = op.make_new_polygon_from_polygon(polygon);
///     op.add_polygon_corners(new, polygon);
/// }
/// op.build_destination_edges_with_sourcing();
///
/// let copy = op.finish();
/// assert_eq!(copy.polygon_count(), 4);
/// assert_eq!(copy.edge_count(), 6);
/// ```
#[derive(Debug)]
pub struct GeometryOperation<'a> {
    source: &'a Geometry,
    destination: Geometry,
    new_points: HashMap<Point, Point>,
    new_polygons: HashMap<Polygon, Polygon>,
    new_corners: HashMap<Corner, Corner>,
    new_edges: HashMap<Edge, Edge>,
    centroid_points: HashMap<Polygon, Point>,
    point_sources: Provenance<Point>,
    point_corner_sources: HashMap<Point, Vec<(f64, Corner)>>,
    polygon_sources: Provenance<Polygon>,
    corner_sources: Provenance<Corner>,
    edge_sources: Provenance<Edge>,
}

impl<'a> GeometryOperation<'a> {
    /// Start an operation reading from `source`.
    #[must_use]
    pub fn new(source: &'a Geometry) -> Self {
        Self {
            source,
            destination: Geometry::with_capacity(source.point_count(), source.polygon_count()),
            new_points: HashMap::with_capacity(source.point_count()),
            new_polygons: HashMap::new(),
            new_corners: HashMap::new(),
            new_edges: HashMap::new(),
            centroid_points: HashMap::new(),
            point_sources: Provenance::new(),
            point_corner_sources: HashMap::new(),
            polygon_sources: Provenance::new(),
            corner_sources: Provenance::new(),
            edge_sources: Provenance::new(),
        }
    }

    /// The geometry being refined.
    #[must_use]
    pub const fn source(&self) -> &'a Geometry {
        self.source
    }

    /// The geometry being built.
    #[must_use]
    pub const fn destination(&self) -> &Geometry {
        &self.destination
    }

    /// New point created 1:1 for `old`, if any.
    #[must_use]
    pub fn new_point(&self, old: Point) -> Option<Point> {
        self.new_points.get(&old).copied()
    }

    /// Polygon first created 1:1 for `old` by
    /// [`make_new_polygon_from_polygon`](Self::make_new_polygon_from_polygon).
    #[must_use]
    pub fn new_polygon(&self, old: Polygon) -> Option<Polygon> {
        self.new_polygons.get(&old).copied()
    }

    /// Corner first created 1:1 for `old` by
    /// [`make_new_corner_from_corner`](Self::make_new_corner_from_corner).
    #[must_use]
    pub fn new_corner(&self, old: Corner) -> Option<Corner> {
        self.new_corners.get(&old).copied()
    }

    /// Edge joining the new points of `old`'s endpoints, once
    /// [`build_destination_edges_with_sourcing`](Self::build_destination_edges_with_sourcing)
    /// found it in the destination.
    #[must_use]
    pub fn new_edge(&self, old: Edge) -> Option<Edge> {
        self.new_edges.get(&old).copied()
    }

    /// New point created for the centroid of `old`, if any.
    #[must_use]
    pub fn centroid_point(&self, old: Polygon) -> Option<Point> {
        self.centroid_points.get(&old).copied()
    }

    // --- Points ---

    /// Create a point with no provenance yet.
    pub fn make_new_point(&mut self) -> Point {
        self.destination.make_point()
    }

    /// Create the point that corresponds 1:1 to `old`, sourced from it with
    /// `weight`.
    ///
    /// # Panics
    ///
    /// Panics if `old` is not a source point.
    pub fn make_new_point_from_point(&mut self, weight: f64, old: Point) -> Point {
        self.assert_source_point(old);
        let new = self.destination.make_point();
        self.new_points.insert(old, new);
        self.point_sources.add(new, weight, old);
        new
    }

    /// Create the centroid point of `old`, sourced equally from each of its
    /// corners and their points.
    pub fn make_new_point_from_polygon_centroid(&mut self, old: Polygon) -> Point {
        let new = self.destination.make_point();
        self.centroid_points.insert(old, new);
        self.add_polygon_centroid(new, 1.0, old);
        new
    }

    /// Add `(weight, old)` to the sources of `new`.
    ///
    /// # Panics
    ///
    /// Panics if `new` is not a destination point or `old` not a source point.
    pub fn add_point_source(&mut self, new: Point, weight: f64, old: Point) {
        self.assert_destination_point(new);
        self.assert_source_point(old);
        self.point_sources.add(new, weight, old);
    }

    /// Add `(weight, old)` to the corner sources of `new`. Corners later made
    /// on `new` through a centroid inherit these.
    ///
    /// # Panics
    ///
    /// Panics if `new` is not a destination point or `old` not a source corner.
    pub fn add_point_corner_source(&mut self, new: Point, weight: f64, old: Corner) {
        self.assert_destination_point(new);
        assert!(
            self.source.contains_corner(old),
            "{old:?} is not a corner of the source geometry"
        );
        self.point_corner_sources
            .entry(new)
            .or_default()
            .push((weight, old));
    }

    /// Source `new` from every corner of `old` and its point, `weight` each.
    pub fn add_polygon_centroid(&mut self, new: Point, weight: f64, old: Polygon) {
        self.assert_source_polygon(old);
        let source = self.source;
        for &corner in source.polygon_corners(old) {
            self.add_point_source(new, weight, source.corner_point(corner));
            self.add_point_corner_source(new, weight, corner);
        }
    }

    /// Source `new` from the 1-ring of `old`: for each corner of `old`, the
    /// point of the next corner in its polygon, `weight` each.
    pub fn add_point_ring(&mut self, new: Point, weight: f64, old: Point) {
        self.assert_source_point(old);
        let source = self.source;
        for &corner in source.point_corners(old) {
            let neighbor = source.corner_point(source.next_corner(corner));
            self.add_point_source(new, weight, neighbor);
        }
    }

    // --- Polygons ---

    /// Create a polygon sourced from `old` with full weight.
    pub fn make_new_polygon_from_polygon(&mut self, old: Polygon) -> Polygon {
        let new = self.make_new_polygon(1.0, old);
        self.new_polygons.entry(old).or_insert(new);
        new
    }

    /// Create a polygon sourced from `old` with `weight`.
    pub fn make_new_polygon(&mut self, weight: f64, old: Polygon) -> Polygon {
        self.assert_source_polygon(old);
        let new = self.destination.make_polygon();
        self.polygon_sources.add(new, weight, old);
        new
    }

    /// Add `(weight, old)` to the sources of `new`.
    ///
    /// # Panics
    ///
    /// Panics if `new` is not a destination polygon or `old` not a source polygon.
    pub fn add_polygon_source(&mut self, new: Polygon, weight: f64, old: Polygon) {
        assert!(
            self.destination.contains_polygon(new),
            "{new:?} is not a polygon of the destination geometry"
        );
        self.assert_source_polygon(old);
        self.polygon_sources.add(new, weight, old);
    }

    // --- Corners ---

    /// Append a corner on `new_polygon` at the new point of `old`'s point,
    /// sourced from `old` with full weight.
    ///
    /// # Panics
    ///
    /// Panics if the point of `old` has no new counterpart.
    pub fn make_new_corner_from_corner(&mut self, new_polygon: Polygon, old: Corner) -> Corner {
        let old_point = self.source.corner_point(old);
        let Some(point) = self.new_point(old_point) else {
            panic!("{old_point:?} has no new point");
        };
        let corner = self.destination.make_corner(new_polygon, point);
        self.corner_sources.add(corner, 1.0, old);
        self.new_corners.entry(old).or_insert(corner);
        corner
    }

    /// Append a corner on `new_polygon` at the centroid point of `old`.
    ///
    /// The corner inherits the corner sources recorded on the centroid point.
    ///
    /// # Panics
    ///
    /// Panics if `old` has no centroid point.
    pub fn make_new_corner_from_polygon_centroid(
        &mut self,
        new_polygon: Polygon,
        old: Polygon,
    ) -> Corner {
        let Some(point) = self.centroid_point(old) else {
            panic!("{old:?} has no centroid point");
        };
        let corner = self.destination.make_corner(new_polygon, point);
        self.distribute_corner_sources(corner, point);
        corner
    }

    /// Append a corner on `new_polygon` at `new_point` with explicit sources.
    pub fn make_new_corner(
        &mut self,
        new_polygon: Polygon,
        new_point: Point,
        sources: impl IntoIterator<Item = (f64, Corner)>,
    ) -> Corner {
        let corner = self.destination.make_corner(new_polygon, new_point);
        self.corner_sources.extend(corner, sources);
        corner
    }

    /// Copy every corner of `old` onto `new_polygon`, in order.
    pub fn add_polygon_corners(&mut self, new_polygon: Polygon, old: Polygon) {
        let source = self.source;
        for &corner in source.polygon_corners(old) {
            self.make_new_corner_from_corner(new_polygon, corner);
        }
    }

    fn distribute_corner_sources(&mut self, corner: Corner, point: Point) {
        if let Some(sources) = self.point_corner_sources.get(&point) {
            self.corner_sources.extend(corner, sources.iter().copied());
        }
    }

    // --- Edges ---

    /// Rebuild the destination edge table.
    pub fn build_destination_edges(&mut self) {
        self.destination.build_edges();
    }

    /// Rebuild the destination edge table and source every new edge whose
    /// endpoints are the new points of an old edge's endpoints from that old
    /// edge.
    pub fn build_destination_edges_with_sourcing(&mut self) {
        self.destination.build_edges();
        let source = self.source;
        for (old, _) in source.edges() {
            let (Some(a), Some(b)) = (self.new_point(old.a()), self.new_point(old.b())) else {
                continue;
            };
            let new = Edge::new(a, b);
            if self.destination.contains_edge(new) {
                self.edge_sources.add(new, 1.0, old);
                self.new_edges.insert(old, new);
            }
        }
    }

    /// Add `(weight, old)` to the sources of `new`.
    pub fn add_edge_source(&mut self, new: Edge, weight: f64, old: Edge) {
        self.edge_sources.add(new, weight, old);
    }

    // --- Completion ---

    /// Interpolate every source attribute map onto the destination and
    /// return it.
    ///
    /// Points, polygons, corners and edges are interpolated in that order.
    #[must_use]
    pub fn finish(mut self) -> Geometry {
        let source = self.source;
        let points = interpolate_attribute_maps(
            source.point_attributes(),
            self.destination.point_attributes_mut(),
            &self.point_sources,
        );
        let polygons = interpolate_attribute_maps(
            source.polygon_attributes(),
            self.destination.polygon_attributes_mut(),
            &self.polygon_sources,
        );
        let corners = interpolate_attribute_maps(
            source.corner_attributes(),
            self.destination.corner_attributes_mut(),
            &self.corner_sources,
        );
        let edges = interpolate_attribute_maps(
            source.edge_attributes(),
            self.destination.edge_attributes_mut(),
            &self.edge_sources,
        );
        trace!(
            "Interpolated {} point, {} polygon, {} corner and {} edge maps",
            points, polygons, corners, edges
        );
        self.destination
    }

    fn assert_source_point(&self, old: Point) {
        assert!(
            self.source.contains_point(old),
            "{old:?} is not a point of the source geometry"
        );
    }

    fn assert_destination_point(&self, new: Point) {
        assert!(
            self.destination.contains_point(new),
            "{new:?} is not a point of the destination geometry"
        );
    }

    fn assert_source_polygon(&self, old: Polygon) {
        assert!(
            self.source.contains_polygon(old),
            "{old:?} is not a polygon of the source geometry"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use mesh_geometry::{attribute_names, shapes, Vector3};

    #[test]
    fn test_centroid_point_averages_polygon() {
        let source = shapes::quad();
        let mut op = GeometryOperation::new(&source);
        let centroid = op.make_new_point_from_polygon_centroid(Polygon::from_index(0));
        assert_eq!(op.centroid_point(Polygon::from_index(0)), Some(centroid));

        let result = op.finish();
        assert_relative_eq!(
            result.point_location(centroid).unwrap(),
            Vector3::new(0.5, 0.5, 0.0)
        );
    }

    #[test]
    fn test_centroid_corner_inherits_corner_sources() {
        let mut source = shapes::quad();
        let values = source.corner_attributes_mut().find::<f64>("shade").unwrap();
        for (i, value) in [0.0, 1.0, 2.0, 3.0].into_iter().enumerate() {
            values.insert(Corner::from_index(i), value);
        }

        let old = Polygon::from_index(0);
        let mut op = GeometryOperation::new(&source);
        for point in source.points() {
            op.make_new_point_from_point(1.0, point);
        }
        op.make_new_point_from_polygon_centroid(old);
        let polygon = op.make_new_polygon_from_polygon(old);
        let centroid_corner = op.make_new_corner_from_polygon_centroid(polygon, old);
        let copied = op.make_new_corner_from_corner(polygon, Corner::from_index(2));
        op.make_new_corner_from_corner(polygon, Corner::from_index(3));

        let result = op.finish();
        let shade = result.corner_attributes().get::<f64>("shade").unwrap();
        assert_relative_eq!(shade[&centroid_corner], 1.5);
        assert_relative_eq!(shade[&copied], 2.0);
    }

    #[test]
    fn test_point_ring_visits_neighbors() {
        let source = shapes::tetrahedron();
        let mut op = GeometryOperation::new(&source);
        let new = op.make_new_point();
        op.add_point_ring(new, 1.0, Point::from_index(0));

        let result = op.finish();
        // Point 0 is (1, 1, 1); its three neighbors average to -(1, 1, 1) / 3.
        assert_relative_eq!(
            result.point_location(new).unwrap(),
            Vector3::new(-1.0, -1.0, -1.0) / 3.0,
            epsilon = 1e-12
        );
    }

    #[test]
    fn test_edges_sourced_through_point_correspondence() {
        let mut source = shapes::tetrahedron();
        let first = source.edges().next().unwrap().0;
        source
            .edge_attributes_mut()
            .find::<f64>("crease")
            .unwrap()
            .insert(first, 0.75);

        let mut op = GeometryOperation::new(&source);
        for point in source.points() {
            op.make_new_point_from_point(1.0, point);
        }
        for polygon in source.polygons() {
            let new = op.make_new_polygon_from_polygon(polygon);
            op.add_polygon_corners(new, polygon);
        }
        op.build_destination_edges_with_sourcing();
        let result = op.finish();

        assert_eq!(result.edge_count(), 6);
        let crease = result.edge_attributes().get::<f64>("crease").unwrap();
        assert_eq!(crease.len(), 1);
        assert_relative_eq!(crease[&first], 0.75);
    }

    #[test]
    fn test_old_to_new_correspondences() {
        let source = shapes::cube();
        let kept = Polygon::from_index(2);

        let mut op = GeometryOperation::new(&source);
        for point in source.points() {
            op.make_new_point_from_point(1.0, point);
        }
        let new = op.make_new_polygon_from_polygon(kept);
        op.add_polygon_corners(new, kept);
        op.build_destination_edges_with_sourcing();

        assert_eq!(op.new_polygon(kept), Some(Polygon::from_index(0)));
        assert_eq!(op.new_polygon(Polygon::from_index(0)), None);

        let old_corners = source.polygon_corners(kept);
        for (i, &old) in old_corners.iter().enumerate() {
            assert_eq!(op.new_corner(old), Some(Corner::from_index(i)));
        }
        assert_eq!(op.new_corner(source.polygon_corners(Polygon::from_index(0))[0]), None);

        let kept_edges: Vec<Edge> = source.polygon_edges(kept).collect();
        for (old, _) in source.edges() {
            match op.new_edge(old) {
                Some(new) => {
                    assert!(kept_edges.contains(&old));
                    assert!(op.destination().contains_edge(new));
                }
                None => assert!(!kept_edges.contains(&old)),
            }
        }
        assert_eq!(op.finish().edge_count(), 4);
    }

    #[test]
    fn test_finish_skips_corner_indices() {
        let mut source = shapes::quad();
        source
            .corner_attributes_mut()
            .find::<u32>(attribute_names::CORNER_INDICES)
            .unwrap()
            .insert(Corner::from_index(0), 3);

        let mut op = GeometryOperation::new(&source);
        for point in source.points() {
            op.make_new_point_from_point(1.0, point);
        }
        let polygon = op.make_new_polygon_from_polygon(Polygon::from_index(0));
        op.add_polygon_corners(polygon, Polygon::from_index(0));

        let result = op.finish();
        assert!(!result.corner_attributes().contains(attribute_names::CORNER_INDICES));
        assert!(result.point_attributes().contains(attribute_names::POINT_LOCATIONS));
    }

    #[test]
    #[should_panic(expected = "is not a point of the source geometry")]
    fn test_foreign_source_point_panics() {
        let source = shapes::quad();
        let mut op = GeometryOperation::new(&source);
        op.make_new_point_from_point(1.0, Point::from_index(42));
    }

    #[test]
    #[should_panic(expected = "has no new point")]
    fn test_corner_without_new_point_panics() {
        let source = shapes::quad();
        let mut op = GeometryOperation::new(&source);
        let polygon = op.make_new_polygon_from_polygon(Polygon::from_index(0));
        op.make_new_corner_from_corner(polygon, Corner::from_index(0));
    }

    #[test]
    #[should_panic(expected = "has no centroid point")]
    fn test_corner_without_centroid_panics() {
        let source = shapes::quad();
        let mut op = GeometryOperation::new(&source);
        let polygon = op.make_new_polygon_from_polygon(Polygon::from_index(0));
        op.make_new_corner_from_polygon_centroid(polygon, Polygon::from_index(0));
    }
}

//! Derived per-polygon and per-corner geometry: centroids and normals.

use hashbrown::HashMap;
use nalgebra::Vector3;

use crate::attribute::attribute_names;
use crate::error::GeometryResult;
use crate::geometry::Geometry;
use crate::handles::{Corner, Point, Polygon};

impl Geometry {
    /// Compute `polygon_centroids` as the mean of each polygon's corner
    /// positions.
    ///
    /// Polygons with a corner lacking a position get no centroid.
    ///
    /// # Errors
    ///
    /// Returns an error if `polygon_centroids` exists with another value type.
    pub fn compute_polygon_centroids(&mut self) -> GeometryResult<()> {
        let centroids = self.polygon_loop_map(|positions| {
            #[allow(clippy::cast_precision_loss)]
            let n = positions.len() as f64;
            Some(positions.iter().sum::<Vector3<f64>>() / n)
        });
        self.polygon_attributes_mut()
            .find::<Vector3<f64>>(attribute_names::POLYGON_CENTROIDS)?
            .extend(centroids);
        Ok(())
    }

    /// Compute unit `polygon_normals` with Newell's method.
    ///
    /// Degenerate polygons (zero area) get no normal.
    ///
    /// # Errors
    ///
    /// Returns an error if `polygon_normals` exists with another value type.
    pub fn compute_polygon_normals(&mut self) -> GeometryResult<()> {
        let normals =
            self.polygon_loop_map(|positions| newell_normal(positions).try_normalize(f64::EPSILON));
        self.polygon_attributes_mut()
            .find::<Vector3<f64>>(attribute_names::POLYGON_NORMALS)?
            .extend(normals);
        Ok(())
    }

    /// Compute unit `point_normals` as the area-weighted average of the
    /// normals of incident polygons.
    ///
    /// # Errors
    ///
    /// Returns an error if `point_normals` exists with another value type.
    pub fn compute_point_normals(&mut self) -> GeometryResult<()> {
        // Newell's vector has length twice the polygon area.
        let area_normals = self.polygon_loop_map(|positions| Some(newell_normal(positions)));

        let mut normals: HashMap<Point, Vector3<f64>> = HashMap::with_capacity(self.point_count());
        for point in self.points() {
            let mut sum = Vector3::zeros();
            let mut seen: Vec<Polygon> = Vec::new();
            for &corner in self.point_corners(point) {
                let polygon = self.corner_polygon(corner);
                if seen.contains(&polygon) {
                    continue;
                }
                seen.push(polygon);
                if let Some(normal) = area_normals.get(&polygon) {
                    sum += normal;
                }
            }
            if let Some(normal) = sum.try_normalize(f64::EPSILON) {
                normals.insert(point, normal);
            }
        }

        self.point_attributes_mut()
            .find::<Vector3<f64>>(attribute_names::POINT_NORMALS)?
            .extend(normals);
        Ok(())
    }

    /// Assign every corner a normal from the polygon normals around its
    /// point.
    ///
    /// A corner's normal is the normalized sum of its own polygon's normal
    /// and the normals of the other polygons sharing its point whose angle
    /// to its own polygon's normal is at most `max_angle` radians. With
    /// `0.0` every polygon stays flat; with `TAU` every point is fully
    /// smooth. Corners of polygons without a normal in `polygon_attr` are
    /// left out.
    ///
    /// # Errors
    ///
    /// Returns an error if either name holds a non-`Vector3` map.
    ///
    /// # Example
    ///
    /// ```
    /// use mesh_geometry::{attribute_names, shapes, Vector3};
    ///
    /// let mut cube = shapes::cube();
    /// cube.compute_polygon_normals()?;
    /// cube.smooth_normalize(
    ///     attribute_names::CORNER_NORMALS,
    ///     attribute_names::POLYGON_NORMALS,
    ///     std::f64::consts::TAU,
    /// )?;
    ///
    /// let normals = cube
    ///     .corner_attributes()
    ///     .get::<Vector3<f64>>(attribute_names::CORNER_NORMALS)
    ///     .unwrap();
    /// assert_eq!(normals.len(), 24);
    /// # Ok::<(), mesh_geometry::GeometryError>(())
    /// ```
    pub fn smooth_normalize(
        &mut self,
        corner_attr: &str,
        polygon_attr: &str,
        max_angle: f64,
    ) -> GeometryResult<()> {
        let Some(polygon_normals) = self.polygon_attributes().get::<Vector3<f64>>(polygon_attr) else {
            self.corner_attributes_mut().find::<Vector3<f64>>(corner_attr)?;
            return Ok(());
        };

        let mut corner_normals: HashMap<Corner, Vector3<f64>> = HashMap::with_capacity(self.corner_count());
        for corner in self.corners() {
            let polygon = self.corner_polygon(corner);
            let Some(own) = polygon_normals.get(&polygon) else {
                continue;
            };

            let mut sum = *own;
            let mut seen = vec![polygon];
            for &neighbor_corner in self.point_corners(self.corner_point(corner)) {
                let neighbor = self.corner_polygon(neighbor_corner);
                if seen.contains(&neighbor) {
                    continue;
                }
                seen.push(neighbor);
                if let Some(normal) = polygon_normals.get(&neighbor) {
                    if own.angle(normal) <= max_angle {
                        sum += normal;
                    }
                }
            }
            corner_normals.insert(corner, sum.try_normalize(f64::EPSILON).unwrap_or(*own));
        }

        self.corner_attributes_mut()
            .find::<Vector3<f64>>(corner_attr)?
            .extend(corner_normals);
        Ok(())
    }

    /// Evaluate `f` over the corner positions of every polygon that has a
    /// position for each of its corners.
    fn polygon_loop_map<F>(&self, mut f: F) -> HashMap<Polygon, Vector3<f64>>
    where
        F: FnMut(&[Vector3<f64>]) -> Option<Vector3<f64>>,
    {
        let mut result = HashMap::with_capacity(self.polygon_count());
        let Some(locations) = self
            .point_attributes()
            .get::<Vector3<f64>>(attribute_names::POINT_LOCATIONS)
        else {
            return result;
        };

        let mut positions = Vec::new();
        for polygon in self.polygons() {
            positions.clear();
            positions.extend(
                self.polygon_points(polygon)
                    .map_while(|point| locations.get(&point).copied()),
            );
            if positions.is_empty() || positions.len() != self.polygon_size(polygon) {
                continue;
            }
            if let Some(value) = f(&positions) {
                result.insert(polygon, value);
            }
        }
        result
    }
}

/// Newell's polygon normal: the sum of cross products of consecutive
/// positions. Its length is twice the polygon's area.
#[must_use]
pub fn newell_normal(positions: &[Vector3<f64>]) -> Vector3<f64> {
    let n = positions.len();
    (0..n).fold(Vector3::zeros(), |sum, i| {
        sum + positions[i].cross(&positions[(i + 1) % n])
    })
}

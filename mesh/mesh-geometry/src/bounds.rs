//! Bounding volumes of a geometry's point locations.

use nalgebra::{Point3, Vector3};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::attribute::attribute_names;
use crate::geometry::Geometry;

/// An axis-aligned bounding box.
///
/// # Example
///
/// ```
/// use mesh_geometry::{Aabb, Point3};
///
/// let mut aabb = Aabb::empty();
/// assert!(aabb.is_empty());
///
/// aabb.expand_to_include(&Point3::new(1.0, 2.0, 3.0));
/// aabb.expand_to_include(&Point3::new(-1.0, 0.0, 3.0));
/// assert_eq!(aabb.center(), Point3::new(0.0, 1.0, 3.0));
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Aabb {
    /// Minimum corner.
    pub min: Point3<f64>,
    /// Maximum corner.
    pub max: Point3<f64>,
}

impl Aabb {
    /// Create a box from two corners, swapping coordinates where needed.
    #[must_use]
    pub fn new(a: Point3<f64>, b: Point3<f64>) -> Self {
        Self {
            min: a.inf(&b),
            max: a.sup(&b),
        }
    }

    /// The empty box (min > max), the identity for [`expand_to_include`](Self::expand_to_include).
    #[must_use]
    pub fn empty() -> Self {
        Self {
            min: Point3::new(f64::INFINITY, f64::INFINITY, f64::INFINITY),
            max: Point3::new(f64::NEG_INFINITY, f64::NEG_INFINITY, f64::NEG_INFINITY),
        }
    }

    /// Smallest box containing every point of `points`.
    #[must_use]
    pub fn from_points<'a>(points: impl IntoIterator<Item = &'a Point3<f64>>) -> Self {
        let mut aabb = Self::empty();
        for point in points {
            aabb.expand_to_include(point);
        }
        aabb
    }

    /// Whether the box contains nothing.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.min.x > self.max.x || self.min.y > self.max.y || self.min.z > self.max.z
    }

    /// Width, height and depth.
    #[inline]
    #[must_use]
    pub fn size(&self) -> Vector3<f64> {
        self.max - self.min
    }

    /// Center point.
    #[inline]
    #[must_use]
    pub fn center(&self) -> Point3<f64> {
        nalgebra::center(&self.min, &self.max)
    }

    /// Length of the diagonal.
    #[inline]
    #[must_use]
    pub fn diagonal(&self) -> f64 {
        self.size().norm()
    }

    /// Whether `point` lies inside or on the boundary.
    #[must_use]
    pub fn contains(&self, point: &Point3<f64>) -> bool {
        (0..3).all(|i| point[i] >= self.min[i] && point[i] <= self.max[i])
    }

    /// Grow the box to include `point`.
    pub fn expand_to_include(&mut self, point: &Point3<f64>) {
        self.min = self.min.inf(point);
        self.max = self.max.sup(point);
    }

    /// Grow the box to include `other`.
    pub fn expand_to_include_aabb(&mut self, other: &Self) {
        if other.is_empty() {
            return;
        }
        self.expand_to_include(&other.min);
        self.expand_to_include(&other.max);
    }
}

impl Default for Aabb {
    fn default() -> Self {
        Self::empty()
    }
}

/// A bounding sphere.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct BoundingSphere {
    /// Sphere center.
    pub center: Point3<f64>,
    /// Sphere radius.
    pub radius: f64,
}

impl BoundingSphere {
    /// Whether `point` lies inside or on the sphere, within `tolerance`.
    #[must_use]
    pub fn contains(&self, point: &Point3<f64>, tolerance: f64) -> bool {
        nalgebra::distance(&self.center, point) <= self.radius + tolerance
    }
}

impl Geometry {
    /// Bounding box of every point with a location.
    ///
    /// Empty if the geometry has no `point_locations`.
    #[must_use]
    pub fn bounding_box(&self) -> Aabb {
        let mut aabb = Aabb::empty();
        if let Some(locations) = self
            .point_attributes()
            .get::<Vector3<f64>>(attribute_names::POINT_LOCATIONS)
        {
            for location in locations.values() {
                aabb.expand_to_include(&Point3::from(*location));
            }
        }
        aabb
    }

    /// Sphere centered on the bounding box that contains every located point.
    ///
    /// Returns `None` if no point has a location.
    #[must_use]
    pub fn bounding_sphere(&self) -> Option<BoundingSphere> {
        let aabb = self.bounding_box();
        if aabb.is_empty() {
            return None;
        }
        let center = aabb.center();
        let locations = self
            .point_attributes()
            .get::<Vector3<f64>>(attribute_names::POINT_LOCATIONS)?;
        let radius = locations
            .values()
            .map(|location| (location - center.coords).norm())
            .fold(0.0, f64::max);
        Some(BoundingSphere { center, radius })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shapes;
    use approx::assert_relative_eq;

    #[test]
    fn aabb_new_orders_corners() {
        let aabb = Aabb::new(Point3::new(1.0, -1.0, 4.0), Point3::new(0.0, 2.0, 3.0));
        assert_eq!(aabb.min, Point3::new(0.0, -1.0, 3.0));
        assert_eq!(aabb.max, Point3::new(1.0, 2.0, 4.0));
    }

    #[test]
    fn aabb_from_points_and_contains() {
        let points = [
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(10.0, 5.0, 3.0),
            Point3::new(-2.0, 8.0, 1.0),
        ];
        let aabb = Aabb::from_points(&points);
        assert_eq!(aabb.min, Point3::new(-2.0, 0.0, 0.0));
        assert_eq!(aabb.max, Point3::new(10.0, 8.0, 3.0));
        assert!(aabb.contains(&Point3::new(0.0, 0.0, 0.0)));
        assert!(!aabb.contains(&Point3::new(0.0, -0.1, 0.0)));
    }

    #[test]
    fn aabb_expand_by_aabb() {
        let mut a = Aabb::new(Point3::origin(), Point3::new(1.0, 1.0, 1.0));
        a.expand_to_include_aabb(&Aabb::empty());
        assert_eq!(a.max, Point3::new(1.0, 1.0, 1.0));

        a.expand_to_include_aabb(&Aabb::new(Point3::new(2.0, 0.0, 0.0), Point3::new(3.0, 0.5, 0.5)));
        assert_eq!(a.max, Point3::new(3.0, 1.0, 1.0));
        assert_relative_eq!(a.size(), Vector3::new(3.0, 1.0, 1.0));
    }

    #[test]
    fn geometry_bounds_of_cube() {
        let cube = shapes::cube();
        let aabb = cube.bounding_box();
        assert_eq!(aabb.min, Point3::new(-0.5, -0.5, -0.5));
        assert_eq!(aabb.max, Point3::new(0.5, 0.5, 0.5));
        assert_relative_eq!(aabb.diagonal(), 3.0_f64.sqrt());

        let sphere = cube.bounding_sphere().unwrap();
        assert_relative_eq!(sphere.center, Point3::origin());
        assert_relative_eq!(sphere.radius, 0.75_f64.sqrt());
        for point in cube.points() {
            let location = Point3::from(cube.point_location(point).unwrap());
            assert!(sphere.contains(&location, 1e-12));
        }
    }

    #[test]
    fn geometry_bounds_without_locations() {
        let geometry = Geometry::new();
        assert!(geometry.bounding_box().is_empty());
        assert!(geometry.bounding_sphere().is_none());
    }
}

//! Named, typed attribute maps.
//!
//! Every per-entity datum (positions, normals, texture coordinates, ...) is
//! stored in a map from entity handle to value, registered by name in an
//! [`AttributeMapCollection`]. The value type of a map is one of a closed set
//! of variants ([`AttributeKind`]); Rust types are bound to their variant at
//! compile time through [`AttributeValue`].

use std::collections::BTreeMap;
use std::fmt::Debug;

use hashbrown::HashMap;
use nalgebra::{Matrix4, Vector2, Vector3, Vector4};

use crate::error::{GeometryError, GeometryResult};
use crate::handles::Element;

/// Well-known attribute map names.
pub mod attribute_names {
    /// Point positions (`Vector3<f64>`).
    pub const POINT_LOCATIONS: &str = "point_locations";
    /// Point normals (`Vector3<f64>`).
    pub const POINT_NORMALS: &str = "point_normals";
    /// Point texture coordinates (`Vector2<f64>`).
    pub const POINT_TEXCOORDS: &str = "point_texcoords";
    /// Polygon normals (`Vector3<f64>`).
    pub const POLYGON_NORMALS: &str = "polygon_normals";
    /// Polygon centroids (`Vector3<f64>`).
    pub const POLYGON_CENTROIDS: &str = "polygon_centroids";
    /// Corner normals (`Vector3<f64>`).
    pub const CORNER_NORMALS: &str = "corner_normals";
    /// Corner texture coordinates (`Vector2<f64>`).
    pub const CORNER_TEXCOORDS: &str = "corner_texcoords";
    /// Vertex buffer indices assigned by renderers (`u32`). Never interpolated.
    pub const CORNER_INDICES: &str = "corner_indices";
}

/// Value type stored by an attribute map.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum AttributeKind {
    /// `f64`
    Scalar,
    /// `Vector2<f64>`
    Vector2,
    /// `Vector3<f64>`
    Vector3,
    /// `Vector4<f64>`
    Vector4,
    /// `Matrix4<f64>`
    Matrix4,
    /// `u32`
    Index,
}

impl AttributeKind {
    /// Whether values of this kind can be blended by weighted sums.
    #[must_use]
    pub const fn is_interpolable(self) -> bool {
        !matches!(self, Self::Index)
    }
}

/// A single attribute map: entity handle to value, for one value type.
#[derive(Debug, Clone, PartialEq)]
pub enum AttributeMap<K: Element> {
    /// Scalar values.
    Scalar(HashMap<K, f64>),
    /// Two-component vectors.
    Vector2(HashMap<K, Vector2<f64>>),
    /// Three-component vectors.
    Vector3(HashMap<K, Vector3<f64>>),
    /// Four-component vectors.
    Vector4(HashMap<K, Vector4<f64>>),
    /// 4x4 matrices.
    Matrix4(HashMap<K, Matrix4<f64>>),
    /// Integer indices.
    Index(HashMap<K, u32>),
}

impl<K: Element> AttributeMap<K> {
    /// Create an empty map of the given kind.
    #[must_use]
    pub fn empty(kind: AttributeKind) -> Self {
        match kind {
            AttributeKind::Scalar => Self::Scalar(HashMap::new()),
            AttributeKind::Vector2 => Self::Vector2(HashMap::new()),
            AttributeKind::Vector3 => Self::Vector3(HashMap::new()),
            AttributeKind::Vector4 => Self::Vector4(HashMap::new()),
            AttributeKind::Matrix4 => Self::Matrix4(HashMap::new()),
            AttributeKind::Index => Self::Index(HashMap::new()),
        }
    }

    /// The value type of this map.
    #[must_use]
    pub const fn kind(&self) -> AttributeKind {
        match self {
            Self::Scalar(_) => AttributeKind::Scalar,
            Self::Vector2(_) => AttributeKind::Vector2,
            Self::Vector3(_) => AttributeKind::Vector3,
            Self::Vector4(_) => AttributeKind::Vector4,
            Self::Matrix4(_) => AttributeKind::Matrix4,
            Self::Index(_) => AttributeKind::Index,
        }
    }

    /// Number of entities with a value.
    #[must_use]
    pub fn len(&self) -> usize {
        match self {
            Self::Scalar(m) => m.len(),
            Self::Vector2(m) => m.len(),
            Self::Vector3(m) => m.len(),
            Self::Vector4(m) => m.len(),
            Self::Matrix4(m) => m.len(),
            Self::Index(m) => m.len(),
        }
    }

    /// Whether no entity has a value.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Whether `key` has a value in this map.
    #[must_use]
    pub fn contains_key(&self, key: &K) -> bool {
        match self {
            Self::Scalar(m) => m.contains_key(key),
            Self::Vector2(m) => m.contains_key(key),
            Self::Vector3(m) => m.contains_key(key),
            Self::Vector4(m) => m.contains_key(key),
            Self::Matrix4(m) => m.contains_key(key),
            Self::Index(m) => m.contains_key(key),
        }
    }
}

/// Binds a Rust value type to its [`AttributeMap`] variant.
pub trait AttributeValue: Clone + Debug + PartialEq + Send + Sync + 'static {
    /// The variant that stores this type.
    const KIND: AttributeKind;

    /// Borrow the typed storage if `map` holds this type.
    fn values<K: Element>(map: &AttributeMap<K>) -> Option<&HashMap<K, Self>>;

    /// Mutably borrow the typed storage if `map` holds this type.
    fn values_mut<K: Element>(map: &mut AttributeMap<K>) -> Option<&mut HashMap<K, Self>>;

    /// Wrap typed storage into its variant.
    fn wrap<K: Element>(values: HashMap<K, Self>) -> AttributeMap<K>;
}

/// Values that can be blended as weighted sums.
pub trait Interpolable: AttributeValue {
    /// The additive identity.
    fn zero() -> Self;

    /// `self += weight * other`
    fn accumulate(&mut self, weight: f64, other: &Self);
}

macro_rules! attribute_value {
    ($ty:ty, $variant:ident) => {
        impl AttributeValue for $ty {
            const KIND: AttributeKind = AttributeKind::$variant;

            fn values<K: Element>(map: &AttributeMap<K>) -> Option<&HashMap<K, Self>> {
                match map {
                    AttributeMap::$variant(values) => Some(values),
                    _ => None,
                }
            }

            fn values_mut<K: Element>(map: &mut AttributeMap<K>) -> Option<&mut HashMap<K, Self>> {
                match map {
                    AttributeMap::$variant(values) => Some(values),
                    _ => None,
                }
            }

            fn wrap<K: Element>(values: HashMap<K, Self>) -> AttributeMap<K> {
                AttributeMap::$variant(values)
            }
        }
    };
}

attribute_value!(f64, Scalar);
attribute_value!(Vector2<f64>, Vector2);
attribute_value!(Vector3<f64>, Vector3);
attribute_value!(Vector4<f64>, Vector4);
attribute_value!(Matrix4<f64>, Matrix4);
attribute_value!(u32, Index);

impl Interpolable for f64 {
    #[inline]
    fn zero() -> Self {
        0.0
    }

    #[inline]
    fn accumulate(&mut self, weight: f64, other: &Self) {
        *self += weight * other;
    }
}

macro_rules! linear_interpolable {
    ($($ty:ty),*) => {
        $(
            impl Interpolable for $ty {
                #[inline]
                fn zero() -> Self {
                    Self::zeros()
                }

                #[inline]
                fn accumulate(&mut self, weight: f64, other: &Self) {
                    *self += other * weight;
                }
            }
        )*
    };
}

linear_interpolable!(Vector2<f64>, Vector3<f64>, Vector4<f64>, Matrix4<f64>);

/// Registry of named attribute maps for one entity kind.
///
/// Maps are kept in name order so iteration is deterministic.
///
/// # Example
///
/// ```
/// use mesh_geometry::{AttributeMapCollection, Point, Vector3};
///
/// let mut points = AttributeMapCollection::<Point>::new();
/// let locations = points.find::<Vector3<f64>>("point_locations")?;
/// locations.insert(Point::from_index(0), Vector3::new(1.0, 2.0, 3.0));
///
/// assert!(points.contains("point_locations"));
/// assert!(points.find::<f64>("point_locations").is_err());
/// # Ok::<(), mesh_geometry::GeometryError>(())
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct AttributeMapCollection<K: Element> {
    maps: BTreeMap<String, AttributeMap<K>>,
}

impl<K: Element> Default for AttributeMapCollection<K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: Element> AttributeMapCollection<K> {
    /// Create an empty collection.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            maps: BTreeMap::new(),
        }
    }

    /// Find the map named `name` holding values of type `T`, creating it
    /// empty if no map has that name yet.
    ///
    /// A key missing from the returned map means "no authored value".
    ///
    /// # Errors
    ///
    /// Returns [`GeometryError::AttributeTypeMismatch`] if a map with this
    /// name already exists with a different value type.
    pub fn find<T: AttributeValue>(&mut self, name: &str) -> GeometryResult<&mut HashMap<K, T>> {
        let map = self
            .maps
            .entry(name.to_string())
            .or_insert_with(|| T::wrap(HashMap::new()));
        let found = map.kind();
        T::values_mut(map).ok_or_else(|| GeometryError::AttributeTypeMismatch {
            name: name.to_string(),
            expected: T::KIND,
            found,
        })
    }

    /// Look up the map named `name` if it exists and holds values of type `T`.
    #[must_use]
    pub fn get<T: AttributeValue>(&self, name: &str) -> Option<&HashMap<K, T>> {
        self.maps.get(name).and_then(T::values)
    }

    /// Look up the untyped map named `name`.
    #[must_use]
    pub fn get_map(&self, name: &str) -> Option<&AttributeMap<K>> {
        self.maps.get(name)
    }

    /// Register `map` under `name`, returning the map it replaced.
    pub fn insert_map(&mut self, name: impl Into<String>, map: AttributeMap<K>) -> Option<AttributeMap<K>> {
        self.maps.insert(name.into(), map)
    }

    /// Remove the map named `name`.
    pub fn remove(&mut self, name: &str) -> Option<AttributeMap<K>> {
        self.maps.remove(name)
    }

    /// Whether a map named `name` exists.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.maps.contains_key(name)
    }

    /// Names of all registered maps, in order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.maps.keys().map(String::as_str)
    }

    /// Iterate over `(name, map)` pairs, in name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &AttributeMap<K>)> {
        self.maps.iter().map(|(name, map)| (name.as_str(), map))
    }

    /// Number of registered maps.
    #[must_use]
    pub fn len(&self) -> usize {
        self.maps.len()
    }

    /// Whether no maps are registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.maps.is_empty()
    }

    /// Remove every map.
    pub fn clear(&mut self) {
        self.maps.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::handles::{Corner, Point};

    #[test]
    fn test_find_creates_empty_map() {
        let mut points = AttributeMapCollection::<Point>::new();
        assert!(points.is_empty());

        let map = points.find::<f64>("weight").unwrap();
        assert!(map.is_empty());
        assert_eq!(points.len(), 1);
        assert_eq!(
            points.get_map("weight").map(AttributeMap::kind),
            Some(AttributeKind::Scalar)
        );
    }

    #[test]
    fn test_find_returns_existing_values() {
        let mut points = AttributeMapCollection::<Point>::new();
        let p = Point::from_index(3);
        points
            .find::<Vector3<f64>>(attribute_names::POINT_LOCATIONS)
            .unwrap()
            .insert(p, Vector3::new(1.0, 2.0, 3.0));

        let again = points
            .find::<Vector3<f64>>(attribute_names::POINT_LOCATIONS)
            .unwrap();
        assert_eq!(again.get(&p), Some(&Vector3::new(1.0, 2.0, 3.0)));
    }

    #[test]
    fn test_find_type_mismatch() {
        let mut corners = AttributeMapCollection::<Corner>::new();
        corners.find::<u32>(attribute_names::CORNER_INDICES).unwrap();

        let err = corners
            .find::<Vector2<f64>>(attribute_names::CORNER_INDICES)
            .unwrap_err();
        assert_eq!(
            err,
            GeometryError::AttributeTypeMismatch {
                name: attribute_names::CORNER_INDICES.to_string(),
                expected: AttributeKind::Vector2,
                found: AttributeKind::Index,
            }
        );
    }

    #[test]
    fn test_get_does_not_create() {
        let points = AttributeMapCollection::<Point>::new();
        assert!(points.get::<f64>("missing").is_none());
        assert!(!points.contains("missing"));
    }

    #[test]
    fn test_names_are_sorted() {
        let mut points = AttributeMapCollection::<Point>::new();
        points.find::<f64>("zeta").unwrap();
        points.find::<f64>("alpha").unwrap();
        points.find::<Matrix4<f64>>("mid").unwrap();

        let names: Vec<_> = points.names().collect();
        assert_eq!(names, vec!["alpha", "mid", "zeta"]);

        assert!(points.remove("mid").is_some());
        assert_eq!(points.len(), 2);
        points.clear();
        assert!(points.is_empty());
    }

    #[test]
    fn test_interpolable_accumulate() {
        let mut v = Vector3::<f64>::zero();
        v.accumulate(0.5, &Vector3::new(2.0, 4.0, 6.0));
        v.accumulate(0.25, &Vector3::new(4.0, 0.0, 0.0));
        assert_eq!(v, Vector3::new(2.0, 2.0, 3.0));

        let mut s = f64::zero();
        s.accumulate(2.0, &1.5);
        assert!((s - 3.0).abs() < f64::EPSILON);

        let mut m = Matrix4::<f64>::zero();
        m.accumulate(0.5, &Matrix4::identity());
        assert!((m[(2, 2)] - 0.5).abs() < f64::EPSILON);
    }

    #[test]
    fn test_kind_interpolable() {
        assert!(AttributeKind::Vector3.is_interpolable());
        assert!(AttributeKind::Scalar.is_interpolable());
        assert!(!AttributeKind::Index.is_interpolable());
    }
}

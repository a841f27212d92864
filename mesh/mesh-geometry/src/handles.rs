//! Entity handles.
//!
//! Points, polygons and corners are small arena indices into the
//! [`Geometry`](crate::Geometry) that allocated them. A handle carries no
//! data of its own; everything else about an entity lives in the container's
//! topology tables or in an attribute map keyed by the handle.

use std::fmt::Debug;
use std::hash::Hash;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Common bound for anything that can key an attribute map or a provenance
/// table.
pub trait Element: Copy + Eq + Hash + Debug + Send + Sync + 'static {}

macro_rules! arena_handle {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
        #[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
        pub struct $name(u32);

        impl $name {
            /// Create a handle from a raw arena index.
            ///
            /// # Panics
            ///
            /// Panics if `index` does not fit in a `u32`.
            #[inline]
            #[must_use]
            pub fn from_index(index: usize) -> Self {
                match u32::try_from(index) {
                    Ok(raw) => Self(raw),
                    Err(_) => panic!(
                        concat!(stringify!($name), " index {} exceeds u32 range"),
                        index
                    ),
                }
            }

            /// Raw arena index of this handle.
            #[inline]
            #[must_use]
            pub const fn index(self) -> usize {
                self.0 as usize
            }
        }

        impl Element for $name {}
    };
}

arena_handle! {
    /// A vertex identity. Positions and other per-point data live in the
    /// point attribute maps.
    Point
}

arena_handle! {
    /// An ordered cycle of corners.
    Polygon
}

arena_handle! {
    /// One use of a point by one polygon at one position of its winding.
    Corner
}

/// An unordered pair of points.
///
/// The endpoints are normalized at construction, so `Edge::new(a, b)` and
/// `Edge::new(b, a)` compare and hash equal.
///
/// # Example
///
/// ```
/// use mesh_geometry::{Edge, Point};
///
/// let a = Point::from_index(3);
/// let b = Point::from_index(7);
/// assert_eq!(Edge::new(a, b), Edge::new(b, a));
/// assert_eq!(Edge::new(b, a).a(), a);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Edge {
    a: Point,
    b: Point,
}

impl Edge {
    /// Create the edge between two points.
    #[inline]
    #[must_use]
    pub fn new(p: Point, q: Point) -> Self {
        if p <= q {
            Self { a: p, b: q }
        } else {
            Self { a: q, b: p }
        }
    }

    /// The endpoint with the smaller index.
    #[inline]
    #[must_use]
    pub const fn a(self) -> Point {
        self.a
    }

    /// The endpoint with the larger index.
    #[inline]
    #[must_use]
    pub const fn b(self) -> Point {
        self.b
    }

    /// Both endpoints, smaller index first.
    #[inline]
    #[must_use]
    pub const fn points(self) -> [Point; 2] {
        [self.a, self.b]
    }

    /// Whether `point` is one of the endpoints.
    #[inline]
    #[must_use]
    pub fn contains(self, point: Point) -> bool {
        self.a == point || self.b == point
    }

    /// The endpoint opposite to `point`, or `None` if `point` is not on this edge.
    #[must_use]
    pub fn other(self, point: Point) -> Option<Point> {
        if point == self.a {
            Some(self.b)
        } else if point == self.b {
            Some(self.a)
        } else {
            None
        }
    }
}

impl Element for Edge {}

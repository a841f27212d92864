//! Error types for geometry construction and attribute access.

use thiserror::Error;

use crate::attribute::AttributeKind;

/// Errors that can occur while building or querying a [`Geometry`](crate::Geometry).
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum GeometryError {
    /// An attribute map exists under this name but stores another value type.
    #[error("Attribute map '{name}' stores {found:?} values, not {expected:?}")]
    AttributeTypeMismatch {
        /// Name of the attribute map.
        name: String,
        /// Value type the caller asked for.
        expected: AttributeKind,
        /// Value type the map actually stores.
        found: AttributeKind,
    },

    /// A polygon loop references a point index that does not exist.
    #[error("Polygon {polygon} references point {index}, but only {point_count} points exist")]
    InvalidPointIndex {
        /// Index of the offending polygon loop.
        polygon: usize,
        /// The out-of-range point index.
        index: usize,
        /// Number of points available.
        point_count: usize,
    },

    /// A polygon loop has fewer than three corners.
    #[error("Polygon {polygon} has {corners} corners (must be >= 3)")]
    DegeneratePolygon {
        /// Index of the offending polygon loop.
        polygon: usize,
        /// Number of corners in the loop.
        corners: usize,
    },
}

/// Result type for geometry operations.
pub type GeometryResult<T> = std::result::Result<T, GeometryError>;

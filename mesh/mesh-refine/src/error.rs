//! Error types for refinement operations.

use mesh_geometry::GeometryError;
use thiserror::Error;

/// Errors that can occur during refinement.
#[derive(Debug, Error)]
pub enum RefineError {
    /// Geometry has no points.
    #[error("Geometry has no points")]
    EmptyGeometry,

    /// Geometry has no polygons.
    #[error("Geometry has no polygons")]
    NoPolygons,

    /// Invalid iteration count.
    #[error("Invalid iteration count: {0} (must be >= 1)")]
    InvalidIterations(u32),

    /// Refinement would exceed the polygon budget.
    #[error("Refinement would exceed maximum geometry size ({current} -> {projected} polygons, max {max})")]
    TooLarge {
        /// Current polygon count.
        current: usize,
        /// Projected polygon count after refinement.
        projected: usize,
        /// Maximum allowed polygon count.
        max: usize,
    },

    /// A polygon selection referenced a polygon that does not exist.
    #[error("Selected polygon {index} out of range ({polygon_count} polygons)")]
    InvalidSelection {
        /// Offending selection index.
        index: usize,
        /// Number of polygons in the source geometry.
        polygon_count: usize,
    },

    /// Error raised by the geometry container.
    #[error(transparent)]
    Geometry(#[from] GeometryError),
}

/// Result type for refinement operations.
pub type RefineResult<T> = std::result::Result<T, RefineError>;

//! Polygon mesh kernel with attribute-preserving refinement.
//!
//! This umbrella crate re-exports the kernel crates behind one API. Both are
//! Layer 0 (no engine or GPU dependencies) and perform no I/O.
//!
//! # Quick Start
//!
//! ```
//! use mesh_kernel::prelude::*;
//!
//! // A closed cube with smooth corner normals
//! let mut cube = shapes::cube();
//! cube.compute_polygon_normals()?;
//! cube.smooth_normalize(
//!     attribute_names::CORNER_NORMALS,
//!     attribute_names::POLYGON_NORMALS,
//!     std::f64::consts::FRAC_PI_4,
//! )?;
//!
//! // Two rounds of Catmull-Clark; normals follow the new corners
//! let params = RefineParams::catmull_clark().with_iterations(2);
//! let result = refine_geometry(&cube, &params)?;
//!
//! assert_eq!(result.final_polygons, 96);
//! let normals = result
//!     .geometry
//!     .corner_attributes()
//!     .get::<Vector3<f64>>(attribute_names::CORNER_NORMALS)
//!     .unwrap();
//! assert_eq!(normals.len(), 96 * 4);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! # Module Organization
//!
//! - [`geometry`] - Entity model, attribute maps, interpolation, shapes
//! - [`refine`] - Refinement operations and the refinement driver
//!
//! # Feature Flags
//!
//! - `serde` - Serialize handles, attribute kinds and refinement parameters

// Safety: Deny unwrap/expect in library code. Tests may use them (workspace warns).
#![cfg_attr(not(test), deny(clippy::unwrap_used, clippy::expect_used))]

// =============================================================================
// Re-exports
// =============================================================================

/// Points, polygons, corners, edges and their attribute maps.
pub use mesh_geometry as geometry;

/// Subdivision, triangulation, truncation and the operation framework.
pub use mesh_refine as refine;

// =============================================================================
// Prelude
// =============================================================================

/// Common imports for mesh refinement.
///
/// # Usage
///
/// ```
/// use mesh_kernel::prelude::*;
/// ```
pub mod prelude {
    // Entity model
    pub use mesh_geometry::{
        attribute_names, shapes, Corner, Edge, Geometry, GeometryError, Point, Polygon,
    };

    // Math
    pub use mesh_geometry::{Matrix4, Vector2, Vector3, Vector4};

    // Refinement
    pub use mesh_refine::{
        refine_batch, refine_geometry, GeometryOperation, RefineError, RefineMethod,
        RefineParams, RefinementResult,
    };
}

//! Attribute-preserving polygon mesh refinement.
//!
//! Every operation reads one [`Geometry`](mesh_geometry::Geometry) and builds a
//! new one, recording where each new point, polygon, corner and edge came
//! from. When the operation finishes, every attribute map of the source is
//! carried over by weighted interpolation:
//!
//! - **Clone**: Plain copy, optionally of a polygon subset
//! - **Subdivide**: Each n-gon becomes n quads around its centroid
//! - **Catmull-Clark**: The same split with smoothing weights
//! - **sqrt(3)**: One triangle per shared half-edge, points relaxed
//! - **Triangulate**: Centroid fan for polygons with more than three corners
//! - **Truncate**: Cut every vertex off, optionally capping the holes
//!
//! New operations are built on [`GeometryOperation`].
//!
//! # Examples
//!
//! Catmull-Clark on a cube:
//!
//! ```
//! use mesh_geometry::shapes;
//! use mesh_refine::{refine_geometry, RefineParams};
//!
//! let cube = shapes::cube();
//! let result = refine_geometry(&cube, &RefineParams::catmull_clark())?;
//!
//! // Each quad becomes 4 quads
//! assert_eq!(result.final_polygons, 24);
//! assert_eq!(result.final_points, 26);
//! # Ok::<(), mesh_refine::RefineError>(())
//! ```
//!
//! Attributes follow the refinement:
//!
//! ```
//! use mesh_geometry::{shapes, Polygon};
//! use mesh_refine::subdivide;
//!
//! let mut cube = shapes::cube();
//! let material = cube.polygon_attributes_mut().find::<f64>("material")?;
//! material.insert(Polygon::from_index(0), 7.0);
//!
//! let refined = subdivide(&cube);
//! let material = refined.polygon_attributes().get::<f64>("material").unwrap();
//!
//! // The four quads cut from polygon 0 inherit its value
//! assert_eq!(material.len(), 4);
//! assert!(material.values().all(|&m| m == 7.0));
//! # Ok::<(), mesh_geometry::GeometryError>(())
//! ```
//!
//! # Feature Flags
//!
//! - `serde` - Serialize and deserialize [`RefineParams`] and [`RefineMethod`]

// Safety: Deny unwrap/expect in library code. Tests may use them (workspace warns).
#![cfg_attr(not(test), deny(clippy::unwrap_used, clippy::expect_used))]
#![warn(missing_docs)]

mod batch;
mod clone;
mod error;
mod operation;
mod params;
mod refine;
mod result;
mod sqrt3;
mod subdivide;
mod triangulate;
mod truncate;

pub use batch::refine_batch;
pub use clone::clone_geometry;
pub use error::{RefineError, RefineResult};
pub use operation::GeometryOperation;
pub use params::{ElementCounts, RefineMethod, RefineParams};
pub use refine::refine_geometry;
pub use result::RefinementResult;
pub use sqrt3::{sqrt3, sqrt3_alpha};
pub use subdivide::{catmull_clark, subdivide};
pub use triangulate::triangulate;
pub use truncate::{truncate, truncation_ratio};

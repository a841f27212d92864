//! Polygon mesh entity model for CortenForge refinement.
//!
//! This crate provides the container every refinement operation reads and
//! writes:
//!
//! - [`Geometry`] - Points, polygons, corners and a derived edge table
//! - [`Point`], [`Polygon`], [`Corner`], [`Edge`] - Lightweight entity handles
//! - [`AttributeMapCollection`] - Named, typed per-entity attribute maps
//! - [`Provenance`] - Weighted `(weight, old entity)` source lists
//! - [`interpolate_attribute_maps`] - Carry attributes from an old geometry to a new one
//! - [`Aabb`], [`BoundingSphere`] - Bounding volumes of point locations
//!
//! # Entity Model
//!
//! A polygon is an ordered loop of corners. Each corner references one point
//! and belongs to exactly one polygon. Edges are unordered point pairs derived
//! from consecutive corners and must be rebuilt with
//! [`Geometry::build_edges`] after topology changes.
//!
//! Handles are plain indices into the geometry that allocated them. Mixing
//! handles between geometries is a programming error.
//!
//! # Attributes
//!
//! Every entity kind owns a collection of named maps. A map holds one value
//! type: `f64`, `Vector2`, `Vector3`, `Vector4`, `Matrix4` or `u32` index.
//! Index maps are never interpolated.
//!
//! # Example
//!
//! ```
//! use mesh_geometry::{attribute_names, shapes, Vector3};
//!
//! let mut cube = shapes::cube();
//! cube.compute_polygon_normals()?;
//!
//! let normals = cube
//!     .polygon_attributes()
//!     .get::<Vector3<f64>>(attribute_names::POLYGON_NORMALS)
//!     .unwrap();
//! assert_eq!(normals.len(), 6);
//! # Ok::<(), mesh_geometry::GeometryError>(())
//! ```
//!
//! # Feature Flags
//!
//! - `serde` - Serialize handles, attribute kinds and bounding volumes

// Safety: Deny unwrap/expect in library code. Tests may use them (workspace warns).
#![cfg_attr(not(test), deny(clippy::unwrap_used, clippy::expect_used))]
#![warn(missing_docs)]

mod attribute;
mod bounds;
mod error;
mod geometry;
mod handles;
mod interpolate;
mod normals;
pub mod shapes;

pub use attribute::{
    attribute_names, AttributeKind, AttributeMap, AttributeMapCollection, AttributeValue,
    Interpolable,
};
pub use bounds::{Aabb, BoundingSphere};
pub use error::{GeometryError, GeometryResult};
pub use geometry::Geometry;
pub use handles::{Corner, Edge, Element, Point, Polygon};
pub use interpolate::{
    interpolate_attribute_map, interpolate_attribute_maps, interpolate_values, Provenance,
};
pub use normals::newell_normal;

// Re-export nalgebra types for convenience
pub use nalgebra::{Matrix4, Point3, Vector2, Vector3, Vector4};

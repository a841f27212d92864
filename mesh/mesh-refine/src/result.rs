//! Result types for refinement operations.

// Polygon counts don't overflow in practice
#![allow(clippy::cast_precision_loss)]

use mesh_geometry::Geometry;

use crate::params::RefineMethod;

/// Result of geometry refinement.
#[derive(Debug, Clone)]
pub struct RefinementResult {
    /// The refined geometry.
    pub geometry: Geometry,

    /// Number of polygons in original geometry.
    pub original_polygons: usize,

    /// Number of polygons in refined geometry.
    pub final_polygons: usize,

    /// Number of points in original geometry.
    pub original_points: usize,

    /// Number of points in refined geometry.
    pub final_points: usize,

    /// Number of iterations performed.
    pub iterations: u32,

    /// Refinement method used.
    pub method: RefineMethod,
}

impl RefinementResult {
    /// Get the polygon multiplication factor.
    #[must_use]
    pub fn polygon_ratio(&self) -> f64 {
        if self.original_polygons == 0 {
            1.0
        } else {
            self.final_polygons as f64 / self.original_polygons as f64
        }
    }

    /// Get the point multiplication factor.
    #[must_use]
    pub fn point_ratio(&self) -> f64 {
        if self.original_points == 0 {
            1.0
        } else {
            self.final_points as f64 / self.original_points as f64
        }
    }

    /// Check if the polygon count grew.
    #[must_use]
    pub const fn was_refined(&self) -> bool {
        self.iterations > 0 && self.final_polygons > self.original_polygons
    }
}

impl std::fmt::Display for RefinementResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Refinement ({:?}): {} → {} polygons ({:.1}x), {} → {} points, {} iterations",
            self.method,
            self.original_polygons,
            self.final_polygons,
            self.polygon_ratio(),
            self.original_points,
            self.final_points,
            self.iterations
        )
    }
}

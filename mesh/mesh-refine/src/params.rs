//! Refinement parameters.

use mesh_geometry::Geometry;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Refinement algorithm to use.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum RefineMethod {
    /// Copy every point and polygon unchanged.
    Clone,

    /// Split every n-gon into n quads around its centroid.
    /// Attributes are averaged linearly, so the surface does not move.
    #[default]
    Subdivide,

    /// Catmull-Clark subdivision - same quad split as `Subdivide` with
    /// limit-surface weights. Smooths the mesh.
    CatmullClark,

    /// Kobbelt's sqrt(3) subdivision - one triangle per shared half-edge.
    /// Smooths the mesh; intended for triangle meshes.
    Sqrt3,

    /// Fan every polygon with more than three corners around its centroid.
    Triangulate,

    /// Cut every vertex off at the ratio that keeps regular polygons regular.
    Truncate {
        /// Fill each removed vertex with a cap polygon.
        close: bool,
    },
}

impl RefineMethod {
    /// Check if this method moves existing points toward a smooth surface.
    #[must_use]
    pub const fn is_smoothing(&self) -> bool {
        matches!(self, Self::CatmullClark | Self::Sqrt3)
    }
}

/// Entity counts used to project the size of a refinement.
///
/// Counts after a step are exact for closed manifold input and an upper
/// bound otherwise.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ElementCounts {
    /// Number of points.
    pub points: usize,
    /// Number of edges.
    pub edges: usize,
    /// Number of polygons.
    pub polygons: usize,
    /// Number of corners.
    pub corners: usize,
    /// Polygons with at most three corners.
    pub small_polygons: usize,
    /// Corners belonging to polygons with more than three corners.
    pub large_corners: usize,
}

impl ElementCounts {
    /// Count the entities of `geometry`, rebuilding a stale edge table on a
    /// copy first.
    #[must_use]
    pub fn of(geometry: &Geometry) -> Self {
        let mut small_polygons = 0;
        let mut large_corners = 0;
        for polygon in geometry.polygons() {
            let size = geometry.polygon_size(polygon);
            if size <= 3 {
                small_polygons += 1;
            } else {
                large_corners += size;
            }
        }
        Self {
            points: geometry.point_count(),
            edges: geometry.with_current_edges().edge_count(),
            polygons: geometry.polygon_count(),
            corners: geometry.corner_count(),
            small_polygons,
            large_corners,
        }
    }

    /// Counts after one application of `method`.
    #[must_use]
    pub const fn after(&self, method: RefineMethod) -> Self {
        let Self {
            points,
            edges,
            polygons,
            corners,
            small_polygons,
            large_corners,
        } = *self;

        match method {
            RefineMethod::Clone => *self,
            RefineMethod::Subdivide | RefineMethod::CatmullClark => Self {
                points: points.saturating_add(edges).saturating_add(polygons),
                edges: edges.saturating_mul(2).saturating_add(corners),
                polygons: corners,
                corners: corners.saturating_mul(4),
                small_polygons: 0,
                large_corners: corners.saturating_mul(4),
            },
            RefineMethod::Sqrt3 => Self {
                points: points.saturating_add(polygons),
                edges: edges.saturating_add(corners),
                polygons: corners,
                corners: corners.saturating_mul(3),
                small_polygons: corners,
                large_corners: 0,
            },
            RefineMethod::Triangulate => {
                let fanned = polygons.saturating_sub(small_polygons);
                let triangles = small_polygons.saturating_add(large_corners);
                Self {
                    points: points.saturating_add(fanned),
                    edges: edges.saturating_add(large_corners),
                    polygons: triangles,
                    corners: triangles.saturating_mul(3),
                    small_polygons: triangles,
                    large_corners: 0,
                }
            }
            RefineMethod::Truncate { close } => {
                let (caps, cap_corners) = if close { (points, corners) } else { (0, 0) };
                let new_corners = corners.saturating_mul(2).saturating_add(cap_corners);
                Self {
                    points: edges.saturating_mul(2),
                    edges: edges.saturating_add(corners),
                    polygons: polygons.saturating_add(caps),
                    corners: new_corners,
                    small_polygons: 0,
                    large_corners: new_corners,
                }
            }
        }
    }
}

/// Parameters for geometry refinement.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct RefineParams {
    /// Refinement method to use.
    pub method: RefineMethod,

    /// Number of refinement iterations.
    pub iterations: u32,

    /// Maximum polygons allowed in result (prevents memory issues).
    pub max_polygons: usize,
}

impl Default for RefineParams {
    fn default() -> Self {
        Self {
            method: RefineMethod::default(),
            iterations: 1,
            max_polygons: 10_000_000, // 10M polygons max
        }
    }
}

impl RefineParams {
    /// Create new parameters with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create parameters for a plain copy.
    #[must_use]
    pub fn clone_only() -> Self {
        Self {
            method: RefineMethod::Clone,
            ..Self::default()
        }
    }

    /// Create parameters for centroid quad subdivision.
    #[must_use]
    pub fn subdivide() -> Self {
        Self {
            method: RefineMethod::Subdivide,
            ..Self::default()
        }
    }

    /// Create parameters for Catmull-Clark subdivision.
    #[must_use]
    pub fn catmull_clark() -> Self {
        Self {
            method: RefineMethod::CatmullClark,
            ..Self::default()
        }
    }

    /// Create parameters for sqrt(3) subdivision.
    #[must_use]
    pub fn sqrt3() -> Self {
        Self {
            method: RefineMethod::Sqrt3,
            ..Self::default()
        }
    }

    /// Create parameters for triangulation.
    #[must_use]
    pub fn triangulate() -> Self {
        Self {
            method: RefineMethod::Triangulate,
            ..Self::default()
        }
    }

    /// Create parameters for vertex truncation.
    #[must_use]
    pub fn truncate(close: bool) -> Self {
        Self {
            method: RefineMethod::Truncate { close },
            ..Self::default()
        }
    }

    /// Set refinement method.
    #[must_use]
    pub const fn with_method(mut self, method: RefineMethod) -> Self {
        self.method = method;
        self
    }

    /// Set number of iterations.
    #[must_use]
    pub const fn with_iterations(mut self, iterations: u32) -> Self {
        self.iterations = iterations;
        self
    }

    /// Set maximum polygons allowed.
    #[must_use]
    pub const fn with_max_polygons(mut self, max_polygons: usize) -> Self {
        self.max_polygons = max_polygons;
        self
    }

    /// Calculate expected entity counts after all iterations.
    #[must_use]
    pub const fn expected_counts(&self, current: ElementCounts) -> ElementCounts {
        let mut counts = current;
        let mut i = 0;
        while i < self.iterations {
            counts = counts.after(self.method);
            i += 1;
        }
        counts
    }

    /// Calculate expected polygon count after refining `geometry`.
    #[must_use]
    pub fn expected_polygons(&self, geometry: &Geometry) -> usize {
        self.expected_counts(ElementCounts::of(geometry)).polygons
    }
}

//! Iterated refinement driver.

use mesh_geometry::Geometry;
use tracing::debug;

use crate::clone::clone_geometry;
use crate::error::{RefineError, RefineResult};
use crate::params::{RefineMethod, RefineParams};
use crate::result::RefinementResult;
use crate::sqrt3::sqrt3;
use crate::subdivide::{catmull_clark, subdivide};
use crate::triangulate::triangulate;
use crate::truncate::truncate;

/// Refine a geometry using the specified parameters.
///
/// # Errors
///
/// Returns an error if:
/// - The geometry has no points or no polygons
/// - The iteration count is 0
/// - The projected polygon count exceeds `max_polygons`
///
/// # Examples
///
/// ```
/// use mesh_geometry::shapes;
/// use mesh_refine::{refine_geometry, RefineParams};
///
/// let cube = shapes::cube();
///
/// // Catmull-Clark twice: 6 quads -> 24 -> 96
/// let params = RefineParams::catmull_clark().with_iterations(2);
/// let result = refine_geometry(&cube, &params)?;
///
/// assert_eq!(result.final_polygons, 96);
/// assert_eq!(result.final_points, 98);
/// # Ok::<(), mesh_refine::RefineError>(())
/// ```
pub fn refine_geometry(
    geometry: &Geometry,
    params: &RefineParams,
) -> RefineResult<RefinementResult> {
    if geometry.point_count() == 0 {
        return Err(RefineError::EmptyGeometry);
    }
    if geometry.polygon_count() == 0 {
        return Err(RefineError::NoPolygons);
    }
    if params.iterations == 0 {
        return Err(RefineError::InvalidIterations(0));
    }

    let geometry = geometry.with_current_edges();
    let geometry: &Geometry = &geometry;

    let projected = params.expected_polygons(geometry);
    if projected > params.max_polygons {
        return Err(RefineError::TooLarge {
            current: geometry.polygon_count(),
            projected,
            max: params.max_polygons,
        });
    }

    let original_polygons = geometry.polygon_count();
    let original_points = geometry.point_count();

    debug!(
        "Refining geometry: {} polygons, {} points, {} iterations using {:?}",
        original_polygons, original_points, params.iterations, params.method
    );

    let mut current = apply_once(geometry, params.method)?;
    debug!(
        "Iteration 1: {} polygons, {} points",
        current.polygon_count(),
        current.point_count()
    );
    for i in 1..params.iterations {
        current = apply_once(&current, params.method)?;
        debug!(
            "Iteration {}: {} polygons, {} points",
            i + 1,
            current.polygon_count(),
            current.point_count()
        );
    }

    Ok(RefinementResult {
        original_polygons,
        final_polygons: current.polygon_count(),
        original_points,
        final_points: current.point_count(),
        iterations: params.iterations,
        method: params.method,
        geometry: current,
    })
}

/// Apply a single refinement step.
fn apply_once(geometry: &Geometry, method: RefineMethod) -> RefineResult<Geometry> {
    Ok(match method {
        RefineMethod::Clone => clone_geometry(geometry, None)?,
        RefineMethod::Subdivide => subdivide(geometry),
        RefineMethod::CatmullClark => catmull_clark(geometry),
        RefineMethod::Sqrt3 => sqrt3(geometry),
        RefineMethod::Triangulate => triangulate(geometry),
        RefineMethod::Truncate { close } => truncate(geometry, close),
    })
}

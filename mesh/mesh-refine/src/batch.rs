//! Parallel refinement of independent geometries.
//!
//! Each geometry is refined on its own rayon task. A single refinement is
//! never split across threads.

use mesh_geometry::Geometry;
use rayon::prelude::*;
use tracing::debug;

use crate::error::RefineResult;
use crate::params::RefineParams;
use crate::refine::refine_geometry;
use crate::result::RefinementResult;

/// Refine every geometry in `geometries` with the same parameters.
///
/// Results come back in input order. A failure on one geometry does not
/// affect the others.
///
/// # Examples
///
/// ```
/// use mesh_geometry::shapes;
/// use mesh_refine::{refine_batch, RefineParams};
///
/// let inputs = vec![shapes::cube(), shapes::tetrahedron(), shapes::prism(6)];
/// let results = refine_batch(&inputs, &RefineParams::triangulate());
///
/// let polygons: Vec<usize> = results
///     .iter()
///     .map(|r| r.as_ref().map_or(0, |r| r.final_polygons))
///     .collect();
/// assert_eq!(polygons, vec![24, 4, 36]);
/// ```
pub fn refine_batch(
    geometries: &[Geometry],
    params: &RefineParams,
) -> Vec<RefineResult<RefinementResult>> {
    debug!(
        "Refining batch of {} geometries using {:?}",
        geometries.len(),
        params.method
    );

    let results: Vec<_> = geometries
        .par_iter()
        .map(|geometry| refine_geometry(geometry, params))
        .collect();

    let failed = results.iter().filter(|result| result.is_err()).count();
    debug!("Batch complete: {} refined, {} failed", results.len() - failed, failed);
    results
}

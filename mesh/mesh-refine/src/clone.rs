//! Attribute-preserving copy, optionally of a polygon subset.

use mesh_geometry::{Geometry, Polygon};
use tracing::debug;

use crate::error::{RefineError, RefineResult};
use crate::operation::GeometryOperation;

/// Copy `source`, keeping every point and the selected polygons.
///
/// With `selection` of `None` every polygon is copied. Otherwise only the
/// polygons at the given indices are copied, in selection order. All points
/// are kept either way, so a partial copy may have unreferenced points.
///
/// # Errors
///
/// Returns [`RefineError::InvalidSelection`] if a selection index is not a
/// polygon of `source`.
///
/// # Examples
///
/// ```
/// use mesh_geometry::shapes;
/// use mesh_refine::clone_geometry;
///
/// let cube = shapes::cube();
/// let top_and_bottom = clone_geometry(&cube, Some(&[0, 1]))?;
///
/// assert_eq!(top_and_bottom.point_count(), 8);
/// assert_eq!(top_and_bottom.polygon_count(), 2);
/// # Ok::<(), mesh_refine::RefineError>(())
/// ```
pub fn clone_geometry(source: &Geometry, selection: Option<&[usize]>) -> RefineResult<Geometry> {
    let polygons: Vec<Polygon> = match selection {
        Some(indices) => {
            if let Some(&index) = indices.iter().find(|&&i| i >= source.polygon_count()) {
                return Err(RefineError::InvalidSelection {
                    index,
                    polygon_count: source.polygon_count(),
                });
            }
            indices.iter().map(|&i| Polygon::from_index(i)).collect()
        }
        None => source.polygons().collect(),
    };

    let source = source.with_current_edges();
    let source: &Geometry = &source;
    let mut op = GeometryOperation::new(source);
    for point in source.points() {
        op.make_new_point_from_point(1.0, point);
    }
    for &old in &polygons {
        let new = op.make_new_polygon_from_polygon(old);
        op.add_polygon_corners(new, old);
    }
    op.build_destination_edges_with_sourcing();

    let destination = op.finish();
    debug!(
        "Clone: {} of {} polygons, {} points",
        destination.polygon_count(),
        source.polygon_count(),
        destination.point_count()
    );
    Ok(destination)
}

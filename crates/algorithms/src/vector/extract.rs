//! Vertex extraction from raw boundary geometry
//!
//! Turns the store's wire form (multi-part point sequences with `None`
//! ring separators) into clean ordered coordinate arrays. Only the
//! separators are removed; a vertex at the coordinate origin is a real
//! vertex.

use geo_types::Coord;
use orthofoot_core::error::{Error, Result};
use orthofoot_core::geometry::RawGeometry;

/// Ordered vertex arrays, one per part, ring separators removed.
///
/// Vertex order within each part is preserved exactly.
pub fn part_vertices(geom: &RawGeometry) -> Vec<Vec<Coord<f64>>> {
    geom.parts
        .iter()
        .map(|part| part.iter().filter_map(|p| *p).collect())
        .collect()
}

/// The single vertex ring of a footprint boundary.
///
/// Collects parts, drops parts left empty after separator removal, and
/// squeezes the singleton wrapping: a one-part footprint yields its ring
/// directly. Multi-part footprints yield their first part (the exterior
/// boundary; footprints are expected simple, without interior rings).
///
/// Errors on inputs with zero usable points; callers must not measure
/// angles or lengths on the result without this guard having passed.
pub fn footprint_ring(geom: &RawGeometry) -> Result<Vec<Coord<f64>>> {
    let mut parts = part_vertices(geom);
    parts.retain(|part| !part.is_empty());

    match parts.len() {
        0 => Err(Error::InputGeometry {
            reason: "boundary has no usable vertices".to_string(),
        }),
        _ => Ok(parts.swap_remove(0)),
    }
}

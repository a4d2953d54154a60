//! Footprint simplification
//!
//! Douglas-Peucker vertex decimation applied to building polygons before
//! measurement. Digitized rectangular buildings carry redundant
//! near-collinear vertices; decimating at about one projected unit
//! reduces them to their corner structure.

use geo::Simplify;
use geo_types::{LineString, Polygon};

/// Parameters for footprint simplification
#[derive(Debug, Clone)]
pub struct SimplifyParams {
    /// Maximum allowed deviation in projected units
    pub tolerance: f64,
}

impl Default for SimplifyParams {
    fn default() -> Self {
        Self { tolerance: 1.0 }
    }
}

/// Simplify a footprint polygon using Douglas-Peucker.
///
/// Removes vertices that deviate less than `tolerance` from the
/// simplified boundary. Interior rings that collapse below a valid ring
/// size are dropped.
pub fn simplify_footprint(footprint: &Polygon<f64>, params: &SimplifyParams) -> Polygon<f64> {
    let exterior = footprint.exterior().simplify(&params.tolerance);
    let interiors: Vec<LineString<f64>> = footprint
        .interiors()
        .iter()
        .map(|ring| ring.simplify(&params.tolerance))
        .filter(|ring| ring.0.len() >= 4) // Must remain valid ring
        .collect();
    Polygon::new(exterior, interiors)
}

#[cfg(test)]
mod tests {
    use super::*;

    /// A 10x5 rectangle with a small mid-edge bump on the bottom edge
    fn bumpy_rectangle() -> Polygon<f64> {
        Polygon::new(
            LineString::from(vec![
                (0.0, 0.0),
                (5.0, 0.2), // digitization noise
                (10.0, 0.0),
                (10.0, 5.0),
                (0.0, 5.0),
                (0.0, 0.0),
            ]),
            vec![],
        )
    }

    #[test]
    fn test_bump_removed_at_default_tolerance() {
        let simplified = simplify_footprint(&bumpy_rectangle(), &SimplifyParams::default());
        assert_eq!(simplified.exterior().0.len(), 5, "corners only");
    }

    #[test]
    fn test_ring_stays_closed() {
        let simplified = simplify_footprint(&bumpy_rectangle(), &SimplifyParams::default());
        let ring = &simplified.exterior().0;
        assert_eq!(ring.first(), ring.last());
    }

    #[test]
    fn test_zero_tolerance_keeps_all_vertices() {
        let params = SimplifyParams { tolerance: 0.0 };
        let simplified = simplify_footprint(&bumpy_rectangle(), &params);
        assert_eq!(simplified.exterior().0.len(), 6);
    }

    #[test]
    fn test_corners_survive() {
        let simplified = simplify_footprint(&bumpy_rectangle(), &SimplifyParams::default());
        let ring = &simplified.exterior().0;
        assert!(ring.contains(&geo_types::Coord { x: 10.0, y: 5.0 }));
        assert!(ring.contains(&geo_types::Coord { x: 0.0, y: 5.0 }));
    }
}

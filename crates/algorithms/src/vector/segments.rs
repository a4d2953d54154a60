//! Boundary conversion and segment splitting
//!
//! Polygon to boundary line, and boundary line to two-point split
//! segments. Ring winding is normalized clockwise so that downstream
//! interior-angle measurement sees the store's ring convention
//! regardless of how the input file winds its rings.

use geo::Winding;
use geo_types::{Coord, LineString, Polygon};

/// An ordered two-point split segment
pub type SplitSegment = [Coord<f64>; 2];

/// The exterior boundary of a footprint as a closed, clockwise line.
pub fn boundary_line(footprint: &Polygon<f64>) -> LineString<f64> {
    let mut boundary = footprint.exterior().clone();
    boundary.close();
    boundary.make_cw_winding();
    boundary
}

/// Split a boundary line at its vertices into ordered two-point
/// segments. A closed ring of n+1 vertices yields n segments; segment i
/// starts at vertex i.
pub fn split_segments(line: &LineString<f64>) -> Vec<SplitSegment> {
    line.0.windows(2).map(|pair| [pair[0], pair[1]]).collect()
}

//! Edge group analysis
//!
//! One footprint's split boundary forms a group of exactly four
//! segments. The group's longest member fixes the rectangle's
//! orientation and one dimension, the shortest its other dimension.
//! Grouping is keyed per footprint: each footprint's segments arrive
//! together, so a miscounted boundary is rejected for that footprint
//! alone instead of shifting every later group.

use geo_types::Coord;

use super::lengths::segment_length;
use super::report::UnsupportedReason;
use crate::vector::SplitSegment;

/// Segments per footprint group
pub const GROUP_SIZE: usize = 4;

/// One reference edge of a group: its endpoints, length, and slot
/// index 0-3 within the group
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ReferenceEdge {
    pub coords: [Coord<f64>; 2],
    pub length: f64,
    pub index: usize,
}

/// The longest and shortest edge of one footprint's group
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ReferenceEdges {
    pub longest: ReferenceEdge,
    pub shortest: ReferenceEdge,
}

/// Select the reference edges of one footprint's split segments.
///
/// Ties are broken by first occurrence (stable argmax/argmin). A group
/// of any size other than four is unsupported.
pub fn reference_edges(
    segments: &[SplitSegment],
) -> Result<ReferenceEdges, UnsupportedReason> {
    if segments.len() != GROUP_SIZE {
        return Err(UnsupportedReason::SegmentCount {
            count: segments.len(),
        });
    }

    let lengths: Vec<f64> = segments.iter().map(segment_length).collect();

    let mut max_index = 0;
    let mut min_index = 0;
    for (i, &len) in lengths.iter().enumerate() {
        if len > lengths[max_index] {
            max_index = i;
        }
        if len < lengths[min_index] {
            min_index = i;
        }
    }

    Ok(ReferenceEdges {
        longest: ReferenceEdge {
            coords: segments[max_index],
            length: lengths[max_index],
            index: max_index,
        },
        shortest: ReferenceEdge {
            coords: segments[min_index],
            length: lengths[min_index],
            index: min_index,
        },
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn c(x: f64, y: f64) -> Coord<f64> {
        Coord { x, y }
    }

    fn horizontal(y: f64, len: f64) -> SplitSegment {
        [c(0.0, y), c(len, y)]
    }

    #[test]
    fn test_stable_tie_breaking() {
        // Lengths 5, 3, 5, 3: first 5 wins max, first 3 wins min
        let group = [
            horizontal(0.0, 5.0),
            horizontal(1.0, 3.0),
            horizontal(2.0, 5.0),
            horizontal(3.0, 3.0),
        ];
        let refs = reference_edges(&group).unwrap();

        assert_eq!(refs.longest.index, 0);
        assert_eq!(refs.longest.length, 5.0);
        assert_eq!(refs.shortest.index, 1);
        assert_eq!(refs.shortest.length, 3.0);
    }

    #[test]
    fn test_reference_coordinates() {
        let group = [
            horizontal(0.0, 2.0),
            horizontal(1.0, 10.0),
            horizontal(2.0, 4.0),
            horizontal(3.0, 7.0),
        ];
        let refs = reference_edges(&group).unwrap();

        assert_eq!(refs.longest.index, 1);
        assert_eq!(refs.longest.coords, [c(0.0, 1.0), c(10.0, 1.0)]);
        assert_eq!(refs.shortest.index, 0);
        assert_eq!(refs.shortest.length, 2.0);
    }

    #[test]
    fn test_wrong_count_is_unsupported() {
        let three = [
            horizontal(0.0, 1.0),
            horizontal(1.0, 2.0),
            horizontal(2.0, 3.0),
        ];
        assert_eq!(
            reference_edges(&three),
            Err(UnsupportedReason::SegmentCount { count: 3 })
        );

        let five = [
            horizontal(0.0, 1.0),
            horizontal(1.0, 2.0),
            horizontal(2.0, 3.0),
            horizontal(3.0, 4.0),
            horizontal(4.0, 5.0),
        ];
        assert_eq!(
            reference_edges(&five),
            Err(UnsupportedReason::SegmentCount { count: 5 })
        );
    }
}

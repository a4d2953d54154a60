//! Rectangle synthesis
//!
//! Builds the replacement rectangle for one footprint from its
//! reference edges. The longest observed edge is kept exactly as
//! digitized and fixes the orientation; the shortest edge's length is
//! the rectangle's width; the two remaining corners are placed by
//! perpendicular offset from the longest edge's endpoints.

use std::f64::consts::FRAC_PI_2;

use geo_types::Coord;

use super::groups::ReferenceEdges;
use super::report::UnsupportedReason;

/// Which diagonal-fill rule produced the rectangle, named by the slot
/// the longest edge occupies
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShapeOrder {
    /// Longest edge in slot 1; slot 3 filled from the offset corners
    LongestAtOne,
    /// Longest edge in slot 3; slot 1 filled from the offset corners
    LongestAtThree,
}

impl ShapeOrder {
    /// The slot index carrying the longest edge
    pub fn slot(&self) -> usize {
        match self {
            ShapeOrder::LongestAtOne => 1,
            ShapeOrder::LongestAtThree => 3,
        }
    }
}

/// A synthesized rectangle: the 4-slot coordinate table mirroring the
/// group's segment indexing, plus the order tag consumed by emission
#[derive(Debug, Clone, PartialEq)]
pub struct CorrectedRectangle {
    pub slots: [[Coord<f64>; 2]; 4],
    pub order: ShapeOrder,
}

/// Perpendicular corner offset from a base point.
///
/// Displaces `base` by `width` along the direction perpendicular to
/// `alpha`, folding each component through an absolute value:
/// `|width * cos(alpha + π/2) - base|`. The fold is part of the
/// construction's observable behavior and is kept bit-for-bit.
pub fn corner_offset(base: Coord<f64>, alpha: f64, width: f64) -> Coord<f64> {
    Coord {
        x: (width * (alpha + FRAC_PI_2).cos() - base.x).abs(),
        y: (width * (alpha + FRAC_PI_2).sin() - base.y).abs(),
    }
}

/// Synthesize the replacement rectangle for one footprint.
///
/// Slot 0 pairs the longest edge's first endpoint with its offset
/// corner, slot 2 the second endpoint with its offset corner, and the
/// longest edge's own slot keeps the edge as digitized. The remaining
/// slot is filled diagonally from the two offset corners, a rule that
/// only exists when the longest edge occupies slot 1 or 3; even slots
/// are reported unsupported.
pub fn synthesize(refs: &ReferenceEdges) -> Result<CorrectedRectangle, UnsupportedReason> {
    let order = match refs.longest.index {
        1 => ShapeOrder::LongestAtOne,
        3 => ShapeOrder::LongestAtThree,
        slot => return Err(UnsupportedReason::DiagonalRuleUndefined { slot }),
    };

    let [p1, p2] = refs.longest.coords;
    let alpha = (p2.y - p1.y).atan2(p2.x - p1.x);
    let width = refs.shortest.length;

    let mut slots = [[Coord { x: 0.0, y: 0.0 }; 2]; 4];
    slots[0] = [p1, corner_offset(p1, alpha, width)];
    slots[2] = [p2, corner_offset(p2, alpha, width)];
    // The longest edge's slot takes the edge exactly as digitized
    slots[refs.longest.index] = refs.longest.coords;

    let diagonal = [slots[0][1], slots[2][1]];
    match order {
        ShapeOrder::LongestAtOne => slots[3] = diagonal,
        ShapeOrder::LongestAtThree => slots[1] = diagonal,
    }

    Ok(CorrectedRectangle { slots, order })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::footprint::groups::ReferenceEdge;

    fn c(x: f64, y: f64) -> Coord<f64> {
        Coord { x, y }
    }

    fn refs(longest_index: usize) -> ReferenceEdges {
        ReferenceEdges {
            longest: ReferenceEdge {
                coords: [c(0.0, 0.0), c(10.0, 0.0)],
                length: 10.0,
                index: longest_index,
            },
            shortest: ReferenceEdge {
                coords: [c(0.0, 0.0), c(0.0, 4.0)],
                length: 4.0,
                index: 0,
            },
        }
    }

    #[test]
    fn test_axis_aligned_synthesis() {
        let rect = synthesize(&refs(1)).unwrap();

        assert_eq!(rect.order, ShapeOrder::LongestAtOne);
        // Longest edge kept as digitized in its slot
        assert_eq!(rect.slots[1], [c(0.0, 0.0), c(10.0, 0.0)]);
        // Offset corners sit one width away, perpendicular to the edge
        assert!((rect.slots[0][1].y - 4.0).abs() < 1e-9);
        assert!((rect.slots[2][1].y - 4.0).abs() < 1e-9);
        assert!((rect.slots[2][1].x - 10.0).abs() < 1e-9);
        // Diagonal slot joins the two offset corners
        assert_eq!(rect.slots[3], [rect.slots[0][1], rect.slots[2][1]]);
    }

    #[test]
    fn test_longest_at_three_fills_slot_one() {
        let rect = synthesize(&refs(3)).unwrap();

        assert_eq!(rect.order, ShapeOrder::LongestAtThree);
        assert_eq!(rect.order.slot(), 3);
        assert_eq!(rect.slots[3], [c(0.0, 0.0), c(10.0, 0.0)]);
        assert_eq!(rect.slots[1], [rect.slots[0][1], rect.slots[2][1]]);
    }

    #[test]
    fn test_even_slots_are_unsupported() {
        assert_eq!(
            synthesize(&refs(0)),
            Err(UnsupportedReason::DiagonalRuleUndefined { slot: 0 })
        );
        assert_eq!(
            synthesize(&refs(2)),
            Err(UnsupportedReason::DiagonalRuleUndefined { slot: 2 })
        );
    }

    #[test]
    fn test_corner_offset_axis_aligned() {
        // Edge along +x: perpendicular is +y, fold is a no-op in the
        // positive quadrant
        let offset = corner_offset(c(0.0, 0.0), 0.0, 4.0);
        assert!(offset.x.abs() < 1e-9);
        assert!((offset.y - 4.0).abs() < 1e-9);

        let offset = corner_offset(c(10.0, 0.0), 0.0, 4.0);
        assert!((offset.x - 10.0).abs() < 1e-9);
        assert!((offset.y - 4.0).abs() < 1e-9);
    }

    #[test]
    fn test_corner_offset_absolute_fold() {
        // Base beyond the displacement: the fold reflects the sign
        let offset = corner_offset(c(-3.0, 0.0), 0.0, 4.0);
        assert!((offset.x - 3.0).abs() < 1e-9);
        assert!((offset.y - 4.0).abs() < 1e-9);
    }

    #[test]
    fn test_synthesis_is_deterministic() {
        let a = synthesize(&refs(1)).unwrap();
        let b = synthesize(&refs(1)).unwrap();
        assert_eq!(a, b);
    }
}

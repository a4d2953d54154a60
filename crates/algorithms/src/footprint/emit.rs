//! Rectangle emission
//!
//! Assembles synthesized corner tables into closed polygons and appends
//! them to an output feature table. Footprints without a supported
//! rectangle are skipped and recorded in the run report; storage
//! failures are fatal for the whole run.

use geo_types::{Coord, Geometry, LineString, Polygon};
use orthofoot_core::error::Result;
use orthofoot_core::{AttributeValue, Feature, FeatureTable, FieldType, GeometryType, SpatialRef};

use super::rectangle::{CorrectedRectangle, ShapeOrder};
use super::report::{FootprintOutcome, RunReport};

/// Attribute linking an output rectangle back to its source footprint
pub const RIGHT_ID_FIELD: &str = "RIGHT_ID";

/// Create the output table for corrected rectangles
pub fn rectangle_table(name: impl Into<String>, spatial_ref: SpatialRef) -> Result<FeatureTable> {
    let mut table = FeatureTable::create(name, GeometryType::Polygon, spatial_ref);
    table.add_field(RIGHT_ID_FIELD, FieldType::Long)?;
    Ok(table)
}

/// The four ordered corners of a synthesized rectangle.
///
/// The order tag selects which slots contribute: the first two corners
/// always come from slot 0 (offset corner, then base), the last from
/// slot 2's offset corner; the third corner comes from the slot the
/// longest edge occupies.
pub fn rectangle_corners(rect: &CorrectedRectangle) -> [Coord<f64>; 4] {
    match rect.order {
        ShapeOrder::LongestAtOne => [
            rect.slots[0][1],
            rect.slots[0][0],
            rect.slots[1][1],
            rect.slots[2][1],
        ],
        ShapeOrder::LongestAtThree => [
            rect.slots[0][1],
            rect.slots[0][0],
            rect.slots[2][0],
            rect.slots[2][1],
        ],
    }
}

/// The corners as a closed polygon ring
pub fn rectangle_ring(rect: &CorrectedRectangle) -> LineString<f64> {
    let corners = rectangle_corners(rect);
    let mut ring = LineString::from(corners.to_vec());
    ring.close();
    ring
}

/// Emit every synthesized rectangle into `output`, in footprint-id
/// order. Unsupported and degenerate footprints are skipped without
/// error and collected in the returned report.
pub fn emit_rectangles(
    outcomes: &[FootprintOutcome],
    output: &mut FeatureTable,
) -> Result<RunReport> {
    let mut report = RunReport::default();

    for (id, outcome) in outcomes.iter().enumerate() {
        match outcome {
            FootprintOutcome::Synthesized(rect) => {
                let polygon = Polygon::new(rectangle_ring(rect), vec![]);
                let feature = Feature::new(Geometry::Polygon(polygon))
                    .with_attribute(RIGHT_ID_FIELD, AttributeValue::Int(id as i64));
                output.append(feature)?;
                report.emitted.push(id);
            }
            FootprintOutcome::Unsupported(reason) => {
                report.skipped.push((id, reason.to_string()));
            }
            FootprintOutcome::Degenerate { reason } => {
                report.skipped.push((id, reason.clone()));
            }
        }
    }

    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::footprint::groups::{ReferenceEdge, ReferenceEdges};
    use crate::footprint::rectangle::synthesize;
    use crate::footprint::report::UnsupportedReason;

    fn c(x: f64, y: f64) -> Coord<f64> {
        Coord { x, y }
    }

    fn sample_rectangle() -> CorrectedRectangle {
        let refs = ReferenceEdges {
            longest: ReferenceEdge {
                coords: [c(0.0, 0.0), c(10.0, 0.0)],
                length: 10.0,
                index: 1,
            },
            shortest: ReferenceEdge {
                coords: [c(0.0, 0.0), c(0.0, 4.0)],
                length: 4.0,
                index: 0,
            },
        };
        synthesize(&refs).unwrap()
    }

    #[test]
    fn test_corners_form_the_expected_rectangle() {
        let corners = rectangle_corners(&sample_rectangle());

        let expected = [c(0.0, 4.0), c(0.0, 0.0), c(10.0, 0.0), c(10.0, 4.0)];
        for (got, want) in corners.iter().zip(&expected) {
            assert!((got.x - want.x).abs() < 1e-9, "{:?} vs {:?}", got, want);
            assert!((got.y - want.y).abs() < 1e-9, "{:?} vs {:?}", got, want);
        }
    }

    #[test]
    fn test_ring_is_closed() {
        let ring = rectangle_ring(&sample_rectangle());
        assert_eq!(ring.0.len(), 5);
        assert_eq!(ring.0.first(), ring.0.last());
    }

    #[test]
    fn test_emit_skips_without_error() {
        let outcomes = vec![
            FootprintOutcome::Synthesized(sample_rectangle()),
            FootprintOutcome::Unsupported(UnsupportedReason::SegmentCount { count: 5 }),
            FootprintOutcome::Synthesized(sample_rectangle()),
            FootprintOutcome::Degenerate {
                reason: "boundary has no usable vertices".to_string(),
            },
        ];

        let mut output = rectangle_table("fixed", SpatialRef::from_epsg(32633)).unwrap();
        let report = emit_rectangles(&outcomes, &mut output).unwrap();

        assert_eq!(output.len(), 2);
        assert_eq!(report.emitted, vec![0, 2]);
        assert_eq!(report.skipped.len(), 2);
        assert_eq!(report.skipped[0].0, 1);

        // RIGHT_ID links back to the source footprint, not the row index
        assert_eq!(
            output.feature(1).unwrap().attribute(RIGHT_ID_FIELD),
            Some(&AttributeValue::Int(2))
        );
    }

    #[test]
    fn test_emission_is_deterministic() {
        let outcomes = vec![FootprintOutcome::Synthesized(sample_rectangle())];

        let mut first = rectangle_table("fixed", SpatialRef::unknown()).unwrap();
        let mut second = rectangle_table("fixed", SpatialRef::unknown()).unwrap();
        emit_rectangles(&outcomes, &mut first).unwrap();
        emit_rectangles(&outcomes, &mut second).unwrap();

        let a = first.feature(0).unwrap().geometry.clone();
        let b = second.feature(0).unwrap().geometry.clone();
        assert_eq!(format!("{:?}", a), format!("{:?}", b));
    }
}

//! The footprint correction pipeline
//!
//! Runs every footprint of an input table through simplification,
//! boundary extraction, the diagnostic angle/length path, and rectangle
//! synthesis, then emits the corrected rectangles. Footprint-local
//! failures skip that footprint only; the batch always completes unless
//! storage rejects a write.

use geo_types::{Geometry, LineString, Polygon};
use orthofoot_core::error::{Error, Result};
use orthofoot_core::geometry::RawGeometry;
use orthofoot_core::{Algorithm, AttributeValue, Feature, FeatureTable, FieldType, GeometryType};

use super::angles::{vertex_angles, vertex_errors, AngleParams};
use super::emit::{emit_rectangles, rectangle_table};
use super::groups::reference_edges;
use super::lengths::segment_length;
use super::rectangle::synthesize;
use super::report::{FootprintOutcome, RunReport};
use crate::vector::{boundary_line, footprint_ring, simplify_footprint, split_segments, SimplifyParams};

/// Diagnostic field: interior angle at the segment's start vertex
pub const ANGLE_FIELD: &str = "Angle";
/// Diagnostic field: deviation of the angle from 90 degrees
pub const ANGLE_ERR_FIELD: &str = "Angle_Err";
/// Diagnostic field: segment length
pub const LENGTH_FIELD: &str = "Length";
/// Attribute linking a split segment back to its source footprint
pub const RIGHT_FID_FIELD: &str = "RIGHT_FID";

/// Parameters for the footprint correction pipeline
#[derive(Debug, Clone, Default)]
pub struct OrthogonalizeParams {
    pub simplify: SimplifyParams,
    pub angles: AngleParams,
}

/// Everything one pipeline run produces
#[derive(Debug, Clone)]
pub struct OrthogonalizeOutput {
    /// Corrected rectangles, keyed back to footprints by `RIGHT_ID`
    pub rectangles: FeatureTable,
    /// Split segments annotated with `Angle`, `Angle_Err`, `Length`
    pub segments: FeatureTable,
    /// Per-footprint outcomes
    pub report: RunReport,
}

/// Create the annotated split-segment table
pub fn segment_table(
    name: impl Into<String>,
    spatial_ref: orthofoot_core::SpatialRef,
) -> Result<FeatureTable> {
    let mut table = FeatureTable::create(name, GeometryType::Polyline, spatial_ref);
    table.add_field(RIGHT_FID_FIELD, FieldType::Long)?;
    table.add_field(ANGLE_FIELD, FieldType::Double)?;
    table.add_field(ANGLE_ERR_FIELD, FieldType::Double)?;
    table.add_field(LENGTH_FIELD, FieldType::Double)?;
    Ok(table)
}

/// Correct every footprint of `input`, producing the rectangle table,
/// the annotated segment table, and the per-footprint report.
///
/// Output ordering follows footprint ids (input row order). The spatial
/// reference is passed through unmodified to both output tables.
pub fn orthogonalize(
    input: &FeatureTable,
    params: &OrthogonalizeParams,
) -> Result<OrthogonalizeOutput> {
    if !params.simplify.tolerance.is_finite() || params.simplify.tolerance < 0.0 {
        return Err(Error::InvalidParameter {
            name: "simplify.tolerance",
            value: params.simplify.tolerance.to_string(),
            reason: "must be a non-negative, finite distance".to_string(),
        });
    }

    let mut segments = segment_table(
        format!("{}_segments", input.name()),
        input.spatial_ref().clone(),
    )?;

    let mut outcomes = Vec::with_capacity(input.len());
    for id in 0..input.len() {
        outcomes.push(process_footprint(input, id, params, &mut segments)?);
    }

    let mut rectangles = rectangle_table(
        format!("{}_orthogonal", input.name()),
        input.spatial_ref().clone(),
    )?;
    let report = emit_rectangles(&outcomes, &mut rectangles)?;

    Ok(OrthogonalizeOutput {
        rectangles,
        segments,
        report,
    })
}

/// One footprint through the measurement and synthesis stages.
///
/// Degenerate boundaries and unsupported topology come back as tagged
/// outcomes; only storage failures are `Err`.
fn process_footprint(
    input: &FeatureTable,
    id: usize,
    params: &OrthogonalizeParams,
    segments_out: &mut FeatureTable,
) -> Result<FootprintOutcome> {
    let Some(polygon) = footprint_polygon(input, id) else {
        return Ok(FootprintOutcome::Degenerate {
            reason: "no areal boundary geometry".to_string(),
        });
    };

    let simplified = simplify_footprint(&polygon, &params.simplify);
    let boundary = boundary_line(&simplified);
    let raw = RawGeometry::from_line_string(&boundary);

    let ring = match footprint_ring(&raw) {
        Ok(ring) => ring,
        Err(e) => {
            return Ok(FootprintOutcome::Degenerate {
                reason: e.to_string(),
            })
        }
    };

    // Diagnostic path: angles at every vertex, lengths of every split
    // segment, written zipped per (segment, value) pair
    let angles = match vertex_angles(&ring, &params.angles) {
        Ok(angles) => angles,
        Err(e) => {
            return Ok(FootprintOutcome::Degenerate {
                reason: e.to_string(),
            })
        }
    };
    let errors = vertex_errors(&angles, params.angles.units);
    let segs = split_segments(&boundary);
    let lengths: Vec<f64> = segs.iter().map(segment_length).collect();

    for (((seg, angle), err), len) in segs.iter().zip(&angles).zip(&errors).zip(&lengths) {
        let feature = Feature::new(Geometry::LineString(LineString::from(vec![seg[0], seg[1]])))
            .with_attribute(RIGHT_FID_FIELD, AttributeValue::Int(id as i64))
            .with_attribute(ANGLE_FIELD, AttributeValue::Float(*angle))
            .with_attribute(ANGLE_ERR_FIELD, AttributeValue::Float(*err))
            .with_attribute(LENGTH_FIELD, AttributeValue::Float(*len));
        segments_out.append(feature)?;
    }

    // Synthesis path
    let outcome = match reference_edges(&segs) {
        Ok(refs) => match synthesize(&refs) {
            Ok(rect) => FootprintOutcome::Synthesized(rect),
            Err(reason) => FootprintOutcome::Unsupported(reason),
        },
        Err(reason) => FootprintOutcome::Unsupported(reason),
    };
    Ok(outcome)
}

/// The areal boundary of one footprint, if it has one. Multi-part
/// footprints contribute their first polygon.
fn footprint_polygon(input: &FeatureTable, id: usize) -> Option<Polygon<f64>> {
    match input.feature(id)?.geometry.as_ref()? {
        Geometry::Polygon(p) => Some(p.clone()),
        Geometry::MultiPolygon(mp) => mp.0.first().cloned(),
        _ => None,
    }
}

/// The footprint correction pipeline as a named algorithm
#[derive(Debug, Clone, Default)]
pub struct Orthogonalize;

impl Algorithm for Orthogonalize {
    type Input = FeatureTable;
    type Output = OrthogonalizeOutput;
    type Params = OrthogonalizeParams;
    type Error = Error;

    fn name(&self) -> &'static str {
        "Orthogonalize"
    }

    fn description(&self) -> &'static str {
        "Force near-rectangular building footprints to true rectangles"
    }

    fn execute(&self, input: Self::Input, params: Self::Params) -> Result<Self::Output> {
        orthogonalize(&input, &params)
    }
}

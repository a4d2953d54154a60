//! Building footprint regularization
//!
//! Measurement and reconstruction of near-rectangular building
//! footprints:
//! - Angles: interior/exterior vertex angles and right-angle deviation
//! - Lengths: split-segment Euclidean lengths
//! - Groups: per-footprint edge groups and longest/shortest reference edges
//! - Rectangle: corner synthesis from the reference edges
//! - Emit: corrected polygons with source-footprint linkage
//! - Pipeline: the end-to-end correction run with per-footprint reporting

mod angles;
mod emit;
mod groups;
mod lengths;
mod pipeline;
mod rectangle;
mod report;

pub use angles::{vertex_angles, vertex_errors, AngleConvention, AngleParams, AngleUnits};
pub use emit::{emit_rectangles, rectangle_corners, rectangle_ring, rectangle_table, RIGHT_ID_FIELD};
pub use groups::{reference_edges, ReferenceEdge, ReferenceEdges, GROUP_SIZE};
pub use lengths::{segment_length, segment_lengths};
pub use pipeline::{
    orthogonalize, segment_table, Orthogonalize, OrthogonalizeOutput, OrthogonalizeParams,
    ANGLE_ERR_FIELD, ANGLE_FIELD, LENGTH_FIELD, RIGHT_FID_FIELD,
};
pub use rectangle::{corner_offset, synthesize, CorrectedRectangle, ShapeOrder};
pub use report::{FootprintOutcome, RunReport, UnsupportedReason};

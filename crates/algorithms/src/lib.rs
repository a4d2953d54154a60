//! # Orthofoot Algorithms
//!
//! Footprint regularization algorithms for orthofoot.
//!
//! ## Available Algorithm Categories
//!
//! - **vector**: extraction, simplification, boundary splitting
//! - **footprint**: angle/length measurement, edge-group analysis,
//!   rectangle synthesis and emission, the correction pipeline

pub mod footprint;
pub mod vector;

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::footprint::{
        orthogonalize, reference_edges, synthesize, vertex_angles, vertex_errors,
        AngleConvention, AngleParams, AngleUnits, CorrectedRectangle, FootprintOutcome,
        Orthogonalize, OrthogonalizeOutput, OrthogonalizeParams, ReferenceEdges, RunReport,
        ShapeOrder, UnsupportedReason,
    };
    pub use crate::vector::{
        boundary_line, footprint_ring, simplify_footprint, split_segments, SimplifyParams,
        SplitSegment,
    };
    pub use orthofoot_core::prelude::*;
}

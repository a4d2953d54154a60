//! Generic vector operations
//!
//! The pre-measurement stages of the footprint pipeline:
//! - Extract: raw multi-part boundary geometry to vertex arrays
//! - Simplify: Douglas-Peucker vertex decimation
//! - Segments: polygon to boundary line, boundary line to split segments

mod extract;
mod segments;
mod simplify;

pub use extract::{footprint_ring, part_vertices};
pub use segments::{boundary_line, split_segments, SplitSegment};
pub use simplify::{simplify_footprint, SimplifyParams};

//! Per-run outcome reporting
//!
//! Every footprint gets a tagged outcome instead of a silent skip;
//! the report is the caller's view of what was emitted and what was
//! dropped, and why.

use std::fmt;

use super::rectangle::CorrectedRectangle;

/// Why a footprint could not be synthesized into a rectangle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnsupportedReason {
    /// The split boundary did not yield exactly four segments
    SegmentCount { count: usize },
    /// The longest edge sits on a slot (0 or 2) for which no
    /// diagonal-fill rule exists
    DiagonalRuleUndefined { slot: usize },
}

impl fmt::Display for UnsupportedReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UnsupportedReason::SegmentCount { count } => {
                write!(f, "boundary split into {} segments, need exactly 4", count)
            }
            UnsupportedReason::DiagonalRuleUndefined { slot } => {
                write!(f, "longest edge on slot {}, no diagonal rule", slot)
            }
        }
    }
}

/// Outcome of processing one footprint
#[derive(Debug, Clone)]
pub enum FootprintOutcome {
    /// A rectangle candidate ready for emission
    Synthesized(CorrectedRectangle),
    /// Topology outside the supported configuration; skipped
    Unsupported(UnsupportedReason),
    /// Boundary could not be measured at all; skipped
    Degenerate { reason: String },
}

/// Summary of one pipeline run, ordered by footprint id
#[derive(Debug, Clone, Default)]
pub struct RunReport {
    /// Footprint ids that produced an output rectangle
    pub emitted: Vec<usize>,
    /// Footprint ids that were skipped, with the reason
    pub skipped: Vec<(usize, String)>,
}

impl RunReport {
    pub fn total(&self) -> usize {
        self.emitted.len() + self.skipped.len()
    }

    pub fn summary(&self) -> String {
        format!(
            "{} footprints: {} corrected, {} skipped",
            self.total(),
            self.emitted.len(),
            self.skipped.len()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reason_messages() {
        let count = UnsupportedReason::SegmentCount { count: 5 };
        assert!(count.to_string().contains("5 segments"));

        let slot = UnsupportedReason::DiagonalRuleUndefined { slot: 2 };
        assert!(slot.to_string().contains("slot 2"));
    }

    #[test]
    fn test_summary_counts() {
        let report = RunReport {
            emitted: vec![0, 2],
            skipped: vec![(1, "x".into())],
        };
        assert_eq!(report.total(), 3);
        assert!(report.summary().contains("2 corrected"));
        assert!(report.summary().contains("1 skipped"));
    }
}

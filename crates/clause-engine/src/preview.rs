//! Display helpers for the risk list.

use serde::Serialize;
use shared_types::{Risk, Severity};

/// Characters of a clause shown in a list entry before truncation.
pub const PREVIEW_CHARS: usize = 100;

/// First `PREVIEW_CHARS` characters of `clause`, with `...` appended if cut.
pub fn clause_preview(clause: &str) -> String {
    match clause.char_indices().nth(PREVIEW_CHARS) {
        Some((cut, _)) => format!("{}...", &clause[..cut]),
        None => clause.to_string(),
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SeverityCounts {
    pub high: usize,
    pub medium: usize,
    pub low: usize,
    pub unknown: usize,
}

impl SeverityCounts {
    pub fn tally(risks: &[Risk]) -> Self {
        risks.iter().fold(Self::default(), |mut counts, risk| {
            match risk.severity {
                Severity::High => counts.high += 1,
                Severity::Medium => counts.medium += 1,
                Severity::Low => counts.low += 1,
                Severity::Unknown => counts.unknown += 1,
            }
            counts
        })
    }

    pub fn total(&self) -> usize {
        self.high + self.medium + self.low + self.unknown
    }
}

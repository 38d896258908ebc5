//! Counters for barrier resolution outcomes.
//!
//! Rejected corrections are expected under tight geometry and never
//! surface as errors; these counters exist so a host can watch how often
//! they happen.

use crate::resolver::{Correction, ResolveReport};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ResolverStats {
    pub resolved: u64,
    pub corrections_applied: u64,
    pub corrections_negated: u64,
    pub corrections_rejected: u64,
    pub snapped: u64,
    pub stuck: u64,
}

impl ResolverStats {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, report: &ResolveReport) {
        self.resolved += 1;

        match report.correction {
            Correction::None => {}
            Correction::Applied => self.corrections_applied += 1,
            Correction::Negated => self.corrections_negated += 1,
            Correction::Rejected => self.corrections_rejected += 1,
        }

        if report.snapped {
            self.snapped += 1;
        }

        if report.stuck {
            self.stuck += 1;
        }
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// One-line human-readable summary.
    pub fn summary(&self) -> String {
        format!(
            "resolved {} | corrections: {} applied, {} negated, {} rejected | {} snapped | {} stuck",
            self.resolved,
            self.corrections_applied,
            self.corrections_negated,
            self.corrections_rejected,
            self.snapped,
            self.stuck
        )
    }
}

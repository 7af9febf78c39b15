//! Aggregation of rule findings into the JSON validation report.
//!
//! Default mode only: errors stop generation, warnings let it continue with
//! placeholders reported to the developer.

use serde::Serialize;

use crate::rules::{Finding, Severity};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct Summary {
    pub errors: usize,
    pub warnings: usize,
}

#[derive(Clone, Debug, Serialize)]
pub struct Report {
    pub summary: Summary,
    pub findings: Vec<Finding>,
}

impl Report {
    pub fn from_findings(findings: Vec<Finding>) -> Self {
        let summary = Summary {
            errors: findings
                .iter()
                .filter(|f| f.severity == Severity::Error)
                .count(),
            warnings: findings
                .iter()
                .filter(|f| f.severity == Severity::Warning)
                .count(),
        };
        Report { summary, findings }
    }

    /// Generation must not proceed while any error-level finding exists.
    /// Warnings never block.
    pub fn blocking(&self) -> bool {
        self.summary.errors > 0
    }
}

pub fn has_errors(findings: &[Finding]) -> bool {
    findings.iter().any(|f| f.severity == Severity::Error)
}

use anyhow::Result;

use crate::core::{Finding, Severity};

/// The ordered finding list one invocation produced.
///
/// Findings are kept exactly in the order the dispatcher emitted them; the
/// report never re-sorts, so hosts get reproducible output for reproducible
/// input.
#[derive(Debug, Clone, Default)]
pub struct AnalysisReport {
    findings: Vec<Finding>,
}

impl AnalysisReport {
    pub fn new(findings: Vec<Finding>) -> Self {
        Self { findings }
    }

    pub fn findings(&self) -> &[Finding] {
        &self.findings
    }

    pub fn into_findings(self) -> Vec<Finding> {
        self.findings
    }

    pub fn is_empty(&self) -> bool {
        self.findings.is_empty()
    }

    pub fn len(&self) -> usize {
        self.findings.len()
    }

    pub fn count_by_severity(&self) -> SeverityCount {
        let mut count = SeverityCount::default();
        for finding in &self.findings {
            match finding.severity {
                Severity::Error => count.errors += 1,
                Severity::Warning => count.warnings += 1,
            }
        }
        count
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(&self.findings)?)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SeverityCount {
    pub errors: usize,
    pub warnings: usize,
}

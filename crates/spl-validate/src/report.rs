//! Validation report containing all violations for a document.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::issue::{Severity, Subject, Violation};
use crate::policy::ValidationPolicy;

/// Violation count per severity.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SeverityCounts {
    pub reject: usize,
    pub error: usize,
    pub warning: usize,
    pub info: usize,
}

impl SeverityCounts {
    pub fn get(&self, severity: Severity) -> usize {
        match severity {
            Severity::Reject => self.reject,
            Severity::Error => self.error,
            Severity::Warning => self.warning,
            Severity::Info => self.info,
        }
    }

    pub fn total(&self) -> usize {
        self.reject + self.error + self.warning + self.info
    }

    fn add(&mut self, severity: Severity) {
        match severity {
            Severity::Reject => self.reject += 1,
            Severity::Error => self.error += 1,
            Severity::Warning => self.warning += 1,
            Severity::Info => self.info += 1,
        }
    }
}

/// Violations in stable order: kind name, then id, then rule name.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ValidationReport {
    violations: Vec<Violation>,
}

impl ValidationReport {
    pub fn new(mut violations: Vec<Violation>) -> Self {
        violations.sort_by(|a, b| a.sort_key().cmp(&b.sort_key()));
        Self { violations }
    }

    /// Add violations found outside the per-document pass.
    pub fn extend(&mut self, more: impl IntoIterator<Item = Violation>) {
        self.violations.extend(more);
        self.violations.sort_by(|a, b| a.sort_key().cmp(&b.sort_key()));
    }

    pub fn violations(&self) -> &[Violation] {
        &self.violations
    }

    /// Check if the report has any violations.
    pub fn is_empty(&self) -> bool {
        self.violations.is_empty()
    }

    /// Total number of violations.
    pub fn len(&self) -> usize {
        self.violations.len()
    }

    pub fn counts(&self) -> SeverityCounts {
        let mut counts = SeverityCounts::default();
        for violation in &self.violations {
            counts.add(violation.severity);
        }
        counts
    }

    /// Violations that stop downstream processing under `policy`.
    pub fn blocking(&self, policy: &ValidationPolicy) -> Vec<&Violation> {
        self.violations
            .iter()
            .filter(|violation| policy.is_blocking(violation))
            .collect()
    }

    pub fn is_blocked(&self, policy: &ValidationPolicy) -> bool {
        self.violations
            .iter()
            .any(|violation| policy.is_blocking(violation))
    }

    /// Violations grouped by the record they are about.
    pub fn by_subject(&self) -> BTreeMap<Subject, Vec<&Violation>> {
        let mut grouped: BTreeMap<Subject, Vec<&Violation>> = BTreeMap::new();
        for violation in &self.violations {
            grouped.entry(violation.subject).or_default().push(violation);
        }
        grouped
    }

    pub fn for_rule(&self, rule: &str) -> Vec<&Violation> {
        self.violations
            .iter()
            .filter(|violation| violation.rule == rule)
            .collect()
    }

    /// The most severe level present.
    pub fn max_severity(&self) -> Option<Severity> {
        self.violations.iter().map(|violation| violation.severity).min()
    }

    /// Count of violations at `threshold` or more severe.
    pub fn count_at_least(&self, threshold: Severity) -> usize {
        self.violations
            .iter()
            .filter(|violation| violation.severity.is_at_least(threshold))
            .count()
    }
}

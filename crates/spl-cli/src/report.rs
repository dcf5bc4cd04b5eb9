//! Machine-readable batch report.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::Serialize;

use spl_core::{BatchEntry, BatchStatus};
use spl_validate::{Severity, SeverityCounts, Violation};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryStatus {
    Completed,
    Failed,
    Skipped,
}

#[derive(Debug, Serialize)]
pub struct DocumentReport<'a> {
    pub label: &'a str,
    pub status: EntryStatus,
    pub document_id: Option<i64>,
    pub set_guid: Option<&'a str>,
    pub version_number: Option<i32>,
    pub fingerprint: Option<&'a str>,
    pub blocked: bool,
    pub counts: SeverityCounts,
    pub violations: &'a [Violation],
    pub error: Option<String>,
}

impl<'a> DocumentReport<'a> {
    pub fn from_entry(entry: &'a BatchEntry) -> Self {
        let mut report = Self {
            label: &entry.label,
            status: EntryStatus::Skipped,
            document_id: None,
            set_guid: None,
            version_number: None,
            fingerprint: None,
            blocked: false,
            counts: SeverityCounts::default(),
            violations: &[],
            error: None,
        };
        match &entry.status {
            BatchStatus::Completed(outcome) => {
                report.status = EntryStatus::Completed;
                report.document_id = Some(outcome.document.id.0);
                report.set_guid = outcome.document.set_guid.as_deref();
                report.version_number = outcome.document.version_number;
                report.fingerprint = Some(outcome.fingerprint.as_str());
                report.blocked = outcome.blocked;
                report.counts = outcome.report.counts();
                report.violations = outcome.report.violations();
            }
            BatchStatus::Failed(error) => {
                report.status = EntryStatus::Failed;
                report.error = Some(error.to_string());
            }
            BatchStatus::Skipped => {}
        }
        report
    }
}

#[derive(Debug, Serialize)]
pub struct BatchReport<'a> {
    pub completed: usize,
    pub failed: usize,
    pub skipped: usize,
    pub blocked: usize,
    pub totals: SeverityCounts,
    pub documents: Vec<DocumentReport<'a>>,
}

impl<'a> BatchReport<'a> {
    pub fn from_entries(entries: &'a [BatchEntry]) -> Self {
        let documents: Vec<DocumentReport<'a>> =
            entries.iter().map(DocumentReport::from_entry).collect();
        let count = |status: EntryStatus| {
            documents
                .iter()
                .filter(|document| document.status == status)
                .count()
        };
        let mut totals = SeverityCounts::default();
        for document in &documents {
            totals.reject += document.counts.reject;
            totals.error += document.counts.error;
            totals.warning += document.counts.warning;
            totals.info += document.counts.info;
        }
        Self {
            completed: count(EntryStatus::Completed),
            failed: count(EntryStatus::Failed),
            skipped: count(EntryStatus::Skipped),
            blocked: documents.iter().filter(|document| document.blocked).count(),
            totals,
            documents,
        }
    }

    /// Whether the run should exit non-zero.
    ///
    /// Failed or blocked documents always fail the run; `fail_on` adds any
    /// violation at or above that severity.
    pub fn fails(&self, fail_on: Option<Severity>) -> bool {
        if self.failed > 0 || self.blocked > 0 {
            return true;
        }
        fail_on.is_some_and(|threshold| {
            Severity::all()
                .iter()
                .filter(|severity| severity.is_at_least(threshold))
                .any(|severity| self.totals.get(*severity) > 0)
        })
    }
}

pub fn write_report(path: &Path, report: &BatchReport<'_>) -> Result<()> {
    let json = serde_json::to_string_pretty(report).context("serialize report")?;
    fs::write(path, json).with_context(|| format!("write report {}", path.display()))
}

//! Parallel processing of independent document versions.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use rayon::prelude::*;
use tracing::{debug, info};

use spl_model::{EntitySet, Snapshot};
use spl_validate::{ValidationPolicy, version_conflicts};
use spl_vocab::Vocabulary;

use crate::error::PipelineError;
use crate::pipeline::{DocumentOutcome, Pipeline};

/// Cooperative cancellation, checked between documents only.
#[derive(Debug, Clone, Default)]
pub struct CancellationToken(Arc<AtomicBool>);

impl CancellationToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

/// One snapshot to process, with a label for diagnostics (usually its path).
#[derive(Debug, Clone)]
pub struct BatchInput {
    pub label: String,
    pub snapshot: Snapshot,
}

#[derive(Debug)]
pub enum BatchStatus {
    Completed(Box<DocumentOutcome>),
    Failed(PipelineError),
    /// Not started because the batch was cancelled.
    Skipped,
}

#[derive(Debug)]
pub struct BatchEntry {
    pub label: String,
    pub status: BatchStatus,
}

impl BatchEntry {
    pub fn outcome(&self) -> Option<&DocumentOutcome> {
        match &self.status {
            BatchStatus::Completed(outcome) => Some(&**outcome),
            BatchStatus::Failed(_) | BatchStatus::Skipped => None,
        }
    }

    pub fn error(&self) -> Option<&PipelineError> {
        match &self.status {
            BatchStatus::Failed(error) => Some(error),
            BatchStatus::Completed(_) | BatchStatus::Skipped => None,
        }
    }

    pub fn is_skipped(&self) -> bool {
        matches!(self.status, BatchStatus::Skipped)
    }
}

/// Process every input in parallel. See [`process_batch_with`].
pub fn process_batch(
    inputs: Vec<BatchInput>,
    vocabulary: &Vocabulary,
    policy: &ValidationPolicy,
    cancel: &CancellationToken,
) -> Result<Vec<BatchEntry>, PipelineError> {
    process_batch_with(inputs, vocabulary, policy, cancel, |_| {})
}

/// Process every input in parallel, calling `on_entry` as each one finishes.
///
/// Entries come back in input order. The cancellation token is checked before
/// each document starts; documents not yet started are marked skipped. After
/// all documents finish, repeated `(set id, version)` pairs across the batch
/// are added to the reports of the later documents.
///
/// Fails only when the policy is invalid for the standard catalog.
pub fn process_batch_with(
    inputs: Vec<BatchInput>,
    vocabulary: &Vocabulary,
    policy: &ValidationPolicy,
    cancel: &CancellationToken,
    on_entry: impl Fn(&BatchEntry) + Sync,
) -> Result<Vec<BatchEntry>, PipelineError> {
    let pipeline = Pipeline::new(vocabulary, policy.clone())?;
    info!(documents = inputs.len(), "Processing batch");

    let mut entries: Vec<BatchEntry> = inputs
        .into_par_iter()
        .map(|input| {
            let status = if cancel.is_cancelled() {
                debug!(label = %input.label, "Skipping cancelled document");
                BatchStatus::Skipped
            } else {
                match EntitySet::from_snapshot(input.snapshot)
                    .map_err(PipelineError::from)
                    .and_then(|set| pipeline.process(&set))
                {
                    Ok(outcome) => BatchStatus::Completed(Box::new(outcome)),
                    Err(error) => BatchStatus::Failed(error),
                }
            };
            let entry = BatchEntry {
                label: input.label,
                status,
            };
            on_entry(&entry);
            entry
        })
        .collect();

    merge_version_conflicts(&mut entries, pipeline.policy());

    let completed = entries.iter().filter(|entry| entry.outcome().is_some()).count();
    let skipped = entries.iter().filter(|entry| entry.is_skipped()).count();
    info!(
        completed,
        failed = entries.len() - completed - skipped,
        skipped,
        "Finished batch"
    );
    Ok(entries)
}

fn merge_version_conflicts(entries: &mut [BatchEntry], policy: &ValidationPolicy) {
    let conflicts = version_conflicts(
        entries
            .iter()
            .map(|entry| entry.outcome().map(|outcome| &outcome.document)),
    );
    for (position, mut violation) in conflicts {
        let Some(BatchStatus::Completed(outcome)) =
            entries.get_mut(position).map(|entry| &mut entry.status)
        else {
            continue;
        };
        policy.apply(std::slice::from_mut(&mut violation));
        outcome.report.extend([violation]);
        outcome.blocked = outcome.report.is_blocked(policy);
    }
}

//! Snapshot loading at the I/O boundary.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing::debug;

use spl_core::BatchInput;
use spl_model::Snapshot;

pub fn load_snapshot(path: &Path) -> Result<Snapshot> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("read snapshot {}", path.display()))?;
    let snapshot: Snapshot = serde_json::from_str(&text)
        .with_context(|| format!("parse snapshot {}", path.display()))?;
    debug!(
        path = %path.display(),
        records = snapshot.record_count(),
        "Loaded snapshot"
    );
    Ok(snapshot)
}

/// Load every snapshot, labelled by its path. Fails on the first unreadable file.
pub fn load_inputs(paths: &[PathBuf]) -> Result<Vec<BatchInput>> {
    paths
        .iter()
        .map(|path| {
            Ok(BatchInput {
                label: path.display().to_string(),
                snapshot: load_snapshot(path)?,
            })
        })
        .collect()
}

//! Checks spanning several documents of one batch.

use std::collections::BTreeMap;

use spl_model::{Document, EntityKind};

use crate::issue::{Severity, Subject, Violation};
use crate::rules::{Category, RuleInfo};

pub const VERSION_SEQUENCE_RULE: &str = "DocumentVersionSequence";

pub fn version_sequence_rule() -> RuleInfo {
    RuleInfo {
        name: VERSION_SEQUENCE_RULE,
        kind: EntityKind::Document,
        category: Category::Status,
        severity: Severity::Error,
        description: "Versions of one document set are numbered uniquely within a batch",
    }
}

/// Flag every document that repeats a `(set id, version)` pair seen earlier
/// in the batch. `documents` is in input order; entries that could not be
/// loaded are `None`. Returns the input position of each flagged document.
pub fn version_conflicts<'a>(
    documents: impl IntoIterator<Item = Option<&'a Document>>,
) -> Vec<(usize, Violation)> {
    let mut seen: BTreeMap<(&'a str, i32), &'a Document> = BTreeMap::new();
    let mut conflicts = Vec::new();
    for (position, document) in documents.into_iter().enumerate() {
        let Some(document) = document else {
            continue;
        };
        let (Some(set_guid), Some(version)) =
            (document.set_guid.as_deref(), document.version_number)
        else {
            continue;
        };
        match seen.get(&(set_guid, version)) {
            Some(first) => conflicts.push((
                position,
                Violation {
                    subject: Subject::new(EntityKind::Document, document.id.0),
                    rule: VERSION_SEQUENCE_RULE,
                    category: Category::Status,
                    severity: Severity::Error,
                    message: format!(
                        "version {version} of set {set_guid} is also used by document {}",
                        first.id
                    ),
                },
            )),
            None => {
                seen.insert((set_guid, version), document);
            }
        }
    }
    conflicts
}

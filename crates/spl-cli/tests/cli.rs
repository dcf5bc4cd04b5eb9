//! Tests for snapshot loading and the batch report.

use std::fs;
use std::path::PathBuf;

use spl_cli::input::{load_inputs, load_snapshot};
use spl_cli::logging::{LogConfig, LogFormat};
use spl_cli::report::{BatchReport, EntryStatus, write_report};
use spl_core::{BatchInput, CancellationToken, process_batch};
use spl_model::Snapshot;
use spl_model::snapshot::{DocumentRecord, IngredientRecord};
use spl_validate::{Severity, ValidationPolicy};
use spl_vocab::embedded_vocabulary;
use tracing::level_filters::LevelFilter;

fn unique_temp_dir(name: &str) -> PathBuf {
    let mut dir = std::env::temp_dir();
    dir.push(format!(
        "spl-cli-{}-{}-{}",
        name,
        std::process::id(),
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap()
            .as_nanos()
    ));
    fs::create_dir_all(&dir).unwrap();
    dir
}

const SNAPSHOT_JSON: &str = r#"{
  "Documents": [
    {
      "DocumentID": 1,
      "DocumentGUID": "doc-guid",
      "SetGUID": "set-guid",
      "VersionNumber": 3,
      "Title": "Examplin tablets"
    }
  ],
  "StructuredBodies": [{ "StructuredBodyID": 1, "DocumentID": 1 }]
}"#;

fn input(label: &str, document_id: i64) -> BatchInput {
    BatchInput {
        label: label.to_string(),
        snapshot: Snapshot {
            documents: vec![DocumentRecord {
                document_id,
                document_guid: Some(format!("doc-{document_id}")),
                set_guid: Some(format!("set-{document_id}")),
                version_number: Some(1),
                title: Some("Label".to_string()),
                ..Default::default()
            }],
            ..Default::default()
        },
    }
}

fn broken(label: &str) -> BatchInput {
    let mut input = input(label, 9);
    input.snapshot.ingredients.push(IngredientRecord {
        ingredient_id: 1,
        product_id: 42,
        ..Default::default()
    });
    input
}

fn run(inputs: Vec<BatchInput>, cancel: &CancellationToken) -> Vec<spl_core::BatchEntry> {
    let vocabulary = embedded_vocabulary().expect("vocabulary");
    process_batch(inputs, vocabulary, &ValidationPolicy::default(), cancel).expect("batch")
}

// --- input tests ---

#[test]
fn snapshot_file_uses_source_column_names() {
    let dir = unique_temp_dir("load");
    let path = dir.join("label.json");
    fs::write(&path, SNAPSHOT_JSON).unwrap();

    let snapshot = load_snapshot(&path).expect("snapshot");
    assert_eq!(snapshot.record_count(), 2);
    let document = &snapshot.documents[0];
    assert_eq!(document.document_id, 1);
    assert_eq!(document.set_guid.as_deref(), Some("set-guid"));
    assert_eq!(document.version_number, Some(3));
    assert_eq!(snapshot.structured_bodies[0].document_id, Some(1));
}

#[test]
fn inputs_are_labelled_by_path() {
    let dir = unique_temp_dir("label");
    let path = dir.join("first.json");
    fs::write(&path, SNAPSHOT_JSON).unwrap();

    let inputs = load_inputs(std::slice::from_ref(&path)).expect("inputs");
    assert_eq!(inputs.len(), 1);
    assert_eq!(inputs[0].label, path.display().to_string());
}

#[test]
fn malformed_snapshot_names_the_file() {
    let dir = unique_temp_dir("malformed");
    let path = dir.join("bad.json");
    fs::write(&path, "{ \"Documents\": 3 }").unwrap();

    let error = load_snapshot(&path).unwrap_err();
    assert!(format!("{error:#}").contains("bad.json"));
}

#[test]
fn missing_snapshot_is_an_error() {
    let dir = unique_temp_dir("missing");
    assert!(load_inputs(&[dir.join("absent.json")]).is_err());
}

// --- report tests ---

#[test]
fn report_counts_each_status() {
    let entries = run(
        vec![input("a", 1), broken("b"), input("c", 3)],
        &CancellationToken::new(),
    );
    let report = BatchReport::from_entries(&entries);

    assert_eq!(report.completed, 2);
    assert_eq!(report.failed, 1);
    assert_eq!(report.skipped, 0);
    let statuses: Vec<EntryStatus> = report.documents.iter().map(|d| d.status).collect();
    assert_eq!(
        statuses,
        vec![
            EntryStatus::Completed,
            EntryStatus::Failed,
            EntryStatus::Completed
        ]
    );
    assert!(report.documents[1].error.is_some());
    assert_eq!(report.documents[0].document_id, Some(1));
    assert_eq!(report.documents[0].fingerprint.map(str::len), Some(64));
}

#[test]
fn totals_sum_document_counts() {
    let entries = run(vec![input("a", 1), input("b", 2)], &CancellationToken::new());
    let report = BatchReport::from_entries(&entries);

    let summed: usize = report
        .documents
        .iter()
        .map(|document| document.counts.total())
        .sum();
    assert_eq!(report.totals.total(), summed);
    assert_eq!(
        report.totals.total(),
        report
            .documents
            .iter()
            .map(|document| document.violations.len())
            .sum::<usize>()
    );
}

#[test]
fn failed_documents_fail_the_run() {
    let entries = run(vec![input("a", 1), broken("b")], &CancellationToken::new());
    let report = BatchReport::from_entries(&entries);
    assert!(report.fails(None));
}

#[test]
fn threshold_decides_whether_violations_fail_the_run() {
    let entries = run(vec![input("a", 1)], &CancellationToken::new());
    let report = BatchReport::from_entries(&entries);

    assert!(!report.fails(None));
    assert_eq!(report.fails(Some(Severity::Info)), report.totals.total() > 0);
    assert_eq!(report.fails(Some(Severity::Reject)), report.totals.reject > 0);
}

#[test]
fn skipped_documents_serialize_without_outputs() {
    let cancel = CancellationToken::new();
    cancel.cancel();
    let entries = run(vec![input("skipped.json", 1)], &cancel);
    let report = BatchReport::from_entries(&entries);

    assert_eq!(report.skipped, 1);
    assert!(!report.fails(Some(Severity::Info)));
    insta::assert_json_snapshot!(report.documents[0], @r#"
    {
      "label": "skipped.json",
      "status": "skipped",
      "document_id": null,
      "set_guid": null,
      "version_number": null,
      "fingerprint": null,
      "blocked": false,
      "counts": {
        "reject": 0,
        "error": 0,
        "warning": 0,
        "info": 0
      },
      "violations": [],
      "error": null
    }
    "#);
}

#[test]
fn report_is_written_as_json() {
    let dir = unique_temp_dir("write");
    let path = dir.join("report.json");
    let entries = run(vec![input("a", 1)], &CancellationToken::new());
    let report = BatchReport::from_entries(&entries);

    write_report(&path, &report).expect("write");
    let value: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
    assert_eq!(value["completed"], 1);
    assert_eq!(value["documents"][0]["label"], "a");
    assert_eq!(value["documents"][0]["status"], "completed");
}

// --- logging tests ---

#[test]
fn directive_raises_engine_crates_only() {
    let config = LogConfig::default().with_level_filter(LevelFilter::DEBUG);
    let directive = config.directive();

    assert!(directive.starts_with("warn,"));
    assert!(directive.contains("spl_core=debug"));
    assert!(directive.contains("spl_validate=debug"));
    assert!(!directive.contains("rayon"));
}

#[test]
fn default_config_warns_to_stderr() {
    let config = LogConfig::default();
    assert_eq!(config.level_filter, LevelFilter::WARN);
    assert_eq!(config.format, LogFormat::Pretty);
    assert!(config.use_env_filter);
    assert!(config.log_file.is_none());
}

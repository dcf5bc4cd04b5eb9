//! Tests for severity policy, blocking and cross-document checks.

use std::fs;
use std::path::PathBuf;

use spl_hierarchy::DocumentHierarchies;
use spl_model::snapshot::DocumentRecord;
use spl_model::{EntityKind, EntitySet, Snapshot};
use spl_validate::{
    PolicyError, RuleContext, RuleRegistry, Severity, Subject, VERSION_SEQUENCE_RULE,
    ValidationPolicy, ValidationReport, Validator, version_conflicts,
};
use spl_vocab::embedded_vocabulary;

fn unique_temp_dir(name: &str) -> PathBuf {
    let mut dir = std::env::temp_dir();
    dir.push(format!(
        "spl-validate-{}-{}-{}",
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

fn document(set_guid: Option<&str>) -> DocumentRecord {
    DocumentRecord {
        document_id: 1,
        document_guid: Some("doc-guid".to_string()),
        set_guid: set_guid.map(str::to_string),
        version_number: Some(1),
        effective_time: Some("20240301".to_string()),
        ..Default::default()
    }
}

fn validate_with(record: DocumentRecord, policy: ValidationPolicy) -> ValidationReport {
    let set = EntitySet::from_snapshot(Snapshot {
        documents: vec![record],
        ..Default::default()
    })
    .expect("entity set");
    let hierarchies = DocumentHierarchies::assemble(&set).expect("hierarchies");
    let vocabulary = embedded_vocabulary().expect("vocabulary");
    let validator =
        Validator::new(RuleRegistry::standard().expect("registry"), policy).expect("validator");
    validator.validate(&RuleContext::new(&set, &hierarchies, vocabulary))
}

// --- default policy tests ---

#[test]
fn default_policy_blocks_only_on_reject() {
    let policy = ValidationPolicy::default();

    let report = validate_with(document(Some("set-guid")), policy.clone());
    assert!(!report.is_empty());
    assert!(!report.is_blocked(&policy));

    let report = validate_with(document(None), policy.clone());
    let blocking: Vec<_> = report
        .blocking(&policy)
        .iter()
        .map(|violation| violation.rule)
        .collect();
    assert_eq!(blocking, vec!["DocumentSetIdRequired"]);
    assert_eq!(report.max_severity(), Some(Severity::Reject));
}

#[test]
fn counts_and_subject_grouping_agree() {
    let report = validate_with(document(None), ValidationPolicy::default());
    let counts = report.counts();
    assert_eq!(counts.total(), report.len());
    assert_eq!(counts.get(Severity::Reject), 1);

    let grouped = report.by_subject();
    let document_violations = &grouped[&Subject::new(EntityKind::Document, 1)];
    assert_eq!(document_violations.len(), report.len());
}

// --- TOML policy tests ---

#[test]
fn severity_override_changes_reported_severity() {
    let policy = ValidationPolicy::from_toml_str(
        r#"
        [severity]
        DocumentTitleRequired = "info"
        "#,
    )
    .expect("policy");

    let report = validate_with(document(Some("set-guid")), policy);
    let title = report.for_rule("DocumentTitleRequired");
    assert_eq!(title.len(), 1);
    assert_eq!(title[0].severity, Severity::Info);
}

#[test]
fn reject_list_blocks_regardless_of_severity() {
    let policy =
        ValidationPolicy::from_toml_str(r#"reject = ["DocumentTitleRequired"]"#).expect("policy");

    let report = validate_with(document(Some("set-guid")), policy.clone());
    assert!(report.is_blocked(&policy));
    assert_eq!(report.blocking(&policy)[0].rule, "DocumentTitleRequired");
}

#[test]
fn severity_can_be_raised_to_reject() {
    let policy = ValidationPolicy::from_toml_str(
        r#"
        [severity]
        DocumentTitleRequired = "reject"
        "#,
    )
    .expect("policy");

    let report = validate_with(document(Some("set-guid")), policy.clone());
    assert!(report.is_blocked(&policy));
}

#[test]
fn unknown_rule_in_policy_is_rejected() {
    let policy = ValidationPolicy::from_toml_str(r#"reject = ["NoSuchRule"]"#).expect("policy");
    let err = Validator::new(RuleRegistry::standard().expect("registry"), policy)
        .expect_err("unknown rule");
    assert!(matches!(err, PolicyError::UnknownRule { ref name } if name == "NoSuchRule"));
}

#[test]
fn cross_document_rule_may_appear_in_policy() {
    let policy = ValidationPolicy::from_toml_str(&format!("reject = [\"{VERSION_SEQUENCE_RULE}\"]"))
        .expect("policy");
    assert!(Validator::new(RuleRegistry::standard().expect("registry"), policy).is_ok());
}

#[test]
fn unknown_policy_key_is_a_parse_error() {
    let err = ValidationPolicy::from_toml_str("block = []").expect_err("unknown key");
    assert!(matches!(err, PolicyError::Parse { .. }));

    let err = ValidationPolicy::from_toml_str("[severity]\nDocumentTitleRequired = \"fatal\"")
        .expect_err("unknown severity");
    assert!(matches!(err, PolicyError::Parse { .. }));
}

#[test]
fn policy_loads_from_file() {
    let dir = unique_temp_dir("policy");
    let path = dir.join("policy.toml");
    fs::write(&path, "[severity]\nDocumentTitleRequired = \"warning\"\n").unwrap();

    let policy = ValidationPolicy::from_path(&path).expect("policy");
    assert_eq!(
        policy.severity_for("DocumentTitleRequired", Severity::Error),
        Severity::Warning
    );
    assert_eq!(
        policy.severity_for("DocumentCodeComplete", Severity::Error),
        Severity::Error
    );

    let err = ValidationPolicy::from_path(&dir.join("missing.toml")).expect_err("missing");
    assert!(matches!(err, PolicyError::Io { .. }));
}

// --- cross-document tests ---

#[test]
fn repeated_version_is_flagged_on_the_later_document() {
    let build = |id: i64, set_guid: &str, version: i32| {
        spl_model::Document::from_record(DocumentRecord {
            document_id: id,
            set_guid: Some(set_guid.to_string()),
            version_number: Some(version),
            ..Default::default()
        })
    };
    let first = build(1, "set-a", 1);
    let second = build(2, "set-a", 2);
    let repeat = build(3, "set-a", 1);
    let other_set = build(4, "set-b", 1);

    let conflicts = version_conflicts([
        Some(&first),
        None,
        Some(&second),
        Some(&repeat),
        Some(&other_set),
    ]);
    assert_eq!(conflicts.len(), 1);
    let (position, violation) = &conflicts[0];
    assert_eq!(*position, 3);
    assert_eq!(violation.subject, Subject::new(EntityKind::Document, 3));
    assert_eq!(violation.rule, VERSION_SEQUENCE_RULE);
    assert_eq!(
        violation.message,
        "version 1 of set set-a is also used by document 1"
    );
}

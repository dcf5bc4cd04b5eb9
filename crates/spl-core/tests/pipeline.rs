//! Tests for single-document processing.

use spl_core::{Pipeline, PipelineError, process_document};
use spl_model::snapshot::{
    DocumentRecord, IngredientRecord, ProductRecord, SectionHierarchyRecord, SectionRecord,
    StructuredBodyRecord,
};
use spl_model::{
    ContractError, EntityKind, EntitySet, HierarchyKind, Snapshot, StructuralError,
};
use spl_validate::{PolicyError, ValidationPolicy};
use spl_vocab::embedded_vocabulary;

fn document(set_guid: Option<&str>) -> DocumentRecord {
    DocumentRecord {
        document_id: 1,
        document_guid: Some("doc-guid".to_string()),
        set_guid: set_guid.map(str::to_string),
        version_number: Some(1),
        title: Some("Label".to_string()),
        effective_time: Some("20240301".to_string()),
        ..Default::default()
    }
}

fn snapshot() -> Snapshot {
    Snapshot {
        documents: vec![document(Some("set-guid"))],
        structured_bodies: vec![StructuredBodyRecord {
            structured_body_id: 1,
            document_id: Some(1),
        }],
        sections: vec![
            SectionRecord {
                section_id: 10,
                structured_body_id: Some(1),
                title: Some("Indications".to_string()),
                ..Default::default()
            },
            SectionRecord {
                section_id: 11,
                title: Some("Pediatric use".to_string()),
                ..Default::default()
            },
        ],
        section_hierarchies: vec![SectionHierarchyRecord {
            section_hierarchy_id: 1,
            parent_section_id: 10,
            child_section_id: 11,
            sequence_number: Some(1),
        }],
        products: vec![ProductRecord {
            product_id: 5,
            section_id: Some(10),
            product_name: Some("Examplin".to_string()),
            ..Default::default()
        }],
        ..Default::default()
    }
}

fn process(snapshot: Snapshot) -> Result<spl_core::DocumentOutcome, PipelineError> {
    let set = EntitySet::from_snapshot(snapshot).expect("entity set");
    let vocabulary = embedded_vocabulary().expect("vocabulary");
    process_document(&set, vocabulary, &ValidationPolicy::default())
}

// --- outcome tests ---

#[test]
fn valid_document_produces_every_output() {
    let outcome = process(snapshot()).expect("outcome");
    assert_eq!(outcome.document.id.0, 1);
    assert_eq!(outcome.render.sections.len(), 2);
    assert_eq!(outcome.hierarchies.sections.hierarchy.node_count(), 2);
    assert!(!outcome.report.is_empty());
    assert!(!outcome.blocked);
    assert_eq!(outcome.fingerprint.len(), 64);
    assert!(outcome.fingerprint.chars().all(|c| c.is_ascii_hexdigit()));
}

#[test]
fn fingerprint_is_stable_across_runs() {
    let first = process(snapshot()).expect("first");
    let second = process(snapshot()).expect("second");
    assert_eq!(first.fingerprint, second.fingerprint);
    assert_eq!(first.report, second.report);
}

#[test]
fn fingerprint_changes_with_structure() {
    let mut changed = snapshot();
    changed.section_hierarchies.clear();
    let original = process(snapshot()).expect("original");
    let changed = process(changed).expect("changed");
    assert_ne!(original.fingerprint, changed.fingerprint);
}

#[test]
fn missing_primary_identifier_blocks_the_document() {
    let mut snapshot = snapshot();
    snapshot.documents = vec![document(None)];
    let outcome = process(snapshot).expect("outcome");
    assert!(outcome.blocked);
}

#[test]
fn pipeline_is_reusable_across_documents() {
    let vocabulary = embedded_vocabulary().expect("vocabulary");
    let pipeline = Pipeline::new(vocabulary, ValidationPolicy::default()).expect("pipeline");
    let set = EntitySet::from_snapshot(snapshot()).expect("entity set");
    let first = pipeline.process(&set).expect("first");
    let second = pipeline.process(&set).expect("second");
    assert_eq!(first.render, second.render);
}

// --- failure tests ---

#[test]
fn dangling_reference_rejects_the_document() {
    let mut snapshot = snapshot();
    snapshot.ingredients.push(IngredientRecord {
        ingredient_id: 7,
        product_id: 999,
        ..Default::default()
    });
    let err = process(snapshot).expect_err("dangling reference");
    assert!(err.is_structural());
    assert!(matches!(
        err,
        PipelineError::Structural(StructuralError::DanglingReference {
            kind: EntityKind::Ingredient,
            id: 7,
            target: EntityKind::Product,
            target_id: 999,
            ..
        })
    ));
}

#[test]
fn section_cycle_rejects_the_document() {
    let mut snapshot = snapshot();
    snapshot.section_hierarchies.push(SectionHierarchyRecord {
        section_hierarchy_id: 2,
        parent_section_id: 11,
        child_section_id: 10,
        sequence_number: Some(1),
    });
    let err = process(snapshot).expect_err("cycle");
    assert!(matches!(
        err,
        PipelineError::Structural(StructuralError::CycleDetected {
            hierarchy: HierarchyKind::Section,
            ..
        })
    ));
}

#[test]
fn missing_document_is_a_contract_error() {
    let mut snapshot = snapshot();
    snapshot.documents.clear();
    let err = process(snapshot).expect_err("no document");
    assert!(!err.is_structural());
    assert!(matches!(
        err,
        PipelineError::Contract(ContractError::DocumentCount { found: 0 })
    ));
}

#[test]
fn unknown_policy_rule_fails_pipeline_setup() {
    let vocabulary = embedded_vocabulary().expect("vocabulary");
    let policy = ValidationPolicy::from_toml_str(r#"reject = ["NoSuchRule"]"#).expect("policy");
    let err = Pipeline::new(vocabulary, policy).expect_err("unknown rule");
    assert!(matches!(
        err,
        PipelineError::Policy(PolicyError::UnknownRule { .. })
    ));
}

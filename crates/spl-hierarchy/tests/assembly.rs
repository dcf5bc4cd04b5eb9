//! Tests for the generic assembler and the document dimensions.

use spl_hierarchy::{DocumentHierarchies, EdgeSpec, Hierarchy, Link, Shape, Visit};
use spl_model::snapshot::{
    LotHierarchyRecord, ProductInstanceRecord, SectionHierarchyRecord, SectionRecord,
    SectionTextContentRecord, StructuredBodyRecord,
};
use spl_model::{
    EntityKind, EntitySet, HierarchyKind, ProductInstanceId, SectionId, SectionTextContentId,
    Snapshot, StructuralError, StructuredBodyId,
};

fn edge(edge_id: i64, parent: i64, child: i64, sequence: Option<i32>) -> EdgeSpec<SectionId> {
    EdgeSpec {
        edge_id,
        parent: SectionId(parent),
        child: SectionId(child),
        sequence,
    }
}

fn sections(ids: &[i64]) -> Vec<SectionId> {
    ids.iter().copied().map(SectionId).collect()
}

fn visit(id: i64, depth: usize, parent: Option<i64>) -> Visit<SectionId> {
    Visit {
        id: SectionId(id),
        depth,
        parent: parent.map(SectionId),
    }
}

fn assemble(
    shape: Shape,
    nodes: &[i64],
    edges: Vec<EdgeSpec<SectionId>>,
) -> Result<Hierarchy<SectionId>, StructuralError> {
    Hierarchy::assemble(HierarchyKind::Section, shape, sections(nodes), edges)
}

// --- ordering tests ---

#[test]
fn siblings_sort_by_sequence_then_id() {
    // P=1, A=2, B=3, C=4
    let hierarchy = assemble(
        Shape::Forest,
        &[1, 2, 3, 4],
        vec![edge(1, 1, 2, Some(2)), edge(2, 1, 4, Some(1)), edge(3, 1, 3, Some(1))],
    )
    .expect("hierarchy");
    assert_eq!(hierarchy.child_ids(SectionId(1)), sections(&[3, 4, 2]));
    assert_eq!(hierarchy.roots(), &[SectionId(1)]);
}

#[test]
fn unnumbered_siblings_sort_last() {
    let hierarchy = assemble(
        Shape::Forest,
        &[1, 2, 3, 4],
        vec![edge(1, 1, 2, None), edge(2, 1, 3, Some(9)), edge(3, 1, 4, None)],
    )
    .expect("hierarchy");
    assert_eq!(hierarchy.child_ids(SectionId(1)), sections(&[3, 2, 4]));
}

#[test]
fn duplicate_edges_collapse_to_lowest_sequence() {
    let hierarchy = assemble(
        Shape::Forest,
        &[1, 2, 3],
        vec![edge(1, 1, 2, Some(5)), edge(2, 1, 2, Some(1)), edge(3, 1, 3, Some(3))],
    )
    .expect("hierarchy");
    assert_eq!(
        hierarchy.children(SectionId(1)),
        &[
            Link {
                id: SectionId(2),
                sequence: Some(1)
            },
            Link {
                id: SectionId(3),
                sequence: Some(3)
            },
        ]
    );
    assert_eq!(hierarchy.edge_count(), 2);
}

#[test]
fn roots_are_ascending_and_include_isolated_nodes() {
    let hierarchy = assemble(Shape::Forest, &[9, 5, 7], vec![edge(1, 9, 7, None)])
        .expect("hierarchy");
    assert_eq!(hierarchy.roots(), &sections(&[5, 9])[..]);
}

#[test]
fn input_order_does_not_change_output() {
    let edges = vec![
        edge(1, 1, 2, Some(2)),
        edge(2, 1, 3, Some(1)),
        edge(3, 3, 4, None),
    ];
    let mut reversed = edges.clone();
    reversed.reverse();
    let a = assemble(Shape::Forest, &[1, 2, 3, 4], edges).expect("hierarchy");
    let b = assemble(Shape::Forest, &[4, 3, 2, 1], reversed).expect("hierarchy");
    assert_eq!(a, b);
}

// --- view tests ---

#[test]
fn preorder_reports_depth_and_parent() {
    let hierarchy = assemble(
        Shape::Forest,
        &[1, 2, 3, 4, 5],
        vec![edge(1, 1, 2, Some(1)), edge(2, 2, 3, Some(1)), edge(3, 1, 4, Some(2))],
    )
    .expect("hierarchy");
    let visits = hierarchy.preorder();
    assert_eq!(
        visits,
        vec![
            Visit {
                id: SectionId(1),
                depth: 0,
                parent: None
            },
            Visit {
                id: SectionId(2),
                depth: 1,
                parent: Some(SectionId(1))
            },
            Visit {
                id: SectionId(3),
                depth: 2,
                parent: Some(SectionId(2))
            },
            Visit {
                id: SectionId(4),
                depth: 1,
                parent: Some(SectionId(1))
            },
            Visit {
                id: SectionId(5),
                depth: 0,
                parent: None
            },
        ]
    );
    assert_eq!(hierarchy.depth_of(SectionId(3)), Some(2));
    assert_eq!(hierarchy.depth_of(SectionId(42)), None);
    assert_eq!(hierarchy.descendants(SectionId(1)), sections(&[2, 3, 4]));
    assert_eq!(hierarchy.ancestors(SectionId(3)), sections(&[2, 1]));
    assert_eq!(hierarchy.preorder_from(SectionId(2)).len(), 2);
}

// --- structural error tests ---

#[test]
fn dangling_child_names_edge_record() {
    let err = assemble(Shape::Forest, &[1], vec![edge(7, 1, 99, None)]).unwrap_err();
    assert_eq!(
        err,
        StructuralError::DanglingReference {
            kind: EntityKind::SectionHierarchy,
            id: 7,
            field: "ChildSectionID",
            target: EntityKind::Section,
            target_id: 99,
        }
    );
}

#[test]
fn cycle_is_detected_not_truncated() {
    let err = assemble(
        Shape::Forest,
        &[1, 2, 3],
        vec![edge(1, 1, 2, None), edge(2, 2, 3, None), edge(3, 3, 1, None)],
    )
    .unwrap_err();
    assert_eq!(
        err,
        StructuralError::CycleDetected {
            hierarchy: HierarchyKind::Section,
            node: 1
        }
    );
}

#[test]
fn self_loop_is_a_cycle() {
    let err = assemble(Shape::Dag, &[1], vec![edge(1, 1, 1, None)]).unwrap_err();
    assert!(matches!(err, StructuralError::CycleDetected { node: 1, .. }));
}

#[test]
fn forest_rejects_second_parent() {
    let err = assemble(
        Shape::Forest,
        &[1, 2, 3],
        vec![edge(1, 2, 3, None), edge(2, 1, 3, None)],
    )
    .unwrap_err();
    assert_eq!(
        err,
        StructuralError::MultipleParents {
            hierarchy: HierarchyKind::Section,
            child: 3,
            first: 1,
            second: 2
        }
    );
}

#[test]
fn dag_keeps_every_parent() {
    let hierarchy = assemble(
        Shape::Dag,
        &[1, 2, 3, 4],
        vec![edge(1, 2, 3, None), edge(2, 1, 3, None), edge(3, 3, 4, None)],
    )
    .expect("hierarchy");
    assert_eq!(hierarchy.parents(SectionId(3)), &sections(&[1, 2])[..]);
    assert_eq!(hierarchy.ancestors(SectionId(4)), sections(&[3, 1, 2]));
    assert_eq!(hierarchy.depth_of(SectionId(4)), Some(2));
    let visited: Vec<i64> = hierarchy.preorder().iter().map(|visit| visit.id.0).collect();
    assert_eq!(visited, vec![1, 3, 4, 2]);
}

#[test]
fn shared_node_is_visited_once_under_its_first_path() {
    // 1 -> {2, 3} -> 4 -> 5
    let hierarchy = assemble(
        Shape::Dag,
        &[1, 2, 3, 4, 5],
        vec![
            edge(1, 1, 2, Some(1)),
            edge(2, 1, 3, Some(2)),
            edge(3, 2, 4, None),
            edge(4, 3, 4, None),
            edge(5, 4, 5, None),
        ],
    )
    .expect("hierarchy");

    assert_eq!(
        hierarchy.preorder(),
        vec![
            visit(1, 0, None),
            visit(2, 1, Some(1)),
            visit(4, 2, Some(2)),
            visit(5, 3, Some(4)),
            visit(3, 1, Some(1)),
        ]
    );
    assert_eq!(hierarchy.parents(SectionId(4)), &sections(&[2, 3])[..]);
    assert_eq!(hierarchy.preorder_from(SectionId(3)).len(), 3);
}

#[test]
fn stacked_diamonds_visit_each_node_once() {
    // 40 layers of two nodes, each layer fully linked to the next
    const LAYERS: i64 = 40;
    let nodes: Vec<i64> = (0..LAYERS * 2).collect();
    let mut edges = Vec::new();
    for layer in 0..LAYERS - 1 {
        for from in [layer * 2, layer * 2 + 1] {
            for to in [layer * 2 + 2, layer * 2 + 3] {
                edges.push(edge(edges.len() as i64 + 1, from, to, None));
            }
        }
    }
    let hierarchy = assemble(Shape::Dag, &nodes, edges).expect("hierarchy");

    let visits = hierarchy.preorder();
    assert_eq!(visits.len(), hierarchy.node_count());
    let mut ids: Vec<i64> = visits.iter().map(|visit| visit.id.0).collect();
    ids.sort_unstable();
    assert_eq!(ids, nodes);
    assert_eq!(hierarchy.preorder_from(SectionId(0)).len(), (LAYERS * 2 - 1) as usize);
    assert_eq!(hierarchy.descendants(SectionId(0)).len(), (LAYERS * 2 - 2) as usize);
}

// --- document dimension tests ---

fn document_snapshot() -> Snapshot {
    Snapshot {
        structured_bodies: vec![StructuredBodyRecord {
            structured_body_id: 1,
            document_id: None,
        }],
        sections: vec![
            SectionRecord {
                section_id: 10,
                structured_body_id: Some(1),
                ..Default::default()
            },
            SectionRecord {
                section_id: 11,
                ..Default::default()
            },
            SectionRecord {
                section_id: 12,
                ..Default::default()
            },
        ],
        section_hierarchies: vec![SectionHierarchyRecord {
            section_hierarchy_id: 1,
            parent_section_id: 10,
            child_section_id: 11,
            sequence_number: Some(1),
        }],
        section_text_contents: vec![
            SectionTextContentRecord {
                section_text_content_id: 100,
                section_id: 10,
                sequence_number: Some(2),
                ..Default::default()
            },
            SectionTextContentRecord {
                section_text_content_id: 101,
                section_id: 10,
                sequence_number: Some(1),
                ..Default::default()
            },
            SectionTextContentRecord {
                section_text_content_id: 102,
                section_id: 10,
                parent_section_text_content_id: Some(100),
                sequence_number: Some(1),
                ..Default::default()
            },
        ],
        product_instances: vec![
            ProductInstanceRecord {
                product_instance_id: 1,
                instance_kind: Some("BulkLot".to_string()),
                ..Default::default()
            },
            ProductInstanceRecord {
                product_instance_id: 2,
                instance_kind: Some("BulkLot".to_string()),
                ..Default::default()
            },
            ProductInstanceRecord {
                product_instance_id: 3,
                instance_kind: Some("FillLot".to_string()),
                ..Default::default()
            },
        ],
        lot_hierarchies: vec![
            LotHierarchyRecord {
                lot_hierarchy_id: 1,
                parent_instance_id: 1,
                child_instance_id: 3,
                sequence_number: None,
            },
            LotHierarchyRecord {
                lot_hierarchy_id: 2,
                parent_instance_id: 2,
                child_instance_id: 3,
                sequence_number: None,
            },
        ],
        ..Default::default()
    }
}

#[test]
fn section_roots_split_by_owner() {
    let set = EntitySet::from_snapshot(document_snapshot()).expect("entity set");
    let hierarchies = DocumentHierarchies::assemble(&set).expect("hierarchies");
    let sections = &hierarchies.sections;
    assert_eq!(
        sections.body_roots.get(&StructuredBodyId(1)),
        Some(&vec![SectionId(10)])
    );
    assert_eq!(sections.standalone_roots, vec![SectionId(12)]);
    assert!(sections.is_standalone(SectionId(12)));
    assert_eq!(sections.ordered_roots(), vec![SectionId(10), SectionId(12)]);
}

#[test]
fn content_roots_follow_block_sequence() {
    let set = EntitySet::from_snapshot(document_snapshot()).expect("entity set");
    let hierarchies = DocumentHierarchies::assemble(&set).expect("hierarchies");
    assert_eq!(
        hierarchies.content.roots_of(SectionId(10)),
        &[SectionTextContentId(101), SectionTextContentId(100)]
    );
    assert_eq!(
        hierarchies
            .content
            .hierarchy
            .child_ids(SectionTextContentId(100)),
        vec![SectionTextContentId(102)]
    );
    assert!(hierarchies.content.roots_of(SectionId(11)).is_empty());
}

#[test]
fn lot_genealogy_keeps_both_bulk_parents() {
    let set = EntitySet::from_snapshot(document_snapshot()).expect("entity set");
    let hierarchies = DocumentHierarchies::assemble(&set).expect("hierarchies");
    assert_eq!(
        hierarchies.lots.parents(ProductInstanceId(3)),
        &[ProductInstanceId(1), ProductInstanceId(2)]
    );
    assert_eq!(
        hierarchies.lots.child_ids(ProductInstanceId(2)),
        vec![ProductInstanceId(3)]
    );
}

#[test]
fn content_parent_pointing_nowhere_is_structural() {
    let mut snapshot = document_snapshot();
    snapshot.section_text_contents.push(SectionTextContentRecord {
        section_text_content_id: 103,
        section_id: 10,
        parent_section_text_content_id: Some(555),
        ..Default::default()
    });
    let set = EntitySet::from_snapshot(snapshot).expect("entity set");
    let err = DocumentHierarchies::assemble(&set).unwrap_err();
    assert_eq!(
        err,
        StructuralError::DanglingReference {
            kind: EntityKind::SectionTextContent,
            id: 103,
            field: "ParentSectionTextContentID",
            target: EntityKind::SectionTextContent,
            target_id: 555,
        }
    );
}

#[test]
fn assembling_twice_serializes_identically() {
    let set = EntitySet::from_snapshot(document_snapshot()).expect("entity set");
    let first = DocumentHierarchies::assemble(&set).expect("hierarchies");
    let second = DocumentHierarchies::assemble(&set).expect("hierarchies");
    assert_eq!(first, second);
    assert_eq!(
        serde_json::to_string(&first).unwrap(),
        serde_json::to_string(&second).unwrap()
    );
}

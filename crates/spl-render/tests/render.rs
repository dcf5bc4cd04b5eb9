//! Tests for the rendering-context builder.

use spl_hierarchy::DocumentHierarchies;
use spl_model::snapshot::{
    CharacteristicRecord, DocumentRecord, IdentifiedSubstanceRecord, IngredientRecord,
    LotHierarchyRecord, PackagingHierarchyRecord, PackagingLevelRecord,
    PharmacologicClassHierarchyRecord, PharmacologicClassRecord, ProductInstanceRecord,
    ProductRecord, RouteOfAdministrationRecord, SectionHierarchyRecord, SectionRecord,
    SectionTextContentRecord, StructuredBodyRecord,
};
use spl_model::{
    Characteristic, ContractError, EntitySet, IngredientId, PackagingLevelId,
    PharmacologicClassId, ProductId, ProductInstanceId, SectionId, SectionTextContentId,
    Snapshot,
};
use spl_render::{CharacteristicRenderContext, DocumentRenderContext, RenderContextBuilder};

fn section(id: i64, body: Option<i64>, title: &str) -> SectionRecord {
    SectionRecord {
        section_id: id,
        structured_body_id: body,
        title: Some(title.to_string()),
        ..Default::default()
    }
}

fn section_edge(id: i64, parent: i64, child: i64, sequence: i32) -> SectionHierarchyRecord {
    SectionHierarchyRecord {
        section_hierarchy_id: id,
        parent_section_id: parent,
        child_section_id: child,
        sequence_number: Some(sequence),
    }
}

fn block(
    id: i64,
    parent: Option<i64>,
    sequence: i32,
    content_type: &str,
    text: Option<&str>,
) -> SectionTextContentRecord {
    SectionTextContentRecord {
        section_text_content_id: id,
        section_id: 10,
        parent_section_text_content_id: parent,
        content_type: Some(content_type.to_string()),
        sequence_number: Some(sequence),
        content_text: text.map(str::to_string),
        ..Default::default()
    }
}

fn ingredient(id: i64, class: &str, sequence: i32) -> IngredientRecord {
    IngredientRecord {
        ingredient_id: id,
        product_id: 5,
        identified_substance_id: Some(90),
        class_code: Some(class.to_string()),
        quantity_numerator_value: Some(10.0),
        quantity_numerator_unit: Some("mg".to_string()),
        quantity_denominator_value: Some(1.0),
        quantity_denominator_unit: Some("1".to_string()),
        sequence_number: Some(sequence),
    }
}

fn packaging_level(id: i64, product: Option<i64>) -> PackagingLevelRecord {
    PackagingLevelRecord {
        packaging_level_id: id,
        product_id: product,
        ..Default::default()
    }
}

fn lot(id: i64, kind: &str) -> ProductInstanceRecord {
    ProductInstanceRecord {
        product_instance_id: id,
        product_id: Some(5),
        instance_kind: Some(kind.to_string()),
        lot_number: Some(format!("LOT-{id}")),
        ..Default::default()
    }
}

/// Two body sections, a nested pair under the second, one standalone section,
/// and a product with ingredients, packaging, lots and a characteristic.
fn fixture() -> Snapshot {
    Snapshot {
        documents: vec![DocumentRecord {
            document_id: 1,
            set_guid: Some("set-guid".to_string()),
            version_number: Some(2),
            title: Some("Label".to_string()),
            ..Default::default()
        }],
        structured_bodies: vec![StructuredBodyRecord {
            structured_body_id: 1,
            document_id: Some(1),
        }],
        sections: vec![
            section(10, Some(1), "Indications"),
            section(20, Some(1), "Dosage"),
            section(21, None, "Adults"),
            section(22, None, "Children"),
            section(30, None, "Package label"),
        ],
        section_hierarchies: vec![section_edge(1, 20, 21, 2), section_edge(2, 20, 22, 1)],
        section_text_contents: vec![
            block(100, None, 2, "paragraph", Some("Second")),
            block(101, None, 1, "excerpt", None),
            block(102, Some(101), 1, "paragraph", Some("Inside")),
        ],
        products: vec![ProductRecord {
            product_id: 5,
            section_id: Some(22),
            product_name: Some("Examplin".to_string()),
            ..Default::default()
        }],
        ingredients: vec![
            ingredient(50, "IACT", 1),
            ingredient(51, "ACTIB", 3),
            ingredient(52, "ACTIM", 2),
        ],
        identified_substances: vec![IdentifiedSubstanceRecord {
            identified_substance_id: 90,
            subject_type: Some("Substance".to_string()),
            substance_name: Some("EXAMPLINE".to_string()),
            ..Default::default()
        }],
        routes_of_administration: vec![RouteOfAdministrationRecord {
            route_of_administration_id: 40,
            product_id: 5,
            route_null_flavor: Some("na".to_string()),
            ..Default::default()
        }],
        packaging_levels: vec![
            packaging_level(60, Some(5)),
            packaging_level(61, None),
            packaging_level(62, None),
            packaging_level(63, Some(5)),
        ],
        packaging_hierarchies: vec![
            PackagingHierarchyRecord {
                packaging_hierarchy_id: 1,
                outer_packaging_level_id: 60,
                inner_packaging_level_id: 61,
                sequence_number: Some(1),
            },
            PackagingHierarchyRecord {
                packaging_hierarchy_id: 2,
                outer_packaging_level_id: 61,
                inner_packaging_level_id: 62,
                sequence_number: Some(1),
            },
        ],
        product_instances: vec![lot(70, "BulkLot"), lot(71, "BulkLot"), lot(72, "FillLot")],
        lot_hierarchies: vec![
            LotHierarchyRecord {
                lot_hierarchy_id: 1,
                parent_instance_id: 70,
                child_instance_id: 72,
                sequence_number: None,
            },
            LotHierarchyRecord {
                lot_hierarchy_id: 2,
                parent_instance_id: 71,
                child_instance_id: 72,
                sequence_number: None,
            },
        ],
        pharmacologic_classes: vec![
            PharmacologicClassRecord {
                pharmacologic_class_id: 200,
                class_code: Some("N0000175605".to_string()),
                ..Default::default()
            },
            PharmacologicClassRecord {
                pharmacologic_class_id: 201,
                identified_substance_id: Some(90),
                class_code: Some("N0000000001".to_string()),
                ..Default::default()
            },
        ],
        pharmacologic_class_hierarchies: vec![PharmacologicClassHierarchyRecord {
            pharmacologic_class_hierarchy_id: 1,
            parent_pharmacologic_class_id: 200,
            child_pharmacologic_class_id: 201,
            sequence_number: None,
        }],
        characteristics: vec![CharacteristicRecord {
            characteristic_id: 80,
            product_id: Some(5),
            characteristic_code: Some("SPLCOLOR".to_string()),
            value_cv_code: Some("C48323".to_string()),
            value_cv_display_name: Some("BLACK".to_string()),
            ..Default::default()
        }],
        ..Default::default()
    }
}

fn build(snapshot: Snapshot) -> DocumentRenderContext {
    let set = EntitySet::from_snapshot(snapshot).expect("entity set");
    let hierarchies = DocumentHierarchies::assemble(&set).expect("hierarchies");
    RenderContextBuilder::new(&set, &hierarchies)
        .build()
        .expect("render context")
}

fn characteristic(record: CharacteristicRecord) -> CharacteristicRenderContext {
    CharacteristicRenderContext::build(&Characteristic::from_record(record))
}

fn flags(context: &CharacteristicRenderContext) -> [bool; 7] {
    [
        context.should_render_as_coded_element,
        context.should_render_as_physical_quantity,
        context.should_render_as_integer,
        context.should_render_as_string,
        context.should_render_as_boolean,
        context.should_render_as_interval,
        context.should_render_as_encoded_data,
    ]
}

// --- section tests ---

#[test]
fn sections_are_listed_in_outline_preorder() {
    let context = build(fixture());
    let order: Vec<(i64, &str, usize)> = context
        .sections
        .iter()
        .map(|section| (section.id.0, section.outline_number.as_str(), section.depth))
        .collect();
    assert_eq!(
        order,
        vec![
            (10, "1", 0),
            (20, "2", 0),
            (22, "2.1", 1),
            (21, "2.2", 1),
            (30, "3", 0),
        ]
    );
}

#[test]
fn section_flags_reflect_owned_records() {
    let context = build(fixture());

    let dosage = context.section(SectionId(20)).expect("section 20");
    assert!(dosage.has_children);
    assert_eq!(dosage.child_ids, vec![SectionId(22), SectionId(21)]);
    assert!(!dosage.has_text_content);
    assert!(!dosage.has_products);

    let children = context.section(SectionId(22)).expect("section 22");
    assert_eq!(children.parent_id, Some(SectionId(20)));
    assert!(children.has_products);
    assert!(!children.is_standalone);

    let label = context.section(SectionId(30)).expect("section 30");
    assert!(label.is_standalone);
    assert!(!label.has_media);
    assert!(!label.has_attachments);
}

#[test]
fn text_blocks_nest_in_sequence_order() {
    let context = build(fixture());
    let indications = context.section(SectionId(10)).expect("section 10");
    assert!(indications.has_text_content);

    let roots: Vec<SectionTextContentId> =
        indications.text_blocks.iter().map(|block| block.id).collect();
    assert_eq!(
        roots,
        vec![SectionTextContentId(101), SectionTextContentId(100)]
    );

    let excerpt = &indications.text_blocks[0];
    assert_eq!(excerpt.content_type.as_deref(), Some("Excerpt"));
    assert!(excerpt.has_children);
    assert!(!excerpt.has_text);
    assert_eq!(excerpt.children.len(), 1);
    assert_eq!(excerpt.children[0].text.as_deref(), Some("Inside"));
}

#[test]
fn deeply_nested_text_blocks_are_built_without_recursion() {
    const DEPTH: i64 = 3_000;
    let mut snapshot = fixture();
    snapshot.section_text_contents = (1..=DEPTH)
        .map(|id| block(1_000 + id, (id > 1).then(|| 999 + id), 1, "Paragraph", Some("x")))
        .collect();
    let context = build(snapshot);
    let indications = context.section(SectionId(10)).expect("section 10");

    assert_eq!(indications.text_blocks.len(), 1);
    let mut levels = 0;
    let mut current = &indications.text_blocks[0];
    loop {
        levels += 1;
        assert_eq!(current.id, SectionTextContentId(1_000 + levels));
        match current.children.as_slice() {
            [] => break,
            [only] => {
                assert!(current.has_children);
                current = only;
            }
            more => panic!("expected one child, found {}", more.len()),
        }
    }
    assert_eq!(levels, DEPTH);
    assert!(!current.has_children);
}

// --- product tests ---

#[test]
fn active_ingredients_come_first_then_by_sequence() {
    let context = build(fixture());
    let product = &context.section(SectionId(22)).expect("section 22").products[0];
    assert_eq!(product.id, ProductId(5));

    let order: Vec<IngredientId> = product.ingredients.iter().map(|i| i.id).collect();
    assert_eq!(
        order,
        vec![IngredientId(52), IngredientId(51), IngredientId(50)]
    );
    assert!(product.ingredients[0].is_active);
    assert!(!product.ingredients[2].is_active);
    assert_eq!(product.ingredients[0].strength.as_deref(), Some("10 mg per 1 1"));
    assert_eq!(
        product.ingredients[0].substance_name.as_deref(),
        Some("EXAMPLINE")
    );
}

#[test]
fn packaging_is_listed_in_containment_preorder() {
    let context = build(fixture());
    let product = &context.section(SectionId(22)).expect("section 22").products[0];

    let order: Vec<(PackagingLevelId, usize, Option<PackagingLevelId>)> = product
        .packaging
        .iter()
        .map(|level| (level.id, level.depth, level.parent_id))
        .collect();
    assert_eq!(
        order,
        vec![
            (PackagingLevelId(60), 0, None),
            (PackagingLevelId(61), 1, Some(PackagingLevelId(60))),
            (PackagingLevelId(62), 2, Some(PackagingLevelId(61))),
            (PackagingLevelId(63), 0, None),
        ]
    );
    assert!(product.packaging[0].has_children);
    assert!(!product.packaging[2].has_children);
}

#[test]
fn lots_expose_both_genealogy_directions() {
    let context = build(fixture());
    let product = &context.section(SectionId(22)).expect("section 22").products[0];
    assert!(product.has_lots);

    let fill = product
        .lots
        .iter()
        .find(|lot| lot.id == ProductInstanceId(72))
        .expect("fill lot");
    assert_eq!(
        fill.parent_ids,
        vec![ProductInstanceId(70), ProductInstanceId(71)]
    );
    assert_eq!(fill.kind.as_deref(), Some("FillLot"));

    let bulk = &product.lots[0];
    assert_eq!(bulk.child_ids, vec![ProductInstanceId(72)]);
}

#[test]
fn null_flavor_route_is_marked() {
    let context = build(fixture());
    let product = &context.section(SectionId(22)).expect("section 22").products[0];
    assert!(product.has_routes);
    assert!(product.routes[0].is_null_flavor);
    assert_eq!(product.routes[0].null_flavor.as_deref(), Some("NA"));
}

#[test]
fn pharmacologic_classes_follow_taxonomy() {
    let context = build(fixture());
    let classes: Vec<(PharmacologicClassId, usize)> = context
        .pharmacologic_classes
        .iter()
        .map(|class| (class.id, class.depth))
        .collect();
    assert_eq!(
        classes,
        vec![(PharmacologicClassId(200), 0), (PharmacologicClassId(201), 1)]
    );
    assert_eq!(
        context.pharmacologic_classes[1].defined_by.as_deref(),
        Some("EXAMPLINE")
    );
}

// --- characteristic tests ---

#[test]
fn coded_value_without_declared_type_renders_as_coded_element() {
    let context = characteristic(CharacteristicRecord {
        characteristic_id: 1,
        value_cv_code: Some("C48323".to_string()),
        ..Default::default()
    });
    assert_eq!(flags(&context), [true, false, false, false, false, false, false]);
    insta::assert_json_snapshot!(context, @r#"
    {
      "id": 1,
      "code": null,
      "display_name": null,
      "value_type": "CV",
      "display_value": "C48323",
      "should_render_as_coded_element": true,
      "should_render_as_physical_quantity": false,
      "should_render_as_integer": false,
      "should_render_as_string": false,
      "should_render_as_boolean": false,
      "should_render_as_interval": false,
      "should_render_as_encoded_data": false
    }
    "#);
}

#[test]
fn declared_type_is_honoured_and_upper_cased() {
    let context = characteristic(CharacteristicRecord {
        characteristic_id: 1,
        value_type: Some("pq".to_string()),
        value_pq_value: Some(12.0),
        value_pq_unit: Some("mm".to_string()),
        value_st: Some("twelve".to_string()),
        ..Default::default()
    });
    assert!(context.should_render_as_physical_quantity);
    assert_eq!(context.value_type.as_deref(), Some("PQ"));
    assert_eq!(context.display_value.as_deref(), Some("12 mm"));
}

#[test]
fn several_slots_without_declared_type_prefer_coded_value() {
    let context = characteristic(CharacteristicRecord {
        characteristic_id: 1,
        value_int: Some(3),
        value_cv_code: Some("C48323".to_string()),
        value_cv_display_name: Some("BLACK".to_string()),
        ..Default::default()
    });
    assert!(context.should_render_as_coded_element);
    assert!(!context.should_render_as_integer);
    assert_eq!(context.display_value.as_deref(), Some("BLACK"));
}

#[test]
fn unrecognized_declared_type_falls_back_to_slots() {
    let context = characteristic(CharacteristicRecord {
        characteristic_id: 1,
        value_type: Some("xyz".to_string()),
        value_bl: Some(true),
        ..Default::default()
    });
    assert!(context.should_render_as_boolean);
    assert_eq!(context.value_type.as_deref(), Some("XYZ"));
}

#[test]
fn empty_characteristic_sets_no_flag() {
    let context = characteristic(CharacteristicRecord {
        characteristic_id: 1,
        ..Default::default()
    });
    assert_eq!(flags(&context), [false; 7]);
    assert_eq!(context.value_type, None);
    assert_eq!(context.render_kind(), None);
}

// --- builder tests ---

#[test]
fn building_twice_gives_equal_contexts() {
    let set = EntitySet::from_snapshot(fixture()).expect("entity set");
    let hierarchies = DocumentHierarchies::assemble(&set).expect("hierarchies");
    let builder = RenderContextBuilder::new(&set, &hierarchies);

    let first = builder.build().expect("first build");
    let second = builder.build().expect("second build");
    assert_eq!(first, second);
    assert_eq!(
        serde_json::to_string(&first).expect("json"),
        serde_json::to_string(&second).expect("json")
    );
}

#[test]
fn missing_document_is_a_contract_error() {
    let mut snapshot = fixture();
    snapshot.documents.clear();
    let set = EntitySet::from_snapshot(snapshot).expect("entity set");
    let hierarchies = DocumentHierarchies::assemble(&set).expect("hierarchies");
    let err = RenderContextBuilder::new(&set, &hierarchies)
        .build()
        .expect_err("no document");
    assert_eq!(err, ContractError::DocumentCount { found: 0 });
}

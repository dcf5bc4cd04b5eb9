//! Flat snapshot form of an entity set.
//!
//! This is what the external loader hands over: one list of records per table,
//! column names as in the relational source, every link a nullable integer.
//! Nothing here is interpreted; [`crate::EntitySet::from_snapshot`] does that.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct Snapshot {
    pub documents: Vec<DocumentRecord>,
    pub organizations: Vec<OrganizationRecord>,
    pub structured_bodies: Vec<StructuredBodyRecord>,
    pub sections: Vec<SectionRecord>,
    pub section_hierarchies: Vec<SectionHierarchyRecord>,
    pub section_text_contents: Vec<SectionTextContentRecord>,
    pub observation_media: Vec<ObservationMediaRecord>,
    pub products: Vec<ProductRecord>,
    pub ingredients: Vec<IngredientRecord>,
    pub identified_substances: Vec<IdentifiedSubstanceRecord>,
    pub routes_of_administration: Vec<RouteOfAdministrationRecord>,
    pub packaging_levels: Vec<PackagingLevelRecord>,
    pub packaging_hierarchies: Vec<PackagingHierarchyRecord>,
    pub product_events: Vec<ProductEventRecord>,
    pub product_instances: Vec<ProductInstanceRecord>,
    pub lot_hierarchies: Vec<LotHierarchyRecord>,
    pub pharmacologic_classes: Vec<PharmacologicClassRecord>,
    pub pharmacologic_class_hierarchies: Vec<PharmacologicClassHierarchyRecord>,
    pub territorial_authorities: Vec<TerritorialAuthorityRecord>,
    pub licenses: Vec<LicenseRecord>,
    pub disciplinary_actions: Vec<DisciplinaryActionRecord>,
    pub characteristics: Vec<CharacteristicRecord>,
    pub attached_documents: Vec<AttachedDocumentRecord>,
}

impl Snapshot {
    /// Total number of records across all tables.
    pub fn record_count(&self) -> usize {
        self.documents.len()
            + self.organizations.len()
            + self.structured_bodies.len()
            + self.sections.len()
            + self.section_hierarchies.len()
            + self.section_text_contents.len()
            + self.observation_media.len()
            + self.products.len()
            + self.ingredients.len()
            + self.identified_substances.len()
            + self.routes_of_administration.len()
            + self.packaging_levels.len()
            + self.packaging_hierarchies.len()
            + self.product_events.len()
            + self.product_instances.len()
            + self.lot_hierarchies.len()
            + self.pharmacologic_classes.len()
            + self.pharmacologic_class_hierarchies.len()
            + self.territorial_authorities.len()
            + self.licenses.len()
            + self.disciplinary_actions.len()
            + self.characteristics.len()
            + self.attached_documents.len()
    }
}

// ============================================================================
// Document-level records
// ============================================================================

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct DocumentRecord {
    #[serde(rename = "DocumentID")]
    pub document_id: i64,
    #[serde(rename = "DocumentGUID")]
    pub document_guid: Option<String>,
    #[serde(rename = "SetGUID")]
    pub set_guid: Option<String>,
    pub version_number: Option<i32>,
    pub document_code: Option<String>,
    pub document_code_system: Option<String>,
    pub document_display_name: Option<String>,
    pub title: Option<String>,
    pub effective_time: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct OrganizationRecord {
    #[serde(rename = "OrganizationID")]
    pub organization_id: i64,
    #[serde(rename = "DocumentID")]
    pub document_id: Option<i64>,
    pub organization_name: Option<String>,
    pub identifier_value: Option<String>,
    pub identifier_root: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct StructuredBodyRecord {
    #[serde(rename = "StructuredBodyID")]
    pub structured_body_id: i64,
    #[serde(rename = "DocumentID")]
    pub document_id: Option<i64>,
}

// ============================================================================
// Sections and their content
// ============================================================================

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct SectionRecord {
    #[serde(rename = "SectionID")]
    pub section_id: i64,
    #[serde(rename = "StructuredBodyID")]
    pub structured_body_id: Option<i64>,
    #[serde(rename = "SectionGUID")]
    pub section_guid: Option<String>,
    pub section_code: Option<String>,
    pub section_code_system: Option<String>,
    pub section_display_name: Option<String>,
    pub title: Option<String>,
    pub effective_time: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct SectionHierarchyRecord {
    #[serde(rename = "SectionHierarchyID")]
    pub section_hierarchy_id: i64,
    #[serde(rename = "ParentSectionID")]
    pub parent_section_id: i64,
    #[serde(rename = "ChildSectionID")]
    pub child_section_id: i64,
    pub sequence_number: Option<i32>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct SectionTextContentRecord {
    #[serde(rename = "SectionTextContentID")]
    pub section_text_content_id: i64,
    #[serde(rename = "SectionID")]
    pub section_id: i64,
    #[serde(rename = "ParentSectionTextContentID")]
    pub parent_section_text_content_id: Option<i64>,
    pub content_type: Option<String>,
    pub sequence_number: Option<i32>,
    pub content_text: Option<String>,
    pub style_code: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ObservationMediaRecord {
    #[serde(rename = "ObservationMediaID")]
    pub observation_media_id: i64,
    #[serde(rename = "SectionID")]
    pub section_id: i64,
    #[serde(rename = "MediaID")]
    pub media_id: Option<String>,
    pub media_type: Option<String>,
    pub file_name: Option<String>,
    pub alt_text: Option<String>,
}

// ============================================================================
// Products
// ============================================================================

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ProductRecord {
    #[serde(rename = "ProductID")]
    pub product_id: i64,
    #[serde(rename = "SectionID")]
    pub section_id: Option<i64>,
    pub product_name: Option<String>,
    pub generic_name: Option<String>,
    pub form_code: Option<String>,
    pub form_code_system: Option<String>,
    pub form_display_name: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct IngredientRecord {
    #[serde(rename = "IngredientID")]
    pub ingredient_id: i64,
    #[serde(rename = "ProductID")]
    pub product_id: i64,
    #[serde(rename = "IdentifiedSubstanceID")]
    pub identified_substance_id: Option<i64>,
    pub class_code: Option<String>,
    pub quantity_numerator_value: Option<f64>,
    pub quantity_numerator_unit: Option<String>,
    pub quantity_denominator_value: Option<f64>,
    pub quantity_denominator_unit: Option<String>,
    pub sequence_number: Option<i32>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct IdentifiedSubstanceRecord {
    #[serde(rename = "IdentifiedSubstanceID")]
    pub identified_substance_id: i64,
    pub subject_type: Option<String>,
    #[serde(default)]
    pub is_definition: bool,
    pub substance_identifier_value: Option<String>,
    pub substance_identifier_system: Option<String>,
    pub substance_name: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct RouteOfAdministrationRecord {
    #[serde(rename = "RouteOfAdministrationID")]
    pub route_of_administration_id: i64,
    #[serde(rename = "ProductID")]
    pub product_id: i64,
    pub route_code: Option<String>,
    pub route_code_system: Option<String>,
    pub route_display_name: Option<String>,
    pub route_null_flavor: Option<String>,
}

// ============================================================================
// Packaging and lots
// ============================================================================

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct PackagingLevelRecord {
    #[serde(rename = "PackagingLevelID")]
    pub packaging_level_id: i64,
    #[serde(rename = "ProductID")]
    pub product_id: Option<i64>,
    pub package_code: Option<String>,
    pub package_code_system: Option<String>,
    pub quantity_value: Option<f64>,
    pub quantity_unit: Option<String>,
    pub package_form_code: Option<String>,
    pub package_form_code_system: Option<String>,
    pub package_form_display_name: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct PackagingHierarchyRecord {
    #[serde(rename = "PackagingHierarchyID")]
    pub packaging_hierarchy_id: i64,
    #[serde(rename = "OuterPackagingLevelID")]
    pub outer_packaging_level_id: i64,
    #[serde(rename = "InnerPackagingLevelID")]
    pub inner_packaging_level_id: i64,
    pub sequence_number: Option<i32>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ProductEventRecord {
    #[serde(rename = "ProductEventID")]
    pub product_event_id: i64,
    #[serde(rename = "PackagingLevelID")]
    pub packaging_level_id: i64,
    pub event_code: Option<String>,
    pub event_code_system: Option<String>,
    pub event_display_name: Option<String>,
    pub quantity_value: Option<f64>,
    pub quantity_unit: Option<String>,
    pub effective_time_low: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ProductInstanceRecord {
    #[serde(rename = "ProductInstanceID")]
    pub product_instance_id: i64,
    #[serde(rename = "ProductID")]
    pub product_id: Option<i64>,
    pub instance_kind: Option<String>,
    pub lot_number: Option<String>,
    pub expiration_date: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct LotHierarchyRecord {
    #[serde(rename = "LotHierarchyID")]
    pub lot_hierarchy_id: i64,
    #[serde(rename = "ParentInstanceID")]
    pub parent_instance_id: i64,
    #[serde(rename = "ChildInstanceID")]
    pub child_instance_id: i64,
    pub sequence_number: Option<i32>,
}

// ============================================================================
// Pharmacologic classes
// ============================================================================

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct PharmacologicClassRecord {
    #[serde(rename = "PharmacologicClassID")]
    pub pharmacologic_class_id: i64,
    #[serde(rename = "IdentifiedSubstanceID")]
    pub identified_substance_id: Option<i64>,
    pub class_code: Option<String>,
    pub class_code_system: Option<String>,
    pub class_display_name: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct PharmacologicClassHierarchyRecord {
    #[serde(rename = "PharmacologicClassHierarchyID")]
    pub pharmacologic_class_hierarchy_id: i64,
    #[serde(rename = "ParentPharmacologicClassID")]
    pub parent_pharmacologic_class_id: i64,
    #[serde(rename = "ChildPharmacologicClassID")]
    pub child_pharmacologic_class_id: i64,
    pub sequence_number: Option<i32>,
}

// ============================================================================
// Licensing
// ============================================================================

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct TerritorialAuthorityRecord {
    #[serde(rename = "TerritorialAuthorityID")]
    pub territorial_authority_id: i64,
    pub territory_code: Option<String>,
    pub territory_code_system: Option<String>,
    pub governing_agency_id_extension: Option<String>,
    pub governing_agency_id_root: Option<String>,
    pub governing_agency_name: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct LicenseRecord {
    #[serde(rename = "LicenseID")]
    pub license_id: i64,
    #[serde(rename = "TerritorialAuthorityID")]
    pub territorial_authority_id: Option<i64>,
    #[serde(rename = "OrganizationID")]
    pub organization_id: Option<i64>,
    pub license_number: Option<String>,
    pub license_root: Option<String>,
    pub status_code: Option<String>,
    pub expiration_date: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct DisciplinaryActionRecord {
    #[serde(rename = "DisciplinaryActionID")]
    pub disciplinary_action_id: i64,
    #[serde(rename = "LicenseID")]
    pub license_id: i64,
    pub action_code: Option<String>,
    pub action_code_system: Option<String>,
    pub action_display_name: Option<String>,
    pub effective_time: Option<String>,
    pub action_text: Option<String>,
}

// ============================================================================
// Discriminated records
// ============================================================================

/// One characteristic, its value stored across per-shape column groups.
///
/// `ValueType` names the shape in use; only that group should be populated.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct CharacteristicRecord {
    #[serde(rename = "CharacteristicID")]
    pub characteristic_id: i64,
    #[serde(rename = "ProductID")]
    pub product_id: Option<i64>,
    #[serde(rename = "PackagingLevelID")]
    pub packaging_level_id: Option<i64>,
    pub characteristic_code: Option<String>,
    pub characteristic_code_system: Option<String>,
    pub characteristic_display_name: Option<String>,
    pub value_type: Option<String>,
    #[serde(rename = "ValuePQ_Value")]
    pub value_pq_value: Option<f64>,
    #[serde(rename = "ValuePQ_Unit")]
    pub value_pq_unit: Option<String>,
    #[serde(rename = "ValueINT")]
    pub value_int: Option<i64>,
    #[serde(rename = "ValueCV_Code")]
    pub value_cv_code: Option<String>,
    #[serde(rename = "ValueCV_CodeSystem")]
    pub value_cv_code_system: Option<String>,
    #[serde(rename = "ValueCV_DisplayName")]
    pub value_cv_display_name: Option<String>,
    #[serde(rename = "ValueST")]
    pub value_st: Option<String>,
    #[serde(rename = "ValueBL")]
    pub value_bl: Option<bool>,
    #[serde(rename = "ValueIVLPQ_LowValue")]
    pub value_ivlpq_low_value: Option<f64>,
    #[serde(rename = "ValueIVLPQ_LowUnit")]
    pub value_ivlpq_low_unit: Option<String>,
    #[serde(rename = "ValueIVLPQ_HighValue")]
    pub value_ivlpq_high_value: Option<f64>,
    #[serde(rename = "ValueIVLPQ_HighUnit")]
    pub value_ivlpq_high_unit: Option<String>,
    #[serde(rename = "ValueED_MediaType")]
    pub value_ed_media_type: Option<String>,
    #[serde(rename = "ValueED_FileName")]
    pub value_ed_file_name: Option<String>,
}

/// A file attached to some other record through a generic parent pointer.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct AttachedDocumentRecord {
    #[serde(rename = "AttachedDocumentID")]
    pub attached_document_id: i64,
    pub parent_entity_type: Option<String>,
    #[serde(rename = "ParentEntityID")]
    pub parent_entity_id: Option<i64>,
    pub media_type: Option<String>,
    pub file_name: Option<String>,
    pub title: Option<String>,
}

use serde::Serialize;

use crate::coded::{CodedValue, non_blank};
use crate::ids::{IdentifiedSubstanceId, PharmacologicClassHierarchyId, PharmacologicClassId};
use crate::snapshot::{
    IdentifiedSubstanceRecord, PharmacologicClassHierarchyRecord, PharmacologicClassRecord,
};

/// What an identified substance record is doing in the document.
///
/// The source table serves two purposes and tells them apart with a subject
/// type plus an `IsDefinition` flag. Combinations that match neither purpose
/// are kept as `Ambiguous` so they can be reported.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum SubstanceRole {
    /// Mentioned by reference: an active moiety, substance or ingredient.
    Reference { subject: ReferenceSubject },
    /// Defines a pharmacologic-class concept.
    ClassDefinition,
    Ambiguous {
        subject_type: Option<String>,
        is_definition: bool,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum ReferenceSubject {
    ActiveMoiety,
    Substance,
    Ingredient,
}

impl SubstanceRole {
    pub fn classify(subject_type: Option<&str>, is_definition: bool) -> Self {
        let normalized = subject_type.map(|raw| {
            raw.trim()
                .chars()
                .filter(|c| c.is_ascii_alphabetic())
                .collect::<String>()
                .to_ascii_uppercase()
        });
        match (normalized.as_deref(), is_definition) {
            (Some("PHARMACOLOGICCLASS"), true) => Self::ClassDefinition,
            (Some("ACTIVEMOIETY"), false) => Self::Reference {
                subject: ReferenceSubject::ActiveMoiety,
            },
            (Some("SUBSTANCE"), false) => Self::Reference {
                subject: ReferenceSubject::Substance,
            },
            (Some("INGREDIENT"), false) => Self::Reference {
                subject: ReferenceSubject::Ingredient,
            },
            _ => Self::Ambiguous {
                subject_type: subject_type.map(|raw| raw.trim().to_string()),
                is_definition,
            },
        }
    }

    pub fn is_class_definition(&self) -> bool {
        matches!(self, Self::ClassDefinition)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IdentifiedSubstance {
    pub id: IdentifiedSubstanceId,
    pub role: SubstanceRole,
    /// UNII or other substance identifier.
    pub identifier: Option<String>,
    pub identifier_system: Option<String>,
    pub name: Option<String>,
}

impl IdentifiedSubstance {
    pub fn from_record(record: IdentifiedSubstanceRecord) -> Self {
        let subject_type = non_blank(record.subject_type);
        Self {
            id: IdentifiedSubstanceId(record.identified_substance_id),
            role: SubstanceRole::classify(subject_type.as_deref(), record.is_definition),
            identifier: non_blank(record.substance_identifier_value),
            identifier_system: non_blank(record.substance_identifier_system),
            name: non_blank(record.substance_name),
        }
    }
}

/// A pharmacologic-class concept (mechanism of action, established class, ...).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PharmacologicClass {
    pub id: PharmacologicClassId,
    /// Substance record that defines this class, when indexed.
    pub defining_substance_id: Option<IdentifiedSubstanceId>,
    pub code: CodedValue,
}

impl PharmacologicClass {
    pub fn from_record(record: PharmacologicClassRecord) -> Self {
        Self {
            id: PharmacologicClassId(record.pharmacologic_class_id),
            defining_substance_id: record.identified_substance_id.map(IdentifiedSubstanceId),
            code: CodedValue::new(
                record.class_code,
                record.class_code_system,
                record.class_display_name,
            ),
        }
    }
}

/// Super-class / sub-class edge.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PharmacologicClassHierarchy {
    pub id: PharmacologicClassHierarchyId,
    pub parent_id: PharmacologicClassId,
    pub child_id: PharmacologicClassId,
    pub sequence_number: Option<i32>,
}

impl PharmacologicClassHierarchy {
    pub fn from_record(record: PharmacologicClassHierarchyRecord) -> Self {
        Self {
            id: PharmacologicClassHierarchyId(record.pharmacologic_class_hierarchy_id),
            parent_id: PharmacologicClassId(record.parent_pharmacologic_class_id),
            child_id: PharmacologicClassId(record.child_pharmacologic_class_id),
            sequence_number: record.sequence_number,
        }
    }
}

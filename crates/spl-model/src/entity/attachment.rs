use serde::Serialize;

use crate::coded::non_blank;
use crate::ids::{
    AttachedDocumentId, DisciplinaryActionId, DocumentId, LicenseId, ProductId, SectionId,
};
use crate::kind::EntityKind;
use crate::snapshot::AttachedDocumentRecord;

/// The record an attached document hangs off.
///
/// The source uses a polymorphic `(ParentEntityType, ParentEntityID)` pair.
/// Kinds that can own an attachment get a typed variant; anything else is
/// kept verbatim so the validator can name it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum ParentEntity {
    Document(DocumentId),
    Section(SectionId),
    Product(ProductId),
    License(LicenseId),
    DisciplinaryAction(DisciplinaryActionId),
    Unrecognized {
        entity_type: Option<String>,
        id: Option<i64>,
    },
}

impl ParentEntity {
    pub fn resolve(entity_type: Option<&str>, id: Option<i64>) -> Self {
        let kind = entity_type.and_then(|raw| raw.parse::<EntityKind>().ok());
        match (kind, id) {
            (Some(EntityKind::Document), Some(raw)) => Self::Document(DocumentId(raw)),
            (Some(EntityKind::Section), Some(raw)) => Self::Section(SectionId(raw)),
            (Some(EntityKind::Product), Some(raw)) => Self::Product(ProductId(raw)),
            (Some(EntityKind::License), Some(raw)) => Self::License(LicenseId(raw)),
            (Some(EntityKind::DisciplinaryAction), Some(raw)) => {
                Self::DisciplinaryAction(DisciplinaryActionId(raw))
            }
            _ => Self::Unrecognized {
                entity_type: entity_type.map(|raw| raw.trim().to_string()),
                id,
            },
        }
    }

    /// Kind and raw id of a typed parent.
    pub fn target(&self) -> Option<(EntityKind, i64)> {
        match self {
            Self::Document(id) => Some((EntityKind::Document, id.0)),
            Self::Section(id) => Some((EntityKind::Section, id.0)),
            Self::Product(id) => Some((EntityKind::Product, id.0)),
            Self::License(id) => Some((EntityKind::License, id.0)),
            Self::DisciplinaryAction(id) => Some((EntityKind::DisciplinaryAction, id.0)),
            Self::Unrecognized { .. } => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AttachedDocument {
    pub id: AttachedDocumentId,
    pub parent: ParentEntity,
    pub media_type: Option<String>,
    pub file_name: Option<String>,
    pub title: Option<String>,
}

impl AttachedDocument {
    pub fn from_record(record: AttachedDocumentRecord) -> Self {
        let entity_type = non_blank(record.parent_entity_type);
        Self {
            id: AttachedDocumentId(record.attached_document_id),
            parent: ParentEntity::resolve(entity_type.as_deref(), record.parent_entity_id),
            media_type: non_blank(record.media_type).map(|t| t.to_ascii_lowercase()),
            file_name: non_blank(record.file_name),
            title: non_blank(record.title),
        }
    }
}

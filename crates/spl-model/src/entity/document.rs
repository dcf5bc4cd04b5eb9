use serde::Serialize;

use crate::coded::{CodedValue, non_blank};
use crate::ids::{DocumentId, OrganizationId, StructuredBodyId};
use crate::snapshot::{DocumentRecord, OrganizationRecord, StructuredBodyRecord};

/// Root metadata record of one labeling version.
///
/// `set_guid` is stable across versions; `version_number` increases with each
/// new version of the same set.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Document {
    pub id: DocumentId,
    pub document_guid: Option<String>,
    pub set_guid: Option<String>,
    pub version_number: Option<i32>,
    pub code: CodedValue,
    pub title: Option<String>,
    pub effective_time: Option<String>,
}

impl Document {
    pub fn from_record(record: DocumentRecord) -> Self {
        Self {
            id: DocumentId(record.document_id),
            document_guid: non_blank(record.document_guid),
            set_guid: non_blank(record.set_guid),
            version_number: record.version_number,
            code: CodedValue::new(
                record.document_code,
                record.document_code_system,
                record.document_display_name,
            ),
            title: non_blank(record.title),
            effective_time: non_blank(record.effective_time),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Organization {
    pub id: OrganizationId,
    pub document_id: Option<DocumentId>,
    pub name: Option<String>,
    pub identifier_value: Option<String>,
    pub identifier_root: Option<String>,
}

impl Organization {
    pub fn from_record(record: OrganizationRecord) -> Self {
        Self {
            id: OrganizationId(record.organization_id),
            document_id: record.document_id.map(DocumentId),
            name: non_blank(record.organization_name),
            identifier_value: non_blank(record.identifier_value),
            identifier_root: non_blank(record.identifier_root),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StructuredBody {
    pub id: StructuredBodyId,
    pub document_id: Option<DocumentId>,
}

impl StructuredBody {
    pub fn from_record(record: StructuredBodyRecord) -> Self {
        Self {
            id: StructuredBodyId(record.structured_body_id),
            document_id: record.document_id.map(DocumentId),
        }
    }
}

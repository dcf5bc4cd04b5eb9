use serde::Serialize;

use crate::coded::{CodedValue, non_blank};
use crate::ids::{
    ObservationMediaId, SectionHierarchyId, SectionId, SectionTextContentId, StructuredBodyId,
};
use crate::snapshot::{
    ObservationMediaRecord, SectionHierarchyRecord, SectionRecord, SectionTextContentRecord,
};

/// A labeling section.
///
/// Top-level sections belong to a structured body. Nested sections are linked
/// through [`SectionHierarchy`] rows and normally carry no body of their own.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Section {
    pub id: SectionId,
    pub structured_body_id: Option<StructuredBodyId>,
    pub section_guid: Option<String>,
    pub code: CodedValue,
    pub title: Option<String>,
    pub effective_time: Option<String>,
}

impl Section {
    pub fn from_record(record: SectionRecord) -> Self {
        Self {
            id: SectionId(record.section_id),
            structured_body_id: record.structured_body_id.map(StructuredBodyId),
            section_guid: non_blank(record.section_guid),
            code: CodedValue::new(
                record.section_code,
                record.section_code_system,
                record.section_display_name,
            ),
            title: non_blank(record.title),
            effective_time: non_blank(record.effective_time),
        }
    }
}

/// Parent/child edge between two sections.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SectionHierarchy {
    pub id: SectionHierarchyId,
    pub parent_id: SectionId,
    pub child_id: SectionId,
    pub sequence_number: Option<i32>,
}

impl SectionHierarchy {
    pub fn from_record(record: SectionHierarchyRecord) -> Self {
        Self {
            id: SectionHierarchyId(record.section_hierarchy_id),
            parent_id: SectionId(record.parent_section_id),
            child_id: SectionId(record.child_section_id),
            sequence_number: record.sequence_number,
        }
    }
}

/// Kind of a text content block.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub enum ContentType {
    Paragraph,
    List,
    Table,
    BlockImage,
    /// A highlighted excerpt that wraps further blocks.
    Excerpt,
    Unrecognized(String),
}

impl ContentType {
    pub fn parse(raw: &str) -> Self {
        let normalized: String = raw
            .trim()
            .chars()
            .filter(|c| c.is_ascii_alphanumeric())
            .collect::<String>()
            .to_ascii_uppercase();
        match normalized.as_str() {
            "PARAGRAPH" => Self::Paragraph,
            "LIST" => Self::List,
            "TABLE" => Self::Table,
            "BLOCKIMAGE" | "RENDERMULTIMEDIA" => Self::BlockImage,
            "EXCERPT" | "HIGHLIGHT" => Self::Excerpt,
            _ => Self::Unrecognized(raw.trim().to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::Paragraph => "Paragraph",
            Self::List => "List",
            Self::Table => "Table",
            Self::BlockImage => "BlockImage",
            Self::Excerpt => "Excerpt",
            Self::Unrecognized(raw) => raw,
        }
    }

    /// Blocks of this kind are expected to carry text of their own.
    pub fn carries_text(&self) -> bool {
        matches!(self, Self::Paragraph)
    }
}

/// One block of narrative inside a section, possibly nested in another block.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SectionTextContent {
    pub id: SectionTextContentId,
    pub section_id: SectionId,
    pub parent_id: Option<SectionTextContentId>,
    pub content_type: Option<ContentType>,
    pub sequence_number: Option<i32>,
    pub text: Option<String>,
    pub style_code: Option<String>,
}

impl SectionTextContent {
    pub fn from_record(record: SectionTextContentRecord) -> Self {
        Self {
            id: SectionTextContentId(record.section_text_content_id),
            section_id: SectionId(record.section_id),
            parent_id: record
                .parent_section_text_content_id
                .map(SectionTextContentId),
            content_type: non_blank(record.content_type).map(|raw| ContentType::parse(&raw)),
            sequence_number: record.sequence_number,
            text: non_blank(record.content_text),
            style_code: non_blank(record.style_code),
        }
    }
}

/// An image or other media object rendered within a section.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ObservationMedia {
    pub id: ObservationMediaId,
    pub section_id: SectionId,
    pub media_id: Option<String>,
    pub media_type: Option<String>,
    pub file_name: Option<String>,
    pub alt_text: Option<String>,
}

impl ObservationMedia {
    pub fn from_record(record: ObservationMediaRecord) -> Self {
        Self {
            id: ObservationMediaId(record.observation_media_id),
            section_id: SectionId(record.section_id),
            media_id: non_blank(record.media_id),
            media_type: non_blank(record.media_type).map(|t| t.to_ascii_lowercase()),
            file_name: non_blank(record.file_name),
            alt_text: non_blank(record.alt_text),
        }
    }
}

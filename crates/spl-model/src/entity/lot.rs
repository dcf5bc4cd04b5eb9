use serde::Serialize;

use crate::coded::non_blank;
use crate::ids::{LotHierarchyId, ProductId, ProductInstanceId};
use crate::snapshot::{LotHierarchyRecord, ProductInstanceRecord};

/// Stage of a lot in its genealogy.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub enum InstanceKind {
    BulkLot,
    FillLot,
    LabelLot,
    Unrecognized(String),
}

impl InstanceKind {
    pub fn parse(raw: &str) -> Self {
        let normalized: String = raw
            .trim()
            .chars()
            .filter(|c| c.is_ascii_alphabetic())
            .collect::<String>()
            .to_ascii_uppercase();
        match normalized.as_str() {
            "BULKLOT" | "BULK" => Self::BulkLot,
            "FILLLOT" | "FILL" => Self::FillLot,
            "LABELLOT" | "LABEL" => Self::LabelLot,
            _ => Self::Unrecognized(raw.trim().to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::BulkLot => "BulkLot",
            Self::FillLot => "FillLot",
            Self::LabelLot => "LabelLot",
            Self::Unrecognized(raw) => raw,
        }
    }

    /// Position in the bulk → fill → label flow.
    pub fn stage(&self) -> Option<u8> {
        match self {
            Self::BulkLot => Some(0),
            Self::FillLot => Some(1),
            Self::LabelLot => Some(2),
            Self::Unrecognized(_) => None,
        }
    }
}

/// A concrete lot of a product.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProductInstance {
    pub id: ProductInstanceId,
    pub product_id: Option<ProductId>,
    pub kind: Option<InstanceKind>,
    pub lot_number: Option<String>,
    pub expiration_date: Option<String>,
}

impl ProductInstance {
    pub fn from_record(record: ProductInstanceRecord) -> Self {
        Self {
            id: ProductInstanceId(record.product_instance_id),
            product_id: record.product_id.map(ProductId),
            kind: non_blank(record.instance_kind).map(|raw| InstanceKind::parse(&raw)),
            lot_number: non_blank(record.lot_number),
            expiration_date: non_blank(record.expiration_date),
        }
    }
}

/// Genealogy edge: the child lot was produced from the parent lot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LotHierarchy {
    pub id: LotHierarchyId,
    pub parent_id: ProductInstanceId,
    pub child_id: ProductInstanceId,
    pub sequence_number: Option<i32>,
}

impl LotHierarchy {
    pub fn from_record(record: LotHierarchyRecord) -> Self {
        Self {
            id: LotHierarchyId(record.lot_hierarchy_id),
            parent_id: ProductInstanceId(record.parent_instance_id),
            child_id: ProductInstanceId(record.child_instance_id),
            sequence_number: record.sequence_number,
        }
    }
}

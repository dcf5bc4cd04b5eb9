use serde::Serialize;

use crate::coded::{CodedValue, Quantity, non_blank};
use crate::ids::{PackagingHierarchyId, PackagingLevelId, ProductEventId, ProductId};
use crate::snapshot::{PackagingHierarchyRecord, PackagingLevelRecord, ProductEventRecord};

/// One level of packaging: a bottle, the carton it ships in, the case.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PackagingLevel {
    pub id: PackagingLevelId,
    pub product_id: Option<ProductId>,
    pub package_code: Option<String>,
    pub package_code_system: Option<String>,
    pub quantity: Quantity,
    pub form: CodedValue,
}

impl PackagingLevel {
    pub fn from_record(record: PackagingLevelRecord) -> Self {
        Self {
            id: PackagingLevelId(record.packaging_level_id),
            product_id: record.product_id.map(ProductId),
            package_code: non_blank(record.package_code),
            package_code_system: non_blank(record.package_code_system),
            quantity: Quantity::new(record.quantity_value, record.quantity_unit),
            form: CodedValue::new(
                record.package_form_code,
                record.package_form_code_system,
                record.package_form_display_name,
            ),
        }
    }
}

/// Containment edge: the inner level sits inside the outer level.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PackagingHierarchy {
    pub id: PackagingHierarchyId,
    pub outer_id: PackagingLevelId,
    pub inner_id: PackagingLevelId,
    pub sequence_number: Option<i32>,
}

impl PackagingHierarchy {
    pub fn from_record(record: PackagingHierarchyRecord) -> Self {
        Self {
            id: PackagingHierarchyId(record.packaging_hierarchy_id),
            outer_id: PackagingLevelId(record.outer_packaging_level_id),
            inner_id: PackagingLevelId(record.inner_packaging_level_id),
            sequence_number: record.sequence_number,
        }
    }
}

/// A marketing event recorded against a packaging level (e.g. units distributed).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProductEvent {
    pub id: ProductEventId,
    pub packaging_level_id: PackagingLevelId,
    pub code: CodedValue,
    pub quantity: Quantity,
    pub effective_time_low: Option<String>,
}

impl ProductEvent {
    pub fn from_record(record: ProductEventRecord) -> Self {
        Self {
            id: ProductEventId(record.product_event_id),
            packaging_level_id: PackagingLevelId(record.packaging_level_id),
            code: CodedValue::new(
                record.event_code,
                record.event_code_system,
                record.event_display_name,
            ),
            quantity: Quantity::new(record.quantity_value, record.quantity_unit),
            effective_time_low: non_blank(record.effective_time_low),
        }
    }
}

//! Characteristics and their tagged value union.
//!
//! The source stores a characteristic value across seven column groups, one
//! per value shape, plus a `ValueType` discriminator. Mapping keeps every
//! populated group as a [`CharacteristicValue`] in canonical order, so a record
//! with two populated shapes stays visibly malformed instead of silently
//! losing one of them.

use serde::Serialize;
use std::fmt;

use crate::coded::{CodedValue, Quantity, non_blank};
use crate::ids::{CharacteristicId, PackagingLevelId, ProductId};
use crate::snapshot::CharacteristicRecord;

/// Value shapes a characteristic can hold, in canonical slot order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum ValueKind {
    CodedElement,
    PhysicalQuantity,
    Integer,
    String,
    Boolean,
    Interval,
    EncodedData,
}

impl ValueKind {
    pub const fn all() -> &'static [Self] {
        &[
            Self::CodedElement,
            Self::PhysicalQuantity,
            Self::Integer,
            Self::String,
            Self::Boolean,
            Self::Interval,
            Self::EncodedData,
        ]
    }

    /// HL7 data type code.
    pub const fn code(&self) -> &'static str {
        match self {
            Self::CodedElement => "CV",
            Self::PhysicalQuantity => "PQ",
            Self::Integer => "INT",
            Self::String => "ST",
            Self::Boolean => "BL",
            Self::Interval => "IVL_PQ",
            Self::EncodedData => "ED",
        }
    }

    /// Parse an HL7 data type code. Coded variants (`CE`, `CD`, `CO`) all map
    /// to [`ValueKind::CodedElement`].
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_uppercase().as_str() {
            "CV" | "CE" | "CD" | "CO" => Some(Self::CodedElement),
            "PQ" => Some(Self::PhysicalQuantity),
            "INT" => Some(Self::Integer),
            "ST" => Some(Self::String),
            "BL" => Some(Self::Boolean),
            "IVL_PQ" | "IVLPQ" | "IVL" => Some(Self::Interval),
            "ED" => Some(Self::EncodedData),
            _ => None,
        }
    }
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// The declared `ValueType` discriminator, upper-cased.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum ValueTypeTag {
    Known { kind: ValueKind, raw: String },
    Unrecognized(String),
}

impl ValueTypeTag {
    pub fn parse(raw: &str) -> Self {
        let normalized = raw.trim().to_ascii_uppercase();
        match ValueKind::parse(&normalized) {
            Some(kind) => Self::Known {
                kind,
                raw: normalized,
            },
            None => Self::Unrecognized(normalized),
        }
    }

    pub fn kind(&self) -> Option<ValueKind> {
        match self {
            Self::Known { kind, .. } => Some(*kind),
            Self::Unrecognized(_) => None,
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::Known { raw, .. } | Self::Unrecognized(raw) => raw,
        }
    }
}

/// One populated value slot.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum CharacteristicValue {
    Coded(CodedValue),
    PhysicalQuantity(Quantity),
    Integer(i64),
    String(String),
    Boolean(bool),
    Interval { low: Quantity, high: Quantity },
    EncodedData {
        media_type: Option<String>,
        file_name: Option<String>,
    },
}

impl CharacteristicValue {
    pub fn kind(&self) -> ValueKind {
        match self {
            Self::Coded(_) => ValueKind::CodedElement,
            Self::PhysicalQuantity(_) => ValueKind::PhysicalQuantity,
            Self::Integer(_) => ValueKind::Integer,
            Self::String(_) => ValueKind::String,
            Self::Boolean(_) => ValueKind::Boolean,
            Self::Interval { .. } => ValueKind::Interval,
            Self::EncodedData { .. } => ValueKind::EncodedData,
        }
    }

    /// Human-readable rendering of the value.
    pub fn display(&self) -> Option<String> {
        match self {
            Self::Coded(coded) => coded.label().map(str::to_string),
            Self::PhysicalQuantity(quantity) => quantity.display(),
            Self::Integer(value) => Some(value.to_string()),
            Self::String(value) => Some(value.clone()),
            Self::Boolean(value) => Some(value.to_string()),
            Self::Interval { low, high } => match (low.display(), high.display()) {
                (Some(low), Some(high)) => Some(format!("{low} to {high}")),
                (Some(low), None) => Some(format!("at least {low}")),
                (None, Some(high)) => Some(format!("at most {high}")),
                (None, None) => None,
            },
            Self::EncodedData {
                media_type,
                file_name,
            } => file_name.clone().or_else(|| media_type.clone()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Characteristic {
    pub id: CharacteristicId,
    pub product_id: Option<ProductId>,
    pub packaging_level_id: Option<PackagingLevelId>,
    pub code: CodedValue,
    pub declared: Option<ValueTypeTag>,
    /// Populated value slots in [`ValueKind`] order.
    pub values: Vec<CharacteristicValue>,
}

impl Characteristic {
    pub fn from_record(record: CharacteristicRecord) -> Self {
        let mut values = Vec::new();

        let coded = CodedValue::new(
            record.value_cv_code,
            record.value_cv_code_system,
            record.value_cv_display_name,
        );
        if !coded.is_absent() {
            values.push(CharacteristicValue::Coded(coded));
        }

        let quantity = Quantity::new(record.value_pq_value, record.value_pq_unit);
        if !quantity.is_absent() {
            values.push(CharacteristicValue::PhysicalQuantity(quantity));
        }

        if let Some(value) = record.value_int {
            values.push(CharacteristicValue::Integer(value));
        }

        if let Some(value) = non_blank(record.value_st) {
            values.push(CharacteristicValue::String(value));
        }

        if let Some(value) = record.value_bl {
            values.push(CharacteristicValue::Boolean(value));
        }

        let low = Quantity::new(record.value_ivlpq_low_value, record.value_ivlpq_low_unit);
        let high = Quantity::new(record.value_ivlpq_high_value, record.value_ivlpq_high_unit);
        if !low.is_absent() || !high.is_absent() {
            values.push(CharacteristicValue::Interval { low, high });
        }

        let media_type = non_blank(record.value_ed_media_type);
        let file_name = non_blank(record.value_ed_file_name);
        if media_type.is_some() || file_name.is_some() {
            values.push(CharacteristicValue::EncodedData {
                media_type,
                file_name,
            });
        }

        Self {
            id: CharacteristicId(record.characteristic_id),
            product_id: record.product_id.map(ProductId),
            packaging_level_id: record.packaging_level_id.map(PackagingLevelId),
            code: CodedValue::new(
                record.characteristic_code,
                record.characteristic_code_system,
                record.characteristic_display_name,
            ),
            declared: non_blank(record.value_type).map(|raw| ValueTypeTag::parse(&raw)),
            values,
        }
    }

    pub fn populated_kinds(&self) -> Vec<ValueKind> {
        self.values.iter().map(CharacteristicValue::kind).collect()
    }

    pub fn value_of(&self, kind: ValueKind) -> Option<&CharacteristicValue> {
        self.values.iter().find(|value| value.kind() == kind)
    }

    pub fn declared_kind(&self) -> Option<ValueKind> {
        self.declared.as_ref().and_then(ValueTypeTag::kind)
    }
}

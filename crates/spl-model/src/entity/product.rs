use serde::Serialize;

use crate::coded::{CodedValue, Quantity, non_blank};
use crate::ids::{
    IdentifiedSubstanceId, IngredientId, ProductId, RouteOfAdministrationId, SectionId,
};
use crate::snapshot::{IngredientRecord, ProductRecord, RouteOfAdministrationRecord};

/// A manufactured product described by the labeling.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Product {
    pub id: ProductId,
    pub section_id: Option<SectionId>,
    pub name: Option<String>,
    pub generic_name: Option<String>,
    pub form: CodedValue,
}

impl Product {
    pub fn from_record(record: ProductRecord) -> Self {
        Self {
            id: ProductId(record.product_id),
            section_id: record.section_id.map(SectionId),
            name: non_blank(record.product_name),
            generic_name: non_blank(record.generic_name),
            form: CodedValue::new(
                record.form_code,
                record.form_code_system,
                record.form_display_name,
            ),
        }
    }
}

/// HL7 ingredient role class.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub enum IngredientClass {
    /// `ACTIB`: active ingredient, strength expressed for the ingredient itself.
    ActiveBasisOfStrength,
    /// `ACTIM`: active ingredient, strength expressed for the active moiety.
    ActiveMoietyBasis,
    /// `ACTIR`: active ingredient, strength expressed for a reference substance.
    ActiveReferenceBasis,
    /// `IACT`: inactive ingredient.
    Inactive,
    /// `ADJV`: adjuvant.
    Adjuvant,
    /// `CNTM`: may-contain / contaminant.
    Contaminant,
    Unrecognized(String),
}

impl IngredientClass {
    pub fn parse(raw: &str) -> Self {
        match raw.trim().to_ascii_uppercase().as_str() {
            "ACTIB" => Self::ActiveBasisOfStrength,
            "ACTIM" => Self::ActiveMoietyBasis,
            "ACTIR" => Self::ActiveReferenceBasis,
            "IACT" => Self::Inactive,
            "ADJV" => Self::Adjuvant,
            "CNTM" => Self::Contaminant,
            _ => Self::Unrecognized(raw.trim().to_string()),
        }
    }

    pub fn code(&self) -> &str {
        match self {
            Self::ActiveBasisOfStrength => "ACTIB",
            Self::ActiveMoietyBasis => "ACTIM",
            Self::ActiveReferenceBasis => "ACTIR",
            Self::Inactive => "IACT",
            Self::Adjuvant => "ADJV",
            Self::Contaminant => "CNTM",
            Self::Unrecognized(raw) => raw,
        }
    }

    pub fn is_active(&self) -> bool {
        matches!(
            self,
            Self::ActiveBasisOfStrength | Self::ActiveMoietyBasis | Self::ActiveReferenceBasis
        )
    }
}

/// One ingredient of a product with its strength ratio.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Ingredient {
    pub id: IngredientId,
    pub product_id: ProductId,
    pub substance_id: Option<IdentifiedSubstanceId>,
    pub class: Option<IngredientClass>,
    pub numerator: Quantity,
    pub denominator: Quantity,
    pub sequence_number: Option<i32>,
}

impl Ingredient {
    pub fn from_record(record: IngredientRecord) -> Self {
        Self {
            id: IngredientId(record.ingredient_id),
            product_id: ProductId(record.product_id),
            substance_id: record.identified_substance_id.map(IdentifiedSubstanceId),
            class: non_blank(record.class_code).map(|raw| IngredientClass::parse(&raw)),
            numerator: Quantity::new(
                record.quantity_numerator_value,
                record.quantity_numerator_unit,
            ),
            denominator: Quantity::new(
                record.quantity_denominator_value,
                record.quantity_denominator_unit,
            ),
            sequence_number: record.sequence_number,
        }
    }

    pub fn is_active(&self) -> bool {
        self.class.as_ref().is_some_and(IngredientClass::is_active)
    }
}

/// Route of administration: either a real coded route or a null-flavor marker.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RouteOfAdministration {
    pub id: RouteOfAdministrationId,
    pub product_id: ProductId,
    pub route: CodedValue,
    pub null_flavor: Option<String>,
}

impl RouteOfAdministration {
    pub fn from_record(record: RouteOfAdministrationRecord) -> Self {
        Self {
            id: RouteOfAdministrationId(record.route_of_administration_id),
            product_id: ProductId(record.product_id),
            route: CodedValue::new(
                record.route_code,
                record.route_code_system,
                record.route_display_name,
            ),
            null_flavor: non_blank(record.route_null_flavor).map(|nf| nf.to_ascii_uppercase()),
        }
    }
}

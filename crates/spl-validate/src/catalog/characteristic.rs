//! Product characteristics and attached documents.

use spl_model::{
    AttachedDocument, Characteristic, CharacteristicValue, ContractError, ParentEntity, Quantity,
    ValueKind, ValueTypeTag,
};

use super::{coded_complete, quantity_paired, units_recognized, zero_quantity};
use crate::issue::Severity;
use crate::rules::{Category, Outcome, Rule, RuleRegistry};

pub(super) fn register(registry: &mut RuleRegistry) -> Result<(), ContractError> {
    characteristic_rules(registry)?;
    attachment_rules(registry)
}

/// Quantities held by the physical-quantity and interval slots.
fn quantities(characteristic: &Characteristic) -> Vec<&Quantity> {
    characteristic
        .values
        .iter()
        .flat_map(|value| match value {
            CharacteristicValue::PhysicalQuantity(quantity) => vec![quantity],
            CharacteristicValue::Interval { low, high } => vec![low, high],
            _ => Vec::new(),
        })
        .collect()
}

fn kind_list(kinds: &[ValueKind]) -> String {
    kinds
        .iter()
        .map(ValueKind::code)
        .collect::<Vec<_>>()
        .join(", ")
}

fn characteristic_rules(registry: &mut RuleRegistry) -> Result<(), ContractError> {
    type R = Rule<Characteristic>;

    registry.register(R {
        name: "ValueTypeConsistency",
        category: Category::Discriminator,
        severity: Severity::Error,
        description: "Exactly one value slot is populated and it matches the declared value type",
        message: "characteristic value does not match its value type",
        check: |characteristic, _| {
            let populated = characteristic.populated_kinds();
            if populated.len() > 1 {
                return Outcome::FailWith(format!(
                    "more than one value slot is populated ({})",
                    kind_list(&populated)
                ));
            }
            match (characteristic.declared_kind(), populated.first()) {
                (Some(declared), Some(&actual)) if declared != actual => {
                    Outcome::FailWith(format!(
                        "value type {} declared but the {} slot is populated",
                        declared.code(),
                        actual.code()
                    ))
                }
                (Some(declared), None) => Outcome::FailWith(format!(
                    "value type {} declared but no value is populated",
                    declared.code()
                )),
                _ => Outcome::Pass,
            }
        },
    })?;

    registry.register(R {
        name: "ValueTypeRecognized",
        category: Category::Terminology,
        severity: Severity::Warning,
        description: "A declared value type is one of the known HL7 data types",
        message: "unrecognized value type",
        check: |characteristic, _| match &characteristic.declared {
            Some(ValueTypeTag::Unrecognized(raw)) => {
                Outcome::FailWith(format!("unrecognized value type {raw:?}"))
            }
            _ => Outcome::Pass,
        },
    })?;

    registry.register(R {
        name: "CharacteristicValueRequired",
        category: Category::ConditionalPresence,
        severity: Severity::Warning,
        description: "A characteristic carries a value",
        message: "characteristic has no value",
        check: |characteristic, _| Outcome::check(!characteristic.values.is_empty()),
    })?;

    registry.register(R {
        name: "CharacteristicCodeComplete",
        category: Category::Shape,
        severity: Severity::Error,
        description: "The characteristic code carries code, code system and display name",
        message: "characteristic code is incomplete",
        check: |characteristic, _| coded_complete(&characteristic.code, "characteristic code"),
    })?;

    registry.register(R {
        name: "CharacteristicOwnerRequired",
        category: Category::ConditionalPresence,
        severity: Severity::Error,
        description: "A characteristic describes exactly one product or packaging level",
        message: "characteristic describes neither a product nor a packaging level",
        check: |characteristic, _| match (
            characteristic.product_id,
            characteristic.packaging_level_id,
        ) {
            (None, None) => Outcome::Fail,
            (Some(product), Some(level)) => Outcome::FailWith(format!(
                "characteristic describes both product {product} and packaging level {level}"
            )),
            _ => Outcome::Pass,
        },
    })?;

    registry.register(R {
        name: "CharacteristicQuantityUnitPaired",
        category: Category::Range,
        severity: Severity::Error,
        description: "Quantity values and units are given together",
        message: "characteristic quantity is unpaired",
        check: |characteristic, _| {
            quantities(characteristic)
                .into_iter()
                .map(|quantity| quantity_paired(quantity, "characteristic quantity"))
                .find(|outcome| !outcome.is_pass())
                .unwrap_or(Outcome::Pass)
        },
    })?;

    registry.register(R {
        name: "CharacteristicUnitRecognized",
        category: Category::Terminology,
        severity: Severity::Warning,
        description: "Characteristic units are UCUM expressions",
        message: "unrecognized characteristic unit",
        check: |characteristic, ctx| units_recognized(quantities(characteristic), ctx.vocab),
    })?;

    registry.register(R {
        name: "CharacteristicIntervalOrder",
        category: Category::Range,
        severity: Severity::Error,
        description: "An interval's low bound does not exceed its high bound",
        message: "interval low bound exceeds high bound",
        check: |characteristic, _| match characteristic.value_of(ValueKind::Interval) {
            Some(CharacteristicValue::Interval { low, high }) => {
                match (low.value, high.value) {
                    (Some(lo), Some(hi)) if low.unit == high.unit && lo > hi => {
                        Outcome::FailWith(format!(
                            "interval low bound {lo} exceeds high bound {hi}"
                        ))
                    }
                    _ => Outcome::Pass,
                }
            }
            _ => Outcome::Pass,
        },
    })?;

    registry.register(R {
        name: "CharacteristicZeroQuantity",
        category: Category::Range,
        severity: Severity::Info,
        description: "A zero characteristic quantity is legal but unusual",
        message: "characteristic quantity is zero",
        check: |characteristic, _| match characteristic.value_of(ValueKind::PhysicalQuantity) {
            Some(CharacteristicValue::PhysicalQuantity(quantity)) => {
                zero_quantity([quantity], "characteristic quantity")
            }
            _ => Outcome::Pass,
        },
    })
}

fn attachment_rules(registry: &mut RuleRegistry) -> Result<(), ContractError> {
    type R = Rule<AttachedDocument>;

    registry.register(R {
        name: "AttachmentParentRecognized",
        category: Category::Discriminator,
        severity: Severity::Error,
        description: "An attachment names a parent record of a kind that can carry attachments",
        message: "attachment parent is not recognized",
        check: |attachment, _| match &attachment.parent {
            ParentEntity::Unrecognized { entity_type, id } => Outcome::FailWith(format!(
                "attachment parent {} {} is not a recognized parent",
                entity_type.as_deref().unwrap_or("(no type)"),
                id.map_or_else(|| "(no id)".to_string(), |id| id.to_string())
            )),
            _ => Outcome::Pass,
        },
    })?;

    registry.register(R {
        name: "AttachmentFileNameRequired",
        category: Category::Shape,
        severity: Severity::Error,
        description: "Attachments reference a file",
        message: "attachment has no file name",
        check: |attachment, _| Outcome::check(attachment.file_name.is_some()),
    })?;

    registry.register(R {
        name: "AttachmentMediaTypeRecognized",
        category: Category::Terminology,
        severity: Severity::Warning,
        description: "Attachments declare a recognized media type",
        message: "attachment has no media type",
        check: |attachment, ctx| match attachment.media_type.as_deref() {
            None => Outcome::Fail,
            Some(media_type) => Outcome::fail_if(ctx.vocab.media_type(media_type).is_none(), || {
                format!("unrecognized media type {media_type:?}")
            }),
        },
    })
}

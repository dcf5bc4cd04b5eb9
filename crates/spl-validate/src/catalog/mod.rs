//! The standard rule catalog, grouped by record family.

mod characteristic;
mod document;
mod licensing;
mod packaging;
mod product;
mod section;

use spl_model::{CodedValue, ContractError, Quantity, time};
use spl_vocab::Vocabulary;

use crate::rules::{Outcome, RuleRegistry};

pub(crate) fn register_all(registry: &mut RuleRegistry) -> Result<(), ContractError> {
    document::register(registry)?;
    section::register(registry)?;
    product::register(registry)?;
    packaging::register(registry)?;
    licensing::register(registry)?;
    characteristic::register(registry)?;
    Ok(())
}

// =============================================================================
// Shared checks
// =============================================================================

/// All three parts of a coded value are present.
fn coded_complete(value: &CodedValue, label: &str) -> Outcome {
    Outcome::fail_if(!value.is_complete(), || {
        format!("{label} is missing {}", value.missing_parts().join(", "))
    })
}

/// An optional timestamp, when present, is a valid HL7 date.
fn date_if_present(value: Option<&str>, label: &str) -> Outcome {
    match value {
        Some(raw) if !time::is_valid_hl7_date(raw) => {
            Outcome::FailWith(format!("{label} {raw:?} is not a valid HL7 timestamp"))
        }
        _ => Outcome::Pass,
    }
}

/// A required timestamp is present and a valid HL7 date.
fn date_required(value: Option<&str>, label: &str) -> Outcome {
    match value {
        None => Outcome::FailWith(format!("{label} is missing")),
        Some(raw) => date_if_present(Some(raw), label),
    }
}

/// Value and unit are both present or both absent.
fn quantity_paired(quantity: &Quantity, label: &str) -> Outcome {
    match (quantity.value, quantity.unit.as_deref()) {
        (Some(value), None) => Outcome::FailWith(format!("{label} {value} has no unit")),
        (None, Some(unit)) => Outcome::FailWith(format!("{label} unit {unit:?} has no value")),
        _ => Outcome::Pass,
    }
}

/// Every present unit is a recognized UCUM expression.
fn units_recognized<'q>(
    quantities: impl IntoIterator<Item = &'q Quantity>,
    vocab: &Vocabulary,
) -> Outcome {
    let unknown: Vec<&str> = quantities
        .into_iter()
        .filter_map(|quantity| quantity.unit.as_deref())
        .filter(|unit| !vocab.is_ucum_unit(unit))
        .collect();
    Outcome::fail_if(!unknown.is_empty(), || {
        format!("unrecognized UCUM unit {}", unknown.join(", "))
    })
}

fn zero_quantity<'q>(quantities: impl IntoIterator<Item = &'q Quantity>, label: &str) -> Outcome {
    let zero = quantities.into_iter().any(Quantity::is_zero);
    Outcome::fail_if(zero, || format!("{label} is zero"))
}

//! Packaging levels, marketing events and lot instances.

use spl_model::{ContractError, InstanceKind, PackagingLevel, ProductEvent, ProductInstance};
use spl_vocab::code_systems;

use super::{
    coded_complete, date_if_present, quantity_paired, units_recognized, zero_quantity,
};
use crate::issue::Severity;
use crate::rules::{Category, Outcome, Rule, RuleRegistry};

pub(super) fn register(registry: &mut RuleRegistry) -> Result<(), ContractError> {
    packaging_rules(registry)?;
    product_event_rules(registry)?;
    instance_rules(registry)
}

fn packaging_rules(registry: &mut RuleRegistry) -> Result<(), ContractError> {
    type R = Rule<PackagingLevel>;

    registry.register(R {
        name: "PackageQuantityUnitPaired",
        category: Category::Range,
        severity: Severity::Error,
        description: "Package quantity value and unit are given together",
        message: "package quantity is unpaired",
        check: |level, _| quantity_paired(&level.quantity, "package quantity"),
    })?;

    registry.register(R {
        name: "PackageQuantityUnitRecognized",
        category: Category::Terminology,
        severity: Severity::Warning,
        description: "Package quantity units are UCUM expressions",
        message: "unrecognized package quantity unit",
        check: |level, ctx| units_recognized([&level.quantity], ctx.vocab),
    })?;

    registry.register(R {
        name: "PackageCodeSystemNdc",
        category: Category::Terminology,
        severity: Severity::Warning,
        description: "Package codes are NDC package codes",
        message: "package code has no code system",
        check: |level, _| match (
            level.package_code.as_deref(),
            level.package_code_system.as_deref(),
        ) {
            (Some(_), None) => Outcome::Fail,
            (Some(code), Some(system)) if system != code_systems::NDC => {
                Outcome::FailWith(format!("package code {code} uses code system {system}, not NDC"))
            }
            _ => Outcome::Pass,
        },
    })?;

    registry.register(R {
        name: "PackageFormCodeComplete",
        category: Category::Shape,
        severity: Severity::Error,
        description: "The package form code carries code, code system and display name",
        message: "package form code is incomplete",
        check: |level, _| coded_complete(&level.form, "package form code"),
    })?;

    registry.register(R {
        name: "PackageZeroQuantity",
        category: Category::Range,
        severity: Severity::Info,
        description: "A zero package quantity is legal but unusual",
        message: "package quantity is zero",
        check: |level, _| zero_quantity([&level.quantity], "package quantity"),
    })?;

    registry.register(R {
        name: "PackagingOwnerRequired",
        category: Category::Hierarchy,
        severity: Severity::Error,
        description: "A packaging level belongs to a product or sits inside another level",
        message: "packaging level has neither a product nor an outer level",
        check: |level, ctx| {
            let nested = !ctx.hierarchies.packaging.parents(level.id).is_empty();
            Outcome::check(level.product_id.is_some() || nested)
        },
    })
}

// Always evaluated; marketing events have no conditional skip.
fn product_event_rules(registry: &mut RuleRegistry) -> Result<(), ContractError> {
    type R = Rule<ProductEvent>;

    registry.register(R {
        name: "ProductEventCodeComplete",
        category: Category::Shape,
        severity: Severity::Error,
        description: "The event code carries code, code system and display name",
        message: "product event code is incomplete",
        check: |event, _| coded_complete(&event.code, "product event code"),
    })?;

    registry.register(R {
        name: "ProductEventQuantityUnitPaired",
        category: Category::Range,
        severity: Severity::Error,
        description: "Event quantity value and unit are given together",
        message: "product event quantity is unpaired",
        check: |event, _| quantity_paired(&event.quantity, "product event quantity"),
    })?;

    registry.register(R {
        name: "ProductEventEffectiveTimeFormat",
        category: Category::Shape,
        severity: Severity::Warning,
        description: "An event start date, when given, is a valid HL7 timestamp",
        message: "product event start date is invalid",
        check: |event, _| {
            date_if_present(event.effective_time_low.as_deref(), "product event start date")
        },
    })?;

    registry.register(R {
        name: "ProductEventZeroQuantity",
        category: Category::Range,
        severity: Severity::Info,
        description: "A zero event quantity is legal but unusual",
        message: "product event quantity is zero",
        check: |event, _| zero_quantity([&event.quantity], "product event quantity"),
    })
}

fn instance_rules(registry: &mut RuleRegistry) -> Result<(), ContractError> {
    type R = Rule<ProductInstance>;

    registry.register(R {
        name: "LotNumberRequired",
        category: Category::Shape,
        severity: Severity::Error,
        description: "Lot instances carry a lot number",
        message: "lot has no lot number",
        check: |instance, _| Outcome::check(instance.lot_number.is_some()),
    })?;

    registry.register(R {
        name: "InstanceKindRecognized",
        category: Category::Terminology,
        severity: Severity::Warning,
        description: "Lot instances declare bulk, fill or label lot",
        message: "lot has no instance kind",
        check: |instance, _| match &instance.kind {
            None => Outcome::Fail,
            Some(InstanceKind::Unrecognized(raw)) => {
                Outcome::FailWith(format!("unrecognized lot instance kind {raw:?}"))
            }
            Some(_) => Outcome::Pass,
        },
    })?;

    registry.register(R {
        name: "LotExpirationDateFormat",
        category: Category::Shape,
        severity: Severity::Warning,
        description: "A lot expiration date, when given, is a valid HL7 timestamp",
        message: "lot expiration date is invalid",
        check: |instance, _| {
            date_if_present(instance.expiration_date.as_deref(), "lot expiration date")
        },
    })?;

    registry.register(R {
        name: "LotOwnerRequired",
        category: Category::Hierarchy,
        severity: Severity::Warning,
        description: "A lot belongs to a product or derives from another lot",
        message: "lot has neither a product nor a parent lot",
        check: |instance, ctx| {
            let derived = !ctx.hierarchies.lots.parents(instance.id).is_empty();
            Outcome::check(instance.product_id.is_some() || derived)
        },
    })?;

    registry.register(R {
        name: "LotGenealogyStageOrder",
        category: Category::Hierarchy,
        severity: Severity::Error,
        description: "Lots derive from earlier manufacturing stages: bulk, then fill, then label",
        message: "lot derives from a lot of the same or a later stage",
        check: |instance, ctx| {
            let Some(stage) = instance.kind.as_ref().and_then(InstanceKind::stage) else {
                return Outcome::Pass;
            };
            let offending = ctx
                .hierarchies
                .lots
                .parents(instance.id)
                .iter()
                .filter_map(|&parent| ctx.set.product_instances().get(parent))
                .find(|parent| {
                    parent
                        .kind
                        .as_ref()
                        .and_then(InstanceKind::stage)
                        .is_some_and(|parent_stage| parent_stage >= stage)
                });
            match offending {
                Some(parent) => Outcome::FailWith(format!(
                    "{} lot derives from {} lot {}",
                    instance.kind.as_ref().map_or("", InstanceKind::as_str),
                    parent.kind.as_ref().map_or("", InstanceKind::as_str),
                    parent.id
                )),
                None => Outcome::Pass,
            }
        },
    })
}

//! Products, ingredients, routes, substances and pharmacologic classes.

use spl_model::{
    ContractError, IdentifiedSubstance, Ingredient, IngredientClass, PharmacologicClass, Product,
    RouteOfAdministration, SubstanceRole,
};
use spl_vocab::code_systems;

use super::{coded_complete, quantity_paired, units_recognized, zero_quantity};
use crate::issue::Severity;
use crate::rules::{Category, Outcome, Rule, RuleRegistry};

pub(super) fn register(registry: &mut RuleRegistry) -> Result<(), ContractError> {
    product_rules(registry)?;
    route_rules(registry)?;
    ingredient_rules(registry)?;
    substance_rules(registry)?;
    pharmacologic_class_rules(registry)
}

fn product_rules(registry: &mut RuleRegistry) -> Result<(), ContractError> {
    type R = Rule<Product>;

    registry.register(R {
        name: "ProductNameRequired",
        category: Category::Shape,
        severity: Severity::Error,
        description: "Products carry a proprietary name",
        message: "product has no name",
        check: |product, _| Outcome::check(product.name.is_some()),
    })?;

    registry.register(R {
        name: "ProductFormCodeComplete",
        category: Category::Shape,
        severity: Severity::Error,
        description: "The dosage form code carries code, code system and display name",
        message: "dosage form code is incomplete",
        check: |product, _| coded_complete(&product.form, "dosage form code"),
    })?;

    registry.register(R {
        name: "ProductHasActiveIngredient",
        category: Category::ConditionalPresence,
        severity: Severity::Warning,
        description: "A product lists at least one active ingredient",
        message: "product has no active ingredient",
        check: |product, ctx| {
            let has_active = ctx
                .set
                .relations()
                .ingredients_of_product(product.id)
                .iter()
                .filter_map(|&id| ctx.set.ingredients().get(id))
                .any(Ingredient::is_active);
            Outcome::check(has_active)
        },
    })?;

    registry.register(R {
        name: "ProductRouteRequired",
        category: Category::ConditionalPresence,
        severity: Severity::Warning,
        description: "A product lists at least one route of administration",
        message: "product has no route of administration",
        check: |product, ctx| {
            Outcome::check(!ctx.set.relations().routes_of_product(product.id).is_empty())
        },
    })
}

fn route_rules(registry: &mut RuleRegistry) -> Result<(), ContractError> {
    type R = Rule<RouteOfAdministration>;

    registry.register(R {
        name: "RouteCodeOrNullFlavor",
        category: Category::Shape,
        severity: Severity::Error,
        description: "A route carries either a complete code or a null flavor, never both",
        message: "route has neither a code nor a null flavor",
        check: |route, _| {
            let coded = !route.route.is_absent();
            match (coded, route.null_flavor.as_deref()) {
                (true, Some(flavor)) => Outcome::FailWith(format!(
                    "route carries both a code and null flavor {flavor}"
                )),
                (false, None) => Outcome::Fail,
                (true, None) => coded_complete(&route.route, "route code"),
                (false, Some(_)) => Outcome::Pass,
            }
        },
    })?;

    registry.register(R {
        name: "RouteNullFlavorRecognized",
        category: Category::Terminology,
        severity: Severity::Warning,
        description: "Route null flavors come from the HL7 null flavor table",
        message: "unrecognized route null flavor",
        check: |route, _| match route.null_flavor.as_deref() {
            Some(flavor) if !code_systems::ROUTE_NULL_FLAVORS.contains(&flavor) => {
                Outcome::FailWith(format!("unrecognized null flavor {flavor:?}"))
            }
            _ => Outcome::Pass,
        },
    })
}

fn ingredient_rules(registry: &mut RuleRegistry) -> Result<(), ContractError> {
    type R = Rule<Ingredient>;

    registry.register(R {
        name: "IngredientClassRecognized",
        category: Category::Terminology,
        severity: Severity::Warning,
        description: "Ingredients declare a known ingredient class",
        message: "ingredient has no class",
        check: |ingredient, _| match &ingredient.class {
            None => Outcome::Fail,
            Some(IngredientClass::Unrecognized(raw)) => {
                Outcome::FailWith(format!("unrecognized ingredient class {raw:?}"))
            }
            Some(_) => Outcome::Pass,
        },
    })?;

    registry.register(R {
        name: "IngredientSubstanceRequired",
        category: Category::Shape,
        severity: Severity::Error,
        description: "Ingredients reference an identified substance",
        message: "ingredient references no substance",
        check: |ingredient, _| Outcome::check(ingredient.substance_id.is_some()),
    })?;

    registry.register(R {
        name: "IngredientNumeratorUnitPaired",
        category: Category::Range,
        severity: Severity::Error,
        description: "Strength numerator value and unit are given together",
        message: "strength numerator is unpaired",
        check: |ingredient, _| quantity_paired(&ingredient.numerator, "strength numerator"),
    })?;

    registry.register(R {
        name: "IngredientDenominatorUnitPaired",
        category: Category::Range,
        severity: Severity::Error,
        description: "Strength denominator value and unit are given together",
        message: "strength denominator is unpaired",
        check: |ingredient, _| quantity_paired(&ingredient.denominator, "strength denominator"),
    })?;

    registry.register(R {
        name: "ActiveIngredientStrengthRequired",
        category: Category::ConditionalPresence,
        severity: Severity::Warning,
        description: "Active ingredients state a strength",
        message: "active ingredient has no strength",
        check: |ingredient, _| {
            Outcome::check(!ingredient.is_active() || ingredient.numerator.value.is_some())
        },
    })?;

    registry.register(R {
        name: "IngredientUnitRecognized",
        category: Category::Terminology,
        severity: Severity::Warning,
        description: "Strength units are UCUM expressions",
        message: "unrecognized strength unit",
        check: |ingredient, ctx| {
            units_recognized([&ingredient.numerator, &ingredient.denominator], ctx.vocab)
        },
    })?;

    registry.register(R {
        name: "IngredientZeroQuantity",
        category: Category::Range,
        severity: Severity::Info,
        description: "A zero strength is legal but unusual",
        message: "strength is zero",
        check: |ingredient, _| {
            zero_quantity([&ingredient.numerator, &ingredient.denominator], "strength")
        },
    })
}

fn substance_rules(registry: &mut RuleRegistry) -> Result<(), ContractError> {
    type R = Rule<IdentifiedSubstance>;

    registry.register(R {
        name: "SubstanceRoleConsistency",
        category: Category::Discriminator,
        severity: Severity::Error,
        description: "Subject type and definition flag name a single substance role",
        message: "substance role is ambiguous",
        check: |substance, _| match &substance.role {
            SubstanceRole::Ambiguous {
                subject_type,
                is_definition,
            } => Outcome::FailWith(format!(
                "subject type {} with definition flag {is_definition} names no substance role",
                subject_type.as_deref().unwrap_or("(none)")
            )),
            _ => Outcome::Pass,
        },
    })?;

    registry.register(R {
        name: "SubstanceIdentifierRequired",
        category: Category::ConditionalPresence,
        severity: Severity::Error,
        description: "Referenced substances carry an identifier",
        message: "referenced substance has no identifier",
        check: |substance, _| {
            let is_reference = matches!(substance.role, SubstanceRole::Reference { .. });
            Outcome::check(!is_reference || substance.identifier.is_some())
        },
    })?;

    registry.register(R {
        name: "SubstanceUniiSystem",
        category: Category::Terminology,
        severity: Severity::Warning,
        description: "Referenced substances are identified by UNII",
        message: "substance identifier is not a UNII",
        check: |substance, _| {
            let is_reference = matches!(substance.role, SubstanceRole::Reference { .. });
            match substance.identifier_system.as_deref() {
                Some(system) if is_reference && system != code_systems::UNII => {
                    Outcome::FailWith(format!("substance identifier system {system} is not UNII"))
                }
                _ => Outcome::Pass,
            }
        },
    })
}

fn pharmacologic_class_rules(registry: &mut RuleRegistry) -> Result<(), ContractError> {
    type R = Rule<PharmacologicClass>;

    registry.register(R {
        name: "PharmClassCodeComplete",
        category: Category::Shape,
        severity: Severity::Error,
        description: "The class code carries code, code system and display name",
        message: "pharmacologic class code is incomplete",
        check: |class, _| coded_complete(&class.code, "pharmacologic class code"),
    })?;

    registry.register(R {
        name: "PharmClassCodeSystem",
        category: Category::Terminology,
        severity: Severity::Warning,
        description: "Pharmacologic class codes are drawn from MED-RT",
        message: "pharmacologic class code is not a MED-RT code",
        check: |class, _| match class.code.code_system.as_deref() {
            Some(system) if system != code_systems::MED_RT => Outcome::FailWith(format!(
                "pharmacologic class code system {system} is not MED-RT"
            )),
            _ => Outcome::Pass,
        },
    })?;

    registry.register(R {
        name: "PharmClassDefinitionRequired",
        category: Category::ConditionalPresence,
        severity: Severity::Warning,
        description: "A pharmacologic class names its defining substance",
        message: "pharmacologic class has no defining substance",
        check: |class, _| Outcome::check(class.defining_substance_id.is_some()),
    })?;

    registry.register(R {
        name: "PharmClassDefinitionLinked",
        category: Category::Discriminator,
        severity: Severity::Error,
        description: "A class's defining substance has the class-definition role",
        message: "defining substance is not a class definition",
        check: |class, ctx| {
            let defining = class
                .defining_substance_id
                .and_then(|id| ctx.set.identified_substances().get(id));
            match defining {
                Some(substance) if !substance.role.is_class_definition() => {
                    Outcome::FailWith(format!(
                        "defining substance {} is not a class definition",
                        substance.id
                    ))
                }
                _ => Outcome::Pass,
            }
        },
    })
}

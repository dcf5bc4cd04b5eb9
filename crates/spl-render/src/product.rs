//! Product contexts: ingredients, routes, packaging tree and lots.

use std::collections::BTreeSet;

use serde::Serialize;

use spl_hierarchy::{DocumentHierarchies, sibling_order};
use spl_model::{
    EntitySet, Ingredient, IngredientId, PackagingLevelId, Product, ProductEventId,
    ProductId, ProductInstanceId, RouteOfAdministrationId,
};

use crate::characteristic::CharacteristicRenderContext;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IngredientContext {
    pub id: IngredientId,
    pub substance_name: Option<String>,
    pub substance_identifier: Option<String>,
    pub class_code: Option<String>,
    pub is_active: bool,
    /// `"<numerator> per <denominator>"`, or whichever half is present.
    pub strength: Option<String>,
    pub sequence_number: Option<i32>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RouteContext {
    pub id: RouteOfAdministrationId,
    pub code: Option<String>,
    pub display_name: Option<String>,
    pub null_flavor: Option<String>,
    pub is_null_flavor: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProductEventContext {
    pub id: ProductEventId,
    pub code: Option<String>,
    pub display_name: Option<String>,
    pub quantity: Option<String>,
    pub effective_time: Option<String>,
}

/// One packaging level in preorder position.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PackagingContext {
    pub id: PackagingLevelId,
    /// Depth below the product's outermost level.
    pub depth: usize,
    pub parent_id: Option<PackagingLevelId>,
    pub package_code: Option<String>,
    pub form: Option<String>,
    pub quantity: Option<String>,
    pub characteristics: Vec<CharacteristicRenderContext>,
    pub events: Vec<ProductEventContext>,
    pub has_children: bool,
    pub has_characteristics: bool,
    pub has_events: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LotContext {
    pub id: ProductInstanceId,
    pub lot_number: Option<String>,
    pub kind: Option<String>,
    pub expiration_date: Option<String>,
    pub parent_ids: Vec<ProductInstanceId>,
    pub child_ids: Vec<ProductInstanceId>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProductRenderContext {
    pub id: ProductId,
    pub name: Option<String>,
    pub generic_name: Option<String>,
    pub form: Option<String>,
    /// Active ingredients first, then by sequence number and id.
    pub ingredients: Vec<IngredientContext>,
    pub routes: Vec<RouteContext>,
    pub characteristics: Vec<CharacteristicRenderContext>,
    /// Packaging levels in preorder from the product's outermost levels.
    pub packaging: Vec<PackagingContext>,
    pub lots: Vec<LotContext>,
    pub has_ingredients: bool,
    pub has_packaging: bool,
    pub has_characteristics: bool,
    pub has_routes: bool,
    pub has_lots: bool,
}

impl ProductRenderContext {
    pub fn build(set: &EntitySet, hierarchies: &DocumentHierarchies, product: &Product) -> Self {
        let relations = set.relations();

        let mut ingredients: Vec<&Ingredient> = relations
            .ingredients_of_product(product.id)
            .iter()
            .filter_map(|id| set.ingredients().get(*id))
            .collect();
        ingredients.sort_by(|a, b| {
            b.is_active().cmp(&a.is_active()).then_with(|| {
                sibling_order((a.sequence_number, a.id), (b.sequence_number, b.id))
            })
        });
        let ingredients: Vec<IngredientContext> = ingredients
            .into_iter()
            .map(|ingredient| ingredient_context(set, ingredient))
            .collect();

        let routes: Vec<RouteContext> = relations
            .routes_of_product(product.id)
            .iter()
            .filter_map(|id| set.routes_of_administration().get(*id))
            .map(|route| RouteContext {
                id: route.id,
                code: route.route.code.clone(),
                display_name: route.route.display_name.clone(),
                null_flavor: route.null_flavor.clone(),
                is_null_flavor: route.null_flavor.is_some() && route.route.is_absent(),
            })
            .collect();

        let characteristics: Vec<CharacteristicRenderContext> = relations
            .characteristics_of_product(product.id)
            .iter()
            .filter_map(|id| set.characteristics().get(*id))
            .map(CharacteristicRenderContext::build)
            .collect();

        let packaging = packaging_tree(set, hierarchies, product.id);

        let lots: Vec<LotContext> = relations
            .instances_of_product(product.id)
            .iter()
            .filter_map(|id| set.product_instances().get(*id))
            .map(|instance| LotContext {
                id: instance.id,
                lot_number: instance.lot_number.clone(),
                kind: instance.kind.as_ref().map(|kind| kind.as_str().to_string()),
                expiration_date: instance.expiration_date.clone(),
                parent_ids: hierarchies.lots.parents(instance.id).to_vec(),
                child_ids: hierarchies.lots.child_ids(instance.id),
            })
            .collect();

        Self {
            id: product.id,
            name: product.name.clone(),
            generic_name: product.generic_name.clone(),
            form: product.form.label().map(str::to_string),
            has_ingredients: !ingredients.is_empty(),
            has_packaging: !packaging.is_empty(),
            has_characteristics: !characteristics.is_empty(),
            has_routes: !routes.is_empty(),
            has_lots: !lots.is_empty(),
            ingredients,
            routes,
            characteristics,
            packaging,
            lots,
        }
    }
}

fn ingredient_context(set: &EntitySet, ingredient: &Ingredient) -> IngredientContext {
    let substance = ingredient
        .substance_id
        .and_then(|id| set.identified_substances().get(id));
    let strength = match (ingredient.numerator.display(), ingredient.denominator.display()) {
        (Some(numerator), Some(denominator)) => Some(format!("{numerator} per {denominator}")),
        (numerator, None) => numerator,
        (None, denominator) => denominator,
    };
    IngredientContext {
        id: ingredient.id,
        substance_name: substance.and_then(|substance| substance.name.clone()),
        substance_identifier: substance.and_then(|substance| substance.identifier.clone()),
        class_code: ingredient
            .class
            .as_ref()
            .map(|class| class.code().to_string()),
        is_active: ingredient.is_active(),
        strength,
        sequence_number: ingredient.sequence_number,
    }
}

/// Preorder over the packaging levels of one product.
///
/// Walks start at product-owned levels that have no product-owned ancestor,
/// so inner levels reached through containment are listed under their outer
/// level even when they name no product themselves.
fn packaging_tree(
    set: &EntitySet,
    hierarchies: &DocumentHierarchies,
    product: ProductId,
) -> Vec<PackagingContext> {
    let relations = set.relations();
    let owned: BTreeSet<PackagingLevelId> = relations
        .packaging_of_product(product)
        .iter()
        .copied()
        .collect();
    let roots = owned.iter().copied().filter(|level| {
        !hierarchies
            .packaging
            .ancestors(*level)
            .iter()
            .any(|ancestor| owned.contains(ancestor))
    });

    let mut out = Vec::new();
    for root in roots {
        for visit in hierarchies.packaging.preorder_from(root) {
            let Some(level) = set.packaging_levels().get(visit.id) else {
                continue;
            };
            let characteristics: Vec<CharacteristicRenderContext> = relations
                .characteristics_of_packaging(level.id)
                .iter()
                .filter_map(|id| set.characteristics().get(*id))
                .map(CharacteristicRenderContext::build)
                .collect();
            let events: Vec<ProductEventContext> = relations
                .events_of_packaging(level.id)
                .iter()
                .filter_map(|id| set.product_events().get(*id))
                .map(|event| ProductEventContext {
                    id: event.id,
                    code: event.code.code.clone(),
                    display_name: event.code.display_name.clone(),
                    quantity: event.quantity.display(),
                    effective_time: event.effective_time_low.clone(),
                })
                .collect();
            out.push(PackagingContext {
                id: level.id,
                depth: visit.depth,
                parent_id: visit.parent,
                package_code: level.package_code.clone(),
                form: level.form.label().map(str::to_string),
                quantity: level.quantity.display(),
                has_children: !hierarchies.packaging.children(level.id).is_empty(),
                has_characteristics: !characteristics.is_empty(),
                has_events: !events.is_empty(),
                characteristics,
                events,
            });
        }
    }
    out
}

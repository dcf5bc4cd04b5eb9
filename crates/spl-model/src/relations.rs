//! Reverse foreign-key index.
//!
//! Every list is in ascending child-id order because tables are walked in id
//! order while the index is built.

use std::collections::BTreeMap;

use crate::ids::{
    AttachedDocumentId, CharacteristicId, DisciplinaryActionId, DocumentId, IdentifiedSubstanceId,
    IngredientId, LicenseId, ObservationMediaId, OrganizationId, PackagingLevelId,
    PharmacologicClassId, ProductEventId, ProductId, ProductInstanceId, RouteOfAdministrationId,
    SectionId, SectionTextContentId, StructuredBodyId, TerritorialAuthorityId,
};
use crate::kind::EntityKind;
use crate::set::EntitySet;

#[derive(Debug, Clone, Default)]
pub struct Relations {
    bodies_by_document: BTreeMap<DocumentId, Vec<StructuredBodyId>>,
    organizations_by_document: BTreeMap<DocumentId, Vec<OrganizationId>>,
    sections_by_body: BTreeMap<StructuredBodyId, Vec<SectionId>>,
    content_by_section: BTreeMap<SectionId, Vec<SectionTextContentId>>,
    media_by_section: BTreeMap<SectionId, Vec<ObservationMediaId>>,
    products_by_section: BTreeMap<SectionId, Vec<ProductId>>,
    ingredients_by_product: BTreeMap<ProductId, Vec<IngredientId>>,
    routes_by_product: BTreeMap<ProductId, Vec<RouteOfAdministrationId>>,
    characteristics_by_product: BTreeMap<ProductId, Vec<CharacteristicId>>,
    characteristics_by_packaging: BTreeMap<PackagingLevelId, Vec<CharacteristicId>>,
    packaging_by_product: BTreeMap<ProductId, Vec<PackagingLevelId>>,
    instances_by_product: BTreeMap<ProductId, Vec<ProductInstanceId>>,
    events_by_packaging: BTreeMap<PackagingLevelId, Vec<ProductEventId>>,
    classes_by_substance: BTreeMap<IdentifiedSubstanceId, Vec<PharmacologicClassId>>,
    licenses_by_authority: BTreeMap<TerritorialAuthorityId, Vec<LicenseId>>,
    licenses_by_organization: BTreeMap<OrganizationId, Vec<LicenseId>>,
    actions_by_license: BTreeMap<LicenseId, Vec<DisciplinaryActionId>>,
    attachments_by_parent: BTreeMap<(EntityKind, i64), Vec<AttachedDocumentId>>,
}

fn push<K: Ord, V>(map: &mut BTreeMap<K, Vec<V>>, key: Option<K>, value: V) {
    if let Some(key) = key {
        map.entry(key).or_default().push(value);
    }
}

fn slice<'a, K: Ord, V>(map: &'a BTreeMap<K, Vec<V>>, key: &K) -> &'a [V] {
    map.get(key).map(Vec::as_slice).unwrap_or(&[])
}

impl Relations {
    pub(crate) fn build(set: &EntitySet) -> Self {
        let mut index = Self::default();

        for body in set.structured_bodies().iter() {
            push(&mut index.bodies_by_document, body.document_id, body.id);
        }
        for organization in set.organizations().iter() {
            push(
                &mut index.organizations_by_document,
                organization.document_id,
                organization.id,
            );
        }
        for section in set.sections().iter() {
            push(&mut index.sections_by_body, section.structured_body_id, section.id);
        }
        for block in set.section_text_contents().iter() {
            push(&mut index.content_by_section, Some(block.section_id), block.id);
        }
        for media in set.observation_media().iter() {
            push(&mut index.media_by_section, Some(media.section_id), media.id);
        }
        for product in set.products().iter() {
            push(&mut index.products_by_section, product.section_id, product.id);
        }
        for ingredient in set.ingredients().iter() {
            push(
                &mut index.ingredients_by_product,
                Some(ingredient.product_id),
                ingredient.id,
            );
        }
        for route in set.routes_of_administration().iter() {
            push(&mut index.routes_by_product, Some(route.product_id), route.id);
        }
        for characteristic in set.characteristics().iter() {
            push(
                &mut index.characteristics_by_product,
                characteristic.product_id,
                characteristic.id,
            );
            push(
                &mut index.characteristics_by_packaging,
                characteristic.packaging_level_id,
                characteristic.id,
            );
        }
        for level in set.packaging_levels().iter() {
            push(&mut index.packaging_by_product, level.product_id, level.id);
        }
        for instance in set.product_instances().iter() {
            push(&mut index.instances_by_product, instance.product_id, instance.id);
        }
        for event in set.product_events().iter() {
            push(
                &mut index.events_by_packaging,
                Some(event.packaging_level_id),
                event.id,
            );
        }
        for class in set.pharmacologic_classes().iter() {
            push(
                &mut index.classes_by_substance,
                class.defining_substance_id,
                class.id,
            );
        }
        for license in set.licenses().iter() {
            push(
                &mut index.licenses_by_authority,
                license.territorial_authority_id,
                license.id,
            );
            push(
                &mut index.licenses_by_organization,
                license.organization_id,
                license.id,
            );
        }
        for action in set.disciplinary_actions().iter() {
            push(&mut index.actions_by_license, Some(action.license_id), action.id);
        }
        for attachment in set.attached_documents().iter() {
            push(
                &mut index.attachments_by_parent,
                attachment.parent.target(),
                attachment.id,
            );
        }

        index
    }

    pub fn bodies_of_document(&self, id: DocumentId) -> &[StructuredBodyId] {
        slice(&self.bodies_by_document, &id)
    }

    pub fn organizations_of_document(&self, id: DocumentId) -> &[OrganizationId] {
        slice(&self.organizations_by_document, &id)
    }

    /// Sections pointing directly at the body.
    pub fn sections_of_body(&self, id: StructuredBodyId) -> &[SectionId] {
        slice(&self.sections_by_body, &id)
    }

    /// All text blocks of a section, nested or not.
    pub fn content_of_section(&self, id: SectionId) -> &[SectionTextContentId] {
        slice(&self.content_by_section, &id)
    }

    pub fn media_of_section(&self, id: SectionId) -> &[ObservationMediaId] {
        slice(&self.media_by_section, &id)
    }

    pub fn products_of_section(&self, id: SectionId) -> &[ProductId] {
        slice(&self.products_by_section, &id)
    }

    pub fn ingredients_of_product(&self, id: ProductId) -> &[IngredientId] {
        slice(&self.ingredients_by_product, &id)
    }

    pub fn routes_of_product(&self, id: ProductId) -> &[RouteOfAdministrationId] {
        slice(&self.routes_by_product, &id)
    }

    pub fn characteristics_of_product(&self, id: ProductId) -> &[CharacteristicId] {
        slice(&self.characteristics_by_product, &id)
    }

    pub fn characteristics_of_packaging(&self, id: PackagingLevelId) -> &[CharacteristicId] {
        slice(&self.characteristics_by_packaging, &id)
    }

    pub fn packaging_of_product(&self, id: ProductId) -> &[PackagingLevelId] {
        slice(&self.packaging_by_product, &id)
    }

    pub fn instances_of_product(&self, id: ProductId) -> &[ProductInstanceId] {
        slice(&self.instances_by_product, &id)
    }

    pub fn events_of_packaging(&self, id: PackagingLevelId) -> &[ProductEventId] {
        slice(&self.events_by_packaging, &id)
    }

    /// Classes whose defining substance is `id`.
    pub fn classes_defined_by(&self, id: IdentifiedSubstanceId) -> &[PharmacologicClassId] {
        slice(&self.classes_by_substance, &id)
    }

    pub fn licenses_of_authority(&self, id: TerritorialAuthorityId) -> &[LicenseId] {
        slice(&self.licenses_by_authority, &id)
    }

    pub fn licenses_of_organization(&self, id: OrganizationId) -> &[LicenseId] {
        slice(&self.licenses_by_organization, &id)
    }

    pub fn actions_of_license(&self, id: LicenseId) -> &[DisciplinaryActionId] {
        slice(&self.actions_by_license, &id)
    }

    pub fn attachments_of(&self, kind: EntityKind, raw: i64) -> &[AttachedDocumentId] {
        slice(&self.attachments_by_parent, &(kind, raw))
    }
}

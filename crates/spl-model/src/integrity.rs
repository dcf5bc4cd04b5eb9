//! Foreign-key resolution for the non-hierarchy links.
//!
//! Hierarchy edge tables are checked by the assemblers, which know which end
//! of an edge is missing.

use crate::error::StructuralError;
use crate::kind::EntityKind;
use crate::set::EntitySet;

struct Link {
    kind: EntityKind,
    id: i64,
    field: &'static str,
    target: EntityKind,
    target_id: i64,
}

impl Link {
    fn new(
        kind: EntityKind,
        id: i64,
        field: &'static str,
        target: EntityKind,
        target_id: i64,
    ) -> Self {
        Self {
            kind,
            id,
            field,
            target,
            target_id,
        }
    }
}

impl EntitySet {
    /// Resolve every non-hierarchy foreign key.
    ///
    /// Returns the first dangling link in (kind, id) order.
    pub fn check_references(&self) -> Result<(), StructuralError> {
        match self.dangling_references().into_iter().next() {
            Some(error) => Err(error),
            None => Ok(()),
        }
    }

    /// Every dangling non-hierarchy link, in (kind, id, field) order.
    pub fn dangling_references(&self) -> Vec<StructuralError> {
        self.links()
            .into_iter()
            .filter(|link| !self.contains(link.target, link.target_id))
            .map(|link| StructuralError::DanglingReference {
                kind: link.kind,
                id: link.id,
                field: link.field,
                target: link.target,
                target_id: link.target_id,
            })
            .collect()
    }

    fn links(&self) -> Vec<Link> {
        use EntityKind as K;

        let mut links = Vec::new();

        for attachment in self.attached_documents().iter() {
            if let Some((target, target_id)) = attachment.parent.target() {
                links.push(Link::new(
                    K::AttachedDocument,
                    attachment.id.0,
                    "ParentEntityID",
                    target,
                    target_id,
                ));
            }
        }
        for characteristic in self.characteristics().iter() {
            if let Some(product) = characteristic.product_id {
                links.push(Link::new(
                    K::Characteristic,
                    characteristic.id.0,
                    "ProductID",
                    K::Product,
                    product.0,
                ));
            }
            if let Some(level) = characteristic.packaging_level_id {
                links.push(Link::new(
                    K::Characteristic,
                    characteristic.id.0,
                    "PackagingLevelID",
                    K::PackagingLevel,
                    level.0,
                ));
            }
        }
        for action in self.disciplinary_actions().iter() {
            links.push(Link::new(
                K::DisciplinaryAction,
                action.id.0,
                "LicenseID",
                K::License,
                action.license_id.0,
            ));
        }
        for ingredient in self.ingredients().iter() {
            links.push(Link::new(
                K::Ingredient,
                ingredient.id.0,
                "ProductID",
                K::Product,
                ingredient.product_id.0,
            ));
            if let Some(substance) = ingredient.substance_id {
                links.push(Link::new(
                    K::Ingredient,
                    ingredient.id.0,
                    "IdentifiedSubstanceID",
                    K::IdentifiedSubstance,
                    substance.0,
                ));
            }
        }
        for license in self.licenses().iter() {
            if let Some(authority) = license.territorial_authority_id {
                links.push(Link::new(
                    K::License,
                    license.id.0,
                    "TerritorialAuthorityID",
                    K::TerritorialAuthority,
                    authority.0,
                ));
            }
            if let Some(organization) = license.organization_id {
                links.push(Link::new(
                    K::License,
                    license.id.0,
                    "OrganizationID",
                    K::Organization,
                    organization.0,
                ));
            }
        }
        for media in self.observation_media().iter() {
            links.push(Link::new(
                K::ObservationMedia,
                media.id.0,
                "SectionID",
                K::Section,
                media.section_id.0,
            ));
        }
        for organization in self.organizations().iter() {
            if let Some(document) = organization.document_id {
                links.push(Link::new(
                    K::Organization,
                    organization.id.0,
                    "DocumentID",
                    K::Document,
                    document.0,
                ));
            }
        }
        for level in self.packaging_levels().iter() {
            if let Some(product) = level.product_id {
                links.push(Link::new(
                    K::PackagingLevel,
                    level.id.0,
                    "ProductID",
                    K::Product,
                    product.0,
                ));
            }
        }
        for class in self.pharmacologic_classes().iter() {
            if let Some(substance) = class.defining_substance_id {
                links.push(Link::new(
                    K::PharmacologicClass,
                    class.id.0,
                    "IdentifiedSubstanceID",
                    K::IdentifiedSubstance,
                    substance.0,
                ));
            }
        }
        for product in self.products().iter() {
            if let Some(section) = product.section_id {
                links.push(Link::new(
                    K::Product,
                    product.id.0,
                    "SectionID",
                    K::Section,
                    section.0,
                ));
            }
        }
        for event in self.product_events().iter() {
            links.push(Link::new(
                K::ProductEvent,
                event.id.0,
                "PackagingLevelID",
                K::PackagingLevel,
                event.packaging_level_id.0,
            ));
        }
        for instance in self.product_instances().iter() {
            if let Some(product) = instance.product_id {
                links.push(Link::new(
                    K::ProductInstance,
                    instance.id.0,
                    "ProductID",
                    K::Product,
                    product.0,
                ));
            }
        }
        for route in self.routes_of_administration().iter() {
            links.push(Link::new(
                K::RouteOfAdministration,
                route.id.0,
                "ProductID",
                K::Product,
                route.product_id.0,
            ));
        }
        for section in self.sections().iter() {
            if let Some(body) = section.structured_body_id {
                links.push(Link::new(
                    K::Section,
                    section.id.0,
                    "StructuredBodyID",
                    K::StructuredBody,
                    body.0,
                ));
            }
        }
        for block in self.section_text_contents().iter() {
            links.push(Link::new(
                K::SectionTextContent,
                block.id.0,
                "SectionID",
                K::Section,
                block.section_id.0,
            ));
        }
        for body in self.structured_bodies().iter() {
            if let Some(document) = body.document_id {
                links.push(Link::new(
                    K::StructuredBody,
                    body.id.0,
                    "DocumentID",
                    K::Document,
                    document.0,
                ));
            }
        }

        links
    }
}

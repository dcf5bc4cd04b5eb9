//! The immutable entity set built from one document snapshot.

use std::collections::BTreeMap;

use tracing::debug;

use crate::entity::{
    AttachedDocument, Characteristic, DisciplinaryAction, Document, IdentifiedSubstance,
    Ingredient, License, LotHierarchy, ObservationMedia, Organization, PackagingHierarchy,
    PackagingLevel, PharmacologicClass, PharmacologicClassHierarchy, Product, ProductEvent,
    ProductInstance, RouteOfAdministration, Section, SectionHierarchy, SectionTextContent,
    StructuredBody, TerritorialAuthority,
};
use crate::error::ContractError;
use crate::ids::{
    AttachedDocumentId, CharacteristicId, DisciplinaryActionId, DocumentId, EntityId,
    IdentifiedSubstanceId, IngredientId, LicenseId, LotHierarchyId, ObservationMediaId,
    OrganizationId, PackagingHierarchyId, PackagingLevelId, PharmacologicClassHierarchyId,
    PharmacologicClassId, ProductEventId, ProductId, ProductInstanceId, RouteOfAdministrationId,
    SectionHierarchyId, SectionId, SectionTextContentId, StructuredBodyId,
    TerritorialAuthorityId,
};
use crate::kind::EntityKind;
use crate::relations::Relations;
use crate::snapshot::Snapshot;

/// A record kind stored in an [`EntitySet`].
pub trait Entity: Sized + 'static {
    type Id: EntityId;

    const KIND: EntityKind;

    fn id(&self) -> Self::Id;

    fn table(set: &EntitySet) -> &EntityTable<Self>;
}

/// Arena of one record kind, keyed and iterated by ascending id.
#[derive(Debug, Clone)]
pub struct EntityTable<T: Entity> {
    rows: BTreeMap<T::Id, T>,
}

impl<T: Entity> Default for EntityTable<T> {
    fn default() -> Self {
        Self {
            rows: BTreeMap::new(),
        }
    }
}

impl<T: Entity> EntityTable<T> {
    /// Add a row. Identities are unique per kind.
    pub fn insert(&mut self, row: T) -> Result<(), ContractError> {
        let id = row.id();
        if self.rows.contains_key(&id) {
            return Err(ContractError::DuplicateIdentity {
                kind: T::KIND,
                id: id.raw(),
            });
        }
        self.rows.insert(id, row);
        Ok(())
    }

    pub fn get(&self, id: T::Id) -> Option<&T> {
        self.rows.get(&id)
    }

    pub fn contains(&self, id: T::Id) -> bool {
        self.rows.contains_key(&id)
    }

    pub fn contains_raw(&self, raw: i64) -> bool {
        self.rows.contains_key(&T::Id::new(raw))
    }

    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.rows.values()
    }

    pub fn ids(&self) -> impl Iterator<Item = T::Id> + '_ {
        self.rows.keys().copied()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

macro_rules! entity_set {
    ($($ty:ident => $id:ident, $field:ident;)+) => {
        $(
            impl Entity for $ty {
                type Id = $id;

                const KIND: EntityKind = EntityKind::$ty;

                fn id(&self) -> $id {
                    self.id
                }

                fn table(set: &EntitySet) -> &EntityTable<Self> {
                    &set.$field
                }
            }
        )+

        /// Every record of one labeling document, grouped by kind.
        ///
        /// Built once by [`EntitySet::from_snapshot`] and never mutated
        /// afterwards, so it can be shared freely between threads.
        #[derive(Debug, Clone, Default)]
        pub struct EntitySet {
            $($field: EntityTable<$ty>,)+
            relations: Relations,
        }

        impl EntitySet {
            $(
                pub fn $field(&self) -> &EntityTable<$ty> {
                    &self.$field
                }
            )+

            /// Row count for one kind.
            pub fn count(&self, kind: EntityKind) -> usize {
                match kind {
                    $(EntityKind::$ty => self.$field.len(),)+
                }
            }

            /// Whether a row of `kind` with raw id `raw` exists.
            pub fn contains(&self, kind: EntityKind, raw: i64) -> bool {
                match kind {
                    $(EntityKind::$ty => self.$field.contains_raw(raw),)+
                }
            }
        }
    };
}

entity_set! {
    AttachedDocument => AttachedDocumentId, attached_documents;
    Characteristic => CharacteristicId, characteristics;
    DisciplinaryAction => DisciplinaryActionId, disciplinary_actions;
    Document => DocumentId, documents;
    IdentifiedSubstance => IdentifiedSubstanceId, identified_substances;
    Ingredient => IngredientId, ingredients;
    License => LicenseId, licenses;
    LotHierarchy => LotHierarchyId, lot_hierarchies;
    ObservationMedia => ObservationMediaId, observation_media;
    Organization => OrganizationId, organizations;
    PackagingHierarchy => PackagingHierarchyId, packaging_hierarchies;
    PackagingLevel => PackagingLevelId, packaging_levels;
    PharmacologicClass => PharmacologicClassId, pharmacologic_classes;
    PharmacologicClassHierarchy => PharmacologicClassHierarchyId, pharmacologic_class_hierarchies;
    Product => ProductId, products;
    ProductEvent => ProductEventId, product_events;
    ProductInstance => ProductInstanceId, product_instances;
    RouteOfAdministration => RouteOfAdministrationId, routes_of_administration;
    Section => SectionId, sections;
    SectionHierarchy => SectionHierarchyId, section_hierarchies;
    SectionTextContent => SectionTextContentId, section_text_contents;
    StructuredBody => StructuredBodyId, structured_bodies;
    TerritorialAuthority => TerritorialAuthorityId, territorial_authorities;
}

fn load<T: Entity, R>(
    records: Vec<R>,
    build: impl Fn(R) -> T,
) -> Result<EntityTable<T>, ContractError> {
    let mut table = EntityTable::default();
    for record in records {
        table.insert(build(record))?;
    }
    Ok(table)
}

impl EntitySet {
    /// Map a flat snapshot into typed tables.
    ///
    /// Fails only on duplicate identities within a kind. Dangling links are
    /// left in place and reported by [`EntitySet::check_references`].
    pub fn from_snapshot(snapshot: Snapshot) -> Result<Self, ContractError> {
        let record_count = snapshot.record_count();
        let mut set = Self {
            attached_documents: load(snapshot.attached_documents, AttachedDocument::from_record)?,
            characteristics: load(snapshot.characteristics, Characteristic::from_record)?,
            disciplinary_actions: load(
                snapshot.disciplinary_actions,
                DisciplinaryAction::from_record,
            )?,
            documents: load(snapshot.documents, Document::from_record)?,
            identified_substances: load(
                snapshot.identified_substances,
                IdentifiedSubstance::from_record,
            )?,
            ingredients: load(snapshot.ingredients, Ingredient::from_record)?,
            licenses: load(snapshot.licenses, License::from_record)?,
            lot_hierarchies: load(snapshot.lot_hierarchies, LotHierarchy::from_record)?,
            observation_media: load(snapshot.observation_media, ObservationMedia::from_record)?,
            organizations: load(snapshot.organizations, Organization::from_record)?,
            packaging_hierarchies: load(
                snapshot.packaging_hierarchies,
                PackagingHierarchy::from_record,
            )?,
            packaging_levels: load(snapshot.packaging_levels, PackagingLevel::from_record)?,
            pharmacologic_classes: load(
                snapshot.pharmacologic_classes,
                PharmacologicClass::from_record,
            )?,
            pharmacologic_class_hierarchies: load(
                snapshot.pharmacologic_class_hierarchies,
                PharmacologicClassHierarchy::from_record,
            )?,
            products: load(snapshot.products, Product::from_record)?,
            product_events: load(snapshot.product_events, ProductEvent::from_record)?,
            product_instances: load(snapshot.product_instances, ProductInstance::from_record)?,
            routes_of_administration: load(
                snapshot.routes_of_administration,
                RouteOfAdministration::from_record,
            )?,
            sections: load(snapshot.sections, Section::from_record)?,
            section_hierarchies: load(snapshot.section_hierarchies, SectionHierarchy::from_record)?,
            section_text_contents: load(
                snapshot.section_text_contents,
                SectionTextContent::from_record,
            )?,
            structured_bodies: load(snapshot.structured_bodies, StructuredBody::from_record)?,
            territorial_authorities: load(
                snapshot.territorial_authorities,
                TerritorialAuthority::from_record,
            )?,
            relations: Relations::default(),
        };
        set.relations = Relations::build(&set);
        debug!(
            records = record_count,
            sections = set.sections.len(),
            products = set.products.len(),
            "Loaded entity set"
        );
        Ok(set)
    }

    /// Typed table for `T`.
    pub fn table<T: Entity>(&self) -> &EntityTable<T> {
        T::table(self)
    }

    pub fn get<T: Entity>(&self, id: T::Id) -> Option<&T> {
        T::table(self).get(id)
    }

    /// The single document record.
    pub fn document(&self) -> Result<&Document, ContractError> {
        let mut documents = self.documents.iter();
        match (documents.next(), documents.next()) {
            (Some(document), None) => Ok(document),
            _ => Err(ContractError::DocumentCount {
                found: self.documents.len(),
            }),
        }
    }

    /// Foreign-key index built at load time.
    pub fn relations(&self) -> &Relations {
        &self.relations
    }

    /// Total rows across all kinds.
    pub fn record_count(&self) -> usize {
        EntityKind::all().iter().map(|kind| self.count(*kind)).sum()
    }
}

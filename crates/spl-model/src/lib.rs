//! Structured Product Labeling entity model.
//!
//! A labeling document arrives as a flat, normalized snapshot: one table per
//! record kind, linked by nullable integer foreign keys. This crate turns that
//! snapshot into an immutable [`EntitySet`]:
//!
//! - every kind lives in its own arena table keyed by a typed id
//! - discriminator-encoded records (characteristic values, identified
//!   substances, attached-document parents) become explicit sum types
//! - foreign keys are resolved by [`EntitySet::check_references`], and a
//!   dangling link is a [`StructuralError`] rather than a silent `None`

pub mod coded;
pub mod entity;
pub mod error;
pub mod ids;
pub mod kind;
pub mod relations;
pub mod set;
pub mod snapshot;
pub mod time;

mod integrity;

pub use coded::{CodedValue, Quantity, non_blank};
pub use entity::{
    AttachedDocument, Characteristic, CharacteristicValue, ContentType, DisciplinaryAction,
    Document, IdentifiedSubstance, Ingredient, IngredientClass, InstanceKind, License,
    LicenseStatus, LotHierarchy, ObservationMedia, Organization, PackagingHierarchy,
    PackagingLevel, ParentEntity, PharmacologicClass, PharmacologicClassHierarchy, Product,
    ProductEvent, ProductInstance, ReferenceSubject, RouteOfAdministration, Section,
    SectionHierarchy, SectionTextContent, StructuredBody, SubstanceRole, TerritorialAuthority,
    ValueKind, ValueTypeTag,
};
pub use error::{ContractError, StructuralError};
pub use ids::{
    AttachedDocumentId, CharacteristicId, DisciplinaryActionId, DocumentId, EntityId,
    IdentifiedSubstanceId, IngredientId, LicenseId, LotHierarchyId, ObservationMediaId,
    OrganizationId, PackagingHierarchyId, PackagingLevelId, PharmacologicClassHierarchyId,
    PharmacologicClassId, ProductEventId, ProductId, ProductInstanceId, RouteOfAdministrationId,
    SectionHierarchyId, SectionId, SectionTextContentId, StructuredBodyId,
    TerritorialAuthorityId,
};
pub use kind::{EntityKind, HierarchyKind};
pub use relations::Relations;
pub use set::{Entity, EntitySet, EntityTable};
pub use snapshot::Snapshot;

//! Typed entity records.
//!
//! Each record is built from its flat snapshot row by a `from_record`
//! constructor. Blank text becomes `None`, coded triples become
//! [`CodedValue`](crate::CodedValue), and discriminator columns become enums.

mod attachment;
mod characteristic;
mod document;
mod licensing;
mod lot;
mod packaging;
mod product;
mod section;
mod substance;

pub use attachment::{AttachedDocument, ParentEntity};
pub use characteristic::{Characteristic, CharacteristicValue, ValueKind, ValueTypeTag};
pub use document::{Document, Organization, StructuredBody};
pub use licensing::{DisciplinaryAction, License, LicenseStatus, TerritorialAuthority};
pub use lot::{InstanceKind, LotHierarchy, ProductInstance};
pub use packaging::{PackagingHierarchy, PackagingLevel, ProductEvent};
pub use product::{Ingredient, IngredientClass, Product, RouteOfAdministration};
pub use section::{
    ContentType, ObservationMedia, Section, SectionHierarchy, SectionTextContent,
};
pub use substance::{
    IdentifiedSubstance, PharmacologicClass, PharmacologicClassHierarchy, ReferenceSubject,
    SubstanceRole,
};

#![deny(unsafe_code)]

use std::fmt;
use std::hash::Hash;

use serde::{Deserialize, Serialize};

/// Integer identity of a record within its own kind's table.
///
/// Ids of different kinds are distinct types, so a `SectionId` can never be
/// used to look up a `ProductId` row.
pub trait EntityId:
    Copy + Eq + Ord + Hash + fmt::Debug + fmt::Display + Send + Sync + 'static
{
    fn new(raw: i64) -> Self;

    fn raw(self) -> i64;
}

macro_rules! entity_ids {
    ($($name:ident),+ $(,)?) => {
        $(
            #[derive(
                Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
            )]
            #[serde(transparent)]
            pub struct $name(pub i64);

            impl EntityId for $name {
                fn new(raw: i64) -> Self {
                    Self(raw)
                }

                fn raw(self) -> i64 {
                    self.0
                }
            }

            impl fmt::Display for $name {
                fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                    write!(f, "{}", self.0)
                }
            }

            impl From<i64> for $name {
                fn from(raw: i64) -> Self {
                    Self(raw)
                }
            }
        )+
    };
}

entity_ids!(
    AttachedDocumentId,
    CharacteristicId,
    DisciplinaryActionId,
    DocumentId,
    IdentifiedSubstanceId,
    IngredientId,
    LicenseId,
    LotHierarchyId,
    ObservationMediaId,
    OrganizationId,
    PackagingHierarchyId,
    PackagingLevelId,
    PharmacologicClassHierarchyId,
    PharmacologicClassId,
    ProductEventId,
    ProductId,
    ProductInstanceId,
    RouteOfAdministrationId,
    SectionHierarchyId,
    SectionId,
    SectionTextContentId,
    StructuredBodyId,
    TerritorialAuthorityId,
);

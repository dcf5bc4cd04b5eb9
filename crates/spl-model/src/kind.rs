//! Record kinds and hierarchy dimensions.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Every record kind carried by an entity set.
///
/// Variants are declared in alphabetical order of their canonical names, so
/// the derived `Ord` agrees with ordering by [`EntityKind::as_str`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum EntityKind {
    AttachedDocument,
    Characteristic,
    DisciplinaryAction,
    Document,
    IdentifiedSubstance,
    Ingredient,
    License,
    LotHierarchy,
    ObservationMedia,
    Organization,
    PackagingHierarchy,
    PackagingLevel,
    PharmacologicClass,
    PharmacologicClassHierarchy,
    Product,
    ProductEvent,
    ProductInstance,
    RouteOfAdministration,
    Section,
    SectionHierarchy,
    SectionTextContent,
    StructuredBody,
    TerritorialAuthority,
}

impl EntityKind {
    pub const fn all() -> &'static [Self] {
        &[
            Self::AttachedDocument,
            Self::Characteristic,
            Self::DisciplinaryAction,
            Self::Document,
            Self::IdentifiedSubstance,
            Self::Ingredient,
            Self::License,
            Self::LotHierarchy,
            Self::ObservationMedia,
            Self::Organization,
            Self::PackagingHierarchy,
            Self::PackagingLevel,
            Self::PharmacologicClass,
            Self::PharmacologicClassHierarchy,
            Self::Product,
            Self::ProductEvent,
            Self::ProductInstance,
            Self::RouteOfAdministration,
            Self::Section,
            Self::SectionHierarchy,
            Self::SectionTextContent,
            Self::StructuredBody,
            Self::TerritorialAuthority,
        ]
    }

    /// Canonical table name as used by the relational source.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::AttachedDocument => "AttachedDocument",
            Self::Characteristic => "Characteristic",
            Self::DisciplinaryAction => "DisciplinaryAction",
            Self::Document => "Document",
            Self::IdentifiedSubstance => "IdentifiedSubstance",
            Self::Ingredient => "Ingredient",
            Self::License => "License",
            Self::LotHierarchy => "LotHierarchy",
            Self::ObservationMedia => "ObservationMedia",
            Self::Organization => "Organization",
            Self::PackagingHierarchy => "PackagingHierarchy",
            Self::PackagingLevel => "PackagingLevel",
            Self::PharmacologicClass => "PharmacologicClass",
            Self::PharmacologicClassHierarchy => "PharmacologicClassHierarchy",
            Self::Product => "Product",
            Self::ProductEvent => "ProductEvent",
            Self::ProductInstance => "ProductInstance",
            Self::RouteOfAdministration => "RouteOfAdministration",
            Self::Section => "Section",
            Self::SectionHierarchy => "SectionHierarchy",
            Self::SectionTextContent => "SectionTextContent",
            Self::StructuredBody => "StructuredBody",
            Self::TerritorialAuthority => "TerritorialAuthority",
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EntityKind {
    type Err = String;

    /// Parse a table name. Matching ignores case and surrounding whitespace.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        Self::all()
            .iter()
            .copied()
            .find(|kind| kind.as_str().eq_ignore_ascii_case(trimmed))
            .ok_or_else(|| format!("Unknown entity kind: {s}"))
    }
}

/// The independent hierarchy dimensions reconstructed from a document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum HierarchyKind {
    Section,
    TextContent,
    Packaging,
    Lot,
    PharmacologicClass,
}

impl HierarchyKind {
    pub const fn all() -> &'static [Self] {
        &[
            Self::Section,
            Self::TextContent,
            Self::Packaging,
            Self::Lot,
            Self::PharmacologicClass,
        ]
    }

    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Section => "Section",
            Self::TextContent => "TextContent",
            Self::Packaging => "Packaging",
            Self::Lot => "Lot",
            Self::PharmacologicClass => "PharmacologicClass",
        }
    }

    /// Kind of the records that act as nodes.
    pub const fn node_kind(&self) -> EntityKind {
        match self {
            Self::Section => EntityKind::Section,
            Self::TextContent => EntityKind::SectionTextContent,
            Self::Packaging => EntityKind::PackagingLevel,
            Self::Lot => EntityKind::ProductInstance,
            Self::PharmacologicClass => EntityKind::PharmacologicClass,
        }
    }

    /// Kind of the records that carry the edges.
    ///
    /// Text content has no join table: each block points at its parent block.
    pub const fn edge_kind(&self) -> EntityKind {
        match self {
            Self::Section => EntityKind::SectionHierarchy,
            Self::TextContent => EntityKind::SectionTextContent,
            Self::Packaging => EntityKind::PackagingHierarchy,
            Self::Lot => EntityKind::LotHierarchy,
            Self::PharmacologicClass => EntityKind::PharmacologicClassHierarchy,
        }
    }

    /// Column naming the parent end of an edge.
    pub const fn parent_field(&self) -> &'static str {
        match self {
            Self::Section => "ParentSectionID",
            Self::TextContent => "ParentSectionTextContentID",
            Self::Packaging => "OuterPackagingLevelID",
            Self::Lot => "ParentInstanceID",
            Self::PharmacologicClass => "ParentPharmacologicClassID",
        }
    }

    /// Column naming the child end of an edge.
    pub const fn child_field(&self) -> &'static str {
        match self {
            Self::Section => "ChildSectionID",
            Self::TextContent => "SectionTextContentID",
            Self::Packaging => "InnerPackagingLevelID",
            Self::Lot => "ChildInstanceID",
            Self::PharmacologicClass => "ChildPharmacologicClassID",
        }
    }
}

impl fmt::Display for HierarchyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kind_order_matches_name_order() {
        let mut by_name: Vec<EntityKind> = EntityKind::all().to_vec();
        by_name.sort_by_key(|kind| kind.as_str());
        let mut by_ord: Vec<EntityKind> = EntityKind::all().to_vec();
        by_ord.sort();
        assert_eq!(by_name, by_ord);
    }

    #[test]
    fn kind_from_str_ignores_case() {
        assert_eq!(
            "section".parse::<EntityKind>().unwrap(),
            EntityKind::Section
        );
        assert_eq!(
            " DisciplinaryAction ".parse::<EntityKind>().unwrap(),
            EntityKind::DisciplinaryAction
        );
        assert!("Widget".parse::<EntityKind>().is_err());
    }
}

//! The five hierarchy dimensions of a labeling document.

use std::collections::BTreeMap;

use serde::Serialize;
use tracing::debug;

use spl_model::{
    EntitySet, HierarchyKind, PackagingLevelId, PharmacologicClassId, ProductInstanceId,
    SectionId, SectionTextContentId, StructuredBodyId, StructuralError,
};

use crate::hierarchy::{EdgeSpec, Hierarchy, Shape, sibling_order};

/// Section nesting, with roots partitioned by owning structured body.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SectionForest {
    pub hierarchy: Hierarchy<SectionId>,
    /// Root sections owned by each structured body, ascending by id.
    pub body_roots: BTreeMap<StructuredBodyId, Vec<SectionId>>,
    /// Root sections with no owning body.
    pub standalone_roots: Vec<SectionId>,
}

impl SectionForest {
    pub fn assemble(set: &EntitySet) -> Result<Self, StructuralError> {
        let hierarchy = Hierarchy::assemble(
            HierarchyKind::Section,
            Shape::Forest,
            set.sections().ids(),
            set.section_hierarchies().iter().map(|edge| EdgeSpec {
                edge_id: edge.id.0,
                parent: edge.parent_id,
                child: edge.child_id,
                sequence: edge.sequence_number,
            }),
        )?;

        let mut body_roots: BTreeMap<StructuredBodyId, Vec<SectionId>> = BTreeMap::new();
        let mut standalone_roots = Vec::new();
        for &root in hierarchy.roots() {
            match set.sections().get(root).and_then(|s| s.structured_body_id) {
                Some(body) => body_roots.entry(body).or_default().push(root),
                None => standalone_roots.push(root),
            }
        }

        Ok(Self {
            hierarchy,
            body_roots,
            standalone_roots,
        })
    }

    /// Roots in document order: body-owned roots by body, then standalone roots.
    pub fn ordered_roots(&self) -> Vec<SectionId> {
        self.body_roots
            .values()
            .flatten()
            .chain(self.standalone_roots.iter())
            .copied()
            .collect()
    }

    pub fn is_standalone(&self, id: SectionId) -> bool {
        self.standalone_roots.contains(&id)
    }
}

/// Text block nesting, with root blocks grouped per owning section.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ContentForest {
    pub hierarchy: Hierarchy<SectionTextContentId>,
    /// Root blocks of each section ordered by `(sequence, id)`.
    pub section_roots: BTreeMap<SectionId, Vec<SectionTextContentId>>,
}

impl ContentForest {
    pub fn assemble(set: &EntitySet) -> Result<Self, StructuralError> {
        let blocks = set.section_text_contents();
        let hierarchy = Hierarchy::assemble(
            HierarchyKind::TextContent,
            Shape::Forest,
            blocks.ids(),
            blocks.iter().filter_map(|block| {
                block.parent_id.map(|parent| EdgeSpec {
                    edge_id: block.id.0,
                    parent,
                    child: block.id,
                    sequence: block.sequence_number,
                })
            }),
        )?;

        let mut section_roots: BTreeMap<SectionId, Vec<SectionTextContentId>> = BTreeMap::new();
        for &root in hierarchy.roots() {
            if let Some(block) = blocks.get(root) {
                section_roots.entry(block.section_id).or_default().push(root);
            }
        }
        for roots in section_roots.values_mut() {
            roots.sort_by(|a, b| {
                let seq = |id: &SectionTextContentId| {
                    blocks.get(*id).and_then(|block| block.sequence_number)
                };
                sibling_order((seq(a), *a), (seq(b), *b))
            });
        }

        Ok(Self {
            hierarchy,
            section_roots,
        })
    }

    pub fn roots_of(&self, section: SectionId) -> &[SectionTextContentId] {
        self.section_roots
            .get(&section)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }
}

/// Every hierarchy dimension of one document.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DocumentHierarchies {
    pub sections: SectionForest,
    pub content: ContentForest,
    pub packaging: Hierarchy<PackagingLevelId>,
    pub lots: Hierarchy<ProductInstanceId>,
    pub pharmacologic_classes: Hierarchy<PharmacologicClassId>,
}

impl DocumentHierarchies {
    /// Assemble all dimensions, failing on the first structural error.
    pub fn assemble(set: &EntitySet) -> Result<Self, StructuralError> {
        let sections = SectionForest::assemble(set)?;
        let content = ContentForest::assemble(set)?;

        let packaging = Hierarchy::assemble(
            HierarchyKind::Packaging,
            Shape::Dag,
            set.packaging_levels().ids(),
            set.packaging_hierarchies().iter().map(|edge| EdgeSpec {
                edge_id: edge.id.0,
                parent: edge.outer_id,
                child: edge.inner_id,
                sequence: edge.sequence_number,
            }),
        )?;

        let lots = Hierarchy::assemble(
            HierarchyKind::Lot,
            Shape::Dag,
            set.product_instances().ids(),
            set.lot_hierarchies().iter().map(|edge| EdgeSpec {
                edge_id: edge.id.0,
                parent: edge.parent_id,
                child: edge.child_id,
                sequence: edge.sequence_number,
            }),
        )?;

        let pharmacologic_classes = Hierarchy::assemble(
            HierarchyKind::PharmacologicClass,
            Shape::Dag,
            set.pharmacologic_classes().ids(),
            set.pharmacologic_class_hierarchies()
                .iter()
                .map(|edge| EdgeSpec {
                    edge_id: edge.id.0,
                    parent: edge.parent_id,
                    child: edge.child_id,
                    sequence: edge.sequence_number,
                }),
        )?;

        debug!(
            sections = sections.hierarchy.node_count(),
            blocks = content.hierarchy.node_count(),
            packaging = packaging.node_count(),
            lots = lots.node_count(),
            classes = pharmacologic_classes.node_count(),
            "Assembled document hierarchies"
        );

        Ok(Self {
            sections,
            content,
            packaging,
            lots,
            pharmacologic_classes,
        })
    }
}

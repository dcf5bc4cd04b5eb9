//! Whole-document context and its builder.

use std::collections::BTreeMap;

use serde::Serialize;
use tracing::debug;

use spl_hierarchy::DocumentHierarchies;
use spl_model::{ContractError, DocumentId, EntitySet, PharmacologicClassId, SectionId};

use crate::section::{Placement, SectionRenderContext};

/// A pharmacologic class in taxonomy preorder.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PharmacologicClassContext {
    pub id: PharmacologicClassId,
    pub code: Option<String>,
    pub display_name: Option<String>,
    pub depth: usize,
    pub parent_id: Option<PharmacologicClassId>,
    /// Name of the substance record defining the class.
    pub defined_by: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DocumentRenderContext {
    pub document_id: DocumentId,
    pub set_guid: Option<String>,
    pub title: Option<String>,
    pub version_number: Option<i32>,
    pub effective_time: Option<String>,
    /// Every section in outline preorder.
    pub sections: Vec<SectionRenderContext>,
    pub pharmacologic_classes: Vec<PharmacologicClassContext>,
    pub has_sections: bool,
    pub has_pharmacologic_classes: bool,
}

impl DocumentRenderContext {
    pub fn section(&self, id: SectionId) -> Option<&SectionRenderContext> {
        self.sections.iter().find(|section| section.id == id)
    }
}

/// Builds the rendering context from an entity set and its hierarchies.
///
/// Performs no validation. Malformed records degrade to absent fields and
/// cleared flags; the only failure is a set without exactly one document.
#[derive(Debug, Clone, Copy)]
pub struct RenderContextBuilder<'a> {
    set: &'a EntitySet,
    hierarchies: &'a DocumentHierarchies,
}

impl<'a> RenderContextBuilder<'a> {
    pub fn new(set: &'a EntitySet, hierarchies: &'a DocumentHierarchies) -> Self {
        Self { set, hierarchies }
    }

    pub fn build(&self) -> Result<DocumentRenderContext, ContractError> {
        let document = self.set.document()?;
        let sections = self.sections();
        let pharmacologic_classes = self.pharmacologic_classes();

        debug!(
            document = %document.id,
            sections = sections.len(),
            classes = pharmacologic_classes.len(),
            "Built rendering context"
        );

        Ok(DocumentRenderContext {
            document_id: document.id,
            set_guid: document.set_guid.clone(),
            title: document.title.clone(),
            version_number: document.version_number,
            effective_time: document.effective_time.clone(),
            has_sections: !sections.is_empty(),
            has_pharmacologic_classes: !pharmacologic_classes.is_empty(),
            sections,
            pharmacologic_classes,
        })
    }

    /// Section contexts in outline preorder.
    pub fn sections(&self) -> Vec<SectionRenderContext> {
        let forest = &self.hierarchies.sections;
        let mut outline: BTreeMap<SectionId, String> = BTreeMap::new();
        let mut out = Vec::new();

        for (index, root) in forest.ordered_roots().into_iter().enumerate() {
            for visit in forest.hierarchy.preorder_from(root) {
                let outline_number = match visit.parent {
                    None => (index + 1).to_string(),
                    Some(parent) => {
                        let position = forest
                            .hierarchy
                            .children(parent)
                            .iter()
                            .position(|link| link.id == visit.id)
                            .map_or(0, |position| position + 1);
                        let prefix = outline.get(&parent).map_or("", String::as_str);
                        format!("{prefix}.{position}")
                    }
                };
                outline.insert(visit.id, outline_number.clone());

                let Some(section) = self.set.sections().get(visit.id) else {
                    continue;
                };
                out.push(SectionRenderContext::build(
                    self.set,
                    self.hierarchies,
                    section,
                    Placement {
                        depth: visit.depth,
                        parent_id: visit.parent,
                        outline_number,
                    },
                ));
            }
        }
        out
    }

    pub fn pharmacologic_classes(&self) -> Vec<PharmacologicClassContext> {
        self.hierarchies
            .pharmacologic_classes
            .preorder()
            .into_iter()
            .filter_map(|visit| {
                let class = self.set.pharmacologic_classes().get(visit.id)?;
                let defined_by = class
                    .defining_substance_id
                    .and_then(|id| self.set.identified_substances().get(id))
                    .and_then(|substance| substance.name.clone());
                Some(PharmacologicClassContext {
                    id: class.id,
                    code: class.code.code.clone(),
                    display_name: class.code.display_name.clone(),
                    depth: visit.depth,
                    parent_id: visit.parent,
                    defined_by,
                })
            })
            .collect()
    }
}

//! Section contexts and their nested text blocks.

use serde::Serialize;

use spl_hierarchy::DocumentHierarchies;
use spl_model::{
    AttachedDocumentId, EntityKind, EntitySet, ObservationMediaId, Section, SectionId,
    SectionTextContentId,
};

use crate::product::ProductRenderContext;

/// A text block with its nested blocks in sequence order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ContentBlockContext {
    pub id: SectionTextContentId,
    pub content_type: Option<String>,
    pub text: Option<String>,
    pub style_code: Option<String>,
    pub children: Vec<ContentBlockContext>,
    pub has_text: bool,
    pub has_children: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MediaContext {
    pub id: ObservationMediaId,
    pub media_id: Option<String>,
    pub media_type: Option<String>,
    pub file_name: Option<String>,
    pub alt_text: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SectionRenderContext {
    pub id: SectionId,
    pub code: Option<String>,
    pub display_name: Option<String>,
    pub title: Option<String>,
    /// Zero for root sections.
    pub depth: usize,
    /// Dotted position in the outline, `"2.1"` for the first child of the
    /// second root.
    pub outline_number: String,
    pub parent_id: Option<SectionId>,
    pub child_ids: Vec<SectionId>,
    pub text_blocks: Vec<ContentBlockContext>,
    pub media: Vec<MediaContext>,
    pub products: Vec<ProductRenderContext>,
    pub attachment_ids: Vec<AttachedDocumentId>,
    pub has_text_content: bool,
    pub has_children: bool,
    pub has_products: bool,
    pub has_media: bool,
    pub has_attachments: bool,
    /// Rendered on its own: a root with no owning structured body.
    pub is_standalone: bool,
}

/// Position of one section in the outline walk.
pub(crate) struct Placement {
    pub depth: usize,
    pub parent_id: Option<SectionId>,
    pub outline_number: String,
}

impl SectionRenderContext {
    pub(crate) fn build(
        set: &EntitySet,
        hierarchies: &DocumentHierarchies,
        section: &Section,
        placement: Placement,
    ) -> Self {
        let relations = set.relations();

        let text_blocks: Vec<ContentBlockContext> = hierarchies
            .content
            .roots_of(section.id)
            .iter()
            .filter_map(|id| content_block(set, hierarchies, *id))
            .collect();

        let media: Vec<MediaContext> = relations
            .media_of_section(section.id)
            .iter()
            .filter_map(|id| set.observation_media().get(*id))
            .map(|media| MediaContext {
                id: media.id,
                media_id: media.media_id.clone(),
                media_type: media.media_type.clone(),
                file_name: media.file_name.clone(),
                alt_text: media.alt_text.clone(),
            })
            .collect();

        let products: Vec<ProductRenderContext> = relations
            .products_of_section(section.id)
            .iter()
            .filter_map(|id| set.products().get(*id))
            .map(|product| ProductRenderContext::build(set, hierarchies, product))
            .collect();

        let attachment_ids = relations
            .attachments_of(EntityKind::Section, section.id.0)
            .to_vec();
        let child_ids = hierarchies.sections.hierarchy.child_ids(section.id);

        Self {
            id: section.id,
            code: section.code.code.clone(),
            display_name: section.code.display_name.clone(),
            title: section.title.clone(),
            depth: placement.depth,
            outline_number: placement.outline_number,
            parent_id: placement.parent_id,
            has_text_content: !text_blocks.is_empty(),
            has_children: !child_ids.is_empty(),
            has_products: !products.is_empty(),
            has_media: !media.is_empty(),
            has_attachments: !attachment_ids.is_empty(),
            is_standalone: hierarchies.sections.is_standalone(section.id),
            child_ids,
            text_blocks,
            media,
            products,
            attachment_ids,
        }
    }
}

/// Build the block tree under `root` bottom-up with an explicit stack, so
/// nesting depth is bounded by memory rather than the call stack.
fn content_block(
    set: &EntitySet,
    hierarchies: &DocumentHierarchies,
    root: SectionTextContentId,
) -> Option<ContentBlockContext> {
    struct Frame {
        block: ContentBlockContext,
        next: usize,
    }

    let content = &hierarchies.content.hierarchy;
    let mut stack = vec![Frame {
        block: leaf_block(set, root)?,
        next: 0,
    }];
    loop {
        let top = stack.last_mut()?;
        if let Some(link) = content.children(top.block.id).get(top.next) {
            top.next += 1;
            if let Some(block) = leaf_block(set, link.id) {
                stack.push(Frame { block, next: 0 });
            }
            continue;
        }
        let mut block = stack.pop()?.block;
        block.has_children = !block.children.is_empty();
        match stack.last_mut() {
            Some(parent) => parent.block.children.push(block),
            None => return Some(block),
        }
    }
}

fn leaf_block(set: &EntitySet, id: SectionTextContentId) -> Option<ContentBlockContext> {
    let block = set.section_text_contents().get(id)?;
    Some(ContentBlockContext {
        id,
        content_type: block
            .content_type
            .as_ref()
            .map(|content_type| content_type.as_str().to_string()),
        text: block.text.clone(),
        style_code: block.style_code.clone(),
        children: Vec::new(),
        has_text: block.text.is_some(),
        has_children: false,
    })
}

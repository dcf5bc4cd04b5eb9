//! Sections, their text blocks and embedded media.

use spl_model::{
    ContentType, ContractError, ObservationMedia, Section, SectionTextContent,
    SectionTextContentId,
};

use super::{coded_complete, date_if_present};
use crate::issue::Severity;
use crate::rules::{Category, Outcome, Rule, RuleContext, RuleRegistry};

pub(super) fn register(registry: &mut RuleRegistry) -> Result<(), ContractError> {
    section_rules(registry)?;
    content_rules(registry)?;
    media_rules(registry)
}

fn section_rules(registry: &mut RuleRegistry) -> Result<(), ContractError> {
    type R = Rule<Section>;

    registry.register(R {
        name: "SectionCodeComplete",
        category: Category::Shape,
        severity: Severity::Error,
        description: "The section code carries code, code system and display name",
        message: "section code is incomplete",
        check: |section, _| coded_complete(&section.code, "section code"),
    })?;

    registry.register(R {
        name: "SectionGuidRequired",
        category: Category::Shape,
        severity: Severity::Error,
        description: "Every section carries a globally unique id",
        message: "section has no id",
        check: |section, _| Outcome::check(section.section_guid.is_some()),
    })?;

    registry.register(R {
        name: "SectionEffectiveTimeFormat",
        category: Category::Shape,
        severity: Severity::Warning,
        description: "A section effective time, when given, is a valid HL7 timestamp",
        message: "section effective time is invalid",
        check: |section, _| {
            date_if_present(section.effective_time.as_deref(), "section effective time")
        },
    })?;

    registry.register(R {
        name: "NestedSectionOwnership",
        category: Category::Hierarchy,
        severity: Severity::Warning,
        description: "A nested section belongs to the same structured body as its parent",
        message: "nested section is owned by a different structured body than its parent",
        check: |section, ctx| {
            let Some(parent_id) = ctx.hierarchies.sections.hierarchy.parent(section.id) else {
                return Outcome::Pass;
            };
            let parent_body = ctx
                .set
                .sections()
                .get(parent_id)
                .and_then(|parent| parent.structured_body_id);
            match (section.structured_body_id, parent_body) {
                (Some(own), Some(inherited)) if own != inherited => Outcome::FailWith(format!(
                    "section is owned by structured body {own} but its parent {parent_id} by {inherited}"
                )),
                _ => Outcome::Pass,
            }
        },
    })?;

    registry.register(R {
        name: "SectionSequenceUnique",
        category: Category::Hierarchy,
        severity: Severity::Warning,
        description: "Sibling sections have distinct sequence numbers",
        message: "section shares its sequence number with a sibling",
        check: |section, ctx| {
            let forest = &ctx.hierarchies.sections.hierarchy;
            let Some(parent_id) = forest.parent(section.id) else {
                return Outcome::Pass;
            };
            let siblings = forest.children(parent_id);
            let Some(sequence) = siblings
                .iter()
                .find(|link| link.id == section.id)
                .and_then(|link| link.sequence)
            else {
                return Outcome::Pass;
            };
            match siblings
                .iter()
                .find(|link| link.id < section.id && link.sequence == Some(sequence))
            {
                Some(earlier) => Outcome::FailWith(format!(
                    "sequence number {sequence} under section {parent_id} is also used by section {}",
                    earlier.id
                )),
                None => Outcome::Pass,
            }
        },
    })?;

    registry.register(R {
        name: "SectionHasContent",
        category: Category::ConditionalPresence,
        severity: Severity::Info,
        description: "A section carries text, media, products or nested sections",
        message: "section is empty",
        check: |section, ctx| {
            let relations = ctx.set.relations();
            let has_content = !relations.content_of_section(section.id).is_empty()
                || !relations.media_of_section(section.id).is_empty()
                || !relations.products_of_section(section.id).is_empty()
                || !ctx.hierarchies.sections.hierarchy.children(section.id).is_empty();
            Outcome::check(has_content)
        },
    })
}

fn content_rules(registry: &mut RuleRegistry) -> Result<(), ContractError> {
    type R = Rule<SectionTextContent>;

    registry.register(R {
        name: "ContentTypeRecognized",
        category: Category::Terminology,
        severity: Severity::Warning,
        description: "Text blocks declare a known content type",
        message: "text block has no content type",
        check: |block, _| match &block.content_type {
            None => Outcome::Fail,
            Some(ContentType::Unrecognized(raw)) => {
                Outcome::FailWith(format!("unrecognized content type {raw:?}"))
            }
            Some(_) => Outcome::Pass,
        },
    })?;

    registry.register(R {
        name: "ParagraphTextRequired",
        category: Category::ConditionalPresence,
        severity: Severity::Warning,
        description: "Paragraph blocks carry text",
        message: "paragraph has no text",
        check: |block, _| {
            let carries_text = block
                .content_type
                .as_ref()
                .is_some_and(ContentType::carries_text);
            Outcome::check(!carries_text || block.text.is_some())
        },
    })?;

    registry.register(R {
        name: "ContentParentSameSection",
        category: Category::Hierarchy,
        severity: Severity::Error,
        description: "A nested text block belongs to the same section as its parent block",
        message: "text block and its parent belong to different sections",
        check: |block, ctx| {
            let parent_section = block
                .parent_id
                .and_then(|parent| ctx.set.section_text_contents().get(parent))
                .map(|parent| parent.section_id);
            match parent_section {
                Some(section) if section != block.section_id => Outcome::FailWith(format!(
                    "text block is in section {} but its parent is in section {section}",
                    block.section_id
                )),
                _ => Outcome::Pass,
            }
        },
    })?;

    registry.register(R {
        name: "ContentSequenceUnique",
        category: Category::Hierarchy,
        severity: Severity::Warning,
        description: "Sibling text blocks have distinct sequence numbers",
        message: "text block shares its sequence number with a sibling",
        check: |block, ctx| {
            let Some(sequence) = block.sequence_number else {
                return Outcome::Pass;
            };
            let earlier = block_siblings(block, ctx).into_iter().find(|&sibling| {
                sibling < block.id
                    && ctx
                        .set
                        .section_text_contents()
                        .get(sibling)
                        .is_some_and(|other| other.sequence_number == Some(sequence))
            });
            match earlier {
                Some(sibling) => Outcome::FailWith(format!(
                    "sequence number {sequence} is also used by text block {sibling}"
                )),
                None => Outcome::Pass,
            }
        },
    })
}

/// Blocks sharing `block`'s parent, or its section's root blocks.
fn block_siblings(block: &SectionTextContent, ctx: &RuleContext<'_>) -> Vec<SectionTextContentId> {
    let content = &ctx.hierarchies.content;
    match block.parent_id {
        Some(parent) => content.hierarchy.child_ids(parent),
        None => content.roots_of(block.section_id).to_vec(),
    }
}

fn media_rules(registry: &mut RuleRegistry) -> Result<(), ContractError> {
    type R = Rule<ObservationMedia>;

    registry.register(R {
        name: "MediaFileNameRequired",
        category: Category::Shape,
        severity: Severity::Error,
        description: "Embedded media reference a file",
        message: "media has no file name",
        check: |media, _| Outcome::check(media.file_name.is_some()),
    })?;

    registry.register(R {
        name: "MediaTypeRecognized",
        category: Category::Terminology,
        severity: Severity::Warning,
        description: "Embedded media declare a recognized media type",
        message: "media has no media type",
        check: |media, ctx| match media.media_type.as_deref() {
            None => Outcome::Fail,
            Some(media_type) => Outcome::fail_if(ctx.vocab.media_type(media_type).is_none(), || {
                format!("unrecognized media type {media_type:?}")
            }),
        },
    })?;

    registry.register(R {
        name: "MediaFileExtensionMatches",
        category: Category::Terminology,
        severity: Severity::Warning,
        description: "A media file extension agrees with its declared media type",
        message: "media file extension does not match its media type",
        check: |media, ctx| {
            let entry = media
                .media_type
                .as_deref()
                .and_then(|media_type| ctx.vocab.media_type(media_type));
            match (entry, media.file_name.as_deref()) {
                (Some(entry), Some(file_name)) => {
                    Outcome::fail_if(!entry.matches_file(file_name), || {
                        format!("file {file_name:?} does not match media type {}", entry.media_type)
                    })
                }
                _ => Outcome::Pass,
            }
        },
    })?;

    registry.register(R {
        name: "MediaAltTextRequired",
        category: Category::ConditionalPresence,
        severity: Severity::Warning,
        description: "Embedded images carry alternative text",
        message: "media has no alternative text",
        check: |media, _| Outcome::check(media.alt_text.is_some()),
    })
}

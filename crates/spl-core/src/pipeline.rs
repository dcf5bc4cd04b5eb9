//! Single-document pipeline.
//!
//! # Stage order
//!
//! 1. **References** - resolve every non-hierarchy foreign key
//! 2. **Hierarchies** - assemble all five dimensions
//! 3. **Validation** - evaluate the rule catalog under the policy
//! 4. **Rendering** - build the rendering context
//! 5. **Fingerprint** - hash the derived structures
//!
//! Stages 1 and 2 are fatal on failure. Validation never is: its findings
//! travel with the outcome and the policy decides whether they block.

use tracing::{debug, info, warn};

use spl_hierarchy::DocumentHierarchies;
use spl_model::{Document, EntitySet};
use spl_render::{DocumentRenderContext, RenderContextBuilder};
use spl_validate::{RuleContext, RuleRegistry, ValidationPolicy, ValidationReport, Validator};
use spl_vocab::Vocabulary;

use crate::error::PipelineError;
use crate::fingerprint::fingerprint;

/// Everything derived from one document version.
#[derive(Debug, Clone)]
pub struct DocumentOutcome {
    pub document: Document,
    pub hierarchies: DocumentHierarchies,
    pub report: ValidationReport,
    pub render: DocumentRenderContext,
    pub fingerprint: String,
    /// Some violation blocks downstream processing under the policy.
    pub blocked: bool,
}

/// The standard rule catalog and a policy, ready to process documents.
///
/// Build once and share: processing takes `&self` and the pipeline is `Sync`.
#[derive(Debug)]
pub struct Pipeline<'v> {
    vocabulary: &'v Vocabulary,
    validator: Validator,
}

impl<'v> Pipeline<'v> {
    pub fn new(
        vocabulary: &'v Vocabulary,
        policy: ValidationPolicy,
    ) -> Result<Self, PipelineError> {
        let registry = RuleRegistry::standard()?;
        let validator = Validator::new(registry, policy)?;
        Ok(Self {
            vocabulary,
            validator,
        })
    }

    pub fn policy(&self) -> &ValidationPolicy {
        self.validator.policy()
    }

    pub fn process(&self, set: &EntitySet) -> Result<DocumentOutcome, PipelineError> {
        let document = set.document()?.clone();

        set.check_references()?;
        let hierarchies = DocumentHierarchies::assemble(set)?;
        debug!(document = %document.id, "Resolved references and hierarchies");

        let report = self
            .validator
            .validate(&RuleContext::new(set, &hierarchies, self.vocabulary));
        let render = RenderContextBuilder::new(set, &hierarchies).build()?;
        let fingerprint = fingerprint(&hierarchies, &render)?;
        let blocked = report.is_blocked(self.policy());

        info!(
            document = %document.id,
            records = set.record_count(),
            sections = render.sections.len(),
            violations = report.len(),
            fingerprint = %fingerprint,
            "Processed document"
        );
        if blocked {
            warn!(
                document = %document.id,
                blocking = report.blocking(self.policy()).len(),
                "Document blocked by validation policy"
            );
        }

        Ok(DocumentOutcome {
            document,
            hierarchies,
            report,
            render,
            fingerprint,
            blocked,
        })
    }
}

/// Run the whole pipeline over one entity set.
///
/// Builds a fresh [`Pipeline`]; use [`Pipeline::process`] directly when
/// handling many documents under one policy.
pub fn process_document(
    set: &EntitySet,
    vocabulary: &Vocabulary,
    policy: &ValidationPolicy,
) -> Result<DocumentOutcome, PipelineError> {
    Pipeline::new(vocabulary, policy.clone())?.process(set)
}

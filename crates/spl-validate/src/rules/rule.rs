//! Rule definition and evaluation context.

use spl_hierarchy::DocumentHierarchies;
use spl_model::EntitySet;
use spl_vocab::Vocabulary;

use super::category::Category;
use crate::issue::Severity;

/// Everything a rule may read while checking one record.
#[derive(Debug, Clone, Copy)]
pub struct RuleContext<'a> {
    pub set: &'a EntitySet,
    pub hierarchies: &'a DocumentHierarchies,
    pub vocab: &'a Vocabulary,
}

impl<'a> RuleContext<'a> {
    pub fn new(
        set: &'a EntitySet,
        hierarchies: &'a DocumentHierarchies,
        vocab: &'a Vocabulary,
    ) -> Self {
        Self {
            set,
            hierarchies,
            vocab,
        }
    }
}

/// Result of checking one record against one rule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Pass,
    /// Failed; report the rule's message template.
    Fail,
    /// Failed with a record-specific message.
    FailWith(String),
}

impl Outcome {
    pub fn check(passed: bool) -> Self {
        if passed { Self::Pass } else { Self::Fail }
    }

    pub fn fail_if(failed: bool, message: impl FnOnce() -> String) -> Self {
        if failed {
            Self::FailWith(message())
        } else {
            Self::Pass
        }
    }

    pub fn is_pass(&self) -> bool {
        matches!(self, Self::Pass)
    }
}

/// A named predicate over one record kind.
pub struct Rule<E> {
    pub name: &'static str,
    pub category: Category,
    pub severity: Severity,
    pub description: &'static str,
    /// Message used for [`Outcome::Fail`].
    pub message: &'static str,
    pub check: fn(&E, &RuleContext<'_>) -> Outcome,
}

impl<E> std::fmt::Debug for Rule<E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Rule")
            .field("name", &self.name)
            .field("category", &self.category)
            .field("severity", &self.severity)
            .finish_non_exhaustive()
    }
}

//! Registry of typed rules across all record kinds.

use std::collections::BTreeSet;

use serde::Serialize;

use spl_model::{ContractError, Entity, EntityId, EntityKind};

use super::category::Category;
use super::rule::{Outcome, Rule, RuleContext};
use crate::catalog;
use crate::issue::{Severity, Subject, Violation};

/// Rule metadata without the predicate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RuleInfo {
    pub name: &'static str,
    pub kind: EntityKind,
    pub category: Category,
    pub severity: Severity,
    pub description: &'static str,
}

/// A rule with its record kind erased.
trait RegisteredRule: Send + Sync {
    fn info(&self) -> RuleInfo;

    fn evaluate(&self, ctx: &RuleContext<'_>, out: &mut Vec<Violation>);
}

impl<E: Entity> RegisteredRule for Rule<E> {
    fn info(&self) -> RuleInfo {
        RuleInfo {
            name: self.name,
            kind: E::KIND,
            category: self.category,
            severity: self.severity,
            description: self.description,
        }
    }

    fn evaluate(&self, ctx: &RuleContext<'_>, out: &mut Vec<Violation>) {
        for entity in E::table(ctx.set).iter() {
            let message = match (self.check)(entity, ctx) {
                Outcome::Pass => continue,
                Outcome::Fail => self.message.to_string(),
                Outcome::FailWith(message) => message,
            };
            out.push(Violation {
                subject: Subject::new(E::KIND, entity.id().raw()),
                rule: self.name,
                category: self.category,
                severity: self.severity,
                message,
            });
        }
    }
}

/// Registry of rules, evaluated in registration order.
#[derive(Default)]
pub struct RuleRegistry {
    rules: Vec<Box<dyn RegisteredRule>>,
    names: BTreeSet<&'static str>,
}

impl std::fmt::Debug for RuleRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RuleRegistry")
            .field("rules", &self.names)
            .finish()
    }
}

impl RuleRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// The full rule catalog.
    pub fn standard() -> Result<Self, ContractError> {
        let mut registry = Self::new();
        catalog::register_all(&mut registry)?;
        Ok(registry)
    }

    /// Add a rule. Names are unique across every record kind.
    pub fn register<E: Entity>(&mut self, rule: Rule<E>) -> Result<(), ContractError> {
        if !self.names.insert(rule.name) {
            return Err(ContractError::DuplicateRule { name: rule.name });
        }
        self.rules.push(Box::new(rule));
        Ok(())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.names.contains(name)
    }

    /// Number of rules in the registry.
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// Check if registry is empty.
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Metadata of every rule, in registration order.
    pub fn describe(&self) -> Vec<RuleInfo> {
        self.rules.iter().map(|rule| rule.info()).collect()
    }

    pub fn info(&self, name: &str) -> Option<RuleInfo> {
        self.rules
            .iter()
            .map(|rule| rule.info())
            .find(|info| info.name == name)
    }

    /// Run every rule over every record of its kind. Output is unsorted.
    pub(crate) fn evaluate(&self, ctx: &RuleContext<'_>) -> Vec<Violation> {
        let mut violations = Vec::new();
        for rule in &self.rules {
            rule.evaluate(ctx, &mut violations);
        }
        violations
    }
}

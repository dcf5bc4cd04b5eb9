//! Single-pass document validation.

use tracing::{debug, info};

use crate::policy::{PolicyError, ValidationPolicy};
use crate::report::ValidationReport;
use crate::rules::{RuleContext, RuleRegistry};

/// A rule registry paired with the policy that tunes its output.
#[derive(Debug)]
pub struct Validator {
    registry: RuleRegistry,
    policy: ValidationPolicy,
}

impl Validator {
    /// Fails when the policy names a rule the registry does not have.
    pub fn new(registry: RuleRegistry, policy: ValidationPolicy) -> Result<Self, PolicyError> {
        policy.validate_against(&registry)?;
        Ok(Self { registry, policy })
    }

    pub fn registry(&self) -> &RuleRegistry {
        &self.registry
    }

    pub fn policy(&self) -> &ValidationPolicy {
        &self.policy
    }

    /// Evaluate every rule. Never fails on data problems.
    pub fn validate(&self, ctx: &RuleContext<'_>) -> ValidationReport {
        let mut violations = self.registry.evaluate(ctx);
        debug!(
            rules = self.registry.len(),
            records = ctx.set.record_count(),
            raw = violations.len(),
            "Evaluated rules"
        );
        self.policy.apply(&mut violations);
        let report = ValidationReport::new(violations);
        let counts = report.counts();
        info!(
            reject = counts.reject,
            error = counts.error,
            warning = counts.warning,
            info = counts.info,
            "Validated document"
        );
        report
    }
}

//! Caller-side severity policy.
//!
//! Rules report; the policy decides what blocks. A policy file looks like:
//!
//! ```toml
//! reject = ["ProductNameRequired"]
//!
//! [severity]
//! MediaAltTextRequired = "info"
//! SectionCodeComplete = "warning"
//! ```

use std::collections::{BTreeMap, BTreeSet};
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::cross_document::VERSION_SEQUENCE_RULE;
use crate::issue::{Severity, Violation};
use crate::rules::RuleRegistry;

#[derive(Debug, Error)]
pub enum PolicyError {
    #[error("failed to read policy file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse policy file {path}: {source}")]
    Toml {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("failed to parse policy: {source}")]
    Parse {
        #[source]
        source: toml::de::Error,
    },

    #[error("policy references unknown rule {name}")]
    UnknownRule { name: String },
}

impl PolicyError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

/// Severity overrides and the set of blocking rules.
///
/// The default policy keeps every rule's own severity and blocks only on
/// `Reject` violations.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ValidationPolicy {
    /// Per-rule severity overrides.
    pub severity: BTreeMap<String, Severity>,
    /// Rules whose violations block regardless of severity.
    pub reject: BTreeSet<String>,
}

impl ValidationPolicy {
    pub fn from_toml_str(contents: &str) -> Result<Self, PolicyError> {
        toml::from_str(contents).map_err(|source| PolicyError::Parse { source })
    }

    pub fn from_path(path: &Path) -> Result<Self, PolicyError> {
        let contents = std::fs::read_to_string(path).map_err(|e| PolicyError::io(path, e))?;
        toml::from_str(&contents).map_err(|source| PolicyError::Toml {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Every rule named by the policy exists.
    pub fn validate_against(&self, registry: &RuleRegistry) -> Result<(), PolicyError> {
        let unknown = self
            .severity
            .keys()
            .chain(self.reject.iter())
            .find(|name| !registry.contains(name) && name.as_str() != VERSION_SEQUENCE_RULE);
        match unknown {
            Some(name) => Err(PolicyError::UnknownRule { name: name.clone() }),
            None => Ok(()),
        }
    }

    /// Effective severity of `rule`.
    pub fn severity_for(&self, rule: &str, default: Severity) -> Severity {
        self.severity.get(rule).copied().unwrap_or(default)
    }

    pub fn is_blocking(&self, violation: &Violation) -> bool {
        violation.severity == Severity::Reject || self.reject.contains(violation.rule)
    }

    /// Apply severity overrides in place.
    pub fn apply(&self, violations: &mut [Violation]) {
        if self.severity.is_empty() {
            return;
        }
        for violation in violations {
            violation.severity = self.severity_for(violation.rule, violation.severity);
        }
    }
}

//! Consistency validation for labeling documents.
//!
//! Rules are typed predicates over one record kind, registered in a
//! [`RuleRegistry`] and evaluated in a single pass by a [`Validator`]:
//!
//! - **Shape**: required fields and field formats
//! - **Discriminator**: tagged values agree with their declared type
//! - **Conditional presence**: fields required or forbidden by other fields
//! - **Status**: disciplinary actions against license status
//! - **Range**: quantity and unit pairing, zero quantities
//! - **Terminology**: codes and units from the vocabulary tables
//! - **Hierarchy**: sibling order and ownership in assembled hierarchies
//!
//! The validator reports and never rejects. Whether a violation blocks is
//! decided by a [`ValidationPolicy`].
//!
//! # Example
//!
//! ```ignore
//! use spl_validate::{RuleContext, RuleRegistry, ValidationPolicy, Validator};
//!
//! let validator = Validator::new(RuleRegistry::standard()?, ValidationPolicy::default())?;
//! let report = validator.validate(&RuleContext::new(&set, &hierarchies, &vocabulary));
//! for violation in report.violations() {
//!     println!("{violation}");
//! }
//! ```

mod catalog;
pub mod cross_document;
mod issue;
mod policy;
mod report;
pub mod rules;
mod validator;

pub use cross_document::{VERSION_SEQUENCE_RULE, version_conflicts, version_sequence_rule};
pub use issue::{Severity, Subject, Violation};
pub use policy::{PolicyError, ValidationPolicy};
pub use report::{SeverityCounts, ValidationReport};
pub use rules::{Category, Outcome, Rule, RuleContext, RuleInfo, RuleRegistry};
pub use validator::Validator;

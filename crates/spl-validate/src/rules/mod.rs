//! Rule definitions and the rule registry.

mod category;
mod registry;
mod rule;

pub use category::Category;
pub use registry::{RuleInfo, RuleRegistry};
pub use rule::{Outcome, Rule, RuleContext};

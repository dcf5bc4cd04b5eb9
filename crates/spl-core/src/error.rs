use thiserror::Error;

use spl_model::{ContractError, StructuralError};
use spl_validate::PolicyError;

/// Why a document produced no outcome.
#[derive(Debug, Error)]
pub enum PipelineError {
    /// Dangling reference or broken hierarchy. The document is rejected whole.
    #[error("structural error: {0}")]
    Structural(#[from] StructuralError),

    #[error("contract violation: {0}")]
    Contract(#[from] ContractError),

    #[error("invalid validation policy: {0}")]
    Policy(#[from] PolicyError),

    #[error("failed to serialize document outputs: {0}")]
    Serialize(#[from] serde_json::Error),
}

impl PipelineError {
    /// Structural errors are data problems; the rest are defects or setup errors.
    pub fn is_structural(&self) -> bool {
        matches!(self, Self::Structural(_))
    }
}

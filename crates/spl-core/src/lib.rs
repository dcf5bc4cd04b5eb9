//! Pipeline orchestration for labeling documents.
//!
//! One document version runs through reference checks, hierarchy assembly,
//! validation and rendering-context construction ([`Pipeline`]). Independent
//! versions run in parallel with [`process_batch`], which also checks version
//! numbering across the batch.

pub mod batch;
pub mod error;
pub mod fingerprint;
pub mod pipeline;

pub use batch::{
    BatchEntry, BatchInput, BatchStatus, CancellationToken, process_batch, process_batch_with,
};
pub use error::PipelineError;
pub use fingerprint::fingerprint;
pub use pipeline::{DocumentOutcome, Pipeline, process_document};

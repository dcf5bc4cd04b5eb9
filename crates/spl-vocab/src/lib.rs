//! Static read-only vocabularies for labeling validation.
//!
//! Validation rules look up ISO territory codes, recognized governing-agency
//! identifier triples, UCUM unit strings, disciplinary action codes and media
//! types. All of them ship as embedded CSV tables and are parsed once per
//! process.
//!
//! # Example
//!
//! ```rust,ignore
//! let vocabulary = spl_vocab::Vocabulary::load(None)?;
//! assert!(vocabulary.is_federal("USA"));
//! assert!(vocabulary.is_ucum_unit("mg/mL"));
//! ```

pub mod code_systems;
pub mod embedded;
pub mod error;
pub mod paths;
mod vocabulary;

pub use error::{Result, VocabError};
pub use paths::{VOCAB_ENV_VAR, vocab_dir_from_env};
pub use vocabulary::{
    DisciplinaryActionTerm, GoverningAgency, MediaTypeEntry, Territory, Vocabulary,
    embedded_vocabulary,
};

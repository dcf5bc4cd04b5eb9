#![deny(unsafe_code)]

use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum VocabError {
    #[error("failed to read vocabulary file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse {table}: {message}")]
    Csv { table: String, message: String },

    #[error("{table}: duplicate entry {key}")]
    Duplicate { table: String, key: String },

    #[error("{table}: invalid value {value:?} in column {column}")]
    InvalidValue {
        table: String,
        column: &'static str,
        value: String,
    },
}

impl VocabError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

pub type Result<T> = std::result::Result<T, VocabError>;

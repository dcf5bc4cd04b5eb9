//! Vocabulary directory resolution.

use std::path::PathBuf;

/// Environment variable naming a directory of replacement vocabulary tables.
pub const VOCAB_ENV_VAR: &str = "SPL_VOCAB_DIR";

/// Directory named by [`VOCAB_ENV_VAR`], if set and non-empty.
pub fn vocab_dir_from_env() -> Option<PathBuf> {
    std::env::var_os(VOCAB_ENV_VAR)
        .filter(|value| !value.is_empty())
        .map(PathBuf::from)
}

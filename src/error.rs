//! Run-level errors
//!
//! Only conditions that abort a whole extraction run live here. Per-file
//! problems are recorded in the [`ExtractionReport`](crate::ExtractionReport)
//! and logged instead.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("cannot read root directory '{}': {source}", path.display())]
    RootUnreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("unsupported language '{0}'")]
    UnsupportedLanguage(String),

    #[error("failed to load grammar: {0}")]
    Grammar(String),

    #[error("extraction cancelled")]
    Cancelled,
}

pub type Result<T, E = ExtractError> = std::result::Result<T, E>;

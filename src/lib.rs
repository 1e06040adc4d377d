// Classgraph Core - class diagrams from source trees
//
// Walks a directory of source files, extracts one node per type declaration
// with tree-sitter, and infers UML relationships between them.
// Architecture: collect -> extract nodes (parallel) -> resolve ids -> infer edges (parallel).

pub mod cancel;
pub mod collector;
pub mod config;
pub mod error;
pub mod extractors;
pub mod identity;
pub mod inference;
pub mod language;
pub mod model;
pub mod pipeline;
pub mod syntax;
pub mod utils;

pub use cancel::CancellationFlag;
pub use config::ExtractConfig;
pub use error::{ExtractError, Result};
pub use identity::DuplicateName;
pub use model::{
    AccessModifier, Attribute, Diagram, Edge, EdgeKind, EdgeMultiplicity, Multiplicity, Node,
    NodeKind, Operation, Property, UpperBound,
};
pub use pipeline::{Extraction, ExtractionReport, FileFailure};

use collector::CollectOptions;
use std::path::Path;

/// Extract the diagram of every source file under `root` with default settings
///
/// `None` yields an empty diagram. Only an unreadable root is an error.
pub fn extract(root: Option<&Path>) -> Result<Diagram> {
    extract_with_report(root, &ExtractConfig::default()).map(|extraction| extraction.diagram)
}

/// Extract with explicit configuration, returning the run report as well
pub fn extract_with_report(root: Option<&Path>, config: &ExtractConfig) -> Result<Extraction> {
    pipeline::run(root, config)
}

/// Number of source files `extract` would look at, with default settings
pub fn count_source_files(root: Option<&Path>) -> Result<usize> {
    count_source_files_with(root, &ExtractConfig::default())
}

/// Number of source files for the configured language, honoring ignore patterns
pub fn count_source_files_with(root: Option<&Path>, config: &ExtractConfig) -> Result<usize> {
    let suffix = language::source_suffix(&config.language.trim().to_ascii_lowercase())
        .ok_or_else(|| ExtractError::UnsupportedLanguage(config.language.clone()))?;
    let options = CollectOptions {
        suffix: suffix.to_string(),
        ignore_patterns: config.ignore_patterns.clone(),
        follow_links: config.follow_links,
    };
    collector::count_source_files(root, &options)
}

/// Languages with a front end
pub fn supported_languages() -> &'static [&'static str] {
    language::supported_languages()
}

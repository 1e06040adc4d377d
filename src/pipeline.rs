//! Two-stage extraction run
//!
//! Stage 1 reads, parses and extracts every collected file independently.
//! Identity resolution then builds the complete name index (the barrier).
//! Stage 2 infers edges per node against that index. Nodes whose referenced
//! names all fall outside the index are settled without touching their tree;
//! the rest re-read the parsed tree from the run's [`SourceCache`]. Nothing
//! outlives the run.

use crate::collector::{collect_source_files, CollectOptions};
use crate::config::ExtractConfig;
use crate::error::ExtractError;
use crate::extractors::{ExtractedDeclaration, ExtractorManager, LanguageExtractor};
use crate::identity::{self, DuplicateName, ResolvedNode};
use crate::inference::RelationshipInference;
use crate::model::{Diagram, Edge};
use crate::syntax::{ParsedSource, SourceCache};
use rayon::prelude::*;
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// A file that was collected but produced no node
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FileFailure {
    pub path: PathBuf,
    pub reason: String,
}

/// What happened during one run, besides the diagram itself
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtractionReport {
    pub files_found: usize,
    pub files_extracted: usize,
    /// Directories or links the walk could not enter
    pub skipped_entries: usize,
    pub failures: Vec<FileFailure>,
    pub duplicates: Vec<DuplicateName>,
    /// Nodes with a fallback id, unreachable by name
    pub unnamed_nodes: usize,
}

/// Diagram plus report of one run
#[derive(Debug, Clone, Serialize)]
pub struct Extraction {
    pub diagram: Diagram,
    pub report: ExtractionReport,
}

enum FileOutcome {
    Extracted(ParsedSource, ExtractedDeclaration),
    Failed(FileFailure),
    Cancelled,
}

/// Run both stages over `root`
pub fn run(root: Option<&Path>, config: &ExtractConfig) -> Result<Extraction, ExtractError> {
    let manager = ExtractorManager::new();
    let extractor = manager.extractor_for(&config.language)?;

    let options = CollectOptions {
        suffix: extractor.source_suffix().to_string(),
        ignore_patterns: config.ignore_patterns.clone(),
        follow_links: config.follow_links,
    };
    let collection = collect_source_files(root, &options)?;

    let mut report = ExtractionReport {
        files_found: collection.len(),
        skipped_entries: collection.skipped_entries,
        ..Default::default()
    };

    if collection.is_empty() {
        debug!("No source files found, returning empty diagram");
        return Ok(Extraction {
            diagram: Diagram::default(),
            report,
        });
    }

    // Stage 1: per-file extraction
    let outcomes = map_ordered(&collection.files, config.parallel, |path| {
        if config.cancellation.is_cancelled() {
            return FileOutcome::Cancelled;
        }
        extract_file(extractor.as_ref(), path, config.strict_parse)
    });

    let mut cache = SourceCache::new();
    let mut declarations = Vec::with_capacity(outcomes.len());
    for outcome in outcomes {
        match outcome {
            FileOutcome::Extracted(source, declaration) => {
                declarations.push((source.path.clone(), declaration));
                cache.insert(source);
            }
            FileOutcome::Failed(failure) => report.failures.push(failure),
            FileOutcome::Cancelled => return Err(ExtractError::Cancelled),
        }
    }
    report.files_extracted = declarations.len();

    // Barrier: every node is known before any edge is inferred
    let resolution = identity::resolve(root.unwrap_or(Path::new("")), declarations);
    report.duplicates = resolution.duplicates;
    report.unnamed_nodes = resolution.unnamed;
    if config.cancellation.is_cancelled() {
        return Err(ExtractError::Cancelled);
    }

    // Stage 2: per-node inference
    let inference = RelationshipInference::new(&resolution.index, &config.collection_markers)
        .with_dependencies(config.infer_dependencies);
    let edge_lists = map_ordered(&resolution.nodes, config.parallel, |resolved| {
        if config.cancellation.is_cancelled() {
            return None;
        }
        Some(infer_edges(extractor.as_ref(), &cache, &inference, resolved))
    });
    let edge_lists: Vec<Vec<Edge>> = edge_lists
        .into_iter()
        .collect::<Option<_>>()
        .ok_or(ExtractError::Cancelled)?;

    let nodes = resolution.nodes.into_iter().map(|r| r.node).collect();
    let diagram = Diagram::assemble(nodes, edge_lists);

    info!(
        "Extracted {} nodes and {} edges from {} files ({} failed, {} skipped entries)",
        diagram.nodes.len(),
        diagram.edges.len(),
        report.files_found,
        report.failures.len(),
        report.skipped_entries
    );

    Ok(Extraction { diagram, report })
}

fn extract_file(extractor: &dyn LanguageExtractor, path: &Path, strict_parse: bool) -> FileOutcome {
    let content = match fs::read(path) {
        Ok(bytes) => String::from_utf8_lossy(&bytes).into_owned(),
        Err(e) => {
            warn!("Failed to read {}: {}", path.display(), e);
            return FileOutcome::Failed(FileFailure {
                path: path.to_path_buf(),
                reason: format!("read failed: {}", e),
            });
        }
    };

    let source = match extractor.syntax_provider().parse(path, content) {
        Ok(source) => source,
        Err(e) => {
            warn!("Failed to parse {}: {}", path.display(), e);
            return FileOutcome::Failed(FileFailure {
                path: path.to_path_buf(),
                reason: e.to_string(),
            });
        }
    };

    if source.has_errors() {
        if strict_parse {
            warn!("Syntax errors in {}, excluding file", path.display());
            return FileOutcome::Failed(FileFailure {
                path: path.to_path_buf(),
                reason: crate::syntax::ParseFailure::SyntaxErrors.to_string(),
            });
        }
        debug!("Syntax errors in {}, extracting what parsed", path.display());
    }

    let declaration = extractor.extract_declaration(&source);
    FileOutcome::Extracted(source, declaration)
}

fn infer_edges(
    extractor: &dyn LanguageExtractor,
    cache: &SourceCache,
    inference: &RelationshipInference,
    resolved: &ResolvedNode,
) -> Vec<Edge> {
    if !inference.references_known_type(&resolved.node.id, &resolved.referenced_types) {
        return Vec::new();
    }
    let Some(source) = cache.get(&resolved.path) else {
        warn!(
            "No syntax tree for {} ({}), emitting no edges",
            resolved.node.id,
            resolved.path.display()
        );
        return Vec::new();
    };
    let refs = extractor.collect_references(source);
    let edges = inference.infer(&resolved.node.id, &refs);
    debug!("Inferred {} edges for {}", edges.len(), resolved.node.id);
    edges
}

/// Map in input order, on the rayon pool when `parallel` is set
fn map_ordered<T, R, F>(items: &[T], parallel: bool, f: F) -> Vec<R>
where
    T: Sync,
    R: Send,
    F: Fn(&T) -> R + Sync + Send,
{
    if parallel {
        items.par_iter().map(f).collect()
    } else {
        items.iter().map(f).collect()
    }
}

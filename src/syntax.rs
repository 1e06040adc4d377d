// Syntax Provider contract and parsed-source helpers
//
// The engine only needs three things from a syntax tree: descendants by kind,
// named children by field, and raw node text. `ParsedSource` wraps a
// tree-sitter tree with exactly those queries.

use crate::error::ExtractError;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tree_sitter::{Node, Parser, Tree};

/// Why a single file could not be turned into a tree
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ParseFailure {
    #[error("parser produced no tree")]
    NoTree,
    #[error("syntax errors in source")]
    SyntaxErrors,
    #[error("parser rejected grammar: {0}")]
    Grammar(String),
}

/// `parse(text) -> SyntaxTree | ParseFailure`
pub trait SyntaxProvider: Send + Sync {
    fn parse(&self, path: &Path, content: String) -> Result<ParsedSource, ParseFailure>;
}

/// Syntax provider backed by a tree-sitter grammar
///
/// A fresh `Parser` is created per call, so one provider can be shared across
/// rayon tasks.
pub struct TreeSitterProvider {
    language: tree_sitter::Language,
}

impl TreeSitterProvider {
    pub fn new(language: &str) -> Result<Self, ExtractError> {
        let language = crate::language::get_tree_sitter_language(language)?;
        // ABI mismatches between core and grammar surface here, not per file
        Parser::new()
            .set_language(&language)
            .map_err(|e| ExtractError::Grammar(e.to_string()))?;
        Ok(Self { language })
    }
}

impl SyntaxProvider for TreeSitterProvider {
    fn parse(&self, path: &Path, content: String) -> Result<ParsedSource, ParseFailure> {
        let mut parser = Parser::new();
        parser
            .set_language(&self.language)
            .map_err(|e| ParseFailure::Grammar(e.to_string()))?;

        let tree = parser.parse(&content, None).ok_or(ParseFailure::NoTree)?;

        Ok(ParsedSource {
            path: path.to_path_buf(),
            content,
            tree,
        })
    }
}

/// One file's text together with its syntax tree
pub struct ParsedSource {
    pub path: PathBuf,
    pub content: String,
    pub tree: Tree,
}

impl ParsedSource {
    pub fn root(&self) -> Node<'_> {
        self.tree.root_node()
    }

    pub fn has_errors(&self) -> bool {
        self.root().has_error()
    }

    /// Raw source text of a node
    pub fn node_text(&self, node: &Node) -> String {
        let start_byte = node.start_byte();
        let end_byte = node.end_byte();

        let content_bytes = self.content.as_bytes();
        if start_byte < content_bytes.len() && end_byte <= content_bytes.len() {
            String::from_utf8_lossy(&content_bytes[start_byte..end_byte]).to_string()
        } else {
            String::new()
        }
    }

    /// Text of a named child, if the field is present
    pub fn field_text(&self, node: &Node, field_name: &str) -> Option<String> {
        node.child_by_field_name(field_name)
            .map(|field_node| self.node_text(&field_node))
    }

    /// All descendants (including `node` itself) of the given kind, in document order
    pub fn find_nodes_by_type<'t>(&self, node: Node<'t>, node_type: &str) -> Vec<Node<'t>> {
        let mut nodes = Vec::new();
        collect_by_type(node, node_type, &mut nodes);
        nodes
    }

    /// First descendant of the given kind in document order
    pub fn find_first_by_type<'t>(&self, node: Node<'t>, node_type: &str) -> Option<Node<'t>> {
        if node.kind() == node_type {
            return Some(node);
        }
        let mut cursor = node.walk();
        let children: Vec<Node<'t>> = node.children(&mut cursor).collect();
        children
            .into_iter()
            .find_map(|child| self.find_first_by_type(child, node_type))
    }

    /// First direct child of the given kind
    pub fn find_child_by_type<'t>(&self, node: Node<'t>, child_type: &str) -> Option<Node<'t>> {
        let mut cursor = node.walk();
        let found = node.children(&mut cursor).find(|c| c.kind() == child_type);
        found
    }

    /// Direct named children whose kind is one of `types`
    pub fn find_children_by_types<'t>(&self, node: Node<'t>, types: &[&str]) -> Vec<Node<'t>> {
        let mut cursor = node.walk();
        let found = node
            .named_children(&mut cursor)
            .filter(|c| types.contains(&c.kind()))
            .collect();
        found
    }
}

fn collect_by_type<'t>(node: Node<'t>, node_type: &str, nodes: &mut Vec<Node<'t>>) {
    if node.kind() == node_type {
        nodes.push(node);
    }

    let mut cursor = node.walk();
    for child in node.children(&mut cursor) {
        collect_by_type(child, node_type, nodes);
    }
}

/// Run-scoped cache of parsed trees, keyed by file path
///
/// Created empty for every run and dropped with it; nothing survives into
/// the next run.
#[derive(Default)]
pub struct SourceCache {
    sources: HashMap<PathBuf, ParsedSource>,
}

impl SourceCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, source: ParsedSource) {
        self.sources.insert(source.path.clone(), source);
    }

    pub fn get(&self, path: &Path) -> Option<&ParsedSource> {
        self.sources.get(path)
    }

    pub fn len(&self) -> usize {
        self.sources.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sources.is_empty()
    }
}

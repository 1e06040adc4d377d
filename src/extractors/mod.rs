//! Language front ends
//!
//! Each supported language implements [`LanguageExtractor`] once: it knows its
//! file suffix, how to parse, how to turn a tree into a [`Node`], and which
//! type references the inference engine should see. The rest of the pipeline
//! never branches on language names.
//!
//! - `manager.rs` - ExtractorManager: language name -> front end
//! - `java/` - Java front end

pub mod java;
pub mod manager;

use crate::inference::TypeReferences;
use crate::model::Node;
use crate::syntax::{ParsedSource, SyntaxProvider};

pub use manager::ExtractorManager;

/// Output of the declaration extractor for one file
///
/// `node.id` is still empty here; the identity resolver assigns it.
#[derive(Debug, Clone)]
pub struct ExtractedDeclaration {
    pub node: Node,
    /// Package / namespace the declaration lives in, if any
    pub package: Option<String>,
    /// Distinct simple type names referenced by the declaration, in first-seen order
    pub referenced_types: Vec<String>,
}

/// Capability interface implemented once per supported language
pub trait LanguageExtractor: Send + Sync {
    fn language(&self) -> &'static str;

    /// Suffix used by the source collector (e.g. `.java`)
    fn source_suffix(&self) -> &'static str;

    fn syntax_provider(&self) -> &dyn SyntaxProvider;

    /// Stage one: turn a parsed file into a partially identified node
    ///
    /// Never fails; a file without any recognizable declaration still
    /// produces a `Class` node named after the file.
    fn extract_declaration(&self, source: &ParsedSource) -> ExtractedDeclaration;

    /// Stage two: the superclass, interface, field and parameter references
    /// of the file's primary declaration
    fn collect_references(&self, source: &ParsedSource) -> TypeReferences;
}

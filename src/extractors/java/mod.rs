/// Java front end: turns one parsed `.java` file into a diagram node and the
/// type references relationship inference works on
///
/// This module is organized into focused sub-modules:
/// - helpers: Shared utility functions (modifiers, access, type names, parameters)
/// - classes: Primary declaration lookup, class/interface/enum/record nodes
/// - fields: Field and record component extraction
/// - methods: Method operations and constructor signatures
/// - packages: Package declaration extraction
/// - relationships: Supertype, field and signature references
mod classes;
mod fields;
mod helpers;
mod methods;
mod packages;
mod relationships;

use crate::error::ExtractError;
use crate::extractors::{ExtractedDeclaration, LanguageExtractor};
use crate::inference::TypeReferences;
use crate::language::{syntax_kinds, SyntaxKinds};
use crate::syntax::{ParsedSource, SyntaxProvider, TreeSitterProvider};

pub struct JavaExtractor {
    kinds: &'static SyntaxKinds,
    provider: TreeSitterProvider,
}

impl JavaExtractor {
    pub fn new() -> Result<Self, ExtractError> {
        let kinds = syntax_kinds("java")
            .ok_or_else(|| ExtractError::UnsupportedLanguage("java".to_string()))?;
        Ok(Self {
            kinds,
            provider: TreeSitterProvider::new("java")?,
        })
    }

    // ========================================================================
    // Accessors for sub-modules
    // ========================================================================

    pub(crate) fn kinds(&self) -> &'static SyntaxKinds {
        self.kinds
    }
}

impl LanguageExtractor for JavaExtractor {
    fn language(&self) -> &'static str {
        "java"
    }

    fn source_suffix(&self) -> &'static str {
        ".java"
    }

    fn syntax_provider(&self) -> &dyn SyntaxProvider {
        &self.provider
    }

    fn extract_declaration(&self, source: &ParsedSource) -> ExtractedDeclaration {
        let node = classes::extract_node(self, source);
        let package = packages::extract_package(self, source);
        let referenced_types = self.collect_references(source).referenced_type_names();

        tracing::debug!(
            "Extracted {} '{}' with {} properties and {} operations from {}",
            node.kind,
            node.name,
            node.properties.len(),
            node.operations.len(),
            source.path.display()
        );

        ExtractedDeclaration {
            node,
            package,
            referenced_types,
        }
    }

    fn collect_references(&self, source: &ParsedSource) -> TypeReferences {
        relationships::collect_references(self, source)
    }
}

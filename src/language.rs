//! Language Support - Shared tree-sitter language configuration
//!
//! Grammar loading, file suffixes and the syntactic kind names each front end
//! queries. Adding a language means adding a grammar arm, a suffix and a
//! [`SyntaxKinds`] table here plus a `LanguageExtractor` implementation.

use crate::error::ExtractError;

/// Syntactic kind and field names a front end queries in its grammar
///
/// The extraction code never spells grammar node names itself; it reads them
/// from this table.
#[derive(Debug, Clone)]
pub struct SyntaxKinds {
    pub package_declaration: &'static str,
    /// Name nodes a package declaration may hold
    pub package_names: &'static [&'static str],
    pub class_declaration: &'static str,
    pub interface_declaration: &'static str,
    pub enum_declaration: &'static str,
    pub record_declaration: &'static str,
    /// Member declarations that become properties
    pub field_declarations: &'static [&'static str],
    pub method_declaration: &'static str,
    pub constructor_declaration: &'static str,
    pub enum_constant: &'static str,
    pub block_comment: &'static str,
    pub modifiers: &'static str,
    pub type_identifier: &'static str,
    pub generic_type: &'static str,
    pub scoped_type_identifier: &'static str,
    pub superclass: &'static str,
    pub super_interfaces: &'static str,
    pub extends_interfaces: &'static str,
    pub type_list: &'static str,
    pub formal_parameter: &'static str,
    pub spread_parameter: &'static str,
    pub variable_declarator: &'static str,
    /// Body nodes that hold further members (e.g. the declarations after enum constants)
    pub member_containers: &'static [&'static str],
    pub abstract_modifier: &'static str,

    // Field names
    pub name_field: &'static str,
    pub type_field: &'static str,
    pub declarator_field: &'static str,
    pub parameters_field: &'static str,
    pub body_field: &'static str,
}

/// Kind names of tree-sitter-java 0.23
pub static JAVA_KINDS: SyntaxKinds = SyntaxKinds {
    package_declaration: "package_declaration",
    package_names: &["scoped_identifier", "identifier"],
    class_declaration: "class_declaration",
    interface_declaration: "interface_declaration",
    enum_declaration: "enum_declaration",
    record_declaration: "record_declaration",
    field_declarations: &["field_declaration", "constant_declaration"],
    method_declaration: "method_declaration",
    constructor_declaration: "constructor_declaration",
    enum_constant: "enum_constant",
    block_comment: "block_comment",
    modifiers: "modifiers",
    type_identifier: "type_identifier",
    generic_type: "generic_type",
    scoped_type_identifier: "scoped_type_identifier",
    superclass: "superclass",
    super_interfaces: "super_interfaces",
    extends_interfaces: "extends_interfaces",
    type_list: "type_list",
    formal_parameter: "formal_parameter",
    spread_parameter: "spread_parameter",
    variable_declarator: "variable_declarator",
    member_containers: &["enum_body_declarations"],
    abstract_modifier: "abstract",
    name_field: "name",
    type_field: "type",
    declarator_field: "declarator",
    parameters_field: "parameters",
    body_field: "body",
};

/// Get tree-sitter language parser for a given language name
pub fn get_tree_sitter_language(language: &str) -> Result<tree_sitter::Language, ExtractError> {
    match language {
        "java" => Ok(tree_sitter_java::LANGUAGE.into()),
        _ => Err(ExtractError::UnsupportedLanguage(language.to_string())),
    }
}

/// File-name suffix of source files for a language
pub fn source_suffix(language: &str) -> Option<&'static str> {
    match language {
        "java" => Some(".java"),
        _ => None,
    }
}

/// Kind table for a language
pub fn syntax_kinds(language: &str) -> Option<&'static SyntaxKinds> {
    match language {
        "java" => Some(&JAVA_KINDS),
        _ => None,
    }
}

pub fn supported_languages() -> &'static [&'static str] {
    &["java"]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_java_is_fully_configured() {
        for language in supported_languages() {
            assert!(get_tree_sitter_language(language).is_ok());
            assert!(source_suffix(language).is_some());
            assert!(syntax_kinds(language).is_some());
        }
        assert_eq!(source_suffix("java"), Some(".java"));
    }

    #[test]
    fn test_unknown_language_is_rejected() {
        assert!(matches!(
            get_tree_sitter_language("cobol"),
            Err(ExtractError::UnsupportedLanguage(_))
        ));
        assert!(syntax_kinds("cobol").is_none());
    }
}

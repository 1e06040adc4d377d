/// Method and constructor extraction
use crate::extractors::java::JavaExtractor;
use crate::model::Operation;
use crate::syntax::ParsedSource;
use tree_sitter::Node;

use super::fields::member_nodes;
use super::helpers;

/// A declared method with the type names its signature mentions
pub(super) struct MethodInfo {
    pub operation: Operation,
    pub parameter_types: Vec<String>,
    pub return_types: Vec<String>,
}

/// Methods of a declaration body in declaration order
pub(super) fn extract_methods(
    extractor: &JavaExtractor,
    source: &ParsedSource,
    decl: Node,
) -> Vec<MethodInfo> {
    let kinds = extractor.kinds();
    let methods: Vec<MethodInfo> = member_nodes(extractor, decl, &[kinds.method_declaration])
        .into_iter()
        .filter_map(|method| extract_method(extractor, source, method))
        .collect();

    tracing::trace!("Extracted {} methods", methods.len());
    methods
}

fn extract_method(extractor: &JavaExtractor, source: &ParsedSource, node: Node) -> Option<MethodInfo> {
    let kinds = extractor.kinds();
    let name = source.field_text(&node, kinds.name_field)?;

    let modifiers = helpers::extract_modifiers(extractor, source, node);
    let return_node = node.child_by_field_name(kinds.type_field);
    let return_type = return_node
        .map(|t| source.node_text(&t))
        .unwrap_or_else(|| "void".to_string());
    let return_types = return_node
        .map(|t| helpers::type_names(extractor, source, t))
        .unwrap_or_default();

    let mut parameter_types = Vec::new();
    let mut parameters = Vec::new();
    for param in helpers::extract_parameters(extractor, source, node) {
        if let Some(type_node) = param.type_node {
            parameter_types.extend(helpers::type_names(extractor, source, type_node));
        }
        parameters.push(param.attribute);
    }

    Some(MethodInfo {
        operation: Operation {
            name,
            return_type,
            access_modifier: helpers::determine_access(&modifiers),
            parameters,
        },
        parameter_types,
        return_types,
    })
}

/// Type names used by constructor parameters
///
/// Constructors are not operations, but a type injected through one counts
/// as a parameter type for aggregation.
pub(super) fn constructor_parameter_types(
    extractor: &JavaExtractor,
    source: &ParsedSource,
    decl: Node,
) -> Vec<String> {
    let kinds = extractor.kinds();
    member_nodes(extractor, decl, &[kinds.constructor_declaration])
        .into_iter()
        .flat_map(|ctor| helpers::extract_parameters(extractor, source, ctor))
        .filter_map(|param| param.type_node)
        .flat_map(|type_node| helpers::type_names(extractor, source, type_node))
        .collect()
}

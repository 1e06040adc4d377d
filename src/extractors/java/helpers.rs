/// Helper functions for Java extraction
/// Handles modifiers, access levels, type names and parameter lists
use crate::extractors::java::JavaExtractor;
use crate::model::{AccessModifier, Attribute};
use crate::syntax::ParsedSource;
use tree_sitter::Node;

/// Extract all modifiers from a Java node (public, private, static, final, etc.)
pub(super) fn extract_modifiers(
    extractor: &JavaExtractor,
    source: &ParsedSource,
    node: Node,
) -> Vec<String> {
    source
        .find_child_by_type(node, extractor.kinds().modifiers)
        .map(|modifiers_node| {
            let mut cursor = modifiers_node.walk();
            let texts: Vec<String> = modifiers_node
                .children(&mut cursor)
                .map(|c| source.node_text(&c))
                .collect();
            texts
        })
        .unwrap_or_default()
}

/// Access level from a modifier list; no access keyword means package-private
pub(super) fn determine_access(modifiers: &[String]) -> AccessModifier {
    if modifiers.iter().any(|m| m == "public") {
        AccessModifier::Public
    } else if modifiers.iter().any(|m| m == "private") {
        AccessModifier::Private
    } else if modifiers.iter().any(|m| m == "protected") {
        AccessModifier::Protected
    } else {
        AccessModifier::PackagePrivate
    }
}

/// Type identifiers named by a type node
///
/// Generic arguments, array elements and wildcard bounds are searched
/// recursively; a scoped name contributes only its last segment.
pub(super) fn type_names(extractor: &JavaExtractor, source: &ParsedSource, node: Node) -> Vec<String> {
    let mut names = Vec::new();
    collect_type_names(extractor, source, node, &mut names);
    names
}

fn collect_type_names(
    extractor: &JavaExtractor,
    source: &ParsedSource,
    node: Node,
    names: &mut Vec<String>,
) {
    let kinds = extractor.kinds();
    if node.kind() == kinds.type_identifier {
        names.push(source.node_text(&node));
        return;
    }
    if node.kind() == kinds.scoped_type_identifier {
        if let Some(last) = source
            .find_children_by_types(node, &[kinds.type_identifier])
            .last()
        {
            names.push(source.node_text(last));
        }
        return;
    }

    let mut cursor = node.walk();
    let children: Vec<Node> = node.named_children(&mut cursor).collect();
    for child in children {
        collect_type_names(extractor, source, child, names);
    }
}

/// The declared name of a supertype reference, without type arguments or qualifier
pub(super) fn base_type_name(
    extractor: &JavaExtractor,
    source: &ParsedSource,
    node: Node,
) -> Option<String> {
    let kinds = extractor.kinds();
    if node.kind() == kinds.type_identifier {
        return Some(source.node_text(&node));
    }
    if node.kind() == kinds.scoped_type_identifier {
        return source
            .find_children_by_types(node, &[kinds.type_identifier])
            .last()
            .map(|n| source.node_text(n));
    }
    if node.kind() == kinds.generic_type {
        let mut cursor = node.walk();
        let head = node.named_children(&mut cursor).next();
        return head.and_then(|head| base_type_name(extractor, source, head));
    }
    None
}

/// Type nodes listed in a `type_list` below the given clause node
pub(super) fn type_list_entries<'t>(
    extractor: &JavaExtractor,
    source: &ParsedSource,
    clause: Node<'t>,
) -> Vec<Node<'t>> {
    match source.find_child_by_type(clause, extractor.kinds().type_list) {
        Some(list) => {
            let mut cursor = list.walk();
            let entries: Vec<Node<'t>> = list.named_children(&mut cursor).collect();
            entries
        }
        None => Vec::new(),
    }
}

/// One formal parameter with the node holding its declared type
pub(super) struct Parameter<'t> {
    pub attribute: Attribute,
    pub type_node: Option<Node<'t>>,
}

/// Formal parameters of a method, constructor or record header
pub(super) fn extract_parameters<'t>(
    extractor: &JavaExtractor,
    source: &ParsedSource,
    node: Node<'t>,
) -> Vec<Parameter<'t>> {
    let kinds = extractor.kinds();
    let Some(params) = node.child_by_field_name(kinds.parameters_field) else {
        return Vec::new();
    };

    let mut parameters = Vec::new();
    let mut cursor = params.walk();
    let children: Vec<Node<'t>> = params.named_children(&mut cursor).collect();
    for param in children {
        if param.kind() == kinds.formal_parameter {
            let type_node = param.child_by_field_name(kinds.type_field);
            parameters.push(Parameter {
                attribute: Attribute {
                    name: source
                        .field_text(&param, kinds.name_field)
                        .unwrap_or_default(),
                    type_name: type_node.map(|t| source.node_text(&t)).unwrap_or_default(),
                },
                type_node,
            });
        } else if param.kind() == kinds.spread_parameter {
            // Varargs: modifiers? type '...' variable_declarator
            let type_node = param.child_by_field_name(kinds.type_field).or_else(|| {
                let mut inner = param.walk();
                let found = param.named_children(&mut inner).find(|c| {
                    c.kind() != kinds.modifiers && c.kind() != kinds.variable_declarator
                });
                found
            });
            let name = source
                .find_child_by_type(param, kinds.variable_declarator)
                .and_then(|d| source.field_text(&d, kinds.name_field))
                .unwrap_or_default();
            parameters.push(Parameter {
                attribute: Attribute {
                    name,
                    type_name: type_node
                        .map(|t| format!("{}...", source.node_text(&t)))
                        .unwrap_or_default(),
                },
                type_node,
            });
        }
    }
    parameters
}

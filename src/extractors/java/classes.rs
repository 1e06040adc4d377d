/// Primary declaration lookup and class, interface, enum and record node building
use crate::extractors::java::JavaExtractor;
use crate::model::{Node as DiagramNode, NodeKind, Property};
use crate::syntax::ParsedSource;
use tree_sitter::Node;

use super::helpers;

/// Which declaration form a file's primary declaration takes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum DeclarationForm {
    Class,
    Interface,
    Enum,
    Record,
}

/// First top-level type declaration of the file
///
/// A class wins over an interface, an interface over an enum, an enum over a
/// record, wherever they appear in the file.
pub(super) fn find_primary_declaration<'t>(
    extractor: &JavaExtractor,
    source: &'t ParsedSource,
) -> Option<(Node<'t>, DeclarationForm)> {
    let kinds = extractor.kinds();
    let root = source.root();
    let forms = [
        (kinds.class_declaration, DeclarationForm::Class),
        (kinds.interface_declaration, DeclarationForm::Interface),
        (kinds.enum_declaration, DeclarationForm::Enum),
        (kinds.record_declaration, DeclarationForm::Record),
    ];

    forms.iter().find_map(|(kind, form)| {
        source
            .find_children_by_types(root, &[*kind])
            .into_iter()
            .next()
            .map(|node| (node, *form))
    })
}

/// Node kind for a declaration
pub(super) fn classify(
    extractor: &JavaExtractor,
    source: &ParsedSource,
    node: Node,
    form: DeclarationForm,
) -> NodeKind {
    match form {
        DeclarationForm::Class => {
            let modifiers = helpers::extract_modifiers(extractor, source, node);
            if modifiers
                .iter()
                .any(|m| m == extractor.kinds().abstract_modifier)
            {
                NodeKind::AbstractClass
            } else {
                NodeKind::Class
            }
        }
        DeclarationForm::Interface => NodeKind::Interface,
        DeclarationForm::Enum => NodeKind::Enumeration,
        DeclarationForm::Record => NodeKind::DataType,
    }
}

/// Build the diagram node for a file, without id
pub(super) fn extract_node(extractor: &JavaExtractor, source: &ParsedSource) -> DiagramNode {
    let comment = extract_comment(extractor, source);

    let Some((decl, form)) = find_primary_declaration(extractor, source) else {
        let mut node = DiagramNode::new(file_stem(source), NodeKind::Class);
        node.comment = comment;
        return node;
    };

    let name = source
        .field_text(&decl, extractor.kinds().name_field)
        .filter(|n| !n.is_empty())
        .unwrap_or_else(|| file_stem(source));
    let kind = classify(extractor, source, decl, form);

    let mut node = DiagramNode::new(name, kind);
    node.comment = comment;
    node.properties = super::fields::extract_fields(extractor, source, decl, form)
        .into_iter()
        .map(|field| Property {
            name: field.name,
            type_name: field.raw_type,
            access_modifier: field.access,
        })
        .collect();
    node.operations = super::methods::extract_methods(extractor, source, decl)
        .into_iter()
        .map(|method| method.operation)
        .collect();
    if form == DeclarationForm::Enum {
        node.enumeration_literals = extract_enum_constants(extractor, source, decl);
    }
    node
}

/// First block comment anywhere in the file, or empty
pub(super) fn extract_comment(extractor: &JavaExtractor, source: &ParsedSource) -> String {
    source
        .find_first_by_type(source.root(), extractor.kinds().block_comment)
        .map(|c| source.node_text(&c))
        .unwrap_or_default()
}

/// Enum constant names in declaration order
pub(super) fn extract_enum_constants(
    extractor: &JavaExtractor,
    source: &ParsedSource,
    node: Node,
) -> Vec<String> {
    let kinds = extractor.kinds();
    let Some(body) = node.child_by_field_name(kinds.body_field) else {
        return Vec::new();
    };
    source
        .find_children_by_types(body, &[kinds.enum_constant])
        .iter()
        .filter_map(|constant| source.field_text(constant, kinds.name_field))
        .collect()
}

fn file_stem(source: &ParsedSource) -> String {
    source
        .path
        .file_stem()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_default()
}

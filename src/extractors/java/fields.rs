/// Field extraction
use crate::extractors::java::JavaExtractor;
use crate::inference::FieldReference;
use crate::model::AccessModifier;
use crate::syntax::ParsedSource;
use tree_sitter::Node;

use super::classes::DeclarationForm;
use super::helpers;

/// Member declarations of the given kinds directly inside a declaration body
///
/// Nested type declarations are not entered; containers such as the
/// declarations block after enum constants are.
pub(super) fn member_nodes<'t>(
    extractor: &JavaExtractor,
    decl: Node<'t>,
    member_kinds: &[&str],
) -> Vec<Node<'t>> {
    let kinds = extractor.kinds();
    let Some(body) = decl.child_by_field_name(kinds.body_field) else {
        return Vec::new();
    };

    let mut members = Vec::new();
    let mut pending = vec![body];
    while let Some(container) = pending.pop() {
        let mut cursor = container.walk();
        let children: Vec<Node<'t>> = container.named_children(&mut cursor).collect();
        for child in children {
            if member_kinds.contains(&child.kind()) {
                members.push(child);
            } else if kinds.member_containers.contains(&child.kind()) {
                pending.push(child);
            }
        }
    }
    members.sort_by_key(|n| n.start_byte());
    members
}

/// One reference per declarator, in declaration order
///
/// For records the header components are the fields; they are private.
pub(super) fn extract_fields(
    extractor: &JavaExtractor,
    source: &ParsedSource,
    decl: Node,
    form: DeclarationForm,
) -> Vec<FieldReference> {
    let kinds = extractor.kinds();
    let mut fields = Vec::new();

    if form == DeclarationForm::Record {
        for param in helpers::extract_parameters(extractor, source, decl) {
            fields.push(FieldReference {
                name: param.attribute.name,
                access: AccessModifier::Private,
                raw_type: param.attribute.type_name,
                type_names: param
                    .type_node
                    .map(|t| helpers::type_names(extractor, source, t))
                    .unwrap_or_default(),
            });
        }
    }

    for field in member_nodes(extractor, decl, kinds.field_declarations) {
        let modifiers = helpers::extract_modifiers(extractor, source, field);
        let access = helpers::determine_access(&modifiers);

        let type_node = field.child_by_field_name(kinds.type_field);
        let raw_type = type_node
            .map(|t| source.node_text(&t))
            .unwrap_or_else(|| "unknown".to_string());
        let type_names = type_node
            .map(|t| helpers::type_names(extractor, source, t))
            .unwrap_or_default();

        // `private Room a, b;` declares two fields
        let mut cursor = field.walk();
        let declarators: Vec<Node> = field
            .children_by_field_name(kinds.declarator_field, &mut cursor)
            .collect();
        for declarator in declarators {
            let Some(name) = source.field_text(&declarator, kinds.name_field) else {
                continue;
            };
            fields.push(FieldReference {
                name,
                access,
                raw_type: raw_type.clone(),
                type_names: type_names.clone(),
            });
        }
    }

    fields
}

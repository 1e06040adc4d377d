/// Supertype, field and signature references of the primary declaration
use crate::extractors::java::JavaExtractor;
use crate::inference::TypeReferences;
use crate::syntax::ParsedSource;

use super::classes::{find_primary_declaration, DeclarationForm};
use super::helpers;

/// Everything relationship inference needs to know about one file
///
/// Empty when the file has no type declaration.
pub(super) fn collect_references(extractor: &JavaExtractor, source: &ParsedSource) -> TypeReferences {
    let kinds = extractor.kinds();
    let Some((decl, form)) = find_primary_declaration(extractor, source) else {
        return TypeReferences::default();
    };

    let mut refs = TypeReferences::default();

    // class A extends B
    if let Some(clause) = source.find_child_by_type(decl, kinds.superclass) {
        let mut cursor = clause.walk();
        let base = clause.named_children(&mut cursor).next();
        refs.superclass = base.and_then(|b| helpers::base_type_name(extractor, source, b));
    }

    // class A implements I, J / record R() implements I / enum E implements I
    if let Some(clause) = source.find_child_by_type(decl, kinds.super_interfaces) {
        refs.implemented_interfaces = helpers::type_list_entries(extractor, source, clause)
            .into_iter()
            .filter_map(|t| helpers::base_type_name(extractor, source, t))
            .collect();
    }

    // interface I extends J, K
    if form == DeclarationForm::Interface {
        if let Some(clause) = source.find_child_by_type(decl, kinds.extends_interfaces) {
            refs.extended_interfaces = helpers::type_list_entries(extractor, source, clause)
                .into_iter()
                .filter_map(|t| helpers::base_type_name(extractor, source, t))
                .collect();
        }
    }

    refs.fields = super::fields::extract_fields(extractor, source, decl, form);

    for method in super::methods::extract_methods(extractor, source, decl) {
        refs.parameter_types.extend(method.parameter_types);
        refs.return_types.extend(method.return_types);
    }
    refs.parameter_types
        .extend(super::methods::constructor_parameter_types(extractor, source, decl));

    tracing::trace!(
        "Collected {} field and {} supertype references from {}",
        refs.fields.len(),
        refs.superclass.iter().count()
            + refs.implemented_interfaces.len()
            + refs.extended_interfaces.len(),
        source.path.display()
    );
    refs
}

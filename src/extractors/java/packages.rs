/// Package declaration extraction
use crate::extractors::java::JavaExtractor;
use crate::syntax::ParsedSource;

/// Dotted package name of the file, if it declares one
pub(super) fn extract_package(extractor: &JavaExtractor, source: &ParsedSource) -> Option<String> {
    let kinds = extractor.kinds();
    let declaration = source.find_child_by_type(source.root(), kinds.package_declaration)?;

    let name = source
        .find_children_by_types(declaration, kinds.package_names)
        .into_iter()
        .next()?;
    let package = source.node_text(&name);

    if package.trim().is_empty() {
        None
    } else {
        Some(package.trim().to_string())
    }
}

//! Identity resolution
//!
//! Assigns every extracted node its id (`package.Name`, or a UUID derived from
//! the root-relative file path when the file declares no package), drops
//! duplicate qualified names and builds the simple-name index used by
//! relationship inference.
//!
//! The index is closed-world: only names declared in the current batch
//! resolve. Policy for clashes is first-wins in file enumeration order.

use crate::extractors::ExtractedDeclaration;
use crate::model::Node;
use crate::utils::paths::to_relative_unix_style;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use tracing::warn;
use uuid::Uuid;

/// Simple declared name -> node id
#[derive(Debug, Clone, Default)]
pub struct NameIndex {
    by_name: HashMap<String, String>,
}

impl NameIndex {
    /// Insert unless the name is already indexed; returns whether it was inserted
    pub fn insert(&mut self, name: &str, id: &str) -> bool {
        if self.by_name.contains_key(name) {
            return false;
        }
        self.by_name.insert(name.to_string(), id.to_string());
        true
    }

    pub fn resolve(&self, name: &str) -> Option<&str> {
        self.by_name.get(name).map(|id| id.as_str())
    }

    pub fn len(&self) -> usize {
        self.by_name.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_name.is_empty()
    }
}

/// A node that survived identity resolution, with the file it came from
#[derive(Debug, Clone)]
pub struct ResolvedNode {
    pub node: Node,
    pub path: PathBuf,
    pub referenced_types: Vec<String>,
}

/// A discarded declaration whose qualified name was already taken
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DuplicateName {
    pub qualified_name: String,
    pub kept: PathBuf,
    pub discarded: PathBuf,
}

#[derive(Debug, Default)]
pub struct Resolution {
    pub nodes: Vec<ResolvedNode>,
    pub index: NameIndex,
    pub duplicates: Vec<DuplicateName>,
    /// Nodes that received a fallback id and are unreachable by name
    pub unnamed: usize,
}

/// `package.Name`, or `None` when there is no package to qualify with
pub fn qualified_id(package: Option<&str>, name: &str) -> Option<String> {
    match package.map(str::trim) {
        Some(package) if !package.is_empty() => Some(format!("{}.{}", package, name)),
        _ => None,
    }
}

/// Fallback id for declarations without a package
///
/// Name-based (v5) over the root-relative path, so one file keeps its id
/// across runs and two files never share one.
pub fn fallback_id(relative_path: &str) -> String {
    Uuid::new_v5(&Uuid::NAMESPACE_URL, relative_path.as_bytes()).to_string()
}

/// Assign ids and build the index
///
/// `declarations` must be in file enumeration order; that order decides which
/// of two clashing declarations is kept. Paths are made relative to `root`
/// for fallback ids.
pub fn resolve(root: &Path, declarations: Vec<(PathBuf, ExtractedDeclaration)>) -> Resolution {
    let mut resolution = Resolution::default();
    let mut owners: HashMap<String, PathBuf> = HashMap::new();

    for (path, declaration) in declarations {
        let ExtractedDeclaration {
            mut node,
            package,
            referenced_types,
        } = declaration;

        match qualified_id(package.as_deref(), &node.name) {
            Some(id) => {
                if let Some(kept) = owners.get(&id) {
                    warn!(
                        "Duplicate type '{}' in {} (already declared in {}), discarding",
                        id,
                        path.display(),
                        kept.display()
                    );
                    resolution.duplicates.push(DuplicateName {
                        qualified_name: id,
                        kept: kept.clone(),
                        discarded: path,
                    });
                    continue;
                }

                if !resolution.index.insert(&node.name, &id) {
                    warn!(
                        "Simple name '{}' of {} already indexed as {}, references resolve to the first",
                        node.name,
                        id,
                        resolution.index.resolve(&node.name).unwrap_or_default()
                    );
                }
                owners.insert(id.clone(), path.clone());
                node.id = id;
            }
            None => {
                let id = fallback_id(&to_relative_unix_style(&path, root));
                tracing::debug!(
                    "No package for '{}' in {}, using fallback id {}",
                    node.name,
                    path.display(),
                    id
                );
                resolution.unnamed += 1;
                node.id = id;
            }
        }

        resolution.nodes.push(ResolvedNode {
            node,
            path,
            referenced_types,
        });
    }

    resolution
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::NodeKind;

    fn declaration(name: &str, package: Option<&str>) -> ExtractedDeclaration {
        ExtractedDeclaration {
            node: Node::new(name, NodeKind::Class),
            package: package.map(|p| p.to_string()),
            referenced_types: Vec::new(),
        }
    }

    #[test]
    fn test_qualified_id() {
        assert_eq!(qualified_id(Some("p"), "A").as_deref(), Some("p.A"));
        assert_eq!(
            qualified_id(Some("com.acme"), "Room").as_deref(),
            Some("com.acme.Room")
        );
        assert_eq!(qualified_id(Some("  "), "A"), None);
        assert_eq!(qualified_id(None, "A"), None);
    }

    #[test]
    fn test_first_declaration_wins() {
        let resolution = resolve(Path::new(""), vec![
            (PathBuf::from("a/Room.java"), declaration("Room", Some("home"))),
            (PathBuf::from("b/Room.java"), declaration("Room", Some("home"))),
        ]);
        assert_eq!(resolution.nodes.len(), 1);
        assert_eq!(resolution.nodes[0].path, PathBuf::from("a/Room.java"));
        assert_eq!(resolution.duplicates.len(), 1);
        assert_eq!(resolution.duplicates[0].qualified_name, "home.Room");
        assert_eq!(resolution.duplicates[0].discarded, PathBuf::from("b/Room.java"));
    }

    #[test]
    fn test_simple_name_collision_keeps_first_in_index() {
        let resolution = resolve(Path::new(""), vec![
            (PathBuf::from("a/Room.java"), declaration("Room", Some("a"))),
            (PathBuf::from("b/Room.java"), declaration("Room", Some("b"))),
        ]);
        assert_eq!(resolution.nodes.len(), 2);
        assert_eq!(resolution.index.resolve("Room"), Some("a.Room"));
        assert_eq!(resolution.index.len(), 1);
    }

    #[test]
    fn test_missing_package_gets_unindexed_fallback_id() {
        let resolution = resolve(Path::new(""), vec![
            (PathBuf::from("A.java"), declaration("A", None)),
            (PathBuf::from("B.java"), declaration("A", None)),
        ]);
        assert_eq!(resolution.nodes.len(), 2);
        assert_eq!(resolution.unnamed, 2);
        assert!(resolution.index.is_empty());
        assert_ne!(resolution.nodes[0].node.id, resolution.nodes[1].node.id);
        assert!(Uuid::parse_str(&resolution.nodes[0].node.id).is_ok());
    }

    #[test]
    fn test_fallback_id_depends_only_on_relative_path() {
        let first = resolve(
            Path::new("/work/a"),
            vec![(PathBuf::from("/work/a/tmp/Scratch.java"), declaration("Scratch", None))],
        );
        let second = resolve(
            Path::new("/elsewhere"),
            vec![(PathBuf::from("/elsewhere/tmp/Scratch.java"), declaration("Scratch", None))],
        );
        assert_eq!(first.nodes[0].node.id, second.nodes[0].node.id);
        assert_eq!(first.nodes[0].node.id, fallback_id("tmp/Scratch.java"));
        assert_ne!(fallback_id("tmp/Scratch.java"), fallback_id("tmp/Other.java"));
    }
}

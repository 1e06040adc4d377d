//! Source Collector
//!
//! Recursively enumerates the files under a root whose name ends with the
//! front end's source suffix. Unreadable subdirectories and symlink loops are
//! skipped and counted; only an unreadable root aborts the walk.

use crate::error::ExtractError;
use crate::utils::ignore::{load_classgraphignore, IgnoreMatcher};
use crate::utils::paths::to_relative_unix_style;
use ignore::WalkBuilder;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// What to collect and how to walk
#[derive(Debug, Clone)]
pub struct CollectOptions {
    /// File name suffix, e.g. `.java`
    pub suffix: String,
    /// Patterns added to those from `.classgraphignore`
    pub ignore_patterns: Vec<String>,
    pub follow_links: bool,
}

impl CollectOptions {
    pub fn new(suffix: impl Into<String>) -> Self {
        Self {
            suffix: suffix.into(),
            ignore_patterns: Vec::new(),
            follow_links: false,
        }
    }
}

/// Source files found under one root
#[derive(Debug, Clone, Default)]
pub struct SourceCollection {
    /// Sorted by root-relative path
    pub files: Vec<PathBuf>,
    /// Directories or links the walk could not enter
    pub skipped_entries: usize,
}

impl SourceCollection {
    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }
}

/// Walk `root` and collect matching files
///
/// A missing root (`None`) yields an empty collection.
pub fn collect_source_files(
    root: Option<&Path>,
    options: &CollectOptions,
) -> Result<SourceCollection, ExtractError> {
    let Some(root) = root else {
        return Ok(SourceCollection::default());
    };

    fs::read_dir(root).map_err(|source| ExtractError::RootUnreadable {
        path: root.to_path_buf(),
        source,
    })?;

    let mut patterns = load_classgraphignore(root);
    patterns.extend(options.ignore_patterns.iter().cloned());
    let matcher = IgnoreMatcher::new(&patterns);

    let filter_root = root.to_path_buf();
    let walker = WalkBuilder::new(root)
        .standard_filters(false)
        .hidden(false)
        .follow_links(options.follow_links)
        .filter_entry(move |entry| {
            if entry.depth() == 0 {
                return true;
            }
            let relative = to_relative_unix_style(entry.path(), &filter_root);
            !matcher.is_ignored(&relative)
        })
        .build();

    let mut collection = SourceCollection::default();
    let mut keyed: Vec<(String, PathBuf)> = Vec::new();

    for entry in walker {
        let entry = match entry {
            Ok(value) => value,
            Err(err) => {
                warn!("Skipping entry under {}: {}", root.display(), err);
                collection.skipped_entries += 1;
                continue;
            }
        };
        if !entry.file_type().map(|ft| ft.is_file()).unwrap_or(false) {
            continue;
        }
        let path = entry.path();
        let matches_suffix = path
            .file_name()
            .map(|name| name.to_string_lossy().ends_with(options.suffix.as_str()))
            .unwrap_or(false);
        if !matches_suffix {
            continue;
        }
        keyed.push((to_relative_unix_style(path, root), path.to_path_buf()));
    }

    keyed.sort_by(|a, b| a.0.cmp(&b.0));
    collection.files = keyed.into_iter().map(|(_, path)| path).collect();

    debug!(
        "Collected {} '{}' files under {} ({} skipped entries)",
        collection.files.len(),
        options.suffix,
        root.display(),
        collection.skipped_entries
    );
    Ok(collection)
}

/// Count matching files without reading any of them
pub fn count_source_files(
    root: Option<&Path>,
    options: &CollectOptions,
) -> Result<usize, ExtractError> {
    collect_source_files(root, options).map(|collection| collection.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn write(dir: &Path, relative: &str, content: &str) {
        let path = dir.join(relative);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, content).unwrap();
    }

    fn relative_files(collection: &SourceCollection, root: &Path) -> Vec<String> {
        collection
            .files
            .iter()
            .map(|f| to_relative_unix_style(f, root))
            .collect()
    }

    #[test]
    fn test_none_root_is_empty() {
        let collection = collect_source_files(None, &CollectOptions::new(".java")).unwrap();
        assert!(collection.is_empty());
        assert_eq!(collection.skipped_entries, 0);
    }

    #[test]
    fn test_recursive_suffix_filter_sorted() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();
        write(root, "b/Room.java", "class Room {}");
        write(root, "a/deep/er/Light.java", "class Light {}");
        write(root, "Main.java", "class Main {}");
        write(root, "notes.txt", "not java");
        write(root, "a/Readme.java.bak", "backup");

        let collection = collect_source_files(Some(root), &CollectOptions::new(".java")).unwrap();
        assert_eq!(
            relative_files(&collection, root),
            vec!["Main.java", "a/deep/er/Light.java", "b/Room.java"]
        );
    }

    #[test]
    fn test_hidden_and_gitignored_files_are_collected() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();
        write(root, ".gitignore", "*.java\n");
        write(root, ".hidden/A.java", "class A {}");
        write(root, "B.java", "class B {}");

        let count = count_source_files(Some(root), &CollectOptions::new(".java")).unwrap();
        assert_eq!(count, 2);
    }

    #[test]
    fn test_ignore_file_and_extra_patterns() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();
        write(root, ".classgraphignore", "generated/\n");
        write(root, "generated/Gen.java", "class Gen {}");
        write(root, "src/RoomTest.java", "class RoomTest {}");
        write(root, "src/Room.java", "class Room {}");

        let mut options = CollectOptions::new(".java");
        options.ignore_patterns = vec!["*Test.java".to_string()];
        let collection = collect_source_files(Some(root), &options).unwrap();
        assert_eq!(relative_files(&collection, root), vec!["src/Room.java"]);
    }

    #[test]
    fn test_missing_root_is_an_error() {
        let temp_dir = TempDir::new().unwrap();
        let missing = temp_dir.path().join("nope");
        let err = collect_source_files(Some(&missing), &CollectOptions::new(".java")).unwrap_err();
        assert!(matches!(err, ExtractError::RootUnreadable { .. }));
    }

    #[cfg(unix)]
    #[test]
    fn test_symlink_loop_is_skipped() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();
        write(root, "pkg/A.java", "class A {}");
        std::os::unix::fs::symlink(root.join("pkg"), root.join("pkg/loop")).unwrap();

        let mut options = CollectOptions::new(".java");
        options.follow_links = true;
        let collection = collect_source_files(Some(root), &options).unwrap();
        assert_eq!(relative_files(&collection, root), vec!["pkg/A.java"]);
        assert_eq!(collection.skipped_entries, 1);
    }
}

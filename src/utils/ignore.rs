//! Utilities for handling .classgraphignore file patterns
//!
//! Loading and matching is shared by counting and extraction so both see the
//! same file set.
//!
use std::fs;
use std::path::Path;
use tracing::{debug, warn};

/// Name of the ignore file looked up in the extraction root
pub const IGNORE_FILE_NAME: &str = ".classgraphignore";

/// Load custom ignore patterns from .classgraphignore in the root
///
/// Returns an empty vector when the file does not exist or cannot be read;
/// a broken ignore file never stops a run. Invalid UTF-8 is decoded lossily.
/// Empty lines and comments (lines starting with #) are skipped.
///
/// # Examples
///
/// ```text
/// # .classgraphignore file content
/// generated/
/// *Test.java
/// build/**/*.java
/// ```
pub fn load_classgraphignore(root: &Path) -> Vec<String> {
    let ignore_file = root.join(IGNORE_FILE_NAME);

    if !ignore_file.is_file() {
        return Vec::new();
    }

    let content = match fs::read(&ignore_file) {
        Ok(bytes) => String::from_utf8_lossy(&bytes).into_owned(),
        Err(e) => {
            warn!("Failed to read {}, ignoring it: {}", ignore_file.display(), e);
            return Vec::new();
        }
    };

    let patterns: Vec<String> = content
        .lines()
        .map(|line| line.trim())
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(|line| line.to_string())
        .collect();

    if !patterns.is_empty() {
        debug!(
            "Loaded {} custom ignore patterns from {}",
            patterns.len(),
            IGNORE_FILE_NAME
        );
    }

    patterns
}

/// Compiled ignore patterns
///
/// Four pattern forms, tried in this order:
/// - Directory patterns (ending with /): the directory as a whole path
///   component, plus all contents
/// - Suffix patterns (`*` followed by text without further wildcards, e.g.
///   `*.gen.java` or `*Test.java`): file name ends with the text
/// - Glob patterns (containing `*`, `?` or `[`): matched against the whole
///   relative path with the `glob` crate
/// - Anything else: substring of the relative path
///
/// "generated/" matches "generated" and "src/generated" but not
/// "my-generated".
#[derive(Debug, Clone, Default)]
pub struct IgnoreMatcher {
    rules: Vec<Rule>,
}

#[derive(Debug, Clone)]
enum Rule {
    Directory(String),
    Suffix(String),
    Glob(glob::Pattern),
    Substring(String),
}

impl IgnoreMatcher {
    pub fn new(patterns: &[String]) -> Self {
        let rules = patterns
            .iter()
            .map(|p| p.trim())
            .filter(|p| !p.is_empty())
            .filter_map(|pattern| {
                if let Some(dir) = pattern.strip_suffix('/') {
                    return Some(Rule::Directory(dir.trim_start_matches('/').to_string()));
                }
                if let Some(suffix) = pattern.strip_prefix('*') {
                    if !suffix.is_empty() && !has_wildcard(suffix) {
                        return Some(Rule::Suffix(suffix.to_string()));
                    }
                }
                if has_wildcard(pattern) {
                    return match glob::Pattern::new(pattern) {
                        Ok(glob) => Some(Rule::Glob(glob)),
                        Err(e) => {
                            warn!("Invalid ignore pattern '{}': {}", pattern, e);
                            None
                        }
                    };
                }
                Some(Rule::Substring(pattern.to_string()))
            })
            .collect();
        Self { rules }
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Whether a root-relative, `/`-separated path is ignored
    pub fn is_ignored(&self, relative: &str) -> bool {
        self.rules.iter().any(|rule| match rule {
            Rule::Directory(dir) => {
                relative == dir
                    || relative.starts_with(&format!("{}/", dir))
                    || relative.ends_with(&format!("/{}", dir))
                    || relative.contains(&format!("/{}/", dir))
            }
            Rule::Suffix(suffix) => relative.ends_with(suffix.as_str()),
            Rule::Glob(glob) => glob.matches(relative),
            Rule::Substring(text) => relative.contains(text.as_str()),
        })
    }
}

fn has_wildcard(pattern: &str) -> bool {
    pattern.contains(['*', '?', '['])
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn matcher(patterns: &[&str]) -> IgnoreMatcher {
        let patterns: Vec<String> = patterns.iter().map(|p| p.to_string()).collect();
        IgnoreMatcher::new(&patterns)
    }

    #[test]
    fn test_load_missing_ignore_file() {
        let temp_dir = TempDir::new().unwrap();
        let patterns = load_classgraphignore(temp_dir.path());
        assert!(
            patterns.is_empty(),
            "Should return empty vector if .classgraphignore doesn't exist"
        );
    }

    #[test]
    fn test_load_ignore_file_with_invalid_utf8() {
        let temp_dir = TempDir::new().unwrap();
        fs::write(temp_dir.path().join(IGNORE_FILE_NAME), b"\xFF\xFE\ngenerated/\n").unwrap();

        let patterns = load_classgraphignore(temp_dir.path());
        assert_eq!(
            patterns,
            vec!["\u{FFFD}\u{FFFD}", "generated/"],
            "Undecodable bytes should not hide the valid patterns"
        );
    }

    #[cfg(unix)]
    #[test]
    fn test_unreadable_ignore_file_yields_no_patterns() {
        use std::os::unix::fs::PermissionsExt;

        let temp_dir = TempDir::new().unwrap();
        let ignore_file = temp_dir.path().join(IGNORE_FILE_NAME);
        fs::write(&ignore_file, "generated/\n").unwrap();
        fs::set_permissions(&ignore_file, fs::Permissions::from_mode(0o000)).unwrap();

        // Permission bits do not bind root; nothing to observe then
        let effective = fs::read(&ignore_file).is_err();
        let patterns = load_classgraphignore(temp_dir.path());
        fs::set_permissions(&ignore_file, fs::Permissions::from_mode(0o644)).unwrap();

        if effective {
            assert!(patterns.is_empty());
        } else {
            assert_eq!(patterns, vec!["generated/"]);
        }
    }

    #[test]
    fn test_load_ignore_file_with_patterns() {
        let temp_dir = TempDir::new().unwrap();
        fs::write(
            temp_dir.path().join(IGNORE_FILE_NAME),
            "# Comment line\ngenerated/\n*Test.java\n\n  legacy  \n# Another comment\n",
        )
        .unwrap();

        let patterns = load_classgraphignore(temp_dir.path());
        assert_eq!(
            patterns,
            vec!["generated/", "*Test.java", "legacy"],
            "Should load 3 patterns (ignoring comments and empty lines)"
        );
    }

    #[test]
    fn test_directory_pattern_respects_component_boundaries() {
        let m = matcher(&["generated/"]);
        assert!(m.is_ignored("generated"));
        assert!(m.is_ignored("generated/Room.java"));
        assert!(m.is_ignored("src/generated"));
        assert!(m.is_ignored("src/generated/deep/Room.java"));
        assert!(!m.is_ignored("my-generated/Room.java"));
        assert!(!m.is_ignored("src/subgenerated"));
    }

    #[test]
    fn test_suffix_pattern() {
        let m = matcher(&["*Test.java"]);
        assert!(m.is_ignored("src/IntegrationTest.java"));
        assert!(!m.is_ignored("src/Tester.java"));
    }

    #[test]
    fn test_glob_pattern() {
        let m = matcher(&["build/*/Gen?.java"]);
        assert!(m.is_ignored("build/out/Gen1.java"));
        assert!(!m.is_ignored("src/out/Gen1.java"));
    }

    #[test]
    fn test_substring_pattern() {
        let m = matcher(&["legacy"]);
        assert!(m.is_ignored("src/legacy_code/Old.java"));
        assert!(!m.is_ignored("src/modern/New.java"));
    }

    #[test]
    fn test_invalid_glob_is_dropped() {
        let m = matcher(&["[unclosed*"]);
        assert!(m.is_empty());
        assert!(!m.is_ignored("[unclosed/A.java"));
    }

    #[test]
    fn test_no_patterns_ignore_nothing() {
        let m = IgnoreMatcher::default();
        assert!(!m.is_ignored("src/Room.java"));
    }
}

// Extraction configuration
//
// Defaults mirror the Java front end; environment variables can override the
// switches that make sense outside of code (CLASSGRAPH_*).

use crate::cancel::CancellationFlag;
use std::env;
use tracing::warn;

/// Configuration for one extraction run
#[derive(Debug, Clone)]
pub struct ExtractConfig {
    /// Language front end to use (CLASSGRAPH_LANGUAGE)
    pub language: String,
    /// Extra ignore patterns, merged with `.classgraphignore` in the root
    pub ignore_patterns: Vec<String>,
    /// Follow symlinks while walking; loops are reported as skipped entries (CLASSGRAPH_FOLLOW_LINKS)
    pub follow_links: bool,
    /// Run both stages on the rayon pool (CLASSGRAPH_PARALLEL)
    pub parallel: bool,
    /// Treat trees containing syntax errors as parse failures (CLASSGRAPH_STRICT_PARSE)
    pub strict_parse: bool,
    /// Substrings of a raw field type that mark it as a to-many reference
    pub collection_markers: Vec<String>,
    /// Emit dependency edges for method parameter and return types
    pub infer_dependencies: bool,
    pub cancellation: CancellationFlag,
}

impl Default for ExtractConfig {
    fn default() -> Self {
        Self {
            language: "java".to_string(),
            ignore_patterns: Vec::new(),
            follow_links: false,
            parallel: true,
            strict_parse: false,
            collection_markers: vec!["List".to_string(), "Set".to_string(), "[]".to_string()],
            infer_dependencies: false,
            cancellation: CancellationFlag::new(),
        }
    }
}

impl ExtractConfig {
    /// Defaults overlaid with CLASSGRAPH_* environment variables
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(val) = env::var("CLASSGRAPH_LANGUAGE") {
            let val = val.trim().to_ascii_lowercase();
            if val.is_empty() {
                warn!(
                    "Empty CLASSGRAPH_LANGUAGE, using default: {}",
                    config.language
                );
            } else {
                config.language = val;
            }
        }

        config.follow_links = env_flag("CLASSGRAPH_FOLLOW_LINKS", config.follow_links);
        config.parallel = env_flag("CLASSGRAPH_PARALLEL", config.parallel);
        config.strict_parse = env_flag("CLASSGRAPH_STRICT_PARSE", config.strict_parse);

        config
    }

    pub fn with_language(mut self, language: impl Into<String>) -> Self {
        self.language = language.into();
        self
    }

    pub fn with_ignore_patterns(mut self, patterns: Vec<String>) -> Self {
        self.ignore_patterns = patterns;
        self
    }

    pub fn with_follow_links(mut self, follow_links: bool) -> Self {
        self.follow_links = follow_links;
        self
    }

    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    pub fn with_strict_parse(mut self, strict_parse: bool) -> Self {
        self.strict_parse = strict_parse;
        self
    }

    pub fn with_collection_markers(mut self, markers: Vec<String>) -> Self {
        self.collection_markers = markers;
        self
    }

    pub fn with_dependencies(mut self, infer_dependencies: bool) -> Self {
        self.infer_dependencies = infer_dependencies;
        self
    }

    pub fn with_cancellation(mut self, cancellation: CancellationFlag) -> Self {
        self.cancellation = cancellation;
        self
    }
}

fn env_flag(name: &str, default: bool) -> bool {
    match env::var(name) {
        Ok(val) => parse_flag(&val).unwrap_or_else(|| {
            warn!("Invalid {} value: {}, using default: {}", name, val, default);
            default
        }),
        Err(_) => default,
    }
}

fn parse_flag(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

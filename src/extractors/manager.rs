//! ExtractorManager - selects the language front end for a run
//!
//! Selection happens once, at configuration time; the pipeline then talks to
//! the returned trait object only.

use crate::error::ExtractError;
use crate::extractors::java::JavaExtractor;
use crate::extractors::LanguageExtractor;

/// Registry of language front ends
pub struct ExtractorManager {
    // Stateless: front ends are constructed on demand
}

impl Default for ExtractorManager {
    fn default() -> Self {
        Self::new()
    }
}

impl ExtractorManager {
    pub fn new() -> Self {
        Self {}
    }

    pub fn supported_languages(&self) -> Vec<&'static str> {
        crate::language::supported_languages().to_vec()
    }

    /// Front end for a language name (case-insensitive)
    pub fn extractor_for(&self, language: &str) -> Result<Box<dyn LanguageExtractor>, ExtractError> {
        let language = language.trim().to_ascii_lowercase();
        let extractor: Box<dyn LanguageExtractor> = match language.as_str() {
            "java" => Box::new(JavaExtractor::new()?),
            _ => return Err(ExtractError::UnsupportedLanguage(language)),
        };

        tracing::debug!(
            "Selected {} front end (suffix {})",
            extractor.language(),
            extractor.source_suffix()
        );
        Ok(extractor)
    }
}

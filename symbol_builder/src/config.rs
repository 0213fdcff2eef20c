//! Build configuration, loaded from a TOML file.
//!
//! Every field has a default, so an empty file (or no file) is a valid
//! configuration. The three thresholds were tuned empirically and are meant
//! to be adjusted against a labelled validation set.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{BuildError, Result};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BuildConfig {
    /// Keywords attached to more symbols than this are too generic to promote.
    pub generic_keyword_threshold: usize,

    /// Keywords attached to more symbols than this are dropped from the
    /// similarity sets.
    pub similarity_keyword_max: usize,

    /// Minimum semantic score (0.0-1.0) for a keyword to compete for promotion.
    pub semantic_threshold: f32,

    /// Annotation locales, in priority order. The first one supplies labels.
    pub locales: Vec<String>,

    pub emoji_test_url: String,

    /// Base annotations location; `{locale}` is substituted.
    pub annotations_url: String,

    /// Derived annotations location; `{locale}` is substituted.
    pub derived_annotations_url: String,

    pub cache_dir: PathBuf,

    /// GloVe-style word vector file used for semantic scoring.
    pub word_vectors: Option<PathBuf>,

    /// Comma-separated thesaurus used by the synonym pass.
    pub thesaurus: Option<PathBuf>,

    /// Where the compiled database is written.
    pub output: PathBuf,
}

impl Default for BuildConfig {
    fn default() -> Self {
        Self {
            generic_keyword_threshold: 75,
            similarity_keyword_max: 10,
            semantic_threshold: 0.45,
            locales: vec!["en".to_string()],
            emoji_test_url: "https://unicode.org/Public/emoji/15.1/emoji-test.txt".to_string(),
            annotations_url: "https://raw.githubusercontent.com/unicode-org/cldr-json/main/cldr-json/cldr-annotations-full/annotations/{locale}/annotations.json".to_string(),
            derived_annotations_url: "https://raw.githubusercontent.com/unicode-org/cldr-json/main/cldr-json/cldr-annotations-derived-full/annotationsDerived/{locale}/annotations.json".to_string(),
            cache_dir: PathBuf::from(".cache/sources"),
            word_vectors: None,
            thesaurus: None,
            output: PathBuf::from("symbols.bin"),
        }
    }
}

impl BuildConfig {
    /// Parse and validate a TOML document.
    pub fn from_toml(text: &str) -> Result<Self> {
        let config: BuildConfig = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a TOML file.
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path).map_err(|e| BuildError::Resource {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        Self::from_toml(&text)
    }

    pub fn validate(&self) -> Result<()> {
        if !(0.0..=1.0).contains(&self.semantic_threshold) {
            return Err(BuildError::Config(format!(
                "semantic_threshold must be within 0.0-1.0, got {}",
                self.semantic_threshold
            )));
        }
        if self.similarity_keyword_max < 2 {
            return Err(BuildError::Config(
                "similarity_keyword_max must be at least 2".to_string(),
            ));
        }
        if self.generic_keyword_threshold == 0 {
            return Err(BuildError::Config(
                "generic_keyword_threshold must be positive".to_string(),
            ));
        }
        if self.locales.is_empty() {
            return Err(BuildError::Config("at least one locale is required".to_string()));
        }
        Ok(())
    }

    /// Annotation source locations in load order: for each locale, the base
    /// document then the derived one.
    pub fn annotation_sources(&self) -> Vec<String> {
        self.locales
            .iter()
            .flat_map(|locale| {
                [
                    self.annotations_url.replace("{locale}", locale),
                    self.derived_annotations_url.replace("{locale}", locale),
                ]
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_document_uses_defaults() {
        let config = BuildConfig::from_toml("").unwrap();
        assert_eq!(config, BuildConfig::default());
        assert_eq!(config.generic_keyword_threshold, 75);
        assert_eq!(config.similarity_keyword_max, 10);
        assert!((config.semantic_threshold - 0.45).abs() < f32::EPSILON);
    }

    #[test]
    fn test_partial_override() {
        let config = BuildConfig::from_toml(
            r#"
            semantic_threshold = 0.6
            locales = ["en", "es"]
            output = "out/db.bin"
            "#,
        )
        .unwrap();

        assert!((config.semantic_threshold - 0.6).abs() < f32::EPSILON);
        assert_eq!(config.locales, vec!["en", "es"]);
        assert_eq!(config.output, PathBuf::from("out/db.bin"));
        assert_eq!(config.similarity_keyword_max, 10);
    }

    #[test]
    fn test_rejects_out_of_range_threshold() {
        assert!(matches!(
            BuildConfig::from_toml("semantic_threshold = 1.5"),
            Err(BuildError::Config(_))
        ));
        assert!(matches!(
            BuildConfig::from_toml("locales = []"),
            Err(BuildError::Config(_))
        ));
    }

    #[test]
    fn test_annotation_sources_order() {
        let config = BuildConfig {
            locales: vec!["en".to_string(), "de".to_string()],
            annotations_url: "data/{locale}/base.json".to_string(),
            derived_annotations_url: "data/{locale}/derived.json".to_string(),
            ..BuildConfig::default()
        };

        assert_eq!(
            config.annotation_sources(),
            vec![
                "data/en/base.json",
                "data/en/derived.json",
                "data/de/base.json",
                "data/de/derived.json",
            ]
        );
    }
}

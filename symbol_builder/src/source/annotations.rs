//! Parser for CLDR annotation documents.
//!
//! Both the base document (`{"annotations": {"annotations": {...}}}`) and the
//! derived one (`{"annotationsDerived": {"annotations": {...}}}`) are
//! accepted. Each record carries a `tts` label and `default` keywords.

use indexmap::IndexMap;
use serde::Deserialize;
use symbol_db::normalize_symbol;

use crate::error::{BuildError, Result};

/// CLDR ships both `["a", "b"]` and `"a | b"`.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum StringOrList {
    List(Vec<String>),
    Joined(String),
}

impl StringOrList {
    /// Trimmed values in source casing.
    fn into_raw(self) -> Vec<String> {
        let raw = match self {
            StringOrList::List(values) => values,
            StringOrList::Joined(joined) => joined.split('|').map(|s| s.to_string()).collect(),
        };
        raw.into_iter()
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect()
    }

    fn into_values(self) -> Vec<String> {
        self.into_raw().into_iter().map(|s| s.to_lowercase()).collect()
    }
}

#[derive(Debug, Deserialize)]
struct RawRecord {
    #[serde(default)]
    tts: Option<StringOrList>,
    #[serde(default)]
    default: Option<StringOrList>,
}

#[derive(Debug, Deserialize)]
struct RawBlock {
    #[serde(default)]
    annotations: IndexMap<String, RawRecord>,
}

#[derive(Debug, Deserialize)]
struct RawDocument {
    #[serde(default)]
    annotations: Option<RawBlock>,
    #[serde(default, rename = "annotationsDerived")]
    annotations_derived: Option<RawBlock>,
}

/// Label and keywords for one symbol.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Annotation {
    /// First `tts` value, in source casing. Keywords are lowercased.
    pub label: Option<String>,
    pub keywords: Vec<String>,
}

/// Annotations merged across documents, keyed by normalized symbol.
#[derive(Debug, Clone, Default)]
pub struct AnnotationSet {
    records: IndexMap<String, Annotation>,
}

impl AnnotationSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse one document and merge it into the set.
    ///
    /// Earlier documents win for labels; keywords are unioned in order.
    pub fn merge_document(&mut self, source_name: &str, text: &str) -> Result<()> {
        let doc: RawDocument = serde_json::from_str(text).map_err(|error| BuildError::Json {
            source_name: source_name.to_string(),
            error,
        })?;

        let blocks = [doc.annotations, doc.annotations_derived];
        if blocks.iter().all(|b| b.is_none()) {
            return Err(BuildError::Parse {
                source_name: source_name.to_string(),
                line: 0,
                message: "neither 'annotations' nor 'annotationsDerived' present".to_string(),
            });
        }

        for block in blocks.into_iter().flatten() {
            for (symbol, record) in block.annotations {
                let label = record
                    .tts
                    .and_then(|t| t.into_raw().into_iter().next());
                let keywords = record.default.map(|d| d.into_values()).unwrap_or_default();
                self.merge(&symbol, label, keywords);
            }
        }
        Ok(())
    }

    fn merge(&mut self, symbol: &str, label: Option<String>, keywords: Vec<String>) {
        let record = self.records.entry(normalize_symbol(symbol)).or_default();
        if record.label.is_none() {
            record.label = label;
        }
        for keyword in keywords {
            if !record.keywords.contains(&keyword) {
                record.keywords.push(keyword);
            }
        }
    }

    pub fn get(&self, symbol: &str) -> Option<&Annotation> {
        self.records.get(&normalize_symbol(symbol))
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const BASE: &str = r#"{
        "annotations": {
            "identity": { "language": "en" },
            "annotations": {
                "🐕": { "default": ["dog", "pet"], "tts": ["dog"] },
                "❤": { "default": "heart | love", "tts": "red heart" }
            }
        }
    }"#;

    const DERIVED: &str = r#"{
        "annotationsDerived": {
            "identity": { "language": "en" },
            "annotations": {
                "🐕": { "default": ["Pet", "hound"], "tts": ["doggo"] },
                "👋🏽": { "default": ["hand", "wave"], "tts": ["waving hand: medium skin tone"] }
            }
        }
    }"#;

    #[test]
    fn test_parse_base_document() {
        let mut set = AnnotationSet::new();
        set.merge_document("en/annotations.json", BASE).unwrap();

        let dog = set.get("🐕").unwrap();
        assert_eq!(dog.label.as_deref(), Some("dog"));
        assert_eq!(dog.keywords, vec!["dog", "pet"]);

        let heart = set.get("\u{2764}\u{FE0F}").unwrap();
        assert_eq!(heart.label.as_deref(), Some("red heart"));
        assert_eq!(heart.keywords, vec!["heart", "love"]);
    }

    #[test]
    fn test_merge_keeps_first_label_and_unions_keywords() {
        let mut set = AnnotationSet::new();
        set.merge_document("base", BASE).unwrap();
        set.merge_document("derived", DERIVED).unwrap();

        let dog = set.get("🐕").unwrap();
        assert_eq!(dog.label.as_deref(), Some("dog"));
        assert_eq!(dog.keywords, vec!["dog", "pet", "hound"]);
        assert_eq!(set.len(), 3);
    }

    #[test]
    fn test_label_keeps_source_casing() {
        let text = r#"{ "annotations": { "annotations": {
            "🇦🇺": { "default": ["Australia", "flag"], "tts": ["flag: Australia"] }
        } } }"#;
        let mut set = AnnotationSet::new();
        set.merge_document("en", text).unwrap();

        let flag = set.get("🇦🇺").unwrap();
        assert_eq!(flag.label.as_deref(), Some("flag: Australia"));
        assert_eq!(flag.keywords, vec!["australia", "flag"]);
    }

    #[test]
    fn test_rejects_unknown_document() {
        let mut set = AnnotationSet::new();
        assert!(matches!(
            set.merge_document("bad", r#"{"something": {}}"#),
            Err(BuildError::Parse { .. })
        ));
        assert!(matches!(
            set.merge_document("bad", "not json"),
            Err(BuildError::Json { .. })
        ));
    }
}

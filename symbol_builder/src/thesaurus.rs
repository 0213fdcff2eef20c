//! Synonym thesaurus consulted by the synonym expansion pass.

use indexmap::{IndexMap, IndexSet};
use std::path::Path;
use tracing::info;

use crate::error::{BuildError, Result};

pub trait Thesaurus {
    /// Synonyms of `word`, lowercased, never including the word itself.
    fn synonyms(&self, word: &str) -> Vec<String>;
}

/// Thesaurus with no entries.
#[derive(Debug, Clone, Copy, Default)]
pub struct EmptyThesaurus;

impl Thesaurus for EmptyThesaurus {
    fn synonyms(&self, _word: &str) -> Vec<String> {
        Vec::new()
    }
}

/// Thesaurus loaded from comma-separated lines: `head,syn1,syn2,...`.
///
/// Relations are made symmetric between the head word and each synonym.
#[derive(Debug, Clone, Default)]
pub struct SynonymTable {
    relations: IndexMap<String, IndexSet<String>>,
}

impl SynonymTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Relate `head` to each of `synonyms`, in both directions.
    pub fn add<I, S>(&mut self, head: &str, synonyms: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let head = head.trim().to_lowercase();
        if head.is_empty() {
            return;
        }
        for synonym in synonyms {
            let synonym = synonym.as_ref().trim().to_lowercase();
            if synonym.is_empty() || synonym == head {
                continue;
            }
            self.relations
                .entry(head.clone())
                .or_default()
                .insert(synonym.clone());
            self.relations.entry(synonym).or_default().insert(head.clone());
        }
    }

    pub fn parse(text: &str) -> Self {
        let mut table = Self::new();
        for line in text.lines() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            let mut fields = line.split(',');
            if let Some(head) = fields.next() {
                table.add(head, fields);
            }
        }
        table
    }

    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path).map_err(|e| BuildError::Resource {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        let table = Self::parse(&text);
        info!(path = %path.display(), words = table.len(), "Loaded thesaurus");
        Ok(table)
    }

    pub fn len(&self) -> usize {
        self.relations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.relations.is_empty()
    }
}

impl Thesaurus for SynonymTable {
    fn synonyms(&self, word: &str) -> Vec<String> {
        self.relations
            .get(&word.trim().to_lowercase())
            .map(|set| set.iter().cloned().collect())
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_and_lookup() {
        let table = SynonymTable::parse(
            "# comment\n\
             carton,box,case\n\
             \n\
             Juice,Drink, beverage\n",
        );

        assert_eq!(table.synonyms("carton"), vec!["box", "case"]);
        assert_eq!(table.synonyms("JUICE"), vec!["drink", "beverage"]);
    }

    #[test]
    fn test_relations_are_symmetric() {
        let table = SynonymTable::parse("carton,box\nchest,box\n");
        assert_eq!(table.synonyms("box"), vec!["carton", "chest"]);
        assert_eq!(table.synonyms("chest"), vec!["box"]);
    }

    #[test]
    fn test_never_returns_the_word_itself() {
        let table = SynonymTable::parse("box,box,crate\n");
        assert_eq!(table.synonyms("box"), vec!["crate"]);
        assert!(table.synonyms("unknown").is_empty());
        assert!(EmptyThesaurus.synonyms("box").is_empty());
    }
}

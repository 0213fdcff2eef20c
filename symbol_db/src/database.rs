//! The compiled database and its derived lookup tables.
//!
//! A `Database` is assembled once (by the offline build or by
//! `DatabaseBuilder` in tests), written to disk, and loaded read-only at
//! process start. Nothing mutates it afterwards, so it can be shared across
//! any number of concurrent requests behind an `Arc`.

use indexmap::{IndexMap, IndexSet};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::Path;
use tempfile::NamedTempFile;
use tracing::info;

use crate::entry::{normalize_symbol, Category, SymbolEntry};
use crate::error::{DatabaseError, Result};

const MAGIC: &[u8; 4] = b"WMDB";
const FORMAT_VERSION: u32 = 1;

/// All symbols of one category, in source order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryItems {
    pub category: Category,
    pub items: Vec<SymbolEntry>,
}

/// The immutable symbol database.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Database {
    /// Categories in build order.
    categories: Vec<CategoryItems>,

    /// Name -> display symbol. First writer wins; internal categories are skipped.
    name_to_symbol: IndexMap<String, String>,

    /// Symbol key -> keywords used to decide similarity.
    symbol_keywords: IndexMap<String, BTreeSet<String>>,

    /// Symbol key -> category, internal categories included.
    symbol_category: IndexMap<String, Category>,

    /// The shortest name of every searchable symbol, deduplicated.
    shortest_names: IndexSet<String>,

    /// Skin-tone variant key -> base symbol key.
    variant_to_base: IndexMap<String, String>,
}

impl Database {
    /// Resolve a word to its display symbol.
    pub fn lookup_name(&self, word: &str) -> Option<&str> {
        self.name_to_symbol
            .get(&word.trim().to_lowercase())
            .map(|s| s.as_str())
    }

    /// Normalize a symbol for lookup: strip variation selectors, then fold a
    /// skin-tone variant onto its base symbol.
    pub fn canonical_key(&self, symbol: &str) -> String {
        let key = normalize_symbol(symbol);
        match self.variant_to_base.get(&key) {
            Some(base) => base.clone(),
            None => key,
        }
    }

    /// Whether the symbol (or one of its variants) is in the database.
    pub fn contains(&self, symbol: &str) -> bool {
        self.symbol_category.contains_key(&self.canonical_key(symbol))
    }

    /// Category of a symbol.
    pub fn category_of(&self, symbol: &str) -> Option<&Category> {
        self.symbol_category.get(&self.canonical_key(symbol))
    }

    /// Similarity keywords of a symbol. `None` when the symbol is unknown.
    pub fn similarity_keywords(&self, symbol: &str) -> Option<&BTreeSet<String>> {
        self.symbol_keywords.get(&self.canonical_key(symbol))
    }

    /// All entries in a category, or an empty slice for an unknown category.
    pub fn symbols_in(&self, category: &Category) -> &[SymbolEntry] {
        self.categories
            .iter()
            .find(|c| &c.category == category)
            .map(|c| c.items.as_slice())
            .unwrap_or(&[])
    }

    /// Look up the full entry for a symbol.
    pub fn entry(&self, symbol: &str) -> Option<&SymbolEntry> {
        let key = self.canonical_key(symbol);
        let category = self.symbol_category.get(&key)?;
        self.symbols_in(category).iter().find(|e| e.key() == key)
    }

    /// Iterate over categories in build order.
    pub fn categories(&self) -> impl Iterator<Item = &CategoryItems> {
        self.categories.iter()
    }

    pub fn symbol_count(&self) -> usize {
        self.symbol_category.len()
    }

    pub fn name_count(&self) -> usize {
        self.name_to_symbol.len()
    }

    /// Iterate over the name -> symbol table in insertion order.
    pub fn names(&self) -> impl Iterator<Item = (&str, &str)> {
        self.name_to_symbol
            .iter()
            .map(|(name, symbol)| (name.as_str(), symbol.as_str()))
    }

    /// The deduplicated shortest-name set, in build order.
    pub fn shortest_names(&self) -> impl Iterator<Item = &str> {
        self.shortest_names.iter().map(|s| s.as_str())
    }

    /// Shortest names starting with `prefix`, for autocomplete lists.
    pub fn suggestions(&self, prefix: &str, limit: usize) -> Vec<&str> {
        let prefix = prefix.trim().to_lowercase();
        if prefix.is_empty() {
            return Vec::new();
        }
        self.shortest_names
            .iter()
            .filter(|name| name.starts_with(&prefix))
            .take(limit)
            .map(|s| s.as_str())
            .collect()
    }

    /// Serialize into the on-disk artifact format.
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        let mut bytes = Vec::with_capacity(1 << 16);
        bytes.extend_from_slice(MAGIC);
        bytes.extend_from_slice(&FORMAT_VERSION.to_le_bytes());
        bincode::serialize_into(&mut bytes, self)?;
        Ok(bytes)
    }

    /// Deserialize an artifact produced by [`Database::to_bytes`].
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        if bytes.len() < 8 || &bytes[..4] != MAGIC {
            return Err(DatabaseError::Format("missing header".to_string()));
        }
        let mut version = [0u8; 4];
        version.copy_from_slice(&bytes[4..8]);
        let version = u32::from_le_bytes(version);
        if version != FORMAT_VERSION {
            return Err(DatabaseError::Format(format!(
                "format version {} (expected {})",
                version, FORMAT_VERSION
            )));
        }
        Ok(bincode::deserialize(&bytes[8..])?)
    }

    /// Write the artifact atomically: readers see the old file or the new
    /// one, never a partial write.
    pub fn save(&self, path: &Path) -> Result<()> {
        let parent_dir = match path.parent() {
            Some(p) if !p.as_os_str().is_empty() => p,
            _ => Path::new("."),
        };
        fs::create_dir_all(parent_dir)?;

        let bytes = self.to_bytes()?;
        let temp_file = NamedTempFile::new_in(parent_dir)?;
        {
            let mut writer = BufWriter::new(&temp_file);
            writer.write_all(&bytes)?;
            writer.flush()?;
        }
        temp_file
            .persist(path)
            .map_err(|e| DatabaseError::Io(e.error))?;

        info!(
            path = %path.display(),
            symbols = self.symbol_count(),
            names = self.name_count(),
            bytes = bytes.len(),
            "Saved symbol database"
        );
        Ok(())
    }

    /// Load an artifact from disk.
    pub fn load(path: &Path) -> Result<Self> {
        let mut reader = BufReader::new(File::open(path)?);
        let mut bytes = Vec::new();
        reader.read_to_end(&mut bytes)?;
        let db = Self::from_bytes(&bytes)?;

        info!(
            path = %path.display(),
            symbols = db.symbol_count(),
            names = db.name_count(),
            "Loaded symbol database"
        );
        Ok(db)
    }
}

/// Assembles a [`Database`] and derives its lookup tables.
///
/// Entries are grouped by category in the order categories are first seen,
/// and every first-writer-wins rule follows that order.
#[derive(Debug, Default)]
pub struct DatabaseBuilder {
    categories: Vec<CategoryItems>,
    similarity: IndexMap<String, BTreeSet<String>>,
}

impl DatabaseBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an entry to its category bucket.
    pub fn add_entry(&mut self, entry: SymbolEntry) {
        match self
            .categories
            .iter_mut()
            .find(|c| c.category == entry.category)
        {
            Some(bucket) => bucket.items.push(entry),
            None => self.categories.push(CategoryItems {
                category: entry.category.clone(),
                items: vec![entry],
            }),
        }
    }

    pub fn with_entry(mut self, entry: SymbolEntry) -> Self {
        self.add_entry(entry);
        self
    }

    /// Set the similarity keywords of a symbol. Keywords are lowercased.
    pub fn set_similarity_keywords<I, S>(&mut self, symbol: &str, keywords: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let set = keywords
            .into_iter()
            .map(|k| k.as_ref().trim().to_lowercase())
            .filter(|k| !k.is_empty())
            .collect();
        self.similarity.insert(normalize_symbol(symbol), set);
    }

    pub fn with_similarity_keywords<I, S>(mut self, symbol: &str, keywords: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.set_similarity_keywords(symbol, keywords);
        self
    }

    /// Derive the lookup tables and validate the result.
    pub fn build(self) -> Result<Database> {
        let mut db = Database::default();

        for bucket in &self.categories {
            let internal = bucket.category.is_internal();

            for entry in &bucket.items {
                let key = entry.key();

                if entry.names.is_empty() {
                    return Err(DatabaseError::EmptyNames { symbol: entry.symbol.clone() });
                }
                if let Some(first) = db.symbol_category.get(&key) {
                    return Err(DatabaseError::DuplicateSymbol {
                        symbol: entry.symbol.clone(),
                        first: first.to_string(),
                        second: bucket.category.to_string(),
                    });
                }
                db.symbol_category.insert(key.clone(), bucket.category.clone());

                let keywords = self.similarity.get(&key).cloned().unwrap_or_default();
                db.symbol_keywords.insert(key.clone(), keywords);

                for variant in &entry.variants {
                    db.variant_to_base
                        .entry(normalize_symbol(variant))
                        .or_insert_with(|| key.clone());
                }

                if internal {
                    continue;
                }

                for name in &entry.names {
                    db.name_to_symbol
                        .entry(name.trim().to_lowercase())
                        .or_insert_with(|| entry.symbol.clone());
                }
                if let Some(shortest) = entry.shortest_name() {
                    db.shortest_names.insert(shortest.to_lowercase());
                }
            }
        }

        db.categories = self.categories;
        Ok(db)
    }
}

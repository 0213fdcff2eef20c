//! Symbol entries and categories - the records stored in the database.

use serde::{Deserialize, Serialize};

/// Text-style variation selector.
pub const TEXT_SELECTOR: char = '\u{FE0E}';
/// Emoji-style variation selector.
pub const EMOJI_SELECTOR: char = '\u{FE0F}';

/// Prefix marking a category that only exists to group confusable variants.
pub const INTERNAL_PREFIX: char = '_';

/// Strip presentation variation selectors from a symbol.
///
/// Every map keyed by symbol is keyed by this form, so `"❤️"` and `"❤"` resolve
/// to the same entry.
pub fn normalize_symbol(symbol: &str) -> String {
    symbol
        .chars()
        .filter(|c| *c != TEXT_SELECTOR && *c != EMOJI_SELECTOR)
        .collect()
}

/// A named bucket of symbols.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Category(pub String);

impl Category {
    /// Create a category from its bucket name.
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// Create an internal-only category. The prefix is added if missing.
    pub fn internal(name: impl Into<String>) -> Self {
        let name = name.into();
        if name.starts_with(INTERNAL_PREFIX) {
            Self(name)
        } else {
            Self(format!("{}{}", INTERNAL_PREFIX, name))
        }
    }

    /// Internal categories are hidden from name lookup and distractor pools.
    pub fn is_internal(&self) -> bool {
        self.0.starts_with(INTERNAL_PREFIX)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A single symbol and everything the game knows about it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SymbolEntry {
    /// The fully-qualified glyph, as it should be displayed.
    pub symbol: String,

    /// Directly searchable labels. The first one is the primary label.
    pub names: Vec<String>,

    /// Search-only aliases. These are never used to decide similarity.
    pub keywords: Vec<String>,

    pub category: Category,

    /// Skin-tone forms folded into this symbol.
    #[serde(default)]
    pub variants: Vec<String>,
}

impl SymbolEntry {
    /// Create an entry with a single primary name.
    pub fn new(symbol: impl Into<String>, name: impl Into<String>, category: Category) -> Self {
        Self {
            symbol: symbol.into(),
            names: vec![name.into()],
            keywords: Vec::new(),
            category,
            variants: Vec::new(),
        }
    }

    /// Add a name, ignoring duplicates.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.push_name(name);
        self
    }

    /// Add a search-only keyword, ignoring duplicates.
    pub fn with_keyword(mut self, keyword: impl Into<String>) -> Self {
        let keyword = keyword.into();
        if !self.keywords.contains(&keyword) {
            self.keywords.push(keyword);
        }
        self
    }

    /// Add several search-only keywords.
    pub fn with_keywords<I, S>(mut self, keywords: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        for keyword in keywords {
            self = self.with_keyword(keyword);
        }
        self
    }

    /// Record a skin-tone form of this symbol.
    pub fn with_variant(mut self, variant: impl Into<String>) -> Self {
        self.variants.push(variant.into());
        self
    }

    /// Append a name if it is not already present. Returns whether it was added.
    pub fn push_name(&mut self, name: impl Into<String>) -> bool {
        let name = name.into();
        if self.names.contains(&name) {
            false
        } else {
            self.names.push(name);
            true
        }
    }

    /// The normalized key used for every map lookup.
    pub fn key(&self) -> String {
        normalize_symbol(&self.symbol)
    }

    /// The primary display label.
    pub fn primary_name(&self) -> Option<&str> {
        self.names.first().map(|s| s.as_str())
    }

    /// The shortest name, first one wins on equal length.
    pub fn shortest_name(&self) -> Option<&str> {
        self.names
            .iter()
            .min_by_key(|n| n.chars().count())
            .map(|s| s.as_str())
    }
}

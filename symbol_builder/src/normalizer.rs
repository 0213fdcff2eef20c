//! Symbol source normalizer: turns parsed emoji-test lines and annotations
//! into one structured record per symbol.

use indexmap::IndexMap;
use symbol_db::{normalize_symbol, SymbolEntry};
use tracing::{debug, info};

use crate::categories::lookup_rule;
use crate::error::Result;
use crate::source::{AnnotationSet, EmojiTestLine};

/// Fitzpatrick skin tone modifiers, U+1F3FB..=U+1F3FF.
const SKIN_TONES: std::ops::RangeInclusive<char> = '\u{1F3FB}'..='\u{1F3FF}';

/// A symbol as read from the sources, before any keyword promotion.
#[derive(Debug, Clone, PartialEq)]
pub struct SourceSymbol {
    /// `names` holds the display name (and the full label when they differ);
    /// `keywords` holds every annotation keyword, unfiltered.
    pub entry: SymbolEntry,

    /// The canonical (text-to-speech) label, used for scoring.
    pub label: String,
}

impl SourceSymbol {
    pub fn is_internal(&self) -> bool {
        self.entry.category.is_internal()
    }
}

/// Strip skin tone modifiers. Returns `None` when the symbol has none, or is
/// nothing but a modifier (the skin tone swatches themselves).
fn skin_tone_base(symbol: &str) -> Option<String> {
    if !symbol.chars().any(|c| SKIN_TONES.contains(&c)) {
        return None;
    }
    let base: String = symbol.chars().filter(|c| !SKIN_TONES.contains(c)).collect();
    if base.is_empty() {
        None
    } else {
        Some(normalize_symbol(&base))
    }
}

/// Normalize the sources into symbol records, in source order.
///
/// Only fully-qualified symbols and components are kept. Skin-tone variants
/// are folded into their base symbol. Every kept line must map to a category.
pub fn normalize(lines: &[EmojiTestLine], annotations: &AnnotationSet) -> Result<Vec<SourceSymbol>> {
    let mut symbols: Vec<SourceSymbol> = Vec::new();
    let mut index_by_key: IndexMap<String, usize> = IndexMap::new();
    let mut variants: Vec<(String, String)> = Vec::new();

    for line in lines.iter().filter(|l| l.status.is_kept()) {
        let rule = lookup_rule(&line.group, &line.subgroup)?;

        if let Some(base) = skin_tone_base(&line.symbol) {
            variants.push((base, line.symbol.clone()));
            continue;
        }

        let key = normalize_symbol(&line.symbol);
        if index_by_key.contains_key(&key) {
            debug!(symbol = %line.symbol, "Skipping duplicate symbol");
            continue;
        }

        let annotation = annotations.get(&line.symbol);
        let source_label = annotation
            .and_then(|a| a.label.clone())
            .unwrap_or_else(|| line.name.clone());
        let label = source_label.to_lowercase();
        let display = rule.label.apply(&source_label);

        // The display name keeps its source casing; lookups fold case.
        let same_as_label = display.to_lowercase() == label;
        let mut entry = SymbolEntry::new(line.symbol.clone(), display, rule.category());
        if !same_as_label {
            entry.push_name(label.clone());
        }
        if let Some(annotation) = annotation {
            entry = entry.with_keywords(annotation.keywords.iter().cloned());
        }

        index_by_key.insert(key, symbols.len());
        symbols.push(SourceSymbol { entry, label });
    }

    let mut folded = 0usize;
    for (base, variant) in variants {
        match index_by_key.get(&base) {
            Some(&index) => {
                symbols[index].entry.variants.push(variant);
                folded += 1;
            }
            None => debug!(variant = %variant, "Skin tone variant without a base symbol"),
        }
    }

    info!(
        symbols = symbols.len(),
        skin_tone_variants = folded,
        "Normalized symbol sources"
    );
    Ok(symbols)
}

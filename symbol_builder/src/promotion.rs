//! Keyword promotion resolver.
//!
//! Decides which annotation keywords become first-class names. Each pass reads
//! a finished [`NameSnapshot`] and produces a new one, so a later pass always
//! sees the complete result of the previous pass and nothing is read while it
//! is being written.

use indexmap::{IndexMap, IndexSet};
use std::cmp::Ordering;
use tracing::{debug, info};

use crate::config::BuildConfig;
use crate::normalizer::SourceSymbol;
use crate::semantic::{is_inflection, SemanticScorer};

/// Which symbols carry each keyword, keyed in first-seen order.
#[derive(Debug, Clone, Default)]
pub struct KeywordIndex {
    holders: IndexMap<String, Vec<usize>>,
}

impl KeywordIndex {
    /// Index every keyword of every symbol, internal ones included.
    pub fn build(symbols: &[SourceSymbol]) -> Self {
        let mut holders: IndexMap<String, Vec<usize>> = IndexMap::new();
        for (index, symbol) in symbols.iter().enumerate() {
            for keyword in &symbol.entry.keywords {
                let list = holders.entry(keyword.clone()).or_default();
                if list.last() != Some(&index) {
                    list.push(index);
                }
            }
        }
        Self { holders }
    }

    /// Number of symbols carrying the keyword.
    pub fn count(&self, keyword: &str) -> usize {
        self.holders.get(keyword).map(|h| h.len()).unwrap_or(0)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[usize])> {
        self.holders
            .iter()
            .map(|(keyword, holders)| (keyword.as_str(), holders.as_slice()))
    }

    pub fn len(&self) -> usize {
        self.holders.len()
    }

    pub fn is_empty(&self) -> bool {
        self.holders.is_empty()
    }
}

fn folded_names(names: &[String]) -> Vec<String> {
    let mut folded: Vec<String> = Vec::with_capacity(names.len());
    for name in names {
        let name = name.to_lowercase();
        if !folded.contains(&name) {
            folded.push(name);
        }
    }
    folded
}

/// Every symbol's names at the end of a pass, indexed like the source symbols.
#[derive(Debug, Clone, PartialEq)]
pub struct NameSnapshot {
    names: Vec<Vec<String>>,
    promoted: Vec<IndexSet<String>>,
    /// Name -> first searchable symbol holding it.
    owners: IndexMap<String, usize>,
}

impl NameSnapshot {
    /// Names as they come out of the normalizer, folded to lowercase so they
    /// compare against keywords.
    pub fn initial(symbols: &[SourceSymbol]) -> Self {
        let names: Vec<Vec<String>> = symbols.iter().map(|s| folded_names(&s.entry.names)).collect();

        let mut owners = IndexMap::new();
        for (index, symbol) in symbols.iter().enumerate() {
            if symbol.is_internal() {
                continue;
            }
            for name in &names[index] {
                owners.entry(name.clone()).or_insert(index);
            }
        }

        Self {
            names,
            promoted: vec![IndexSet::new(); symbols.len()],
            owners,
        }
    }

    pub fn names(&self, index: usize) -> &[String] {
        &self.names[index]
    }

    pub fn has_name(&self, index: usize, name: &str) -> bool {
        self.names[index].iter().any(|n| n == name)
    }

    /// Keywords promoted to names for this symbol so far.
    pub fn promoted(&self, index: usize) -> &IndexSet<String> {
        &self.promoted[index]
    }

    /// The searchable symbol that holds `name`, if any.
    pub fn owner(&self, name: &str) -> Option<usize> {
        self.owners.get(name).copied()
    }

    pub fn promoted_count(&self) -> usize {
        self.promoted.iter().map(|p| p.len()).sum()
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Make `keyword` a name of the symbol unless another symbol already owns it.
    pub(crate) fn promote(&mut self, index: usize, keyword: &str) -> bool {
        match self.owners.get(keyword) {
            Some(&owner) if owner != index => return false,
            _ => {}
        }
        if self.has_name(index, keyword) {
            return false;
        }
        self.names[index].push(keyword.to_string());
        self.promoted[index].insert(keyword.to_string());
        self.owners.insert(keyword.to_string(), index);
        true
    }
}

/// Thresholds used by the promotion passes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PromotionSettings {
    pub generic_keyword_threshold: usize,
    pub semantic_threshold: f32,
}

impl Default for PromotionSettings {
    fn default() -> Self {
        Self::from(&BuildConfig::default())
    }
}

impl From<&BuildConfig> for PromotionSettings {
    fn from(config: &BuildConfig) -> Self {
        Self {
            generic_keyword_threshold: config.generic_keyword_threshold,
            semantic_threshold: config.semantic_threshold,
        }
    }
}

#[derive(Debug, Clone, Copy)]
struct Candidate {
    index: usize,
    has_name: bool,
    score: f32,
    label_len: usize,
}

/// Candidate ordering: existing name, then higher score, then shorter label,
/// then earlier source position.
///
/// Keyword frequency is not a rank key. Every candidate holds the same
/// keyword, so frequency only gates promotion through the generic threshold.
fn rank(a: &Candidate, b: &Candidate) -> Ordering {
    a.has_name
        .cmp(&b.has_name)
        .then(a.score.total_cmp(&b.score))
        .then(b.label_len.cmp(&a.label_len))
        .then(b.index.cmp(&a.index))
}

/// First promotion pass.
pub struct KeywordPromoter<'a> {
    symbols: &'a [SourceSymbol],
    index: &'a KeywordIndex,
    scorer: &'a dyn SemanticScorer,
    settings: PromotionSettings,
}

impl<'a> KeywordPromoter<'a> {
    pub fn new(
        symbols: &'a [SourceSymbol],
        index: &'a KeywordIndex,
        scorer: &'a dyn SemanticScorer,
        settings: PromotionSettings,
    ) -> Self {
        Self {
            symbols,
            index,
            scorer,
            settings,
        }
    }

    /// Evaluate a keyword against one symbol. `None` if the symbol is not a
    /// promotion candidate for it.
    fn candidate(&self, index: usize, keyword: &str, names: &NameSnapshot) -> Option<Candidate> {
        let symbol = &self.symbols[index];
        let has_name = names.has_name(index, keyword);
        let score = self.scorer.score(keyword, &symbol.label);
        let eligible = has_name
            || is_inflection(keyword, &symbol.label)
            || score > self.settings.semantic_threshold;

        eligible.then(|| Candidate {
            index,
            has_name,
            score,
            label_len: symbol.label.chars().count(),
        })
    }

    /// Pick the symbol that should own `keyword`, if any.
    fn winner(&self, keyword: &str, holders: &[usize], names: &NameSnapshot) -> Option<usize> {
        if holders.len() > self.settings.generic_keyword_threshold {
            return None;
        }

        let searchable: Vec<usize> = holders
            .iter()
            .copied()
            .filter(|&i| !self.symbols[i].is_internal())
            .collect();

        match (holders.len(), searchable.as_slice()) {
            (_, []) => None,
            // Sole holder in the whole dataset: nothing to compete with.
            (1, [only]) => Some(*only),
            _ => searchable
                .iter()
                .filter_map(|&i| self.candidate(i, keyword, names))
                .max_by(rank)
                .map(|c| c.index),
        }
    }

    /// Run the pass over every keyword, reading `initial` and returning the
    /// names after promotion.
    pub fn run(&self, initial: &NameSnapshot) -> NameSnapshot {
        let mut next = initial.clone();
        let mut generic = 0usize;

        for (keyword, holders) in self.index.iter() {
            if holders.len() > self.settings.generic_keyword_threshold {
                generic += 1;
                continue;
            }
            let Some(winner) = self.winner(keyword, holders, initial) else {
                continue;
            };
            if initial.has_name(winner, keyword) {
                continue;
            }
            if next.promote(winner, keyword) {
                debug!(
                    keyword,
                    symbol = %self.symbols[winner].entry.symbol,
                    contenders = holders.len(),
                    "Promoted keyword"
                );
            } else {
                debug!(keyword, "Keyword already owned by another symbol");
            }
        }

        info!(
            keywords = self.index.len(),
            generic_skipped = generic,
            promoted = next.promoted_count() - initial.promoted_count(),
            "Keyword promotion pass complete"
        );
        next
    }
}

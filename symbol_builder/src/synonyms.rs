//! Synonym expansion: the second promotion pass.
//!
//! Promotes a remaining keyword when one of its thesaurus synonyms is already
//! a name of the symbol, or is one of the words of a multi-word name. Reads
//! the finished first-pass snapshot and never the one it is writing.

use indexmap::IndexSet;
use tracing::{debug, info};

use crate::normalizer::SourceSymbol;
use crate::promotion::{KeywordIndex, NameSnapshot};
use crate::semantic::words;
use crate::thesaurus::Thesaurus;

pub struct SynonymExpander<'a> {
    symbols: &'a [SourceSymbol],
    index: &'a KeywordIndex,
    thesaurus: &'a dyn Thesaurus,
    generic_keyword_threshold: usize,
}

impl<'a> SynonymExpander<'a> {
    pub fn new(
        symbols: &'a [SourceSymbol],
        index: &'a KeywordIndex,
        thesaurus: &'a dyn Thesaurus,
        generic_keyword_threshold: usize,
    ) -> Self {
        Self {
            symbols,
            index,
            thesaurus,
            generic_keyword_threshold,
        }
    }

    /// Whether a synonym of `keyword` is one of `names` or one of `name_words`.
    fn relates(&self, keyword: &str, names: &[String], name_words: &IndexSet<String>) -> bool {
        self.thesaurus
            .synonyms(keyword)
            .iter()
            .any(|s| name_words.contains(s) || names.iter().any(|n| n == s))
    }

    /// Run the pass in symbol order. The first symbol to claim a keyword keeps it.
    pub fn run(&self, first_pass: &NameSnapshot) -> NameSnapshot {
        let mut next = first_pass.clone();
        let mut conflicts = 0usize;

        for (index, symbol) in self.symbols.iter().enumerate() {
            if symbol.is_internal() {
                continue;
            }

            let names = first_pass.names(index);
            let name_words: IndexSet<String> = names
                .iter()
                .filter(|n| n.contains(' '))
                .flat_map(|n| words(n).collect::<Vec<_>>())
                .collect();

            for keyword in &symbol.entry.keywords {
                if next.has_name(index, keyword) {
                    continue;
                }
                if self.index.count(keyword) > self.generic_keyword_threshold {
                    continue;
                }
                if !self.relates(keyword, names, &name_words) {
                    continue;
                }

                if next.promote(index, keyword) {
                    debug!(keyword = %keyword, symbol = %symbol.entry.symbol, "Promoted keyword by synonym");
                } else {
                    conflicts += 1;
                }
            }
        }

        info!(
            promoted = next.promoted_count() - first_pass.promoted_count(),
            already_owned = conflicts,
            "Synonym expansion pass complete"
        );
        next
    }
}

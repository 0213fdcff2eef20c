//! Database compiler and the end-to-end build pipeline.

use symbol_db::{Database, DatabaseBuilder, SymbolEntry};
use tracing::info;

use crate::config::BuildConfig;
use crate::error::Result;
use crate::normalizer::{normalize, SourceSymbol};
use crate::promotion::{KeywordIndex, KeywordPromoter, NameSnapshot, PromotionSettings};
use crate::semantic::{NullScorer, SemanticScorer, WordVectors};
use crate::source::{parse_emoji_test, AnnotationSet, SourceCache};
use crate::synonyms::SynonymExpander;
use crate::thesaurus::{EmptyThesaurus, SynonymTable, Thesaurus};

/// Keywords of symbol `index` that decide similarity.
///
/// A keyword qualifies when it is shared with at least one other symbol but
/// not with more than `max` symbols. Keywords promoted to names of this symbol
/// are excluded.
pub fn similarity_keywords(
    symbol: &SourceSymbol,
    index: usize,
    keywords: &KeywordIndex,
    names: &NameSnapshot,
    max: usize,
) -> Vec<String> {
    let promoted = names.promoted(index);
    symbol
        .entry
        .keywords
        .iter()
        .filter(|k| {
            let count = keywords.count(k);
            count > 1 && count <= max && !promoted.contains(k.as_str())
        })
        .cloned()
        .collect()
}

/// Assemble the database from the final name snapshot.
pub fn compile(
    symbols: &[SourceSymbol],
    names: &NameSnapshot,
    keywords: &KeywordIndex,
    similarity_keyword_max: usize,
) -> Result<Database> {
    let mut builder = DatabaseBuilder::new();
    let mut similarity_total = 0usize;

    for (index, symbol) in symbols.iter().enumerate() {
        let mut final_names: Vec<String> = names
            .names(index)
            .iter()
            .filter(|n| !n.trim().is_empty())
            .cloned()
            .collect();
        let search_only: Vec<String> = symbol
            .entry
            .keywords
            .iter()
            .filter(|k| !final_names.contains(k))
            .cloned()
            .collect();

        // Restore the display name's source casing.
        if let (Some(first), Some(display)) = (final_names.first_mut(), symbol.entry.primary_name()) {
            if *first == display.to_lowercase() {
                *first = display.to_string();
            }
        }

        let similarity = similarity_keywords(symbol, index, keywords, names, similarity_keyword_max);
        similarity_total += similarity.len();
        builder.set_similarity_keywords(&symbol.entry.symbol, &similarity);

        builder.add_entry(SymbolEntry {
            names: final_names,
            keywords: search_only,
            ..symbol.entry.clone()
        });
    }

    let database = builder.build()?;
    info!(
        symbols = database.symbol_count(),
        categories = database.categories().count(),
        names = database.name_count(),
        promoted = names.promoted_count(),
        similarity_keywords = similarity_total,
        "Compiled symbol database"
    );
    Ok(database)
}

/// Optional resources that steer keyword promotion.
pub struct BuildResources {
    pub scorer: Box<dyn SemanticScorer>,
    pub thesaurus: Box<dyn Thesaurus>,
}

impl Default for BuildResources {
    fn default() -> Self {
        Self {
            scorer: Box::new(NullScorer),
            thesaurus: Box::new(EmptyThesaurus),
        }
    }
}

impl BuildResources {
    /// Load the word vectors and thesaurus named in the configuration.
    pub fn load(config: &BuildConfig) -> Result<Self> {
        let scorer: Box<dyn SemanticScorer> = match &config.word_vectors {
            Some(path) => Box::new(WordVectors::load(path)?),
            None => Box::new(NullScorer),
        };
        let thesaurus: Box<dyn Thesaurus> = match &config.thesaurus {
            Some(path) => Box::new(SynonymTable::load(path)?),
            None => Box::new(EmptyThesaurus),
        };
        Ok(Self { scorer, thesaurus })
    }
}

/// Run every stage on already-fetched documents.
///
/// `annotation_documents` are `(source name, text)` pairs in priority order.
pub fn compile_sources(
    config: &BuildConfig,
    emoji_test: &str,
    annotation_documents: &[(String, String)],
    resources: &BuildResources,
) -> Result<Database> {
    let lines = parse_emoji_test(&config.emoji_test_url, emoji_test)?;

    let mut annotations = AnnotationSet::new();
    for (source_name, text) in annotation_documents {
        annotations.merge_document(source_name, text)?;
    }
    info!(
        lines = lines.len(),
        annotated = annotations.len(),
        "Parsed sources"
    );

    let symbols = normalize(&lines, &annotations)?;
    let index = KeywordIndex::build(&symbols);
    let initial = NameSnapshot::initial(&symbols);

    let first_pass = KeywordPromoter::new(
        &symbols,
        &index,
        resources.scorer.as_ref(),
        PromotionSettings::from(config),
    )
    .run(&initial);

    let second_pass = SynonymExpander::new(
        &symbols,
        &index,
        resources.thesaurus.as_ref(),
        config.generic_keyword_threshold,
    )
    .run(&first_pass);

    compile(&symbols, &second_pass, &index, config.similarity_keyword_max)
}

/// Fetch every source through the cache and compile the database.
pub fn build_database(config: &BuildConfig, cache: &SourceCache) -> Result<Database> {
    let emoji_test = cache.fetch(&config.emoji_test_url)?;
    let annotation_documents = config
        .annotation_sources()
        .into_iter()
        .map(|location| cache.fetch(&location).map(|text| (location, text)))
        .collect::<Result<Vec<_>>>()?;
    let resources = BuildResources::load(config)?;

    compile_sources(config, &emoji_test, &annotation_documents, &resources)
}

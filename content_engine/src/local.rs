//! Local content generator: answers from the color dictionary and the
//! compiled database, without any network access.

use rand::seq::SliceRandom;
use rand::Rng;
use symbol_db::{Category, Color, Database, GameContent};
use tracing::debug;

/// Pick two distractors for `target` from `category`.
///
/// Candidates exclude the target and everything similar to it, and the two
/// picks are never similar to each other. `None` when no such pair exists.
pub fn pick_distractors<R: Rng + ?Sized>(
    db: &Database,
    target: &str,
    category: &Category,
    rng: &mut R,
) -> Option<[String; 2]> {
    let target_key = db.canonical_key(target);
    let mut candidates: Vec<&str> = db
        .symbols_in(category)
        .iter()
        .map(|entry| entry.symbol.as_str())
        .filter(|symbol| db.canonical_key(symbol) != target_key && !db.are_similar(target, symbol))
        .collect();
    candidates.shuffle(rng);

    for (i, first) in candidates.iter().enumerate() {
        if let Some(second) = candidates[i + 1..]
            .iter()
            .find(|second| !db.are_similar(first, second))
        {
            return Some([first.to_string(), second.to_string()]);
        }
    }
    None
}

/// Two colors from the target's distractor pool that are not similar to each
/// other. When the pool holds no such pair, any two other colors are used.
fn color_round<R: Rng + ?Sized>(color: Color, rng: &mut R) -> Option<GameContent> {
    let mut pool = color.distractor_pool();
    pool.shuffle(rng);

    let pair = pool.iter().enumerate().find_map(|(i, first)| {
        pool[i + 1..]
            .iter()
            .find(|second| !first.is_similar(**second))
            .map(|second| [*first, *second])
    });

    let [first, second] = match pair {
        Some(pair) => pair,
        None => {
            let mut others: Vec<Color> = Color::ALL.into_iter().filter(|c| *c != color).collect();
            others.shuffle(rng);
            match others.as_slice() {
                [first, second, ..] => [*first, *second],
                _ => return None,
            }
        }
    };
    Some(GameContent::color(
        color.name(),
        [first.name().to_string(), second.name().to_string()],
    ))
}

/// Generates rounds from local data only.
pub struct LocalGenerator<'a> {
    db: &'a Database,
}

impl<'a> LocalGenerator<'a> {
    pub fn new(db: &'a Database) -> Self {
        Self { db }
    }

    /// Build a round for `word`.
    ///
    /// `None` means the word is unknown locally, or its category cannot
    /// supply two valid distractors. Either way the caller should try the
    /// fallback.
    pub fn generate<R: Rng + ?Sized>(&self, word: &str, rng: &mut R) -> Option<GameContent> {
        let word = word.trim().to_lowercase();
        if word.is_empty() {
            return None;
        }

        if let Some(color) = Color::from_word(&word) {
            return color_round(color, rng);
        }

        let target = self.db.lookup_name(&word)?;
        let category = self.db.category_of(target)?;
        match pick_distractors(self.db, target, category, rng) {
            Some(distractors) => Some(GameContent::symbol(target, distractors)),
            None => {
                debug!(word = %word, category = %category, "Not enough distinct distractors");
                None
            }
        }
    }
}

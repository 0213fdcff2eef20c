//! Corrector for generated rounds.
//!
//! A generative service is told to keep the three options visually distinct,
//! but nothing guarantees it. The corrector runs the similarity oracle over
//! the options and repairs what it can.

use rand::Rng;
use symbol_db::{ContentType, Database, GameContent};
use tracing::{debug, warn};

use crate::local::pick_distractors;

pub struct Corrector<'a> {
    db: &'a Database,
}

impl<'a> Corrector<'a> {
    pub fn new(db: &'a Database) -> Self {
        Self { db }
    }

    /// Whether any two options of a symbol round are similar.
    pub fn has_conflict(&self, content: &GameContent) -> bool {
        let target = content.target_value.as_str();
        let [first, second] = &content.distractors;

        self.db.are_similar(target, first)
            || self.db.are_similar(target, second)
            || self.db.are_similar(first, second)
    }

    /// Return a round whose options are not similar to each other, when one
    /// can be found.
    ///
    /// Color rounds pass through untouched. For a conflicting symbol round the
    /// distractors are redrawn from the target's category; failing that, the
    /// original distractors that are not similar to the target are kept. When
    /// neither works the original round is returned as is: a slightly
    /// imperfect round is better than no round.
    pub fn correct<R: Rng + ?Sized>(&self, content: GameContent, rng: &mut R) -> GameContent {
        if content.content_type == ContentType::Color || !self.has_conflict(&content) {
            return content;
        }

        let target = content.target_value.as_str();
        if let Some(category) = self.db.category_of(target).filter(|c| !c.is_internal()) {
            if let Some(distractors) = pick_distractors(self.db, target, category, rng) {
                debug!(symbol = %target, category = %category, "Redrew similar distractors");
                return GameContent::symbol(target, distractors);
            }
        }

        let kept: Vec<&String> = content
            .distractors
            .iter()
            .filter(|d| d.as_str() != target && !self.db.are_similar(target, d))
            .collect();
        if let [first, second, ..] = kept.as_slice() {
            let repaired = GameContent::symbol(target, [first.to_string(), second.to_string()]);
            if !self.has_conflict(&repaired) {
                return repaired;
            }
        }

        warn!(
            symbol = %target,
            distractors = ?content.distractors,
            "Could not repair similar options, keeping the generated round"
        );
        content
    }
}

//! Similarity oracle: decides whether two symbols are too alike to appear in
//! the same round.
//!
//! All fuzziness is resolved when the database is built. At runtime the check
//! is an exact intersection of the two symbols' similarity keyword sets.

use crate::database::Database;

impl Database {
    /// Whether two symbols are similar.
    ///
    /// Symbols are similar when they normalize to the same key or share a
    /// similarity keyword. A symbol missing from the database is never similar
    /// to anything, itself included.
    pub fn are_similar(&self, a: &str, b: &str) -> bool {
        let key_a = self.canonical_key(a);
        let key_b = self.canonical_key(b);

        let (Some(keywords_a), Some(keywords_b)) = (
            self.similarity_keywords(&key_a),
            self.similarity_keywords(&key_b),
        ) else {
            return false;
        };

        if key_a == key_b {
            return true;
        }

        // Iterate the smaller set.
        let (small, large) = if keywords_a.len() <= keywords_b.len() {
            (keywords_a, keywords_b)
        } else {
            (keywords_b, keywords_a)
        };
        small.iter().any(|k| large.contains(k))
    }
}

//! Word similarity used to decide which keywords deserve promotion.

use std::collections::HashMap;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use tracing::info;

use crate::error::{BuildError, Result};

/// Scores how close a keyword is to a canonical label, 0.0 to 1.0.
pub trait SemanticScorer {
    fn score(&self, keyword: &str, label: &str) -> f32;
}

/// Scorer used when no word vectors are configured. Only exact and
/// inflection matches can then win a contested keyword.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullScorer;

impl SemanticScorer for NullScorer {
    fn score(&self, _keyword: &str, _label: &str) -> f32 {
        0.0
    }
}

/// Word embeddings loaded from a GloVe-style text file: one word per line
/// followed by its vector components.
#[derive(Debug, Clone, Default)]
pub struct WordVectors {
    vectors: HashMap<String, Vec<f32>>,
    dimension: usize,
}

impl WordVectors {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a vector. Vectors whose dimension differs from the first one are rejected.
    pub fn insert(&mut self, word: impl Into<String>, vector: Vec<f32>) -> bool {
        if self.dimension == 0 {
            self.dimension = vector.len();
        }
        if vector.len() != self.dimension || vector.is_empty() {
            return false;
        }
        self.vectors.insert(word.into().to_lowercase(), vector);
        true
    }

    pub fn load(path: &Path) -> Result<Self> {
        let resource_err = |message: String| BuildError::Resource {
            path: path.to_path_buf(),
            message,
        };
        let file = File::open(path).map_err(|e| resource_err(e.to_string()))?;

        let mut vectors = Self::new();
        for (index, line) in BufReader::new(file).lines().enumerate() {
            let line = line?;
            let mut parts = line.split_whitespace();
            let Some(word) = parts.next() else {
                continue;
            };
            let vector: std::result::Result<Vec<f32>, _> = parts.map(str::parse::<f32>).collect();
            let vector = vector
                .map_err(|e| resource_err(format!("line {}: {}", index + 1, e)))?;
            if !vectors.insert(word, vector) {
                return Err(resource_err(format!(
                    "line {}: expected {} components",
                    index + 1,
                    vectors.dimension
                )));
            }
        }

        info!(
            path = %path.display(),
            words = vectors.len(),
            dimension = vectors.dimension,
            "Loaded word vectors"
        );
        Ok(vectors)
    }

    pub fn len(&self) -> usize {
        self.vectors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vectors.is_empty()
    }

    /// Mean vector of the known words in `text`. `None` when no word is known.
    fn text_vector(&self, text: &str) -> Option<Vec<f32>> {
        let mut sum = vec![0.0f32; self.dimension];
        let mut count = 0usize;
        for word in words(text) {
            if let Some(vector) = self.vectors.get(&word) {
                for (acc, v) in sum.iter_mut().zip(vector) {
                    *acc += v;
                }
                count += 1;
            }
        }
        if count == 0 {
            return None;
        }
        for acc in sum.iter_mut() {
            *acc /= count as f32;
        }
        Some(sum)
    }
}

impl SemanticScorer for WordVectors {
    fn score(&self, keyword: &str, label: &str) -> f32 {
        match (self.text_vector(keyword), self.text_vector(label)) {
            (Some(a), Some(b)) => cosine_similarity(&a, &b).max(0.0),
            _ => 0.0,
        }
    }
}

/// Lowercased alphanumeric words of a label.
pub fn words(text: &str) -> impl Iterator<Item = String> + '_ {
    text.split(|c: char| !c.is_alphanumeric() && c != '\'')
        .filter(|w| !w.is_empty())
        .map(|w| w.to_lowercase())
}

fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    if a.len() != b.len() || a.is_empty() {
        return 0.0;
    }

    let mut dot = 0.0f32;
    let mut norm_a = 0.0f32;
    let mut norm_b = 0.0f32;

    for (x, y) in a.iter().zip(b.iter()) {
        dot += x * y;
        norm_a += x * x;
        norm_b += y * y;
    }

    let denom = norm_a.sqrt() * norm_b.sqrt();
    if denom < f32::EPSILON {
        0.0
    } else {
        (dot / denom).clamp(-1.0, 1.0)
    }
}

const MIN_STEM: usize = 3;

/// Base forms reachable by undoing one regular English inflection.
fn base_forms(word: &str) -> Vec<String> {
    let mut forms = Vec::new();
    let mut push = |stem: &str, suffix: &str| {
        if stem.chars().count() >= MIN_STEM {
            forms.push(format!("{}{}", stem, suffix));
        }
    };

    if let Some(stem) = word.strip_suffix("ies") {
        push(stem, "y");
    }
    if let Some(stem) = word.strip_suffix("es") {
        push(stem, "");
    }
    if let Some(stem) = word.strip_suffix('s') {
        if !stem.ends_with('s') {
            push(stem, "");
        }
    }
    for suffix in ["ing", "ed"] {
        if let Some(stem) = word.strip_suffix(suffix) {
            push(stem, "");
            push(stem, "e");
            let mut chars = stem.chars().rev();
            if let (Some(last), Some(prev)) = (chars.next(), chars.next()) {
                if last == prev && !"aeiou".contains(last) {
                    push(&stem[..stem.len() - last.len_utf8()], "");
                }
            }
        }
    }
    forms
}

/// Plural-only reduction, used to match two plurals of the same noun.
fn plural_stem(word: &str) -> &str {
    if word.ends_with("ies") || word.ends_with("ss") {
        return word;
    }
    match word.strip_suffix('s') {
        Some(stem) if stem.chars().count() >= MIN_STEM => stem,
        _ => word,
    }
}

/// Whether `keyword` is the label itself or a regular inflection of it.
pub fn is_inflection(keyword: &str, label: &str) -> bool {
    let keyword = keyword.trim().to_lowercase();
    let label = label.trim().to_lowercase();

    keyword == label
        || base_forms(&keyword).contains(&label)
        || base_forms(&label).contains(&keyword)
        || plural_stem(&keyword) == plural_stem(&label)
}

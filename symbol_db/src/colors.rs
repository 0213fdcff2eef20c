//! Color dictionary: the fixed display palette, the words that name each color
//! in a handful of languages, and the hand-authored groups of colors that are
//! too close for a small child to tell apart.

use serde::{Deserialize, Serialize};

/// The basic display colors the game can show.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Color {
    Red,
    Orange,
    Yellow,
    Green,
    Blue,
    Purple,
    Pink,
    Brown,
    Black,
    White,
    Gray,
}

/// Pairs of colors that must never appear in the same round.
const SIMILARITY_GROUPS: &[&[Color]] = &[
    &[Color::Red, Color::Pink],
    &[Color::Red, Color::Orange],
    &[Color::Orange, Color::Yellow],
    &[Color::Orange, Color::Brown],
    &[Color::Blue, Color::Purple],
    &[Color::Purple, Color::Pink],
    &[Color::Black, Color::Gray],
    &[Color::White, Color::Gray],
];

// English, Spanish, French, German, Italian, Portuguese. Words that are also
// common object names ("rose", "café") are left out so they reach the symbol
// lookup instead.
const ALIASES: &[(Color, &[&str])] = &[
    (
        Color::Red,
        &["red", "rojo", "roja", "rouge", "rot", "rosso", "rossa", "vermelho", "vermelha"],
    ),
    (
        Color::Orange,
        &["orange", "naranja", "anaranjado", "arancione", "laranja"],
    ),
    (
        Color::Yellow,
        &["yellow", "amarillo", "amarilla", "jaune", "gelb", "giallo", "gialla", "amarelo", "amarela"],
    ),
    (
        Color::Green,
        &["green", "verde", "vert", "verte", "grün", "gruen"],
    ),
    (
        Color::Blue,
        &["blue", "azul", "bleu", "bleue", "blau", "blu", "azzurro"],
    ),
    (
        Color::Purple,
        &["purple", "violet", "morado", "morada", "púrpura", "violeta", "violette", "lila", "violett", "viola", "roxo", "roxa"],
    ),
    (Color::Pink, &["pink", "rosa", "rosado", "rosada"]),
    (
        Color::Brown,
        &["brown", "marrón", "marron", "brun", "braun", "marrone", "marrom", "castanho"],
    ),
    (
        Color::Black,
        &["black", "negro", "negra", "noir", "noire", "schwarz", "nero", "nera", "preto", "preta"],
    ),
    (
        Color::White,
        &["white", "blanco", "blanca", "blanc", "blanche", "weiß", "weiss", "bianco", "bianca", "branco", "branca"],
    ),
    (
        Color::Gray,
        &["gray", "grey", "gris", "grau", "grigio", "grigia", "cinza"],
    ),
];

impl Color {
    /// The whole palette in display order.
    pub const ALL: [Color; 11] = [
        Color::Red,
        Color::Orange,
        Color::Yellow,
        Color::Green,
        Color::Blue,
        Color::Purple,
        Color::Pink,
        Color::Brown,
        Color::Black,
        Color::White,
        Color::Gray,
    ];

    /// Canonical English name, used as the game's target value.
    pub fn name(&self) -> &'static str {
        match self {
            Color::Red => "red",
            Color::Orange => "orange",
            Color::Yellow => "yellow",
            Color::Green => "green",
            Color::Blue => "blue",
            Color::Purple => "purple",
            Color::Pink => "pink",
            Color::Brown => "brown",
            Color::Black => "black",
            Color::White => "white",
            Color::Gray => "gray",
        }
    }

    /// Resolve a word in any supported language. Case and surrounding
    /// whitespace are ignored.
    pub fn from_word(word: &str) -> Option<Color> {
        let word = word.trim().to_lowercase();
        ALIASES
            .iter()
            .find(|(_, words)| words.contains(&word.as_str()))
            .map(|(color, _)| *color)
    }

    /// Whether two colors share a hand-authored similarity group.
    /// A color is always similar to itself.
    pub fn is_similar(&self, other: Color) -> bool {
        *self == other
            || SIMILARITY_GROUPS
                .iter()
                .any(|group| group.contains(self) && group.contains(&other))
    }

    /// Colors that may be shown next to this one.
    ///
    /// When the similarity groups leave fewer than two colors, every other
    /// color is allowed instead.
    pub fn distractor_pool(&self) -> Vec<Color> {
        let distinct: Vec<Color> = Color::ALL
            .iter()
            .copied()
            .filter(|c| !self.is_similar(*c))
            .collect();

        if distinct.len() >= 2 {
            distinct
        } else {
            Color::ALL.iter().copied().filter(|c| c != self).collect()
        }
    }
}

impl std::fmt::Display for Color {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

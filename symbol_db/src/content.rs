//! The round description handed to the UI layer.

use serde::{Deserialize, Serialize};

use crate::error::{DatabaseError, Result};

/// What kind of visual a round shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ContentType {
    #[serde(rename = "color")]
    Color,
    /// Serialized as `"emoji"` on the wire.
    #[serde(rename = "emoji")]
    Symbol,
}

/// One round: the correct answer and two wrong ones.
///
/// Wire shape: `{"type": "color"|"emoji", "targetValue": "...", "distractors": ["...", "..."]}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameContent {
    #[serde(rename = "type")]
    pub content_type: ContentType,
    pub target_value: String,
    pub distractors: [String; 2],
}

impl GameContent {
    /// Create a color round.
    pub fn color(target: impl Into<String>, distractors: [String; 2]) -> Self {
        Self {
            content_type: ContentType::Color,
            target_value: target.into(),
            distractors,
        }
    }

    /// Create a symbol round.
    pub fn symbol(target: impl Into<String>, distractors: [String; 2]) -> Self {
        Self {
            content_type: ContentType::Symbol,
            target_value: target.into(),
            distractors,
        }
    }

    /// Check the shape invariants: no empty values, two different
    /// distractors, and neither distractor equal to the target.
    pub fn validate(&self) -> Result<()> {
        let [first, second] = &self.distractors;

        if self.target_value.trim().is_empty() {
            return Err(DatabaseError::InvalidContent("empty target".to_string()));
        }
        if first.trim().is_empty() || second.trim().is_empty() {
            return Err(DatabaseError::InvalidContent("empty distractor".to_string()));
        }
        if first == second {
            return Err(DatabaseError::InvalidContent(format!(
                "duplicate distractor {}",
                first
            )));
        }
        if first == &self.target_value || second == &self.target_value {
            return Err(DatabaseError::InvalidContent(format!(
                "distractor repeats target {}",
                self.target_value
            )));
        }
        Ok(())
    }
}

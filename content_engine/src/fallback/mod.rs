//! Generative fallback for words the local data cannot answer.
//!
//! The request carries a fixed instruction text and a JSON schema mirroring the
//! `GameContent` wire shape. Anything short of a valid round (a transport error,
//! a timeout, a reply outside the schema, or a round with repeated options) is a
//! miss: it is logged and reported as `None`.

mod service;

pub use service::*;

use serde_json::{json, Value};
use std::sync::Arc;
use std::time::Duration;
use symbol_db::GameContent;
use tracing::{debug, warn};

use crate::error::{FallbackError, Result};

pub const INSTRUCTIONS: &str = "\
You create rounds for a picture matching game played by young children. \
The user message is a single word, in any language.

Classification:
- If the word names a color, answer with type \"color\". targetValue is the \
English name of that color and both distractors are English names of other basic colors.
- Otherwise answer with type \"emoji\". targetValue is the single emoji that best \
depicts the word and both distractors are single emojis.

Accept words in any language and answer with the same values you would give for \
the English word.

All three values must be visually distinct: a child must be able to tell them apart \
at a glance. Never use two values of the same kind of thing (two flowers, two dog \
breeds, two clock faces), never repeat a value, and never use a variant of the target.";

/// JSON schema of a generated round.
pub fn response_schema() -> Value {
    json!({
        "type": "object",
        "properties": {
            "type": { "type": "string", "enum": ["color", "emoji"] },
            "targetValue": { "type": "string" },
            "distractors": {
                "type": "array",
                "items": { "type": "string" },
                "minItems": 2,
                "maxItems": 2
            }
        },
        "required": ["type", "targetValue", "distractors"],
        "additionalProperties": false
    })
}

impl GenerationRequest {
    /// A request for `word` with the fixed instructions and schema.
    pub fn for_word(word: &str) -> Self {
        Self {
            word: word.trim().to_string(),
            instructions: INSTRUCTIONS.to_string(),
            schema: response_schema(),
        }
    }
}

/// Wraps a generative service with a deadline and output validation.
#[derive(Clone)]
pub struct GenerativeFallback {
    service: Arc<dyn GenerativeService>,
    timeout: Duration,
}

impl GenerativeFallback {
    pub fn new(service: Arc<dyn GenerativeService>, timeout: Duration) -> Self {
        Self { service, timeout }
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Ask the service for a round, bounded by the timeout.
    pub async fn try_generate(&self, word: &str) -> Result<GameContent> {
        let request = GenerationRequest::for_word(word);
        let content = tokio::time::timeout(self.timeout, self.service.generate(&request))
            .await
            .map_err(|_| FallbackError::Timeout(self.timeout))??;

        content
            .validate()
            .map_err(|e| FallbackError::InvalidResponse(e.to_string()))?;
        Ok(content)
    }

    /// Like `try_generate`, with every failure logged and turned into `None`.
    pub async fn generate(&self, word: &str) -> Option<GameContent> {
        match self.try_generate(word).await {
            Ok(content) => {
                debug!(service = self.service.name(), "Generated round");
                Some(content)
            }
            Err(err) => {
                warn!(service = self.service.name(), error = %err, "Generative fallback failed");
                None
            }
        }
    }
}

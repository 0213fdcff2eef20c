//! Errors raised while talking to the generative service or setting up the engine.
//!
//! None of these reach the player: the service logs them and reports "no game".

use std::time::Duration;
use symbol_db::DatabaseError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum FallbackError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("generative service timed out after {0:?}")]
    Timeout(Duration),

    #[error("API error ({status}): {message}")]
    Api { status: u16, message: String },

    #[error("invalid response: {0}")]
    InvalidResponse(String),

    #[error("malformed content: {0}")]
    Json(#[from] serde_json::Error),

    #[error("configuration error: {0}")]
    Config(String),

    #[error(transparent)]
    Database(#[from] DatabaseError),
}

impl From<toml::de::Error> for FallbackError {
    fn from(err: toml::de::Error) -> Self {
        FallbackError::Config(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, FallbackError>;

//! Build-fatal errors. Every variant aborts the build.

use std::path::PathBuf;

use symbol_db::DatabaseError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum BuildError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to fetch {url}: {reason}")]
    Fetch { url: String, reason: String },

    #[error("Source {url} is not cached and network access is disabled")]
    OfflineCacheMiss { url: String },

    #[error("Invalid JSON in {source_name}: {error}")]
    Json {
        source_name: String,
        error: serde_json::Error,
    },

    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("Parse error at {source_name}:{line}: {message}")]
    Parse {
        source_name: String,
        line: usize,
        message: String,
    },

    #[error("No category mapping for group '{group}' / subgroup '{subgroup}'")]
    UnmappedCategory { group: String, subgroup: String },

    #[error("Failed to read resource {path}: {message}")]
    Resource { path: PathBuf, message: String },

    #[error("Database error: {0}")]
    Database(#[from] DatabaseError),
}

impl From<toml::de::Error> for BuildError {
    fn from(e: toml::de::Error) -> Self {
        BuildError::Config(e.to_string())
    }
}

pub type Result<T> = std::result::Result<T, BuildError>;

//! Error types for the symbol database.

use thiserror::Error;

/// Errors raised while assembling, saving, loading or validating database data.
#[derive(Debug, Error)]
pub enum DatabaseError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Encoding error: {0}")]
    Encode(#[from] bincode::Error),

    #[error("Unrecognized database artifact: {0}")]
    Format(String),

    #[error("Symbol {symbol} has no names")]
    EmptyNames { symbol: String },

    #[error("Symbol {symbol} appears in both {first} and {second}")]
    DuplicateSymbol {
        symbol: String,
        first: String,
        second: String,
    },

    #[error("Invalid game content: {0}")]
    InvalidContent(String),
}

pub type Result<T> = std::result::Result<T, DatabaseError>;

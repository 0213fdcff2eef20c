//! # Symbol DB
//!
//! The compiled lookup data behind the word matching game. This crate holds the
//! read-only side of the system: everything the runtime needs to turn a word
//! into a target visual and decide whether two visuals are too alike to share
//! a round. It contains no build logic and no network code.
//!
//! ## Core Components
//!
//! - **entry**: Symbol entries, categories and symbol-key normalization
//! - **database**: The compiled `Database` with its derived lookup tables
//! - **similarity**: The similarity oracle used for distractor filtering
//! - **colors**: The fixed color palette, its translations and similarity groups
//! - **content**: The `GameContent` wire shape shared with the UI layer

pub mod colors;
pub mod content;
pub mod database;
pub mod entry;
pub mod error;
pub mod similarity;

pub use colors::*;
pub use content::*;
pub use database::*;
pub use entry::*;
pub use error::*;

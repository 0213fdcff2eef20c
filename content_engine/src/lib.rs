//! # Content Engine
//!
//! Turns a spoken or typed word into one round of the matching game: a target
//! visual and two distractors that are clearly different from it.
//!
//! ## Core Components
//!
//! - **local**: Color dictionary and symbol-name lookup against the compiled database
//! - **fallback**: Schema-constrained generative service, used when the word is unknown locally
//! - **corrector**: Repairs generated rounds whose options are too similar
//! - **service**: Ties the three together behind one `generate` call
//!
//! ## Design Philosophy
//!
//! - **Read-Only Data**: The `Database` is loaded once and shared; requests never mutate it
//! - **Never Fail the Round**: A miss, a failed service call or an unrepairable round
//!   degrades to "no game" or a best-effort round, never to an error for the player
//! - **Independent Requests**: Each fallback call has its own timeout and cancels on its own

pub mod config;
pub mod corrector;
pub mod error;
pub mod fallback;
pub mod local;
pub mod service;

#[cfg(test)]
mod fixtures;

pub use config::*;
pub use corrector::*;
pub use error::*;
pub use fallback::*;
pub use local::*;
pub use service::*;

//! # Symbol Builder
//!
//! The offline pipeline that produces the compiled symbol database. It is a
//! single-threaded batch job: fetch (or read from cache) the Unicode emoji test
//! list and the CLDR annotation documents, normalize them into symbol entries,
//! promote keywords to searchable names, and compile the lookup tables.
//!
//! ## Pipeline
//!
//! 1. **source**: Cached fetching plus the emoji-test and annotation parsers
//! 2. **normalizer**: Qualification filter, skin-tone folding, category mapping
//! 3. **promotion**: First promotion pass (frequency, inflection, semantic score)
//! 4. **synonyms**: Second promotion pass driven by a thesaurus
//! 5. **compiler**: Similarity keywords, validation and `Database` assembly
//!
//! Any failure aborts the whole build; nothing is written until the database
//! has been compiled and validated.

pub mod categories;
pub mod compiler;
pub mod config;
pub mod error;
pub mod normalizer;
pub mod promotion;
pub mod semantic;
pub mod source;
pub mod synonyms;
pub mod thesaurus;

pub use compiler::*;
pub use config::*;
pub use error::*;
pub use normalizer::*;
pub use promotion::*;
pub use semantic::*;
pub use synonyms::*;
pub use thesaurus::*;

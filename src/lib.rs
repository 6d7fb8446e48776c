//! `iskalnik` ("searcher") indexes a corpus of Slavic-alphabet plain-text
//! documents and answers free-text queries with fuzzy, ranked matches.
//!
//! The pipeline has two halves: [`indexer`] walks a directory of documents
//! into a [`bktree::BKTree`], a postings map and a TF-IDF matrix; [`query`]
//! turns a free-text query into a ranked [`query::Hit`] list over those
//! artifacts. [`persist`] round-trips both to and from disk. See
//! `SPEC_FULL.md` for the full contract.

pub mod bktree;
pub mod config;
pub mod distance;
pub mod error;
pub mod feature_map;
pub mod indexer;
pub mod persist;
pub mod postings;
pub mod query;
pub mod spellcheck;
pub mod stopwords;

pub use bktree::BKTree;
pub use config::{IndexerConfig, QueryConfig};
pub use error::{Error, Result};
pub use feature_map::FeatureMap;
pub use indexer::{index_directory, IndexArtifacts};
pub use persist::{load, save, LoadedIndex};
pub use query::{Hit, QueryEngine};
pub use spellcheck::{BkTreeBackend, FuzzyBackend};

/// A document's position in the corpus: the 0-based index into the
/// dynamically-grown document array, derived from the 1-based number
/// embedded in each source filename (`spec.md` §3, §6).
pub type DocumentId = u32;

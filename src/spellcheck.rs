//! The pluggable fuzzy-lookup capability shared by the BK-tree backend and
//! the alternate SymSpell backend used for very large queries
//! (`spec.md` §4.6).

use crate::bktree::BKTree;

/// `lookup(word) -> sequence of (distance, term)`, implemented by whichever
/// fuzzy-matching structure is behind it. The query engine only ever calls
/// through this trait, so it's oblivious to the backend's internal data
/// structure, exactly as `spec.md` §4.6 requires.
pub trait FuzzyBackend {
    fn lookup(&self, word: &str, max_edit_distance: u32) -> Vec<(u32, String)>;
}

/// The default backend: wraps a [`BKTree`] with a fixed tolerance and
/// candidate cap, used for queries with `L <= 86` unique tokens
/// (`spec.md` §4.4 step 3).
pub struct BkTreeBackend<'a> {
    tree: &'a BKTree,
    max_candidates: Option<usize>,
}

impl<'a> BkTreeBackend<'a> {
    pub fn new(tree: &'a BKTree, max_candidates: Option<usize>) -> Self {
        BkTreeBackend { tree, max_candidates }
    }
}

impl FuzzyBackend for BkTreeBackend<'_> {
    fn lookup(&self, word: &str, max_edit_distance: u32) -> Vec<(u32, String)> {
        self.tree.find(word, max_edit_distance, self.max_candidates)
    }
}

/// `Verbosity` mirrors SymSpell's own enum: this crate only ever needs
/// "closest", per `spec.md` §4.6, but the type is kept so the backend can be
/// swapped for a fuller SymSpell integration without changing the trait.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verbosity {
    Closest,
    All,
}

#[cfg(feature = "symspell-backend")]
pub use symspell_impl::SymSpellBackend;

#[cfg(feature = "symspell-backend")]
mod symspell_impl {
    use super::{FuzzyBackend, Verbosity};
    use std::path::Path;
    use symspell::{AsciiStringStrategy, SymSpell as RawSymSpell, SymSpellBuilder};

    /// A thin wrapper over the `symspell` crate's dictionary lookup — the
    /// closest published Rust port of the `symspellpy` dependency the
    /// Python prototype imports directly. Off by default (see the
    /// `symspell-backend` Cargo feature), the way `milli` gates optional,
    /// heavier tokenizer support behind its own Cargo features.
    pub struct SymSpellBackend {
        inner: RawSymSpell<AsciiStringStrategy>,
        verbosity: Verbosity,
    }

    impl SymSpellBackend {
        /// Loads a `<word> <count>` dictionary as produced by
        /// `crate::postings::write_word_counts_txt`.
        pub fn load(word_counts_file: &Path, verbosity: Verbosity) -> crate::error::Result<Self> {
            let mut inner: RawSymSpell<AsciiStringStrategy> = SymSpellBuilder::default()
                .max_dictionary_edit_distance(2)
                .prefix_length(5)
                .build()
                .expect("fixed builder parameters are always valid");
            inner.load_dictionary(
                word_counts_file.to_string_lossy().as_ref(),
                0,
                1,
                " ",
            );
            Ok(SymSpellBackend { inner, verbosity })
        }
    }

    impl FuzzyBackend for SymSpellBackend {
        fn lookup(&self, word: &str, max_edit_distance: u32) -> Vec<(u32, String)> {
            let verbosity = match self.verbosity {
                Verbosity::Closest => symspell::Verbosity::Closest,
                Verbosity::All => symspell::Verbosity::All,
            };
            self.inner
                .lookup(word, verbosity, max_edit_distance as i64)
                .into_iter()
                .map(|s| (s.distance as u32, s.term))
                .collect()
        }
    }
}

//! Builder-style configuration, the way `milli` configures indexing and
//! search through structs (`Settings`, `Search`) instead of loose function
//! arguments or an external config file.

use std::path::PathBuf;

/// Tunables for [`crate::indexer::Indexer`].
#[derive(Debug, Clone)]
pub struct IndexerConfig {
    /// Optional path to a comma-separated stop-words file. `None` means "no
    /// stop words", matching `spec.md` §6's "empty or missing is allowed".
    pub stop_words_path: Option<PathBuf>,
}

impl Default for IndexerConfig {
    fn default() -> Self {
        IndexerConfig { stop_words_path: None }
    }
}

/// Tunables for [`crate::query::QueryEngine`].
#[derive(Debug, Clone)]
pub struct QueryConfig {
    /// Maximum BK-tree distance a candidate may have to be returned
    /// (`spec.md` §4.4: `τ = 20`).
    pub tolerance: u32,
    /// Query token count above which the external spellcheck backend is used
    /// instead of the BK-tree (`spec.md` §4.4 step 3).
    pub backend_switchover: usize,
    /// Cap on BK-tree matches returned per token; `None` means unlimited
    /// (`spec.md`'s `k = -1`).
    pub max_candidates: Option<usize>,
    /// Maximum edit distance passed to the alternate spellcheck backend
    /// (`spec.md` §4.6: "`max_edit_distance` default is 2"). Distinct from
    /// `tolerance`, which is on the BK-tree's 0-100 ratio scale and only
    /// ever applies to the BK-tree backend.
    pub symspell_max_edit_distance: u32,
    /// Run the per-token fuzzy lookups sequentially instead of on the
    /// `rayon` pool. Exists purely for deterministic tests (`spec.md` §9).
    pub sequential: bool,
}

impl Default for QueryConfig {
    fn default() -> Self {
        QueryConfig {
            tolerance: 20,
            backend_switchover: 86,
            max_candidates: None,
            symspell_max_edit_distance: 2,
            sequential: false,
        }
    }
}

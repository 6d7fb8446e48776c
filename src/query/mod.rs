//! The query engine: turns free text into a ranked document list
//! (`spec.md` §4.4).

pub mod policy;

use std::cmp::Ordering;
use std::collections::{BinaryHeap, HashMap, HashSet};

use rayon::prelude::*;

use crate::bktree::BKTree;
use crate::config::QueryConfig;
use crate::feature_map::FeatureMap;
use crate::indexer::tfidf::TfIdfMatrix;
use crate::indexer::tokenize;
use crate::postings::WordDocuments;
use crate::query::policy::ScorePolicy;
use crate::spellcheck::FuzzyBackend;
use crate::DocumentId;

/// A single scored hit, ready to be handed back to a caller.
#[derive(Debug, Clone, PartialEq)]
pub struct Hit {
    pub doc_id: DocumentId,
    pub score: f64,
}

/// Ordered by `(score, doc_id)`, both descending, so a max-heap pop-order
/// and a plain `sort` agree on tie-breaking (`spec.md` §9: unspecified in
/// the source, resolved to a deterministic total order).
#[derive(Debug, Clone, Copy, PartialEq)]
struct Ranked {
    score_bits: u64,
    doc_id: DocumentId,
}

impl Ranked {
    fn new(score: f64, doc_id: DocumentId) -> Self {
        // Scores are never NaN (every policy produces sums of finite
        // values), so total_cmp's bit ordering over f64 is safe to reduce
        // to plain integer comparison here.
        Ranked { score_bits: score.to_bits(), doc_id }
    }

    fn score(&self) -> f64 {
        f64::from_bits(self.score_bits)
    }
}

impl Eq for Ranked {}

impl Ord for Ranked {
    fn cmp(&self, other: &Self) -> Ordering {
        self.score()
            .partial_cmp(&other.score())
            .unwrap_or(Ordering::Equal)
            .then_with(|| self.doc_id.cmp(&other.doc_id))
    }
}

impl PartialOrd for Ranked {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Holds borrowed references to a loaded index and drives the fuzzy-match,
/// scoring and ranking pipeline over it.
pub struct QueryEngine<'a> {
    bktree: &'a BKTree,
    word_documents: &'a WordDocuments,
    tfidf: &'a TfIdfMatrix,
    feature_map: &'a FeatureMap,
    stop_words: &'a HashSet<String>,
    config: QueryConfig,
    alternate_backend: Option<Box<dyn FuzzyBackend + Send + Sync + 'a>>,
}

impl<'a> QueryEngine<'a> {
    pub fn new(
        bktree: &'a BKTree,
        word_documents: &'a WordDocuments,
        tfidf: &'a TfIdfMatrix,
        feature_map: &'a FeatureMap,
        stop_words: &'a HashSet<String>,
        config: QueryConfig,
    ) -> Self {
        QueryEngine {
            bktree,
            word_documents,
            tfidf,
            feature_map,
            stop_words,
            config,
            alternate_backend: None,
        }
    }

    /// Registers the backend `search` itself switches to once a query's
    /// unique token count passes `backend_switchover` (`spec.md` §4.4 step
    /// 3). Without one registered, over-threshold queries stay on the
    /// BK-tree and a warning is logged, matching `spec.md`'s guidance that
    /// the switchover is a routing preference, not a hard requirement for a
    /// second backend to exist.
    pub fn with_alternate_backend(
        mut self,
        backend: Box<dyn FuzzyBackend + Send + Sync + 'a>,
    ) -> Self {
        self.alternate_backend = Some(backend);
        self
    }

    /// Normalizes, strips stop words and deduplicates `raw_query` into the
    /// unique token list every search variant fuzzy-matches against
    /// (`spec.md` §4.4 steps 1-2).
    fn tokenize(&self, raw_query: &str) -> Vec<String> {
        let mut seen = HashSet::new();
        tokenize::normalize(raw_query)
            .into_iter()
            .filter(|t| !self.stop_words.contains(t))
            .filter(|t| seen.insert(t.clone()))
            .collect()
    }

    /// Fuzzy-matches every token through `backend` (in parallel unless
    /// [`QueryConfig::sequential`] is set), scores with `policy`, and
    /// returns the top `limit` hits ordered by descending `(score, doc_id)`.
    fn run(
        &self,
        tokens: &[String],
        backend: &dyn FuzzyBackend,
        max_edit_distance: u32,
        policy: &dyn ScorePolicy,
        limit: usize,
    ) -> Vec<Hit> {
        let per_token_candidates: Vec<Vec<(u32, String)>> = if self.config.sequential {
            tokens.iter().map(|t| backend.lookup(t, max_edit_distance)).collect()
        } else {
            tokens.par_iter().map(|t| backend.lookup(t, max_edit_distance)).collect()
        };

        let scores = self.aggregate(tokens, &per_token_candidates, policy);
        rank(scores, limit)
    }

    /// Runs `raw_query` through the full pipeline (`spec.md` §4.4 steps
    /// 1-7): normalize, filter stop words, dedupe, then route every token to
    /// whichever backend `should_use_alternate_backend` selects for this
    /// query's unique token count, score with `policy`, and return the top
    /// `limit` hits ordered by descending `(score, doc_id)`.
    pub fn search(&self, raw_query: &str, policy: &dyn ScorePolicy, limit: usize) -> Vec<Hit> {
        let tokens = self.tokenize(raw_query);
        if tokens.is_empty() {
            return Vec::new();
        }

        if self.should_use_alternate_backend(tokens.len()) {
            if let Some(backend) = &self.alternate_backend {
                log::info!(
                    "query has {} unique tokens (> {}), routing to the alternate backend",
                    tokens.len(),
                    self.config.backend_switchover
                );
                return self.run(
                    &tokens,
                    backend.as_ref(),
                    self.config.symspell_max_edit_distance,
                    policy,
                    limit,
                );
            }
            log::warn!(
                "query has {} unique tokens (> {}) but no alternate backend is registered; \
                 falling back to the BK-tree",
                tokens.len(),
                self.config.backend_switchover
            );
        }

        let backend = crate::spellcheck::BkTreeBackend::new(self.bktree, self.config.max_candidates);
        self.run(&tokens, &backend, self.config.tolerance, policy, limit)
    }

    /// Folds every token's fuzzy candidates into a `document -> score` map,
    /// exactly as `spec.md` §4.4 step 5 describes: `L` is the deduplicated
    /// token count, `M` is one token's candidate count, and `prev_docs` is
    /// reset for each token so the penalty policies only damp repeats within
    /// a single token's candidate set.
    fn aggregate(
        &self,
        tokens: &[String],
        per_token_candidates: &[Vec<(u32, String)>],
        policy: &dyn ScorePolicy,
    ) -> HashMap<DocumentId, f64> {
        let l = tokens.len() as f64;
        let mut scores: HashMap<DocumentId, f64> = HashMap::new();

        for candidates in per_token_candidates {
            let m = candidates.len() as f64;
            let normalizer = l * m;
            let mut prev_docs: HashMap<DocumentId, u32> = HashMap::new();

            for (distance, matched_word) in candidates {
                let Some(doc_ids) = self.word_documents.get(matched_word) else { continue };
                let match_score = 1.0 / (*distance as f64 + 1.0);
                let feature = self.feature_map.index_of(matched_word);
                for &doc_id in doc_ids {
                    policy.accumulate(&mut scores, &mut prev_docs, doc_id, match_score, normalizer, self.tfidf, feature);
                }
            }
        }

        scores
    }

    /// Like [`Self::search`], but fuzzy-matches every token through a
    /// caller-supplied backend instead of whichever one `search` would pick
    /// itself — the seam `spec.md` §4.6 calls for, so a one-off backend can
    /// be driven through the identical scoring and ranking path without
    /// registering it via [`Self::with_alternate_backend`]. Uses
    /// `symspell_max_edit_distance`, not `tolerance`: `backend` here is
    /// assumed to be an alternate (non-BK-tree) backend, keyed on edit
    /// distance rather than the BK-tree's 0-100 ratio scale.
    pub fn search_with_backend(
        &self,
        raw_query: &str,
        backend: &dyn FuzzyBackend,
        policy: &dyn ScorePolicy,
        limit: usize,
    ) -> Vec<Hit> {
        let tokens = self.tokenize(raw_query);
        if tokens.is_empty() {
            return Vec::new();
        }

        self.run(&tokens, backend, self.config.symspell_max_edit_distance, policy, limit)
    }

    /// Whether `unique_token_count` routes this query to the SymSpell
    /// backend instead of the BK-tree, per `spec.md` §4.4 step 3's
    /// `L > backend_switchover` rule.
    pub fn should_use_alternate_backend(&self, unique_token_count: usize) -> bool {
        unique_token_count > self.config.backend_switchover
    }
}

/// Selects the top `limit` entries of `scores`, ordered by descending
/// `(score, doc_id)` (`spec.md` §4.4 step 6 / §9's tie-break resolution),
/// via a max-heap rather than a full sort of the score map.
fn rank(scores: HashMap<DocumentId, f64>, limit: usize) -> Vec<Hit> {
    let mut heap: BinaryHeap<Ranked> =
        scores.into_iter().map(|(doc_id, score)| Ranked::new(score, doc_id)).collect();

    let mut hits = Vec::with_capacity(limit.min(heap.len()));
    while hits.len() < limit {
        match heap.pop() {
            Some(ranked) => hits.push(Hit { doc_id: ranked.doc_id, score: ranked.score() }),
            None => break,
        }
    }
    hits
}

//! Pluggable scoring policies (`spec.md` §4.4 "Scoring policies"), modeled
//! after `milli`'s own `Criterion` trait: a small capability the query
//! engine drives without caring which policy is plugged in.

use std::collections::HashMap;

use crate::indexer::tfidf::TfIdfMatrix;
use crate::DocumentId;

/// Scores candidate documents for a query, accumulating into a running
/// `document -> score` map. Implementations never see the whole query at
/// once — `accumulate` is called once per `(distance, matched_word)`
/// candidate, once per document that word occurs in, mirroring how
/// `milli::search::criteria::Criterion::next` is driven one step at a time
/// by its caller instead of being handed the full candidate set.
///
/// Call-site contract, per `spec.md` §4.4 step 5: `prev_docs` is a fresh map
/// for each query token (reset by the caller before the token's first
/// candidate), `normalizer` is `L * M` (unique query tokens times this
/// token's candidate count) and is constant across all calls for one token,
/// and `match_score` is `1 / (distance + 1)`.
pub trait ScorePolicy {
    #[allow(clippy::too_many_arguments)]
    fn accumulate(
        &self,
        scores: &mut HashMap<DocumentId, f64>,
        prev_docs: &mut HashMap<DocumentId, u32>,
        doc_id: DocumentId,
        match_score: f64,
        normalizer: f64,
        tfidf: &TfIdfMatrix,
        feature: Option<u32>,
    );
}

/// `scores[doc] += match_score / (L*M)` (`spec.md` §4.4, plain `ratio`).
pub struct Ratio;

impl ScorePolicy for Ratio {
    fn accumulate(
        &self,
        scores: &mut HashMap<DocumentId, f64>,
        _prev_docs: &mut HashMap<DocumentId, u32>,
        doc_id: DocumentId,
        match_score: f64,
        normalizer: f64,
        _tfidf: &TfIdfMatrix,
        _feature: Option<u32>,
    ) {
        *scores.entry(doc_id).or_insert(0.0) += match_score / normalizer;
    }
}

/// `prev_docs[doc] += 1; scores[doc] += match_score / (L*M*prev_docs[doc])`
/// (`spec.md` §4.4, `ratio_with_penalty`, the default policy): a document
/// matched repeatedly by one token's fuzzy candidates gets a diminishing
/// contribution from each further match.
pub struct RatioWithPenalty;

impl ScorePolicy for RatioWithPenalty {
    fn accumulate(
        &self,
        scores: &mut HashMap<DocumentId, f64>,
        prev_docs: &mut HashMap<DocumentId, u32>,
        doc_id: DocumentId,
        match_score: f64,
        normalizer: f64,
        _tfidf: &TfIdfMatrix,
        _feature: Option<u32>,
    ) {
        let count = prev_docs.entry(doc_id).or_insert(0);
        *count += 1;
        *scores.entry(doc_id).or_insert(0.0) += match_score / (normalizer * (*count as f64));
    }
}

/// `scores[doc] += match_score * tfidf[doc][feature] / (L*M)` (`spec.md`
/// §4.4, `tfidf`). A matched word absent from the feature map (never built
/// into the TF-IDF vocabulary) contributes a weight of 0 rather than being
/// treated as a lookup miss — the postings lookup already filtered those out.
pub struct TfIdf;

impl ScorePolicy for TfIdf {
    fn accumulate(
        &self,
        scores: &mut HashMap<DocumentId, f64>,
        _prev_docs: &mut HashMap<DocumentId, u32>,
        doc_id: DocumentId,
        match_score: f64,
        normalizer: f64,
        tfidf: &TfIdfMatrix,
        feature: Option<u32>,
    ) {
        let weight = feature.map(|f| tfidf.weight(doc_id, f) as f64).unwrap_or(0.0);
        *scores.entry(doc_id).or_insert(0.0) += match_score * weight / normalizer;
    }
}

/// `tfidf`, also divided by the running per-document penalty counter
/// (`spec.md` §4.4, `tfidf_with_penalty`).
pub struct TfIdfWithPenalty;

impl ScorePolicy for TfIdfWithPenalty {
    fn accumulate(
        &self,
        scores: &mut HashMap<DocumentId, f64>,
        prev_docs: &mut HashMap<DocumentId, u32>,
        doc_id: DocumentId,
        match_score: f64,
        normalizer: f64,
        tfidf: &TfIdfMatrix,
        feature: Option<u32>,
    ) {
        let count = prev_docs.entry(doc_id).or_insert(0);
        *count += 1;
        let weight = feature.map(|f| tfidf.weight(doc_id, f) as f64).unwrap_or(0.0);
        *scores.entry(doc_id).or_insert(0.0) += match_score * weight / (normalizer * (*count as f64));
    }
}

/// Selects a policy by name, as accepted by the query-facing configuration
/// surface (`spec.md` §4.4's four named policies).
pub fn by_name(name: &str) -> Option<Box<dyn ScorePolicy + Send + Sync>> {
    match name {
        "ratio" => Some(Box::new(Ratio)),
        "ratio_with_penalty" => Some(Box::new(RatioWithPenalty)),
        "tfidf" => Some(Box::new(TfIdf)),
        "tfidf_with_penalty" => Some(Box::new(TfIdfWithPenalty)),
        _ => None,
    }
}

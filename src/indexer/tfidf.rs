//! Dense-per-document, sparse-per-term TF-IDF over the indexed corpus
//! (`spec.md` §4.3 "TF-IDF definition").
//!
//! Smoothed IDF with L2 row normalization — the same formula
//! `sklearn.feature_extraction.text.TfidfVectorizer` uses by default, which
//! is what the prototype this crate is derived from calls directly.

use fxhash::FxHashMap;

use crate::FeatureMap;

/// Row-sparse TF-IDF: one map per document, column index → weight. Absent
/// terms are implicitly 0, satisfying `spec.md` §3's `TFIDFMatrix` invariant
/// without paying for a dense `documents x vocabulary` array.
#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
pub struct TfIdfMatrix {
    pub(crate) rows: Vec<FxHashMap<u32, f32>>,
}

impl TfIdfMatrix {
    /// The TF-IDF weight of `feature` in `doc_id`, or `0.0` if absent.
    pub fn weight(&self, doc_id: u32, feature: u32) -> f32 {
        self.rows.get(doc_id as usize).and_then(|row| row.get(&feature)).copied().unwrap_or(0.0)
    }
}

/// Computes a [`TfIdfMatrix`] and the [`FeatureMap`] it's indexed against,
/// over `documents` (already stop-word-filtered, whitespace-joined token
/// streams; one entry per doc id, `None` for docs that don't exist).
pub fn compute(documents: &[Option<String>]) -> (TfIdfMatrix, FeatureMap) {
    let mut feature_map = FeatureMap::new();
    let mut doc_freq: FxHashMap<u32, u32> = FxHashMap::default();
    let mut doc_term_counts: Vec<FxHashMap<u32, u32>> = Vec::with_capacity(documents.len());

    let n_docs = documents.iter().filter(|d| matches!(d, Some(s) if !s.is_empty())).count();

    for doc in documents {
        let mut counts: FxHashMap<u32, u32> = FxHashMap::default();
        if let Some(text) = doc {
            if !text.is_empty() {
                for word in text.split_whitespace() {
                    let feature = feature_map.get_or_insert(word);
                    *counts.entry(feature).or_insert(0) += 1;
                }
                for &feature in counts.keys() {
                    *doc_freq.entry(feature).or_insert(0) += 1;
                }
            }
        }
        doc_term_counts.push(counts);
    }

    let rows = doc_term_counts
        .into_iter()
        .map(|counts| {
            let total: u32 = counts.values().sum();
            if total == 0 {
                return FxHashMap::default();
            }
            let mut row: FxHashMap<u32, f32> = counts
                .into_iter()
                .map(|(feature, count)| {
                    let tf = count as f32 / total as f32;
                    let df = *doc_freq.get(&feature).unwrap_or(&0) as f32;
                    let idf = ((1.0 + n_docs as f32) / (1.0 + df)).ln() + 1.0;
                    (feature, tf * idf)
                })
                .collect();

            let norm = row.values().map(|w| w * w).sum::<f32>().sqrt();
            if norm > 0.0 {
                for w in row.values_mut() {
                    *w /= norm;
                }
            }
            row
        })
        .collect();

    (TfIdfMatrix { rows }, feature_map)
}

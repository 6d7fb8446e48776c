//! Turns a directory of plain-text documents into the index artifacts the
//! query engine reads: a BK-tree, a postings map, a corpus frequency table,
//! and a TF-IDF matrix (`spec.md` §4.3).

pub mod tfidf;
pub mod tokenize;

use std::collections::{HashMap, HashSet};
use std::path::Path;

use walkdir::WalkDir;

use crate::bktree::BKTree;
use crate::config::IndexerConfig;
use crate::error::{Error, Result};
use crate::feature_map::FeatureMap;
use crate::indexer::tfidf::TfIdfMatrix;
use crate::postings::{WordCounts, WordDocuments};
use crate::DocumentId;

/// Every artifact the indexer produces, ready to hand to
/// [`crate::persist::save`] or to [`crate::query::QueryEngine::new`]
/// directly.
pub struct IndexArtifacts {
    pub bktree: BKTree,
    pub word_documents: WordDocuments,
    pub word_counts: WordCounts,
    pub tfidf: TfIdfMatrix,
    pub feature_map: FeatureMap,
}

/// Builds [`IndexArtifacts`] from every `*.txt` file under `corpus_dir`.
///
/// Per-file failures (an unparseable filename) are logged and skipped; the
/// walk itself continues, per `spec.md` §7's "Indexer: skip file with a
/// warning; do not abort the run."
pub fn index_directory(corpus_dir: &Path, config: &IndexerConfig) -> Result<IndexArtifacts> {
    let stop_words = crate::stopwords::load(config.stop_words_path.as_deref())?;

    let mut bktree = BKTree::new();
    let mut word_documents: WordDocuments = WordDocuments::new();
    let mut word_counts: WordCounts = WordCounts::new();
    let mut documents: Vec<Option<String>> = Vec::new();

    for entry in WalkDir::new(corpus_dir).into_iter().filter_map(|e| e.ok()) {
        let path = entry.path();
        if !entry.file_type().is_file() || path.extension().and_then(|e| e.to_str()) != Some("txt") {
            continue;
        }

        let doc_id = match parse_doc_id(path) {
            Ok(id) => id,
            Err(err) => {
                log::warn!("skipping {}: {err}", path.display());
                continue;
            }
        };

        let text = match std::fs::read_to_string(path) {
            Ok(text) => text,
            Err(source) => {
                log::warn!("skipping {}: {source}", path.display());
                continue;
            }
        };

        let tokens = tokenize::normalize(&text);
        index_document(
            doc_id,
            &tokens,
            &stop_words,
            &mut bktree,
            &mut word_documents,
            &mut word_counts,
            &mut documents,
        );
    }

    log::debug!(
        "indexed {} documents, {} distinct words ({} bktree nodes)",
        documents.iter().filter(|d| d.is_some()).count(),
        word_documents.len(),
        bktree.len(),
    );

    let (tfidf, feature_map) = tfidf::compute(&documents);

    Ok(IndexArtifacts { bktree, word_documents, word_counts, tfidf, feature_map })
}

/// Applies steps 4-6 of `spec.md` §4.3 to a single document's token stream.
fn index_document(
    doc_id: DocumentId,
    tokens: &[String],
    stop_words: &HashSet<String>,
    bktree: &mut BKTree,
    word_documents: &mut WordDocuments,
    word_counts: &mut WordCounts,
    documents: &mut Vec<Option<String>>,
) {
    // Per-document frequency, with first-seen order recorded so that ties in
    // the subsequent frequency sort break deterministically (spec.md §9:
    // "unspecified in the source; adopt ... a deterministic rule").
    let mut counts: HashMap<&str, u64> = HashMap::new();
    let mut first_seen: HashMap<&str, usize> = HashMap::new();
    for (i, token) in tokens.iter().enumerate() {
        if stop_words.contains(token.as_str()) {
            continue;
        }
        *counts.entry(token.as_str()).or_insert(0) += 1;
        first_seen.entry(token.as_str()).or_insert(i);
    }

    let mut ordered: Vec<(&str, u64)> = counts.into_iter().collect();
    ordered.sort_by(|(a, ca), (b, cb)| {
        cb.cmp(ca).then_with(|| first_seen[a].cmp(&first_seen[b]))
    });

    for (word, count) in ordered {
        if !word_documents.contains_key(word) {
            bktree.add(word);
        }
        word_documents.entry(word.to_string()).or_default().push(doc_id);
        *word_counts.entry(word.to_string()).or_insert(0) += count;
    }

    let filtered_stream: Vec<&str> =
        tokens.iter().map(String::as_str).filter(|t| !stop_words.contains(*t)).collect();

    let idx = doc_id as usize;
    if documents.len() <= idx {
        documents.resize(idx + 1, None);
    }
    documents[idx] = Some(filtered_stream.join(" "));
}

/// Parses the document id out of `<prefix>_<doc_number>_<suffix>.txt`: the
/// second underscore-separated field of the basename, 1-based in the
/// filename and stored 0-based internally (`spec.md` §3, §6).
pub fn parse_doc_id(path: &Path) -> Result<DocumentId> {
    let stem = path
        .file_stem()
        .and_then(|s| s.to_str())
        .ok_or_else(|| Error::input_format(path, "filename is not valid UTF-8"))?;

    let field = stem
        .split('_')
        .nth(1)
        .ok_or_else(|| Error::input_format(path, "filename has no second underscore field"))?;

    let doc_number: i64 = field
        .parse()
        .map_err(|_| Error::input_format(path, format!("'{field}' is not an integer")))?;

    if doc_number < 1 {
        return Err(Error::input_format(path, "document number must be >= 1"));
    }

    Ok((doc_number - 1) as DocumentId)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn parses_one_based_doc_number_into_zero_based_id() {
        assert_eq!(parse_doc_id(&PathBuf::from("f_1_x.txt")).unwrap(), 0);
        assert_eq!(parse_doc_id(&PathBuf::from("rec_42_part.txt")).unwrap(), 41);
    }

    #[test]
    fn rejects_filenames_without_a_second_field() {
        assert!(parse_doc_id(&PathBuf::from("nofield.txt")).is_err());
    }

    #[test]
    fn rejects_non_integer_second_field() {
        assert!(parse_doc_id(&PathBuf::from("f_abc_x.txt")).is_err());
    }

    #[test]
    fn spec_scenario_s6_two_files() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("f_1_x.txt"), "ena dva dva").unwrap();
        std::fs::write(dir.path().join("f_2_x.txt"), "dva tri").unwrap();

        let artifacts = index_directory(dir.path(), &IndexerConfig::default()).unwrap();

        assert_eq!(artifacts.word_documents["ena"], vec![0]);
        assert_eq!(artifacts.word_documents["dva"], vec![0, 1]);
        assert_eq!(artifacts.word_documents["tri"], vec![1]);

        assert_eq!(artifacts.word_counts["ena"], 1);
        assert_eq!(artifacts.word_counts["dva"], 3);
        assert_eq!(artifacts.word_counts["tri"], 1);
    }

    #[test]
    fn unparseable_filenames_are_skipped_not_fatal() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("garbage.txt"), "kava").unwrap();
        std::fs::write(dir.path().join("f_1_x.txt"), "kava").unwrap();

        let artifacts = index_directory(dir.path(), &IndexerConfig::default()).unwrap();
        assert_eq!(artifacts.word_documents["kava"], vec![0]);
    }

    #[test]
    fn determinism_across_runs() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("f_1_x.txt"), "kava čaj kava mleko kava čaj").unwrap();
        std::fs::write(dir.path().join("f_2_x.txt"), "voda sok voda").unwrap();

        let a = index_directory(dir.path(), &IndexerConfig::default()).unwrap();
        let b = index_directory(dir.path(), &IndexerConfig::default()).unwrap();

        assert_eq!(a.word_documents, b.word_documents);
        assert_eq!(a.word_counts, b.word_counts);
    }
}

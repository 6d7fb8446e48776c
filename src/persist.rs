//! (De)serializes the index artifacts to the directory layout `spec.md` §6
//! describes: `bktree.json`, `word_documents.json`, `word_counts.txt`,
//! `tfidf.json`, `feature_map.json`.
//!
//! JSON rather than a binary format, because §4.5 requires the BK-tree's
//! distance keys to "survive textual serialization" — the artifact is a
//! contractual document, not an opaque blob, just as the Python prototype's
//! own `bktree.json` is plain, inspectable JSON.

use std::path::Path;

use crate::bktree::BKTree;
use crate::error::{Error, Result};
use crate::feature_map::FeatureMap;
use crate::indexer::tfidf::TfIdfMatrix;
use crate::indexer::IndexArtifacts;
use crate::postings::WordDocuments;

const BKTREE_FILE: &str = "bktree.json";
const WORD_DOCUMENTS_FILE: &str = "word_documents.json";
const WORD_COUNTS_FILE: &str = "word_counts.txt";
const TFIDF_FILE: &str = "tfidf.json";
const FEATURE_MAP_FILE: &str = "feature_map.json";

/// Writes every artifact in `artifacts` under `output_dir`, creating it if
/// necessary.
pub fn save(artifacts: &IndexArtifacts, output_dir: &Path) -> Result<()> {
    std::fs::create_dir_all(output_dir).map_err(|e| Error::io(output_dir, e))?;

    write_json(&artifacts.bktree.to_blob(), &output_dir.join(BKTREE_FILE))?;
    write_json(&artifacts.word_documents, &output_dir.join(WORD_DOCUMENTS_FILE))?;
    crate::postings::write_word_counts_txt(&artifacts.word_counts, &output_dir.join(WORD_COUNTS_FILE))?;
    write_json(&artifacts.tfidf, &output_dir.join(TFIDF_FILE))?;
    write_json(&artifacts.feature_map, &output_dir.join(FEATURE_MAP_FILE))?;

    Ok(())
}

/// Everything the query engine needs, reloaded from `index_dir`.
pub struct LoadedIndex {
    pub bktree: BKTree,
    pub word_documents: WordDocuments,
    pub tfidf: TfIdfMatrix,
    pub feature_map: FeatureMap,
}

pub fn load(index_dir: &Path) -> Result<LoadedIndex> {
    let blob: crate::bktree::BKTreeBlob = read_json(&index_dir.join(BKTREE_FILE))?;
    let bktree = BKTree::from_blob(blob);
    let word_documents = read_json(&index_dir.join(WORD_DOCUMENTS_FILE))?;
    let tfidf = read_json(&index_dir.join(TFIDF_FILE))?;
    let feature_map = read_json(&index_dir.join(FEATURE_MAP_FILE))?;

    Ok(LoadedIndex { bktree, word_documents, tfidf, feature_map })
}

fn write_json<T: serde::Serialize>(value: &T, path: &Path) -> Result<()> {
    let file = std::fs::File::create(path).map_err(|e| Error::io(path, e))?;
    serde_json::to_writer(std::io::BufWriter::new(file), value)
        .map_err(|e| Error::CorruptIndex(format!("failed writing {}: {e}", path.display())))
}

fn read_json<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T> {
    let file = std::fs::File::open(path).map_err(|e| Error::io(path, e))?;
    serde_json::from_reader(std::io::BufReader::new(file))
        .map_err(|e| Error::CorruptIndex(format!("failed reading {}: {e}", path.display())))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::IndexerConfig;

    #[test]
    fn roundtrips_a_small_index() {
        let corpus = tempfile::tempdir().unwrap();
        std::fs::write(corpus.path().join("f_1_x.txt"), "kava čaj mleko").unwrap();
        std::fs::write(corpus.path().join("f_2_x.txt"), "voda sok").unwrap();

        let artifacts = crate::indexer::index_directory(corpus.path(), &IndexerConfig::default()).unwrap();

        let out = tempfile::tempdir().unwrap();
        save(&artifacts, out.path()).unwrap();
        let reloaded = load(out.path()).unwrap();

        assert_eq!(reloaded.word_documents, artifacts.word_documents);
        assert_eq!(reloaded.bktree.len(), artifacts.bktree.len());
        for probe in ["kava", "kavica", "voda"] {
            let mut a = artifacts.bktree.find(probe, 40, None);
            let mut b = reloaded.bktree.find(probe, 40, None);
            a.sort();
            b.sort();
            assert_eq!(a, b);
        }

        assert!(out.path().join("word_counts.txt").exists());
    }

    #[test]
    fn corrupt_json_surfaces_as_corrupt_index_error() {
        let out = tempfile::tempdir().unwrap();
        std::fs::write(out.path().join(WORD_DOCUMENTS_FILE), "not json").unwrap();
        let result: Result<WordDocuments> = read_json(&out.path().join(WORD_DOCUMENTS_FILE));
        assert!(matches!(result, Err(Error::CorruptIndex(_))));
    }
}

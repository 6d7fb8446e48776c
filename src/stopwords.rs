//! Stop-word loading (`spec.md` §6: "single UTF-8 file, comma-separated
//! words, no trailing newline requirement. Empty or missing is allowed").

use std::collections::HashSet;
use std::path::Path;

use crate::error::{Error, Result};

/// Loads a stop-word set from `path`. Returns an empty set if `path` is
/// `None`.
pub fn load(path: Option<&Path>) -> Result<HashSet<String>> {
    let path = match path {
        Some(path) => path,
        None => return Ok(HashSet::new()),
    };

    let contents = std::fs::read_to_string(path).map_err(|e| Error::io(path, e))?;
    Ok(contents
        .split(',')
        .map(|w| w.trim().to_string())
        .filter(|w| !w.is_empty())
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_path_means_no_stop_words() {
        assert!(load(None).unwrap().is_empty());
    }

    #[test]
    fn parses_comma_separated_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("stop-words.txt");
        std::fs::write(&path, "je,in,za").unwrap();

        let words = load(Some(&path)).unwrap();
        assert_eq!(words.len(), 3);
        assert!(words.contains("je"));
        assert!(words.contains("in"));
        assert!(words.contains("za"));
    }

    #[test]
    fn empty_file_means_no_stop_words() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("stop-words.txt");
        std::fs::write(&path, "").unwrap();
        assert!(load(Some(&path)).unwrap().is_empty());
    }
}

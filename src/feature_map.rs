//! Word ↔ TF-IDF column index bijection (`spec.md` §3: `FeatureMap`).

use fxhash::FxHashMap;

#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
pub struct FeatureMap {
    index_of: FxHashMap<String, u32>,
    words: Vec<String>,
}

impl FeatureMap {
    pub fn new() -> Self {
        FeatureMap::default()
    }

    /// Returns `word`'s column index, assigning the next contiguous index if
    /// it hasn't been seen before. Indices are contiguous from 0, per
    /// `spec.md` §3's `FeatureMap` invariant.
    pub fn get_or_insert(&mut self, word: &str) -> u32 {
        if let Some(&idx) = self.index_of.get(word) {
            return idx;
        }
        let idx = self.words.len() as u32;
        self.words.push(word.to_string());
        self.index_of.insert(word.to_string(), idx);
        idx
    }

    pub fn index_of(&self, word: &str) -> Option<u32> {
        self.index_of.get(word).copied()
    }

    pub fn word_at(&self, index: u32) -> Option<&str> {
        self.words.get(index as usize).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn indices_are_contiguous_and_stable() {
        let mut map = FeatureMap::new();
        assert_eq!(map.get_or_insert("kava"), 0);
        assert_eq!(map.get_or_insert("čaj"), 1);
        assert_eq!(map.get_or_insert("kava"), 0);
        assert_eq!(map.len(), 2);
        assert_eq!(map.word_at(0), Some("kava"));
        assert_eq!(map.index_of("čaj"), Some(1));
        assert_eq!(map.index_of("missing"), None);
    }
}

//! A Burkhard-Keller tree over the corpus vocabulary, keyed by
//! [`crate::distance::distance`]. See `spec.md` §4.2.
//!
//! Nodes live in a flat arena (`Vec<BKNode>`) addressed by index rather than
//! behind owned pointers, so both construction and (de)serialization are
//! iterative — the recursion-depth guard `spec.md` §4.5 calls for, satisfied
//! by construction instead of by raising the stack limit the way the Python
//! original's `sys.setrecursionlimit(100000)` does.

mod node;

use std::collections::VecDeque;

pub use node::BKNode;

/// Probes shorter than this are returned verbatim without traversing the
/// tree at all (`spec.md` §4.2, "Short-probe policy").
const SHORT_PROBE_LEN: usize = 3;

/// The wire format for [`BKTree::to_blob`]/[`BKTree::from_blob`]: a direct
/// mirror of the in-memory arena. `BKNode::children` already holds index
/// references rather than nested nodes, so this is flat by construction —
/// `serde`'s derived (de)serialization walks one `Vec` instead of recursing
/// once per tree level, which is what the recursion-depth guard `spec.md`
/// §4.5 calls for actually requires of the wire format, not just the arena.
#[derive(Debug, Clone, PartialEq, Default, serde::Serialize, serde::Deserialize)]
pub struct BKTreeBlob {
    pub nodes: Vec<BKNode>,
    pub root: Option<usize>,
}

/// A BK-tree over `String` words.
#[derive(Debug, Clone, Default)]
pub struct BKTree {
    arena: Vec<BKNode>,
    root: Option<usize>,
}

impl BKTree {
    pub fn new() -> Self {
        BKTree::default()
    }

    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    pub fn len(&self) -> usize {
        self.arena.len()
    }

    /// Adds `word` to the tree. A no-op if `word` is already present
    /// (`distance == 0` at some node on the walk), per `spec.md` §4.2.
    pub fn add(&mut self, word: impl Into<String>) {
        let word = word.into();
        let root = match self.root {
            None => {
                let idx = self.push(word);
                self.root = Some(idx);
                return;
            }
            Some(root) => root,
        };

        let mut current = root;
        loop {
            let delta = crate::distance::distance(&word, &self.arena[current].word);
            if delta == 0 {
                return;
            }
            match self.arena[current].children.get(&(delta as i32)) {
                Some(&child) => current = child,
                None => {
                    let idx = self.push(word);
                    self.arena[current].children.insert(delta as i32, idx);
                    return;
                }
            }
        }
    }

    fn push(&mut self, word: String) -> usize {
        let idx = self.arena.len();
        self.arena.push(BKNode::new(word));
        idx
    }

    /// Returns up to `k` `(distance, word)` pairs within `tolerance` of
    /// `probe`, sorted by ascending distance. `k = None` means unlimited.
    ///
    /// Per `spec.md` §4.2, probes of length <= 3 bypass the tree entirely and
    /// return `[(0, probe)]` regardless of tree contents.
    pub fn find(&self, probe: &str, tolerance: u32, k: Option<usize>) -> Vec<(u32, String)> {
        if probe.chars().count() <= SHORT_PROBE_LEN {
            return vec![(0, probe.to_string())];
        }

        let root = match self.root {
            None => return Vec::new(),
            Some(root) => root,
        };

        let mut found = Vec::new();
        let mut queue = VecDeque::new();
        queue.push_back(root);

        'search: while let Some(idx) = queue.pop_front() {
            let node = &self.arena[idx];
            let delta = crate::distance::distance(probe, &node.word);
            if delta <= tolerance {
                found.push((delta, node.word.clone()));
                if let Some(limit) = k {
                    if found.len() == limit {
                        break 'search;
                    }
                }
            }

            let lower = delta as i64 - tolerance as i64;
            let upper = delta as i64 + tolerance as i64;
            for (&dist, &child) in &node.children {
                if dist as i64 >= lower && dist as i64 <= upper {
                    queue.push_back(child);
                }
            }
        }

        found.sort_by_key(|&(d, _)| d);
        found
    }

    /// Serializes the tree to its wire format: a direct copy of the arena,
    /// already flat, so this is just a clone rather than a traversal.
    pub fn to_blob(&self) -> BKTreeBlob {
        BKTreeBlob { nodes: self.arena.clone(), root: self.root }
    }

    /// Rebuilds a tree from its wire format. The arena is already flat, so
    /// this is a direct move, not a traversal.
    pub fn from_blob(blob: BKTreeBlob) -> Self {
        BKTree { arena: blob.nodes, root: blob.root }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_tree() -> BKTree {
        let mut tree = BKTree::new();
        for w in ["kava", "čaj", "mleko", "voda", "sok", "kvas", "kvasec"] {
            tree.add(w);
        }
        tree
    }

    #[test]
    fn membership_after_add() {
        let tree = sample_tree();
        for w in ["kava", "čaj", "mleko", "voda", "sok", "kvas", "kvasec"] {
            let found = tree.find(w, 0, None);
            assert!(found.contains(&(0, w.to_string())), "{w} missing from {found:?}");
        }
    }

    #[test]
    fn deduplication_is_a_noop() {
        let mut tree = sample_tree();
        let before = tree.len();
        tree.add("kava");
        assert_eq!(tree.len(), before);
    }

    #[test]
    fn short_probe_shortcut_ignores_tree_contents() {
        let tree = sample_tree();
        assert_eq!(tree.find("kv", 50, None), vec![(0, "kv".to_string())]);
        assert_eq!(tree.find("", 50, None), vec![(0, "".to_string())]);
    }

    #[test]
    fn empty_tree_find_returns_empty() {
        let tree = BKTree::new();
        assert!(tree.find("kavarna", 50, None).is_empty());
    }

    #[test]
    fn roundtrip_serialization_preserves_find_results() {
        let tree = sample_tree();
        let blob = tree.to_blob();
        let json = serde_json::to_string(&blob).unwrap();
        let reloaded_blob: BKTreeBlob = serde_json::from_str(&json).unwrap();
        let reloaded = BKTree::from_blob(reloaded_blob);

        for probe in ["kavarna", "kvasnica", "nekaj", "mleko"] {
            let mut a = tree.find(probe, 40, None);
            let mut b = reloaded.find(probe, 40, None);
            a.sort();
            b.sort();
            assert_eq!(a, b, "mismatch for probe {probe:?}");
        }
    }

    #[test]
    fn completeness_within_tolerance() {
        let words = ["kava", "kavica", "kavarna", "čaj", "čajnik", "kvas"];
        let mut tree = BKTree::new();
        for w in words {
            tree.add(w);
        }

        let tolerance = 30;
        let found = tree.find("kava", tolerance, None);
        let found_words: std::collections::HashSet<_> = found.iter().map(|(_, w)| w.clone()).collect();

        for w in words {
            let d = crate::distance::distance("kava", w);
            if d <= tolerance {
                assert!(found_words.contains(w), "{w} (d={d}) should be found");
            } else {
                assert!(!found_words.contains(w), "{w} (d={d}) should not be found");
            }
        }
    }

    // spec.md §8 property 2: every word added to the tree is a member of it
    // (findable at distance 0) afterward.
    proptest::proptest! {
        #[test]
        fn property_every_added_word_is_a_member(
            words in proptest::collection::vec("[a-z]{1,8}", 1..12)
        ) {
            let mut tree = BKTree::new();
            for w in &words {
                tree.add(w.clone());
            }
            for w in &words {
                if w.chars().count() <= SHORT_PROBE_LEN {
                    continue;
                }
                let found = tree.find(w, 0, None);
                proptest::prop_assert!(
                    found.iter().any(|(d, word)| *d == 0 && word == w),
                    "{w} not found at distance 0 in {found:?}"
                );
            }
        }
    }

    // spec.md §8 property 4: `find` is complete within `tolerance` — every
    // indexed word within `tolerance` of the probe is returned, independent
    // of insertion order or tree shape.
    proptest::proptest! {
        #[test]
        fn property_find_is_complete_within_tolerance(
            words in proptest::collection::vec("[a-z]{1,8}", 1..12),
            probe in "[a-z]{1,8}",
            tolerance in 0u32..60
        ) {
            proptest::prop_assume!(probe.chars().count() > SHORT_PROBE_LEN);

            let mut tree = BKTree::new();
            for w in &words {
                tree.add(w.clone());
            }

            let found = tree.find(&probe, tolerance, None);
            let found_words: std::collections::HashSet<_> =
                found.iter().map(|(_, w)| w.clone()).collect();

            for w in &words {
                let d = crate::distance::distance(&probe, w);
                if d <= tolerance {
                    proptest::prop_assert!(
                        found_words.contains(w),
                        "{w} (d={d} <= tolerance={tolerance}) missing from {found_words:?}"
                    );
                }
            }
        }
    }
}

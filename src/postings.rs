//! The two corpus-wide maps the indexer populates alongside the BK-tree:
//! `word -> documents` and `word -> corpus frequency` (`spec.md` §3, §4.3).

use std::collections::BTreeMap;

/// `word -> ordered sequence of doc ids` it occurs in.
///
/// Backed by a `BTreeMap` rather than a hash map so that persistence
/// (`spec.md` §4.3 "Determinism… sorted keys") falls out of iteration order
/// for free instead of requiring a sort at save time.
pub type WordDocuments = BTreeMap<String, Vec<u32>>;

/// `word -> corpus-wide occurrence count`.
pub type WordCounts = BTreeMap<String, u64>;

/// Writes `counts` as `word_counts.txt`: one `<word> <count>\n` line per
/// entry, consumable by the alternate SymSpell backend (`spec.md` §6).
pub fn write_word_counts_txt(counts: &WordCounts, path: &std::path::Path) -> crate::error::Result<()> {
    use std::fmt::Write as _;
    let mut buf = String::new();
    for (word, count) in counts {
        let _ = writeln!(buf, "{word} {count}");
    }
    std::fs::write(path, buf).map_err(|e| crate::error::Error::io(path, e))
}

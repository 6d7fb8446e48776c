use std::collections::BTreeMap;

/// A single arena slot. `children` maps a non-zero distance key to the index
/// of the child node in the tree's arena, matching `spec.md` §3's "mapping
/// from non-zero distance → child `BKNode`" with the arena indirection swapped
/// in for an owned pointer.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct BKNode {
    pub(crate) word: String,
    pub(crate) children: BTreeMap<i32, usize>,
}

impl BKNode {
    pub(crate) fn new(word: String) -> Self {
        BKNode { word, children: BTreeMap::new() }
    }
}

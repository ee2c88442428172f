//! Rule index: buckets of styled rule nodes keyed by their subject's (tag, id).

use crate::rule_tree::RuleTree;
use core::hash::{Hash as _, Hasher as _};
use indextree::NodeId;
use rustc_hash::{FxHashMap, FxHasher};
use smallvec::SmallVec;

/// Bucket key for a (tag, id) pair. An empty component is the wildcard.
///
/// Used both when building the index and when probing it.
#[inline]
pub fn node_hash(tag: &str, id: &str) -> u64 {
    let mut hasher = FxHasher::default();
    tag.hash(&mut hasher);
    id.hash(&mut hasher);
    hasher.finish()
}

/// Derived lookup from (tag, id) buckets to rule nodes. Never authoritative;
/// rebuild it whenever the tree changes.
#[derive(Clone, Debug, Default)]
pub struct RuleIndex {
    buckets: FxHashMap<u64, Vec<NodeId>>,
}

impl RuleIndex {
    /// Index every styled node of `tree` under its subject segment's (tag, id).
    pub fn build(tree: &RuleTree) -> Self {
        let mut buckets: FxHashMap<u64, Vec<NodeId>> = FxHashMap::default();
        for (node, rule) in tree.styled_nodes() {
            let segment = rule.segment();
            buckets
                .entry(node_hash(&segment.tag, &segment.id))
                .or_default()
                .push(node);
        }
        Self { buckets }
    }

    #[inline]
    pub fn bucket(&self, hash: u64) -> &[NodeId] {
        self.buckets.get(&hash).map_or(&[], Vec::as_slice)
    }

    /// Nodes that might match an element with this tag and id.
    ///
    /// Probes the exact bucket plus each wildcard combination, so rules that leave
    /// the tag or the id unconstrained are found too.
    pub fn candidates(&self, tag: &str, id: &str) -> impl Iterator<Item = NodeId> {
        let mut probes: SmallVec<u64, 4> = SmallVec::new();
        for hash in [
            node_hash(tag, id),
            node_hash(tag, ""),
            node_hash("", id),
            node_hash("", ""),
        ] {
            if !probes.contains(&hash) {
                probes.push(hash);
            }
        }
        probes
            .into_iter()
            .flat_map(move |hash| self.bucket(hash).iter().copied())
    }

    /// Number of non-empty buckets.
    #[inline]
    pub fn len(&self) -> usize {
        self.buckets.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.buckets.is_empty()
    }

    #[inline]
    pub fn clear(&mut self) {
        self.buckets.clear();
    }
}

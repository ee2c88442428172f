//! Rule node tree: one node per selector segment, shared prefixes share nodes.
//!
//! The tree lives in an [`Arena`] so parent links are plain [`NodeId`]s and never
//! own anything. The root carries an empty segment and stands for the implicit
//! universal ancestor; it is never indexed and never matched.

use crate::priority::CascadePriority;
use css_properties::{PropertyDictionary, PropertyId};
use css_selectors::{
    ElementAdapter, SelectorSegment, Specificity, matches_path, specificity_of_segment,
};
use indextree::{Arena, Node, NodeId};
use rustc_hash::FxHashMap;
use smallvec::SmallVec;

/// One selector segment of a rule path plus the properties declared on it.
///
/// Each record keeps the order of the rule block that last declared it; the
/// node's own order is the latest of those.
#[derive(Clone, Debug, Default)]
pub struct RuleNode {
    segment: SelectorSegment,
    specificity: Specificity,
    source_order: u32,
    properties: PropertyDictionary,
    declaration_orders: FxHashMap<PropertyId, u32>,
}

impl RuleNode {
    #[inline]
    pub const fn segment(&self) -> &SelectorSegment {
        &self.segment
    }

    /// Specificity of the whole path from the root down to this node.
    #[inline]
    pub const fn specificity(&self) -> Specificity {
        self.specificity
    }

    #[inline]
    pub const fn source_order(&self) -> u32 {
        self.source_order
    }

    /// Order of the rule block that declared `id` here. Records set directly
    /// through [`RuleNode::properties_mut`] fall back to the node's order.
    #[inline]
    pub fn declaration_order(&self, id: PropertyId) -> u32 {
        self.declaration_orders
            .get(&id)
            .copied()
            .unwrap_or(self.source_order)
    }

    /// Priority of one record: path specificity plus its declaration order.
    #[inline]
    pub fn property_priority(&self, id: PropertyId) -> CascadePriority {
        CascadePriority::new(self.specificity, self.declaration_order(id))
    }

    #[inline]
    pub const fn properties(&self) -> &PropertyDictionary {
        &self.properties
    }

    #[inline]
    pub const fn properties_mut(&mut self) -> &mut PropertyDictionary {
        &mut self.properties
    }

    /// Node-level priority, used to order matched nodes.
    #[inline]
    pub const fn priority(&self) -> CascadePriority {
        CascadePriority::new(self.specificity, self.source_order)
    }

    /// True if a rule block declared anything on this node.
    #[inline]
    pub fn is_styled(&self) -> bool {
        !self.properties.is_empty()
    }
}

/// Arena-backed tree of [`RuleNode`]s.
#[derive(Clone, Debug)]
pub struct RuleTree {
    arena: Arena<RuleNode>,
    root: NodeId,
    next_order: u32,
}

impl Default for RuleTree {
    fn default() -> Self {
        Self::new()
    }
}

impl RuleTree {
    pub fn new() -> Self {
        let mut arena = Arena::new();
        Self {
            root: arena.new_node(RuleNode::default()),
            arena,
            next_order: 0,
        }
    }

    #[inline]
    pub const fn root(&self) -> NodeId {
        self.root
    }

    #[inline]
    pub fn get(&self, node: NodeId) -> Option<&RuleNode> {
        self.arena.get(node).map(Node::get)
    }

    #[inline]
    pub fn get_mut(&mut self, node: NodeId) -> Option<&mut RuleNode> {
        self.arena.get_mut(node).map(Node::get_mut)
    }

    #[inline]
    pub fn parent(&self, node: NodeId) -> Option<NodeId> {
        self.arena.get(node).and_then(Node::parent)
    }

    pub fn children(&self, node: NodeId) -> impl Iterator<Item = NodeId> {
        node.children(&self.arena)
    }

    /// Number of nodes, root included.
    #[inline]
    pub fn len(&self) -> usize {
        self.arena.count()
    }

    /// True if only the root exists.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() <= 1
    }

    /// Every node in pre-order, root first.
    pub fn iter(&self) -> impl Iterator<Item = (NodeId, &RuleNode)> {
        self.root
            .descendants(&self.arena)
            .filter_map(move |node| self.get(node).map(|rule| (node, rule)))
    }

    /// Non-root nodes that carry declarations.
    pub fn styled_nodes(&self) -> impl Iterator<Item = (NodeId, &RuleNode)> {
        self.iter()
            .filter(move |(node, rule)| *node != self.root && rule.is_styled())
    }

    /// Reserve the declaration order for the next rule block.
    #[inline]
    pub const fn allocate_order(&mut self) -> u32 {
        let order = self.next_order;
        self.next_order = self.next_order.saturating_add(1);
        order
    }

    /// Child of `parent` whose segment equals `segment`.
    pub fn find_child(&self, parent: NodeId, segment: &SelectorSegment) -> Option<NodeId> {
        parent
            .children(&self.arena)
            .find(|&child| self.get(child).is_some_and(|rule| rule.segment == *segment))
    }

    /// Child of `parent` for `segment`, creating an empty one if missing.
    pub fn get_or_insert_child(&mut self, parent: NodeId, segment: &SelectorSegment) -> NodeId {
        if let Some(existing) = self.find_child(parent, segment) {
            return existing;
        }
        let inherited = self
            .get(parent)
            .map(|rule| rule.specificity)
            .unwrap_or_default();
        let child = self.arena.new_node(RuleNode {
            segment: segment.clone(),
            specificity: inherited + specificity_of_segment(segment),
            source_order: 0,
            properties: PropertyDictionary::new(),
            declaration_orders: FxHashMap::default(),
        });
        parent.append(child, &mut self.arena);
        child
    }

    /// Walk (creating as needed) the path for `segments`, given left to right.
    /// Returns the terminal node, or the root for an empty path.
    pub fn insert_path(&mut self, segments: &[SelectorSegment]) -> NodeId {
        segments
            .iter()
            .fold(self.root, |parent, segment| self.get_or_insert_child(parent, segment))
    }

    /// Merge `properties` into `node`, stamping each of them with `order`.
    /// Records already on the node keep their own order.
    pub fn declare(&mut self, node: NodeId, properties: &PropertyDictionary, order: u32) {
        if let Some(rule) = self.get_mut(node) {
            rule.properties.merge(properties);
            for (id, _) in properties {
                rule.declaration_orders.insert(*id, order);
            }
            rule.source_order = rule.source_order.max(order);
        }
    }

    /// Segments from `node` up to (excluding) the root, subject first.
    pub fn path_to_root(&self, node: NodeId) -> SmallVec<&SelectorSegment, 8> {
        node.ancestors(&self.arena)
            .filter(|&ancestor| ancestor != self.root)
            .filter_map(|ancestor| self.get(ancestor).map(RuleNode::segment))
            .collect()
    }

    /// True if the full selector path ending at `node` holds for `element`.
    pub fn matches<A: ElementAdapter>(&self, adapter: &A, node: NodeId, element: A::Handle) -> bool {
        let path = self.path_to_root(node);
        matches_path(adapter, element, &path)
    }

    /// Merge every path of `other` into this tree.
    ///
    /// Shared paths take `other`'s records for shared ids. Declaration orders of
    /// the records `other` provides are shifted past everything already in this
    /// tree; records only this tree holds keep their order.
    pub fn graft(&mut self, other: &Self) {
        let offset = self.next_order;
        self.adopt(self.root, other, other.root, offset);
        self.graft_children(self.root, other, other.root, offset);
        self.next_order = offset.saturating_add(other.next_order);
    }

    fn graft_children(&mut self, into: NodeId, other: &Self, from: NodeId, offset: u32) {
        for other_child in other.children(from) {
            let Some(source) = other.get(other_child) else {
                continue;
            };
            let target = self.get_or_insert_child(into, &source.segment);
            self.adopt(target, other, other_child, offset);
            self.graft_children(target, other, other_child, offset);
        }
    }

    fn adopt(&mut self, target: NodeId, other: &Self, from: NodeId, offset: u32) {
        let Some(source) = other.get(from) else {
            return;
        };
        if !source.is_styled() {
            return;
        }
        let Some(rule) = self.get_mut(target) else {
            return;
        };
        for (id, property) in source.properties() {
            let order = source.declaration_order(*id).saturating_add(offset);
            rule.properties.set_property(*id, property.clone());
            rule.declaration_orders.insert(*id, order);
        }
        rule.source_order = rule
            .source_order
            .max(source.source_order.saturating_add(offset));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use css_properties::{Property, PropertyId, Unit};
    use css_selectors::parse_complex_selector;

    fn declaration(name: &str, value: f32) -> PropertyDictionary {
        [(PropertyId::new(name), Property::new(value, Unit::Px))]
            .into_iter()
            .collect()
    }

    #[test]
    fn shared_prefixes_share_nodes() {
        let mut tree = RuleTree::new();
        let first = tree.insert_path(&parse_complex_selector("div .panel").segments);
        let second = tree.insert_path(&parse_complex_selector("div p").segments);
        assert_ne!(first, second);
        assert_eq!(tree.parent(first), tree.parent(second));
        // root + div + .panel + p
        assert_eq!(tree.len(), 4);
    }

    #[test]
    fn path_specificity_accumulates() {
        let mut tree = RuleTree::new();
        let node = tree.insert_path(&parse_complex_selector("div#main .a").segments);
        assert_eq!(
            tree.get(node).map(RuleNode::specificity),
            Some(Specificity(1, 1, 1))
        );
    }

    #[test]
    fn path_to_root_is_subject_first() {
        let mut tree = RuleTree::new();
        let node = tree.insert_path(&parse_complex_selector("body > p").segments);
        let tags: Vec<&str> = tree
            .path_to_root(node)
            .iter()
            .map(|seg| seg.tag.as_str())
            .collect();
        assert_eq!(tags, vec!["p", "body"]);
    }

    #[test]
    fn graft_offsets_orders_and_overrides() {
        let width = PropertyId::new("width");
        let mut base = RuleTree::new();
        let node = base.insert_path(&parse_complex_selector("p").segments);
        let order = base.allocate_order();
        base.declare(node, &declaration("width", 1.0), order);

        let mut overlay = RuleTree::new();
        let overlay_node = overlay.insert_path(&parse_complex_selector("p").segments);
        let overlay_order = overlay.allocate_order();
        overlay.declare(overlay_node, &declaration("width", 2.0), overlay_order);
        let extra = overlay.insert_path(&parse_complex_selector("span").segments);
        let extra_order = overlay.allocate_order();
        overlay.declare(extra, &declaration("height", 3.0), extra_order);

        base.graft(&overlay);

        let merged = base.get(node);
        assert_eq!(
            merged.and_then(|rule| rule.properties().get_property(width)),
            Some(&Property::new(2.0f32, Unit::Px))
        );
        assert_eq!(merged.map(RuleNode::source_order), Some(1));
        assert_eq!(base.styled_nodes().count(), 2);
        assert_eq!(base.allocate_order(), 3);
    }

    #[test]
    fn redeclaring_a_node_keeps_earlier_record_orders() {
        let colour = PropertyId::new("color");
        let width = PropertyId::new("width");
        let mut tree = RuleTree::new();
        let node = tree.insert_path(&parse_complex_selector(".a").segments);
        let first = tree.allocate_order();
        tree.declare(node, &declaration("color", 1.0), first);
        tree.allocate_order();
        let third = tree.allocate_order();
        tree.declare(node, &declaration("width", 2.0), third);

        let rule = tree.get(node);
        assert_eq!(rule.map(|found| found.declaration_order(colour)), Some(0));
        assert_eq!(rule.map(|found| found.declaration_order(width)), Some(2));
        assert_eq!(rule.map(RuleNode::source_order), Some(2));
    }

    #[test]
    fn graft_shifts_only_the_records_it_provides() {
        let colour = PropertyId::new("color");
        let width = PropertyId::new("width");
        let mut base = RuleTree::new();
        let node = base.insert_path(&parse_complex_selector(".a").segments);
        let order = base.allocate_order();
        base.declare(node, &declaration("color", 1.0), order);
        base.allocate_order();

        let mut overlay = RuleTree::new();
        let overlay_node = overlay.insert_path(&parse_complex_selector(".a").segments);
        let overlay_order = overlay.allocate_order();
        overlay.declare(overlay_node, &declaration("width", 2.0), overlay_order);

        base.graft(&overlay);
        let rule = base.get(node);
        assert_eq!(rule.map(|found| found.declaration_order(colour)), Some(0));
        assert_eq!(rule.map(|found| found.declaration_order(width)), Some(2));
    }
}

//! The style sheet: rule tree, index, named tables and the definition cache.

use crate::definition::{DefinitionCache, DefinitionKey, ElementDefinition};
use crate::index::RuleIndex;
use crate::instancing::{Instancer, is_none_value, split_declarations};
use crate::priority::{CascadePriority, compare_priority};
use crate::rule_tree::{RuleNode, RuleTree};
use crate::tables::{
    DecoratorSpecification, DecoratorSpecificationMap, Keyframes, KeyframesMap, Sprite,
    SpritesheetList,
};
use core::cmp::Ordering;
use css_properties::{Property, PropertyDictionary, PropertyId, PropertySource, Unit};
use css_selectors::ElementAdapter;
use css_values::{Decorator, DecoratorsPtr, FontEffectsPtr, Variant};
use indextree::NodeId;
use log::{debug, warn};
use rustc_hash::FxHashMap;
use std::sync::Arc;
use tracing::info_span;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// A complete, queryable set of style rules.
///
/// Required call order after building, combining or cloning:
/// [`StyleSheet::build_node_index`], then
/// [`StyleSheet::optimize_node_properties`], then queries. Querying a sheet whose
/// index is stale returns incomplete results; it is not checked at runtime.
#[derive(Debug, Default)]
pub struct StyleSheet {
    tree: RuleTree,
    keyframes: KeyframesMap,
    decorator_map: DecoratorSpecificationMap,
    spritesheets: SpritesheetList,
    index: RuleIndex,
    cache: DefinitionCache,
}

impl Clone for StyleSheet {
    /// Deep copy of the tree and tables. The copy starts with an empty index and
    /// cache and must be re-indexed before use.
    fn clone(&self) -> Self {
        Self {
            tree: self.tree.clone(),
            keyframes: self.keyframes.clone(),
            decorator_map: self.decorator_map.clone(),
            spritesheets: self.spritesheets.clone(),
            index: RuleIndex::default(),
            cache: DefinitionCache::default(),
        }
    }
}

impl StyleSheet {
    /// Empty sheet with only the root node.
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adopt a parsed rule tree and its tables. The sheet is not indexed yet.
    pub fn from_parts(
        tree: RuleTree,
        keyframes: KeyframesMap,
        decorator_map: DecoratorSpecificationMap,
        spritesheets: SpritesheetList,
    ) -> Self {
        Self {
            tree,
            keyframes,
            decorator_map,
            spritesheets,
            index: RuleIndex::default(),
            cache: DefinitionCache::default(),
        }
    }

    /// Union of this sheet and `other`, with `other` winning on shared paths and
    /// shared table names. Neither input changes; the result is not indexed.
    pub fn combine_style_sheet(&self, other: &Self) -> Self {
        let _span = info_span!("style_sheet.combine").entered();
        let mut combined = self.clone();
        combined.tree.graft(&other.tree);
        for (name, keyframes) in &other.keyframes {
            combined.keyframes.insert(name.clone(), keyframes.clone());
        }
        for (name, specification) in &other.decorator_map {
            combined
                .decorator_map
                .insert(name.clone(), specification.clone());
        }
        combined.spritesheets.merge(&other.spritesheets);
        debug!(
            "combined style sheets: {} + {} nodes -> {}",
            self.tree.len(),
            other.tree.len(),
            combined.tree.len()
        );
        combined
    }

    /// Rebuild the rule index from the current tree and drop cached definitions.
    pub fn build_node_index(&mut self) {
        let _span = info_span!("style_sheet.build_node_index").entered();
        self.index = RuleIndex::build(&self.tree);
        self.cache.clear();
        debug!(
            "rule index rebuilt: {} buckets over {} nodes",
            self.index.len(),
            self.tree.len()
        );
    }

    /// Replace raw `decorator` and `font-effect` strings on every rule node with
    /// instanced handle lists. Values already instanced are left alone, so a
    /// second run changes nothing.
    pub fn optimize_node_properties(&mut self, instancer: &dyn Instancer) {
        let _span = info_span!("style_sheet.optimize_node_properties").entered();
        let decorator_id = PropertyId::decorator();
        let font_effect_id = PropertyId::font_effect();

        let mut replacements: Vec<(NodeId, PropertyId, Property)> = Vec::new();
        for (node, rule) in self.tree.iter() {
            for (id, property) in rule.properties() {
                let Variant::String(text) = &property.value else {
                    continue;
                };
                let source = property.source.as_deref();
                let (value, unit) = if *id == decorator_id {
                    let list = self.instance_decorators_from_string(text, source, instancer);
                    (Variant::from(list), Unit::Decorator)
                } else if *id == font_effect_id {
                    let list = self.instance_font_effects_from_string(text, source, instancer);
                    (Variant::from(list), Unit::FontEffect)
                } else {
                    continue;
                };
                replacements.push((
                    node,
                    *id,
                    Property {
                        value,
                        unit,
                        source: property.source.clone(),
                    },
                ));
            }
        }

        debug!("instanced {} decorator/font-effect values", replacements.len());
        if replacements.is_empty() {
            return;
        }
        for (node, id, property) in replacements {
            if let Some(rule) = self.tree.get_mut(node) {
                rule.properties_mut().set_property(id, property);
            }
        }
        self.cache.clear();
    }

    /// Instance a comma separated decorator list.
    ///
    /// Entries naming an `@decorator` specification share its decorator; others go
    /// to `instancer`. Any failure is logged and yields an empty list.
    pub fn instance_decorators_from_string(
        &self,
        value: &str,
        source: Option<&PropertySource>,
        instancer: &dyn Instancer,
    ) -> DecoratorsPtr {
        if is_none_value(value) {
            return DecoratorsPtr::default();
        }
        let mut decorators = Vec::new();
        for declaration in split_declarations(value) {
            if let Some(shared) = self.get_decorator(declaration) {
                decorators.push(shared);
                continue;
            }
            match instancer.instance_decorator(declaration, source) {
                Ok(decorator) => decorators.push(decorator),
                Err(error) => {
                    warn!(
                        "invalid decorator '{declaration}' at {}: {error:#}",
                        describe_source(source)
                    );
                    return DecoratorsPtr::default();
                }
            }
        }
        DecoratorsPtr::new(decorators)
    }

    /// Instance a comma separated font-effect list. Any failure is logged and
    /// yields an empty list.
    pub fn instance_font_effects_from_string(
        &self,
        value: &str,
        source: Option<&PropertySource>,
        instancer: &dyn Instancer,
    ) -> FontEffectsPtr {
        if is_none_value(value) {
            return FontEffectsPtr::default();
        }
        let mut effects = Vec::new();
        for declaration in split_declarations(value) {
            match instancer.instance_font_effect(declaration, source) {
                Ok(effect) => effects.push(effect),
                Err(error) => {
                    warn!(
                        "invalid font-effect '{declaration}' at {}: {error:#}",
                        describe_source(source)
                    );
                    return FontEffectsPtr::default();
                }
            }
        }
        FontEffectsPtr::new(effects)
    }

    /// Compiled definition for `element`, or `None` if no rule matches it.
    ///
    /// Elements matching the same ordered set of rule nodes share one instance.
    pub fn get_element_definition<A: ElementAdapter>(
        &self,
        adapter: &A,
        element: A::Handle,
    ) -> Option<Arc<ElementDefinition>> {
        let tag = adapter.tag_name(element);
        let id = adapter.element_id(element).unwrap_or_default();
        let mut matched: DefinitionKey = self
            .index
            .candidates(tag, id)
            .filter(|&node| self.tree.matches(adapter, node, element))
            .collect();
        if matched.is_empty() {
            return None;
        }
        matched.sort_by(|&left, &right| self.compare_nodes(left, right));
        Some(
            self.cache
                .get_or_insert_with(matched, |nodes| self.compile(nodes)),
        )
    }

    /// Resolve many elements on the rayon pool. Results line up with `elements`.
    #[cfg(feature = "parallel")]
    pub fn get_element_definitions<A>(
        &self,
        adapter: &A,
        elements: &[A::Handle],
    ) -> Vec<Option<Arc<ElementDefinition>>>
    where
        A: ElementAdapter + Sync,
        A::Handle: Send + Sync,
    {
        elements
            .par_iter()
            .map(|&element| self.get_element_definition(adapter, element))
            .collect()
    }

    fn compare_nodes(&self, left: NodeId, right: NodeId) -> Ordering {
        let priority = |node| self.tree.get(node).map(RuleNode::priority);
        let by_priority = match (priority(left), priority(right)) {
            (Some(left_priority), Some(right_priority)) => {
                compare_priority(&left_priority, &right_priority)
            }
            _ => Ordering::Equal,
        };
        by_priority.then_with(|| left.cmp(&right))
    }

    /// Resolve each property id on its own: the record with the highest
    /// specificity and declaration order wins. `nodes` arrive sorted, so a later
    /// node wins an exact tie.
    fn compile(&self, nodes: &[NodeId]) -> ElementDefinition {
        let mut winners: FxHashMap<PropertyId, (CascadePriority, &Property)> =
            FxHashMap::default();
        for rule in nodes.iter().filter_map(|&node| self.tree.get(node)) {
            for (id, property) in rule.properties() {
                let priority = rule.property_priority(*id);
                let beaten = winners.get(id).is_some_and(|(current, _)| {
                    compare_priority(&priority, current) == Ordering::Less
                });
                if !beaten {
                    winners.insert(*id, (priority, property));
                }
            }
        }
        let properties = winners
            .into_iter()
            .map(|(id, (_, property))| (id, property.clone()))
            .collect::<PropertyDictionary>();
        ElementDefinition::new(properties)
    }

    #[inline]
    pub fn get_keyframes(&self, name: &str) -> Option<&Keyframes> {
        self.keyframes.get(name)
    }

    #[inline]
    pub fn get_sprite(&self, name: &str) -> Option<&Sprite> {
        self.spritesheets.get_sprite(name)
    }

    #[inline]
    pub fn get_decorator_specification(&self, name: &str) -> Option<&DecoratorSpecification> {
        self.decorator_map.get(name)
    }

    #[inline]
    fn get_decorator(&self, name: &str) -> Option<Arc<dyn Decorator>> {
        self.decorator_map
            .get(name)
            .map(|specification| Arc::clone(&specification.decorator))
    }

    #[inline]
    pub const fn spritesheets(&self) -> &SpritesheetList {
        &self.spritesheets
    }

    #[inline]
    pub const fn rule_tree(&self) -> &RuleTree {
        &self.tree
    }

    #[inline]
    pub fn rule_node(&self, node: NodeId) -> Option<&RuleNode> {
        self.tree.get(node)
    }

    /// Rule nodes, root included.
    #[inline]
    pub fn node_count(&self) -> usize {
        self.tree.len()
    }

    /// Read-only view of one index bucket, see [`crate::node_hash`].
    #[inline]
    pub fn index_bucket(&self, hash: u64) -> &[NodeId] {
        self.index.bucket(hash)
    }

    #[inline]
    pub fn cached_definition_count(&self) -> usize {
        self.cache.len()
    }

    /// Drop every cached definition. Definitions held by callers stay valid.
    #[inline]
    pub fn clear_definition_cache(&mut self) {
        self.cache.clear();
    }
}

fn describe_source(source: Option<&PropertySource>) -> String {
    source.map_or_else(
        || "<unknown>".to_owned(),
        |declared| {
            format!(
                "{}:{} ({})",
                declared.path, declared.line_number, declared.rule_name
            )
        },
    )
}

//! Hand-off point from a rule parser to a [`StyleSheet`].

use crate::rule_tree::RuleTree;
use crate::style_sheet::StyleSheet;
use crate::tables::{
    DecoratorSpecification, DecoratorSpecificationMap, Keyframes, KeyframesMap, Rectangle,
    SpritesheetList,
};
use css_properties::{PropertyDictionary, PropertySource};
use css_selectors::{SelectorSegment, parse_selector_list};
use log::{debug, warn};
use std::sync::Arc;

/// Accumulates rule blocks and named tables in declaration order.
#[derive(Debug, Default)]
pub struct StyleSheetBuilder {
    tree: RuleTree,
    keyframes: KeyframesMap,
    decorator_map: DecoratorSpecificationMap,
    spritesheets: SpritesheetList,
}

impl StyleSheetBuilder {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add one rule block. Each selector of a list gets its own path; every record
    /// is stamped with `source` when given.
    pub fn add_rule(
        &mut self,
        selector_text: &str,
        mut properties: PropertyDictionary,
        source: Option<Arc<PropertySource>>,
    ) -> &mut Self {
        let selectors = parse_selector_list(selector_text);
        if selectors.selectors.is_empty() {
            warn!("ignoring rule with no usable selector: '{selector_text}'");
            return self;
        }
        if let Some(declared) = &source {
            properties.set_source_of_all_properties(declared);
        }
        let order = self.tree.allocate_order();
        for selector in selectors {
            let node = self.tree.insert_path(&selector.segments);
            self.tree.declare(node, &properties, order);
        }
        self
    }

    /// Add one rule block for an already parsed segment path, left to right.
    /// An empty path is skipped like an unusable selector.
    pub fn add_rule_path(
        &mut self,
        segments: &[SelectorSegment],
        properties: &PropertyDictionary,
    ) -> &mut Self {
        if segments.is_empty() {
            warn!("ignoring rule path with no segments");
            return self;
        }
        let order = self.tree.allocate_order();
        let node = self.tree.insert_path(segments);
        self.tree.declare(node, properties, order);
        self
    }

    /// Add a named keyframes set. A later set with the same name replaces it.
    pub fn add_keyframes(&mut self, name: &str, keyframes: Keyframes) -> &mut Self {
        if self.keyframes.insert(name.to_owned(), keyframes).is_some() {
            debug!("keyframes '{name}' redefined");
        }
        self
    }

    /// Add a named decorator specification. A later one with the same name wins.
    pub fn add_decorator(&mut self, name: &str, specification: DecoratorSpecification) -> &mut Self {
        if self
            .decorator_map
            .insert(name.to_owned(), specification)
            .is_some()
        {
            debug!("decorator '{name}' redefined");
        }
        self
    }

    pub fn add_spritesheet(
        &mut self,
        name: &str,
        image_source: &str,
        definition_source: Option<Arc<PropertySource>>,
        display_scale: f32,
        sprites: Vec<(String, Rectangle)>,
    ) -> &mut Self {
        self.spritesheets
            .add_spritesheet(name, image_source, definition_source, display_scale, sprites);
        self
    }

    /// Finish the sheet. It still needs indexing and optimization before queries.
    pub fn build(self) -> StyleSheet {
        debug!("built style sheet with {} rule nodes", self.tree.len());
        StyleSheet::from_parts(
            self.tree,
            self.keyframes,
            self.decorator_map,
            self.spritesheets,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use css_properties::{Property, PropertyId, Unit};

    fn colour(value: &str) -> PropertyDictionary {
        [(PropertyId::new("color"), Property::new(value, Unit::Keyword))]
            .into_iter()
            .collect()
    }

    #[test]
    fn selector_lists_share_one_declaration_order() {
        let mut builder = StyleSheetBuilder::new();
        builder
            .add_rule("h1, h2", colour("red"), None)
            .add_rule("p", colour("blue"), None);
        let sheet = builder.build();
        let orders: Vec<u32> = sheet
            .rule_tree()
            .styled_nodes()
            .map(|(_, rule)| rule.source_order())
            .collect();
        assert_eq!(orders, vec![0, 0, 1]);
    }

    #[test]
    fn rule_source_is_stamped_on_every_record() {
        let source = Arc::new(PropertySource::new("main.rcss", 4, "div"));
        let mut builder = StyleSheetBuilder::new();
        builder.add_rule("div", colour("red"), Some(Arc::clone(&source)));
        let sheet = builder.build();
        let stamped = sheet
            .rule_tree()
            .styled_nodes()
            .flat_map(|(_, rule)| rule.properties().iter())
            .all(|(_, property)| {
                property
                    .source
                    .as_ref()
                    .is_some_and(|declared| Arc::ptr_eq(declared, &source))
            });
        assert!(stamped);
    }

    #[test]
    fn unusable_selectors_are_skipped() {
        let mut builder = StyleSheetBuilder::new();
        builder.add_rule(" , ", colour("red"), None);
        assert_eq!(builder.build().node_count(), 1);
    }

    #[test]
    fn empty_rule_paths_are_skipped() {
        let mut builder = StyleSheetBuilder::new();
        builder
            .add_rule_path(&[], &colour("red"))
            .add_rule("p", colour("blue"), None);
        let sheet = builder.build();
        assert_eq!(sheet.node_count(), 2);
        assert_eq!(sheet.rule_tree().styled_nodes().count(), 1);
        let orders: Vec<u32> = sheet
            .rule_tree()
            .styled_nodes()
            .map(|(_, rule)| rule.source_order())
            .collect();
        assert_eq!(orders, vec![0]);
    }
}

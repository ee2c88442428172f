//! Style cascade: rule trees, the rule index and compiled element definitions.
//!
//! A [`StyleSheet`] owns a tree of [`RuleNode`]s, one per selector segment, with
//! the properties each rule block declared. Resolving an element probes a
//! [`RuleIndex`] bucket for its tag and id, verifies each candidate's full
//! selector path against the element's ancestors, orders the matches by
//! specificity then declaration order, and resolves each property into an
//! [`ElementDefinition`]. Definitions are cached by the exact matched node
//! sequence, so elements styled by the same rules share one instance.
//!
//! # Call order
//!
//! 1. Build a sheet with [`StyleSheetBuilder`] (or [`StyleSheet::from_parts`]).
//! 2. Optionally combine it with others via [`StyleSheet::combine_style_sheet`].
//! 3. [`StyleSheet::build_node_index`] on the final sheet.
//! 4. [`StyleSheet::optimize_node_properties`] once.
//! 5. Query with [`StyleSheet::get_element_definition`].
//!
//! Combined and cloned sheets start unindexed; querying one before step 3
//! silently returns nothing.

#![forbid(unsafe_code)]

mod builder;
mod definition;
mod index;
mod instancing;
mod priority;
mod rule_tree;
mod style_sheet;
mod tables;

pub use builder::StyleSheetBuilder;
pub use definition::{DefinitionCache, DefinitionKey, ElementDefinition};
pub use index::{RuleIndex, node_hash};
pub use indextree::NodeId;
pub use instancing::{Instancer, split_declarations};
pub use priority::{CascadePriority, compare_priority};
pub use rule_tree::{RuleNode, RuleTree};
pub use style_sheet::StyleSheet;
pub use tables::{
    DecoratorSpecification, DecoratorSpecificationMap, KeyframeBlock, Keyframes, KeyframesMap,
    Rectangle, Sprite, Spritesheet, SpritesheetList,
};

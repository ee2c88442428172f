//! Selector segments, combinators, specificity and element matching.
//!
//! A selector chain such as `div.panel > p:hover` is stored as a sequence of
//! [`SelectorSegment`]s, one per compound selector. Each segment carries the
//! [`Combinator`] relating it to the segment on its left. Matching runs
//! right-to-left against an element tree exposed through [`ElementAdapter`].

#![forbid(unsafe_code)]

mod matcher;
mod parser;
mod specificity;

use smallvec::SmallVec;
use std::vec::IntoIter;

pub use matcher::{matches_complex, matches_path, matches_segment, related_elements};
pub use parser::{parse_complex_selector, parse_selector_list};
pub use specificity::{Specificity, specificity_of_complex, specificity_of_segment};

/// Read access to an element tree, as needed by the matcher.
pub trait ElementAdapter {
    type Handle: Copy + Eq;

    fn parent(&self, element: Self::Handle) -> Option<Self::Handle>;

    /// Nearest preceding sibling that is an element (text nodes skipped).
    fn previous_sibling_element(&self, element: Self::Handle) -> Option<Self::Handle>;

    /// ASCII lowercase tag.
    fn tag_name(&self, element: Self::Handle) -> &str;

    /// `None` when the element has no id or an empty one.
    fn element_id(&self, element: Self::Handle) -> Option<&str>;

    fn has_class(&self, element: Self::Handle, class: &str) -> bool;

    /// Whether a dynamic state such as `hover` or `focus` is active.
    fn has_pseudo_class(&self, element: Self::Handle, pseudo_class: &str) -> bool;
}

/// Relation between a segment and the segment on its left.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Combinator {
    /// `a b`
    #[default]
    Descendant,
    /// `a > b`
    Child,
    /// `a + b`
    AdjacentSibling,
    /// `a ~ b`
    GeneralSibling,
}

/// One compound selector plus its combinator to the segment on its left.
///
/// Empty `tag` or `id` leaves that component unconstrained. Class and
/// pseudo-class sets are kept sorted and free of duplicates, so two segments
/// written in different orders compare equal.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct SelectorSegment {
    pub tag: String,
    pub id: String,
    pub classes: SmallVec<String, 2>,
    pub pseudo_classes: SmallVec<String, 2>,
    pub combinator: Combinator,
}

impl SelectorSegment {
    /// Segment constrained only by tag.
    #[inline]
    pub fn with_tag(tag: &str) -> Self {
        Self {
            tag: tag.to_ascii_lowercase(),
            ..Self::default()
        }
    }

    /// Segment constrained only by id.
    #[inline]
    pub fn with_id(id: &str) -> Self {
        Self {
            id: id.to_owned(),
            ..Self::default()
        }
    }

    /// True if the segment places no constraint on an element.
    #[inline]
    pub fn is_universal(&self) -> bool {
        self.tag.is_empty()
            && self.id.is_empty()
            && self.classes.is_empty()
            && self.pseudo_classes.is_empty()
    }

    /// Add a class, keeping the set sorted.
    #[inline]
    pub fn add_class(&mut self, class: &str) {
        insert_sorted(&mut self.classes, class);
    }

    /// Add a pseudo-class, keeping the set sorted.
    #[inline]
    pub fn add_pseudo_class(&mut self, pseudo_class: &str) {
        insert_sorted(&mut self.pseudo_classes, pseudo_class);
    }

    /// Builder form of [`SelectorSegment::add_class`].
    #[inline]
    #[must_use]
    pub fn class(mut self, class: &str) -> Self {
        self.add_class(class);
        self
    }

    /// Builder form of [`SelectorSegment::add_pseudo_class`].
    #[inline]
    #[must_use]
    pub fn pseudo_class(mut self, pseudo_class: &str) -> Self {
        self.add_pseudo_class(pseudo_class);
        self
    }

    /// Builder form setting the combinator to the left neighbour.
    #[inline]
    #[must_use]
    pub fn combinator(mut self, combinator: Combinator) -> Self {
        self.combinator = combinator;
        self
    }
}

/// Insert `value` into a sorted set unless already present.
fn insert_sorted(set: &mut SmallVec<String, 2>, value: &str) {
    if let Err(position) = set.binary_search_by(|probe| probe.as_str().cmp(value)) {
        set.insert(position, value.to_owned());
    }
}

/// A complex selector: segments from left to right.
#[derive(Clone, Debug, PartialEq, Eq, Default, Hash)]
pub struct ComplexSelector {
    pub segments: Vec<SelectorSegment>,
}

impl ComplexSelector {
    /// The rightmost (subject) segment, if any.
    #[inline]
    pub fn subject(&self) -> Option<&SelectorSegment> {
        self.segments.last()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }
}

/// A comma separated selector group.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub struct SelectorList {
    pub selectors: Vec<ComplexSelector>,
}

impl IntoIterator for SelectorList {
    type Item = ComplexSelector;
    type IntoIter = IntoIter<ComplexSelector>;

    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        self.selectors.into_iter()
    }
}

//! Selector matching engine.
//!
//! Matching is right-to-left: the subject segment is tested against the element,
//! then each combinator walks to the related elements that may satisfy the next
//! segment on the left. Descendant and general-sibling relations backtrack, so a
//! failed deeper match retries with the next ancestor or sibling.

use crate::{Combinator, ComplexSelector, ElementAdapter, SelectorSegment};
use core::iter::successors;
use smallvec::SmallVec;

/// Match a compound segment against a single element.
pub fn matches_segment<A: ElementAdapter>(
    adapter: &A,
    element: A::Handle,
    segment: &SelectorSegment,
) -> bool {
    if !segment.tag.is_empty() && adapter.tag_name(element) != segment.tag.as_str() {
        return false;
    }
    if !segment.id.is_empty()
        && adapter
            .element_id(element)
            .is_none_or(|value| value != segment.id.as_str())
    {
        return false;
    }
    if !segment
        .classes
        .iter()
        .all(|class| adapter.has_class(element, class.as_str()))
    {
        return false;
    }
    segment
        .pseudo_classes
        .iter()
        .all(|pseudo_class| adapter.has_pseudo_class(element, pseudo_class.as_str()))
}

/// Elements reachable from `element` through `combinator`, nearest first.
///
/// Child and adjacent-sibling yield at most one element; descendant walks every
/// ancestor and general-sibling every preceding sibling.
pub fn related_elements<A: ElementAdapter>(
    adapter: &A,
    combinator: Combinator,
    element: A::Handle,
) -> impl Iterator<Item = A::Handle> {
    let walks_up = matches!(combinator, Combinator::Descendant | Combinator::Child);
    let repeats = matches!(
        combinator,
        Combinator::Descendant | Combinator::GeneralSibling
    );
    let step = move |current: A::Handle| {
        if walks_up {
            adapter.parent(current)
        } else {
            adapter.previous_sibling_element(current)
        }
    };
    successors(step(element), move |&current| {
        if repeats { step(current) } else { None }
    })
}

/// Match a segment path given subject-first (rightmost segment at index 0).
///
/// Each segment's combinator relates it to the next entry of `path`. An empty
/// path matches every element.
pub fn matches_path<A: ElementAdapter>(
    adapter: &A,
    element: A::Handle,
    path: &[&SelectorSegment],
) -> bool {
    let Some((segment, rest)) = path.split_first() else {
        return true;
    };
    if !matches_segment(adapter, element, segment) {
        return false;
    }
    if rest.is_empty() {
        return true;
    }
    related_elements(adapter, segment.combinator, element)
        .any(|candidate| matches_path(adapter, candidate, rest))
}

/// Match a complex selector against an element.
pub fn matches_complex<A: ElementAdapter>(
    adapter: &A,
    element: A::Handle,
    sel: &ComplexSelector,
) -> bool {
    if sel.is_empty() {
        return false;
    }
    let path: SmallVec<&SelectorSegment, 8> = sel.segments.iter().rev().collect();
    matches_path(adapter, element, &path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parse_complex_selector;

    /// Flat test tree: index = handle.
    struct Tree {
        nodes: Vec<TestNode>,
    }

    struct TestNode {
        tag: &'static str,
        id: Option<&'static str>,
        classes: &'static [&'static str],
        hover: bool,
        parent: Option<usize>,
        previous: Option<usize>,
    }

    impl ElementAdapter for Tree {
        type Handle = usize;

        fn parent(&self, element: usize) -> Option<usize> {
            self.nodes.get(element).and_then(|node| node.parent)
        }

        fn previous_sibling_element(&self, element: usize) -> Option<usize> {
            self.nodes.get(element).and_then(|node| node.previous)
        }

        fn tag_name(&self, element: usize) -> &str {
            self.nodes.get(element).map_or("", |node| node.tag)
        }

        fn element_id(&self, element: usize) -> Option<&str> {
            self.nodes.get(element).and_then(|node| node.id)
        }

        fn has_class(&self, element: usize, class: &str) -> bool {
            self.nodes
                .get(element)
                .is_some_and(|node| node.classes.iter().any(|name| *name == class))
        }

        fn has_pseudo_class(&self, element: usize, pseudo_class: &str) -> bool {
            pseudo_class == "hover" && self.nodes.get(element).is_some_and(|node| node.hover)
        }
    }

    /// `<body><div.panel><span/><p#intro.lead:hover/></div></body>`
    fn sample() -> Tree {
        let node = |tag, parent, previous| TestNode {
            tag,
            id: None,
            classes: &[],
            hover: false,
            parent,
            previous,
        };
        let mut nodes = vec![
            node("body", None, None),
            node("div", Some(0), None),
            node("span", Some(1), None),
            node("p", Some(1), Some(2)),
        ];
        if let Some(div) = nodes.get_mut(1) {
            div.classes = &["panel"];
        }
        if let Some(para) = nodes.get_mut(3) {
            para.id = Some("intro");
            para.classes = &["lead"];
            para.hover = true;
        }
        Tree { nodes }
    }

    #[test]
    fn compound_requires_every_component() {
        let tree = sample();
        assert!(matches_complex(&tree, 3, &parse_complex_selector("p#intro.lead:hover")));
        assert!(!matches_complex(&tree, 3, &parse_complex_selector("p.lead.missing")));
        assert!(!matches_complex(&tree, 3, &parse_complex_selector("p:focus")));
    }

    #[test]
    fn descendant_and_child_combinators() {
        let tree = sample();
        assert!(matches_complex(&tree, 3, &parse_complex_selector("body p")));
        assert!(matches_complex(&tree, 3, &parse_complex_selector(".panel > p")));
        assert!(!matches_complex(&tree, 3, &parse_complex_selector("body > p")));
    }

    #[test]
    fn sibling_combinators() {
        let tree = sample();
        assert!(matches_complex(&tree, 3, &parse_complex_selector("span + p")));
        assert!(matches_complex(&tree, 3, &parse_complex_selector("span ~ #intro")));
        assert!(!matches_complex(&tree, 2, &parse_complex_selector("p ~ span")));
    }

    #[test]
    fn ancestor_chain_checks_every_link() {
        let tree = sample();
        assert!(matches_complex(&tree, 3, &parse_complex_selector("body > div p")));
        assert!(!matches_complex(&tree, 3, &parse_complex_selector("div > div p")));
    }
}

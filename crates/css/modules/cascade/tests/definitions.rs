#![cfg(test)]

mod common;

use common::{TestDom, init_logging, keyword, keywords, prepare};
use css_cascade::{StyleSheet, StyleSheetBuilder};
use log::info;
use std::error::Error;
use std::sync::Arc;

/// Build and prepare a sheet from `(selector, declarations)` blocks.
fn sheet(rules: &[(&str, &[(&str, &str)])]) -> StyleSheet {
    let mut builder = StyleSheetBuilder::new();
    for (selector, declarations) in rules {
        builder.add_rule(selector, keywords(declarations), None);
    }
    let mut built = builder.build();
    prepare(&mut built);
    built
}

#[test]
fn logging_setup_tolerates_repeated_calls() {
    init_logging();
    init_logging();
    info!("logging initialised twice");
}

#[test]
fn higher_specificity_wins_regardless_of_source_order() -> Result<(), Box<dyn Error>> {
    init_logging();
    for rules in [
        [("div", &[("color", "red")][..]), ("#main", &[("color", "blue")][..])],
        [("#main", &[("color", "blue")][..]), ("div", &[("color", "red")][..])],
    ] {
        let styles = sheet(&rules);
        let mut dom = TestDom::new();
        let element = dom.element(None, "div#main");
        let definition = styles
            .get_element_definition(&dom, element)
            .ok_or("div#main should match")?;
        assert_eq!(keyword(&definition, "color").as_deref(), Some("blue"));
    }
    Ok(())
}

#[test]
fn merge_follows_ascending_specificity() -> Result<(), Box<dyn Error>> {
    // Specificities (0,0,1), (0,4,1) and (0,2,1) declared in that order.
    let styles = sheet(&[
        ("p", &[("color", "one"), ("width", "one"), ("height", "one")]),
        ("p.a.b.c.d", &[("color", "five")]),
        ("p.a.b", &[("color", "three"), ("width", "three")]),
    ]);
    let mut dom = TestDom::new();
    let element = dom.element(None, "p.a.b.c.d");
    let definition = styles
        .get_element_definition(&dom, element)
        .ok_or("paragraph should match")?;
    assert_eq!(keyword(&definition, "color").as_deref(), Some("five"));
    assert_eq!(keyword(&definition, "width").as_deref(), Some("three"));
    assert_eq!(keyword(&definition, "height").as_deref(), Some("one"));
    Ok(())
}

#[test]
fn later_declaration_breaks_specificity_ties() -> Result<(), Box<dyn Error>> {
    let styles = sheet(&[(".warn", &[("color", "orange")]), (".alert", &[("color", "red")])]);
    let mut dom = TestDom::new();
    let element = dom.element(None, "span.alert.warn");
    let definition = styles
        .get_element_definition(&dom, element)
        .ok_or("span should match")?;
    assert_eq!(keyword(&definition, "color").as_deref(), Some("red"));
    Ok(())
}

#[test]
fn redeclaring_a_selector_keeps_earlier_ties_per_property() -> Result<(), Box<dyn Error>> {
    // `.a` comes back after `.b` with an unrelated property only.
    let styles = sheet(&[
        (".a", &[("color", "red")]),
        (".b", &[("color", "blue")]),
        (".a", &[("width", "1px")]),
    ]);
    let mut dom = TestDom::new();
    let element = dom.element(None, "span.a.b");
    let definition = styles
        .get_element_definition(&dom, element)
        .ok_or("span should match")?;
    assert_eq!(keyword(&definition, "color").as_deref(), Some("blue"));
    assert_eq!(keyword(&definition, "width").as_deref(), Some("1px"));
    Ok(())
}

#[test]
fn identical_match_sets_share_one_definition() -> Result<(), Box<dyn Error>> {
    let styles = sheet(&[("li", &[("color", "grey")]), (".odd", &[("color", "black")])]);
    let mut dom = TestDom::new();
    let list = dom.element(None, "ul");
    let first = dom.element(Some(list), "li.odd");
    let second = dom.element(Some(list), "li");
    let third = dom.element(Some(list), "li.odd");

    let first_definition = styles.get_element_definition(&dom, first).ok_or("first")?;
    let second_definition = styles.get_element_definition(&dom, second).ok_or("second")?;
    let third_definition = styles.get_element_definition(&dom, third).ok_or("third")?;

    assert!(Arc::ptr_eq(&first_definition, &third_definition));
    assert!(!Arc::ptr_eq(&first_definition, &second_definition));
    assert_eq!(styles.cached_definition_count(), 2);
    Ok(())
}

#[test]
fn full_selector_chain_is_verified() -> Result<(), Box<dyn Error>> {
    let styles = sheet(&[
        ("nav > a", &[("color", "white")]),
        ("footer a", &[("color", "grey")]),
        ("h1 + p", &[("margin", "0")]),
    ]);
    let mut dom = TestDom::new();
    let body = dom.element(None, "body");
    let nav = dom.element(Some(body), "nav");
    let nested = dom.element(Some(nav), "span");
    let deep_link = dom.element(Some(nested), "a");
    let direct_link = dom.element(Some(nav), "a");
    let heading = dom.element(Some(body), "h1");
    let paragraph = dom.element(Some(body), "p");

    assert!(styles.get_element_definition(&dom, deep_link).is_none());
    let direct = styles
        .get_element_definition(&dom, direct_link)
        .ok_or("nav > a should match")?;
    assert_eq!(keyword(&direct, "color").as_deref(), Some("white"));
    assert!(styles.get_element_definition(&dom, heading).is_none());
    let adjacent = styles
        .get_element_definition(&dom, paragraph)
        .ok_or("h1 + p should match")?;
    assert_eq!(keyword(&adjacent, "margin").as_deref(), Some("0"));
    Ok(())
}

#[test]
fn pseudo_class_state_changes_the_definition() -> Result<(), Box<dyn Error>> {
    let styles = sheet(&[
        ("button", &[("color", "black")]),
        ("button:hover", &[("color", "blue")]),
    ]);
    let mut dom = TestDom::new();
    let idle = dom.element(None, "button");
    let hovered = dom.element(None, "button:hover");
    let idle_definition = styles.get_element_definition(&dom, idle).ok_or("idle")?;
    let hovered_definition = styles.get_element_definition(&dom, hovered).ok_or("hovered")?;
    assert_eq!(keyword(&idle_definition, "color").as_deref(), Some("black"));
    assert_eq!(keyword(&hovered_definition, "color").as_deref(), Some("blue"));
    Ok(())
}

#[test]
fn universal_rules_reach_every_element() -> Result<(), Box<dyn Error>> {
    let styles = sheet(&[("*", &[("box-sizing", "border-box")])]);
    let mut dom = TestDom::new();
    let element = dom.element(None, "section#content");
    let definition = styles
        .get_element_definition(&dom, element)
        .ok_or("universal rule should match")?;
    assert_eq!(keyword(&definition, "box-sizing").as_deref(), Some("border-box"));
    Ok(())
}

#[test]
fn unmatched_element_has_no_definition() {
    let styles = sheet(&[("div", &[("color", "red")])]);
    let mut dom = TestDom::new();
    let element = dom.element(None, "span");
    assert!(styles.get_element_definition(&dom, element).is_none());
    assert_eq!(styles.cached_definition_count(), 0);
}

#[test]
fn unindexed_sheet_matches_nothing() {
    let mut builder = StyleSheetBuilder::new();
    builder.add_rule("div", keywords(&[("color", "red")]), None);
    let styles = builder.build();
    let mut dom = TestDom::new();
    let element = dom.element(None, "div");
    assert!(styles.get_element_definition(&dom, element).is_none());
}

#[test]
fn reindexing_drops_cached_definitions() -> Result<(), Box<dyn Error>> {
    let mut styles = sheet(&[("div", &[("color", "red")])]);
    let mut dom = TestDom::new();
    let element = dom.element(None, "div");
    let before = styles.get_element_definition(&dom, element).ok_or("before")?;
    styles.build_node_index();
    assert_eq!(styles.cached_definition_count(), 0);
    let after = styles.get_element_definition(&dom, element).ok_or("after")?;
    assert!(!Arc::ptr_eq(&before, &after));
    assert_eq!(before, after);
    Ok(())
}

#[cfg(feature = "parallel")]
#[test]
fn batch_queries_line_up_with_inputs() -> Result<(), Box<dyn Error>> {
    let styles = sheet(&[("p", &[("color", "red")]), (".note", &[("color", "green")])]);
    let mut dom = TestDom::new();
    let root = dom.element(None, "body");
    let mut elements = Vec::new();
    for position in 0..64 {
        let markup = match position % 3 {
            0 => "p",
            1 => "p.note",
            _ => "span",
        };
        elements.push(dom.element(Some(root), markup));
    }
    let resolved = styles.get_element_definitions(&dom, &elements);
    assert_eq!(resolved.len(), elements.len());
    for (position, definition) in resolved.iter().enumerate() {
        let expected = match position % 3 {
            0 => Some("red"),
            1 => Some("green"),
            _ => None,
        };
        let colour = definition.as_ref().and_then(|found| keyword(found, "color"));
        assert_eq!(colour.as_deref(), expected);
    }
    assert_eq!(styles.cached_definition_count(), 2);
    Ok(())
}

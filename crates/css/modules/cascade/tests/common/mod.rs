//! Shared fixtures: a flat element tree and a recording instancer.

#![allow(dead_code, reason = "each test binary uses a different subset")]

use anyhow::{Result, bail};
use core::sync::atomic::{AtomicUsize, Ordering};
use css_cascade::{ElementDefinition, Instancer, StyleSheet};
use css_properties::{Property, PropertyDictionary, PropertyId, PropertySource, Unit};
use css_selectors::{ElementAdapter, parse_complex_selector};
use css_values::{Decorator, FontEffect};
use log::debug;
use std::sync::Arc;

/// Initialise logging once per test binary.
pub fn init_logging() {
    if let Err(error) = env_logger::builder().is_test(true).try_init() {
        debug!("logger already initialised: {error}");
    }
}

struct TestElement {
    tag: String,
    id: Option<String>,
    classes: Vec<String>,
    pseudo_classes: Vec<String>,
    parent: Option<usize>,
    previous: Option<usize>,
}

/// Elements addressed by insertion index.
#[derive(Default)]
pub struct TestDom {
    elements: Vec<TestElement>,
}

impl TestDom {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an element described in selector form, e.g. `div#main.panel:hover`,
    /// as the last child of `parent`.
    pub fn element(&mut self, parent: Option<usize>, markup: &str) -> usize {
        let described = parse_complex_selector(markup);
        let segment = described.subject().cloned().unwrap_or_default();
        let previous = self
            .elements
            .iter()
            .rposition(|element| element.parent == parent && parent.is_some());
        self.elements.push(TestElement {
            tag: segment.tag,
            id: (!segment.id.is_empty()).then_some(segment.id),
            classes: segment.classes.into_iter().collect(),
            pseudo_classes: segment.pseudo_classes.into_iter().collect(),
            parent,
            previous,
        });
        self.elements.len() - 1
    }
}

impl ElementAdapter for TestDom {
    type Handle = usize;

    fn parent(&self, element: usize) -> Option<usize> {
        self.elements.get(element).and_then(|node| node.parent)
    }

    fn previous_sibling_element(&self, element: usize) -> Option<usize> {
        self.elements.get(element).and_then(|node| node.previous)
    }

    fn tag_name(&self, element: usize) -> &str {
        self.elements.get(element).map_or("", |node| node.tag.as_str())
    }

    fn element_id(&self, element: usize) -> Option<&str> {
        self.elements.get(element).and_then(|node| node.id.as_deref())
    }

    fn has_class(&self, element: usize, class: &str) -> bool {
        self.elements
            .get(element)
            .is_some_and(|node| node.classes.iter().any(|name| name == class))
    }

    fn has_pseudo_class(&self, element: usize, pseudo_class: &str) -> bool {
        self.elements
            .get(element)
            .is_some_and(|node| node.pseudo_classes.iter().any(|name| name == pseudo_class))
    }
}

/// Handle produced by [`TestInstancer`], named after its declaration.
#[derive(Debug)]
pub struct Instanced(pub String);

impl Decorator for Instanced {
    fn type_name(&self) -> &str {
        &self.0
    }
}

impl FontEffect for Instanced {
    fn type_name(&self) -> &str {
        &self.0
    }
}

/// Instances anything except declarations starting with `broken`.
#[derive(Default)]
pub struct TestInstancer {
    pub calls: AtomicUsize,
}

impl TestInstancer {
    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::Relaxed)
    }

    fn check(&self, declaration: &str) -> Result<Arc<Instanced>> {
        self.calls.fetch_add(1, Ordering::Relaxed);
        if declaration.starts_with("broken") {
            bail!("unknown type in '{declaration}'");
        }
        Ok(Arc::new(Instanced(declaration.to_owned())))
    }
}

impl Instancer for TestInstancer {
    fn instance_decorator(
        &self,
        declaration: &str,
        _source: Option<&PropertySource>,
    ) -> Result<Arc<dyn Decorator>> {
        Ok(self.check(declaration)?)
    }

    fn instance_font_effect(
        &self,
        declaration: &str,
        _source: Option<&PropertySource>,
    ) -> Result<Arc<dyn FontEffect>> {
        Ok(self.check(declaration)?)
    }
}

/// Keyword declarations, e.g. `&[("color", "red")]`.
pub fn keywords(pairs: &[(&str, &str)]) -> PropertyDictionary {
    pairs
        .iter()
        .map(|&(name, value)| (PropertyId::new(name), Property::new(value, Unit::Keyword)))
        .collect()
}

/// Index and optimize a sheet so it can be queried.
pub fn prepare(sheet: &mut StyleSheet) {
    sheet.build_node_index();
    sheet.optimize_node_properties(&TestInstancer::default());
}

/// Keyword value of `name` in a compiled definition.
pub fn keyword(definition: &ElementDefinition, name: &str) -> Option<String> {
    definition
        .get_property(PropertyId::new(name))
        .and_then(|property| property.value.as_str())
        .map(str::to_owned)
}

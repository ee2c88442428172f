//! A single declared property value plus its provenance.

use css_values::Variant;
use std::sync::Arc;

/// Unit a declared value was written in.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Unit {
    #[default]
    Unknown,
    Keyword,
    String,
    Number,
    Px,
    Percent,
    Em,
    Rem,
    Deg,
    Rad,
    Colour,
    Transition,
    Animation,
    Decorator,
    FontEffect,
}

/// Where a declaration came from, for diagnostics.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct PropertySource {
    /// Path of the rule file.
    pub path: String,
    /// 1-based line of the declaration block.
    pub line_number: u32,
    /// Selector text of the rule, e.g. `div.panel > p`.
    pub rule_name: String,
}

impl PropertySource {
    #[inline]
    pub fn new(path: impl Into<String>, line_number: u32, rule_name: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            line_number,
            rule_name: rule_name.into(),
        }
    }
}

/// A property record: the value, its unit and where it was declared.
///
/// Provenance is attached by the producer and replaced wholesale whenever the
/// record is set again.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Property {
    pub value: Variant,
    pub unit: Unit,
    pub source: Option<Arc<PropertySource>>,
}

impl Property {
    #[inline]
    pub fn new(value: impl Into<Variant>, unit: Unit) -> Self {
        Self {
            value: value.into(),
            unit,
            source: None,
        }
    }

    /// Attach a declaration source.
    #[inline]
    #[must_use]
    pub fn with_source(mut self, source: Arc<PropertySource>) -> Self {
        self.source = Some(source);
        self
    }

    /// True if the value is still in raw string form.
    #[inline]
    pub const fn is_raw_string(&self) -> bool {
        matches!(self.value, Variant::String(_))
    }
}

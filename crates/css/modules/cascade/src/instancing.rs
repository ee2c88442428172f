//! Seam to the decorator and font-effect subsystems.

use anyhow::Result;
use css_properties::PropertySource;
use css_values::{Decorator, FontEffect};
use smallvec::SmallVec;
use std::sync::Arc;

/// Turns one declaration (e.g. `image(icons.png)`) into a runtime handle.
///
/// Implemented by the embedder. Errors are logged by the style sheet and the
/// whole property resolves to an empty list.
pub trait Instancer: Send + Sync {
    /// # Errors
    /// Returns an error if the declaration is malformed or names an unknown type.
    fn instance_decorator(
        &self,
        declaration: &str,
        source: Option<&PropertySource>,
    ) -> Result<Arc<dyn Decorator>>;

    /// # Errors
    /// Returns an error if the declaration is malformed or names an unknown type.
    fn instance_font_effect(
        &self,
        declaration: &str,
        source: Option<&PropertySource>,
    ) -> Result<Arc<dyn FontEffect>>;
}

/// Split a list value on commas outside parentheses. Entries are trimmed and
/// empty entries dropped.
pub fn split_declarations(value: &str) -> SmallVec<&str, 4> {
    let mut entries = SmallVec::new();
    let mut depth: u32 = 0;
    let mut start = 0;
    for (position, byte) in value.bytes().enumerate() {
        match byte {
            b'(' => depth = depth.saturating_add(1),
            b')' => depth = depth.saturating_sub(1),
            b',' if depth == 0 => {
                push_trimmed(&mut entries, value.get(start..position));
                start = position.saturating_add(1);
            }
            _ => {}
        }
    }
    push_trimmed(&mut entries, value.get(start..));
    entries
}

fn push_trimmed<'value>(entries: &mut SmallVec<&'value str, 4>, entry: Option<&'value str>) {
    if let Some(trimmed) = entry.map(str::trim)
        && !trimmed.is_empty()
    {
        entries.push(trimmed);
    }
}

/// True for values that mean "no list at all".
#[inline]
pub fn is_none_value(value: &str) -> bool {
    let trimmed = value.trim();
    trimmed.is_empty() || trimmed.eq_ignore_ascii_case("none")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn commas_inside_parentheses_do_not_split() {
        let entries = split_declarations("gradient(vertical, #fff, #000), image( a.png ) ,shadow");
        assert_eq!(
            entries.as_slice(),
            ["gradient(vertical, #fff, #000)", "image( a.png )", "shadow"]
        );
    }

    #[test]
    fn empty_entries_are_dropped() {
        assert!(split_declarations(" , ,").is_empty());
        assert_eq!(split_declarations("tiled,").len(), 1);
    }

    #[test]
    fn none_is_case_insensitive() {
        assert!(is_none_value(" None "));
        assert!(is_none_value(""));
        assert!(!is_none_value("image(none.png)"));
    }
}

//! Ordering of matched rule nodes before their properties are merged.

use core::cmp::Ordering;
use css_selectors::Specificity;

/// Priority tuple used to order matched rule nodes in the cascade.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CascadePriority {
    /// Summed specificity of the node's selector path.
    pub specificity: Specificity,
    /// Declaration order, increasing with appearance (and with later combined sheets).
    pub source_order: u32,
}

impl CascadePriority {
    #[inline]
    pub const fn new(specificity: Specificity, source_order: u32) -> Self {
        Self {
            specificity,
            source_order,
        }
    }
}

/// Compare two priorities. `Ordering::Greater` means `left` wins over `right`,
/// so sorting ascending places the winning node last.
pub fn compare_priority(left: &CascadePriority, right: &CascadePriority) -> Ordering {
    // Specificity: higher wins
    if left.specificity != right.specificity {
        return left.specificity.cmp(&right.specificity);
    }

    // Source order: later wins
    left.source_order.cmp(&right.source_order)
}

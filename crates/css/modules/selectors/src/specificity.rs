//! Selector specificity calculation.

use crate::{ComplexSelector, SelectorSegment};
use core::ops::Add;

/// Specificity triple (ids, classes and pseudo-classes, tags).
///
/// Ordering is lexicographic, so one id outweighs any number of classes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Default, Hash)]
pub struct Specificity(pub u16, pub u16, pub u16);

impl Add for Specificity {
    type Output = Self;

    #[inline]
    fn add(self, rhs: Self) -> Self {
        Self(
            self.0.saturating_add(rhs.0),
            self.1.saturating_add(rhs.1),
            self.2.saturating_add(rhs.2),
        )
    }
}

/// Compute the specificity of a single segment.
pub fn specificity_of_segment(segment: &SelectorSegment) -> Specificity {
    let id_count = u16::from(!segment.id.is_empty());
    let class_count = segment
        .classes
        .len()
        .saturating_add(segment.pseudo_classes.len());
    let type_count = u16::from(!segment.tag.is_empty());
    Specificity(
        id_count,
        u16::try_from(class_count).unwrap_or(u16::MAX),
        type_count,
    )
}

/// Compute the specificity of a complex selector (sum of its segments).
pub fn specificity_of_complex(sel: &ComplexSelector) -> Specificity {
    sel.segments
        .iter()
        .map(specificity_of_segment)
        .fold(Specificity::default(), Add::add)
}

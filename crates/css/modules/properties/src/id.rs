//! Interned property identifiers.

use core::fmt;
use lasso::{Spur, ThreadedRodeo};
use once_cell::sync::Lazy;

/// Process-wide property name interner.
static PROPERTY_NAMES: Lazy<ThreadedRodeo> = Lazy::new(ThreadedRodeo::default);

/// Names of properties the style engine treats specially.
pub mod names {
    /// Decorator list, instanced eagerly by the optimization pass.
    pub const DECORATOR: &str = "decorator";
    /// Font-effect list, instanced eagerly by the optimization pass.
    pub const FONT_EFFECT: &str = "font-effect";
}

/// Identifier of a property name.
///
/// Ids are interned: creating an id for the same name twice yields equal ids,
/// so comparisons and hashing never touch the string.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PropertyId(Spur);

impl PropertyId {
    /// Intern `name` and return its id.
    #[inline]
    pub fn new(name: &str) -> Self {
        Self(PROPERTY_NAMES.get_or_intern(name))
    }

    /// Id of `name` if it was interned before.
    #[inline]
    pub fn lookup(name: &str) -> Option<Self> {
        PROPERTY_NAMES.get(name).map(Self)
    }

    /// The property name this id was created from.
    #[inline]
    pub fn name(self) -> &'static str {
        Lazy::force(&PROPERTY_NAMES).resolve(&self.0)
    }

    #[inline]
    pub fn decorator() -> Self {
        Self::new(names::DECORATOR)
    }

    #[inline]
    pub fn font_effect() -> Self {
        Self::new(names::FONT_EFFECT)
    }
}

impl fmt::Debug for PropertyId {
    #[inline]
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.debug_tuple("PropertyId").field(&self.name()).finish()
    }
}

impl fmt::Display for PropertyId {
    #[inline]
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(self.name())
    }
}

impl From<&str> for PropertyId {
    #[inline]
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

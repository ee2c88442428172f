//! List-valued property kinds: transitions, animations and instanced effect handles.
//!
//! Decorators and font effects are produced by an external instancing backend. The
//! style engine only stores the resulting handles, so both are opaque trait objects
//! here and their lists compare by identity.

use core::fmt;
use core::slice::Iter;
use std::sync::Arc;

/// An instanced decorator produced by the decorator backend.
pub trait Decorator: fmt::Debug + Send + Sync {
    /// The decorator type this instance was created from (for example `image`).
    fn type_name(&self) -> &str;
}

/// An instanced font effect produced by the font-effect backend.
pub trait FontEffect: fmt::Debug + Send + Sync {
    /// The font-effect type this instance was created from (for example `shadow`).
    fn type_name(&self) -> &str;
}

/// Shared handle to an instanced decorator list.
///
/// Two handles are equal only if they point at the same list.
#[derive(Clone, Debug, Default)]
pub struct DecoratorsPtr {
    list: Arc<Vec<Arc<dyn Decorator>>>,
}

/// Shared handle to an instanced font-effect list.
///
/// Two handles are equal only if they point at the same list.
#[derive(Clone, Debug, Default)]
pub struct FontEffectsPtr {
    list: Arc<Vec<Arc<dyn FontEffect>>>,
}

impl DecoratorsPtr {
    #[inline]
    pub fn new(decorators: Vec<Arc<dyn Decorator>>) -> Self {
        Self {
            list: Arc::new(decorators),
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.list.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.list.is_empty()
    }

    #[inline]
    pub fn iter(&self) -> Iter<'_, Arc<dyn Decorator>> {
        self.list.iter()
    }

    /// True if both handles share the same instanced list.
    #[inline]
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.list, &other.list)
    }
}

impl FontEffectsPtr {
    #[inline]
    pub fn new(effects: Vec<Arc<dyn FontEffect>>) -> Self {
        Self {
            list: Arc::new(effects),
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.list.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.list.is_empty()
    }

    #[inline]
    pub fn iter(&self) -> Iter<'_, Arc<dyn FontEffect>> {
        self.list.iter()
    }

    /// True if both handles share the same instanced list.
    #[inline]
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.list, &other.list)
    }
}

impl PartialEq for DecoratorsPtr {
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        self.ptr_eq(other)
    }
}

impl PartialEq for FontEffectsPtr {
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        self.ptr_eq(other)
    }
}

/// A single transition declaration.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Transition {
    /// Name of the transitioned property.
    pub property: String,
    /// Duration in seconds.
    pub duration: f32,
    /// Delay in seconds.
    pub delay: f32,
    /// Tweening function name, e.g. `ease-in-out`.
    pub tween: String,
    pub reverse_adjustment_factor: f32,
}

/// The value of a `transition` property.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TransitionList {
    /// `transition: none`.
    pub none: bool,
    /// `transition: all ...`; `transitions` then holds a single template entry.
    pub all: bool,
    pub transitions: Vec<Transition>,
}

/// A single animation declaration referencing a keyframes set by name.
#[derive(Clone, Debug, PartialEq)]
pub struct Animation {
    pub name: String,
    pub duration: f32,
    pub delay: f32,
    pub tween: String,
    /// Iteration count; `-1` repeats forever.
    pub num_iterations: i32,
    pub alternate: bool,
    pub paused: bool,
}

impl Default for Animation {
    #[inline]
    fn default() -> Self {
        Self {
            name: String::new(),
            duration: 0.0,
            delay: 0.0,
            tween: String::new(),
            num_iterations: 1,
            alternate: false,
            paused: false,
        }
    }
}

/// The value of an `animation` property.
pub type AnimationList = Vec<Animation>;

//! Property values held by style rules and compiled definitions.
//!
//! A [`Variant`] stores exactly one value out of a closed set of kinds: numeric
//! scalars, strings, small vector and colour types, and lists of transitions,
//! animations or instanced decorator / font-effect handles. Reading a value goes
//! through [`FromVariant`], which converts between compatible kinds and falls back
//! to a caller-supplied default when no conversion exists.

#![forbid(unsafe_code)]

mod convert;
mod effects;
mod geometry;
mod variant;

pub use convert::FromVariant;
pub use effects::{
    Animation, AnimationList, Decorator, DecoratorsPtr, FontEffect, FontEffectsPtr, Transition,
    TransitionList,
};
pub use geometry::{Colourb, Colourf, Vector2f, Vector3f, Vector4f};
pub use variant::{Variant, VariantKind};

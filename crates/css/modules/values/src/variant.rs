//! The tagged property value container.

use crate::convert::FromVariant;
use crate::effects::{AnimationList, DecoratorsPtr, FontEffectsPtr, TransitionList};
use crate::geometry::{Colourb, Colourf, Vector2f, Vector3f, Vector4f};
use core::mem::take;

/// A property value of exactly one kind.
///
/// Equality is kind-aware: values of different kinds never compare equal, even
/// when one could be converted into the other.
#[derive(Clone, Debug, Default, PartialEq)]
pub enum Variant {
    #[default]
    Empty,
    Bool(bool),
    Byte(u8),
    Char(char),
    Float(f32),
    Double(f64),
    Int(i32),
    Int64(i64),
    String(String),
    Vector2f(Vector2f),
    Vector3f(Vector3f),
    Vector4f(Vector4f),
    Colourf(Colourf),
    Colourb(Colourb),
    TransitionList(TransitionList),
    AnimationList(AnimationList),
    Decorators(DecoratorsPtr),
    FontEffects(FontEffectsPtr),
}

/// Discriminant of a [`Variant`], used for diagnostics and kind checks.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum VariantKind {
    Empty,
    Bool,
    Byte,
    Char,
    Float,
    Double,
    Int,
    Int64,
    String,
    Vector2f,
    Vector3f,
    Vector4f,
    Colourf,
    Colourb,
    TransitionList,
    AnimationList,
    Decorators,
    FontEffects,
}

impl Variant {
    /// The kind of value currently stored.
    #[inline]
    pub const fn kind(&self) -> VariantKind {
        match self {
            Self::Empty => VariantKind::Empty,
            Self::Bool(_) => VariantKind::Bool,
            Self::Byte(_) => VariantKind::Byte,
            Self::Char(_) => VariantKind::Char,
            Self::Float(_) => VariantKind::Float,
            Self::Double(_) => VariantKind::Double,
            Self::Int(_) => VariantKind::Int,
            Self::Int64(_) => VariantKind::Int64,
            Self::String(_) => VariantKind::String,
            Self::Vector2f(_) => VariantKind::Vector2f,
            Self::Vector3f(_) => VariantKind::Vector3f,
            Self::Vector4f(_) => VariantKind::Vector4f,
            Self::Colourf(_) => VariantKind::Colourf,
            Self::Colourb(_) => VariantKind::Colourb,
            Self::TransitionList(_) => VariantKind::TransitionList,
            Self::AnimationList(_) => VariantKind::AnimationList,
            Self::Decorators(_) => VariantKind::Decorators,
            Self::FontEffects(_) => VariantKind::FontEffects,
        }
    }

    #[inline]
    pub const fn is_empty(&self) -> bool {
        matches!(self, Self::Empty)
    }

    /// Reset to [`Variant::Empty`].
    #[inline]
    pub fn clear(&mut self) {
        *self = Self::Empty;
    }

    /// Move the value out, leaving [`Variant::Empty`] behind.
    #[inline]
    pub fn take(&mut self) -> Self {
        take(self)
    }

    /// Borrow the stored string, without conversion.
    #[inline]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(text) => Some(text.as_str()),
            _ => None,
        }
    }

    /// Read the value as `T`, converting if needed.
    ///
    /// Returns `None` if the variant is empty or cannot be converted.
    #[inline]
    pub fn try_get<T: FromVariant>(&self) -> Option<T> {
        T::from_variant(self)
    }

    /// Read the value as `T`, converting if needed, or return `default_value`.
    #[inline]
    pub fn get<T: FromVariant>(&self, default_value: T) -> T {
        T::from_variant(self).unwrap_or(default_value)
    }
}

macro_rules! variant_from {
    ($($source:ty => $kind:ident),* $(,)?) => {
        $(
            impl From<$source> for Variant {
                #[inline]
                fn from(value: $source) -> Self {
                    Self::$kind(value)
                }
            }
        )*
    };
}

variant_from! {
    bool => Bool,
    u8 => Byte,
    char => Char,
    f32 => Float,
    f64 => Double,
    i32 => Int,
    i64 => Int64,
    String => String,
    Vector2f => Vector2f,
    Vector3f => Vector3f,
    Vector4f => Vector4f,
    Colourf => Colourf,
    Colourb => Colourb,
    TransitionList => TransitionList,
    AnimationList => AnimationList,
    DecoratorsPtr => Decorators,
    FontEffectsPtr => FontEffects,
}

impl From<&str> for Variant {
    #[inline]
    fn from(value: &str) -> Self {
        Self::String(value.to_owned())
    }
}

//! Typed extraction from a [`Variant`] with conversion between compatible kinds.

use crate::effects::{AnimationList, DecoratorsPtr, FontEffectsPtr, TransitionList};
use crate::geometry::{Colourb, Colourf, Vector2f, Vector3f, Vector4f};
use crate::variant::Variant;

/// Types that can be read out of a [`Variant`].
pub trait FromVariant: Sized {
    /// Convert the stored value into `Self`, or `None` if no conversion applies.
    fn from_variant(value: &Variant) -> Option<Self>;
}

/// Widen any numeric kind to `f64`; strings are parsed after trimming.
fn numeric(value: &Variant) -> Option<f64> {
    match value {
        Variant::Bool(flag) => Some(if *flag { 1.0 } else { 0.0 }),
        Variant::Byte(byte) => Some(f64::from(*byte)),
        Variant::Float(float) => Some(f64::from(*float)),
        Variant::Double(double) => Some(*double),
        Variant::Int(int) => Some(f64::from(*int)),
        Variant::Int64(int) => Some(*int as f64),
        Variant::String(text) => text.trim().parse::<f64>().ok(),
        _ => None,
    }
}

/// Parse exactly `N` comma separated floats.
fn components<const N: usize>(text: &str) -> Option<[f32; N]> {
    let mut out = [0.0f32; N];
    let mut parts = text.split(',');
    for slot in &mut out {
        *slot = parts.next()?.trim().parse().ok()?;
    }
    parts.next().is_none().then_some(out)
}

macro_rules! numeric_from_variant {
    ($($target:ty),* $(,)?) => {
        $(
            impl FromVariant for $target {
                #[inline]
                fn from_variant(value: &Variant) -> Option<Self> {
                    numeric(value).map(|number| number as $target)
                }
            }
        )*
    };
}

numeric_from_variant!(f32, f64, i32, i64, u8, u16, u32, usize);

impl FromVariant for bool {
    fn from_variant(value: &Variant) -> Option<Self> {
        match value {
            Variant::Bool(flag) => Some(*flag),
            Variant::String(text) => match text.trim() {
                "true" | "1" => Some(true),
                "false" | "0" => Some(false),
                _ => None,
            },
            other => numeric(other).map(|number| number != 0.0),
        }
    }
}

impl FromVariant for char {
    fn from_variant(value: &Variant) -> Option<Self> {
        match value {
            Variant::Char(character) => Some(*character),
            Variant::Byte(byte) => Some(Self::from(*byte)),
            Variant::String(text) => {
                let mut chars = text.chars();
                let first = chars.next()?;
                chars.next().is_none().then_some(first)
            }
            _ => None,
        }
    }
}

impl FromVariant for String {
    fn from_variant(value: &Variant) -> Option<Self> {
        match value {
            Variant::String(text) => Some(text.clone()),
            Variant::Bool(flag) => Some(flag.to_string()),
            Variant::Byte(byte) => Some(byte.to_string()),
            Variant::Char(character) => Some(character.to_string()),
            Variant::Float(float) => Some(float.to_string()),
            Variant::Double(double) => Some(double.to_string()),
            Variant::Int(int) => Some(int.to_string()),
            Variant::Int64(int) => Some(int.to_string()),
            Variant::Vector2f(vector) => Some(vector.to_string()),
            Variant::Vector3f(vector) => Some(vector.to_string()),
            Variant::Vector4f(vector) => Some(vector.to_string()),
            Variant::Colourf(colour) => Some(colour.to_string()),
            Variant::Colourb(colour) => Some(colour.to_string()),
            Variant::Empty
            | Variant::TransitionList(_)
            | Variant::AnimationList(_)
            | Variant::Decorators(_)
            | Variant::FontEffects(_) => None,
        }
    }
}

impl FromVariant for Vector2f {
    fn from_variant(value: &Variant) -> Option<Self> {
        match value {
            Variant::Vector2f(vector) => Some(*vector),
            Variant::String(text) => components::<2>(text).map(|[x, y]| Self::new(x, y)),
            _ => None,
        }
    }
}

impl FromVariant for Vector3f {
    fn from_variant(value: &Variant) -> Option<Self> {
        match value {
            Variant::Vector3f(vector) => Some(*vector),
            Variant::String(text) => components::<3>(text).map(|[x, y, z]| Self::new(x, y, z)),
            _ => None,
        }
    }
}

impl FromVariant for Vector4f {
    fn from_variant(value: &Variant) -> Option<Self> {
        match value {
            Variant::Vector4f(vector) => Some(*vector),
            Variant::Colourf(colour) => Some(Self::from(*colour)),
            Variant::String(text) => {
                components::<4>(text).map(|[x, y, z, w]| Self::new(x, y, z, w))
            }
            _ => None,
        }
    }
}

impl FromVariant for Colourf {
    fn from_variant(value: &Variant) -> Option<Self> {
        match value {
            Variant::Colourf(colour) => Some(*colour),
            Variant::Colourb(colour) => Some(Self::from(*colour)),
            Variant::Vector4f(vector) => Some(Self::from(*vector)),
            Variant::String(text) => components::<4>(text)
                .map(|[red, green, blue, alpha]| Self::new(red, green, blue, alpha)),
            _ => None,
        }
    }
}

impl FromVariant for Colourb {
    fn from_variant(value: &Variant) -> Option<Self> {
        match value {
            Variant::Colourb(colour) => Some(*colour),
            Variant::Colourf(colour) => Some(Self::from(*colour)),
            Variant::String(text) => {
                let [red, green, blue, alpha] = components::<4>(text)?;
                Some(Self::new(
                    red.clamp(0.0, 255.0) as u8,
                    green.clamp(0.0, 255.0) as u8,
                    blue.clamp(0.0, 255.0) as u8,
                    alpha.clamp(0.0, 255.0) as u8,
                ))
            }
            _ => None,
        }
    }
}

impl FromVariant for TransitionList {
    #[inline]
    fn from_variant(value: &Variant) -> Option<Self> {
        match value {
            Variant::TransitionList(list) => Some(list.clone()),
            _ => None,
        }
    }
}

impl FromVariant for AnimationList {
    #[inline]
    fn from_variant(value: &Variant) -> Option<Self> {
        match value {
            Variant::AnimationList(list) => Some(list.clone()),
            _ => None,
        }
    }
}

impl FromVariant for DecoratorsPtr {
    #[inline]
    fn from_variant(value: &Variant) -> Option<Self> {
        match value {
            Variant::Decorators(list) => Some(list.clone()),
            _ => None,
        }
    }
}

impl FromVariant for FontEffectsPtr {
    #[inline]
    fn from_variant(value: &Variant) -> Option<Self> {
        match value {
            Variant::FontEffects(list) => Some(list.clone()),
            _ => None,
        }
    }
}

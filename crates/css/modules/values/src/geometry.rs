//! Small vector and colour value types.

use core::fmt;

/// Two-component float vector.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Vector2f {
    pub x: f32,
    pub y: f32,
}

/// Three-component float vector.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Vector3f {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

/// Four-component float vector.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Vector4f {
    pub x: f32,
    pub y: f32,
    pub z: f32,
    pub w: f32,
}

/// 8-bit per channel colour.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Colourb {
    pub red: u8,
    pub green: u8,
    pub blue: u8,
    pub alpha: u8,
}

/// Floating point colour with channels in `0.0..=1.0`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Colourf {
    pub red: f32,
    pub green: f32,
    pub blue: f32,
    pub alpha: f32,
}

impl Vector2f {
    #[inline]
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

impl Vector3f {
    #[inline]
    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }
}

impl Vector4f {
    #[inline]
    pub const fn new(x: f32, y: f32, z: f32, w: f32) -> Self {
        Self { x, y, z, w }
    }
}

impl Colourb {
    #[inline]
    pub const fn new(red: u8, green: u8, blue: u8, alpha: u8) -> Self {
        Self {
            red,
            green,
            blue,
            alpha,
        }
    }

    /// Opaque colour from three channels.
    #[inline]
    pub const fn rgb(red: u8, green: u8, blue: u8) -> Self {
        Self::new(red, green, blue, 255)
    }
}

impl Default for Colourb {
    /// Opaque white, matching the value a freshly declared colour property starts from.
    #[inline]
    fn default() -> Self {
        Self::rgb(255, 255, 255)
    }
}

impl Colourf {
    #[inline]
    pub const fn new(red: f32, green: f32, blue: f32, alpha: f32) -> Self {
        Self {
            red,
            green,
            blue,
            alpha,
        }
    }
}

impl Default for Colourf {
    #[inline]
    fn default() -> Self {
        Self::new(1.0, 1.0, 1.0, 1.0)
    }
}

impl From<Colourb> for Colourf {
    #[inline]
    fn from(colour: Colourb) -> Self {
        Self::new(
            f32::from(colour.red) / 255.0,
            f32::from(colour.green) / 255.0,
            f32::from(colour.blue) / 255.0,
            f32::from(colour.alpha) / 255.0,
        )
    }
}

impl From<Colourf> for Colourb {
    #[inline]
    fn from(colour: Colourf) -> Self {
        Self::new(
            unit_to_byte(colour.red),
            unit_to_byte(colour.green),
            unit_to_byte(colour.blue),
            unit_to_byte(colour.alpha),
        )
    }
}

impl From<Colourf> for Vector4f {
    #[inline]
    fn from(colour: Colourf) -> Self {
        Self::new(colour.red, colour.green, colour.blue, colour.alpha)
    }
}

impl From<Vector4f> for Colourf {
    #[inline]
    fn from(vector: Vector4f) -> Self {
        Self::new(vector.x, vector.y, vector.z, vector.w)
    }
}

/// Map a `0.0..=1.0` channel onto `0..=255`, clamping out-of-range input.
fn unit_to_byte(channel: f32) -> u8 {
    (channel.clamp(0.0, 1.0) * 255.0).round() as u8
}

impl fmt::Display for Vector2f {
    #[inline]
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(formatter, "{}, {}", self.x, self.y)
    }
}

impl fmt::Display for Vector3f {
    #[inline]
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(formatter, "{}, {}, {}", self.x, self.y, self.z)
    }
}

impl fmt::Display for Vector4f {
    #[inline]
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(formatter, "{}, {}, {}, {}", self.x, self.y, self.z, self.w)
    }
}

impl fmt::Display for Colourb {
    #[inline]
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            formatter,
            "{}, {}, {}, {}",
            self.red, self.green, self.blue, self.alpha
        )
    }
}

impl fmt::Display for Colourf {
    #[inline]
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            formatter,
            "{}, {}, {}, {}",
            self.red, self.green, self.blue, self.alpha
        )
    }
}

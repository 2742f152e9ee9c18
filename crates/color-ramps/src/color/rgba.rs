//! 8-bit RGBA color value

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// An immutable 8-bit RGBA color.
///
/// This is the representation used in the pixel buffer and the color table.
/// Serialized as a four element array `[r, g, b, a]`; deserialization accepts
/// any numbers and clamps them into `0..=255`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Color {
    /// Red channel (0..=255)
    pub r: u8,
    /// Green channel (0..=255)
    pub g: u8,
    /// Blue channel (0..=255)
    pub b: u8,
    /// Alpha channel (0 = fully transparent)
    pub a: u8,
}

impl Color {
    /// Create a color from its four channels.
    #[inline]
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Create a fully opaque color.
    ///
    /// # Example
    /// ```
    /// use color_ramps::Color;
    /// let red = Color::rgb(255, 0, 0);
    /// assert_eq!(red.a, 255);
    /// ```
    #[inline]
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    /// Create a color from a byte array `[R, G, B, A]`.
    #[inline]
    pub const fn from_bytes(bytes: [u8; 4]) -> Self {
        Self::new(bytes[0], bytes[1], bytes[2], bytes[3])
    }

    /// Convert to a byte array `[R, G, B, A]`.
    #[inline]
    pub const fn to_bytes(self) -> [u8; 4] {
        [self.r, self.g, self.b, self.a]
    }

    /// Create a color from floating point channels in `0.0..=255.0`.
    ///
    /// Values are rounded and clamped, NaN maps to 0.
    ///
    /// # Example
    /// ```
    /// use color_ramps::Color;
    /// let c = Color::from_clamped([300.0, -4.0, 127.6, 255.0]);
    /// assert_eq!(c.to_bytes(), [255, 0, 128, 255]);
    /// ```
    pub fn from_clamped(channels: [f64; 4]) -> Self {
        let [r, g, b, a] = channels.map(clamp_channel);
        Self { r, g, b, a }
    }

    /// Returns true when the alpha channel is zero.
    #[inline]
    pub const fn is_transparent(self) -> bool {
        self.a == 0
    }

    /// Hex string `#RRGGBB` (alpha is not included).
    pub fn to_hex(self) -> String {
        format!("#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }
}

fn clamp_channel(value: f64) -> u8 {
    if value.is_nan() {
        0
    } else {
        value.round().clamp(0.0, 255.0) as u8
    }
}

impl Serialize for Color {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.to_bytes().serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Color {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let channels = <[f64; 4]>::deserialize(deserializer)?;
        Ok(Self::from_clamped(channels))
    }
}

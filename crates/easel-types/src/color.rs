use serde::{Deserialize, Serialize};
use std::fmt;

/// Mask selecting the 24 meaningful bits of a packed color.
pub const COLOR_MASK: u32 = 0x00ff_ffff;

/// A packed 24-bit color: `R<<16 | G<<8 | B`.
///
/// Every constructor masks its input, so a `Color` never carries bits
/// above the blue/green/red channels. Out-of-range channel values wrap.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "u32", into = "u32")]
pub struct Color(u32);

impl Color {
    /// Opaque black, the initial value of every canvas cell.
    pub const BLACK: Self = Self(0);

    /// Build a color from an already-packed integer, keeping the low 24 bits.
    pub const fn from_packed(value: i64) -> Self {
        Self((value & COLOR_MASK as i64) as u32)
    }

    /// Pack three channels, each masked to its low 8 bits.
    pub const fn from_channels(r: i64, g: i64, b: i64) -> Self {
        Self((((r & 0xff) << 16) | ((g & 0xff) << 8) | (b & 0xff)) as u32)
    }

    /// The packed `R<<16 | G<<8 | B` value.
    pub const fn packed(self) -> u32 {
        self.0
    }

    pub const fn r(self) -> u8 {
        (self.0 >> 16) as u8
    }

    pub const fn g(self) -> u8 {
        (self.0 >> 8) as u8
    }

    pub const fn b(self) -> u8 {
        self.0 as u8
    }
}

impl From<u32> for Color {
    fn from(value: u32) -> Self {
        Self(value & COLOR_MASK)
    }
}

impl From<Color> for u32 {
    fn from(color: Color) -> Self {
        color.0
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:06x}", self.0)
    }
}

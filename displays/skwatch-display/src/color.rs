//! 24-bit RGB colors

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Packed `0xRRGGBB` color
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Color(u32);

impl Color {
    pub const BLACK: Color = Color(0x000000);
    pub const WHITE: Color = Color(0xFFFFFF);
    pub const LIGHT_GRAY: Color = Color(0xAAAAAA);
    pub const JAEGER_GREEN: Color = Color(0x00AA55);
    pub const PICTON_BLUE: Color = Color(0x55AAFF);
    pub const SUNSET_ORANGE: Color = Color(0xFF5555);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Color(((r as u32) << 16) | ((g as u32) << 8) | b as u32)
    }

    /// Color from a packed hex integer; bits above the low 24 are dropped
    pub const fn from_hex(hex: i32) -> Self {
        Color(hex as u32 & 0x00FF_FFFF)
    }

    /// Packed `0xRRGGBB` value
    pub const fn to_hex(self) -> u32 {
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

    /// Perceived brightness, 0..=255 (ITU-R BT.601 weights)
    pub const fn luma(self) -> u8 {
        ((self.r() as u32 * 299 + self.g() as u32 * 587 + self.b() as u32 * 114) / 1000) as u8
    }

    /// Black or white, whichever reads better on top of `self`
    pub const fn legible_over(self) -> Color {
        if self.luma() >= 128 {
            Color::BLACK
        } else {
            Color::WHITE
        }
    }
}

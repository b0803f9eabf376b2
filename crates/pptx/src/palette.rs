//! Colors used by the slide layouts.

use std::fmt;

/// An sRGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self(r, g, b)
    }

    /// Uppercase `RRGGBB` form used by `a:srgbClr`.
    pub fn hex(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02X}{:02X}{:02X}", self.0, self.1, self.2)
    }
}

/// Colors for the four slide layouts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Palette {
    /// Title and section backgrounds, content header bar, body text.
    pub navy: Rgb,
    /// Table header fill and placeholder caption text.
    pub slate: Rgb,
    /// Subtitles, section labels and placeholder outlines.
    pub silver: Rgb,
    /// Content slide background.
    pub off_white: Rgb,
    /// Text on dark backgrounds.
    pub white: Rgb,
    /// Screenshot placeholder fill.
    pub placeholder_fill: Rgb,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            navy: Rgb::new(0x1C, 0x28, 0x33),
            slate: Rgb::new(0x2E, 0x40, 0x53),
            silver: Rgb::new(0xAA, 0xB7, 0xB8),
            off_white: Rgb::new(0xF4, 0xF6, 0xF6),
            white: Rgb::new(0xFF, 0xFF, 0xFF),
            placeholder_fill: Rgb::new(0xE8, 0xE8, 0xE8),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hex_output() {
        assert_eq!(Rgb::new(0x1C, 0x28, 0x33).hex(), "1C2833");
        assert_eq!(Rgb::new(0, 0, 0).hex(), "000000");
    }

    #[test]
    fn test_default_palette() {
        let palette = Palette::default();
        assert_eq!(palette.navy.hex(), "1C2833");
        assert_eq!(palette.placeholder_fill.hex(), "E8E8E8");
    }
}

//! Length units used by DrawingML.

/// English Metric Units, the integer length unit of OOXML drawings.
pub type Emu = i64;

pub const EMU_PER_INCH: Emu = 914_400;
pub const EMU_PER_POINT: Emu = 12_700;

/// Convert inches to EMU, truncating toward zero.
pub fn inches(value: f64) -> Emu {
    (value * EMU_PER_INCH as f64) as Emu
}

/// Convert points to EMU, truncating toward zero.
pub fn points(value: f64) -> Emu {
    (value * EMU_PER_POINT as f64) as Emu
}

/// Font size in hundredths of a point, as used by the `sz` attribute.
pub fn font_size(pt: f64) -> u32 {
    (pt * 100.0).round() as u32
}

/// Dimensions of a slide.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SlideSize {
    pub width: Emu,
    pub height: Emu,
}

impl SlideSize {
    pub fn new(width: Emu, height: Emu) -> Self {
        Self { width, height }
    }

    /// 10in x 5.625in, the 16:9 size used when no template is given.
    pub fn widescreen() -> Self {
        Self::new(inches(10.0), inches(5.625))
    }
}

impl Default for SlideSize {
    fn default() -> Self {
        Self::widescreen()
    }
}

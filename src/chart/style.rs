//! Shared look-and-feel for all renderers.
//!
//! A [`ChartStyle`] bundles the palette, theme colors, output size, and font
//! choices. Callers hand one to each render call; there is no global theme.

use std::sync::OnceLock;

use plotters::prelude::*;
use plotters::style::FontStyle;

use crate::error::AppError;

/// Five-color neon palette, assigned to series in order and cycled when a
/// chart has more series than colors.
pub const NEON_PALETTE: [RGBColor; 5] = [
    RGBColor(0x39, 0xFF, 0x14),
    RGBColor(0xFF, 0x07, 0x3A),
    RGBColor(0xFF, 0xD7, 0x00),
    RGBColor(0x00, 0xFF, 0xFF),
    RGBColor(0xFF, 0x69, 0xB4),
];

/// Colors, fonts, and output geometry for one chart.
///
/// The defaults produce a 10x6 inch figure at 300 DPI (3000x1800 px) on a
/// dark background.
#[derive(Debug, Clone)]
pub struct ChartStyle {
    pub palette: [RGBColor; 5],
    pub background: RGBColor,
    pub foreground: RGBColor,
    pub grid: RGBColor,
    pub width_px: u32,
    pub height_px: u32,
}

impl Default for ChartStyle {
    fn default() -> Self {
        Self {
            palette: NEON_PALETTE,
            background: RGBColor(0, 0, 0),
            foreground: RGBColor(255, 255, 255),
            grid: RGBColor(0x5A, 0x5A, 0x5A),
            width_px: 3000,
            height_px: 1800,
        }
    }
}

impl ChartStyle {
    /// Palette color for the `index`-th series, cycling past the end.
    pub fn series_color(&self, index: usize) -> RGBColor {
        self.palette[index % self.palette.len()]
    }

    pub fn title_font(&self) -> TextStyle<'static> {
        ("sans-serif", 50).into_font().color(&self.foreground)
    }

    pub fn label_font(&self) -> TextStyle<'static> {
        ("sans-serif", 38).into_font().color(&self.foreground)
    }

    pub fn axis_desc_font(&self) -> TextStyle<'static> {
        ("sans-serif", 42).into_font().color(&self.foreground)
    }

    pub fn legend_font(&self) -> TextStyle<'static> {
        ("sans-serif", 38).into_font().color(&self.foreground)
    }
}

static FONT_INIT: OnceLock<Result<(), String>> = OnceLock::new();

/// Register the bundled typeface for text rendering.
///
/// The bitmap backend does no system font discovery, so the DejaVu Sans face
/// shipped under `assets/fonts/` is registered as the `sans-serif` family the
/// first time any renderer runs. Subsequent calls are no-ops.
pub fn ensure_fonts() -> Result<(), AppError> {
    let init = FONT_INIT.get_or_init(|| {
        plotters::style::register_font(
            "sans-serif",
            FontStyle::Normal,
            include_bytes!("../../assets/fonts/DejaVuSans.ttf"),
        )
        .map_err(|_| "embedded font data could not be parsed".to_string())
    });
    match init {
        Ok(()) => Ok(()),
        Err(message) => Err(AppError::new(4, format!("Font setup failed: {message}"))),
    }
}

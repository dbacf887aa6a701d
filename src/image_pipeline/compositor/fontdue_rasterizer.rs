//! Text rasterizer backed by the `fontdue` crate.

use std::collections::HashMap;
use std::path::Path;

use fontdue::{Font, FontSettings};
use tracing::debug;

use crate::image_pipeline::common::error::{ConversionError, Result};
use crate::image_pipeline::compositor::text::FontRasterizer;
use crate::image_pipeline::pixel::Pixel;

const DEFAULT_FONT_SIZE: f32 = 12.0;
const DEFAULT_ORIGIN: (f32, f32) = (10.0, 10.0);

/// Renders text with fonts registered under a name.
///
/// Glyphs are drawn in white at 12px starting 10px in from the top-left
/// corner unless configured otherwise. Uncovered pixels stay transparent.
pub struct FontdueRasterizer {
    fonts: HashMap<String, Font>,
    font_size: f32,
    origin: (f32, f32),
    color: Pixel,
}

impl Default for FontdueRasterizer {
    fn default() -> Self {
        Self::new()
    }
}

impl FontdueRasterizer {
    pub fn new() -> Self {
        Self {
            fonts: HashMap::new(),
            font_size: DEFAULT_FONT_SIZE,
            origin: DEFAULT_ORIGIN,
            color: Pixel::rgba(255, 255, 255, 255),
        }
    }

    pub fn with_font_size(mut self, size: f32) -> Self {
        self.font_size = size;
        self
    }

    pub fn with_origin(mut self, x: f32, y: f32) -> Self {
        self.origin = (x, y);
        self
    }

    pub fn with_color(mut self, color: Pixel) -> Self {
        self.color = color.with_alpha();
        self
    }

    /// Parses TrueType/OpenType bytes and registers them as `name`.
    pub fn register_font(&mut self, name: impl Into<String>, bytes: &[u8]) -> Result<()> {
        let name = name.into();
        let font = Font::from_bytes(bytes, FontSettings::default())
            .map_err(|e| ConversionError::FontError(format!("{}: {}", name, e)))?;
        debug!("Registered font '{}'", name);
        self.fonts.insert(name, font);
        Ok(())
    }

    pub fn load_font_file<P: AsRef<Path>>(&mut self, name: impl Into<String>, path: P) -> Result<()> {
        let path = path.as_ref();
        let bytes = std::fs::read(path).map_err(|e| {
            ConversionError::InputReadError(format!("{}: {}", path.display(), e))
        })?;
        self.register_font(name, &bytes)
    }

    pub fn has_font(&self, name: &str) -> bool {
        self.fonts.contains_key(name)
    }
}

impl FontRasterizer for FontdueRasterizer {
    fn rasterize(&self, font_name: &str, text: &str, width: u32, height: u32) -> Result<Vec<u8>> {
        let font = self.fonts.get(font_name).ok_or_else(|| {
            ConversionError::FontError(format!("font '{}' is not registered", font_name))
        })?;

        let (width, height) = (width as usize, height as usize);
        let mut buffer = vec![0u8; width * height * 4];

        let ascent = font
            .horizontal_line_metrics(self.font_size)
            .map(|m| m.ascent)
            .unwrap_or(self.font_size);
        let baseline = self.origin.1 + ascent;
        let mut pen_x = self.origin.0;

        for ch in text.chars() {
            let (metrics, coverage) = font.rasterize(ch, self.font_size);
            let glyph_top = baseline - metrics.height as f32 - metrics.ymin as f32;

            for gy in 0..metrics.height {
                for gx in 0..metrics.width {
                    let alpha = coverage[gy * metrics.width + gx];
                    if alpha == 0 {
                        continue;
                    }

                    let px = pen_x as isize + gx as isize + metrics.xmin as isize;
                    let py = (glyph_top + gy as f32) as isize;
                    if px < 0 || py < 0 || px as usize >= width || py as usize >= height {
                        continue;
                    }

                    let idx = (py as usize * width + px as usize) * 4;
                    let glyph_alpha = (alpha as u16 * self.color.a as u16 / 255) as u8;
                    let src = Pixel::rgba(self.color.r, self.color.g, self.color.b, glyph_alpha);
                    let out = Pixel::source_over(Pixel::from_bytes(&buffer[idx..], 4), src);
                    buffer[idx..idx + 4].copy_from_slice(&out.to_rgba());
                }
            }

            pen_x += metrics.advance_width;
        }

        debug!("Rasterized {} chars of '{}' into {}x{}", text.chars().count(), font_name, width, height);
        Ok(buffer)
    }
}

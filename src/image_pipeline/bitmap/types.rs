//! Decoded bitmap types

use crate::image_pipeline::common::error::{ConversionError, Result};
use crate::image_pipeline::pixel::Pixel;

/// Channel layout of a decoded bitmap's pixel bytes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PixelFormat {
    Rgb8,
    Rgba8,
    Bgr8,
    Bgra8,
}

impl PixelFormat {
    pub fn channels(self) -> usize {
        match self {
            PixelFormat::Rgb8 | PixelFormat::Bgr8 => 3,
            PixelFormat::Rgba8 | PixelFormat::Bgra8 => 4,
        }
    }

    /// Reads one pixel in this layout from the start of `bytes`.
    pub fn pixel(self, bytes: &[u8]) -> Pixel {
        match self {
            PixelFormat::Rgb8 => Pixel::rgb(bytes[0], bytes[1], bytes[2]),
            PixelFormat::Rgba8 => Pixel::rgba(bytes[0], bytes[1], bytes[2], bytes[3]),
            PixelFormat::Bgr8 => Pixel::rgb(bytes[2], bytes[1], bytes[0]),
            PixelFormat::Bgra8 => Pixel::rgba(bytes[2], bytes[1], bytes[0], bytes[3]),
        }
    }
}

/// Pixel data handed over by an external decoder
#[derive(Debug, Clone)]
pub struct DecodedBitmap {
    /// Width of the image in pixels
    pub width: u32,
    /// Height of the image in pixels
    pub height: u32,
    /// Channel layout of `pixels`
    pub format: PixelFormat,
    /// Bytes between the starts of consecutive rows
    pub stride: usize,
    /// Row-major pixel bytes
    pub pixels: Vec<u8>,
}

impl DecodedBitmap {
    /// Checks that `stride` and `pixels` cover every row.
    pub fn validate(&self) -> Result<()> {
        let row_len = self.width as usize * self.format.channels();
        if self.stride < row_len {
            return Err(ConversionError::DecodeError(format!(
                "row stride {} is shorter than a {}-byte row",
                self.stride, row_len
            )));
        }

        let expected = match self.height as usize {
            0 => 0,
            rows => (rows - 1) * self.stride + row_len,
        };
        if self.pixels.len() < expected {
            return Err(ConversionError::SizeMismatchError {
                expected,
                actual: self.pixels.len(),
            });
        }
        Ok(())
    }
}

//! REW header types

use crate::image_pipeline::common::error::{ConversionError, Result};

/// Length of the fixed REW header in bytes.
pub const HEADER_LEN: usize = 10;

/// Supported pixel depths.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum BitsPerPixel {
    /// Packed R, G, B
    Rgb24,
    /// Packed R, G, B, A
    #[default]
    Rgba32,
}

impl BitsPerPixel {
    pub fn bits(self) -> u16 {
        match self {
            BitsPerPixel::Rgb24 => 24,
            BitsPerPixel::Rgba32 => 32,
        }
    }

    pub fn channels(self) -> usize {
        self.bits() as usize / 8
    }
}

impl TryFrom<i32> for BitsPerPixel {
    type Error = ConversionError;

    fn try_from(bits: i32) -> Result<Self> {
        match bits {
            24 => Ok(BitsPerPixel::Rgb24),
            32 => Ok(BitsPerPixel::Rgba32),
            other => Err(ConversionError::UnsupportedBitsPerPixel(other)),
        }
    }
}

impl std::fmt::Display for BitsPerPixel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}bpp", self.bits())
    }
}

/// Parsed REW header.
///
/// Layout (little-endian): width `i16`, height `i16`, total length `i32`
/// (header plus pixels), bits per pixel `i16`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RewHeader {
    pub width: i16,
    pub height: i16,
    pub total_length: i32,
    pub bits_per_pixel: BitsPerPixel,
}

impl RewHeader {
    pub fn new(width: i16, height: i16, bits_per_pixel: BitsPerPixel) -> Self {
        // Wraps like the 32-bit field it is stored in
        let total_length = (HEADER_LEN + pixel_len(width, height, bits_per_pixel)) as i32;
        Self { width, height, total_length, bits_per_pixel }
    }

    pub fn to_bytes(&self) -> [u8; HEADER_LEN] {
        let mut out = [0u8; HEADER_LEN];
        out[0..2].copy_from_slice(&self.width.to_le_bytes());
        out[2..4].copy_from_slice(&self.height.to_le_bytes());
        out[4..8].copy_from_slice(&self.total_length.to_le_bytes());
        out[8..10].copy_from_slice(&(self.bits_per_pixel.bits() as i16).to_le_bytes());
        out
    }

    /// Parses the first 10 bytes of `bytes`.
    pub fn parse(bytes: &[u8]) -> Result<Self> {
        if bytes.len() < HEADER_LEN {
            return Err(ConversionError::FormatError(format!(
                "stream is {} bytes, shorter than the {}-byte header",
                bytes.len(),
                HEADER_LEN
            )));
        }

        let width = i16::from_le_bytes([bytes[0], bytes[1]]);
        let height = i16::from_le_bytes([bytes[2], bytes[3]]);
        let total_length = i32::from_le_bytes([bytes[4], bytes[5], bytes[6], bytes[7]]);
        let bits = i16::from_le_bytes([bytes[8], bytes[9]]);
        let bits_per_pixel = BitsPerPixel::try_from(bits as i32)?;

        Ok(Self { width, height, total_length, bits_per_pixel })
    }

    /// Number of pixel bytes implied by the extents.
    pub fn pixel_len(&self) -> usize {
        pixel_len(self.width, self.height, self.bits_per_pixel)
    }
}

/// Negative extents (from wrapped 16-bit values) hold no pixels.
pub(crate) fn extent(v: i16) -> usize {
    v.max(0) as usize
}

pub(crate) fn pixel_len(width: i16, height: i16, bits_per_pixel: BitsPerPixel) -> usize {
    extent(width) * extent(height) * bits_per_pixel.channels()
}

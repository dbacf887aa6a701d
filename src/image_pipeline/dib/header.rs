//! Byte layouts of the BMP file header and the DIB info headers.

use crate::image_pipeline::dib::types::{
    ALPHA_MASK, BI_BITFIELDS, BI_RGB, BLUE_MASK, DibHeaderVariant, FILE_HEADER_LEN, GREEN_MASK,
    PELS_PER_METER_96_DPI, RED_MASK,
};
use crate::image_pipeline::rew::RewImage;

/// The 14-byte `BM` file header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FileHeader {
    /// Size of the whole file in bytes
    pub file_size: u32,
    /// Offset of the first pixel byte
    pub pixel_offset: u32,
}

impl FileHeader {
    pub fn to_bytes(&self) -> [u8; FILE_HEADER_LEN] {
        let mut out = [0u8; FILE_HEADER_LEN];
        out[0] = 0x42;
        out[1] = 0x4D;
        out[2..6].copy_from_slice(&self.file_size.to_le_bytes());
        // 6..10 reserved
        out[10..14].copy_from_slice(&self.pixel_offset.to_le_bytes());
        out
    }
}

/// Info header fields shared by every variant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DibHeader {
    pub variant: DibHeaderVariant,
    pub width: i32,
    pub height: i32,
    pub bit_count: u16,
    pub compression: u32,
    pub image_size: u32,
    pub x_pels_per_meter: i32,
    pub y_pels_per_meter: i32,
}

impl DibHeader {
    pub fn for_image(image: &RewImage, variant: DibHeaderVariant) -> Self {
        let bits_per_pixel = image.bits_per_pixel();
        let image_size = image.pixel_count() * bits_per_pixel.channels();

        Self {
            variant,
            width: image.width() as i32,
            height: image.height() as i32,
            bit_count: bits_per_pixel.bits(),
            compression: if variant.has_masks() { BI_BITFIELDS } else { BI_RGB },
            image_size: image_size as u32,
            x_pels_per_meter: PELS_PER_METER_96_DPI,
            y_pels_per_meter: PELS_PER_METER_96_DPI,
        }
    }

    /// Serializes the header, its masks, and the variant's fixed trailer.
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(self.variant.dib_len());
        out.extend_from_slice(&(self.variant.header_len() as u32).to_le_bytes());
        out.extend_from_slice(&self.width.to_le_bytes());
        out.extend_from_slice(&self.height.to_le_bytes());
        out.extend_from_slice(&1u16.to_le_bytes());
        out.extend_from_slice(&self.bit_count.to_le_bytes());
        out.extend_from_slice(&self.compression.to_le_bytes());
        out.extend_from_slice(&self.image_size.to_le_bytes());
        out.extend_from_slice(&self.x_pels_per_meter.to_le_bytes());
        out.extend_from_slice(&self.y_pels_per_meter.to_le_bytes());
        // colours used, important colours
        out.extend_from_slice(&0u32.to_le_bytes());
        out.extend_from_slice(&0u32.to_le_bytes());

        match self.variant {
            DibHeaderVariant::Info => {}
            DibHeaderVariant::V2Info => {
                for mask in [RED_MASK, GREEN_MASK, BLUE_MASK] {
                    out.extend_from_slice(&mask.to_le_bytes());
                }
            }
            DibHeaderVariant::V3Info => {
                for mask in [RED_MASK, GREEN_MASK, BLUE_MASK, ALPHA_MASK] {
                    out.extend_from_slice(&mask.to_le_bytes());
                }
            }
        }

        out.extend_from_slice(self.variant.mask_chunk());
        out
    }
}

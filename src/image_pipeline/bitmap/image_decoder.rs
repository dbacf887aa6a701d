//! Bitmap decoder backed by the `image` crate.

use tracing::debug;

use crate::image_pipeline::bitmap::decoder::BitmapDecoder;
use crate::image_pipeline::bitmap::types::{DecodedBitmap, PixelFormat};
use crate::image_pipeline::common::error::{ConversionError, Result};

/// Decodes PNG, JPEG, BMP and GIF files.
///
/// Sources with an alpha channel decode to [`PixelFormat::Rgba8`], all others
/// to [`PixelFormat::Rgb8`]. Rows are tightly packed.
pub struct ImageCrateDecoder;

impl BitmapDecoder for ImageCrateDecoder {
    fn decode(&self, data: &[u8]) -> Result<DecodedBitmap> {
        debug!("Decoding source image, {} bytes", data.len());

        let decoded = image::load_from_memory(data)
            .map_err(|e| ConversionError::DecodeError(e.to_string()))?;

        let width = decoded.width();
        let height = decoded.height();

        let (format, pixels) = if decoded.color().has_alpha() {
            (PixelFormat::Rgba8, decoded.into_rgba8().into_raw())
        } else {
            (PixelFormat::Rgb8, decoded.into_rgb8().into_raw())
        };

        debug!("Decoded image: {}x{} {:?}", width, height, format);

        Ok(DecodedBitmap {
            width,
            height,
            format,
            stride: width as usize * format.channels(),
            pixels,
        })
    }
}

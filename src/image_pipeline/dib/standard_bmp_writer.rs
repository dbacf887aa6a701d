use std::io::Write;
use tracing::debug;
use crate::image_pipeline::common::error::Result;
use crate::image_pipeline::dib::header::{DibHeader, FileHeader};
use crate::image_pipeline::dib::types::{DibHeaderVariant, FILE_HEADER_LEN};
use crate::image_pipeline::dib::writer::BmpWriter;
use crate::image_pipeline::rew::RewImage;

pub struct StandardBmpWriter;

impl BmpWriter for StandardBmpWriter {
    fn write_bmp(&self, image: &RewImage, output: &mut dyn Write, variant: Option<DibHeaderVariant>) -> Result<()> {
        let bytes = match variant {
            Some(variant) => export_bmp_with_header(image, variant),
            None => export_bmp(image),
        };
        output.write_all(&bytes)?;
        Ok(())
    }
}

/// Exports `image` with the header variant implied by its channel count.
pub fn export_bmp(image: &RewImage) -> Vec<u8> {
    export_bmp_with_header(image, DibHeaderVariant::for_channels(image.channels()))
}

/// Exports `image` with an explicit header variant.
pub fn export_bmp_with_header(image: &RewImage, variant: DibHeaderVariant) -> Vec<u8> {
    debug!("Encoding BMP image: {}x{} with {:?} header", image.width(), image.height(), variant);

    let dib = DibHeader::for_image(image, variant).to_bytes();
    let pixels = image.padded_pixels();
    let pixel_offset = FILE_HEADER_LEN + dib.len();
    let file_header = FileHeader {
        file_size: (pixel_offset + pixels.len()) as u32,
        pixel_offset: pixel_offset as u32,
    };

    let mut out = Vec::with_capacity(pixel_offset + pixels.len());
    out.extend_from_slice(&file_header.to_bytes());
    out.extend_from_slice(&dib);
    out.extend_from_slice(&pixels);

    debug!("BMP encoding complete, {} bytes", out.len());
    out
}

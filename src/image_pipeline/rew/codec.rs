//! Stream serialization for REW images.

use std::io::{ErrorKind, Read, Write};

use tracing::debug;

use crate::image_pipeline::common::error::{ConversionError, Result};
use crate::image_pipeline::rew::image::RewImage;
use crate::image_pipeline::rew::types::{HEADER_LEN, RewHeader};

impl RewImage {
    /// Writes the header followed by the packed pixel bytes.
    pub fn write<W: Write + ?Sized>(&self, output: &mut W) -> Result<()> {
        debug!(
            "Writing REW image {}x{} {}, {} bytes",
            self.width(),
            self.height(),
            self.bits_per_pixel(),
            self.data().len()
        );
        output.write_all(&self.header().to_bytes())?;
        output.write_all(self.pixel_bytes())?;
        Ok(())
    }

    /// Reads one REW image from `input`.
    ///
    /// Fails with a format error when the stream is shorter than the header,
    /// declares an unsupported bit depth, or ends before the pixel region.
    pub fn read<R: Read + ?Sized>(input: &mut R) -> Result<Self> {
        let mut header_bytes = [0u8; HEADER_LEN];
        let filled = read_fully(input, &mut header_bytes)?;
        if filled < HEADER_LEN {
            return Err(ConversionError::FormatError(format!(
                "stream is {} bytes, shorter than the {}-byte header",
                filled, HEADER_LEN
            )));
        }

        let header = RewHeader::parse(&header_bytes)?;
        let pixel_len = header.pixel_len();
        let expected_total = (HEADER_LEN + pixel_len) as i32;
        if header.total_length != expected_total {
            return Err(ConversionError::FormatError(format!(
                "header declares {} total bytes but {}x{} at {} needs {}",
                header.total_length, header.width, header.height, header.bits_per_pixel, expected_total
            )));
        }

        // Grows with the bytes that arrive, not with what the header claims
        let mut pixels = Vec::new();
        Read::take(&mut *input, pixel_len as u64).read_to_end(&mut pixels)?;
        if pixels.len() < pixel_len {
            return Err(ConversionError::FormatError(format!(
                "pixel data truncated: expected {} bytes, got {}",
                pixel_len,
                pixels.len()
            )));
        }

        debug!("Read REW image {}x{} {}", header.width, header.height, header.bits_per_pixel);
        RewImage::from_parts(header, pixels)
    }

    pub fn to_bytes(&self) -> Vec<u8> {
        self.data().to_vec()
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        let mut cursor = bytes;
        Self::read(&mut cursor)
    }
}

/// Fills as much of `buf` as the stream allows and returns the byte count.
fn read_fully<R: Read + ?Sized>(input: &mut R, buf: &mut [u8]) -> Result<usize> {
    let mut filled = 0;
    while filled < buf.len() {
        match input.read(&mut buf[filled..]) {
            Ok(0) => break,
            Ok(n) => filled += n,
            Err(e) if e.kind() == ErrorKind::Interrupted => continue,
            Err(e) => return Err(e.into()),
        }
    }
    Ok(filled)
}

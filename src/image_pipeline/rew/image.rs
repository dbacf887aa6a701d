use tracing::debug;

use crate::image_pipeline::bitmap::types::DecodedBitmap;
use crate::image_pipeline::common::error::{ConversionError, Result};
use crate::image_pipeline::pixel::Pixel;
use crate::image_pipeline::rew::types::{BitsPerPixel, HEADER_LEN, RewHeader, extent, pixel_len};

/// A REW image: header bytes followed by packed pixel rows.
///
/// Extents are stored as signed 16-bit values. Constructors take wider
/// integers and truncate them, so sizes above 32767 wrap.
///
/// `data().len() == 10 + width * height * channels` holds after every
/// constructor and mutation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RewImage {
    width: i16,
    height: i16,
    bits_per_pixel: BitsPerPixel,
    data: Vec<u8>,
}

impl RewImage {
    /// Allocates a zero-filled image.
    pub fn empty(width: i32, height: i32, bits_per_pixel: BitsPerPixel) -> Self {
        let header = RewHeader::new(width as i16, height as i16, bits_per_pixel);
        let mut data = vec![0u8; HEADER_LEN + header.pixel_len()];
        data[..HEADER_LEN].copy_from_slice(&header.to_bytes());

        Self {
            width: header.width,
            height: header.height,
            bits_per_pixel,
            data,
        }
    }

    /// Allocates an image with every pixel set to `color`.
    ///
    /// 24-bit images drop the colour's alpha channel.
    pub fn solid(width: i32, height: i32, color: Pixel, bits_per_pixel: BitsPerPixel) -> Self {
        let mut image = Self::empty(width, height, bits_per_pixel);
        let channels = bits_per_pixel.channels();
        let color = color.shaped(channels);

        for chunk in image.data[HEADER_LEN..].chunks_exact_mut(channels) {
            color.write_to(chunk);
        }
        image
    }

    /// Wraps caller-supplied packed pixel bytes.
    pub fn from_raw(width: i32, height: i32, pixels: &[u8], bits_per_pixel: BitsPerPixel) -> Result<Self> {
        let header = RewHeader::new(width as i16, height as i16, bits_per_pixel);
        let expected = header.pixel_len();
        if pixels.len() != expected {
            return Err(ConversionError::SizeMismatchError {
                expected,
                actual: pixels.len(),
            });
        }

        let mut data = Vec::with_capacity(HEADER_LEN + expected);
        data.extend_from_slice(&header.to_bytes());
        data.extend_from_slice(pixels);

        Ok(Self {
            width: header.width,
            height: header.height,
            bits_per_pixel,
            data,
        })
    }

    /// Builds an image from a decoded external bitmap.
    pub fn ingest(bitmap: &DecodedBitmap, bits_per_pixel: BitsPerPixel) -> Result<Self> {
        let mut image = Self::empty(0, 0, bits_per_pixel);
        image.extract_from(bitmap)?;
        Ok(image)
    }

    /// Replaces this image's extents and pixels with those of `bitmap`,
    /// keeping the current bits per pixel. The header is rewritten.
    pub fn extract_from(&mut self, bitmap: &DecodedBitmap) -> Result<()> {
        bitmap.validate()?;

        let fresh = Self::empty(bitmap.width as i32, bitmap.height as i32, self.bits_per_pixel);
        *self = fresh;

        let channels = self.channels();
        let src_channels = bitmap.format.channels();
        let rows = extent(self.height).min(bitmap.height as usize);
        let cols = extent(self.width).min(bitmap.width as usize);
        let dst_row_len = extent(self.width) * channels;

        debug!(
            "Extracting {}x{} {:?} bitmap into {}",
            bitmap.width, bitmap.height, bitmap.format, self.bits_per_pixel
        );

        let pixels = &mut self.data[HEADER_LEN..];
        for y in 0..rows {
            let src_row = &bitmap.pixels[y * bitmap.stride..][..cols * src_channels];
            let dst_row = &mut pixels[y * dst_row_len..][..cols * channels];

            for (src, dst) in src_row.chunks_exact(src_channels).zip(dst_row.chunks_exact_mut(channels)) {
                bitmap.format.pixel(src).shaped(channels).write_to(dst);
            }
        }
        Ok(())
    }

    pub fn width(&self) -> i16 {
        self.width
    }

    pub fn height(&self) -> i16 {
        self.height
    }

    pub fn bits_per_pixel(&self) -> BitsPerPixel {
        self.bits_per_pixel
    }

    pub fn channels(&self) -> usize {
        self.bits_per_pixel.channels()
    }

    pub fn pixel_count(&self) -> usize {
        extent(self.width) * extent(self.height)
    }

    pub fn header(&self) -> RewHeader {
        RewHeader::new(self.width, self.height, self.bits_per_pixel)
    }

    /// Header plus pixel bytes.
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// The packed pixel region without the header.
    pub fn pixel_bytes(&self) -> &[u8] {
        &self.data[HEADER_LEN..]
    }

    /// Pixel rows as laid out in a bitmap file.
    ///
    /// Images with fewer than four channels get each scanline padded with
    /// zero bytes to a 4-byte boundary.
    pub fn padded_pixels(&self) -> Vec<u8> {
        let pixels = self.pixel_bytes();
        let channels = self.channels();
        if channels >= 4 {
            return pixels.to_vec();
        }

        let row_len = extent(self.width) * channels;
        let padding = (4 - row_len % 4) % 4;
        if padding == 0 || row_len == 0 {
            return pixels.to_vec();
        }

        let mut out = Vec::with_capacity((row_len + padding) * extent(self.height));
        for row in pixels.chunks_exact(row_len) {
            out.extend_from_slice(row);
            out.extend(std::iter::repeat_n(0u8, padding));
        }
        out
    }

    /// The image expanded to packed RGBA. 24-bit pixels become opaque.
    pub fn to_rgba(&self) -> Vec<u8> {
        if self.channels() == 4 {
            return self.pixel_bytes().to_vec();
        }

        let mut out = Vec::with_capacity(self.pixel_count() * 4);
        for chunk in self.pixel_bytes().chunks_exact(3) {
            out.extend_from_slice(&[chunk[0], chunk[1], chunk[2], u8::MAX]);
        }
        out
    }

    /// Reads the pixel at `(x, y)`, addressed as `y * width + x`.
    ///
    /// Byte offsets past the end clamp to the last byte of the buffer.
    /// Negative linear indices return the default pixel.
    pub fn pixel(&self, x: i32, y: i32) -> Pixel {
        let Some(base) = self.byte_offset(x, y) else {
            return Pixel::default();
        };

        let last = self.data.len() - 1;
        let channels = self.channels();
        let mut bytes = [0u8; 4];
        for (k, b) in bytes.iter_mut().enumerate().take(channels) {
            *b = self.data[base.saturating_add(k).min(last)];
        }
        Pixel::from_bytes(&bytes, channels)
    }

    /// Writes `color` at `(x, y)` with the same clamping as [`RewImage::pixel`].
    ///
    /// Negative linear indices are ignored.
    pub fn set_pixel(&mut self, x: i32, y: i32, color: Pixel) {
        let Some(base) = self.byte_offset(x, y) else {
            return;
        };

        let last = self.data.len() - 1;
        let channels = self.channels();
        let rgba = color.to_rgba();
        for (k, &b) in rgba.iter().enumerate().take(channels) {
            self.data[base.saturating_add(k).min(last)] = b;
        }
    }

    /// First byte of pixel `y * width + x`, or `None` when the linear index is
    /// negative or the image holds no pixels.
    fn byte_offset(&self, x: i32, y: i32) -> Option<usize> {
        let linear = y as i64 * self.width as i64 + x as i64;
        if linear < 0 || self.data.len() <= HEADER_LEN {
            return None;
        }
        let offset = HEADER_LEN as u64 + linear as u64 * self.channels() as u64;
        Some(offset.min(usize::MAX as u64) as usize)
    }

    pub(crate) fn from_parts(header: RewHeader, pixels: Vec<u8>) -> Result<Self> {
        let expected = pixel_len(header.width, header.height, header.bits_per_pixel);
        if pixels.len() != expected {
            return Err(ConversionError::SizeMismatchError {
                expected,
                actual: pixels.len(),
            });
        }

        let header = RewHeader::new(header.width, header.height, header.bits_per_pixel);
        let mut data = Vec::with_capacity(HEADER_LEN + expected);
        data.extend_from_slice(&header.to_bytes());
        data.extend(pixels);

        Ok(Self {
            width: header.width,
            height: header.height,
            bits_per_pixel: header.bits_per_pixel,
            data,
        })
    }
}

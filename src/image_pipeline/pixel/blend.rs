//! Buffer-level blending helpers operating on packed RGBA bytes.

use crate::image_pipeline::common::error::{ConversionError, Result};
use crate::image_pipeline::pixel::types::{Pixel, denormalize, lerp_channel};

const RGBA: usize = 4;

/// Source-over composites `src` onto `dst`, pixel by pixel.
///
/// Both slices hold packed RGBA; only the overlapping prefix is touched.
pub fn composite_row(dst: &mut [u8], src: &[u8]) {
    for (d, s) in dst.chunks_exact_mut(RGBA).zip(src.chunks_exact(RGBA)) {
        let out = Pixel::source_over(Pixel::from_bytes(d, RGBA), Pixel::from_bytes(s, RGBA));
        d.copy_from_slice(&out.to_rgba());
    }
}

/// Linear blend of two frames: `previous * (1 - weight) + current * weight`.
///
/// An empty `previous` frame yields `current` unchanged.
pub fn blend_frames(previous: &[u8], current: &[u8], weight: f32) -> Result<Vec<u8>> {
    if previous.is_empty() {
        return Ok(current.to_vec());
    }
    if previous.len() != current.len() {
        return Err(ConversionError::SizeMismatchError {
            expected: previous.len(),
            actual: current.len(),
        });
    }

    Ok(previous
        .iter()
        .zip(current)
        .map(|(&a, &b)| denormalize(lerp_channel(a, b, weight)))
        .collect())
}

/// Returns the RGBA frame with its rows in reverse order.
pub fn flip_vertically(pixels: &[u8], width: usize, height: usize) -> Vec<u8> {
    let row_len = width * RGBA;
    if row_len == 0 {
        return pixels.to_vec();
    }

    let mut output = Vec::with_capacity(pixels.len());
    for row in pixels.chunks(row_len).take(height).rev() {
        output.extend_from_slice(row);
    }
    output
}

//! REW raster format module
//!
//! This module provides the REW image type: a 10-byte little-endian header
//! followed by tightly packed RGB or RGBA pixel rows.

pub mod types;
mod image;
mod codec;

#[cfg(test)]
mod tests;

pub use types::{BitsPerPixel, RewHeader, HEADER_LEN};
pub use image::RewImage;

//! Source bitmap decoding module
//!
//! This module provides format-agnostic decoding of common image files
//! (PNG, JPEG, BMP, GIF) into an in-memory pixel buffer.

mod decoder;
mod image_decoder;
pub mod types;


pub use decoder::BitmapDecoder;
pub use image_decoder::ImageCrateDecoder;
pub use types::{DecodedBitmap, PixelFormat};

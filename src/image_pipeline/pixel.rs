//! Pixel and colour model
//!
//! This module provides the RGB/RGBA pixel value type and the blending
//! primitives shared by the codec and the compositor.

pub mod types;
pub mod blend;

#[cfg(test)]
mod tests;

pub use types::Pixel;
pub use blend::{blend_frames, composite_row, flip_vertically};

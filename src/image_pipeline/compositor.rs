//! Compositing and presentation module
//!
//! This module draws REW images and rasterized text into a 32-bit frame
//! buffer with source-over blending, blends each frame against the previous
//! one, and hands the result to a display surface.

mod batch;
mod surface;
mod text;
mod fontdue_rasterizer;
#[cfg(feature = "window")]
mod softbuffer_surface;
pub mod types;


pub use batch::RewBatch;
pub use surface::{BmpFileSurface, NullSurface, Surface};
pub use text::FontRasterizer;
pub use fontdue_rasterizer::FontdueRasterizer;
#[cfg(feature = "window")]
pub use softbuffer_surface::SoftbufferSurface;
pub use types::{CompositorConfig, CompositorConfigBuilder};

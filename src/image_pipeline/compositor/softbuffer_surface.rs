//! Window surface backed by `softbuffer`.

use std::num::NonZeroU32;

use raw_window_handle::{HasDisplayHandle, HasWindowHandle};

use crate::image_pipeline::common::error::{ConversionError, Result};
use crate::image_pipeline::compositor::surface::Surface;

/// Presents frames into a native window.
pub struct SoftbufferSurface<D, W> {
    surface: softbuffer::Surface<D, W>,
}

impl<D: HasDisplayHandle, W: HasWindowHandle> SoftbufferSurface<D, W> {
    pub fn new(context: &softbuffer::Context<D>, window: W) -> Result<Self> {
        let surface = softbuffer::Surface::new(context, window)
            .map_err(|e| ConversionError::ResourceError(format!("Failed to create surface: {}", e)))?;
        Ok(Self { surface })
    }
}

impl<D: HasDisplayHandle, W: HasWindowHandle> Surface for SoftbufferSurface<D, W> {
    fn blit(&mut self, buffer: &[u8], width: u32, height: u32) -> Result<()> {
        let (Some(w), Some(h)) = (NonZeroU32::new(width), NonZeroU32::new(height)) else {
            return Err(ConversionError::ResourceError(format!(
                "cannot present a {}x{} frame",
                width, height
            )));
        };

        self.surface
            .resize(w, h)
            .map_err(|e| ConversionError::ResourceError(format!("Failed to resize surface: {}", e)))?;

        let mut target = self
            .surface
            .buffer_mut()
            .map_err(|e| ConversionError::ResourceError(format!("Failed to get surface buffer: {}", e)))?;

        // softbuffer expects 0RGB words
        for (dst, px) in target.iter_mut().zip(buffer.chunks_exact(4)) {
            *dst = (px[0] as u32) << 16 | (px[1] as u32) << 8 | px[2] as u32;
        }

        target
            .present()
            .map_err(|e| ConversionError::ResourceError(format!("Failed to present buffer: {}", e)))?;
        Ok(())
    }
}

//! Display surfaces that receive presented frames.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::PathBuf;

use tracing::debug;

use crate::image_pipeline::common::error::{ConversionError, Result};
use crate::image_pipeline::dib::{BmpWriter, DibHeaderVariant, StandardBmpWriter};
use crate::image_pipeline::rew::{BitsPerPixel, RewImage};

/// A presentation target accepting packed RGBA frames.
///
/// A surface is handed to the compositor when a frame begins and dropped
/// once the frame has been presented, whether or not presentation succeeded.
pub trait Surface {
    fn blit(&mut self, buffer: &[u8], width: u32, height: u32) -> Result<()>;
}

/// Discards every frame.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullSurface;

impl Surface for NullSurface {
    fn blit(&mut self, _buffer: &[u8], _width: u32, _height: u32) -> Result<()> {
        Ok(())
    }
}

/// Writes each presented frame to a bitmap file.
#[derive(Debug, Clone)]
pub struct BmpFileSurface {
    path: PathBuf,
    variant: DibHeaderVariant,
}

impl BmpFileSurface {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            variant: DibHeaderVariant::V3Info,
        }
    }

    pub fn with_header(mut self, variant: DibHeaderVariant) -> Self {
        self.variant = variant;
        self
    }
}

impl Surface for BmpFileSurface {
    fn blit(&mut self, buffer: &[u8], width: u32, height: u32) -> Result<()> {
        let frame = RewImage::from_raw(width as i32, height as i32, buffer, BitsPerPixel::Rgba32)?;

        let file = File::create(&self.path).map_err(|e| {
            ConversionError::ResourceError(format!("{}: {}", self.path.display(), e))
        })?;
        let mut writer = BufWriter::new(file);
        StandardBmpWriter.write_bmp(&frame, &mut writer, Some(self.variant))?;
        writer.flush()?;

        debug!("Presented {}x{} frame to {}", width, height, self.path.display());
        Ok(())
    }
}

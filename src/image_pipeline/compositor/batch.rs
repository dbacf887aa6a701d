use rayon::prelude::*;
use rayon::{ThreadPool, ThreadPoolBuilder};
use tracing::{debug, info, instrument};

use crate::image_pipeline::{
    common::error::{ConversionError, Result},
    compositor::{
        fontdue_rasterizer::FontdueRasterizer,
        surface::Surface,
        text::FontRasterizer,
        types::CompositorConfig,
    },
    pixel::{blend_frames, composite_row, flip_vertically},
    rew::{BitsPerPixel, RewImage},
};

const RGBA: usize = 4;

/// A frame being recorded between `begin` and `end`.
struct Recording {
    current: Vec<u8>,
    surface: Box<dyn Surface>,
}

/// Double-buffered compositor for one presentation target.
///
/// Frames are recorded between [`RewBatch::begin`] and [`RewBatch::end`].
/// Draw calls composite into the current frame; `end` blends it against the
/// previously presented frame and blits the result to the surface given to
/// `begin`.
pub struct RewBatch<F: FontRasterizer> {
    config: CompositorConfig,
    rasterizer: F,
    pool: Option<ThreadPool>,
    previous: Option<Vec<u8>>,
    recording: Option<Recording>,
}

impl RewBatch<FontdueRasterizer> {
    pub fn new(config: CompositorConfig) -> Result<Self> {
        Self::with_rasterizer(config, FontdueRasterizer::new())
    }
}

impl<F: FontRasterizer> RewBatch<F> {
    pub fn with_rasterizer(config: CompositorConfig, rasterizer: F) -> Result<Self> {
        let pool = match config.worker_threads {
            0 => None,
            threads => Some(
                ThreadPoolBuilder::new()
                    .num_threads(threads)
                    .thread_name(|i| format!("rew-composite-{}", i))
                    .build()
                    .map_err(|e| ConversionError::ResourceError(e.to_string()))?,
            ),
        };

        debug!(
            "Compositor created: {}x{}, {} worker threads",
            config.width, config.height, config.worker_threads
        );

        Ok(Self {
            config,
            rasterizer,
            pool,
            previous: None,
            recording: None,
        })
    }

    pub fn config(&self) -> &CompositorConfig {
        &self.config
    }

    pub fn rasterizer_mut(&mut self) -> &mut F {
        &mut self.rasterizer
    }

    pub fn set_blend_weight(&mut self, weight: f32) {
        self.config.blend_weight = weight;
    }

    pub fn set_flip_vertically(&mut self, flip: bool) {
        self.config.flip_vertically = flip;
    }

    pub fn is_recording(&self) -> bool {
        self.recording.is_some()
    }

    /// The frame drawn before the last successful `end`, after any flip.
    pub fn previous_frame(&self) -> Option<&[u8]> {
        self.previous.as_deref()
    }

    /// The frame being recorded, if any.
    pub fn current_frame(&self) -> Option<&[u8]> {
        self.recording.as_ref().map(|r| r.current.as_slice())
    }

    /// Reallocates the frame buffers when the extents change.
    ///
    /// Returns `false` without touching anything when they are unchanged.
    pub fn resize(&mut self, width: u32, height: u32) -> bool {
        if self.config.width == width && self.config.height == height {
            return false;
        }

        info!(width, height, "Resizing compositor");
        self.config.width = width;
        self.config.height = height;
        self.previous = None;
        if let Some(recording) = self.recording.as_mut() {
            recording.current = vec![0u8; self.config.frame_len()];
        }
        true
    }

    /// Starts recording a frame that will be presented to `surface`.
    pub fn begin(&mut self, surface: Box<dyn Surface>) -> Result<()> {
        if self.recording.is_some() {
            return Err(ConversionError::StateError {
                operation: "begin a frame",
                state: "another frame is recording",
            });
        }

        self.recording = Some(Recording {
            current: vec![0u8; self.config.frame_len()],
            surface,
        });
        Ok(())
    }

    /// Composites `image` with its top-left corner at `(x, y)`.
    ///
    /// Anchors beyond the frame extents draw nothing. Pixels falling outside
    /// the frame are clipped.
    pub fn draw(&mut self, image: &RewImage, x: i32, y: i32) -> Result<()> {
        let (width, height) = (self.config.width as usize, self.config.height as usize);
        let Some(recording) = self.recording.as_mut() else {
            return Err(ConversionError::StateError {
                operation: "draw",
                state: "no frame is recording",
            });
        };

        if x as i64 > width as i64 || y as i64 > height as i64 {
            debug!("Skipping draw anchored outside the frame at ({}, {})", x, y);
            return Ok(());
        }

        let source = image.to_rgba();
        let source_width = image.width().max(0) as usize;
        let source_height = image.height().max(0) as usize;

        composite_into(
            &mut recording.current,
            (width, height),
            &source,
            (source_width, source_height),
            (x, y),
            self.pool.as_ref(),
        );
        Ok(())
    }

    /// Rasterizes `text` into a `width x height` image and draws it at `(x, y)`.
    pub fn draw_text(&mut self, font: &str, text: &str, x: i32, y: i32, width: u32, height: u32) -> Result<()> {
        if self.recording.is_none() {
            return Err(ConversionError::StateError {
                operation: "draw text",
                state: "no frame is recording",
            });
        }

        let pixels = self.rasterizer.rasterize(font, text, width, height)?;
        let image = RewImage::from_raw(width as i32, height as i32, &pixels, BitsPerPixel::Rgba32)?;
        self.draw(&image, x, y)
    }

    /// Finishes the frame: flips it when configured, blends it against the
    /// previous frame, and blits the result. The drawn frame (after any
    /// flip) becomes the previous frame.
    ///
    /// The surface is released on every path. On failure the previous frame
    /// is kept.
    #[instrument(skip(self))]
    pub fn end(&mut self) -> Result<()> {
        let Recording { current, mut surface } = self.recording.take().ok_or(ConversionError::StateError {
            operation: "end a frame",
            state: "no frame is recording",
        })?;

        let (width, height) = (self.config.width, self.config.height);

        let current = if self.config.flip_vertically {
            flip_vertically(&current, width as usize, height as usize)
        } else {
            current
        };

        let blended = match self.previous.as_deref() {
            Some(previous) => Some(blend_frames(previous, &current, self.config.blend_weight)?),
            None => None,
        };
        let presented = blended.as_deref().unwrap_or(&current);

        {
            let _span = tracing::info_span!("blit").entered();
            surface.blit(presented, width, height)?;
        }

        debug!("Frame presented");
        // The next frame blends against what was drawn, not what was shown.
        self.previous = Some(current);
        Ok(())
    }
}

/// Source-over composites `source` into `frame` at `anchor`, one rayon task
/// per destination row. Each task writes only its own row.
fn composite_into(
    frame: &mut [u8],
    (frame_width, frame_height): (usize, usize),
    source: &[u8],
    (source_width, source_height): (usize, usize),
    (x, y): (i32, i32),
    pool: Option<&ThreadPool>,
) {
    let row_len = frame_width * RGBA;
    if row_len == 0 || source_width == 0 {
        return;
    }

    let (x, y) = (x as i64, y as i64);
    let first_row = y.max(0);
    let end_row = (y + source_height as i64).min(frame_height as i64);
    let first_col = x.max(0);
    let end_col = (x + source_width as i64).min(frame_width as i64);
    if first_row >= end_row || first_col >= end_col {
        return;
    }

    let (first_row, end_row) = (first_row as usize, end_row as usize);
    let (first_col, end_col) = (first_col as usize, end_col as usize);
    let source_col = (first_col as i64 - x) as usize;
    let span = end_col - first_col;

    let rows = &mut frame[first_row * row_len..end_row * row_len];
    let mut work = move || {
        rows.par_chunks_mut(row_len).enumerate().for_each(|(i, dst_row)| {
            let source_row = (first_row + i) as i64 - y;
            let start = (source_row as usize * source_width + source_col) * RGBA;
            composite_row(
                &mut dst_row[first_col * RGBA..end_col * RGBA],
                &source[start..start + span * RGBA],
            );
        });
    };

    match pool {
        Some(pool) => pool.install(work),
        None => work(),
    }
}

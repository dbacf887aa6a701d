//! Compositor configuration types

/// Configuration for one presentation target
#[derive(Debug, Clone, PartialEq)]
pub struct CompositorConfig {
    /// Frame width in pixels
    pub width: u32,
    /// Frame height in pixels
    pub height: u32,
    /// Weight of the new frame when blending against the previous one.
    /// 0.0 presents the previous frame unchanged, 1.0 the new frame.
    pub blend_weight: f32,
    /// Whether to flip frames vertically before presenting
    pub flip_vertically: bool,
    /// Threads used for row-parallel compositing (0 uses the global rayon pool)
    pub worker_threads: usize,
}

impl Default for CompositorConfig {
    fn default() -> Self {
        Self {
            width: 640,
            height: 480,
            blend_weight: 0.0,
            flip_vertically: false,
            worker_threads: 0,
        }
    }
}

impl CompositorConfig {
    pub fn builder() -> CompositorConfigBuilder {
        CompositorConfigBuilder::default()
    }

    /// Bytes in one RGBA frame.
    pub fn frame_len(&self) -> usize {
        self.width as usize * self.height as usize * 4
    }
}

/// Builder for CompositorConfig
#[derive(Default)]
pub struct CompositorConfigBuilder {
    size: Option<(u32, u32)>,
    blend_weight: Option<f32>,
    flip_vertically: Option<bool>,
    worker_threads: Option<usize>,
}

impl CompositorConfigBuilder {
    pub fn size(mut self, width: u32, height: u32) -> Self {
        self.size = Some((width, height));
        self
    }

    pub fn blend_weight(mut self, weight: f32) -> Self {
        self.blend_weight = Some(weight);
        self
    }

    pub fn flip_vertically(mut self, flip: bool) -> Self {
        self.flip_vertically = Some(flip);
        self
    }

    pub fn worker_threads(mut self, threads: usize) -> Self {
        self.worker_threads = Some(threads);
        self
    }

    pub fn build(self) -> CompositorConfig {
        let default = CompositorConfig::default();
        let (width, height) = self.size.unwrap_or((default.width, default.height));
        CompositorConfig {
            width,
            height,
            blend_weight: self.blend_weight.unwrap_or(default.blend_weight),
            flip_vertically: self.flip_vertically.unwrap_or(default.flip_vertically),
            worker_threads: self.worker_threads.unwrap_or(default.worker_threads),
        }
    }
}

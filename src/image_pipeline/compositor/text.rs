use crate::image_pipeline::common::error::Result;

pub trait FontRasterizer {
    /// Renders `text` into a `width x height` packed RGBA buffer.
    fn rasterize(&self, font: &str, text: &str, width: u32, height: u32) -> Result<Vec<u8>>;
}

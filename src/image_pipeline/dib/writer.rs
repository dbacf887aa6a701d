use std::io::Write;
use crate::image_pipeline::common::error::Result;
use crate::image_pipeline::dib::types::DibHeaderVariant;
use crate::image_pipeline::rew::RewImage;

pub trait BmpWriter {
    /// Writes `image` as a bitmap file. `variant` forces a header layout;
    /// `None` picks one from the image's channel count.
    fn write_bmp(&self, image: &RewImage, output: &mut dyn Write, variant: Option<DibHeaderVariant>) -> Result<()>;
}

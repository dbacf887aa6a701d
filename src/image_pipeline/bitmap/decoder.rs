use crate::image_pipeline::bitmap::types::DecodedBitmap;
use crate::image_pipeline::common::error::Result;

pub trait BitmapDecoder {
    fn decode(&self, data: &[u8]) -> Result<DecodedBitmap>;
}

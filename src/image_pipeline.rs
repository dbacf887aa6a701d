//! Image processing pipeline module
//!
//! This module provides the REW raster format and everything around it:
//! pixel blending, decoding of common image files, bitmap export, frame
//! compositing, and file conversion orchestration.

pub mod pixel;
pub mod rew;
pub mod bitmap;
pub mod dib;
pub mod compositor;
pub mod conversions;
pub mod common;

pub use common::{
    ConversionError,
    Result,
};

pub use pixel::Pixel;

pub use rew::{
    BitsPerPixel,
    RewHeader,
    RewImage,
};

pub use bitmap::{
    BitmapDecoder,
    DecodedBitmap,
    ImageCrateDecoder,
    PixelFormat,
};

pub use dib::{
    BmpWriter,
    DibHeaderVariant,
    StandardBmpWriter,
    export_bmp,
    export_bmp_with_header,
};

pub use compositor::{
    CompositorConfig,
    FontRasterizer,
    FontdueRasterizer,
    RewBatch,
    Surface,
};

pub use conversions::{
    BatchReport,
    ConversionConfig,
    ConversionConfigBuilder,
    ConversionOutcome,
    ExistingFilePolicy,
    ImageToRewPipeline,
    OverwriteDecision,
    RewToBmpPipeline,
};

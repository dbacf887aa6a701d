//! Bitmap (DIB) export module
//!
//! This module turns REW images into legacy device-independent bitmap files
//! with one of three header variants.

mod writer;
mod standard_bmp_writer;
pub mod header;
pub mod types;


pub use writer::BmpWriter;
pub use standard_bmp_writer::{StandardBmpWriter, export_bmp, export_bmp_with_header};
pub use header::{DibHeader, FileHeader};
pub use types::DibHeaderVariant;

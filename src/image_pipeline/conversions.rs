//! Pipeline conversions module
//!
//! This module contains orchestration logic for file conversions: decoded
//! source images to REW, and REW to bitmap files.

mod image_to_rew;
mod rew_to_bmp;
mod policy;
mod timing;
pub mod types;


pub use image_to_rew::{BatchReport, ImageToRewPipeline};
pub use rew_to_bmp::RewToBmpPipeline;
pub use policy::{ConversionOutcome, ExistingFilePolicy, OverwriteDecision};
pub use timing::{PipelineTimings, StepTiming, Timer};
pub use types::{ConversionConfig, ConversionConfigBuilder};

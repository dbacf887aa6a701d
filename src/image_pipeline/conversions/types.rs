//! Conversion configuration types

use crate::image_pipeline::conversions::policy::ExistingFilePolicy;
use crate::image_pipeline::dib::DibHeaderVariant;
use crate::image_pipeline::rew::BitsPerPixel;

/// Configuration for file conversions
#[derive(Debug, Clone)]
pub struct ConversionConfig {
    /// Pixel depth of produced REW images
    pub bits_per_pixel: BitsPerPixel,
    /// Whether to reject extents that are zero or do not fit the 16-bit
    /// REW header. When disabled, oversized extents wrap.
    pub validate_dimensions: bool,
    /// DIB header layout for bitmap export. `None` picks one from the
    /// image's channel count.
    pub header_variant: Option<DibHeaderVariant>,
    /// What to do when an output file already exists
    pub existing_files: ExistingFilePolicy,
}

impl Default for ConversionConfig {
    fn default() -> Self {
        Self {
            bits_per_pixel: BitsPerPixel::Rgba32,
            validate_dimensions: true,
            header_variant: None,
            existing_files: ExistingFilePolicy::Fail,
        }
    }
}

impl ConversionConfig {
    pub fn builder() -> ConversionConfigBuilder {
        ConversionConfigBuilder::default()
    }
}

/// Builder for ConversionConfig
#[derive(Default)]
pub struct ConversionConfigBuilder {
    bits_per_pixel: Option<BitsPerPixel>,
    validate_dimensions: Option<bool>,
    header_variant: Option<Option<DibHeaderVariant>>,
    existing_files: Option<ExistingFilePolicy>,
}

impl ConversionConfigBuilder {
    pub fn bits_per_pixel(mut self, bits_per_pixel: BitsPerPixel) -> Self {
        self.bits_per_pixel = Some(bits_per_pixel);
        self
    }

    pub fn validate_dimensions(mut self, validate: bool) -> Self {
        self.validate_dimensions = Some(validate);
        self
    }

    pub fn header_variant(mut self, variant: Option<DibHeaderVariant>) -> Self {
        self.header_variant = Some(variant);
        self
    }

    pub fn existing_files(mut self, policy: ExistingFilePolicy) -> Self {
        self.existing_files = Some(policy);
        self
    }

    pub fn build(self) -> ConversionConfig {
        let default = ConversionConfig::default();
        ConversionConfig {
            bits_per_pixel: self.bits_per_pixel.unwrap_or(default.bits_per_pixel),
            validate_dimensions: self.validate_dimensions.unwrap_or(default.validate_dimensions),
            header_variant: self.header_variant.unwrap_or(default.header_variant),
            existing_files: self.existing_files.unwrap_or(default.existing_files),
        }
    }
}

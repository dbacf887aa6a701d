use tracing::{info, instrument};
use std::io::Write;
use std::path::Path;

use crate::image_pipeline::{
    common::error::{ConversionError, Result},
    conversions::{
        policy::{ConversionOutcome, resolve_with_policy},
        types::ConversionConfig,
    },
    dib::{BmpWriter, StandardBmpWriter},
    rew::RewImage,
};

pub struct RewToBmpPipeline<W: BmpWriter> {
    writer: W,
    config: ConversionConfig,
}

impl RewToBmpPipeline<StandardBmpWriter> {
    pub fn new(config: ConversionConfig) -> Self {
        Self {
            writer: StandardBmpWriter,
            config,
        }
    }
}

impl<W: BmpWriter> RewToBmpPipeline<W> {
    pub fn with_custom(writer: W, config: ConversionConfig) -> Self {
        Self { writer, config }
    }

    /// Parses REW bytes and writes them out as a bitmap file.
    #[instrument(skip(self, input_data, output), fields(input_size = input_data.len()))]
    pub fn convert(&self, input_data: &[u8], output: &mut dyn Write) -> Result<RewImage> {
        info!("Starting REW to BMP conversion");

        let image = {
            let _span = tracing::info_span!("decode_rew").entered();
            RewImage::from_bytes(input_data)?
        };

        {
            let _span = tracing::info_span!("encode_bmp",
                width = image.width(),
                height = image.height()
            ).entered();
            self.writer.write_bmp(&image, output, self.config.header_variant)?;
        }

        info!(
            width = image.width(),
            height = image.height(),
            "Conversion complete"
        );
        Ok(image)
    }

    #[instrument(skip(self, input_path, output_path))]
    pub fn convert_file<P: AsRef<Path>, Q: AsRef<Path>>(
        &self,
        input_path: P,
        output_path: Q,
    ) -> Result<ConversionOutcome> {
        let input_path = input_path.as_ref();
        let output_path = output_path.as_ref();

        let Some(target) = resolve_with_policy(output_path, self.config.existing_files)? else {
            return Ok(ConversionOutcome::Skipped(output_path.to_path_buf()));
        };

        info!(
            input = %input_path.display(),
            output = %target.display(),
            "Converting file"
        );

        let input_data = {
            let _span = tracing::info_span!("read_input_file").entered();
            std::fs::read(input_path).map_err(|e| {
                ConversionError::InputReadError(format!("{}: {}", input_path.display(), e))
            })?
        };

        // Encode fully before touching the target so a bad input leaves no file behind.
        let mut encoded = Vec::new();
        self.convert(&input_data, &mut encoded)?;

        {
            let _span = tracing::info_span!("write_output_file").entered();
            std::fs::write(&target, &encoded).map_err(|e| {
                ConversionError::OutputWriteError(format!("{}: {}", target.display(), e))
            })?;
        }

        Ok(ConversionOutcome::Written(target))
    }

    pub fn config(&self) -> &ConversionConfig {
        &self.config
    }

    pub fn set_config(&mut self, config: ConversionConfig) {
        self.config = config;
    }
}

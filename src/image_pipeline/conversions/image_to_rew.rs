use tracing::{info, instrument, warn};
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::image_pipeline::{
    bitmap::{BitmapDecoder, ImageCrateDecoder},
    common::error::{ConversionError, Result},
    conversions::{
        policy::{ConversionOutcome, OverwriteDecision, resolve_target, resolve_with_policy},
        timing::{PipelineTimings, Timer},
        types::ConversionConfig,
    },
    rew::RewImage,
};

/// Outcome of a batch conversion
#[derive(Debug, Default)]
pub struct BatchReport {
    pub converted: Vec<PathBuf>,
    pub skipped: Vec<PathBuf>,
    pub failed: Vec<(PathBuf, String)>,
}

impl BatchReport {
    pub fn is_success(&self) -> bool {
        self.failed.is_empty()
    }
}

pub struct ImageToRewPipeline<D: BitmapDecoder> {
    decoder: D,
    config: ConversionConfig,
}

impl ImageToRewPipeline<ImageCrateDecoder> {
    pub fn new(config: ConversionConfig) -> Self {
        Self {
            decoder: ImageCrateDecoder,
            config,
        }
    }
}

impl<D: BitmapDecoder> ImageToRewPipeline<D> {
    pub fn with_custom(decoder: D, config: ConversionConfig) -> Self {
        Self { decoder, config }
    }

    fn validate_dimensions(&self, width: u32, height: u32) -> Result<()> {
        if !self.config.validate_dimensions {
            return Ok(());
        }

        let max = i16::MAX as u32;
        if width == 0 || height == 0 || width > max || height > max {
            return Err(ConversionError::InvalidDimensions(width as usize, height as usize));
        }

        Ok(())
    }

    /// Decodes `input_data`, converts it to REW, and writes it to `output`.
    #[instrument(skip(self, input_data, output), fields(input_size = input_data.len()))]
    pub fn convert(&self, input_data: &[u8], output: &mut dyn Write) -> Result<RewImage> {
        self.convert_timed(input_data, output, &mut PipelineTimings::new())
    }

    fn convert_timed(
        &self,
        input_data: &[u8],
        output: &mut dyn Write,
        timings: &mut PipelineTimings,
    ) -> Result<RewImage> {
        info!("Starting image to REW conversion");

        let bitmap = {
            let _span = tracing::info_span!("decode_source").entered();
            let timer = Timer::start("decode");
            let bitmap = self.decoder.decode(input_data)?;
            timings.record(timer);
            bitmap
        };

        {
            let _span = tracing::info_span!("validate_dimensions",
                width = bitmap.width,
                height = bitmap.height
            ).entered();
            self.validate_dimensions(bitmap.width, bitmap.height)?;
        }

        let image = {
            let _span = tracing::info_span!("ingest").entered();
            let timer = Timer::start("ingest");
            let image = RewImage::ingest(&bitmap, self.config.bits_per_pixel)?;
            timings.record(timer);
            image
        };

        {
            let _span = tracing::info_span!("encode_rew").entered();
            let timer = Timer::start("encode");
            image.write(output)?;
            timings.record(timer);
        }

        info!(
            width = image.width(),
            height = image.height(),
            bits_per_pixel = image.bits_per_pixel().bits(),
            "Conversion complete"
        );
        Ok(image)
    }

    /// Converts `input_path` into `output_path`, applying the configured
    /// existing-file policy.
    #[instrument(skip(self, input_path, output_path))]
    pub fn convert_file<P: AsRef<Path>, Q: AsRef<Path>>(
        &self,
        input_path: P,
        output_path: Q,
    ) -> Result<ConversionOutcome> {
        let output_path = output_path.as_ref();
        match resolve_with_policy(output_path, self.config.existing_files)? {
            Some(target) => {
                self.convert_to_target(input_path.as_ref(), &target, &mut PipelineTimings::new())?;
                Ok(ConversionOutcome::Written(target))
            }
            None => Ok(ConversionOutcome::Skipped(output_path.to_path_buf())),
        }
    }

    /// Converts `input_path` into `output_path`, asking `policy` what to do
    /// whenever the target already exists.
    pub fn convert_file_with<P, Q, F>(
        &self,
        input_path: P,
        output_path: Q,
        policy: F,
    ) -> Result<ConversionOutcome>
    where
        P: AsRef<Path>,
        Q: AsRef<Path>,
        F: FnMut(&Path) -> OverwriteDecision,
    {
        self.convert_file_timed(input_path.as_ref(), output_path.as_ref(), policy, &mut PipelineTimings::new())
    }

    fn convert_file_timed<F>(
        &self,
        input_path: &Path,
        output_path: &Path,
        policy: F,
        timings: &mut PipelineTimings,
    ) -> Result<ConversionOutcome>
    where
        F: FnMut(&Path) -> OverwriteDecision,
    {
        match resolve_target(output_path, policy) {
            Some(target) => {
                self.convert_to_target(input_path, &target, timings)?;
                Ok(ConversionOutcome::Written(target))
            }
            None => Ok(ConversionOutcome::Skipped(output_path.to_path_buf())),
        }
    }

    fn convert_to_target(&self, input_path: &Path, target: &Path, timings: &mut PipelineTimings) -> Result<()> {
        info!(
            input = %input_path.display(),
            output = %target.display(),
            "Converting file"
        );

        let input_data = {
            let _span = tracing::info_span!("read_input_file").entered();
            let timer = Timer::start("read");
            let data = std::fs::read(input_path).map_err(|e| {
                ConversionError::InputReadError(format!("{}: {}", input_path.display(), e))
            })?;
            timings.record(timer);
            data
        };

        let mut encoded = Vec::new();
        self.convert_timed(&input_data, &mut encoded, timings)?;

        {
            let _span = tracing::info_span!("write_output_file").entered();
            let timer = Timer::start("write");
            std::fs::write(target, &encoded).map_err(|e| {
                ConversionError::OutputWriteError(format!("{}: {}", target.display(), e))
            })?;
            timings.record(timer);
        }

        Ok(())
    }

    /// Converts every input into `<out_dir>/<file stem>.rew`.
    ///
    /// Failures are recorded in the report and do not stop the batch.
    #[instrument(skip(self, inputs, out_dir, policy), fields(count = inputs.len()))]
    pub fn convert_batch<F>(&self, inputs: &[PathBuf], out_dir: &Path, mut policy: F) -> BatchReport
    where
        F: FnMut(&Path) -> OverwriteDecision,
    {
        let mut report = BatchReport::default();
        let mut timings = PipelineTimings::new();

        for input in inputs {
            let Some(stem) = input.file_stem() else {
                warn!(input = %input.display(), "Input has no file name");
                report.failed.push((input.clone(), "input has no file name".to_string()));
                continue;
            };
            let output = out_dir.join(stem).with_extension("rew");

            match self.convert_file_timed(input, &output, &mut policy, &mut timings) {
                Ok(ConversionOutcome::Written(path)) => report.converted.push(path),
                Ok(ConversionOutcome::Skipped(path)) => report.skipped.push(path),
                Err(e) => {
                    warn!(input = %input.display(), error = %e, "Conversion failed");
                    report.failed.push((input.clone(), e.to_string()));
                }
            }
        }

        info!(
            converted = report.converted.len(),
            skipped = report.skipped.len(),
            failed = report.failed.len(),
            "Batch complete"
        );
        timings.log_summary();
        report
    }

    pub fn config(&self) -> &ConversionConfig {
        &self.config
    }

    pub fn set_config(&mut self, config: ConversionConfig) {
        self.config = config;
    }
}

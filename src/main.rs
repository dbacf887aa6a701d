use std::path::PathBuf;

use anyhow::{Context, bail};
use clap::{Parser, Subcommand};
use tracing::{error, info};

use rewfile_rs::image_pipeline::{
    BitsPerPixel, ConversionConfig, DibHeaderVariant, ExistingFilePolicy, ImageToRewPipeline,
    OverwriteDecision, RewHeader, RewImage, RewToBmpPipeline,
};
use rewfile_rs::logger;

/// Convert images to and from the REW raster format
#[derive(Parser, Debug)]
#[command(name = "rewfile", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Convert PNG/JPEG/BMP/GIF images into REW files
    Convert {
        /// Source images
        #[arg(value_name = "INPUTS", required = true)]
        inputs: Vec<PathBuf>,

        /// Directory receiving `<stem>.rew` files
        #[arg(long, value_name = "DIR")]
        out_dir: PathBuf,

        /// Bits per pixel of the produced files (24 or 32)
        #[arg(long, default_value = "32", value_parser = parse_bpp)]
        bpp: BitsPerPixel,

        /// What to do with outputs that already exist
        #[arg(long, default_value = "fail", value_name = "overwrite|skip|fail")]
        existing: ExistingFilePolicy,
    },

    /// Export a REW file as a BMP
    ExportBmp {
        input: PathBuf,
        output: PathBuf,

        /// Force a DIB header layout (v1, v2 or v3)
        #[arg(long, value_name = "VARIANT")]
        header: Option<DibHeaderVariant>,
    },

    /// Print the header of a REW file
    Info {
        input: PathBuf,
    },
}

fn parse_bpp(s: &str) -> Result<BitsPerPixel, String> {
    let bits: i32 = s.parse().map_err(|_| format!("'{}' is not a number", s))?;
    BitsPerPixel::try_from(bits).map_err(|e| e.to_string())
}

fn main() -> anyhow::Result<()> {
    logger::init();
    let cli = Cli::parse();

    match cli.command {
        Command::Convert { inputs, out_dir, bpp, existing } => convert(inputs, out_dir, bpp, existing),
        Command::ExportBmp { input, output, header } => export_bmp(input, output, header),
        Command::Info { input } => print_info(input),
    }
}

fn convert(inputs: Vec<PathBuf>, out_dir: PathBuf, bpp: BitsPerPixel, existing: ExistingFilePolicy) -> anyhow::Result<()> {
    std::fs::create_dir_all(&out_dir)
        .with_context(|| format!("creating output directory {}", out_dir.display()))?;

    let config = ConversionConfig::builder()
        .bits_per_pixel(bpp)
        .existing_files(existing)
        .build();
    let pipeline = ImageToRewPipeline::new(config);

    let mut refused = Vec::new();
    let report = pipeline.convert_batch(&inputs, &out_dir, |path| match existing {
        ExistingFilePolicy::Overwrite => OverwriteDecision::Overwrite,
        ExistingFilePolicy::Skip => OverwriteDecision::Skip,
        ExistingFilePolicy::Fail => {
            refused.push(path.to_path_buf());
            OverwriteDecision::Skip
        }
    });

    for (input, reason) in &report.failed {
        error!(input = %input.display(), "{}", reason);
    }
    info!(
        "{} converted, {} skipped, {} failed",
        report.converted.len(),
        report.skipped.len(),
        report.failed.len()
    );

    if !refused.is_empty() {
        bail!(
            "{} output file(s) already exist; pass --existing overwrite or --existing skip",
            refused.len()
        );
    }
    if !report.is_success() {
        bail!("{} of {} conversions failed", report.failed.len(), inputs.len());
    }
    Ok(())
}

fn export_bmp(input: PathBuf, output: PathBuf, header: Option<DibHeaderVariant>) -> anyhow::Result<()> {
    let config = ConversionConfig::builder()
        .header_variant(header)
        .existing_files(ExistingFilePolicy::Overwrite)
        .build();
    let pipeline = RewToBmpPipeline::new(config);

    pipeline
        .convert_file(&input, &output)
        .with_context(|| format!("exporting {} to {}", input.display(), output.display()))?;
    info!("Wrote {}", output.display());
    Ok(())
}

fn print_info(input: PathBuf) -> anyhow::Result<()> {
    let bytes = std::fs::read(&input).with_context(|| format!("reading {}", input.display()))?;
    let header = RewHeader::parse(&bytes)?;

    println!("{}", input.display());
    println!("  width:          {}", header.width);
    println!("  height:         {}", header.height);
    println!("  bits per pixel: {}", header.bits_per_pixel.bits());
    println!("  total length:   {}", header.total_length);
    match RewImage::from_bytes(&bytes) {
        Ok(image) => println!("  pixels:         {} ({} bytes)", image.pixel_count(), image.pixel_bytes().len()),
        Err(e) => println!("  pixels:         unreadable ({})", e),
    }
    Ok(())
}

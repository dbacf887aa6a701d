use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConversionError {
    #[error("Failed to read input file: {0}")]
    InputReadError(String),

    #[error("Failed to write output file: {0}")]
    OutputWriteError(String),

    #[error("Failed to decode source image: {0}")]
    DecodeError(String),

    #[error("Malformed REW data: {0}")]
    FormatError(String),

    #[error("Unsupported bits per pixel: {0} (expected 24 or 32)")]
    UnsupportedBitsPerPixel(i32),

    #[error("Pixel buffer size mismatch: expected {expected} bytes, got {actual}")]
    SizeMismatchError { expected: usize, actual: usize },

    #[error("Invalid image dimensions: width={0}, height={1}")]
    InvalidDimensions(usize, usize),

    #[error("Cannot {operation} while {state}")]
    StateError {
        operation: &'static str,
        state: &'static str,
    },

    #[error("Surface error: {0}")]
    ResourceError(String),

    #[error("Font error: {0}")]
    FontError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, ConversionError>;

//! Error types for the cjpeg library.

use std::io;

use thiserror::Error;

/// Result type alias for cjpeg operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while reading input or encoding an image.
///
/// Every variant is fatal for the encode run that produced it. Nothing is
/// retried, and a failed run never reports partial success.
#[derive(Debug, Error)]
pub enum Error {
    /// A working buffer could not be allocated.
    #[error("Failed to allocate {bytes} bytes")]
    AllocationFailure {
        /// Requested allocation size.
        bytes: usize,
    },
    /// The pixel source was exhausted early or failed to read.
    #[error("Failed to read source: {0}")]
    SourceReadFailure(#[source] io::Error),
    /// The destination failed to accept bytes.
    #[error("Failed to write output: {0}")]
    SinkWriteFailure(#[source] io::Error),
    /// The input is not something this encoder accepts.
    #[error("Unsupported input: {0}")]
    UnsupportedInput(String),
    /// Invalid image dimensions (zero width or height).
    #[error("Invalid image dimensions: {width}x{height}")]
    InvalidDimensions {
        /// Image width.
        width: u32,
        /// Image height.
        height: u32,
    },
    /// Pixel data length doesn't match expected size.
    #[error("Invalid pixel data length: expected {expected} bytes, got {actual}")]
    InvalidDataLength {
        /// Expected number of bytes.
        expected: usize,
        /// Actual number of bytes provided.
        actual: usize,
    },
    /// Invalid quality parameter (must be 1-100).
    #[error("Invalid quality {0}: must be 1-100")]
    InvalidQuality(u8),
    /// Invalid quantization scale factor (must be 1-5000).
    #[error("Invalid scale factor {0}: must be 1-5000")]
    InvalidScaleFactor(u32),
    /// Output buffer size of zero.
    #[error("Invalid output buffer size: must be non-zero")]
    InvalidBufferSize,
    /// Image dimensions exceed what a JPEG frame header can describe.
    #[error("Image {width}x{height} exceeds maximum dimension {max}")]
    ImageTooLarge {
        /// Image width.
        width: u32,
        /// Image height.
        height: u32,
        /// Maximum supported dimension.
        max: u32,
    },
    /// A Huffman table specification is malformed.
    #[error("Invalid Huffman table: {0}")]
    InvalidHuffmanTable(&'static str),
}

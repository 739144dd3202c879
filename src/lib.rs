//! # cjpeg
//!
//! A baseline JPEG encoder for 24-bit pixel data.
//!
//! The encoder produces a JFIF stream with one interleaved sequential scan:
//! three 1x1-sampled YCbCr components, quantization tables scaled from the
//! standard luminance/chrominance tables, and the standard Huffman tables.
//!
//! ## Features
//!
//! - **AAN floating-point forward DCT** with quantizer-folded scaling
//! - **Fixed-point BGR to YCbCr** conversion
//! - **Streaming output** through any [`std::io::Write`] sink
//! - **BMP input** (uncompressed 24-bit) for the `cjpeg` command-line tool
//!
//! ## Example
//!
//! ```rust
//! use cjpeg::{jpeg, ColorType};
//!
//! // Encode a 1x1 red RGB pixel at quality 85
//! let rgb_pixels: Vec<u8> = vec![255, 0, 0];
//! let jpeg_data = jpeg::encode(&rgb_pixels, 1, 1, 85).unwrap();
//! assert_eq!(&jpeg_data[..2], &[0xFF, 0xD8]);
//!
//! // BGR input with an explicit scale factor
//! let options = jpeg::JpegOptions::with_scale_factor(50);
//! let bgr_pixels: Vec<u8> = vec![0, 0, 255];
//! let jpeg_data =
//!     jpeg::encode_with_options(&bgr_pixels, 1, 1, ColorType::Bgr, &options).unwrap();
//! assert_eq!(&jpeg_data[jpeg_data.len() - 2..], &[0xFF, 0xD9]);
//! ```

#![forbid(unsafe_code)]

pub mod bits;
pub mod bmp;
pub mod color;
pub mod error;
pub mod jpeg;

pub use color::ColorType;
pub use error::{Error, Result};
pub use jpeg::{Encoder, JpegOptions};

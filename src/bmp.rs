//! Minimal reader for uncompressed 24-bit BMP files.
//!
//! Accepts the `BM` file header followed by a BITMAPINFOHEADER-family DIB
//! header. Rows may be stored bottom-up (positive height) or top-down
//! (negative height) and are padded to 4-byte boundaries.

use std::io::{self, Read};

use crate::color::ColorType;
use crate::error::{Error, Result};
use crate::jpeg::blocks::PaddedImage;

const FILE_HEADER_LEN: usize = 14;
const MIN_INFO_HEADER_LEN: u32 = 40;
const BI_RGB: u32 = 0;

/// Decoded BMP pixels: top-down rows of BGR triples without row padding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BmpImage {
    width: u32,
    height: u32,
    pixels: Vec<u8>,
}

impl BmpImage {
    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Pixel bytes in B, G, R order.
    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    /// Copy the pixels into a block-aligned buffer for the encoder.
    pub fn into_padded(self) -> Result<PaddedImage> {
        PaddedImage::new(&self.pixels, self.width, self.height, ColorType::Bgr)
    }
}

fn u16_at(data: &[u8], offset: usize) -> u16 {
    u16::from_le_bytes([data[offset], data[offset + 1]])
}

fn u32_at(data: &[u8], offset: usize) -> u32 {
    u32::from_le_bytes([
        data[offset],
        data[offset + 1],
        data[offset + 2],
        data[offset + 3],
    ])
}

fn truncated(what: &str) -> Error {
    Error::SourceReadFailure(io::Error::new(
        io::ErrorKind::UnexpectedEof,
        format!("BMP truncated: {what}"),
    ))
}

/// Read a whole BMP stream.
pub fn read_bmp<R: Read>(mut reader: R) -> Result<BmpImage> {
    let mut data = Vec::new();
    reader
        .read_to_end(&mut data)
        .map_err(Error::SourceReadFailure)?;
    parse_bmp(&data)
}

/// Parse a BMP file held in memory.
pub fn parse_bmp(data: &[u8]) -> Result<BmpImage> {
    if data.len() < 2 || &data[..2] != b"BM" {
        return Err(Error::UnsupportedInput("missing BM signature".into()));
    }
    if data.len() < FILE_HEADER_LEN + MIN_INFO_HEADER_LEN as usize {
        return Err(truncated("header"));
    }

    let pixel_offset = u32_at(data, 10) as usize;
    let info_len = u32_at(data, 14);
    if info_len < MIN_INFO_HEADER_LEN {
        return Err(Error::UnsupportedInput(format!(
            "DIB header of {info_len} bytes"
        )));
    }

    let width = u32_at(data, 18) as i32;
    let raw_height = u32_at(data, 22) as i32;
    let planes = u16_at(data, 26);
    let bits_per_pixel = u16_at(data, 28);
    let compression = u32_at(data, 30);

    if planes != 1 {
        return Err(Error::UnsupportedInput(format!("{planes} color planes")));
    }
    if bits_per_pixel != 24 {
        return Err(Error::UnsupportedInput(format!(
            "{bits_per_pixel} bits per pixel"
        )));
    }
    if compression != BI_RGB {
        return Err(Error::UnsupportedInput(format!(
            "compression method {compression}"
        )));
    }
    if width <= 0 || raw_height == 0 {
        return Err(Error::InvalidDimensions {
            width: width.max(0) as u32,
            height: raw_height.unsigned_abs(),
        });
    }

    let width = width as u32;
    let height = raw_height.unsigned_abs();
    let top_down = raw_height < 0;

    let row_bytes = width as u64 * 3;
    let stride = (row_bytes + 3) & !3;
    let needed = pixel_offset as u64 + stride * (height as u64 - 1) + row_bytes;
    if (data.len() as u64) < needed {
        return Err(truncated("pixel data"));
    }

    let (row_bytes, stride) = (row_bytes as usize, stride as usize);
    let total = row_bytes * height as usize;
    let mut pixels = Vec::new();
    pixels
        .try_reserve_exact(total)
        .map_err(|_| Error::AllocationFailure { bytes: total })?;

    for y in 0..height as usize {
        let stored_row = if top_down { y } else { height as usize - 1 - y };
        let start = pixel_offset + stored_row * stride;
        pixels.extend_from_slice(&data[start..start + row_bytes]);
    }

    log::debug!(
        "read {}x{} BMP ({}), pixel data at offset {}",
        width,
        height,
        if top_down { "top-down" } else { "bottom-up" },
        pixel_offset
    );

    Ok(BmpImage {
        width,
        height,
        pixels,
    })
}

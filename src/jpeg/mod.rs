//! JPEG encoder implementation.
//!
//! Baseline sequential DCT (SOF0) with three 1x1-sampled YCbCr components,
//! the standard Huffman tables, and one interleaved scan.
//!
//! Pipeline per 8x8 block: BGR to YCbCr, forward DCT, quantization, zigzag
//! reordering, then DC-differential and run-length Huffman coding.

pub mod blocks;
pub mod dct;
pub mod entropy;
pub mod huffman;
pub mod marker;
pub mod quantize;

use std::io::Write;

use crate::bits::{BitWriter, DEFAULT_BUFFER_SIZE};
use crate::color::{bgr_block_to_ycc, ColorType};
use crate::error::{Error, Result};

use blocks::PaddedImage;
use dct::forward_dct;
use entropy::encode_block;
use huffman::{HuffmanTable, HuffmanTables};
use quantize::{
    quantize_block, scale_factor_for_quality, QuantizationTables, DEFAULT_SCALE_FACTOR,
};

/// Maximum supported image dimension for JPEG.
pub const MAX_DIMENSION: u32 = 65535;

/// Largest accepted quantization scale factor.
pub const MAX_SCALE_FACTOR: u32 = 5000;

/// Encode raw RGB pixel data as JPEG.
///
/// # Arguments
/// * `data` - Raw pixel data (RGB, row-major order)
/// * `width` - Image width in pixels
/// * `height` - Image height in pixels
/// * `quality` - Quality level 1-100 (higher = better quality, larger file)
///
/// # Returns
/// Complete JPEG file as bytes.
pub fn encode(data: &[u8], width: u32, height: u32, quality: u8) -> Result<Vec<u8>> {
    if quality == 0 || quality > 100 {
        return Err(Error::InvalidQuality(quality));
    }
    let options = JpegOptions::with_quality(quality);
    encode_with_options(data, width, height, ColorType::Rgb, &options)
}

/// JPEG encoding options.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct JpegOptions {
    /// Percentage applied to the standard quantization tables (1-5000).
    pub scale_factor: u32,
    /// Size of the output staging buffer in bytes.
    pub buffer_size: usize,
}

impl Default for JpegOptions {
    fn default() -> Self {
        Self {
            scale_factor: DEFAULT_SCALE_FACTOR,
            buffer_size: DEFAULT_BUFFER_SIZE,
        }
    }
}

impl JpegOptions {
    /// Options using a scale factor directly.
    pub fn with_scale_factor(scale_factor: u32) -> Self {
        Self {
            scale_factor,
            ..Self::default()
        }
    }

    /// Options from a libjpeg-style quality level (1-100).
    pub fn with_quality(quality: u8) -> Self {
        Self::with_scale_factor(scale_factor_for_quality(quality))
    }

    /// Check the options against the encoder's accepted ranges.
    pub fn validate(&self) -> Result<()> {
        if self.scale_factor == 0 || self.scale_factor > MAX_SCALE_FACTOR {
            return Err(Error::InvalidScaleFactor(self.scale_factor));
        }
        if self.buffer_size == 0 {
            return Err(Error::InvalidBufferSize);
        }
        Ok(())
    }
}

/// A configured encoder.
///
/// Holds the quantization and Huffman tables, which are built once and only
/// read afterwards, so one encoder can serve many images and threads. Each
/// encode keeps its own DC predictors and output buffer.
#[derive(Debug, Clone)]
pub struct Encoder {
    options: JpegOptions,
    quant_tables: QuantizationTables,
    huff_tables: HuffmanTables,
}

impl Encoder {
    /// Validate `options` and build the tables.
    pub fn new(options: JpegOptions) -> Result<Self> {
        options.validate()?;
        let quant_tables = QuantizationTables::with_scale_factor(options.scale_factor);
        let huff_tables = HuffmanTables::standard()?;
        log::debug!(
            "encoder ready: scale factor {}, buffer {} bytes, luma DC quant {}",
            options.scale_factor,
            options.buffer_size,
            quant_tables.luminance_table[0]
        );
        Ok(Self {
            options,
            quant_tables,
            huff_tables,
        })
    }

    pub fn options(&self) -> &JpegOptions {
        &self.options
    }

    pub fn quantization_tables(&self) -> &QuantizationTables {
        &self.quant_tables
    }

    pub fn huffman_tables(&self) -> &HuffmanTables {
        &self.huff_tables
    }

    /// Encode a padded image as a complete JPEG stream into `sink`.
    ///
    /// Returns the sink once every byte has been handed to it.
    pub fn encode_image<W: Write>(&self, sink: W, image: &PaddedImage) -> Result<W> {
        let mut writer = BitWriter::with_capacity(sink, self.options.buffer_size)?;

        // Write JPEG headers
        marker::write_soi(&mut writer)?;
        marker::write_app0(&mut writer)?;
        marker::write_dqt(&mut writer, &self.quant_tables)?;
        // PaddedImage guarantees both dimensions fit in 16 bits
        marker::write_sof0(&mut writer, image.width() as u16, image.height() as u16)?;
        marker::write_dht(&mut writer, &self.huff_tables)?;
        marker::write_sos(&mut writer)?;
        let header_len = writer.len();

        // Write scan data
        let mut prev_dc = [0i16; 3];
        for block in image.blocks() {
            let unit = bgr_block_to_ycc(&block);
            let [y_dc, cb_dc, cr_dc] = prev_dc;
            prev_dc = [
                self.encode_component(&mut writer, &unit.y, y_dc, Component::Luma)?,
                self.encode_component(&mut writer, &unit.cb, cb_dc, Component::Chroma)?,
                self.encode_component(&mut writer, &unit.cr, cr_dc, Component::Chroma)?,
            ];
        }
        writer.flush_alignment()?;

        // Write end marker
        marker::write_eoi(&mut writer)?;

        let total = writer.len();
        let sink = writer.finish()?;
        log::debug!(
            "encoded {}x{} ({} blocks): {} header + {} scan bytes",
            image.width(),
            image.height(),
            image.block_count(),
            header_len,
            total - header_len
        );
        Ok(sink)
    }

    fn encode_component<W: Write>(
        &self,
        writer: &mut BitWriter<W>,
        samples: &[i16; 64],
        prev_dc: i16,
        component: Component,
    ) -> Result<i16> {
        let (divisors, dc_table, ac_table): (&[f32; 64], &HuffmanTable, &HuffmanTable) =
            match component {
                Component::Luma => (
                    &self.quant_tables.luminance_divisors,
                    &self.huff_tables.dc_luminance,
                    &self.huff_tables.ac_luminance,
                ),
                Component::Chroma => (
                    &self.quant_tables.chrominance_divisors,
                    &self.huff_tables.dc_chrominance,
                    &self.huff_tables.ac_chrominance,
                ),
            };

        let coeffs = forward_dct(samples);
        let quantized = quantize_block(&coeffs, divisors);
        encode_block(writer, &quantized, prev_dc, dc_table, ac_table)
    }
}

#[derive(Debug, Clone, Copy)]
enum Component {
    Luma,
    Chroma,
}

/// Encode raw pixel data as JPEG with options.
///
/// # Arguments
/// * `data` - Raw pixel data (row-major order, 3 bytes per pixel)
/// * `width` - Image width in pixels
/// * `height` - Image height in pixels
/// * `color_type` - Byte order of each pixel
/// * `options` - JPEG encoding options
///
/// # Returns
/// Complete JPEG file as bytes.
pub fn encode_with_options(
    data: &[u8],
    width: u32,
    height: u32,
    color_type: ColorType,
    options: &JpegOptions,
) -> Result<Vec<u8>> {
    let mut output = Vec::new();
    encode_with_options_into(&mut output, data, width, height, color_type, options)?;
    Ok(output)
}

/// Encode raw pixel data as JPEG with options into a caller-provided buffer.
///
/// The `output` buffer will be cleared and reused, allowing callers to avoid
/// repeated allocations across multiple encodes.
pub fn encode_with_options_into(
    output: &mut Vec<u8>,
    data: &[u8],
    width: u32,
    height: u32,
    color_type: ColorType,
    options: &JpegOptions,
) -> Result<()> {
    output.clear();
    encode_to_writer(&mut *output, data, width, height, color_type, options)?;
    Ok(())
}

/// Encode raw pixel data as JPEG into any writer, returning the writer.
pub fn encode_to_writer<W: Write>(
    writer: W,
    data: &[u8],
    width: u32,
    height: u32,
    color_type: ColorType,
    options: &JpegOptions,
) -> Result<W> {
    let encoder = Encoder::new(*options)?;
    let image = PaddedImage::new(data, width, height, color_type)?;
    encoder.encode_image(writer, &image)
}

//! Marker segments framing a baseline JPEG stream.
//!
//! Segment lengths count the payload plus the two length bytes, not the
//! marker code itself.

use std::io::Write;

use super::huffman::HuffmanTables;
use super::quantize::QuantizationTables;
use crate::bits::BitWriter;
use crate::error::Result;

/// Start of image.
pub const SOI: u8 = 0xD8;
/// End of image.
pub const EOI: u8 = 0xD9;
/// JFIF application segment.
pub const APP0: u8 = 0xE0;
/// Define quantization tables.
pub const DQT: u8 = 0xDB;
/// Baseline DCT frame header.
pub const SOF0: u8 = 0xC0;
/// Define Huffman tables.
pub const DHT: u8 = 0xC4;
/// Start of scan.
pub const SOS: u8 = 0xDA;

/// Component ids and table selectors: (id, quant table, DC/AC tables).
const COMPONENTS: [(u8, u8, u8); 3] = [(1, 0, 0x00), (2, 1, 0x11), (3, 1, 0x11)];

/// Write SOI (Start of Image) marker.
pub fn write_soi<W: Write>(writer: &mut BitWriter<W>) -> Result<()> {
    writer.write_marker(SOI)
}

/// Write EOI (End of Image) marker.
pub fn write_eoi<W: Write>(writer: &mut BitWriter<W>) -> Result<()> {
    writer.write_marker(EOI)
}

/// Write APP0 (JFIF) marker.
pub fn write_app0<W: Write>(writer: &mut BitWriter<W>) -> Result<()> {
    writer.write_marker(APP0)?;

    // Length (16 bytes including length field)
    writer.write_word(16)?;

    // JFIF identifier
    writer.write_bytes(b"JFIF\0")?;

    // Version 1.1
    writer.write_byte(1)?;
    writer.write_byte(1)?;

    // Units: 0 = no units (aspect ratio only)
    writer.write_byte(0)?;

    // X and Y density
    writer.write_word(1)?;
    writer.write_word(1)?;

    // Thumbnail dimensions (0x0 = no thumbnail)
    writer.write_byte(0)?;
    writer.write_byte(0)
}

/// Write DQT with both tables in one segment, luminance first.
pub fn write_dqt<W: Write>(writer: &mut BitWriter<W>, tables: &QuantizationTables) -> Result<()> {
    writer.write_marker(DQT)?;
    writer.write_word(2 + 2 * 65)?;

    writer.write_byte(0)?; // Table 0, 8-bit precision
    writer.write_bytes(&tables.luminance)?;

    writer.write_byte(1)?; // Table 1, 8-bit precision
    writer.write_bytes(&tables.chrominance)
}

/// Write SOF0 (Start of Frame - baseline) for three 1x1 components.
pub fn write_sof0<W: Write>(writer: &mut BitWriter<W>, width: u16, height: u16) -> Result<()> {
    writer.write_marker(SOF0)?;

    // Length: 8 + 3*num_components
    writer.write_word(8 + 3 * COMPONENTS.len() as u16)?;

    // Precision: 8 bits
    writer.write_byte(8)?;

    writer.write_word(height)?;
    writer.write_word(width)?;

    writer.write_byte(COMPONENTS.len() as u8)?;
    for (id, quant_table, _) in COMPONENTS {
        writer.write_byte(id)?;
        writer.write_byte(0x11)?; // H=1, V=1
        writer.write_byte(quant_table)?;
    }
    Ok(())
}

/// Write DHT with all four tables in one segment.
///
/// Order: luminance DC, luminance AC, chrominance DC, chrominance AC.
pub fn write_dht<W: Write>(writer: &mut BitWriter<W>, tables: &HuffmanTables) -> Result<()> {
    let records = [
        (0x00, &tables.dc_luminance),
        (0x10, &tables.ac_luminance),
        (0x01, &tables.dc_chrominance),
        (0x11, &tables.ac_chrominance),
    ];

    let length: usize = 2 + records
        .iter()
        .map(|(_, table)| 1 + 16 + table.spec().values.len())
        .sum::<usize>();

    writer.write_marker(DHT)?;
    writer.write_word(length as u16)?;

    for (class_and_id, table) in records {
        let spec = table.spec();
        writer.write_byte(class_and_id)?;
        writer.write_bytes(&spec.bits)?;
        writer.write_bytes(spec.values)?;
    }
    Ok(())
}

/// Write SOS (Start of Scan) for one interleaved baseline scan.
pub fn write_sos<W: Write>(writer: &mut BitWriter<W>) -> Result<()> {
    writer.write_marker(SOS)?;

    // Length: 6 + 2*num_components
    writer.write_word(6 + 2 * COMPONENTS.len() as u16)?;

    writer.write_byte(COMPONENTS.len() as u8)?;
    for (id, _, selectors) in COMPONENTS {
        writer.write_byte(id)?;
        writer.write_byte(selectors)?;
    }

    // Spectral selection and successive approximation
    writer.write_byte(0)?;
    writer.write_byte(63)?;
    writer.write_byte(0)
}

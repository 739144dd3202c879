//! Baseline sequential entropy coding of quantized blocks.

use std::io::Write;

use super::huffman::HuffmanTable;
use super::quantize::zigzag_reorder;
use crate::bits::BitWriter;
use crate::error::Result;

/// Run-length symbol for sixteen consecutive zeros.
pub const ZRL: u8 = 0xF0;

/// End-of-block symbol.
pub const EOB: u8 = 0x00;

/// Magnitude category of a coefficient: bit length of `|value|`.
#[inline]
pub fn category(value: i16) -> u8 {
    16 - value.unsigned_abs().leading_zeros() as u8
}

/// Amplitude coding: returns `(length, code)`.
///
/// Non-negative values are their own bits; negative values are the
/// one's complement of the magnitude in `length` bits.
#[inline]
pub fn magnitude_bits(value: i16) -> (u8, u16) {
    let length = category(value);
    if length == 0 {
        return (0, 0);
    }
    let bits = if value < 0 {
        (value as i32 - 1) as u16
    } else {
        value as u16
    };
    (length, bits & ((1u32 << length) - 1) as u16)
}

#[inline]
fn emit<W: Write>(writer: &mut BitWriter<W>, table: &HuffmanTable, symbol: u8) -> Result<()> {
    let code = table.code(symbol);
    debug_assert!(code.length > 0, "no Huffman code for symbol {symbol:#04x}");
    writer.write_bits(code.code as u32, code.length)
}

/// Encode one quantized block given in natural order.
///
/// `prev_dc` is the DC value of the previous block of the same component.
/// Returns this block's DC value, which becomes `prev_dc` for the next one.
pub fn encode_block<W: Write>(
    writer: &mut BitWriter<W>,
    block: &[i16; 64],
    prev_dc: i16,
    dc_table: &HuffmanTable,
    ac_table: &HuffmanTable,
) -> Result<i16> {
    let zigzag = zigzag_reorder(block);

    // DC difference
    let dc = zigzag[0];
    let (dc_len, dc_bits) = magnitude_bits(dc.wrapping_sub(prev_dc));
    emit(writer, dc_table, dc_len)?;
    if dc_len > 0 {
        writer.write_bits(dc_bits as u32, dc_len)?;
    }

    // Last non-zero AC position; 0 when every AC term is zero
    let end = zigzag
        .iter()
        .rposition(|&v| v != 0)
        .filter(|&pos| pos > 0)
        .unwrap_or(0);

    let mut zero_run = 0u8;
    for &ac in zigzag.iter().take(end + 1).skip(1) {
        if ac == 0 {
            zero_run += 1;
            continue;
        }
        while zero_run >= 16 {
            emit(writer, ac_table, ZRL)?;
            zero_run -= 16;
        }
        let (len, bits) = magnitude_bits(ac);
        emit(writer, ac_table, (zero_run << 4) | len)?;
        writer.write_bits(bits as u32, len)?;
        zero_run = 0;
    }

    if end < 63 {
        emit(writer, ac_table, EOB)?;
    }

    log::trace!("block dc={dc} diff={} last_ac={end}", dc.wrapping_sub(prev_dc));
    Ok(dc)
}

//! JPEG quantization tables and functions.

use super::dct::AAN_SCALE;

/// Standard JPEG luminance quantization table (natural order).
pub const STD_LUMINANCE_TABLE: [u8; 64] = [
    16, 11, 10, 16, 24, 40, 51, 61, 12, 12, 14, 19, 26, 58, 60, 55, 14, 13, 16, 24, 40, 57, 69, 56,
    14, 17, 22, 29, 51, 87, 80, 62, 18, 22, 37, 56, 68, 109, 103, 77, 24, 35, 55, 64, 81, 104, 113,
    92, 49, 64, 78, 87, 103, 121, 120, 101, 72, 92, 95, 98, 112, 100, 103, 99,
];

/// Standard JPEG chrominance quantization table (natural order).
pub const STD_CHROMINANCE_TABLE: [u8; 64] = [
    17, 18, 24, 47, 99, 99, 99, 99, 18, 21, 26, 66, 99, 99, 99, 99, 24, 26, 56, 99, 99, 99, 99, 99,
    47, 66, 99, 99, 99, 99, 99, 99, 99, 99, 99, 99, 99, 99, 99, 99, 99, 99, 99, 99, 99, 99, 99, 99,
    99, 99, 99, 99, 99, 99, 99, 99, 99, 99, 99, 99, 99, 99, 99, 99,
];

/// Zigzag scan order for 8x8 block: `ZIGZAG[k]` is the natural index of
/// the k-th coefficient in frequency order.
pub const ZIGZAG: [usize; 64] = [
    0, 1, 8, 16, 9, 2, 3, 10, 17, 24, 32, 25, 18, 11, 4, 5, 12, 19, 26, 33, 40, 48, 41, 34, 27, 20,
    13, 6, 7, 14, 21, 28, 35, 42, 49, 56, 57, 50, 43, 36, 29, 22, 15, 23, 30, 37, 44, 51, 58, 59,
    52, 45, 38, 31, 39, 46, 53, 60, 61, 54, 47, 55, 62, 63,
];

/// Default scale factor (percent of the standard tables).
pub const DEFAULT_SCALE_FACTOR: u32 = 50;

/// Map a libjpeg-style quality (1-100) to a table scale factor.
///
/// Quality 100 would give 0; it is raised to 1, which yields the same
/// all-ones tables.
pub fn scale_factor_for_quality(quality: u8) -> u32 {
    let quality = quality.clamp(1, 100) as u32;
    if quality < 50 {
        5000 / quality
    } else {
        (200 - 2 * quality).max(1)
    }
}

/// Scale a base table: `clamp((base * scale + 50) / 100, 1, 255)` per entry.
///
/// The scale factor is not validated here.
pub fn build_quant_table(base: &[u8; 64], scale_factor: u32) -> [u8; 64] {
    let mut table = [0u8; 64];
    for (out, &b) in table.iter_mut().zip(base.iter()) {
        let scaled = (b as u64 * scale_factor as u64 + 50) / 100;
        *out = scaled.clamp(1, 255) as u8;
    }
    table
}

/// Fold the AAN output scaling into reciprocal divisors.
///
/// `divisor[i] = 1 / (q[i] * AAN_SCALE[row] * AAN_SCALE[col] * 8)`, so a
/// quantized coefficient is a single multiply against the AAN DCT output.
pub fn aan_divisors(table: &[u8; 64]) -> [f32; 64] {
    let mut divisors = [0.0f32; 64];
    for row in 0..8 {
        for col in 0..8 {
            let i = row * 8 + col;
            divisors[i] =
                (1.0 / (table[i] as f64 * AAN_SCALE[row] * AAN_SCALE[col] * 8.0)) as f32;
        }
    }
    divisors
}

/// Quantization tables for one encode configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct QuantizationTables {
    /// Luminance table in zigzag order (as written to DQT).
    pub luminance: [u8; 64],
    /// Chrominance table in zigzag order (as written to DQT).
    pub chrominance: [u8; 64],
    /// Luminance table in natural order.
    pub luminance_table: [u8; 64],
    /// Chrominance table in natural order.
    pub chrominance_table: [u8; 64],
    /// Luminance reciprocal divisors for AAN DCT output, natural order.
    pub luminance_divisors: [f32; 64],
    /// Chrominance reciprocal divisors for AAN DCT output, natural order.
    pub chrominance_divisors: [f32; 64],
}

impl QuantizationTables {
    /// Create quantization tables with the given scale factor.
    pub fn with_scale_factor(scale_factor: u32) -> Self {
        let luminance_table = build_quant_table(&STD_LUMINANCE_TABLE, scale_factor);
        let chrominance_table = build_quant_table(&STD_CHROMINANCE_TABLE, scale_factor);

        Self {
            luminance: zigzag_reorder(&luminance_table),
            chrominance: zigzag_reorder(&chrominance_table),
            luminance_divisors: aan_divisors(&luminance_table),
            chrominance_divisors: aan_divisors(&chrominance_table),
            luminance_table,
            chrominance_table,
        }
    }

    /// Create quantization tables with the given quality (1-100).
    pub fn with_quality(quality: u8) -> Self {
        Self::with_scale_factor(scale_factor_for_quality(quality))
    }
}

impl Default for QuantizationTables {
    fn default() -> Self {
        Self::with_scale_factor(DEFAULT_SCALE_FACTOR)
    }
}

/// Quantize scaled DCT output: round half up via a biased truncation.
pub fn quantize_block(dct: &[f32; 64], divisors: &[f32; 64]) -> [i16; 64] {
    let mut result = [0i16; 64];
    for i in 0..64 {
        // Bias keeps the operand positive so truncation acts as floor
        let biased = dct[i] * divisors[i] + 16384.5;
        result[i] = (biased as i32 - 16384) as i16;
    }
    result
}

/// Reorder a block from natural order into zigzag order.
pub fn zigzag_reorder<T: Copy + Default>(block: &[T; 64]) -> [T; 64] {
    let mut result = [T::default(); 64];
    for i in 0..64 {
        result[i] = block[ZIGZAG[i]];
    }
    result
}

/// Reorder a block from zigzag order back into natural order.
pub fn inverse_zigzag<T: Copy + Default>(block: &[T; 64]) -> [T; 64] {
    let mut result = [T::default(); 64];
    for i in 0..64 {
        result[ZIGZAG[i]] = block[i];
    }
    result
}

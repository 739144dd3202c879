//! JPEG Huffman tables.
//!
//! Builds the canonical symbol -> (length, code) lookup tables from the
//! standard Annex K specifications.

use crate::error::{Error, Result};

/// Standard DC luminance Huffman table (number of codes per bit length).
const DC_LUM_BITS: [u8; 16] = [0, 1, 5, 1, 1, 1, 1, 1, 1, 0, 0, 0, 0, 0, 0, 0];

/// Standard DC luminance Huffman values.
const DC_LUM_VALS: [u8; 12] = [0, 1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11];

/// Standard DC chrominance Huffman table.
const DC_CHROM_BITS: [u8; 16] = [0, 3, 1, 1, 1, 1, 1, 1, 1, 1, 1, 0, 0, 0, 0, 0];

/// Standard DC chrominance Huffman values.
const DC_CHROM_VALS: [u8; 12] = [0, 1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11];

/// Standard AC luminance Huffman table.
const AC_LUM_BITS: [u8; 16] = [0, 2, 1, 3, 3, 2, 4, 3, 5, 5, 4, 4, 0, 0, 1, 125];

/// Standard AC luminance Huffman values.
const AC_LUM_VALS: [u8; 162] = [
    0x01, 0x02, 0x03, 0x00, 0x04, 0x11, 0x05, 0x12, 0x21, 0x31, 0x41, 0x06, 0x13, 0x51, 0x61, 0x07,
    0x22, 0x71, 0x14, 0x32, 0x81, 0x91, 0xa1, 0x08, 0x23, 0x42, 0xb1, 0xc1, 0x15, 0x52, 0xd1, 0xf0,
    0x24, 0x33, 0x62, 0x72, 0x82, 0x09, 0x0a, 0x16, 0x17, 0x18, 0x19, 0x1a, 0x25, 0x26, 0x27, 0x28,
    0x29, 0x2a, 0x34, 0x35, 0x36, 0x37, 0x38, 0x39, 0x3a, 0x43, 0x44, 0x45, 0x46, 0x47, 0x48, 0x49,
    0x4a, 0x53, 0x54, 0x55, 0x56, 0x57, 0x58, 0x59, 0x5a, 0x63, 0x64, 0x65, 0x66, 0x67, 0x68, 0x69,
    0x6a, 0x73, 0x74, 0x75, 0x76, 0x77, 0x78, 0x79, 0x7a, 0x83, 0x84, 0x85, 0x86, 0x87, 0x88, 0x89,
    0x8a, 0x92, 0x93, 0x94, 0x95, 0x96, 0x97, 0x98, 0x99, 0x9a, 0xa2, 0xa3, 0xa4, 0xa5, 0xa6, 0xa7,
    0xa8, 0xa9, 0xaa, 0xb2, 0xb3, 0xb4, 0xb5, 0xb6, 0xb7, 0xb8, 0xb9, 0xba, 0xc2, 0xc3, 0xc4, 0xc5,
    0xc6, 0xc7, 0xc8, 0xc9, 0xca, 0xd2, 0xd3, 0xd4, 0xd5, 0xd6, 0xd7, 0xd8, 0xd9, 0xda, 0xe1, 0xe2,
    0xe3, 0xe4, 0xe5, 0xe6, 0xe7, 0xe8, 0xe9, 0xea, 0xf1, 0xf2, 0xf3, 0xf4, 0xf5, 0xf6, 0xf7, 0xf8,
    0xf9, 0xfa,
];

/// Standard AC chrominance Huffman table.
const AC_CHROM_BITS: [u8; 16] = [0, 2, 1, 2, 4, 4, 3, 4, 7, 5, 4, 4, 0, 1, 2, 119];

/// Standard AC chrominance Huffman values.
const AC_CHROM_VALS: [u8; 162] = [
    0x00, 0x01, 0x02, 0x03, 0x11, 0x04, 0x05, 0x21, 0x31, 0x06, 0x12, 0x41, 0x51, 0x07, 0x61, 0x71,
    0x13, 0x22, 0x32, 0x81, 0x08, 0x14, 0x42, 0x91, 0xa1, 0xb1, 0xc1, 0x09, 0x23, 0x33, 0x52, 0xf0,
    0x15, 0x62, 0x72, 0xd1, 0x0a, 0x16, 0x24, 0x34, 0xe1, 0x25, 0xf1, 0x17, 0x18, 0x19, 0x1a, 0x26,
    0x27, 0x28, 0x29, 0x2a, 0x35, 0x36, 0x37, 0x38, 0x39, 0x3a, 0x43, 0x44, 0x45, 0x46, 0x47, 0x48,
    0x49, 0x4a, 0x53, 0x54, 0x55, 0x56, 0x57, 0x58, 0x59, 0x5a, 0x63, 0x64, 0x65, 0x66, 0x67, 0x68,
    0x69, 0x6a, 0x73, 0x74, 0x75, 0x76, 0x77, 0x78, 0x79, 0x7a, 0x82, 0x83, 0x84, 0x85, 0x86, 0x87,
    0x88, 0x89, 0x8a, 0x92, 0x93, 0x94, 0x95, 0x96, 0x97, 0x98, 0x99, 0x9a, 0xa2, 0xa3, 0xa4, 0xa5,
    0xa6, 0xa7, 0xa8, 0xa9, 0xaa, 0xb2, 0xb3, 0xb4, 0xb5, 0xb6, 0xb7, 0xb8, 0xb9, 0xba, 0xc2, 0xc3,
    0xc4, 0xc5, 0xc6, 0xc7, 0xc8, 0xc9, 0xca, 0xd2, 0xd3, 0xd4, 0xd5, 0xd6, 0xd7, 0xd8, 0xd9, 0xda,
    0xe2, 0xe3, 0xe4, 0xe5, 0xe6, 0xe7, 0xe8, 0xe9, 0xea, 0xf2, 0xf3, 0xf4, 0xf5, 0xf6, 0xf7, 0xf8,
    0xf9, 0xfa,
];

/// A Huffman table as written to DHT: code counts per length plus symbols.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HuffmanSpec {
    /// `bits[i]` is the number of codes of length `i + 1`.
    pub bits: [u8; 16],
    /// Symbols in order of increasing code length.
    pub values: &'static [u8],
}

impl HuffmanSpec {
    /// Annex K.3 luminance DC table.
    pub const DC_LUMINANCE: Self = Self {
        bits: DC_LUM_BITS,
        values: &DC_LUM_VALS,
    };
    /// Annex K.3 chrominance DC table.
    pub const DC_CHROMINANCE: Self = Self {
        bits: DC_CHROM_BITS,
        values: &DC_CHROM_VALS,
    };
    /// Annex K.3 luminance AC table.
    pub const AC_LUMINANCE: Self = Self {
        bits: AC_LUM_BITS,
        values: &AC_LUM_VALS,
    };
    /// Annex K.3 chrominance AC table.
    pub const AC_CHROMINANCE: Self = Self {
        bits: AC_CHROM_BITS,
        values: &AC_CHROM_VALS,
    };

    /// Total number of symbols the counts describe.
    pub fn symbol_count(&self) -> usize {
        self.bits.iter().map(|&n| n as usize).sum()
    }
}

/// Huffman code: (code, length in bits). A zero length means "no code".
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HuffCode {
    /// Code bits, right-aligned.
    pub code: u16,
    /// Number of significant bits in `code`.
    pub length: u8,
}

/// Symbol -> code lookup for one Huffman table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HuffmanTable {
    spec: HuffmanSpec,
    codes: [HuffCode; 256],
}

impl HuffmanTable {
    /// Build canonical codes from a bits/values specification.
    ///
    /// Codes are handed out in increasing length order. Within a length they
    /// are consecutive; moving to the next length shifts the running code
    /// left by one.
    pub fn build(spec: &HuffmanSpec) -> Result<Self> {
        if spec.symbol_count() != spec.values.len() {
            return Err(Error::InvalidHuffmanTable(
                "code counts do not match symbol list",
            ));
        }

        let mut codes = [HuffCode::default(); 256];
        let mut code: u32 = 0;
        let mut val_idx = 0usize;

        for (length, &count) in spec.bits.iter().enumerate() {
            let length = (length + 1) as u8;
            for _ in 0..count {
                if code >= (1u32 << length) {
                    return Err(Error::InvalidHuffmanTable("too many codes for length"));
                }
                let symbol = spec.values[val_idx] as usize;
                if codes[symbol].length != 0 {
                    return Err(Error::InvalidHuffmanTable("duplicate symbol"));
                }
                codes[symbol] = HuffCode {
                    code: code as u16,
                    length,
                };
                val_idx += 1;
                code += 1;
            }
            code <<= 1;
        }

        Ok(Self { spec: *spec, codes })
    }

    /// Look up the code for `symbol`.
    #[inline]
    pub fn code(&self, symbol: u8) -> HuffCode {
        self.codes[symbol as usize]
    }

    /// The specification this table was built from.
    pub fn spec(&self) -> &HuffmanSpec {
        &self.spec
    }
}

/// The four tables a baseline YCbCr encode needs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HuffmanTables {
    /// Luminance DC (table id 0).
    pub dc_luminance: HuffmanTable,
    /// Luminance AC (table id 0).
    pub ac_luminance: HuffmanTable,
    /// Chrominance DC (table id 1).
    pub dc_chrominance: HuffmanTable,
    /// Chrominance AC (table id 1).
    pub ac_chrominance: HuffmanTable,
}

impl HuffmanTables {
    /// Build tables from the standard Annex K specifications.
    pub fn standard() -> Result<Self> {
        Ok(Self {
            dc_luminance: HuffmanTable::build(&HuffmanSpec::DC_LUMINANCE)?,
            ac_luminance: HuffmanTable::build(&HuffmanSpec::AC_LUMINANCE)?,
            dc_chrominance: HuffmanTable::build(&HuffmanSpec::DC_CHROMINANCE)?,
            ac_chrominance: HuffmanTable::build(&HuffmanSpec::AC_CHROMINANCE)?,
        })
    }
}

//! Pixel layouts and the BGR to YCbCr conversion.
//!
//! The conversion uses 16-bit fixed-point lookup tables built at compile
//! time, one table per (input channel, output channel) pair.

/// Byte order of 3-byte pixels handed to the encoder.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum ColorType {
    /// R, G, B.
    Rgb,
    /// B, G, R (the order BMP stores pixels in).
    Bgr,
}

impl ColorType {
    /// Returns the number of bytes per pixel for this color type.
    #[inline]
    pub const fn bytes_per_pixel(self) -> usize {
        3
    }

    /// Reorders one pixel into B, G, R.
    #[inline]
    pub fn to_bgr(self, pixel: &[u8]) -> [u8; 3] {
        match self {
            ColorType::Rgb => [pixel[2], pixel[1], pixel[0]],
            ColorType::Bgr => [pixel[0], pixel[1], pixel[2]],
        }
    }
}

const SCALEBITS: u32 = 16;
const ONE_HALF: i32 = 1 << (SCALEBITS - 1);
const CBCR_OFFSET: i32 = 128 << SCALEBITS;

/// Round-to-nearest fixed-point representation of a coefficient.
const fn fix(scaled: i64) -> i32 {
    // `scaled` is the coefficient times 1e5; FIX(x) = round(x * 2^16)
    ((scaled * (1 << SCALEBITS) + 50_000) / 100_000) as i32
}

const R_Y: i32 = fix(29_900);
const G_Y: i32 = fix(58_700);
const B_Y: i32 = fix(11_400);
const R_CB: i32 = -fix(16_874);
const G_CB: i32 = -fix(33_126);
const B_CB: i32 = fix(50_000);
const R_CR: i32 = fix(50_000);
const G_CR: i32 = -fix(41_869);
const B_CR: i32 = -fix(8_131);

/// Precomputed per-channel contributions, scaled by 2^16.
struct YccTables {
    r_y: [i32; 256],
    g_y: [i32; 256],
    b_y: [i32; 256],
    r_cb: [i32; 256],
    g_cb: [i32; 256],
    b_cb: [i32; 256],
    r_cr: [i32; 256],
    g_cr: [i32; 256],
    b_cr: [i32; 256],
}

impl YccTables {
    const fn new() -> Self {
        let mut t = Self {
            r_y: [0; 256],
            g_y: [0; 256],
            b_y: [0; 256],
            r_cb: [0; 256],
            g_cb: [0; 256],
            b_cb: [0; 256],
            r_cr: [0; 256],
            g_cr: [0; 256],
            b_cr: [0; 256],
        };
        let mut i = 0;
        while i < 256 {
            let v = i as i32;
            t.r_y[i] = R_Y * v;
            t.g_y[i] = G_Y * v;
            t.b_y[i] = B_Y * v + ONE_HALF;
            t.r_cb[i] = R_CB * v;
            t.g_cb[i] = G_CB * v;
            // Offset and rounding fold into the B column; ONE_HALF - 1
            // keeps 127.5 from rounding up to 128.
            t.b_cb[i] = B_CB * v + CBCR_OFFSET + ONE_HALF - 1;
            t.r_cr[i] = R_CR * v + CBCR_OFFSET + ONE_HALF - 1;
            t.g_cr[i] = G_CR * v;
            t.b_cr[i] = B_CR * v;
            i += 1;
        }
        t
    }
}

static YCC_TABLES: YccTables = YccTables::new();

/// Convert one BGR pixel to level-shifted (Y, Cb, Cr), each in -128..=127.
#[inline]
pub fn bgr_to_ycc(b: u8, g: u8, r: u8) -> (i16, i16, i16) {
    let t = &YCC_TABLES;
    let (b, g, r) = (b as usize, g as usize, r as usize);

    let y = (t.r_y[r] + t.g_y[g] + t.b_y[b]) >> SCALEBITS;
    let cb = (t.r_cb[r] + t.g_cb[g] + t.b_cb[b]) >> SCALEBITS;
    let cr = (t.r_cr[r] + t.g_cr[g] + t.b_cr[b]) >> SCALEBITS;

    ((y - 128) as i16, (cb - 128) as i16, (cr - 128) as i16)
}

/// Three zero-centered 8x8 planes in natural (row-major) order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct YccUnit {
    /// Luma.
    pub y: [i16; 64],
    /// Blue-difference chroma.
    pub cb: [i16; 64],
    /// Red-difference chroma.
    pub cr: [i16; 64],
}

/// Convert an 8x8 block of BGR triples to three level-shifted planes.
pub fn bgr_block_to_ycc(block: &[[u8; 3]; 64]) -> YccUnit {
    let mut unit = YccUnit {
        y: [0; 64],
        cb: [0; 64],
        cr: [0; 64],
    };
    for (i, &[b, g, r]) in block.iter().enumerate() {
        let (y, cb, cr) = bgr_to_ycc(b, g, r);
        unit.y[i] = y;
        unit.cb[i] = cb;
        unit.cr[i] = cr;
    }
    unit
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reference(b: u8, g: u8, r: u8) -> (f64, f64, f64) {
        let (r, g, b) = (r as f64, g as f64, b as f64);
        (
            0.299 * r + 0.587 * g + 0.114 * b - 128.0,
            -0.16874 * r - 0.33126 * g + 0.5 * b,
            0.5 * r - 0.41869 * g - 0.08131 * b,
        )
    }

    #[test]
    fn test_fixed_point_coefficients() {
        assert_eq!(R_Y + G_Y + B_Y, 1 << SCALEBITS);
        assert_eq!(R_Y, 19595);
        assert_eq!(G_Y, 38470);
        assert_eq!(B_Y, 7471);
        assert_eq!(B_CB, 32768);
    }

    #[test]
    fn test_black_and_white() {
        assert_eq!(bgr_to_ycc(0, 0, 0), (-128, 0, 0));
        assert_eq!(bgr_to_ycc(255, 255, 255), (127, 0, 0));
    }

    #[test]
    fn test_gray_has_no_chroma() {
        for v in [1u8, 37, 128, 200, 254] {
            let (_, cb, cr) = bgr_to_ycc(v, v, v);
            assert_eq!((cb, cr), (0, 0), "gray {v}");
        }
    }

    #[test]
    fn test_saturated_primaries_stay_in_range() {
        // Pure blue gives Cb = 127.5 and pure red gives Cr = 127.5
        let (_, cb, _) = bgr_to_ycc(255, 0, 0);
        let (_, _, cr) = bgr_to_ycc(0, 0, 255);
        assert_eq!(cb, 127);
        assert_eq!(cr, 127);

        let (_, cb, cr) = bgr_to_ycc(0, 255, 255);
        assert!(cb >= -128);
        assert!(cr >= -128);
    }

    #[test]
    fn test_matches_float_reference_within_one() {
        for b in (0..=255u8).step_by(15) {
            for g in (0..=255u8).step_by(17) {
                for r in (0..=255u8).step_by(5) {
                    let (y, cb, cr) = bgr_to_ycc(b, g, r);
                    let (fy, fcb, fcr) = reference(b, g, r);
                    assert!((y as f64 - fy).abs() <= 1.0, "Y for {b},{g},{r}");
                    assert!((cb as f64 - fcb).abs() <= 1.0, "Cb for {b},{g},{r}");
                    assert!((cr as f64 - fcr).abs() <= 1.0, "Cr for {b},{g},{r}");
                }
            }
        }
    }

    #[test]
    fn test_block_conversion_keeps_positions() {
        let mut block = [[0u8; 3]; 64];
        block[9] = [255, 255, 255];
        let unit = bgr_block_to_ycc(&block);
        assert_eq!(unit.y[0], -128);
        assert_eq!(unit.y[9], 127);
        assert!(unit.cb.iter().all(|&v| v == 0));
    }

    #[test]
    fn test_color_type_to_bgr() {
        assert_eq!(ColorType::Rgb.to_bgr(&[1, 2, 3]), [3, 2, 1]);
        assert_eq!(ColorType::Bgr.to_bgr(&[1, 2, 3]), [1, 2, 3]);
        assert_eq!(ColorType::Rgb.bytes_per_pixel(), 3);
    }
}

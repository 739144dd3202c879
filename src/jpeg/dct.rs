//! Forward Discrete Cosine Transform for JPEG.
//!
//! Uses the Arai, Agui & Nakajima (AAN) factorization: 5 multiplies and
//! 29 adds per 1-D pass. The outputs are scaled by `8 * AAN_SCALE[row] *
//! AAN_SCALE[col]`; the quantizer divisors absorb that factor so no extra
//! pass is needed here.

/// Per-frequency AAN scale factors.
///
/// `AAN_SCALE[0] = 1`, `AAN_SCALE[k] = cos(k * PI / 16) * sqrt(2)` for k > 0.
pub const AAN_SCALE: [f64; 8] = [
    1.0,
    1.387039845,
    1.306562965,
    1.175875602,
    1.0,
    0.785694958,
    0.541196100,
    0.275899379,
];

/// Perform the scaled 2-D forward DCT on a level-shifted 8x8 block.
///
/// Rows first, then columns. Input and output are in natural order.
pub fn forward_dct(block: &[i16; 64]) -> [f32; 64] {
    let mut data = [0.0f32; 64];
    for (out, &v) in data.iter_mut().zip(block.iter()) {
        *out = v as f32;
    }

    for row in 0..8 {
        fdct_1d(&mut data, row * 8, 1);
    }
    for col in 0..8 {
        fdct_1d(&mut data, col, 8);
    }

    data
}

/// One AAN butterfly pass over 8 values starting at `base`, `stride` apart.
#[inline]
fn fdct_1d(data: &mut [f32; 64], base: usize, stride: usize) {
    let at = |k: usize| base + k * stride;

    let tmp0 = data[at(0)] + data[at(7)];
    let tmp7 = data[at(0)] - data[at(7)];
    let tmp1 = data[at(1)] + data[at(6)];
    let tmp6 = data[at(1)] - data[at(6)];
    let tmp2 = data[at(2)] + data[at(5)];
    let tmp5 = data[at(2)] - data[at(5)];
    let tmp3 = data[at(3)] + data[at(4)];
    let tmp4 = data[at(3)] - data[at(4)];

    // Even part
    let tmp10 = tmp0 + tmp3;
    let tmp13 = tmp0 - tmp3;
    let tmp11 = tmp1 + tmp2;
    let tmp12 = tmp1 - tmp2;

    data[at(0)] = tmp10 + tmp11;
    data[at(4)] = tmp10 - tmp11;

    let z1 = (tmp12 + tmp13) * 0.707_106_781;
    data[at(2)] = tmp13 + z1;
    data[at(6)] = tmp13 - z1;

    // Odd part
    let tmp10 = tmp4 + tmp5;
    let tmp11 = tmp5 + tmp6;
    let tmp12 = tmp6 + tmp7;

    let z5 = (tmp10 - tmp12) * 0.382_683_433;
    let z2 = 0.541_196_100 * tmp10 + z5;
    let z4 = 1.306_562_965 * tmp12 + z5;
    let z3 = tmp11 * 0.707_106_781;

    let z11 = tmp7 + z3;
    let z13 = tmp7 - z3;

    data[at(5)] = z13 + z2;
    data[at(3)] = z13 - z2;
    data[at(1)] = z11 + z4;
    data[at(7)] = z11 - z4;
}

//! Shared fixtures for integration tests.

#![allow(dead_code)]

use rand::{rngs::StdRng, Rng, SeedableRng};

/// Build an uncompressed 24-bit bottom-up BMP from top-down BGR pixels.
pub fn bmp_from_bgr(width: u32, height: u32, bgr: &[u8]) -> Vec<u8> {
    let row_bytes = width as usize * 3;
    let stride = (row_bytes + 3) & !3;
    let image_size = stride * height as usize;

    let mut out = Vec::with_capacity(54 + image_size);
    out.extend_from_slice(b"BM");
    out.extend_from_slice(&(54 + image_size as u32).to_le_bytes());
    out.extend_from_slice(&[0; 4]);
    out.extend_from_slice(&54u32.to_le_bytes());
    out.extend_from_slice(&40u32.to_le_bytes());
    out.extend_from_slice(&(width as i32).to_le_bytes());
    out.extend_from_slice(&(height as i32).to_le_bytes());
    out.extend_from_slice(&1u16.to_le_bytes());
    out.extend_from_slice(&24u16.to_le_bytes());
    out.extend_from_slice(&0u32.to_le_bytes()); // BI_RGB
    out.extend_from_slice(&(image_size as u32).to_le_bytes());
    out.extend_from_slice(&2835u32.to_le_bytes());
    out.extend_from_slice(&2835u32.to_le_bytes());
    out.extend_from_slice(&[0; 8]);

    for row in bgr.chunks_exact(row_bytes).rev() {
        out.extend_from_slice(row);
        out.resize(out.len() + stride - row_bytes, 0);
    }
    out
}

/// Seeded random BGR pixels.
pub fn random_bgr(width: u32, height: u32, seed: u64) -> Vec<u8> {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut data = vec![0u8; (width * height * 3) as usize];
    rng.fill(data.as_mut_slice());
    data
}

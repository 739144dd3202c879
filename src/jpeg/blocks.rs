//! Padded pixel buffer and the 8x8 block source.

use super::MAX_DIMENSION;
use crate::color::ColorType;
use crate::error::{Error, Result};

/// 64 BGR triples of one 8x8 block, row-major.
pub type PixelBlock = [[u8; 3]; 64];

/// An image in BGR order, padded to multiples of 8 on both axes.
///
/// Padding columns repeat the last real column and padding rows repeat the
/// last real row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaddedImage {
    width: u32,
    height: u32,
    padded_width: usize,
    padded_height: usize,
    pixels: Vec<[u8; 3]>,
}

impl PaddedImage {
    /// Copy `data` (row-major, no row padding) into a padded BGR buffer.
    pub fn new(data: &[u8], width: u32, height: u32, color_type: ColorType) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(Error::InvalidDimensions { width, height });
        }
        if width > MAX_DIMENSION || height > MAX_DIMENSION {
            return Err(Error::ImageTooLarge {
                width,
                height,
                max: MAX_DIMENSION,
            });
        }

        let bpp = color_type.bytes_per_pixel();
        let row_bytes = width as usize * bpp;
        let expected = row_bytes * height as usize;
        if data.len() != expected {
            return Err(Error::InvalidDataLength {
                expected,
                actual: data.len(),
            });
        }

        let padded_width = (width as usize).next_multiple_of(8);
        let padded_height = (height as usize).next_multiple_of(8);
        let count = padded_width * padded_height;

        let mut pixels = Vec::new();
        pixels
            .try_reserve_exact(count)
            .map_err(|_| Error::AllocationFailure {
                bytes: count * std::mem::size_of::<[u8; 3]>(),
            })?;

        for row in data.chunks_exact(row_bytes) {
            let start = pixels.len();
            pixels.extend(row.chunks_exact(bpp).map(|p| color_type.to_bgr(p)));
            let last = pixels[pixels.len() - 1];
            pixels.resize(start + padded_width, last);
        }
        // Replicate the last full row into the padding rows
        let last_row = pixels.len() - padded_width;
        for _ in height as usize..padded_height {
            pixels.extend_from_within(last_row..last_row + padded_width);
        }

        log::debug!(
            "padded {}x{} image to {}x{}",
            width,
            height,
            padded_width,
            padded_height
        );

        Ok(Self {
            width,
            height,
            padded_width,
            padded_height,
            pixels,
        })
    }

    /// True image width.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// True image height.
    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn padded_width(&self) -> usize {
        self.padded_width
    }

    pub fn padded_height(&self) -> usize {
        self.padded_height
    }

    /// Number of block columns.
    pub fn blocks_wide(&self) -> usize {
        self.padded_width / 8
    }

    /// Number of block rows.
    pub fn blocks_high(&self) -> usize {
        self.padded_height / 8
    }

    pub fn block_count(&self) -> usize {
        self.blocks_wide() * self.blocks_high()
    }

    /// BGR pixel at padded coordinates.
    #[inline]
    pub fn pixel(&self, x: usize, y: usize) -> [u8; 3] {
        self.pixels[y * self.padded_width + x]
    }

    /// Copy out the block at block coordinates (`bx`, `by`).
    ///
    /// Returns `None` outside the block grid.
    pub fn block_at(&self, bx: usize, by: usize) -> Option<PixelBlock> {
        if bx >= self.blocks_wide() || by >= self.blocks_high() {
            return None;
        }
        let mut block = [[0u8; 3]; 64];
        for (dy, out_row) in block.chunks_exact_mut(8).enumerate() {
            let start = (by * 8 + dy) * self.padded_width + bx * 8;
            out_row.copy_from_slice(&self.pixels[start..start + 8]);
        }
        Some(block)
    }

    /// Blocks in row-major block order.
    pub fn blocks(&self) -> Blocks<'_> {
        Blocks {
            image: self,
            next: 0,
        }
    }
}

/// Iterator over the blocks of a [`PaddedImage`].
#[derive(Debug, Clone)]
pub struct Blocks<'a> {
    image: &'a PaddedImage,
    next: usize,
}

impl Iterator for Blocks<'_> {
    type Item = PixelBlock;

    fn next(&mut self) -> Option<Self::Item> {
        let wide = self.image.blocks_wide();
        let block = self.image.block_at(self.next % wide, self.next / wide)?;
        self.next += 1;
        Some(block)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.image.block_count().saturating_sub(self.next);
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for Blocks<'_> {}

#[cfg(test)]
mod tests {
    use super::*;

    fn gradient(width: u32, height: u32) -> Vec<u8> {
        let mut data = Vec::new();
        for y in 0..height {
            for x in 0..width {
                data.extend_from_slice(&[x as u8, y as u8, 7]);
            }
        }
        data
    }

    #[test]
    fn test_exact_multiple_has_no_padding() {
        let image = PaddedImage::new(&gradient(16, 8), 16, 8, ColorType::Bgr).unwrap();
        assert_eq!(image.padded_width(), 16);
        assert_eq!(image.padded_height(), 8);
        assert_eq!(image.block_count(), 2);
    }

    #[test]
    fn test_padding_replicates_edges() {
        let image = PaddedImage::new(&gradient(10, 10), 10, 10, ColorType::Bgr).unwrap();
        assert_eq!((image.padded_width(), image.padded_height()), (16, 16));
        assert_eq!((image.blocks_wide(), image.blocks_high()), (2, 2));

        // Padding columns copy column 9
        assert_eq!(image.pixel(15, 3), [9, 3, 7]);
        // Padding rows copy row 9
        assert_eq!(image.pixel(4, 15), [4, 9, 7]);
        // Corner copies the last real pixel
        assert_eq!(image.pixel(12, 12), [9, 9, 7]);
    }

    #[test]
    fn test_rgb_is_swizzled_to_bgr() {
        let image = PaddedImage::new(&[10, 20, 30], 1, 1, ColorType::Rgb).unwrap();
        assert_eq!(image.pixel(0, 0), [30, 20, 10]);
        let block = image.block_at(0, 0).unwrap();
        assert!(block.iter().all(|&p| p == [30, 20, 10]));
    }

    #[test]
    fn test_blocks_are_row_major() {
        let image = PaddedImage::new(&gradient(24, 16), 24, 16, ColorType::Bgr).unwrap();
        let blocks: Vec<PixelBlock> = image.blocks().collect();
        assert_eq!(blocks.len(), 6);
        // Block 1 is (bx=1, by=0); block 3 is (bx=0, by=1)
        assert_eq!(blocks[1][0], [8, 0, 7]);
        assert_eq!(blocks[3][0], [0, 8, 7]);
        assert_eq!(blocks[4][9], [9, 9, 7]);
        assert_eq!(image.blocks().len(), 6);
    }

    #[test]
    fn test_block_at_out_of_range() {
        let image = PaddedImage::new(&gradient(8, 8), 8, 8, ColorType::Bgr).unwrap();
        assert!(image.block_at(1, 0).is_none());
        assert!(image.block_at(0, 1).is_none());
        let mut blocks = image.blocks();
        assert!(blocks.next().is_some());
        assert!(blocks.next().is_none());
    }

    #[test]
    fn test_invalid_inputs() {
        assert!(matches!(
            PaddedImage::new(&[], 0, 4, ColorType::Bgr),
            Err(Error::InvalidDimensions { .. })
        ));
        assert!(matches!(
            PaddedImage::new(&[0; 9], 2, 2, ColorType::Bgr),
            Err(Error::InvalidDataLength {
                expected: 12,
                actual: 9
            })
        ));
        assert!(matches!(
            PaddedImage::new(&[], 70_000, 1, ColorType::Bgr),
            Err(Error::ImageTooLarge { .. })
        ));
    }
}

//! # Monochrome Thresholding
//!
//! Converts a color raster into the 1-bit bitmap carried by a graphic field.
//! Unlike halftoning, every pixel is decided on its own, so the output is a
//! pure function of the pixel content:
//!
//! 1. `alpha <= ALPHA_THRESHOLD` → not printed, whatever the color
//! 2. otherwise `luma = 0.299 r + 0.587 g + 0.114 b` (ITU-R BT.601)
//! 3. printed when `luma < LUMA_THRESHOLD`
//!
//! Luma is evaluated in integer thousandths, so mid-gray boundaries do not
//! depend on floating-point rounding.
//!
//! ## Bit Packing
//!
//! - Bit 7 (MSB) = leftmost pixel
//! - 1 = black (print), 0 = white (no print)
//! - Each row starts a fresh byte; unused low bits of the last byte are zero
//!
//! ```text
//! 10 px row: █░░█░░█░██  →  10010010 11000000  →  0x92 0xC0
//! ```

use image::{GrayImage, Luma};
use rayon::prelude::*;

use crate::error::{GraphicError, Result};
use crate::protocol::hex;
use crate::raster::{Argb, RasterImage, check_dimensions};

/// Pixels with alpha at or below this are treated as transparent.
pub const ALPHA_THRESHOLD: u8 = 128;

/// Pixels darker than this luma (0-255 scale) are printed.
pub const LUMA_THRESHOLD: u32 = 128;

/// BT.601 weights in thousandths
const LUMA_WEIGHTS: [u32; 3] = [299, 587, 114];

/// Whether a pixel becomes a printed dot.
///
/// ```
/// use zpl_graphic::raster::Argb;
/// use zpl_graphic::render::threshold::is_printed;
///
/// assert!(is_printed(Argb::BLACK));
/// assert!(!is_printed(Argb::WHITE));
/// assert!(!is_printed(Argb::new(0, 0, 0, 0)));
/// ```
#[inline]
pub fn is_printed(pixel: Argb) -> bool {
    if pixel.a <= ALPHA_THRESHOLD {
        return false;
    }
    let luma_milli = LUMA_WEIGHTS[0] * pixel.r as u32
        + LUMA_WEIGHTS[1] * pixel.g as u32
        + LUMA_WEIGHTS[2] * pixel.b as u32;
    luma_milli < LUMA_THRESHOLD * 1000
}

/// Pack a row of boolean pixel values into bytes.
///
/// If the row length is not a multiple of 8, the last byte is padded
/// with zeros (white) on the right.
///
/// ```
/// use zpl_graphic::render::threshold::pack_row;
///
/// // 12 pixels pack into 2 bytes (4 bits padding)
/// let row = vec![true; 12];
/// assert_eq!(pack_row(&row), vec![0xFF, 0xF0]);
/// ```
pub fn pack_row(pixels: &[bool]) -> Vec<u8> {
    let mut bytes = vec![0u8; pixels.len().div_ceil(8)];

    for (i, &pixel) in pixels.iter().enumerate() {
        if pixel {
            bytes[i / 8] |= 0x80 >> (i % 8); // MSB first
        }
    }

    bytes
}

/// A 1-bit bitmap, row-major, `bytes_per_row = ceil(width / 8)`.
///
/// `data.len() == bytes_per_row * height` always holds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonochromeBitmap {
    width: u32,
    height: u32,
    bytes_per_row: usize,
    data: Vec<u8>,
}

impl MonochromeBitmap {
    /// Wrap packed bitmap data.
    pub fn new(width: u32, height: u32, data: Vec<u8>) -> Result<Self> {
        check_dimensions(width, height)?;
        let bytes_per_row = width.div_ceil(8) as usize;
        let expected = bytes_per_row * height as usize;
        if data.len() != expected {
            return Err(GraphicError::CorruptData(format!(
                "{}x{} bitmap needs {} bytes, got {}",
                width,
                height,
                expected,
                data.len()
            )));
        }
        Ok(Self {
            width,
            height,
            bytes_per_row,
            data,
        })
    }

    /// Build a bitmap from rows of booleans (`true` = printed).
    ///
    /// All rows must have the same, non-zero length.
    pub fn from_rows(rows: &[Vec<bool>]) -> Result<Self> {
        let width = rows.first().map_or(0, Vec::len);
        if let Some(row) = rows.iter().find(|r| r.len() != width) {
            return Err(GraphicError::InvalidImage(format!(
                "ragged rows: expected {} pixels, got {}",
                width,
                row.len()
            )));
        }
        let data = rows.iter().flat_map(|r| pack_row(r)).collect();
        Self::new(width as u32, rows.len() as u32, data)
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn bytes_per_row(&self) -> usize {
        self.bytes_per_row
    }

    /// Total packed size, `bytes_per_row * height`.
    pub fn byte_count(&self) -> usize {
        self.data.len()
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Packed bytes of row `y`.
    pub fn row(&self, y: u32) -> &[u8] {
        let start = y as usize * self.bytes_per_row;
        &self.data[start..start + self.bytes_per_row]
    }

    /// Whether the dot at `(x, y)` is printed.
    pub fn is_set(&self, x: u32, y: u32) -> bool {
        let byte = self.row(y)[x as usize / 8];
        byte & (0x80 >> (x % 8)) != 0
    }

    /// Uppercase hex form, `2 * bytes_per_row * height` characters.
    pub fn to_hex(&self) -> String {
        hex::encode(&self.data)
    }

    /// Render as a black-on-white grayscale image (padding bits dropped).
    pub fn to_gray_image(&self) -> GrayImage {
        GrayImage::from_fn(self.width, self.height, |x, y| {
            if self.is_set(x, y) {
                Luma([0u8])
            } else {
                Luma([255u8])
            }
        })
    }
}

/// # Monochrome Rasterizer
///
/// Threshold every pixel of `image` into a [`MonochromeBitmap`] of the same
/// size. Rows are packed in parallel; the result does not depend on
/// scheduling.
pub fn rasterize<I: RasterImage + ?Sized>(image: &I) -> Result<MonochromeBitmap> {
    let (width, height) = (image.width(), image.height());
    check_dimensions(width, height)?;

    let bytes_per_row = width.div_ceil(8) as usize;
    let mut data = vec![0u8; bytes_per_row * height as usize];

    data.par_chunks_mut(bytes_per_row)
        .enumerate()
        .for_each(|(y, row)| {
            for x in 0..width {
                if is_printed(image.pixel(x, y as u32)) {
                    row[x as usize / 8] |= 0x80 >> (x % 8);
                }
            }
        });

    MonochromeBitmap::new(width, height, data)
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::raster::ArgbGrid;

    #[test]
    fn test_black_and_white() {
        assert!(is_printed(Argb::BLACK));
        assert!(!is_printed(Argb::WHITE));
    }

    #[test]
    fn test_transparency_wins_over_color() {
        assert!(!is_printed(Argb::new(0, 0, 0, 0)));
        assert!(!is_printed(Argb::new(127, 0, 0, 0)));
        assert!(!is_printed(Argb::new(ALPHA_THRESHOLD, 0, 0, 0)));
        assert!(is_printed(Argb::new(129, 0, 0, 0)));
    }

    #[test]
    fn test_luma_boundary() {
        // Gray 127 → luma 127, gray 128 → luma exactly 128
        assert!(is_printed(Argb::opaque(127, 127, 127)));
        assert!(!is_printed(Argb::opaque(128, 128, 128)));
    }

    #[test]
    fn test_luma_weights_not_average() {
        // Pure green: average 85 but luma 149.7 → white
        assert!(!is_printed(Argb::opaque(0, 255, 0)));
        // Pure red: luma 76.2 → black
        assert!(is_printed(Argb::opaque(255, 0, 0)));
        // Pure blue: luma 29.1 → black
        assert!(is_printed(Argb::opaque(0, 0, 255)));
    }

    #[test]
    fn test_pack_row_8_pixels() {
        assert_eq!(pack_row(&[true; 8]), vec![0xFF]);
        assert_eq!(pack_row(&[false; 8]), vec![0x00]);
        assert_eq!(
            pack_row(&[true, false, true, false, true, false, true, false]),
            vec![0xAA]
        );
    }

    #[test]
    fn test_pack_row_padding() {
        let packed = pack_row(&[true; 9]);
        assert_eq!(packed, vec![0xFF, 0x80]);
        assert_eq!(pack_row(&[]), Vec::<u8>::new());
    }

    #[test]
    fn test_rasterize_row_alignment() {
        // 10 px wide: x = 0, 3, 6, 8, 9 black
        let black = [0, 3, 6, 8, 9];
        let grid = ArgbGrid::from_fn(10, 2, |x, y| {
            if y == 0 && black.contains(&x) {
                Argb::BLACK
            } else {
                Argb::WHITE
            }
        })
        .unwrap();
        let bitmap = rasterize(&grid).unwrap();

        assert_eq!(bitmap.bytes_per_row(), 2);
        assert_eq!(bitmap.data(), &[0x92, 0xC0, 0x00, 0x00]);
        assert!(bitmap.is_set(9, 0));
        assert!(!bitmap.is_set(9, 1));
    }

    #[test]
    fn test_rasterize_size_invariant() {
        for width in [1, 7, 8, 9, 63, 64, 65] {
            let grid = ArgbGrid::filled(width, 3, Argb::BLACK).unwrap();
            let bitmap = rasterize(&grid).unwrap();
            let bpr = (width as usize).div_ceil(8);
            assert_eq!(bitmap.bytes_per_row(), bpr);
            assert_eq!(bitmap.byte_count(), bpr * 3);
            assert_eq!(bitmap.to_hex().len(), 2 * bpr * 3);
        }
    }

    #[test]
    fn test_rasterize_is_deterministic() {
        let grid = ArgbGrid::from_fn(37, 29, |x, y| {
            let v = ((x * 31 + y * 17) % 256) as u8;
            Argb::new(((x + y) * 9 % 256) as u8, v, v.wrapping_mul(3), 255 - v)
        })
        .unwrap();
        let first = rasterize(&grid).unwrap();
        for _ in 0..5 {
            assert_eq!(rasterize(&grid).unwrap(), first);
        }
    }

    #[test]
    fn test_new_rejects_wrong_length() {
        assert!(MonochromeBitmap::new(9, 2, vec![0; 3]).is_err());
        assert!(MonochromeBitmap::new(9, 2, vec![0; 4]).is_ok());
    }

    #[test]
    fn test_from_rows() {
        let bitmap = MonochromeBitmap::from_rows(&[vec![true, false, true], vec![false; 3]]).unwrap();
        assert_eq!(bitmap.data(), &[0xA0, 0x00]);
        assert!(MonochromeBitmap::from_rows(&[vec![true], vec![true, true]]).is_err());
        assert!(MonochromeBitmap::from_rows(&[]).is_err());
    }

    #[test]
    fn test_to_gray_image() {
        let bitmap = MonochromeBitmap::new(3, 1, vec![0b0100_0000]).unwrap();
        let img = bitmap.to_gray_image();
        assert_eq!(img.dimensions(), (3, 1));
        assert_eq!(img.get_pixel(0, 0)[0], 255);
        assert_eq!(img.get_pixel(1, 0)[0], 0);
    }
}

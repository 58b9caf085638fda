//! # Raster Input
//!
//! The codec consumes an already-decoded pixel grid. Anything that can report
//! its size and hand out `(alpha, r, g, b)` per pixel implements
//! [`RasterImage`]:
//!
//! | Source | Type |
//! |--------|------|
//! | Decoded image file | `image::DynamicImage`, `image::RgbaImage` |
//! | Packed `0xAARRGGBB` words | [`ArgbGrid`] |
//!
//! The codec only borrows the image; it never copies the source unless a
//! resize is needed.
//!
//! ## Modules
//!
//! - [`scale`]: target dimension policy and resampling

pub mod scale;

use image::{GenericImageView, Rgba, RgbaImage};

use crate::error::{GraphicError, Result};

/// One pixel, 0-255 per channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Argb {
    pub a: u8,
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Argb {
    pub const BLACK: Self = Self::opaque(0, 0, 0);
    pub const WHITE: Self = Self::opaque(255, 255, 255);
    pub const TRANSPARENT: Self = Self::new(0, 0, 0, 0);

    pub const fn new(a: u8, r: u8, g: u8, b: u8) -> Self {
        Self { a, r, g, b }
    }

    /// Fully opaque color.
    pub const fn opaque(r: u8, g: u8, b: u8) -> Self {
        Self::new(255, r, g, b)
    }

    /// Unpack a `0xAARRGGBB` word.
    ///
    /// ```
    /// use zpl_graphic::raster::Argb;
    ///
    /// assert_eq!(Argb::from_u32(0x80FF0000), Argb::new(0x80, 0xFF, 0, 0));
    /// ```
    pub const fn from_u32(argb: u32) -> Self {
        Self::new(
            (argb >> 24) as u8,
            (argb >> 16) as u8,
            (argb >> 8) as u8,
            argb as u8,
        )
    }
}

impl From<Rgba<u8>> for Argb {
    fn from(Rgba([r, g, b, a]): Rgba<u8>) -> Self {
        Self::new(a, r, g, b)
    }
}

impl From<Argb> for Rgba<u8> {
    fn from(p: Argb) -> Self {
        Rgba([p.r, p.g, p.b, p.a])
    }
}

/// A decoded, immutable pixel grid.
///
/// `pixel` is only called with `x < width()` and `y < height()`.
pub trait RasterImage: Sync {
    fn width(&self) -> u32;
    fn height(&self) -> u32;
    fn pixel(&self, x: u32, y: u32) -> Argb;
}

impl RasterImage for RgbaImage {
    fn width(&self) -> u32 {
        self.dimensions().0
    }

    fn height(&self) -> u32 {
        self.dimensions().1
    }

    fn pixel(&self, x: u32, y: u32) -> Argb {
        (*self.get_pixel(x, y)).into()
    }
}

impl RasterImage for image::DynamicImage {
    fn width(&self) -> u32 {
        GenericImageView::width(self)
    }

    fn height(&self) -> u32 {
        GenericImageView::height(self)
    }

    fn pixel(&self, x: u32, y: u32) -> Argb {
        GenericImageView::get_pixel(self, x, y).into()
    }
}

/// Row-major grid of packed `0xAARRGGBB` pixels.
///
/// The usual hand-off format from platform image loaders.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArgbGrid {
    width: u32,
    height: u32,
    pixels: Vec<u32>,
}

impl ArgbGrid {
    /// Wrap decoded pixels.
    ///
    /// Fails with [`GraphicError::InvalidImage`] when a dimension is zero or
    /// the pixel count does not match `width * height`.
    pub fn new(width: u32, height: u32, pixels: Vec<u32>) -> Result<Self> {
        check_dimensions(width, height)?;
        let expected = width as usize * height as usize;
        if pixels.len() != expected {
            return Err(GraphicError::InvalidImage(format!(
                "{}x{} image needs {} pixels, got {}",
                width,
                height,
                expected,
                pixels.len()
            )));
        }
        Ok(Self {
            width,
            height,
            pixels,
        })
    }

    /// Build a grid by evaluating `f(x, y)` for every pixel.
    pub fn from_fn<F>(width: u32, height: u32, f: F) -> Result<Self>
    where
        F: Fn(u32, u32) -> Argb,
    {
        check_dimensions(width, height)?;
        let pixels = (0..height)
            .flat_map(|y| (0..width).map(move |x| (x, y)))
            .map(|(x, y)| {
                let p = f(x, y);
                u32::from_be_bytes([p.a, p.r, p.g, p.b])
            })
            .collect();
        Ok(Self {
            width,
            height,
            pixels,
        })
    }

    /// Single-color grid.
    pub fn filled(width: u32, height: u32, color: Argb) -> Result<Self> {
        Self::from_fn(width, height, |_, _| color)
    }
}

impl RasterImage for ArgbGrid {
    fn width(&self) -> u32 {
        self.width
    }

    fn height(&self) -> u32 {
        self.height
    }

    fn pixel(&self, x: u32, y: u32) -> Argb {
        Argb::from_u32(self.pixels[y as usize * self.width as usize + x as usize])
    }
}

/// Reject images with a zero dimension.
pub fn check_dimensions(width: u32, height: u32) -> Result<()> {
    if width == 0 || height == 0 {
        return Err(GraphicError::InvalidImage(format!(
            "image dimensions must be positive, got {}x{}",
            width, height
        )));
    }
    Ok(())
}

/// Copy any raster into an RGBA buffer.
pub fn to_rgba<I: RasterImage + ?Sized>(image: &I) -> RgbaImage {
    RgbaImage::from_fn(image.width(), image.height(), |x, y| {
        image.pixel(x, y).into()
    })
}

// ============================================================================
// TESTS
// ============================================================================

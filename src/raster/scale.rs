//! # Target Dimensions and Resampling
//!
//! Label layouts specify graphics in physical units; the printer works in
//! dots. [`resolve_target`] turns a [`TargetDimensionPolicy`] plus the
//! print-head density into a target size in dots:
//!
//! | Policy | Width | Height |
//! |--------|-------|--------|
//! | NativeSize | source px | source px |
//! | FixedWidth(w) | round(w · dpu) | round(width / aspect) |
//! | FixedHeight(h) | round(height · aspect) | round(h · dpu) |
//! | FixedBox(w, h) | round(w · dpu) | round(h · dpu) |
//!
//! where `aspect = source_width / source_height` and `dpu` is dots per
//! physical unit. Both axes are floored to at least one dot and capped at
//! [`MAX_TARGET_DOTS`]. `FixedBox` stretches the image; the other policies
//! keep its aspect ratio.
//!
//! ## Example
//!
//! ```
//! use zpl_graphic::raster::scale::{TargetDimensionPolicy, resolve_target};
//!
//! // 50mm wide on an 8 dots/mm head, 2:1 source
//! let policy = TargetDimensionPolicy::FixedWidth { width: 50.0 };
//! assert_eq!(resolve_target(20, 10, 8.0, &policy).unwrap(), (400, 200));
//! ```

use image::{RgbaImage, imageops, imageops::FilterType};
use serde::{Deserialize, Serialize};

use super::{RasterImage, check_dimensions, to_rgba};
use crate::error::{GraphicError, Result};

/// How the printed size of an image is chosen.
///
/// Lengths are in physical units (millimetres in practice); they are
/// multiplied by the dots-per-unit density when resolved.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum TargetDimensionPolicy {
    /// One source pixel per dot.
    #[default]
    NativeSize,
    /// Fixed width, height follows the aspect ratio.
    FixedWidth { width: f64 },
    /// Fixed height, width follows the aspect ratio.
    FixedHeight { height: f64 },
    /// Exact box, aspect ratio is not preserved.
    FixedBox { width: f64, height: f64 },
}

impl TargetDimensionPolicy {
    /// Policy for an optional physical width and height.
    ///
    /// ```
    /// use zpl_graphic::raster::scale::TargetDimensionPolicy;
    ///
    /// assert_eq!(TargetDimensionPolicy::from_size(None, None), TargetDimensionPolicy::NativeSize);
    /// assert_eq!(
    ///     TargetDimensionPolicy::from_size(Some(30.0), None),
    ///     TargetDimensionPolicy::FixedWidth { width: 30.0 }
    /// );
    /// ```
    pub fn from_size(width: Option<f64>, height: Option<f64>) -> Self {
        match (width, height) {
            (None, None) => Self::NativeSize,
            (Some(width), None) => Self::FixedWidth { width },
            (None, Some(height)) => Self::FixedHeight { height },
            (Some(width), Some(height)) => Self::FixedBox { width, height },
        }
    }
}

/// Longest side, in dots, a resolved target may have (the widest `^PW`
/// print width a ZPL printer accepts).
pub const MAX_TARGET_DOTS: u32 = 32_000;

/// Round to whole dots, never below one.
///
/// NaN, infinite and oversized lengths are rejected.
fn to_dots(value: f64) -> Result<u32> {
    if !value.is_finite() || value.round() > MAX_TARGET_DOTS as f64 {
        return Err(GraphicError::Config(format!(
            "target size {} dots is outside 1..={}",
            value, MAX_TARGET_DOTS
        )));
    }
    Ok((value.round() as u32).max(1))
}

/// # Scaling Resolver
///
/// Compute the target size in dots for a `source_width` × `source_height`
/// pixel image.
///
/// Fails with [`GraphicError::InvalidImage`] when either source dimension is
/// zero, and with [`GraphicError::Config`] when a side is not finite or would
/// exceed [`MAX_TARGET_DOTS`].
pub fn resolve_target(
    source_width: u32,
    source_height: u32,
    dots_per_unit: f64,
    policy: &TargetDimensionPolicy,
) -> Result<(u32, u32)> {
    check_dimensions(source_width, source_height)?;

    let aspect = source_width as f64 / source_height as f64;

    let target = match *policy {
        TargetDimensionPolicy::NativeSize => (source_width, source_height),
        TargetDimensionPolicy::FixedWidth { width } => {
            let w = to_dots(width * dots_per_unit)?;
            (w, to_dots(w as f64 / aspect)?)
        }
        TargetDimensionPolicy::FixedHeight { height } => {
            let h = to_dots(height * dots_per_unit)?;
            (to_dots(h as f64 * aspect)?, h)
        }
        TargetDimensionPolicy::FixedBox { width, height } => (
            to_dots(width * dots_per_unit)?,
            to_dots(height * dots_per_unit)?,
        ),
    };

    Ok(target)
}

/// Resampling filter used when the target size differs from the source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResampleFilter {
    Nearest,
    Triangle,
    CatmullRom,
    Gaussian,
    #[default]
    Lanczos3,
}

impl From<ResampleFilter> for FilterType {
    fn from(filter: ResampleFilter) -> Self {
        match filter {
            ResampleFilter::Nearest => FilterType::Nearest,
            ResampleFilter::Triangle => FilterType::Triangle,
            ResampleFilter::CatmullRom => FilterType::CatmullRom,
            ResampleFilter::Gaussian => FilterType::Gaussian,
            ResampleFilter::Lanczos3 => FilterType::Lanczos3,
        }
    }
}

/// # Resize Step
///
/// Resample `image` to exactly `width` × `height`. A same-size request is a
/// plain copy.
pub fn resize_to<I: RasterImage + ?Sized>(
    image: &I,
    width: u32,
    height: u32,
    filter: ResampleFilter,
) -> RgbaImage {
    let rgba = to_rgba(image);
    if rgba.dimensions() == (width, height) {
        return rgba;
    }
    imageops::resize(&rgba, width, height, filter.into())
}

// ============================================================================
// TESTS
// ============================================================================

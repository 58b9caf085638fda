//! # Raster to Graphic Field Codec
//!
//! The whole pipeline in one call:
//!
//! ```text
//! RasterImage ─► resolve_target ─► resize_to ─► rasterize ─► hex ─► (acs) ─► ^GF fragment
//! ```
//!
//! Every call allocates its own buffers and keeps nothing afterwards, so
//! independent images can be encoded concurrently ([`encode_batch`]).
//!
//! ## Example
//!
//! ```
//! use zpl_graphic::codec::{EncodeOptions, encode_fragment};
//! use zpl_graphic::protocol::graphic_field::CompressionMode;
//! use zpl_graphic::raster::{Argb, ArgbGrid};
//!
//! let image = ArgbGrid::filled(16, 3, Argb::BLACK)?;
//! let options = EncodeOptions::default().compression(CompressionMode::RowRunLength);
//!
//! let zpl = encode_fragment(&image, &options, "^FO20,20")?;
//! assert_eq!(zpl, "^FO20,20^GFC,6,6,2,2FF::^FS");
//! # Ok::<(), zpl_graphic::GraphicError>(())
//! ```

use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{GraphicError, Result};
use crate::printer::PrinterConfig;
use crate::protocol::graphic_field::{CompressionMode, GraphicFieldPayload};
use crate::raster::RasterImage;
use crate::raster::scale::{ResampleFilter, TargetDimensionPolicy, resize_to, resolve_target};
use crate::render::threshold::{MonochromeBitmap, rasterize};

/// Inputs that shape one encode call besides the image itself.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EncodeOptions {
    pub policy: TargetDimensionPolicy,
    /// Printer dots per physical unit of the policy's lengths.
    pub dots_per_unit: f64,
    pub compression: CompressionMode,
    pub filter: ResampleFilter,
}

impl Default for EncodeOptions {
    fn default() -> Self {
        Self::for_printer(PrinterConfig::default())
    }
}

impl EncodeOptions {
    /// Native size, no compression, lengths in millimetres for `printer`.
    pub fn for_printer(printer: PrinterConfig) -> Self {
        Self {
            policy: TargetDimensionPolicy::NativeSize,
            dots_per_unit: printer.dots_per_mm(),
            compression: CompressionMode::None,
            filter: ResampleFilter::default(),
        }
    }

    pub fn policy(mut self, policy: TargetDimensionPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn dots_per_unit(mut self, dots_per_unit: f64) -> Self {
        self.dots_per_unit = dots_per_unit;
        self
    }

    pub fn compression(mut self, compression: CompressionMode) -> Self {
        self.compression = compression;
        self
    }

    pub fn filter(mut self, filter: ResampleFilter) -> Self {
        self.filter = filter;
        self
    }

    /// Load options from JSON; missing keys keep their defaults.
    ///
    /// ```
    /// use zpl_graphic::codec::EncodeOptions;
    /// use zpl_graphic::protocol::graphic_field::CompressionMode;
    ///
    /// let options = EncodeOptions::from_json(r#"{"compression": "row_run_length"}"#).unwrap();
    /// assert_eq!(options.compression, CompressionMode::RowRunLength);
    /// assert_eq!(options.dots_per_unit, 8.0);
    /// ```
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|e| GraphicError::Config(e.to_string()))
    }
}

/// Scale and threshold `image` into the bitmap that will be printed.
pub fn to_bitmap<I: RasterImage + ?Sized>(image: &I, options: &EncodeOptions) -> Result<MonochromeBitmap> {
    let (source_width, source_height) = (image.width(), image.height());
    let (width, height) = resolve_target(
        source_width,
        source_height,
        options.dots_per_unit,
        &options.policy,
    )?;
    debug!(source_width, source_height, width, height, "resolved graphic target size");

    if (width, height) == (source_width, source_height) {
        rasterize(image)
    } else {
        rasterize(&resize_to(image, width, height, options.filter))
    }
}

/// Encode `image` into a graphic field payload.
pub fn encode<I: RasterImage + ?Sized>(image: &I, options: &EncodeOptions) -> Result<GraphicFieldPayload> {
    let bitmap = to_bitmap(image, options)?;
    let payload = GraphicFieldPayload::from_bitmap(&bitmap, options.compression)?;

    debug!(
        bytes_per_row = payload.bytes_per_row,
        byte_count = payload.byte_count,
        compression = %payload.compression,
        data_len = payload.data.len(),
        "encoded graphic field"
    );

    Ok(payload)
}

/// Encode `image` and prefix the field with `position` (e.g. `^FO10,10`).
pub fn encode_fragment<I: RasterImage + ?Sized>(
    image: &I,
    options: &EncodeOptions,
    position: &str,
) -> Result<String> {
    Ok(encode(image, options)?.to_command(position))
}

/// Encode independent images in parallel; results keep input order.
pub fn encode_batch(images: &[&dyn RasterImage], options: &EncodeOptions) -> Vec<Result<GraphicFieldPayload>> {
    images
        .par_iter()
        .map(|image| encode(*image, options))
        .collect()
}

// ============================================================================
// TESTS
// ============================================================================

//! # zpl-graphic - Raster Images as ZPL Graphic Fields
//!
//! zpl-graphic converts color images into the monochrome bitmap carried by
//! the ZPL graphic field command (`^GF`), optionally compressing it with the
//! row run-length text scheme. It provides:
//!
//! - **Scaling**: physical size policies resolved to printer dots
//! - **Thresholding**: alpha-aware BT.601 luma threshold to 1-bit rows
//! - **Encoding**: ASCII hex and row run-length compression, with decoders
//! - **Assembly**: the complete `^GF...^FS` fragment, position-first
//!
//! ## Quick Start
//!
//! ```
//! use zpl_graphic::{
//!     codec::{self, EncodeOptions},
//!     printer::PrinterConfig,
//!     protocol::{commands, graphic_field::CompressionMode},
//!     raster::{Argb, ArgbGrid, scale::TargetDimensionPolicy},
//! };
//!
//! // A decoded image: 20x10 black rectangle
//! let image = ArgbGrid::filled(20, 10, Argb::BLACK)?;
//!
//! // Print it 25mm wide on a 203 DPI printer, compressed
//! let options = EncodeOptions::for_printer(PrinterConfig::DPMM_8)
//!     .policy(TargetDimensionPolicy::FixedWidth { width: 25.0 })
//!     .compression(CompressionMode::RowRunLength);
//!
//! let field = codec::encode_fragment(&image, &options, &commands::field_origin(30, 30))?;
//! assert!(field.starts_with("^FO30,30^GFC,2500,2500,25,"));
//! assert!(field.ends_with("^FS"));
//!
//! # Ok::<(), zpl_graphic::GraphicError>(())
//! ```
//!
//! ## Module Overview
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`codec`] | The full image → fragment pipeline |
//! | [`raster`] | Pixel input and scaling |
//! | [`render`] | Monochrome thresholding and bit packing |
//! | [`protocol`] | ZPL tokens, hex, compression, graphic field |
//! | [`printer`] | Print-head resolutions |
//! | [`error`] | Error types |

pub mod codec;
pub mod error;
pub mod printer;
pub mod protocol;
pub mod raster;
pub mod render;

// Re-exports for convenience
pub use codec::{EncodeOptions, encode, encode_fragment};
pub use error::GraphicError;
pub use printer::PrinterConfig;
pub use protocol::graphic_field::{CompressionMode, GraphicFieldPayload};

//! # ZPL Graphic Field Protocol
//!
//! This module provides the text encodings used to embed a bitmap in a ZPL
//! label format.
//!
//! ## Module Structure
//!
//! - [`commands`]: Label, field origin and field terminator tokens
//! - [`hex`]: ASCII hex encoding of bitmap bytes
//! - [`acs`]: Row run-length compression (alternative compression scheme)
//! - [`graphic_field`]: Compression modes and the `^GF` command itself
//!
//! ## Usage Example
//!
//! ```
//! use zpl_graphic::protocol::{commands, graphic_field::{CompressionMode, GraphicFieldPayload}};
//!
//! // Two rows of 16 dots: a solid bar, then the same again
//! let payload = GraphicFieldPayload::from_hex("FFFFFFFF".into(), 2, CompressionMode::None)?;
//!
//! let label = commands::label(&[payload.to_command(&commands::field_origin(10, 10))]);
//! assert_eq!(label, "^XA\n^FO10,10^GFA,4,4,2,FFFFFFFF^FS\n^XZ\n");
//! # Ok::<(), zpl_graphic::GraphicError>(())
//! ```

pub mod acs;
pub mod commands;
pub mod graphic_field;
pub mod hex;

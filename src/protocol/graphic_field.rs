//! # Graphic Field (^GF)
//!
//! Embeds a 1-bit bitmap in the label format as text.
//!
//! ## Wire Format
//!
//! ```text
//! <position>^GF<m>,<b>,<c>,<d>,<data>^FS
//!
//! m     compression letter (A = ASCII hex, C = row run-length)
//! b     binary byte count   = bytes_per_row * height (decompressed)
//! c     graphic field count = same value, checked by the receiver
//! d     bytes per row
//! data  hex or compressed text, no whitespace
//! ```
//!
//! Both counts always report the *decompressed* size, whatever the mode.
//!
//! ## Example
//!
//! ```
//! use zpl_graphic::protocol::graphic_field::{CompressionMode, GraphicFieldPayload};
//!
//! let payload = GraphicFieldPayload::from_hex("FF00FF00".into(), 2, CompressionMode::RowRunLength).unwrap();
//! assert_eq!(payload.to_command("^FO10,10"), "^FO10,10^GFC,4,4,2,FF00:^FS");
//! ```

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::commands::{FIELD_END, GRAPHIC_FIELD};
use super::{acs, hex};
use crate::error::{GraphicError, Result};
use crate::render::threshold::MonochromeBitmap;

// ============================================================================
// COMPRESSION MODES
// ============================================================================

/// How the bitmap data is written into the field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CompressionMode {
    /// Plain uppercase ASCII hex.
    #[default]
    None,
    /// Row shorthand plus run-length counts, see [`acs`].
    RowRunLength,
}

impl CompressionMode {
    /// Letter written after `^GF`.
    pub fn mode_letter(self) -> char {
        match self {
            Self::None => 'A',
            Self::RowRunLength => 'C',
        }
    }

    /// Mode for a `^GF` letter.
    ///
    /// `B` (raw binary) is a valid ZPL letter but cannot be carried as text,
    /// so it is reported as unsupported like any unknown letter.
    pub fn from_letter(letter: char) -> Result<Self> {
        match letter.to_ascii_uppercase() {
            'A' => Ok(Self::None),
            'C' => Ok(Self::RowRunLength),
            'B' => Err(GraphicError::UnsupportedCompression(
                "binary graphic fields (B) are not supported".to_string(),
            )),
            other => Err(GraphicError::UnsupportedCompression(format!(
                "unknown compression letter '{}'",
                other
            ))),
        }
    }

    /// Encoder/decoder pair for this mode.
    pub fn strategy(self) -> &'static dyn CompressionStrategy {
        match self {
            Self::None => &NoCompression,
            Self::RowRunLength => &RowRunLength,
        }
    }
}

impl fmt::Display for CompressionMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::None => write!(f, "none"),
            Self::RowRunLength => write!(f, "row-run-length"),
        }
    }
}

impl FromStr for CompressionMode {
    type Err = GraphicError;

    /// Accepts mode names (`none`, `hex`, `acs`, `row-run-length`) or a
    /// `^GF` letter.
    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "none" | "hex" | "ascii" => Ok(Self::None),
            "acs" | "rle" | "row-run-length" | "row_run_length" => Ok(Self::RowRunLength),
            other => {
                let mut chars = other.chars();
                match (chars.next(), chars.next()) {
                    (Some(letter), None) => Self::from_letter(letter),
                    _ => Err(GraphicError::UnsupportedCompression(format!(
                        "unknown compression mode '{}'",
                        s
                    ))),
                }
            }
        }
    }
}

/// Turns the flat hex form of a bitmap into field data and back.
pub trait CompressionStrategy: Sync {
    fn mode(&self) -> CompressionMode;

    /// Encode `bytes_per_row * 2` hex characters per row into field data.
    fn encode(&self, hex_data: String, bytes_per_row: usize) -> Result<String>;

    /// Decode field data back into raw bitmap bytes.
    fn decode(&self, data: &str, bytes_per_row: usize) -> Result<Vec<u8>>;
}

/// Mode `A`: data is the hex string itself.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoCompression;

impl CompressionStrategy for NoCompression {
    fn mode(&self) -> CompressionMode {
        CompressionMode::None
    }

    fn encode(&self, mut hex_data: String, _bytes_per_row: usize) -> Result<String> {
        if let Some(pos) = hex_data.bytes().position(|c| hex::nibble(c).is_none()) {
            return Err(GraphicError::CorruptData(format!(
                "invalid hex character at offset {}",
                pos
            )));
        }
        hex_data.make_ascii_uppercase();
        Ok(hex_data)
    }

    fn decode(&self, data: &str, _bytes_per_row: usize) -> Result<Vec<u8>> {
        hex::decode(data)
    }
}

/// Mode `C`: alternative compression scheme.
#[derive(Debug, Clone, Copy, Default)]
pub struct RowRunLength;

impl CompressionStrategy for RowRunLength {
    fn mode(&self) -> CompressionMode {
        CompressionMode::RowRunLength
    }

    fn encode(&self, hex_data: String, bytes_per_row: usize) -> Result<String> {
        acs::compress(&hex_data, bytes_per_row)
    }

    fn decode(&self, data: &str, bytes_per_row: usize) -> Result<Vec<u8>> {
        acs::decompress_bytes(data, bytes_per_row)
    }
}

// ============================================================================
// PAYLOAD
// ============================================================================

/// Everything a `^GF` command carries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GraphicFieldPayload {
    pub compression: CompressionMode,
    /// Decompressed size in bytes (`bytes_per_row * height`).
    pub byte_count: usize,
    pub bytes_per_row: usize,
    /// Hex or compressed text.
    pub data: String,
}

impl GraphicFieldPayload {
    /// Encode a bitmap's hex form with the given mode.
    pub fn from_hex(hex_data: String, bytes_per_row: usize, compression: CompressionMode) -> Result<Self> {
        if bytes_per_row == 0 || hex_data.len() % (bytes_per_row * 2) != 0 {
            return Err(GraphicError::CorruptData(format!(
                "{} hex characters is not a whole number of {}-byte rows",
                hex_data.len(),
                bytes_per_row
            )));
        }
        let byte_count = hex_data.len() / 2;
        let data = compression.strategy().encode(hex_data, bytes_per_row)?;

        Ok(Self {
            compression,
            byte_count,
            bytes_per_row,
            data,
        })
    }

    /// Encode a bitmap with the given mode.
    pub fn from_bitmap(bitmap: &MonochromeBitmap, compression: CompressionMode) -> Result<Self> {
        Self::from_hex(bitmap.to_hex(), bitmap.bytes_per_row(), compression)
    }

    /// Number of rows in the bitmap.
    pub fn height(&self) -> usize {
        self.byte_count / self.bytes_per_row
    }

    /// The `^GF...^FS` fragment, without position.
    pub fn to_fragment(&self) -> String {
        assemble(
            self.bytes_per_row,
            self.byte_count,
            self.compression,
            &self.data,
        )
    }

    /// Position fragment followed by the graphic field.
    pub fn to_command(&self, position: &str) -> String {
        let mut out = String::with_capacity(position.len() + self.data.len() + 32);
        out.push_str(position);
        out.push_str(&self.to_fragment());
        out
    }

    /// Parse the first `^GF...^FS` field found in `text`.
    ///
    /// Anything before `^GF` (such as an `^FO` position) is ignored. Both
    /// counts must agree, be a whole number of rows, and match the decoded
    /// data; otherwise [`GraphicError::CorruptData`] is returned.
    pub fn parse(text: &str) -> Result<Self> {
        let start = text
            .find(GRAPHIC_FIELD)
            .ok_or_else(|| corrupt(format!("no {} field found", GRAPHIC_FIELD)))?;
        let body = &text[start + GRAPHIC_FIELD.len()..];
        let end = body
            .find(FIELD_END)
            .ok_or_else(|| corrupt(format!("{} field is not terminated by {}", GRAPHIC_FIELD, FIELD_END)))?;
        let body = &body[..end];

        let mut parts = body.splitn(5, ',');
        let (Some(mode), Some(b), Some(c), Some(d), Some(data)) =
            (parts.next(), parts.next(), parts.next(), parts.next(), parts.next())
        else {
            return Err(corrupt(format!("{} field has fewer than 5 parameters", GRAPHIC_FIELD)));
        };

        let mut letters = mode.chars();
        let compression = match (letters.next(), letters.next()) {
            (Some(letter), None) => CompressionMode::from_letter(letter)?,
            _ => return Err(corrupt(format!("invalid compression parameter '{}'", mode))),
        };
        let byte_count = parse_count("binary byte count", b)?;
        let field_count = parse_count("graphic field count", c)?;
        let bytes_per_row = parse_count("bytes per row", d)?;

        if byte_count != field_count {
            return Err(corrupt(format!(
                "byte count {} does not match graphic field count {}",
                byte_count, field_count
            )));
        }
        if bytes_per_row == 0 || byte_count % bytes_per_row != 0 {
            return Err(corrupt(format!(
                "byte count {} is not a whole number of {}-byte rows",
                byte_count, bytes_per_row
            )));
        }

        let payload = Self {
            compression,
            byte_count,
            bytes_per_row,
            data: data.to_string(),
        };
        // Validate the data now so a parsed payload is always decodable
        payload.decode_bytes()?;
        Ok(payload)
    }

    /// Decompressed bitmap bytes.
    pub fn decode_bytes(&self) -> Result<Vec<u8>> {
        let bytes = self
            .compression
            .strategy()
            .decode(&self.data, self.bytes_per_row)?;
        if bytes.len() != self.byte_count {
            return Err(corrupt(format!(
                "data decodes to {} bytes, field declares {}",
                bytes.len(),
                self.byte_count
            )));
        }
        Ok(bytes)
    }

    /// Decompressed data as uppercase hex.
    pub fn decode_hex(&self) -> Result<String> {
        Ok(hex::encode(&self.decode_bytes()?))
    }

    /// Recover the bitmap; `width` must need exactly `bytes_per_row` bytes.
    pub fn to_bitmap(&self, width: u32) -> Result<MonochromeBitmap> {
        if width.div_ceil(8) as usize != self.bytes_per_row {
            return Err(GraphicError::InvalidImage(format!(
                "width {} does not fit {} bytes per row",
                width, self.bytes_per_row
            )));
        }
        MonochromeBitmap::new(width, self.height() as u32, self.decode_bytes()?)
    }
}

fn corrupt(msg: String) -> GraphicError {
    GraphicError::CorruptData(msg)
}

fn parse_count(name: &str, value: &str) -> Result<usize> {
    value
        .trim()
        .parse()
        .map_err(|_| corrupt(format!("invalid {} '{}'", name, value)))
}

/// # Graphic Field Assembler
///
/// Build `^GF<m>,<b>,<b>,<d>,<data>^FS`. `byte_count` is written twice:
/// once as the binary byte count and once as the graphic field count.
pub fn assemble(bytes_per_row: usize, byte_count: usize, compression: CompressionMode, data: &str) -> String {
    format!(
        "{}{},{},{},{},{}{}",
        GRAPHIC_FIELD,
        compression.mode_letter(),
        byte_count,
        byte_count,
        bytes_per_row,
        data,
        FIELD_END
    )
}

// ============================================================================
// TESTS
// ============================================================================

//! # ASCII Hex Encoding
//!
//! Graphic field data in mode `A` is the bitmap written as uppercase hex,
//! two characters per byte, no separators:
//!
//! ```text
//! [0xA1, 0x07, 0xFF] → "A107FF"
//! ```
//!
//! The output length is always `2 * bytes.len()`, so a bitmap of
//! `bytes_per_row * height` bytes yields `2 * bytes_per_row * height` characters.

use crate::error::{GraphicError, Result};

const HEX_DIGITS: &[u8; 16] = b"0123456789ABCDEF";

/// Encode bytes as an uppercase hex string.
///
/// ## Example
///
/// ```
/// use zpl_graphic::protocol::hex;
///
/// assert_eq!(hex::encode(&[0x0F, 0xA0]), "0FA0");
/// ```
pub fn encode(bytes: &[u8]) -> String {
    let mut out = String::with_capacity(bytes.len() * 2);
    for &byte in bytes {
        push_byte(&mut out, byte);
    }
    out
}

/// Append one byte as two uppercase hex characters.
#[inline]
pub fn push_byte(out: &mut String, byte: u8) {
    out.push(HEX_DIGITS[(byte >> 4) as usize] as char);
    out.push(HEX_DIGITS[(byte & 0x0F) as usize] as char);
}

/// Value of a single hex digit, accepting either case.
#[inline]
pub fn nibble(c: u8) -> Option<u8> {
    match c {
        b'0'..=b'9' => Some(c - b'0'),
        b'A'..=b'F' => Some(c - b'A' + 10),
        b'a'..=b'f' => Some(c - b'a' + 10),
        _ => None,
    }
}

/// Decode a hex string back into bytes.
///
/// Fails with [`GraphicError::CorruptData`] on odd length or any non-hex
/// character.
pub fn decode(hex: &str) -> Result<Vec<u8>> {
    let raw = hex.as_bytes();
    if raw.len() % 2 != 0 {
        return Err(GraphicError::CorruptData(format!(
            "hex data has odd length {}",
            raw.len()
        )));
    }

    raw.chunks_exact(2)
        .enumerate()
        .map(|(i, pair)| match (nibble(pair[0]), nibble(pair[1])) {
            (Some(hi), Some(lo)) => Ok((hi << 4) | lo),
            _ => Err(GraphicError::CorruptData(format!(
                "invalid hex pair '{}' at offset {}",
                String::from_utf8_lossy(pair),
                i * 2
            ))),
        })
        .collect()
}

// ============================================================================
// TESTS
// ============================================================================

//! # Alternative Compression Scheme (Row Run-Length)
//!
//! Shrinks the ASCII hex form of a bitmap using redundancy between rows and
//! runs of identical bytes within a row. The output is plain text made of hex
//! digits and a small control alphabet, so it can sit inside a `^GF` field.
//!
//! ## Row Shorthand
//!
//! Each physical row is encoded on its own, in order:
//!
//! | Token | Meaning |
//! |-------|---------|
//! | `:` | Row is identical to the previous row |
//! | `,` | Row is all zero bytes (nothing printed) |
//! | tokens | Row spelled out as run-length tokens |
//!
//! `:` wins over `,`: a blank row that follows another blank row is `:`.
//! Rows are concatenated with no delimiter; the decoder knows `bytes_per_row`.
//!
//! ## Run Tokens
//!
//! A token is an optional repeat count followed by one hex pair (one byte):
//!
//! ```text
//! token  = [g-y]? [G-Y]? [1-9]? pair
//!
//! g..y   400, 800, ... 7600   (steps of 400)
//! G..Y   20, 40, ... 380      (steps of 20)
//! 1..9   1 ... 9
//! ```
//!
//! Symbols add up: `H3` = 40 + 3 = 43, `gG` = 420. No prefix means a count
//! of one. The largest single token is `yY9` = 7989; longer runs, and runs
//! whose remainder mod 20 falls in 10..=19, continue in the next token.
//!
//! ```text
//! FF FF FF FF FF 07        → "5FF07"
//! 00 x 43                  → "H300"
//! ```
//!
//! ## Digit-Led Pairs
//!
//! A pair such as `12` starts with a character that is also a count symbol.
//! Such pairs always carry a prefix ending in a digit (a lone `12` is written
//! `112`), so a `1`-`9` in prefix position is unambiguously a count.

use std::iter;

use crate::error::{GraphicError, Result};
use crate::protocol::hex;

/// Row identical to the previous row
pub const REPEAT_PREVIOUS_ROW: char = ':';

/// Row of zero bytes
pub const BLANK_ROW: char = ',';

/// Shortest run written with a count prefix (shorter runs are literal pairs).
pub const MIN_PREFIXED_RUN: usize = 2;

const LOWER_STEP: usize = 400;
const UPPER_STEP: usize = 20;
const MAX_STEPS: usize = 19;
const MAX_DIGIT: usize = 9;

/// Largest count a single token can carry (`yY9`).
pub const MAX_TOKEN_COUNT: usize = LOWER_STEP * MAX_STEPS + UPPER_STEP * MAX_STEPS + MAX_DIGIT;

/// Repeat count split into its three symbol positions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct RunCount {
    lower: usize,
    upper: usize,
    digit: usize,
}

impl RunCount {
    /// Largest token count not exceeding `remaining`.
    ///
    /// With `needs_digit`, the result always has a non-zero digit so that a
    /// following digit-led pair cannot be read as part of the count.
    fn largest(remaining: usize, needs_digit: bool) -> Self {
        let capped = remaining.min(MAX_TOKEN_COUNT);
        let mut lower = (capped / LOWER_STEP).min(MAX_STEPS);
        let mut upper = ((capped - lower * LOWER_STEP) / UPPER_STEP).min(MAX_STEPS);
        let mut digit = (capped - lower * LOWER_STEP - upper * UPPER_STEP).min(MAX_DIGIT);

        if needs_digit && digit == 0 {
            // capped is a multiple of 20 here, so at least one letter is set
            if upper > 0 {
                upper -= 1;
            } else {
                lower -= 1;
                upper = MAX_STEPS;
            }
            digit = MAX_DIGIT;
        }

        Self {
            lower,
            upper,
            digit,
        }
    }

    fn total(self) -> usize {
        self.lower * LOWER_STEP + self.upper * UPPER_STEP + self.digit
    }

    fn write(self, out: &mut String) {
        if self.lower > 0 {
            out.push((b'g' + self.lower as u8 - 1) as char);
        }
        if self.upper > 0 {
            out.push((b'G' + self.upper as u8 - 1) as char);
        }
        if self.digit > 0 {
            out.push((b'0' + self.digit as u8) as char);
        }
    }
}

/// Whether the byte's hex form starts with one of the count digits `1`-`9`.
#[inline]
fn is_digit_led(byte: u8) -> bool {
    matches!(byte >> 4, 1..=9)
}

fn push_run(byte: u8, count: usize, out: &mut String) {
    let needs_digit = is_digit_led(byte);
    let mut remaining = count;

    while remaining > 0 {
        if !needs_digit && remaining < MIN_PREFIXED_RUN {
            for _ in 0..remaining {
                hex::push_byte(out, byte);
            }
            return;
        }

        let run = RunCount::largest(remaining, needs_digit);
        run.write(out);
        hex::push_byte(out, byte);
        remaining -= run.total();
    }
}

fn encode_row(row: &[u8], out: &mut String) {
    let mut i = 0;
    while i < row.len() {
        let byte = row[i];
        let run = row[i..].iter().take_while(|&&b| b == byte).count();
        push_run(byte, run, out);
        i += run;
    }
}

fn check_bytes_per_row(bytes_per_row: usize) -> Result<()> {
    if bytes_per_row == 0 {
        return Err(GraphicError::CorruptData(
            "bytes per row must be positive".to_string(),
        ));
    }
    Ok(())
}

/// Compress raw bitmap bytes, `bytes_per_row` bytes per physical row.
///
/// `data.len()` must be a multiple of `bytes_per_row`.
pub fn compress_bytes(data: &[u8], bytes_per_row: usize) -> Result<String> {
    check_bytes_per_row(bytes_per_row)?;
    if data.len() % bytes_per_row != 0 {
        return Err(GraphicError::CorruptData(format!(
            "{} bytes is not a whole number of {}-byte rows",
            data.len(),
            bytes_per_row
        )));
    }

    let mut out = String::with_capacity(data.len());
    let mut previous: Option<&[u8]> = None;

    for row in data.chunks_exact(bytes_per_row) {
        if previous == Some(row) {
            out.push(REPEAT_PREVIOUS_ROW);
        } else if row.iter().all(|&b| b == 0) {
            out.push(BLANK_ROW);
        } else {
            encode_row(row, &mut out);
        }
        previous = Some(row);
    }

    Ok(out)
}

/// Compress a flat hex string (no separators) holding `bytes_per_row * 2`
/// characters per row.
///
/// ## Example
///
/// ```
/// use zpl_graphic::protocol::acs;
///
/// let rows = "A1B2C3D4E5F60708".repeat(3);
/// assert_eq!(acs::compress(&rows, 8).unwrap(), "A1B2C3D4E5F60708::");
/// ```
pub fn compress(hex_data: &str, bytes_per_row: usize) -> Result<String> {
    compress_bytes(&hex::decode(hex_data)?, bytes_per_row)
}

/// Read an optional count prefix starting at `pos`.
///
/// Returns the count (1 when absent) and the position after the prefix.
fn read_count(raw: &[u8], mut pos: usize) -> (usize, usize) {
    let mut total = 0;

    if let Some(c @ b'g'..=b'y') = raw.get(pos).copied() {
        total += (c - b'g' + 1) as usize * LOWER_STEP;
        pos += 1;
    }
    if let Some(c @ b'G'..=b'Y') = raw.get(pos).copied() {
        total += (c - b'G' + 1) as usize * UPPER_STEP;
        pos += 1;
    }
    if let Some(c @ b'1'..=b'9') = raw.get(pos).copied() {
        total += (c - b'0') as usize;
        pos += 1;
    }

    (if total == 0 { 1 } else { total }, pos)
}

fn read_pair(raw: &[u8], pos: usize) -> Result<u8> {
    let pair = raw.get(pos..pos + 2).ok_or_else(|| {
        GraphicError::CorruptData(format!("stream truncated inside token at offset {}", pos))
    })?;

    match (hex::nibble(pair[0]), hex::nibble(pair[1])) {
        (Some(hi), Some(lo)) => Ok((hi << 4) | lo),
        (None, _) => Err(unknown_symbol(pair[0], pos)),
        (_, None) => Err(unknown_symbol(pair[1], pos + 1)),
    }
}

fn unknown_symbol(c: u8, pos: usize) -> GraphicError {
    GraphicError::CorruptData(format!(
        "unknown symbol {:?} at offset {}",
        c as char, pos
    ))
}

/// Expand compressed data back into raw bitmap bytes.
///
/// Fails with [`GraphicError::CorruptData`] when a run overruns its row, a
/// symbol is not part of the alphabet, a row shorthand appears mid-row or
/// before any row, or the stream ends inside a row.
pub fn decompress_bytes(data: &str, bytes_per_row: usize) -> Result<Vec<u8>> {
    check_bytes_per_row(bytes_per_row)?;

    let raw = data.as_bytes();
    let mut out: Vec<u8> = Vec::with_capacity(raw.len());
    let mut row: Vec<u8> = Vec::with_capacity(bytes_per_row);
    let mut pos = 0;

    while pos < raw.len() {
        match raw[pos] {
            b':' | b',' if !row.is_empty() => {
                return Err(GraphicError::CorruptData(format!(
                    "row shorthand {:?} inside a partial row at offset {}",
                    raw[pos] as char, pos
                )));
            }
            b':' => {
                if out.is_empty() {
                    return Err(GraphicError::CorruptData(
                        "':' with no previous row".to_string(),
                    ));
                }
                let start = out.len() - bytes_per_row;
                out.extend_from_within(start..);
                pos += 1;
            }
            b',' => {
                out.resize(out.len() + bytes_per_row, 0);
                pos += 1;
            }
            _ => {
                let (count, pair_pos) = read_count(raw, pos);
                let byte = read_pair(raw, pair_pos)?;

                if row.len() + count > bytes_per_row {
                    return Err(GraphicError::CorruptData(format!(
                        "run of {} at offset {} overruns {}-byte row",
                        count, pos, bytes_per_row
                    )));
                }
                row.extend(iter::repeat_n(byte, count));
                if row.len() == bytes_per_row {
                    out.extend_from_slice(&row);
                    row.clear();
                }
                pos = pair_pos + 2;
            }
        }
    }

    if !row.is_empty() {
        return Err(GraphicError::CorruptData(format!(
            "stream ended with {} of {} bytes in the last row",
            row.len(),
            bytes_per_row
        )));
    }

    Ok(out)
}

/// Expand compressed data back into the flat uppercase hex string.
pub fn decompress(data: &str, bytes_per_row: usize) -> Result<String> {
    Ok(hex::encode(&decompress_bytes(data, bytes_per_row)?))
}

// ============================================================================
// TESTS
// ============================================================================

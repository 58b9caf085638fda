//! # Error Types
//!
//! This module defines error types used throughout the zpl-graphic library.
//!
//! Every error surfaces synchronously to the caller. Encoding is a pure
//! function of its inputs, so nothing is retried internally and no partial
//! output is returned on failure.

use thiserror::Error;

/// Main error type for graphic field operations
#[derive(Debug, Error)]
pub enum GraphicError {
    /// Non-positive dimensions or a pixel source that does not match them
    #[error("Invalid image: {0}")]
    InvalidImage(String),

    /// Requested compression mode is not implemented by this codec
    #[error("Unsupported compression: {0}")]
    UnsupportedCompression(String),

    /// Compressed or hex data that cannot be decoded back into a bitmap
    #[error("Corrupt data: {0}")]
    CorruptData(String),

    /// Malformed encode options (JSON config, CLI values)
    #[error("Invalid configuration: {0}")]
    Config(String),

    /// Image file decode/encode failure (CLI input and preview output)
    #[error("Image error: {0}")]
    Image(String),

    /// I/O error wrapper
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience alias used by every fallible operation in the crate.
pub type Result<T> = std::result::Result<T, GraphicError>;

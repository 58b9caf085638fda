//! # Rendering Module
//!
//! Turns color pixels into the 1-bit rows a printer burns.
//!
//! ## Modules
//!
//! - [`threshold`]: alpha-aware luma threshold and MSB-first bit packing

pub mod threshold;

pub use threshold::{MonochromeBitmap, rasterize};

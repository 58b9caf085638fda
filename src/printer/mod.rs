//! # Printer Module
//!
//! This module provides printer-specific configurations and utilities.
//!
//! ## Modules
//!
//! - [`config`]: Print-head resolution presets

pub mod config;

pub use config::PrinterConfig;

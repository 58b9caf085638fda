//! # Printer Configuration
//!
//! This module defines the print-head densities of ZPL label printers.
//!
//! ## Supported Densities
//!
//! | Preset | Dots/mm | Resolution |
//! |--------|---------|------------|
//! | DPMM_6 | 6 | 152 DPI |
//! | DPMM_8 | 8 | 203 DPI |
//! | DPMM_12 | 12 | 300 DPI |
//! | DPMM_24 | 24 | 600 DPI |
//!
//! ## Usage
//!
//! ```
//! use zpl_graphic::printer::PrinterConfig;
//!
//! let config = PrinterConfig::DPMM_8;
//! assert_eq!(config.mm_to_dots(50.0), 400);
//! ```

/// # Printer Configuration
///
/// Defines the resolution of a label printer's print head.
///
/// ZPL firmware works in nominal dots per millimetre: a "203 DPI" head is
/// addressed as exactly 8 dots/mm, so conversions use `dpmm` rather than
/// `dpi / 25.4`.
///
/// ```text
/// dots = round(mm * dpmm)
///
/// For an 8 dpmm head:
///   50mm label width = 400 dots
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PrinterConfig {
    /// Preset name
    pub name: &'static str,

    /// Nominal resolution in dots per inch
    pub dpi: u16,

    /// Dots per millimetre as addressed by the firmware
    pub dpmm: u8,
}

impl PrinterConfig {
    /// 6 dots/mm (152 DPI) print head.
    pub const DPMM_6: Self = Self {
        name: "6dpmm",
        dpi: 152,
        dpmm: 6,
    };

    /// 8 dots/mm (203 DPI) print head, the most common desktop density.
    pub const DPMM_8: Self = Self {
        name: "8dpmm",
        dpi: 203,
        dpmm: 8,
    };

    /// 12 dots/mm (300 DPI) print head.
    pub const DPMM_12: Self = Self {
        name: "12dpmm",
        dpi: 300,
        dpmm: 12,
    };

    /// 24 dots/mm (600 DPI) print head.
    pub const DPMM_24: Self = Self {
        name: "24dpmm",
        dpi: 600,
        dpmm: 24,
    };

    /// All built-in presets, lowest density first.
    pub const BUILT_IN: [Self; 4] = [Self::DPMM_6, Self::DPMM_8, Self::DPMM_12, Self::DPMM_24];

    /// Dots per millimetre as a scaling factor.
    #[inline]
    pub fn dots_per_mm(&self) -> f64 {
        self.dpmm as f64
    }

    /// Convert millimeters to dots
    #[inline]
    pub fn mm_to_dots(&self, mm: f64) -> u32 {
        (mm * self.dots_per_mm()).round().max(0.0) as u32
    }

    /// Convert dots to millimeters
    #[inline]
    pub fn dots_to_mm(&self, dots: u32) -> f64 {
        dots as f64 / self.dots_per_mm()
    }

    /// Parse a density string (CLI args or config files).
    ///
    /// Formats:
    /// - `"8dpmm"` → by dots per millimetre
    /// - `"203dpi"` or `"203"` → by dots per inch
    pub fn parse(s: &str) -> Result<Self, String> {
        let lower = s.trim().to_lowercase();

        let found = if let Some(dpmm) = lower.strip_suffix("dpmm") {
            let dpmm: u8 = dpmm
                .trim()
                .parse()
                .map_err(|_| format!("Invalid dpmm: {}", s))?;
            Self::BUILT_IN.into_iter().find(|c| c.dpmm == dpmm)
        } else {
            let dpi = lower.strip_suffix("dpi").unwrap_or(&lower);
            let dpi: u16 = dpi
                .trim()
                .parse()
                .map_err(|_| format!("Invalid dpi: {}", s))?;
            Self::BUILT_IN.into_iter().find(|c| c.dpi == dpi)
        };

        found.ok_or_else(|| {
            format!(
                "Unknown printer density '{}'. Use 152/203/300/600 dpi or 6/8/12/24 dpmm",
                s
            )
        })
    }
}

impl Default for PrinterConfig {
    fn default() -> Self {
        Self::DPMM_8
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_8dpmm() {
        let default = PrinterConfig::default();
        assert_eq!(default, PrinterConfig::DPMM_8);
        assert_eq!(default.dpi, 203);
    }

    #[test]
    fn test_mm_to_dots() {
        assert_eq!(PrinterConfig::DPMM_8.mm_to_dots(10.0), 80);
        assert_eq!(PrinterConfig::DPMM_12.mm_to_dots(10.0), 120);
        // 0.3mm * 6 = 1.8 → 2
        assert_eq!(PrinterConfig::DPMM_6.mm_to_dots(0.3), 2);
    }

    #[test]
    fn test_mm_to_dots_never_negative() {
        assert_eq!(PrinterConfig::DPMM_8.mm_to_dots(-5.0), 0);
    }

    #[test]
    fn test_dots_to_mm() {
        let mm = PrinterConfig::DPMM_24.dots_to_mm(240);
        assert!((mm - 10.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_parse_dpi() {
        assert_eq!(PrinterConfig::parse("300dpi").unwrap(), PrinterConfig::DPMM_12);
        assert_eq!(PrinterConfig::parse("203").unwrap(), PrinterConfig::DPMM_8);
        assert_eq!(PrinterConfig::parse(" 600DPI ").unwrap(), PrinterConfig::DPMM_24);
    }

    #[test]
    fn test_parse_dpmm() {
        assert_eq!(PrinterConfig::parse("6dpmm").unwrap(), PrinterConfig::DPMM_6);
    }

    #[test]
    fn test_parse_unknown() {
        assert!(PrinterConfig::parse("250dpi").is_err());
        assert!(PrinterConfig::parse("fast").is_err());
    }
}

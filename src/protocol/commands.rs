//! # ZPL Command Tokens
//!
//! ZPL is a textual protocol: every command is a caret (`^`) followed by a
//! two-letter mnemonic and comma-separated parameters. A label is bracketed by
//! `^XA` / `^XZ`, and each field is positioned with `^FO` and closed with `^FS`.
//!
//! ```text
//! ^XA
//! ^FO50,80^GFA,8,8,2,FFFFFFFF0000FF00^FS
//! ^XZ
//! ```
//!
//! Only the tokens needed to embed a graphic field live here. Text, barcode
//! and font commands belong to the label builder that consumes our fragments.

/// Start of label format
pub const START_FORMAT: &str = "^XA";

/// End of label format
pub const END_FORMAT: &str = "^XZ";

/// Field origin: `^FOx,y`, top-left corner of the next field in dots
pub const FIELD_ORIGIN: &str = "^FO";

/// Graphic field: `^GFa,b,c,d,data`
pub const GRAPHIC_FIELD: &str = "^GF";

/// Field separator, terminates a field
pub const FIELD_END: &str = "^FS";

/// # Field Origin (^FO)
///
/// Position fragment placed immediately before a field.
///
/// ## Example
///
/// ```
/// use zpl_graphic::protocol::commands;
///
/// assert_eq!(commands::field_origin(50, 80), "^FO50,80");
/// ```
pub fn field_origin(x: u32, y: u32) -> String {
    format!("{}{},{}", FIELD_ORIGIN, x, y)
}

/// Wrap field fragments in a complete label format (`^XA ... ^XZ`).
///
/// Fragments are placed one per line.
pub fn label<S: AsRef<str>>(fields: &[S]) -> String {
    let mut out = String::from(START_FORMAT);
    out.push('\n');
    for field in fields {
        out.push_str(field.as_ref());
        out.push('\n');
    }
    out.push_str(END_FORMAT);
    out.push('\n');
    out
}

// ============================================================================
// TESTS
// ============================================================================

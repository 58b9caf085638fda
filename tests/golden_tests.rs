//! # Golden Tests
//!
//! These tests ensure that image encoding produces consistent output.
//!
//! ## Test Coverage
//!
//! - **Fragment tests** (`.zpl`): complete `^FO...^GF...^FS` fragments for
//!   small images in both compression modes. Runs of two or more bytes carry
//!   a count prefix in these fixtures.
//! - **Round-trip tests**: seeded random bitmaps must decompress to exactly
//!   the hex they were compressed from, through the payload parser as well.
//!
//! ## Regenerating Golden Files
//!
//! ```bash
//! cargo test generate_golden_files -- --ignored --nocapture
//! ```

use pretty_assertions::assert_eq;
use rand::{Rng, SeedableRng, rngs::StdRng};
use std::fs;

use zpl_graphic::codec::{self, EncodeOptions};
use zpl_graphic::protocol::{acs, commands, hex};
use zpl_graphic::raster::scale::TargetDimensionPolicy;
use zpl_graphic::raster::{Argb, ArgbGrid};
use zpl_graphic::render::threshold::{MonochromeBitmap, rasterize};
use zpl_graphic::{CompressionMode, GraphicFieldPayload};

/// Path to golden test directory
const GOLDEN_DIR: &str = "tests/golden";

// ============================================================================
// FIXTURE IMAGES
// ============================================================================

/// 16x4: two black rows, a white row, then half black.
fn bars_16x4() -> ArgbGrid {
    ArgbGrid::from_fn(16, 4, |x, y| match y {
        0 | 1 => Argb::BLACK,
        2 => Argb::WHITE,
        _ if x < 8 => Argb::BLACK,
        _ => Argb::WHITE,
    })
    .unwrap()
}

/// 10x2: row width not a multiple of 8, digit-led bytes (0x12, 0x80).
fn ragged_10x2() -> ArgbGrid {
    ArgbGrid::from_fn(10, 2, |x, y| {
        if y == 1 || [3, 6, 8].contains(&x) {
            Argb::BLACK
        } else {
            Argb::WHITE
        }
    })
    .unwrap()
}

/// 400x3: full-width runs, then a repeated row and a blank row.
fn wide_400x3() -> ArgbGrid {
    ArgbGrid::from_fn(400, 3, |_, y| if y < 2 { Argb::BLACK } else { Argb::WHITE }).unwrap()
}

/// 8x2: transparency and luma weighting.
///
/// Row 0 alternates transparent black and opaque black (0x55).
/// Row 1 is semi-opaque red then opaque green (0xF0).
fn alpha_8x2() -> ArgbGrid {
    ArgbGrid::from_fn(8, 2, |x, y| match (y, x) {
        (0, x) if x % 2 == 0 => Argb::new(0, 0, 0, 0),
        (0, _) => Argb::BLACK,
        (_, x) if x < 4 => Argb::new(200, 255, 0, 0),
        _ => Argb::opaque(0, 255, 0),
    })
    .unwrap()
}

/// All golden fragment cases: (name, image, compression, position).
fn golden_cases() -> Vec<(&'static str, ArgbGrid, CompressionMode, String)> {
    vec![
        ("bars_16x4_hex", bars_16x4(), CompressionMode::None, commands::field_origin(10, 20)),
        ("bars_16x4_acs", bars_16x4(), CompressionMode::RowRunLength, commands::field_origin(10, 20)),
        ("ragged_10x2_hex", ragged_10x2(), CompressionMode::None, commands::field_origin(0, 0)),
        ("ragged_10x2_acs", ragged_10x2(), CompressionMode::RowRunLength, commands::field_origin(0, 0)),
        ("wide_400x3_acs", wide_400x3(), CompressionMode::RowRunLength, commands::field_origin(0, 0)),
        ("alpha_8x2_acs", alpha_8x2(), CompressionMode::RowRunLength, commands::field_origin(0, 0)),
    ]
}

fn encode_case(image: &ArgbGrid, compression: CompressionMode, position: &str) -> String {
    let options = EncodeOptions::default().compression(compression);
    codec::encode_fragment(image, &options, position).unwrap()
}

// ============================================================================
// HELPER FUNCTIONS
// ============================================================================

/// Write a fragment to a golden file
fn write_golden(name: &str, data: &str) {
    let path = format!("{}/{}.zpl", GOLDEN_DIR, name);
    fs::write(&path, format!("{}\n", data)).unwrap_or_else(|e| panic!("Failed to write {}: {}", path, e));
    println!("Wrote {} ({} bytes)", path, data.len());
}

/// Compare a fragment against a golden file
fn check_golden(name: &str, data: &str) {
    let path = format!("{}/{}.zpl", GOLDEN_DIR, name);
    let golden = fs::read_to_string(&path).unwrap_or_else(|_| {
        panic!(
            "Golden file not found: {}. Run `cargo test generate_golden_files -- --ignored` to generate.",
            path
        )
    });
    assert_eq!(data, golden.trim_end(), "golden mismatch for {}", path);
}

// ============================================================================
// GOLDEN FILE GENERATOR
// ============================================================================

/// Generate all golden fragment files.
/// Run with: cargo test generate_golden_files -- --ignored --nocapture
#[test]
#[ignore]
fn generate_golden_files() {
    fs::create_dir_all(GOLDEN_DIR).unwrap();
    for (name, image, compression, position) in golden_cases() {
        write_golden(name, &encode_case(&image, compression, &position));
    }
}

// ============================================================================
// GOLDEN TESTS
// ============================================================================

#[test]
fn test_golden_fragments() {
    for (name, image, compression, position) in golden_cases() {
        check_golden(name, &encode_case(&image, compression, &position));
    }
}

#[test]
fn test_golden_fragments_parse_back() {
    for (name, image, _, _) in golden_cases() {
        let text = fs::read_to_string(format!("{}/{}.zpl", GOLDEN_DIR, name)).unwrap();
        let payload = GraphicFieldPayload::parse(&text).unwrap();
        let bitmap = rasterize(&image).unwrap();
        assert_eq!(payload.decode_hex().unwrap(), bitmap.to_hex(), "{}", name);
        assert_eq!(payload.to_bitmap(bitmap.width()).unwrap(), bitmap, "{}", name);
    }
}

// ============================================================================
// SCENARIOS
// ============================================================================

#[test]
fn test_single_byte_row_gains_nothing() {
    let payload = GraphicFieldPayload::from_hex("FF".into(), 1, CompressionMode::RowRunLength).unwrap();
    assert_eq!(payload.data, "FF");
}

#[test]
fn test_three_identical_rows() {
    let row = "A1B2C3D4E5F60708";
    let payload = GraphicFieldPayload::from_hex(row.repeat(3), 8, CompressionMode::RowRunLength).unwrap();
    assert_eq!(payload.data, format!("{}::", row));
    assert_eq!(payload.to_fragment(), "^GFC,24,24,8,A1B2C3D4E5F60708::^FS");
}

#[test]
fn test_identical_rows_become_colons() {
    let height = 57;
    let image = ArgbGrid::from_fn(45, height, |x, _| {
        if x % 3 == 0 { Argb::BLACK } else { Argb::WHITE }
    })
    .unwrap();
    let bitmap = rasterize(&image).unwrap();
    let first_row = acs::compress(&hex::encode(bitmap.row(0)), bitmap.bytes_per_row()).unwrap();

    let payload = GraphicFieldPayload::from_bitmap(&bitmap, CompressionMode::RowRunLength).unwrap();
    assert_eq!(payload.data, format!("{}{}", first_row, ":".repeat(height as usize - 1)));
}

#[test]
fn test_blank_row_is_one_comma() {
    let image = ArgbGrid::filled(64, 1, Argb::WHITE).unwrap();
    let options = EncodeOptions::default().compression(CompressionMode::RowRunLength);
    let payload = codec::encode(&image, &options).unwrap();
    assert_eq!(payload.bytes_per_row, 8);
    assert_eq!(payload.data, ",");
}

#[test]
fn test_fixed_width_400_dots() {
    let image = ArgbGrid::filled(20, 10, Argb::BLACK).unwrap();
    let options = EncodeOptions::default()
        .dots_per_unit(1.0)
        .policy(TargetDimensionPolicy::FixedWidth { width: 400.0 });
    let bitmap = codec::to_bitmap(&image, &options).unwrap();
    assert_eq!((bitmap.width(), bitmap.height()), (400, 200));
}

#[test]
fn test_fixed_box_240_dots() {
    let image = ArgbGrid::filled(100, 50, Argb::BLACK).unwrap();
    let options = EncodeOptions::default().dots_per_unit(1.0).policy(TargetDimensionPolicy::FixedBox {
        width: 240.0,
        height: 240.0,
    });
    let payload = codec::encode(&image, &options).unwrap();
    assert_eq!(payload.bytes_per_row, 30);
    assert!(payload.to_fragment().starts_with("^GFA,7200,7200,30,"));
}

#[test]
fn test_threshold_extremes() {
    let image = ArgbGrid::new(
        4,
        1,
        vec![0xFF000000, 0xFFFFFFFF, 0x80000000, 0x00000000],
    )
    .unwrap();
    let bitmap = rasterize(&image).unwrap();
    assert_eq!(bitmap.data(), &[0b1000_0000]);
}

// ============================================================================
// ROUND-TRIP PROPERTIES
// ============================================================================

/// Random bitmap bytes with row repeats, blank rows and long runs.
fn random_bitmap(rng: &mut StdRng, bytes_per_row: usize, height: usize) -> Vec<u8> {
    const PALETTE: [u8; 6] = [0x00, 0xFF, 0x12, 0x90, 0x0F, 0xA5];

    let mut data: Vec<u8> = Vec::with_capacity(bytes_per_row * height);
    for y in 0..height {
        match rng.random_range(0..6) {
            0 if y > 0 => {
                let start = data.len() - bytes_per_row;
                data.extend_from_within(start..);
            }
            1 => data.extend(std::iter::repeat_n(0, bytes_per_row)),
            _ => {
                let mut row = Vec::with_capacity(bytes_per_row);
                while row.len() < bytes_per_row {
                    let byte = if rng.random_bool(0.7) {
                        PALETTE[rng.random_range(0..PALETTE.len())]
                    } else {
                        rng.random()
                    };
                    let run = rng.random_range(1..=45).min(bytes_per_row - row.len());
                    row.extend(std::iter::repeat_n(byte, run));
                }
                data.extend(row);
            }
        }
    }
    data
}

#[test]
fn test_roundtrip_random_bitmaps() {
    let mut rng = StdRng::seed_from_u64(0x5EED);
    for _ in 0..300 {
        let bytes_per_row = rng.random_range(1..=90);
        let height = rng.random_range(1..=24);
        let data = random_bitmap(&mut rng, bytes_per_row, height);
        let hex_data = hex::encode(&data);

        let packed = acs::compress(&hex_data, bytes_per_row).unwrap();
        assert_eq!(acs::decompress(&packed, bytes_per_row).unwrap(), hex_data, "packed: {}", packed);
        assert!(packed.chars().all(|c| c.is_ascii_alphanumeric() || c == ':' || c == ','));
    }
}

#[test]
fn test_roundtrip_long_runs() {
    for len in [7988, 7989, 7990, 8000, 8020, 16_001] {
        for byte in [0x00, 0x3C, 0xC3] {
            let mut data = vec![0xFF];
            data.extend(std::iter::repeat_n(byte, len));
            let packed = acs::compress_bytes(&data, data.len()).unwrap();
            assert_eq!(acs::decompress_bytes(&packed, data.len()).unwrap(), data);
        }
    }
}

#[test]
fn test_roundtrip_through_fragment() {
    let mut rng = StdRng::seed_from_u64(203);
    for _ in 0..40 {
        let width = rng.random_range(1..=120);
        let height = rng.random_range(1..=30);
        let pixels = (0..width * height)
            .map(|_| {
                if rng.random_bool(0.5) {
                    0xFF000000
                } else {
                    rng.random::<u32>()
                }
            })
            .collect();
        let image = ArgbGrid::new(width, height, pixels).unwrap();
        let bitmap: MonochromeBitmap = rasterize(&image).unwrap();
        assert_eq!(bitmap.to_hex().len(), 2 * bitmap.bytes_per_row() * height as usize);

        for mode in [CompressionMode::None, CompressionMode::RowRunLength] {
            let options = EncodeOptions::default().compression(mode);
            let fragment = codec::encode_fragment(&image, &options, "^FO1,1").unwrap();
            let parsed = GraphicFieldPayload::parse(&fragment).unwrap();
            assert_eq!(parsed.compression, mode);
            assert_eq!(parsed.byte_count, bitmap.byte_count());
            assert_eq!(parsed.decode_hex().unwrap(), bitmap.to_hex());
        }
    }
}

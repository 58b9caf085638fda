//! # zpl-graphic CLI
//!
//! Command-line interface for turning images into ZPL graphic fields.
//!
//! ## Usage
//!
//! ```bash
//! # Encode at native size (one dot per pixel)
//! zpl-graphic encode logo.png
//!
//! # 40mm wide on a 300 DPI printer, compressed, wrapped in a label
//! zpl-graphic encode --width-mm 40 --printer 300dpi --compress --label logo.png
//!
//! # Several images at once, written to a file
//! zpl-graphic encode --x 20 --y 20 -o fields.zpl a.png b.png
//!
//! # Render a graphic field back to PNG to check it
//! zpl-graphic preview fields.zpl -o check.png
//! ```

use clap::{Parser, Subcommand};
use std::fs;
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

use zpl_graphic::{
    CompressionMode, EncodeOptions, GraphicError, GraphicFieldPayload, PrinterConfig,
    codec,
    protocol::commands,
    raster::{RasterImage, scale::TargetDimensionPolicy},
};

/// zpl-graphic - images to ZPL graphic fields
#[derive(Parser, Debug)]
#[command(name = "zpl-graphic")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Log pipeline details to stderr
    #[arg(long, short, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Encode images as ^GF fields
    Encode {
        /// Image files (any format the image crate decodes)
        #[arg(required = true)]
        images: Vec<PathBuf>,

        /// Printed width in millimetres
        #[arg(long)]
        width_mm: Option<f64>,

        /// Printed height in millimetres
        #[arg(long)]
        height_mm: Option<f64>,

        /// Printer density, e.g. 203dpi, 300, 12dpmm
        #[arg(long)]
        printer: Option<String>,

        /// Use row run-length compression
        #[arg(long)]
        compress: bool,

        /// Field origin x in dots
        #[arg(long, default_value = "0")]
        x: u32,

        /// Field origin y in dots
        #[arg(long, default_value = "0")]
        y: u32,

        /// JSON file with encode options (flags override it)
        #[arg(long, value_name = "FILE")]
        config: Option<PathBuf>,

        /// Wrap the fields in ^XA ... ^XZ
        #[arg(long)]
        label: bool,

        /// Write to FILE instead of stdout
        #[arg(long, short, value_name = "FILE")]
        output: Option<PathBuf>,
    },

    /// Render the first ^GF field of a file as PNG
    Preview {
        /// File containing a graphic field
        input: PathBuf,

        /// Bitmap width in dots (defaults to bytes per row × 8)
        #[arg(long)]
        width: Option<u32>,

        /// PNG output path
        #[arg(long, short, value_name = "FILE")]
        output: PathBuf,
    },
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    if let Err(e) = run(cli.command) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn init_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn run(command: Commands) -> Result<(), GraphicError> {
    match command {
        Commands::Encode {
            images,
            width_mm,
            height_mm,
            printer,
            compress,
            x,
            y,
            config,
            label,
            output,
        } => {
            let mut options = match config {
                Some(path) => EncodeOptions::from_json(&fs::read_to_string(path)?)?,
                None => EncodeOptions::default(),
            };
            if let Some(printer) = printer {
                let printer = PrinterConfig::parse(&printer).map_err(GraphicError::Config)?;
                options = options.dots_per_unit(printer.dots_per_mm());
            }
            if width_mm.is_some() || height_mm.is_some() {
                options = options.policy(TargetDimensionPolicy::from_size(width_mm, height_mm));
            }
            if compress {
                options = options.compression(CompressionMode::RowRunLength);
            }

            let decoded = images
                .iter()
                .map(open_image)
                .collect::<Result<Vec<_>, _>>()?;
            let sources: Vec<&dyn RasterImage> =
                decoded.iter().map(|img| img as &dyn RasterImage).collect();

            let position = commands::field_origin(x, y);
            let fields = codec::encode_batch(&sources, &options)
                .into_iter()
                .map(|payload| payload.map(|p| p.to_command(&position)))
                .collect::<Result<Vec<_>, _>>()?;

            let text = if label {
                commands::label(&fields)
            } else {
                fields.iter().map(|f| format!("{}\n", f)).collect()
            };

            match output {
                Some(path) => {
                    fs::write(&path, text)?;
                    println!("Wrote {} field(s) to {}", fields.len(), path.display());
                }
                None => print!("{}", text),
            }
        }
        Commands::Preview {
            input,
            width,
            output,
        } => {
            let text = fs::read_to_string(&input)?;
            let payload = GraphicFieldPayload::parse(&text)?;
            let width = width.unwrap_or(payload.bytes_per_row as u32 * 8);
            let bitmap = payload.to_bitmap(width)?;

            save_png(&output, &bitmap.to_gray_image())?;
            println!(
                "Saved {}x{} preview to {}",
                bitmap.width(),
                bitmap.height(),
                output.display()
            );
        }
    }

    Ok(())
}

/// Decode an image file
fn open_image(path: impl AsRef<Path>) -> Result<image::DynamicImage, GraphicError> {
    let path = path.as_ref();
    image::open(path)
        .map_err(|e| GraphicError::Image(format!("Failed to open {}: {}", path.display(), e)))
}

/// Save a preview as PNG
fn save_png(path: &Path, img: &image::GrayImage) -> Result<(), GraphicError> {
    img.save_with_format(path, image::ImageFormat::Png)
        .map_err(|e| GraphicError::Image(format!("Failed to save PNG: {}", e)))
}

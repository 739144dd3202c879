//! cjpeg CLI - BMP to JPEG converter
//!
//! Reads an uncompressed 24-bit BMP and writes a baseline JPEG.

use std::fs::{self, File};
use std::io::{BufReader, BufWriter};
use std::path::{Path, PathBuf};
use std::time::Instant;

use clap::Parser;

use cjpeg::bmp::read_bmp;
use cjpeg::jpeg::quantize::DEFAULT_SCALE_FACTOR;
use cjpeg::{Encoder, JpegOptions};

/// Convert a 24-bit BMP image to a baseline JPEG.
#[derive(Parser, Debug)]
#[command(name = "cjpeg")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Input image file (24-bit uncompressed BMP)
    #[arg(value_name = "INPUT")]
    input: PathBuf,

    /// Output JPEG file
    #[arg(value_name = "OUTPUT")]
    output: PathBuf,

    /// Quantization table scale in percent (1-5000, lower = better quality)
    #[arg(
        short,
        long,
        default_value_t = DEFAULT_SCALE_FACTOR,
        value_parser = clap::value_parser!(u32).range(1..=5000)
    )]
    scale: u32,

    /// JPEG quality (1-100), mapped to a scale factor
    #[arg(
        short,
        long,
        conflicts_with = "scale",
        value_parser = clap::value_parser!(u8).range(1..=100)
    )]
    quality: Option<u8>,

    /// Show verbose output
    #[arg(short, long)]
    verbose: bool,
}

fn main() {
    let args = Args::parse();

    let default_level = if args.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .init();

    if let Err(e) = run(&args) {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

fn run(args: &Args) -> Result<(), Box<dyn std::error::Error>> {
    let options = match args.quality {
        Some(quality) => JpegOptions::with_quality(quality),
        None => JpegOptions::with_scale_factor(args.scale),
    };
    let encoder = Encoder::new(options)?;

    // Load input image
    let start = Instant::now();
    let input = File::open(&args.input)?;
    let image = read_bmp(BufReader::new(input))?.into_padded()?;
    let load_time = start.elapsed();

    if args.verbose {
        eprintln!("Loaded: {:?}", args.input);
        eprintln!("  Dimensions: {}x{}", image.width(), image.height());
        eprintln!(
            "  Padded: {}x{} ({} blocks)",
            image.padded_width(),
            image.padded_height(),
            image.block_count()
        );
        eprintln!("  Load time: {:.2?}", load_time);
    }

    // Encode straight into the output file
    let encode_start = Instant::now();
    let output = File::create(&args.output)?;
    let result = encoder
        .encode_image(BufWriter::new(output), &image)
        .map_err(Box::<dyn std::error::Error>::from)
        .and_then(|writer| writer.into_inner().map_err(|e| e.into_error().into()))
        .and_then(|file| file.sync_all().map_err(Into::into));
    if let Err(e) = result {
        remove_partial(&args.output);
        return Err(e);
    }
    let encode_time = encode_start.elapsed();

    // Report results
    let input_size = fs::metadata(&args.input)?.len();
    let output_size = fs::metadata(&args.output)?.len();
    let ratio = if input_size > 0 {
        (output_size as f64 / input_size as f64) * 100.0
    } else {
        0.0
    };

    if args.verbose {
        eprintln!("Output: {:?}", args.output);
        eprintln!("  Scale factor: {}", options.scale_factor);
        eprintln!("  Encode time: {:.2?}", encode_time);
        eprintln!(
            "  Size: {} -> {} ({:.1}%)",
            format_size(input_size),
            format_size(output_size),
            ratio
        );
    } else {
        println!(
            "{} -> {} ({:.1}%)",
            format_size(input_size),
            format_size(output_size),
            ratio
        );
    }

    Ok(())
}

fn remove_partial(path: &Path) {
    if let Err(e) = fs::remove_file(path) {
        log::warn!("could not remove partial output {:?}: {e}", path);
    }
}

fn format_size(bytes: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = KB * 1024;

    if bytes >= MB {
        format!("{:.2} MB", bytes as f64 / MB as f64)
    } else if bytes >= KB {
        format!("{:.2} KB", bytes as f64 / KB as f64)
    } else {
        format!("{} B", bytes)
    }
}

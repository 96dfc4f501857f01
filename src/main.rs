use anyhow::{anyhow, Context, Result};
use clap::{ArgGroup, Parser};
use image::Rgba;
use std::path::PathBuf;
use std::sync::mpsc;
use std::thread;
use sticker_fx::output::{PngSink, StickerSink};
use sticker_fx::refine::{CompositeStyle, SeedWindow};
use sticker_fx::segmentation::{self, DeepLabSegmenter, Segmenter, StoredMaskSegmenter};
use sticker_fx::source::FileSource;
use sticker_fx::{Checkpoint, PipelineConfig, StickerPipeline};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
#[command(group(ArgGroup::new("segmenter").required(true).args(["model", "mask"])))]
struct Args {
    /// Photo to turn into a sticker
    input: PathBuf,

    /// Where to write the sticker (PNG)
    #[arg(short, long, default_value = "sticker.png")]
    output: PathBuf,

    /// Path to the DeepLab v3 segmentation model (ONNX file)
    #[arg(long)]
    model: Option<PathBuf>,

    /// Use a stored grayscale mask instead of running a model
    #[arg(long)]
    mask: Option<PathBuf>,

    /// Sticker side length in pixels
    #[arg(long, default_value_t = 512)]
    sticker_size: u32,

    /// Minimum share of the frame the person must cover, in percent
    #[arg(long, default_value_t = 3, value_parser = clap::value_parser!(u32).range(0..=100))]
    tolerance: u32,

    /// Outline thickness in pixels
    #[arg(long, default_value_t = 2)]
    outline_radius: u32,

    /// Outline colour as RRGGBB hex
    #[arg(long, default_value = "ffffff", value_parser = parse_hex_colour)]
    outline_colour: Rgba<u8>,

    /// Only search this many rows and columns from the top-left corner of
    /// the mask for a point inside the person
    #[arg(long)]
    seed_window: Option<usize>,

    /// Run inference on the GPU (requires the `gpu` feature)
    #[arg(long)]
    gpu: bool,

    /// Enable debug logging
    #[arg(long)]
    debug: bool,
}

fn parse_hex_colour(s: &str) -> Result<Rgba<u8>, String> {
    let hex = s.trim_start_matches('#');
    if hex.len() != 6 {
        return Err(format!("expected RRGGBB, got {s:?}"));
    }
    let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).map_err(|e| e.to_string());
    Ok(Rgba([channel(0)?, channel(2)?, channel(4)?, 255]))
}

fn main() -> Result<()> {
    let args = Args::parse();

    // Initialize logging
    let log_level = if args.debug {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    };

    tracing_subscriber::fmt()
        .with_max_level(log_level)
        .with_target(false)
        .init();

    tracing::info!("sticker-fx starting");
    tracing::info!("Input: {}", args.input.display());
    tracing::info!("Sticker: {}x{}", args.sticker_size, args.sticker_size);

    let segmenter: Box<dyn Segmenter + Send> = match (&args.model, &args.mask) {
        (Some(model_path), _) => {
            let model_path = model_path.to_string_lossy();
            segmentation::create_default_model(&model_path, args.gpu)
                .context("Failed to load segmentation model")?
        }
        (None, Some(mask_path)) => {
            tracing::info!("Using stored mask instead of a model");
            Box::new(
                StoredMaskSegmenter::open(mask_path, DeepLabSegmenter::INPUT_SIZE)
                    .context("Failed to load stored mask")?,
            )
        }
        (None, None) => unreachable!("clap requires a segmenter"),
    };

    let config = PipelineConfig {
        sticker_side: args.sticker_size,
        tolerance_percent: args.tolerance,
        outline_radius: args.outline_radius,
        style: CompositeStyle {
            border: args.outline_colour,
            ..Default::default()
        },
        seed_window: args.seed_window.map_or(SeedWindow::WHOLE, SeedWindow::square),
    };

    let mut pipeline = StickerPipeline::new(segmenter, config).context("Invalid pipeline configuration")?;

    // Run on a worker thread, report progress from here
    let (tx, rx) = mpsc::channel::<Checkpoint>();
    let input = args.input.clone();
    let worker = thread::spawn(move || {
        let mut source = FileSource::new(input);
        pipeline.run_source(&mut source, &tx)
    });

    for checkpoint in rx {
        tracing::info!("[{:>3}%] {}", checkpoint.percent(), checkpoint.label());
    }

    let output = match worker.join().map_err(|_| anyhow!("Sticker worker panicked"))? {
        Ok(output) => output,
        Err(e) if e.is_semantic() => {
            tracing::warn!("{}", e);
            return Err(e).context("No sticker could be made from this photo");
        }
        Err(e) => return Err(e).context("Sticker pipeline failed"),
    };

    PngSink::new(&args.output)
        .write_sticker(&output.sticker)
        .context("Failed to save sticker")?;

    tracing::info!(
        "Total time: {:.1}ms, inference: {:.1}ms",
        output.timings.total.as_secs_f64() * 1000.0,
        output.timings.inference.as_secs_f64() * 1000.0
    );

    Ok(())
}

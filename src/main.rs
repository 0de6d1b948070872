use std::path::PathBuf;
use std::time::Duration;

use clap::{Args, Parser, Subcommand};
use image::ImageReader;
use log::error;

use regionsweep::config::{DEFAULT_DELTA, DEFAULT_MAX_AREA, DEFAULT_MIN_AREA};
use regionsweep::detection::preprocessing;
use regionsweep::presentation::draw_rectangle;
use regionsweep::{
    FrameLoop, FrameSink, ImageSequenceSource, KeyListener, LoopConfig, LoopError, RegionConfig,
    RegionExtractor, SyntheticSource,
};

#[derive(Parser)]
#[command(name = "regionsweep")]
#[command(about = "Detect stable bright regions by sweeping intensity thresholds")]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Run the capture loop over a frame source
    Run(RunArgs),
    /// Detect regions in a single image
    Detect(DetectArgs),
}

#[derive(Args)]
struct RegionArgs {
    /// Threshold step between sweep levels
    #[arg(long, default_value_t = DEFAULT_DELTA)]
    delta: u8,

    /// Reject contours with area at or below this
    #[arg(long, default_value_t = DEFAULT_MIN_AREA)]
    min_area: f64,

    /// Reject contours with area at or above this
    #[arg(long, default_value_t = DEFAULT_MAX_AREA)]
    max_area: f64,

    /// Extract contours for all thresholds in parallel
    #[arg(long)]
    parallel: bool,
}

impl RegionArgs {
    fn extractor(&self) -> anyhow::Result<RegionExtractor> {
        let config = RegionConfig::new(self.delta, self.min_area, self.max_area)
            .with_parallel(self.parallel);
        Ok(RegionExtractor::new(config)?)
    }
}

#[derive(Args)]
struct RunArgs {
    /// Directory of frames to replay, in file name order
    #[arg(long, value_name = "DIR", conflicts_with = "synthetic")]
    frames: Option<PathBuf>,

    /// Generate this many synthetic frames instead of reading from disk
    #[arg(long, value_name = "N", required_unless_present = "frames")]
    synthetic: Option<usize>,

    /// Write annotated frames to this directory
    #[arg(long, value_name = "DIR")]
    out: Option<PathBuf>,

    /// Stop after this many frames
    #[arg(long, value_name = "N")]
    max_frames: Option<usize>,

    /// Also present the occupancy mask
    #[arg(long)]
    show_mask: bool,

    /// Milliseconds to wait for a key each frame
    #[arg(long, default_value_t = 1)]
    poll_ms: u64,

    #[command(flatten)]
    region: RegionArgs,
}

#[derive(Args)]
struct DetectArgs {
    /// Path to input image file
    #[arg(value_name = "IMAGE")]
    image_path: PathBuf,

    /// Save the image with region boxes drawn on it
    #[arg(long, value_name = "FILE")]
    annotate: Option<PathBuf>,

    #[command(flatten)]
    region: RegionArgs,
}

fn main() -> anyhow::Result<()> {
    let args = Cli::parse();

    let level = if args.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();

    match args.command {
        Command::Run(run) => run_loop(run),
        Command::Detect(detect) => detect_image(detect),
    }
}

fn run_loop(args: RunArgs) -> anyhow::Result<()> {
    let extractor = args.region.extractor()?;
    let config = LoopConfig {
        show_mask: args.show_mask,
        poll_timeout: Duration::from_millis(args.poll_ms),
        max_frames: args.max_frames,
        ..LoopConfig::default()
    };

    let frame_loop = FrameLoop::new(extractor, config);
    let mut presenter = FrameSink::new(args.out).with_keys(KeyListener::spawn_stdin());

    let result = match (args.frames, args.synthetic) {
        (Some(dir), _) => frame_loop.run(&mut ImageSequenceSource::new(dir), &mut presenter),
        (None, Some(count)) => frame_loop.run(
            &mut SyntheticSource::default().with_frame_count(count),
            &mut presenter,
        ),
        (None, None) => anyhow::bail!("either --frames or --synthetic is required"),
    };

    match result {
        Ok(summary) => {
            println!(
                "Processed {} frames, {} regions ({:?})",
                summary.frames, summary.regions, summary.stop
            );
            Ok(())
        }
        Err(LoopError::Acquisition(e)) => {
            error!("Cannot open capture source: {}", e);
            std::process::exit(1);
        }
        Err(e) => Err(e.into()),
    }
}

fn detect_image(args: DetectArgs) -> anyhow::Result<()> {
    let extractor = args.region.extractor()?;

    let img = ImageReader::open(&args.image_path)?
        .decode()
        .map_err(|e| anyhow::anyhow!("Failed to decode image: {}", e))?;
    log::debug!("Image loaded: {}x{}", img.width(), img.height());

    let gray = preprocessing::to_grayscale(&img);
    let regions = extractor.extract(&gray);

    println!("\n=== Region Detection Results ===");
    println!("Total regions detected: {}", regions.len());
    for (i, region) in regions.iter().enumerate() {
        let (cx, cy) = region.center();
        println!(
            "  Region {} centred at ({}, {}), box at ({}, {}) {}x{} - contour area: {:.1}, threshold: {}",
            i + 1,
            cx,
            cy,
            region.rect.x,
            region.rect.y,
            region.rect.width,
            region.rect.height,
            region.contour_area,
            region.threshold
        );
    }

    if let Some(out) = args.annotate {
        let config = LoopConfig::default();
        let mut annotated = img.to_rgb8();
        for region in &regions {
            draw_rectangle(&mut annotated, &region.rect, config.box_color, config.box_thickness);
        }
        annotated
            .save(&out)
            .map_err(|e| anyhow::anyhow!("Failed to save annotated image: {}", e))?;
        println!("Annotated image written to {}", out.display());
    }

    Ok(())
}

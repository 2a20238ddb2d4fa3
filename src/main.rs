use anyhow::{bail, Context};
use clap::{Parser, ValueEnum};
use log::info;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::io::Write;
use std::path::PathBuf;
use textdots::dots::{self, DotConfig, DEFAULT_CUTOFF_PERCENTAGE, DEFAULT_FRAME_LENGTH};
use textdots::{FontSpec, FontWeight, RenderRequest, DEFAULT_SCALE};

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Weight {
    Normal,
    Bold,
}

impl From<Weight> for FontWeight {
    fn from(w: Weight) -> Self {
        match w {
            Weight::Normal => FontWeight::Normal,
            Weight::Bold => FontWeight::Bold,
        }
    }
}

/// Turn text into a dot-renderer point cloud and print it as JSON.
#[derive(Parser, Debug)]
#[command(name = "textdots", version, about)]
struct Args {
    /// Text to convert
    text: String,

    /// Canvas width in pixels
    #[arg(short, long, default_value_t = 150)]
    width: u32,

    /// Sampling density divisor; picked from --candidates when omitted
    #[arg(short, long)]
    resolution: Option<u32>,

    /// Resolutions to pick from when --resolution is omitted
    #[arg(long, value_delimiter = ',', default_values_t = dots::DEFAULT_RESOLUTION_CANDIDATES)]
    candidates: Vec<u32>,

    /// Seed for the resolution pick
    #[arg(long)]
    seed: Option<u64>,

    /// Fraction of the width the text should span
    #[arg(short, long, default_value_t = DEFAULT_SCALE)]
    scale: f64,

    /// TrueType/OpenType font file; the built-in block font is used otherwise
    #[arg(long)]
    font: Option<PathBuf>,

    /// Font family label passed to the surface
    #[arg(long, default_value = "Arial")]
    family: String,

    /// Font weight
    #[arg(long, value_enum, default_value_t = Weight::Bold)]
    weight: Weight,

    /// Identifier attached to the dot config
    #[arg(long)]
    id: Option<String>,

    /// Frames a dot takes to reach its target
    #[arg(long, default_value_t = DEFAULT_FRAME_LENGTH)]
    frame_length: u32,

    /// Share of the cloud to show, in percent
    #[arg(long, default_value_t = DEFAULT_CUTOFF_PERCENTAGE)]
    cutoff: u32,

    /// Pretty-print the JSON
    #[arg(long)]
    pretty: bool,

    /// Print an ASCII preview of the sampled grid to stderr
    #[arg(long)]
    preview: bool,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args = Args::parse();

    if !(args.scale > 0.0 && args.scale <= 1.0) {
        bail!("--scale must be in (0, 1], got {}", args.scale);
    }
    if args.width == 0 {
        bail!("--width must be positive");
    }

    let resolution = match args.resolution {
        Some(r) => r,
        None => {
            let mut rng = match args.seed {
                Some(seed) => StdRng::seed_from_u64(seed),
                None => StdRng::from_os_rng(),
            };
            dots::pick_resolution(&args.candidates, &mut rng)
        }
    };
    if resolution == 0 {
        bail!("resolution must be positive");
    }

    let request = RenderRequest::new(args.text, args.width)
        .with_resolution(resolution)
        .with_scale(args.scale)
        .with_font(FontSpec::new(args.family, args.weight.into()));

    let mut surface = textdots::new_surface(args.font.as_deref())?;
    let cloud = textdots::pixelate_with(&mut surface, &request)
        .with_context(|| format!("failed to pixelate '{}'", request.text))?;
    info!(
        "{} points at resolution {} ({}x{}), fingerprint {}",
        cloud.points.len(),
        resolution,
        cloud.width,
        cloud.height,
        cloud.fingerprint()
    );

    if args.preview {
        eprintln!("{}", dots::ascii_preview(&cloud));
    }

    let mut config = DotConfig::new(cloud)
        .with_frame_length(args.frame_length)
        .with_cutoff_percentage(args.cutoff);
    if let Some(id) = args.id {
        config = config.with_id(id);
    }

    let json = if args.pretty {
        serde_json::to_string_pretty(&config)?
    } else {
        serde_json::to_string(&config)?
    };
    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    writeln!(out, "{}", json)?;
    out.flush()?;
    Ok(())
}

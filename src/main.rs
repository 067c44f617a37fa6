use anyhow::{Context, Result};
use clap::Parser;
use edgetrace::pipeline::{segments_of, trace_edges, SeedSelection};
use edgetrace::{init_logging, LogFormat, BUILD_DATE, VERSION};
use edgetrace_camtools::{save_gcode, ContourGcodeGenerator, EdgeDetector, EdgeMethod};
use edgetrace_core::PixelCoordinate;
use edgetrace_settings::{default_config_path, Config};
use edgetrace_tracer::TraversalPolicy;
use std::path::PathBuf;
use tracing::{debug, info};

/// Trace contours in an image by radial ring sampling
#[derive(Parser, Debug)]
#[command(name = "edgetrace")]
#[command(about = "Trace image contours into ordered paths and G-code", long_about = None)]
struct Args {
    /// Input image file path
    #[arg(short, long)]
    input: PathBuf,

    /// Configuration file (.json or .toml); defaults to the user config
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Seed point as X,Y (defaults to the first edge pixel)
    #[arg(short, long, conflicts_with = "all")]
    seed: Option<PixelCoordinate>,

    /// Trace every contour in the image
    #[arg(short, long)]
    all: bool,

    /// Largest ring radius to sample
    #[arg(long)]
    max_radius: Option<usize>,

    /// Traversal policy: depth-first or breadth-first
    #[arg(long)]
    policy: Option<TraversalPolicy>,

    /// Edge extraction method: sobel or brightness
    #[arg(long)]
    edge_method: Option<EdgeMethod>,

    /// Sobel threshold
    #[arg(long)]
    threshold: Option<f32>,

    /// Print the edge map before tracing
    #[arg(long)]
    print_edges: bool,

    /// Print traced contours as JSON instead of text
    #[arg(long)]
    json: bool,

    /// Write contour G-code to this file
    #[arg(short, long)]
    gcode: Option<PathBuf>,

    /// Emit logs as JSON
    #[arg(long)]
    log_json: bool,

    /// Log at debug level when RUST_LOG is unset
    #[arg(short, long)]
    verbose: bool,
}

fn load_config(args: &Args) -> Result<Config> {
    let mut config = match &args.config {
        Some(path) => Config::load_from_file(path)
            .with_context(|| format!("Failed to load config {}", path.display()))?,
        None => match default_config_path() {
            Ok(path) => Config::load_or_default(&path)
                .with_context(|| format!("Failed to load config {}", path.display()))?,
            Err(e) => {
                debug!(error = %e, "no default config location, using defaults");
                Config::default()
            }
        },
    };

    if let Some(radius) = args.max_radius {
        config.tracer.max_radius = radius;
    }
    if let Some(policy) = args.policy {
        config.tracer.policy = policy;
    }
    if let Some(method) = args.edge_method {
        config.edges.method = method;
    }
    if let Some(threshold) = args.threshold {
        config.edges.threshold = threshold;
    }

    config.validate().context("Invalid configuration")?;
    Ok(config)
}

fn main() -> Result<()> {
    let args = Args::parse();

    let format = if args.log_json {
        LogFormat::Json
    } else {
        LogFormat::Pretty
    };
    let level = if args.verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    };
    init_logging(format, level)?;
    info!(version = VERSION, build_date = BUILD_DATE, "edgetrace starting");

    let config = load_config(&args)?;

    let edges = EdgeDetector::new(config.edges.clone()).detect_file(&args.input)?;
    info!(
        input = %args.input.display(),
        width = edges.width(),
        height = edges.height(),
        edges = edges.count_edges(),
        "edge map ready"
    );

    if args.print_edges {
        println!("{}", edges.render_ascii());
    }

    let seeds = match (args.seed, args.all) {
        (Some(seed), _) => SeedSelection::Point(seed),
        (None, true) => SeedSelection::AllEdges,
        (None, false) => SeedSelection::FirstEdge,
    };
    let contours = trace_edges(&edges, &config.tracer, seeds)?;

    if args.json {
        println!(
            "{}",
            serde_json::to_string_pretty(&contours).context("Failed to serialize contours")?
        );
    } else {
        for (i, contour) in contours.iter().enumerate() {
            println!(
                "contour {} seed {} nodes {} branch points {}{}",
                i + 1,
                contour.seed(),
                contour.len(),
                contour.branch_points().len(),
                if contour.is_truncated() {
                    " (truncated)"
                } else {
                    ""
                }
            );
            let path: Vec<String> = contour.path().iter().map(ToString::to_string).collect();
            println!("  {}", path.join(" "));
        }
    }

    if let Some(out) = &args.gcode {
        let segments = segments_of(&contours);
        let gcode = ContourGcodeGenerator::new(config.gcode.clone())
            .generate(&segments, edges.height())
            .context("G-code generation failed")?;
        save_gcode(out, &gcode)
            .with_context(|| format!("Failed to write G-code to {}", out.display()))?;
        info!(output = %out.display(), segments = segments.len(), "G-code written");
    }

    Ok(())
}

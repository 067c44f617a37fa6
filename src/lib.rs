//! # EdgeTrace
//!
//! Turns images into ordered contour paths by radial ring sampling, and
//! those paths into contour-following G-code.
//!
//! ## Architecture
//!
//! EdgeTrace is organized as a workspace with multiple crates:
//!
//! 1. **edgetrace-core** - Pixel coordinates, edge and visited rasters, errors
//! 2. **edgetrace-tracer** - Circle offset table, ring sampling, arcs, stepper, tracer
//! 3. **edgetrace-camtools** - Edge extraction from images, contour G-code output
//! 4. **edgetrace-settings** - JSON/TOML configuration
//! 5. **edgetrace** - Pipeline glue and the command-line binary

pub mod pipeline;

pub use edgetrace_core::{
    EdgeMap, Error, GeometryError, GridError, Offset, PixelCoordinate, Result, TraceError,
    VisitedSet,
};

pub use edgetrace_tracer::{
    extract_arcs, trace, CircleOffsetTable, ContourStepper, RingArc, RingSample, RingSampler,
    Step, TraceNode, TraceSession, TracedContour, TracerOptions, TraversalPolicy, VisitMarking,
};

pub use edgetrace_camtools::{
    ContourGcodeGenerator, ContourGcodeParameters, EdgeDetectionSettings, EdgeDetector,
    EdgeMethod,
};

pub use edgetrace_settings::{default_config_path, Config, TracerSettings};

pub use pipeline::{segments_of, trace_edges, SeedSelection};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Build date (set at compile time)
pub const BUILD_DATE: &str = env!("BUILD_DATE");

/// Log output style
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    /// Human-readable multi-line records
    #[default]
    Pretty,
    /// One JSON object per record
    Json,
}

/// Initialize logging
///
/// Sets up structured logging with:
/// - Output on stderr, so traced paths on stdout stay clean
/// - RUST_LOG environment variable support
/// - `default_level` when RUST_LOG is unset
pub fn init_logging(format: LogFormat, default_level: tracing::Level) -> anyhow::Result<()> {
    use tracing_subscriber::fmt;
    use tracing_subscriber::prelude::*;
    use tracing_subscriber::EnvFilter;

    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_level.to_string()));

    match format {
        LogFormat::Pretty => {
            let fmt_layer = fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(true)
                .with_level(true)
                .with_line_number(true)
                .pretty();

            tracing_subscriber::registry()
                .with(env_filter)
                .with(fmt_layer)
                .try_init()?;
        }
        LogFormat::Json => {
            let fmt_layer = fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(true)
                .json();

            tracing_subscriber::registry()
                .with(env_filter)
                .with(fmt_layer)
                .try_init()?;
        }
    }

    Ok(())
}

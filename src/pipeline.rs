//! Tracing an edge map according to the configured tracer settings.

use anyhow::{Context, Result};
use edgetrace_core::{EdgeMap, PixelCoordinate};
use edgetrace_settings::TracerSettings;
use edgetrace_tracer::{TraceSession, TracedContour};
use tracing::{info, warn};

/// Where tracing starts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SeedSelection {
    /// A single given point
    Point(PixelCoordinate),
    /// The first edge pixel in raster order
    #[default]
    FirstEdge,
    /// Every edge pixel not reached by an earlier trace, in raster order
    AllEdges,
}

/// Trace `edges` from the selected seed(s) in one session.
pub fn trace_edges(
    edges: &EdgeMap,
    settings: &TracerSettings,
    seeds: SeedSelection,
) -> Result<Vec<TracedContour>> {
    let table = settings
        .build_table()
        .context("Failed to build circle offset table")?;
    let mut session = TraceSession::new(edges, &table, settings.options());

    let contours = match seeds {
        SeedSelection::Point(seed) => vec![session.trace_from(seed)?],
        SeedSelection::FirstEdge => match edges.first_edge() {
            Some(seed) => vec![session.trace_from(seed)?],
            None => {
                warn!("edge map has no edge pixels, nothing to trace");
                Vec::new()
            }
        },
        SeedSelection::AllEdges => session.trace_remaining()?,
    };

    let nodes: usize = contours.iter().map(TracedContour::len).sum();
    let truncated = contours.iter().filter(|c| c.is_truncated()).count();
    info!(
        contours = contours.len(),
        nodes,
        truncated,
        visited = session.visited().count(),
        "tracing complete"
    );
    Ok(contours)
}

/// Flatten every contour into its polylines, contour by contour.
pub fn segments_of(contours: &[TracedContour]) -> Vec<Vec<PixelCoordinate>> {
    contours.iter().flat_map(TracedContour::segments).collect()
}

//! # EdgeTrace Tracer
//!
//! Follows contours through a binary edge map by sampling concentric rings
//! around the current point. At each point the tracer grows the ring radius
//! until the number of angular arcs stabilizes, then steps to the middle of
//! every edge arc on the most informative ring. Curves continue, junctions
//! fork, and dead ends stop.
//!
//! ## Layers
//!
//! - [`circle_table`]: integer ring offsets per radius
//! - [`ring_sampler`]: edge presence along a ring, filtered by connectivity
//!   to the ring inside it
//! - [`arcs`]: splitting a ring sample into runs
//! - [`stepper`]: radius selection and next-point candidates
//! - [`tracer`]: the worklist that drives the stepper from a seed

pub mod arcs;
pub mod circle_table;
pub mod ring_sampler;
pub mod stepper;
pub mod tracer;

pub use arcs::{extract_arcs, RingArc};
pub use circle_table::{CircleOffsetTable, DEFAULT_MAX_RADIUS, MAX_SUPPORTED_RADIUS};
pub use ring_sampler::{RingSample, RingSampler};
pub use stepper::{ContourStepper, Step};
pub use tracer::{
    trace, TraceNode, TraceSession, TracedContour, TracerOptions, TraversalPolicy, VisitMarking,
};

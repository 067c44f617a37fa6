//! # EdgeTrace Core
//!
//! Core types and the error taxonomy shared by every EdgeTrace crate.
//! Provides pixel coordinates, ring offsets, and the boolean rasters a
//! trace reads (the edge map) and writes (the visited set).

pub mod error;
pub mod types;

pub use error::{Error, GeometryError, GridError, Result, TraceError};

pub use types::{BoolGrid, EdgeMap, Offset, PixelCoordinate, VisitedSet};

//! Core value types.
//!
//! ## Modules
//!
//! - [`coordinate`]: [`PixelCoordinate`] and ring [`Offset`]s
//! - [`grid`]: [`BoolGrid`], the read-only [`EdgeMap`] and the per-session [`VisitedSet`]

pub mod coordinate;
pub mod grid;

pub use coordinate::{Offset, PixelCoordinate};
pub use grid::{BoolGrid, EdgeMap, VisitedSet};

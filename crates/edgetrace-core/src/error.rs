//! Error handling for EdgeTrace
//!
//! Provides error types for the layers of the tracing core:
//! - Grid errors (buffer shape, dimensions)
//! - Geometry errors (circle offset tables, ring samples)
//! - Trace errors (seed validation, session state)
//!
//! All error types use `thiserror` for ergonomic error handling.
//! Out-of-bounds pixel lookups are deliberately *not* errors: every sampling
//! site treats them as "not an edge".

use thiserror::Error;

/// Grid error type
///
/// Raised when a boolean grid cannot be built from the data it was given.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GridError {
    /// Width or height is zero
    #[error("Invalid grid dimensions: {width}x{height}")]
    InvalidDimensions {
        /// Requested width in pixels.
        width: usize,
        /// Requested height in pixels.
        height: usize,
    },

    /// Flat buffer length does not match `width * height`
    #[error("Grid buffer size mismatch: expected {expected} cells, got {actual}")]
    SizeMismatch {
        /// Number of cells implied by the dimensions.
        expected: usize,
        /// Number of cells actually supplied.
        actual: usize,
    },

    /// Rows of a textual grid have different lengths
    #[error("Ragged grid: row {row} has {actual} columns, expected {expected}")]
    RaggedRows {
        /// Zero-based row index.
        row: usize,
        /// Width of the first row.
        expected: usize,
        /// Width of the offending row.
        actual: usize,
    },

    /// Two grids that must share a shape do not
    #[error("Grid shape mismatch: {left_width}x{left_height} vs {right_width}x{right_height}")]
    ShapeMismatch {
        /// Width of the first grid.
        left_width: usize,
        /// Height of the first grid.
        left_height: usize,
        /// Width of the second grid.
        right_width: usize,
        /// Height of the second grid.
        right_height: usize,
    },
}

/// Geometry error type
///
/// Represents configuration errors in the circle offset table and
/// precondition violations when chaining ring samples.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GeometryError {
    /// A radius beyond the table maximum was requested
    #[error("Radius {radius} out of range (table maximum is {max})")]
    RadiusOutOfRange {
        /// The requested radius.
        radius: usize,
        /// The largest radius the table holds.
        max: usize,
    },

    /// The offset table violates one of its structural invariants
    #[error("Malformed offset table: {reason}")]
    MalformedOffsetTable {
        /// Which invariant was violated.
        reason: String,
    },

    /// A previous ring sample was supplied with the wrong length
    #[error("Ring sample for radius {radius} has length {actual}, expected {expected}")]
    RingLengthMismatch {
        /// Radius the sample claims to belong to.
        radius: usize,
        /// Circumference length of that radius in the table.
        expected: usize,
        /// Length of the supplied sample.
        actual: usize,
    },
}

/// Trace error type
///
/// Represents errors raised by a trace session itself.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TraceError {
    /// The seed point does not lie inside the edge map
    #[error("Seed ({x}, {y}) lies outside the {width}x{height} edge map")]
    SeedOutOfBounds {
        /// Seed x coordinate.
        x: i32,
        /// Seed y coordinate.
        y: i32,
        /// Edge map width.
        width: usize,
        /// Edge map height.
        height: usize,
    },
}

/// Main error type for EdgeTrace
///
/// Wraps all layer-specific errors into a single type for convenient
/// propagation with `?`.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// Grid error
    #[error(transparent)]
    Grid(#[from] GridError),

    /// Geometry error
    #[error(transparent)]
    Geometry(#[from] GeometryError),

    /// Trace error
    #[error(transparent)]
    Trace(#[from] TraceError),
}

/// Result type alias using EdgeTrace's Error type
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Whether this error reflects a configuration problem (as opposed to a
    /// bad input for one particular trace).
    pub fn is_configuration_error(&self) -> bool {
        matches!(
            self,
            Error::Geometry(GeometryError::RadiusOutOfRange { .. })
                | Error::Geometry(GeometryError::MalformedOffsetTable { .. })
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grid_error_display() {
        let err = GridError::SizeMismatch {
            expected: 9,
            actual: 8,
        };
        assert_eq!(
            err.to_string(),
            "Grid buffer size mismatch: expected 9 cells, got 8"
        );

        let err = GridError::InvalidDimensions {
            width: 0,
            height: 3,
        };
        assert_eq!(err.to_string(), "Invalid grid dimensions: 0x3");
    }

    #[test]
    fn test_geometry_error_display() {
        let err = GeometryError::RadiusOutOfRange { radius: 12, max: 11 };
        assert_eq!(
            err.to_string(),
            "Radius 12 out of range (table maximum is 11)"
        );
    }

    #[test]
    fn test_error_conversion_is_transparent() {
        let err: Error = TraceError::SeedOutOfBounds {
            x: -1,
            y: 2,
            width: 5,
            height: 5,
        }
        .into();
        assert_eq!(
            err.to_string(),
            "Seed (-1, 2) lies outside the 5x5 edge map"
        );
        assert!(matches!(err, Error::Trace(_)));
        assert!(!err.is_configuration_error());
    }

    #[test]
    fn test_configuration_errors() {
        let err: Error = GeometryError::MalformedOffsetTable {
            reason: "empty".to_string(),
        }
        .into();
        assert!(err.is_configuration_error());

        let err: Error = GeometryError::RingLengthMismatch {
            radius: 1,
            expected: 8,
            actual: 4,
        }
        .into();
        assert!(!err.is_configuration_error());
    }
}

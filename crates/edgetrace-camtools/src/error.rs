//! Error types for the CAM tools crate.
//!
//! This module provides structured error types for edge extraction and
//! contour G-code generation, including parameter validation.

use edgetrace_core::GridError;
use std::io;
use thiserror::Error;

/// Errors that can occur during CAM tool operations.
#[derive(Error, Debug)]
pub enum CamToolError {
    /// The edge raster could not be built.
    #[error("Edge map error: {0}")]
    Grid(#[from] GridError),

    /// I/O error during file operations.
    #[error("I/O error: {0}")]
    IoError(#[from] io::Error),

    /// A parameter validation error occurred.
    #[error("Parameter error: {0}")]
    Parameter(#[from] ParameterError),
}

/// Errors related to CAM tool parameter validation.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ParameterError {
    /// A parameter value is invalid.
    #[error("Invalid value for '{name}': {reason}")]
    InvalidValue { name: String, reason: String },

    /// Parameters are mutually incompatible.
    #[error("Incompatible parameters: {0}")]
    Incompatible(String),
}

impl ParameterError {
    /// Reject NaN, infinite and non-positive values.
    pub(crate) fn require_positive(name: &str, value: f64) -> ParameterResult<()> {
        if value.is_finite() && value > 0.0 {
            Ok(())
        } else {
            Err(ParameterError::InvalidValue {
                name: name.to_string(),
                reason: format!("must be a positive number, got {}", value),
            })
        }
    }

    /// Reject NaN, infinite and negative values.
    pub(crate) fn require_non_negative(name: &str, value: f64) -> ParameterResult<()> {
        if value.is_finite() && value >= 0.0 {
            Ok(())
        } else {
            Err(ParameterError::InvalidValue {
                name: name.to_string(),
                reason: format!("must be a non-negative number, got {}", value),
            })
        }
    }
}

/// Result type alias for CAM tool operations.
pub type CamToolResult<T> = Result<T, CamToolError>;

/// Result type alias for parameter validation.
pub type ParameterResult<T> = Result<T, ParameterError>;

//! # EdgeTrace CAM Tools
//!
//! The stages on either side of the tracer:
//!
//! - **Edge Detection**: image loading, sharpening, Sobel and brightness
//!   thresholding into an [`edgetrace_core::EdgeMap`]
//! - **Contour G-Code**: traced polylines to a contour-following toolpath

pub mod contour_gcode;
pub mod edge_detect;
pub mod error;

pub use contour_gcode::{save_gcode, ContourGcodeGenerator, ContourGcodeParameters};
pub use edge_detect::{
    bright_pixel_edges, load_rgba, sharpen, sobel_edges, EdgeDetectionSettings, EdgeDetector,
    EdgeMethod,
};
pub use error::{CamToolError, CamToolResult, ParameterError, ParameterResult};

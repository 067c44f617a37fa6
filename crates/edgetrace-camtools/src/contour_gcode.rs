use crate::error::{CamToolResult, ParameterError, ParameterResult};
use anyhow::Result;
use edgetrace_core::PixelCoordinate;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{debug, warn};

/// Parameters for the contour toolpath generator
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ContourGcodeParameters {
    /// Image resolution in pixels per millimeter
    pub pixels_per_mm: f64,
    /// Feed rate for cutting moves (mm/min)
    pub feed_rate: f64,
    /// Feed rate for plunges and travel (mm/min)
    pub travel_rate: f64,
    /// Height for safe travel between segments (mm)
    pub safe_z: f64,
    /// Cutting depth (mm)
    pub cut_z: f64,
    /// X offset of the image origin (mm)
    pub offset_x: f64,
    /// Y offset of the image origin (mm)
    pub offset_y: f64,
    /// Spindle speed (RPM)
    pub spindle_speed: f64,
    /// Segments with fewer points are not cut
    pub min_segment_points: usize,
}

impl Default for ContourGcodeParameters {
    fn default() -> Self {
        Self {
            pixels_per_mm: 10.0,
            feed_rate: 600.0,
            travel_rate: 3000.0,
            safe_z: 5.0,
            cut_z: -0.5,
            offset_x: 0.0,
            offset_y: 0.0,
            spindle_speed: 10000.0,
            min_segment_points: 2,
        }
    }
}

impl ContourGcodeParameters {
    pub fn validate(&self) -> ParameterResult<()> {
        ParameterError::require_positive("pixels_per_mm", self.pixels_per_mm)?;
        ParameterError::require_positive("feed_rate", self.feed_rate)?;
        ParameterError::require_positive("travel_rate", self.travel_rate)?;
        ParameterError::require_non_negative("spindle_speed", self.spindle_speed)?;
        if self.cut_z >= self.safe_z {
            return Err(ParameterError::Incompatible(format!(
                "cut_z ({:.3}) must be below safe_z ({:.3})",
                self.cut_z, self.safe_z
            )));
        }
        Ok(())
    }

    /// Machine position of a pixel center. Image rows grow downward while
    /// machine Y grows upward, so rows are flipped against `image_height`.
    pub fn to_machine(&self, point: PixelCoordinate, image_height: usize) -> (f64, f64) {
        let row = image_height as f64 - 1.0 - point.y as f64;
        (
            self.offset_x + point.x as f64 / self.pixels_per_mm,
            self.offset_y + row / self.pixels_per_mm,
        )
    }
}

/// Generator for contour-following G-Code
pub struct ContourGcodeGenerator {
    params: ContourGcodeParameters,
}

impl ContourGcodeGenerator {
    pub fn new(params: ContourGcodeParameters) -> Self {
        Self { params }
    }

    pub fn params(&self) -> &ContourGcodeParameters {
        &self.params
    }

    /// Generate G-Code cutting every polyline in `segments`.
    ///
    /// `image_height` is the height in pixels of the edge map the segments
    /// were traced on.
    pub fn generate(&self, segments: &[Vec<PixelCoordinate>], image_height: usize) -> Result<String> {
        self.params.validate()?;
        let p = &self.params;

        let kept: Vec<&Vec<PixelCoordinate>> = segments
            .iter()
            .filter(|s| !s.is_empty() && s.len() >= p.min_segment_points)
            .collect();
        let skipped = segments.len() - kept.len();
        if skipped > 0 {
            warn!(
                skipped,
                min_points = p.min_segment_points,
                "skipping short contour segments"
            );
        }
        let point_count: usize = kept.iter().map(|s| s.len()).sum();

        let mut gcode = String::new();

        // Header
        gcode.push_str("; Contour Trace Toolpath\n");
        gcode.push_str(&format!(
            "; Generated: {}\n",
            chrono::Utc::now().format("%Y-%m-%d %H:%M:%S UTC")
        ));
        gcode.push_str(&format!(
            "; Segments: {} ({} points)\n",
            kept.len(),
            point_count
        ));
        gcode.push_str(&format!(
            "; Resolution: {:.1} pixels/mm\n",
            p.pixels_per_mm
        ));
        gcode.push_str(&format!("; Cut depth: {:.3} mm\n", p.cut_z));
        gcode.push_str(";\n");

        // Initialization
        gcode.push_str("G21 ; Set units to millimeters\n");
        gcode.push_str("G90 ; Absolute positioning\n");
        gcode.push_str("G17 ; XY plane selection\n");
        gcode.push_str(&format!("M3 S{:.0} ; Start spindle\n", p.spindle_speed));

        for (index, segment) in kept.iter().enumerate() {
            self.generate_segment(&mut gcode, index, segment, image_height);
        }

        // Retract and end
        gcode.push_str(&format!("G0 Z{:.3} ; Retract to safe height\n", p.safe_z));
        gcode.push_str("M5 ; Stop spindle\n");
        gcode.push_str("M30 ; End program\n");

        debug!(
            segments = kept.len(),
            points = point_count,
            bytes = gcode.len(),
            "contour gcode generated"
        );
        Ok(gcode)
    }

    fn generate_segment(
        &self,
        gcode: &mut String,
        index: usize,
        segment: &[PixelCoordinate],
        image_height: usize,
    ) {
        let p = &self.params;
        let Some((first, rest)) = segment.split_first() else {
            return;
        };
        let (x, y) = p.to_machine(*first, image_height);

        gcode.push_str(&format!("; Segment {}\n", index + 1));
        gcode.push_str(&format!("G0 Z{:.3}\n", p.safe_z));
        gcode.push_str(&format!("G0 X{:.3} Y{:.3}\n", x, y));
        gcode.push_str(&format!("G1 Z{:.3} F{:.1}\n", p.cut_z, p.travel_rate));

        let mut feed = Some(p.feed_rate);
        for point in rest {
            let (x, y) = p.to_machine(*point, image_height);
            match feed.take() {
                Some(f) => gcode.push_str(&format!("G1 X{:.3} Y{:.3} F{:.1}\n", x, y, f)),
                None => gcode.push_str(&format!("G1 X{:.3} Y{:.3}\n", x, y)),
            }
        }
    }
}

/// Write generated G-Code to `path`.
pub fn save_gcode<P: AsRef<Path>>(path: P, gcode: &str) -> CamToolResult<()> {
    std::fs::write(path, gcode)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_to_machine_flips_rows() {
        let params = ContourGcodeParameters {
            pixels_per_mm: 2.0,
            offset_x: 10.0,
            offset_y: 1.0,
            ..Default::default()
        };
        assert_eq!(params.to_machine(PixelCoordinate::new(4, 0), 5), (12.0, 3.0));
        assert_eq!(params.to_machine(PixelCoordinate::new(0, 4), 5), (10.0, 1.0));
    }

    #[test]
    fn test_validate() {
        assert!(ContourGcodeParameters::default().validate().is_ok());

        let params = ContourGcodeParameters {
            pixels_per_mm: 0.0,
            ..Default::default()
        };
        assert!(params.validate().is_err());

        let params = ContourGcodeParameters {
            cut_z: 10.0,
            ..Default::default()
        };
        assert!(matches!(
            params.validate(),
            Err(ParameterError::Incompatible(_))
        ));
    }
}

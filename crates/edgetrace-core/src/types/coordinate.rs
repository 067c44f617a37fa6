//! Pixel coordinates and ring offsets.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Integer pixel position.
///
/// A coordinate is only meaningful relative to a grid: it is valid iff
/// `0 <= x < width` and `0 <= y < height`. Coordinates may be negative while
/// they are being computed (a ring offset added to a border pixel).
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize,
)]
pub struct PixelCoordinate {
    pub x: i32,
    pub y: i32,
}

impl PixelCoordinate {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Translate by a ring offset.
    pub fn offset(self, offset: Offset) -> Self {
        Self {
            x: self.x.saturating_add(offset.dx),
            y: self.y.saturating_add(offset.dy),
        }
    }

    /// Chebyshev (8-neighbour) distance.
    pub fn chebyshev_distance(&self, other: &PixelCoordinate) -> u32 {
        self.x.abs_diff(other.x).max(self.y.abs_diff(other.y))
    }
}

impl From<(i32, i32)> for PixelCoordinate {
    fn from((x, y): (i32, i32)) -> Self {
        Self { x, y }
    }
}

impl From<PixelCoordinate> for (i32, i32) {
    fn from(p: PixelCoordinate) -> Self {
        (p.x, p.y)
    }
}

impl fmt::Display for PixelCoordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

impl FromStr for PixelCoordinate {
    type Err = String;

    /// Parses `"x,y"` (whitespace and surrounding parentheses tolerated).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let inner = s.trim().trim_start_matches('(').trim_end_matches(')');
        let (x, y) = inner
            .split_once(',')
            .ok_or_else(|| format!("Expected \"x,y\", got: {}", s))?;
        let x = x
            .trim()
            .parse::<i32>()
            .map_err(|e| format!("Invalid x in {:?}: {}", s, e))?;
        let y = y
            .trim()
            .parse::<i32>()
            .map_err(|e| format!("Invalid y in {:?}: {}", s, e))?;
        Ok(Self { x, y })
    }
}

/// Integer displacement from a ring center.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Offset {
    pub dx: i32,
    pub dy: i32,
}

impl Offset {
    pub const ZERO: Offset = Offset { dx: 0, dy: 0 };

    pub const fn new(dx: i32, dy: i32) -> Self {
        Self { dx, dy }
    }
}

impl From<(i32, i32)> for Offset {
    fn from((dx, dy): (i32, i32)) -> Self {
        Self { dx, dy }
    }
}

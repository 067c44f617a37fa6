//! Boolean rasters: the edge map a trace reads and the visited set it writes.
//!
//! Storage is row-major (`index = y * width + x`). Lookups take a
//! [`PixelCoordinate`] and return `None` when it falls outside the grid, so
//! callers can treat "outside" as "not an edge" without a separate bounds
//! check.

use crate::error::GridError;
use crate::types::PixelCoordinate;

/// Row-major `width x height` grid of booleans.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoolGrid {
    width: usize,
    height: usize,
    data: Vec<bool>,
}

impl BoolGrid {
    /// Build from a flat row-major buffer.
    pub fn from_vec(width: usize, height: usize, data: Vec<bool>) -> Result<Self, GridError> {
        if width == 0 || height == 0 {
            return Err(GridError::InvalidDimensions { width, height });
        }
        let expected = width.checked_mul(height).ok_or(GridError::SizeMismatch {
            expected: usize::MAX,
            actual: data.len(),
        })?;
        if data.len() != expected {
            return Err(GridError::SizeMismatch {
                expected,
                actual: data.len(),
            });
        }
        Ok(Self {
            width,
            height,
            data,
        })
    }

    /// A grid with every cell set to `value`.
    pub fn new_fill(width: usize, height: usize, value: bool) -> Result<Self, GridError> {
        if width == 0 || height == 0 {
            return Err(GridError::InvalidDimensions { width, height });
        }
        let len = width.checked_mul(height).ok_or(GridError::SizeMismatch {
            expected: usize::MAX,
            actual: 0,
        })?;
        Ok(Self {
            width,
            height,
            data: vec![value; len],
        })
    }

    /// Build a grid by evaluating `f(x, y)` for every cell.
    pub fn from_fn<F>(width: usize, height: usize, mut f: F) -> Result<Self, GridError>
    where
        F: FnMut(usize, usize) -> bool,
    {
        let mut grid = Self::new_fill(width, height, false)?;
        for y in 0..height {
            for x in 0..width {
                grid.data[y * width + x] = f(x, y);
            }
        }
        Ok(grid)
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn data(&self) -> &[bool] {
        &self.data
    }

    /// Whether `p` lies inside the grid.
    pub fn contains(&self, p: PixelCoordinate) -> bool {
        self.index_of(p).is_some()
    }

    /// Cell value, or `None` when `p` is outside the grid.
    pub fn get(&self, p: PixelCoordinate) -> Option<bool> {
        self.index_of(p).map(|i| self.data[i])
    }

    /// Number of `true` cells.
    pub fn count_true(&self) -> usize {
        self.data.iter().filter(|&&v| v).count()
    }

    /// Coordinates of all `true` cells in raster order.
    pub fn iter_true(&self) -> impl Iterator<Item = PixelCoordinate> + '_ {
        let width = self.width;
        self.data
            .iter()
            .enumerate()
            .filter(|(_, &v)| v)
            .map(move |(i, _)| PixelCoordinate::new((i % width) as i32, (i / width) as i32))
    }

    fn index_of(&self, p: PixelCoordinate) -> Option<usize> {
        let x = usize::try_from(p.x).ok()?;
        let y = usize::try_from(p.y).ok()?;
        if x < self.width && y < self.height {
            Some(y * self.width + x)
        } else {
            None
        }
    }

    fn set_true(&mut self, p: PixelCoordinate) -> Option<bool> {
        let i = self.index_of(p)?;
        let was = self.data[i];
        self.data[i] = true;
        Some(!was)
    }

    fn same_shape(&self, other: &BoolGrid) -> bool {
        self.width == other.width && self.height == other.height
    }
}

/// Immutable edge raster; `true` marks an edge pixel.
///
/// Produced once by an external detector and only read while tracing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EdgeMap {
    grid: BoolGrid,
}

impl EdgeMap {
    pub fn new(grid: BoolGrid) -> Self {
        Self { grid }
    }

    pub fn from_vec(width: usize, height: usize, data: Vec<bool>) -> Result<Self, GridError> {
        BoolGrid::from_vec(width, height, data).map(Self::new)
    }

    /// An edge map without any edge pixel.
    pub fn empty(width: usize, height: usize) -> Result<Self, GridError> {
        BoolGrid::new_fill(width, height, false).map(Self::new)
    }

    pub fn from_fn<F>(width: usize, height: usize, f: F) -> Result<Self, GridError>
    where
        F: FnMut(usize, usize) -> bool,
    {
        BoolGrid::from_fn(width, height, f).map(Self::new)
    }

    /// Parse a textual picture, one string per row.
    ///
    /// `#`, `X`, `x` and `1` are edges, anything else is background.
    ///
    /// ```
    /// use edgetrace_core::EdgeMap;
    ///
    /// let edges = EdgeMap::from_ascii(&["...", "###", "..."]).unwrap();
    /// assert_eq!(edges.width(), 3);
    /// assert_eq!(edges.count_edges(), 3);
    /// ```
    pub fn from_ascii(rows: &[&str]) -> Result<Self, GridError> {
        let height = rows.len();
        let width = rows.first().map(|r| r.chars().count()).unwrap_or(0);
        let mut data = Vec::with_capacity(width * height);
        for (row, line) in rows.iter().enumerate() {
            let actual = line.chars().count();
            if actual != width {
                return Err(GridError::RaggedRows {
                    row,
                    expected: width,
                    actual,
                });
            }
            data.extend(line.chars().map(|c| matches!(c, '#' | 'X' | 'x' | '1')));
        }
        Self::from_vec(width, height, data)
    }

    pub fn width(&self) -> usize {
        self.grid.width()
    }

    pub fn height(&self) -> usize {
        self.grid.height()
    }

    pub fn contains(&self, p: PixelCoordinate) -> bool {
        self.grid.contains(p)
    }

    /// Edge value at `p`. Pixels outside the map are never edges.
    pub fn is_edge(&self, p: PixelCoordinate) -> bool {
        self.grid.get(p).unwrap_or(false)
    }

    pub fn count_edges(&self) -> usize {
        self.grid.count_true()
    }

    /// Edge pixels in raster order.
    pub fn edge_pixels(&self) -> impl Iterator<Item = PixelCoordinate> + '_ {
        self.grid.iter_true()
    }

    /// First edge pixel in raster order.
    pub fn first_edge(&self) -> Option<PixelCoordinate> {
        self.edge_pixels().next()
    }

    pub fn as_grid(&self) -> &BoolGrid {
        &self.grid
    }

    /// Terminal dump of the map: two characters per pixel, framed by rules.
    pub fn render_ascii(&self) -> String {
        let rule = "-".repeat(self.width() * 2);
        let mut out = String::with_capacity((self.width() * 2 + 1) * (self.height() + 2));
        out.push_str(&rule);
        out.push('\n');
        for y in 0..self.height() {
            for x in 0..self.width() {
                let edge = self.is_edge(PixelCoordinate::new(x as i32, y as i32));
                out.push_str(if edge { "c\u{254}" } else { "  " });
            }
            out.push('\n');
        }
        out.push_str(&rule);
        out.push('\n');
        out
    }
}

/// Per-session record of which pixels a trace has already claimed.
///
/// Entries only ever go from `false` to `true`; there is no way to clear one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VisitedSet {
    grid: BoolGrid,
    marked: usize,
}

impl VisitedSet {
    /// An all-false set shaped like `edges`.
    pub fn for_edge_map(edges: &EdgeMap) -> Self {
        let grid = BoolGrid {
            width: edges.width(),
            height: edges.height(),
            data: vec![false; edges.width() * edges.height()],
        };
        Self { grid, marked: 0 }
    }

    /// Resume from a previously saved grid.
    pub fn from_grid(edges: &EdgeMap, grid: BoolGrid) -> Result<Self, GridError> {
        if !grid.same_shape(edges.as_grid()) {
            return Err(GridError::ShapeMismatch {
                left_width: edges.width(),
                left_height: edges.height(),
                right_width: grid.width(),
                right_height: grid.height(),
            });
        }
        let marked = grid.count_true();
        Ok(Self { grid, marked })
    }

    /// Mark `p` as visited.
    ///
    /// Returns `true` when `p` was newly marked, `false` when it was already
    /// visited or lies outside the grid.
    pub fn mark(&mut self, p: PixelCoordinate) -> bool {
        match self.grid.set_true(p) {
            Some(true) => {
                self.marked += 1;
                true
            }
            _ => false,
        }
    }

    /// Whether `p` has been visited. Outside pixels are reported unvisited.
    pub fn is_visited(&self, p: PixelCoordinate) -> bool {
        self.grid.get(p).unwrap_or(false)
    }

    /// Number of visited pixels.
    pub fn count(&self) -> usize {
        self.marked
    }

    pub fn width(&self) -> usize {
        self.grid.width()
    }

    pub fn height(&self) -> usize {
        self.grid.height()
    }

    pub fn as_grid(&self) -> &BoolGrid {
        &self.grid
    }

    pub fn into_grid(self) -> BoolGrid {
        self.grid
    }
}

//! Discretized circle offsets, one ring per integer radius.
//!
//! Rings are rasterized with the integer midpoint circle algorithm and
//! ordered by an exact angle comparison, so the table is identical on every
//! run and platform. Angle 0 points along `+x`; angles grow toward `+y`.

use edgetrace_core::{GeometryError, Offset};
use std::cmp::Ordering;
use std::collections::BTreeSet;

/// Largest radius sampled by default.
pub const DEFAULT_MAX_RADIUS: usize = 11;

/// Upper bound accepted by [`CircleOffsetTable::new`].
pub const MAX_SUPPORTED_RADIUS: usize = 64;

/// Read-only table of ring offsets indexed by radius `0..=max_radius`.
///
/// Build it once and pass it by reference to every stepper and tracer; it is
/// never mutated after construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CircleOffsetTable {
    rings: Vec<Vec<Offset>>,
}

impl CircleOffsetTable {
    /// Rasterize rings for radii `0..=max_radius`.
    pub fn new(max_radius: usize) -> Result<Self, GeometryError> {
        if max_radius > MAX_SUPPORTED_RADIUS {
            return Err(GeometryError::RadiusOutOfRange {
                radius: max_radius,
                max: MAX_SUPPORTED_RADIUS,
            });
        }
        let rings = (0..=max_radius as i32).map(rasterize_ring).collect();
        Self::from_rings(rings)
    }

    /// Wrap externally supplied ring data after checking its invariants.
    ///
    /// Radius 0 must hold exactly one offset and circumference lengths must
    /// never shrink as the radius grows.
    pub fn from_rings(rings: Vec<Vec<Offset>>) -> Result<Self, GeometryError> {
        let Some(first) = rings.first() else {
            return Err(malformed("table holds no rings"));
        };
        if first.len() != 1 {
            return Err(malformed(format!(
                "radius 0 must hold exactly one offset, found {}",
                first.len()
            )));
        }
        for (radius, pair) in rings.windows(2).enumerate() {
            let (smaller, larger) = (&pair[0], &pair[1]);
            if larger.len() < smaller.len() {
                return Err(malformed(format!(
                    "radius {} has {} offsets, fewer than the {} of radius {}",
                    radius + 1,
                    larger.len(),
                    smaller.len(),
                    radius
                )));
            }
        }
        Ok(Self { rings })
    }

    /// Largest radius in the table.
    pub fn max_radius(&self) -> usize {
        self.rings.len() - 1
    }

    /// Offsets of the ring at `radius`, in angular order.
    pub fn ring(&self, radius: usize) -> Result<&[Offset], GeometryError> {
        self.rings
            .get(radius)
            .map(Vec::as_slice)
            .ok_or(GeometryError::RadiusOutOfRange {
                radius,
                max: self.max_radius(),
            })
    }

    /// Number of offsets in the ring at `radius`.
    pub fn circumference(&self, radius: usize) -> Result<usize, GeometryError> {
        self.ring(radius).map(<[Offset]>::len)
    }

    /// All rings, smallest radius first.
    pub fn rings(&self) -> impl Iterator<Item = &[Offset]> {
        self.rings.iter().map(Vec::as_slice)
    }
}

impl Default for CircleOffsetTable {
    fn default() -> Self {
        Self {
            rings: (0..=DEFAULT_MAX_RADIUS as i32).map(rasterize_ring).collect(),
        }
    }
}

fn malformed(reason: impl Into<String>) -> GeometryError {
    GeometryError::MalformedOffsetTable {
        reason: reason.into(),
    }
}

/// Midpoint circle over the first octant, mirrored to all eight.
fn rasterize_ring(radius: i32) -> Vec<Offset> {
    if radius == 0 {
        return vec![Offset::ZERO];
    }

    let mut octant = Vec::new();
    let (mut x, mut y, mut d) = (radius, 0, 1 - radius);
    while y <= x {
        octant.push((x, y));
        y += 1;
        if d <= 0 {
            d += 2 * y + 1;
        } else {
            x -= 1;
            d += 2 * (y - x) + 1;
        }
    }

    let mut unique = BTreeSet::new();
    for (x, y) in octant {
        for (dx, dy) in [
            (x, y),
            (y, x),
            (-y, x),
            (-x, y),
            (-x, -y),
            (-y, -x),
            (y, -x),
            (x, -y),
        ] {
            unique.insert(Offset::new(dx, dy));
        }
    }

    let mut ring: Vec<Offset> = unique.into_iter().collect();
    ring.sort_by(angular_order);
    ring
}

/// Exact ordering by angle in `[0, 2π)` without trigonometry.
fn angular_order(a: &Offset, b: &Offset) -> Ordering {
    half_plane(a).cmp(&half_plane(b)).then_with(|| {
        let cross = a.dx as i64 * b.dy as i64 - a.dy as i64 * b.dx as i64;
        0.cmp(&cross)
    })
}

// 0 for angles in [0, π), 1 for [π, 2π)
fn half_plane(o: &Offset) -> u8 {
    if o.dy > 0 || (o.dy == 0 && o.dx > 0) {
        0
    } else {
        1
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use edgetrace_core::PixelCoordinate;

    fn offsets(pairs: &[(i32, i32)]) -> Vec<Offset> {
        pairs.iter().copied().map(Offset::from).collect()
    }

    #[test]
    fn test_radius_one_is_eight_neighbourhood() {
        let table = CircleOffsetTable::default();
        assert_eq!(
            table.ring(1).unwrap(),
            offsets(&[
                (1, 0),
                (1, 1),
                (0, 1),
                (-1, 1),
                (-1, 0),
                (-1, -1),
                (0, -1),
                (1, -1)
            ])
            .as_slice()
        );
    }

    #[test]
    fn test_small_ring_lengths() {
        let table = CircleOffsetTable::new(5).unwrap();
        let lengths: Vec<usize> = table.rings().map(<[Offset]>::len).collect();
        assert_eq!(lengths, vec![1, 8, 12, 16, 24, 28]);
    }

    #[test]
    fn test_default_matches_new() {
        assert_eq!(
            CircleOffsetTable::default(),
            CircleOffsetTable::new(DEFAULT_MAX_RADIUS).unwrap()
        );
    }

    #[test]
    fn test_ring_out_of_range() {
        let table = CircleOffsetTable::new(3).unwrap();
        assert_eq!(
            table.ring(4),
            Err(GeometryError::RadiusOutOfRange { radius: 4, max: 3 })
        );
    }

    #[test]
    fn test_generated_rings_are_ordered_closed_loops() {
        let table = CircleOffsetTable::new(MAX_SUPPORTED_RADIUS).unwrap();
        let origin = PixelCoordinate::new(0, 0);

        for (radius, ring) in table.rings().enumerate().skip(1) {
            assert_eq!(ring[0], Offset::new(radius as i32, 0), "radius {radius}");
            for (i, &a) in ring.iter().enumerate() {
                let b = ring[(i + 1) % ring.len()];
                let gap = origin.offset(a).chebyshev_distance(&origin.offset(b));
                assert_eq!(gap, 1, "radius {radius}: {a:?} -> {b:?}");
                if i + 1 < ring.len() {
                    assert_eq!(angular_order(&a, &b), Ordering::Less);
                }
            }
        }
    }

    #[test]
    fn test_ring_lengths_never_shrink() {
        let table = CircleOffsetTable::new(MAX_SUPPORTED_RADIUS).unwrap();
        let lengths: Vec<usize> = table.rings().map(<[Offset]>::len).collect();
        assert_eq!(lengths.len(), MAX_SUPPORTED_RADIUS + 1);
        assert!(lengths.windows(2).all(|w| w[0] <= w[1]), "{lengths:?}");
    }

    #[test]
    fn test_new_rejects_oversized_radius() {
        assert_eq!(
            CircleOffsetTable::new(MAX_SUPPORTED_RADIUS + 1),
            Err(GeometryError::RadiusOutOfRange {
                radius: MAX_SUPPORTED_RADIUS + 1,
                max: MAX_SUPPORTED_RADIUS
            })
        );
    }

    #[test]
    fn test_from_rings_rejects_empty_table() {
        let err = CircleOffsetTable::from_rings(Vec::new()).unwrap_err();
        assert_eq!(err, malformed("table holds no rings"));
    }

    #[test]
    fn test_from_rings_rejects_wide_center() {
        let err = CircleOffsetTable::from_rings(vec![offsets(&[(0, 0), (1, 0)])]).unwrap_err();
        assert!(matches!(err, GeometryError::MalformedOffsetTable { .. }));
        assert_eq!(
            err.to_string(),
            "Malformed offset table: radius 0 must hold exactly one offset, found 2"
        );

        let empty_center = CircleOffsetTable::from_rings(vec![Vec::new()]);
        assert!(empty_center.is_err());
    }

    #[test]
    fn test_from_rings_rejects_shrinking_rings() {
        let rings = vec![
            vec![Offset::ZERO],
            offsets(&[(1, 0), (0, 1), (-1, 0), (0, -1)]),
            offsets(&[(2, 0), (-2, 0)]),
        ];
        let err = CircleOffsetTable::from_rings(rings).unwrap_err();
        assert_eq!(
            err,
            malformed("radius 2 has 2 offsets, fewer than the 4 of radius 1")
        );
    }

    #[test]
    fn test_from_rings_accepts_center_only() {
        let table = CircleOffsetTable::from_rings(vec![vec![Offset::ZERO]]).unwrap();
        assert_eq!(table.max_radius(), 0);
        assert_eq!(table.circumference(0), Ok(1));
    }

    #[test]
    fn test_angular_order_starts_at_positive_x() {
        let mut points = offsets(&[(0, -1), (-1, 0), (0, 1), (1, 0)]);
        points.sort_by(angular_order);
        assert_eq!(points, offsets(&[(1, 0), (0, 1), (-1, 0), (0, -1)]));
    }
}

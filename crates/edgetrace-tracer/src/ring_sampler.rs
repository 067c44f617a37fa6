//! Connectivity-filtered sampling of the edge map along one ring.

use crate::arcs::{extract_arcs, RingArc};
use crate::circle_table::CircleOffsetTable;
use edgetrace_core::{EdgeMap, GeometryError, PixelCoordinate};

/// Filtered edge presence at every offset of one ring, in angular order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RingSample {
    radius: usize,
    values: Vec<bool>,
}

impl RingSample {
    /// Wrap precomputed values, e.g. a sample recorded elsewhere.
    pub fn from_values(radius: usize, values: Vec<bool>) -> Self {
        Self { radius, values }
    }

    pub fn radius(&self) -> usize {
        self.radius
    }

    pub fn values(&self) -> &[bool] {
        &self.values
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn count_true(&self) -> usize {
        self.values.iter().filter(|&&v| v).count()
    }

    /// Contiguous same-value runs of this sample.
    pub fn arcs(&self) -> Vec<RingArc> {
        extract_arcs(&self.values)
    }
}

/// Samples rings around a center, chaining each ring to the previous one.
#[derive(Debug, Clone, Copy)]
pub struct RingSampler<'a> {
    edges: &'a EdgeMap,
    table: &'a CircleOffsetTable,
}

impl<'a> RingSampler<'a> {
    pub fn new(edges: &'a EdgeMap, table: &'a CircleOffsetTable) -> Self {
        Self { edges, table }
    }

    pub fn edges(&self) -> &'a EdgeMap {
        self.edges
    }

    pub fn table(&self) -> &'a CircleOffsetTable {
        self.table
    }

    /// Sample the ring of `radius` around `center`.
    ///
    /// `previous` is the sample of radius `radius - 1` around the same
    /// center. When absent (always the case for radius 0) it is taken to be
    /// the single-element sample `[true]`, which filters nothing.
    ///
    /// An entry is `true` only if its pixel is inside the map, is an edge,
    /// and the proportional position `i * prev_len / len` lands on (floor) or
    /// next to (ceiling) a `true` entry of `previous`. Pixels outside the map
    /// always sample `false`.
    pub fn sample(
        &self,
        center: PixelCoordinate,
        radius: usize,
        previous: Option<&RingSample>,
    ) -> Result<RingSample, GeometryError> {
        let ring = self.table.ring(radius)?;

        let unfiltered = [true];
        let previous: &[bool] = match previous {
            Some(sample) if radius > 0 => {
                let expected = self.table.circumference(radius - 1)?;
                if sample.len() != expected {
                    return Err(GeometryError::RingLengthMismatch {
                        radius: radius - 1,
                        expected,
                        actual: sample.len(),
                    });
                }
                sample.values()
            }
            _ => &unfiltered,
        };

        let len = ring.len();
        let prev_len = previous.len();
        let values = ring
            .iter()
            .enumerate()
            .map(|(i, &offset)| {
                let pixel = center.offset(offset);
                if !self.edges.contains(pixel) {
                    return false;
                }

                // floor and ceiling of i * prev_len / len, in exact integers
                let scaled = i * prev_len;
                let floor = scaled / len;
                let ceil = if scaled % len == 0 { floor } else { floor + 1 };

                let connected = previous[floor] || previous.get(ceil).copied().unwrap_or(false);
                connected && self.edges.is_edge(pixel)
            })
            .collect();

        Ok(RingSample { radius, values })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_connectivity_filter_rejects_isolated_pixels() {
        // The ring-2 pixels at (4,2) and (0,2) are edges but every ring-1
        // pixel is background, so nothing at radius 2 is connected.
        let edges = EdgeMap::from_ascii(&[
            ".....", //
            ".....", //
            "#.#.#", //
            ".....", //
            ".....",
        ])
        .unwrap();
        let table = CircleOffsetTable::new(2).unwrap();
        let sampler = RingSampler::new(&edges, &table);
        let center = PixelCoordinate::new(2, 2);

        let r0 = sampler.sample(center, 0, None).unwrap();
        assert_eq!(r0.values(), &[true]);
        let r1 = sampler.sample(center, 1, Some(&r0)).unwrap();
        assert_eq!(r1.count_true(), 0);
        let r2 = sampler.sample(center, 2, Some(&r1)).unwrap();
        assert_eq!(r2.count_true(), 0);

        // Without the chain the literal edge values come through.
        let unchained = sampler.sample(center, 2, None).unwrap();
        assert_eq!(unchained.count_true(), 2);
    }

    #[test]
    fn test_previous_length_is_checked() {
        let edges = EdgeMap::empty(3, 3).unwrap();
        let table = CircleOffsetTable::new(2).unwrap();
        let sampler = RingSampler::new(&edges, &table);
        let bogus = RingSample::from_values(1, vec![true; 5]);

        let err = sampler
            .sample(PixelCoordinate::new(1, 1), 2, Some(&bogus))
            .unwrap_err();
        assert_eq!(
            err,
            GeometryError::RingLengthMismatch {
                radius: 1,
                expected: 8,
                actual: 5
            }
        );
    }

    #[test]
    fn test_radius_beyond_table() {
        let edges = EdgeMap::empty(3, 3).unwrap();
        let table = CircleOffsetTable::new(1).unwrap();
        let sampler = RingSampler::new(&edges, &table);
        assert!(matches!(
            sampler.sample(PixelCoordinate::new(1, 1), 2, None),
            Err(GeometryError::RadiusOutOfRange { radius: 2, max: 1 })
        ));
    }
}

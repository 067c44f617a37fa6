//! Choosing a sampling radius and the next contour points from one center.

use crate::arcs::{extract_arcs, RingArc};
use crate::circle_table::CircleOffsetTable;
use crate::ring_sampler::RingSampler;
use edgetrace_core::{EdgeMap, GeometryError, PixelCoordinate, VisitedSet};
use tracing::trace;

/// Outcome of one stepping decision.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Step {
    /// Radius whose ring exposed the most arcs.
    pub radius: usize,
    /// Next points, one per edge arc at `radius`, in angular order.
    pub candidates: Vec<PixelCoordinate>,
    /// Arcs of the ring at `radius`.
    pub arcs: Vec<RingArc>,
    /// Arc count of every radius sampled, starting at radius 0.
    pub arc_counts: Vec<usize>,
}

impl Step {
    /// Number of edge arcs at the chosen radius, including those whose
    /// midpoint was dropped as visited or outside the map.
    pub fn edge_arc_count(&self) -> usize {
        self.arcs.iter().filter(|a| a.value).count()
    }
}

/// Walks outward from a center until the ring structure stabilizes.
#[derive(Debug, Clone, Copy)]
pub struct ContourStepper<'a> {
    sampler: RingSampler<'a>,
}

impl<'a> ContourStepper<'a> {
    pub fn new(edges: &'a EdgeMap, table: &'a CircleOffsetTable) -> Self {
        Self {
            sampler: RingSampler::new(edges, table),
        }
    }

    pub fn edges(&self) -> &'a EdgeMap {
        self.sampler.edges()
    }

    pub fn table(&self) -> &'a CircleOffsetTable {
        self.sampler.table()
    }

    /// Pick the radius that best shows the local branching around `center`
    /// and return the unvisited points at the middle of its edge arcs.
    ///
    /// Radii are sampled from 0 upward, each ring chained to the previous
    /// one. The chosen radius is the first to reach the highest arc count.
    /// Sampling stops early once a radius reports more than one arc and the
    /// same count as the radius before it.
    pub fn next_points(
        &self,
        center: PixelCoordinate,
        visited: &VisitedSet,
    ) -> Result<Step, GeometryError> {
        let table = self.sampler.table();

        let mut sample = self.sampler.sample(center, 0, None)?;
        let mut arcs_by_radius = vec![extract_arcs(sample.values())];
        let mut best = 0;

        for radius in 1..=table.max_radius() {
            sample = self.sampler.sample(center, radius, Some(&sample))?;
            let arcs = extract_arcs(sample.values());
            let count = arcs.len();
            let previous = arcs_by_radius[radius - 1].len();
            arcs_by_radius.push(arcs);

            if count > arcs_by_radius[best].len() {
                best = radius;
            }
            if count > 1 && count == previous {
                break;
            }
        }

        let ring = table.ring(best)?;
        let edges = self.sampler.edges();
        let candidates: Vec<PixelCoordinate> = arcs_by_radius[best]
            .iter()
            .filter(|arc| arc.value)
            .map(|arc| center.offset(ring[arc.midpoint_index(ring.len())]))
            .filter(|&p| edges.contains(p) && !visited.is_visited(p))
            .collect();

        let arc_counts: Vec<usize> = arcs_by_radius.iter().map(Vec::len).collect();
        trace!(
            %center,
            radius = best,
            candidates = candidates.len(),
            ?arc_counts,
            "stepped"
        );

        Ok(Step {
            radius: best,
            candidates,
            arcs: arcs_by_radius.swap_remove(best),
            arc_counts,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_false_map_has_no_candidates() {
        let edges = EdgeMap::empty(5, 5).unwrap();
        let table = CircleOffsetTable::default();
        let visited = VisitedSet::for_edge_map(&edges);
        let stepper = ContourStepper::new(&edges, &table);

        let step = stepper
            .next_points(PixelCoordinate::new(2, 2), &visited)
            .unwrap();
        assert_eq!(step.radius, 0);
        assert!(step.candidates.is_empty());
        assert_eq!(step.edge_arc_count(), 0);
        // one uniform arc per radius, never two equal counts above one
        assert_eq!(step.arc_counts, vec![1; table.max_radius() + 1]);
    }

    #[test]
    fn test_center_outside_map() {
        let edges = EdgeMap::from_fn(4, 4, |_, _| true).unwrap();
        let table = CircleOffsetTable::new(3).unwrap();
        let visited = VisitedSet::for_edge_map(&edges);
        let stepper = ContourStepper::new(&edges, &table);

        let step = stepper
            .next_points(PixelCoordinate::new(-5, -5), &visited)
            .unwrap();
        assert!(step.candidates.is_empty());
    }
}

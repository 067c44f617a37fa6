//! Worklist-driven contour tracing.
//!
//! A [`TraceSession`] owns the [`VisitedSet`] and repeatedly asks the
//! [`ContourStepper`] where to go next. Candidates are claimed (marked
//! visited) as soon as they are queued, so no point is ever processed twice
//! and every trace terminates.

mod contour;

pub use contour::{TraceNode, TracedContour};

use crate::circle_table::CircleOffsetTable;
use crate::stepper::ContourStepper;
use edgetrace_core::{EdgeMap, PixelCoordinate, Result, TraceError, VisitedSet};
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use std::fmt;
use std::str::FromStr;
use tracing::{debug, warn};

/// Order in which pending points are expanded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TraversalPolicy {
    /// Follow one branch to its end before returning to a branching point.
    #[default]
    DepthFirst,
    /// Expand all branches level by level.
    BreadthFirst,
}

impl fmt::Display for TraversalPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DepthFirst => write!(f, "depth-first"),
            Self::BreadthFirst => write!(f, "breadth-first"),
        }
    }
}

impl FromStr for TraversalPolicy {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "depth-first" | "depth_first" | "dfs" => Ok(Self::DepthFirst),
            "breadth-first" | "breadth_first" | "bfs" => Ok(Self::BreadthFirst),
            _ => Err(format!("Unknown traversal policy: {}", s)),
        }
    }
}

/// Which pixels a processed point claims in the visited set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum VisitMarking {
    /// Only the traversed point itself.
    Point,
    /// The traversed point plus every pixel on the rings inside the chosen
    /// radius, so the next step cannot turn back into the swept area.
    #[default]
    SweptDisk,
}

impl fmt::Display for VisitMarking {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Point => write!(f, "point"),
            Self::SweptDisk => write!(f, "swept-disk"),
        }
    }
}

impl FromStr for VisitMarking {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "point" => Ok(Self::Point),
            "swept-disk" | "swept_disk" | "disk" => Ok(Self::SweptDisk),
            _ => Err(format!("Unknown visit marking: {}", s)),
        }
    }
}

/// Tracer behaviour knobs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TracerOptions {
    pub policy: TraversalPolicy,
    pub visit_marking: VisitMarking,
    /// Stop a single trace after this many nodes.
    pub max_nodes: Option<usize>,
}

#[derive(Debug, Clone, Copy)]
struct Pending {
    point: PixelCoordinate,
    parent: Option<usize>,
}

enum Frontier {
    Stack(Vec<Pending>),
    Queue(VecDeque<Pending>),
}

impl Frontier {
    fn new(policy: TraversalPolicy) -> Self {
        match policy {
            TraversalPolicy::DepthFirst => Self::Stack(Vec::new()),
            TraversalPolicy::BreadthFirst => Self::Queue(VecDeque::new()),
        }
    }

    /// Queue `items` so they are expanded in the given order.
    fn push_all(&mut self, items: Vec<Pending>) {
        match self {
            Self::Stack(stack) => stack.extend(items.into_iter().rev()),
            Self::Queue(queue) => queue.extend(items),
        }
    }

    fn len(&self) -> usize {
        match self {
            Self::Stack(stack) => stack.len(),
            Self::Queue(queue) => queue.len(),
        }
    }

    fn pop(&mut self) -> Option<Pending> {
        match self {
            Self::Stack(stack) => stack.pop(),
            Self::Queue(queue) => queue.pop_front(),
        }
    }
}

/// One owner of a visited set, tracing one or more seeds against it.
#[derive(Debug)]
pub struct TraceSession<'a> {
    stepper: ContourStepper<'a>,
    options: TracerOptions,
    visited: VisitedSet,
}

impl<'a> TraceSession<'a> {
    pub fn new(edges: &'a EdgeMap, table: &'a CircleOffsetTable, options: TracerOptions) -> Self {
        Self {
            stepper: ContourStepper::new(edges, table),
            options,
            visited: VisitedSet::for_edge_map(edges),
        }
    }

    pub fn options(&self) -> &TracerOptions {
        &self.options
    }

    pub fn visited(&self) -> &VisitedSet {
        &self.visited
    }

    pub fn into_visited(self) -> VisitedSet {
        self.visited
    }

    /// Trace the contour reachable from `seed`.
    ///
    /// A seed that is not an edge pixel yields a single-node contour. A seed
    /// outside the edge map is rejected. A seed this session already visited
    /// yields an empty contour.
    ///
    /// When `max_nodes` stops the trace, candidates still waiting in the
    /// worklist stay claimed in the visited set without being recorded, so
    /// a later [`trace_remaining`](Self::trace_remaining) never seeds from them.
    pub fn trace_from(&mut self, seed: PixelCoordinate) -> Result<TracedContour> {
        let edges = self.stepper.edges();
        if !edges.contains(seed) {
            return Err(TraceError::SeedOutOfBounds {
                x: seed.x,
                y: seed.y,
                width: edges.width(),
                height: edges.height(),
            }
            .into());
        }

        let mut contour = TracedContour::new(seed);
        if !self.visited.mark(seed) {
            debug!(%seed, "seed already visited in this session");
            return Ok(contour);
        }

        let mut frontier = Frontier::new(self.options.policy);
        frontier.push_all(vec![Pending {
            point: seed,
            parent: None,
        }]);

        while let Some(pending) = frontier.pop() {
            if let Some(limit) = self.options.max_nodes {
                if contour.len() >= limit {
                    warn!(
                        %seed,
                        limit,
                        unrecorded = frontier.len() + 1,
                        "trace stopped at node limit"
                    );
                    contour.mark_truncated();
                    break;
                }
            }

            let step = self.stepper.next_points(pending.point, &self.visited)?;
            let index = contour.push(pending.point, pending.parent, step.radius);

            if self.options.visit_marking == VisitMarking::SweptDisk {
                self.mark_swept(pending.point, step.radius)?;
            }

            let claimed: Vec<Pending> = step
                .candidates
                .into_iter()
                .filter(|&point| self.visited.mark(point))
                .map(|point| Pending {
                    point,
                    parent: Some(index),
                })
                .collect();
            frontier.push_all(claimed);
        }

        debug!(
            %seed,
            nodes = contour.len(),
            policy = %self.options.policy,
            visited = self.visited.count(),
            "trace finished"
        );
        Ok(contour)
    }

    /// Trace from every edge pixel not yet visited, in raster order.
    ///
    /// Contours are returned in the order their seeds were found; they are
    /// not joined or reordered.
    pub fn trace_remaining(&mut self) -> Result<Vec<TracedContour>> {
        let edges = self.stepper.edges();
        let mut contours = Vec::new();
        for seed in edges.edge_pixels() {
            if !self.visited.is_visited(seed) {
                contours.push(self.trace_from(seed)?);
            }
        }
        Ok(contours)
    }

    fn mark_swept(&mut self, center: PixelCoordinate, radius: usize) -> Result<()> {
        let table = self.stepper.table();
        for r in 0..radius {
            for &offset in table.ring(r)? {
                self.visited.mark(center.offset(offset));
            }
        }
        Ok(())
    }
}

/// Trace a single seed in a fresh session.
pub fn trace(
    edges: &EdgeMap,
    table: &CircleOffsetTable,
    seed: PixelCoordinate,
    options: TracerOptions,
) -> Result<TracedContour> {
    TraceSession::new(edges, table, options).trace_from(seed)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_policy_parsing() {
        assert_eq!("dfs".parse(), Ok(TraversalPolicy::DepthFirst));
        assert_eq!("Breadth-First".parse(), Ok(TraversalPolicy::BreadthFirst));
        assert!("spiral".parse::<TraversalPolicy>().is_err());
        assert_eq!(TraversalPolicy::BreadthFirst.to_string(), "breadth-first");
        assert_eq!("disk".parse(), Ok(VisitMarking::SweptDisk));
    }

    #[test]
    fn test_frontier_orders() {
        let items = |xs: &[i32]| {
            xs.iter()
                .map(|&x| Pending {
                    point: PixelCoordinate::new(x, 0),
                    parent: None,
                })
                .collect::<Vec<_>>()
        };

        let mut stack = Frontier::new(TraversalPolicy::DepthFirst);
        stack.push_all(items(&[1, 2, 3]));
        assert_eq!(stack.pop().map(|p| p.point.x), Some(1));
        stack.push_all(items(&[4]));
        assert_eq!(stack.pop().map(|p| p.point.x), Some(4));
        assert_eq!(stack.pop().map(|p| p.point.x), Some(2));

        let mut queue = Frontier::new(TraversalPolicy::BreadthFirst);
        queue.push_all(items(&[1, 2, 3]));
        assert_eq!(queue.pop().map(|p| p.point.x), Some(1));
        queue.push_all(items(&[4]));
        assert_eq!(queue.pop().map(|p| p.point.x), Some(2));
    }

    #[test]
    fn test_seed_outside_map_is_rejected() {
        let edges = EdgeMap::empty(3, 3).unwrap();
        let table = CircleOffsetTable::default();
        let err = trace(
            &edges,
            &table,
            PixelCoordinate::new(3, 0),
            TracerOptions::default(),
        )
        .unwrap_err();
        assert_eq!(err.to_string(), "Seed (3, 0) lies outside the 3x3 edge map");
    }
}

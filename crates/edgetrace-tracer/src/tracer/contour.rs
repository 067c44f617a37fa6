//! The path tree produced by one trace.

use edgetrace_core::PixelCoordinate;
use serde::Serialize;

/// A traversed point and the point it was reached from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TraceNode {
    pub point: PixelCoordinate,
    /// Index into [`TracedContour::nodes`] of the node that emitted this one.
    pub parent: Option<usize>,
    /// Ring radius the stepper chose at this point.
    pub radius: usize,
}

/// Points discovered from one seed, in discovery order.
///
/// Every node except the seed records its parent, so the contour is a tree:
/// a plain curve is a chain and each branching point adds a fork.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TracedContour {
    seed: PixelCoordinate,
    nodes: Vec<TraceNode>,
    truncated: bool,
}

impl TracedContour {
    pub(crate) fn new(seed: PixelCoordinate) -> Self {
        Self {
            seed,
            nodes: Vec::new(),
            truncated: false,
        }
    }

    pub(crate) fn push(
        &mut self,
        point: PixelCoordinate,
        parent: Option<usize>,
        radius: usize,
    ) -> usize {
        self.nodes.push(TraceNode {
            point,
            parent,
            radius,
        });
        self.nodes.len() - 1
    }

    pub(crate) fn mark_truncated(&mut self) {
        self.truncated = true;
    }

    pub fn seed(&self) -> PixelCoordinate {
        self.seed
    }

    pub fn nodes(&self) -> &[TraceNode] {
        &self.nodes
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Whether the trace stopped at its node limit rather than running dry.
    pub fn is_truncated(&self) -> bool {
        self.truncated
    }

    /// All points in discovery order.
    pub fn path(&self) -> Vec<PixelCoordinate> {
        self.nodes.iter().map(|n| n.point).collect()
    }

    /// Child indices of every node, in discovery order.
    pub fn children(&self) -> Vec<Vec<usize>> {
        let mut children = vec![Vec::new(); self.nodes.len()];
        for (i, node) in self.nodes.iter().enumerate() {
            if let Some(parent) = node.parent {
                children[parent].push(i);
            }
        }
        children
    }

    /// Points that spawned more than one child.
    pub fn branch_points(&self) -> Vec<PixelCoordinate> {
        self.children()
            .iter()
            .enumerate()
            .filter(|(_, kids)| kids.len() > 1)
            .map(|(i, _)| self.nodes[i].point)
            .collect()
    }

    /// Split the tree into polylines.
    ///
    /// A segment keeps following the first child of each node. Every other
    /// child starts a new segment whose first point is the branching point,
    /// so segments stay connected when drawn one after another.
    pub fn segments(&self) -> Vec<Vec<PixelCoordinate>> {
        if self.nodes.is_empty() {
            return Vec::new();
        }
        let children = self.children();
        let mut segments = Vec::new();
        let mut pending: Vec<(Option<usize>, usize)> = vec![(None, 0)];

        while let Some((branch_point, start)) = pending.pop() {
            let mut segment: Vec<PixelCoordinate> =
                branch_point.map(|i| self.nodes[i].point).into_iter().collect();
            let mut current = start;
            loop {
                segment.push(self.nodes[current].point);
                match children[current].split_first() {
                    None => break,
                    Some((&next, rest)) => {
                        pending.extend(rest.iter().rev().map(|&k| (Some(current), k)));
                        current = next;
                    }
                }
            }
            segments.push(segment);
        }

        segments
    }
}

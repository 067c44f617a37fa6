//! Splitting a ring sample into angular arcs.

use serde::Serialize;

/// Half-open run `[start, end)` of equal values within a ring sample.
///
/// `start` is negative for an arc that wraps through index 0: the arc then
/// covers `[start + n, n)` followed by `[0, end)` for a ring of length `n`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct RingArc {
    pub start: isize,
    pub end: isize,
    pub value: bool,
}

impl RingArc {
    pub const fn new(start: isize, end: isize, value: bool) -> Self {
        Self { start, end, value }
    }

    /// Number of ring entries covered.
    pub fn len(&self) -> usize {
        (self.end - self.start).max(0) as usize
    }

    pub fn is_empty(&self) -> bool {
        self.end <= self.start
    }

    /// Angular midpoint `⌊(start + end) / 2⌋`, possibly negative.
    pub fn midpoint(&self) -> isize {
        (self.start + self.end).div_euclid(2)
    }

    /// Midpoint folded into `[0, circumference)`.
    pub fn midpoint_index(&self, circumference: usize) -> usize {
        self.midpoint().rem_euclid(circumference as isize) as usize
    }

    /// Whether ring index `index` (in `[0, circumference)`) lies on this arc.
    pub fn contains(&self, index: usize, circumference: usize) -> bool {
        let i = index as isize;
        let n = circumference as isize;
        (self.start..self.end).contains(&i) || (self.start..self.end).contains(&(i - n))
    }
}

/// Split `sample` into maximal runs of equal values.
///
/// When the first and last runs share a value they are one arc crossing
/// index 0 and are merged: the first arc's start moves to
/// `last.start - n` and the last arc is dropped. A uniform sample yields a
/// single arc `[0, n)`; an empty sample yields no arcs.
pub fn extract_arcs(sample: &[bool]) -> Vec<RingArc> {
    let Some(&first) = sample.first() else {
        return Vec::new();
    };
    let n = sample.len() as isize;

    let mut arcs = Vec::new();
    let mut start = 0isize;
    let mut value = first;
    for (i, &v) in sample.iter().enumerate().skip(1) {
        if v != value {
            arcs.push(RingArc::new(start, i as isize, value));
            start = i as isize;
            value = v;
        }
    }
    arcs.push(RingArc::new(start, n, value));

    if arcs.len() > 1 && arcs[0].value == arcs[arcs.len() - 1].value {
        if let Some(last) = arcs.pop() {
            arcs[0].start = last.start - n;
        }
    }

    arcs
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_uniform_sample_is_one_arc() {
        assert_eq!(extract_arcs(&[true; 8]), vec![RingArc::new(0, 8, true)]);
        assert_eq!(extract_arcs(&[false; 12]), vec![RingArc::new(0, 12, false)]);
        assert_eq!(extract_arcs(&[true]), vec![RingArc::new(0, 1, true)]);
    }

    #[test]
    fn test_empty_sample() {
        assert!(extract_arcs(&[]).is_empty());
    }

    #[test]
    fn test_wraparound_merge() {
        let sample = [true, true, false, false, false, true];
        assert_eq!(
            extract_arcs(&sample),
            vec![RingArc::new(-1, 2, true), RingArc::new(2, 5, false)]
        );
    }

    #[test]
    fn test_alternating_even_length() {
        let sample: Vec<bool> = (0..10).map(|i| i % 2 == 0).collect();
        let arcs = extract_arcs(&sample);
        assert_eq!(arcs.len(), 10);
        assert!(arcs.iter().all(|a| a.len() == 1));
        assert_eq!(arcs[3], RingArc::new(3, 4, false));
    }

    #[test]
    fn test_midpoint_floors_negative_sums() {
        let arc = RingArc::new(-3, 2, true);
        assert_eq!(arc.midpoint(), -1);
        assert_eq!(arc.midpoint_index(8), 7);
        assert_eq!(RingArc::new(1, 4, true).midpoint(), 2);
    }

    #[test]
    fn test_contains_wrapped_index() {
        let arc = RingArc::new(-2, 1, true);
        assert!(arc.contains(0, 8));
        assert!(arc.contains(6, 8));
        assert!(arc.contains(7, 8));
        assert!(!arc.contains(1, 8));
        assert!(!arc.contains(5, 8));
    }
}

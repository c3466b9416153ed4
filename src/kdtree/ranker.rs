use std::ops::ControlFlow;

use crate::kdtree::search::Visitor;

/// An element found by a nearest neighbor search.
#[derive(Debug, PartialEq)]
pub struct Neighbor<'a, T> {
    /// The element itself
    pub element: &'a T,
    /// Squared euclidean distance from the query point to the element
    pub dist_sq: f64,
}

// Derived impls would require `T: Clone`
impl<T> Clone for Neighbor<'_, T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for Neighbor<'_, T> {}

impl<T> Neighbor<'_, T> {
    /// Euclidean distance from the query point to the element.
    #[inline]
    pub fn distance(&self) -> f64 {
        self.dist_sq.sqrt()
    }
}

/// A visitor keeping the `max_count` closest candidates, sorted by ascending distance.
///
/// Candidates tied on distance keep the order in which they were visited.
#[derive(Debug)]
pub(crate) struct BoundedRanker<'a, 'r, T> {
    results: &'r mut Vec<Neighbor<'a, T>>,
    max_count: usize,
}

impl<'a, 'r, T> BoundedRanker<'a, 'r, T> {
    /// Wrap `results`, clearing anything left over from a previous search.
    pub(crate) fn new(results: &'r mut Vec<Neighbor<'a, T>>, max_count: usize) -> Self {
        results.clear();
        Self { results, max_count }
    }

    #[inline]
    fn is_full(&self) -> bool {
        self.results.len() >= self.max_count
    }
}

impl<'a, T> Visitor<'a, T> for BoundedRanker<'a, '_, T> {
    fn visit(&mut self, element: &'a T, dist_sq: f64) -> ControlFlow<()> {
        if self.max_count == 0 {
            return ControlFlow::Break(());
        }

        // slot right after the last entry that is not farther than the candidate
        let pos = self
            .results
            .iter()
            .rposition(|n| n.dist_sq <= dist_sq)
            .map_or(0, |i| i + 1);
        if pos >= self.max_count {
            return ControlFlow::Continue(());
        }

        if self.is_full() {
            self.results.pop();
        }
        self.results.insert(pos, Neighbor { element, dist_sq });
        ControlFlow::Continue(())
    }

    fn worst_distance(&self) -> Option<f64> {
        if !self.is_full() {
            return Some(f64::INFINITY);
        }
        Some(self.results.last().map_or(f64::NEG_INFINITY, |n| n.dist_sq))
    }
}

use std::ops::ControlFlow;

use geo_traits::CoordTrait;

use crate::error::Result;
use crate::kdtree::ranker::{BoundedRanker, Neighbor};
use crate::kdtree::search::{search_tree, widen_query, SearchBounds, Visitor};
use crate::kdtree::traversal::Node;
use crate::kdtree::{KDTreeElement, KDTreeRef, OwnedKDTree};
use crate::r#type::IndexableNum;

/// A trait for searching and accessing data out of a KDTree.
pub trait KDTreeIndex<N: IndexableNum, T: KDTreeElement<N>>: Sized {
    /// The elements of this tree, in tree order
    fn elements(&self) -> &[T];

    /// The number of axes this tree splits over
    fn num_dims(&self) -> usize;

    /// The number of items in this KDTree
    fn num_items(&self) -> usize {
        self.elements().len()
    }

    /// Visit every element matching `bounds` with `visitor`.
    ///
    /// Elements are visited depth first, always descending into the side of each split that
    /// contains the query before the other one. Whole subtrees are skipped when the splitting
    /// hyperplane is already farther away than the radius, or than the visitor's
    /// [worst distance][Visitor::worst_distance].
    ///
    /// The tree itself knows nothing about a result count: if `bounds` has one, the visitor is
    /// responsible for enforcing it and must report a worst distance.
    ///
    /// - query: one coordinate per tree dimension
    /// - bounds: search radius and/or maximum result count
    /// - visitor: receives each candidate with its squared distance
    fn search<'a, V>(&'a self, query: &[N], bounds: &SearchBounds, visitor: &mut V) -> Result<()>
    where
        T: 'a,
        V: Visitor<'a, T> + ?Sized,
    {
        let query = widen_query(query, self.num_dims())?;
        search_tree(self.root(), &query, bounds, visitor)
    }

    /// Search the index for the items closest to a query point.
    ///
    /// Returns at most `bounds.max_count()` items within `bounds.radius_bound()` of the query,
    /// sorted by ascending distance.
    fn search_sorted(&self, query: &[N], bounds: SearchBounds) -> Result<Vec<Neighbor<'_, T>>> {
        let mut results = Vec::new();
        self.search_sorted_into(query, bounds, &mut results)?;
        Ok(results)
    }

    /// Like [`search_sorted`][Self::search_sorted], but reuses the allocation of `results`.
    ///
    /// `results` is cleared before the search.
    fn search_sorted_into<'a>(
        &'a self,
        query: &[N],
        bounds: SearchBounds,
        results: &mut Vec<Neighbor<'a, T>>,
    ) -> Result<()> {
        let query = widen_query(query, self.num_dims())?;
        let max_count = bounds.finite_max_count().unwrap_or(usize::MAX);
        let mut ranker = BoundedRanker::new(results, max_count);
        search_tree(self.root(), &query, &bounds, &mut ranker)?;
        tracing::trace!(num_results = results.len(), "sorted search finished");
        Ok(())
    }

    /// Search the index for the items closest to a coordinate.
    ///
    /// The coordinate must have one dimension per tree axis.
    fn search_sorted_coord(
        &self,
        coord: &impl CoordTrait<T = N>,
        bounds: SearchBounds,
    ) -> Result<Vec<Neighbor<'_, T>>> {
        let query: Vec<N> = (0..coord.dim().size())
            .map_while(|n| coord.nth(n))
            .collect();
        self.search_sorted(&query, bounds)
    }

    /// The single item closest to a query point, or `None` if the tree is empty.
    fn nearest(&self, query: &[N]) -> Result<Option<Neighbor<'_, T>>> {
        Ok(self
            .search_sorted(query, SearchBounds::count(1))?
            .into_iter()
            .next())
    }

    /// Search the index for items within a given radius.
    ///
    /// - query: one coordinate per tree dimension
    /// - r: radius
    ///
    /// Returns found items in traversal order.
    fn within(&self, query: &[N], r: f64) -> Result<Vec<&T>> {
        let mut collect = Collect(Vec::new());
        self.search(query, &SearchBounds::radius(r), &mut collect)?;
        Ok(collect.0)
    }

    /// Access the root node of the KDTree for manual traversal.
    fn root(&self) -> Node<'_, N, T> {
        Node::from_root(self.elements(), self.num_dims())
    }
}

struct Collect<'a, T>(Vec<&'a T>);

impl<'a, T> Visitor<'a, T> for Collect<'a, T> {
    #[inline]
    fn visit(&mut self, element: &'a T, _dist_sq: f64) -> ControlFlow<()> {
        self.0.push(element);
        ControlFlow::Continue(())
    }
}

impl<N: IndexableNum, T: KDTreeElement<N>> KDTreeIndex<N, T> for OwnedKDTree<N, T> {
    fn elements(&self) -> &[T] {
        &self.elements
    }

    fn num_dims(&self) -> usize {
        self.num_dims
    }
}

impl<N: IndexableNum, T: KDTreeElement<N>> KDTreeIndex<N, T> for KDTreeRef<'_, N, T> {
    fn elements(&self) -> &[T] {
        self.elements
    }

    fn num_dims(&self) -> usize {
        self.num_dims
    }
}

//! Branch-and-bound nearest neighbor traversal.

use std::ops::ControlFlow;

use tinyvec::TinyVec;

use crate::error::{KDTreeError, Result};
use crate::kdtree::traversal::Node;
use crate::kdtree::KDTreeElement;
use crate::r#type::IndexableNum;

/// Limits on a nearest neighbor search.
///
/// At least one of the two bounds must be finite; a search that would return every element is
/// rejected with [`KDTreeError::UnboundedSearch`]. An infinite radius and a count of `usize::MAX`
/// both count as no bound.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct SearchBounds {
    radius: Option<f64>,
    max_count: Option<usize>,
}

impl SearchBounds {
    /// Bound the search by both a radius and a maximum number of results.
    pub fn new(radius: f64, max_count: usize) -> Self {
        Self {
            radius: Some(radius),
            max_count: Some(max_count),
        }
    }

    /// Only accept elements within `radius` of the query.
    pub fn radius(radius: f64) -> Self {
        Self::default().with_radius(radius)
    }

    /// Only accept the `max_count` closest elements.
    pub fn count(max_count: usize) -> Self {
        Self::default().with_max_count(max_count)
    }

    /// Set the radius bound. The radius is linear, not squared.
    pub fn with_radius(mut self, radius: f64) -> Self {
        self.radius = Some(radius);
        self
    }

    /// Set the result count bound.
    pub fn with_max_count(mut self, max_count: usize) -> Self {
        self.max_count = Some(max_count);
        self
    }

    /// The linear radius bound, if any.
    pub fn radius_bound(&self) -> Option<f64> {
        self.radius
    }

    /// The result count bound, if any.
    pub fn max_count(&self) -> Option<usize> {
        self.max_count
    }

    /// The radius bound, treating an infinite radius as no bound.
    fn finite_radius(&self) -> Option<f64> {
        self.radius.filter(|r| *r != f64::INFINITY)
    }

    /// The count bound, treating `usize::MAX` as no bound.
    pub(crate) fn finite_max_count(&self) -> Option<usize> {
        self.max_count.filter(|k| *k != usize::MAX)
    }

    /// Validate these bounds, returning the squared radius.
    pub(crate) fn squared_radius(&self) -> Result<f64> {
        if let Some(r) = self.radius {
            if r.is_nan() || r < 0.0 {
                return Err(KDTreeError::InvalidRadius(r));
            }
        }
        if self.finite_radius().is_none() && self.finite_max_count().is_none() {
            tracing::debug!("rejecting search without radius or count bound");
            return Err(KDTreeError::UnboundedSearch);
        }
        Ok(self.finite_radius().map_or(f64::INFINITY, |r| r * r))
    }
}

/// Receives candidates found by a nearest neighbor search.
///
/// Closures taking `(&T, f64)` and returning [`ControlFlow`] implement this trait, which is enough
/// for searches bounded only by radius. A visitor enforcing a result count must also report the
/// worst distance it still accepts, so that the search can skip subtrees that cannot improve on
/// it.
pub trait Visitor<'a, T> {
    /// Called once for each element within the search radius, with its squared distance to the
    /// query. Returning [`ControlFlow::Break`] stops the whole search.
    fn visit(&mut self, element: &'a T, dist_sq: f64) -> ControlFlow<()>;

    /// The largest squared distance this visitor would still accept, or `None` if it does not
    /// track one.
    ///
    /// Return `Some(f64::INFINITY)` while any candidate is still accepted.
    fn worst_distance(&self) -> Option<f64> {
        None
    }
}

impl<'a, T: 'a, F> Visitor<'a, T> for F
where
    F: FnMut(&'a T, f64) -> ControlFlow<()>,
{
    #[inline]
    fn visit(&mut self, element: &'a T, dist_sq: f64) -> ControlFlow<()> {
        self(element, dist_sq)
    }
}

/// Query coordinates widened to `f64`.
///
/// Use TinyVec to avoid heap allocations
pub(crate) type Query = TinyVec<[f64; 8]>;

pub(crate) fn widen_query<N: IndexableNum>(query: &[N], num_dims: usize) -> Result<Query> {
    if query.len() != num_dims {
        tracing::debug!(expected = num_dims, actual = query.len(), "query dimension mismatch");
        return Err(KDTreeError::QueryDimensionMismatch {
            expected: num_dims,
            actual: query.len(),
        });
    }
    Ok(query.iter().map(|c| c.as_f64()).collect())
}

/// Validate the search parameters and run the traversal from `root`.
pub(crate) fn search_tree<'a, N, T, V>(
    root: Node<'a, N, T>,
    query: &[f64],
    bounds: &SearchBounds,
    visitor: &mut V,
) -> Result<()>
where
    N: IndexableNum,
    T: KDTreeElement<N>,
    V: Visitor<'a, T> + ?Sized,
{
    let radius_sq = bounds.squared_radius()?;
    if bounds.finite_max_count().is_some() && visitor.worst_distance().is_none() {
        tracing::debug!("rejecting count-bounded search with a visitor lacking a cutoff");
        return Err(KDTreeError::MissingCutoff);
    }

    // stopping early is not an error
    let _ = search_node(root, query, radius_sq, visitor);
    Ok(())
}

/// Squared euclidean distance between the query and an element.
#[inline]
pub(crate) fn sq_dist<N: IndexableNum, T: KDTreeElement<N>>(query: &[f64], element: &T) -> f64 {
    query
        .iter()
        .enumerate()
        .map(|(dim, q)| {
            let d = q - element.coord(dim).as_f64();
            d * d
        })
        .sum()
}

fn search_node<'a, N, T, V>(
    node: Node<'a, N, T>,
    query: &[f64],
    radius_sq: f64,
    visitor: &mut V,
) -> ControlFlow<()>
where
    N: IndexableNum,
    T: KDTreeElement<N>,
    V: Visitor<'a, T> + ?Sized,
{
    let Some(element) = node.element() else {
        return ControlFlow::Continue(());
    };

    let dist_sq = sq_dist(query, element);
    if dist_sq <= radius_sq {
        visitor.visit(element, dist_sq)?;
    }

    if node.is_leaf() {
        return ControlFlow::Continue(());
    }

    let axis = node.axis();
    let split = element.coord(axis).as_f64();

    // the query lies left of the split
    let to_left = query[axis] < split;
    let (near, far) = if to_left {
        (node.left_child(), node.right_child())
    } else {
        (node.right_child(), node.left_child())
    };

    search_node(near, query, radius_sq, visitor)?;

    // the far side can only hold something closer than the splitting hyperplane itself
    let plane_dist = query[axis] - split;
    let plane_dist_sq = plane_dist * plane_dist;
    if plane_dist_sq <= radius_sq && visitor.worst_distance().map_or(true, |w| plane_dist_sq <= w)
    {
        search_node(far, query, radius_sq, visitor)?;
    }

    ControlFlow::Continue(())
}

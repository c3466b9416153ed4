use crate::r#type::IndexableNum;

/// A record that can be stored in a KDTree.
///
/// The tree reorders a slice of these in place, so anything a caller needs to correlate results
/// with their own data must travel inside the element. [`index`][Self::index] is that slot: the
/// tree never reads it, but it stays attached to the element through every swap.
pub trait KDTreeElement<N: IndexableNum> {
    /// The caller-assigned identity of this element.
    fn index(&self) -> usize;

    /// The coordinate of this element along axis `dim`.
    ///
    /// Called with every `dim` in `0..num_dims` for the dimension count the tree was built with.
    fn coord(&self, dim: usize) -> N;
}

impl<N: IndexableNum, T: KDTreeElement<N>> KDTreeElement<N> for &T {
    #[inline]
    fn index(&self) -> usize {
        (**self).index()
    }

    #[inline]
    fn coord(&self, dim: usize) -> N {
        (**self).coord(dim)
    }
}

/// A point with `D` coordinates and an identity index.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IndexedPoint<N: IndexableNum, const D: usize> {
    /// The identity of this point, typically its position before the tree was built.
    pub index: usize,
    /// Coordinates of this point
    pub coords: [N; D],
}

impl<N: IndexableNum, const D: usize> IndexedPoint<N, D> {
    /// Create a new point.
    pub fn new(index: usize, coords: [N; D]) -> Self {
        Self { index, coords }
    }

    /// Create points from a list of coordinates, using each one's position in the list as its
    /// index.
    pub fn from_coords(coords: impl IntoIterator<Item = [N; D]>) -> Vec<Self> {
        coords
            .into_iter()
            .enumerate()
            .map(|(index, coords)| Self { index, coords })
            .collect()
    }
}

impl<N: IndexableNum, const D: usize> KDTreeElement<N> for IndexedPoint<N, D> {
    #[inline]
    fn index(&self) -> usize {
        self.index
    }

    #[inline]
    fn coord(&self, dim: usize) -> N {
        self.coords[dim]
    }
}

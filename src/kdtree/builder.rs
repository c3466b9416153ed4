use std::marker::PhantomData;

use crate::error::{KDTreeError, Result};
use crate::kdtree::{KDTreeElement, OwnedKDTree};
use crate::r#type::IndexableNum;

/// A builder to create an [`OwnedKDTree`].
#[derive(Debug, Clone)]
pub struct KDTreeBuilder<N: IndexableNum, T: KDTreeElement<N>> {
    elements: Vec<T>,
    num_dims: usize,
    phantom: PhantomData<N>,
}

impl<N: IndexableNum, T: KDTreeElement<N>> KDTreeBuilder<N, T> {
    /// Create a new builder for a tree splitting over `num_dims` axes.
    pub fn new(num_dims: usize) -> Result<Self> {
        Self::with_capacity(num_dims, 0)
    }

    /// Create a new builder with room for `capacity` elements.
    pub fn with_capacity(num_dims: usize, capacity: usize) -> Result<Self> {
        validate_num_dims(num_dims)?;
        Ok(Self {
            elements: Vec::with_capacity(capacity),
            num_dims,
            phantom: PhantomData,
        })
    }

    /// Add an element to the index.
    ///
    /// Returns the insertion position of the element. This position does not survive
    /// [`finish`][Self::finish]; use [`KDTreeElement::index`] to correlate results.
    pub fn add(&mut self, element: T) -> usize {
        self.elements.push(element);
        self.elements.len() - 1
    }

    /// The number of elements added so far.
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    /// Returns `true` if no elements were added yet.
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Consume this builder, performing the k-d sort and generating a KDTree ready for queries.
    pub fn finish(mut self) -> OwnedKDTree<N, T> {
        sort(&mut self.elements, self.num_dims, 0);

        OwnedKDTree {
            elements: self.elements,
            num_dims: self.num_dims,
            phantom: PhantomData,
        }
    }
}

impl<N: IndexableNum, T: KDTreeElement<N>> Extend<T> for KDTreeBuilder<N, T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        self.elements.extend(iter);
    }
}

/// Reorder `elements` in place into an implicit k-d tree over `num_dims` axes.
///
/// The root is the element at `elements.len() / 2`, its left subtree is everything before it and
/// its right subtree everything after it, recursively, with the split axis cycling through
/// `0..num_dims` by depth.
#[tracing::instrument(level = "debug", skip(elements), fields(num_items = elements.len()))]
pub fn build_in_place<N: IndexableNum, T: KDTreeElement<N>>(
    elements: &mut [T],
    num_dims: usize,
) -> Result<()> {
    validate_num_dims(num_dims)?;
    sort(elements, num_dims, 0);
    Ok(())
}

pub(crate) fn validate_num_dims(num_dims: usize) -> Result<()> {
    if num_dims == 0 {
        tracing::debug!("rejecting tree with zero dimensions");
        return Err(KDTreeError::InvalidDimensions(num_dims));
    }
    Ok(())
}

fn sort<N: IndexableNum, T: KDTreeElement<N>>(elements: &mut [T], num_dims: usize, depth: usize) {
    if elements.len() <= 1 {
        return;
    }

    // middle index
    let m = elements.len() >> 1;

    // select around the middle index so that the halves lie on either side of it along the axis
    // for this depth
    select(elements, m, depth % num_dims);

    // recursively kd-sort first half and second half on the next axis
    let (left, right) = elements.split_at_mut(m);
    sort(left, num_dims, depth + 1);
    sort(&mut right[1..], num_dims, depth + 1);
}

/// Median-of-three quickselect: reorder `elements` so that the `k`-th item is the one a full sort
/// on `axis` would put there, with `[..k]` no greater and `[k + 1..]` no smaller than it.
///
/// The pivot is always the middle of the active window, so the resulting layout is deterministic.
#[inline]
pub(crate) fn select<N: IndexableNum, T: KDTreeElement<N>>(
    elements: &mut [T],
    k: usize,
    axis: usize,
) {
    if elements.is_empty() {
        return;
    }
    debug_assert!(k < elements.len());

    let mut low = 0;
    let mut high = elements.len() - 1;

    loop {
        if high <= low + 1 {
            if high == low + 1 && elements[high].coord(axis) < elements[low].coord(axis) {
                elements.swap(low, high);
            }
            return;
        }

        let middle = (low + high) >> 1;
        elements.swap(middle, low + 1);

        // order low, low + 1 and high so the pivot sits at low + 1, with both ends acting as
        // sentinels for the scans below
        if elements[low].coord(axis) > elements[high].coord(axis) {
            elements.swap(low, high);
        }
        if elements[low + 1].coord(axis) > elements[high].coord(axis) {
            elements.swap(low + 1, high);
        }
        if elements[low].coord(axis) > elements[low + 1].coord(axis) {
            elements.swap(low, low + 1);
        }

        let pivot = elements[low + 1].coord(axis);
        let mut i = low + 1;
        let mut j = high;

        loop {
            i += 1;
            while elements[i].coord(axis) < pivot {
                i += 1;
            }
            j -= 1;
            while elements[j].coord(axis) > pivot {
                j -= 1;
            }
            if j < i {
                break;
            }
            elements.swap(i, j);
        }

        // the pivot itself was never moved by the scans
        elements.swap(low + 1, j);

        if j >= k {
            high = j - 1;
        }
        if j <= k {
            low = i;
        }
    }
}

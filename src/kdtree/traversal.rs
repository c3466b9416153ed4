//! Utilities to traverse the KDTree structure.

use std::marker::PhantomData;

use crate::kdtree::KDTreeElement;
use crate::r#type::IndexableNum;

/// A subtree of a KDTree.
///
/// A node is a view onto a contiguous range of the tree's elements. Its own element sits in the
/// middle of that range, and its children are the ranges on either side.
#[derive(Debug)]
pub struct Node<'a, N: IndexableNum, T: KDTreeElement<N>> {
    /// The elements making up this subtree
    elements: &'a [T],

    /// Offset of `elements` within the whole tree
    offset: usize,

    depth: usize,
    num_dims: usize,

    phantom: PhantomData<N>,
}

// Derived impls would require `T: Clone`
impl<N: IndexableNum, T: KDTreeElement<N>> Clone for Node<'_, N, T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<N: IndexableNum, T: KDTreeElement<N>> Copy for Node<'_, N, T> {}

impl<'a, N: IndexableNum, T: KDTreeElement<N>> Node<'a, N, T> {
    pub(crate) fn from_root(elements: &'a [T], num_dims: usize) -> Self {
        debug_assert!(num_dims > 0);
        Self {
            elements,
            offset: 0,
            depth: 0,
            num_dims,
            phantom: PhantomData,
        }
    }

    /// Note: this is the index into this node's range, not into the whole tree.
    #[inline]
    pub(crate) fn middle_index(&self) -> usize {
        self.elements.len() >> 1
    }

    /// The element stored at this node, or `None` for an empty subtree.
    #[inline]
    pub fn element(&self) -> Option<&'a T> {
        self.elements.get(self.middle_index())
    }

    /// The position of this node's element within the whole tree.
    #[inline]
    pub fn position(&self) -> usize {
        self.offset + self.middle_index()
    }

    /// All elements in this subtree, including this node's own.
    #[inline]
    pub fn elements(&self) -> &'a [T] {
        self.elements
    }

    /// The axis that the children of this node are split over.
    #[inline]
    pub fn axis(&self) -> usize {
        self.depth % self.num_dims
    }

    /// Distance from the root, which has depth 0.
    #[inline]
    pub fn depth(&self) -> usize {
        self.depth
    }

    /// The child node representing the "left" half.
    ///
    /// Note that this **does not include** the element of the current node.
    pub fn left_child(&self) -> Node<'a, N, T> {
        let m = self.middle_index();
        Self {
            elements: &self.elements[..m],
            offset: self.offset,
            depth: self.depth + 1,
            num_dims: self.num_dims,
            phantom: PhantomData,
        }
    }

    /// The child node representing the "right" half.
    ///
    /// Note that this **does not include** the element of the current node.
    pub fn right_child(&self) -> Node<'a, N, T> {
        let m = self.middle_index();
        let start = (m + 1).min(self.elements.len());
        Self {
            elements: &self.elements[start..],
            offset: self.offset + start,
            depth: self.depth + 1,
            num_dims: self.num_dims,
            phantom: PhantomData,
        }
    }

    /// The number of elements in this subtree.
    #[inline]
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    /// Returns `true` if this subtree holds no elements.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Returns `true` if this is a leaf node without children.
    #[inline]
    pub fn is_leaf(&self) -> bool {
        self.elements.len() <= 1
    }

    /// Returns `true` if this is an intermediate node with children.
    #[inline]
    pub fn is_parent(&self) -> bool {
        !self.is_leaf()
    }
}

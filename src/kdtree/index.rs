use std::cmp::Ordering;
use std::marker::PhantomData;

use crate::error::{KDTreeError, Result};
use crate::kdtree::builder::{build_in_place, validate_num_dims};
use crate::kdtree::traversal::Node;
use crate::kdtree::KDTreeElement;
use crate::r#type::IndexableNum;

/// An owned KDTree.
///
/// Usually this will be created from scratch via [`KDTreeBuilder`][crate::kdtree::KDTreeBuilder].
#[derive(Debug, Clone, PartialEq)]
pub struct OwnedKDTree<N: IndexableNum, T: KDTreeElement<N>> {
    pub(crate) elements: Vec<T>,
    pub(crate) num_dims: usize,
    pub(crate) phantom: PhantomData<N>,
}

impl<N: IndexableNum, T: KDTreeElement<N>> OwnedKDTree<N, T> {
    /// Consume this tree, returning its elements in tree order.
    pub fn into_inner(self) -> Vec<T> {
        self.elements
    }

    /// A borrowed [`KDTreeRef`] view onto this tree.
    ///
    /// This inherent method takes precedence over [`AsRef::as_ref`]; to borrow the elements as a
    /// slice, use [`KDTreeIndex::elements`][crate::kdtree::KDTreeIndex::elements] or
    /// `AsRef::<[T]>::as_ref(&tree)`.
    pub fn as_ref(&self) -> KDTreeRef<'_, N, T> {
        KDTreeRef {
            elements: &self.elements,
            num_dims: self.num_dims,
            phantom: PhantomData,
        }
    }
}

impl<N: IndexableNum, T: KDTreeElement<N>> AsRef<[T]> for OwnedKDTree<N, T> {
    fn as_ref(&self) -> &[T] {
        &self.elements
    }
}

/// A reference on an external slice laid out as a KDTree.
///
/// The view holds a shared borrow of the slice, so the elements cannot be reordered while it is
/// alive.
#[derive(Debug)]
pub struct KDTreeRef<'a, N: IndexableNum, T: KDTreeElement<N>> {
    pub(crate) elements: &'a [T],
    pub(crate) num_dims: usize,
    pub(crate) phantom: PhantomData<N>,
}

// Derived impls would require `T: Clone`
impl<N: IndexableNum, T: KDTreeElement<N>> Clone for KDTreeRef<'_, N, T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<N: IndexableNum, T: KDTreeElement<N>> Copy for KDTreeRef<'_, N, T> {}

impl<'a, N: IndexableNum, T: KDTreeElement<N>> KDTreeRef<'a, N, T> {
    /// Reorder `elements` into a KDTree over `num_dims` axes and return a view onto it.
    pub fn build(elements: &'a mut [T], num_dims: usize) -> Result<Self> {
        build_in_place(elements, num_dims)?;
        Ok(Self {
            elements,
            num_dims,
            phantom: PhantomData,
        })
    }

    /// Wrap a slice that was already built with [`build_in_place`] and the same `num_dims`.
    ///
    /// The layout is trusted as is. Searching a slice that is not a valid tree returns wrong
    /// results, but is otherwise safe.
    pub fn new(elements: &'a [T], num_dims: usize) -> Result<Self> {
        validate_num_dims(num_dims)?;
        Ok(Self {
            elements,
            num_dims,
            phantom: PhantomData,
        })
    }

    /// Like [`new`][Self::new], but verifies the layout with [`check`] first.
    pub fn try_new_checked(elements: &'a [T], num_dims: usize) -> Result<Self> {
        check(elements, num_dims)?;
        Self::new(elements, num_dims)
    }
}

/// Verify that `elements` is a valid KDTree over `num_dims` axes.
///
/// Walks every subtree and checks that all elements before its middle are no greater, and all
/// elements after it no smaller, than the middle element along the subtree's axis. Elements whose
/// coordinates cannot be ordered (NaN) are reported as violations.
///
/// This visits every element once per tree level, so it is meant for tests and diagnostics.
#[tracing::instrument(level = "debug", skip(elements), fields(num_items = elements.len()))]
pub fn check<N: IndexableNum, T: KDTreeElement<N>>(elements: &[T], num_dims: usize) -> Result<()> {
    validate_num_dims(num_dims)?;
    check_node(Node::from_root(elements, num_dims))
}

fn check_node<N: IndexableNum, T: KDTreeElement<N>>(node: Node<'_, N, T>) -> Result<()> {
    if node.is_leaf() {
        return Ok(());
    }
    let Some(element) = node.element() else {
        return Ok(());
    };

    let axis = node.axis();
    let split = element.coord(axis);
    let m = node.middle_index();
    let start = node.position() - m;

    for (i, other) in node.elements().iter().enumerate() {
        let ordered = match i.cmp(&m) {
            Ordering::Less => other.coord(axis) <= split,
            Ordering::Greater => other.coord(axis) >= split,
            Ordering::Equal => true,
        };
        if !ordered {
            tracing::debug!(depth = node.depth(), index = start + i, axis, "bad tree");
            return Err(KDTreeError::CorruptedTree {
                depth: node.depth(),
                index: start + i,
                axis,
            });
        }
    }

    check_node(node.left_child())?;
    check_node(node.right_child())
}

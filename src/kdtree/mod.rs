//! An implicit, in-place K-D Tree over caller-supplied elements.
//!
//! Building a tree reorders a slice of elements so that each subrange's middle element splits
//! the rest of the subrange along one axis, cycling through the axes by depth. The tree has no
//! storage of its own beyond that order.

#![warn(missing_docs)]

mod builder;
mod element;
mod index;
mod ranker;
mod search;
mod r#trait;
mod traversal;

pub use builder::{build_in_place, KDTreeBuilder};
pub use element::{IndexedPoint, KDTreeElement};
pub use index::{check, KDTreeRef, OwnedKDTree};
pub use ranker::Neighbor;
pub use r#trait::KDTreeIndex;
pub use search::{SearchBounds, Visitor};
pub use traversal::Node;

use thiserror::Error;

/// Enum with all errors in this crate.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum KDTreeError {
    /// A tree must split over at least one axis.
    #[error("Number of dimensions must be at least 1, got {0}.")]
    InvalidDimensions(usize),

    /// Neither a radius nor a maximum result count was given.
    #[error("Either a radius or a maximum result count must be specified.")]
    UnboundedSearch,

    /// The search radius is negative or NaN.
    #[error("Search radius must be a non-negative number, got {0}.")]
    InvalidRadius(f64),

    /// A maximum result count was given, but the visitor cannot report its worst accepted
    /// distance, so the search could never prune on it.
    #[error("A visitor reporting its worst accepted distance is required when a maximum result count is set.")]
    MissingCutoff,

    /// The query point does not have one coordinate per tree dimension.
    #[error("Query has {actual} coordinates when the tree has {expected} dimensions.")]
    QueryDimensionMismatch {
        /// Number of dimensions the tree was built with
        expected: usize,
        /// Number of coordinates in the query
        actual: usize,
    },

    /// The consistency check found an element on the wrong side of its subtree's median.
    #[error("Bad tree: element {index} violates the split at depth {depth} on axis {axis}.")]
    CorruptedTree {
        /// Depth of the subtree whose split is violated
        depth: usize,
        /// Position of the offending element in the buffer
        index: usize,
        /// Axis of the violated split
        axis: usize,
    },
}

pub type Result<T> = std::result::Result<T, KDTreeError>;

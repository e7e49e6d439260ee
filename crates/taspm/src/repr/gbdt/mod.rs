//! Gradient boosted decision tree representation.

mod forest;
mod tree;

pub use forest::{Forest, ForestValidationError};
pub use tree::{MutableTree, Tree, TreeValidationError};

/// Node index within a tree.
pub type NodeId = u32;

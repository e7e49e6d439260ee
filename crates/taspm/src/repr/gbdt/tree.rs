//! Canonical tree representation (SoA) and its mutable builder.
//!
//! - [`Tree`]: immutable storage used for prediction and persistence
//! - [`MutableTree`]: node-by-node construction during training
//! - [`TreeValidationError`]: structural validation errors

use super::NodeId;

/// Structural validation errors for [`Tree`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TreeValidationError {
    EmptyTree,
    LengthMismatch { field: &'static str, len: usize, n_nodes: usize },
    ChildOutOfRange { node: NodeId, child: NodeId, n_nodes: usize },
    ChildBeforeParent { node: NodeId, child: NodeId },
    FeatureOutOfRange { node: NodeId, feature: u32, n_features: usize },
}

/// Decision tree with numeric splits, stored structure-of-arrays.
///
/// Split rule: a feature value `x` goes left when `x < threshold`. NaN goes in
/// the node's default direction.
#[derive(Debug, Clone, PartialEq)]
pub struct Tree {
    split_indices: Vec<u32>,
    thresholds: Vec<f32>,
    left_children: Vec<NodeId>,
    right_children: Vec<NodeId>,
    default_left: Vec<bool>,
    is_leaf: Vec<bool>,
    leaf_values: Vec<f32>,
}

impl Tree {
    /// A tree with a single leaf.
    pub fn leaf(value: f32) -> Self {
        let mut t = MutableTree::with_capacity(1);
        let root = t.init_root();
        t.make_leaf(root, value);
        t.freeze()
    }

    /// Create a tree from raw arrays, validating structure.
    #[allow(clippy::too_many_arguments)]
    pub fn from_parts(
        split_indices: Vec<u32>,
        thresholds: Vec<f32>,
        left_children: Vec<NodeId>,
        right_children: Vec<NodeId>,
        default_left: Vec<bool>,
        is_leaf: Vec<bool>,
        leaf_values: Vec<f32>,
    ) -> Result<Self, TreeValidationError> {
        let tree = Self {
            split_indices,
            thresholds,
            left_children,
            right_children,
            default_left,
            is_leaf,
            leaf_values,
        };
        tree.validate()?;
        Ok(tree)
    }

    #[inline]
    pub fn n_nodes(&self) -> usize {
        self.is_leaf.len()
    }

    pub fn n_leaves(&self) -> usize {
        self.is_leaf.iter().filter(|&&l| l).count()
    }

    #[inline]
    pub fn is_leaf(&self, node: NodeId) -> bool {
        self.is_leaf[node as usize]
    }

    #[inline]
    pub fn split_index(&self, node: NodeId) -> u32 {
        self.split_indices[node as usize]
    }

    #[inline]
    pub fn split_threshold(&self, node: NodeId) -> f32 {
        self.thresholds[node as usize]
    }

    #[inline]
    pub fn left_child(&self, node: NodeId) -> NodeId {
        self.left_children[node as usize]
    }

    #[inline]
    pub fn right_child(&self, node: NodeId) -> NodeId {
        self.right_children[node as usize]
    }

    #[inline]
    pub fn default_left(&self, node: NodeId) -> bool {
        self.default_left[node as usize]
    }

    #[inline]
    pub fn leaf_value(&self, node: NodeId) -> f32 {
        self.leaf_values[node as usize]
    }

    /// Maximum root-to-leaf depth (a single leaf has depth 0).
    pub fn depth(&self) -> usize {
        fn walk(t: &Tree, node: NodeId) -> usize {
            if t.is_leaf(node) {
                0
            } else {
                1 + walk(t, t.left_child(node)).max(walk(t, t.right_child(node)))
            }
        }
        if self.n_nodes() == 0 { 0 } else { walk(self, 0) }
    }

    /// Largest feature index used by any split, if any.
    pub fn max_feature_index(&self) -> Option<u32> {
        (0..self.n_nodes())
            .filter(|&n| !self.is_leaf[n])
            .map(|n| self.split_indices[n])
            .max()
    }

    /// Traverse to the leaf reached by `features`.
    #[inline]
    pub fn traverse_to_leaf(&self, features: &[f32]) -> NodeId {
        let mut node: NodeId = 0;
        while !self.is_leaf(node) {
            let fvalue = features[self.split_index(node) as usize];
            node = if fvalue.is_nan() {
                if self.default_left(node) {
                    self.left_child(node)
                } else {
                    self.right_child(node)
                }
            } else if fvalue < self.split_threshold(node) {
                self.left_child(node)
            } else {
                self.right_child(node)
            };
        }
        node
    }

    /// Leaf value reached by `features`.
    #[inline]
    pub fn predict_row(&self, features: &[f32]) -> f32 {
        self.leaf_value(self.traverse_to_leaf(features))
    }

    // Raw array access for persistence.
    pub fn split_indices(&self) -> &[u32] {
        &self.split_indices
    }
    pub fn thresholds(&self) -> &[f32] {
        &self.thresholds
    }
    pub fn left_children(&self) -> &[NodeId] {
        &self.left_children
    }
    pub fn right_children(&self) -> &[NodeId] {
        &self.right_children
    }
    pub fn default_lefts(&self) -> &[bool] {
        &self.default_left
    }
    pub fn leaf_flags(&self) -> &[bool] {
        &self.is_leaf
    }
    pub fn leaf_values(&self) -> &[f32] {
        &self.leaf_values
    }

    /// Validate structural invariants.
    ///
    /// Children must be in range and strictly after their parent, which
    /// rules out cycles.
    pub fn validate(&self) -> Result<(), TreeValidationError> {
        let n_nodes = self.n_nodes();
        if n_nodes == 0 {
            return Err(TreeValidationError::EmptyTree);
        }
        let lens: [(&'static str, usize); 6] = [
            ("split_indices", self.split_indices.len()),
            ("thresholds", self.thresholds.len()),
            ("left_children", self.left_children.len()),
            ("right_children", self.right_children.len()),
            ("default_left", self.default_left.len()),
            ("leaf_values", self.leaf_values.len()),
        ];
        for (field, len) in lens {
            if len != n_nodes {
                return Err(TreeValidationError::LengthMismatch { field, len, n_nodes });
            }
        }
        for node in 0..n_nodes {
            if self.is_leaf[node] {
                continue;
            }
            for child in [self.left_children[node], self.right_children[node]] {
                if child as usize >= n_nodes {
                    return Err(TreeValidationError::ChildOutOfRange {
                        node: node as NodeId,
                        child,
                        n_nodes,
                    });
                }
                if child as usize <= node {
                    return Err(TreeValidationError::ChildBeforeParent {
                        node: node as NodeId,
                        child,
                    });
                }
            }
        }
        Ok(())
    }

    /// Validate that every split references a feature below `n_features`.
    pub fn validate_features(&self, n_features: usize) -> Result<(), TreeValidationError> {
        for node in 0..self.n_nodes() {
            if !self.is_leaf[node] && self.split_indices[node] as usize >= n_features {
                return Err(TreeValidationError::FeatureOutOfRange {
                    node: node as NodeId,
                    feature: self.split_indices[node],
                    n_features,
                });
            }
        }
        Ok(())
    }
}

// ============================================================================
// MutableTree
// ============================================================================

/// Tree under construction.
///
/// Nodes start as leaves with value 0; splits are assigned once both
/// children have been allocated.
#[derive(Debug, Clone, Default)]
pub struct MutableTree {
    split_indices: Vec<u32>,
    thresholds: Vec<f32>,
    left_children: Vec<NodeId>,
    right_children: Vec<NodeId>,
    default_left: Vec<bool>,
    is_leaf: Vec<bool>,
    leaf_values: Vec<f32>,
}

impl MutableTree {
    pub fn with_capacity(n_nodes: usize) -> Self {
        Self {
            split_indices: Vec::with_capacity(n_nodes),
            thresholds: Vec::with_capacity(n_nodes),
            left_children: Vec::with_capacity(n_nodes),
            right_children: Vec::with_capacity(n_nodes),
            default_left: Vec::with_capacity(n_nodes),
            is_leaf: Vec::with_capacity(n_nodes),
            leaf_values: Vec::with_capacity(n_nodes),
        }
    }

    /// Reset to a single root leaf and return its id.
    pub fn init_root(&mut self) -> NodeId {
        *self = Self::with_capacity(self.is_leaf.capacity());
        self.push_node()
    }

    fn push_node(&mut self) -> NodeId {
        let id = self.is_leaf.len() as NodeId;
        self.split_indices.push(0);
        self.thresholds.push(0.0);
        self.left_children.push(0);
        self.right_children.push(0);
        self.default_left.push(false);
        self.is_leaf.push(true);
        self.leaf_values.push(0.0);
        id
    }

    #[inline]
    pub fn n_nodes(&self) -> usize {
        self.is_leaf.len()
    }

    /// Turn `node` into a numeric split with two fresh leaf children.
    ///
    /// Returns `(left, right)`.
    pub fn split(
        &mut self,
        node: NodeId,
        feature: u32,
        threshold: f32,
        default_left: bool,
    ) -> (NodeId, NodeId) {
        let left = self.push_node();
        let right = self.push_node();
        let n = node as usize;
        self.split_indices[n] = feature;
        self.thresholds[n] = threshold;
        self.left_children[n] = left;
        self.right_children[n] = right;
        self.default_left[n] = default_left;
        self.is_leaf[n] = false;
        (left, right)
    }

    pub fn make_leaf(&mut self, node: NodeId, value: f32) {
        let n = node as usize;
        self.is_leaf[n] = true;
        self.leaf_values[n] = value;
    }

    /// Freeze into an immutable [`Tree`].
    pub fn freeze(self) -> Tree {
        Tree {
            split_indices: self.split_indices,
            thresholds: self.thresholds,
            left_children: self.left_children,
            right_children: self.right_children,
            default_left: self.default_left,
            is_leaf: self.is_leaf,
            leaf_values: self.leaf_values,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// x0 < 0.5 ? (x1 < 2.0 ? -1 : 1) : 3, NaN on x0 goes right.
    fn sample_tree() -> Tree {
        let mut t = MutableTree::with_capacity(5);
        let root = t.init_root();
        let (l, r) = t.split(root, 0, 0.5, false);
        let (ll, lr) = t.split(l, 1, 2.0, true);
        t.make_leaf(ll, -1.0);
        t.make_leaf(lr, 1.0);
        t.make_leaf(r, 3.0);
        t.freeze()
    }

    #[test]
    fn traversal_follows_thresholds() {
        let t = sample_tree();
        assert_eq!(t.predict_row(&[0.0, 1.0]), -1.0);
        assert_eq!(t.predict_row(&[0.0, 2.0]), 1.0);
        assert_eq!(t.predict_row(&[0.5, 0.0]), 3.0);
    }

    #[test]
    fn nan_uses_default_direction() {
        let t = sample_tree();
        assert_eq!(t.predict_row(&[f32::NAN, 0.0]), 3.0);
        assert_eq!(t.predict_row(&[0.0, f32::NAN]), -1.0);
    }

    #[test]
    fn shape_queries() {
        let t = sample_tree();
        assert_eq!(t.n_nodes(), 5);
        assert_eq!(t.n_leaves(), 3);
        assert_eq!(t.depth(), 2);
        assert_eq!(t.max_feature_index(), Some(1));
        assert!(t.validate().is_ok());
        assert!(t.validate_features(2).is_ok());
        assert!(t.validate_features(1).is_err());
        assert_eq!(Tree::leaf(0.25).depth(), 0);
    }

    #[test]
    fn from_parts_rejects_cycles() {
        let err = Tree::from_parts(
            vec![0, 0, 0],
            vec![0.5, 0.0, 0.0],
            vec![0, 0, 0],
            vec![2, 0, 0],
            vec![false; 3],
            vec![false, true, true],
            vec![0.0; 3],
        )
        .unwrap_err();
        assert_eq!(err, TreeValidationError::ChildBeforeParent { node: 0, child: 0 });
    }
}

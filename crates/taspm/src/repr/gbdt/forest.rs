//! Forest of boosted trees with a single output group.

use ndarray::{Array1, ArrayView2};

use super::tree::{Tree, TreeValidationError};
use crate::utils::Parallelism;

/// Structural validation errors for [`Forest`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ForestValidationError {
    NonFiniteBaseScore,
    InvalidTree { tree_idx: usize, error: TreeValidationError },
}

/// Additive ensemble: `margin(x) = base_score + Σ tree(x)`.
#[derive(Debug, Clone, PartialEq)]
pub struct Forest {
    trees: Vec<Tree>,
    base_score: f32,
}

impl Forest {
    pub fn new(base_score: f32) -> Self {
        Self {
            trees: Vec::new(),
            base_score,
        }
    }

    pub fn push_tree(&mut self, tree: Tree) {
        self.trees.push(tree);
    }

    #[inline]
    pub fn n_trees(&self) -> usize {
        self.trees.len()
    }

    #[inline]
    pub fn base_score(&self) -> f32 {
        self.base_score
    }

    #[inline]
    pub fn tree(&self, idx: usize) -> &Tree {
        &self.trees[idx]
    }

    pub fn trees(&self) -> impl Iterator<Item = &Tree> {
        self.trees.iter()
    }

    /// Raw margin (log-odds) for one row.
    #[inline]
    pub fn predict_row(&self, features: &[f32]) -> f32 {
        self.trees
            .iter()
            .fold(self.base_score, |acc, t| acc + t.predict_row(features))
    }

    /// Raw margins for a `[n_rows, n_features]` matrix.
    pub fn predict_margins(&self, features: ArrayView2<f32>, parallelism: Parallelism) -> Array1<f32> {
        let rows: Vec<usize> = (0..features.nrows()).collect();
        let margins = parallelism.maybe_par_map(rows, |r| {
            let row = features.row(r);
            match row.as_slice() {
                Some(slice) => self.predict_row(slice),
                None => self.predict_row(&row.to_vec()),
            }
        });
        Array1::from(margins)
    }

    /// Validate structural invariants for every tree.
    pub fn validate(&self) -> Result<(), ForestValidationError> {
        if !self.base_score.is_finite() {
            return Err(ForestValidationError::NonFiniteBaseScore);
        }
        for (tree_idx, tree) in self.trees.iter().enumerate() {
            tree.validate()
                .map_err(|error| ForestValidationError::InvalidTree { tree_idx, error })?;
        }
        Ok(())
    }

    /// Validate that no tree references a feature at or beyond `n_features`.
    pub fn validate_features(&self, n_features: usize) -> Result<(), ForestValidationError> {
        for (tree_idx, tree) in self.trees.iter().enumerate() {
            tree.validate_features(n_features)
                .map_err(|error| ForestValidationError::InvalidTree { tree_idx, error })?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repr::gbdt::MutableTree;
    use ndarray::array;

    fn stump(threshold: f32, left: f32, right: f32) -> Tree {
        let mut t = MutableTree::with_capacity(3);
        let root = t.init_root();
        let (l, r) = t.split(root, 0, threshold, true);
        t.make_leaf(l, left);
        t.make_leaf(r, right);
        t.freeze()
    }

    #[test]
    fn margin_sums_trees_and_base() {
        let mut f = Forest::new(0.5);
        f.push_tree(stump(1.0, -1.0, 1.0));
        f.push_tree(stump(2.0, 0.25, -0.25));
        assert_eq!(f.predict_row(&[0.0]), 0.5 - 1.0 + 0.25);
        assert_eq!(f.predict_row(&[3.0]), 0.5 + 1.0 - 0.25);
    }

    #[test]
    fn batch_matches_rows() {
        let mut f = Forest::new(0.0);
        f.push_tree(stump(1.0, -1.0, 1.0));
        let x = array![[0.0f32], [2.0], [f32::NAN]];
        let seq = f.predict_margins(x.view(), Parallelism::Sequential);
        let par = f.predict_margins(x.view(), Parallelism::Parallel);
        assert_eq!(seq.to_vec(), vec![-1.0, 1.0, -1.0]);
        assert_eq!(seq, par);
    }

    #[test]
    fn validate_checks_base_score() {
        assert_eq!(
            Forest::new(f32::NAN).validate(),
            Err(ForestValidationError::NonFiniteBaseScore)
        );
    }
}

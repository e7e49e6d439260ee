//! GBDT model implementation.
//!
//! High-level wrapper around [`Forest`] with training and prediction for the
//! binary attack-outcome task.

use ndarray::{Array1, ArrayView2};

use crate::repr::gbdt::Forest;
use crate::training::gbdt::GBDTTrainer;
use crate::training::{Accuracy, LogLoss, LogisticLoss};
use crate::utils::{run_with_threads, Parallelism};

use super::BoostingConfig;

/// Probability at or above which the positive label is predicted.
pub const DECISION_THRESHOLD: f32 = 0.5;

/// Binary label for a positive-class probability.
#[inline]
pub fn label_for(probability: f32) -> u8 {
    u8::from(probability >= DECISION_THRESHOLD)
}

/// Boosted binary classifier over a fixed-width feature vector.
#[derive(Debug, Clone, PartialEq)]
pub struct GBDTModel {
    forest: Forest,
    n_features: usize,
}

impl GBDTModel {
    /// Wrap an existing forest, e.g. one read back from an artifact.
    pub fn from_forest(forest: Forest, n_features: usize) -> Self {
        Self { forest, n_features }
    }

    pub fn forest(&self) -> &Forest {
        &self.forest
    }

    pub fn n_features(&self) -> usize {
        self.n_features
    }

    /// Train a model on `features` (`[n_rows, n_features]`) and 0/1 `labels`.
    ///
    /// The caller is expected to have validated `config`. Returns `None` when
    /// the inputs are empty or their lengths disagree.
    pub fn train(features: ArrayView2<f32>, labels: &[f32], config: &BoostingConfig) -> Option<Self> {
        run_with_threads(config.thread_count(), |parallelism| {
            Self::train_inner(features, labels, config, parallelism)
        })
    }

    fn train_inner(
        features: ArrayView2<f32>,
        labels: &[f32],
        config: &BoostingConfig,
        parallelism: Parallelism,
    ) -> Option<Self> {
        let n_features = features.ncols();
        let trainer = GBDTTrainer::new(LogisticLoss, config.to_trainer_params())
            .with_metric(LogLoss)
            .with_metric(Accuracy::default());
        let forest = trainer.train(features, labels, parallelism)?;
        Some(Self { forest, n_features })
    }

    // =========================================================================
    // Prediction
    // =========================================================================

    /// Positive-class probability for one encoded row.
    #[inline]
    pub fn predict_proba_row(&self, features: &[f32]) -> f32 {
        LogisticLoss::sigmoid(self.forest.predict_row(features))
    }

    /// Positive-class probabilities for every row.
    pub fn predict_proba(&self, features: ArrayView2<f32>, n_threads: usize) -> Array1<f32> {
        if features.nrows() == 0 {
            return Array1::zeros(0);
        }
        let margins = run_with_threads(n_threads, |parallelism| self.forest.predict_margins(features, parallelism));
        margins.mapv(LogisticLoss::sigmoid)
    }

    /// Predicted labels: `1` iff the probability is at least 0.5.
    pub fn predict(&self, features: ArrayView2<f32>, n_threads: usize) -> Array1<u8> {
        self.predict_proba(features, n_threads).mapv(label_for)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::gbdt::RegularizationParams;
    use crate::repr::gbdt::MutableTree;
    use ndarray::array;

    #[test]
    fn label_threshold_is_inclusive() {
        assert_eq!(label_for(0.5), 1);
        assert_eq!(label_for(0.4999), 0);
        assert_eq!(label_for(1.0), 1);
    }

    #[test]
    fn predictions_follow_forest() {
        let mut tree = MutableTree::with_capacity(3);
        let root = tree.init_root();
        let (l, r) = tree.split(root, 0, 0.5, true);
        tree.make_leaf(l, -2.0);
        tree.make_leaf(r, 2.0);
        let mut forest = Forest::new(0.0);
        forest.push_tree(tree.freeze());
        let model = GBDTModel::from_forest(forest, 1);

        let x = array![[0.0f32], [1.0]];
        let p = model.predict_proba(x.view(), 1);
        assert!(p[0] < 0.5 && p[1] > 0.5);
        assert_eq!(model.predict(x.view(), 1).to_vec(), vec![0, 1]);
        assert_eq!(model.predict_proba_row(&[1.0]), p[1]);
    }

    #[test]
    fn train_respects_tree_count() {
        let x = array![[0.0f32], [0.0], [1.0], [1.0], [0.0], [1.0]];
        let y = [0.0, 0.0, 1.0, 1.0, 0.0, 1.0];
        let config = BoostingConfig::builder()
            .n_trees(5)
            .regularization(RegularizationParams {
                min_child_weight: 0.0,
                ..Default::default()
            })
            .build()
            .unwrap();
        let model = GBDTModel::train(x.view(), &y, &config).unwrap();
        assert_eq!(model.forest().n_trees(), 5);
        assert_eq!(model.n_features(), 1);
        assert!(model.predict_proba_row(&[1.0]) > model.predict_proba_row(&[0.0]));
    }
}

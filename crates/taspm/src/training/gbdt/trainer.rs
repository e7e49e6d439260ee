//! GBDT trainer.
//!
//! Orchestrates objective computation, sampling, tree growing and prediction
//! updates. Use [`GBDTTrainer::train`] to fit a [`Forest`] on a dense matrix.

use ndarray::ArrayView2;

use super::binning::BinnedMatrix;
use super::grower::{GrowerParams, TreeGrower};
use super::sampling::{ColumnSampler, RowSampler};
use super::split::GainParams;
use crate::repr::gbdt::Forest;
use crate::training::logger::TrainingLogger;
use crate::training::metrics::MetricFn;
use crate::training::objectives::{GradsTuple, ObjectiveFn};
use crate::training::Verbosity;
use crate::utils::Parallelism;

// =============================================================================
// GBDTParams
// =============================================================================

/// Parameters for GBDT training.
#[derive(Clone, Debug)]
pub struct GBDTParams {
    // --- Boosting parameters ---
    /// Number of boosting rounds (trees to train).
    pub n_trees: u32,
    /// Learning rate (shrinkage).
    pub learning_rate: f32,

    // --- Tree structure ---
    pub max_depth: u32,
    /// Maximum histogram bins per feature.
    pub max_bins: usize,

    // --- Regularization ---
    pub gain: GainParams,

    // --- Sampling ---
    /// Fraction of rows used per tree.
    pub subsample: f32,
    /// Fraction of features used per tree.
    pub colsample_bytree: f32,

    // --- Logging ---
    pub verbosity: Verbosity,

    // --- Reproducibility ---
    pub seed: u64,
}

impl Default for GBDTParams {
    fn default() -> Self {
        Self {
            n_trees: 100,
            learning_rate: 0.3,
            max_depth: 6,
            max_bins: 256,
            gain: GainParams::default(),
            subsample: 1.0,
            colsample_bytree: 1.0,
            verbosity: Verbosity::default(),
            seed: 42,
        }
    }
}

impl GBDTParams {
    fn to_grower_params(&self) -> GrowerParams {
        GrowerParams {
            gain: self.gain.clone(),
            learning_rate: self.learning_rate,
            max_depth: self.max_depth,
        }
    }
}

// =============================================================================
// GBDTTrainer
// =============================================================================

/// GBDT trainer for a single-output objective.
pub struct GBDTTrainer<O: ObjectiveFn> {
    objective: O,
    metrics: Vec<Box<dyn MetricFn>>,
    params: GBDTParams,
}

impl<O: ObjectiveFn> GBDTTrainer<O> {
    pub fn new(objective: O, params: GBDTParams) -> Self {
        Self {
            objective,
            metrics: Vec::new(),
            params,
        }
    }

    /// Add a metric reported on the training set after each round.
    pub fn with_metric(mut self, metric: impl MetricFn + 'static) -> Self {
        self.metrics.push(Box::new(metric));
        self
    }

    pub fn params(&self) -> &GBDTParams {
        &self.params
    }

    pub fn objective(&self) -> &O {
        &self.objective
    }

    /// Train a forest on `features` (`[n_rows, n_features]`) and `targets`.
    ///
    /// Does not create a thread pool; the caller installs one through
    /// [`run_with_threads`](crate::utils::run_with_threads).
    ///
    /// Returns `None` when there are no rows or the target length differs
    /// from the row count.
    pub fn train(&self, features: ArrayView2<f32>, targets: &[f32], parallelism: Parallelism) -> Option<Forest> {
        let n_rows = features.nrows();
        if n_rows == 0 || targets.len() != n_rows {
            return None;
        }
        let n_features = features.ncols();
        let features = features.as_standard_layout();

        let mut logger = TrainingLogger::new(self.params.verbosity);
        logger.start_training(self.params.n_trees as usize, n_rows, n_features);

        let binned = BinnedMatrix::from_features(features.view(), self.params.max_bins, parallelism);
        if (0..n_features).all(|f| binned.mapper(f).n_bins() < 2) {
            logger.warn("every feature is constant, trees will be single leaves");
        }
        let grower = TreeGrower::new(&binned, self.params.to_grower_params());
        let row_sampler = RowSampler::new(n_rows, self.params.subsample, self.params.seed);
        let col_sampler = ColumnSampler::new(n_features, self.params.colsample_bytree, self.params.seed);

        let base_score = self.objective.compute_base_score(targets);
        let mut forest = Forest::new(base_score);
        let mut predictions = vec![base_score; n_rows];
        let mut gradients = vec![GradsTuple::default(); n_rows];
        let report = !self.metrics.is_empty() && self.params.verbosity >= Verbosity::Info;

        for round in 0..self.params.n_trees as usize {
            self.objective.compute_gradients(&predictions, targets, &mut gradients);

            let rows = row_sampler.sample(round);
            let allowed = col_sampler.sample(round);
            let tree = grower.grow(&gradients, rows, &allowed, parallelism);

            // Every row gets the new tree's output, sampled or not.
            let deltas = parallelism.maybe_par_map((0..n_rows).collect::<Vec<_>>(), |r| {
                let row = features.row(r);
                match row.as_slice() {
                    Some(slice) => tree.predict_row(slice),
                    None => tree.predict_row(&row.to_vec()),
                }
            });
            for (p, d) in predictions.iter_mut().zip(deltas) {
                *p += d;
            }
            forest.push_tree(tree);

            if report {
                let probabilities: Vec<f32> = predictions.iter().map(|&m| self.objective.transform(m)).collect();
                let values: Vec<(&'static str, f64)> = self
                    .metrics
                    .iter()
                    .map(|m| (m.name(), m.compute(&probabilities, targets)))
                    .collect();
                logger.log_metrics(round, &values);
            }
        }

        logger.finish_training(forest.n_trees());
        Some(forest)
    }
}

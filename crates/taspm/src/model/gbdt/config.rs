//! Boosting configuration with builder pattern.
//!
//! [`BoostingConfig`] composes the nested parameter groups and uses `bon`
//! for builder generation with validation at build time.
//!
//! # Example
//!
//! ```
//! use taspm::model::gbdt::{BoostingConfig, SamplingParams, TreeParams};
//!
//! let config = BoostingConfig::builder()
//!     .n_trees(200)
//!     .learning_rate(0.1)
//!     .tree(TreeParams::depth_wise(8))
//!     .sampling(SamplingParams { subsample: 0.8, ..Default::default() })
//!     .build()
//!     .unwrap();
//! assert_eq!(config.n_trees, 200);
//! ```

use std::num::NonZeroUsize;

use bon::Builder;

use super::{ParamValidationError, RegularizationParams, SamplingParams, TreeParams};
use crate::training::{GBDTParams, GainParams, Verbosity};

// =============================================================================
// ConfigError
// =============================================================================

/// A hyperparameter rejected before training starts.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    InvalidLearningRate(f32),
    /// The ensemble would be empty.
    InvalidNTrees,
    /// A row or column fraction outside (0, 1].
    InvalidSamplingRatio { field: &'static str, value: f32 },
    /// A negative penalty or leaf constraint.
    InvalidRegularization { field: &'static str, value: f32 },
    InvalidMaxBins(usize),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidLearningRate(v) => write!(f, "learning_rate {v} is not a positive number"),
            Self::InvalidNTrees => f.write_str("n_trees is zero, the ensemble needs at least one tree"),
            Self::InvalidSamplingRatio { field, value } => {
                write!(f, "{field} = {value} is outside the fraction range (0, 1]")
            }
            Self::InvalidRegularization { field, value } => write!(f, "{field} = {value} is negative"),
            Self::InvalidMaxBins(v) => write!(f, "max_bins = {v} is outside [2, 65535]"),
        }
    }
}

impl std::error::Error for ConfigError {}

impl From<ParamValidationError> for ConfigError {
    fn from(e: ParamValidationError) -> Self {
        match e {
            ParamValidationError::InvalidLambda(value) => Self::InvalidRegularization { field: "lambda", value },
            ParamValidationError::InvalidAlpha(value) => Self::InvalidRegularization { field: "alpha", value },
            ParamValidationError::InvalidMinChildWeight(value) => {
                Self::InvalidRegularization { field: "min_child_weight", value }
            }
            ParamValidationError::InvalidMinGain(value) => Self::InvalidRegularization { field: "min_gain", value },
            ParamValidationError::InvalidSubsample(value) => Self::InvalidSamplingRatio { field: "subsample", value },
            ParamValidationError::InvalidColsampleBytree(value) => {
                Self::InvalidSamplingRatio { field: "colsample_bytree", value }
            }
            ParamValidationError::InvalidMaxBins(v) => Self::InvalidMaxBins(v),
        }
    }
}

// =============================================================================
// BoostingConfig
// =============================================================================

/// Configuration for training the attack-outcome classifier.
///
/// The objective is always logistic loss; log loss and accuracy are reported
/// on the training set when `verbosity` is at least `Info`.
#[derive(Debug, Clone, Builder)]
#[builder(derive(Clone, Debug), finish_fn(vis = "", name = __build_internal))]
pub struct BoostingConfig {
    /// Trees in the ensemble, one per boosting round.
    #[builder(default = 100)]
    pub n_trees: u32,

    /// Shrinkage applied to every leaf weight.
    #[builder(default = 0.3)]
    pub learning_rate: f32,

    #[builder(default)]
    pub tree: TreeParams,

    #[builder(default)]
    pub regularization: RegularizationParams,

    #[builder(default)]
    pub sampling: SamplingParams,

    /// Worker threads for binning, histograms and prediction; `None` for all cores.
    pub n_threads: Option<NonZeroUsize>,

    /// Seeds row and column sampling.
    #[builder(default = 42)]
    pub seed: u64,

    #[builder(default)]
    pub verbosity: Verbosity,
}

impl<S: boosting_config_builder::IsComplete> BoostingConfigBuilder<S> {
    /// Finish the builder, rejecting the same values as [`BoostingConfig::validate`].
    pub fn build(self) -> Result<BoostingConfig, ConfigError> {
        let built = self.__build_internal();
        built.validate()?;
        Ok(built)
    }
}

impl BoostingConfig {
    /// Hyperparameters of the production training job.
    pub fn tuned() -> Self {
        Self {
            n_trees: 600,
            learning_rate: 0.03,
            tree: TreeParams::depth_wise(8),
            regularization: RegularizationParams {
                lambda: 1.0,
                alpha: 0.4,
                min_child_weight: 2.0,
                min_gain: 0.2,
            },
            sampling: SamplingParams {
                subsample: 0.85,
                colsample_bytree: 0.85,
            },
            n_threads: None,
            seed: 42,
            verbosity: Verbosity::Info,
        }
    }

    /// Check every field; the first offending one is reported.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.learning_rate.is_nan() || self.learning_rate <= 0.0 {
            return Err(ConfigError::InvalidLearningRate(self.learning_rate));
        }
        if self.n_trees == 0 {
            return Err(ConfigError::InvalidNTrees);
        }
        self.tree.validate()?;
        self.sampling.validate()?;
        self.regularization.validate()?;
        Ok(())
    }

    /// Thread count in `run_with_threads` semantics (0 = all cores).
    pub fn thread_count(&self) -> usize {
        self.n_threads.map_or(0, NonZeroUsize::get)
    }

    pub(crate) fn to_trainer_params(&self) -> GBDTParams {
        GBDTParams {
            n_trees: self.n_trees,
            learning_rate: self.learning_rate,
            max_depth: self.tree.max_depth,
            max_bins: self.tree.max_bins,
            gain: GainParams {
                reg_lambda: self.regularization.lambda,
                reg_alpha: self.regularization.alpha,
                min_gain: self.regularization.min_gain,
                min_child_weight: self.regularization.min_child_weight,
                min_samples_leaf: 1,
            },
            subsample: self.sampling.subsample,
            colsample_bytree: self.sampling.colsample_bytree,
            verbosity: self.verbosity,
            seed: self.seed,
        }
    }
}

impl Default for BoostingConfig {
    fn default() -> Self {
        Self {
            n_trees: 100,
            learning_rate: 0.3,
            tree: TreeParams::default(),
            regularization: RegularizationParams::default(),
            sampling: SamplingParams::default(),
            n_threads: None,
            seed: 42,
            verbosity: Verbosity::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_defaults_match_default() {
        let built = BoostingConfig::builder().build().unwrap();
        let default = BoostingConfig::default();
        assert_eq!(built.n_trees, default.n_trees);
        assert_eq!(built.learning_rate, default.learning_rate);
        assert_eq!(built.seed, default.seed);
        assert!(BoostingConfig::default().validate().is_ok());
    }

    #[test]
    fn tuned_config_trains_production_forest() {
        let config = BoostingConfig::tuned();
        assert!(config.validate().is_ok());
        assert_eq!(config.n_trees, 600);
        assert_eq!(config.tree.max_depth, 8);
        assert_eq!(config.thread_count(), 0);
        let params = config.to_trainer_params();
        assert_eq!(params.gain.reg_alpha, 0.4);
        assert_eq!(params.gain.min_gain, 0.2);
        assert_eq!(params.subsample, 0.85);
    }

    #[test]
    fn rejects_non_positive_learning_rate() {
        let result = BoostingConfig::builder().learning_rate(0.0).build();
        assert!(matches!(result, Err(ConfigError::InvalidLearningRate(_))));
        let result = BoostingConfig::builder().learning_rate(-0.1).build();
        assert!(matches!(result, Err(ConfigError::InvalidLearningRate(_))));
    }

    #[test]
    fn rejects_empty_ensemble() {
        let result = BoostingConfig::builder().n_trees(0).build();
        assert!(matches!(result, Err(ConfigError::InvalidNTrees)));
    }

    #[test]
    fn rejects_zero_subsample() {
        let result = BoostingConfig::builder()
            .sampling(SamplingParams {
                subsample: 0.0,
                ..Default::default()
            })
            .build();
        assert!(matches!(
            result,
            Err(ConfigError::InvalidSamplingRatio { field: "subsample", .. })
        ));
    }

    #[test]
    fn rejects_negative_lambda() {
        let result = BoostingConfig::builder()
            .regularization(RegularizationParams {
                lambda: -1.0,
                ..Default::default()
            })
            .build();
        assert!(matches!(
            result,
            Err(ConfigError::InvalidRegularization { field: "lambda", .. })
        ));
    }

    #[test]
    fn rejects_single_bin() {
        let result = BoostingConfig::builder()
            .tree(TreeParams::default().with_max_bins(1))
            .build();
        assert_eq!(result.unwrap_err(), ConfigError::InvalidMaxBins(1));
    }

    #[test]
    fn error_messages_name_the_field() {
        let msg = ConfigError::InvalidSamplingRatio { field: "subsample", value: 1.5 }.to_string();
        assert_eq!(msg, "subsample = 1.5 is outside the fraction range (0, 1]");
    }
}

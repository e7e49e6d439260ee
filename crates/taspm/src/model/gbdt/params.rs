//! Hyperparameter groups nested inside [`BoostingConfig`](super::BoostingConfig).

// =============================================================================
// TreeParams
// =============================================================================

/// Tree structure parameters. Trees always grow depth-wise.
#[derive(Debug, Clone, PartialEq)]
pub struct TreeParams {
    /// Maximum depth of each tree. Default: 6.
    pub max_depth: u32,
    /// Maximum number of histogram bins per feature. Default: 256.
    pub max_bins: usize,
}

impl Default for TreeParams {
    fn default() -> Self {
        Self {
            max_depth: 6,
            max_bins: 256,
        }
    }
}

impl TreeParams {
    pub fn depth_wise(max_depth: u32) -> Self {
        Self {
            max_depth,
            ..Default::default()
        }
    }

    pub fn with_max_bins(mut self, max_bins: usize) -> Self {
        self.max_bins = max_bins;
        self
    }

    pub fn validate(&self) -> Result<(), ParamValidationError> {
        if !(2..=u16::MAX as usize).contains(&self.max_bins) {
            return Err(ParamValidationError::InvalidMaxBins(self.max_bins));
        }
        Ok(())
    }
}

// =============================================================================
// RegularizationParams
// =============================================================================

/// Penalties on leaf weights and limits on which splits are accepted.
#[derive(Debug, Clone, PartialEq)]
pub struct RegularizationParams {
    /// Squared-weight penalty.
    pub lambda: f32,
    /// Absolute-weight penalty; soft-thresholds the gradient sum.
    pub alpha: f32,
    /// Smallest hessian sum a child may hold.
    pub min_child_weight: f32,
    /// Splits gaining less than this are discarded.
    pub min_gain: f32,
}

impl Default for RegularizationParams {
    fn default() -> Self {
        Self {
            lambda: 1.0,
            alpha: 0.0,
            min_child_weight: 1.0,
            min_gain: 0.0,
        }
    }
}

impl RegularizationParams {
    pub fn validate(&self) -> Result<(), ParamValidationError> {
        if self.lambda.is_nan() || self.lambda < 0.0 {
            return Err(ParamValidationError::InvalidLambda(self.lambda));
        }
        if self.alpha.is_nan() || self.alpha < 0.0 {
            return Err(ParamValidationError::InvalidAlpha(self.alpha));
        }
        if self.min_child_weight.is_nan() || self.min_child_weight < 0.0 {
            return Err(ParamValidationError::InvalidMinChildWeight(self.min_child_weight));
        }
        if self.min_gain.is_nan() || self.min_gain < 0.0 {
            return Err(ParamValidationError::InvalidMinGain(self.min_gain));
        }
        Ok(())
    }
}

// =============================================================================
// SamplingParams
// =============================================================================

/// Row and column subsampling, each a rate in (0, 1]. 1.0 means no sampling.
#[derive(Debug, Clone, PartialEq)]
pub struct SamplingParams {
    /// Share of rows each tree is grown on.
    pub subsample: f32,
    /// Share of features each tree may split on.
    pub colsample_bytree: f32,
}

impl Default for SamplingParams {
    fn default() -> Self {
        Self {
            subsample: 1.0,
            colsample_bytree: 1.0,
        }
    }
}

impl SamplingParams {
    pub fn validate(&self) -> Result<(), ParamValidationError> {
        let fraction = |v: f32| v > 0.0 && v <= 1.0;
        if !fraction(self.subsample) {
            return Err(ParamValidationError::InvalidSubsample(self.subsample));
        }
        if !fraction(self.colsample_bytree) {
            return Err(ParamValidationError::InvalidColsampleBytree(self.colsample_bytree));
        }
        Ok(())
    }
}

// =============================================================================
// ParamValidationError
// =============================================================================

/// Raised by the group `validate` methods, folded into
/// [`ConfigError`](super::ConfigError) by the config.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ParamValidationError {
    #[error("lambda = {0} is negative")]
    InvalidLambda(f32),
    #[error("alpha = {0} is negative")]
    InvalidAlpha(f32),
    #[error("min_child_weight = {0} is negative")]
    InvalidMinChildWeight(f32),
    #[error("min_gain = {0} is negative")]
    InvalidMinGain(f32),
    #[error("subsample = {0} is outside (0, 1]")]
    InvalidSubsample(f32),
    #[error("colsample_bytree = {0} is outside (0, 1]")]
    InvalidColsampleBytree(f32),
    #[error("max_bins = {0} is outside [2, 65535]")]
    InvalidMaxBins(usize),
}

//! Gain computation and best-split search over feature histograms.

use super::binning::BinMapper;
use super::histogram::{FeatureHistogram, NodeStats};

// =============================================================================
// Gain Parameters
// =============================================================================

/// Parameters for split gain computation and leaf weight calculation.
///
/// Static for the lifetime of training.
#[derive(Clone, Debug)]
pub struct GainParams {
    /// L2 regularization (lambda).
    pub reg_lambda: f32,
    /// L1 regularization (alpha).
    pub reg_alpha: f32,
    /// Minimum split gain (gamma).
    pub min_gain: f32,
    /// Minimum sum of hessians per child.
    pub min_child_weight: f32,
    /// Minimum samples per child.
    pub min_samples_leaf: u32,
}

impl Default for GainParams {
    fn default() -> Self {
        Self {
            reg_lambda: 1.0,
            reg_alpha: 0.0,
            min_gain: 0.0,
            min_child_weight: 1.0,
            min_samples_leaf: 1,
        }
    }
}

impl GainParams {
    /// L1 soft threshold: `sign(G) * max(0, |G| - α)`.
    #[inline]
    fn threshold_l1(&self, grad: f64) -> f64 {
        let alpha = self.reg_alpha as f64;
        if grad > alpha {
            grad - alpha
        } else if grad < -alpha {
            grad + alpha
        } else {
            0.0
        }
    }

    #[inline]
    fn score(&self, grad: f64, hess: f64) -> f64 {
        let t = self.threshold_l1(grad);
        t * t / (hess + self.reg_lambda as f64)
    }

    /// Split gain using the XGBoost formula with L1 soft thresholding.
    ///
    /// ```text
    /// gain = 0.5 * [T(G_L)²/(H_L + λ) + T(G_R)²/(H_R + λ) - T(G_P)²/(H_P + λ)] - γ
    /// ```
    #[inline]
    pub fn compute_gain(
        &self,
        grad_left: f64,
        hess_left: f64,
        grad_right: f64,
        hess_right: f64,
        grad_parent: f64,
        hess_parent: f64,
    ) -> f32 {
        let gain = 0.5
            * (self.score(grad_left, hess_left) + self.score(grad_right, hess_right)
                - self.score(grad_parent, hess_parent))
            - self.min_gain as f64;
        gain as f32
    }

    /// Check if a split satisfies minimum constraints.
    #[inline]
    pub fn is_valid_split(&self, hess_left: f64, hess_right: f64, count_left: u32, count_right: u32) -> bool {
        let min_weight = self.min_child_weight as f64;
        hess_left >= min_weight
            && hess_right >= min_weight
            && count_left >= self.min_samples_leaf
            && count_right >= self.min_samples_leaf
    }

    /// Leaf weight with L1 and L2 regularization.
    ///
    /// ```text
    /// weight = -T(G) / (H + λ)
    /// ```
    #[inline]
    pub fn compute_leaf_weight(&self, grad_sum: f64, hess_sum: f64) -> f32 {
        (-self.threshold_l1(grad_sum) / (hess_sum + self.reg_lambda as f64)) as f32
    }
}

// =============================================================================
// Split search
// =============================================================================

/// Best split found for one node.
#[derive(Debug, Clone, PartialEq)]
pub struct SplitInfo {
    pub feature: u32,
    /// Rows with `bin <= bin` go left.
    pub bin: u16,
    /// Raw-value threshold: `x < threshold` goes left.
    pub threshold: f32,
    pub default_left: bool,
    pub gain: f32,
    pub left: NodeStats,
    pub right: NodeStats,
}

impl SplitInfo {
    /// Whether `self` should replace `other` as the best candidate.
    ///
    /// Ties keep the earlier candidate so that the search order decides.
    #[inline]
    pub fn beats(&self, other: &SplitInfo) -> bool {
        self.gain > other.gain
    }
}

/// Best split of `parent` on `feature`, if any has positive gain.
///
/// Every cut between adjacent bins is tried with missing rows sent left and
/// sent right; without missing rows the default goes to the heavier child.
pub fn find_best_split(
    feature: u32,
    histogram: &FeatureHistogram,
    mapper: &BinMapper,
    parent: NodeStats,
    params: &GainParams,
) -> Option<SplitInfo> {
    let missing = histogram.missing();
    let has_missing = missing.count > 0;
    let bins = histogram.bins();
    let mut best: Option<SplitInfo> = None;

    let mut present = NodeStats::default();
    for (bin, stats) in bins.iter().enumerate().take(bins.len().saturating_sub(1)) {
        present += *stats;
        if present.count == 0 {
            continue;
        }

        let directions: &[bool] = if has_missing { &[false, true] } else { &[false] };
        for &missing_left in directions {
            let left = if missing_left { present + missing } else { present };
            let right = parent - left;
            if !params.is_valid_split(left.hess, right.hess, left.count, right.count) {
                continue;
            }
            let gain = params.compute_gain(left.grad, left.hess, right.grad, right.hess, parent.grad, parent.hess);
            if gain.is_nan() || gain <= 0.0 {
                continue;
            }
            let default_left = if has_missing { missing_left } else { left.hess >= right.hess };
            let candidate = SplitInfo {
                feature,
                bin: bin as u16,
                threshold: mapper.threshold(bin),
                default_left,
                gain,
                left,
                right,
            };
            let replace = match &best {
                Some(current) => candidate.beats(current),
                None => true,
            };
            if replace {
                best = Some(candidate);
            }
        }
    }
    best
}

//! Evaluation metrics for binary classification.
//!
//! Metrics take probabilities (after the sigmoid), not raw margins.

/// An evaluation metric over predicted probabilities.
pub trait MetricFn: Send + Sync {
    fn compute(&self, probabilities: &[f32], targets: &[f32]) -> f64;

    fn name(&self) -> &'static str;

    /// Whether larger values are better.
    fn higher_is_better(&self) -> bool {
        false
    }
}

/// Mean binary cross-entropy.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogLoss;

impl MetricFn for LogLoss {
    fn compute(&self, probabilities: &[f32], targets: &[f32]) -> f64 {
        if probabilities.is_empty() {
            return f64::NAN;
        }
        const EPS: f64 = 1e-15;
        let total: f64 = probabilities
            .iter()
            .zip(targets)
            .map(|(&p, &y)| {
                let p = (p as f64).clamp(EPS, 1.0 - EPS);
                let y = y as f64;
                -(y * p.ln() + (1.0 - y) * (1.0 - p).ln())
            })
            .sum();
        total / probabilities.len() as f64
    }

    fn name(&self) -> &'static str {
        "logloss"
    }
}

/// Fraction of samples whose thresholded prediction matches the label.
#[derive(Debug, Clone, Copy)]
pub struct Accuracy {
    pub threshold: f32,
}

impl Default for Accuracy {
    fn default() -> Self {
        Self { threshold: 0.5 }
    }
}

impl MetricFn for Accuracy {
    fn compute(&self, probabilities: &[f32], targets: &[f32]) -> f64 {
        if probabilities.is_empty() {
            return f64::NAN;
        }
        let correct = probabilities
            .iter()
            .zip(targets)
            .filter(|&(&p, &y)| (p >= self.threshold) == (y >= 0.5))
            .count();
        correct as f64 / probabilities.len() as f64
    }

    fn name(&self) -> &'static str {
        "accuracy"
    }

    fn higher_is_better(&self) -> bool {
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn logloss_of_coin_flip() {
        let v = LogLoss.compute(&[0.5, 0.5], &[1.0, 0.0]);
        assert_abs_diff_eq!(v, std::f64::consts::LN_2, epsilon = 1e-9);
    }

    #[test]
    fn logloss_is_finite_at_extremes() {
        assert!(LogLoss.compute(&[0.0, 1.0], &[1.0, 0.0]).is_finite());
    }

    #[test]
    fn accuracy_counts_threshold_at_half() {
        let acc = Accuracy::default().compute(&[0.5, 0.49, 0.9, 0.1], &[1.0, 1.0, 1.0, 0.0]);
        assert_abs_diff_eq!(acc, 0.75, epsilon = 1e-12);
    }
}

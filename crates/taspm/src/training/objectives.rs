//! Training objectives.

/// Gradient and hessian for one sample.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct GradsTuple {
    pub grad: f32,
    pub hess: f32,
}

/// A twice-differentiable loss over raw margins.
pub trait ObjectiveFn: Send + Sync {
    /// Fill `grads[i]` with the gradient/hessian at `predictions[i]`.
    fn compute_gradients(&self, predictions: &[f32], targets: &[f32], grads: &mut [GradsTuple]);

    /// Initial margin shared by every sample.
    fn compute_base_score(&self, targets: &[f32]) -> f32;

    /// Map a raw margin to the output scale.
    fn transform(&self, margin: f32) -> f32;

    fn name(&self) -> &'static str;
}

/// Logistic loss (binary cross-entropy) over log-odds.
///
/// - Gradient: `σ(pred) - y`
/// - Hessian: `σ(pred) * (1 - σ(pred))`
#[derive(Debug, Clone, Copy, Default)]
pub struct LogisticLoss;

impl LogisticLoss {
    #[inline]
    pub fn sigmoid(x: f32) -> f32 {
        1.0 / (1.0 + (-x).exp())
    }
}

impl ObjectiveFn for LogisticLoss {
    fn compute_gradients(&self, predictions: &[f32], targets: &[f32], grads: &mut [GradsTuple]) {
        debug_assert_eq!(predictions.len(), targets.len());
        debug_assert_eq!(predictions.len(), grads.len());

        const HESS_MIN: f32 = 1e-6;

        for ((g, &pred), &y) in grads.iter_mut().zip(predictions).zip(targets) {
            let p = Self::sigmoid(pred);
            g.grad = p - y;
            g.hess = (p * (1.0 - p)).max(HESS_MIN);
        }
    }

    /// Log-odds of the positive rate, clamped away from 0 and 1.
    fn compute_base_score(&self, targets: &[f32]) -> f32 {
        if targets.is_empty() {
            return 0.0;
        }
        let pos: f64 = targets.iter().map(|&y| y as f64).sum();
        let p = (pos / targets.len() as f64).clamp(1e-6, 1.0 - 1e-6);
        (p / (1.0 - p)).ln() as f32
    }

    #[inline]
    fn transform(&self, margin: f32) -> f32 {
        Self::sigmoid(margin)
    }

    fn name(&self) -> &'static str {
        "logistic"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn gradients_at_zero_margin() {
        let mut grads = vec![GradsTuple::default(); 2];
        LogisticLoss.compute_gradients(&[0.0, 0.0], &[1.0, 0.0], &mut grads);
        assert_abs_diff_eq!(grads[0].grad, -0.5, epsilon = 1e-6);
        assert_abs_diff_eq!(grads[1].grad, 0.5, epsilon = 1e-6);
        assert_abs_diff_eq!(grads[0].hess, 0.25, epsilon = 1e-6);
    }

    #[test]
    fn base_score_is_log_odds() {
        assert_abs_diff_eq!(LogisticLoss.compute_base_score(&[1.0, 0.0]), 0.0, epsilon = 1e-6);
        let b = LogisticLoss.compute_base_score(&[1.0, 1.0, 1.0, 0.0]);
        assert_abs_diff_eq!(b, 3.0f32.ln(), epsilon = 1e-5);
        assert!(LogisticLoss.compute_base_score(&[1.0, 1.0]).is_finite());
    }

    #[test]
    fn hessian_has_floor() {
        let mut grads = vec![GradsTuple::default()];
        LogisticLoss.compute_gradients(&[80.0], &[1.0], &mut grads);
        assert!(grads[0].hess >= 1e-6);
    }
}

//! Gradient histograms per feature.
//!
//! Bins hold plain `f64` sums; one feature's histogram is always built by a
//! single thread, so the accumulation order (and the result) does not depend
//! on the thread count.

use std::ops::{Add, AddAssign, Sub};

use super::binning::{BinnedMatrix, MISSING_BIN};
use crate::training::GradsTuple;
use crate::utils::Parallelism;

/// Gradient sum, hessian sum and row count for a set of rows.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct NodeStats {
    pub grad: f64,
    pub hess: f64,
    pub count: u32,
}

impl NodeStats {
    /// Sum over `rows`.
    pub fn from_rows(rows: &[u32], grads: &[GradsTuple]) -> Self {
        rows.iter().fold(Self::default(), |mut acc, &r| {
            acc.push(grads[r as usize]);
            acc
        })
    }

    #[inline]
    fn push(&mut self, g: GradsTuple) {
        self.grad += g.grad as f64;
        self.hess += g.hess as f64;
        self.count += 1;
    }
}

impl Add for NodeStats {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self {
            grad: self.grad + rhs.grad,
            hess: self.hess + rhs.hess,
            count: self.count + rhs.count,
        }
    }
}

impl AddAssign for NodeStats {
    fn add_assign(&mut self, rhs: Self) {
        *self = *self + rhs;
    }
}

impl Sub for NodeStats {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        Self {
            grad: self.grad - rhs.grad,
            hess: self.hess - rhs.hess,
            count: self.count.saturating_sub(rhs.count),
        }
    }
}

/// Histogram of one feature over one node's rows.
#[derive(Debug, Clone)]
pub struct FeatureHistogram {
    bins: Vec<NodeStats>,
    missing: NodeStats,
}

impl FeatureHistogram {
    #[inline]
    pub fn bins(&self) -> &[NodeStats] {
        &self.bins
    }

    /// Stats of rows whose value is missing.
    #[inline]
    pub fn missing(&self) -> NodeStats {
        self.missing
    }

    /// Stats over every row, missing included.
    pub fn total(&self) -> NodeStats {
        self.bins.iter().fold(self.missing, |acc, &b| acc + b)
    }
}

/// Build the histogram of one feature column over `rows`.
pub fn build_histogram(bins: &[u16], n_bins: usize, rows: &[u32], grads: &[GradsTuple]) -> FeatureHistogram {
    let mut hist = FeatureHistogram {
        bins: vec![NodeStats::default(); n_bins],
        missing: NodeStats::default(),
    };
    for &row in rows {
        let g = grads[row as usize];
        match bins[row as usize] {
            MISSING_BIN => hist.missing.push(g),
            bin => hist.bins[bin as usize].push(g),
        }
    }
    hist
}

/// Histograms of `features` over `rows`, in the order of `features`.
pub fn build_histograms(
    matrix: &BinnedMatrix,
    features: &[u32],
    rows: &[u32],
    grads: &[GradsTuple],
    parallelism: Parallelism,
) -> Vec<FeatureHistogram> {
    parallelism.maybe_par_map(features.to_vec(), |f| {
        let f = f as usize;
        build_histogram(matrix.feature_bins(f), matrix.mapper(f).n_bins(), rows, grads)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    #[test]
    fn counts_and_sums_per_bin() {
        let grads = vec![
            GradsTuple { grad: 1.0, hess: 0.5 },
            GradsTuple { grad: -2.0, hess: 0.25 },
            GradsTuple { grad: 3.0, hess: 1.0 },
        ];
        let hist = build_histogram(&[0, 1, MISSING_BIN], 2, &[0, 1, 2], &grads);
        assert_eq!(hist.bins()[0].count, 1);
        assert_eq!(hist.bins()[1].grad, -2.0);
        assert_eq!(hist.missing().count, 1);
        assert_eq!(hist.total(), NodeStats::from_rows(&[0, 1, 2], &grads));
    }

    #[test]
    fn only_listed_rows_are_counted() {
        let grads = vec![GradsTuple { grad: 1.0, hess: 1.0 }; 4];
        let hist = build_histogram(&[0, 0, 1, 1], 2, &[1, 2], &grads);
        assert_eq!(hist.total().count, 2);
    }

    #[test]
    fn parallel_matches_sequential() {
        let x = array![[0.0f32, 1.0], [1.0, 2.0], [2.0, f32::NAN], [3.0, 4.0]];
        let matrix = BinnedMatrix::from_features(x.view(), 256, Parallelism::Sequential);
        let grads: Vec<GradsTuple> = (0..4)
            .map(|i| GradsTuple { grad: i as f32 - 1.5, hess: 0.25 })
            .collect();
        let rows = [0, 1, 2, 3];
        let seq = build_histograms(&matrix, &[0, 1], &rows, &grads, Parallelism::Sequential);
        let par = build_histograms(&matrix, &[0, 1], &rows, &grads, Parallelism::Parallel);
        for (a, b) in seq.iter().zip(&par) {
            assert_eq!(a.bins(), b.bins());
            assert_eq!(a.missing(), b.missing());
        }
        assert_eq!(seq[1].missing().count, 1);
    }
}

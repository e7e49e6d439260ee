//! Quantile binning of the feature matrix for histogram split finding.
//!
//! Each feature gets a [`BinMapper`] holding strictly increasing cut points.
//! A value `x` lands in bin `#{t : t <= x}`, so the split "bin <= j" is the
//! same as the raw rule `x < thresholds[j]` used at prediction time.

use ndarray::ArrayView2;

use crate::utils::Parallelism;

/// Bin index reserved for NaN.
pub const MISSING_BIN: u16 = u16::MAX;

// ============================================================================
// BinMapper
// ============================================================================

/// Cut points for one numeric feature.
#[derive(Debug, Clone, PartialEq)]
pub struct BinMapper {
    thresholds: Vec<f32>,
}

impl BinMapper {
    /// Build cut points from a column, with at most `max_bins` bins.
    ///
    /// Few distinct values get midpoints between neighbours; otherwise cut
    /// points are taken at evenly spaced quantiles.
    pub fn from_values(values: impl IntoIterator<Item = f32>, max_bins: usize) -> Self {
        let max_bins = max_bins.max(2);
        let mut sorted: Vec<f32> = values.into_iter().filter(|v| !v.is_nan()).collect();
        if sorted.is_empty() {
            return Self { thresholds: Vec::new() };
        }
        sorted.sort_unstable_by(f32::total_cmp);

        let mut distinct = sorted.clone();
        distinct.dedup();

        let thresholds = if distinct.len() <= max_bins {
            distinct
                .windows(2)
                .map(|w| {
                    let mid = w[0] + (w[1] - w[0]) / 2.0;
                    if mid > w[0] { mid } else { w[1] }
                })
                .collect()
        } else {
            let n = sorted.len();
            let mut cuts: Vec<f32> = (1..max_bins)
                .map(|i| sorted[(i * n / max_bins).min(n - 1)])
                .filter(|&t| t > sorted[0])
                .collect();
            cuts.dedup();
            cuts
        };

        Self { thresholds }
    }

    /// Number of non-missing bins.
    #[inline]
    pub fn n_bins(&self) -> usize {
        self.thresholds.len() + 1
    }

    #[inline]
    pub fn thresholds(&self) -> &[f32] {
        &self.thresholds
    }

    /// Raw-value threshold separating bins `..=bin` from `bin + 1..`.
    #[inline]
    pub fn threshold(&self, bin: usize) -> f32 {
        self.thresholds[bin]
    }

    #[inline]
    pub fn bin(&self, value: f32) -> u16 {
        if value.is_nan() {
            MISSING_BIN
        } else {
            self.thresholds.partition_point(|&t| t <= value) as u16
        }
    }
}

// ============================================================================
// BinnedMatrix
// ============================================================================

/// Feature-major binned copy of the training matrix.
#[derive(Debug, Clone)]
pub struct BinnedMatrix {
    n_rows: usize,
    mappers: Vec<BinMapper>,
    /// Bins of feature `f` live in `bins[f * n_rows..(f + 1) * n_rows]`.
    bins: Vec<u16>,
}

impl BinnedMatrix {
    pub fn from_features(features: ArrayView2<f32>, max_bins: usize, parallelism: Parallelism) -> Self {
        let n_rows = features.nrows();
        let columns: Vec<usize> = (0..features.ncols()).collect();
        let binned: Vec<(BinMapper, Vec<u16>)> = parallelism.maybe_par_map(columns, |f| {
            let column = features.column(f);
            let mapper = BinMapper::from_values(column.iter().copied(), max_bins);
            let bins = column.iter().map(|&v| mapper.bin(v)).collect();
            (mapper, bins)
        });

        let mut mappers = Vec::with_capacity(binned.len());
        let mut bins = Vec::with_capacity(n_rows * binned.len());
        for (mapper, column_bins) in binned {
            mappers.push(mapper);
            bins.extend(column_bins);
        }
        Self { n_rows, mappers, bins }
    }

    #[inline]
    pub fn n_rows(&self) -> usize {
        self.n_rows
    }

    #[inline]
    pub fn n_features(&self) -> usize {
        self.mappers.len()
    }

    #[inline]
    pub fn mapper(&self, feature: usize) -> &BinMapper {
        &self.mappers[feature]
    }

    #[inline]
    pub fn feature_bins(&self, feature: usize) -> &[u16] {
        &self.bins[feature * self.n_rows..(feature + 1) * self.n_rows]
    }

    #[inline]
    pub fn bin(&self, row: usize, feature: usize) -> u16 {
        self.bins[feature * self.n_rows + row]
    }
}

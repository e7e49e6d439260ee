//! Per-tree row and column subsampling.
//!
//! Both samplers derive a fresh seed per tree from the base seed, so the
//! selection for tree `t` does not depend on how many threads trained trees
//! `0..t`.

use rand::prelude::*;
use rand::SeedableRng;
use rand_xoshiro::Xoshiro256PlusPlus;

const TREE_SEED_STRIDE: u64 = 0x9E37_79B9_7F4A_7C15;
const COLUMN_SEED_SALT: u64 = 0x517C_C1B7_2722_0A95;

#[inline]
fn tree_seed(seed: u64, tree_idx: usize) -> u64 {
    seed.wrapping_add((tree_idx as u64).wrapping_mul(TREE_SEED_STRIDE))
}

/// Number of items kept when sampling `rate` of `n`, at least one.
#[inline]
fn sample_size(n: usize, rate: f32) -> usize {
    ((n as f32 * rate).ceil() as usize).clamp(1, n.max(1))
}

// ============================================================================
// RowSampler
// ============================================================================

/// Uniform row subsampling without replacement.
#[derive(Debug, Clone)]
pub struct RowSampler {
    n_rows: usize,
    subsample: f32,
    seed: u64,
}

impl RowSampler {
    pub fn new(n_rows: usize, subsample: f32, seed: u64) -> Self {
        debug_assert!(subsample > 0.0 && subsample <= 1.0);
        Self {
            n_rows,
            subsample,
            seed,
        }
    }

    #[inline]
    pub fn is_enabled(&self) -> bool {
        self.subsample < 1.0
    }

    /// Sorted row indices used to grow tree `tree_idx`.
    pub fn sample(&self, tree_idx: usize) -> Vec<u32> {
        if !self.is_enabled() {
            return (0..self.n_rows as u32).collect();
        }
        let k = sample_size(self.n_rows, self.subsample);
        sample_without_replacement(self.n_rows, k, tree_seed(self.seed, tree_idx))
    }
}

// ============================================================================
// ColumnSampler
// ============================================================================

/// Feature subsampling once per tree (`colsample_bytree`).
#[derive(Debug, Clone)]
pub struct ColumnSampler {
    n_features: usize,
    colsample_bytree: f32,
    seed: u64,
}

impl ColumnSampler {
    pub fn new(n_features: usize, colsample_bytree: f32, seed: u64) -> Self {
        debug_assert!(colsample_bytree > 0.0 && colsample_bytree <= 1.0);
        Self {
            n_features,
            colsample_bytree,
            seed: seed ^ COLUMN_SEED_SALT,
        }
    }

    #[inline]
    pub fn is_enabled(&self) -> bool {
        self.colsample_bytree < 1.0
    }

    /// Sorted feature indices allowed in tree `tree_idx`.
    pub fn sample(&self, tree_idx: usize) -> Vec<u32> {
        if !self.is_enabled() {
            return (0..self.n_features as u32).collect();
        }
        let k = sample_size(self.n_features, self.colsample_bytree);
        sample_without_replacement(self.n_features, k, tree_seed(self.seed, tree_idx))
    }
}

/// Sample `k` items from `0..n` without replacement, returned sorted.
fn sample_without_replacement(n: usize, k: usize, seed: u64) -> Vec<u32> {
    let mut rng = Xoshiro256PlusPlus::seed_from_u64(seed);
    let mut indices: Vec<u32> = (0..n as u32).collect();
    let k = k.min(n);

    // Partial Fisher-Yates shuffle
    for i in 0..k {
        let j = rng.gen_range(i..n);
        indices.swap(i, j);
    }

    indices.truncate(k);
    indices.sort_unstable();
    indices
}

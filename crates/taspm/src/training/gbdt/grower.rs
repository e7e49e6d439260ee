//! Depth-wise tree growth over a binned matrix.

use std::collections::VecDeque;

use super::binning::{BinnedMatrix, MISSING_BIN};
use super::histogram::{build_histograms, NodeStats};
use super::split::{find_best_split, GainParams, SplitInfo};
use crate::repr::gbdt::{MutableTree, NodeId, Tree};
use crate::training::GradsTuple;
use crate::utils::Parallelism;

/// Parameters for tree growth.
#[derive(Clone, Debug)]
pub struct GrowerParams {
    /// Gain computation and constraint parameters.
    pub gain: GainParams,
    /// Shrinkage applied to every leaf weight.
    pub learning_rate: f32,
    pub max_depth: u32,
}

impl Default for GrowerParams {
    fn default() -> Self {
        Self {
            gain: GainParams::default(),
            learning_rate: 0.3,
            max_depth: 6,
        }
    }
}

/// A node waiting to be split or turned into a leaf.
struct NodeCandidate {
    node: NodeId,
    depth: u32,
    rows: Vec<u32>,
    stats: NodeStats,
}

/// Grows one regression tree on gradients and hessians.
///
/// Nodes are expanded level by level. A node becomes a leaf when it reaches
/// `max_depth`, holds fewer than two rows, or has no split with positive gain.
pub struct TreeGrower<'a> {
    matrix: &'a BinnedMatrix,
    params: GrowerParams,
}

impl<'a> TreeGrower<'a> {
    pub fn new(matrix: &'a BinnedMatrix, params: GrowerParams) -> Self {
        Self { matrix, params }
    }

    pub fn params(&self) -> &GrowerParams {
        &self.params
    }

    /// Grow a tree on `rows`, considering only `features` for splits.
    pub fn grow(&self, grads: &[GradsTuple], rows: Vec<u32>, features: &[u32], parallelism: Parallelism) -> Tree {
        let max_nodes = (1usize << self.params.max_depth.min(16)) * 2;
        let mut tree = MutableTree::with_capacity(max_nodes.min(rows.len() * 2 + 1));
        let root = tree.init_root();

        let mut queue = VecDeque::new();
        let stats = NodeStats::from_rows(&rows, grads);
        queue.push_back(NodeCandidate {
            node: root,
            depth: 0,
            rows,
            stats,
        });

        while let Some(candidate) = queue.pop_front() {
            let split = if candidate.depth < self.params.max_depth && candidate.rows.len() >= 2 {
                self.best_split(grads, &candidate, features, parallelism)
            } else {
                None
            };

            let Some(split) = split else {
                tree.make_leaf(candidate.node, self.leaf_value(candidate.stats));
                continue;
            };

            let (left_rows, right_rows) = self.partition(&candidate.rows, &split);
            let (left, right) = tree.split(candidate.node, split.feature, split.threshold, split.default_left);
            queue.push_back(NodeCandidate {
                node: left,
                depth: candidate.depth + 1,
                rows: left_rows,
                stats: split.left,
            });
            queue.push_back(NodeCandidate {
                node: right,
                depth: candidate.depth + 1,
                rows: right_rows,
                stats: split.right,
            });
        }

        tree.freeze()
    }

    #[inline]
    fn leaf_value(&self, stats: NodeStats) -> f32 {
        self.params.learning_rate * self.params.gain.compute_leaf_weight(stats.grad, stats.hess)
    }

    /// Best split across `features`; ties go to the lowest feature index.
    fn best_split(
        &self,
        grads: &[GradsTuple],
        candidate: &NodeCandidate,
        features: &[u32],
        parallelism: Parallelism,
    ) -> Option<SplitInfo> {
        let histograms = build_histograms(self.matrix, features, &candidate.rows, grads, parallelism);
        let mut best: Option<SplitInfo> = None;
        for (&feature, hist) in features.iter().zip(&histograms) {
            let mapper = self.matrix.mapper(feature as usize);
            if let Some(split) = find_best_split(feature, hist, mapper, candidate.stats, &self.params.gain) {
                let replace = match &best {
                    Some(current) => split.beats(current),
                    None => true,
                };
                if replace {
                    best = Some(split);
                }
            }
        }
        best
    }

    fn partition(&self, rows: &[u32], split: &SplitInfo) -> (Vec<u32>, Vec<u32>) {
        let bins = self.matrix.feature_bins(split.feature as usize);
        rows.iter().partition(|&&row| match bins[row as usize] {
            MISSING_BIN => split.default_left,
            bin => bin <= split.bin,
        })
    }
}

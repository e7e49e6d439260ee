//! Histogram-based gradient boosted tree training.
//!
//! - [`binning`]: quantile bins per feature
//! - [`histogram`]: gradient/hessian sums per bin
//! - [`split`]: gain formula and best-split search
//! - [`grower`]: depth-wise growth of one tree
//! - [`sampling`]: per-tree row and column subsampling
//! - [`trainer`]: the boosting loop

pub mod binning;
pub mod grower;
pub mod histogram;
pub mod sampling;
pub mod split;
mod trainer;

pub use binning::{BinMapper, BinnedMatrix, MISSING_BIN};
pub use grower::{GrowerParams, TreeGrower};
pub use split::{GainParams, SplitInfo};
pub use trainer::{GBDTParams, GBDTTrainer};

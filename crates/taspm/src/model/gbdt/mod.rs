//! GBDT model and configuration.
//!
//! Configuration is organized into semantic groups:
//! - [`TreeParams`]: tree depth and histogram bins
//! - [`RegularizationParams`]: L1/L2 regularization and split constraints
//! - [`SamplingParams`]: row and column subsampling

mod config;
mod model;
mod params;

pub use config::{BoostingConfig, ConfigError};
pub use model::{label_for, GBDTModel, DECISION_THRESHOLD};
pub use params::{ParamValidationError, RegularizationParams, SamplingParams, TreeParams};

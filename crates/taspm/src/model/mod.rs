//! High-level model API.

pub mod gbdt;

pub use gbdt::{BoostingConfig, ConfigError, GBDTModel};

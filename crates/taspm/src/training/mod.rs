//! Training infrastructure: objectives, metrics, logging and the GBDT trainer.

pub mod gbdt;
mod logger;
mod metrics;
mod objectives;

pub use gbdt::{GBDTParams, GBDTTrainer, GainParams};
pub use logger::{TrainingLogger, Verbosity};
pub use metrics::{Accuracy, LogLoss, MetricFn};
pub use objectives::{GradsTuple, LogisticLoss, ObjectiveFn};

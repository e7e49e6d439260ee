//! Pipeline error type.

use crate::model::ConfigError;
use crate::preprocess::SchemaError;

/// Errors raised while fitting a pipeline or predicting with one.
#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    #[error("label column {0} not found")]
    MissingLabel(String),

    #[error("label column {0} is not numeric")]
    LabelNotNumeric(String),

    #[error("label at row {row} must be 0 or 1, got {value}")]
    NonBinaryLabel { row: usize, value: f64 },

    #[error("expected {expected} labels, got {got}")]
    LabelCount { expected: usize, got: usize },

    #[error("training data has no rows")]
    EmptyDataset,

    #[error(transparent)]
    Schema(#[from] SchemaError),

    #[error("invalid configuration: {0}")]
    Config(#[from] ConfigError),

    #[error("training failed: {0}")]
    Training(String),

    #[error("encoded width {got} does not match the model's {expected} features")]
    WidthMismatch { expected: usize, got: usize },
}

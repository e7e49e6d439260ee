//! Schema types for pipeline serialization.
//!
//! These types give a stable on-disk format independent of the runtime
//! types, which are converted in [`convert`](super::convert) with validation.

use serde::{Deserialize, Serialize};

/// Top-level artifact: format envelope, input schema and model.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PipelineArtifact {
    /// Always [`FORMAT_TAG`](super::FORMAT_TAG).
    pub format: String,
    pub format_version: u32,
    pub schema: FeatureSchemaSchema,
    pub model: GBDTModelSchema,
}

/// Just the envelope fields, read before committing to a full parse.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct ArtifactHeader {
    pub format: String,
    pub format_version: u32,
}

/// Input column contract.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeatureSchemaSchema {
    pub version: u32,
    pub columns: Vec<InputColumnSchema>,
}

/// One input column and its encoding.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum InputColumnSchema {
    /// One-hot over a sorted vocabulary.
    Categorical { name: String, vocabulary: Vec<String> },
    Numeric { name: String },
    /// Accepted but unused.
    Dropped { name: String },
}

/// Output transform applied to the raw margin.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutputTransformSchema {
    /// Sigmoid for binary classification.
    Sigmoid,
}

/// Full GBDT model schema.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GBDTModelSchema {
    /// Width of the encoded feature vector.
    pub num_features: usize,
    pub output_transform: OutputTransformSchema,
    pub forest: ForestSchema,
    /// Objective name, informational only.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub objective_name: Option<String>,
}

/// Forest schema (collection of trees).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ForestSchema {
    pub base_score: f64,
    /// Trees in boosting order.
    pub trees: Vec<TreeSchema>,
}

/// Tree schema (SoA layout).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TreeSchema {
    /// Number of nodes (internal + leaves).
    pub num_nodes: u32,
    pub split_indices: Vec<u32>,
    pub thresholds: Vec<f64>,
    pub children_left: Vec<u32>,
    pub children_right: Vec<u32>,
    /// Default direction (true = left) for missing values.
    pub default_left: Vec<bool>,
    pub is_leaf: Vec<bool>,
    pub leaf_values: Vec<f64>,
}

//! Preprocessing: records and frames to fixed-width feature vectors.
//!
//! - [`FeatureSchema`]: the versioned column contract
//! - [`OneHotEncoder`]: per-column vocabulary with an explicit unknown branch
//! - [`ColumnTransform`]: fit/transform over whole records

mod onehot;
mod schema;
mod transform;

pub use onehot::{CategoryEncoding, OneHotEncoder};
pub use schema::{FeatureSchema, InputColumn, InputKind, SchemaError, SCHEMA_VERSION};
pub use transform::ColumnTransform;

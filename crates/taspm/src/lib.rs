//! taspm: Terror Attack Success Prediction Model.
//!
//! A binary classifier over structured incident attributes. Raw incident
//! records are encoded by a fitted, versioned column transform and scored by a
//! gradient boosted tree ensemble; both travel together as one JSON artifact.
//!
//! # Key Types
//!
//! - [`Pipeline`] - Fitted transform plus classifier, with save/load
//! - [`BoostingConfig`] - Training hyperparameters (builder)
//! - [`ExclusionPolicy`] - Columns withheld from the model
//! - [`IncidentForm`] - Incident form state validated into a [`Record`]
//!
//! # Training
//!
//! ```no_run
//! use taspm::{load_csv, BoostingConfig, ExclusionPolicy, Pipeline, LABEL_COLUMN};
//!
//! let raw = load_csv("data/processed/balanced_data.csv")?;
//! let (features, labels) = ExclusionPolicy::default().split(&raw, LABEL_COLUMN)?;
//! let pipeline = Pipeline::fit(&features, &labels, &BoostingConfig::tuned())?;
//! pipeline.save("final_model.json")?;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod data;
pub mod exclusion;
pub mod incident;
pub mod job;
pub mod model;
pub mod persist;
pub mod pipeline;
pub mod preprocess;
pub mod repr;
pub mod testing;
pub mod training;
pub mod utils;

// =============================================================================
// Convenience Re-exports
// =============================================================================

pub use data::io::csv::load_csv;
pub use data::io::DatasetLoadError;
pub use data::{Column, Record, RecordFrame, Value};

pub use exclusion::{ExclusionPolicy, EXCLUDED_COLUMNS, LABEL_COLUMN};
pub use incident::{FormError, IncidentForm};
pub use job::{JobError, TrainingJob};

pub use model::{BoostingConfig, ConfigError, GBDTModel};
pub use persist::PersistError;
pub use pipeline::{Pipeline, PipelineError, Prediction};
pub use preprocess::{ColumnTransform, FeatureSchema, SchemaError};

pub use training::Verbosity;
pub use utils::{run_with_threads, Parallelism};

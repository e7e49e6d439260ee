//! The offline training job: dataset in, pipeline artifact out.

use std::path::PathBuf;

use crate::data::io::csv::load_csv;
use crate::data::io::DatasetLoadError;
use crate::data::RecordFrame;
use crate::exclusion::{ExclusionPolicy, LABEL_COLUMN};
use crate::model::BoostingConfig;
use crate::persist::PersistError;
use crate::pipeline::{Pipeline, PipelineError};

/// Dataset read by the production job.
pub const DEFAULT_DATASET: &str = "data/processed/balanced_data.csv";

/// Artifact written by the production job and read by the server.
pub const DEFAULT_ARTIFACT: &str = "final_model.json";

#[derive(Debug, thiserror::Error)]
pub enum JobError {
    #[error("failed to load dataset: {0}")]
    Load(#[from] DatasetLoadError),

    #[error(transparent)]
    Pipeline(#[from] PipelineError),

    #[error("failed to write artifact: {0}")]
    Persist(#[from] PersistError),
}

/// Paths, exclusion policy and hyperparameters of one training run.
#[derive(Debug, Clone)]
pub struct TrainingJob {
    pub dataset: PathBuf,
    pub artifact: PathBuf,
    pub label: String,
    pub policy: ExclusionPolicy,
    pub config: BoostingConfig,
}

impl Default for TrainingJob {
    /// The production job with the tuned hyperparameters.
    fn default() -> Self {
        Self {
            dataset: PathBuf::from(DEFAULT_DATASET),
            artifact: PathBuf::from(DEFAULT_ARTIFACT),
            label: LABEL_COLUMN.to_string(),
            policy: ExclusionPolicy::default(),
            config: BoostingConfig::tuned(),
        }
    }
}

impl TrainingJob {
    /// Load the dataset and split it into features and labels.
    pub fn prepare(&self) -> Result<(RecordFrame, Vec<f32>), JobError> {
        let raw = load_csv(&self.dataset)?;
        tracing::info!(
            path = %self.dataset.display(),
            rows = raw.n_rows(),
            columns = raw.n_columns(),
            "loaded dataset"
        );
        let (features, labels) = self.policy.split(&raw, &self.label)?;
        tracing::debug!(kept = features.n_columns(), "applied exclusion policy");
        Ok((features, labels))
    }

    pub fn fit(&self, features: &RecordFrame, labels: &[f32]) -> Result<Pipeline, JobError> {
        Ok(Pipeline::fit(features, labels, &self.config)?)
    }

    pub fn save(&self, pipeline: &Pipeline) -> Result<(), JobError> {
        pipeline.save(&self.artifact)?;
        tracing::info!(path = %self.artifact.display(), "saved pipeline artifact");
        Ok(())
    }

    /// Prepare, fit and save in one go.
    pub fn run(&self) -> Result<Pipeline, JobError> {
        let (features, labels) = self.prepare()?;
        let pipeline = self.fit(&features, &labels)?;
        self.save(&pipeline)?;
        Ok(pipeline)
    }
}

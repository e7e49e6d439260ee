//! Fitted preprocessing plus classifier as one unit.
//!
//! A [`Pipeline`] is what the training job writes and the server loads: the
//! [`ColumnTransform`] that turns raw records into feature vectors, and the
//! [`GBDTModel`] trained on those vectors.

mod error;

pub use error::PipelineError;

use crate::data::{Record, RecordFrame};
use crate::model::gbdt::label_for;
use crate::model::{BoostingConfig, GBDTModel};
use crate::preprocess::ColumnTransform;

/// Outcome for a single incident.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Prediction {
    /// `1` = successful attack.
    pub label: u8,
    /// Probability of the positive class.
    pub probability: f32,
}

impl Prediction {
    fn from_probability(probability: f32) -> Self {
        Self {
            label: label_for(probability),
            probability,
        }
    }
}

/// Transform and classifier, fitted together.
#[derive(Debug, Clone, PartialEq)]
pub struct Pipeline {
    transform: ColumnTransform,
    model: GBDTModel,
}

impl Pipeline {
    /// Assemble a pipeline from fitted parts.
    ///
    /// # Errors
    ///
    /// [`PipelineError::WidthMismatch`] if the transform's output width is not
    /// the model's feature count.
    pub fn new(transform: ColumnTransform, model: GBDTModel) -> Result<Self, PipelineError> {
        if transform.width() != model.n_features() {
            return Err(PipelineError::WidthMismatch {
                expected: model.n_features(),
                got: transform.width(),
            });
        }
        Ok(Self { transform, model })
    }

    /// Fit the transform on `features`, then train the classifier on the
    /// encoded matrix.
    pub fn fit(features: &RecordFrame, labels: &[f32], config: &BoostingConfig) -> Result<Self, PipelineError> {
        config.validate()?;
        if features.n_rows() == 0 {
            return Err(PipelineError::EmptyDataset);
        }
        if labels.len() != features.n_rows() {
            return Err(PipelineError::LabelCount {
                expected: features.n_rows(),
                got: labels.len(),
            });
        }

        let transform = ColumnTransform::fit(features)?;
        let matrix = transform.transform_frame(features)?;
        tracing::debug!(
            rows = matrix.nrows(),
            inputs = transform.schema().columns().len(),
            width = transform.width(),
            "encoded training matrix"
        );

        let model = GBDTModel::train(matrix.view(), labels, config)
            .ok_or_else(|| PipelineError::Training("trainer returned no model".to_string()))?;
        Self::new(transform, model)
    }

    pub fn transform(&self) -> &ColumnTransform {
        &self.transform
    }

    pub fn model(&self) -> &GBDTModel {
        &self.model
    }

    /// Predict one record.
    ///
    /// # Errors
    ///
    /// Schema violations: a missing or unexpected column, or text that does
    /// not parse in a numeric column.
    pub fn predict(&self, record: &Record) -> Result<Prediction, PipelineError> {
        let row = self.transform.transform_record(record)?;
        let probability = match row.as_slice() {
            Some(slice) => self.model.predict_proba_row(slice),
            None => self.model.predict_proba_row(&row.to_vec()),
        };
        Ok(Prediction::from_probability(probability))
    }

    /// Class probabilities `[P(label = 0), P(label = 1)]` for one record.
    pub fn predict_proba(&self, record: &Record) -> Result<[f32; 2], PipelineError> {
        let p = self.predict(record)?.probability;
        Ok([1.0 - p, p])
    }

    /// Predict every row of a frame.
    pub fn predict_frame(&self, frame: &RecordFrame) -> Result<Vec<Prediction>, PipelineError> {
        let matrix = self.transform.transform_frame(frame)?;
        let probabilities = self.model.predict_proba(matrix.view(), 0);
        Ok(probabilities.iter().map(|&p| Prediction::from_probability(p)).collect())
    }
}

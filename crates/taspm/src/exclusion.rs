//! Feature exclusion policy.
//!
//! The single list of raw dataset columns the model must never see: the
//! label itself and everything only known once an attack's outcome is known
//! (casualties, property damage, hostage outcomes, claim status).

use crate::data::{Column, RecordFrame};
use crate::pipeline::PipelineError;

/// Name of the outcome column in the raw dataset.
pub const LABEL_COLUMN: &str = "successful_attack";

/// Columns removed from the raw dataset before fitting.
///
/// `successful_attack` is listed here as well as being the label; dropping is
/// idempotent so the overlap is harmless.
pub const EXCLUDED_COLUMNS: &[&str] = &[
    "num_killed",
    "extended_event",
    "num_killed_us",
    "num_wounded",
    "num_wounded_us",
    "num_wounded_terrorists",
    "property_damage",
    "property_extent_code",
    "property_extent",
    "property_value",
    "hostage_incident",
    "ransom_demanded",
    "hostage_outcome_code",
    "hostage_outcome",
    "num_released",
    "claim_mode",
    "secondary_weapon_subtype",
    "city",
    "vicinity_area",
    "successful_attack",
    "attack_claimed",
];

/// Which columns are withheld from the model.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExclusionPolicy {
    excluded: Vec<String>,
}

impl Default for ExclusionPolicy {
    fn default() -> Self {
        Self::new(EXCLUDED_COLUMNS.iter().copied())
    }
}

impl ExclusionPolicy {
    pub fn new<S: Into<String>>(columns: impl IntoIterator<Item = S>) -> Self {
        let mut excluded: Vec<String> = Vec::new();
        for c in columns {
            let c = c.into();
            if !excluded.contains(&c) {
                excluded.push(c);
            }
        }
        Self { excluded }
    }

    pub fn excluded(&self) -> &[String] {
        &self.excluded
    }

    pub fn is_excluded(&self, column: &str) -> bool {
        self.excluded.iter().any(|c| c == column)
    }

    /// Drop every excluded column that is present. Absent ones are ignored.
    pub fn apply(&self, frame: &RecordFrame) -> RecordFrame {
        frame.without(|name| self.is_excluded(name))
    }

    /// Separate the binary label from the allowed feature columns.
    ///
    /// The label column is always dropped from the features, whether or not
    /// the policy lists it.
    ///
    /// # Errors
    ///
    /// Fails if the label column is absent, not numeric, missing in any row,
    /// or takes a value other than 0 or 1.
    pub fn split(
        &self,
        frame: &RecordFrame,
        label: &str,
    ) -> Result<(RecordFrame, Vec<f32>), PipelineError> {
        let labels = match frame.column(label) {
            Some(Column::Numeric(values)) => binary_labels(values)?,
            Some(_) => return Err(PipelineError::LabelNotNumeric(label.to_string())),
            None => return Err(PipelineError::MissingLabel(label.to_string())),
        };
        let features = frame.without(|name| name == label || self.is_excluded(name));
        Ok((features, labels))
    }
}

fn binary_labels(values: &[f64]) -> Result<Vec<f32>, PipelineError> {
    values
        .iter()
        .enumerate()
        .map(|(row, &v)| {
            if v == 0.0 || v == 1.0 {
                Ok(v as f32)
            } else {
                Err(PipelineError::NonBinaryLabel { row, value: v })
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw() -> RecordFrame {
        RecordFrame::new()
            .with_column("year", Column::Numeric(vec![2001.0, 2002.0]))
            .with_column("num_killed", Column::Numeric(vec![3.0, 0.0]))
            .with_column("country", Column::Categorical(vec![Some("Iraq".into()), None]))
            .with_column("city", Column::Categorical(vec![Some("Mosul".into()), None]))
            .with_column(LABEL_COLUMN, Column::Numeric(vec![1.0, 0.0]))
    }

    #[test]
    fn split_keeps_complement_in_order() {
        let (features, labels) = ExclusionPolicy::default().split(&raw(), LABEL_COLUMN).unwrap();
        assert_eq!(features.names(), &["year".to_string(), "country".to_string()]);
        assert_eq!(labels, vec![1.0, 0.0]);
    }

    #[test]
    fn absent_excluded_columns_are_fine() {
        let frame = RecordFrame::new().with_column("year", Column::Numeric(vec![1.0]));
        let out = ExclusionPolicy::default().apply(&frame);
        assert_eq!(out.names(), frame.names());
    }

    #[test]
    fn label_dropped_even_if_not_listed() {
        let policy = ExclusionPolicy::new(["city"]);
        let (features, _) = policy.split(&raw(), LABEL_COLUMN).unwrap();
        assert!(features.column(LABEL_COLUMN).is_none());
        assert!(features.column("num_killed").is_some());
    }

    #[test]
    fn label_errors() {
        let policy = ExclusionPolicy::default();
        let no_label = raw().without(|n| n == LABEL_COLUMN);
        assert!(matches!(
            policy.split(&no_label, LABEL_COLUMN),
            Err(PipelineError::MissingLabel(_))
        ));

        let bad = RecordFrame::new().with_column(LABEL_COLUMN, Column::Numeric(vec![0.0, 2.0]));
        assert!(matches!(
            policy.split(&bad, LABEL_COLUMN),
            Err(PipelineError::NonBinaryLabel { row: 1, .. })
        ));

        let text = RecordFrame::new()
            .with_column(LABEL_COLUMN, Column::Categorical(vec![Some("yes".into())]));
        assert!(matches!(
            policy.split(&text, LABEL_COLUMN),
            Err(PipelineError::LabelNotNumeric(_))
        ));
    }

    #[test]
    fn default_list_has_no_duplicates() {
        let policy = ExclusionPolicy::default();
        assert_eq!(policy.excluded().len(), EXCLUDED_COLUMNS.len());
        assert!(policy.is_excluded(LABEL_COLUMN));
    }
}

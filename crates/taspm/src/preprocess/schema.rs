//! The column contract between training and inference.
//!
//! A [`FeatureSchema`] lists every input column seen at fit time, in order,
//! with how it is encoded. It travels inside the pipeline artifact and every
//! inference record is checked against it.

use super::onehot::OneHotEncoder;
use crate::data::Record;

/// Current schema layout version.
pub const SCHEMA_VERSION: u32 = 1;

/// How an input column reaches the feature vector.
#[derive(Debug, Clone, PartialEq)]
pub enum InputKind {
    /// One-hot encoded over a fitted vocabulary.
    Categorical(OneHotEncoder),
    /// Passed through unchanged.
    Numeric,
    /// Accepted as input but not used (unsupported column type).
    Dropped,
}

/// One input column.
#[derive(Debug, Clone, PartialEq)]
pub struct InputColumn {
    pub name: String,
    pub kind: InputKind,
}

/// Schema violations found while preparing a record or frame.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SchemaError {
    #[error("missing input column: {0}")]
    MissingColumn(String),

    #[error("unexpected input column: {0}")]
    UnexpectedColumn(String),

    #[error("column {column} expects a number, got {value:?}")]
    TypeMismatch { column: String, value: String },

    #[error("unsupported schema version {found} (expected {expected})")]
    Version { found: u32, expected: u32 },

    #[error("duplicate input column: {0}")]
    DuplicateColumn(String),
}

/// Ordered, versioned input schema.
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureSchema {
    version: u32,
    columns: Vec<InputColumn>,
}

impl FeatureSchema {
    /// Create a schema at the current version.
    pub fn new(columns: Vec<InputColumn>) -> Result<Self, SchemaError> {
        Self::with_version(SCHEMA_VERSION, columns)
    }

    /// Create a schema at an explicit version (used when loading artifacts).
    pub fn with_version(version: u32, columns: Vec<InputColumn>) -> Result<Self, SchemaError> {
        if version != SCHEMA_VERSION {
            return Err(SchemaError::Version {
                found: version,
                expected: SCHEMA_VERSION,
            });
        }
        for (i, c) in columns.iter().enumerate() {
            if columns[..i].iter().any(|o| o.name == c.name) {
                return Err(SchemaError::DuplicateColumn(c.name.clone()));
            }
        }
        Ok(Self { version, columns })
    }

    #[inline]
    pub fn version(&self) -> u32 {
        self.version
    }

    pub fn columns(&self) -> &[InputColumn] {
        &self.columns
    }

    pub fn column(&self, name: &str) -> Option<&InputColumn> {
        self.columns.iter().find(|c| c.name == name)
    }

    /// Input column names in fit order.
    pub fn input_names(&self) -> impl Iterator<Item = &str> {
        self.columns.iter().map(|c| c.name.as_str())
    }

    /// Width of the encoded feature vector.
    pub fn width(&self) -> usize {
        self.columns
            .iter()
            .map(|c| match &c.kind {
                InputKind::Categorical(enc) => enc.width(),
                InputKind::Numeric => 1,
                InputKind::Dropped => 0,
            })
            .sum()
    }

    /// Encoded columns in output order: indicator blocks, then numerics.
    pub(crate) fn output_order(&self) -> impl Iterator<Item = &InputColumn> {
        let categorical = self
            .columns
            .iter()
            .filter(|c| matches!(c.kind, InputKind::Categorical(_)));
        let numeric = self
            .columns
            .iter()
            .filter(|c| matches!(c.kind, InputKind::Numeric));
        categorical.chain(numeric)
    }

    /// Names of the encoded features: `column=category` or `column`.
    pub fn feature_names(&self) -> Vec<String> {
        let mut names = Vec::with_capacity(self.width());
        for c in self.output_order() {
            match &c.kind {
                InputKind::Categorical(enc) => {
                    names.extend(enc.vocabulary().iter().map(|v| format!("{}={}", c.name, v)))
                }
                InputKind::Numeric => names.push(c.name.clone()),
                InputKind::Dropped => {}
            }
        }
        names
    }

    /// Check that a record provides exactly the schema's input columns.
    pub fn validate_names<'a>(
        &self,
        names: impl IntoIterator<Item = &'a str>,
    ) -> Result<(), SchemaError> {
        let names: Vec<&str> = names.into_iter().collect();
        if let Some(extra) = names.iter().find(|n| self.column(n).is_none()) {
            return Err(SchemaError::UnexpectedColumn(extra.to_string()));
        }
        if let Some(missing) = self.columns.iter().find(|c| !names.contains(&c.name.as_str())) {
            return Err(SchemaError::MissingColumn(missing.name.clone()));
        }
        Ok(())
    }

    /// [`validate_names`](Self::validate_names) for a [`Record`].
    pub fn validate(&self, record: &Record) -> Result<(), SchemaError> {
        self.validate_names(record.names())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn schema() -> FeatureSchema {
        FeatureSchema::new(vec![
            InputColumn {
                name: "year".into(),
                kind: InputKind::Numeric,
            },
            InputColumn {
                name: "country".into(),
                kind: InputKind::Categorical(OneHotEncoder::fit([Some("Iraq"), Some("Egypt")])),
            },
            InputColumn {
                name: "flag".into(),
                kind: InputKind::Dropped,
            },
        ])
        .unwrap()
    }

    #[test]
    fn feature_names_put_indicators_first() {
        assert_eq!(
            schema().feature_names(),
            vec!["country=Egypt", "country=Iraq", "year"]
        );
        assert_eq!(schema().width(), 3);
    }

    #[test]
    fn validate_reports_missing_and_extra() {
        let s = schema();
        let ok = Record::new().with("country", "Iraq").with("year", 2001).with("flag", 1);
        assert!(s.validate(&ok).is_ok());

        let missing = Record::new().with("year", 2001).with("flag", 1);
        assert_eq!(
            s.validate(&missing),
            Err(SchemaError::MissingColumn("country".into()))
        );

        let extra = ok.clone().with("city", "Mosul");
        assert_eq!(
            s.validate(&extra),
            Err(SchemaError::UnexpectedColumn("city".into()))
        );
    }

    #[test]
    fn rejects_other_versions_and_duplicates() {
        assert!(matches!(
            FeatureSchema::with_version(99, vec![]),
            Err(SchemaError::Version { found: 99, .. })
        ));
        let dup = vec![
            InputColumn { name: "a".into(), kind: InputKind::Numeric },
            InputColumn { name: "a".into(), kind: InputKind::Numeric },
        ];
        assert!(matches!(
            FeatureSchema::new(dup),
            Err(SchemaError::DuplicateColumn(_))
        ));
    }
}

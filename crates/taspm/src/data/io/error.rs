//! Dataset loading errors.

/// Why an incident dataset could not be turned into a [`RecordFrame`](crate::data::RecordFrame).
#[derive(Debug, thiserror::Error)]
pub enum DatasetLoadError {
    #[error("could not read dataset: {0}")]
    Io(#[from] std::io::Error),

    #[error("could not parse dataset: {0}")]
    Arrow(#[from] arrow::error::ArrowError),

    /// A column named by the inferred schema is absent from a batch.
    #[error("column {0} is missing from a record batch")]
    MissingColumn(String),

    #[error("column {column} was inferred as {expected} but decoded as {got}")]
    UnsupportedType {
        column: String,
        expected: String,
        got: String,
    },

    #[error("column {0} appears more than once in the header")]
    DuplicateColumn(String),

    #[error("empty dataset: {0}")]
    Empty(String),
}

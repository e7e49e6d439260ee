//! Pipeline artifact persistence (JSON).
//!
//! The artifact is one JSON document:
//!
//! ```text
//! { "format": "taspm-pipeline", "format_version": 1, "schema": {..}, "model": {..} }
//! ```
//!
//! The envelope is checked before the payload is parsed, so an artifact from
//! another format version fails with [`PersistError::Version`] rather than a
//! JSON shape error.

mod convert;
pub mod schema;

use std::fs::File;
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::Path;

use crate::pipeline::Pipeline;
use crate::preprocess::SchemaError;
use schema::{ArtifactHeader, PipelineArtifact};

/// Format tag stored in every artifact.
pub const FORMAT_TAG: &str = "taspm-pipeline";

/// Current artifact layout version.
pub const FORMAT_VERSION: u32 = 1;

/// Errors reading or writing a pipeline artifact.
#[derive(Debug, thiserror::Error)]
pub enum PersistError {
    #[error("cannot access artifact file: {0}")]
    Io(#[from] std::io::Error),

    #[error("malformed artifact JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("not a pipeline artifact (format {found:?})")]
    Format { found: String },

    #[error("unsupported artifact version {found} (expected {expected})")]
    Version { found: u32, expected: u32 },

    #[error("invalid schema: {0}")]
    Schema(#[from] SchemaError),

    #[error("invalid schema: {0}")]
    InvalidSchema(String),

    #[error("invalid model: {0}")]
    InvalidModel(String),

    #[error("schema encodes {schema} features but the model expects {model}")]
    WidthMismatch { schema: usize, model: usize },
}

pub(crate) fn check_header(format: &str, format_version: u32) -> Result<(), PersistError> {
    if format != FORMAT_TAG {
        return Err(PersistError::Format {
            found: format.to_string(),
        });
    }
    if format_version != FORMAT_VERSION {
        return Err(PersistError::Version {
            found: format_version,
            expected: FORMAT_VERSION,
        });
    }
    Ok(())
}

/// Serialize a pipeline into `writer`.
pub fn write_pipeline<W: Write>(pipeline: &Pipeline, writer: W) -> Result<(), PersistError> {
    let artifact = PipelineArtifact::from(pipeline);
    serde_json::to_writer(writer, &artifact)?;
    Ok(())
}

/// Deserialize and validate a pipeline from `reader`.
pub fn read_pipeline<R: Read>(reader: R) -> Result<Pipeline, PersistError> {
    let value: serde_json::Value = serde_json::from_reader(reader)?;
    let header: ArtifactHeader = serde_json::from_value(value.clone())?;
    check_header(&header.format, header.format_version)?;
    let artifact: PipelineArtifact = serde_json::from_value(value)?;
    Pipeline::try_from(artifact)
}

impl Pipeline {
    /// Write the artifact to `path`, replacing any existing file.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), PersistError> {
        let mut writer = BufWriter::new(File::create(path.as_ref())?);
        write_pipeline(self, &mut writer)?;
        writer.flush()?;
        Ok(())
    }

    /// Read and validate an artifact from `path`.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, PersistError> {
        let reader = BufReader::new(File::open(path.as_ref())?);
        read_pipeline(reader)
    }

    pub fn to_json(&self) -> Result<String, PersistError> {
        Ok(serde_json::to_string(&PipelineArtifact::from(self))?)
    }

    pub fn from_json(json: &str) -> Result<Self, PersistError> {
        read_pipeline(json.as_bytes())
    }
}

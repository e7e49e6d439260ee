//! Dataset loaders for tabular incident files.
//!
//! Column kinds are decided from content: columns whose inferred type is
//! numeric stay numeric, booleans stay boolean, everything else (strings,
//! dates, mixed content) becomes categorical text.

pub mod csv;

mod error;
mod record_batches;

pub use error::DatasetLoadError;

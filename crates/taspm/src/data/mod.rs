//! Tabular incident data.
//!
//! - [`RecordFrame`]: columnar frame of named [`Column`]s (training side)
//! - [`Record`]: a single ordered row of named [`Value`]s (inference side)
//! - [`io`]: dataset loaders

pub mod io;

mod frame;
mod record;

pub use frame::{Column, ColumnKind, RecordFrame};
pub use record::{Record, Value};

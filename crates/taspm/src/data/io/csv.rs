//! CSV dataset loader.
//!
//! The file must have a header row. Column types are inferred from the whole
//! file by Arrow's CSV schema inference, then mapped to [`ColumnKind`]s.
//!
//! [`ColumnKind`]: crate::data::ColumnKind

use std::fs::File;
use std::io::{BufReader, Read, Seek};
use std::path::Path;
use std::sync::Arc;

use arrow::csv::reader::Format;
use arrow::csv::ReaderBuilder;
use arrow::record_batch::RecordBatch;

use super::error::DatasetLoadError;
use super::record_batches::LoadedBatches;
use crate::data::RecordFrame;

const BATCH_SIZE: usize = 8192;

// =============================================================================
// Public API
// =============================================================================

/// Load a CSV file into a [`RecordFrame`].
pub fn load_csv(path: impl AsRef<Path>) -> Result<RecordFrame, DatasetLoadError> {
	let file = File::open(path.as_ref())?;
	read_csv(BufReader::new(file))
}

/// Read CSV content from any seekable reader into a [`RecordFrame`].
pub fn read_csv<R: Read + Seek>(mut reader: R) -> Result<RecordFrame, DatasetLoadError> {
	let format = Format::default().with_header(true);
	let (schema, n_records) = format.infer_schema(&mut reader, None)?;
	if schema.fields().is_empty() {
		return Err(DatasetLoadError::Empty("no header row".into()));
	}
	reader.rewind()?;

	let schema = Arc::new(schema);
	let csv = ReaderBuilder::new(schema.clone())
		.with_header(true)
		.with_batch_size(BATCH_SIZE)
		.build(reader)?;
	let batches: Result<Vec<RecordBatch>, _> = csv.collect();
	let batches = batches?;

	tracing::debug!(rows = n_records, columns = schema.fields().len(), "read csv");

	LoadedBatches::new(schema, batches).to_frame()
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
	use super::*;
	use crate::data::{Column, ColumnKind};
	use std::io::{Cursor, Write};
	use tempfile::NamedTempFile;

	const SAMPLE: &str = "\
year,country,multiple_attacks,num_killed,successful_attack
2014,Iraq,0,3,1
2015,Egypt,Unknown,,0
2016,Iraq,1,0.5,1
";

	#[test]
	fn infers_column_kinds() {
		let frame = read_csv(Cursor::new(SAMPLE)).unwrap();

		assert_eq!(frame.n_rows(), 3);
		assert_eq!(frame.n_columns(), 5);
		assert_eq!(frame.column("year").unwrap().kind(), ColumnKind::Numeric);
		assert_eq!(frame.column("country").unwrap().kind(), ColumnKind::Categorical);
		// Mixed digits and text is categorical, like an object column.
		assert_eq!(
			frame.column("multiple_attacks"),
			Some(&Column::Categorical(vec![
				Some("0".into()),
				Some("Unknown".into()),
				Some("1".into())
			]))
		);
		match frame.column("num_killed").unwrap() {
			Column::Numeric(v) => assert!(v[1].is_nan()),
			other => panic!("unexpected column {other:?}"),
		}
	}

	#[test]
	fn loads_from_path() {
		let mut file = NamedTempFile::new().unwrap();
		file.write_all(SAMPLE.as_bytes()).unwrap();
		file.flush().unwrap();

		let frame = load_csv(file.path()).unwrap();
		assert_eq!(frame.names()[0], "year");
		assert_eq!(frame.n_rows(), 3);
	}

	#[test]
	fn missing_file_is_io_error() {
		let err = load_csv("definitely/not/here.csv").unwrap_err();
		assert!(matches!(err, DatasetLoadError::Io(_)));
	}

	#[test]
	fn empty_input_is_rejected() {
		let err = read_csv(Cursor::new("")).unwrap_err();
		assert!(matches!(
			err,
			DatasetLoadError::Empty(_) | DatasetLoadError::Arrow(_)
		));
	}

	#[test]
	fn repeated_header_name_is_rejected() {
		let csv = "year,country,country,successful_attack\n2014,Iraq,Iraq,1\n2015,Egypt,Egypt,0\n";
		let err = read_csv(Cursor::new(csv)).unwrap_err();
		assert!(
			matches!(&err, DatasetLoadError::DuplicateColumn(name) if name == "country"),
			"unexpected error {err:?}"
		);
	}
}

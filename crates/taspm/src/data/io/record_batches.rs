//! Arrow `RecordBatch` to [`RecordFrame`] conversion.

use std::sync::Arc;

use arrow::array::{Array, ArrayRef, BooleanArray, Float64Array, StringArray};
use arrow::compute::cast;
use arrow::datatypes::{DataType, Schema};
use arrow::record_batch::RecordBatch;

use super::error::DatasetLoadError;
use crate::data::{Column, ColumnKind, RecordFrame};

pub(super) struct LoadedBatches {
    schema: Arc<Schema>,
    batches: Vec<RecordBatch>,
}

impl LoadedBatches {
    pub(super) fn new(schema: Arc<Schema>, batches: Vec<RecordBatch>) -> Self {
        Self { schema, batches }
    }

    pub(super) fn to_frame(&self) -> Result<RecordFrame, DatasetLoadError> {
        let mut frame = RecordFrame::new();
        for field in self.schema.fields() {
            if frame.position(field.name()).is_some() {
                return Err(DatasetLoadError::DuplicateColumn(field.name().clone()));
            }
            let kind = kind_for(field.data_type());
            let column = extract_column(&self.batches, field.name(), kind)?;
            frame.push_column(field.name().clone(), column);
        }
        Ok(frame)
    }
}

/// Decide the logical kind of an inferred Arrow type.
///
/// All-null columns come back as `Null` and are treated as numeric (NaN).
fn kind_for(data_type: &DataType) -> ColumnKind {
    match data_type {
        DataType::Boolean => ColumnKind::Boolean,
        DataType::Null => ColumnKind::Numeric,
        t if t.is_numeric() => ColumnKind::Numeric,
        _ => ColumnKind::Categorical,
    }
}

fn extract_column(
    batches: &[RecordBatch],
    name: &str,
    kind: ColumnKind,
) -> Result<Column, DatasetLoadError> {
    let mut column = match kind {
        ColumnKind::Numeric => Column::Numeric(Vec::new()),
        ColumnKind::Categorical => Column::Categorical(Vec::new()),
        ColumnKind::Boolean => Column::Boolean(Vec::new()),
    };

    for batch in batches {
        let array = batch
            .column_by_name(name)
            .ok_or_else(|| DatasetLoadError::MissingColumn(name.into()))?;

        match &mut column {
            Column::Numeric(values) => {
                let casted = cast(array, &DataType::Float64)?;
                let arr = downcast::<Float64Array>(&casted, name, "Float64")?;
                values.extend(arr.iter().map(|v| v.unwrap_or(f64::NAN)));
            }
            Column::Categorical(values) => {
                let casted = cast(array, &DataType::Utf8)?;
                let arr = downcast::<StringArray>(&casted, name, "Utf8")?;
                values.extend(arr.iter().map(|v| v.map(str::to_string)));
            }
            Column::Boolean(values) => {
                let arr = downcast::<BooleanArray>(array, name, "Boolean")?;
                values.extend(arr.iter());
            }
        }
    }

    Ok(column)
}

fn downcast<'a, T: 'static>(
    array: &'a ArrayRef,
    name: &str,
    expected: &str,
) -> Result<&'a T, DatasetLoadError> {
    array
        .as_any()
        .downcast_ref::<T>()
        .ok_or_else(|| DatasetLoadError::UnsupportedType {
            column: name.into(),
            expected: expected.into(),
            got: format!("{:?}", array.data_type()),
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use arrow::array::Int64Array;
    use arrow::datatypes::Field;

    #[test]
    fn converts_mixed_batches() {
        let schema = Arc::new(Schema::new(vec![
            Field::new("year", DataType::Int64, true),
            Field::new("country", DataType::Utf8, true),
            Field::new("extended", DataType::Boolean, true),
        ]));
        let batch = |years: Vec<Option<i64>>, countries: Vec<Option<&str>>, ext: Vec<Option<bool>>| {
            RecordBatch::try_new(
                schema.clone(),
                vec![
                    Arc::new(Int64Array::from(years)) as ArrayRef,
                    Arc::new(StringArray::from(countries)) as ArrayRef,
                    Arc::new(BooleanArray::from(ext)) as ArrayRef,
                ],
            )
            .unwrap()
        };

        let loaded = LoadedBatches::new(
            schema.clone(),
            vec![
                batch(vec![Some(2001), None], vec![Some("Iraq"), None], vec![Some(true), None]),
                batch(vec![Some(2015)], vec![Some("Egypt")], vec![Some(false)]),
            ],
        );
        let frame = loaded.to_frame().unwrap();

        assert_eq!(frame.n_rows(), 3);
        match frame.column("year").unwrap() {
            Column::Numeric(v) => {
                assert_eq!(v[0], 2001.0);
                assert!(v[1].is_nan());
                assert_eq!(v[2], 2015.0);
            }
            other => panic!("unexpected column {other:?}"),
        }
        assert_eq!(
            frame.column("country"),
            Some(&Column::Categorical(vec![Some("Iraq".into()), None, Some("Egypt".into())]))
        );
        assert_eq!(frame.column("extended").unwrap().kind(), ColumnKind::Boolean);
    }

    #[test]
    fn non_numeric_types_become_categorical() {
        assert_eq!(kind_for(&DataType::Date32), ColumnKind::Categorical);
        assert_eq!(kind_for(&DataType::Float32), ColumnKind::Numeric);
        assert_eq!(kind_for(&DataType::Null), ColumnKind::Numeric);
    }
}

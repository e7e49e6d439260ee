//! Column transform: one-hot for categoricals, passthrough for numerics.

use ndarray::{Array1, Array2, ArrayViewMut1};

use super::onehot::OneHotEncoder;
use super::schema::{FeatureSchema, InputColumn, InputKind, SchemaError};
use crate::data::{Column, Record, RecordFrame, Value};

/// Fitted column transform producing fixed-width `f32` feature vectors.
///
/// Output layout is fixed at fit time: every categorical column's indicator
/// block in input order, then every numeric column in input order.
#[derive(Debug, Clone, PartialEq)]
pub struct ColumnTransform {
    schema: FeatureSchema,
    /// `(input column index, output offset)` in output order.
    slots: Vec<(usize, usize)>,
    width: usize,
}

impl ColumnTransform {
    /// Fit on a feature frame, capturing each categorical vocabulary.
    ///
    /// Boolean columns are kept in the schema as dropped inputs.
    pub fn fit(frame: &RecordFrame) -> Result<Self, SchemaError> {
        let columns = frame
            .iter()
            .map(|(name, column)| {
                let kind = match column {
                    Column::Categorical(values) => {
                        InputKind::Categorical(OneHotEncoder::fit(values.iter().map(|v| v.as_deref())))
                    }
                    Column::Numeric(_) => InputKind::Numeric,
                    Column::Boolean(_) => {
                        tracing::warn!(column = name, "boolean column is not encoded, dropping");
                        InputKind::Dropped
                    }
                };
                InputColumn {
                    name: name.to_string(),
                    kind,
                }
            })
            .collect();

        Ok(Self::from_schema(FeatureSchema::new(columns)?))
    }

    /// Build the transform for an existing schema.
    pub fn from_schema(schema: FeatureSchema) -> Self {
        let mut slots = Vec::new();
        let mut offset = 0;
        for c in schema.output_order() {
            let idx = schema
                .columns()
                .iter()
                .position(|o| o.name == c.name)
                .unwrap_or_default();
            slots.push((idx, offset));
            offset += match &c.kind {
                InputKind::Categorical(enc) => enc.width(),
                InputKind::Numeric => 1,
                InputKind::Dropped => 0,
            };
        }
        Self {
            schema,
            slots,
            width: offset,
        }
    }

    pub fn schema(&self) -> &FeatureSchema {
        &self.schema
    }

    /// Width of the produced feature vector.
    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    pub fn feature_names(&self) -> Vec<String> {
        self.schema.feature_names()
    }

    /// Encode one record.
    pub fn transform_record(&self, record: &Record) -> Result<Array1<f32>, SchemaError> {
        self.schema.validate(record)?;
        let mut out = Array1::<f32>::zeros(self.width);
        for &(idx, offset) in &self.slots {
            let input = &self.schema.columns()[idx];
            let value = record.get(&input.name).unwrap_or(&Value::Missing);
            write_value(input, value, offset, out.view_mut())?;
        }
        Ok(out)
    }

    /// Encode every row of a frame into a `[n_rows, width]` matrix.
    pub fn transform_frame(&self, frame: &RecordFrame) -> Result<Array2<f32>, SchemaError> {
        self.schema.validate_names(frame.names().iter().map(String::as_str))?;
        let n_rows = frame.n_rows();
        let mut out = Array2::<f32>::zeros((n_rows, self.width));

        for &(idx, offset) in &self.slots {
            let input = &self.schema.columns()[idx];
            let column = frame
                .column(&input.name)
                .ok_or_else(|| SchemaError::MissingColumn(input.name.clone()))?;

            match (&input.kind, column) {
                (InputKind::Categorical(enc), Column::Categorical(values)) => {
                    let w = enc.width();
                    for (row, v) in values.iter().enumerate() {
                        let mut row_view = out.row_mut(row);
                        if let Some(slice) = row_view.as_slice_mut() {
                            enc.write(v.as_deref(), &mut slice[offset..offset + w]);
                        }
                    }
                }
                (InputKind::Numeric, Column::Numeric(values)) => {
                    for (row, &v) in values.iter().enumerate() {
                        out[[row, offset]] = v as f32;
                    }
                }
                _ => {
                    for row in 0..n_rows {
                        write_value(input, &column.value(row), offset, out.row_mut(row))?;
                    }
                }
            }
        }
        Ok(out)
    }
}

fn write_value(
    input: &InputColumn,
    value: &Value,
    offset: usize,
    mut out: ArrayViewMut1<'_, f32>,
) -> Result<(), SchemaError> {
    match &input.kind {
        InputKind::Categorical(enc) => {
            let category = value.as_category();
            let mut block = vec![0.0f32; enc.width()];
            enc.write(category.as_deref(), &mut block);
            for (i, b) in block.into_iter().enumerate() {
                out[offset + i] = b;
            }
        }
        InputKind::Numeric => {
            let v = value.as_number().ok_or_else(|| SchemaError::TypeMismatch {
                column: input.name.clone(),
                value: value.to_string(),
            })?;
            out[offset] = v as f32;
        }
        InputKind::Dropped => {}
    }
    Ok(())
}

//! Columnar record frames.

use super::record::{Record, Value};

/// Logical kind of a frame column, decided at load time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnKind {
    /// Floating point values; missing is NaN.
    Numeric,
    /// Free-form category labels; missing is `None`.
    Categorical,
    /// Boolean flags. Neither encoded nor passed through by the transform.
    Boolean,
}

/// A single named column.
#[derive(Debug, Clone, PartialEq)]
pub enum Column {
    Numeric(Vec<f64>),
    Categorical(Vec<Option<String>>),
    Boolean(Vec<Option<bool>>),
}

impl Column {
    pub fn kind(&self) -> ColumnKind {
        match self {
            Column::Numeric(_) => ColumnKind::Numeric,
            Column::Categorical(_) => ColumnKind::Categorical,
            Column::Boolean(_) => ColumnKind::Boolean,
        }
    }

    pub fn len(&self) -> usize {
        match self {
            Column::Numeric(v) => v.len(),
            Column::Categorical(v) => v.len(),
            Column::Boolean(v) => v.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Cell at `row` as a [`Value`].
    pub fn value(&self, row: usize) -> Value {
        match self {
            Column::Numeric(v) => {
                let x = v[row];
                if x.is_nan() { Value::Missing } else { Value::Number(x) }
            }
            Column::Categorical(v) => match &v[row] {
                Some(s) => Value::Text(s.clone()),
                None => Value::Missing,
            },
            Column::Boolean(v) => match v[row] {
                Some(b) => Value::Number(if b { 1.0 } else { 0.0 }),
                None => Value::Missing,
            },
        }
    }

    fn extend(&mut self, other: Column) -> bool {
        match (self, other) {
            (Column::Numeric(a), Column::Numeric(b)) => a.extend(b),
            (Column::Categorical(a), Column::Categorical(b)) => a.extend(b),
            (Column::Boolean(a), Column::Boolean(b)) => a.extend(b),
            _ => return false,
        }
        true
    }
}

/// Columnar frame with named, equal-length columns in a fixed order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RecordFrame {
    names: Vec<String>,
    columns: Vec<Column>,
    n_rows: usize,
}

impl RecordFrame {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a column at the end.
    ///
    /// # Panics
    ///
    /// Panics if the name is already present or the length differs from the
    /// existing columns.
    pub fn push_column(&mut self, name: impl Into<String>, column: Column) {
        let name = name.into();
        assert!(!self.names.contains(&name), "duplicate column {name}");
        if self.columns.is_empty() {
            self.n_rows = column.len();
        } else {
            assert_eq!(column.len(), self.n_rows, "column {name} has wrong length");
        }
        self.names.push(name);
        self.columns.push(column);
    }

    /// Builder-style [`push_column`](Self::push_column).
    pub fn with_column(mut self, name: impl Into<String>, column: Column) -> Self {
        self.push_column(name, column);
        self
    }

    pub fn n_rows(&self) -> usize {
        self.n_rows
    }

    pub fn n_columns(&self) -> usize {
        self.columns.len()
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn column(&self, name: &str) -> Option<&Column> {
        self.position(name).map(|i| &self.columns[i])
    }

    pub fn position(&self, name: &str) -> Option<usize> {
        self.names.iter().position(|n| n == name)
    }

    /// Iterate `(name, column)` pairs in order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Column)> {
        self.names.iter().map(String::as_str).zip(self.columns.iter())
    }

    /// Frame with the columns rejected by `drop` removed, order preserved.
    pub fn without(&self, mut drop: impl FnMut(&str) -> bool) -> RecordFrame {
        let mut out = RecordFrame::new();
        for (name, column) in self.iter() {
            if !drop(name) {
                out.push_column(name, column.clone());
            }
        }
        if out.columns.is_empty() {
            out.n_rows = self.n_rows;
        }
        out
    }

    /// Row `row` as a [`Record`].
    pub fn record(&self, row: usize) -> Record {
        self.iter().map(|(name, col)| (name, col.value(row))).collect()
    }

    /// Append the rows of `other`.
    ///
    /// Returns `false` (leaving `self` untouched) when the column names or
    /// kinds differ.
    pub fn append(&mut self, other: RecordFrame) -> bool {
        if self.columns.is_empty() {
            *self = other;
            return true;
        }
        let compatible = self.names == other.names
            && self
                .columns
                .iter()
                .zip(other.columns.iter())
                .all(|(a, b)| a.kind() == b.kind());
        if !compatible {
            return false;
        }
        self.n_rows += other.n_rows;
        for (dst, src) in self.columns.iter_mut().zip(other.columns) {
            dst.extend(src);
        }
        true
    }
}

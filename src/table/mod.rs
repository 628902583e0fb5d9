//! In-memory columnar tables.
//!
//! A [`Table`] is an ordered set of uniquely named [`Column`]s sharing one row
//! count. Column buffers are reference counted: cloning a table is shallow and
//! cheap, and every mutation goes through copy-on-write, so a clone never
//! observes changes made to the table it was cloned from (and vice versa).
//!
//! # Example
//!
//! ```rust
//! use column_adapters::table::{Column, DTypeSelector, Table};
//!
//! let table = Table::new(vec![
//!     ("age", Column::from(vec![22.0, 38.0])),
//!     ("sex", Column::from(vec!["male", "female"])),
//! ])
//! .unwrap();
//!
//! let numeric = table.select_dtypes(&[DTypeSelector::Numeric], &[]).unwrap();
//! assert_eq!(numeric.column_names(), ["age"]);
//! ```

mod column;
mod io;

pub use column::{Column, ColumnSliceMut, DTypeSelector, DataType};

use crate::preprocessing::error::PreprocessingError;
use std::collections::HashSet;
use std::sync::Arc;

/// An ordered collection of named, typed columns with a shared row count.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Table {
    names: Vec<String>,
    columns: Vec<Arc<Column>>,
    n_rows: usize,
}

impl Table {
    /// Build a table from `(name, column)` pairs.
    ///
    /// # Errors
    /// - [`PreprocessingError::DuplicateColumn`] if a name repeats
    /// - [`PreprocessingError::LengthMismatch`] if columns differ in length
    pub fn new<N: Into<String>>(columns: Vec<(N, Column)>) -> Result<Self, PreprocessingError> {
        let n_rows = columns.first().map(|(_, col)| col.len()).unwrap_or(0);
        let mut table = Table::empty(n_rows);
        for (name, column) in columns {
            let name = name.into();
            if table.contains(&name) {
                return Err(PreprocessingError::DuplicateColumn(name));
            }
            table.set_column(name, column)?;
        }
        Ok(table)
    }

    /// A table with no columns and `n_rows` rows.
    pub fn empty(n_rows: usize) -> Self {
        Self {
            names: Vec::new(),
            columns: Vec::new(),
            n_rows,
        }
    }

    pub fn n_rows(&self) -> usize {
        self.n_rows
    }

    pub fn n_columns(&self) -> usize {
        self.names.len()
    }

    /// Check if the table has no columns.
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Column names in table order.
    pub fn column_names(&self) -> &[String] {
        &self.names
    }

    /// `(name, dtype)` pairs in table order.
    pub fn dtypes(&self) -> Vec<(&str, DataType)> {
        self.iter().map(|(name, col)| (name, col.dtype())).collect()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.position(name).is_some()
    }

    fn position(&self, name: &str) -> Option<usize> {
        self.names.iter().position(|n| n == name)
    }

    /// Borrow a column by name.
    pub fn column(&self, name: &str) -> Result<&Column, PreprocessingError> {
        self.position(name)
            .map(|idx| self.columns[idx].as_ref())
            .ok_or_else(|| PreprocessingError::UnknownColumn(name.to_string()))
    }

    /// Mutable, length-preserving access to a column's values.
    ///
    /// The column buffer is cloned first if another table still shares it.
    pub fn column_mut(&mut self, name: &str) -> Result<ColumnSliceMut<'_>, PreprocessingError> {
        let idx = self
            .position(name)
            .ok_or_else(|| PreprocessingError::UnknownColumn(name.to_string()))?;
        Ok(Arc::make_mut(&mut self.columns[idx]).as_slice_mut())
    }

    /// Iterate over `(name, column)` pairs in table order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Column)> {
        self.names
            .iter()
            .map(String::as_str)
            .zip(self.columns.iter().map(Arc::as_ref))
    }

    /// Insert a column, replacing any existing column with the same name.
    ///
    /// A replaced column keeps its position; a new one is appended. A table
    /// without columns and rows adopts the length of its first column.
    pub fn set_column(
        &mut self,
        name: impl Into<String>,
        column: Column,
    ) -> Result<(), PreprocessingError> {
        let name = name.into();
        if self.is_empty() && self.n_rows == 0 {
            self.n_rows = column.len();
        }
        if column.len() != self.n_rows {
            return Err(PreprocessingError::LengthMismatch {
                column: name,
                expected: self.n_rows,
                got: column.len(),
            });
        }
        match self.position(&name) {
            Some(idx) => self.columns[idx] = Arc::new(column),
            None => {
                self.names.push(name);
                self.columns.push(Arc::new(column));
            }
        }
        Ok(())
    }

    /// Sub-table holding the named columns, in the requested order.
    ///
    /// The result shares column buffers with `self`.
    pub fn select<S: AsRef<str>>(&self, names: &[S]) -> Result<Table, PreprocessingError> {
        let mut subset = Table::empty(self.n_rows);
        for name in names {
            let name = name.as_ref();
            let idx = self
                .position(name)
                .ok_or_else(|| PreprocessingError::UnknownColumn(name.to_string()))?;
            if subset.contains(name) {
                return Err(PreprocessingError::DuplicateColumn(name.to_string()));
            }
            subset.names.push(name.to_string());
            subset.columns.push(Arc::clone(&self.columns[idx]));
        }
        Ok(subset)
    }

    /// Sub-table of the columns whose type matches `include` and not `exclude`.
    ///
    /// An empty `include` keeps every type not excluded.
    ///
    /// # Errors
    /// [`PreprocessingError::InvalidParameter`] if an include selector and an
    /// exclude selector can match the same data type.
    pub fn select_dtypes(
        &self,
        include: &[DTypeSelector],
        exclude: &[DTypeSelector],
    ) -> Result<Table, PreprocessingError> {
        if let Some((inc, exc)) = include
            .iter()
            .flat_map(|inc| exclude.iter().map(move |exc| (inc, exc)))
            .find(|(inc, exc)| inc.overlaps(**exc))
        {
            return Err(PreprocessingError::InvalidParameter(format!(
                "include and exclude dtypes overlap: {} / {}",
                inc, exc
            )));
        }

        let keep = |dtype: DataType| {
            (include.is_empty() || include.iter().any(|s| s.matches(dtype)))
                && !exclude.iter().any(|s| s.matches(dtype))
        };

        let mut subset = Table::empty(self.n_rows);
        for (name, column) in self.names.iter().zip(&self.columns) {
            if keep(column.dtype()) {
                subset.names.push(name.clone());
                subset.columns.push(Arc::clone(column));
            }
        }
        Ok(subset)
    }

    /// Write the columns of `values` into the named columns, by position.
    ///
    /// The names of `values`' own columns are ignored. Nothing is written
    /// unless every check passes.
    ///
    /// # Errors
    /// - [`PreprocessingError::FeatureMismatch`] if widths differ
    /// - [`PreprocessingError::LengthMismatch`] if row counts differ
    /// - [`PreprocessingError::UnknownColumn`] if a target name is missing
    pub fn assign<S: AsRef<str>>(
        &mut self,
        names: &[S],
        values: Table,
    ) -> Result<(), PreprocessingError> {
        if names.len() != values.n_columns() {
            return Err(PreprocessingError::FeatureMismatch {
                expected_features: names.len(),
                got_features: values.n_columns(),
            });
        }

        let mut targets = Vec::with_capacity(names.len());
        let mut seen = HashSet::with_capacity(names.len());
        for name in names {
            let name = name.as_ref();
            let idx = self
                .position(name)
                .ok_or_else(|| PreprocessingError::UnknownColumn(name.to_string()))?;
            if !seen.insert(idx) {
                return Err(PreprocessingError::DuplicateColumn(name.to_string()));
            }
            if values.n_rows != self.n_rows {
                return Err(PreprocessingError::LengthMismatch {
                    column: name.to_string(),
                    expected: self.n_rows,
                    got: values.n_rows,
                });
            }
            targets.push(idx);
        }

        for (idx, column) in targets.into_iter().zip(values.columns) {
            self.columns[idx] = column;
        }
        Ok(())
    }

    /// Duplicate with freshly allocated column buffers.
    pub fn deep_copy(&self) -> Table {
        Table {
            names: self.names.clone(),
            columns: self
                .columns
                .iter()
                .map(|col| Arc::new(col.as_ref().clone()))
                .collect(),
            n_rows: self.n_rows,
        }
    }

    /// Whether both tables hold the very same buffer for column `name`.
    pub fn shares_column(&self, other: &Table, name: &str) -> bool {
        match (self.position(name), other.position(name)) {
            (Some(a), Some(b)) => Arc::ptr_eq(&self.columns[a], &other.columns[b]),
            _ => false,
        }
    }

    /// Row-major `(n_rows, n_columns)` matrix of an all-numeric table.
    #[cfg(feature = "ndarray")]
    pub fn to_array2(&self) -> Result<ndarray::Array2<f64>, PreprocessingError> {
        let mut array = ndarray::Array2::<f64>::zeros((self.n_rows, self.n_columns()));
        for (j, (name, column)) in self.iter().enumerate() {
            let values = column
                .to_f64_vec()
                .ok_or_else(|| PreprocessingError::TypeMismatch {
                    column: name.to_string(),
                    expected: "numeric".to_string(),
                    got: column.dtype().to_string(),
                })?;
            for (i, value) in values.into_iter().enumerate() {
                array[[i, j]] = value;
            }
        }
        Ok(array)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_test_table() -> Table {
        Table::new(vec![
            ("a", Column::from(vec![1.0, 2.0, 3.0])),
            ("b", Column::from(vec![10i64, 20, 30])),
            ("c", Column::from(vec!["x", "y", "z"])),
            ("d", Column::from(vec![true, false, true])),
        ])
        .unwrap()
    }

    #[test]
    fn test_table_shape() {
        let table = create_test_table();
        assert_eq!(table.n_rows(), 3);
        assert_eq!(table.n_columns(), 4);
        assert_eq!(table.column_names(), ["a", "b", "c", "d"]);
    }

    #[test]
    fn test_table_rejects_duplicate_names() {
        let result = Table::new(vec![
            ("a", Column::from(vec![1.0])),
            ("a", Column::from(vec![2.0])),
        ]);
        assert!(matches!(result, Err(PreprocessingError::DuplicateColumn(name)) if name == "a"));
    }

    #[test]
    fn test_table_rejects_ragged_columns() {
        let result = Table::new(vec![
            ("a", Column::from(vec![1.0, 2.0])),
            ("b", Column::from(vec![1.0])),
        ]);
        assert!(matches!(
            result,
            Err(PreprocessingError::LengthMismatch {
                expected: 2,
                got: 1,
                ..
            })
        ));
    }

    #[test]
    fn test_select_keeps_requested_order() {
        let table = create_test_table();
        let subset = table.select(&["c", "a"]).unwrap();
        assert_eq!(subset.column_names(), ["c", "a"]);
        assert_eq!(subset.n_rows(), 3);
        assert!(subset.shares_column(&table, "a"));
    }

    #[test]
    fn test_select_unknown_column() {
        let table = create_test_table();
        let result = table.select(&["a", "missing"]);
        assert!(matches!(
            result,
            Err(PreprocessingError::UnknownColumn(name)) if name == "missing"
        ));
    }

    #[test]
    fn test_select_dtypes_include_numeric() {
        let table = create_test_table();
        let subset = table.select_dtypes(&[DTypeSelector::Numeric], &[]).unwrap();
        assert_eq!(subset.column_names(), ["a", "b"]);
    }

    #[test]
    fn test_select_dtypes_exclude_only() {
        let table = create_test_table();
        let subset = table
            .select_dtypes(&[], &[DataType::Utf8.into(), DataType::Boolean.into()])
            .unwrap();
        assert_eq!(subset.column_names(), ["a", "b"]);
    }

    #[test]
    fn test_select_dtypes_include_and_exclude() {
        let table = create_test_table();
        let subset = table
            .select_dtypes(
                &[DataType::Float64.into(), DataType::Utf8.into()],
                &[DataType::Int64.into()],
            )
            .unwrap();
        assert_eq!(subset.column_names(), ["a", "c"]);
    }

    #[test]
    fn test_select_dtypes_overlap_is_rejected() {
        let table = create_test_table();
        let result = table.select_dtypes(&[DTypeSelector::Numeric], &[DataType::Int64.into()]);
        assert!(matches!(result, Err(PreprocessingError::InvalidParameter(_))));
    }

    #[test]
    fn test_select_dtypes_without_match_keeps_row_count() {
        let table = create_test_table();
        let subset = table
            .select_dtypes(&[DataType::Boolean.into()], &[])
            .unwrap()
            .select_dtypes(&[DataType::Utf8.into()], &[])
            .unwrap();
        assert!(subset.is_empty());
        assert_eq!(subset.n_rows(), 3);
    }

    #[test]
    fn test_assign_by_position() {
        let mut table = create_test_table();
        let values = Table::new(vec![
            ("ignored_0", Column::from(vec![0.0, 0.0, 0.0])),
            ("ignored_1", Column::from(vec![1.0, 1.0, 1.0])),
        ])
        .unwrap();
        table.assign(&["b", "a"], values).unwrap();

        assert_eq!(table.column("b").unwrap().as_f64(), Some(&[0.0, 0.0, 0.0][..]));
        assert_eq!(table.column("a").unwrap().as_f64(), Some(&[1.0, 1.0, 1.0][..]));
        assert_eq!(table.column_names(), ["a", "b", "c", "d"]);
    }

    #[test]
    fn test_assign_width_mismatch_leaves_table_untouched() {
        let mut table = create_test_table();
        let before = table.clone();
        let values = Table::new(vec![("x", Column::from(vec![0.0, 0.0, 0.0]))]).unwrap();
        let result = table.assign(&["a", "b"], values);

        assert!(matches!(
            result,
            Err(PreprocessingError::FeatureMismatch {
                expected_features: 2,
                got_features: 1
            })
        ));
        assert_eq!(table, before);
    }

    #[test]
    fn test_assign_row_mismatch() {
        let mut table = create_test_table();
        let values = Table::new(vec![("x", Column::from(vec![0.0]))]).unwrap();
        let result = table.assign(&["a"], values);
        assert!(matches!(result, Err(PreprocessingError::LengthMismatch { .. })));
    }

    #[test]
    fn test_clone_is_copy_on_write() {
        let original = create_test_table();
        let mut copy = original.clone();
        assert!(copy.shares_column(&original, "a"));

        if let ColumnSliceMut::Float64(values) = copy.column_mut("a").unwrap() {
            values[0] = 100.0;
        }

        assert!(!copy.shares_column(&original, "a"));
        assert_eq!(original.column("a").unwrap().as_f64(), Some(&[1.0, 2.0, 3.0][..]));
        assert_eq!(copy.column("a").unwrap().as_f64(), Some(&[100.0, 2.0, 3.0][..]));
    }

    #[test]
    fn test_deep_copy_allocates_new_buffers() {
        let original = create_test_table();
        let copy = original.deep_copy();
        assert_eq!(copy, original);
        assert!(!copy.shares_column(&original, "c"));
    }

    #[test]
    fn test_set_column_replaces_in_place() {
        let mut table = create_test_table();
        table.set_column("b", Column::from(vec![0.5, 0.5, 0.5])).unwrap();
        assert_eq!(table.column_names(), ["a", "b", "c", "d"]);
        assert_eq!(table.column("b").unwrap().dtype(), DataType::Float64);
    }

    #[cfg(feature = "ndarray")]
    #[test]
    fn test_to_array2_numeric() {
        let table = create_test_table().select(&["a", "b"]).unwrap();
        let array = table.to_array2().unwrap();
        assert_eq!(array.shape(), &[3, 2]);
        assert_eq!(array[[2, 1]], 30.0);
        assert!(create_test_table().to_array2().is_err());
    }
}

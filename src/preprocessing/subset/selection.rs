//! Column selection by name and data type.

use crate::preprocessing::error::PreprocessingError;
use crate::table::{DTypeSelector, Table};
use serde::{Deserialize, Serialize};

/// Which columns of a table a [`SubsetSelector`](super::SubsetSelector) works on.
///
/// The explicit column list narrows the table first; the dtype filters then
/// narrow that result further. An empty filter list means "no filter".
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ColumnSelection {
    /// Explicit column names, in the order the delegate should see them.
    pub columns: Option<Vec<String>>,
    /// Keep only columns matched by one of these selectors.
    pub include_dtypes: Vec<DTypeSelector>,
    /// Drop columns matched by any of these selectors.
    pub exclude_dtypes: Vec<DTypeSelector>,
}

impl ColumnSelection {
    /// Selection covering every column.
    pub fn all() -> Self {
        Self::default()
    }

    /// Whether any dtype filter is set.
    pub fn filters_dtypes(&self) -> bool {
        !self.include_dtypes.is_empty() || !self.exclude_dtypes.is_empty()
    }

    /// Resolve the selection against `table`.
    ///
    /// The returned sub-table shares column buffers with `table`.
    ///
    /// # Errors
    /// - [`PreprocessingError::UnknownColumn`] if an explicit column is missing
    /// - [`PreprocessingError::InvalidParameter`] if the dtype filters overlap
    pub fn select(&self, table: &Table) -> Result<Table, PreprocessingError> {
        let subset = match &self.columns {
            Some(columns) => table.select(columns)?,
            None => table.clone(),
        };
        if self.filters_dtypes() {
            subset.select_dtypes(&self.include_dtypes, &self.exclude_dtypes)
        } else {
            Ok(subset)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::{Column, DataType};

    fn create_test_table() -> Table {
        Table::new(vec![
            ("a", Column::from(vec![1.0, 2.0])),
            ("b", Column::from(vec![3i64, 4])),
            ("c", Column::from(vec!["x", "y"])),
            ("d", Column::from(vec![5.0, 6.0])),
        ])
        .unwrap()
    }

    #[test]
    fn test_selection_all() {
        let table = create_test_table();
        let subset = ColumnSelection::all().select(&table).unwrap();
        assert_eq!(subset, table);
    }

    #[test]
    fn test_dtype_filter_applies_within_explicit_columns() {
        let table = create_test_table();
        let selection = ColumnSelection {
            columns: Some(vec!["a".into(), "b".into(), "c".into()]),
            include_dtypes: vec![DTypeSelector::Numeric],
            exclude_dtypes: vec![],
        };
        let subset = selection.select(&table).unwrap();
        // "d" is numeric too but was never part of the explicit list
        assert_eq!(subset.column_names(), ["a", "b"]);
    }

    #[test]
    fn test_exclude_filter_only() {
        let table = create_test_table();
        let selection = ColumnSelection {
            exclude_dtypes: vec![DataType::Float64.into()],
            ..ColumnSelection::default()
        };
        let subset = selection.select(&table).unwrap();
        assert_eq!(subset.column_names(), ["b", "c"]);
    }

    #[test]
    fn test_unknown_column() {
        let table = create_test_table();
        let selection = ColumnSelection {
            columns: Some(vec!["a".into(), "zzz".into()]),
            ..ColumnSelection::default()
        };
        let result = selection.select(&table);
        assert!(matches!(result, Err(PreprocessingError::UnknownColumn(name)) if name == "zzz"));
    }
}

//! CSV loading with per-column type inference.

use super::{Column, Table};
use crate::preprocessing::error::PreprocessingError;
use csv::ReaderBuilder;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

impl Table {
    /// Read a headed CSV document into a table.
    ///
    /// Each column gets the narrowest type all of its cells parse as, tried in
    /// the order `Int64`, `Float64`, `Boolean`, `Utf8`. Empty cells are only
    /// accepted by float columns, where they become `NaN`.
    pub fn from_csv_reader<R: Read>(reader: R) -> Result<Self, PreprocessingError> {
        let mut rdr = ReaderBuilder::new().has_headers(true).from_reader(reader);

        let headers: Vec<String> = rdr.headers()?.iter().map(str::to_string).collect();
        let mut cells: Vec<Vec<String>> = vec![Vec::new(); headers.len()];

        for result in rdr.records() {
            let record = result?;
            for (column, field) in cells.iter_mut().zip(record.iter()) {
                column.push(field.trim().to_string());
            }
        }

        let columns: Vec<(String, Column)> = headers
            .into_iter()
            .zip(cells)
            .map(|(name, values)| (name, infer_column(values)))
            .collect();
        Table::new(columns)
    }

    /// Read a headed CSV file into a table.
    pub fn from_csv_path<P: AsRef<Path>>(path: P) -> Result<Self, PreprocessingError> {
        let file = File::open(path)?;
        Self::from_csv_reader(BufReader::new(file))
    }
}

fn infer_column(values: Vec<String>) -> Column {
    if values.is_empty() {
        return Column::Utf8(values);
    }

    if let Some(ints) = values
        .iter()
        .map(|v| v.parse::<i64>().ok())
        .collect::<Option<Vec<_>>>()
    {
        return Column::Int64(ints);
    }

    if values.iter().any(|v| !v.is_empty()) {
        let floats = values
            .iter()
            .map(|v| match v.as_str() {
                "" => Some(f64::NAN),
                v => v.parse::<f64>().ok(),
            })
            .collect::<Option<Vec<_>>>();
        if let Some(floats) = floats {
            return Column::Float64(floats);
        }
    }

    if let Some(bools) = values
        .iter()
        .map(|v| parse_bool(v))
        .collect::<Option<Vec<_>>>()
    {
        return Column::Boolean(bools);
    }

    Column::Utf8(values)
}

fn parse_bool(value: &str) -> Option<bool> {
    if value.eq_ignore_ascii_case("true") {
        Some(true)
    } else if value.eq_ignore_ascii_case("false") {
        Some(false)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::DataType;

    const PASSENGERS: &str = "\
pclass,sex,age,fare,survived
1,female,29,211.3375,true
3,male,,7.25,false
2,male,32,10.5,FALSE
";

    #[test]
    fn test_from_csv_infers_types() {
        let table = Table::from_csv_reader(PASSENGERS.as_bytes()).unwrap();

        assert_eq!(table.n_rows(), 3);
        assert_eq!(
            table.dtypes(),
            vec![
                ("pclass", DataType::Int64),
                ("sex", DataType::Utf8),
                ("age", DataType::Float64),
                ("fare", DataType::Float64),
                ("survived", DataType::Boolean),
            ]
        );
    }

    #[test]
    fn test_from_csv_empty_cell_becomes_nan() {
        let table = Table::from_csv_reader(PASSENGERS.as_bytes()).unwrap();
        let age = table.column("age").unwrap().as_f64().unwrap();
        assert_eq!(age[0], 29.0);
        assert!(age[1].is_nan());
    }

    #[test]
    fn test_from_csv_headers_only() {
        let table = Table::from_csv_reader("a,b\n".as_bytes()).unwrap();
        assert_eq!(table.n_rows(), 0);
        assert_eq!(table.column_names(), ["a", "b"]);
    }

    #[test]
    fn test_from_csv_ragged_rows_fail() {
        let result = Table::from_csv_reader("a,b\n1,2\n3\n".as_bytes());
        assert!(matches!(result, Err(PreprocessingError::Csv(_))));
    }

    #[test]
    fn test_from_csv_missing_file() {
        let result = Table::from_csv_path("/nonexistent/passengers.csv");
        assert!(matches!(result, Err(PreprocessingError::Io(_))));
    }
}

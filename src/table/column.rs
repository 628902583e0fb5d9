//! Typed column storage and data-type selectors.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Declared data type of a [`Column`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DataType {
    Float64,
    Int64,
    Boolean,
    Utf8,
}

impl DataType {
    /// Every supported data type.
    pub const ALL: [DataType; 4] = [
        DataType::Float64,
        DataType::Int64,
        DataType::Boolean,
        DataType::Utf8,
    ];

    /// Whether values of this type are numbers.
    pub fn is_numeric(self) -> bool {
        matches!(self, DataType::Float64 | DataType::Int64)
    }
}

impl fmt::Display for DataType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            DataType::Float64 => "float64",
            DataType::Int64 => "int64",
            DataType::Boolean => "boolean",
            DataType::Utf8 => "utf8",
        };
        f.write_str(name)
    }
}

/// One entry of an include/exclude data-type filter.
///
/// `Numeric` matches every numeric type, so `include = [Numeric]` keeps
/// integer and float columns alike.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DTypeSelector {
    /// Any numeric type.
    Numeric,
    /// Exactly this type.
    Exact(DataType),
}

impl DTypeSelector {
    /// Whether a column of `dtype` is matched by this selector.
    pub fn matches(self, dtype: DataType) -> bool {
        match self {
            DTypeSelector::Numeric => dtype.is_numeric(),
            DTypeSelector::Exact(expected) => expected == dtype,
        }
    }

    /// Whether some data type is matched by both selectors.
    pub fn overlaps(self, other: DTypeSelector) -> bool {
        DataType::ALL
            .iter()
            .any(|&dtype| self.matches(dtype) && other.matches(dtype))
    }
}

impl From<DataType> for DTypeSelector {
    fn from(dtype: DataType) -> Self {
        DTypeSelector::Exact(dtype)
    }
}

impl fmt::Display for DTypeSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DTypeSelector::Numeric => f.write_str("numeric"),
            DTypeSelector::Exact(dtype) => write!(f, "{}", dtype),
        }
    }
}

/// A single column of values sharing one data type.
///
/// Missing floating point values are represented as `NaN`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum Column {
    Float64(Vec<f64>),
    Int64(Vec<i64>),
    Boolean(Vec<bool>),
    Utf8(Vec<String>),
}

/// Mutable, length-preserving view into a column's values.
#[derive(Debug)]
pub enum ColumnSliceMut<'a> {
    Float64(&'a mut [f64]),
    Int64(&'a mut [i64]),
    Boolean(&'a mut [bool]),
    Utf8(&'a mut [String]),
}

impl Column {
    /// Number of values in the column.
    pub fn len(&self) -> usize {
        match self {
            Column::Float64(v) => v.len(),
            Column::Int64(v) => v.len(),
            Column::Boolean(v) => v.len(),
            Column::Utf8(v) => v.len(),
        }
    }

    /// Check if the column holds no values.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Declared data type.
    pub fn dtype(&self) -> DataType {
        match self {
            Column::Float64(_) => DataType::Float64,
            Column::Int64(_) => DataType::Int64,
            Column::Boolean(_) => DataType::Boolean,
            Column::Utf8(_) => DataType::Utf8,
        }
    }

    /// Borrow the values of a `Float64` column.
    pub fn as_f64(&self) -> Option<&[f64]> {
        match self {
            Column::Float64(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_i64(&self) -> Option<&[i64]> {
        match self {
            Column::Int64(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<&[bool]> {
        match self {
            Column::Boolean(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&[String]> {
        match self {
            Column::Utf8(v) => Some(v),
            _ => None,
        }
    }

    /// Numeric values widened to `f64`, or `None` for non-numeric columns.
    pub fn to_f64_vec(&self) -> Option<Vec<f64>> {
        match self {
            Column::Float64(v) => Some(v.clone()),
            Column::Int64(v) => Some(v.iter().map(|&x| x as f64).collect()),
            _ => None,
        }
    }

    /// Mutable access to the values without the ability to resize them.
    pub fn as_slice_mut(&mut self) -> ColumnSliceMut<'_> {
        match self {
            Column::Float64(v) => ColumnSliceMut::Float64(v.as_mut_slice()),
            Column::Int64(v) => ColumnSliceMut::Int64(v.as_mut_slice()),
            Column::Boolean(v) => ColumnSliceMut::Boolean(v.as_mut_slice()),
            Column::Utf8(v) => ColumnSliceMut::Utf8(v.as_mut_slice()),
        }
    }

    /// Convert a numeric column into an `ndarray` vector.
    #[cfg(feature = "ndarray")]
    pub fn to_array1(&self) -> Option<ndarray::Array1<f64>> {
        self.to_f64_vec().map(ndarray::Array1::from)
    }
}

impl From<Vec<f64>> for Column {
    fn from(values: Vec<f64>) -> Self {
        Column::Float64(values)
    }
}

impl From<Vec<i64>> for Column {
    fn from(values: Vec<i64>) -> Self {
        Column::Int64(values)
    }
}

impl From<Vec<bool>> for Column {
    fn from(values: Vec<bool>) -> Self {
        Column::Boolean(values)
    }
}

impl From<Vec<String>> for Column {
    fn from(values: Vec<String>) -> Self {
        Column::Utf8(values)
    }
}

impl From<Vec<&str>> for Column {
    fn from(values: Vec<&str>) -> Self {
        Column::Utf8(values.into_iter().map(str::to_string).collect())
    }
}

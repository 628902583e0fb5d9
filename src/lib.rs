//! # column-adapters
//!
//! Adapters that apply ordinary fit/transform transformers to named-column
//! tables, either to a chosen subset of columns or independently to every
//! column.
//!
//! ## Core Design Principles
//!
//! - **Named columns**: a [`Table`] is an ordered set of typed columns of equal
//!   length; adapters select, replace and pass columns through by name.
//! - **Delegation**: adapters never compute anything themselves. They slice
//!   the table, hand the pieces to wrapped transformers and write the results
//!   back.
//! - **Cheap copies**: cloning a [`Table`] shares column buffers until one of
//!   the copies is written to, so `copy = true` costs little.
//!
//! ## Quick Start
//!
//! ```rust
//! use column_adapters::preprocessing::{Delegate, SubsetSelector, TableTransformer, Transformer};
//! use column_adapters::preprocessing::PreprocessingError;
//! use column_adapters::table::{Column, DTypeSelector, Table};
//!
//! /// Doubles every numeric column.
//! struct Double;
//!
//! impl Transformer<Table> for Double {
//!     fn fit(&mut self, _data: &Table) -> Result<(), PreprocessingError> {
//!         Ok(())
//!     }
//!
//!     fn transform(&self, data: &Table) -> Result<Table, PreprocessingError> {
//!         let mut columns = Vec::new();
//!         for (name, column) in data.iter() {
//!             let values = column.to_f64_vec().unwrap_or_default();
//!             columns.push((name, Column::Float64(values.iter().map(|v| v * 2.0).collect())));
//!         }
//!         Table::new(columns)
//!     }
//! }
//!
//! let mut table = Table::new(vec![
//!     ("age", Column::from(vec![22.0, 38.0])),
//!     ("name", Column::from(vec!["Braund", "Cumings"])),
//! ])
//! .unwrap();
//!
//! let mut selector = SubsetSelector::new(Delegate::unsupervised(Double))
//!     .include_dtypes([DTypeSelector::Numeric]);
//! let out = selector.fit_transform(&mut table, None).unwrap();
//!
//! assert_eq!(out.column("age").unwrap(), &Column::from(vec![44.0, 76.0]));
//! assert_eq!(out.column("name").unwrap(), table.column("name").unwrap());
//! ```
//!
//! ## Module Structure
//!
//! - `table`: Named-column tables, column types and CSV loading
//! - `preprocessing`: Transformer traits, the adapters and the table pipeline
//! - `serialization`: Configuration persistence

/// Named-column tables and dtype selection.
pub mod table;

/// Column adapters, transformer traits and pipelines.
pub mod preprocessing;

/// Configuration persistence.
pub mod serialization;

#[cfg(test)]
mod testing;

/// Re-export of core types for convenient usage.
pub use preprocessing::{
    Delegate, PerColumnTransformer, PreprocessingError, SubsetSelector, TablePipeline,
    TableTransformer,
};
pub use table::{Column, DTypeSelector, DataType, Table};

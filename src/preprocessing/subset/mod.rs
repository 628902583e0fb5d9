//! Fitting and transforming a subset of a table's columns.
//!
//! This module provides the [`SubsetSelector`], which narrows a table to the
//! columns named in a [`ColumnSelection`] and/or matching its dtype filters,
//! and hands that sub-table to a single wrapped transformer.

mod selection;
mod selector;

pub use selection::ColumnSelection;
pub use selector::SubsetSelector;

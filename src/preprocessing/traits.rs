//! Core traits for preprocessing transformers.
//!
//! Wrapped transformers implement one of two narrow capabilities:
//! - [`Transformer`]: learns from the data alone and never sees labels.
//! - [`SupervisedTransformer`]: additionally receives the optional label column.
//!
//! The adapters themselves implement [`TableTransformer`], the contract a
//! pipeline orchestrator drives.

use crate::preprocessing::error::PreprocessingError;
use crate::table::{Column, Table};

/// Transformer that learns from the data alone.
///
/// `D` is the unit of data the transformer works on: a whole [`Table`] for
/// [`SubsetSelector`](crate::preprocessing::SubsetSelector) delegates, a single
/// [`Column`] for [`PerColumnTransformer`](crate::preprocessing::PerColumnTransformer)
/// delegates.
///
/// # Example
/// ```rust
/// use column_adapters::preprocessing::{PreprocessingError, Transformer};
/// use column_adapters::table::Column;
///
/// #[derive(Default)]
/// struct Center {
///     mean: f64,
/// }
///
/// impl Transformer<Column> for Center {
///     fn fit(&mut self, data: &Column) -> Result<(), PreprocessingError> {
///         let values = data.to_f64_vec().unwrap_or_default();
///         self.mean = values.iter().sum::<f64>() / values.len().max(1) as f64;
///         Ok(())
///     }
///
///     fn transform(&self, data: &Column) -> Result<Column, PreprocessingError> {
///         let values = data.to_f64_vec().unwrap_or_default();
///         Ok(Column::Float64(values.iter().map(|v| v - self.mean).collect()))
///     }
/// }
/// ```
pub trait Transformer<D> {
    /// Learn parameters from `data`.
    fn fit(&mut self, data: &D) -> Result<(), PreprocessingError>;

    /// Transform `data` using the learned parameters.
    fn transform(&self, data: &D) -> Result<D, PreprocessingError>;

    /// Fit the transformer and transform the data in one step.
    fn fit_transform(&mut self, data: &D) -> Result<D, PreprocessingError> {
        self.fit(data)?;
        self.transform(data)
    }
}

/// Transformer that also receives the optional label column.
pub trait SupervisedTransformer<D> {
    /// Learn parameters from `data` and `labels`.
    fn fit(&mut self, data: &D, labels: Option<&Column>) -> Result<(), PreprocessingError>;

    /// Transform `data` using the learned parameters.
    fn transform(&self, data: &D, labels: Option<&Column>) -> Result<D, PreprocessingError>;

    /// Fit the transformer and transform the data in one step.
    fn fit_transform(
        &mut self,
        data: &D,
        labels: Option<&Column>,
    ) -> Result<D, PreprocessingError> {
        self.fit(data, labels)?;
        self.transform(data, labels)
    }
}

/// A fit/transform stage over whole tables.
///
/// `transform` and `fit_transform` receive the table mutably: stages created
/// with `copy = false` write their output into it, stages with `copy = true`
/// leave it untouched. Either way the output is returned.
pub trait TableTransformer {
    /// Fit the stage on `data`.
    fn fit(&mut self, data: &Table, labels: Option<&Column>) -> Result<(), PreprocessingError>;

    /// Transform `data` with the fitted state.
    fn transform(
        &self,
        data: &mut Table,
        labels: Option<&Column>,
    ) -> Result<Table, PreprocessingError>;

    /// Fit on `data` and return its transformation.
    fn fit_transform(
        &mut self,
        data: &mut Table,
        labels: Option<&Column>,
    ) -> Result<Table, PreprocessingError>;

    /// Get the step name for debugging.
    fn step_name(&self) -> &'static str;
}

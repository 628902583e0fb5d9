//! PerColumnTransformer implementation.
//!
//! Builds one transformer per column from a factory, fits each on its own
//! column only and writes each column's output back.

use crate::preprocessing::config::PerColumnConfig;
use crate::preprocessing::delegate::Delegate;
use crate::preprocessing::error::PreprocessingError;
use crate::preprocessing::traits::TableTransformer;
use crate::table::{Column, Table};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::HashMap;

/// Construction arguments handed to the factory for every column.
///
/// Every [`PerColumnTransformer`] owns its own arguments; the default is a
/// fresh, empty set.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TransformerArgs {
    /// Positional arguments.
    pub args: Vec<Value>,
    /// Named arguments.
    pub kwargs: Map<String, Value>,
}

impl TransformerArgs {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a positional argument.
    pub fn arg(mut self, value: impl Into<Value>) -> Self {
        self.args.push(value.into());
        self
    }

    /// Set a named argument.
    pub fn kwarg(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.kwargs.insert(name.into(), value.into());
        self
    }
}

/// Builds a fresh, unfitted transformer from the construction arguments.
pub type TransformerFactory =
    Box<dyn Fn(&TransformerArgs) -> Result<Delegate<Column>, PreprocessingError>>;

enum FitState {
    Unfitted,
    Fitted(HashMap<String, Delegate<Column>>),
}

/// Fits and applies an independent transformer to every column of a table.
///
/// `fit` and `fit_transform` build a new transformer per column through the
/// factory and replace any previously fitted set. Refitting does not merge by
/// column name: columns missing from the new fit lose their transformer.
/// `transform` reuses the fitted set and fails with
/// [`PreprocessingError::NotFitted`] before any fit.
///
/// # Example
/// ```ignore
/// use column_adapters::preprocessing::{
///     Delegate, PerColumnTransformer, TableTransformer, TransformerArgs,
/// };
///
/// let mut per_column = PerColumnTransformer::new(|args: &TransformerArgs| {
///     Ok(Delegate::unsupervised(QuantileBinner::from_args(args)?))
/// })
/// .with_args(TransformerArgs::new().kwarg("n_bins", 4));
///
/// let binned = per_column.fit_transform(&mut table, None)?;
/// ```
pub struct PerColumnTransformer {
    factory: TransformerFactory,
    args: TransformerArgs,
    copy: bool,
    state: FitState,
}

impl PerColumnTransformer {
    /// Create an unfitted transformer with empty construction arguments.
    pub fn new<F>(factory: F) -> Self
    where
        F: Fn(&TransformerArgs) -> Result<Delegate<Column>, PreprocessingError> + 'static,
    {
        Self {
            factory: Box::new(factory),
            args: TransformerArgs::default(),
            copy: true,
            state: FitState::Unfitted,
        }
    }

    /// Build from a loaded configuration.
    pub fn from_config<F>(factory: F, config: PerColumnConfig) -> Self
    where
        F: Fn(&TransformerArgs) -> Result<Delegate<Column>, PreprocessingError> + 'static,
    {
        Self::new(factory)
            .with_args(config.transformer_args)
            .with_copy(config.copy)
    }

    /// Arguments handed to the factory for every column.
    pub fn with_args(mut self, args: TransformerArgs) -> Self {
        self.args = args;
        self
    }

    /// Whether transform works on a duplicate of its input.
    pub fn with_copy(mut self, copy: bool) -> Self {
        self.copy = copy;
        self
    }

    /// The construction arguments.
    pub fn args(&self) -> &TransformerArgs {
        &self.args
    }

    /// Whether transform works on a duplicate of its input.
    pub fn copy(&self) -> bool {
        self.copy
    }

    /// Current configuration, ready to be saved.
    pub fn config(&self) -> PerColumnConfig {
        PerColumnConfig {
            transformer_args: self.args.clone(),
            copy: self.copy,
        }
    }

    /// Check if `fit` or `fit_transform` has succeeded at least once.
    pub fn is_fitted(&self) -> bool {
        matches!(self.state, FitState::Fitted(_))
    }

    /// Names of the columns with a fitted transformer, sorted.
    pub fn fitted_columns(&self) -> Vec<&str> {
        let mut names: Vec<&str> = match &self.state {
            FitState::Unfitted => Vec::new(),
            FitState::Fitted(map) => map.keys().map(String::as_str).collect(),
        };
        names.sort_unstable();
        names
    }

    /// The fitted transformer for `column`, if any.
    pub fn fitted(&self, column: &str) -> Option<&Delegate<Column>> {
        match &self.state {
            FitState::Unfitted => None,
            FitState::Fitted(map) => map.get(column),
        }
    }

    fn build(&self) -> Result<Delegate<Column>, PreprocessingError> {
        (self.factory)(&self.args)
    }

    fn fitted_map(&self) -> Result<&HashMap<String, Delegate<Column>>, PreprocessingError> {
        match &self.state {
            FitState::Unfitted => Err(PreprocessingError::NotFitted("PerColumnTransformer")),
            FitState::Fitted(map) => Ok(map),
        }
    }

    /// Replace columns of `data` (or of a copy of it) with `outputs`.
    fn write_back(
        &self,
        data: &mut Table,
        outputs: Vec<(String, Column)>,
    ) -> Result<Table, PreprocessingError> {
        if let Some((name, column)) = outputs.iter().find(|(_, c)| c.len() != data.n_rows()) {
            return Err(PreprocessingError::LengthMismatch {
                column: name.clone(),
                expected: data.n_rows(),
                got: column.len(),
            });
        }

        let mut copied;
        let target = if self.copy {
            copied = data.clone();
            &mut copied
        } else {
            data
        };
        for (name, column) in outputs {
            target.set_column(name, column)?;
        }
        Ok(target.clone())
    }
}

impl TableTransformer for PerColumnTransformer {
    fn fit(&mut self, data: &Table, labels: Option<&Column>) -> Result<(), PreprocessingError> {
        let mut fitted = HashMap::with_capacity(data.n_columns());
        for (name, column) in data.iter() {
            let mut transformer = self.build()?;
            transformer.fit(column, labels)?;
            fitted.insert(name.to_string(), transformer);
        }

        tracing::debug!(columns = fitted.len(), "fitted per-column transformers");
        self.state = FitState::Fitted(fitted);
        Ok(())
    }

    fn transform(
        &self,
        data: &mut Table,
        labels: Option<&Column>,
    ) -> Result<Table, PreprocessingError> {
        let fitted = self.fitted_map()?;

        let mut outputs = Vec::with_capacity(data.n_columns());
        for (name, column) in data.iter() {
            let transformer = fitted
                .get(name)
                .ok_or_else(|| PreprocessingError::UnseenColumn(name.to_string()))?;
            outputs.push((name.to_string(), transformer.transform(column, labels)?));
        }

        self.write_back(data, outputs)
    }

    fn fit_transform(
        &mut self,
        data: &mut Table,
        labels: Option<&Column>,
    ) -> Result<Table, PreprocessingError> {
        let mut fitted = HashMap::with_capacity(data.n_columns());
        let mut outputs = Vec::with_capacity(data.n_columns());
        for (name, column) in data.iter() {
            let mut transformer = self.build()?;
            outputs.push((name.to_string(), transformer.fit_transform(column, labels)?));
            fitted.insert(name.to_string(), transformer);
        }

        let out = self.write_back(data, outputs)?;
        tracing::debug!(columns = fitted.len(), "fitted per-column transformers");
        self.state = FitState::Fitted(fitted);
        Ok(out)
    }

    fn step_name(&self) -> &'static str {
        "PerColumnTransformer"
    }
}

//! Pipeline for chaining table transformers.
//!
//! A [`TablePipeline`] runs [`TableTransformer`] stages in sequence, where the
//! output of one stage becomes the input to the next.
//!
//! # Example
//! ```ignore
//! use column_adapters::preprocessing::{SubsetSelector, PerColumnTransformer, TablePipeline};
//!
//! let mut pipeline = TablePipeline::new()
//!     .add("impute", SubsetSelector::new(imputer).include_dtypes([DTypeSelector::Numeric]))
//!     .add("bin", PerColumnTransformer::new(binner_factory));
//!
//! pipeline.fit(&train, Some(&labels))?;
//! let prepared = pipeline.transform(&mut test, None)?;
//! ```

use crate::preprocessing::error::PreprocessingError;
use crate::preprocessing::traits::TableTransformer;
use crate::table::{Column, Table};

/// A sequence of named table transformer stages.
///
/// During `fit`, every stage but the last is fitted and transformed so the
/// next stage is fitted on the data it will see; the last stage is only
/// fitted. The pipeline works on its own copy of the input unless created
/// with `copy = false`, in which case the final output is written back.
pub struct TablePipeline {
    steps: Vec<(String, Box<dyn TableTransformer>)>,
    copy: bool,
}

impl Default for TablePipeline {
    fn default() -> Self {
        Self::new()
    }
}

impl TablePipeline {
    /// Create a new empty pipeline.
    pub fn new() -> Self {
        Self {
            steps: Vec::new(),
            copy: true,
        }
    }

    /// Append a named stage.
    pub fn add(self, name: impl Into<String>, stage: impl TableTransformer + 'static) -> Self {
        self.add_boxed(name, Box::new(stage))
    }

    /// Append an already boxed stage.
    pub fn add_boxed(mut self, name: impl Into<String>, stage: Box<dyn TableTransformer>) -> Self {
        self.steps.push((name.into(), stage));
        self
    }

    /// Whether the input table is left untouched by transform.
    pub fn with_copy(mut self, copy: bool) -> Self {
        self.copy = copy;
        self
    }

    /// Get the number of steps in the pipeline.
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    /// Check if the pipeline is empty.
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Stage names in execution order.
    pub fn step_names(&self) -> Vec<&str> {
        self.steps.iter().map(|(name, _)| name.as_str()).collect()
    }

    fn ensure_not_empty(&self) -> Result<(), PreprocessingError> {
        if self.steps.is_empty() {
            return Err(PreprocessingError::InvalidParameter(
                "Cannot run an empty pipeline".to_string(),
            ));
        }
        Ok(())
    }

    fn finish(&self, data: &mut Table, output: Table) -> Table {
        if !self.copy {
            *data = output.clone();
        }
        output
    }
}

impl TableTransformer for TablePipeline {
    fn fit(&mut self, data: &Table, labels: Option<&Column>) -> Result<(), PreprocessingError> {
        self.ensure_not_empty()?;

        let last = self.steps.len() - 1;
        let mut current = data.clone();
        for (idx, (name, step)) in self.steps.iter_mut().enumerate() {
            if idx == last {
                step.fit(&current, labels)?;
            } else {
                current = step.fit_transform(&mut current, labels)?;
            }
            tracing::debug!(step = name.as_str(), kind = step.step_name(), "fitted pipeline step");
        }
        Ok(())
    }

    fn transform(
        &self,
        data: &mut Table,
        labels: Option<&Column>,
    ) -> Result<Table, PreprocessingError> {
        self.ensure_not_empty()?;

        let mut current = data.clone();
        for (_, step) in &self.steps {
            current = step.transform(&mut current, labels)?;
        }
        Ok(self.finish(data, current))
    }

    fn fit_transform(
        &mut self,
        data: &mut Table,
        labels: Option<&Column>,
    ) -> Result<Table, PreprocessingError> {
        self.ensure_not_empty()?;

        let mut current = data.clone();
        for (name, step) in self.steps.iter_mut() {
            current = step.fit_transform(&mut current, labels)?;
            tracing::debug!(step = name.as_str(), kind = step.step_name(), "fitted pipeline step");
        }
        Ok(self.finish(data, current))
    }

    fn step_name(&self) -> &'static str {
        "TablePipeline"
    }
}

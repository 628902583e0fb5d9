//! SubsetSelector implementation.
//!
//! Fits and transforms a single wrapped transformer on a subset of a table's
//! columns and writes the output back into those columns.

use super::selection::ColumnSelection;
use crate::preprocessing::config::SubsetSelectorConfig;
use crate::preprocessing::delegate::Delegate;
use crate::preprocessing::error::PreprocessingError;
use crate::preprocessing::traits::TableTransformer;
use crate::table::{Column, DTypeSelector, Table};

/// Applies one transformer to a subset of columns, chosen by name and/or type.
///
/// Columns outside the subset pass through unchanged. With `copy = true`
/// (the default) `transform` and `fit_transform` leave the input table as it
/// was; with `copy = false` they write the output into it.
///
/// # Example
/// ```ignore
/// use column_adapters::preprocessing::{Delegate, SubsetSelector, TableTransformer};
/// use column_adapters::table::DTypeSelector;
///
/// // Scale every numeric column, leave the others alone
/// let mut selector = SubsetSelector::new(Delegate::unsupervised(MyScaler::default()))
///     .include_dtypes([DTypeSelector::Numeric]);
///
/// let scaled = selector.fit_transform(&mut table, None)?;
/// ```
pub struct SubsetSelector {
    transformer: Delegate<Table>,
    selection: ColumnSelection,
    copy: bool,
}

impl SubsetSelector {
    /// Wrap `transformer`, selecting every column and copying on transform.
    pub fn new(transformer: Delegate<Table>) -> Self {
        Self {
            transformer,
            selection: ColumnSelection::all(),
            copy: true,
        }
    }

    /// Build from a loaded configuration.
    pub fn from_config(transformer: Delegate<Table>, config: SubsetSelectorConfig) -> Self {
        Self {
            transformer,
            selection: config.selection,
            copy: config.copy,
        }
    }

    /// Restrict the subset to these columns, in this order.
    pub fn with_columns<I, S>(mut self, columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.selection.columns = Some(columns.into_iter().map(Into::into).collect());
        self
    }

    /// Keep only columns whose type matches one of `selectors`.
    pub fn include_dtypes(mut self, selectors: impl IntoIterator<Item = DTypeSelector>) -> Self {
        self.selection.include_dtypes = selectors.into_iter().collect();
        self
    }

    /// Drop columns whose type matches any of `selectors`.
    pub fn exclude_dtypes(mut self, selectors: impl IntoIterator<Item = DTypeSelector>) -> Self {
        self.selection.exclude_dtypes = selectors.into_iter().collect();
        self
    }

    /// Whether transform works on a duplicate of its input.
    pub fn with_copy(mut self, copy: bool) -> Self {
        self.copy = copy;
        self
    }

    /// The columns this selector works on.
    pub fn selection(&self) -> &ColumnSelection {
        &self.selection
    }

    /// Whether transform works on a duplicate of its input.
    pub fn copy(&self) -> bool {
        self.copy
    }

    /// The wrapped transformer.
    pub fn transformer(&self) -> &Delegate<Table> {
        &self.transformer
    }

    /// Current configuration, ready to be saved.
    pub fn config(&self) -> SubsetSelectorConfig {
        SubsetSelectorConfig {
            selection: self.selection.clone(),
            copy: self.copy,
        }
    }

    /// Run `call` on the selected columns of `data` (or of a copy of it) and
    /// write its output back into them.
    fn apply<F>(
        selection: &ColumnSelection,
        copy: bool,
        data: &mut Table,
        call: F,
    ) -> Result<Table, PreprocessingError>
    where
        F: FnOnce(&Table) -> Result<Table, PreprocessingError>,
    {
        let mut copied;
        let target = if copy {
            copied = data.clone();
            &mut copied
        } else {
            data
        };

        let subset = select_subset(selection, target)?;
        let names = subset.column_names().to_vec();
        let output = call(&subset)?;
        target.assign(&names, output)?;
        Ok(target.clone())
    }
}

fn select_subset(selection: &ColumnSelection, data: &Table) -> Result<Table, PreprocessingError> {
    let subset = selection.select(data)?;
    tracing::debug!(
        columns = ?subset.column_names(),
        rows = subset.n_rows(),
        "selected column subset"
    );
    Ok(subset)
}

impl TableTransformer for SubsetSelector {
    fn fit(&mut self, data: &Table, labels: Option<&Column>) -> Result<(), PreprocessingError> {
        let subset = select_subset(&self.selection, data)?;
        self.transformer.fit(&subset, labels)
    }

    fn transform(
        &self,
        data: &mut Table,
        labels: Option<&Column>,
    ) -> Result<Table, PreprocessingError> {
        let transformer = &self.transformer;
        Self::apply(&self.selection, self.copy, data, |subset| {
            transformer.transform(subset, labels)
        })
    }

    fn fit_transform(
        &mut self,
        data: &mut Table,
        labels: Option<&Column>,
    ) -> Result<Table, PreprocessingError> {
        let transformer = &mut self.transformer;
        Self::apply(&self.selection, self.copy, data, |subset| {
            transformer.fit_transform(subset, labels)
        })
    }

    fn step_name(&self) -> &'static str {
        "SubsetSelector"
    }
}

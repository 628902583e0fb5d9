//! Recording stub transformers shared by the unit tests.

use crate::preprocessing::error::PreprocessingError;
use crate::preprocessing::per_column::TransformerArgs;
use crate::preprocessing::traits::{SupervisedTransformer, Transformer};
use crate::table::{Column, Table};
use std::cell::RefCell;
use std::rc::Rc;

/// One recorded delegate call.
#[derive(Clone, Debug, PartialEq)]
pub struct Call {
    pub operation: &'static str,
    pub columns: Vec<String>,
    pub values: Vec<Column>,
    pub labels: Option<Column>,
}

/// Shared log of delegate calls; clones append to the same log.
#[derive(Clone, Debug, Default)]
pub struct CallLog(Rc<RefCell<Vec<Call>>>);

impl CallLog {
    fn push(&self, call: Call) {
        self.0.borrow_mut().push(call);
    }

    pub fn calls(&self) -> Vec<Call> {
        self.0.borrow().clone()
    }

    pub fn operations(&self) -> Vec<&'static str> {
        self.0.borrow().iter().map(|c| c.operation).collect()
    }
}

fn numeric(column: &Column) -> Result<Vec<f64>, PreprocessingError> {
    column.to_f64_vec().ok_or_else(|| {
        PreprocessingError::Delegate(format!("expected numeric data, got {}", column.dtype()))
    })
}

fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        0.0
    } else {
        values.iter().sum::<f64>() / values.len() as f64
    }
}

/// Records every column it is given and returns it unchanged.
#[derive(Clone, Debug)]
pub struct ColumnProbe {
    log: CallLog,
}

impl ColumnProbe {
    pub fn new(log: CallLog) -> Self {
        Self { log }
    }

    fn record(&self, operation: &'static str, data: &Column) {
        self.log.push(Call {
            operation,
            columns: Vec::new(),
            values: vec![data.clone()],
            labels: None,
        });
    }
}

impl Transformer<Column> for ColumnProbe {
    fn fit(&mut self, data: &Column) -> Result<(), PreprocessingError> {
        self.record("fit", data);
        Ok(())
    }

    fn transform(&self, data: &Column) -> Result<Column, PreprocessingError> {
        self.record("transform", data);
        Ok(data.clone())
    }
}

/// Records the sub-tables it sees and doubles every numeric value.
#[derive(Clone, Debug)]
pub struct TableProbe {
    log: CallLog,
}

impl TableProbe {
    pub fn new(log: CallLog) -> Self {
        Self { log }
    }

    fn record(&self, operation: &'static str, data: &Table, labels: Option<&Column>) {
        self.log.push(Call {
            operation,
            columns: data.column_names().to_vec(),
            values: data.iter().map(|(_, col)| col.clone()).collect(),
            labels: labels.cloned(),
        });
    }

    fn doubled(data: &Table) -> Result<Table, PreprocessingError> {
        let mut columns = Vec::with_capacity(data.n_columns());
        for (name, column) in data.iter() {
            let values = numeric(column)?;
            columns.push((name, Column::Float64(values.iter().map(|v| v * 2.0).collect())));
        }
        Table::new(columns)
    }
}

impl Transformer<Table> for TableProbe {
    fn fit(&mut self, data: &Table) -> Result<(), PreprocessingError> {
        self.record("fit", data, None);
        Ok(())
    }

    fn transform(&self, data: &Table) -> Result<Table, PreprocessingError> {
        self.record("transform", data, None);
        Self::doubled(data)
    }

    fn fit_transform(&mut self, data: &Table) -> Result<Table, PreprocessingError> {
        self.record("fit_transform", data, None);
        Self::doubled(data)
    }
}

/// Same as [`TableProbe`] but declared to take labels.
#[derive(Clone, Debug)]
pub struct SupervisedTableProbe(pub TableProbe);

impl SupervisedTransformer<Table> for SupervisedTableProbe {
    fn fit(&mut self, data: &Table, labels: Option<&Column>) -> Result<(), PreprocessingError> {
        self.0.record("fit", data, labels);
        Ok(())
    }

    fn transform(
        &self,
        data: &Table,
        labels: Option<&Column>,
    ) -> Result<Table, PreprocessingError> {
        self.0.record("transform", data, labels);
        TableProbe::doubled(data)
    }
}

/// Subtracts the per-column means learned during fit.
#[derive(Clone, Debug, Default)]
pub struct TableCenter {
    means: Vec<f64>,
}

impl Transformer<Table> for TableCenter {
    fn fit(&mut self, data: &Table) -> Result<(), PreprocessingError> {
        self.means = data
            .iter()
            .map(|(_, col)| numeric(col).map(|v| mean(&v)))
            .collect::<Result<_, _>>()?;
        Ok(())
    }

    fn transform(&self, data: &Table) -> Result<Table, PreprocessingError> {
        if data.n_columns() != self.means.len() {
            return Err(PreprocessingError::FeatureMismatch {
                expected_features: self.means.len(),
                got_features: data.n_columns(),
            });
        }
        let mut columns = Vec::with_capacity(data.n_columns());
        for ((name, column), m) in data.iter().zip(&self.means) {
            let values = numeric(column)?;
            columns.push((name, Column::Float64(values.iter().map(|v| v - m).collect())));
        }
        Table::new(columns)
    }
}

/// Centers a single column and multiplies it by the `scale` keyword argument.
#[derive(Clone, Debug)]
pub struct ColumnCenter {
    scale: f64,
    mean: Option<f64>,
}

impl ColumnCenter {
    pub fn from_args(args: &TransformerArgs) -> Result<Self, PreprocessingError> {
        let scale = match args.kwargs.get("scale") {
            Some(value) => value.as_f64().ok_or_else(|| {
                PreprocessingError::InvalidParameter(format!(
                    "scale must be a number, got {}",
                    value
                ))
            })?,
            None => 1.0,
        };
        Ok(Self { scale, mean: None })
    }
}

impl Transformer<Column> for ColumnCenter {
    fn fit(&mut self, data: &Column) -> Result<(), PreprocessingError> {
        self.mean = Some(mean(&numeric(data)?));
        Ok(())
    }

    fn transform(&self, data: &Column) -> Result<Column, PreprocessingError> {
        let m = self
            .mean
            .ok_or(PreprocessingError::NotFitted("ColumnCenter"))?;
        let values = numeric(data)?;
        Ok(Column::Float64(
            values.iter().map(|v| (v - m) * self.scale).collect(),
        ))
    }
}

/// Adds the mean of the labels seen during fit to every value.
#[derive(Clone, Debug, Default)]
pub struct LabelOffset {
    offset: f64,
}

impl SupervisedTransformer<Column> for LabelOffset {
    fn fit(&mut self, data: &Column, labels: Option<&Column>) -> Result<(), PreprocessingError> {
        numeric(data)?;
        self.offset = match labels {
            Some(labels) => mean(&numeric(labels)?),
            None => 0.0,
        };
        Ok(())
    }

    fn transform(
        &self,
        data: &Column,
        _labels: Option<&Column>,
    ) -> Result<Column, PreprocessingError> {
        let values = numeric(data)?;
        Ok(Column::Float64(values.iter().map(|v| v + self.offset).collect()))
    }
}

/// Always fails with a delegate error.
#[derive(Clone, Debug, Default)]
pub struct Failing;

impl<D> Transformer<D> for Failing {
    fn fit(&mut self, _data: &D) -> Result<(), PreprocessingError> {
        Err(PreprocessingError::Delegate("boom".to_string()))
    }

    fn transform(&self, _data: &D) -> Result<D, PreprocessingError> {
        Err(PreprocessingError::Delegate("boom".to_string()))
    }
}
